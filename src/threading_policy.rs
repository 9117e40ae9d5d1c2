/*
 * // Copyright (c) Radzivon Bartoshyk. All rights reserved.
 * //
 * // Use of this source code is governed by a BSD-style
 * // license that can be found in the LICENSE file.
 */

use crate::ImageSize;
use rayon::ThreadPool;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub enum ThreadingPolicy {
    Single,
    Fixed(usize),
    Adaptive,
}

impl ThreadingPolicy {
    /// Maps the plain `threads` knob of the configs: 0 auto-sizes from the
    /// output, 1 stays on the calling thread.
    pub fn from_threads(threads: usize) -> ThreadingPolicy {
        match threads {
            0 => ThreadingPolicy::Adaptive,
            1 => ThreadingPolicy::Single,
            n => ThreadingPolicy::Fixed(n),
        }
    }

    pub fn thread_count(&self, for_size: ImageSize) -> usize {
        match self {
            ThreadingPolicy::Single => 1,
            ThreadingPolicy::Fixed(thread_count) => (*thread_count).max(1),
            ThreadingPolicy::Adaptive => {
                let box_size = 256 * 256;
                (for_size.width * for_size.height / box_size).clamp(1, 16)
            }
        }
    }

    pub fn get_pool(&self, for_size: ImageSize) -> Option<ThreadPool> {
        let threads_count = self.thread_count(for_size);
        if threads_count == 1 {
            return None;
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads_count)
            .use_current_thread()
            .build()
            .unwrap();
        Some(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_mapping() {
        let size = ImageSize::new(1920, 1080);
        assert_eq!(ThreadingPolicy::from_threads(1), ThreadingPolicy::Single);
        assert_eq!(ThreadingPolicy::from_threads(0), ThreadingPolicy::Adaptive);
        assert_eq!(ThreadingPolicy::from_threads(8), ThreadingPolicy::Fixed(8));
        assert_eq!(ThreadingPolicy::Single.thread_count(size), 1);
        assert_eq!(ThreadingPolicy::Fixed(0).thread_count(size), 1);
        assert!(ThreadingPolicy::Adaptive.thread_count(size) > 1);
        assert_eq!(
            ThreadingPolicy::Adaptive.thread_count(ImageSize::new(64, 64)),
            1
        );
    }
}
