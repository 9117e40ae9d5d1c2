/*
 * Copyright (c) Radzivon Bartoshyk. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::dispatch::{horizontal_scaler, vertical_scaler, ScaleRowsFn};
use crate::filter::Filter;
use crate::kernel::{make_kernel, Kernel};
use crate::threading_policy::ThreadingPolicy;
use crate::ImageSize;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rayon::ThreadPool;

/// One-axis resize description.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResizerConfig {
    /// Bits per sample, only 8 is supported.
    pub depth: usize,
    /// Input size in pixels along the resized axis.
    pub input: usize,
    /// Output size in pixels along the resized axis.
    pub output: usize,
    /// True for vertical resizes.
    pub vertical: bool,
    /// True if input and output are interlaced, vertical only.
    pub interlaced: bool,
    /// Pixels per pack, 1 for planar layouts, 4 for RGBA.
    pub pack: usize,
    /// Worker threads, 0 auto-sizes from the output.
    pub threads: usize,
    /// Force the portable kernels, useful for testing.
    pub disable_simd: bool,
}

impl Default for ResizerConfig {
    fn default() -> Self {
        ResizerConfig {
            depth: 8,
            input: 0,
            output: 0,
            vertical: false,
            interlaced: false,
            pack: 1,
            threads: 0,
            disable_simd: false,
        }
    }
}

/// One row band of an axis pass, ready to hand to the bound scaler.
struct Band<'a> {
    dst: &'a mut [u8],
    src: &'a [u8],
    cof: &'a [i16],
    off: &'a [i32],
    rows: usize,
}

/// Single-axis plane resizer.
///
/// Kernels are synthesized once at construction (two for interlaced
/// vertical resizes, one per field) and stay immutable, so a resizer can be
/// reused and shared across threads for any number of planes.
pub struct Resizer {
    cfg: ResizerConfig,
    kernels: Vec<Kernel>,
    scalers: Vec<ScaleRowsFn>,
}

impl Resizer {
    /// Builds a resizer for one axis.
    pub fn new(cfg: &ResizerConfig, filter: &Filter) -> Resizer {
        let mut cfg = *cfg;
        cfg.depth = 8;
        cfg.pack = cfg.pack.clamp(1, 4);
        if !cfg.vertical {
            // Horizontal passes see full-resolution rows either way.
            cfg.interlaced = false;
        }
        let mut kernels = vec![make_kernel(&cfg, filter, 0)];
        if cfg.vertical && cfg.interlaced {
            kernels.push(make_kernel(&cfg, filter, 1));
        }
        // Field kernels may trim to different tap counts, so each one gets
        // its own bound implementation.
        let scalers = kernels
            .iter()
            .map(|kernel| {
                if cfg.vertical {
                    vertical_scaler(kernel.taps, cfg.disable_simd)
                } else {
                    horizontal_scaler(kernel.taps, cfg.disable_simd)
                }
            })
            .collect();
        Resizer {
            cfg,
            kernels,
            scalers,
        }
    }

    /// Resizes one plane into another.
    ///
    /// `width` and `height` are the source plane dimensions in pixels;
    /// `dp` and `sp` the destination and source pitches in bytes. The
    /// destination must hold the configured output size along the resized
    /// axis and the source size along the other.
    pub fn resize(&self, dst: &mut [u8], src: &[u8], width: usize, height: usize, dp: usize, sp: usize) {
        let size = if self.cfg.vertical {
            ImageSize::new(width, self.cfg.output)
        } else {
            ImageSize::new(self.cfg.output, height)
        };
        let pool = ThreadingPolicy::from_threads(self.cfg.threads).get_pool(size);
        self.resize_with_pool(dst, src, width, height, dp, sp, &pool);
    }

    pub(crate) fn resize_with_pool(
        &self,
        dst: &mut [u8],
        src: &[u8],
        width: usize,
        height: usize,
        dp: usize,
        sp: usize,
        pool: &Option<ThreadPool>,
    ) {
        let field = (self.cfg.vertical && self.cfg.interlaced) as usize;
        let (dwidth, dheight) = if self.cfg.vertical {
            (width, self.cfg.output >> field)
        } else {
            (self.cfg.output, height)
        };
        let row_bytes = dwidth * self.cfg.pack;
        let size = ImageSize::new(dwidth, dheight);
        let threads = ThreadingPolicy::from_threads(self.cfg.threads)
            .thread_count(size)
            .min(dheight)
            .max(1);
        for (i, (kernel, &scaler)) in self
            .kernels
            .iter()
            .zip(self.scalers.iter())
            .enumerate()
            .take(1 + field)
        {
            self.scale_bands(
                kernel,
                scaler,
                &mut dst[dp * i..],
                &src[sp * i..],
                row_bytes,
                dheight,
                dp << field,
                sp << field,
                threads,
                pool,
            );
        }
    }

    /// Splits one field's output rows into bands and runs them to
    /// completion. Bands cover disjoint destination row ranges; vertical
    /// source bases are prefix sums of the delta offsets.
    #[allow(clippy::too_many_arguments)]
    fn scale_bands(
        &self,
        kernel: &Kernel,
        scaler: ScaleRowsFn,
        dst: &mut [u8],
        src: &[u8],
        width: usize,
        height: usize,
        dp: usize,
        sp: usize,
        threads: usize,
        pool: &Option<ThreadPool>,
    ) {
        let taps = kernel.taps;
        let nh = (height / threads).max(1);
        let mut bands: Vec<Band> = Vec::with_capacity(threads);
        let mut rest = dst;
        let mut si = 0usize;
        let mut ci = 0usize;
        let mut oi = 0usize;
        for i in 0..threads {
            let last = i + 1 == threads;
            let ih = if last { height - nh * (threads - 1) } else { nh };
            let band_len = dp * (ih - 1) + width;
            let current = std::mem::take(&mut rest);
            let cut = (dp * ih).min(current.len());
            let (head, tail) = current.split_at_mut(cut);
            rest = tail;
            let (band_dst, _) = head.split_at_mut(band_len);
            if self.cfg.vertical {
                let off = &kernel.offsets[oi..oi + ih];
                bands.push(Band {
                    dst: band_dst,
                    src: &src[si..],
                    cof: &kernel.coeffs[ci..ci + ih * taps],
                    off,
                    rows: ih,
                });
                ci += ih * taps;
                si += sp * off.iter().map(|&d| d as usize).sum::<usize>();
                oi += ih;
            } else {
                bands.push(Band {
                    dst: band_dst,
                    src: &src[si..],
                    cof: &kernel.coeffs,
                    off: &kernel.offsets,
                    rows: ih,
                });
                si += sp * ih;
            }
        }
        let run = |band: Band| {
            scaler(
                band.dst, band.src, band.cof, band.off, taps, width, band.rows, dp, sp,
            );
        };
        match pool {
            Some(pool) => pool.install(|| bands.into_par_iter().for_each(run)),
            None => bands.into_iter().for_each(run),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize, pitch: usize) -> Vec<u8> {
        let mut data = vec![0u8; pitch * (height - 1) + width];
        for y in 0..height {
            for x in 0..width {
                data[y * pitch + x] = (x * 3 + y * 7) as u8;
            }
        }
        data
    }

    #[test]
    fn horizontal_identity_is_copy() {
        let src = gradient(64, 8, 64);
        let mut dst = vec![0u8; 64 * 8];
        let rez = Resizer::new(
            &ResizerConfig {
                input: 64,
                output: 64,
                threads: 1,
                ..Default::default()
            },
            &Filter::Bilinear,
        );
        rez.resize(&mut dst, &src, 64, 8, 64, 64);
        assert_eq!(dst, src);
    }

    #[test]
    fn vertical_identity_is_copy() {
        let src = gradient(32, 32, 32);
        let mut dst = vec![0u8; 32 * 32];
        let rez = Resizer::new(
            &ResizerConfig {
                input: 32,
                output: 32,
                vertical: true,
                threads: 1,
                ..Default::default()
            },
            &Filter::Bilinear,
        );
        rez.resize(&mut dst, &src, 32, 32, 32, 32);
        assert_eq!(dst, src);
    }

    #[test]
    fn band_split_matches_single_band() {
        let src = gradient(40, 64, 40);
        let cfg = ResizerConfig {
            input: 64,
            output: 96,
            vertical: true,
            threads: 1,
            disable_simd: true,
            ..Default::default()
        };
        let rez = Resizer::new(&cfg, &Filter::bicubic());
        let mut whole = vec![0u8; 40 * 96];
        rez.resize(&mut whole, &src, 40, 64, 40, 40);

        for threads in [2usize, 5, 7, 128] {
            let banded_rez = Resizer::new(
                &ResizerConfig {
                    threads,
                    ..cfg
                },
                &Filter::bicubic(),
            );
            let mut banded = vec![0u8; 40 * 96];
            banded_rez.resize(&mut banded, &src, 40, 64, 40, 40);
            assert_eq!(banded, whole, "threads {threads}");
        }
    }

    #[test]
    fn constant_plane_survives_upscale() {
        let src = vec![137u8; 32 * 32];
        let mut dst = vec![0u8; 96 * 32];
        let rez = Resizer::new(
            &ResizerConfig {
                input: 32,
                output: 96,
                threads: 1,
                ..Default::default()
            },
            &Filter::lanczos(3),
        );
        rez.resize(&mut dst, &src, 32, 32, 96, 32);
        // Exact row sums keep flat fields flat.
        assert!(dst.iter().all(|&b| b == 137));
    }

    #[test]
    fn interlaced_vertical_builds_two_kernels() {
        let cfg = ResizerConfig {
            input: 32,
            output: 16,
            vertical: true,
            interlaced: true,
            threads: 1,
            ..Default::default()
        };
        let rez = Resizer::new(&cfg, &Filter::bicubic());
        assert_eq!(rez.kernels.len(), 2);

        let src = gradient(16, 32, 16);
        let mut dst = vec![0u8; 16 * 16];
        rez.resize(&mut dst, &src, 16, 32, 16, 16);
        // Both fields must be written.
        assert!(dst[..16].iter().any(|&b| b != 0));
        assert!(dst[16..32].iter().any(|&b| b != 0));
    }
}
