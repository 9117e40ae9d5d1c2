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
use crate::fixed_point_horizontal::{convolve_horizontal_rows, convolve_horizontal_rows_n};
use crate::fixed_point_vertical::{convolve_vertical_rows, convolve_vertical_rows_n};

/// Row-band scaler: `(dst, src, cof, off, taps, width, height, dp, sp)`.
///
/// `width` is in bytes, `off` and `cof` are the (sub-)tables for the rows the
/// band covers, and the pitches are in bytes.
pub(crate) type ScaleRowsFn =
    fn(&mut [u8], &[u8], &[i16], &[i32], usize, usize, usize, usize, usize);

/// Binds the horizontal implementation for a tap count, chosen once at
/// construction.
pub(crate) fn horizontal_scaler(taps: usize, disable_simd: bool) -> ScaleRowsFn {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    if !disable_simd {
        return match taps {
            2 => crate::sse::convolve_horizontal_sse_2,
            4 => crate::sse::convolve_horizontal_sse_4,
            6 => crate::sse::convolve_horizontal_sse_n,
            8 => crate::sse::convolve_horizontal_sse_wide::<8>,
            10 => crate::sse::convolve_horizontal_sse_wide::<10>,
            12 => crate::sse::convolve_horizontal_sse_wide::<12>,
            _ => convolve_horizontal_rows_n,
        };
    }
    let _ = disable_simd;
    match taps {
        2 => convolve_horizontal_rows::<2>,
        4 => convolve_horizontal_rows::<4>,
        6 => convolve_horizontal_rows::<6>,
        8 => convolve_horizontal_rows::<8>,
        10 => convolve_horizontal_rows::<10>,
        12 => convolve_horizontal_rows::<12>,
        _ => convolve_horizontal_rows_n,
    }
}

/// Binds the vertical implementation for a tap count.
pub(crate) fn vertical_scaler(taps: usize, disable_simd: bool) -> ScaleRowsFn {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    if !disable_simd {
        return match taps {
            2 => crate::sse::convolve_vertical_sse::<2>,
            4 => crate::sse::convolve_vertical_sse::<4>,
            6 => crate::sse::convolve_vertical_sse::<6>,
            8 => crate::sse::convolve_vertical_sse::<8>,
            10 => crate::sse::convolve_vertical_sse::<10>,
            12 => crate::sse::convolve_vertical_sse::<12>,
            _ => convolve_vertical_rows_n,
        };
    }
    let _ = disable_simd;
    match taps {
        2 => convolve_vertical_rows::<2>,
        4 => convolve_vertical_rows::<4>,
        6 => convolve_vertical_rows::<6>,
        8 => convolve_vertical_rows::<8>,
        10 => convolve_vertical_rows::<10>,
        12 => convolve_vertical_rows::<12>,
        _ => convolve_vertical_rows_n,
    }
}
