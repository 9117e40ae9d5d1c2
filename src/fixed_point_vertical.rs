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
#![forbid(unsafe_code)]
use crate::support::{saturate_u8, PRECISION, ROUNDING_APPROX};

/// Vertical polyphase pass with a compile-time tap count.
///
/// `off` holds delta-encoded source row increments, one per output row, and
/// `cof` one `TAPS`-wide weight row per output row.
pub(crate) fn convolve_vertical_rows<const TAPS: usize>(
    dst: &mut [u8],
    src: &[u8],
    cof: &[i16],
    off: &[i32],
    _taps: usize,
    width: usize,
    height: usize,
    dp: usize,
    sp: usize,
) {
    let mut di = 0usize;
    let mut si = 0usize;
    for (&delta, weights) in off[..height].iter().zip(cof.chunks_exact(TAPS)) {
        si += sp * delta as usize;
        for (x, d) in dst[di..di + width].iter_mut().enumerate() {
            let mut acc = ROUNDING_APPROX;
            for (t, &w) in weights.iter().enumerate() {
                acc += src[si + sp * t + x] as i32 * w as i32;
            }
            *d = saturate_u8(acc >> PRECISION);
        }
        di += dp;
    }
}

/// Same pass with a runtime tap count.
pub(crate) fn convolve_vertical_rows_n(
    dst: &mut [u8],
    src: &[u8],
    cof: &[i16],
    off: &[i32],
    taps: usize,
    width: usize,
    height: usize,
    dp: usize,
    sp: usize,
) {
    let mut di = 0usize;
    let mut si = 0usize;
    for (&delta, weights) in off[..height].iter().zip(cof.chunks_exact(taps)) {
        si += sp * delta as usize;
        for (x, d) in dst[di..di + width].iter_mut().enumerate() {
            let mut acc = ROUNDING_APPROX;
            for (t, &w) in weights.iter().enumerate() {
                acc += src[si + sp * t + x] as i32 * w as i32;
            }
            *d = saturate_u8(acc >> PRECISION);
        }
        di += dp;
    }
}

/// Copy fast path for planes that keep their geometry.
pub(crate) fn copy_plane(dst: &mut [u8], src: &[u8], width: usize, height: usize, dp: usize, sp: usize) {
    for (dst_row, src_row) in dst.chunks_mut(dp).zip(src.chunks(sp)).take(height) {
        dst_row[..width].copy_from_slice(&src_row[..width]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_tap_average_of_rows() {
        let src = [10u8, 20, 30, 40, 50, 60];
        let mut dst = [0u8; 4];
        let half = (1i16 << PRECISION) / 2;
        let cof = [half, half, half, half];
        // First delta is the absolute start row.
        let off = [0i32, 1];
        convolve_vertical_rows::<2>(&mut dst, &src, &cof, &off, 2, 2, 2, 2, 2);
        assert_eq!(dst, [20, 30, 40, 50]);
    }

    #[test]
    fn delta_offsets_skip_rows() {
        let src = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let mut dst = [0u8; 4];
        let unit = 1i16 << PRECISION;
        let cof = [unit, 0, unit, 0];
        let off = [1i32, 2];
        convolve_vertical_rows_n(&mut dst, &src, &cof, &off, 2, 2, 2, 2, 2);
        // Rows 1 and 3 of the source.
        assert_eq!(dst, [3, 4, 7, 8]);
    }

    #[test]
    fn copies_honoring_pitches() {
        let src = [1u8, 2, 9, 3, 4, 9];
        let mut dst = [0u8; 8];
        copy_plane(&mut dst, &src, 2, 2, 4, 3);
        assert_eq!(dst, [1, 2, 0, 0, 3, 4, 0, 0]);
    }
}
