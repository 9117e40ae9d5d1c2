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

/// Horizontal polyphase pass with a compile-time tap count.
///
/// `off[x]` is the first source byte of output `x` within its row, `cof`
/// carries `TAPS` weights per output. Row bases advance by the pitches.
pub(crate) fn convolve_horizontal_rows<const TAPS: usize>(
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
    for _ in 0..height {
        let src_row = &src[si..];
        for ((d, &xoff), weights) in dst[di..di + width]
            .iter_mut()
            .zip(off)
            .zip(cof.chunks_exact(TAPS))
        {
            let window = &src_row[xoff as usize..xoff as usize + TAPS];
            let mut acc = ROUNDING_APPROX;
            for (&s, &w) in window.iter().zip(weights) {
                acc += s as i32 * w as i32;
            }
            *d = saturate_u8(acc >> PRECISION);
        }
        di += dp;
        si += sp;
    }
}

/// Same pass with a runtime tap count, for widths no specialization covers.
pub(crate) fn convolve_horizontal_rows_n(
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
    for _ in 0..height {
        let src_row = &src[si..];
        for ((d, &xoff), weights) in dst[di..di + width]
            .iter_mut()
            .zip(off)
            .zip(cof.chunks_exact(taps))
        {
            let window = &src_row[xoff as usize..xoff as usize + taps];
            let mut acc = ROUNDING_APPROX;
            for (&s, &w) in window.iter().zip(weights) {
                acc += s as i32 * w as i32;
            }
            *d = saturate_u8(acc >> PRECISION);
        }
        di += dp;
        si += sp;
    }
}
