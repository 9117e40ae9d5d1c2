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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::support::{saturate_u8, PRECISION, ROUNDING_APPROX};

/// Vertical SSE2 pass specialized by tap count.
pub(crate) fn convolve_vertical_sse<const TAPS: usize>(
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
    unsafe {
        convolve_vertical_rows_sse(dst, src, cof, off, TAPS, width, height, dp, sp);
    }
}

/// Reduces 16 columns of one output row: tap pairs are interleaved across
/// two source rows and multiply-accumulated with `pmaddwd`.
#[inline(always)]
unsafe fn convolve_vertical_part_sse_16(dst: *mut u8, src: *const u8, sp: usize, weights: &[i16]) {
    let zeros = _mm_setzero_si128();
    let vld = _mm_set1_epi32(ROUNDING_APPROX);
    let mut store_0 = vld;
    let mut store_1 = vld;
    let mut store_2 = vld;
    let mut store_3 = vld;

    let mut j = 0usize;
    while j + 2 <= weights.len() {
        let w0 = *weights.get_unchecked(j) as i32;
        let w1 = *weights.get_unchecked(j + 1) as i32;
        let v_weight = _mm_set1_epi32((w1 << 16) | (w0 & 0xFFFF));

        let item_row_0 = _mm_loadu_si128(src.add(sp * j) as *const __m128i);
        let item_row_1 = _mm_loadu_si128(src.add(sp * (j + 1)) as *const __m128i);

        let interleaved = _mm_unpacklo_epi8(item_row_0, item_row_1);
        let pix = _mm_unpacklo_epi8(interleaved, zeros);
        store_0 = _mm_add_epi32(store_0, _mm_madd_epi16(pix, v_weight));
        let pix = _mm_unpackhi_epi8(interleaved, zeros);
        store_1 = _mm_add_epi32(store_1, _mm_madd_epi16(pix, v_weight));

        let interleaved = _mm_unpackhi_epi8(item_row_0, item_row_1);
        let pix = _mm_unpacklo_epi8(interleaved, zeros);
        store_2 = _mm_add_epi32(store_2, _mm_madd_epi16(pix, v_weight));
        let pix = _mm_unpackhi_epi8(interleaved, zeros);
        store_3 = _mm_add_epi32(store_3, _mm_madd_epi16(pix, v_weight));

        j += 2;
    }

    if j < weights.len() {
        let w = *weights.get_unchecked(j) as i32;
        let v_weight = _mm_set1_epi32(w & 0xFFFF);
        let item_row = _mm_loadu_si128(src.add(sp * j) as *const __m128i);

        let interleaved = _mm_unpacklo_epi8(item_row, zeros);
        let pix = _mm_unpacklo_epi8(interleaved, zeros);
        store_0 = _mm_add_epi32(store_0, _mm_madd_epi16(pix, v_weight));
        let pix = _mm_unpackhi_epi8(interleaved, zeros);
        store_1 = _mm_add_epi32(store_1, _mm_madd_epi16(pix, v_weight));

        let interleaved = _mm_unpackhi_epi8(item_row, zeros);
        let pix = _mm_unpacklo_epi8(interleaved, zeros);
        store_2 = _mm_add_epi32(store_2, _mm_madd_epi16(pix, v_weight));
        let pix = _mm_unpackhi_epi8(interleaved, zeros);
        store_3 = _mm_add_epi32(store_3, _mm_madd_epi16(pix, v_weight));
    }

    let low_16 = _mm_packs_epi32(
        _mm_srai_epi32::<PRECISION>(store_0),
        _mm_srai_epi32::<PRECISION>(store_1),
    );
    let high_16 = _mm_packs_epi32(
        _mm_srai_epi32::<PRECISION>(store_2),
        _mm_srai_epi32::<PRECISION>(store_3),
    );

    let item = _mm_packus_epi16(low_16, high_16);
    _mm_storeu_si128(dst as *mut __m128i, item);
}

#[inline(always)]
unsafe fn convolve_vertical_rows_sse(
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
        let src_rows = src.as_ptr().add(si);
        let dst_row = dst.as_mut_ptr().add(di);

        let mut cx = 0usize;
        while cx + 16 <= width {
            convolve_vertical_part_sse_16(dst_row.add(cx), src_rows.add(cx), sp, weights);
            cx += 16;
        }
        if cx < width {
            if width >= 16 {
                // Backroll: rewind so one final overlapping store finishes
                // the row, recomputing identical bytes.
                let cx = width - 16;
                convolve_vertical_part_sse_16(dst_row.add(cx), src_rows.add(cx), sp, weights);
            } else {
                for x in cx..width {
                    let mut acc = ROUNDING_APPROX;
                    for (t, &w) in weights.iter().enumerate() {
                        acc += *src.get_unchecked(si + sp * t + x) as i32 * w as i32;
                    }
                    *dst.get_unchecked_mut(di + x) = saturate_u8(acc >> PRECISION);
                }
            }
        }
        di += dp;
    }
}
