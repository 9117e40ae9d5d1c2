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

/// Rounds, shifts and saturates four sum vectors into one 16-byte store.
#[inline(always)]
unsafe fn store_16(dst: *mut u8, s0: __m128i, s1: __m128i, s2: __m128i, s3: __m128i) {
    let low_16 = _mm_packs_epi32(
        _mm_srai_epi32::<PRECISION>(s0),
        _mm_srai_epi32::<PRECISION>(s1),
    );
    let high_16 = _mm_packs_epi32(
        _mm_srai_epi32::<PRECISION>(s2),
        _mm_srai_epi32::<PRECISION>(s3),
    );
    _mm_storeu_si128(dst as *mut __m128i, _mm_packus_epi16(low_16, high_16));
}

/// Row driver shared by every horizontal variant: 16-output SSE blocks, then
/// a scalar tail for the trailing columns.
#[inline(always)]
unsafe fn hscale_rows<F: Fn(*mut u8, *const u8, usize)>(
    dst: &mut [u8],
    src: &[u8],
    cof: &[i16],
    off: &[i32],
    taps: usize,
    width: usize,
    height: usize,
    dp: usize,
    sp: usize,
    block: F,
) {
    let mut di = 0usize;
    let mut si = 0usize;
    for _ in 0..height {
        let dst_row = dst.as_mut_ptr().add(di);
        let src_row = src.as_ptr().add(si);
        let mut x = 0usize;
        while x + 16 <= width {
            block(dst_row, src_row, x);
            x += 16;
        }
        while x < width {
            let xoff = *off.get_unchecked(x) as usize;
            let weights = cof.get_unchecked(x * taps..(x + 1) * taps);
            let mut acc = ROUNDING_APPROX;
            for (t, &w) in weights.iter().enumerate() {
                acc += *src.get_unchecked(si + xoff + t) as i32 * w as i32;
            }
            *dst.get_unchecked_mut(di + x) = saturate_u8(acc >> PRECISION);
            x += 1;
        }
        di += dp;
        si += sp;
    }
}

/// 16 outputs of the 2-tap kernel: gather one source byte pair per output,
/// unpack to 16-bit, `pmaddwd` against the contiguous coefficient pairs.
#[inline(always)]
unsafe fn convolve_part_sse_2(dst: *mut u8, src_row: *const u8, cof: &[i16], off: &[i32], x: usize) {
    let mut pairs = [0u16; 16];
    for (k, p) in pairs.iter_mut().enumerate() {
        let o = *off.get_unchecked(x + k) as usize;
        *p = (src_row.add(o) as *const u16).read_unaligned();
    }

    let zeros = _mm_setzero_si128();
    let vld = _mm_set1_epi32(ROUNDING_APPROX);
    let v0 = _mm_loadu_si128(pairs.as_ptr() as *const __m128i);
    let v1 = _mm_loadu_si128(pairs.as_ptr().add(8) as *const __m128i);

    let c = cof.as_ptr().add(x * 2);
    let s0 = _mm_add_epi32(
        vld,
        _mm_madd_epi16(
            _mm_unpacklo_epi8(v0, zeros),
            _mm_loadu_si128(c as *const __m128i),
        ),
    );
    let s1 = _mm_add_epi32(
        vld,
        _mm_madd_epi16(
            _mm_unpackhi_epi8(v0, zeros),
            _mm_loadu_si128(c.add(8) as *const __m128i),
        ),
    );
    let s2 = _mm_add_epi32(
        vld,
        _mm_madd_epi16(
            _mm_unpacklo_epi8(v1, zeros),
            _mm_loadu_si128(c.add(16) as *const __m128i),
        ),
    );
    let s3 = _mm_add_epi32(
        vld,
        _mm_madd_epi16(
            _mm_unpackhi_epi8(v1, zeros),
            _mm_loadu_si128(c.add(24) as *const __m128i),
        ),
    );
    store_16(dst.add(x), s0, s1, s2, s3);
}

/// Four outputs of the 4-tap kernel: two gather rounds of byte pairs, with
/// even/odd coefficient pairs split out of the contiguous rows by shuffles.
#[inline(always)]
unsafe fn convolve_group_sse_4(src_row: *const u8, cof: &[i16], off: &[i32], base: usize) -> __m128i {
    let zeros = _mm_setzero_si128();
    let mut lo = [0u16; 4];
    let mut hi = [0u16; 4];
    for k in 0..4 {
        let o = *off.get_unchecked(base + k) as usize;
        lo[k] = (src_row.add(o) as *const u16).read_unaligned();
        hi[k] = (src_row.add(o + 2) as *const u16).read_unaligned();
    }
    let p0 = _mm_unpacklo_epi8(_mm_loadu_si64(lo.as_ptr() as *const u8), zeros);
    let p1 = _mm_unpacklo_epi8(_mm_loadu_si64(hi.as_ptr() as *const u8), zeros);

    let c = cof.as_ptr().add(base * 4);
    let ca = _mm_loadu_si128(c as *const __m128i);
    let cb = _mm_loadu_si128(c.add(8) as *const __m128i);
    let even = _mm_castps_si128(_mm_shuffle_ps::<0x88>(
        _mm_castsi128_ps(ca),
        _mm_castsi128_ps(cb),
    ));
    let odd = _mm_castps_si128(_mm_shuffle_ps::<0xDD>(
        _mm_castsi128_ps(ca),
        _mm_castsi128_ps(cb),
    ));
    _mm_add_epi32(_mm_madd_epi16(p0, even), _mm_madd_epi16(p1, odd))
}

#[inline(always)]
unsafe fn convolve_part_sse_4(dst: *mut u8, src_row: *const u8, cof: &[i16], off: &[i32], x: usize) {
    let vld = _mm_set1_epi32(ROUNDING_APPROX);
    let s0 = _mm_add_epi32(vld, convolve_group_sse_4(src_row, cof, off, x));
    let s1 = _mm_add_epi32(vld, convolve_group_sse_4(src_row, cof, off, x + 4));
    let s2 = _mm_add_epi32(vld, convolve_group_sse_4(src_row, cof, off, x + 8));
    let s3 = _mm_add_epi32(vld, convolve_group_sse_4(src_row, cof, off, x + 12));
    store_16(dst.add(x), s0, s1, s2, s3);
}

/// Partial dot product of one output of a wide kernel (8, 10 or 12 taps):
/// an 8-byte chunk plus the 2- or 4-byte remainder, as four 32-bit lanes.
#[inline(always)]
unsafe fn convolve_dot_wide<const TAPS: usize>(
    src_row: *const u8,
    cof: &[i16],
    off: &[i32],
    i: usize,
) -> __m128i {
    let zeros = _mm_setzero_si128();
    let o = *off.get_unchecked(i) as usize;
    let s = src_row.add(o);
    let c = cof.as_ptr().add(i * TAPS);

    let pix = _mm_unpacklo_epi8(_mm_loadu_si64(s), zeros);
    let mut sum = _mm_madd_epi16(pix, _mm_loadu_si128(c as *const __m128i));
    if TAPS == 10 {
        let tail = (s.add(8) as *const u16).read_unaligned();
        let pix = _mm_unpacklo_epi8(_mm_cvtsi32_si128(tail as i32), zeros);
        let cw = _mm_cvtsi32_si128((c.add(8) as *const i32).read_unaligned());
        sum = _mm_add_epi32(sum, _mm_madd_epi16(pix, cw));
    } else if TAPS == 12 {
        let tail = (s.add(8) as *const u32).read_unaligned();
        let pix = _mm_unpacklo_epi8(_mm_cvtsi32_si128(tail as i32), zeros);
        let cw = _mm_loadu_si64(c.add(8) as *const u8);
        sum = _mm_add_epi32(sum, _mm_madd_epi16(pix, cw));
    }
    sum
}

/// Sums four per-output partial vectors into one `[sum0..sum3]` lane set.
#[inline(always)]
unsafe fn reduce_dots(q0: __m128i, q1: __m128i, q2: __m128i, q3: __m128i) -> __m128i {
    let t0 = _mm_add_epi32(_mm_unpacklo_epi32(q0, q1), _mm_unpackhi_epi32(q0, q1));
    let t1 = _mm_add_epi32(_mm_unpacklo_epi32(q2, q3), _mm_unpackhi_epi32(q2, q3));
    _mm_add_epi32(_mm_unpacklo_epi64(t0, t1), _mm_unpackhi_epi64(t0, t1))
}

#[inline(always)]
unsafe fn convolve_part_sse_wide<const TAPS: usize>(
    dst: *mut u8,
    src_row: *const u8,
    cof: &[i16],
    off: &[i32],
    x: usize,
) {
    let vld = _mm_set1_epi32(ROUNDING_APPROX);
    let mut sums = [_mm_setzero_si128(); 4];
    for (g, sum) in sums.iter_mut().enumerate() {
        let i = x + g * 4;
        *sum = _mm_add_epi32(
            vld,
            reduce_dots(
                convolve_dot_wide::<TAPS>(src_row, cof, off, i),
                convolve_dot_wide::<TAPS>(src_row, cof, off, i + 1),
                convolve_dot_wide::<TAPS>(src_row, cof, off, i + 2),
                convolve_dot_wide::<TAPS>(src_row, cof, off, i + 3),
            ),
        );
    }
    store_16(dst.add(x), sums[0], sums[1], sums[2], sums[3]);
}

/// 16 outputs of the generic kernel: outer loop over tap pairs, gathering
/// one source pair and one coefficient pair per output per round.
#[inline(always)]
unsafe fn convolve_part_sse_n(
    dst: *mut u8,
    src_row: *const u8,
    cof: &[i16],
    off: &[i32],
    x: usize,
    taps: usize,
) {
    debug_assert!(taps % 2 == 0);
    let zeros = _mm_setzero_si128();
    let vld = _mm_set1_epi32(ROUNDING_APPROX);
    let mut s0 = vld;
    let mut s1 = vld;
    let mut s2 = vld;
    let mut s3 = vld;

    let mut t = 0usize;
    while t + 2 <= taps {
        let mut pairs = [0u16; 16];
        let mut cpairs = [0i32; 16];
        for k in 0..16 {
            let o = *off.get_unchecked(x + k) as usize + t;
            pairs[k] = (src_row.add(o) as *const u16).read_unaligned();
            cpairs[k] = (cof.as_ptr().add((x + k) * taps + t) as *const i32).read_unaligned();
        }
        let v0 = _mm_loadu_si128(pairs.as_ptr() as *const __m128i);
        let v1 = _mm_loadu_si128(pairs.as_ptr().add(8) as *const __m128i);
        let cp = cpairs.as_ptr();
        s0 = _mm_add_epi32(
            s0,
            _mm_madd_epi16(
                _mm_unpacklo_epi8(v0, zeros),
                _mm_loadu_si128(cp as *const __m128i),
            ),
        );
        s1 = _mm_add_epi32(
            s1,
            _mm_madd_epi16(
                _mm_unpackhi_epi8(v0, zeros),
                _mm_loadu_si128(cp.add(4) as *const __m128i),
            ),
        );
        s2 = _mm_add_epi32(
            s2,
            _mm_madd_epi16(
                _mm_unpacklo_epi8(v1, zeros),
                _mm_loadu_si128(cp.add(8) as *const __m128i),
            ),
        );
        s3 = _mm_add_epi32(
            s3,
            _mm_madd_epi16(
                _mm_unpackhi_epi8(v1, zeros),
                _mm_loadu_si128(cp.add(12) as *const __m128i),
            ),
        );
        t += 2;
    }
    store_16(dst.add(x), s0, s1, s2, s3);
}

pub(crate) fn convolve_horizontal_sse_2(
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
        hscale_rows(dst, src, cof, off, 2, width, height, dp, sp, |d, s, x| unsafe {
            convolve_part_sse_2(d, s, cof, off, x)
        });
    }
}

pub(crate) fn convolve_horizontal_sse_4(
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
        hscale_rows(dst, src, cof, off, 4, width, height, dp, sp, |d, s, x| unsafe {
            convolve_part_sse_4(d, s, cof, off, x)
        });
    }
}

pub(crate) fn convolve_horizontal_sse_wide<const TAPS: usize>(
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
        hscale_rows(dst, src, cof, off, TAPS, width, height, dp, sp, |d, s, x| unsafe {
            convolve_part_sse_wide::<TAPS>(d, s, cof, off, x)
        });
    }
}

pub(crate) fn convolve_horizontal_sse_n(
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
    unsafe {
        hscale_rows(dst, src, cof, off, taps, width, height, dp, sp, |d, s, x| unsafe {
            convolve_part_sse_n(d, s, cof, off, x, taps)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::ScaleRowsFn;
    use crate::fixed_point_horizontal::convolve_horizontal_rows_n;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn compare_with_scalar(scaler: ScaleRowsFn, taps: usize, width: usize, input: usize) {
        let mut rng = StdRng::seed_from_u64(42);
        let rows = 3usize;
        let sp = input + 5;
        let src: Vec<u8> = (0..sp * rows).map(|_| rng.gen()).collect();
        let cof: Vec<i16> = (0..width * taps)
            .map(|_| rng.gen_range(-3000i16..6000))
            .collect();
        let off: Vec<i32> = (0..width)
            .map(|_| rng.gen_range(0..=(input - taps) as i32))
            .collect();

        let mut simd = vec![0u8; width * rows];
        let mut scalar = vec![0u8; width * rows];
        scaler(&mut simd, &src, &cof, &off, taps, width, rows, width, sp);
        convolve_horizontal_rows_n(&mut scalar, &src, &cof, &off, taps, width, rows, width, sp);
        assert_eq!(simd, scalar, "taps {taps} width {width}");
    }

    #[test]
    fn matches_scalar_all_taps() {
        let cases: [(ScaleRowsFn, usize); 6] = [
            (convolve_horizontal_sse_2, 2),
            (convolve_horizontal_sse_4, 4),
            (convolve_horizontal_sse_wide::<8>, 8),
            (convolve_horizontal_sse_wide::<10>, 10),
            (convolve_horizontal_sse_wide::<12>, 12),
            (convolve_horizontal_sse_n, 6),
        ];
        for &(scaler, taps) in cases.iter() {
            for width in [5usize, 16, 23, 32, 47] {
                compare_with_scalar(scaler, taps, width, 64);
            }
        }
    }
}
