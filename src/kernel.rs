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
use crate::filter::Filter;
use crate::resizer::ResizerConfig;
use crate::support::PRECISION;

/// Fixed-point polyphase kernel for one axis of one plane.
///
/// `coeffs` holds `taps` signed weights per output row, normalized so every
/// row sums to exactly `1 << 14`. `offsets` holds one entry per output row:
/// absolute element offsets for horizontal kernels, delta-encoded row
/// increments for vertical kernels (the first entry is absolute).
pub(crate) struct Kernel {
    pub coeffs: Vec<i16>,
    pub offsets: Vec<i32>,
    pub taps: usize,
}

struct DoubleKernel {
    pos: Vec<i32>,
    sums: Vec<f64>,
    weights: Vec<f64>,
    taps: usize,
    rows: usize,
}

/// Evaluates the continuous filter into per-output double-precision weight
/// rows. Interlaced kernels see one field but keep full-resolution pixel
/// positions, so the effective window doubles while wrong-parity sources
/// are skipped.
fn make_double_kernel(cfg: &ResizerConfig, filter: &Filter, field: usize, idx: usize) -> DoubleKernel {
    let input = cfg.input as i64;
    let scale = cfg.output as f64 / cfg.input as f64;
    let mut step = scale.min(1.0);
    let support = filter.taps() as f64 / step;
    let taps = support.ceil() as usize * 2;
    let ftaps = taps << field;
    let rows = cfg.output >> field;
    step /= (1 + field) as f64;
    let xstep = 1.0 / scale;
    let mut xmid = (cfg.input as f64 - cfg.output as f64) / (cfg.output as f64 * 2.0)
        + xstep * (field * idx) as f64;

    let mut pos = vec![0i32; rows];
    let mut sums = vec![0f64; rows];
    let mut weights = vec![0f64; rows * taps];
    for i in 0..rows {
        let left = xmid.ceil() as i64 - (ftaps >> 1) as i64;
        let x = left.clamp(0, (input - ftaps as i64).max(0));
        pos[i] = x as i32;
        for j in 0..ftaps {
            let src = left + j as i64;
            if field != 0 && (src & 1) as usize != idx {
                continue;
            }
            let weight = filter.weight((xmid - src as f64).abs() * step);
            let slot = ((src.clamp(x, input - 1) - x) >> field) as usize;
            weights[i * taps + slot] += weight;
            sums[i] += weight;
        }
        xmid += xstep * (1 + field) as f64;
    }
    DoubleKernel {
        pos,
        sums,
        weights,
        taps,
        rows,
    }
}

/// Quantizes one weight table to 14-bit fixed point.
///
/// Taps are rounded in descending magnitude order while carrying the
/// rounding residue forward, which pins every row sum to exactly `1 << 14`
/// and keeps the error off the small outer taps.
fn make_integer_kernel(double: &DoubleKernel, field: usize, idx: usize) -> (Vec<i16>, Vec<i32>) {
    let taps = double.taps;
    let mut coeffs = vec![0i16; taps * double.rows];
    let mut offsets = vec![0i32; double.rows];
    let mut order: Vec<usize> = Vec::with_capacity(taps);
    for i in 0..double.rows {
        let row = &double.weights[i * taps..(i + 1) * taps];
        order.clear();
        order.extend(0..taps);
        order.sort_by(|&a, &b| row[b].abs().total_cmp(&row[a].abs()));
        let scale = f64::from(1i32 << PRECISION) / double.sums[i];
        let mut residue = 0f64;
        for &slot in order.iter() {
            let w = row[slot] * scale + residue;
            let iw = (w + 0.5).floor();
            coeffs[i * taps + slot] = iw as i16;
            residue = w - iw;
        }
        let off = double.pos[i] + field as i32 - idx as i32;
        offsets[i] = off >> field;
    }
    (coeffs, offsets)
}

/// Trims the zero taps that clamping piles up at the window edges, so the
/// stored tap count never exceeds what the plane can provide. Rows keep a
/// uniform (even) tap count; offsets absorb the per-row shift.
fn reduce_kernel(coeffs: Vec<i16>, offsets: &mut [i32], taps: usize, limit: usize) -> (Vec<i16>, usize) {
    let rows = offsets.len();
    let span_of = |row: &[i16]| {
        let lead = row.iter().position(|&c| c != 0).unwrap_or(0);
        let tail = row.iter().rposition(|&c| c != 0).unwrap_or(0);
        (lead, tail + 1 - lead)
    };
    let max_span = coeffs
        .chunks_exact(taps)
        .map(|row| span_of(row).1)
        .max()
        .unwrap_or(taps);
    // The window stays even. An odd axis cannot host an even window of its
    // full length, so the window shrinks by one instead and rows spanning
    // the whole axis fold their trailing tap into its neighbor below.
    let newtaps = ((max_span + 1) & !1).min(limit & !1).max(2);
    if newtaps >= taps {
        return (coeffs, taps);
    }
    let mut reduced = vec![0i16; rows * newtaps];
    for (i, row) in coeffs.chunks_exact(taps).enumerate() {
        let (lead, span) = span_of(row);
        let desired = (offsets[i] + lead as i32).min(limit.saturating_sub(newtaps) as i32);
        let shift = ((desired - offsets[i]) as usize).min(taps - newtaps);
        offsets[i] += shift as i32;
        let out = &mut reduced[i * newtaps..(i + 1) * newtaps];
        out.copy_from_slice(&row[shift..shift + newtaps]);
        if span > newtaps {
            // Only reachable with a full-axis span over an odd limit: the
            // window starts at the plane edge and exactly one trailing tap
            // is left over. Merging it keeps the row sum exact and the
            // window start monotonic.
            debug_assert!(shift == 0 && span == newtaps + 1);
            let merged = out[newtaps - 1] as i32 + row[newtaps] as i32;
            debug_assert!(i16::try_from(merged).is_ok());
            out[newtaps - 1] = merged as i16;
        }
    }
    (reduced, newtaps)
}

/// Rewrites a horizontal kernel in byte units for packed layouts: every
/// output byte gets a `taps * pack` coefficient row with the original
/// weights placed on its own channel stride, and offsets become byte
/// offsets of the packed source window.
fn expand_packed(coeffs: &[i16], offsets: &[i32], taps: usize, pack: usize) -> (Vec<i16>, Vec<i32>, usize) {
    let rows = offsets.len();
    let etaps = taps * pack;
    let mut ecoeffs = vec![0i16; rows * pack * etaps];
    let mut eoffsets = vec![0i32; rows * pack];
    for i in 0..rows {
        for channel in 0..pack {
            let row = i * pack + channel;
            eoffsets[row] = offsets[i] * pack as i32;
            for t in 0..taps {
                ecoeffs[row * etaps + t * pack + channel] = coeffs[i * taps + t];
            }
        }
    }
    (ecoeffs, eoffsets, etaps)
}

pub(crate) fn make_kernel(cfg: &ResizerConfig, filter: &Filter, idx: usize) -> Kernel {
    let field = cfg.interlaced as usize;
    let double = make_double_kernel(cfg, filter, field, idx);
    let (coeffs, mut offsets) = make_integer_kernel(&double, field, idx);
    let (mut coeffs, mut taps) = reduce_kernel(coeffs, &mut offsets, double.taps, cfg.input >> field);
    if cfg.vertical {
        for i in (1..double.rows).rev() {
            offsets[i] -= offsets[i - 1];
        }
    } else if cfg.pack > 1 {
        let (ecoeffs, eoffsets, etaps) = expand_packed(&coeffs, &offsets, taps, cfg.pack);
        coeffs = ecoeffs;
        offsets = eoffsets;
        taps = etaps;
    }
    Kernel {
        coeffs,
        offsets,
        taps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::PRECISION;

    fn config(input: usize, output: usize, vertical: bool, interlaced: bool, pack: usize) -> ResizerConfig {
        ResizerConfig {
            input,
            output,
            vertical,
            interlaced,
            pack,
            ..Default::default()
        }
    }

    fn check_rows(kernel: &Kernel) {
        assert_eq!(kernel.taps % 2, 0);
        assert_eq!(kernel.coeffs.len(), kernel.offsets.len() * kernel.taps);
        for row in kernel.coeffs.chunks_exact(kernel.taps) {
            let sum: i32 = row.iter().map(|&c| c as i32).sum();
            assert_eq!(sum, 1 << PRECISION);
        }
    }

    #[test]
    fn rows_sum_to_one() {
        let filters = [Filter::Bilinear, Filter::bicubic(), Filter::lanczos(3)];
        let sizes = [(640usize, 480usize), (480, 640), (32, 96), (96, 192), (256, 257)];
        for filter in filters.iter() {
            for &(input, output) in sizes.iter() {
                for vertical in [false, true] {
                    let kernel = make_kernel(&config(input, output, vertical, false, 1), filter, 0);
                    check_rows(&kernel);
                    assert_eq!(kernel.offsets.len(), output);
                }
            }
        }
    }

    #[test]
    fn interlaced_kernels_sum_to_one() {
        for idx in 0..2usize {
            let kernel = make_kernel(&config(576, 480, true, true, 1), &Filter::bicubic(), idx);
            check_rows(&kernel);
            assert_eq!(kernel.offsets.len(), 240);
        }
    }

    #[test]
    fn horizontal_offsets_monotonic_and_bounded() {
        let cfg = config(640, 1920, false, false, 1);
        let kernel = make_kernel(&cfg, &Filter::bicubic(), 0);
        let mut prev = 0i32;
        for &off in kernel.offsets.iter() {
            assert!(off >= prev);
            assert!(off as usize + kernel.taps <= cfg.input);
            prev = off;
        }
    }

    #[test]
    fn vertical_offsets_are_deltas() {
        let cfg = config(480, 1080, true, false, 1);
        let kernel = make_kernel(&cfg, &Filter::bicubic(), 0);
        let mut absolute = 0i64;
        for &delta in kernel.offsets.iter() {
            assert!(delta >= 0);
            absolute += delta as i64;
        }
        assert!(absolute as usize + kernel.taps <= cfg.input);
    }

    #[test]
    fn downscale_widens_support() {
        let kernel = make_kernel(&config(1920, 640, false, false, 1), &Filter::bicubic(), 0);
        // 3x downscale stretches the 4-tap cubic window, modulo trimmed
        // zero edges.
        assert!(kernel.taps > 4 && kernel.taps <= 12, "taps {}", kernel.taps);
        check_rows(&kernel);
    }

    #[test]
    fn oversized_kernel_is_trimmed_to_input() {
        // 8x upscale of a tiny plane: the nominal window is far wider than
        // the plane, reduction must keep reads inside it.
        for interlaced in [false, true] {
            let cfg = config(16, 128, true, interlaced, 1);
            let kernel = make_kernel(&cfg, &Filter::lanczos(64), 0);
            let field = interlaced as usize;
            assert!(kernel.taps <= 16 >> field);
            check_rows(&kernel);
            let mut absolute = 0usize;
            for &delta in kernel.offsets.iter() {
                assert!(delta >= 0);
                absolute += delta as usize;
            }
            assert!(absolute + kernel.taps <= cfg.input >> field);
        }

        // An odd axis cannot host an even window of its full length: every
        // row spans all 17 samples, so the trailing tap folds into its
        // neighbor and the stored window stays even.
        let cfg = config(17, 96, false, false, 1);
        let kernel = make_kernel(&cfg, &Filter::lanczos(64), 0);
        assert!(kernel.taps <= 16);
        check_rows(&kernel);
        for &off in kernel.offsets.iter() {
            assert!(off >= 0);
            assert!(off as usize + kernel.taps <= cfg.input);
        }
    }

    #[test]
    fn odd_field_height_keeps_even_taps() {
        // Height 10 passes the interlaced modulus but leaves 5-row fields;
        // the reduced window must stay even and inside the field.
        let cfg = config(10, 4, true, true, 1);
        for idx in 0..2usize {
            let kernel = make_kernel(&cfg, &Filter::lanczos(64), idx);
            check_rows(&kernel);
            assert!(kernel.taps <= 4);
            let mut absolute = 0usize;
            for &delta in kernel.offsets.iter() {
                assert!(delta >= 0);
                absolute += delta as usize;
            }
            assert!(absolute + kernel.taps <= 5);
        }
    }

    #[test]
    fn packed_expansion_keeps_sums() {
        let cfg = config(171, 256, false, false, 4);
        let kernel = make_kernel(&cfg, &Filter::bicubic(), 0);
        assert_eq!(kernel.taps % 4, 0);
        assert_eq!(kernel.offsets.len(), cfg.output * 4);
        check_rows(&kernel);
        // Channel offsets share the pixel offset; the channel shift lives in
        // the coefficient row.
        for pixel in kernel.offsets.chunks_exact(4) {
            assert!(pixel.iter().all(|&o| o == pixel[0]));
            assert_eq!(pixel[0] % 4, 0);
        }
        for (row, chunk) in kernel.coeffs.chunks_exact(kernel.taps).enumerate() {
            let channel = row % 4;
            for (t, &c) in chunk.iter().enumerate() {
                if t % 4 != channel {
                    assert_eq!(c, 0);
                }
            }
        }
    }

    #[test]
    fn identity_kernel_is_delta() {
        let kernel = make_kernel(&config(256, 256, false, false, 1), &Filter::Bilinear, 0);
        assert_eq!(kernel.taps, 2);
        for (i, row) in kernel.coeffs.chunks_exact(2).enumerate() {
            // One tap carries the whole weight at identity scale.
            assert!(row.contains(&(1 << PRECISION)), "row {i} is {row:?}");
        }
    }

    #[test]
    fn big_kernel_fits_32_bit_accumulator() {
        let kernel = make_kernel(&config(32, 256, false, false, 1), &Filter::lanczos(64), 0);
        check_rows(&kernel);
        let worst: i64 = kernel
            .coeffs
            .chunks_exact(kernel.taps)
            .map(|row| row.iter().map(|&c| 255 * (c as i64).abs()).sum::<i64>())
            .max()
            .unwrap();
        assert!(worst < i32::MAX as i64);
    }
}
