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

/// Reconstruction kernel used to compute resampling weights.
///
/// The filter is only evaluated while kernels are synthesized, never in the
/// scaling loops, so a closed tagged set is enough.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Filter {
    /// Triangle kernel, one tap of support on each side.
    Bilinear,
    /// Mitchell-Netravali family cubic. The seven polynomial coefficients
    /// are precomputed from `(B, C)` at construction.
    Bicubic {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
        g: f64,
    },
    /// Windowed sinc with `taps` lobes on each side.
    Lanczos { taps: usize },
}

impl Filter {
    /// Cubic filter with custom Mitchell-Netravali `(B, C)` parameters.
    pub fn custom_bicubic(b: f64, c: f64) -> Filter {
        Filter::Bicubic {
            a: 1.0 - b / 3.0,
            b: -3.0 + 2.0 * b + c,
            c: 2.0 - 3.0 * b / 2.0 - c,
            d: 4.0 * b / 3.0 + 4.0 * c,
            e: -2.0 * b - 8.0 * c,
            f: b + 5.0 * c,
            g: -b / 6.0 - c,
        }
    }

    /// Catmull-Rom flavoured cubic, `(B, C) = (0, 0.5)`.
    pub fn bicubic() -> Filter {
        Filter::custom_bicubic(0.0, 0.5)
    }

    /// Lanczos kernel with the given lobe count.
    ///
    /// # Panics
    /// Panics if `taps` is zero.
    pub fn lanczos(taps: usize) -> Filter {
        assert!(taps > 0, "lanczos lobe count must be positive");
        Filter::Lanczos { taps }
    }

    /// Half-support of the kernel in unit sample spacing.
    pub fn taps(&self) -> usize {
        match self {
            Filter::Bilinear => 1,
            Filter::Bicubic { .. } => 2,
            Filter::Lanczos { taps } => *taps,
        }
    }

    /// Kernel weight at distance `x >= 0` from the output center.
    pub fn weight(&self, x: f64) -> f64 {
        match self {
            Filter::Bilinear => {
                if x < 1.0 {
                    1.0 - x
                } else {
                    0.0
                }
            }
            Filter::Bicubic { a, b, c, d, e, f, g } => {
                if x < 1.0 {
                    a + x * x * (b + x * c)
                } else if x < 2.0 {
                    d + x * (e + x * (f + x * g))
                } else {
                    0.0
                }
            }
            Filter::Lanczos { taps } => {
                let taps = *taps as f64;
                if x > taps {
                    0.0
                } else if x == 0.0 {
                    1.0
                } else {
                    let b = x * std::f64::consts::PI;
                    let c = b / taps;
                    b.sin() * c.sin() / (b * c)
                }
            }
        }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Filter::bicubic()
    }
}
