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
use std::error::Error;
use std::fmt::Display;

/// Plane buffer shorter than the geometry it claims.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BufferMismatch {
    pub expected: usize,
    pub received: usize,
    pub plane: usize,
}

/// Error enumeration type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    /// Width is not divisible by the chroma horizontal factor.
    InvalidWidth { width: usize, modulus: usize },
    /// Height is not divisible by the chroma vertical factor
    /// (doubled for interlaced descriptors).
    InvalidHeight { height: usize, modulus: usize },
    /// Pack outside `[1, 4]`.
    InvalidPack(usize),
    /// Plane count other than 1 or 3.
    InvalidPlaneCount(usize),
    /// Source and destination disagree on interlacing.
    InterlacedMismatch,
    /// Source and destination disagree on pixels per pack.
    PackMismatch { input: usize, output: usize },
    /// Source and destination disagree on plane count.
    PlaneCountMismatch { input: usize, output: usize },
    /// Layout the image adapter cannot express, e.g. packed pixels
    /// combined with a subsampled chroma ratio.
    UnsupportedImage,
    /// Plane buffer too small for the described plane.
    BufferMismatch(BufferMismatch),
    /// PSNR operands differ in format or dimensions.
    ResolutionMismatch,
}

impl Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::InvalidWidth { width, modulus } => f.write_fmt(format_args!(
                "width {width} must be a multiple of {modulus}"
            )),
            ScaleError::InvalidHeight { height, modulus } => f.write_fmt(format_args!(
                "height {height} must be a multiple of {modulus}"
            )),
            ScaleError::InvalidPack(pack) => {
                f.write_fmt(format_args!("pack must be in [1, 4] but got {pack}"))
            }
            ScaleError::InvalidPlaneCount(planes) => {
                f.write_fmt(format_args!("plane count must be 1 or 3 but got {planes}"))
            }
            ScaleError::InterlacedMismatch => {
                f.write_str("unable to convert between progressive and interlaced images")
            }
            ScaleError::PackMismatch { input, output } => f.write_fmt(format_args!(
                "unable to convert {input}-packed input to {output}-packed output"
            )),
            ScaleError::PlaneCountMismatch { input, output } => f.write_fmt(format_args!(
                "unable to convert {input} planes to {output} planes"
            )),
            ScaleError::UnsupportedImage => f.write_str("unsupported image layout"),
            ScaleError::BufferMismatch(mismatch) => f.write_fmt(format_args!(
                "plane {} buffer expected at least {} bytes but received {}",
                mismatch.plane, mismatch.expected, mismatch.received,
            )),
            ScaleError::ResolutionMismatch => {
                f.write_str("unable to compare images of different formats")
            }
        }
    }
}

impl Error for ScaleError {}
