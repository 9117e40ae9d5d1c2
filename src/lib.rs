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

//! Fast polyphase resizer for planar 8-bit images.
//!
//! Featuring:
//!  - YCbCr resizes and chroma subsample ratio conversions
//!  - Packed RGBA and planar gray resizes
//!  - Optional interlaced-aware resizes
//!  - Parallel resizes over a rayon pool
//!  - SSE2 inner kernels on x86, with a portable fallback
//!
//! The easiest way to use it is:
//!
//! ```no_run
//! # use planar_scale::{convert, Filter, Picture, PictureMut};
//! # let (src, mut dst): (Picture, PictureMut) = unimplemented!();
//! convert(&mut dst, &src, &Filter::bicubic())?;
//! # Ok::<(), planar_scale::ScaleError>(())
//! ```
//!
//! When the same conversion runs over many frames, build the pipeline once:
//!
//! ```no_run
//! # use planar_scale::{prepare_conversion, Converter, Filter, Picture, PictureMut};
//! # let (src, mut dst): (Picture, PictureMut) = unimplemented!();
//! let cfg = prepare_conversion(&dst.as_ref(), &src)?;
//! let mut converter = Converter::new(&cfg, &Filter::bicubic())?;
//! converter.convert(&mut dst, &src)?;
//! # Ok::<(), planar_scale::ScaleError>(())
//! ```
#![allow(clippy::too_many_arguments)]

mod convert;
mod dispatch;
mod filter;
mod fixed_point_horizontal;
mod fixed_point_vertical;
mod image_size;
mod kernel;
mod picture;
mod psnr;
mod resizer;
mod scale_error;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod sse;
mod support;
mod threading_policy;

pub use convert::{
    convert, prepare_conversion, ChromaRatio, Converter, ConverterConfig, Descriptor, PlaneMut,
    PlaneRef,
};
pub use filter::Filter;
pub use image_size::ImageSize;
pub use picture::{Picture, PictureMut};
pub use psnr::{psnr, psnr_plane};
pub use resizer::{Resizer, ResizerConfig};
pub use scale_error::{BufferMismatch, ScaleError};
pub use support::PRECISION;
pub use threading_policy::ThreadingPolicy;
