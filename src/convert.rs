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
use crate::fixed_point_vertical::copy_plane;
use crate::picture::{Picture, PictureMut};
use crate::resizer::{Resizer, ResizerConfig};
use crate::scale_error::ScaleError;
use crate::threading_policy::ThreadingPolicy;
use crate::ImageSize;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rayon::ThreadPool;

pub(crate) const MAX_PLANES: usize = 3;

/// Chroma subsampling ratio.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChromaRatio {
    /// 4:1:1
    Ratio411,
    /// 4:2:0
    Ratio420,
    /// 4:2:2
    Ratio422,
    /// 4:4:0
    Ratio440,
    /// 4:4:4
    Ratio444,
}

impl ChromaRatio {
    /// Horizontal and vertical chroma decimation factors.
    fn factors(self) -> (usize, usize) {
        match self {
            ChromaRatio::Ratio411 => (4, 1),
            ChromaRatio::Ratio420 => (2, 2),
            ChromaRatio::Ratio422 => (2, 1),
            ChromaRatio::Ratio440 => (1, 2),
            ChromaRatio::Ratio444 => (1, 1),
        }
    }
}

/// Image properties seen by the converter.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Descriptor {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Chroma subsampling ratio.
    pub ratio: ChromaRatio,
    /// Pixels per pack.
    pub pack: usize,
    /// Progressive or interlaced.
    pub interlaced: bool,
    /// Number of planes.
    pub planes: usize,
}

impl Descriptor {
    /// Returns whether the descriptor is valid.
    pub fn check(&self) -> Result<(), ScaleError> {
        if !(1..=4).contains(&self.pack) {
            return Err(ScaleError::InvalidPack(self.pack));
        }
        if self.pack > 1 && self.ratio != ChromaRatio::Ratio444 {
            // Packed pixels cannot carry subsampled chroma.
            return Err(ScaleError::UnsupportedImage);
        }
        if self.planes != 1 && self.planes != MAX_PLANES {
            return Err(ScaleError::InvalidPlaneCount(self.planes));
        }
        let (w, mut h) = self.ratio.factors();
        if self.interlaced {
            h *= 2;
        }
        if self.width % w != 0 {
            return Err(ScaleError::InvalidWidth {
                width: self.width,
                modulus: w,
            });
        }
        if self.height % h != 0 {
            return Err(ScaleError::InvalidHeight {
                height: self.height,
                modulus: h,
            });
        }
        Ok(())
    }

    /// Width in pixels of the given plane.
    ///
    /// # Panics
    /// Panics if `plane` is not in `[0, 2]`.
    pub fn width_of(&self, plane: usize) -> usize {
        assert!(plane < MAX_PLANES, "invalid plane {plane}");
        if plane == 0 {
            return self.width;
        }
        self.width / self.ratio.factors().0
    }

    /// Height in pixels of the given plane.
    ///
    /// # Panics
    /// Panics if `plane` is not in `[0, 2]`.
    pub fn height_of(&self, plane: usize) -> usize {
        assert!(plane < MAX_PLANES, "invalid plane {plane}");
        if plane == 0 {
            return self.height;
        }
        self.height / self.ratio.factors().1
    }
}

/// One borrowed image plane.
#[derive(Debug)]
pub struct PlaneRef<'a> {
    pub data: &'a [u8],
    pub width: usize,
    pub height: usize,
    pub pitch: usize,
    pub pack: usize,
}

/// One borrowed mutable image plane.
#[derive(Debug)]
pub struct PlaneMut<'a> {
    pub data: &'a mut [u8],
    pub width: usize,
    pub height: usize,
    pub pitch: usize,
    pub pack: usize,
}

/// Configuration used with [`Converter::new`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ConverterConfig {
    pub input: Descriptor,
    pub output: Descriptor,
    /// Worker threads, 0 auto-sizes from the output.
    pub threads: usize,
    /// Force the portable kernels everywhere.
    pub disable_simd: bool,
}

pub(crate) fn check_conversion(dst: &Descriptor, src: &Descriptor) -> Result<(), ScaleError> {
    src.check()?;
    dst.check()?;
    if src.interlaced != dst.interlaced {
        return Err(ScaleError::InterlacedMismatch);
    }
    if src.pack != dst.pack {
        return Err(ScaleError::PackMismatch {
            input: src.pack,
            output: dst.pack,
        });
    }
    if src.planes != dst.planes {
        return Err(ScaleError::PlaneCountMismatch {
            input: src.planes,
            output: dst.planes,
        });
    }
    Ok(())
}

fn align(value: usize, align: usize) -> usize {
    (value + align - 1) & align.wrapping_neg()
}

/// Intermediate plane for the two-axis path, allocated once and reused.
struct PlaneBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
    pitch: usize,
}

struct PlaneJob<'a> {
    dst: PlaneMut<'a>,
    src: PlaneRef<'a>,
    buffer: Option<&'a mut PlaneBuffer>,
    wrez: Option<&'a Resizer>,
    hrez: Option<&'a Resizer>,
}

/// Resizes images between two fixed descriptors.
///
/// Kernels and intermediate planes are built once; [`Converter::convert`]
/// can then run any number of times over pictures matching the configured
/// descriptors.
pub struct Converter {
    cfg: ConverterConfig,
    wrez: [Option<Resizer>; MAX_PLANES],
    hrez: [Option<Resizer>; MAX_PLANES],
    buffers: [Option<PlaneBuffer>; MAX_PLANES],
}

impl Converter {
    /// Validates the conversion and builds per-plane resizers. Planes that
    /// change along both axes additionally get a 16-byte aligned
    /// intermediate plane of the input width and output height.
    pub fn new(cfg: &ConverterConfig, filter: &Filter) -> Result<Converter, ScaleError> {
        check_conversion(&cfg.output, &cfg.input)?;
        let mut wrez: [Option<Resizer>; MAX_PLANES] = [None, None, None];
        let mut hrez: [Option<Resizer>; MAX_PLANES] = [None, None, None];
        let mut buffers: [Option<PlaneBuffer>; MAX_PLANES] = [None, None, None];
        for i in 0..cfg.output.planes {
            let win = cfg.input.width_of(i);
            let hin = cfg.input.height_of(i);
            let wout = cfg.output.width_of(i);
            let hout = cfg.output.height_of(i);
            if win != wout {
                wrez[i] = Some(Resizer::new(
                    &ResizerConfig {
                        depth: 8,
                        input: win,
                        output: wout,
                        vertical: false,
                        interlaced: false,
                        pack: cfg.input.pack,
                        threads: cfg.threads,
                        disable_simd: cfg.disable_simd,
                    },
                    filter,
                ));
            }
            if hin != hout {
                hrez[i] = Some(Resizer::new(
                    &ResizerConfig {
                        depth: 8,
                        input: hin,
                        output: hout,
                        vertical: true,
                        interlaced: cfg.output.interlaced,
                        pack: cfg.output.pack,
                        threads: cfg.threads,
                        disable_simd: cfg.disable_simd,
                    },
                    filter,
                ));
            }
            if win != wout && hin != hout {
                let pitch = align(win * cfg.input.pack, 16);
                buffers[i] = Some(PlaneBuffer {
                    data: vec![0u8; pitch * hout],
                    width: win,
                    height: hout,
                    pitch,
                });
            }
        }
        Ok(Converter {
            cfg: *cfg,
            wrez,
            hrez,
            buffers,
        })
    }

    /// Converts one picture into another, resizing every plane.
    ///
    /// The pictures must match the descriptors the converter was built
    /// with; plane geometry is re-validated on every call.
    pub fn convert(&mut self, dst: &mut PictureMut<'_>, src: &Picture<'_>) -> Result<(), ScaleError> {
        let (id, src_planes) = src.inspect(self.cfg.input.interlaced)?;
        let (od, dst_planes) = dst.inspect_mut(self.cfg.output.interlaced)?;
        check_conversion(&od, &id)?;

        let pool = ThreadingPolicy::from_threads(self.cfg.threads)
            .get_pool(ImageSize::new(od.width, od.height));
        let mut jobs: Vec<PlaneJob> = Vec::with_capacity(id.planes);
        for (((dst, src), buffer), (wrez, hrez)) in dst_planes
            .into_iter()
            .zip(src_planes)
            .zip(self.buffers.iter_mut())
            .zip(self.wrez.iter().zip(self.hrez.iter()))
        {
            jobs.push(PlaneJob {
                dst,
                src,
                buffer: buffer.as_mut(),
                wrez: wrez.as_ref(),
                hrez: hrez.as_ref(),
            });
        }
        match &pool {
            Some(installed) => installed.install(|| {
                jobs.into_par_iter().for_each(|job| resize_plane(job, &pool));
            }),
            None => {
                for job in jobs {
                    resize_plane(job, &pool);
                }
            }
        }
        Ok(())
    }
}

/// Runs one plane: copy fast path, one axis, or vertical through the
/// intermediate plane followed by horizontal.
fn resize_plane(job: PlaneJob, pool: &Option<ThreadPool>) {
    let PlaneJob {
        mut dst,
        src,
        buffer,
        wrez,
        hrez,
    } = job;
    match (hrez, wrez) {
        (Some(hrez), Some(wrez)) => {
            let buffer = buffer.expect("two-axis plane without an intermediate buffer");
            hrez.resize_with_pool(
                &mut buffer.data,
                src.data,
                src.width,
                src.height,
                buffer.pitch,
                src.pitch,
                pool,
            );
            wrez.resize_with_pool(
                dst.data,
                &buffer.data,
                buffer.width,
                buffer.height,
                dst.pitch,
                buffer.pitch,
                pool,
            );
        }
        (Some(hrez), None) => {
            hrez.resize_with_pool(
                dst.data,
                src.data,
                src.width,
                src.height,
                dst.pitch,
                src.pitch,
                pool,
            );
        }
        (None, Some(wrez)) => {
            wrez.resize_with_pool(
                dst.data,
                src.data,
                src.width,
                src.height,
                dst.pitch,
                src.pitch,
                pool,
            );
        }
        (None, None) => {
            copy_plane(
                dst.data,
                src.data,
                src.width * src.pack,
                src.height,
                dst.pitch,
                src.pitch,
            );
        }
    }
}

/// Returns a [`ConverterConfig`] set up for converting `input` pictures
/// into `output` pictures, or an error when the conversion is impossible.
pub fn prepare_conversion(output: &Picture<'_>, input: &Picture<'_>) -> Result<ConverterConfig, ScaleError> {
    let (src, _) = input.inspect(false)?;
    let (dst, _) = output.inspect(false)?;
    check_conversion(&dst, &src)?;
    Ok(ConverterConfig {
        input: src,
        output: dst,
        threads: 0,
        disable_simd: false,
    })
}

/// One-shot conversion. When the same conversion runs repeatedly, building
/// a [`Converter`] once is faster.
pub fn convert(output: &mut PictureMut<'_>, input: &Picture<'_>, filter: &Filter) -> Result<(), ScaleError> {
    let cfg = prepare_conversion(&output.as_ref(), input)?;
    let mut converter = Converter::new(&cfg, filter)?;
    converter.convert(output, input)
}
