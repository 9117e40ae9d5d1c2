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
use crate::convert::{ChromaRatio, Descriptor, PlaneMut, PlaneRef};
use crate::scale_error::{BufferMismatch, ScaleError};

/// Borrowed host image handed to the converter surface.
///
/// The converter only ever sees the descriptor and raw planes derived from
/// one of these layouts.
#[derive(Debug)]
pub enum Picture<'a> {
    /// Planar YCbCr with a shared chroma pitch.
    YCbCr {
        y: &'a [u8],
        cb: &'a [u8],
        cr: &'a [u8],
        width: usize,
        height: usize,
        y_pitch: usize,
        c_pitch: usize,
        ratio: ChromaRatio,
    },
    /// Packed 4-byte pixels, one plane.
    Rgba {
        data: &'a [u8],
        width: usize,
        height: usize,
        pitch: usize,
    },
    /// Single 8-bit plane.
    Gray {
        data: &'a [u8],
        width: usize,
        height: usize,
        pitch: usize,
    },
}

/// Mutable counterpart of [`Picture`] for destination images.
#[derive(Debug)]
pub enum PictureMut<'a> {
    YCbCr {
        y: &'a mut [u8],
        cb: &'a mut [u8],
        cr: &'a mut [u8],
        width: usize,
        height: usize,
        y_pitch: usize,
        c_pitch: usize,
        ratio: ChromaRatio,
    },
    Rgba {
        data: &'a mut [u8],
        width: usize,
        height: usize,
        pitch: usize,
    },
    Gray {
        data: &'a mut [u8],
        width: usize,
        height: usize,
        pitch: usize,
    },
}

fn check_plane(len: usize, width: usize, height: usize, pitch: usize, pack: usize, plane: usize) -> Result<(), ScaleError> {
    let expected = pitch * (height - 1) + width * pack;
    if len < expected {
        return Err(ScaleError::BufferMismatch(BufferMismatch {
            expected,
            received: len,
            plane,
        }));
    }
    Ok(())
}

impl<'a> Picture<'a> {
    /// Image properties as the converter sees them.
    pub fn descriptor(&self, interlaced: bool) -> Descriptor {
        match self {
            Picture::YCbCr {
                width, height, ratio, ..
            } => Descriptor {
                width: *width,
                height: *height,
                ratio: *ratio,
                pack: 1,
                interlaced,
                planes: 3,
            },
            Picture::Rgba { width, height, .. } => Descriptor {
                width: *width,
                height: *height,
                ratio: ChromaRatio::Ratio444,
                pack: 4,
                interlaced,
                planes: 1,
            },
            Picture::Gray { width, height, .. } => Descriptor {
                width: *width,
                height: *height,
                ratio: ChromaRatio::Ratio444,
                pack: 1,
                interlaced,
                planes: 1,
            },
        }
    }

    /// Validates the picture and splits it into descriptor plus planes.
    pub fn inspect(&self, interlaced: bool) -> Result<(Descriptor, Vec<PlaneRef<'a>>), ScaleError> {
        let d = self.descriptor(interlaced);
        d.check()?;
        let mut planes = Vec::with_capacity(d.planes);
        match *self {
            Picture::YCbCr {
                y,
                cb,
                cr,
                y_pitch,
                c_pitch,
                ..
            } => {
                for (i, (data, pitch)) in [(y, y_pitch), (cb, c_pitch), (cr, c_pitch)]
                    .into_iter()
                    .enumerate()
                {
                    let width = d.width_of(i);
                    let height = d.height_of(i);
                    check_plane(data.len(), width, height, pitch, 1, i)?;
                    planes.push(PlaneRef {
                        data,
                        width,
                        height,
                        pitch,
                        pack: 1,
                    });
                }
            }
            Picture::Rgba {
                data,
                width,
                height,
                pitch,
            } => {
                check_plane(data.len(), width, height, pitch, 4, 0)?;
                planes.push(PlaneRef {
                    data,
                    width,
                    height,
                    pitch,
                    pack: 4,
                });
            }
            Picture::Gray {
                data,
                width,
                height,
                pitch,
            } => {
                check_plane(data.len(), width, height, pitch, 1, 0)?;
                planes.push(PlaneRef {
                    data,
                    width,
                    height,
                    pitch,
                    pack: 1,
                });
            }
        }
        Ok((d, planes))
    }
}

impl<'a> PictureMut<'a> {
    /// Immutable view of the same picture.
    pub fn as_ref(&self) -> Picture<'_> {
        match self {
            PictureMut::YCbCr {
                y,
                cb,
                cr,
                width,
                height,
                y_pitch,
                c_pitch,
                ratio,
            } => Picture::YCbCr {
                y,
                cb,
                cr,
                width: *width,
                height: *height,
                y_pitch: *y_pitch,
                c_pitch: *c_pitch,
                ratio: *ratio,
            },
            PictureMut::Rgba {
                data,
                width,
                height,
                pitch,
            } => Picture::Rgba {
                data,
                width: *width,
                height: *height,
                pitch: *pitch,
            },
            PictureMut::Gray {
                data,
                width,
                height,
                pitch,
            } => Picture::Gray {
                data,
                width: *width,
                height: *height,
                pitch: *pitch,
            },
        }
    }

    pub fn descriptor(&self, interlaced: bool) -> Descriptor {
        self.as_ref().descriptor(interlaced)
    }

    /// Mutable variant of [`Picture::inspect`].
    pub fn inspect_mut(
        &mut self,
        interlaced: bool,
    ) -> Result<(Descriptor, Vec<PlaneMut<'_>>), ScaleError> {
        let d = self.descriptor(interlaced);
        d.check()?;
        let mut planes = Vec::with_capacity(d.planes);
        match self {
            PictureMut::YCbCr {
                y,
                cb,
                cr,
                y_pitch,
                c_pitch,
                ..
            } => {
                let parts: [(&mut [u8], usize); 3] = [
                    (&mut **y, *y_pitch),
                    (&mut **cb, *c_pitch),
                    (&mut **cr, *c_pitch),
                ];
                for (i, (data, pitch)) in parts.into_iter().enumerate() {
                    let width = d.width_of(i);
                    let height = d.height_of(i);
                    check_plane(data.len(), width, height, pitch, 1, i)?;
                    planes.push(PlaneMut {
                        data,
                        width,
                        height,
                        pitch,
                        pack: 1,
                    });
                }
            }
            PictureMut::Rgba {
                data,
                width,
                height,
                pitch,
            } => {
                check_plane(data.len(), *width, *height, *pitch, 4, 0)?;
                planes.push(PlaneMut {
                    data: &mut **data,
                    width: *width,
                    height: *height,
                    pitch: *pitch,
                    pack: 4,
                });
            }
            PictureMut::Gray {
                data,
                width,
                height,
                pitch,
            } => {
                check_plane(data.len(), *width, *height, *pitch, 1, 0)?;
                planes.push(PlaneMut {
                    data: &mut **data,
                    width: *width,
                    height: *height,
                    pitch: *pitch,
                    pack: 1,
                });
            }
        }
        Ok((d, planes))
    }
}
