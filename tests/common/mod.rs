#![allow(dead_code)]

use planar_scale::{ChromaRatio, Picture, PictureMut};

pub fn ratio_factors(ratio: ChromaRatio) -> (usize, usize) {
    match ratio {
        ChromaRatio::Ratio411 => (4, 1),
        ChromaRatio::Ratio420 => (2, 2),
        ChromaRatio::Ratio422 => (2, 1),
        ChromaRatio::Ratio440 => (1, 2),
        ChromaRatio::Ratio444 => (1, 1),
    }
}

/// Deterministic smooth test pattern, photographic enough for PSNR runs.
pub fn smooth_plane(width: usize, height: usize, pitch: usize, phase: f64) -> Vec<u8> {
    let mut data = vec![0u8; pitch * height];
    for y in 0..height {
        for x in 0..width {
            let fx = x as f64;
            let fy = y as f64;
            let v = 128.0
                + 58.0 * ((fx * 0.043 + phase).sin() * (fy * 0.031 + phase * 0.5).cos())
                + 41.0 * ((fx * 0.011).cos() * (fy * 0.017).sin());
            data[y * pitch + x] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    data
}

#[derive(Clone)]
pub struct YuvImage {
    pub y: Vec<u8>,
    pub cb: Vec<u8>,
    pub cr: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub y_pitch: usize,
    pub c_pitch: usize,
    pub ratio: ChromaRatio,
}

impl YuvImage {
    pub fn alloc(width: usize, height: usize, ratio: ChromaRatio) -> YuvImage {
        let (fw, fh) = ratio_factors(ratio);
        let cw = width / fw;
        let ch = height / fh;
        let y_pitch = width + 16;
        let c_pitch = cw + 8;
        YuvImage {
            y: vec![0u8; y_pitch * height],
            cb: vec![0u8; c_pitch * ch],
            cr: vec![0u8; c_pitch * ch],
            width,
            height,
            y_pitch,
            c_pitch,
            ratio,
        }
    }

    pub fn smooth(width: usize, height: usize, ratio: ChromaRatio) -> YuvImage {
        let mut img = YuvImage::alloc(width, height, ratio);
        let (fw, fh) = ratio_factors(ratio);
        img.y = smooth_plane(width, height, img.y_pitch, 0.0);
        img.cb = smooth_plane(width / fw, height / fh, img.c_pitch, 1.7);
        img.cr = smooth_plane(width / fw, height / fh, img.c_pitch, 3.1);
        img
    }

    pub fn picture(&self) -> Picture<'_> {
        Picture::YCbCr {
            y: &self.y,
            cb: &self.cb,
            cr: &self.cr,
            width: self.width,
            height: self.height,
            y_pitch: self.y_pitch,
            c_pitch: self.c_pitch,
            ratio: self.ratio,
        }
    }

    pub fn picture_mut(&mut self) -> PictureMut<'_> {
        PictureMut::YCbCr {
            y: &mut self.y,
            cb: &mut self.cb,
            cr: &mut self.cr,
            width: self.width,
            height: self.height,
            y_pitch: self.y_pitch,
            c_pitch: self.c_pitch,
            ratio: self.ratio,
        }
    }
}

#[derive(Clone)]
pub struct RgbaImage {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub pitch: usize,
}

impl RgbaImage {
    pub fn alloc(width: usize, height: usize) -> RgbaImage {
        let pitch = width * 4 + 12;
        RgbaImage {
            data: vec![0u8; pitch * height],
            width,
            height,
            pitch,
        }
    }

    pub fn smooth(width: usize, height: usize) -> RgbaImage {
        let mut img = RgbaImage::alloc(width, height);
        for y in 0..height {
            for x in 0..width {
                let fx = x as f64;
                let fy = y as f64;
                let px = &mut img.data[y * img.pitch + x * 4..y * img.pitch + x * 4 + 4];
                px[0] = (128.0 + 100.0 * (fx * 0.05).sin()).clamp(0.0, 255.0) as u8;
                px[1] = (128.0 + 100.0 * (fy * 0.04).cos()).clamp(0.0, 255.0) as u8;
                px[2] = (128.0 + 90.0 * ((fx + fy) * 0.02).sin()).clamp(0.0, 255.0) as u8;
                px[3] = 255;
            }
        }
        img
    }

    pub fn picture(&self) -> Picture<'_> {
        Picture::Rgba {
            data: &self.data,
            width: self.width,
            height: self.height,
            pitch: self.pitch,
        }
    }

    pub fn picture_mut(&mut self) -> PictureMut<'_> {
        PictureMut::Rgba {
            data: &mut self.data,
            width: self.width,
            height: self.height,
            pitch: self.pitch,
        }
    }
}

#[derive(Clone)]
pub struct GrayImage {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub pitch: usize,
}

impl GrayImage {
    pub fn alloc(width: usize, height: usize) -> GrayImage {
        let pitch = width + 9;
        GrayImage {
            data: vec![0u8; pitch * height],
            width,
            height,
            pitch,
        }
    }

    pub fn smooth(width: usize, height: usize) -> GrayImage {
        let mut img = GrayImage::alloc(width, height);
        img.data = smooth_plane(width, height, img.pitch, 0.4);
        img
    }

    pub fn picture(&self) -> Picture<'_> {
        Picture::Gray {
            data: &self.data,
            width: self.width,
            height: self.height,
            pitch: self.pitch,
        }
    }

    pub fn picture_mut(&mut self) -> PictureMut<'_> {
        PictureMut::Gray {
            data: &mut self.data,
            width: self.width,
            height: self.height,
            pitch: self.pitch,
        }
    }
}
