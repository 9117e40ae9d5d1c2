/*
 * // Copyright (c) Radzivon Bartoshyk. All rights reserved.
 * //
 * // Use of this source code is governed by a BSD-style
 * // license that can be found in the LICENSE file.
 */

use crate::picture::Picture;
use crate::scale_error::ScaleError;

/// PSNR in dB between two planes of equal geometry, `inf` when identical.
pub fn psnr_plane(a: &[u8], b: &[u8], width: usize, height: usize, ap: usize, bp: usize) -> f64 {
    let mut sum = 0u64;
    for (row_a, row_b) in a.chunks(ap).zip(b.chunks(bp)).take(height) {
        for (&x, &y) in row_a[..width].iter().zip(&row_b[..width]) {
            let diff = x as i64 - y as i64;
            sum += (diff * diff) as u64;
        }
    }
    let mse = sum as f64 / (width * height) as f64;
    if mse == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (255.0 * 255.0 / mse).log10()
}

/// Computes the per-plane PSNR between two pictures of the same format.
pub fn psnr(a: &Picture<'_>, b: &Picture<'_>) -> Result<Vec<f64>, ScaleError> {
    let (da, planes_a) = a.inspect(false)?;
    let (db, planes_b) = b.inspect(false)?;
    if da != db {
        return Err(ScaleError::ResolutionMismatch);
    }
    Ok(planes_a
        .iter()
        .zip(planes_b.iter())
        .map(|(pa, pb)| {
            psnr_plane(
                pa.data,
                pb.data,
                pa.width * pa.pack,
                pa.height,
                pa.pitch,
                pb.pitch,
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_planes_are_infinite() {
        let a = [1u8, 2, 3, 4];
        assert_eq!(psnr_plane(&a, &a, 2, 2, 2, 2), f64::INFINITY);
    }

    #[test]
    fn known_mse() {
        let a = [0u8, 0, 0, 0];
        let b = [5u8, 5, 5, 5];
        // mse = 25 -> 10 * log10(65025 / 25)
        let expected = 10.0 * (65025.0f64 / 25.0).log10();
        assert!((psnr_plane(&a, &b, 2, 2, 2, 2) - expected).abs() < 1e-12);
    }

    #[test]
    fn mismatched_pictures_rejected() {
        let a = [0u8; 16];
        let b = [0u8; 64];
        let pa = Picture::Gray {
            data: &a,
            width: 4,
            height: 4,
            pitch: 4,
        };
        let pb = Picture::Gray {
            data: &b,
            width: 8,
            height: 8,
            pitch: 8,
        };
        assert_eq!(psnr(&pa, &pb), Err(ScaleError::ResolutionMismatch));
        assert_eq!(psnr(&pa, &pa).unwrap(), vec![f64::INFINITY]);
    }
}
