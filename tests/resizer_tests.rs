mod common;

use common::{smooth_plane, GrayImage};
use planar_scale::{Filter, Resizer, ResizerConfig};

fn run_both(cfg: &ResizerConfig, filter: &Filter, src: &[u8], width: usize, height: usize, dp: usize, sp: usize, dst_len: usize) -> (Vec<u8>, Vec<u8>) {
    let simd = Resizer::new(cfg, filter);
    let scalar = Resizer::new(
        &ResizerConfig {
            disable_simd: true,
            ..*cfg
        },
        filter,
    );
    let mut simd_dst = vec![0u8; dst_len];
    let mut scalar_dst = vec![0u8; dst_len];
    simd.resize(&mut simd_dst, src, width, height, dp, sp);
    scalar.resize(&mut scalar_dst, src, width, height, dp, sp);
    (simd_dst, scalar_dst)
}

#[test]
fn horizontal_lanczos_stretch() {
    // 32 -> 96 with a 3-lobe sinc, one row band per thread.
    let img = GrayImage::smooth(32, 32);
    let cfg = ResizerConfig {
        input: 32,
        output: 96,
        threads: 2,
        ..Default::default()
    };
    let (simd, scalar) = run_both(
        &cfg,
        &Filter::lanczos(3),
        &img.data,
        32,
        32,
        96,
        img.pitch,
        96 * 32,
    );
    assert_eq!(simd, scalar);
    // A mid-gray source cannot produce full-swing output even with
    // negative lobes.
    assert!(simd.iter().any(|&b| b > 0));
}

#[test]
fn vertical_generic_tap_count() {
    // Lanczos-7 needs 14 taps, which no specialized kernel covers.
    let src = smooth_plane(96, 96, 96, 0.9);
    let cfg = ResizerConfig {
        input: 96,
        output: 192,
        vertical: true,
        threads: 2,
        ..Default::default()
    };
    let (simd, scalar) = run_both(&cfg, &Filter::lanczos(7), &src, 96, 96, 96, 96, 96 * 192);
    assert_eq!(simd, scalar);
}

#[test]
fn packed_horizontal_resize() {
    // RGBA rows resized as packed bytes; channels may not bleed.
    let width = 48usize;
    let pitch = width * 4;
    let mut src = vec![0u8; pitch * 8];
    for y in 0..8 {
        for x in 0..width {
            let px = y * pitch + x * 4;
            src[px] = 200;
            src[px + 1] = 100;
            src[px + 2] = 50;
            src[px + 3] = 255;
        }
    }
    let cfg = ResizerConfig {
        input: width,
        output: 96,
        pack: 4,
        threads: 1,
        ..Default::default()
    };
    let (simd, scalar) = run_both(
        &cfg,
        &Filter::bicubic(),
        &src,
        width,
        8,
        96 * 4,
        pitch,
        96 * 4 * 8,
    );
    assert_eq!(simd, scalar);
    // Flat channels stay flat through the packed kernel.
    for px in simd.chunks_exact(4) {
        assert_eq!(px, [200, 100, 50, 255]);
    }

    // A 2-tap pair expands to an 8-tap packed row, landing on the
    // specialized wide kernel.
    let (simd, scalar) = run_both(
        &cfg,
        &Filter::Bilinear,
        &src,
        width,
        8,
        96 * 4,
        pitch,
        96 * 4 * 8,
    );
    assert_eq!(simd, scalar);
    for px in simd.chunks_exact(4) {
        assert_eq!(px, [200, 100, 50, 255]);
    }
}

#[test]
fn interlaced_vertical_fields_are_independent() {
    // Fields carry distinct flat values; a field-aware resize must not mix
    // them.
    let width = 24usize;
    let rows = 32usize;
    let mut src = vec![0u8; width * rows];
    for y in 0..rows {
        let v = if y % 2 == 0 { 60u8 } else { 200u8 };
        src[y * width..(y + 1) * width].fill(v);
    }
    let cfg = ResizerConfig {
        input: rows,
        output: 16,
        vertical: true,
        interlaced: true,
        threads: 1,
        ..Default::default()
    };
    let (simd, scalar) = run_both(
        &cfg,
        &Filter::bicubic(),
        &src,
        width,
        rows,
        width,
        width,
        width * 16,
    );
    assert_eq!(simd, scalar);
    for (y, row) in simd.chunks_exact(width).enumerate() {
        let expected = if y % 2 == 0 { 60u8 } else { 200u8 };
        assert!(
            row.iter().all(|&b| b == expected),
            "row {y} mixed fields: {row:?}"
        );
    }
}

#[test]
fn oversized_thread_count_collapses() {
    let src = smooth_plane(16, 16, 16, 0.2);
    let cfg = ResizerConfig {
        input: 16,
        output: 8,
        vertical: true,
        threads: 64,
        ..Default::default()
    };
    let (simd, scalar) = run_both(&cfg, &Filter::bicubic(), &src, 16, 16, 16, 16, 16 * 8);
    assert_eq!(simd, scalar);
}
