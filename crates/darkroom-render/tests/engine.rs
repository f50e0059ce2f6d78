//! End-to-end tests: store round-trip, resolve, render, geometry.

use darkroom_core::PixelBuffer;
use darkroom_render::{
    Capability, Renderer, apply_adjustments, crop_flip_rotate, load_adjustments,
    resolve_for_render, save_adjustments,
};
use darkroom_sidecar::{AdjustmentSet, GeometryGroup};
use tempfile::TempDir;

fn sample_set() -> AdjustmentSet {
    let mut set = AdjustmentSet::default();
    set.light.master = 0.25;
    set.light.exposure = -0.4;
    set.light.contrast = 0.3;
    set.color.saturation = 0.5;
    set.color.cast = 0.8;
    set.mono.enabled = true;
    set.mono.intensity = 0.7;
    set.mono.grain = 0.4;
    set.geometry.crop_w = 0.5;
    set.geometry.crop_h = 0.5;
    set.geometry.rotate90 = 1.0;
    set
}

fn checkerboard(w: u32, h: u32) -> PixelBuffer {
    let mut buf = PixelBuffer::new(w, h).unwrap();
    for y in 0..h {
        for x in 0..w {
            let v = if (x + y) % 2 == 0 { 40 } else { 220 };
            buf.set_pixel(x, y, [v, 180, 90, 255]).unwrap();
        }
    }
    buf
}

#[test]
fn test_sidecar_round_trip_preserves_values() {
    let dir = TempDir::new().unwrap();
    let asset = dir.path().join("photo.jpg");
    let set = sample_set();

    save_adjustments(&asset, &set).unwrap();
    let loaded = load_adjustments(&asset);

    assert_eq!(loaded.light.master, set.light.master);
    assert_eq!(loaded.light.exposure, set.light.exposure);
    assert_eq!(loaded.color.saturation, set.color.saturation);
    assert!(loaded.mono.enabled);
    assert_eq!(loaded.mono.intensity, set.mono.intensity);
    assert_eq!(loaded.geometry.crop_w, set.geometry.crop_w);
    assert_eq!(loaded.geometry.rotate90, set.geometry.rotate90);
}

#[test]
fn test_missing_sidecar_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let set = load_adjustments(&dir.path().join("absent.jpg"));
    assert!(set.is_identity());
}

#[test]
fn test_disabled_groups_render_identity() {
    // Stored values survive a round-trip but a disabled group has no
    // visual effect.
    let mut set = sample_set();
    set.light.enabled = false;
    set.color.enabled = false;
    set.mono.enabled = false;

    let resolved = resolve_for_render(&set, None);
    assert!(resolved.is_identity());

    let src = checkerboard(8, 8);
    let out = apply_adjustments(&src, &resolved).unwrap();
    assert_eq!(out.data(), src.data());
}

#[test]
fn test_render_is_deterministic_with_grain() {
    let mut set = AdjustmentSet::default();
    set.mono.enabled = true;
    set.mono.intensity = 0.8;
    set.mono.grain = 0.6;
    let resolved = resolve_for_render(&set, None);

    let src = checkerboard(32, 24);
    let a = apply_adjustments(&src, &resolved).unwrap();
    let b = apply_adjustments(&src, &resolved).unwrap();
    assert_eq!(a.data(), b.data());
}

#[test]
fn test_identity_render_is_idempotent() {
    let set = AdjustmentSet::default();
    let resolved = resolve_for_render(&set, None);
    let src = checkerboard(10, 10);
    let once = apply_adjustments(&src, &resolved).unwrap();
    let twice = apply_adjustments(&once, &resolved).unwrap();
    assert_eq!(once.data(), src.data());
    assert_eq!(twice.data(), src.data());
}

#[test]
fn test_all_tiers_agree_bit_for_bit() {
    let mut set = sample_set();
    set.geometry = GeometryGroup::default();
    let resolved = resolve_for_render(&set, None);
    let src = checkerboard(37, 21);

    let reference = Renderer::with_capability(Capability::Scalar)
        .apply(&src, &resolved)
        .unwrap();
    for &cap in Capability::ALL {
        let out = Renderer::with_capability(cap).apply(&src, &resolved).unwrap();
        assert_eq!(
            out.data(),
            reference.data(),
            "tier {} disagrees with scalar",
            cap.name()
        );
    }
}

#[test]
fn test_full_negative_exposure_renders_black() {
    let mut white = PixelBuffer::new(2, 2).unwrap();
    white.fill([255, 255, 255, 255]);

    let mut set = AdjustmentSet::default();
    set.light.exposure = -1.0;
    let resolved = resolve_for_render(&set, None);

    let out = apply_adjustments(&white, &resolved).unwrap();
    for px in out.data().chunks_exact(4) {
        assert_eq!(&px[..3], &[0, 0, 0]);
        assert_eq!(px[3], 255);
    }
}

#[test]
fn test_centered_crop_rect_is_exact() {
    let src = checkerboard(100, 100);
    let geo = GeometryGroup {
        crop_w: 0.5,
        crop_h: 0.5,
        ..GeometryGroup::default()
    };
    let out = crop_flip_rotate(&src, &geo).unwrap();
    assert_eq!((out.width(), out.height()), (50, 50));
    for y in 0..50 {
        for x in 0..50 {
            assert_eq!(
                out.pixel(x, y).unwrap(),
                src.pixel(x + 25, y + 25).unwrap()
            );
        }
    }
}

#[test]
fn test_crop_result_stays_inside_source() {
    let src = checkerboard(64, 48);
    let geo = GeometryGroup {
        crop_cx: 0.9,
        crop_cy: 0.1,
        crop_w: 0.7,
        crop_h: 0.4,
        ..GeometryGroup::default()
    };
    let out = crop_flip_rotate(&src, &geo).unwrap();
    assert!(out.width() <= src.width());
    assert!(out.height() <= src.height());
    assert_eq!((out.width(), out.height()), (45, 19));
}

#[test]
fn test_crop_grid_sweep_stays_inside_source() {
    // Coarse sweep over (cx, cy, w, h), including off-frame centers
    // and degenerate extents: every result must fit the source.
    let src = checkerboard(31, 17);
    let positions = [0.0, 0.25, 0.5, 0.75, 1.0];
    let extents = [0.0, 0.1, 0.33, 0.5, 0.8, 1.0];
    for &cx in &positions {
        for &cy in &positions {
            for &w in &extents {
                for &h in &extents {
                    let geo = GeometryGroup {
                        crop_cx: cx,
                        crop_cy: cy,
                        crop_w: w,
                        crop_h: h,
                        ..GeometryGroup::default()
                    };
                    let out = crop_flip_rotate(&src, &geo).unwrap();
                    assert!(
                        out.width() >= 1 && out.width() <= src.width(),
                        "width {} outside source for cx={cx} cy={cy} w={w} h={h}",
                        out.width()
                    );
                    assert!(
                        out.height() >= 1 && out.height() <= src.height(),
                        "height {} outside source for cx={cx} cy={cy} w={w} h={h}",
                        out.height()
                    );
                }
            }
        }
    }
}

#[test]
fn test_render_then_geometry_pipeline() {
    let set = sample_set();
    let resolved = resolve_for_render(&set, None);
    let src = checkerboard(40, 30);

    let filtered = apply_adjustments(&src, &resolved).unwrap();
    let finished = crop_flip_rotate(&filtered, &set.geometry).unwrap();

    // Half crop of 40x30 is 20x15, then one quarter turn swaps axes.
    assert_eq!((finished.width(), finished.height()), (15, 20));
    // Monochrome output: B, G and R agree everywhere.
    for px in finished.data().chunks_exact(4) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }
}

#[test]
fn test_shared_source_buffer_renders_without_mutation() {
    let mut src = checkerboard(16, 16);
    src.mark_shared();
    let before = src.data().to_vec();

    let mut set = AdjustmentSet::default();
    set.light.brightness = 0.5;
    let resolved = resolve_for_render(&set, None);

    let out = apply_adjustments(&src, &resolved).unwrap();
    assert_eq!(src.data(), &before[..]);
    assert_ne!(out.data(), src.data());
}
