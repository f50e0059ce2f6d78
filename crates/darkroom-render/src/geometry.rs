//! Geometric finishing: crop, horizontal flip, quarter-turn rotation.
//!
//! Geometry runs after the per-pixel filter stages, in the fixed order
//! crop, then flip, then rotation. The crop rectangle is stored
//! normalized (center plus extent in [0, 1]) and is clamped so the
//! pixel rect always lies inside the source. Straighten and skew
//! angles are persisted by the store but not rasterized here.

use darkroom_core::{BYTES_PER_PIXEL, PixelBuffer};
use darkroom_sidecar::GeometryGroup;
use tracing::debug;

use crate::error::RenderResult;

/// Tolerance under which a crop extent counts as full frame.
const FULL_FRAME_EPS: f32 = 1e-6;

/// Crop rectangle in pixels, derived from normalized geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelRect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

/// Applies the geometry group to `buffer`, returning a new buffer.
///
/// An identity group returns a detached copy. A degenerate crop
/// (zero or negative extent) is skipped rather than treated as an
/// error; the remaining operations still run.
pub fn crop_flip_rotate(buffer: &PixelBuffer, geo: &GeometryGroup) -> RenderResult<PixelBuffer> {
    if geo.is_identity() {
        return Ok(buffer.detached_copy());
    }

    let mut out = match crop_rect(geo, buffer.width(), buffer.height()) {
        Some(rect) => copy_rect(buffer, rect)?,
        None => buffer.detached_copy(),
    };

    if geo.flip_horizontal {
        flip_horizontal_in_place(&mut out)?;
    }

    let quarter_turns = (geo.rotate90.round() as i32).rem_euclid(4);
    for _ in 0..quarter_turns {
        out = rotate90_cw(&out)?;
    }

    Ok(out)
}

/// Resolves the normalized crop to a pixel rect, or `None` for a
/// degenerate or full-frame crop.
fn crop_rect(geo: &GeometryGroup, width: u32, height: u32) -> Option<PixelRect> {
    let w = geo.crop_w.clamp(0.0, 1.0);
    let h = geo.crop_h.clamp(0.0, 1.0);
    if w <= FULL_FRAME_EPS || h <= FULL_FRAME_EPS {
        debug!(crop_w = geo.crop_w, crop_h = geo.crop_h, "skipping degenerate crop");
        return None;
    }
    if w >= 1.0 - FULL_FRAME_EPS && h >= 1.0 - FULL_FRAME_EPS {
        return None;
    }

    // Center clamped so the extent stays inside the unit square.
    let cx = geo.crop_cx.clamp(w * 0.5, 1.0 - w * 0.5);
    let cy = geo.crop_cy.clamp(h * 0.5, 1.0 - h * 0.5);

    let pw = ((w * width as f32).round() as u32).clamp(1, width);
    let ph = ((h * height as f32).round() as u32).clamp(1, height);
    let x = (((cx - w * 0.5) * width as f32).round() as u32).min(width - pw);
    let y = (((cy - h * 0.5) * height as f32).round() as u32).min(height - ph);
    Some(PixelRect { x, y, w: pw, h: ph })
}

fn copy_rect(src: &PixelBuffer, rect: PixelRect) -> RenderResult<PixelBuffer> {
    let mut out = PixelBuffer::new(rect.w, rect.h)?;
    let row_bytes = rect.w as usize * BYTES_PER_PIXEL;
    let src_stride = src.stride();
    let src_data = src.data();
    {
        let mut view = out.try_view_mut()?;
        for dy in 0..rect.h {
            let sy = (rect.y + dy) as usize;
            let start = sy * src_stride + rect.x as usize * BYTES_PER_PIXEL;
            view.row_mut(dy).copy_from_slice(&src_data[start..start + row_bytes]);
        }
    }
    Ok(out)
}

fn flip_horizontal_in_place(buffer: &mut PixelBuffer) -> RenderResult<()> {
    let mut view = buffer.try_view_mut()?;
    let width = view.width() as usize;
    for row in view.rows_mut() {
        for x in 0..width / 2 {
            let (a, b) = (x * BYTES_PER_PIXEL, (width - 1 - x) * BYTES_PER_PIXEL);
            for k in 0..BYTES_PER_PIXEL {
                row.swap(a + k, b + k);
            }
        }
    }
    Ok(())
}

/// One clockwise quarter turn into a new buffer.
fn rotate90_cw(src: &PixelBuffer) -> RenderResult<PixelBuffer> {
    let (sw, sh) = (src.width(), src.height());
    let mut out = PixelBuffer::new(sh, sw)?;
    for dy in 0..sw {
        for dx in 0..sh {
            let px = src.pixel(dy, sh - 1 - dx)?;
            out.set_pixel(dx, dy, px)?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(w: u32, h: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h).unwrap();
        for y in 0..h {
            for x in 0..w {
                let v = (y * w + x) as u8;
                buf.set_pixel(x, y, [v, v, v, 255]).unwrap();
            }
        }
        buf
    }

    #[test]
    fn test_identity_geometry_is_a_copy() {
        let src = numbered(4, 3);
        let out = crop_flip_rotate(&src, &GeometryGroup::default()).unwrap();
        assert_eq!(out.data(), src.data());
    }

    #[test]
    fn test_centered_half_crop() {
        let src = numbered(100, 100);
        let geo = GeometryGroup {
            crop_w: 0.5,
            crop_h: 0.5,
            ..GeometryGroup::default()
        };
        let out = crop_flip_rotate(&src, &geo).unwrap();
        assert_eq!((out.width(), out.height()), (50, 50));
        // Top-left of the crop is source pixel (25, 25).
        assert_eq!(out.pixel(0, 0).unwrap(), src.pixel(25, 25).unwrap());
    }

    #[test]
    fn test_off_center_crop_is_clamped_inside() {
        let src = numbered(40, 40);
        let geo = GeometryGroup {
            crop_cx: 0.0,
            crop_cy: 1.0,
            crop_w: 0.5,
            crop_h: 0.5,
            ..GeometryGroup::default()
        };
        let out = crop_flip_rotate(&src, &geo).unwrap();
        assert_eq!((out.width(), out.height()), (20, 20));
        // Clamped to the bottom-left corner.
        assert_eq!(out.pixel(0, 0).unwrap(), src.pixel(0, 20).unwrap());
    }

    #[test]
    fn test_degenerate_crop_is_skipped() {
        let src = numbered(8, 8);
        let geo = GeometryGroup {
            crop_w: 0.0,
            crop_h: 0.5,
            flip_horizontal: true,
            ..GeometryGroup::default()
        };
        let out = crop_flip_rotate(&src, &geo).unwrap();
        // Flip still applies on the uncropped frame.
        assert_eq!((out.width(), out.height()), (8, 8));
        assert_eq!(out.pixel(0, 0).unwrap(), src.pixel(7, 0).unwrap());
    }

    #[test]
    fn test_flip_horizontal() {
        let src = numbered(5, 2);
        let geo = GeometryGroup {
            flip_horizontal: true,
            ..GeometryGroup::default()
        };
        let out = crop_flip_rotate(&src, &geo).unwrap();
        for y in 0..2 {
            for x in 0..5 {
                assert_eq!(out.pixel(x, y).unwrap(), src.pixel(4 - x, y).unwrap());
            }
        }
    }

    #[test]
    fn test_rotate_one_quarter_turn() {
        let src = numbered(3, 2);
        let geo = GeometryGroup {
            rotate90: 1.0,
            ..GeometryGroup::default()
        };
        let out = crop_flip_rotate(&src, &geo).unwrap();
        assert_eq!((out.width(), out.height()), (2, 3));
        // Bottom-left of the source becomes top-left of the output.
        assert_eq!(out.pixel(0, 0).unwrap(), src.pixel(0, 1).unwrap());
        assert_eq!(out.pixel(1, 2).unwrap(), src.pixel(2, 0).unwrap());
    }

    #[test]
    fn test_four_turns_is_identity() {
        let src = numbered(4, 3);
        let geo = GeometryGroup {
            rotate90: 4.0,
            ..GeometryGroup::default()
        };
        let out = crop_flip_rotate(&src, &geo).unwrap();
        assert_eq!(out.data(), src.data());
    }

    #[test]
    fn test_negative_turns_wrap() {
        let src = numbered(4, 3);
        let ccw = GeometryGroup {
            rotate90: -1.0,
            ..GeometryGroup::default()
        };
        let three_cw = GeometryGroup {
            rotate90: 3.0,
            ..GeometryGroup::default()
        };
        let a = crop_flip_rotate(&src, &ccw).unwrap();
        let b = crop_flip_rotate(&src, &three_cw).unwrap();
        assert_eq!(a.data(), b.data());
    }
}
