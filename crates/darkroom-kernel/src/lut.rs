//! LUT baking.
//!
//! Three table flavors come out of this module:
//!
//! - a byte→byte tone LUT for the image-library fast path
//! - a byte→f32 tone table for the runtime-specialized executor
//!   (quantization deferred to the end of the pixel pipeline)
//! - byte→byte LUTs baked from user-drawn curve control points
//!
//! All indexing is by the input byte value, so a baked tone table is
//! exactly the scalar tone curve sampled at the 256 representable
//! inputs — no interpolation error against the per-pixel tiers.

use crate::convert::{normalize, quantize};
use crate::tone::{ToneCoeffs, tone_curve};
use darkroom_core::CurvePoint;

/// Number of LUT entries (one per input byte value).
pub const LUT_SIZE: usize = 256;

/// Bakes the tone curve into a byte→byte LUT.
pub fn bake_tone_lut(c: &ToneCoeffs) -> [u8; LUT_SIZE] {
    let mut lut = [0u8; LUT_SIZE];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = quantize(tone_curve(normalize(i as u8), c));
    }
    lut
}

/// Bakes the tone curve into a byte→f32 table.
///
/// Entries carry full float precision so the specialized executor's
/// downstream color/monochrome stages see the same values the scalar
/// executor computes.
pub fn bake_tone_table(c: &ToneCoeffs) -> [f32; LUT_SIZE] {
    let mut table = [0.0f32; LUT_SIZE];
    for (i, entry) in table.iter_mut().enumerate() {
        *entry = tone_curve(normalize(i as u8), c);
    }
    table
}

/// Bakes a user curve into a byte→byte LUT.
///
/// Points are sorted by x; inputs outside the covered span clamp to
/// the first/last point's output. Fewer than two points bake to the
/// identity.
pub fn bake_curve_lut(points: &[CurvePoint]) -> [u8; LUT_SIZE] {
    let mut lut = [0u8; LUT_SIZE];
    if points.len() < 2 {
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = i as u8;
        }
        return lut;
    }

    let mut sorted: Vec<CurvePoint> = points.to_vec();
    sorted.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

    for (i, entry) in lut.iter_mut().enumerate() {
        let t = i as f32 / (LUT_SIZE - 1) as f32;
        *entry = quantize(eval_curve(&sorted, t));
    }
    lut
}

/// Composes two byte LUTs: `out[i] = second[first[i]]`.
pub fn compose_luts(first: &[u8; LUT_SIZE], second: &[u8; LUT_SIZE]) -> [u8; LUT_SIZE] {
    let mut lut = [0u8; LUT_SIZE];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = second[first[i] as usize];
    }
    lut
}

/// Piecewise-linear evaluation over sorted control points.
fn eval_curve(sorted: &[CurvePoint], t: f32) -> f32 {
    let first = sorted[0];
    let last = sorted[sorted.len() - 1];
    if t <= first.x {
        return first.y.clamp(0.0, 1.0);
    }
    if t >= last.x {
        return last.y.clamp(0.0, 1.0);
    }
    for pair in sorted.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.x {
            let span = b.x - a.x;
            let frac = if span.abs() < 1e-9 {
                0.0
            } else {
                (t - a.x) / span
            };
            return (a.y + (b.y - a.y) * frac).clamp(0.0, 1.0);
        }
    }
    last.y.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_tone_lut_is_identity() {
        let lut = bake_tone_lut(&ToneCoeffs::identity());
        for (i, &v) in lut.iter().enumerate() {
            assert_eq!(v as usize, i);
        }
    }

    #[test]
    fn test_tone_table_matches_scalar_curve() {
        let c = ToneCoeffs::new(0.1, 0.0, 0.2, -0.1, 0.1, 1.3, 0.05);
        let table = bake_tone_table(&c);
        for i in 0..LUT_SIZE {
            let expected = tone_curve(normalize(i as u8), &c);
            assert_eq!(table[i].to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn test_short_curve_is_identity() {
        let lut = bake_curve_lut(&[CurvePoint::new(0.3, 0.9)]);
        for (i, &v) in lut.iter().enumerate() {
            assert_eq!(v as usize, i);
        }
    }

    #[test]
    fn test_curve_lut_interpolates() {
        let lut = bake_curve_lut(&[CurvePoint::new(0.0, 0.0), CurvePoint::new(1.0, 0.5)]);
        assert_eq!(lut[0], 0);
        assert_eq!(lut[255], 128);
        // Midpoint of a half-slope line.
        assert!((lut[128] as i32 - 64).abs() <= 1);
    }

    #[test]
    fn test_curve_lut_sorts_points() {
        let a = bake_curve_lut(&[CurvePoint::new(1.0, 1.0), CurvePoint::new(0.0, 0.2)]);
        let b = bake_curve_lut(&[CurvePoint::new(0.0, 0.2), CurvePoint::new(1.0, 1.0)]);
        assert_eq!(a, b);
        assert_eq!(a[0], 51); // 0.2 * 255 rounded
    }

    #[test]
    fn test_curve_clamps_outside_span() {
        let lut = bake_curve_lut(&[CurvePoint::new(0.25, 0.5), CurvePoint::new(0.75, 0.5)]);
        assert_eq!(lut[0], 128);
        assert_eq!(lut[255], 128);
    }

    #[test]
    fn test_compose() {
        let c = ToneCoeffs::new(0.2, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0);
        let tone = bake_tone_lut(&c);
        let ident = bake_curve_lut(&[]);
        assert_eq!(compose_luts(&tone, &ident), tone);
    }
}
