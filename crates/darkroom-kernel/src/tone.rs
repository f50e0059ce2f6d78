//! Channel tone curve.
//!
//! The tone curve runs per channel on normalized [0, 1] values:
//!
//! 1. exposure + brightness offset
//! 2. brilliance midtone lift, weighted by distance from mid-gray
//! 3. highlights rolloff above 0.65 / shadows lift below 0.35
//! 4. contrast pivot at 0.5
//! 5. black point compression (or lift for negative values)
//! 6. clamp
//!
//! [`ToneCoeffs`] folds the contrast and black-point steps into
//! affine slope/offset pairs and the highlight/shadow conditionals
//! into `max(…, 0)` terms, so the scalar and the `f32x8` form execute
//! the exact same operation sequence: mul, add, max, min. That is
//! what keeps the execution tiers bit-equal on the tone stage.

use wide::f32x8;

/// Upper knee of the highlights zone.
const HI_KNEE: f32 = 0.65;
/// Lower knee of the shadows zone.
const SH_KNEE: f32 = 0.35;
/// Reciprocal of the knee width (both zones are 0.35 wide).
const KNEE_INV: f32 = 1.0 / 0.35;

/// Precomputed tone-curve coefficients.
///
/// Built once per render from the resolved adjustment values; every
/// executor tier consumes the same instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCoeffs {
    /// Combined exposure + brightness offset (step 1).
    pub offset: f32,
    /// Midtone lift amount (step 2).
    pub brilliance: f32,
    /// Highlights strength (step 3).
    pub highlights: f32,
    /// Shadows strength (step 3).
    pub shadows: f32,
    /// Contrast affine slope (the contrast factor).
    pub contrast_slope: f32,
    /// Contrast affine offset, `0.5 * (1 - factor)`.
    pub contrast_offset: f32,
    /// Black-point affine slope.
    pub bp_slope: f32,
    /// Black-point affine offset.
    pub bp_offset: f32,
}

impl Default for ToneCoeffs {
    fn default() -> Self {
        Self::identity()
    }
}

impl ToneCoeffs {
    /// Builds coefficients from resolved slider values.
    ///
    /// `contrast_factor` is the multiplicative contrast (1.0 = no
    /// change); `black_point` compresses toward black when positive
    /// and lifts blacks when negative.
    pub fn new(
        exposure: f32,
        brightness: f32,
        brilliance: f32,
        highlights: f32,
        shadows: f32,
        contrast_factor: f32,
        black_point: f32,
    ) -> Self {
        // (a - 0.5) * f + 0.5 == a * f + 0.5 * (1 - f)
        let contrast_slope = contrast_factor;
        let contrast_offset = 0.5 * (1.0 - contrast_factor);
        // bp > 0: a - bp*(1-a) == a*(1+bp) - bp
        // bp < 0: a - bp*a     == a*(1-bp)
        let (bp_slope, bp_offset) = if black_point > 0.0 {
            (1.0 + black_point, -black_point)
        } else {
            (1.0 - black_point, 0.0)
        };
        Self {
            offset: exposure + brightness,
            brilliance,
            highlights,
            shadows,
            contrast_slope,
            contrast_offset,
            bp_slope,
            bp_offset,
        }
    }

    /// Identity coefficients (output equals input).
    pub fn identity() -> Self {
        Self {
            offset: 0.0,
            brilliance: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            contrast_slope: 1.0,
            contrast_offset: 0.0,
            bp_slope: 1.0,
            bp_offset: 0.0,
        }
    }

    /// Whether every coefficient is within `eps` of identity.
    pub fn is_identity(&self, eps: f32) -> bool {
        self.offset.abs() < eps
            && self.brilliance.abs() < eps
            && self.highlights.abs() < eps
            && self.shadows.abs() < eps
            && (self.contrast_slope - 1.0).abs() < eps
            && self.contrast_offset.abs() < eps
            && (self.bp_slope - 1.0).abs() < eps
            && self.bp_offset.abs() < eps
    }
}

/// Applies the tone curve to a single normalized channel value.
#[inline]
pub fn tone_curve(v: f32, c: &ToneCoeffs) -> f32 {
    let mut a = v + c.offset;
    // Midtone weight peaks at v = 0.5 and fades to zero at the ends.
    let t = 2.0 * (v - 0.5);
    a += c.brilliance * (1.0 - t * t);
    // The two knee terms are mutually exclusive: at most one max() is
    // non-zero, which matches the if/elif form exactly.
    let hi = (a - HI_KNEE).max(0.0) * KNEE_INV;
    let sh = (SH_KNEE - a).max(0.0) * KNEE_INV;
    a = a + c.highlights * hi + c.shadows * sh;
    a = a * c.contrast_slope + c.contrast_offset;
    a = a * c.bp_slope + c.bp_offset;
    a.max(0.0).min(1.0)
}

/// Applies the tone curve to 8 channel values at once.
///
/// Operation-for-operation identical to [`tone_curve`]; output is
/// bit-equal to eight scalar calls.
#[inline]
pub fn tone_curve_x8(v: f32x8, c: &ToneCoeffs) -> f32x8 {
    let half = f32x8::splat(0.5);
    let zero = f32x8::splat(0.0);
    let one = f32x8::splat(1.0);
    let two = f32x8::splat(2.0);

    let mut a = v + f32x8::splat(c.offset);
    let t = two * (v - half);
    a += f32x8::splat(c.brilliance) * (one - t * t);
    let hi = (a - f32x8::splat(HI_KNEE)).max(zero) * f32x8::splat(KNEE_INV);
    let sh = (f32x8::splat(SH_KNEE) - a).max(zero) * f32x8::splat(KNEE_INV);
    a = a + f32x8::splat(c.highlights) * hi + f32x8::splat(c.shadows) * sh;
    a = a * f32x8::splat(c.contrast_slope) + f32x8::splat(c.contrast_offset);
    a = a * f32x8::splat(c.bp_slope) + f32x8::splat(c.bp_offset);
    a.max(zero).min(one)
}
