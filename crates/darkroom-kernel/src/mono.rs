//! Monochrome conversion with blended tone curves.
//!
//! The conversion builds three candidate grays from Rec.709 luma and
//! blends between them with the intensity control:
//!
//! - **soft**: gamma-lifted `luma^0.82` through the sigmoid at zero
//!   strength
//! - **neutral**: the raw luma
//! - **rich**: gamma-compressed `luma^(1/1.22)` through the sigmoid at
//!   +0.35 strength
//!
//! The 0.82 / 1.22 / 0.35 constants are empirically tuned visual
//! constants carried over from the legacy pipeline; changing any of
//! them is a regression.

/// Rec.709 luma weights.
pub const REC709_R: f32 = 0.2126;
/// Rec.709 green weight.
pub const REC709_G: f32 = 0.7152;
/// Rec.709 blue weight.
pub const REC709_B: f32 = 0.0722;

/// Gamma of the soft candidate curve.
const SOFT_GAMMA: f32 = 0.82;
/// Inverse gamma of the rich candidate curve (`luma^(1/1.22)`).
const RICH_GAMMA: f32 = 1.22;
/// Sigmoid strength applied to the rich candidate.
const RICH_TONE_STRENGTH: f32 = 0.35;
/// Grain amplitude at full strength.
const GRAIN_AMPLITUDE: f32 = 0.2;
/// Below this the grain stage is skipped entirely.
pub const GRAIN_THRESHOLD: f32 = 1e-6;
/// Logit clamp to keep the sigmoid finite at the ends.
const LOGIT_EPS: f32 = 1e-5;

/// Precomputed monochrome coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonoCoeffs {
    /// Blend position in the kernel's native [-1, 1] convention:
    /// -1 = fully soft, 0 = neutral luma, +1 = fully rich.
    pub intensity: f32,
    /// Neutrals gamma control in [0, 1], 0.5 = no change.
    pub neutrals: f32,
    /// Sigmoid tone control in [0, 1], 0.5 = no change.
    pub tone: f32,
    /// Grain strength in [0, 1].
    pub grain: f32,
}

impl Default for MonoCoeffs {
    fn default() -> Self {
        Self::identity()
    }
}

impl MonoCoeffs {
    /// Neutral coefficients: plain Rec.709 luma, no grain.
    pub fn identity() -> Self {
        Self {
            intensity: 0.0,
            neutrals: 0.5,
            tone: 0.5,
            grain: 0.0,
        }
    }
}

/// Sigmoid tone curve with strength in [-1, 1].
///
/// Positive strength steepens the curve (logit slope up to 2.2),
/// negative strength flattens it (down to 0.6). Zero strength is the
/// identity up to the logit clamp.
#[inline]
pub fn sigmoid_tone(x: f32, strength: f32) -> f32 {
    let k = if strength >= 0.0 {
        1.0 + 1.2 * strength
    } else {
        1.0 - 0.4 * (-strength)
    };
    let x = x.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    let logit = (x / (1.0 - x)).ln();
    let y = logit * k;
    (1.0 / (1.0 + (-y).exp())).clamp(0.0, 1.0)
}

/// Converts one pixel to monochrome, returning the replicated gray.
///
/// Channels arrive in buffer order (b, g, r); `noise` is the
/// deterministic per-pixel sample from
/// [`grain_noise`](crate::grain::grain_noise).
#[inline]
pub fn apply_mono(b: f32, g: f32, r: f32, c: &MonoCoeffs, noise: f32) -> f32 {
    let luma = REC709_R * r + REC709_G * g + REC709_B * b;

    let mut gray = if c.intensity >= 0.0 {
        let rich = sigmoid_tone(luma.powf(1.0 / RICH_GAMMA), RICH_TONE_STRENGTH);
        luma + (rich - luma) * c.intensity
    } else {
        let soft = sigmoid_tone(luma.powf(SOFT_GAMMA), 0.0);
        luma + (soft - luma) * (-c.intensity)
    };

    // Neutrals: exponent 2^(-1.2*(n-0.5)), 1.0 at the neutral position.
    gray = gray
        .max(0.0)
        .powf(2.0_f32.powf(-1.2 * (c.neutrals - 0.5)));
    gray = sigmoid_tone(gray, 2.0 * (c.tone - 0.5));

    if c.grain > GRAIN_THRESHOLD {
        gray += (noise - 0.5) * GRAIN_AMPLITUDE * c.grain;
    }
    gray.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sigmoid_zero_strength_is_identity() {
        for i in 1..100 {
            let x = i as f32 / 100.0;
            assert_relative_eq!(sigmoid_tone(x, 0.0), x, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_sigmoid_positive_strength_steepens() {
        // Steeper curve: darker below the pivot, brighter above.
        assert!(sigmoid_tone(0.25, 1.0) < 0.25);
        assert!(sigmoid_tone(0.75, 1.0) > 0.75);
        assert_relative_eq!(sigmoid_tone(0.5, 1.0), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_sigmoid_negative_strength_flattens() {
        assert!(sigmoid_tone(0.25, -1.0) > 0.25);
        assert!(sigmoid_tone(0.75, -1.0) < 0.75);
    }

    #[test]
    fn test_neutral_intensity_is_luma() {
        let c = MonoCoeffs::identity();
        let gray = apply_mono(0.25, 0.5, 0.75, &c, 0.5);
        let luma = REC709_R * 0.75 + REC709_G * 0.5 + REC709_B * 0.25;
        assert_relative_eq!(gray, luma, epsilon = 1e-4);
    }

    #[test]
    fn test_blend_is_continuous_at_neutral() {
        let mut lo = MonoCoeffs::identity();
        lo.intensity = -1e-4;
        let mut hi = MonoCoeffs::identity();
        hi.intensity = 1e-4;
        let a = apply_mono(0.3, 0.4, 0.5, &lo, 0.5);
        let b = apply_mono(0.3, 0.4, 0.5, &hi, 0.5);
        assert_relative_eq!(a, b, epsilon = 1e-3);
    }

    #[test]
    fn test_rich_brightens_midtones() {
        let mut c = MonoCoeffs::identity();
        c.intensity = 1.0;
        let neutral = apply_mono(0.3, 0.3, 0.3, &MonoCoeffs::identity(), 0.5);
        let rich = apply_mono(0.3, 0.3, 0.3, &c, 0.5);
        // Gamma compression lifts a 0.3 gray.
        assert!(rich > neutral);
    }

    #[test]
    fn test_grain_threshold_gates_noise() {
        let mut c = MonoCoeffs::identity();
        c.grain = 0.0;
        let clean = apply_mono(0.5, 0.5, 0.5, &c, 0.9);
        c.grain = 1.0;
        let grainy = apply_mono(0.5, 0.5, 0.5, &c, 0.9);
        assert_relative_eq!(grainy - clean, 0.4 * GRAIN_AMPLITUDE, epsilon = 1e-4);
    }

    #[test]
    fn test_output_is_clamped() {
        let mut c = MonoCoeffs::identity();
        c.grain = 1.0;
        assert!(apply_mono(1.0, 1.0, 1.0, &c, 1.0) <= 1.0);
        assert!(apply_mono(0.0, 0.0, 0.0, &c, 0.0) >= 0.0);
    }
}
