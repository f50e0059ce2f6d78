//! Color transform: white balance, saturation, vibrance.
//!
//! Works on normalized [0, 1] channels. The transform splits each
//! pixel into luma and chroma, scales the chroma, and recombines.
//! Vibrance weights its boost toward midtones so already-saturated
//! extremes move less than skin-tone territory.

/// Rec.601 luma weights, matching the legacy color pipeline.
pub const LUMA_R: f32 = 0.299;
/// Rec.601 green weight.
pub const LUMA_G: f32 = 0.587;
/// Rec.601 blue weight.
pub const LUMA_B: f32 = 0.114;

/// Precomputed color-transform coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorCoeffs {
    /// Chroma scale from the saturation slider (0 = no change).
    pub saturation: f32,
    /// Midtone-weighted chroma scale (0 = no change).
    pub vibrance: f32,
    /// White-balance blend amount (0 = gains ignored, 1 = full gains).
    pub cast: f32,
    /// Blue white-balance gain.
    pub gain_b: f32,
    /// Green white-balance gain.
    pub gain_g: f32,
    /// Red white-balance gain.
    pub gain_r: f32,
}

impl Default for ColorCoeffs {
    fn default() -> Self {
        Self::identity()
    }
}

impl ColorCoeffs {
    /// Identity coefficients (output equals input).
    pub fn identity() -> Self {
        Self {
            saturation: 0.0,
            vibrance: 0.0,
            cast: 0.0,
            gain_b: 1.0,
            gain_g: 1.0,
            gain_r: 1.0,
        }
    }

    /// Whether every coefficient is within `eps` of identity.
    ///
    /// The gains are not inspected: with cast within `eps` of zero
    /// the white-balance mix collapses to unity regardless of them.
    pub fn is_identity(&self, eps: f32) -> bool {
        self.saturation.abs() < eps && self.vibrance.abs() < eps && self.cast.abs() < eps
    }
}

/// Applies white balance, saturation and vibrance to one pixel.
///
/// Channels arrive and return in buffer order (b, g, r).
#[inline]
pub fn apply_color(b: f32, g: f32, r: f32, c: &ColorCoeffs) -> (f32, f32, f32) {
    // White-balance mix: cast blends between unity and the gain.
    let inv_cast = 1.0 - c.cast;
    let b = b * (inv_cast + c.gain_b * c.cast);
    let g = g * (inv_cast + c.gain_g * c.cast);
    let r = r * (inv_cast + c.gain_r * c.cast);

    let luma = LUMA_R * r + LUMA_G * g + LUMA_B * b;
    // Vibrance weight: 1 at mid-gray, 0 at the extremes.
    let w = 1.0 - ((luma - 0.5).abs() * 2.0).clamp(0.0, 1.0);
    let scale = (1.0 + c.saturation) * (1.0 + c.vibrance * w);

    let recombine = |ch: f32| (luma + (ch - luma) * scale).clamp(0.0, 1.0);
    (recombine(b), recombine(g), recombine(r))
}
