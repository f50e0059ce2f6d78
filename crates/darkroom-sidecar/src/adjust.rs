//! The adjustment data model.
//!
//! An [`AdjustmentSet`] holds everything a user edited for one asset:
//! four fixed-schema groups (light, color, monochrome, geometry) plus
//! up to four channel curves. Each slider group pairs a *master*
//! strength with named per-control deltas; the group's enable flag
//! turns the visual effect off without discarding the stored values.
//!
//! Every field has an explicit default equal to its identity value,
//! so `AdjustmentSet::default()` is the "no edits" document and the
//! store can skip unknown or malformed sidecar children by simply
//! leaving the default in place.

use darkroom_core::{CurveChannel, CurvePoint, curve_is_identity};

/// Identity tolerance used across the model.
pub const IDENTITY_EPS: f32 = 1e-6;

/// Light group: tone-curve sliders.
#[derive(Debug, Clone, PartialEq)]
pub struct LightGroup {
    /// Master strength scaling all deltas in the group.
    pub master: f32,
    /// When false, the group resolves to identity regardless of deltas.
    pub enabled: bool,
    /// Exposure delta.
    pub exposure: f32,
    /// Brightness delta.
    pub brightness: f32,
    /// Brilliance (midtone lift) delta.
    pub brilliance: f32,
    /// Highlights delta.
    pub highlights: f32,
    /// Shadows delta.
    pub shadows: f32,
    /// Contrast delta (0 = no change).
    pub contrast: f32,
    /// Black-point delta.
    pub black_point: f32,
}

impl Default for LightGroup {
    fn default() -> Self {
        Self {
            master: 0.0,
            enabled: true,
            exposure: 0.0,
            brightness: 0.0,
            brilliance: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            contrast: 0.0,
            black_point: 0.0,
        }
    }
}

impl LightGroup {
    /// All numeric fields within [`IDENTITY_EPS`] of their defaults.
    pub fn is_identity(&self) -> bool {
        self.master.abs() < IDENTITY_EPS
            && self.exposure.abs() < IDENTITY_EPS
            && self.brightness.abs() < IDENTITY_EPS
            && self.brilliance.abs() < IDENTITY_EPS
            && self.highlights.abs() < IDENTITY_EPS
            && self.shadows.abs() < IDENTITY_EPS
            && self.contrast.abs() < IDENTITY_EPS
            && self.black_point.abs() < IDENTITY_EPS
    }
}

/// Color group: white balance, saturation, vibrance, cast.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGroup {
    /// Master strength scaling all deltas in the group.
    pub master: f32,
    /// When false, the group resolves to identity regardless of deltas.
    pub enabled: bool,
    /// Saturation delta.
    pub saturation: f32,
    /// Vibrance delta.
    pub vibrance: f32,
    /// White-balance cast amount.
    pub cast: f32,
    /// Stored red gain multiplier.
    pub wb_gain_r: f32,
    /// Stored green gain multiplier.
    pub wb_gain_g: f32,
    /// Stored blue gain multiplier.
    pub wb_gain_b: f32,
}

impl Default for ColorGroup {
    fn default() -> Self {
        Self {
            master: 0.0,
            enabled: true,
            saturation: 0.0,
            vibrance: 0.0,
            cast: 0.0,
            wb_gain_r: 1.0,
            wb_gain_g: 1.0,
            wb_gain_b: 1.0,
        }
    }
}

impl ColorGroup {
    /// All numeric fields within [`IDENTITY_EPS`] of their defaults.
    pub fn is_identity(&self) -> bool {
        self.master.abs() < IDENTITY_EPS
            && self.saturation.abs() < IDENTITY_EPS
            && self.vibrance.abs() < IDENTITY_EPS
            && self.cast.abs() < IDENTITY_EPS
            && (self.wb_gain_r - 1.0).abs() < IDENTITY_EPS
            && (self.wb_gain_g - 1.0).abs() < IDENTITY_EPS
            && (self.wb_gain_b - 1.0).abs() < IDENTITY_EPS
    }
}

/// Monochrome group.
///
/// Intensity, neutrals and tone are stored in [0, 1] with 0.5 as the
/// neutral position; grain is [0, 1] with 0 meaning none. Legacy
/// documents stored the first three in [-1, 1]; the store remaps any
/// negative value `(v + 1) / 2` at load time so this struct only ever
/// sees the canonical range.
#[derive(Debug, Clone, PartialEq)]
pub struct MonoGroup {
    /// Master strength scaling all deltas in the group.
    pub master: f32,
    /// When false, no monochrome conversion happens.
    pub enabled: bool,
    /// Blend position: 0 = soft, 0.5 = neutral luma, 1 = rich.
    pub intensity: f32,
    /// Neutrals gamma control.
    pub neutrals: f32,
    /// Sigmoid tone control.
    pub tone: f32,
    /// Grain strength.
    pub grain: f32,
}

impl Default for MonoGroup {
    fn default() -> Self {
        Self {
            master: 0.0,
            enabled: false,
            intensity: 0.5,
            neutrals: 0.5,
            tone: 0.5,
            grain: 0.0,
        }
    }
}

/// Geometry group: crop, orientation, and stored-only perspective.
///
/// The crop rectangle is center-based and normalized: `crop_cx`,
/// `crop_cy` locate the center, `crop_w`/`crop_h` the extent, all in
/// [0, 1]. Straighten and the two perspective skews are persisted but
/// not rasterized by this engine.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryGroup {
    /// Crop center x.
    pub crop_cx: f32,
    /// Crop center y.
    pub crop_cy: f32,
    /// Crop width.
    pub crop_w: f32,
    /// Crop height.
    pub crop_h: f32,
    /// Straighten angle in degrees (stored only).
    pub straighten: f32,
    /// Quarter-turn count; `round(value) mod 4` turns are applied.
    pub rotate90: f32,
    /// Horizontal mirror.
    pub flip_horizontal: bool,
    /// Vertical perspective skew (stored only).
    pub skew_v: f32,
    /// Horizontal perspective skew (stored only).
    pub skew_h: f32,
}

impl Default for GeometryGroup {
    fn default() -> Self {
        Self {
            crop_cx: 0.5,
            crop_cy: 0.5,
            crop_w: 1.0,
            crop_h: 1.0,
            straighten: 0.0,
            rotate90: 0.0,
            flip_horizontal: false,
            skew_v: 0.0,
            skew_h: 0.0,
        }
    }
}

impl GeometryGroup {
    /// Whether the geometry leaves the image untouched.
    pub fn is_identity(&self) -> bool {
        (self.crop_cx - 0.5).abs() < IDENTITY_EPS
            && (self.crop_cy - 0.5).abs() < IDENTITY_EPS
            && (self.crop_w - 1.0).abs() < IDENTITY_EPS
            && (self.crop_h - 1.0).abs() < IDENTITY_EPS
            && self.rotate90.abs() < IDENTITY_EPS
            && !self.flip_horizontal
    }
}

/// One adjustment document for one asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjustmentSet {
    /// Light (tone-curve) group.
    pub light: LightGroup,
    /// Color group.
    pub color: ColorGroup,
    /// Monochrome group.
    pub mono: MonoGroup,
    /// Crop / orientation group.
    pub geometry: GeometryGroup,
    /// Channel curves, indexed by [`CurveChannel::index`]. Empty
    /// vectors are the identity.
    pub curves: [Vec<CurvePoint>; 4],
}

impl AdjustmentSet {
    /// Returns the curve for a channel.
    pub fn curve(&self, channel: CurveChannel) -> &[CurvePoint] {
        &self.curves[channel.index()]
    }

    /// Replaces the curve for a channel.
    pub fn set_curve(&mut self, channel: CurveChannel, points: Vec<CurvePoint>) {
        self.curves[channel.index()] = points;
    }

    /// Whether all four curves are the identity.
    pub fn curves_are_identity(&self) -> bool {
        self.curves.iter().all(|c| curve_is_identity(c))
    }

    /// Whether the whole set is visually a no-op: every numeric field
    /// at its identity value, monochrome disabled, curves identity.
    ///
    /// Geometry is judged separately (it runs in its own pipeline).
    pub fn is_identity(&self) -> bool {
        self.light.is_identity()
            && self.color.is_identity()
            && !self.mono.enabled
            && self.curves_are_identity()
    }
}
