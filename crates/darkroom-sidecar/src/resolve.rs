//! Vector resolution: stored master+delta values to kernel coefficients.
//!
//! [`resolve_for_render`] expands the compact group representation
//! into the flat coefficient set the execution tiers consume. The
//! function is pure: identical inputs produce bit-identical output,
//! and nothing here reads a clock, an env var, or a pixel.
//!
//! Per group, an enabled master contributes `master * scale_key` to
//! every delta. The light group carries the legacy tone-curve
//! weights (exposure 1.5, brightness 0.75, brilliance 0.6); every
//! other key uses weight 1.0. A disabled group resolves to its
//! identity regardless of stored content, which is how the store can
//! preserve user values while switching the visual effect off.

use crate::adjust::{AdjustmentSet, IDENTITY_EPS};
use darkroom_core::{ColorStats, CurvePoint, curve_is_identity};
use darkroom_kernel::{ColorCoeffs, MonoCoeffs, ToneCoeffs};

/// Legacy master weight for the exposure delta.
pub const MASTER_SCALE_EXPOSURE: f32 = 1.5;
/// Legacy master weight for the brightness delta.
pub const MASTER_SCALE_BRIGHTNESS: f32 = 0.75;
/// Legacy master weight for the brilliance delta.
pub const MASTER_SCALE_BRILLIANCE: f32 = 0.6;

/// Which pixel stages a resolved set needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stages {
    /// Tone curve stage.
    pub tone: bool,
    /// Color transform stage.
    pub color: bool,
    /// Monochrome conversion stage.
    pub mono: bool,
}

impl Stages {
    /// No stage needed.
    pub fn none() -> Self {
        Self {
            tone: false,
            color: false,
            mono: false,
        }
    }

    /// Whether any stage is needed.
    pub fn any(&self) -> bool {
        self.tone || self.color || self.mono
    }
}

/// The flat, backend-facing coefficient set.
///
/// Ephemeral: recomputed on every parameter change, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAdjustments {
    /// Tone-curve coefficients.
    pub tone: ToneCoeffs,
    /// Color-transform coefficients.
    pub color: ColorCoeffs,
    /// Monochrome coefficients (intensity already in [-1, 1]).
    pub mono: MonoCoeffs,
    /// Whether the monochrome stage runs at all.
    pub mono_enabled: bool,
    /// Cloned channel curves for the final curve-LUT stage.
    pub curves: [Vec<CurvePoint>; 4],
}

impl Default for ResolvedAdjustments {
    fn default() -> Self {
        Self::identity()
    }
}

impl ResolvedAdjustments {
    /// Fully neutral coefficients.
    pub fn identity() -> Self {
        Self {
            tone: ToneCoeffs::identity(),
            color: ColorCoeffs::identity(),
            mono: MonoCoeffs::identity(),
            mono_enabled: false,
            curves: Default::default(),
        }
    }

    /// Whether all four curves are the identity.
    pub fn curves_are_identity(&self) -> bool {
        self.curves.iter().all(|c| curve_is_identity(c))
    }

    /// Every coefficient within 1e-6 of identity, monochrome off,
    /// curves identity: rendering may return a detached copy.
    pub fn is_identity(&self) -> bool {
        self.tone.is_identity(IDENTITY_EPS)
            && self.color.is_identity(IDENTITY_EPS)
            && !self.mono_enabled
            && self.curves_are_identity()
    }

    /// Which per-pixel stages this set needs.
    pub fn stages(&self) -> Stages {
        Stages {
            tone: !self.tone.is_identity(IDENTITY_EPS),
            color: !self.color.is_identity(IDENTITY_EPS),
            mono: self.mono_enabled,
        }
    }
}

/// Resolves an [`AdjustmentSet`] into kernel coefficients.
///
/// `stats` supplies the white-balance gain triple derived from the
/// base image; `None` means unity gains.
pub fn resolve_for_render(
    set: &AdjustmentSet,
    stats: Option<&ColorStats>,
) -> ResolvedAdjustments {
    let tone = if set.light.enabled {
        let m = set.light.master;
        ToneCoeffs::new(
            m * MASTER_SCALE_EXPOSURE + set.light.exposure,
            m * MASTER_SCALE_BRIGHTNESS + set.light.brightness,
            m * MASTER_SCALE_BRILLIANCE + set.light.brilliance,
            m + set.light.highlights,
            m + set.light.shadows,
            1.0 + m + set.light.contrast,
            m + set.light.black_point,
        )
    } else {
        ToneCoeffs::identity()
    };

    let color = if set.color.enabled {
        let m = set.color.master;
        let unity = ColorStats::unity();
        let stats = stats.unwrap_or(&unity);
        ColorCoeffs {
            saturation: m + set.color.saturation,
            vibrance: m + set.color.vibrance,
            cast: m + set.color.cast,
            gain_b: set.color.wb_gain_b * stats.gain_b,
            gain_g: set.color.wb_gain_g * stats.gain_g,
            gain_r: set.color.wb_gain_r * stats.gain_r,
        }
    } else {
        ColorCoeffs::identity()
    };

    let (mono, mono_enabled) = if set.mono.enabled {
        let m = set.mono.master;
        let clamped = |v: f32| (v + m).clamp(0.0, 1.0);
        (
            MonoCoeffs {
                // Kernel convention: [-1, 1] around the neutral point.
                intensity: clamped(set.mono.intensity) * 2.0 - 1.0,
                neutrals: clamped(set.mono.neutrals),
                tone: clamped(set.mono.tone),
                grain: clamped(set.mono.grain),
            },
            true,
        )
    } else {
        (MonoCoeffs::identity(), false)
    };

    ResolvedAdjustments {
        tone,
        color,
        mono,
        mono_enabled,
        curves: set.curves.clone(),
    }
}
