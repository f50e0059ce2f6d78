//! Per-pixel execution backends.
//!
//! Every backend implements [`PixelExecutor`] and produces identical
//! output bytes for identical inputs. The tiers differ only in how the
//! tone stage is evaluated (scalar, SIMD lanes, baked table, parallel
//! rows); the color and monochrome stages run scalar everywhere so that
//! a tier switch can never change the rendered image.

use darkroom_core::{BYTES_PER_PIXEL, PixelBuffer};
use darkroom_kernel::{
    GRAIN_THRESHOLD, apply_color, apply_mono, grain_noise, normalize, quantize, tone_curve,
};
use darkroom_sidecar::{ResolvedAdjustments, Stages};

use crate::error::RenderResult;

#[cfg(feature = "parallel")]
pub mod compiled;
pub mod lut;
pub mod scalar;
#[cfg(feature = "specialize")]
pub mod specialized;
#[cfg(feature = "simd")]
pub mod vector;

/// A backend able to apply resolved adjustments to a pixel buffer.
pub trait PixelExecutor: Send + Sync {
    /// Backend name for diagnostics.
    fn name(&self) -> &'static str;

    /// Apply `resolved` to every pixel of `buffer` in place.
    ///
    /// Must acquire the mutable view before touching any pixel so a
    /// shared or undersized buffer fails cleanly up front.
    fn execute(&self, buffer: &mut PixelBuffer, resolved: &ResolvedAdjustments)
    -> RenderResult<()>;
}

/// Apply all enabled stages to one row of BGRA pixels, scalar tone.
///
/// `row` may include stride padding past `width` pixels; the padding is
/// left untouched.
pub(crate) fn process_row(
    row: &mut [u8],
    y: u32,
    width: u32,
    height: u32,
    resolved: &ResolvedAdjustments,
    stages: Stages,
) {
    for (x, px) in row
        .chunks_exact_mut(BYTES_PER_PIXEL)
        .take(width as usize)
        .enumerate()
    {
        let mut b = normalize(px[0]);
        let mut g = normalize(px[1]);
        let mut r = normalize(px[2]);
        if stages.tone {
            b = tone_curve(b, &resolved.tone);
            g = tone_curve(g, &resolved.tone);
            r = tone_curve(r, &resolved.tone);
        }
        shade_bgr(&mut b, &mut g, &mut r, x as u32, y, width, height, resolved, stages);
        px[0] = quantize(b);
        px[1] = quantize(g);
        px[2] = quantize(r);
    }
}

/// Color and mono stages for one pixel. Shared by every tier.
#[allow(clippy::too_many_arguments)]
pub(crate) fn shade_bgr(
    b: &mut f32,
    g: &mut f32,
    r: &mut f32,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    resolved: &ResolvedAdjustments,
    stages: Stages,
) {
    if stages.color {
        (*b, *g, *r) = apply_color(*b, *g, *r, &resolved.color);
    }
    if stages.mono {
        let noise = if resolved.mono.grain > GRAIN_THRESHOLD {
            grain_noise(x, y, width, height)
        } else {
            0.0
        };
        let gray = apply_mono(*b, *g, *r, &resolved.mono, noise);
        *b = gray;
        *g = gray;
        *r = gray;
    }
}
