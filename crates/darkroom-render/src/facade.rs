//! Render orchestration.
//!
//! [`Renderer`] owns the detected capability and turns a resolved
//! coefficient set into pixels:
//!
//! 1. Identity short-circuit: untouched copy of the source.
//! 2. Fast path: tone through a baked byte LUT, the remaining stages
//!    through the selected tier.
//! 3. On a soft failure, the full pipeline retries on the selected
//!    tier, then on the scalar fallback, each time from a fresh copy.
//! 4. User curves always run last, as composed per-channel LUTs.

use darkroom_core::{CurveChannel, PixelBuffer};
use darkroom_kernel::{ToneCoeffs, bake_curve_lut, bake_tone_lut, compose_luts};
use darkroom_sidecar::ResolvedAdjustments;
use tracing::debug;

use crate::capability::Capability;
use crate::error::{RenderError, RenderResult};
use crate::executor::lut::apply_channel_luts;

/// Applies resolved adjustments to pixel buffers.
pub struct Renderer {
    capability: Capability,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Renderer on the best capability available to this process.
    pub fn new() -> Self {
        Self {
            capability: Capability::probe(),
        }
    }

    /// Renderer pinned to a specific tier. Used by tests and by the
    /// cross-tier equivalence checks.
    pub fn with_capability(capability: Capability) -> Self {
        Self { capability }
    }

    /// The tier this renderer executes on.
    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Renders `resolved` onto a detached copy of `src`.
    ///
    /// `src` is never mutated. Soft buffer failures degrade through
    /// the tier chain; [`RenderError::NoUsableBackend`] is returned
    /// only when even the scalar fallback cannot run.
    pub fn apply(
        &self,
        src: &PixelBuffer,
        resolved: &ResolvedAdjustments,
    ) -> RenderResult<PixelBuffer> {
        if resolved.is_identity() {
            return Ok(src.detached_copy());
        }

        let mut out = match self.apply_filters(src, resolved) {
            Ok(buf) => buf,
            Err(RenderError::BufferUnusable(err)) => {
                debug!(tier = self.capability.name(), error = %err, "tier failed, falling back to scalar");
                let mut work = src.detached_copy();
                Capability::Scalar
                    .executor()
                    .execute(&mut work, resolved)
                    .map_err(|_| RenderError::NoUsableBackend)?;
                work
            }
            Err(err) => return Err(err),
        };

        if !resolved.curves_are_identity() {
            apply_curves(&mut out, resolved)?;
        }
        Ok(out)
    }

    /// Tone/color/mono stages on the selected tier, fast path first.
    fn apply_filters(
        &self,
        src: &PixelBuffer,
        resolved: &ResolvedAdjustments,
    ) -> RenderResult<PixelBuffer> {
        let stages = resolved.stages();
        let mut work = src.detached_copy();
        if !stages.any() {
            return Ok(work);
        }

        if stages.tone {
            // Tone through a byte LUT, then only the remaining stages
            // through the tier executor.
            let lut = bake_tone_lut(&resolved.tone);
            match apply_channel_luts(&mut work, &lut, &lut, &lut) {
                Ok(()) => {
                    if stages.color || stages.mono {
                        let mut rest = resolved.clone();
                        rest.tone = ToneCoeffs::identity();
                        if let Err(err) = self.capability.executor().execute(&mut work, &rest) {
                            return self.retry_full(src, resolved, err);
                        }
                    }
                    return Ok(work);
                }
                Err(err) => return self.retry_full(src, resolved, err),
            }
        }

        self.capability.executor().execute(&mut work, resolved)?;
        Ok(work)
    }

    /// Full pipeline on the selected tier from a fresh copy of `src`.
    ///
    /// The fast path may have already written tone output into its
    /// working buffer, so the retry must not reuse it.
    fn retry_full(
        &self,
        src: &PixelBuffer,
        resolved: &ResolvedAdjustments,
        cause: RenderError,
    ) -> RenderResult<PixelBuffer> {
        if !cause.is_recoverable() {
            return Err(cause);
        }
        debug!(tier = self.capability.name(), error = %cause, "fast path failed, retrying full pipeline");
        let mut work = src.detached_copy();
        self.capability.executor().execute(&mut work, resolved)?;
        Ok(work)
    }
}

/// Bakes and applies the user curve stage.
///
/// The master `Rgb` curve composes with each channel curve; the
/// channel LUT runs first, the master second.
fn apply_curves(buffer: &mut PixelBuffer, resolved: &ResolvedAdjustments) -> RenderResult<()> {
    let master = bake_curve_lut(&resolved.curves[CurveChannel::Rgb.index()]);
    let red = compose_luts(
        &bake_curve_lut(&resolved.curves[CurveChannel::Red.index()]),
        &master,
    );
    let green = compose_luts(
        &bake_curve_lut(&resolved.curves[CurveChannel::Green.index()]),
        &master,
    );
    let blue = compose_luts(
        &bake_curve_lut(&resolved.curves[CurveChannel::Blue.index()]),
        &master,
    );
    apply_channel_luts(buffer, &blue, &green, &red)
}
