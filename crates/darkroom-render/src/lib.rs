//! Execution backends, render facade and geometry for darkroom.
//!
//! This crate ties the workspace together: it detects the best
//! per-pixel execution tier, applies resolved adjustments to pixel
//! buffers through the [`Renderer`] facade, and performs the final
//! crop/flip/rotate step. The sidecar store and the vector resolver
//! are re-exported so collaborators need a single dependency.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use darkroom_core::PixelBuffer;
//! use darkroom_render::{Renderer, load_adjustments, resolve_for_render};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let set = load_adjustments(Path::new("shot_0913.jpg"));
//! let resolved = resolve_for_render(&set, None);
//! let src = PixelBuffer::new(1920, 1080)?;
//! let rendered = Renderer::new().apply(&src, &resolved)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod capability;
pub mod error;
pub mod executor;
pub mod facade;
pub mod geometry;

pub use capability::Capability;
pub use error::{RenderError, RenderResult};
pub use executor::PixelExecutor;
pub use facade::Renderer;
pub use geometry::crop_flip_rotate;

pub use darkroom_core::{BufferError, ColorStats, PixelBuffer};
pub use darkroom_sidecar::{
    AdjustmentSet, GeometryGroup, ResolvedAdjustments, StoreError, load as load_adjustments,
    resolve_for_render, save as save_adjustments, sidecar_path_for,
};

/// Renders `resolved` onto a detached copy of `src` using the best
/// available execution tier.
///
/// Convenience wrapper over [`Renderer::new`] followed by
/// [`Renderer::apply`]; the capability probe is memoized, so repeated
/// calls pay for detection once.
pub fn apply_adjustments(
    src: &PixelBuffer,
    resolved: &ResolvedAdjustments,
) -> RenderResult<PixelBuffer> {
    Renderer::new().apply(src, resolved)
}
