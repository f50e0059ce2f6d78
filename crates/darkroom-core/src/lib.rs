//! # darkroom-core
//!
//! Core types for the darkroom non-destructive photo adjustment
//! engine.
//!
//! This crate is the foundation of the workspace and has no internal
//! dependencies. It provides:
//!
//! - [`PixelBuffer`] / [`MutableView`] - stride-aware BGRA8 pixel
//!   memory with an explicit mutability capability
//! - [`ColorStats`] - per-image white-balance gains, derived once and
//!   shared read-only
//! - [`CurvePoint`] / [`CurveChannel`] - vocabulary for user-drawn
//!   channel curves
//! - [`BufferError`] - the soft-failure signal render tiers recover
//!   from
//!
//! ## Crate structure
//!
//! ```text
//! darkroom-core (this crate)
//!    ^
//!    |
//!    +-- darkroom-sidecar (adjustment model, resolver, XML store)
//!    +-- darkroom-kernel  (pure pixel math, LUT baking)
//!    +-- darkroom-render  (executor tiers, facade, geometry)
//! ```

#![warn(missing_docs)]

pub mod buffer;
pub mod curve;
pub mod error;
pub mod stats;

pub use buffer::{BYTES_PER_PIXEL, MutableView, PixelBuffer};
pub use curve::{CurveChannel, CurvePoint, curve_is_identity};
pub use error::{BufferError, BufferResult};
pub use stats::ColorStats;
