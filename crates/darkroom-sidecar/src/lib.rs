//! # darkroom-sidecar
//!
//! The adjustment data model and its durable store.
//!
//! Three pieces live here:
//!
//! - [`AdjustmentSet`] and its fixed-schema groups - what the user
//!   edited, with explicit identity defaults per field
//! - [`resolve_for_render`] - expands master+delta groups into the
//!   flat [`ResolvedAdjustments`] coefficient set the execution tiers
//!   consume
//! - [`store`] - the per-asset XML sidecar document: tolerant loads,
//!   atomic saves, legacy-shape normalization
//!
//! Saving stores the raw deltas verbatim; no inverse of the resolver
//! is ever needed.

#![warn(missing_docs)]

pub mod adjust;
pub mod error;
pub mod resolve;
pub mod store;

pub use adjust::{
    AdjustmentSet, ColorGroup, GeometryGroup, IDENTITY_EPS, LightGroup, MonoGroup,
};
pub use error::{StoreError, StoreResult};
pub use resolve::{ResolvedAdjustments, Stages, resolve_for_render};
pub use store::{load, parse_document, save, serialize, sidecar_path_for};
