//! # darkroom-kernel
//!
//! Pure pixel math for the darkroom adjustment engine. Every function
//! here is deterministic and side-effect free: given the same
//! coefficients and the same normalized [0, 1] inputs, the output is
//! bit-identical across calls and across execution tiers.
//!
//! - [`tone::tone_curve`] / [`tone::tone_curve_x8`] - the channel tone
//!   curve, scalar and 8-wide SIMD forms sharing one operation
//!   sequence
//! - [`color::apply_color`] - white balance, saturation, vibrance
//! - [`mono::apply_mono`] - monochrome conversion with blended curves
//! - [`grain::grain_noise`] - deterministic procedural grain
//! - [`lut`] - tone and user-curve table baking
//!
//! The executor tiers in `darkroom-render` wrap these functions
//! against real pixel buffers; nothing in this crate touches a buffer
//! or performs I/O.

#![warn(missing_docs)]

pub mod color;
pub mod convert;
pub mod grain;
pub mod lut;
pub mod mono;
pub mod tone;

pub use color::{ColorCoeffs, apply_color};
pub use convert::{normalize, quantize};
pub use grain::grain_noise;
pub use lut::{LUT_SIZE, bake_curve_lut, bake_tone_lut, bake_tone_table, compose_luts};
pub use mono::{GRAIN_THRESHOLD, MonoCoeffs, apply_mono, sigmoid_tone};
pub use tone::{ToneCoeffs, tone_curve, tone_curve_x8};
