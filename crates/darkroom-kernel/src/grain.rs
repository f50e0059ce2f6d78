//! Deterministic procedural grain.
//!
//! The classic shader hash `fract(sin(dot(uv, (12.9898, 78.233))) *
//! 43758.5453)`, evaluated in plain f32. It is not a statistical PRNG;
//! it only needs visual plausibility plus one hard requirement: the
//! same (x, y, width, height) must produce the identical bit pattern
//! on every execution tier.

/// First hash basis coefficient.
const HASH_U: f32 = 12.9898;
/// Second hash basis coefficient.
const HASH_V: f32 = 78.233;
/// Hash amplitude.
const HASH_SCALE: f32 = 43758.5453;

/// Deterministic noise sample for a pixel coordinate, in [0, 1).
///
/// Coordinates are normalized by `(width - 1, height - 1)`;
/// single-pixel extents normalize to zero.
#[inline]
pub fn grain_noise(x: u32, y: u32, width: u32, height: u32) -> f32 {
    let u = if width > 1 {
        x as f32 / (width - 1) as f32
    } else {
        0.0
    };
    let v = if height > 1 {
        y as f32 / (height - 1) as f32
    } else {
        0.0
    };
    let s = (u * HASH_U + v * HASH_V).sin() * HASH_SCALE;
    s - s.floor()
}
