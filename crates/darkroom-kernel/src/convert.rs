//! Byte/float channel conversions.
//!
//! Every tier funnels through these two functions so the
//! quantization behavior is identical everywhere: normalize divides
//! by 255, quantize clamps to [0, 1] and rounds to nearest.

/// Byte to normalized [0, 1] channel value.
#[inline]
pub fn normalize(v: u8) -> f32 {
    v as f32 / 255.0
}

/// Normalized channel value to byte: clamp, scale, round to nearest.
#[inline]
pub fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
