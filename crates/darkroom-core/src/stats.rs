//! Per-image color statistics for white balance.
//!
//! [`ColorStats`] is derived once from a base pixel buffer and shared
//! read-only across every render of that buffer. It is never
//! persisted; a new base image requires a fresh instance.

use crate::buffer::{BYTES_PER_PIXEL, PixelBuffer};

/// Gray-world gains are clamped to this range so a pathological image
/// (e.g. a pure-red frame) cannot blow out a channel.
const GAIN_MIN: f32 = 0.2;
const GAIN_MAX: f32 = 5.0;

/// White-balance gain triple derived from a base image.
///
/// Gains follow the buffer's channel order convention: blue, green,
/// red. [`ColorStats::unity`] is the no-op default used when no stats
/// are available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStats {
    /// Blue channel gain.
    pub gain_b: f32,
    /// Green channel gain.
    pub gain_g: f32,
    /// Red channel gain.
    pub gain_r: f32,
}

impl Default for ColorStats {
    fn default() -> Self {
        Self::unity()
    }
}

impl ColorStats {
    /// Unity gains (no white-balance correction).
    #[inline]
    pub fn unity() -> Self {
        Self {
            gain_b: 1.0,
            gain_g: 1.0,
            gain_r: 1.0,
        }
    }

    /// Gray-world estimate: each channel's gain pulls its mean toward
    /// the mean luma of the image.
    ///
    /// Alpha is ignored. Gains are clamped to [0.2, 5.0].
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        let mut sum_b = 0.0f64;
        let mut sum_g = 0.0f64;
        let mut sum_r = 0.0f64;
        let row_bytes = buffer.width() as usize * BYTES_PER_PIXEL;

        for y in 0..buffer.height() as usize {
            let start = y * buffer.stride();
            let row = &buffer.data()[start..start + row_bytes];
            for px in row.chunks_exact(BYTES_PER_PIXEL) {
                sum_b += px[0] as f64;
                sum_g += px[1] as f64;
                sum_r += px[2] as f64;
            }
        }

        let count = (buffer.width() as f64) * (buffer.height() as f64);
        let mean_b = (sum_b / count) as f32;
        let mean_g = (sum_g / count) as f32;
        let mean_r = (sum_r / count) as f32;
        // Rec.601 luma of the channel means.
        let mean_luma = 0.299 * mean_r + 0.587 * mean_g + 0.114 * mean_b;

        let gain = |mean: f32| -> f32 {
            if mean <= f32::EPSILON {
                1.0
            } else {
                (mean_luma / mean).clamp(GAIN_MIN, GAIN_MAX)
            }
        };

        Self {
            gain_b: gain(mean_b),
            gain_g: gain(mean_g),
            gain_r: gain(mean_r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unity_is_default() {
        assert_eq!(ColorStats::default(), ColorStats::unity());
    }

    #[test]
    fn test_neutral_gray_yields_unity() {
        let mut buf = PixelBuffer::new(8, 8).unwrap();
        buf.fill([128, 128, 128, 255]);
        let stats = ColorStats::from_buffer(&buf);
        assert_relative_eq!(stats.gain_b, 1.0, epsilon = 1e-4);
        assert_relative_eq!(stats.gain_g, 1.0, epsilon = 1e-4);
        assert_relative_eq!(stats.gain_r, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_blue_cast_pulls_blue_down() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        buf.fill([200, 100, 100, 255]);
        let stats = ColorStats::from_buffer(&buf);
        assert!(stats.gain_b < 1.0);
        assert!(stats.gain_r > 1.0);
    }

    #[test]
    fn test_black_frame_stays_unity() {
        let buf = PixelBuffer::new(4, 4).unwrap();
        let stats = ColorStats::from_buffer(&buf);
        assert_eq!(stats, ColorStats::unity());
    }
}
