//! Control-point vocabulary for user-drawn channel curves.

/// A single curve control point in [0, 1]².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Input position.
    pub x: f32,
    /// Output value.
    pub y: f32,
}

impl CurvePoint {
    /// Creates a control point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The channel a user curve applies to.
///
/// [`Rgb`](CurveChannel::Rgb) is the master curve: it composes with
/// each of the per-channel curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveChannel {
    /// Master curve applied to all three color channels.
    Rgb,
    /// Red channel only.
    Red,
    /// Green channel only.
    Green,
    /// Blue channel only.
    Blue,
}

impl CurveChannel {
    /// All channels in serialization order.
    pub const ALL: [CurveChannel; 4] = [
        CurveChannel::Rgb,
        CurveChannel::Red,
        CurveChannel::Green,
        CurveChannel::Blue,
    ];

    /// Stable name used in the sidecar document.
    pub fn name(&self) -> &'static str {
        match self {
            CurveChannel::Rgb => "rgb",
            CurveChannel::Red => "red",
            CurveChannel::Green => "green",
            CurveChannel::Blue => "blue",
        }
    }

    /// Parses a sidecar channel name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rgb" => Some(CurveChannel::Rgb),
            "red" => Some(CurveChannel::Red),
            "green" => Some(CurveChannel::Green),
            "blue" => Some(CurveChannel::Blue),
            _ => None,
        }
    }

    /// Index into a 4-slot curve array.
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            CurveChannel::Rgb => 0,
            CurveChannel::Red => 1,
            CurveChannel::Green => 2,
            CurveChannel::Blue => 3,
        }
    }
}

/// Returns `true` when a point list describes the identity mapping.
///
/// Absent (empty) and single-point curves are the identity, as is any
/// list whose points all sit on the diagonal.
pub fn curve_is_identity(points: &[CurvePoint]) -> bool {
    if points.len() < 2 {
        return true;
    }
    points.iter().all(|p| (p.y - p.x).abs() < 1e-6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_name_roundtrip() {
        for ch in CurveChannel::ALL {
            assert_eq!(CurveChannel::from_name(ch.name()), Some(ch));
        }
        assert_eq!(CurveChannel::from_name("alpha"), None);
    }

    #[test]
    fn test_identity_detection() {
        assert!(curve_is_identity(&[]));
        assert!(curve_is_identity(&[CurvePoint::new(0.5, 0.9)]));
        assert!(curve_is_identity(&[
            CurvePoint::new(0.0, 0.0),
            CurvePoint::new(1.0, 1.0),
        ]));
        assert!(!curve_is_identity(&[
            CurvePoint::new(0.0, 0.1),
            CurvePoint::new(1.0, 1.0),
        ]));
    }
}
