//! Error types for pixel buffer operations.
//!
//! Buffer problems are modeled as an explicit capability check:
//! [`crate::buffer::PixelBuffer::try_view_mut`] returns a
//! [`BufferError`] *before* any pixel loop runs, so executors never
//! discover an unusable buffer halfway through a mutation.

use thiserror::Error;

/// Result type alias using [`BufferError`] as the error type.
pub type BufferResult<T> = std::result::Result<T, BufferError>;

/// Errors raised when pixel memory cannot be used for a render pass.
///
/// Every variant is recoverable from the render facade's point of
/// view: it downgrades to the next execution tier rather than
/// aborting the render.
#[derive(Debug, Error)]
pub enum BufferError {
    /// The buffer wraps memory the caller declared immutable.
    ///
    /// Shared buffers (e.g. a zero-copy view of a decoded frame) may
    /// be read freely but never mutated in place.
    #[error("buffer is marked shared/read-only and cannot be mutated")]
    ReadOnly,

    /// The backing store is shorter than `stride * height`.
    #[error("buffer size mismatch: need {expected} bytes, have {got}")]
    SizeMismatch {
        /// Bytes required by the reported geometry.
        expected: usize,
        /// Bytes actually present.
        got: usize,
    },

    /// Stride is too small for the given width and pixel size.
    #[error("stride {stride} is less than minimum {min_stride} for width {width}")]
    InvalidStride {
        /// Provided stride in bytes.
        stride: usize,
        /// Minimum required stride.
        min_stride: usize,
        /// Buffer width in pixels.
        width: u32,
    },

    /// Width or height is zero, or the byte size overflows.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Reason why dimensions are invalid.
        reason: String,
    },

    /// Pixel coordinates are outside buffer bounds.
    #[error("pixel ({x}, {y}) out of bounds for buffer {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was accessed.
        x: u32,
        /// Y coordinate that was accessed.
        y: u32,
        /// Buffer width.
        width: u32,
        /// Buffer height.
        height: u32,
    },
}

impl BufferError {
    /// Creates a [`BufferError::SizeMismatch`] error.
    #[inline]
    pub fn size_mismatch(expected: usize, got: usize) -> Self {
        Self::SizeMismatch { expected, got }
    }

    /// Creates a [`BufferError::InvalidStride`] error.
    #[inline]
    pub fn invalid_stride(stride: usize, min_stride: usize, width: u32) -> Self {
        Self::InvalidStride {
            stride,
            min_stride,
            width,
        }
    }

    /// Creates a [`BufferError::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates a [`BufferError::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if the buffer geometry (not its mutability) is at fault.
    #[inline]
    pub fn is_geometry_error(&self) -> bool {
        !matches!(self, Self::ReadOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mismatch_display() {
        let err = BufferError::size_mismatch(4096, 1024);
        let msg = err.to_string();
        assert!(msg.contains("4096"));
        assert!(msg.contains("1024"));
        assert!(err.is_geometry_error());
    }

    #[test]
    fn test_read_only_is_not_geometry() {
        assert!(!BufferError::ReadOnly.is_geometry_error());
    }
}
