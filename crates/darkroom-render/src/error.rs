//! Render error types.

use darkroom_core::BufferError;
use thiserror::Error;

/// Result type alias using [`RenderError`] as the error type.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while applying adjustments to a buffer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The pixel buffer cannot be mutated (read-only or undersized).
    ///
    /// Recoverable: the facade retries on the next-lower execution
    /// tier before giving up.
    #[error("buffer unusable: {0}")]
    BufferUnusable(#[from] BufferError),

    /// Every execution tier failed, including the scalar fallback.
    ///
    /// This is a fatal configuration error: no working kernel is
    /// available for the buffer at hand.
    #[error("no usable execution backend remains")]
    NoUsableBackend,
}

impl RenderError {
    /// Whether the facade may retry on a lower tier.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::BufferUnusable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_errors_are_recoverable() {
        let err = RenderError::from(BufferError::ReadOnly);
        assert!(err.is_recoverable());
        assert!(!RenderError::NoUsableBackend.is_recoverable());
    }
}
