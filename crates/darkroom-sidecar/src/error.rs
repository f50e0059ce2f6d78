//! Store error types.
//!
//! Only the save path surfaces errors. Load-side problems (missing
//! file, parse failure, malformed fields) are absorbed per the store
//! contract: the caller always gets a usable [`crate::AdjustmentSet`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`StoreError`] as the error type.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while persisting a sidecar document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure while writing the temporary file.
    ///
    /// The temporary file is removed; the original document on disk
    /// is untouched.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The atomic rename over the destination failed.
    #[error("failed to persist sidecar to {path}: {source}")]
    Persist {
        /// Destination sidecar path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// XML serialization failed.
    #[error("failed to serialize sidecar: {0}")]
    Serialize(String),
}
