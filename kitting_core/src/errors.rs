//! # Error Types
//!
//! Structured error types for kitting_core. Every variant carries enough
//! context to report the problem to a user or emit it as JSON from the CLI.
//!
//! ## Example
//!
//! ```rust
//! use kitting_core::errors::{KitError, KitResult};
//!
//! fn validate_area(area_m2: f64) -> KitResult<()> {
//!     if area_m2 <= 0.0 {
//!         return Err(KitError::invalid_input(
//!             "area_m2",
//!             area_m2.to_string(),
//!             "Floor area must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for kitting_core operations
pub type KitResult<T> = Result<T, KitError>;

/// Structured error type for estimator operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum KitError {
    /// An input value is invalid (non-finite, non-positive, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A BoQ table sort was requested on a column that does not exist
    #[error("Unknown sort key: '{key}' (expected one of id, desc, size, manual, opt, save)")]
    UnknownSortKey { key: String },

    /// CSV or PDF export could not be produced
    #[error("Export failed: {format} - {reason}")]
    ExportFailed { format: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl KitError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        KitError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownSortKey error
    pub fn unknown_sort_key(key: impl Into<String>) -> Self {
        KitError::UnknownSortKey { key: key.into() }
    }

    /// Create an ExportFailed error
    pub fn export_failed(format: impl Into<String>, reason: impl Into<String>) -> Self {
        KitError::ExportFailed {
            format: format.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        KitError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            KitError::InvalidInput { .. } => "INVALID_INPUT",
            KitError::UnknownSortKey { .. } => "UNKNOWN_SORT_KEY",
            KitError::ExportFailed { .. } => "EXPORT_FAILED",
            KitError::FileError { .. } => "FILE_ERROR",
            KitError::SerializationError { .. } => "SERIALIZATION_ERROR",
            KitError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for KitError {
    fn from(e: serde_json::Error) -> Self {
        KitError::SerializationError {
            reason: e.to_string(),
        }
    }
}
