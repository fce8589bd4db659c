//! Error types for the basement
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using BasementError
pub type Result<T> = std::result::Result<T, BasementError>;

/// Unified error type for basement operations
#[derive(Debug, Error)]
pub enum BasementError {
    // -------------------------------------------------------------------------
    // Resource Errors
    // -------------------------------------------------------------------------
    /// The arena could not grow. The embedding engine must treat this as
    /// fatal: the basement is left consistent but cannot accept more writes.
    #[error("Resource exhausted: could not grant {requested} bytes")]
    ResourceExhausted { requested: usize },

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Record corruption detected: {0}")]
    Corruption(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BasementError {
    /// Whether the embedding engine should halt rather than retry
    pub fn is_fatal(&self) -> bool {
        matches!(self, BasementError::ResourceExhausted { .. })
    }
}
