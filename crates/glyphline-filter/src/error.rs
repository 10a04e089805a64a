//! Error types for glyphline-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] glyphline_core::Error),

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth {
        /// Expected depth description
        expected: &'static str,
        /// Actual depth in bits
        actual: u32,
    },
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
