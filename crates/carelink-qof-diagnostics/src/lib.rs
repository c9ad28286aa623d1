//! QOF engine diagnostics and error handling
//!
//! This crate provides the error handling infrastructure shared across the
//! gap-analysis engine: structured error codes, diagnostic records for
//! partial-failure reporting, and the top-level error type.

mod error;
mod error_code;

pub use error::*;
pub use error_code::*;

/// Result type for QOF engine operations
pub type Result<T> = std::result::Result<T, QofError>;
