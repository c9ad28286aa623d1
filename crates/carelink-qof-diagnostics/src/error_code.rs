//! QOF engine error codes following a structured numbering system
//!
//! Error code ranges:
//! - QOF0001-QOF0099: Catalog errors (loading, validation)
//! - QOF0100-QOF0199: Evaluation errors (runtime)
//! - QOF0200-QOF0299: Data source errors
//! - QOF0300-QOF0399: System errors (I/O, configuration)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a catalog error (0001-0099)
    pub const fn is_catalog_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is an evaluation error (0100-0199)
    pub const fn is_evaluation_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a data source error (0200-0299)
    pub const fn is_source_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a system error (0300-0399)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QOF{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

// Static error info storage
static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

use std::collections::HashMap;
use std::sync::LazyLock;

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Catalog errors (0001-0099)
    map.insert(
        1,
        ErrorInfo::new("Duplicate indicator id")
            .with_help("Every indicator id must be unique within a catalog version"),
    );
    map.insert(
        2,
        ErrorInfo::new("Invalid target percentage")
            .with_help("Population targets must lie in the range 0-100"),
    );
    map.insert(
        3,
        ErrorInfo::new("Empty vocabulary term list")
            .with_help("Condition and medication predicates need at least one term"),
    );
    map.insert(4, ErrorInfo::new("Malformed catalog document"));
    map.insert(5, ErrorInfo::new("Empty catalog"));

    // Evaluation errors (0100-0199)
    map.insert(
        100,
        ErrorInfo::new("Threshold type mismatch").with_help(
            "The indicator's threshold cannot be compared against the resolved value type",
        ),
    );
    map.insert(101, ErrorInfo::new("Unknown indicator id"));

    // Data source errors (0200-0299)
    map.insert(200, ErrorInfo::new("Patient not found"));
    map.insert(201, ErrorInfo::new("Data store unavailable"));

    // System errors (0300-0399)
    map.insert(300, ErrorInfo::new("I/O error"));

    map
});

// Catalog errors
pub const QOF0001: ErrorCode = ErrorCode::new(1);
pub const QOF0002: ErrorCode = ErrorCode::new(2);
pub const QOF0003: ErrorCode = ErrorCode::new(3);
pub const QOF0004: ErrorCode = ErrorCode::new(4);
pub const QOF0005: ErrorCode = ErrorCode::new(5);

// Evaluation errors
pub const QOF0100: ErrorCode = ErrorCode::new(100);
pub const QOF0101: ErrorCode = ErrorCode::new(101);

// Data source errors
pub const QOF0200: ErrorCode = ErrorCode::new(200);
pub const QOF0201: ErrorCode = ErrorCode::new(201);

// System errors
pub const QOF0300: ErrorCode = ErrorCode::new(300);
