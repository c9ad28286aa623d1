//! QOF engine error types

use crate::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Error - the operation cannot proceed
    Error,
    /// Warning - potential issue but evaluation can continue
    Warning,
    /// Information - informational message
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message attached to an indicator/patient combination
///
/// Used for partial-failure reporting: a gap-analysis sweep that skips an
/// indicator for one patient still succeeds overall and carries the skip
/// reason back to the caller as a diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Indicator the diagnostic relates to, if any
    pub indicator_id: Option<String>,
    /// Patient the diagnostic relates to, if any
    pub patient_id: Option<String>,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            indicator_id: None,
            patient_id: None,
            help: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            indicator_id: None,
            patient_id: None,
            help: None,
        }
    }

    /// Attach the indicator this diagnostic relates to
    pub fn with_indicator(mut self, indicator_id: impl Into<String>) -> Self {
        self.indicator_id = Some(indicator_id.into());
        self
    }

    /// Attach the patient this diagnostic relates to
    pub fn with_patient(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Render the diagnostic with color for terminal output
    #[cfg(feature = "colored")]
    pub fn render_colored(&self) -> String {
        use colored::Colorize;

        let severity = match self.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".cyan(),
        };
        let mut out = format!("{severity}[{}]: {}", self.code, self.message);
        if let Some(indicator) = &self.indicator_id {
            out.push_str(&format!(" (indicator {indicator}"));
            if let Some(patient) = &self.patient_id {
                out.push_str(&format!(", patient {patient}"));
            }
            out.push(')');
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(indicator) = &self.indicator_id {
            write!(f, " [indicator {indicator}]")?;
        }
        if let Some(patient) = &self.patient_id {
            write!(f, " [patient {patient}]")?;
        }
        Ok(())
    }
}

/// Top-level QOF engine error type
#[derive(Debug, Clone, Error)]
pub enum QofError {
    /// Catalog loading or validation error
    #[error("{code}: {message}")]
    Catalog {
        code: ErrorCode,
        message: String,
        indicator_id: Option<String>,
    },

    /// Evaluation error
    #[error("{code}: {message}")]
    Evaluation {
        code: ErrorCode,
        message: String,
        indicator_id: Option<String>,
        patient_id: Option<String>,
    },

    /// Data source error
    #[error("{code}: {message}")]
    Source { code: ErrorCode, message: String },

    /// System error
    #[error("{code}: {message}")]
    System { code: ErrorCode, message: String },
}

impl QofError {
    /// Create a catalog error
    pub fn catalog(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Catalog {
            code,
            message: message.into(),
            indicator_id: None,
        }
    }

    /// Create an evaluation error
    pub fn evaluation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Evaluation {
            code,
            message: message.into(),
            indicator_id: None,
            patient_id: None,
        }
    }

    /// Create a data source error
    pub fn source(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Source {
            code,
            message: message.into(),
        }
    }

    /// Create a system error
    pub fn system(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::System {
            code,
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Catalog { code, .. }
            | Self::Evaluation { code, .. }
            | Self::Source { code, .. }
            | Self::System { code, .. } => *code,
        }
    }

    /// Convert to a diagnostic record
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Catalog {
                code,
                message,
                indicator_id,
            } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(id) = indicator_id {
                    diag = diag.with_indicator(id.clone());
                }
                diag
            }
            Self::Evaluation {
                code,
                message,
                indicator_id,
                patient_id,
            } => {
                let mut diag = Diagnostic::warning(*code, message.clone());
                if let Some(id) = indicator_id {
                    diag = diag.with_indicator(id.clone());
                }
                if let Some(id) = patient_id {
                    diag = diag.with_patient(id.clone());
                }
                diag
            }
            Self::Source { code, message } | Self::System { code, message } => {
                Diagnostic::error(*code, message.clone())
            }
        }
    }
}
