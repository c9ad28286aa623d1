//! Evaluation errors for the rule engine

use carelink_qof_diagnostics::{Diagnostic, ErrorCode, QofError, QOF0100, QOF0101};
use thiserror::Error;

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors that can occur during rule evaluation
///
/// These are isolated per (indicator, patient) combination by the
/// aggregator; one bad combination never fails a whole sweep.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    /// An indicator's threshold type does not match the value it
    /// resolved (e.g. a categorical check against a numeric field)
    #[error("indicator '{indicator_id}': threshold cannot be compared against {found}")]
    ThresholdTypeMismatch {
        indicator_id: String,
        found: String,
    },

    /// A coverage report referenced an indicator the catalog lacks
    #[error("unknown indicator id '{id}'")]
    UnknownIndicator { id: String },
}

impl EvalError {
    /// Create a threshold type mismatch error
    pub fn threshold_type_mismatch(
        indicator_id: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::ThresholdTypeMismatch {
            indicator_id: indicator_id.into(),
            found: found.into(),
        }
    }

    /// Create an unknown indicator error
    pub fn unknown_indicator(id: impl Into<String>) -> Self {
        Self::UnknownIndicator { id: id.into() }
    }

    /// Structured error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ThresholdTypeMismatch { .. } => QOF0100,
            Self::UnknownIndicator { .. } => QOF0101,
        }
    }

    /// Convert to a diagnostic record for partial-failure reporting
    pub fn to_diagnostic(&self, patient_id: Option<&str>) -> Diagnostic {
        let mut diag = Diagnostic::warning(self.code(), self.to_string());
        match self {
            Self::ThresholdTypeMismatch { indicator_id, .. } => {
                diag = diag.with_indicator(indicator_id.clone());
            }
            Self::UnknownIndicator { id } => {
                diag = diag.with_indicator(id.clone());
            }
        }
        if let Some(patient) = patient_id {
            diag = diag.with_patient(patient);
        }
        diag
    }
}

impl From<EvalError> for QofError {
    fn from(error: EvalError) -> Self {
        let code = error.code();
        let message = error.to_string();
        let indicator_id = match error {
            EvalError::ThresholdTypeMismatch { indicator_id, .. } => indicator_id,
            EvalError::UnknownIndicator { id } => id,
        };
        QofError::Evaluation {
            code,
            message,
            indicator_id: Some(indicator_id),
            patient_id: None,
        }
    }
}
