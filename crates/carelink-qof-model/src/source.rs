//! Source traits for snapshot and observation retrieval

use async_trait::async_trait;
use carelink_qof_diagnostics::{ErrorCode, QofError, QOF0200, QOF0201};
use carelink_qof_types::{Observation, PatientId, PatientSnapshot};
use thiserror::Error;

/// Data source errors
#[derive(Debug, Error)]
pub enum SourceError {
    /// No record exists for the patient
    #[error("patient not found: {patient_id}")]
    NotFound { patient_id: PatientId },

    /// The backing store could not be reached
    #[error("data store unavailable: {0}")]
    Unavailable(String),

    /// Internal source error
    #[error("internal source error: {0}")]
    Internal(String),
}

impl SourceError {
    /// Create a not-found error
    pub fn not_found(patient_id: impl Into<PatientId>) -> Self {
        Self::NotFound {
            patient_id: patient_id.into(),
        }
    }

    /// Structured error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => QOF0200,
            Self::Unavailable(_) | Self::Internal(_) => QOF0201,
        }
    }
}

impl From<SourceError> for QofError {
    fn from(error: SourceError) -> Self {
        QofError::source(error.code(), error.to_string())
    }
}

/// Provides normalized patient snapshots
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch one patient's snapshot
    async fn snapshot(&self, patient_id: &PatientId) -> Result<PatientSnapshot, SourceError>;

    /// Fetch every patient's snapshot
    async fn all_snapshots(&self) -> Result<Vec<PatientSnapshot>, SourceError>;
}

/// Provides per-patient observation streams
#[async_trait]
pub trait ObservationSource: Send + Sync {
    /// Fetch the full observation stream for one patient
    ///
    /// An unknown patient yields an empty stream, not an error; absence
    /// of observations is a normal clinical state.
    async fn observations(&self, patient_id: &PatientId)
        -> Result<Vec<Observation>, SourceError>;
}
