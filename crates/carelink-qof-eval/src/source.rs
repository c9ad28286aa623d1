//! Bridge from data-store sources to evaluation input
//!
//! All fetching completes before evaluation starts; the engine itself
//! never touches the network or storage.

use crate::aggregate::PatientCase;
use carelink_qof_model::{ObservationSource, SnapshotSource, SourceError};

/// Gather evaluation cases for every patient the snapshot source knows
pub async fn collect_cases(
    snapshots: &dyn SnapshotSource,
    observations: &dyn ObservationSource,
) -> Result<Vec<PatientCase>, SourceError> {
    let mut cases = Vec::new();
    for snapshot in snapshots.all_snapshots().await? {
        let observations = observations.observations(&snapshot.id).await?;
        cases.push(PatientCase {
            snapshot,
            observations,
        });
    }
    Ok(cases)
}
