//! In-memory store and no-op source

use crate::source::{ObservationSource, SnapshotSource, SourceError};
use async_trait::async_trait;
use carelink_qof_types::{Observation, PatientId, PatientSnapshot};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
struct StoreInner {
    snapshots: IndexMap<PatientId, PatientSnapshot>,
    observations: HashMap<PatientId, Vec<Observation>>,
}

/// Thread-safe in-memory data store
///
/// Stands in for the practice data store in the CLI and in tests.
/// Snapshot upserts replace the whole record (the snapshot is a
/// refreshed view, not a delta); observations are append-only.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a patient snapshot
    pub fn upsert_snapshot(&self, snapshot: PatientSnapshot) {
        let mut inner = self.inner.write();
        inner.snapshots.insert(snapshot.id.clone(), snapshot);
    }

    /// Append an observation to the patient's stream
    pub fn record_observation(&self, observation: Observation) {
        let mut inner = self.inner.write();
        inner
            .observations
            .entry(observation.patient_id.clone())
            .or_default()
            .push(observation);
    }

    /// Number of patients with a snapshot
    pub fn patient_count(&self) -> usize {
        self.inner.read().snapshots.len()
    }
}

#[async_trait]
impl SnapshotSource for InMemoryStore {
    async fn snapshot(&self, patient_id: &PatientId) -> Result<PatientSnapshot, SourceError> {
        self.inner
            .read()
            .snapshots
            .get(patient_id)
            .cloned()
            .ok_or_else(|| SourceError::not_found(patient_id.clone()))
    }

    async fn all_snapshots(&self) -> Result<Vec<PatientSnapshot>, SourceError> {
        Ok(self.inner.read().snapshots.values().cloned().collect())
    }
}

#[async_trait]
impl ObservationSource for InMemoryStore {
    async fn observations(
        &self,
        patient_id: &PatientId,
    ) -> Result<Vec<Observation>, SourceError> {
        Ok(self
            .inner
            .read()
            .observations
            .get(patient_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Source that knows no patients, for wiring tests
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSource;

impl NoOpSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SnapshotSource for NoOpSource {
    async fn snapshot(&self, patient_id: &PatientId) -> Result<PatientSnapshot, SourceError> {
        Err(SourceError::not_found(patient_id.clone()))
    }

    async fn all_snapshots(&self) -> Result<Vec<PatientSnapshot>, SourceError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl ObservationSource for NoOpSource {
    async fn observations(
        &self,
        _patient_id: &PatientId,
    ) -> Result<Vec<Observation>, SourceError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_replaces_snapshot() {
        let store = InMemoryStore::new();
        let mut snapshot = PatientSnapshot::new("p-1");
        snapshot.conditions = vec!["Asthma".to_string()];
        store.upsert_snapshot(snapshot);

        let mut refreshed = PatientSnapshot::new("p-1");
        refreshed.conditions = vec!["Asthma".to_string(), "Hypertension".to_string()];
        store.upsert_snapshot(refreshed);

        assert_eq!(store.patient_count(), 1);
        let fetched = store.snapshot(&"p-1".into()).await.unwrap();
        assert_eq!(fetched.conditions.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_patient_is_not_found() {
        let store = InMemoryStore::new();
        let result = store.snapshot(&"ghost".into()).await;
        assert!(matches!(result, Err(SourceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_observations_append_in_order() {
        let store = InMemoryStore::new();
        let first = Observation::new("p-1", "2025-01-01T08:00:00Z".parse().unwrap());
        let second = Observation::new("p-1", "2025-02-01T08:00:00Z".parse().unwrap());
        store.record_observation(first.clone());
        store.record_observation(second.clone());

        let stream = store.observations(&"p-1".into()).await.unwrap();
        assert_eq!(stream, vec![first, second]);
    }

    #[tokio::test]
    async fn test_unknown_patient_has_empty_stream() {
        let store = InMemoryStore::new();
        let stream = store.observations(&"ghost".into()).await.unwrap();
        assert!(stream.is_empty());
    }

    #[test]
    fn test_source_error_converts_to_engine_error() {
        let err = SourceError::Unavailable("store offline".to_string());
        let engine: carelink_qof_diagnostics::QofError = err.into();
        assert!(engine.code().is_source_error());
    }
}
