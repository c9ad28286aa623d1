//! Data-store abstraction for the QOF engine
//!
//! The engine consumes patient snapshots and observation streams from a
//! data store it does not own. This crate defines the async source
//! traits that boundary speaks, plus an in-memory store used by the CLI
//! and by tests, and a no-op source for wiring tests.

mod source;
mod store;

pub use source::{ObservationSource, SnapshotSource, SourceError};
pub use store::{InMemoryStore, NoOpSource};
