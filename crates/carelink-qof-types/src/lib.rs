//! Clinical value types for the QOF gap-analysis engine
//!
//! This crate defines the data the engine evaluates: the normalized
//! patient snapshot, the per-encounter observation stream, the runtime
//! observation value type, and the vocabulary matcher used for free-text
//! condition/medication matching.
//!
//! Everything here is an immutable input to evaluation. The engine never
//! mutates a snapshot or an observation; absence of a field always means
//! "unknown", never zero or false.

pub mod observation;
pub mod priority;
pub mod snapshot;
pub mod value;
pub mod vocabulary;

pub use observation::{MetricType, Observation};
pub use priority::{Category, DueWithin, Priority};
pub use snapshot::{Frailty, PatientId, PatientSnapshot, SnapshotField};
pub use value::ObservationValue;
pub use vocabulary::{SubstringMatcher, TermList, VocabularyMatcher};
