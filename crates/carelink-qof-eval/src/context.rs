//! Evaluation context shared across one sweep

use carelink_qof_types::{SubstringMatcher, VocabularyMatcher};
use chrono::NaiveDate;
use std::sync::Arc;

/// Context for one evaluation run
///
/// Carries the evaluation date (ages and review recency are computed
/// against it, never against the wall clock mid-evaluation) and the
/// vocabulary matching strategy. Cheap to clone; the matcher is shared.
#[derive(Clone)]
pub struct EvaluationContext {
    as_of: NaiveDate,
    matcher: Arc<dyn VocabularyMatcher>,
}

impl EvaluationContext {
    /// Create a context with the default substring matcher
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            matcher: Arc::new(SubstringMatcher::new()),
        }
    }

    /// Replace the vocabulary matching strategy
    pub fn with_matcher(mut self, matcher: Arc<dyn VocabularyMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// The date this run evaluates against
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// The vocabulary matcher in use
    pub fn matcher(&self) -> &dyn VocabularyMatcher {
        self.matcher.as_ref()
    }
}

impl std::fmt::Debug for EvaluationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluationContext")
            .field("as_of", &self.as_of)
            .finish_non_exhaustive()
    }
}
