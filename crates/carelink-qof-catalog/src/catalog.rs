//! Catalog container, validation and JSON loading

use crate::indicator::Indicator;
use carelink_qof_diagnostics::{
    ErrorCode, QofError, QOF0001, QOF0002, QOF0003, QOF0004, QOF0005, QOF0300,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a catalog
///
/// Any of these rejects the whole catalog; no partial catalog is ever
/// used.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two indicators share an id
    #[error("duplicate indicator id '{id}'")]
    DuplicateId { id: String },

    /// Target percentage outside 0-100
    #[error("indicator '{id}': target percent {value} out of range 0-100")]
    InvalidTargetPercent { id: String, value: u8 },

    /// A predicate or check carries an empty term/rule list
    #[error("indicator '{id}': empty vocabulary term or rule list")]
    EmptyTermList { id: String },

    /// Indicator id or code is blank
    #[error("indicator with blank id or code")]
    BlankIdentifier,

    /// Catalog contains no indicators
    #[error("catalog '{version}' contains no indicators")]
    Empty { version: String },

    /// The document could not be parsed
    #[error("malformed catalog document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The catalog file could not be read
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Structured error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateId { .. } => QOF0001,
            Self::InvalidTargetPercent { .. } => QOF0002,
            Self::EmptyTermList { .. } | Self::BlankIdentifier => QOF0003,
            Self::Malformed(_) => QOF0004,
            Self::Empty { .. } => QOF0005,
            Self::Io(_) => QOF0300,
        }
    }
}

impl From<CatalogError> for QofError {
    fn from(error: CatalogError) -> Self {
        let code = error.code();
        let message = error.to_string();
        match error {
            CatalogError::Io(_) => QofError::system(code, message),
            CatalogError::DuplicateId { id }
            | CatalogError::InvalidTargetPercent { id, .. }
            | CatalogError::EmptyTermList { id } => QofError::Catalog {
                code,
                message,
                indicator_id: Some(id),
            },
            _ => QofError::catalog(code, message),
        }
    }
}

/// Serialized shape of a catalog document
#[derive(Debug, Serialize, Deserialize)]
struct CatalogDocument {
    version: String,
    indicators: Vec<Indicator>,
}

/// A versioned, immutable indicator catalog
///
/// Indicators are keyed by id with deterministic iteration order (the
/// order they were declared or loaded in). The catalog is an explicit
/// value handed to the aggregator at construction, never a hidden
/// global; hot-reload callers build a fresh catalog and swap it in.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorCatalog {
    version: String,
    indicators: IndexMap<String, Indicator>,
}

impl IndicatorCatalog {
    /// Build a catalog from a list of indicators, validating wholesale
    pub fn new(
        version: impl Into<String>,
        indicators: Vec<Indicator>,
    ) -> Result<Self, CatalogError> {
        let version = version.into();
        if indicators.is_empty() {
            return Err(CatalogError::Empty { version });
        }

        let mut map = IndexMap::with_capacity(indicators.len());
        for indicator in indicators {
            validate_indicator(&indicator)?;
            let id = indicator.id.clone();
            if map.insert(id.clone(), indicator).is_some() {
                return Err(CatalogError::DuplicateId { id });
            }
        }

        log::debug!(
            "loaded indicator catalog version {} with {} indicators",
            version,
            map.len()
        );
        Ok(Self {
            version,
            indicators: map,
        })
    }

    /// Parse and validate a catalog from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::new(document.version, document.indicators)
    }

    /// Load and validate a catalog from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize the catalog back to a JSON document
    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        let document = CatalogDocument {
            version: self.version.clone(),
            indicators: self.indicators.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Catalog version string
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Look up an indicator by id
    pub fn get(&self, id: &str) -> Option<&Indicator> {
        self.indicators.get(id)
    }

    /// Iterate indicators in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Indicator> {
        self.indicators.values()
    }

    /// Number of indicators
    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    /// Whether the catalog is empty (never true for a validated catalog)
    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }
}

fn validate_indicator(indicator: &Indicator) -> Result<(), CatalogError> {
    if indicator.id.trim().is_empty() || indicator.code.trim().is_empty() {
        return Err(CatalogError::BlankIdentifier);
    }
    if indicator.target_percent > 100 {
        return Err(CatalogError::InvalidTargetPercent {
            id: indicator.id.clone(),
            value: indicator.target_percent,
        });
    }
    if indicator.applicability.has_empty_list() || indicator.check.has_empty_list() {
        return Err(CatalogError::EmptyTermList {
            id: indicator.id.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::{Applicability, Check, DuePolicy};
    use carelink_qof_types::{vocabulary::terms, Category, Priority, SnapshotField};
    use pretty_assertions::assert_eq;

    fn sample_indicator(id: &str) -> Indicator {
        Indicator {
            id: id.to_string(),
            code: id.to_uppercase(),
            name: format!("Sample indicator {id}"),
            category: Category::Cardiovascular,
            applicability: Applicability::HasCondition {
                terms: terms(["hypertension"]),
            },
            target_percent: 80,
            points: 10,
            check: Check::FieldRecorded {
                field: SnapshotField::LastReview,
            },
            missing_data_priority: Priority::High,
            due: DuePolicy::default(),
        }
    }

    #[test]
    fn test_duplicate_id_rejects_whole_catalog() {
        let result = IndicatorCatalog::new(
            "test",
            vec![sample_indicator("a"), sample_indicator("a")],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateId { .. })));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = IndicatorCatalog::new("test", vec![]);
        assert!(matches!(result, Err(CatalogError::Empty { .. })));
    }

    #[test]
    fn test_target_out_of_range_rejected() {
        let mut indicator = sample_indicator("a");
        indicator.target_percent = 101;
        let result = IndicatorCatalog::new("test", vec![indicator]);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidTargetPercent { value: 101, .. })
        ));
    }

    #[test]
    fn test_empty_term_list_rejected() {
        let mut indicator = sample_indicator("a");
        indicator.applicability = Applicability::HasCondition {
            terms: carelink_qof_types::TermList::new(),
        };
        let result = IndicatorCatalog::new("test", vec![indicator]);
        assert!(matches!(result, Err(CatalogError::EmptyTermList { .. })));
    }

    #[test]
    fn test_lookup_and_iteration_order() {
        let catalog = IndicatorCatalog::new(
            "test",
            vec![sample_indicator("b"), sample_indicator("a")],
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("a").is_some());
        assert!(catalog.get("missing").is_none());

        let ids: Vec<&str> = catalog.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_json_round_trip() {
        let catalog =
            IndicatorCatalog::new("test-1", vec![sample_indicator("a")]).unwrap();
        let json = catalog.to_json_string().unwrap();
        let reloaded = IndicatorCatalog::from_json_str(&json).unwrap();
        assert_eq!(catalog, reloaded);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = IndicatorCatalog::from_json_str("{\"version\": \"x\"");
        assert!(matches!(result, Err(CatalogError::Malformed(_))));
        assert_eq!(result.unwrap_err().code(), QOF0004);
    }

    #[test]
    fn test_errors_convert_to_engine_error() {
        let err = IndicatorCatalog::new(
            "test",
            vec![sample_indicator("a"), sample_indicator("a")],
        )
        .unwrap_err();
        let engine: QofError = err.into();
        assert!(engine.code().is_catalog_error());
        assert!(matches!(
            engine,
            QofError::Catalog {
                indicator_id: Some(ref id),
                ..
            } if id == "a"
        ));
    }
}
