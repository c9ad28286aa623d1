//! Runtime representation of resolved observation values
//!
//! A resolved value is either a numeric measurement, a categorical text
//! value, or a boolean flag. Threshold comparison in the evaluator is
//! typed: comparing a categorical value numerically is an error, never a
//! silent coercion.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single resolved observation value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ObservationValue {
    /// Numeric measurement (mmHg, kg, mmol/mol, ...)
    Decimal(Decimal),
    /// Categorical value (e.g. smoking status)
    Text(String),
    /// Boolean flag (e.g. carer recorded)
    Flag(bool),
}

impl ObservationValue {
    /// Build a text value
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Check if this value is numeric
    pub fn is_decimal(&self) -> bool {
        matches!(self, Self::Decimal(_))
    }

    /// Check if this value is categorical
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Get the numeric value, if this is one
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Get the categorical value, if this is one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the flag value, if this is one
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Name of the value's type, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Decimal(_) => "Decimal",
            Self::Text(_) => "Text",
            Self::Flag(_) => "Flag",
        }
    }
}

impl fmt::Display for ObservationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<Decimal> for ObservationValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for ObservationValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}
