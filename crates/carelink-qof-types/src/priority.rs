//! Priority, category and action-window enumerations
//!
//! `Priority` carries an explicit ordinal so the aggregator's sort
//! comparator is a named total order rather than inline index
//! arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Clinical action priority, most urgent first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Explicit ordinal for the total order `critical < high < medium < low`
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// All priorities in urgency order
    pub const ALL: [Priority; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Clinical domain of an indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cardiovascular,
    Diabetes,
    Respiratory,
    MentalHealth,
    HeartFailure,
    PreventiveCare,
    Lifestyle,
    Safety,
}

impl Category {
    /// All categories, used for per-category summary counts
    pub const ALL: [Category; 8] = [
        Self::Cardiovascular,
        Self::Diabetes,
        Self::Respiratory,
        Self::MentalHealth,
        Self::HeartFailure,
        Self::PreventiveCare,
        Self::Lifestyle,
        Self::Safety,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cardiovascular => write!(f, "cardiovascular"),
            Self::Diabetes => write!(f, "diabetes"),
            Self::Respiratory => write!(f, "respiratory"),
            Self::MentalHealth => write!(f, "mental health"),
            Self::HeartFailure => write!(f, "heart failure"),
            Self::PreventiveCare => write!(f, "preventive care"),
            Self::Lifestyle => write!(f, "lifestyle"),
            Self::Safety => write!(f, "safety"),
        }
    }
}

/// Recommended action window for a clinical action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DueWithin {
    #[serde(rename = "24 hours")]
    TwentyFourHours,
    #[serde(rename = "3 days")]
    ThreeDays,
    #[serde(rename = "7 days")]
    SevenDays,
    #[serde(rename = "14 days")]
    FourteenDays,
    #[serde(rename = "1 month")]
    OneMonth,
    #[serde(rename = "3 months")]
    ThreeMonths,
}

impl fmt::Display for DueWithin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwentyFourHours => write!(f, "24 hours"),
            Self::ThreeDays => write!(f, "3 days"),
            Self::SevenDays => write!(f, "7 days"),
            Self::FourteenDays => write!(f, "14 days"),
            Self::OneMonth => write!(f, "1 month"),
            Self::ThreeMonths => write!(f, "3 months"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_total_order() {
        assert!(Priority::Critical < Priority::High);
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
        assert_eq!(Priority::Critical.ordinal(), 0);
        assert_eq!(Priority::Low.ordinal(), 3);
    }

    #[test]
    fn test_priority_serde() {
        assert_eq!(
            serde_json::to_string(&Priority::Critical).unwrap(),
            "\"critical\""
        );
        let p: Priority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(p, Priority::High);
    }

    #[test]
    fn test_due_within_display() {
        assert_eq!(DueWithin::TwentyFourHours.to_string(), "24 hours");
        assert_eq!(DueWithin::FourteenDays.to_string(), "14 days");
        assert_eq!(
            serde_json::to_string(&DueWithin::ThreeDays).unwrap(),
            "\"3 days\""
        );
    }
}
