//! Population coverage and attainment reporting
//!
//! Coverage is computed from externally supplied per-indicator counts;
//! the engine never re-derives eligibility here. `calculate_coverage`
//! is a pure function invoked once per indicator per reporting cycle.

use crate::error::{EvalError, EvalResult};
use carelink_qof_catalog::{Indicator, IndicatorCatalog};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attainment band relative to the indicator's target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageStatus {
    Good,
    Warning,
    Poor,
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Warning => write!(f, "warning"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

/// Coverage result for one indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub indicator_id: String,
    pub code: String,
    /// Rounded attainment percentage, 0 when nobody is eligible
    pub percent: u8,
    pub target_percent: u8,
    pub status: CoverageStatus,
    /// Attainment capped at the target; overperformance earns no extra
    pub points_earned: u8,
    /// Shortfall against the target, never negative
    pub gap: u8,
}

/// Per-indicator population counts supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorCounts {
    pub indicator_id: String,
    pub recorded: u32,
    pub eligible: u32,
}

/// Compute coverage for one indicator from population counts
pub fn calculate_coverage(indicator: &Indicator, recorded: u32, eligible: u32) -> Coverage {
    let percent = if eligible == 0 {
        0
    } else {
        let pct = (recorded as f64) * 100.0 / (eligible as f64);
        pct.round().min(u8::MAX as f64) as u8
    };

    let target = indicator.target_percent;
    let status = if percent >= target {
        CoverageStatus::Good
    } else if (percent as f64) >= 0.8 * (target as f64) {
        CoverageStatus::Warning
    } else {
        CoverageStatus::Poor
    };

    Coverage {
        indicator_id: indicator.id.clone(),
        code: indicator.code.clone(),
        percent,
        target_percent: target,
        status,
        points_earned: percent.min(target),
        gap: target.saturating_sub(percent),
    }
}

/// Coverage across a whole catalog for one reporting cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub catalog_version: String,
    /// One entry per catalog indicator, in catalog order
    pub entries: Vec<Coverage>,
    /// Sum of QOF points across the catalog
    pub total_points_available: u32,
    /// QOF points earned, scaled by attainment against each target
    pub total_points_earned: u32,
}

impl CoverageReport {
    /// Build a report from per-indicator counts
    ///
    /// Indicators without supplied counts report as 0% of zero eligible
    /// patients. A count row naming an indicator the catalog lacks
    /// rejects the whole report.
    pub fn build(
        catalog: &IndicatorCatalog,
        counts: &[IndicatorCounts],
    ) -> EvalResult<Self> {
        for row in counts {
            if catalog.get(&row.indicator_id).is_none() {
                return Err(EvalError::unknown_indicator(row.indicator_id.clone()));
            }
        }

        let mut entries = Vec::with_capacity(catalog.len());
        let mut total_points_available = 0u32;
        let mut total_points_earned = 0u32;

        for indicator in catalog.iter() {
            let row = counts.iter().find(|c| c.indicator_id == indicator.id);
            let (recorded, eligible) = row.map_or((0, 0), |c| (c.recorded, c.eligible));
            let coverage = calculate_coverage(indicator, recorded, eligible);

            total_points_available += u32::from(indicator.points);
            if indicator.target_percent > 0 {
                let fraction =
                    f64::from(coverage.points_earned) / f64::from(indicator.target_percent);
                total_points_earned +=
                    (f64::from(indicator.points) * fraction).round() as u32;
            }
            entries.push(coverage);
        }

        Ok(Self {
            catalog_version: catalog.version().to_string(),
            entries,
            total_points_available,
            total_points_earned,
        })
    }
}
