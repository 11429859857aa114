//! Carbon-monoxide screening
//!
//! CO level sets the resampling interval for `Data 1` samples:
//! - below `medium_ppm` - LOW, resample every 4-8 months
//! - `medium_ppm ..= high_ppm` - MEDIUM, every 2-4 months
//! - above `high_ppm` - HIGH, every 1-2 months

use serde::{Deserialize, Serialize};

use crate::types::{CoAnalysisResult, CoSeverity};

/// CO band limits in ppm.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoLimits {
    /// Lowest level in the MEDIUM band
    pub medium_ppm: f64,
    /// Highest level in the MEDIUM band
    pub high_ppm: f64,
}

impl Default for CoLimits {
    fn default() -> Self {
        Self {
            medium_ppm: 500.0,
            high_ppm: 600.0,
        }
    }
}

/// Screen a CO level with the default limits.
pub fn analyze_co_level(co_ppm: f64) -> CoAnalysisResult {
    analyze_co_level_with(co_ppm, &CoLimits::default())
}

/// Screen a CO level against explicit limits.
pub fn analyze_co_level_with(co_ppm: f64, limits: &CoLimits) -> CoAnalysisResult {
    let (severity, interval) = if co_ppm < limits.medium_ppm {
        (CoSeverity::Low, "4-8 months")
    } else if co_ppm <= limits.high_ppm {
        (CoSeverity::Medium, "2-4 months")
    } else {
        (CoSeverity::High, "1-2 months")
    };

    let band = match severity {
        CoSeverity::Low => "Low",
        CoSeverity::Medium => "Medium",
        CoSeverity::High => "High",
    };

    CoAnalysisResult {
        co_level: co_ppm,
        severity,
        description: format!("CO (Carbon Monoxide) {severity}"),
        resampling_interval: interval.to_string(),
        recommendations: vec![
            "Continue operation".to_string(),
            format!("CO within the {band} limit: resample periodically every {interval}"),
        ],
    }
}
