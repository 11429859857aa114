//! Breakdown Voltage Module
//!
//! Classifies insulating-oil dielectric strength per transformer voltage
//! class (IEC 60422 limits). A test is six individual breakdown readings; the
//! classification uses their mean rounded to 2 decimals.
//!
//! ## Thresholds (good / fair, kV)
//! - O, A: 60 / 50
//! - B: 50 / 40
//! - C: 40 / 30
//!
//! `average > good` is good, `fair <= average <= good` is fair, below fair
//! is poor.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::types::{BreakdownOutcome, BreakdownResult, BreakdownVoltageReading, TransformerClass};

/// Number of individual readings in one dielectric-strength test.
pub const READINGS_PER_TEST: usize = 6;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BreakdownError {
    #[error("Expected 6 breakdown readings, got {0}")]
    WrongReadingCount(usize),

    #[error("Breakdown reading #{index} is not a finite number ({value})")]
    NonFinite { index: usize, value: f64 },

    #[error("Breakdown reading #{index} is negative ({value} kV)")]
    Negative { index: usize, value: f64 },
}

/// Good/fair limits for one transformer class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClassThresholds {
    /// Averages strictly above this are good (kV)
    pub good_kv: f64,
    /// Averages at or above this (and not good) are fair (kV)
    pub fair_kv: f64,
}

impl ClassThresholds {
    pub fn classify(&self, average_kv: f64) -> BreakdownResult {
        if average_kv > self.good_kv {
            BreakdownResult::Good
        } else if average_kv >= self.fair_kv {
            BreakdownResult::Fair
        } else {
            BreakdownResult::Poor
        }
    }

    /// Range text for each band, e.g. `("> 60 kV", "50-60 kV", "< 50 kV")`.
    pub fn band_labels(&self) -> (String, String, String) {
        (
            format!("> {} kV", self.good_kv),
            format!("{}-{} kV", self.fair_kv, self.good_kv),
            format!("< {} kV", self.fair_kv),
        )
    }
}

/// Thresholds for every transformer class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BreakdownThresholds {
    #[serde(rename = "O")]
    pub o: ClassThresholds,
    #[serde(rename = "A")]
    pub a: ClassThresholds,
    #[serde(rename = "B")]
    pub b: ClassThresholds,
    #[serde(rename = "C")]
    pub c: ClassThresholds,
}

impl Default for BreakdownThresholds {
    fn default() -> Self {
        Self {
            o: ClassThresholds { good_kv: 60.0, fair_kv: 50.0 },
            a: ClassThresholds { good_kv: 60.0, fair_kv: 50.0 },
            b: ClassThresholds { good_kv: 50.0, fair_kv: 40.0 },
            c: ClassThresholds { good_kv: 40.0, fair_kv: 30.0 },
        }
    }
}

impl BreakdownThresholds {
    pub fn for_class(&self, class: TransformerClass) -> &ClassThresholds {
        match class {
            TransformerClass::O => &self.o,
            TransformerClass::A => &self.a,
            TransformerClass::B => &self.b,
            TransformerClass::C => &self.c,
        }
    }
}

/// Classify an average with the default thresholds.
pub fn classify(average_kv: f64, class: TransformerClass) -> BreakdownResult {
    BreakdownThresholds::default().for_class(class).classify(average_kv)
}

/// Classify by class label as entered; an unrecognized label is poor.
pub fn classify_label(
    average_kv: f64,
    class_label: &str,
    thresholds: &BreakdownThresholds,
) -> BreakdownResult {
    match class_label.parse::<TransformerClass>() {
        Ok(class) => thresholds.for_class(class).classify(average_kv),
        Err(e) => {
            warn!(class = class_label, error = %e, "Unknown transformer class, rating oil as poor");
            BreakdownResult::Poor
        }
    }
}

/// Recommendation text for a breakdown result.
pub fn recommendation(result: BreakdownResult) -> &'static str {
    match result {
        BreakdownResult::Good => {
            "GOOD: Resample every 6-12 months to monitor dielectric strength, and purify or filter the oil to improve its insulating quality."
        }
        BreakdownResult::Fair => {
            "FAIR: Resample every 3-6 months to monitor dielectric strength, and purify or filter the oil to improve its insulating quality."
        }
        BreakdownResult::Poor => {
            "POOR: Filter the oil to restore its dielectric strength, and take a DGA sample to identify the active gases dissolved in the transformer."
        }
    }
}

/// Classification plus recommendation text.
pub fn evaluate(
    average_kv: f64,
    class: TransformerClass,
    thresholds: &BreakdownThresholds,
) -> BreakdownOutcome {
    let result = thresholds.for_class(class).classify(average_kv);
    BreakdownOutcome {
        result,
        recommendation: recommendation(result).to_string(),
    }
}

/// Mean of exactly six readings, rounded half-up to 2 decimals.
///
/// Rounding is on the binary mean, so a decimal tie such as 1.005 may round down.
pub fn average_kv(readings: &[f64]) -> Result<f64, BreakdownError> {
    if readings.len() != READINGS_PER_TEST {
        return Err(BreakdownError::WrongReadingCount(readings.len()));
    }
    if let Some((index, &value)) = readings.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(BreakdownError::NonFinite {
            index: index + 1,
            value,
        });
    }
    if let Some((index, &value)) = readings.iter().enumerate().find(|(_, v)| **v < 0.0) {
        return Err(BreakdownError::Negative {
            index: index + 1,
            value,
        });
    }

    let mean = readings.iter().sum::<f64>() / READINGS_PER_TEST as f64;
    Ok((mean * 100.0).round() / 100.0)
}

/// Run a complete dielectric-strength test.
pub fn analyze_breakdown(
    id_trafo: &str,
    class: TransformerClass,
    readings: &[f64],
    thresholds: &BreakdownThresholds,
) -> Result<BreakdownVoltageReading, BreakdownError> {
    let average = average_kv(readings)?;
    let outcome = evaluate(average, class, thresholds);

    info!(
        id_trafo,
        class = %class,
        average_kv = average,
        result = %outcome.result,
        "Breakdown voltage classified"
    );

    Ok(BreakdownVoltageReading {
        id_trafo: id_trafo.to_string(),
        transformer_type: class,
        dielectric_strengths: readings.to_vec(),
        average,
        result: outcome.result,
        recommendation: outcome.recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_b_boundaries() {
        assert_eq!(classify(50.0, TransformerClass::B), BreakdownResult::Fair);
        assert_eq!(classify(50.01, TransformerClass::B), BreakdownResult::Good);
        assert_eq!(classify(40.0, TransformerClass::B), BreakdownResult::Fair);
        assert_eq!(classify(39.99, TransformerClass::B), BreakdownResult::Poor);
    }

    #[test]
    fn test_class_thresholds_differ() {
        assert_eq!(classify(55.0, TransformerClass::O), BreakdownResult::Fair);
        assert_eq!(classify(55.0, TransformerClass::A), BreakdownResult::Fair);
        assert_eq!(classify(55.0, TransformerClass::B), BreakdownResult::Good);
        assert_eq!(classify(29.0, TransformerClass::C), BreakdownResult::Poor);
        assert_eq!(classify(41.0, TransformerClass::C), BreakdownResult::Good);
    }

    #[test]
    fn test_unknown_label_is_poor() {
        let t = BreakdownThresholds::default();
        assert_eq!(classify_label(90.0, "X", &t), BreakdownResult::Poor);
        assert_eq!(classify_label(90.0, "a", &t), BreakdownResult::Good);
    }

    #[test]
    fn test_average_rounding() {
        let avg = average_kv(&[50.0, 50.0, 50.0, 50.0, 50.0, 50.05]).unwrap();
        assert_eq!(avg, 50.01);
        let avg = average_kv(&[52.0, 48.0, 51.0, 49.0, 50.0, 50.0]).unwrap();
        assert_eq!(avg, 50.0);
        // Binary means land on either side of the decimal tie
        assert_eq!(average_kv(&[1.005; 6]).unwrap(), 1.0);
        assert_eq!(average_kv(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.03]).unwrap(), 1.01);
    }

    #[test]
    fn test_average_requires_six_finite() {
        assert_eq!(
            average_kv(&[50.0; 5]),
            Err(BreakdownError::WrongReadingCount(5))
        );
        let err = average_kv(&[50.0, 50.0, f64::NAN, 50.0, 50.0, 50.0]).unwrap_err();
        assert!(matches!(err, BreakdownError::NonFinite { index: 3, .. }));
    }

    #[test]
    fn test_average_rejects_negative_readings() {
        assert_eq!(
            average_kv(&[-5.0; 6]),
            Err(BreakdownError::Negative { index: 1, value: -5.0 })
        );
        let err = average_kv(&[52.0, 48.0, 51.0, 49.0, -0.5, 50.0]).unwrap_err();
        assert!(matches!(err, BreakdownError::Negative { index: 5, .. }));
        // Zero is a valid (failed) reading
        assert_eq!(average_kv(&[0.0; 6]), Ok(0.0));
    }

    #[test]
    fn test_analyze_breakdown() {
        let reading = analyze_breakdown(
            "TR-07",
            TransformerClass::B,
            &[52.0, 48.0, 51.0, 49.0, 50.0, 50.0],
            &BreakdownThresholds::default(),
        )
        .unwrap();
        assert_eq!(reading.average, 50.0);
        assert_eq!(reading.result, BreakdownResult::Fair);
        assert!(reading.recommendation.starts_with("FAIR"));
        assert_eq!(reading.dielectric_strengths.len(), 6);
    }

    #[test]
    fn test_band_labels() {
        let (good, fair, poor) = BreakdownThresholds::default().o.band_labels();
        assert_eq!(good, "> 60 kV");
        assert_eq!(fair, "50-60 kV");
        assert_eq!(poor, "< 50 kV");
    }
}
