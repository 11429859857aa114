//! Gas input types: GasConcentration, DataClassification

use serde::{Deserialize, Serialize};

// ============================================================================
// Dissolved Gas Record
// ============================================================================

/// Dissolved-gas measurement record for one oil sample.
///
/// Every field is optional: laboratories rarely report the full panel and
/// callers populate only what they have. Concentrations are in ppm; the
/// ratio and volume fields are dimensionless or percent.
///
/// A zero (or missing, negative, non-finite) value means "not measured",
/// not "gas absent".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GasConcentration {
    /// Hydrogen (ppm)
    pub h2: Option<f64>,
    /// Methane (ppm)
    pub ch4: Option<f64>,
    /// Ethane (ppm)
    pub c2h6: Option<f64>,
    /// Ethylene (ppm)
    pub c2h4: Option<f64>,
    /// Acetylene (ppm)
    pub c2h2: Option<f64>,
    /// Carbon monoxide (ppm)
    pub co: Option<f64>,
    /// Carbon dioxide (ppm)
    pub co2: Option<f64>,
    /// Oxygen (ppm)
    pub o2: Option<f64>,
    /// Nitrogen (ppm)
    pub n2: Option<f64>,
    /// O2/N2 ratio
    pub o2_n2_ratio: Option<f64>,
    /// CO2/CO ratio
    pub co2_co_ratio: Option<f64>,
    /// Total dissolved gas (% by volume)
    pub gas_by_volume: Option<f64>,
    /// Normalized energy level, oil
    pub nel_oil: Option<f64>,
    /// Normalized energy level, paper
    pub nel_paper: Option<f64>,
}

/// Gases that participate in at least one Duval triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gas {
    H2,
    Ch4,
    C2h6,
    C2h4,
    C2h2,
}

impl std::fmt::Display for Gas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gas::H2 => write!(f, "H2"),
            Gas::Ch4 => write!(f, "CH4"),
            Gas::C2h6 => write!(f, "C2H6"),
            Gas::C2h4 => write!(f, "C2H4"),
            Gas::C2h2 => write!(f, "C2H2"),
        }
    }
}

impl GasConcentration {
    /// Concentration of a triangle gas, with "not measured" read as 0.
    pub fn ppm(&self, gas: Gas) -> f64 {
        let raw = match gas {
            Gas::H2 => self.h2,
            Gas::Ch4 => self.ch4,
            Gas::C2h6 => self.c2h6,
            Gas::C2h4 => self.c2h4,
            Gas::C2h2 => self.c2h2,
        };
        measured(raw).unwrap_or(0.0)
    }

    /// Whether a triangle gas carries a usable (positive, finite) reading.
    pub fn has(&self, gas: Gas) -> bool {
        self.ppm(gas) > 0.0
    }

    /// Carbon monoxide reading if measured.
    pub fn co_ppm(&self) -> Option<f64> {
        measured(self.co)
    }
}

fn measured(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

// ============================================================================
// Data Classification
// ============================================================================

/// Laboratory data-set tag attached to each triangle reading.
///
/// `Data 1` readings are screened with the CO analysis in addition to the
/// triangle classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum DataClassification {
    #[default]
    #[serde(rename = "Data 1")]
    Data1,
    #[serde(rename = "Data 2")]
    Data2,
    #[serde(rename = "Data 3")]
    Data3,
    #[serde(rename = "Data 4")]
    Data4,
    #[serde(rename = "Data 5")]
    Data5,
    #[serde(rename = "Data 6")]
    Data6,
    #[serde(rename = "Data 7")]
    Data7,
    #[serde(rename = "Data 8")]
    Data8,
}

impl DataClassification {
    /// Whether this data set is screened by CO level.
    pub fn uses_co_screening(self) -> bool {
        self == DataClassification::Data1
    }
}

impl std::fmt::Display for DataClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = match self {
            DataClassification::Data1 => 1,
            DataClassification::Data2 => 2,
            DataClassification::Data3 => 3,
            DataClassification::Data4 => 4,
            DataClassification::Data5 => 5,
            DataClassification::Data6 => 6,
            DataClassification::Data7 => 7,
            DataClassification::Data8 => 8,
        };
        write!(f, "Data {n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_invalid_read_as_zero() {
        let gas = GasConcentration {
            h2: Some(-4.0),
            ch4: Some(f64::NAN),
            c2h2: Some(12.5),
            ..Default::default()
        };
        assert_eq!(gas.ppm(Gas::H2), 0.0);
        assert_eq!(gas.ppm(Gas::Ch4), 0.0);
        assert_eq!(gas.ppm(Gas::C2h6), 0.0);
        assert_eq!(gas.ppm(Gas::C2h2), 12.5);
        assert!(gas.has(Gas::C2h2));
        assert!(!gas.has(Gas::H2));
    }

    #[test]
    fn test_partial_json_record() {
        let gas: GasConcentration =
            serde_json::from_str(r#"{"ch4": 120.0, "c2h4": 40.0}"#).unwrap();
        assert_eq!(gas.ch4, Some(120.0));
        assert_eq!(gas.c2h2, None);
    }

    #[test]
    fn test_data_classification_labels() {
        let json = serde_json::to_string(&DataClassification::Data3).unwrap();
        assert_eq!(json, "\"Data 3\"");
        assert_eq!(DataClassification::Data8.to_string(), "Data 8");
        assert!(DataClassification::Data1.uses_co_screening());
        assert!(!DataClassification::Data2.uses_co_screening());
    }
}
