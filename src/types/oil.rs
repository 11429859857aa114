//! Oil quality types: TransformerClass, BreakdownResult, BreakdownVoltageReading,
//! CoSeverity, CoAnalysisResult, ReportHeader

use serde::{Deserialize, Serialize};

// ============================================================================
// Breakdown Voltage
// ============================================================================

/// Transformer voltage class per IEC 60422.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransformerClass {
    /// > 400 kV
    O,
    /// 170 - 400 kV
    A,
    /// 72.5 - 170 kV
    B,
    /// < 72.5 kV
    C,
}

impl TransformerClass {
    pub const ALL: [TransformerClass; 4] = [
        TransformerClass::O,
        TransformerClass::A,
        TransformerClass::B,
        TransformerClass::C,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TransformerClass::O => "Type O (> 400KV)",
            TransformerClass::A => "Type A (170KV - 400KV)",
            TransformerClass::B => "Type B (72,5KV)",
            TransformerClass::C => "Type C (< 72,5KV)",
        }
    }

    pub fn voltage_range(self) -> &'static str {
        match self {
            TransformerClass::O => "> 400KV",
            TransformerClass::A => "170KV - 400KV",
            TransformerClass::B => "72,5KV",
            TransformerClass::C => "< 72,5KV",
        }
    }
}

impl std::fmt::Display for TransformerClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformerClass::O => write!(f, "O"),
            TransformerClass::A => write!(f, "A"),
            TransformerClass::B => write!(f, "B"),
            TransformerClass::C => write!(f, "C"),
        }
    }
}

impl std::str::FromStr for TransformerClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "O" => Ok(TransformerClass::O),
            "A" => Ok(TransformerClass::A),
            "B" => Ok(TransformerClass::B),
            "C" => Ok(TransformerClass::C),
            other => Err(format!("unknown transformer class '{other}'")),
        }
    }
}

/// Oil condition from the breakdown-voltage test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownResult {
    Poor,
    Fair,
    Good,
}

impl std::fmt::Display for BreakdownResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreakdownResult::Good => write!(f, "GOOD"),
            BreakdownResult::Fair => write!(f, "FAIR"),
            BreakdownResult::Poor => write!(f, "POOR"),
        }
    }
}

/// Classification plus the recommendation text shown with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreakdownOutcome {
    pub result: BreakdownResult,
    pub recommendation: String,
}

/// A complete dielectric-strength test on one transformer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownVoltageReading {
    #[serde(default)]
    pub id_trafo: String,
    pub transformer_type: TransformerClass,
    /// The six individual test results (kV)
    pub dielectric_strengths: Vec<f64>,
    /// Arithmetic mean rounded to 2 decimals (kV)
    pub average: f64,
    pub result: BreakdownResult,
    pub recommendation: String,
}

// ============================================================================
// CO Screening
// ============================================================================

/// Carbon-monoxide level band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoSeverity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for CoSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoSeverity::Low => write!(f, "LOW"),
            CoSeverity::Medium => write!(f, "MEDIUM"),
            CoSeverity::High => write!(f, "HIGH"),
        }
    }
}

/// CO screening outcome with the resampling schedule it implies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoAnalysisResult {
    pub co_level: f64,
    pub severity: CoSeverity,
    pub description: String,
    pub resampling_interval: String,
    pub recommendations: Vec<String>,
}

// ============================================================================
// Report Header
// ============================================================================

/// Sample and nameplate metadata printed on reports; carried on history records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportHeader {
    pub sampling_date: String,
    pub id_trafo: String,
    pub serial_no: String,
    pub power_rating: String,
    pub voltage_ratio: String,
    pub category: String,
    pub manufacture: String,
    pub oil_brand: String,
    pub weight_volume_oil: String,
    pub year: String,
    pub temperature: String,
    pub sampling_point: String,
}
