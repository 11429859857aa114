//! Analysis result types: Point, GasRatios, FaultDetectionResult, AnalysisResult,
//! RecommendationRecord, ManualTriangleInput

use serde::{Deserialize, Serialize};

use super::{
    CoAnalysisResult, DataClassification, FaultCode, GasConcentration, MaintenancePriority,
    Severity, TriangleFault, TriangleMethod,
};

// ============================================================================
// Triangle Geometry
// ============================================================================

/// Cartesian point in a triangle of side 100 with Left=(0,0), Right=(100,0).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Normalized percentages of the (top, right, left) gases of one triangle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct GasRatios {
    pub gas1: f64,
    pub gas2: f64,
    pub gas3: f64,
}

impl GasRatios {
    pub fn as_array(&self) -> [f64; 3] {
        [self.gas1, self.gas2, self.gas3]
    }
}

impl From<[f64; 3]> for GasRatios {
    fn from(p: [f64; 3]) -> Self {
        Self {
            gas1: p[0],
            gas2: p[1],
            gas3: p[2],
        }
    }
}

// ============================================================================
// Per-Triangle Result
// ============================================================================

/// Classification output for a single triangle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FaultDetectionResult {
    pub triangle_method: TriangleMethod,
    pub fault_type: FaultCode,
    /// 0.8 for computed classifications, 1.0 for operator-confirmed ones
    pub confidence: f64,
    pub coordinates: Point,
    pub gas_ratios: GasRatios,
}

// ============================================================================
// Recommendations
// ============================================================================

/// Maintenance recommendation for one fault code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRecord {
    pub fault_type: FaultCode,
    pub description: String,
    pub corrective_actions: Vec<String>,
    pub preventive_actions: Vec<String>,
    pub priority: MaintenancePriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ============================================================================
// Aggregate Result
// ============================================================================

/// Aggregate of all evaluated triangles for one sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triangle1: Option<FaultDetectionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triangle4: Option<FaultDetectionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triangle5: Option<FaultDetectionResult>,
    /// Narrative for the worst detected problem
    pub overall_recommendation: String,
    /// Deduplicated by fault code, `NORMAL` when nothing was evaluated
    pub recommendations: Vec<RecommendationRecord>,
    pub severity: Severity,
    /// CO screening for `Data 1` samples (manual analysis only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co_analysis: Option<CoAnalysisResult>,
}

impl AnalysisResult {
    /// Evaluated triangles in triangle order (1, 4, 5).
    pub fn results(&self) -> impl Iterator<Item = &FaultDetectionResult> {
        [&self.triangle1, &self.triangle4, &self.triangle5]
            .into_iter()
            .flatten()
    }

    /// Result for a given triangle, if it was evaluated.
    pub fn triangle(&self, method: TriangleMethod) -> Option<&FaultDetectionResult> {
        match method {
            TriangleMethod::Triangle1 => self.triangle1.as_ref(),
            TriangleMethod::Triangle4 => self.triangle4.as_ref(),
            TriangleMethod::Triangle5 => self.triangle5.as_ref(),
        }
    }

    /// Detected fault codes, deduplicated, in triangle order.
    pub fn fault_codes(&self) -> Vec<FaultCode> {
        let mut codes = Vec::new();
        for r in self.results() {
            if !codes.contains(&r.fault_type) {
                codes.push(r.fault_type);
            }
        }
        codes
    }

    /// Convenience alias for the primary (worst) fault, if any triangle ran.
    pub fn primary_fault(&self) -> Option<FaultCode> {
        self.results()
            .map(|r| r.fault_type)
            .max_by_key(|code| code.severity())
    }
}

// ============================================================================
// Operator Input
// ============================================================================

/// Operator-entered reading for one triangle (manual analysis path).
///
/// The operator reads the zone off a plotted diagram; the gas record is kept
/// for CO screening and for the history report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ManualTriangleInput {
    pub data_classification: DataClassification,
    #[serde(default)]
    pub gas_concentrations: GasConcentration,
    #[serde(default)]
    pub selected_fault: Option<TriangleFault>,
    #[serde(default)]
    pub is_completed: bool,
}

impl ManualTriangleInput {
    pub fn completed(fault: TriangleFault) -> Self {
        Self {
            selected_fault: Some(fault),
            is_completed: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(method: TriangleMethod, code: FaultCode) -> FaultDetectionResult {
        FaultDetectionResult {
            triangle_method: method,
            fault_type: code,
            confidence: 0.8,
            coordinates: Point::default(),
            gas_ratios: GasRatios::default(),
        }
    }

    #[test]
    fn test_wire_field_names() {
        let r = result(TriangleMethod::Triangle1, FaultCode::D2);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["faultType"], "D2");
        assert_eq!(json["triangleMethod"], 1);
        assert!(json["gasRatios"]["gas1"].is_number());
    }

    #[test]
    fn test_fault_codes_dedup_in_order() {
        let analysis = AnalysisResult {
            triangle1: Some(result(TriangleMethod::Triangle1, FaultCode::T2)),
            triangle4: Some(result(TriangleMethod::Triangle4, FaultCode::Pd)),
            triangle5: Some(result(TriangleMethod::Triangle5, FaultCode::T2)),
            overall_recommendation: String::new(),
            recommendations: Vec::new(),
            severity: Severity::High,
            co_analysis: None,
        };
        assert_eq!(analysis.fault_codes(), vec![FaultCode::T2, FaultCode::Pd]);
        assert_eq!(analysis.primary_fault(), Some(FaultCode::T2));
        assert!(analysis.triangle(TriangleMethod::Triangle4).is_some());
    }
}
