//! Fault taxonomy: TriangleMethod, per-triangle fault enums, FaultCode, Severity

use serde::{Deserialize, Serialize};

use super::Gas;

// ============================================================================
// Triangle Definitions
// ============================================================================

/// Duval triangle variant.
///
/// Each triangle binds its top, right and left vertices to fixed gases:
/// - Triangle 1: CH4 / C2H4 / C2H2 (primary fault triangle)
/// - Triangle 4: H2 / CH4 / C2H6 (low-energy and stray gassing)
/// - Triangle 5: CH4 / C2H4 / C2H6 (thermal faults in oil)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub enum TriangleMethod {
    Triangle1,
    Triangle4,
    Triangle5,
}

impl TriangleMethod {
    /// All supported triangles in evaluation order.
    pub const ALL: [TriangleMethod; 3] = [
        TriangleMethod::Triangle1,
        TriangleMethod::Triangle4,
        TriangleMethod::Triangle5,
    ];

    /// Gases bound to the (top, right, left) vertices.
    pub fn roles(self) -> [Gas; 3] {
        match self {
            TriangleMethod::Triangle1 => [Gas::Ch4, Gas::C2h4, Gas::C2h2],
            TriangleMethod::Triangle4 => [Gas::H2, Gas::Ch4, Gas::C2h6],
            TriangleMethod::Triangle5 => [Gas::Ch4, Gas::C2h4, Gas::C2h6],
        }
    }

    /// Triangle number as used in IEC 60599 Annex and on reports.
    pub fn number(self) -> u8 {
        match self {
            TriangleMethod::Triangle1 => 1,
            TriangleMethod::Triangle4 => 4,
            TriangleMethod::Triangle5 => 5,
        }
    }

    /// Short descriptive text of the triangle's purpose.
    pub fn description(self) -> &'static str {
        match self {
            TriangleMethod::Triangle1 => {
                "Primary triangle for fault detection using methane, ethylene, and acetylene"
            }
            TriangleMethod::Triangle4 => {
                "Secondary triangle using hydrogen, methane, and ethane for enhanced analysis"
            }
            TriangleMethod::Triangle5 => {
                "Tertiary triangle using methane, ethylene, and ethane for comprehensive analysis"
            }
        }
    }
}

impl TryFrom<u8> for TriangleMethod {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TriangleMethod::Triangle1),
            4 => Ok(TriangleMethod::Triangle4),
            5 => Ok(TriangleMethod::Triangle5),
            other => Err(format!("unsupported Duval triangle {other} (expected 1, 4 or 5)")),
        }
    }
}

impl From<TriangleMethod> for u8 {
    fn from(method: TriangleMethod) -> Self {
        method.number()
    }
}

impl std::fmt::Display for TriangleMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Triangle {}", self.number())
    }
}

// ============================================================================
// Fault Codes
// ============================================================================

/// Any fault code produced by a classifier, plus the `NORMAL` fallback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FaultCode {
    /// Partial discharge
    #[serde(rename = "PD")]
    Pd,
    /// Low energy discharge
    D1,
    /// High energy discharge
    D2,
    /// Thermal fault < 300 °C
    T1,
    /// Thermal fault 300-700 °C
    T2,
    /// Thermal fault > 700 °C
    T3,
    /// Mix of thermal and electrical faults
    #[serde(rename = "DT")]
    Dt,
    /// Stray gassing of mineral oil
    S,
    /// Carbonization of paper
    C,
    /// Normal degradation / no decision
    #[serde(rename = "ND")]
    Nd,
    /// Overheating < 250 °C
    O,
    /// No fault detected
    #[serde(rename = "NORMAL")]
    Normal,
}

impl FaultCode {
    /// Every fault code, including `NORMAL`.
    pub const ALL: [FaultCode; 12] = [
        FaultCode::Pd,
        FaultCode::D1,
        FaultCode::D2,
        FaultCode::T1,
        FaultCode::T2,
        FaultCode::T3,
        FaultCode::Dt,
        FaultCode::S,
        FaultCode::C,
        FaultCode::Nd,
        FaultCode::O,
        FaultCode::Normal,
    ];

    /// Short code as printed on reports.
    pub fn as_str(self) -> &'static str {
        match self {
            FaultCode::Pd => "PD",
            FaultCode::D1 => "D1",
            FaultCode::D2 => "D2",
            FaultCode::T1 => "T1",
            FaultCode::T2 => "T2",
            FaultCode::T3 => "T3",
            FaultCode::Dt => "DT",
            FaultCode::S => "S",
            FaultCode::C => "C",
            FaultCode::Nd => "ND",
            FaultCode::O => "O",
            FaultCode::Normal => "NORMAL",
        }
    }

    /// Severity tier used when ranking an overall diagnosis.
    ///
    /// {D2, T3} critical; {D1, DT, T2} high; {T1, C, PD} medium; the rest low.
    pub fn severity(self) -> Severity {
        match self {
            FaultCode::D2 | FaultCode::T3 => Severity::Critical,
            FaultCode::D1 | FaultCode::Dt | FaultCode::T2 => Severity::High,
            FaultCode::T1 | FaultCode::C | FaultCode::Pd => Severity::Medium,
            FaultCode::S | FaultCode::Nd | FaultCode::O | FaultCode::Normal => Severity::Low,
        }
    }

    /// Display colour used by report and diagram layers.
    pub fn color(self) -> &'static str {
        match self {
            FaultCode::Pd => "#3B82F6",
            FaultCode::D1 | FaultCode::T2 => "#F59E0B",
            FaultCode::D2 => "#EF4444",
            FaultCode::T1 | FaultCode::Normal => "#10B981",
            FaultCode::T3 => "#DC2626",
            FaultCode::Dt => "#8B5CF6",
            FaultCode::S => "#06B6D4",
            FaultCode::C => "#84CC16",
            FaultCode::Nd => "#6B7280",
            FaultCode::O => "#F97316",
        }
    }
}

impl std::fmt::Display for FaultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FaultCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        FaultCode::ALL
            .into_iter()
            .find(|code| code.as_str() == upper)
            .ok_or_else(|| format!("unknown fault code '{s}'"))
    }
}

/// Zones of Triangle 1 (CH4 / C2H4 / C2H2).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Triangle1Fault {
    #[serde(rename = "PD")]
    Pd,
    D1,
    D2,
    T1,
    T2,
    T3,
    #[serde(rename = "DT")]
    Dt,
}

/// Zones of Triangle 4 (H2 / CH4 / C2H6).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Triangle4Fault {
    #[serde(rename = "PD")]
    Pd,
    #[serde(rename = "ND")]
    Nd,
    C,
    S,
    #[serde(rename = "DT")]
    Dt,
    D2,
}

/// Zones of Triangle 5 (CH4 / C2H4 / C2H6).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Triangle5Fault {
    T2,
    T3,
    C,
    S,
    O,
    #[serde(rename = "ND")]
    Nd,
}

impl From<Triangle1Fault> for FaultCode {
    fn from(fault: Triangle1Fault) -> Self {
        match fault {
            Triangle1Fault::Pd => FaultCode::Pd,
            Triangle1Fault::D1 => FaultCode::D1,
            Triangle1Fault::D2 => FaultCode::D2,
            Triangle1Fault::T1 => FaultCode::T1,
            Triangle1Fault::T2 => FaultCode::T2,
            Triangle1Fault::T3 => FaultCode::T3,
            Triangle1Fault::Dt => FaultCode::Dt,
        }
    }
}

impl From<Triangle4Fault> for FaultCode {
    fn from(fault: Triangle4Fault) -> Self {
        match fault {
            Triangle4Fault::Pd => FaultCode::Pd,
            Triangle4Fault::Nd => FaultCode::Nd,
            Triangle4Fault::C => FaultCode::C,
            Triangle4Fault::S => FaultCode::S,
            Triangle4Fault::Dt => FaultCode::Dt,
            Triangle4Fault::D2 => FaultCode::D2,
        }
    }
}

impl From<Triangle5Fault> for FaultCode {
    fn from(fault: Triangle5Fault) -> Self {
        match fault {
            Triangle5Fault::T2 => FaultCode::T2,
            Triangle5Fault::T3 => FaultCode::T3,
            Triangle5Fault::C => FaultCode::C,
            Triangle5Fault::S => FaultCode::S,
            Triangle5Fault::O => FaultCode::O,
            Triangle5Fault::Nd => FaultCode::Nd,
        }
    }
}

/// A fault zone tied to the triangle it belongs to.
///
/// Operator selections go through this type so a zone that does not exist
/// on the chosen triangle cannot be recorded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "triangle", content = "fault")]
pub enum TriangleFault {
    Triangle1(Triangle1Fault),
    Triangle4(Triangle4Fault),
    Triangle5(Triangle5Fault),
}

impl TriangleFault {
    pub fn method(self) -> TriangleMethod {
        match self {
            TriangleFault::Triangle1(_) => TriangleMethod::Triangle1,
            TriangleFault::Triangle4(_) => TriangleMethod::Triangle4,
            TriangleFault::Triangle5(_) => TriangleMethod::Triangle5,
        }
    }

    pub fn code(self) -> FaultCode {
        match self {
            TriangleFault::Triangle1(f) => f.into(),
            TriangleFault::Triangle4(f) => f.into(),
            TriangleFault::Triangle5(f) => f.into(),
        }
    }

    /// Resolve a fault code on a specific triangle.
    ///
    /// Returns `None` when the triangle has no zone with that code.
    pub fn on(method: TriangleMethod, code: FaultCode) -> Option<Self> {
        let fault = match (method, code) {
            (TriangleMethod::Triangle1, FaultCode::Pd) => Self::Triangle1(Triangle1Fault::Pd),
            (TriangleMethod::Triangle1, FaultCode::D1) => Self::Triangle1(Triangle1Fault::D1),
            (TriangleMethod::Triangle1, FaultCode::D2) => Self::Triangle1(Triangle1Fault::D2),
            (TriangleMethod::Triangle1, FaultCode::T1) => Self::Triangle1(Triangle1Fault::T1),
            (TriangleMethod::Triangle1, FaultCode::T2) => Self::Triangle1(Triangle1Fault::T2),
            (TriangleMethod::Triangle1, FaultCode::T3) => Self::Triangle1(Triangle1Fault::T3),
            (TriangleMethod::Triangle1, FaultCode::Dt) => Self::Triangle1(Triangle1Fault::Dt),
            (TriangleMethod::Triangle4, FaultCode::Pd) => Self::Triangle4(Triangle4Fault::Pd),
            (TriangleMethod::Triangle4, FaultCode::Nd) => Self::Triangle4(Triangle4Fault::Nd),
            (TriangleMethod::Triangle4, FaultCode::C) => Self::Triangle4(Triangle4Fault::C),
            (TriangleMethod::Triangle4, FaultCode::S) => Self::Triangle4(Triangle4Fault::S),
            (TriangleMethod::Triangle4, FaultCode::Dt) => Self::Triangle4(Triangle4Fault::Dt),
            (TriangleMethod::Triangle4, FaultCode::D2) => Self::Triangle4(Triangle4Fault::D2),
            (TriangleMethod::Triangle5, FaultCode::T2) => Self::Triangle5(Triangle5Fault::T2),
            (TriangleMethod::Triangle5, FaultCode::T3) => Self::Triangle5(Triangle5Fault::T3),
            (TriangleMethod::Triangle5, FaultCode::C) => Self::Triangle5(Triangle5Fault::C),
            (TriangleMethod::Triangle5, FaultCode::S) => Self::Triangle5(Triangle5Fault::S),
            (TriangleMethod::Triangle5, FaultCode::O) => Self::Triangle5(Triangle5Fault::O),
            (TriangleMethod::Triangle5, FaultCode::Nd) => Self::Triangle5(Triangle5Fault::Nd),
            _ => return None,
        };
        Some(fault)
    }
}

// ============================================================================
// Severity and Priority
// ============================================================================

/// Overall severity tier, totally ordered: critical > high > medium > low.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low = 0,
    Medium = 1,
    High = 2,
    Critical = 3,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Urgency of the maintenance actions attached to a fault.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MaintenancePriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl std::fmt::Display for MaintenancePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaintenancePriority::Low => write!(f, "low"),
            MaintenancePriority::Medium => write!(f, "medium"),
            MaintenancePriority::High => write!(f, "high"),
            MaintenancePriority::Urgent => write!(f, "urgent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_total_order() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert_eq!(
            [Severity::Medium, Severity::Critical, Severity::Low].into_iter().max(),
            Some(Severity::Critical)
        );
    }

    #[test]
    fn test_fault_code_ranking() {
        assert_eq!(FaultCode::D2.severity(), Severity::Critical);
        assert_eq!(FaultCode::T3.severity(), Severity::Critical);
        assert_eq!(FaultCode::Dt.severity(), Severity::High);
        assert_eq!(FaultCode::Pd.severity(), Severity::Medium);
        assert_eq!(FaultCode::O.severity(), Severity::Low);
        assert_eq!(FaultCode::Normal.severity(), Severity::Low);
    }

    #[test]
    fn test_fault_code_wire_names() {
        assert_eq!(serde_json::to_string(&FaultCode::Pd).unwrap(), "\"PD\"");
        assert_eq!(serde_json::to_string(&FaultCode::Normal).unwrap(), "\"NORMAL\"");
        let parsed: FaultCode = serde_json::from_str("\"DT\"").unwrap();
        assert_eq!(parsed, FaultCode::Dt);
        assert_eq!("nd".parse::<FaultCode>(), Ok(FaultCode::Nd));
        assert!("X9".parse::<FaultCode>().is_err());
    }

    #[test]
    fn test_triangle_method_serializes_as_number() {
        assert_eq!(serde_json::to_string(&TriangleMethod::Triangle4).unwrap(), "4");
        let parsed: TriangleMethod = serde_json::from_str("5").unwrap();
        assert_eq!(parsed, TriangleMethod::Triangle5);
        assert!(serde_json::from_str::<TriangleMethod>("2").is_err());
    }

    #[test]
    fn test_triangle_fault_rejects_foreign_zone() {
        assert!(TriangleFault::on(TriangleMethod::Triangle1, FaultCode::S).is_none());
        assert!(TriangleFault::on(TriangleMethod::Triangle5, FaultCode::Pd).is_none());
        let fault = TriangleFault::on(TriangleMethod::Triangle4, FaultCode::C).unwrap();
        assert_eq!(fault.method(), TriangleMethod::Triangle4);
        assert_eq!(fault.code(), FaultCode::C);
    }

    #[test]
    fn test_every_triangle_zone_maps_back() {
        for method in TriangleMethod::ALL {
            for code in FaultCode::ALL {
                if let Some(fault) = TriangleFault::on(method, code) {
                    assert_eq!(fault.code(), code);
                    assert_eq!(fault.method(), method);
                }
            }
        }
    }
}
