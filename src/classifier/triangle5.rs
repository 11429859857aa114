//! Triangle 5 (CH4 / C2H4 / C2H6) - thermal faults in oil
//!
//! The C branch (C2H6 > 60 and CH4 > 40) cannot be reached with normalized
//! inputs since the two shares would exceed 100. It is kept so the zone list
//! stays complete for operator selection.

use super::ZoneClassifier;
use crate::types::{FaultCode, Gas, GasConcentration, Triangle5Fault, TriangleMethod};

const C2H4_HIGH: f64 = 50.0;
const CH4_T2: f64 = 20.0;
const C2H6_HIGH: f64 = 60.0;
const CH4_C: f64 = 40.0;
const CH4_O: f64 = 80.0;

/// Classify normalized CH4, C2H4, C2H6 percentages.
pub fn classify_triangle5(ch4: f64, c2h4: f64, c2h6: f64) -> Triangle5Fault {
    if c2h4 > C2H4_HIGH {
        if ch4 > CH4_T2 {
            Triangle5Fault::T2
        } else {
            Triangle5Fault::T3
        }
    } else if c2h6 > C2H6_HIGH {
        if ch4 > CH4_C {
            Triangle5Fault::C
        } else {
            Triangle5Fault::S
        }
    } else if ch4 > CH4_O {
        Triangle5Fault::O
    } else {
        Triangle5Fault::Nd
    }
}

pub struct Triangle5Classifier;

impl ZoneClassifier for Triangle5Classifier {
    fn method(&self) -> TriangleMethod {
        TriangleMethod::Triangle5
    }

    fn is_applicable(&self, gas: &GasConcentration) -> bool {
        gas.has(Gas::C2h6)
    }

    fn zone(&self, p: [f64; 3]) -> FaultCode {
        classify_triangle5(p[0], p[1], p[2]).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_points() {
        assert_eq!(classify_triangle5(30.0, 60.0, 10.0), Triangle5Fault::T2);
        assert_eq!(classify_triangle5(10.0, 80.0, 10.0), Triangle5Fault::T3);
        assert_eq!(classify_triangle5(20.0, 10.0, 70.0), Triangle5Fault::S);
        assert_eq!(classify_triangle5(90.0, 5.0, 5.0), Triangle5Fault::O);
        assert_eq!(classify_triangle5(40.0, 30.0, 30.0), Triangle5Fault::Nd);
    }

    #[test]
    fn test_c_branch_unreachable_when_normalized() {
        for i in 0..=100 {
            for j in 0..=(100 - i) {
                let ch4 = f64::from(i);
                let c2h4 = f64::from(j);
                let c2h6 = 100.0 - ch4 - c2h4;
                assert_ne!(classify_triangle5(ch4, c2h4, c2h6), Triangle5Fault::C);
            }
        }
        // Raw (non-normalized) input does reach it
        assert_eq!(classify_triangle5(50.0, 0.0, 70.0), Triangle5Fault::C);
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        assert_eq!(classify_triangle5(30.0, 50.0, 20.0), Triangle5Fault::Nd);
        assert_eq!(classify_triangle5(20.0, 60.0, 20.0), Triangle5Fault::T3);
        assert_eq!(classify_triangle5(80.0, 10.0, 10.0), Triangle5Fault::Nd);
    }

    #[test]
    fn test_applicability_needs_c2h6() {
        let gas = GasConcentration {
            ch4: Some(10.0),
            c2h4: Some(10.0),
            ..Default::default()
        };
        assert!(!Triangle5Classifier.is_applicable(&gas));
        let gas = GasConcentration {
            c2h6: Some(1.0),
            ..gas
        };
        assert!(Triangle5Classifier.is_applicable(&gas));
    }
}
