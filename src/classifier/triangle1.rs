//! Triangle 1 (CH4 / C2H4 / C2H2) - primary fault triangle

use super::ZoneClassifier;
use crate::types::{FaultCode, GasConcentration, Gas, Triangle1Fault, TriangleMethod};

/// C2H2 share above which the discharge branch applies
const C2H2_DISCHARGE: f64 = 13.0;
const C2H4_HIGH: f64 = 23.0;
const C2H4_LOW: f64 = 9.0;
/// CH4 share separating T1 from T2 when C2H4 is high
const CH4_T1_HIGH_C2H4: f64 = 75.0;
/// CH4 share separating T1 from T3 when C2H4 is moderate
const CH4_T1_MODERATE_C2H4: f64 = 85.0;

/// Classify normalized CH4, C2H4, C2H2 percentages.
///
/// Comparisons are strict: C2H2 = 13.0 exactly stays out of the discharge
/// branch, C2H4 = 23.0 exactly falls to the next threshold.
pub fn classify_triangle1(ch4: f64, c2h4: f64, c2h2: f64) -> Triangle1Fault {
    if c2h2 > C2H2_DISCHARGE {
        if c2h4 > C2H4_HIGH {
            Triangle1Fault::D2
        } else if c2h4 > C2H4_LOW {
            Triangle1Fault::D1
        } else {
            Triangle1Fault::Dt
        }
    } else if c2h4 > C2H4_HIGH {
        if ch4 > CH4_T1_HIGH_C2H4 {
            Triangle1Fault::T1
        } else {
            Triangle1Fault::T2
        }
    } else if c2h4 > C2H4_LOW {
        if ch4 > CH4_T1_MODERATE_C2H4 {
            Triangle1Fault::T1
        } else {
            Triangle1Fault::T3
        }
    } else {
        Triangle1Fault::Pd
    }
}

pub struct Triangle1Classifier;

impl ZoneClassifier for Triangle1Classifier {
    fn method(&self) -> TriangleMethod {
        TriangleMethod::Triangle1
    }

    fn is_applicable(&self, gas: &GasConcentration) -> bool {
        gas.has(Gas::Ch4) || gas.has(Gas::C2h4) || gas.has(Gas::C2h2)
    }

    fn zone(&self, p: [f64; 3]) -> FaultCode {
        classify_triangle1(p[0], p[1], p[2]).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_points() {
        let cases = [
            ((90.0, 5.0, 5.0), Triangle1Fault::Pd),
            ((80.0, 15.0, 5.0), Triangle1Fault::T3),
            ((88.0, 10.0, 2.0), Triangle1Fault::T1),
            ((70.0, 30.0, 0.0), Triangle1Fault::T2),
            ((80.0, 25.0, 0.0), Triangle1Fault::T1),
            ((70.0, 10.0, 20.0), Triangle1Fault::D1),
            ((60.0, 30.0, 10.0), Triangle1Fault::T2),
            ((40.0, 40.0, 20.0), Triangle1Fault::D2),
            ((50.0, 5.0, 45.0), Triangle1Fault::Dt),
        ];
        for ((ch4, c2h4, c2h2), expected) in cases {
            assert_eq!(
                classify_triangle1(ch4, c2h4, c2h2),
                expected,
                "({ch4}, {c2h4}, {c2h2})"
            );
        }
    }

    #[test]
    fn test_c2h2_boundary_is_exclusive() {
        // 13.0 exactly is not a discharge
        assert_eq!(classify_triangle1(60.0, 27.0, 13.0), Triangle1Fault::T2);
        assert_eq!(classify_triangle1(60.0, 26.99, 13.01), Triangle1Fault::D2);
    }

    #[test]
    fn test_c2h4_boundaries_are_exclusive() {
        assert_eq!(classify_triangle1(57.0, 23.0, 20.0), Triangle1Fault::D1);
        assert_eq!(classify_triangle1(71.0, 9.0, 20.0), Triangle1Fault::Dt);
        assert_eq!(classify_triangle1(86.0, 9.0, 5.0), Triangle1Fault::Pd);
    }

    #[test]
    fn test_ch4_boundaries_are_exclusive() {
        assert_eq!(classify_triangle1(75.0, 24.0, 1.0), Triangle1Fault::T2);
        assert_eq!(classify_triangle1(85.0, 10.0, 5.0), Triangle1Fault::T3);
        assert_eq!(classify_triangle1(85.01, 10.0, 4.99), Triangle1Fault::T1);
    }

    #[test]
    fn test_applicability() {
        let gas = GasConcentration {
            c2h2: Some(3.0),
            ..Default::default()
        };
        assert!(Triangle1Classifier.is_applicable(&gas));
        assert!(!Triangle1Classifier.is_applicable(&GasConcentration {
            h2: Some(50.0),
            c2h6: Some(10.0),
            ..Default::default()
        }));
    }
}
