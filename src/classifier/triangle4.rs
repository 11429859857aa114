//! Triangle 4 (H2 / CH4 / C2H6) - low-energy faults and stray gassing

use super::ZoneClassifier;
use crate::types::{FaultCode, Gas, GasConcentration, Triangle4Fault, TriangleMethod};

const H2_HIGH: f64 = 50.0;
const CH4_PD: f64 = 15.0;
const C2H6_HIGH: f64 = 40.0;
const CH4_DT: f64 = 65.0;

/// Classify normalized H2, CH4, C2H6 percentages.
pub fn classify_triangle4(h2: f64, ch4: f64, c2h6: f64) -> Triangle4Fault {
    if h2 > H2_HIGH {
        if ch4 > CH4_PD {
            Triangle4Fault::Pd
        } else {
            Triangle4Fault::Nd
        }
    } else if c2h6 > C2H6_HIGH {
        if ch4 > CH4_PD {
            Triangle4Fault::C
        } else {
            Triangle4Fault::S
        }
    } else if ch4 > CH4_DT {
        Triangle4Fault::Dt
    } else {
        Triangle4Fault::D2
    }
}

pub struct Triangle4Classifier;

impl ZoneClassifier for Triangle4Classifier {
    fn method(&self) -> TriangleMethod {
        TriangleMethod::Triangle4
    }

    /// Needs both H2 and C2H6.
    fn is_applicable(&self, gas: &GasConcentration) -> bool {
        gas.has(Gas::H2) && gas.has(Gas::C2h6)
    }

    fn zone(&self, p: [f64; 3]) -> FaultCode {
        classify_triangle4(p[0], p[1], p[2]).into()
    }
}
