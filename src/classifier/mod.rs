//! Duval zone classifiers
//!
//! Each triangle maps normalized (top, right, left) percentages to exactly one
//! fault zone through an ordered threshold cascade. The first matching branch
//! wins, and every input (including NaN) lands in some zone.
//!
//! ## Classifiers
//!
//! 1. **Triangle 1** - CH4 / C2H4 / C2H2, primary fault triangle
//! 2. **Triangle 4** - H2 / CH4 / C2H6, low-energy and stray gassing
//! 3. **Triangle 5** - CH4 / C2H4 / C2H6, thermal faults in oil

pub mod triangle1;
pub mod triangle4;
pub mod triangle5;

pub use triangle1::{classify_triangle1, Triangle1Classifier};
pub use triangle4::{classify_triangle4, Triangle4Classifier};
pub use triangle5::{classify_triangle5, Triangle5Classifier};

use crate::geometry::{self, ClassificationError};
use crate::types::{FaultCode, FaultDetectionResult, GasConcentration, TriangleMethod};

/// Confidence attached to every computed classification.
pub const COMPUTED_CONFIDENCE: f64 = 0.8;

/// Confidence attached to operator-confirmed classifications.
pub const MANUAL_CONFIDENCE: f64 = 1.0;

/// Trait for triangle zone classifiers
///
/// Implementations supply the gas-presence rule and the zone cascade; the
/// shared `evaluate` turns a gas record into a per-triangle result.
pub trait ZoneClassifier: Send + Sync {
    fn method(&self) -> TriangleMethod;

    /// Whether the sample carries the gases this triangle needs.
    fn is_applicable(&self, gas: &GasConcentration) -> bool;

    /// Zone for normalized (top, right, left) percentages.
    fn zone(&self, p: [f64; 3]) -> FaultCode;

    /// Normalize, classify and locate one sample on this triangle.
    fn evaluate(&self, gas: &GasConcentration) -> Result<FaultDetectionResult, ClassificationError> {
        let method = self.method();
        let p = geometry::triangle_percentages(method, gas)?;
        let fault_type = self.zone(p);

        tracing::debug!(
            triangle = method.number(),
            top = p[0],
            right = p[1],
            left = p[2],
            fault = %fault_type,
            "Zone classified"
        );

        Ok(FaultDetectionResult {
            triangle_method: method,
            fault_type,
            confidence: COMPUTED_CONFIDENCE,
            coordinates: geometry::to_coordinate(p[0], p[1], p[2]),
            gas_ratios: p.into(),
        })
    }
}

/// Classify percentages on a triangle without going through a gas record.
pub fn classify(method: TriangleMethod, p1: f64, p2: f64, p3: f64) -> FaultCode {
    match method {
        TriangleMethod::Triangle1 => classify_triangle1(p1, p2, p3).into(),
        TriangleMethod::Triangle4 => classify_triangle4(p1, p2, p3).into(),
        TriangleMethod::Triangle5 => classify_triangle5(p1, p2, p3).into(),
    }
}

/// Create the default set of 3 triangle classifiers, in evaluation order
pub fn default_classifiers() -> Vec<Box<dyn ZoneClassifier>> {
    vec![
        Box::new(Triangle1Classifier),
        Box::new(Triangle4Classifier),
        Box::new(Triangle5Classifier),
    ]
}
