//! Multi-triangle aggregation
//!
//! Runs every applicable triangle on a sample and folds the per-triangle
//! results into one `AnalysisResult`: overall severity, narrative, and
//! deduplicated maintenance recommendations.
//!
//! Two entry points share the fold:
//! - `analyze()` - computed from gas concentrations (confidence 0.8)
//! - `analyze_manual()` - operator-selected zones (confidence 1.0), with CO
//!   screening for `Data 1` readings

pub mod narrative;

use tracing::{debug, info, warn};

use crate::classifier::{default_classifiers, MANUAL_CONFIDENCE};
use crate::co_analysis::{analyze_co_level_with, CoLimits};
use crate::geometry::ClassificationError;
use crate::recommendations;
use crate::types::{
    AnalysisResult, FaultCode, FaultDetectionResult, GasConcentration, GasRatios,
    ManualTriangleInput, Point, RecommendationRecord, Severity, TriangleMethod,
};

/// Maximum severity over the detected codes; `Low` when empty.
pub fn determine_severity(codes: &[FaultCode]) -> Severity {
    codes
        .iter()
        .map(|c| c.severity())
        .max()
        .unwrap_or(Severity::Low)
}

/// Run every applicable triangle on a gas sample and aggregate.
pub fn analyze(gas: &GasConcentration) -> AnalysisResult {
    let mut results = Vec::with_capacity(3);

    for classifier in default_classifiers() {
        let method = classifier.method();
        if !classifier.is_applicable(gas) {
            debug!(triangle = method.number(), "Required gases missing, triangle skipped");
            continue;
        }
        match classifier.evaluate(gas) {
            Ok(result) => results.push(result),
            Err(ClassificationError::NoData(_)) => {
                debug!(triangle = method.number(), "No data, triangle omitted");
            }
        }
    }

    let analysis = aggregate(results);
    info!(
        triangles = analysis.results().count(),
        severity = %analysis.severity,
        "DGA analysis complete"
    );
    analysis
}

/// Fold computed per-triangle results into one analysis.
///
/// If the same triangle appears twice, the first result is kept.
pub fn aggregate(results: Vec<FaultDetectionResult>) -> AnalysisResult {
    let mut analysis = fold(results);
    let codes = analysis.fault_codes();
    analysis.overall_recommendation = narrative::computed(&codes).to_string();
    analysis
}

/// Build an analysis from operator-selected zones with the default CO limits.
pub fn analyze_manual(inputs: &[ManualTriangleInput]) -> AnalysisResult {
    analyze_manual_with(inputs, &CoLimits::default())
}

/// Build an analysis from operator-selected zones.
///
/// Only completed inputs count. Each contributes a confidence-1.0 result for
/// its selected zone (coordinates and ratios are zero, since nothing was
/// computed). The first completed `Data 1` input with a CO reading is screened.
pub fn analyze_manual_with(inputs: &[ManualTriangleInput], co_limits: &CoLimits) -> AnalysisResult {
    let completed: Vec<&ManualTriangleInput> = inputs.iter().filter(|i| i.is_completed).collect();

    let results = completed
        .iter()
        .filter_map(|input| input.selected_fault)
        .map(|fault| FaultDetectionResult {
            triangle_method: fault.method(),
            fault_type: fault.code(),
            confidence: MANUAL_CONFIDENCE,
            coordinates: Point::default(),
            gas_ratios: GasRatios::default(),
        })
        .collect();

    let mut analysis = fold(results);
    let codes = analysis.fault_codes();
    analysis.overall_recommendation = narrative::manual(&codes).to_string();

    analysis.co_analysis = completed
        .iter()
        .filter(|i| i.data_classification.uses_co_screening())
        .find_map(|i| i.gas_concentrations.co_ppm())
        .map(|co| analyze_co_level_with(co, co_limits));

    info!(
        inputs = inputs.len(),
        completed = completed.len(),
        severity = %analysis.severity,
        co_screened = analysis.co_analysis.is_some(),
        "Manual analysis complete"
    );
    analysis
}

/// Shared fold: slot results by triangle, rank severity, resolve recommendations.
fn fold(results: Vec<FaultDetectionResult>) -> AnalysisResult {
    let mut analysis = AnalysisResult {
        triangle1: None,
        triangle4: None,
        triangle5: None,
        overall_recommendation: String::new(),
        recommendations: Vec::new(),
        severity: Severity::Low,
        co_analysis: None,
    };

    for result in results {
        let slot = match result.triangle_method {
            TriangleMethod::Triangle1 => &mut analysis.triangle1,
            TriangleMethod::Triangle4 => &mut analysis.triangle4,
            TriangleMethod::Triangle5 => &mut analysis.triangle5,
        };
        if slot.is_none() {
            *slot = Some(result);
        } else {
            warn!(triangle = %result.triangle_method, "Duplicate triangle result ignored");
        }
    }

    let codes = analysis.fault_codes();
    analysis.severity = determine_severity(&codes);
    analysis.recommendations = collect_recommendations(&codes);
    analysis
}

fn collect_recommendations(codes: &[FaultCode]) -> Vec<RecommendationRecord> {
    if codes.is_empty() {
        return recommendations::resolve(FaultCode::Normal).into_iter().collect();
    }
    codes
        .iter()
        .filter_map(|&code| {
            let record = recommendations::resolve(code);
            if record.is_none() {
                warn!(fault = %code, "No recommendation entry, skipped");
            }
            record
        })
        .collect()
}
