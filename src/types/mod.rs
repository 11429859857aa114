//! Shared data structures for transformer oil diagnostics
//!
//! This module defines the core types for the analysis paths:
//! - Gas input: GasConcentration, DataClassification
//! - Duval taxonomy: TriangleMethod, per-triangle fault enums, FaultCode, Severity
//! - DGA output: FaultDetectionResult, AnalysisResult, RecommendationRecord
//! - Oil quality: breakdown-voltage and CO screening results, report header

mod gas;
mod fault;
mod analysis;
mod oil;

pub use gas::*;
pub use fault::*;
pub use analysis::*;
pub use oil::*;
