//! TRAFO-DGA: Transformer Oil Diagnostics
//!
//! Deterministic classification of insulating-oil samples.
//!
//! ## Architecture
//!
//! - **Geometry**: gas percentages to positions on a Duval triangle
//! - **Classifier**: zone cascades for Triangles 1, 4 and 5
//! - **Aggregator**: multi-triangle severity, narrative and recommendations
//! - **Breakdown**: dielectric-strength rating per transformer class
//! - **CO Analysis**: carbon-monoxide screening for `Data 1` samples
//! - **Storage**: result history and notifications around the engine

pub mod config;
pub mod types;
pub mod geometry;
pub mod classifier;
pub mod aggregator;
pub mod breakdown;
pub mod co_analysis;
pub mod recommendations;
pub mod storage;

// Re-export engine configuration
pub use config::{ConfigError, EngineConfig};

// Re-export commonly used types
pub use types::{
    AnalysisResult, BreakdownResult, BreakdownVoltageReading, CoAnalysisResult, FaultCode,
    FaultDetectionResult, GasConcentration, ManualTriangleInput, RecommendationRecord,
    ReportHeader, Severity, TransformerClass, TriangleFault, TriangleMethod,
};

// Re-export engine entry points
pub use aggregator::{aggregate, analyze, analyze_manual, analyze_manual_with, determine_severity};
pub use breakdown::{analyze_breakdown, BreakdownError, BreakdownThresholds};
pub use classifier::{classify, ZoneClassifier};
pub use co_analysis::{analyze_co_level, analyze_co_level_with, CoLimits};
pub use geometry::{diagram, ClassificationError};

// Re-export storage
pub use storage::{HistoryRecord, InMemoryHistory, ResultSink, SledHistory, StorageError};
