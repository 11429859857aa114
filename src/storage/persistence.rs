//! ResultSink trait - pluggable history backend
//!
//! Abstracts result persistence so the CLI can store analyses without the
//! engine knowing where they go:
//! - `InMemoryHistory`: bounded in-memory store for tests and dry runs
//! - `SledHistory`: durable local store (see `history.rs`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::RwLock;
use uuid::Uuid;

use crate::types::{AnalysisResult, BreakdownVoltageReading, CoAnalysisResult, ReportHeader, Severity};

// ============================================================================
// Records
// ============================================================================

/// Stored result, tagged by the analysis that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum HistoryPayload {
    /// Computed Duval analysis
    Dga(AnalysisResult),
    /// Operator-confirmed Duval analysis
    Manual(AnalysisResult),
    Breakdown(BreakdownVoltageReading),
    Co(CoAnalysisResult),
}

impl HistoryPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            HistoryPayload::Dga(_) => "dga",
            HistoryPayload::Manual(_) => "manual",
            HistoryPayload::Breakdown(_) => "breakdown",
            HistoryPayload::Co(_) => "co",
        }
    }

    /// One-line summary for listings and notifications.
    pub fn summary(&self) -> String {
        match self {
            HistoryPayload::Dga(a) | HistoryPayload::Manual(a) => {
                let codes: Vec<String> = a.fault_codes().iter().map(ToString::to_string).collect();
                if codes.is_empty() {
                    format!("{}: no triangle evaluated", a.severity)
                } else {
                    format!("{}: {}", a.severity, codes.join(", "))
                }
            }
            HistoryPayload::Breakdown(b) => {
                format!(
                    "{} kV class {} ({}): {}",
                    b.average,
                    b.transformer_type,
                    b.transformer_type.voltage_range(),
                    b.result
                )
            }
            HistoryPayload::Co(c) => format!("CO {} ppm: {}", c.co_level, c.severity),
        }
    }

    /// DGA severity, if the payload carries one.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            HistoryPayload::Dga(a) | HistoryPayload::Manual(a) => Some(a.severity),
            HistoryPayload::Breakdown(_) | HistoryPayload::Co(_) => None,
        }
    }
}

/// One saved analysis with its report header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub header: ReportHeader,
    pub payload: HistoryPayload,
}

impl HistoryRecord {
    pub fn new(header: ReportHeader, payload: HistoryPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            header,
            payload,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.payload.kind()
    }
}

// ============================================================================
// Sink Trait
// ============================================================================

/// Trait for pluggable history backends
///
/// Implementations must be thread-safe (Send + Sync).
pub trait ResultSink: Send + Sync {
    fn save(&self, record: &HistoryRecord) -> Result<(), StorageError>;

    /// Most recent records first
    fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, StorageError>;

    fn get(&self, id: Uuid) -> Result<Option<HistoryRecord>, StorageError>;

    /// Backend name for logging
    fn backend_name(&self) -> &'static str;
}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("lock poisoned: {0}")]
    Lock(String),
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

// ============================================================================
// In-Memory Backend
// ============================================================================

/// Bounded in-memory history
///
/// Thread-safe via `RwLock`. Not durable; oldest records are evicted once
/// `capacity` is reached.
pub struct InMemoryHistory {
    records: RwLock<VecDeque<HistoryRecord>>,
    capacity: usize,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::with_capacity(crate::config::defaults::HISTORY_MEMORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: RwLock::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map_or(0, |r| r.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSink for InMemoryHistory {
    fn save(&self, record: &HistoryRecord) -> Result<(), StorageError> {
        let mut store = self
            .records
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        store.push_back(record.clone());
        while store.len() > self.capacity {
            store.pop_front();
        }
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, StorageError> {
        let store = self
            .records
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        Ok(store.iter().rev().take(limit).cloned().collect())
    }

    fn get(&self, id: Uuid) -> Result<Option<HistoryRecord>, StorageError> {
        let store = self
            .records
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        Ok(store.iter().find(|r| r.id == id).cloned())
    }

    fn backend_name(&self) -> &'static str {
        "InMemory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::co_analysis::analyze_co_level;

    fn co_record(ppm: f64) -> HistoryRecord {
        HistoryRecord::new(ReportHeader::default(), HistoryPayload::Co(analyze_co_level(ppm)))
    }

    #[test]
    fn test_in_memory_save_and_get() {
        let history = InMemoryHistory::new();
        let record = co_record(420.0);
        history.save(&record).unwrap();

        let found = history.get(record.id).unwrap();
        assert_eq!(found, Some(record));
        assert!(history.get(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_in_memory_recent_order() {
        let history = InMemoryHistory::new();
        for ppm in [100.0, 200.0, 300.0] {
            history.save(&co_record(ppm)).unwrap();
        }

        let recent = history.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(co_level(&recent[0]), 300.0); // most recent first
        assert_eq!(co_level(&recent[1]), 200.0);
    }

    #[test]
    fn test_in_memory_evicts_oldest() {
        let history = InMemoryHistory::with_capacity(2);
        for ppm in [100.0, 200.0, 300.0] {
            history.save(&co_record(ppm)).unwrap();
        }
        assert_eq!(history.len(), 2);
        let recent = history.recent(10).unwrap();
        assert_eq!(co_level(&recent[1]), 200.0);
    }

    #[test]
    fn test_trait_object() {
        let sink: Box<dyn ResultSink> = Box::new(InMemoryHistory::new());
        assert_eq!(sink.backend_name(), "InMemory");
        sink.save(&co_record(650.0)).unwrap();
        assert_eq!(sink.recent(10).unwrap().len(), 1);
    }

    #[test]
    fn test_record_json_shape() {
        let record = co_record(550.0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["payload"]["kind"], "co");
        assert_eq!(json["payload"]["result"]["severity"], "MEDIUM");
        assert!(json["createdAt"].is_string());
        let back: HistoryRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), "co");
    }

    #[test]
    fn test_breakdown_summary_names_voltage_range() {
        let reading = crate::breakdown::analyze_breakdown(
            "TR-11",
            crate::types::TransformerClass::A,
            &[61.0, 62.0, 60.0, 63.0, 61.0, 62.0],
            &crate::breakdown::BreakdownThresholds::default(),
        )
        .unwrap();
        let summary = HistoryPayload::Breakdown(reading).summary();
        assert_eq!(summary, "61.5 kV class A (170KV - 400KV): GOOD");
    }

    fn co_level(record: &HistoryRecord) -> f64 {
        match &record.payload {
            HistoryPayload::Co(c) => c.co_level,
            _ => f64::NAN,
        }
    }
}
