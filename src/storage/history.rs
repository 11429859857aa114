//! Analysis History Storage
//!
//! Persists `HistoryRecord`s to Sled DB for later listing and reporting.
//! Keys are creation time (nanoseconds, big-endian) followed by the record
//! UUID, so iteration order is chronological and keys never collide. A second
//! tree maps record id to primary key for lookups.

use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use super::persistence::{HistoryRecord, ResultSink, StorageError};

const BY_ID_TREE: &str = "by_id";

/// Sled-backed history of saved analyses
#[derive(Clone)]
pub struct SledHistory {
    db: Arc<sled::Db>,
    by_id: sled::Tree,
}

impl SledHistory {
    /// Open or create the history database at the given directory
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path_ref = path.as_ref();
        let db = sled::open(path_ref)?;
        let by_id = db.open_tree(BY_ID_TREE)?;

        tracing::info!(path = %path_ref.display(), records = db.len(), "History storage opened");

        Ok(Self {
            db: Arc::new(db),
            by_id,
        })
    }

    fn key_for(record: &HistoryRecord) -> Vec<u8> {
        let nanos = record
            .created_at
            .timestamp_nanos_opt()
            .unwrap_or_else(|| record.created_at.timestamp().saturating_mul(1_000_000_000));
        // Pre-1970 timestamps clamp to the start of the keyspace
        let ts = u64::try_from(nanos).unwrap_or(0);

        let mut key = Vec::with_capacity(24);
        key.extend_from_slice(&ts.to_be_bytes());
        key.extend_from_slice(record.id.as_bytes());
        key
    }

    /// Total number of stored records
    pub fn count(&self) -> usize {
        self.db.len()
    }

    /// Database size in bytes
    pub fn size_bytes(&self) -> u64 {
        self.db.size_on_disk().unwrap_or(0)
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        self.by_id.flush()?;
        Ok(())
    }

    /// Delete records created before the cutoff; returns how many were removed.
    pub fn cleanup_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StorageError> {
        let cutoff_ts = cutoff
            .timestamp_nanos_opt()
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0);
        let cutoff_key = cutoff_ts.to_be_bytes();

        let expired: Vec<(sled::IVec, sled::IVec)> = self
            .db
            .range(..cutoff_key.as_slice())
            .collect::<Result<_, _>>()?;

        let mut deleted = 0;
        for (key, value) in expired {
            if let Ok(record) = serde_json::from_slice::<HistoryRecord>(&value) {
                self.by_id.remove(record.id.as_bytes())?;
            }
            self.db.remove(key)?;
            deleted += 1;
        }

        if deleted > 0 {
            self.flush()?;
            tracing::info!(deleted, "History cleanup complete");
        }
        Ok(deleted)
    }
}

impl ResultSink for SledHistory {
    fn save(&self, record: &HistoryRecord) -> Result<(), StorageError> {
        let key = Self::key_for(record);
        let value = serde_json::to_vec(record)?;

        self.db.insert(key.as_slice(), value)?;
        self.by_id.insert(record.id.as_bytes(), key)?;
        self.flush()?;

        tracing::debug!(id = %record.id, kind = record.kind(), "History record stored");
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, StorageError> {
        let mut records = Vec::with_capacity(limit.min(self.count()));

        // Newest first due to big-endian timestamp keys
        for item in self.db.iter().rev() {
            if records.len() >= limit {
                break;
            }
            let (_key, value) = item?;
            match serde_json::from_slice::<HistoryRecord>(&value) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(error = %e, "Skipping unreadable history record"),
            }
        }

        Ok(records)
    }

    fn get(&self, id: Uuid) -> Result<Option<HistoryRecord>, StorageError> {
        let Some(key) = self.by_id.get(id.as_bytes())? else {
            return Ok(None);
        };
        match self.db.get(key)? {
            Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }

    fn backend_name(&self) -> &'static str {
        "Sled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::co_analysis::analyze_co_level;
    use crate::storage::HistoryPayload;
    use crate::types::ReportHeader;
    use chrono::TimeZone;

    fn record_at(secs: i64, ppm: f64) -> HistoryRecord {
        let mut record =
            HistoryRecord::new(ReportHeader::default(), HistoryPayload::Co(analyze_co_level(ppm)));
        record.created_at = Utc.timestamp_opt(secs, 0).unwrap();
        record
    }

    #[test]
    fn test_storage_open() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = SledHistory::open(temp_dir.path().join("history")).unwrap();
        assert_eq!(storage.count(), 0);
        assert_eq!(storage.backend_name(), "Sled");
    }

    #[test]
    fn test_chronological_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = SledHistory::open(temp_dir.path().join("history")).unwrap();

        // Store out of order
        storage.save(&record_at(3000, 300.0)).unwrap();
        storage.save(&record_at(1000, 100.0)).unwrap();
        storage.save(&record_at(2000, 200.0)).unwrap();

        let history = storage.recent(10).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].created_at.timestamp(), 3000); // Newest
        assert_eq!(history[2].created_at.timestamp(), 1000); // Oldest
        assert!(storage.size_bytes() > 0);
    }

    #[test]
    fn test_same_instant_does_not_collide() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = SledHistory::open(temp_dir.path().join("history")).unwrap();
        storage.save(&record_at(1000, 100.0)).unwrap();
        storage.save(&record_at(1000, 200.0)).unwrap();
        assert_eq!(storage.count(), 2);
    }

    #[test]
    fn test_get_by_id() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = SledHistory::open(temp_dir.path().join("history")).unwrap();
        let record = record_at(1500, 550.0);
        storage.save(&record).unwrap();

        assert_eq!(storage.get(record.id).unwrap(), Some(record));
        assert!(storage.get(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_cleanup() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = SledHistory::open(temp_dir.path().join("history")).unwrap();

        let old = record_at(100, 10.0);
        storage.save(&old).unwrap();
        storage.save(&record_at(200, 20.0)).unwrap();
        storage.save(&record_at(300, 30.0)).unwrap();

        let deleted = storage.cleanup_before(Utc.timestamp_opt(250, 0).unwrap()).unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(storage.count(), 1);
        assert!(storage.get(old.id).unwrap().is_none());
    }
}
