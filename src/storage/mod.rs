//! Result History and Notification
//!
//! Collaborators the CLI injects around the engine: the engine itself never
//! stores or notifies.
//!
//! - `ResultSink` with `InMemoryHistory` and `SledHistory`
//! - `Notifier` with `TracingNotifier`

pub mod history;
pub mod notify;
pub mod persistence;

pub use history::SledHistory;
pub use notify::{Notifier, NotifyLevel, TracingNotifier};
pub use persistence::{HistoryPayload, HistoryRecord, InMemoryHistory, ResultSink, StorageError};

/// Save a record and notify about it.
///
/// DGA results notify at their severity; other kinds notify at info level.
pub fn save_and_notify(
    sink: &dyn ResultSink,
    notifier: &dyn Notifier,
    record: &HistoryRecord,
) -> Result<(), StorageError> {
    sink.save(record)?;

    let level = record.payload.severity().map_or(NotifyLevel::Info, NotifyLevel::from);
    let subject = if record.header.id_trafo.is_empty() {
        String::new()
    } else {
        format!(" for {}", record.header.id_trafo)
    };
    notifier.notify(
        level,
        &format!(
            "Saved {} result{subject} to {}: {}",
            record.kind(),
            sink.backend_name(),
            record.payload.summary()
        ),
    );
    Ok(())
}
