//! Notifier trait - operator notification when results are saved

use crate::types::Severity;

/// Urgency of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotifyLevel {
    Info,
    Warning,
    Critical,
}

impl From<Severity> for NotifyLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Low | Severity::Medium => NotifyLevel::Info,
            Severity::High => NotifyLevel::Warning,
            Severity::Critical => NotifyLevel::Critical,
        }
    }
}

/// Trait for notification backends
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotifyLevel, message: &str);
}

/// Emits notifications as tracing events.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        match level {
            NotifyLevel::Info => tracing::info!(notification = true, "{message}"),
            NotifyLevel::Warning => tracing::warn!(notification = true, "{message}"),
            NotifyLevel::Critical => tracing::error!(notification = true, "{message}"),
        }
    }
}
