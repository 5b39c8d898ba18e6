//! Notification sinks.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use calgrace_core::deletion::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// A notification as seen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub text: String,
}

/// Keeps every notification in memory, in the order they were sent.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the notifications sent so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|notifications| notifications.clone())
            .unwrap_or_default()
    }

    /// Returns the notifications with the given severity.
    pub fn with_severity(&self, severity: Severity) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(|n| n.severity == severity)
            .collect()
    }

    fn record(&self, severity: Severity, title: &str, text: &str) {
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push(Notification {
                severity,
                title: title.to_string(),
                text: text.to_string(),
            });
        }
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, title: &str, text: &str) {
        tracing::debug!(title, text, "Info notification");
        self.record(Severity::Info, title, text);
    }

    fn error(&self, title: &str, text: &str) {
        tracing::debug!(title, text, "Error notification");
        self.record(Severity::Error, title, text);
    }
}
