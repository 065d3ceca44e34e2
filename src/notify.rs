//! Notification sink
//!
//! User-facing toasts. The core fires a notification for every committed
//! mutation and every rejection and never waits on the result.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

pub trait Notifier {
    fn notify(&mut self, kind: NotificationKind, message: &str);
}

/// Writes notifications to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Error => tracing::warn!(kind = "error", "{}", message),
            NotificationKind::Success => tracing::info!(kind = "success", "{}", message),
            NotificationKind::Info => tracing::info!(kind = "info", "{}", message),
        }
    }
}

/// Collects notifications until they are drained by the caller.
/// Each one is also logged.
#[derive(Debug, Default, Clone)]
pub struct NotificationBuffer {
    pending: Vec<Notification>,
}

impl NotificationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    /// Take everything collected so far
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub fn last(&self) -> Option<&Notification> {
        self.pending.last()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.pending.iter().filter(|n| n.kind == kind).count()
    }
}

impl Notifier for NotificationBuffer {
    fn notify(&mut self, kind: NotificationKind, message: &str) {
        TracingNotifier.notify(kind, message);
        self.pending.push(Notification {
            kind,
            message: message.to_string(),
        });
    }
}
