//! # Notifications
//!
//! User-visible messages emitted by the cart engine (toasts in the views).
//!
//! ```text
//! CartEngine ──notify()──► Notifier
//!                            ├── TracingNotifier  (log only)
//!                            └── NotificationLog  (collected, handed to the view)
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NotificationLevel {
    /// An item was added or its quantity changed.
    Success,
    /// Neutral confirmation (removed, cleared).
    Info,
    /// A mutation was rejected.
    Error,
}

/// A message for the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Notification {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notification::new(NotificationLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notification::new(NotificationLevel::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification::new(NotificationLevel::Error, message)
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Sink for engine notifications.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the tracing log and nowhere else.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => warn!(message = %notification.message, "cart notification"),
            _ => info!(message = %notification.message, "cart notification"),
        }
    }
}

/// Collects notifications until the caller drains them.
///
/// Clones share the same buffer, so a view can keep one handle while the
/// engine owns another.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the buffered notifications without removing them.
    pub fn entries(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns everything buffered so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// The most recent notification, if any.
    pub fn last(&self) -> Option<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_shares_buffer_between_clones() {
        let log = NotificationLog::new();
        let handle = log.clone();

        log.notify(Notification::success("Added Mug to cart (quantity 1)"));
        log.notify(Notification::error("Only 5 of Mug available in stock"));

        assert_eq!(handle.entries().len(), 2);
        assert!(handle.last().is_some_and(|n| n.is_error()));

        let drained = handle.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, NotificationLevel::Success);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_level_serializes_snake_case() {
        let json = serde_json::to_string(&Notification::info("Cart cleared")).unwrap();
        assert_eq!(json, r#"{"level":"info","message":"Cart cleared"}"#);
    }
}
