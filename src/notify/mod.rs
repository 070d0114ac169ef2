use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => f.write_str("info"),
            Level::Success => f.write_str("success"),
            Level::Error => f.write_str("error"),
        }
    }
}

/// A message the presentation layer shows as a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub level: Level,
}

/// Receives fire-and-forget notifications from the core.
pub trait Notifier {
    fn notify(&mut self, message: &str, level: Level);
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, message: &str, level: Level) {
        (**self).notify(message, level)
    }
}

/// Buffers notifications until the presentation layer drains them.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    notifications: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Takes every buffered notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str, level: Level) {
        self.notifications.push(Notification {
            message: message.to_string(),
            level,
        });
    }
}

/// Forwards notifications to `tracing`, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, message: &str, level: Level) {
        match level {
            Level::Error => tracing::error!(%level, "{}", message),
            _ => tracing::info!(%level, "{}", message),
        }
    }
}
