//! User-facing notifications: a transient toast, or a blocking alert
//! when toasts are unavailable

use crate::state::forms::NotificationError;
use std::time::{Duration, Instant};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
}

impl NotificationKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Success",
            Self::Error => "Error",
        }
    }
}

/// Anything that can display a notification message
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink {
    fn notify(&mut self, message: &str, kind: NotificationKind) -> Result<(), NotificationError>;
}

/// A notification currently on screen
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at: Instant,
}

impl Notification {
    /// Text shown in the blocking alert
    pub fn alert_text(&self) -> String {
        match self.kind {
            NotificationKind::Error => format!("Error: {}", self.message),
            _ => self.message.clone(),
        }
    }
}

/// Default time a toast stays visible
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

/// Shows at most one toast at a time; a new notification replaces the
/// previous one. With toasts disabled every notification becomes an alert
/// that stays until dismissed.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    toasts_enabled: bool,
    toast_duration: Duration,
    toast: Option<Notification>,
    alert: Option<Notification>,
}

impl NotificationCenter {
    pub fn new(toasts_enabled: bool, toast_duration: Duration) -> Self {
        Self {
            toasts_enabled,
            toast_duration,
            toast: None,
            alert: None,
        }
    }

    pub fn toast(&self) -> Option<&Notification> {
        self.toast.as_ref()
    }

    pub fn alert(&self) -> Option<&Notification> {
        self.alert.as_ref()
    }

    /// An alert blocks all other input until dismissed
    pub fn is_blocking(&self) -> bool {
        self.alert.is_some()
    }

    /// Close the alert if one is open, otherwise the toast.
    /// Returns false when nothing was shown.
    pub fn dismiss(&mut self) -> bool {
        self.alert.take().is_some() || self.toast.take().is_some()
    }

    /// Drop the toast once its display time is over
    pub fn expire(&mut self, now: Instant) {
        let expired = self
            .toast
            .as_ref()
            .is_some_and(|t| now.saturating_duration_since(t.shown_at) >= self.toast_duration);
        if expired {
            self.toast = None;
        }
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(true, DEFAULT_TOAST_DURATION)
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&mut self, message: &str, kind: NotificationKind) -> Result<(), NotificationError> {
        let notification = Notification {
            message: message.to_string(),
            kind,
            shown_at: Instant::now(),
        };
        if self.toasts_enabled {
            tracing::debug!("toast ({}): {}", kind.label(), message);
            self.toast = Some(notification);
        } else {
            tracing::debug!("alert ({}): {}", kind.label(), message);
            self.alert = Some(notification);
        }
        Ok(())
    }
}
