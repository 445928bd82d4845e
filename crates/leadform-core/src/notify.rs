//! Notification sink for submission outcomes.
//!
//! The controller reports each resolved attempt through a [`Notifier`];
//! rendering (toasts, banners, terminal output) is up to the implementor.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A user-facing outcome message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Fire-and-forget outcome sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that only writes notifications to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => info!(
                event = "notify.success",
                title = %notification.title,
                description = %notification.description,
            ),
            NotificationKind::Error => warn!(
                event = "notify.error",
                title = %notification.title,
                description = %notification.description,
            ),
        }
    }
}

/// Message texts used by the controller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationTemplates {
    pub success_title: String,
    pub success_description: String,
    pub failure_title: String,
    /// Shown when the backend reason is not whitelisted.
    pub failure_description: String,
    /// Backend reasons considered safe to display verbatim.
    pub shown_reasons: Vec<String>,
}

impl Default for NotificationTemplates {
    fn default() -> Self {
        Self {
            success_title: "Thank you for your interest!".to_string(),
            success_description:
                "We have received your information and will get back to you within 24 hours."
                    .to_string(),
            failure_title: "Submission failed".to_string(),
            failure_description:
                "We could not send your information. Please try again in a moment.".to_string(),
            shown_reasons: Vec::new(),
        }
    }
}

impl NotificationTemplates {
    /// Allow a backend reason to be displayed verbatim.
    pub fn with_shown_reason(mut self, reason: impl Into<String>) -> Self {
        self.shown_reasons.push(reason.into());
        self
    }

    pub fn success(&self) -> Notification {
        Notification::success(&self.success_title, &self.success_description)
    }

    /// Failure notification for a backend `reason`.
    pub fn failure(&self, reason: &str) -> Notification {
        let description = if self.shown_reasons.iter().any(|r| r == reason) {
            reason.to_string()
        } else {
            self.failure_description.clone()
        };
        Notification::error(&self.failure_title, description)
    }
}
