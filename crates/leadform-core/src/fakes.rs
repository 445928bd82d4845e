//! In-memory fakes for the controller's collaborators (testing only)
//!
//! Provides `MemorySender`, `RecordingNotifier` and `FixedClock` that
//! satisfy the trait contracts without any I/O.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Semaphore;

use crate::clock::Clock;
use crate::domain::{BackendError, LeadSubmission};
use crate::notify::{Notification, Notifier};
use crate::sender::{LeadSender, SendResult};

// ---------------------------------------------------------------------------
// MemorySender
// ---------------------------------------------------------------------------

/// Sender that records every submission and replays scripted failures.
///
/// A held sender (see [`MemorySender::held`]) blocks each call until a
/// permit is added to the returned semaphore, which lets tests observe the
/// controller while a send is in flight.
#[derive(Debug, Default)]
pub struct MemorySender {
    received: Mutex<Vec<LeadSubmission>>,
    failures: Mutex<VecDeque<String>>,
    release: Option<Arc<Semaphore>>,
}

impl MemorySender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose next call fails with `reason`.
    pub fn failing_with(reason: &str) -> Self {
        let sender = Self::new();
        sender.fail_next(reason);
        sender
    }

    /// A sender that waits for one permit per call.
    pub fn held() -> (Self, Arc<Semaphore>) {
        let release = Arc::new(Semaphore::new(0));
        let sender = Self {
            release: Some(release.clone()),
            ..Self::default()
        };
        (sender, release)
    }

    /// Queue a failure for a future call.
    pub fn fail_next(&self, reason: &str) {
        self.failures.lock().unwrap().push_back(reason.to_string());
    }

    /// Number of calls made so far, counted on entry.
    pub fn calls(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    pub fn received(&self) -> Vec<LeadSubmission> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl LeadSender for MemorySender {
    async fn submit_lead(&self, record: &LeadSubmission) -> SendResult {
        self.received.lock().unwrap().push(record.clone());

        if let Some(release) = &self.release {
            release
                .acquire()
                .await
                .map_err(|_| BackendError::new("sender closed"))?
                .forget();
        }

        match self.failures.lock().unwrap().pop_front() {
            Some(reason) => Err(BackendError::new(reason)),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingNotifier
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

// ---------------------------------------------------------------------------
// FixedClock
// ---------------------------------------------------------------------------

/// Clock that returns whatever it was last set to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
