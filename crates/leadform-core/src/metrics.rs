//! Process-wide submission counters.
//!
//! Each lifecycle outcome has one [`Counter`] slot. Call sites bump a slot
//! with [`Metrics::inc`]; [`Metrics::flush`] logs every slot as one
//! `tracing::info!` event, which the CLI does on exit.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// One slot per lifecycle outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    AttemptsStarted,
    Succeeded,
    Failed,
    ValidationRejected,
    /// `submit` arrived while another attempt was in flight.
    Ignored,
    /// The attempt was dropped or panicked before the sender resolved.
    Interrupted,
}

impl Counter {
    pub const ALL: [Counter; 6] = [
        Counter::AttemptsStarted,
        Counter::Succeeded,
        Counter::Failed,
        Counter::ValidationRejected,
        Counter::Ignored,
        Counter::Interrupted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Counter::AttemptsStarted => "attempts_started",
            Counter::Succeeded => "submissions_succeeded",
            Counter::Failed => "submissions_failed",
            Counter::ValidationRejected => "validation_rejections",
            Counter::Ignored => "submits_ignored",
            Counter::Interrupted => "submits_interrupted",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

pub struct Metrics {
    counts: [AtomicU64; 6],
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            counts: [
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
            ],
        }
    }

    pub fn inc(&self, counter: Counter) {
        self.counts[counter.slot()].fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = counter.name(), "counter incremented");
    }

    pub fn get(&self, counter: Counter) -> u64 {
        self.counts[counter.slot()].load(Ordering::Relaxed)
    }

    /// `name=value` pairs in [`Counter::ALL`] order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for counter in Counter::ALL {
            if !out.is_empty() {
                out.push(' ');
            }
            let _ = write!(out, "{}={}", counter.name(), self.get(counter));
        }
        out
    }

    pub fn flush(&self) {
        tracing::info!(metric = "flush", counters = %self.render());
    }

    /// Zero every slot. Tests only; the CLI never resets.
    pub fn reset(&self) {
        for slot in &self.counts {
            slot.store(0, Ordering::Relaxed);
        }
    }
}
