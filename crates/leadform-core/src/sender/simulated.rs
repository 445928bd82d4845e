//! Stand-in backend that waits a fixed delay and accepts everything.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{LeadSender, SendResult};
use crate::domain::LeadSubmission;

/// Delay used by the signup page while the real backend is pending.
pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct SimulatedSender {
    delay: Duration,
}

impl Default for SimulatedSender {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_DELAY)
    }
}

impl SimulatedSender {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl LeadSender for SimulatedSender {
    async fn submit_lead(&self, record: &LeadSubmission) -> SendResult {
        let payload = serde_json::to_string(record).unwrap_or_default();
        debug!(event = "sender.simulated", delay_ms = self.delay.as_millis() as u64, %payload);
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
