//! JSON-over-HTTP backend sender.
//!
//! POSTs the [`LeadSubmission`] as JSON to a configured endpoint. Any
//! 2xx response is an acceptance; transport failures, timeouts and other
//! statuses become a [`BackendError`].

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{LeadSender, SendResult};
use crate::domain::{BackendError, LeadSubmission, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP sender configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSenderConfig {
    /// URL that accepts `POST` of a lead record
    pub endpoint: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Optional bearer token
    pub token: Option<String>,
}

impl HttpSenderConfig {
    pub fn new(endpoint: &str) -> Self {
        HttpSenderConfig {
            endpoint: endpoint.to_string(),
            timeout: DEFAULT_TIMEOUT,
            token: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}

pub struct HttpSender {
    config: HttpSenderConfig,
    http_client: reqwest::Client,
}

impl HttpSender {
    pub fn new(config: HttpSenderConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("leadform/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(HttpSender {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl LeadSender for HttpSender {
    async fn submit_lead(&self, record: &LeadSubmission) -> SendResult {
        debug!(endpoint = %self.config.endpoint, "posting lead submission");

        let mut request = self.http_client.post(&self.config.endpoint).json(record);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(endpoint = %self.config.endpoint, error = %e, "lead submission request failed");
            if e.is_timeout() {
                BackendError::new("request timed out")
            } else {
                BackendError::new(format!("network error: {e}"))
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::new(format!("server responded with {status}")))
        }
    }
}
