//! HTTP contact relay client.
//!
//! Posts `{"name": ..., "message": ...}` as JSON. Any 2xx answer counts as
//! delivered; everything else, including transport errors, is a failure.

use std::time::Duration;

use serde::Serialize;

use folio_types::error::{FolioError, Result};
use folio_types::notifier::{Notifier, NotifyFuture};

/// Request body accepted by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    pub name: String,
    pub message: String,
}

/// Delivers contact messages by POSTing them to a relay endpoint.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpNotifier {
    /// Create a notifier for `endpoint`. `timeout` bounds each request.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FolioError::Config(format!("http client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Notifier for HttpNotifier {
    fn send(&self, sender: &str, message: &str) -> NotifyFuture {
        let payload = ContactPayload {
            name: sender.to_string(),
            message: message.to_string(),
        };
        let request = self.client.post(&self.endpoint).json(&payload);
        let endpoint = self.endpoint.clone();
        Box::pin(async move {
            match request.send().await {
                Ok(resp) if resp.status().is_success() => {
                    log::debug!("Relay {endpoint} accepted message ({})", resp.status());
                    true
                },
                Ok(resp) => {
                    log::warn!("Relay {endpoint} rejected message: {}", resp.status());
                    false
                },
                Err(e) => {
                    log::warn!("Relay {endpoint} unreachable: {e}");
                    false
                },
            }
        })
    }
}
