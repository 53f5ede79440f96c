//! Notifier implementations.
//!
//! [`HttpNotifier`] posts contact messages to a relay endpoint.
//! [`DisabledNotifier`] stands in when no endpoint is configured.

mod http;

pub use http::{ContactPayload, HttpNotifier};

use std::sync::Arc;

use folio_types::config::NotifierConfig;
use folio_types::error::Result;
use folio_types::notifier::{Notifier, NotifyFuture};

/// A notifier that never delivers.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn send(&self, sender: &str, _message: &str) -> NotifyFuture {
        log::warn!("Message from {sender} dropped: no notifier endpoint configured");
        Box::pin(async { false })
    }
}

/// Build the notifier described by `config`.
pub fn notifier_from_config(config: &NotifierConfig) -> Result<Arc<dyn Notifier>> {
    match config.endpoint.as_deref() {
        Some(endpoint) => {
            log::info!("Contact messages go to {endpoint}");
            Ok(Arc::new(HttpNotifier::new(endpoint, config.timeout())?))
        },
        None => Ok(Arc::new(DisabledNotifier)),
    }
}
