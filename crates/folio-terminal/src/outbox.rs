//! In-flight notifier sends.
//!
//! Each `echo` delivery runs as its own tokio task bounded by a timeout.
//! Outcomes come back over a channel so the shell can append them on its own
//! thread, between commands.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use folio_types::error::{FolioError, Result};
use folio_types::notifier::Notifier;

/// The settled outcome of one send.
#[derive(Debug)]
pub struct Delivery {
    pub sender: String,
    pub recipient: String,
    pub outcome: Result<()>,
}

/// Spawns notifier sends and collects their outcomes.
pub struct Outbox {
    notifier: Arc<dyn Notifier>,
    runtime: Handle,
    timeout: Duration,
    tx: mpsc::UnboundedSender<Delivery>,
    rx: mpsc::UnboundedReceiver<Delivery>,
    tasks: Vec<AbortHandle>,
    in_flight: usize,
}

impl Outbox {
    pub fn new(notifier: Arc<dyn Notifier>, runtime: Handle, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            notifier,
            runtime,
            timeout,
            tx,
            rx,
            tasks: Vec::new(),
            in_flight: 0,
        }
    }

    /// Start delivering `message`. The outcome is reported exactly once
    /// through [`try_recv`](Self::try_recv) or [`recv`](Self::recv).
    pub fn dispatch(&mut self, sender: &str, message: &str, recipient: &str) {
        log::info!("dispatching message from {sender} to {recipient}");
        let send = self.notifier.send(sender, message);
        let tx = self.tx.clone();
        let timeout = self.timeout;
        let sender = sender.to_string();
        let recipient = recipient.to_string();

        // The send runs in its own task so a panicking notifier still ends in
        // a reported failure.
        let attempt = self.runtime.spawn(tokio::time::timeout(timeout, send));
        let abort_attempt = attempt.abort_handle();

        let task = self.runtime.spawn(async move {
            let outcome = match attempt.await {
                Ok(Ok(true)) => Ok(()),
                Ok(Ok(false)) => {
                    log::warn!("notifier reported failure for message from {sender}");
                    Err(FolioError::NotifierFailure("delivery failed".into()))
                },
                Err(e) => {
                    log::warn!("notifier task for message from {sender} failed: {e}");
                    Err(FolioError::NotifierFailure("delivery failed".into()))
                },
                Ok(Err(_)) => {
                    log::warn!(
                        "notifier timed out after {}ms for message from {sender}",
                        timeout.as_millis()
                    );
                    Err(FolioError::NotifierFailure(format!(
                        "timed out after {}ms",
                        timeout.as_millis()
                    )))
                },
            };
            // Fails only after cancel_all swapped the channel.
            let _ = tx.send(Delivery {
                sender,
                recipient,
                outcome,
            });
        });

        self.tasks.retain(|t| !t.is_finished());
        self.tasks.push(task.abort_handle());
        self.tasks.push(abort_attempt);
        self.in_flight += 1;
    }

    /// A settled outcome, if one is ready.
    pub fn try_recv(&mut self) -> Option<Delivery> {
        let delivery = self.rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(delivery)
    }

    /// Wait for the next outcome. Returns `None` once nothing is in flight.
    pub async fn recv(&mut self) -> Option<Delivery> {
        if self.in_flight == 0 {
            return None;
        }
        let delivery = self.rx.recv().await?;
        self.in_flight -= 1;
        Some(delivery)
    }

    /// Sends dispatched but not yet collected.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Abort every pending send. Their outcomes are never reported.
    pub fn cancel_all(&mut self) {
        let pending = self.tasks.iter().filter(|t| !t.is_finished()).count();
        if pending > 0 {
            log::debug!("cancelling {pending} pending notifier task(s)");
        }
        for task in self.tasks.drain(..) {
            task.abort();
        }
        // A task past its abort point may still be sending; give it a dead
        // channel rather than draining the live one.
        let (tx, rx) = mpsc::unbounded_channel();
        self.tx = tx;
        self.rx = rx;
        self.in_flight = 0;
    }
}

impl Drop for Outbox {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
