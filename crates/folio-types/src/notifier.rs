//! Notifier trait: the shell's only outbound side effect.
//!
//! A notifier delivers a contact message (sender name plus free text) and
//! eventually reports whether delivery succeeded. Transport details live in
//! the implementations (`folio-net`); the shell only sees this contract.

use std::future::Future;
use std::pin::Pin;

/// Future returned by [`Notifier::send`]. Resolves to `true` on delivery.
pub type NotifyFuture = Pin<Box<dyn Future<Output = bool> + Send + 'static>>;

/// Delivers contact messages.
pub trait Notifier: Send + Sync {
    /// Start sending `message` on behalf of `sender`.
    ///
    /// The returned future owns everything it needs, so it can be spawned on
    /// a runtime and outlive the borrow of `self`.
    fn send(&self, sender: &str, message: &str) -> NotifyFuture;
}
