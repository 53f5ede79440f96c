//! Command interpreter and terminal session.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name. A [`Shell`] owns one session:
//! it echoes prompt lines, dispatches through the registry, applies signals
//! (`Clear`, `Notify`) and collects notifier outcomes from its outbox.

mod commands;
pub mod completion;
pub mod echo;
mod interpreter;
pub mod outbox;
pub mod session;
mod shell;

/// Register the built-in portfolio commands into a registry.
pub use commands::register_builtins;
/// Result of a completion request.
pub use completion::{Candidate, Completion};
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (lines or signals).
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Context passed to every command.
pub use interpreter::Environment;
/// A tokenized command line.
pub use interpreter::Invocation;
/// Per-user terminal state.
pub use session::Session;
/// A terminal session bound to a file tree and a notifier.
pub use shell::Shell;
