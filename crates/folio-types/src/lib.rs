//! Foundation types for the folio terminal.
//!
//! Shared by every folio crate: colors, styled output lines, configuration,
//! the error type, and the notifier trait the shell delivers messages through.

pub mod color;
pub mod config;
pub mod error;
pub mod line;
pub mod notifier;
