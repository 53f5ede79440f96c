//! Virtual file tree for the folio terminal.
//!
//! The tree is built once at startup (from the built-in portfolio or a TOML
//! file) and never mutated. Paths are sequences of segment names from the
//! root; [`resolve`] turns user input into a [`VPath`].

pub mod path;
pub mod tree;

pub use path::{HOME, SEPARATOR, VPath, is_valid, resolve};
pub use tree::{Directory, Entry, FileTree, HIDDEN_MARKER, is_hidden};
