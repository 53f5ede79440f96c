//! Error types for the folio terminal.

use std::io;

/// Errors produced by the folio terminal.
///
/// The command variants carry the exact text shown to the user; the shell
/// renders them as a single scrollback line.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("cd: no such directory: {0}")]
    PathNotFound(String),

    #[error("cat: {0}: No such file")]
    FileNotFound(String),

    #[error("{0}: command not found")]
    UnknownCommand(String),

    #[error("echo: cannot deliver to {0}")]
    NotifierRejected(String),

    #[error("echo: message not sent ({0})")]
    NotifierFailure(String),

    #[error("usage: echo from:<name> \"<message>\" > <address>")]
    MalformedEchoGrammar,

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_not_found_display() {
        let e = FolioError::PathNotFound("nowhere".into());
        assert_eq!(format!("{e}"), "cd: no such directory: nowhere");
    }

    #[test]
    fn file_not_found_display() {
        let e = FolioError::FileNotFound("about.txt".into());
        assert_eq!(format!("{e}"), "cat: about.txt: No such file");
    }

    #[test]
    fn unknown_command_display() {
        let e = FolioError::UnknownCommand("vim".into());
        assert_eq!(format!("{e}"), "vim: command not found");
    }

    #[test]
    fn notifier_rejected_names_recipient() {
        let e = FolioError::NotifierRejected("wrong@example.com".into());
        assert!(format!("{e}").contains("wrong@example.com"));
    }

    #[test]
    fn notifier_failure_display() {
        let e = FolioError::NotifierFailure("timed out".into());
        assert_eq!(format!("{e}"), "echo: message not sent (timed out)");
    }

    #[test]
    fn malformed_echo_is_usage_line() {
        let msg = format!("{}", FolioError::MalformedEchoGrammar);
        assert!(msg.starts_with("usage: echo from:"));
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: FolioError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: FolioError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn error_is_debug() {
        let e = FolioError::Config("test".into());
        assert!(format!("{e:?}").contains("Config"));
    }
}
