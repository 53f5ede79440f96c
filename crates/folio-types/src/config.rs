//! Terminal configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::color::{Color, parse_hex_color};
use crate::error::{FolioError, Result};

/// Top-level configuration for a folio terminal.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Host name shown in the prompt (`<hostname>@portfolio`).
    pub hostname: String,
    /// The only recipient `echo ... > <address>` will deliver to.
    pub contact_address: String,
    /// Maximum number of history entries to retain.
    pub history_limit: usize,
    /// Optional TOML file describing the virtual file tree.
    pub tree_path: Option<PathBuf>,
    pub notifier: NotifierConfig,
    pub palette: Palette,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            hostname: "drinor".to_string(),
            contact_address: "hello@drinor.dev".to_string(),
            history_limit: 100,
            tree_path: None,
            notifier: NotifierConfig::default(),
            palette: Palette::default(),
        }
    }
}

impl FolioConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        // A relative tree path is relative to the config file, not the cwd.
        if let Some(tree) = config.tree_path.as_mut()
            && tree.is_relative()
            && let Some(dir) = path.parent()
        {
            *tree = dir.join(&*tree);
        }
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Label shown before the prompt path, e.g. `drinor@portfolio`.
    pub fn host_label(&self) -> String {
        format!("{}@portfolio", self.hostname)
    }

    fn validate(&self) -> Result<()> {
        if self.hostname.trim().is_empty() {
            return Err(FolioError::Config("hostname must not be empty".into()));
        }
        if self.contact_address.chars().any(char::is_whitespace) || self.contact_address.is_empty()
        {
            return Err(FolioError::Config(format!(
                "invalid contact_address: {:?}",
                self.contact_address
            )));
        }
        if self.history_limit == 0 {
            return Err(FolioError::Config("history_limit must be at least 1".into()));
        }
        Ok(())
    }
}

/// Where and how contact messages are delivered.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// HTTP endpoint accepting `{"name", "message"}` JSON. `None` disables
    /// delivery: every send reports failure.
    pub endpoint: Option<String>,
    /// Upper bound on a single send, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: 5_000,
        }
    }
}

impl NotifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Terminal color scheme. Colors are hex strings (`#RRGGBB[AA]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Host label and command text in prompt lines.
    pub prompt: String,
    /// Path portion of the prompt.
    pub path: String,
    /// File contents and plain output.
    pub output: String,
    /// Error and status messages.
    pub error: String,
    /// Directory names in listings.
    pub directory: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            prompt: "#00FF00".to_string(),
            path: "#3B82F6".to_string(),
            output: "#FFFFFF".to_string(),
            error: "#00FF00".to_string(),
            directory: "#3B82F6".to_string(),
        }
    }
}

impl Palette {
    pub fn prompt_color(&self) -> Color {
        parse_hex_color(&self.prompt).unwrap_or(Color::TERMINAL_GREEN)
    }

    pub fn path_color(&self) -> Color {
        parse_hex_color(&self.path).unwrap_or(Color::PATH_BLUE)
    }

    pub fn output_color(&self) -> Color {
        parse_hex_color(&self.output).unwrap_or(Color::WHITE)
    }

    pub fn error_color(&self) -> Color {
        parse_hex_color(&self.error).unwrap_or(Color::TERMINAL_GREEN)
    }

    pub fn directory_color(&self) -> Color {
        parse_hex_color(&self.directory).unwrap_or(Color::PATH_BLUE)
    }

    /// Resolve every palette entry to a `Color`.
    pub fn theme(&self) -> Theme {
        Theme {
            prompt: self.prompt_color(),
            path: self.path_color(),
            output: self.output_color(),
            error: self.error_color(),
            directory: self.directory_color(),
        }
    }
}

/// Resolved terminal colors, ready for styling lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub prompt: Color,
    pub path: Color,
    pub output: Color,
    pub error: Color,
    pub directory: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Palette::default().theme()
    }
}
