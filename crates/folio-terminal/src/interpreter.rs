//! Command trait, registry, and dispatch logic.
//!
//! Lines are split on whitespace only: there is no quoting, piping or
//! variable expansion. Commands that need the untouched text after their
//! name (such as `echo`) read [`Invocation::raw_args`].

use folio_types::config::Theme;
use folio_types::error::{FolioError, Result};
use folio_types::line::Line;
use folio_vfs::{FileTree, VPath};

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Lines to append after the prompt line.
    Lines(Vec<Line>),
    /// Command produced no visible output.
    None,
    /// Signal to empty the scrollback. Suppresses the prompt line too.
    Clear,
    /// Signal to hand a contact message to the notifier.
    Notify {
        sender: String,
        message: String,
        recipient: String,
    },
}

impl CommandOutput {
    /// A single line of output.
    pub fn line(line: Line) -> Self {
        CommandOutput::Lines(vec![line])
    }
}

/// Context passed to every command.
pub struct Environment<'a> {
    /// Current working directory. Commands may replace it; the shell
    /// re-validates before committing.
    pub cwd: VPath,
    /// The read-only file tree.
    pub tree: &'a FileTree,
    /// Colors for styling output lines.
    pub theme: &'a Theme,
    /// The only address `echo` may deliver to.
    pub contact_address: &'a str,
}

/// A command line split into name and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// The command name (first token).
    pub name: &'a str,
    /// Remaining whitespace-separated tokens.
    pub args: Vec<&'a str>,
    /// Text after the command name with surrounding whitespace removed and
    /// inner whitespace preserved.
    pub raw_args: &'a str,
}

impl<'a> Invocation<'a> {
    /// Tokenize a line. Returns `None` for blank input.
    pub fn parse(line: &'a str) -> Option<Self> {
        let trimmed = line.trim();
        let mut tokens = trimmed.split_whitespace();
        let name = tokens.next()?;
        let raw_args = trimmed[name.len()..].trim_start();
        Some(Self {
            name,
            args: tokens.collect(),
            raw_args,
        })
    }

    /// Arguments rejoined with single spaces.
    pub fn arg_string(&self) -> String {
        self.args.join(" ")
    }
}

/// A single executable command.
pub trait Command: Send + Sync {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description.
    fn description(&self) -> &str;

    /// Usage string (e.g. "cd \[path\]").
    fn usage(&self) -> &str;

    /// Execute the command.
    fn execute(&self, inv: &Invocation<'_>, env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Registry of available commands with dispatch.
///
/// Commands keep their registration order, which is the order `help` and
/// command-name completion report them in.
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name
    /// in place.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        match self.commands.iter().position(|c| c.name() == cmd.name()) {
            Some(idx) => self.commands[idx] = cmd,
            None => self.commands.push(cmd),
        }
    }

    /// Look up a command by exact name.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// Parse and execute a command line.
    ///
    /// Blank input yields `CommandOutput::None`. Command names are matched
    /// exactly.
    pub fn execute(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(inv) = Invocation::parse(line) else {
            return Ok(CommandOutput::None);
        };

        if inv.name == "help" {
            return Ok(self.execute_help(env.theme));
        }

        match self.get(inv.name) {
            Some(cmd) => {
                log::debug!("dispatch {} ({} args)", inv.name, inv.args.len());
                cmd.execute(&inv, env)
            },
            None => Err(FolioError::UnknownCommand(inv.name.to_string())),
        }
    }

    /// Built-in help with access to the registry.
    fn execute_help(&self, theme: &Theme) -> CommandOutput {
        CommandOutput::line(Line::plain(
            format!("Available commands: {}", self.names().join(", ")),
            theme.prompt,
        ))
    }

    /// Registered command names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// Return a list of (name, description) pairs in registration order.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        self.commands
            .iter()
            .map(|c| (c.name(), c.description()))
            .collect()
    }

    /// Return command names starting with `partial`.
    pub fn completions(&self, partial: &str) -> Vec<&str> {
        self.commands
            .iter()
            .map(|c| c.name())
            .filter(|name| name.starts_with(partial))
            .collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
