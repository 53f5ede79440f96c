//! A terminal session bound to a file tree and a notifier.

use std::sync::Arc;

use tokio::runtime::Handle;

use folio_types::config::{FolioConfig, Theme};
use folio_types::line::{Line, Span};
use folio_types::notifier::Notifier;
use folio_vfs::{FileTree, VPath, is_valid};

use crate::commands::register_builtins;
use crate::completion::{self, Completion};
use crate::interpreter::{CommandOutput, CommandRegistry, Environment};
use crate::outbox::{Delivery, Outbox};
use crate::session::Session;

/// Owns one [`Session`] and everything needed to run commands in it.
///
/// The renderer drives a shell through [`submit`](Self::submit),
/// [`complete`](Self::complete) and the history methods, and reads back
/// [`scrollback`](Self::scrollback), [`prompt`](Self::prompt) and
/// [`input`](Self::input). Notifier outcomes are appended when the host
/// calls [`poll_notifications`](Self::poll_notifications).
pub struct Shell {
    session: Session,
    registry: CommandRegistry,
    tree: Arc<FileTree>,
    theme: Theme,
    host_label: String,
    contact_address: String,
    outbox: Outbox,
}

impl Shell {
    pub fn new(
        tree: Arc<FileTree>,
        config: &FolioConfig,
        notifier: Arc<dyn Notifier>,
        runtime: Handle,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        Self {
            session: Session::new(config.history_limit),
            registry,
            tree,
            theme: config.palette.theme(),
            host_label: config.host_label(),
            contact_address: config.contact_address.clone(),
            outbox: Outbox::new(notifier, runtime, config.notifier.timeout()),
        }
    }

    pub fn scrollback(&self) -> &[Line] {
        self.session.scrollback()
    }

    pub fn input(&self) -> &str {
        self.session.input()
    }

    pub fn cwd(&self) -> &VPath {
        self.session.cwd()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session access for buffer editing. The working directory
    /// stays under the shell's control.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// The prompt shown before the input buffer: `drinor@portfolio:~/info$ `.
    /// The host label is bold.
    pub fn prompt(&self) -> Line {
        let mut line = Line::new();
        line.push(Span::new(format!("{}:", self.host_label), self.theme.prompt).bold());
        line.with(self.session.cwd().prompt_form(), self.theme.path)
            .with("$ ", self.theme.prompt)
    }

    /// The prompt followed by `command`, as echoed into the scrollback.
    pub fn prompt_line(&self, command: &str) -> Line {
        self.prompt().with(command, self.theme.prompt)
    }

    /// Run the input buffer as a command and record it in history.
    pub fn submit(&mut self) {
        let line = self.session.take_input();
        self.session.commit_history(&line);
        self.execute(&line);
    }

    /// Run one command line without touching the input buffer or history.
    pub fn execute(&mut self, line: &str) {
        let command = line.trim();
        if command.is_empty() {
            return;
        }
        // Rendered before dispatch so it shows the directory the command
        // was typed in.
        let echo = self.prompt_line(command);

        let mut env = Environment {
            cwd: self.session.cwd().clone(),
            tree: &self.tree,
            theme: &self.theme,
            contact_address: &self.contact_address,
        };
        let result = self.registry.execute(command, &mut env);
        let new_cwd = env.cwd;

        match result {
            Ok(CommandOutput::Clear) => {
                self.session.clear_scrollback();
                return;
            },
            Ok(CommandOutput::Lines(lines)) => {
                self.session.push_line(echo);
                self.session.extend(lines);
            },
            Ok(CommandOutput::None) => self.session.push_line(echo),
            Ok(CommandOutput::Notify {
                sender,
                message,
                recipient,
            }) => {
                self.session.push_line(echo);
                self.outbox.dispatch(&sender, &message, &recipient);
            },
            Err(e) => {
                self.session.push_line(echo);
                self.session
                    .push_line(Line::plain(e.to_string(), self.theme.error));
            },
        }

        if new_cwd != *self.session.cwd() {
            if is_valid(&self.tree, &new_cwd) && self.tree.directory(&new_cwd).is_some() {
                log::debug!("cwd {} -> {}", self.session.cwd(), new_cwd);
                self.session.set_cwd(new_cwd);
            } else {
                log::warn!("refusing to enter invalid path {new_cwd}");
            }
        }
    }

    /// Complete the input buffer in place, or list the candidates.
    pub fn complete(&mut self) {
        let completion = completion::complete(
            self.session.input(),
            self.session.cwd(),
            &self.tree,
            &self.registry.names(),
        );
        match completion {
            Completion::Replace(text) => self.session.set_input(text),
            Completion::Commands(names) => {
                let echo = self.prompt_line(self.session.input());
                self.session.push_line(echo);
                self.session
                    .push_line(Line::plain(names.join("  "), self.theme.output));
            },
            Completion::Entries(candidates) => {
                let mut listing = Line::new();
                for (i, c) in candidates.iter().enumerate() {
                    if i > 0 {
                        listing = listing.with("  ", self.theme.output);
                    }
                    let color = if c.is_dir {
                        self.theme.directory
                    } else {
                        self.theme.output
                    };
                    listing = listing.with(c.name.as_str(), color);
                }
                self.session.push_line(listing);
            },
            Completion::NoMatch => {},
        }
    }

    pub fn recall_previous(&mut self) {
        self.session.recall_previous();
    }

    pub fn recall_next(&mut self) {
        self.session.recall_next();
    }

    /// Append every notifier outcome that has settled. Returns how many
    /// lines were added.
    pub fn poll_notifications(&mut self) -> usize {
        let mut added = 0;
        while let Some(delivery) = self.outbox.try_recv() {
            self.report(delivery);
            added += 1;
        }
        added
    }

    /// Wait for every in-flight notifier send and append its outcome.
    pub async fn settle(&mut self) {
        while let Some(delivery) = self.outbox.recv().await {
            self.report(delivery);
        }
    }

    /// Sends still waiting on the notifier.
    pub fn pending_notifications(&self) -> usize {
        self.outbox.in_flight()
    }

    /// Abort every pending send without reporting it.
    pub fn cancel_notifications(&mut self) {
        self.outbox.cancel_all();
    }

    fn report(&mut self, delivery: Delivery) {
        let line = match delivery.outcome {
            Ok(()) => Line::plain(
                format!("Message sent to {}.", delivery.recipient),
                self.theme.output,
            ),
            Err(e) => Line::plain(e.to_string(), self.theme.error),
        };
        self.session.push_line(line);
    }
}
