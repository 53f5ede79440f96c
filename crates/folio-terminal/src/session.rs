//! Per-user terminal state: working directory, scrollback, input buffer and
//! command history.

use std::collections::VecDeque;

use folio_types::line::Line;
use folio_vfs::VPath;

/// Default number of history entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// State for one terminal session.
///
/// The working directory can only be changed by the shell, which validates
/// it against the tree first.
#[derive(Debug, Clone)]
pub struct Session {
    cwd: VPath,
    scrollback: Vec<Line>,
    input: String,
    history: VecDeque<String>,
    /// `None` when not browsing history.
    cursor: Option<usize>,
    history_limit: usize,
}

impl Session {
    /// Start at the root with empty scrollback and history.
    pub fn new(history_limit: usize) -> Self {
        Self {
            cwd: VPath::root(),
            scrollback: Vec::new(),
            input: String::new(),
            history: VecDeque::new(),
            cursor: None,
            history_limit: history_limit.max(1),
        }
    }

    pub fn cwd(&self) -> &VPath {
        &self.cwd
    }

    pub(crate) fn set_cwd(&mut self, cwd: VPath) {
        self.cwd = cwd;
    }

    // -- Scrollback --

    pub fn scrollback(&self) -> &[Line] {
        &self.scrollback
    }

    pub fn push_line(&mut self, line: Line) {
        self.scrollback.push(line);
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = Line>) {
        self.scrollback.extend(lines);
    }

    pub fn clear_scrollback(&mut self) {
        self.scrollback.clear();
    }

    // -- Input buffer --

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Take the buffer, leaving it empty.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    // -- History --

    /// Record a submitted line and stop browsing. Blank lines are skipped.
    pub fn commit_history(&mut self, line: &str) {
        self.cursor = None;
        if line.trim().is_empty() {
            return;
        }
        if self.history.len() >= self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(line.to_string());
    }

    /// Step back through history and load the entry into the buffer.
    pub fn recall_previous(&mut self) {
        let Some(last) = self.history.len().checked_sub(1) else {
            return;
        };
        let idx = match self.cursor {
            None => last,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(idx);
        if let Some(entry) = self.history.get(idx) {
            self.input = entry.clone();
        }
    }

    /// Step forward through history. Past the newest entry the buffer is
    /// cleared and browsing stops.
    pub fn recall_next(&mut self) {
        let Some(i) = self.cursor else {
            return;
        };
        if i + 1 >= self.history.len() {
            self.cursor = None;
            self.input.clear();
            return;
        }
        self.cursor = Some(i + 1);
        if let Some(entry) = self.history.get(i + 1) {
            self.input = entry.clone();
        }
    }

    /// Submitted lines, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.cursor
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
