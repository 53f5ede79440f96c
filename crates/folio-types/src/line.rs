//! Styled output lines.
//!
//! The scrollback is a sequence of [`Line`]s. Each line is a run of
//! [`Span`]s, so a renderer can color the prompt, the path and the command
//! text independently without parsing markup.

use crate::color::Color;

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub color: Color,
    pub bold: bool,
}

impl Span {
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// One rendered scrollback line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// A line with a single span.
    pub fn plain(text: impl Into<String>, color: Color) -> Self {
        Self {
            spans: vec![Span::new(text, color)],
        }
    }

    /// Append a span (builder style).
    pub fn with(mut self, text: impl Into<String>, color: Color) -> Self {
        self.spans.push(Span::new(text, color));
        self
    }

    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// The unstyled text of the line.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.is_empty())
    }
}
