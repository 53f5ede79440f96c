//! Draw the shell into the terminal.
//!
//! The whole screen is redrawn on every change: the tail of the scrollback
//! fills the rows above, the prompt and input buffer sit on the last row.

use std::io::Write;

use anyhow::Result;
use crossterm::cursor::{MoveTo, Show};
use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor,
};
use crossterm::terminal::{self, Clear, ClearType};

use folio_terminal::Shell;
use folio_types::color::Color;
use folio_types::line::{Line, Span};

/// Convert a folio color to a 24-bit terminal color. Alpha is ignored.
pub fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Split lines at embedded newlines into screen rows, keeping span styles.
pub fn screen_rows(lines: &[Line]) -> Vec<Line> {
    let mut rows = Vec::new();
    for line in lines {
        let mut row = Line::new();
        for span in &line.spans {
            let mut parts = span.text.split('\n');
            if let Some(first) = parts.next() {
                push_part(&mut row, span, first);
            }
            for part in parts {
                rows.push(std::mem::take(&mut row));
                push_part(&mut row, span, part);
            }
        }
        rows.push(row);
    }
    rows
}

fn push_part(row: &mut Line, span: &Span, text: &str) {
    if text.is_empty() {
        return;
    }
    row.push(Span {
        text: text.to_string(),
        ..span.clone()
    });
}

/// Redraw the whole screen.
pub fn draw(out: &mut impl Write, shell: &Shell) -> Result<()> {
    let (width, height) = terminal::size()?;
    let width = usize::from(width);
    let body_rows = usize::from(height.saturating_sub(1));

    queue!(out, Clear(ClearType::All))?;

    let rows = screen_rows(shell.scrollback());
    let visible = &rows[rows.len().saturating_sub(body_rows)..];
    for (y, row) in visible.iter().enumerate() {
        queue!(out, MoveTo(0, y as u16))?;
        print_spans(out, row.spans.iter(), width)?;
    }

    let prompt_row = visible.len() as u16;
    let input = Span::new(shell.input(), shell.theme().output);
    let prompt = shell.prompt();
    queue!(out, MoveTo(0, prompt_row))?;
    let used = print_spans(out, prompt.spans.iter().chain([&input]), width)?;

    queue!(out, MoveTo(used.min(width.saturating_sub(1)) as u16, prompt_row), Show)?;
    out.flush()?;
    Ok(())
}

/// Print spans left to right, cutting off at `width` columns. Returns the
/// number of columns used.
fn print_spans<'a>(
    out: &mut impl Write,
    spans: impl Iterator<Item = &'a Span>,
    width: usize,
) -> Result<usize> {
    let mut used = 0;
    for span in spans {
        if used >= width {
            break;
        }
        let text: String = span.text.chars().take(width - used).collect();
        used += text.chars().count();
        queue!(out, SetForegroundColor(term_color(span.color)))?;
        if span.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)?;
    }
    Ok(used)
}
