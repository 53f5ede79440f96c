//! Keyboard handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use folio_terminal::Shell;

/// Result of handling a single key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Apply one key press to the shell.
pub fn handle_key(key: &KeyEvent, shell: &mut Shell) -> InputResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return InputResult::Quit,
        KeyCode::Char('c') if ctrl => return InputResult::Quit,
        KeyCode::Enter => shell.submit(),
        KeyCode::Tab => shell.complete(),
        KeyCode::Up => shell.recall_previous(),
        KeyCode::Down => shell.recall_next(),
        KeyCode::Backspace => shell.session_mut().backspace(),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            shell.session_mut().push_char(c);
        },
        _ => {},
    }
    InputResult::Continue
}
