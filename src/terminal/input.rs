//! Hidden key entry in raw mode.

use std::io::{self, Write};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, read};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use zeroize::Zeroizing;

/// Raw mode for the lifetime of the guard. Dropping it restores the terminal
/// and ends the prompt line on stderr.
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = io::stderr().write_all(b"\r\n");
    }
}

/// Outcome of feeding one key press to the line editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStep {
    Continue,
    Submit,
    Abort,
}

/// Apply a key press to `line`. Nothing is echoed, so there is no cursor:
/// edits always happen at the end.
pub fn apply_key(line: &mut Zeroizing<String>, key: KeyEvent) -> KeyStep {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => KeyStep::Abort,
        KeyCode::Char('u') if ctrl => {
            line.clear();
            KeyStep::Continue
        }
        KeyCode::Esc => KeyStep::Abort,
        KeyCode::Enter => KeyStep::Submit,
        KeyCode::Backspace => {
            line.pop();
            KeyStep::Continue
        }
        KeyCode::Char(c) if !ctrl => {
            line.push(c);
            KeyStep::Continue
        }
        _ => KeyStep::Continue,
    }
}

/// Read a line from the terminal without echoing it.
///
/// Returns `Ok(None)` when the user aborts with Esc, Ctrl+C or Ctrl+D.
pub fn read_hidden(prompt: &str) -> io::Result<Option<Zeroizing<String>>> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}: ")?;
    stderr.flush()?;

    let _guard = RawModeGuard::new()?;
    let mut line = Zeroizing::new(String::new());

    loop {
        if let Event::Key(key) = read()? {
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match apply_key(&mut line, key) {
                KeyStep::Continue => {}
                KeyStep::Submit => return Ok(Some(line)),
                KeyStep::Abort => return Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn typing_and_backspace() {
        let mut line = Zeroizing::new(String::new());
        for c in "hunter3".chars() {
            assert_eq!(apply_key(&mut line, key(KeyCode::Char(c))), KeyStep::Continue);
        }
        apply_key(&mut line, key(KeyCode::Backspace));
        apply_key(&mut line, key(KeyCode::Char('2')));
        assert_eq!(line.as_str(), "hunter2");
        assert_eq!(apply_key(&mut line, key(KeyCode::Enter)), KeyStep::Submit);
    }

    #[test]
    fn ctrl_u_clears_and_ctrl_c_aborts() {
        let mut line = Zeroizing::new(String::from("oops"));
        apply_key(&mut line, ctrl('u'));
        assert!(line.is_empty());
        assert_eq!(apply_key(&mut line, ctrl('c')), KeyStep::Abort);
        assert_eq!(apply_key(&mut line, key(KeyCode::Esc)), KeyStep::Abort);
    }

    #[test]
    fn ignores_navigation_and_control_chords() {
        let mut line = Zeroizing::new(String::from("ab"));
        apply_key(&mut line, key(KeyCode::Left));
        apply_key(&mut line, ctrl('x'));
        assert_eq!(line.as_str(), "ab");
    }
}
