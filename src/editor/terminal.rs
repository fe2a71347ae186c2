//! editor::terminal
//!
//! Drive a [`LineEditor`] from the real terminal.
//!
//! Raw mode is held by a [`RawModeGuard`] for exactly one line. The guard
//! restores the previous mode when dropped, so every way out of
//! [`read_line`] (submit, end of input, interrupt, an I/O error, a panic)
//! leaves the terminal usable. The interrupt key is reported to the caller
//! rather than ending the process here, which would skip the guard.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use crossterm::tty::IsTty;

use super::{EditorError, History, Key, LineEditor, Step};

/// Raw mode for as long as this value lives.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Whether stdin is an interactive terminal.
pub fn stdin_is_terminal() -> bool {
    io::stdin().is_tty()
}

/// Map a terminal key event onto an editor key.
///
/// Keys that arrive as a single byte (Esc, other control chords) are inserted
/// as that byte. Multi-byte navigation keys the editor has no use for (Home,
/// End, function keys) are ignored.
pub fn key_from_event(event: KeyEvent) -> Key {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Key::Interrupt,
            KeyCode::Char('d') => Key::EndOfInput,
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                Key::Char(char::from(c.to_ascii_lowercase() as u8 & 0x1f))
            }
            _ => Key::Ignored,
        };
    }

    match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Esc => Key::Char('\u{1b}'),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Tab => Key::Tab,
        _ => Key::Ignored,
    }
}

fn read_key() -> io::Result<Key> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                return Ok(key_from_event(key));
            }
        }
    }
}

/// Read one line at `prompt` with completion over `names`.
pub fn read_line(prompt: &str, names: &[String], history: &History) -> Result<Step, EditorError> {
    let mut stdout = io::stdout();
    let _guard = RawModeGuard::acquire()?;

    let mut editor = LineEditor::new(&mut stdout, prompt, names, history);
    editor.start()?;
    loop {
        match editor.feed(read_key()?)? {
            Step::Continue => continue,
            done => return Ok(done),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn control_keys() {
        assert_eq!(
            key_from_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Key::Interrupt
        );
        assert_eq!(
            key_from_event(press(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Key::EndOfInput
        );
        assert_eq!(
            key_from_event(press(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Key::Char('\u{18}')
        );
        assert_eq!(
            key_from_event(press(KeyCode::Char('1'), KeyModifiers::CONTROL)),
            Key::Ignored
        );
    }

    #[test]
    fn plain_keys() {
        assert_eq!(
            key_from_event(press(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Key::Char('G')
        );
        assert_eq!(key_from_event(press(KeyCode::Tab, KeyModifiers::NONE)), Key::Tab);
        assert_eq!(key_from_event(press(KeyCode::Left, KeyModifiers::NONE)), Key::Left);
        assert_eq!(key_from_event(press(KeyCode::Esc, KeyModifiers::NONE)), Key::Char('\u{1b}'));
        assert_eq!(key_from_event(press(KeyCode::Home, KeyModifiers::NONE)), Key::Ignored);
        assert_eq!(key_from_event(press(KeyCode::End, KeyModifiers::NONE)), Key::Ignored);
    }
}
