//! editor
//!
//! Raw-mode line editing with command-name completion.
//!
//! # Architecture
//!
//! [`LineEditor`] is a pure state machine: it takes decoded [`Key`]s and
//! writes terminal output to any `Write`. The [`terminal`] module supplies
//! keys from the real terminal inside a raw-mode guard, so the same editor
//! runs unchanged under test with an in-memory writer.
//!
//! # Rendering
//!
//! Raw mode does no echo and no newline translation, so the editor echoes
//! every change itself, moves the cursor left with `\x08`, and ends lines
//! with `\r\n`.

mod buffer;
mod complete;
pub mod terminal;

pub use buffer::LineBuffer;
pub use complete::{complete, longest_common_prefix, Completion};

use std::io::{self, Write};

use thiserror::Error;

const BACK: char = '\x08';
const NEWLINE: &str = "\r\n";

/// Errors from the terminal while editing.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// A decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    Tab,
    /// Ctrl+C
    Interrupt,
    /// Ctrl+D
    EndOfInput,
    /// Anything the editor does not act on.
    Ignored,
}

/// What happened after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Keep reading keys.
    Continue,
    /// Enter was pressed; the submitted line.
    Submit(String),
    /// The interrupt key was pressed.
    Interrupt,
    /// End of input on an empty line.
    EndOfInput,
}

/// Lines submitted during this session, oldest first. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `line`, skipping blanks and immediate repeats.
    pub fn push(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || self.entries.last().map(String::as_str) == Some(line) {
            return;
        }
        self.entries.push(line.to_string());
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Edits one line.
pub struct LineEditor<'a, W: Write> {
    out: W,
    prompt: &'a str,
    names: &'a [String],
    history: &'a History,
    buffer: LineBuffer,
    /// Position while walking history; `None` when editing a fresh line.
    recall: Option<usize>,
    /// The fresh line, kept while walking history.
    draft: String,
}

impl<'a, W: Write> LineEditor<'a, W> {
    /// `names` are the completion candidates.
    pub fn new(out: W, prompt: &'a str, names: &'a [String], history: &'a History) -> Self {
        Self {
            out,
            prompt,
            names,
            history,
            buffer: LineBuffer::new(),
            recall: None,
            draft: String::new(),
        }
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    /// Print the prompt.
    pub fn start(&mut self) -> io::Result<()> {
        write!(self.out, "{}", self.prompt)?;
        self.out.flush()
    }

    /// Apply one key.
    pub fn feed(&mut self, key: Key) -> io::Result<Step> {
        let step = match key {
            Key::Char(c) => {
                self.insert(c)?;
                Step::Continue
            }
            Key::Enter => {
                write!(self.out, "{}", NEWLINE)?;
                Step::Submit(self.buffer.as_string())
            }
            Key::Backspace => {
                self.backspace()?;
                Step::Continue
            }
            Key::Left => {
                if self.buffer.move_left() {
                    write!(self.out, "{}", BACK)?;
                }
                Step::Continue
            }
            Key::Right => {
                if let Some(c) = self.buffer.current() {
                    self.buffer.move_right();
                    write!(self.out, "{}", c)?;
                }
                Step::Continue
            }
            Key::Up => {
                self.recall_previous()?;
                Step::Continue
            }
            Key::Down => {
                self.recall_next()?;
                Step::Continue
            }
            Key::Tab => {
                self.complete()?;
                Step::Continue
            }
            Key::Interrupt => {
                write!(self.out, "{}", NEWLINE)?;
                Step::Interrupt
            }
            Key::EndOfInput if self.buffer.is_empty() => {
                write!(self.out, "{}", NEWLINE)?;
                Step::EndOfInput
            }
            Key::EndOfInput | Key::Ignored => Step::Continue,
        };
        self.out.flush()?;
        Ok(step)
    }

    fn insert(&mut self, c: char) -> io::Result<()> {
        let tail = self.buffer.tail();
        self.buffer.insert(c);
        write!(self.out, "{}{}", c, tail)?;
        self.back(tail.chars().count())
    }

    fn backspace(&mut self) -> io::Result<()> {
        if !self.buffer.backspace() {
            return Ok(());
        }
        let tail = self.buffer.tail();
        write!(self.out, "{}{} ", BACK, tail)?;
        self.back(tail.chars().count() + 1)
    }

    fn back(&mut self, count: usize) -> io::Result<()> {
        for _ in 0..count {
            write!(self.out, "{}", BACK)?;
        }
        Ok(())
    }

    fn complete(&mut self) -> io::Result<()> {
        match complete(&self.buffer, self.names.iter().map(String::as_str)) {
            Completion::Nothing => Ok(()),
            Completion::Unique { rest } => {
                self.buffer.insert_str(&rest);
                write!(self.out, "{}", rest)
            }
            Completion::Ambiguous {
                candidates,
                extension,
            } => {
                write!(self.out, "{}", NEWLINE)?;
                for candidate in &candidates {
                    write!(self.out, "{}{}", candidate, NEWLINE)?;
                }
                self.buffer.insert_str(&extension);
                write!(self.out, "{}{}", self.prompt, self.buffer.as_string())
            }
        }
    }

    fn recall_previous(&mut self) -> io::Result<()> {
        let index = match self.recall {
            Some(0) => return Ok(()),
            Some(i) => i - 1,
            None if self.history.is_empty() => return Ok(()),
            None => {
                self.draft = self.buffer.as_string();
                self.history.len() - 1
            }
        };
        self.recall = Some(index);
        let line = self.history.get(index).unwrap_or_default().to_string();
        self.replace_line(&line)
    }

    fn recall_next(&mut self) -> io::Result<()> {
        let Some(index) = self.recall else {
            return Ok(());
        };
        let line = if index + 1 < self.history.len() {
            self.recall = Some(index + 1);
            self.history.get(index + 1).unwrap_or_default().to_string()
        } else {
            self.recall = None;
            std::mem::take(&mut self.draft)
        };
        self.replace_line(&line)
    }

    fn replace_line(&mut self, line: &str) -> io::Result<()> {
        let old_len = self.buffer.len();
        self.buffer.set(line);
        write!(self.out, "\r{}{}", self.prompt, line)?;
        let new_len = self.buffer.len();
        if old_len > new_len {
            let pad = old_len - new_len;
            write!(self.out, "{}", " ".repeat(pad))?;
            self.back(pad)?;
        }
        Ok(())
    }
}
