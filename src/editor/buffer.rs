//! editor::buffer
//!
//! Text being edited plus the cursor position.

/// A line under edit. The cursor always lies in `0..=len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn at_end(&self) -> bool {
        self.cursor == self.chars.len()
    }

    /// Text right of the cursor.
    pub fn tail(&self) -> String {
        self.chars[self.cursor..].iter().collect()
    }

    /// Character under the cursor, if any.
    pub fn current(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }

    /// Insert at the cursor and advance past the new character.
    pub fn insert(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Insert `text` at the cursor.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            self.insert(c);
        }
    }

    /// Delete left of the cursor. Returns `false` at position 0.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    /// Returns `false` at the start of the line.
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Returns `false` at the end of the line.
    pub fn move_right(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Replace the whole line, cursor at the end.
    pub fn set(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}
