//! Single-line text input for the terminal user interface.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A text input field with a cursor and an optional length cap.
///
/// The cursor counts characters, not bytes.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub max_len: Option<usize>,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            max_len: None,
        }
    }

    /// Cap the field at `max` characters, truncating the current value if needed.
    pub fn limited(mut self, max: usize) -> Self {
        if self.len() > max {
            self.value = self.value.chars().take(max).collect();
        }
        self.cursor = self.cursor.min(max);
        self.max_len = Some(max);
        self
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor. Ignored once the cap is reached.
    pub fn handle_char(&mut self, c: char) {
        if self.max_len.is_some_and(|max| self.len() >= max) {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    /// Apply an editing key. Returns false if the key is not an editing key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.handle_char(c)
            }
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Delete => self.handle_delete(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            _ => return false,
        }
        true
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}
