//! Single-line text input.
//!
//! Used for the search box and for the cell being edited. The cursor is a
//! character index, so multi-byte input is safe to edit.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A single-line text input buffer with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    /// The current input value.
    value: String,
    /// Cursor position in characters.
    cursor: usize,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new input with an initial value and the cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move cursor to end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                let changed = !self.value.is_empty();
                self.clear();
                changed
            }
            (KeyCode::Char('a'), KeyModifiers::CONTROL) | (KeyCode::Home, _) => {
                self.cursor = 0;
                false
            }
            (KeyCode::Char('e'), KeyModifiers::CONTROL) | (KeyCode::End, _) => {
                self.cursor = self.char_len();
                false
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
                true
            }
            (KeyCode::Backspace, _) => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Delete, _) => {
                if self.cursor >= self.char_len() {
                    return false;
                }
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut TextInput, s: &str) {
        for c in s.chars() {
            input.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_appends() {
        let mut input = TextInput::new();
        type_str(&mut input, "admin");
        assert_eq!(input.value(), "admin");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_shift_characters_are_inserted() {
        let mut input = TextInput::new();
        assert!(input.handle_input(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)));
        assert_eq!(input.value(), "A");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = TextInput::with_value("abc");
        assert!(input.handle_input(key(KeyCode::Backspace)));
        assert_eq!(input.value(), "ab");

        input.handle_input(key(KeyCode::Home));
        assert!(input.handle_input(key(KeyCode::Delete)));
        assert_eq!(input.value(), "b");

        input.handle_input(key(KeyCode::Home));
        assert!(!input.handle_input(key(KeyCode::Backspace)));
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = TextInput::with_value("ac");
        input.handle_input(key(KeyCode::Left));
        type_str(&mut input, "b");
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::with_value("José");
        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Backspace));
        assert_eq!(input.value(), "Joé");
        input.handle_input(key(KeyCode::End));
        input.handle_input(key(KeyCode::Backspace));
        assert_eq!(input.value(), "Jo");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = TextInput::with_value("something");
        assert!(input.handle_input(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = TextInput::with_value("ab");
        input.handle_input(key(KeyCode::Right));
        assert_eq!(input.cursor(), 2);
        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Left));
        assert_eq!(input.cursor(), 0);
    }
}
