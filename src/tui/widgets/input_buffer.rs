//! Single-line text buffer with cursor management, used for in-place field
//! editing.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferEdit {
    /// Content changed.
    Changed,
    /// Only the cursor moved.
    Moved,
    /// Not an editing key.
    Ignored,
}

/// A simple text input buffer with cursor positioning.
///
/// `cursor` is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing text with the cursor at the end.
    pub fn from_text(text: &str) -> Self {
        Self {
            content: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.prev_boundary();
        self.content.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }
        let next = self.next_boundary();
        self.content.drain(self.cursor..next);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Text before and after the cursor, for rendering a caret between them.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.content.split_at(self.cursor)
    }

    /// Apply an editing key. `upper` forces typed letters to upper case.
    pub fn handle_key(&mut self, key: &KeyEvent, upper: bool) -> BufferEdit {
        let typing = key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT;
        match key.code {
            KeyCode::Char(c) if typing => {
                if upper {
                    for u in c.to_uppercase() {
                        self.insert_char(u);
                    }
                } else {
                    self.insert_char(c);
                }
                BufferEdit::Changed
            }
            KeyCode::Backspace => {
                if self.backspace() {
                    BufferEdit::Changed
                } else {
                    BufferEdit::Moved
                }
            }
            KeyCode::Delete => {
                if self.delete() {
                    BufferEdit::Changed
                } else {
                    BufferEdit::Moved
                }
            }
            KeyCode::Left => {
                self.move_left();
                BufferEdit::Moved
            }
            KeyCode::Right => {
                self.move_right();
                BufferEdit::Moved
            }
            KeyCode::Home => {
                self.move_home();
                BufferEdit::Moved
            }
            KeyCode::End => {
                self.move_end();
                BufferEdit::Moved
            }
            _ => BufferEdit::Ignored,
        }
    }

    fn prev_boundary(&self) -> usize {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.content[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.content.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_insert_and_cursor() {
        let mut buf = InputBuffer::new();
        buf.insert_char('h');
        buf.insert_char('i');
        assert_eq!(buf.text(), "hi");
        assert_eq!(buf.cursor_position(), 2);
    }

    #[test]
    fn test_from_text_puts_cursor_at_end() {
        let buf = InputBuffer::from_text("Acme");
        assert_eq!(buf.cursor_position(), 4);
        assert_eq!(buf.split_at_cursor(), ("Acme", ""));
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut buf = InputBuffer::from_text("abc");
        assert!(buf.backspace());
        assert_eq!(buf.text(), "ab");
        buf.move_home();
        assert!(!buf.backspace());
        assert!(buf.delete());
        assert_eq!(buf.text(), "b");
        buf.move_end();
        assert!(!buf.delete());
    }

    #[test]
    fn test_multibyte_movement() {
        let mut buf = InputBuffer::from_text("Zürich");
        buf.move_home();
        buf.move_right();
        buf.move_right();
        assert_eq!(buf.split_at_cursor(), ("Zü", "rich"));
        buf.backspace();
        assert_eq!(buf.text(), "Zrich");
        assert_eq!(buf.cursor_position(), 1);
    }

    #[test]
    fn test_movement() {
        let mut buf = InputBuffer::from_text("abc");
        buf.move_home();
        assert_eq!(buf.cursor_position(), 0);
        buf.move_left();
        assert_eq!(buf.cursor_position(), 0);
        buf.move_end();
        buf.move_right();
        assert_eq!(buf.cursor_position(), 3);
        buf.move_left();
        assert_eq!(buf.cursor_position(), 2);
    }

    #[test]
    fn test_handle_key_upper() {
        let mut buf = InputBuffer::new();
        assert_eq!(buf.handle_key(&key(KeyCode::Char('n')), true), BufferEdit::Changed);
        buf.handle_key(&key(KeyCode::Char('y')), true);
        assert_eq!(buf.text(), "NY");
    }

    #[test]
    fn test_handle_key_shifted_and_control() {
        let mut buf = InputBuffer::new();
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(buf.handle_key(&shifted, false), BufferEdit::Changed);
        let ctrl = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(buf.handle_key(&ctrl, false), BufferEdit::Ignored);
        assert_eq!(buf.handle_key(&key(KeyCode::Left), false), BufferEdit::Moved);
        assert_eq!(buf.handle_key(&key(KeyCode::Esc), false), BufferEdit::Ignored);
        assert_eq!(buf.text(), "A");
    }
}
