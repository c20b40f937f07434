/// Single-line text input with a char-boundary-aware cursor.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\r' || ch == '\n' {
            return;
        }
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.text.drain(idx..self.cursor);
            self.cursor = idx;
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            let end = self.cursor + ch.len_utf8();
            self.text.drain(self.cursor..end);
        }
    }

    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Cursor position counted in characters.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextBuffer {
        let mut buffer = TextBuffer::new();
        text.chars().for_each(|ch| buffer.insert_char(ch));
        buffer
    }

    #[test]
    fn typing_leaves_cursor_at_end() {
        let buffer = typed("hello");

        assert_eq!(buffer.as_str(), "hello");
        assert_eq!(buffer.cursor_column(), 5);
    }

    #[test]
    fn editing_respects_multibyte_chars() {
        let mut buffer = typed("café");
        buffer.move_left();
        buffer.insert_char('!');
        assert_eq!(buffer.as_str(), "caf!é");

        buffer.move_end();
        buffer.backspace();
        assert_eq!(buffer.as_str(), "caf!");

        buffer.move_home();
        buffer.delete_char();
        assert_eq!(buffer.as_str(), "af!");
        assert_eq!(buffer.cursor_column(), 0);
    }

    #[test]
    fn newlines_are_ignored() {
        let mut buffer = TextBuffer::new();
        buffer.insert_char('a');
        buffer.insert_char('\n');
        assert_eq!(buffer.as_str(), "a");
    }
}
