/// Which pane receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Calendar,
    Editor,
}

/// Multi-line text buffer with a byte-offset cursor that always sits on a
/// char boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextArea {
    pub value: String,
    pub cursor: usize,
}

impl TextArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_newline(&mut self) {
        self.insert('\n');
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        let end = self.next_boundary(self.cursor);
        self.value.drain(self.cursor..end);
    }

    /// Move cursor one char to the left.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    /// Move cursor one char to the right.
    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    /// Start of the current line.
    pub fn home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    /// End of the current line.
    pub fn end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let column = self.value[start..self.cursor].chars().count();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_in_line(prev_start, column);
    }

    pub fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end >= self.value.len() {
            self.cursor = self.value.len();
            return;
        }
        let column = self.value[self.line_start(self.cursor)..self.cursor]
            .chars()
            .count();
        self.cursor = self.offset_in_line(end + 1, column);
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Zero-based (line, column) of the cursor, column counted in chars.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.value[..self.cursor];
        let line = before.matches('\n').count();
        let column = before[self.line_start(self.cursor)..].chars().count();
        (line, column)
    }

    fn line_start(&self, pos: usize) -> usize {
        self.value[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.value[pos..]
            .find('\n')
            .map(|i| pos + i)
            .unwrap_or(self.value.len())
    }

    /// Byte offset of `column` chars into the line starting at `start`,
    /// clamped to that line's end.
    fn offset_in_line(&self, start: usize, column: usize) -> usize {
        let end = self.line_end(start);
        self.value[start..end]
            .char_indices()
            .nth(column)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        debug_assert!(pos > 0, "prev_boundary called with pos == 0");
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }

    fn next_boundary(&self, pos: usize) -> usize {
        debug_assert!(
            pos < self.value.len(),
            "next_boundary called at end of string"
        );
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_handle_multibyte_chars() {
        let mut text = TextArea::new();
        for c in "héllo✓".chars() {
            text.insert(c);
        }
        text.backspace();
        text.backspace();
        assert_eq!(text.value, "héll");
        assert_eq!(text.cursor, text.value.len());
    }

    #[test]
    fn newline_and_line_navigation() {
        let mut text = TextArea::from_str("# Title\nsecond line\nx");
        assert_eq!(text.cursor_line_col(), (2, 1));

        text.move_up();
        assert_eq!(text.cursor_line_col(), (1, 1));
        text.end();
        assert_eq!(text.cursor_line_col(), (1, 11));
        text.move_up();
        // "# Title" is only 7 chars long
        assert_eq!(text.cursor_line_col(), (0, 7));
        text.home();
        assert_eq!(text.cursor, 0);
        text.move_up();
        assert_eq!(text.cursor, 0);

        text.move_down();
        text.move_down();
        assert_eq!(text.cursor_line_col(), (2, 0));
        text.move_down();
        assert_eq!(text.cursor, text.value.len());
    }

    #[test]
    fn insert_newline_splits_line() {
        let mut text = TextArea::from_str("ab");
        text.move_left();
        text.insert_newline();
        assert_eq!(text.value, "a\nb");
        assert_eq!(text.cursor_line_col(), (1, 0));
    }

    #[test]
    fn delete_removes_char_under_cursor() {
        let mut text = TextArea::from_str("añb");
        text.home();
        text.move_right();
        text.delete();
        assert_eq!(text.value, "ab");
        text.end();
        text.delete();
        assert_eq!(text.value, "ab");
    }
}
