//! UTF-8 safe single-line text input state with cursor management.
//!
//! Used by the rubric table for row fields and by the value-set editor for
//! its name and score inputs. The buffer mirrors a document field; callers
//! push every edit back into the page.

use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, Default)]
pub struct TextInputState {
    input: String,
    /// Byte index into `input`, always on a char boundary
    cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Replaces the buffer and moves the cursor to its end.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.cursor = self.input.len();
    }

    /// Loads `input` only when it differs, keeping the cursor otherwise.
    pub fn sync(&mut self, input: &str) {
        if self.input != input {
            self.set_input(input);
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// Terminal columns between the start of the buffer and the cursor.
    pub fn cursor_columns(&self) -> u16 {
        u16::try_from(self.input[..self.cursor].width()).unwrap_or(u16::MAX)
    }

    pub fn move_left(&mut self) {
        if let Some(previous) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= previous.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(previous) = self.input[..self.cursor].chars().next_back() {
            let start = self.cursor - previous.len_utf8();
            self.input.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    /// Deletes the char under the cursor.
    pub fn delete(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.input.drain(self.cursor..self.cursor + next.len_utf8());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multibyte_editing_keeps_boundaries() {
        let mut state = TextInputState::new();
        state.set_input("très");
        state.move_left();
        state.move_left();
        state.backspace();
        assert_eq!(state.input(), "tès");
        state.insert_char('é');
        assert_eq!(state.input(), "téès");
        state.delete();
        assert_eq!(state.input(), "tés");
    }

    #[test]
    fn sync_keeps_cursor_when_unchanged() {
        let mut state = TextInputState::new();
        state.set_input("score");
        state.move_home();
        state.sync("score");
        assert_eq!(state.cursor(), 0);
        state.sync("10");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn cursor_columns_counts_display_width() {
        let mut state = TextInputState::new();
        state.set_input("日本");
        assert_eq!(state.cursor_columns(), 4);
        state.move_left();
        assert_eq!(state.cursor_columns(), 2);
    }
}
