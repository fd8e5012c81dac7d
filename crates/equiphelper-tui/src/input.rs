//! Single-line text input state.
//!
//! Cursor positions are character indices, so editing stays correct on
//! multi-byte input.

/// State of the question input field.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    content: String,
    /// Cursor position (character index).
    pub cursor: usize,
    /// Submitted questions for up/down recall.
    history: Vec<String>,
    /// Current history index (`None` = editing current input).
    history_index: Option<usize>,
    /// Saved current input while navigating history.
    saved_input: String,
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of characters in the content.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    fn byte_index(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map_or(self.content.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let i = self.byte_index();
        self.content.insert(i, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let i = self.byte_index();
            self.content.remove(i);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let i = self.byte_index();
            self.content.remove(i);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Take the content for submission, recording it in the history.
    ///
    /// The field is cleared immediately; the answer arrives later.
    pub fn submit(&mut self) -> String {
        let content = std::mem::take(&mut self.content);
        self.cursor = 0;
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.history_index = None;
        self.saved_input.clear();
        content
    }

    /// Navigate to the previous history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next_index = match self.history_index {
            None => {
                self.saved_input = self.content.clone();
                self.history.len() - 1
            }
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.history_index = Some(next_index);
        self.content = self.history[next_index].clone();
        self.move_end();
    }

    /// Navigate to the next history entry (or back to the saved input).
    pub fn history_next(&mut self) {
        let Some(i) = self.history_index else {
            return;
        };
        if i + 1 < self.history.len() {
            self.history_index = Some(i + 1);
            self.content = self.history[i + 1].clone();
        } else {
            self.history_index = None;
            self.content = std::mem::take(&mut self.saved_input);
        }
        self.move_end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_cursor_movement() {
        let mut input = TextInputState::new();
        for ch in "helmet".chars() {
            input.insert(ch);
        }
        assert_eq!(input.content(), "helmet");
        assert_eq!(input.cursor, 6);

        input.move_home();
        input.insert('a');
        assert_eq!(input.content(), "ahelmet");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = TextInputState::new();
        for ch in "abc".chars() {
            input.insert(ch);
        }
        input.backspace();
        assert_eq!(input.content(), "ab");

        input.move_home();
        input.delete();
        assert_eq!(input.content(), "b");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInputState::new();
        for ch in "gär".chars() {
            input.insert(ch);
        }
        assert_eq!(input.cursor, 3);
        input.backspace();
        assert_eq!(input.content(), "gä");
        input.move_left();
        input.delete();
        assert_eq!(input.content(), "g");
    }

    #[test]
    fn test_submit_clears_and_records_history() {
        let mut input = TextInputState::new();
        for ch in "question".chars() {
            input.insert(ch);
        }
        let submitted = input.submit();
        assert_eq!(submitted, "question");
        assert!(input.is_empty());
        assert_eq!(input.cursor, 0);

        input.history_prev();
        assert_eq!(input.content(), "question");
    }

    #[test]
    fn test_blank_submission_not_recorded() {
        let mut input = TextInputState::new();
        input.insert(' ');
        input.submit();
        input.history_prev();
        assert!(input.is_empty());
    }

    #[test]
    fn test_history_navigation_restores_saved_input() {
        let mut input = TextInputState::new();
        for ch in "one".chars() {
            input.insert(ch);
        }
        input.submit();
        for ch in "two".chars() {
            input.insert(ch);
        }
        input.submit();

        for ch in "wip".chars() {
            input.insert(ch);
        }
        input.history_prev();
        assert_eq!(input.content(), "two");
        input.history_prev();
        assert_eq!(input.content(), "one");
        input.history_next();
        assert_eq!(input.content(), "two");
        input.history_next();
        assert_eq!(input.content(), "wip");
    }
}
