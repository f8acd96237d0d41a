//! Append-only output buffer with line/column bookkeeping.

/// Text buffer that the compact printer writes into.
///
/// Besides accumulating the output string, the buffer tracks where the next
/// character will land (`next_char_index`, `next_line_index`) and where the
/// last appended character landed (`last_char_index`, `last_line_index`).
/// That bookkeeping is what position tracking for source maps hangs off of.
///
/// The only mutations besides appending are the tail-trimming operations,
/// which the printer uses to elide a trailing `;` before a closing brace.
#[derive(Debug, Default)]
pub struct CodeBuffer {
    contents: String,
    next_char_index: u32,
    next_line_index: u32,
    last_char_index: i32,
    last_line_index: u32,
}

impl CodeBuffer {
    pub fn new() -> CodeBuffer {
        CodeBuffer {
            contents: String::new(),
            next_char_index: 0,
            next_line_index: 0,
            last_char_index: -1,
            last_line_index: 0,
        }
    }

    /// Appends `s`, advancing the indices.  A newline advances the line index
    /// and resets the column of the next character to 0.
    pub fn append(&mut self, s: &str) {
        for ch in s.chars() {
            self.last_char_index = self.next_char_index as i32;
            self.last_line_index = self.next_line_index;

            if ch == '\n' {
                self.next_line_index += 1;
                self.next_char_index = 0;
            } else {
                self.next_char_index += 1;
            }
        }

        self.contents.push_str(s);
    }

    /// Like [`CodeBuffer::append`]; `None` is a no-op.
    pub fn append_opt(&mut self, s: Option<&str>) {
        if let Some(s) = s {
            self.append(s);
        }
    }

    pub fn start_new_line(&mut self) {
        self.append("\n");
    }

    pub fn delete_last_char(&mut self) {
        self.delete_last_chars(1);
    }

    /// Deletes the last `n` characters, clamped to the buffer length.
    pub fn delete_last_chars(&mut self, n: usize) {
        for _ in 0..n {
            if self.contents.pop().is_none() {
                break;
            }
        }

        self.recompute_indices();
    }

    /// Trims `ending` off the tail if the buffer currently ends with it.
    /// Returns whether anything was deleted.
    pub fn delete_ending_if_ending_is(&mut self, ending: &str) -> bool {
        if !ending.is_empty() && self.contents.ends_with(ending) {
            self.delete_last_chars(ending.chars().count());
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        *self = CodeBuffer::new();
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.contents
    }

    pub fn into_string(self) -> String {
        self.contents
    }

    pub fn next_char_index(&self) -> u32 {
        self.next_char_index
    }

    pub fn next_line_index(&self) -> u32 {
        self.next_line_index
    }

    pub fn last_char_index(&self) -> i32 {
        self.last_char_index
    }

    pub fn last_line_index(&self) -> u32 {
        self.last_line_index
    }

    /// Recomputes all four indices from the buffer contents.  Needed after a
    /// deletion, which may have crossed one or more newlines.
    fn recompute_indices(&mut self) {
        let newlines = self.contents.matches('\n').count() as u32;
        self.next_line_index = newlines;

        let tail = match self.contents.rfind('\n') {
            Some(i) => &self.contents[i + 1..],
            None => self.contents.as_str(),
        };
        self.next_char_index = tail.chars().count() as u32;

        match self.contents.chars().last() {
            None => {
                self.last_char_index = -1;
                self.last_line_index = 0;
            }

            Some('\n') => {
                // The newline itself is the last character; it sits at the
                // end of the previous line.
                self.last_line_index = self.next_line_index - 1;

                let without = &self.contents[..self.contents.len() - 1];
                let column = match without.rfind('\n') {
                    Some(i) => without[i + 1..].chars().count(),
                    None => without.chars().count(),
                };
                self.last_char_index = column as i32;
            }

            Some(_) => {
                self.last_line_index = self.next_line_index;
                self.last_char_index = self.next_char_index as i32 - 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn initial_state() {
        let buffer = CodeBuffer::new();
        assert_eq!(buffer.next_char_index(), 0);
        assert_eq!(buffer.next_line_index(), 0);
        assert_eq!(buffer.last_char_index(), -1);
        assert_eq!(buffer.last_line_index(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn tracks_lines_and_columns() {
        let mut buffer = CodeBuffer::new();
        buffer.append("ab");
        assert_eq!(buffer.next_char_index(), 2);
        assert_eq!(buffer.last_char_index(), 1);

        buffer.start_new_line();
        assert_eq!(buffer.next_line_index(), 1);
        assert_eq!(buffer.next_char_index(), 0);
        assert_eq!(buffer.last_char_index(), 2);
        assert_eq!(buffer.last_line_index(), 0);

        buffer.append("c");
        assert_eq!(buffer.next_line_index(), 1);
        assert_eq!(buffer.next_char_index(), 1);
        assert_eq!(buffer.last_char_index(), 0);
        assert_eq!(buffer.last_line_index(), 1);
    }

    #[test]
    fn append_none_is_a_no_op() {
        let mut buffer = CodeBuffer::new();
        buffer.append("x");
        buffer.append_opt(None);
        assert_eq!(buffer.as_str(), "x");
        assert_eq!(buffer.next_char_index(), 1);
    }

    #[test]
    fn deletion_crossing_a_newline_rescans() {
        let mut buffer = CodeBuffer::new();
        buffer.append("ab\ncd");
        buffer.delete_last_chars(3);

        assert_eq!(buffer.as_str(), "ab");
        assert_eq!(buffer.next_line_index(), 0);
        assert_eq!(buffer.next_char_index(), 2);
        assert_eq!(buffer.last_char_index(), 1);
        assert_eq!(buffer.last_line_index(), 0);
    }

    #[test]
    fn deletion_is_clamped() {
        let mut buffer = CodeBuffer::new();
        buffer.append("ab");
        buffer.delete_last_chars(10);

        assert!(buffer.is_empty());
        assert_eq!(buffer.last_char_index(), -1);
        assert_eq!(buffer.next_char_index(), 0);
    }

    #[test]
    fn conditional_trim() {
        let mut buffer = CodeBuffer::new();
        buffer.append("a;b;");
        assert!(buffer.delete_ending_if_ending_is(";"));
        assert!(!buffer.delete_ending_if_ending_is(";;"));
        assert_eq!(buffer.as_str(), "a;b");
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut buffer = CodeBuffer::new();
        buffer.append("foo\nbar");
        buffer.reset();
        assert_eq!(buffer.last_char_index(), -1);
        assert_eq!(buffer.next_line_index(), 0);
        assert!(buffer.is_empty());
    }

    proptest! {
        /// Appending then deleting in arbitrary chunks must leave the
        /// incremental indices equal to a from-scratch recomputation.
        #[test]
        fn indices_match_recomputation(chunks in proptest::collection::vec("[a-c\n]{0,5}", 0..8), del in 0usize..12) {
            let mut buffer = CodeBuffer::new();
            for chunk in &chunks {
                buffer.append(chunk);
            }
            buffer.delete_last_chars(del);

            let mut fresh = CodeBuffer::new();
            fresh.append(buffer.as_str());

            prop_assert_eq!(buffer.next_char_index(), fresh.next_char_index());
            prop_assert_eq!(buffer.next_line_index(), fresh.next_line_index());
            prop_assert_eq!(buffer.last_char_index(), fresh.last_char_index());
            prop_assert_eq!(buffer.last_line_index(), fresh.last_line_index());
        }
    }
}
