use std::ops::Range;

/// The edit line: code points, a cursor and a prediction boundary.
///
/// Characters at or after `prediction_start` are a speculative suggestion
/// appended by the prediction model; they are not part of the user's input
/// until confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
    prediction_start: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        Self {
            chars,
            cursor: len,
            prediction_start: len,
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor, clamping to the end of the line.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.chars.len());
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn slice(&self, range: Range<usize>) -> String {
        self.chars[range].iter().collect()
    }

    pub fn insert(&mut self, index: usize, text: &[char]) {
        let index = index.min(self.chars.len());
        self.chars.splice(index..index, text.iter().copied());
        if self.cursor > index {
            self.cursor += text.len();
        }
        if self.prediction_start >= index {
            self.prediction_start += text.len();
        }
    }

    pub fn insert_str(&mut self, index: usize, text: &str) {
        let text: Vec<char> = text.chars().collect();
        self.insert(index, &text);
    }

    /// Removes `range`, returning the removed characters.
    pub fn remove(&mut self, range: Range<usize>) -> Vec<char> {
        let Range { start, end } = range;
        let removed: Vec<char> = self.chars.drain(start..end).collect();
        let shift = |i: usize| {
            if i >= end {
                i - removed.len()
            } else if i > start {
                start
            } else {
                i
            }
        };
        self.cursor = shift(self.cursor);
        self.prediction_start = shift(self.prediction_start);
        removed
    }

    /// Overwrites the character at `index`. Out-of-range indices append.
    pub fn replace_char(&mut self, index: usize, c: char) {
        match self.chars.get_mut(index) {
            Some(slot) => *slot = c,
            None => self.chars.push(c),
        }
        if self.prediction_start == index {
            self.prediction_start = (index + 1).min(self.chars.len());
        }
    }

    /// Replaces the whole content, placing the cursor at `cursor`.
    pub fn set_text(&mut self, chars: Vec<char>, cursor: usize) {
        self.chars = chars;
        self.prediction_start = self.chars.len();
        self.cursor = cursor.min(self.chars.len());
    }

    pub fn clear(&mut self) {
        self.set_text(Vec::new(), 0);
    }

    /// Index where speculative text begins; equals `len()` when there is
    /// none.
    pub fn prediction_start(&self) -> usize {
        self.prediction_start
    }

    pub fn has_prediction(&self) -> bool {
        self.prediction_start < self.chars.len()
    }

    /// The user's text without the speculative tail.
    pub fn confirmed(&self) -> &[char] {
        &self.chars[..self.prediction_start]
    }

    /// Appends a speculative tail after the existing text.
    pub fn set_prediction(&mut self, tail: &[char]) {
        self.clear_prediction();
        self.prediction_start = self.chars.len();
        self.chars.extend_from_slice(tail);
    }

    /// Drops the speculative tail.
    pub fn clear_prediction(&mut self) {
        self.chars.truncate(self.prediction_start);
        self.cursor = self.cursor.min(self.chars.len());
    }

    /// Confirms speculative text up to `index`, dropping the rest.
    pub fn confirm_prediction_to(&mut self, index: usize) {
        if index > self.prediction_start {
            self.prediction_start = index.min(self.chars.len());
        }
        self.clear_prediction();
    }
}
