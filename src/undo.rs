/// A saved line content together with the cursor at that time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    pub text: Vec<char>,
    pub cursor: usize,
}

/// Linear undo history for one edit line.
///
/// `index` names the entry matching the buffer after the last save or
/// restore. Saving over an earlier index discards the entries after it.
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    entries: Vec<UndoEntry>,
    index: usize,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = 0;
    }

    /// Records `text` unless it equals the current entry, in which case only
    /// the saved cursor is refreshed.
    pub fn save(&mut self, text: &[char], cursor: usize) {
        if let Some(current) = self.entries.get_mut(self.index) {
            if current.text == text {
                current.cursor = cursor;
                return;
            }
            self.entries.truncate(self.index + 1);
            self.index += 1;
        } else {
            self.entries.clear();
            self.index = 0;
        }
        self.entries.push(UndoEntry {
            text: text.to_vec(),
            cursor,
        });
    }

    /// Steps back `count` entries. Returns `None` at the oldest entry.
    pub fn undo(&mut self, count: usize) -> Option<&UndoEntry> {
        if self.index == 0 || self.entries.is_empty() {
            return None;
        }
        self.index = self.index.saturating_sub(count.max(1));
        self.entries.get(self.index)
    }

    /// Steps forward `count` entries. Returns `None` at the newest entry.
    pub fn redo(&mut self, count: usize) -> Option<&UndoEntry> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index = (self.index + count.max(1)).min(self.entries.len() - 1);
        self.entries.get(self.index)
    }

    pub fn oldest(&mut self) -> Option<&UndoEntry> {
        self.undo(usize::MAX)
    }

    pub fn newest(&mut self) -> Option<&UndoEntry> {
        self.redo(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn save_skips_identical_content() {
        let mut undo = UndoHistory::new();
        undo.save(&chars("a"), 1);
        undo.save(&chars("a"), 0);
        assert_eq!(undo.len(), 1);
        assert_eq!(undo.entries[0].cursor, 0);
    }

    #[test]
    fn saving_after_undo_truncates() {
        let mut undo = UndoHistory::new();
        undo.save(&chars(""), 0);
        undo.save(&chars("a"), 1);
        undo.save(&chars("ab"), 2);
        assert_eq!(undo.undo(2).map(|e| e.text.clone()), Some(chars("")));
        undo.save(&chars("x"), 1);
        assert_eq!(undo.len(), 2);
        assert!(undo.redo(1).is_none());
        assert_eq!(undo.oldest().map(|e| e.text.clone()), Some(chars("")));
        assert_eq!(undo.newest().map(|e| e.text.clone()), Some(chars("x")));
    }
}
