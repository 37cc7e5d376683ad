//! In-memory command-line history.
//!
//! Persistence belongs to the shell; this list only holds what the shell
//! hands over (or what sessions accept) for the lifetime of the process.

use std::collections::VecDeque;

/// Direction of a history search or navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards newer entries.
    Forward,
    /// Towards older entries.
    Backward,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(500)
    }
}

impl History {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a line, evicting the oldest entries beyond the limit.
    /// Empty lines and immediate duplicates are not recorded.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        if line.is_empty() || self.entries.back() == Some(&line) {
            return;
        }
        self.entries.push_back(line);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    /// Entry number `index`, oldest first.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// The nearest entry strictly beyond `from` in `direction` that contains
    /// `pattern`. `from` may be `len()`, standing for the line being edited.
    pub fn search(&self, pattern: &str, from: usize, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Backward => (0..from.min(self.len()))
                .rev()
                .find(|&i| self.entries[i].contains(pattern)),
            Direction::Forward => {
                ((from + 1)..self.len()).find(|&i| self.entries[i].contains(pattern))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_evicts_oldest() {
        let mut history = History::with_limit(2);
        history.push("a");
        history.push("b");
        history.push("b");
        history.push("c");
        assert_eq!(history.iter().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn search_is_directional_substring() {
        let mut history = History::default();
        for line in ["echo one", "ls", "echo two"] {
            history.push(line);
        }
        assert_eq!(history.search("echo", 3, Direction::Backward), Some(2));
        assert_eq!(history.search("echo", 2, Direction::Backward), Some(0));
        assert_eq!(history.search("echo", 0, Direction::Forward), Some(2));
        assert_eq!(history.search("cat", 3, Direction::Backward), None);
    }
}
