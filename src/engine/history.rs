use super::CommandEngine;
use crate::history::Direction;
use crate::keymap::ModeId;
use crate::state::SearchState;

impl CommandEngine<'_> {
    /// Replaces the edit line with history entry `index`; `history.len()`
    /// returns to the line being typed. Switching entries resets undo.
    fn go_to_history(&mut self, index: usize, cursor_at_end: bool) {
        let history_len = self.rt.history.len();
        let index = index.min(history_len);
        if self.state.history_index >= history_len && index < history_len {
            self.state.new_line = Some(self.state.buffer.confirmed().to_vec());
        }
        let text: Vec<char> = if index >= history_len {
            self.state.new_line.take().unwrap_or_default()
        } else {
            self.rt.history.get(index).unwrap_or_default().chars().collect()
        };
        let cursor = if cursor_at_end { text.len() } else { 0 };
        self.state.buffer.set_text(text, cursor);
        self.state.history_index = index;
        self.state.undo.clear();
        let buffer = &self.state.buffer;
        self.state.undo.save(buffer.confirmed(), buffer.cursor());
    }

    fn cursor_at_end_for_mode(&self) -> bool {
        self.state.mode != ModeId::ViCommand
    }

    pub(super) fn oldest_history(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        if self.rt.history.is_empty() {
            self.alert();
            return;
        }
        let index = if self.state.pending.count.is_set() {
            (self.count(1).max(1) - 1) as usize
        } else {
            0
        };
        let at_end = self.cursor_at_end_for_mode();
        self.go_to_history(index, at_end);
    }

    pub(super) fn newest_history(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        let Some(last) = self.rt.history.len().checked_sub(1) else {
            self.alert();
            return;
        };
        let at_end = self.cursor_at_end_for_mode();
        self.go_to_history(last, at_end);
    }

    pub(super) fn return_history(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        let len = self.rt.history.len();
        let at_end = self.cursor_at_end_for_mode();
        self.go_to_history(len, at_end);
    }

    /// Moves `count` entries towards newer (`direction > 0`) or older
    /// entries.
    pub(super) fn step_history(&mut self, direction: i32, eol: bool) {
        if self.alert_if_pending() {
            return;
        }
        let offset = self.count(1).saturating_mul(direction);
        let current = self.state.history_index as i64;
        let target = current + i64::from(offset);
        if target < 0 || target > self.rt.history.len() as i64 || offset == 0 {
            self.alert();
            return;
        }
        let at_end = eol || self.cursor_at_end_for_mode();
        self.go_to_history(target as usize, at_end);
    }

    pub(super) fn start_search(&mut self, direction: Direction, vi: bool) {
        if self.alert_if_pending() {
            return;
        }
        self.save_undo();
        self.state.search = Some(SearchState {
            direction,
            pattern: Vec::new(),
            return_mode: if vi { ModeId::ViCommand } else { self.state.mode },
            saved_text: self.state.buffer.confirmed().to_vec(),
            saved_cursor: self.state.buffer.cursor(),
            saved_index: self.state.history_index,
            result: None,
        });
        self.set_mode(if vi {
            ModeId::ViSearch
        } else {
            ModeId::EmacsSearch
        });
    }

    fn search_mut(&mut self) -> Option<&mut SearchState> {
        self.state.search.as_mut()
    }

    /// Previews the entry found for the current pattern, searching from
    /// `from` (the start position when `None`).
    fn update_search(&mut self, from: Option<usize>) {
        let Some(search) = self.state.search.as_ref() else {
            return;
        };
        let pattern: String = search.pattern.iter().collect();
        let direction = search.direction;
        let start = from.unwrap_or(search.saved_index);
        if pattern.is_empty() {
            let (text, cursor) = (search.saved_text.clone(), search.saved_cursor);
            self.state.buffer.set_text(text, cursor);
            if let Some(search) = self.search_mut() {
                search.result = None;
            }
            return;
        }
        match self.rt.history.search(&pattern, start, direction) {
            Some(index) => {
                let text: Vec<char> = self
                    .rt
                    .history
                    .get(index)
                    .unwrap_or_default()
                    .chars()
                    .collect();
                let cursor = match_end(&text, &pattern);
                self.state.buffer.set_text(text, cursor);
                if let Some(search) = self.search_mut() {
                    search.result = Some(index);
                }
            }
            None => self.state.alert = true,
        }
    }

    pub(super) fn search_insert(&mut self, c: char) {
        if c == '\0' {
            self.alert();
            return;
        }
        let Some(search) = self.search_mut() else {
            self.alert();
            return;
        };
        search.pattern.push(c);
        self.update_search(None);
    }

    pub(super) fn search_backward_delete_char(&mut self) {
        let Some(search) = self.search_mut() else {
            self.alert();
            return;
        };
        if search.pattern.pop().is_none() {
            if self.state.mode == ModeId::ViSearch {
                self.abort_search();
            } else {
                self.alert();
            }
            return;
        }
        self.update_search(None);
    }

    pub(super) fn search_backward_delete_line(&mut self) {
        if let Some(search) = self.search_mut() {
            search.pattern.clear();
        }
        self.update_search(None);
    }

    /// Searches further from the current match. An empty pattern takes the
    /// last one used.
    pub(super) fn search_continue(&mut self, direction: Direction) {
        let last = self.rt.last_search.clone();
        let Some(search) = self.search_mut() else {
            self.alert();
            return;
        };
        search.direction = direction;
        if search.pattern.is_empty() {
            match last {
                Some((pattern, _)) => search.pattern = pattern,
                None => {
                    self.alert();
                    return;
                }
            }
        }
        let from = search.result;
        self.update_search(from);
    }

    pub(super) fn accept_search(&mut self) {
        let Some(search) = self.state.search.take() else {
            self.alert();
            return;
        };
        let mut pattern = search.pattern.clone();
        if pattern.is_empty() && self.state.mode == ModeId::ViSearch {
            if let Some((last, _)) = &self.rt.last_search {
                pattern = last.clone();
            }
        }
        let vi = self.state.mode == ModeId::ViSearch;
        self.set_mode(search.return_mode);
        self.state
            .buffer
            .set_text(search.saved_text.clone(), search.saved_cursor);
        if pattern.is_empty() {
            return;
        }

        let needle: String = pattern.iter().collect();
        let found = search.result.filter(|_| pattern == search.pattern).or_else(|| {
            self.rt
                .history
                .search(&needle, search.saved_index, search.direction)
        });
        self.rt.last_search = Some((pattern, search.direction));
        match found {
            Some(index) => {
                self.go_to_history(index, false);
                if !vi {
                    let cursor = match_end(self.state.buffer.chars(), &needle);
                    self.state.buffer.set_cursor(cursor);
                }
            }
            None => self.alert(),
        }
    }

    pub(super) fn abort_search(&mut self) {
        let Some(search) = self.state.search.take() else {
            self.alert();
            return;
        };
        self.state.buffer.set_text(search.saved_text, search.saved_cursor);
        self.set_mode(search.return_mode);
    }

    /// Repeats the last search, in its direction, the reverse of it, or an
    /// explicit one.
    pub(super) fn search_again(&mut self, direction: Option<Direction>, reverse: bool) {
        if self.alert_if_pending() {
            return;
        }
        let Some((pattern, last_direction)) = self.rt.last_search.clone() else {
            self.alert();
            return;
        };
        let mut direction = direction.unwrap_or(last_direction);
        if reverse {
            direction = direction.reversed();
        }
        let needle: String = pattern.iter().collect();
        match self
            .rt
            .history
            .search(&needle, self.state.history_index, direction)
        {
            Some(index) => self.go_to_history(index, false),
            None => self.alert(),
        }
    }
}

/// Index just past the first occurrence of `pattern` in `text`.
fn match_end(text: &[char], pattern: &str) -> usize {
    let pattern: Vec<char> = pattern.chars().collect();
    if pattern.is_empty() || pattern.len() > text.len() {
        return text.len();
    }
    text.windows(pattern.len())
        .position(|w| w == pattern.as_slice())
        .map_or(text.len(), |i| i + pattern.len())
}
