use super::CommandEngine;
use crate::command::CommandId;
use crate::state::{CaseChange, Operator};
use crate::word::{self, WordKind, is_blank};

impl CommandEngine<'_> {
    /// Swaps the characters around the cursor, dragging the one before the
    /// cursor forward. At the end of the line the last two are swapped.
    pub(super) fn transpose_chars(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        let len = self.state.buffer.len();
        let cursor = self.state.buffer.cursor();
        if len < 2 || cursor == 0 {
            self.alert();
            return;
        }
        self.save_edit();
        self.save_undo();
        let mut at = if cursor >= len { len - 1 } else { cursor };
        for _ in 0..self.count(1).max(1) {
            if at >= len {
                break;
            }
            self.swap_chars(at - 1, at);
            at += 1;
        }
        self.state.buffer.set_cursor(at);
    }

    fn swap_chars(&mut self, a: usize, b: usize) {
        let buffer = &mut self.state.buffer;
        if let (Some(x), Some(y)) = (buffer.get(a), buffer.get(b)) {
            buffer.replace_char(a, y);
            buffer.replace_char(b, x);
        }
    }

    /// Swaps the word before the cursor with the word after it.
    pub(super) fn transpose_words(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        let chars = self.state.buffer.chars().to_vec();
        let cursor = self.state.buffer.cursor();
        let kind = WordKind::Emacsword;

        let second_end = word::next_word_end(&chars, cursor, kind);
        let second_start = word::prev_word_start(&chars, second_end, kind, true);
        let first_start = word::prev_word_start(&chars, second_start, kind, true);
        let first_end = word::next_word_end(&chars, first_start, kind);
        if second_start >= second_end || first_end > second_start || first_start == second_start
        {
            self.alert();
            return;
        }

        self.save_edit();
        self.save_undo();
        let mut swapped = chars[..first_start].to_vec();
        swapped.extend_from_slice(&chars[second_start..second_end]);
        swapped.extend_from_slice(&chars[first_end..second_start]);
        swapped.extend_from_slice(&chars[first_start..first_end]);
        swapped.extend_from_slice(&chars[second_end..]);
        self.state.buffer.set_text(swapped, second_end);
    }

    /// Changes the case of `count` words from the cursor, leaving the cursor
    /// after them.
    pub(super) fn case_word(&mut self, command: CommandId, case: CaseChange) {
        if self.alert_if_pending() {
            return;
        }
        let chars = self.state.buffer.chars();
        let mut end = self.state.buffer.cursor();
        for _ in 0..self.count(1).unsigned_abs().max(1) {
            end = word::next_word_end(chars, end, WordKind::Emacsword);
        }
        self.state.pending.operator = Some(Operator::case_to_end(command, case));
        self.exec_motion(end, false);
    }

    pub(super) fn capitalize_word(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        self.save_edit();
        self.save_undo();
        let mut at = self.state.buffer.cursor();
        for _ in 0..self.count(1).unsigned_abs().max(1) {
            let chars = self.state.buffer.chars();
            let end = word::next_word_end(chars, at, WordKind::Emacsword);
            let start = word::prev_word_start(chars, end, WordKind::Emacsword, true).max(at);
            for i in start..end {
                if let Some(c) = self.state.buffer.get(i) {
                    let case = if i == start {
                        CaseChange::Upper
                    } else {
                        CaseChange::Lower
                    };
                    self.state.buffer.replace_char(i, case.apply(c));
                }
            }
            at = end;
        }
        self.state.buffer.set_cursor(at);
    }

    /// The blank run around the cursor.
    fn blanks_around_cursor(&self) -> (usize, usize) {
        let chars = self.state.buffer.chars();
        let cursor = self.state.buffer.cursor();
        let mut start = cursor;
        while start > 0 && is_blank(chars[start - 1]) {
            start -= 1;
        }
        let mut end = cursor;
        while end < chars.len() && is_blank(chars[end]) {
            end += 1;
        }
        (start, end)
    }

    /// Deletes blanks around the cursor, or only those before it when a
    /// count is given.
    pub(super) fn delete_horizontal_space(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        let (start, mut end) = self.blanks_around_cursor();
        if self.state.pending.count.is_set() {
            end = self.state.buffer.cursor();
        }
        if start == end {
            return;
        }
        self.save_edit();
        self.save_undo();
        self.state.buffer.remove(start..end);
        self.state.buffer.set_cursor(start);
    }

    /// Replaces the blanks around the cursor with `count` spaces.
    pub(super) fn just_one_space(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        let n = self.count(1).max(0) as usize;
        let (start, end) = self.blanks_around_cursor();
        self.save_edit();
        self.save_undo();
        self.state.buffer.remove(start..end);
        self.state.buffer.insert(start, &vec![' '; n]);
        self.state.buffer.set_cursor(start + n);
    }
}
