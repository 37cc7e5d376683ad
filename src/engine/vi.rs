use super::CommandEngine;
use crate::command::CommandId;
use crate::keymap::ModeId;
use crate::state::{CaseChange, Operator};
use crate::word::is_blank;

impl CommandEngine<'_> {
    /// Arms an operator, or applies it to the whole line when the same
    /// operator is already pending.
    pub(super) fn operator_command(&mut self, command: CommandId) {
        let Some(op) = Operator::for_command(command) else {
            self.alert();
            return;
        };
        match self.state.pending.operator {
            Some(pending) if pending.kind == command => {
                let old = self.state.buffer.cursor();
                self.state.buffer.set_cursor(0);
                let len = self.state.buffer.len();
                self.exec_motion(len, true);
                if !pending.insert && old <= self.state.buffer.len() {
                    self.state.buffer.set_cursor(old);
                }
            }
            Some(_) => self.alert(),
            None => {
                self.state.pending.count.fold_into_multiplier();
                self.state.pending.operator = Some(op);
                self.keep_pending = true;
            }
        }
    }

    /// Applies an operator from the cursor to the end of the line.
    pub(super) fn operator_to_eol(&mut self, kind: CommandId) {
        if !self.redoing && self.alert_if_pending() {
            return;
        }
        self.state.pending.operator = Operator::for_command(kind);
        let len = self.state.buffer.len();
        self.exec_motion(len, false);
    }

    pub(super) fn operator_whole_line(&mut self, kind: CommandId) {
        if !self.redoing && self.alert_if_pending() {
            return;
        }
        self.state.buffer.set_cursor(0);
        self.operator_to_eol(kind);
    }

    /// Enters vi insert mode, first moving the cursor to `at`.
    pub(super) fn vi_insert_at(&mut self, at: Option<usize>) {
        if self.alert_if_pending() {
            return;
        }
        if let Some(at) = at {
            self.state.buffer.set_cursor(at);
        }
        self.setmode_viinsert();
    }

    /// Toggles the case of `count` characters, advancing the cursor.
    pub(super) fn vi_switch_case_char(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        self.save_edit();
        self.save_undo();
        let len = self.state.buffer.len();
        let mut cursor = self.state.buffer.cursor();
        if cursor >= len {
            self.alert();
            return;
        }
        for _ in 0..self.count(1).max(1) {
            if let Some(c) = self.state.buffer.get(cursor) {
                self.state.buffer.replace_char(cursor, CaseChange::Toggle.apply(c));
            }
            cursor += 1;
            if cursor >= len {
                break;
            }
        }
        self.state.buffer.set_cursor(cursor);
    }

    /// Replaces `count` characters starting at the cursor with `c`,
    /// leaving the cursor on the last one replaced.
    pub(super) fn vi_replace_char(&mut self, c: char) {
        let count = self.count(1).max(1) as usize;
        let cursor = self.state.buffer.cursor();
        if c == '\0' || cursor + count > self.state.buffer.len() {
            self.alert();
            return;
        }
        self.save_edit();
        self.save_undo();
        for i in cursor..cursor + count {
            self.state.buffer.replace_char(i, c);
        }
        self.state.buffer.set_cursor(cursor + count - 1);
    }

    /// Kills `count` characters and enters insert mode.
    pub(super) fn vi_substitute(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        if self.state.buffer.cursor() < self.state.buffer.len() {
            self.kill_char(false);
        }
        self.set_mode(ModeId::ViInsert);
        self.state.overwrite = false;
    }

    /// Inserts a bigword of the newest history entry after the cursor and
    /// enters insert mode. Without a count the last bigword is used,
    /// otherwise the `count`th.
    pub(super) fn vi_append_last_bigword(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        let Some(entry) = self.rt.history.iter().last() else {
            self.alert();
            return;
        };
        let words: Vec<&str> = entry.split(is_blank).filter(|w| !w.is_empty()).collect();
        let word = if self.state.pending.count.is_set() {
            let n = self.count(1);
            usize::try_from(n - 1).ok().and_then(|i| words.get(i))
        } else {
            words.last()
        };
        let Some(word) = word else {
            self.alert();
            return;
        };

        let mut text = vec![' '];
        text.extend(word.chars());
        self.save_undo();
        let buffer = &mut self.state.buffer;
        let at = (buffer.cursor() + 1).min(buffer.len());
        buffer.insert(at, &text);
        buffer.set_cursor(at + text.len());
        self.set_mode(ModeId::ViInsert);
        self.state.overwrite = false;
    }
}
