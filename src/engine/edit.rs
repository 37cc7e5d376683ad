use std::ops::Range;

use super::CommandEngine;
use crate::command::CommandId;
use crate::keymap::ModeId;
use crate::state::{PutSpan, Status};
use crate::word::{self, WordKind};

impl CommandEngine<'_> {
    pub(super) fn self_insert(&mut self, c: char) {
        if self.alert_if_pending() {
            return;
        }
        if c == '\0' {
            self.alert();
            return;
        }
        self.save_undo();
        let count = self.count(1).max(0) as usize;
        let buffer = &mut self.state.buffer;
        for _ in 0..count {
            let cursor = buffer.cursor();
            if self.state.overwrite && cursor < buffer.len() {
                buffer.replace_char(cursor, c);
            } else {
                buffer.insert(cursor, &[c]);
            }
            buffer.set_cursor(cursor + 1);
        }
    }

    pub(super) fn digit_argument(&mut self, c: char) {
        let count = &mut self.state.pending.count;
        match c {
            '0'..='9' => {
                if !count.push_digit(c as u32 - '0' as u32) {
                    self.alert();
                    return;
                }
            }
            '-' => count.negate(),
            _ => {
                self.alert();
                return;
            }
        }
        self.keep_pending = true;
    }

    pub(super) fn accept_with_hash(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        self.save_undo();
        self.state.buffer.insert(0, &['#']);
        self.finish(Status::Accepted);
    }

    pub(super) fn setmode_viinsert(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        self.save_undo();
        self.set_mode(ModeId::ViInsert);
        self.state.overwrite = false;
    }

    pub(super) fn setmode_vicommand(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        self.save_undo();
        if self.state.mode == ModeId::ViInsert {
            let cursor = self.state.buffer.cursor();
            self.state.buffer.set_cursor(cursor.saturating_sub(1));
        }
        self.set_mode(ModeId::ViCommand);
        self.state.overwrite = false;
    }

    /// Removes `span`, saving it to the kill ring when `kill` is set, and
    /// leaves the cursor at its start.
    fn remove_span(&mut self, span: Range<usize>, kill: bool) {
        if span.is_empty() {
            return;
        }
        let start = span.start;
        let removed = self.state.buffer.remove(span);
        if kill {
            self.rt.kill_ring.push(removed);
        }
        self.state.buffer.set_cursor(start);
    }

    /// Common prologue of commands that edit the line directly.
    fn begin_edit(&mut self) -> bool {
        if self.alert_if_pending() {
            return false;
        }
        self.save_edit();
        self.save_undo();
        true
    }

    pub(super) fn delete_char(&mut self) {
        if self.state.pending.count.is_set() {
            self.kill_char(false);
            return;
        }
        if !self.begin_edit() {
            return;
        }
        let cursor = self.state.buffer.cursor();
        if cursor < self.state.buffer.len() {
            self.remove_span(cursor..cursor + 1, false);
        } else {
            self.alert();
        }
    }

    pub(super) fn backward_delete_char(&mut self) {
        if self.state.pending.count.is_set() {
            self.kill_char(true);
            return;
        }
        if !self.begin_edit() {
            return;
        }
        let cursor = self.state.buffer.cursor();
        if cursor > 0 {
            self.remove_span(cursor - 1..cursor, false);
        } else {
            self.alert();
        }
    }

    /// Removes `count` characters after (or before) the cursor into the
    /// kill ring.
    pub(super) fn kill_char(&mut self, backward: bool) {
        if !self.begin_edit() {
            return;
        }
        let cursor = self.state.buffer.cursor();
        let len = self.state.buffer.len();
        let mut n = self.count(1);
        if backward {
            n = -n;
        }
        let span = if n >= 0 {
            if cursor == len {
                self.alert();
                return;
            }
            cursor..cursor.saturating_add(n as usize).min(len)
        } else {
            if cursor == 0 {
                self.alert();
                return;
            }
            cursor.saturating_sub(n.unsigned_abs() as usize)..cursor
        };
        self.remove_span(span, true);
    }

    pub(super) fn delete_word_forward(&mut self, command: CommandId) {
        if !self.begin_edit() {
            return;
        }
        let kind = word_kind(command);
        let chars = self.state.buffer.chars();
        let cursor = self.state.buffer.cursor();
        let mut end = cursor;
        for _ in 0..self.count(1).unsigned_abs() {
            if end >= chars.len() {
                break;
            }
            end = match kind {
                WordKind::Emacsword => word::next_word_end(chars, end, kind),
                _ => word::next_word_start(chars, end, kind, true),
            };
        }
        if end == cursor {
            self.alert();
            return;
        }
        self.remove_span(cursor..end, is_kill(command));
    }

    pub(super) fn delete_word_backward(&mut self, command: CommandId) {
        if !self.begin_edit() {
            return;
        }
        let kind = word_kind(command);
        let chars = self.state.buffer.chars();
        let cursor = self.state.buffer.cursor();
        let mut start = cursor;
        for _ in 0..self.count(1).unsigned_abs() {
            if start == 0 {
                break;
            }
            start = word::prev_word_start(chars, start, kind, true);
        }
        if start == cursor {
            self.alert();
            return;
        }
        self.remove_span(start..cursor, is_kill(command));
    }

    pub(super) fn delete_line(&mut self, kill: bool) {
        if !self.begin_edit() {
            return;
        }
        let len = self.state.buffer.len();
        self.remove_span(0..len, kill);
    }

    pub(super) fn forward_delete_line(&mut self, kill: bool) {
        if !self.begin_edit() {
            return;
        }
        let cursor = self.state.buffer.cursor();
        let len = self.state.buffer.len();
        self.remove_span(cursor..len, kill);
    }

    pub(super) fn backward_delete_line(&mut self, kill: bool) {
        if !self.begin_edit() {
            return;
        }
        let cursor = self.state.buffer.cursor();
        self.remove_span(0..cursor, kill);
    }

    /// Inserts the latest kill `count` times, after the cursor character
    /// when `after_cursor` is set.
    pub(super) fn put(&mut self, after_cursor: bool, cursor_on_last: bool) {
        if !self.begin_edit() {
            return;
        }
        let Some(text) = self.rt.kill_ring.take_latest().map(<[char]>::to_vec) else {
            self.alert();
            return;
        };

        let buffer = &mut self.state.buffer;
        let mut at = buffer.cursor();
        if after_cursor && at < buffer.len() {
            at += 1;
        }
        let count = self.state.pending.count.get(1).max(1) as usize;
        for _ in 0..count {
            buffer.insert(at, &text);
        }
        let span = PutSpan {
            start: at,
            end: at + text.len() * count,
            cursor_on_last,
        };
        self.place_after_put(span);
    }

    /// Replaces the text just put with the next older kill.
    pub(super) fn put_pop(&mut self) {
        let after_put = matches!(
            self.state.last_command,
            Some(CommandId::Put | CommandId::PutBefore | CommandId::PutLeft | CommandId::PutPop)
        );
        let Some(span) = self.state.last_put.filter(|_| after_put) else {
            self.alert();
            return;
        };
        if !self.begin_edit() {
            return;
        }
        let Some(text) = self.rt.kill_ring.take_older().map(<[char]>::to_vec) else {
            self.alert();
            return;
        };
        self.state.buffer.remove(span.start..span.end);
        self.state.buffer.insert(span.start, &text);
        self.place_after_put(PutSpan {
            end: span.start + text.len(),
            ..span
        });
    }

    fn place_after_put(&mut self, span: PutSpan) {
        let cursor = if span.cursor_on_last && span.end > span.start {
            span.end - 1
        } else {
            span.end
        };
        self.state.buffer.set_cursor(cursor);
        self.state.last_put = Some(span);
    }

    /// Moves through the undo history by `offset` entries (negative is
    /// back) and restores the line from there.
    pub(super) fn cancel_undo(&mut self, offset: i32) {
        if self.alert_if_pending() {
            return;
        }
        self.save_undo();
        let n = offset.unsigned_abs() as usize;
        let entry = if offset < 0 {
            self.state.undo.undo(n)
        } else {
            self.state.undo.redo(n)
        };
        match entry.cloned() {
            Some(entry) => self.state.buffer.set_text(entry.text, entry.cursor),
            None => self.alert(),
        }
    }

    /// Replays the last edit command. A count typed before `redo` replaces
    /// the saved one.
    pub(super) fn redo(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        let Some(last) = self.state.last_edit else {
            self.alert();
            return;
        };
        let mut pending = last.pending;
        if self.state.pending.count.is_set() {
            pending.count = self.state.pending.count;
        }
        self.state.pending = pending;
        self.redoing = true;
        self.current = last.command;
        self.current_arg = last.arg;
        self.dispatch(last.command, last.arg);
        self.redoing = false;
    }
}

fn word_kind(command: CommandId) -> WordKind {
    use CommandId::*;
    match command {
        DeleteBigword | KillBigword | BackwardDeleteBigword | BackwardKillBigword => {
            WordKind::Bigword
        }
        DeleteSemiword | KillSemiword | BackwardDeleteSemiword | BackwardKillSemiword => {
            WordKind::Semiword
        }
        DeleteViword | KillViword | BackwardDeleteViword | BackwardKillViword => WordKind::Viword,
        _ => WordKind::Emacsword,
    }
}

fn is_kill(command: CommandId) -> bool {
    use CommandId::*;
    matches!(
        command,
        KillBigword
            | KillSemiword
            | KillViword
            | KillEmacsword
            | BackwardKillBigword
            | BackwardKillSemiword
            | BackwardKillViword
            | BackwardKillEmacsword
    )
}
