use super::CommandEngine;
use crate::command::CommandId;
use crate::keymap::ModeId;
use crate::word::{self, WordKind, is_blank};

impl CommandEngine<'_> {
    pub(super) fn motion(&mut self, command: CommandId) {
        use CommandId::*;

        let count = self.count(1);
        match command {
            ForwardChar | BackwardChar => {
                let forward = (command == ForwardChar) == (count >= 0);
                let n = count.unsigned_abs() as usize;
                if forward {
                    self.move_forward_chars(n);
                } else {
                    self.move_backward_chars(n);
                }
            }
            ForwardBigword | ForwardSemiword | ForwardViword | ForwardEmacsword => {
                let kind = word_kind(command);
                if count >= 0 {
                    self.move_forward_words(kind, count as usize);
                } else {
                    self.move_backward_words(kind, count.unsigned_abs() as usize);
                }
            }
            BackwardBigword | BackwardSemiword | BackwardViword | BackwardEmacsword => {
                let kind = word_kind(command);
                if count >= 0 {
                    self.move_backward_words(kind, count as usize);
                } else {
                    self.move_forward_words(kind, count.unsigned_abs() as usize);
                }
            }
            EndOfBigword | EndOfSemiword | EndOfViword => {
                self.move_to_word_end(word_kind(command), count.unsigned_abs() as usize, true);
            }
            BeginningOfLine => self.exec_motion(0, false),
            EndOfLine => {
                let len = self.state.buffer.len();
                self.exec_motion(len, true);
            }
            GoToColumn => {
                let len = self.state.buffer.len();
                let index = (count - 1).clamp(0, len as i32) as usize;
                self.exec_motion(index, false);
            }
            FirstNonblank => {
                let index = self
                    .state
                    .buffer
                    .chars()
                    .iter()
                    .position(|&c| !is_blank(c))
                    .unwrap_or(self.state.buffer.len());
                self.exec_motion(index, false);
            }
            FindChar | FindCharRev | TillChar | TillCharRev => self.expect_char_for(command),
            RefindChar | RefindCharRev => match self.state.last_find {
                Some((find, c)) => {
                    let find = if command == RefindCharRev {
                        reversed_find(find)
                    } else {
                        find
                    };
                    self.find(find, c);
                }
                None => self.alert(),
            },
            _ => self.alert(),
        }
    }

    fn move_forward_chars(&mut self, n: usize) {
        if self.alert_if_last() {
            return;
        }
        let target = self.state.buffer.cursor().saturating_add(n);
        self.exec_motion(target, false);
    }

    fn move_backward_chars(&mut self, n: usize) {
        if self.alert_if_first() {
            return;
        }
        let target = self.state.buffer.cursor().saturating_sub(n);
        self.exec_motion(target, false);
    }

    fn move_forward_words(&mut self, kind: WordKind, n: usize) {
        if self.alert_if_last() {
            return;
        }
        // vi treats `cw` on a word like `ce`.
        let change = self.state.pending.operator.is_some_and(|op| op.insert);
        let on_word = self
            .state
            .buffer
            .get(self.state.buffer.cursor())
            .is_some_and(|c| !is_blank(c));
        if change && on_word && kind != WordKind::Emacsword {
            self.move_to_word_end(kind, n, false);
            return;
        }

        let chars = self.state.buffer.chars();
        let len = chars.len();
        let mut index = self.state.buffer.cursor();
        for _ in 0..n {
            if index >= len {
                break;
            }
            index = match kind {
                WordKind::Emacsword => word::next_word_end(chars, index, kind),
                _ => word::next_word_start(chars, index, kind, true),
            };
        }
        self.exec_motion(index, false);
    }

    fn move_backward_words(&mut self, kind: WordKind, n: usize) {
        if self.alert_if_first() {
            return;
        }
        let chars = self.state.buffer.chars();
        let mut index = self.state.buffer.cursor();
        for _ in 0..n {
            if index == 0 {
                break;
            }
            index = word::prev_word_start(chars, index, kind, true);
        }
        self.exec_motion(index, false);
    }

    /// Inclusive motion to the end of the `n`th word. Without `progress`
    /// the word under the cursor counts as the first.
    fn move_to_word_end(&mut self, kind: WordKind, n: usize, progress: bool) {
        if progress && self.alert_if_last() {
            return;
        }
        let chars = self.state.buffer.chars();
        let len = chars.len();
        let mut index = self.state.buffer.cursor();
        for i in 0..n {
            if index >= len {
                break;
            }
            index = word::word_end(chars, index, kind, progress || i > 0);
        }
        self.exec_motion(index, true);
    }

    /// Switches to char-expect mode; the next character runs `command`.
    pub(super) fn expect_char_for(&mut self, command: CommandId) {
        self.save_undo();
        if self.state.mode != ModeId::CharExpect {
            self.state.char_return_mode = self.state.mode;
        }
        self.set_mode(ModeId::CharExpect);
        self.state.pending.char_command = Some(command);
        self.keep_pending = true;
    }

    pub(super) fn expect_char(&mut self, c: char) {
        if self.state.mode == ModeId::CharExpect {
            let mode = self.state.char_return_mode;
            self.set_mode(mode);
        }
        match self.state.pending.char_command {
            Some(CommandId::ViReplaceChar) => self.vi_replace_char(c),
            Some(find) => {
                self.state.last_find = Some((find, c));
                self.find(find, c);
            }
            None => self.alert(),
        }
    }

    /// Moves onto (find) or next to (till) the `count`th occurrence of `c`.
    fn find(&mut self, command: CommandId, c: char) {
        if c == '\0' {
            self.alert();
            return;
        }
        let count = self.count(1).unsigned_abs().max(1) as usize;
        let chars = self.state.buffer.chars();
        let cursor = self.state.buffer.cursor();

        let found = match command {
            CommandId::FindChar | CommandId::TillChar => {
                let start = if command == CommandId::TillChar {
                    cursor + 2
                } else {
                    cursor + 1
                };
                chars
                    .iter()
                    .enumerate()
                    .skip(start.min(chars.len()))
                    .filter(|&(_, &x)| x == c)
                    .nth(count - 1)
                    .map(|(i, _)| i)
            }
            _ => {
                let end = if command == CommandId::TillCharRev {
                    cursor.saturating_sub(1)
                } else {
                    cursor
                };
                chars[..end.min(chars.len())]
                    .iter()
                    .enumerate()
                    .rev()
                    .filter(|&(_, &x)| x == c)
                    .nth(count - 1)
                    .map(|(i, _)| i)
            }
        };

        match (command, found) {
            (_, None) => self.alert(),
            (CommandId::FindChar, Some(i)) => self.exec_motion(i, true),
            (CommandId::TillChar, Some(i)) => self.exec_motion(i - 1, true),
            (CommandId::TillCharRev, Some(i)) => self.exec_motion(i + 1, false),
            (_, Some(i)) => self.exec_motion(i, false),
        }
    }
}

fn word_kind(command: CommandId) -> WordKind {
    use CommandId::*;
    match command {
        ForwardBigword | EndOfBigword | BackwardBigword => WordKind::Bigword,
        ForwardSemiword | EndOfSemiword | BackwardSemiword => WordKind::Semiword,
        ForwardEmacsword | BackwardEmacsword => WordKind::Emacsword,
        _ => WordKind::Viword,
    }
}

fn reversed_find(command: CommandId) -> CommandId {
    match command {
        CommandId::FindChar => CommandId::FindCharRev,
        CommandId::FindCharRev => CommandId::FindChar,
        CommandId::TillChar => CommandId::TillCharRev,
        _ => CommandId::TillChar,
    }
}
