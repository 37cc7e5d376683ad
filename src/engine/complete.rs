use tracing::debug;

use super::CommandEngine;
use crate::complete::{self, CandidateList, CompletionContext};

impl CommandEngine<'_> {
    /// Asks the completer about the word before the cursor. A single
    /// candidate is inserted; several extend the word by their common
    /// prefix and are listed.
    pub(super) fn complete(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        let line = self.state.buffer.confirmed().to_vec();
        let cursor = self.state.buffer.cursor().min(line.len());
        let word_start = complete::word_start(&line, cursor);
        let ctx = CompletionContext {
            line: &line,
            cursor,
            word_start,
        };
        let candidates = match &self.rt.completer {
            Some(completer) => completer.generate_candidates(&ctx),
            None => Vec::new(),
        };
        debug!(word = %ctx.word(), count = candidates.len(), "completion");

        match candidates.len() {
            0 => self.alert(),
            1 => {
                let candidate = &candidates[0];
                let mut text: Vec<char> = candidate.value.chars().collect();
                if candidate.terminate_word {
                    text.push(' ');
                }
                self.save_undo();
                self.replace_word(word_start, cursor, &text);
                self.state.candidates = None;
            }
            _ => {
                let prefix: Vec<char> = complete::common_prefix(&candidates).chars().collect();
                let mut word_end = cursor;
                if prefix.len() > cursor - word_start {
                    self.save_undo();
                    self.replace_word(word_start, cursor, &prefix);
                    word_end = word_start + prefix.len();
                }
                let original = self.state.buffer.confirmed()[word_start..word_end].to_vec();
                self.state.candidates = Some(CandidateList {
                    candidates,
                    selected: None,
                    word_start,
                    word_end,
                    original,
                });
            }
        }
    }

    /// Replaces `[start, end)` with `text`, leaving the cursor after it.
    fn replace_word(&mut self, start: usize, end: usize, text: &[char]) {
        let buffer = &mut self.state.buffer;
        buffer.remove(start..end.min(buffer.len()));
        buffer.insert(start, text);
        buffer.set_cursor(start + text.len());
    }

    /// Puts the list's current selection into the word.
    fn show_selection(&mut self) {
        let Some(list) = self.state.candidates.as_ref() else {
            return;
        };
        let (start, end) = (list.word_start, list.word_end);
        let text = list.replacement();
        self.replace_word(start, end, &text);
        if let Some(list) = self.state.candidates.as_mut() {
            list.word_end = start + text.len();
        }
    }

    /// Runs completion when no list is shown yet; returns whether a list is
    /// now available to navigate.
    fn ensure_candidates(&mut self) -> bool {
        if self.state.candidates.is_some() {
            return true;
        }
        self.complete();
        false
    }

    pub(super) fn step_candidate(&mut self, offset: isize) {
        if !self.ensure_candidates() {
            return;
        }
        self.save_undo();
        if let Some(list) = self.state.candidates.as_mut() {
            list.step(offset);
        }
        self.show_selection();
    }

    /// Moves the selection by whole columns of the candidate area.
    pub(super) fn step_column(&mut self, delta: isize) {
        if !self.ensure_candidates() {
            return;
        }
        let layout = self.layout;
        self.jump_selection(delta, |index, delta| {
            layout.and_then(|layout| layout.column_step(index, delta))
        });
    }

    pub(super) fn step_page(&mut self, delta: isize) {
        if !self.ensure_candidates() {
            return;
        }
        let layout = self.layout;
        self.jump_selection(delta, |index, delta| {
            layout.and_then(|layout| layout.page_step(index, delta))
        });
    }

    /// Applies a layout jump to the selection, falling back to a single
    /// step when there is no layout or nothing is selected.
    fn jump_selection(
        &mut self,
        delta: isize,
        jump: impl Fn(usize, isize) -> Option<usize>,
    ) {
        self.save_undo();
        let Some(list) = self.state.candidates.as_mut() else {
            return;
        };
        match list.selected.and_then(|index| jump(index, delta)) {
            Some(index) if index < list.len() => list.selected = Some(index),
            _ => list.step(delta.signum()),
        }
        self.show_selection();
    }

    /// Inserts every candidate, separated by spaces.
    pub(super) fn complete_all(&mut self) {
        if self.alert_if_pending() {
            return;
        }
        let (word_start, word_end, candidates) = match self.state.candidates.take() {
            Some(list) => {
                let end = list.word_end;
                (list.word_start, end, list.candidates)
            }
            None => {
                let line = self.state.buffer.confirmed().to_vec();
                let cursor = self.state.buffer.cursor().min(line.len());
                let word_start = complete::word_start(&line, cursor);
                let ctx = CompletionContext {
                    line: &line,
                    cursor,
                    word_start,
                };
                let candidates = match &self.rt.completer {
                    Some(completer) => completer.generate_candidates(&ctx),
                    None => Vec::new(),
                };
                (word_start, cursor, candidates)
            }
        };
        if candidates.is_empty() {
            self.alert();
            return;
        }
        let mut text = Vec::new();
        for candidate in &candidates {
            text.extend(candidate.value.chars());
            text.push(' ');
        }
        self.save_undo();
        self.replace_word(word_start, word_end, &text);
    }
}
