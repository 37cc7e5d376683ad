//! Command execution.
//!
//! [`CommandEngine`] runs one command against the session state and the
//! process runtime. Motions funnel through [`CommandEngine::exec_motion`],
//! which applies a pending operator to the span the motion covers.

mod complete;
mod edit;
mod emacs;
mod history;
mod motion;
mod vi;

use std::ops::Range;

use tracing::{debug, trace};

use crate::command::CommandId;
use crate::history::Direction;
use crate::keymap::ModeId;
use crate::render::CandidateLayout;
use crate::runtime::EditorRuntime;
use crate::state::{CaseChange, CursorPolicy, EditorState, LastEdit, Operator, Redraw, Status};

/// Executes commands for one session.
pub struct CommandEngine<'a> {
    state: &'a mut EditorState,
    rt: &'a mut EditorRuntime,
    layout: Option<&'a CandidateLayout>,
    current: CommandId,
    current_arg: char,
    redoing: bool,
    /// Set by commands that leave the pending state armed for the next key.
    keep_pending: bool,
}

impl<'a> CommandEngine<'a> {
    pub fn new(state: &'a mut EditorState, rt: &'a mut EditorRuntime) -> Self {
        Self {
            state,
            rt,
            layout: None,
            current: CommandId::Noop,
            current_arg: '\0',
            redoing: false,
            keep_pending: false,
        }
    }

    /// Candidate geometry from the last repaint, used by column and page
    /// navigation.
    pub fn with_layout(mut self, layout: Option<&'a CandidateLayout>) -> Self {
        self.layout = layout;
        self
    }

    /// Runs `command` with the character that invoked it.
    pub fn execute(&mut self, command: CommandId, arg: char) {
        trace!(%command, ?arg, mode = %self.state.mode, "execute");
        let had_prediction = self.state.buffer.has_prediction();
        if had_prediction && !command.accepts_prediction() {
            self.state.buffer.clear_prediction();
        }
        if self.state.candidates.is_some() && !command.is_completion() {
            self.state.candidates = None;
        }

        self.current = command;
        self.current_arg = arg;
        self.dispatch(command, arg);

        if had_prediction && command.accepts_prediction() {
            let cursor = self.state.buffer.cursor();
            self.state.buffer.confirm_prediction_to(cursor);
        }
        self.state.last_command = Some(command);

        let len = self.state.buffer.len();
        if self.state.mode == ModeId::ViCommand && len > 0 && self.state.buffer.cursor() == len {
            self.state.buffer.set_cursor(len - 1);
        }
        self.update_prediction();
    }

    fn dispatch(&mut self, command: CommandId, arg: char) {
        use CommandId::*;

        self.keep_pending = false;
        match command {
            Noop => {}
            Alert => self.alert(),
            SelfInsert => self.self_insert(arg),
            InsertTab => self.self_insert('\t'),
            ExpectVerbatim => {
                self.state.verbatim = true;
                self.keep_pending = true;
            }
            DigitArgument => self.digit_argument(arg),
            BolOrDigit => {
                if self.state.pending.count.is_set() {
                    self.digit_argument(arg);
                } else {
                    self.exec_motion(0, false);
                }
            }
            AcceptLine => {
                if !self.alert_if_pending() {
                    self.finish(Status::Accepted);
                }
            }
            AbortLine => self.finish(Status::Interrupted),
            Eof => self.finish(Status::Eof),
            EofIfEmpty | EofOrDelete => {
                if self.alert_if_pending() {
                    return;
                }
                if self.state.buffer.confirmed().is_empty() {
                    self.finish(Status::Eof);
                } else if command == EofOrDelete {
                    self.delete_char();
                } else {
                    self.alert();
                }
            }
            AcceptWithHash => self.accept_with_hash(),
            SetModeViInsert => self.setmode_viinsert(),
            SetModeViCommand => self.setmode_vicommand(),
            SetModeEmacs => {
                if !self.alert_if_pending() {
                    self.save_undo();
                    self.set_mode(ModeId::Emacs);
                    self.state.overwrite = false;
                }
            }
            ExpectChar => self.expect_char(arg),
            AbortExpectChar => {
                let mode = self.state.char_return_mode;
                self.set_mode(mode);
            }
            RedrawAll => self.state.redraw = Redraw::All,
            ClearAndRedrawAll => self.state.redraw = Redraw::ClearScreen,

            ForwardChar | BackwardChar | ForwardBigword | EndOfBigword | BackwardBigword
            | ForwardSemiword | EndOfSemiword | BackwardSemiword | ForwardViword | EndOfViword
            | BackwardViword | ForwardEmacsword | BackwardEmacsword | BeginningOfLine
            | EndOfLine | GoToColumn | FirstNonblank | FindChar | FindCharRev | TillChar
            | TillCharRev | RefindChar | RefindCharRev => self.motion(command),

            DeleteChar => self.delete_char(),
            BackwardDeleteChar => self.backward_delete_char(),
            DeleteBigword | DeleteSemiword | DeleteViword | DeleteEmacsword | KillBigword
            | KillSemiword | KillViword | KillEmacsword => self.delete_word_forward(command),
            BackwardDeleteBigword | BackwardDeleteSemiword | BackwardDeleteViword
            | BackwardDeleteEmacsword | BackwardKillBigword | BackwardKillSemiword
            | BackwardKillViword | BackwardKillEmacsword => self.delete_word_backward(command),
            DeleteLine | KillLine => self.delete_line(command == KillLine),
            ForwardDeleteLine | ForwardKillLine => {
                self.forward_delete_line(command == ForwardKillLine)
            }
            BackwardDeleteLine | BackwardKillLine => {
                self.backward_delete_line(command == BackwardKillLine)
            }
            KillChar => self.kill_char(false),
            BackwardKillChar => self.kill_char(true),
            PutBefore => self.put(false, true),
            Put => self.put(true, true),
            PutLeft => self.put(false, false),
            PutPop => self.put_pop(),
            Undo => {
                let n = self.count(1);
                self.cancel_undo(-n);
            }
            UndoAll => self.cancel_undo(-i32::MAX),
            CancelUndo => {
                let n = self.count(1);
                self.cancel_undo(n);
            }
            CancelUndoAll => self.cancel_undo(i32::MAX),
            Redo => self.redo(),

            Complete => self.complete(),
            CompleteNextCandidate => self.step_candidate(1),
            CompletePrevCandidate => self.step_candidate(-1),
            CompleteNextColumn => self.step_column(1),
            CompletePrevColumn => self.step_column(-1),
            CompleteNextPage => self.step_page(1),
            CompletePrevPage => self.step_page(-1),
            CompleteAll => self.complete_all(),
            ClearCandidates => self.state.candidates = None,

            ViReplaceChar => self.expect_char_for(command),
            ViInsertBeginning => self.vi_insert_at(Some(0)),
            ViAppend => {
                let cursor = self.state.buffer.cursor();
                let next = (cursor + 1).min(self.state.buffer.len());
                self.vi_insert_at(Some(next));
            }
            ViAppendToEol => {
                let len = self.state.buffer.len();
                self.vi_insert_at(Some(len));
            }
            ViReplace => {
                if !self.alert_if_pending() {
                    self.setmode_viinsert();
                    self.state.overwrite = true;
                }
            }
            ViSwitchCaseChar => self.vi_switch_case_char(),
            ViYank | ViDelete | ViChange | ViYankAndChange | ViSwitchCase | ViUpcase
            | ViDowncase => self.operator_command(command),
            ViYankToEol => self.operator_to_eol(ViYank),
            ViDeleteToEol => self.operator_to_eol(ViDelete),
            ViChangeToEol => self.operator_to_eol(ViChange),
            ViYankAndChangeToEol => self.operator_to_eol(ViYankAndChange),
            ViChangeLine => self.operator_whole_line(ViChange),
            ViYankAndChangeLine => self.operator_whole_line(ViYankAndChange),
            ViSubstitute => self.vi_substitute(),
            ViAppendLastBigword => self.vi_append_last_bigword(),
            ViSearchForward => self.start_search(Direction::Forward, true),
            ViSearchBackward => self.start_search(Direction::Backward, true),

            EmacsTransposeChars => self.transpose_chars(),
            EmacsTransposeWords => self.transpose_words(),
            EmacsUpcaseWord => self.case_word(command, CaseChange::Upper),
            EmacsDowncaseWord => self.case_word(command, CaseChange::Lower),
            EmacsCapitalizeWord => self.capitalize_word(),
            EmacsDeleteHorizontalSpace => self.delete_horizontal_space(),
            EmacsJustOneSpace => self.just_one_space(),
            EmacsSearchForward => self.start_search(Direction::Forward, false),
            EmacsSearchBackward => self.start_search(Direction::Backward, false),

            OldestHistory => self.oldest_history(),
            NewestHistory => self.newest_history(),
            ReturnHistory => self.return_history(),
            NextHistory => self.step_history(1, false),
            PrevHistory => self.step_history(-1, false),
            NextHistoryEol => self.step_history(1, true),
            PrevHistoryEol => self.step_history(-1, true),

            SrchSelfInsert => self.search_insert(arg),
            SrchBackwardDeleteChar => self.search_backward_delete_char(),
            SrchBackwardDeleteLine => self.search_backward_delete_line(),
            SrchContinueForward => self.search_continue(Direction::Forward),
            SrchContinueBackward => self.search_continue(Direction::Backward),
            SrchAcceptSearch => self.accept_search(),
            SrchAbortSearch => self.abort_search(),
            SearchAgain => self.search_again(None, false),
            SearchAgainRev => self.search_again(None, true),
            SearchAgainForward => {
                self.search_again(Some(Direction::Forward), false)
            }
            SearchAgainBackward => {
                self.search_again(Some(Direction::Backward), false)
            }
        }
        if !self.keep_pending {
            self.state.pending.reset();
        }
    }

    // ----- shared helpers -----

    fn alert(&mut self) {
        self.state.alert = true;
        self.state.pending.reset();
    }

    /// Alerts and returns `true` when an operator is waiting for a motion.
    fn alert_if_pending(&mut self) -> bool {
        if self.state.pending.operator.is_some() {
            self.alert();
            true
        } else {
            false
        }
    }

    fn alert_if_first(&mut self) -> bool {
        if self.state.buffer.cursor() > 0 {
            return false;
        }
        self.alert();
        true
    }

    /// Alerts when the cursor cannot move forward. In vi command mode the
    /// last character already counts as the end unless an operator waits.
    fn alert_if_last(&mut self) -> bool {
        let len = self.state.buffer.len();
        let cursor = self.state.buffer.cursor();
        let at_end = if self.state.mode == ModeId::ViCommand && self.state.pending.operator.is_none() {
            len == 0 || cursor + 1 >= len
        } else {
            cursor >= len
        };
        if at_end {
            self.alert();
        }
        at_end
    }

    fn count(&self, default: i32) -> i32 {
        self.state.pending.count.get(default)
    }

    fn set_mode(&mut self, mode: ModeId) {
        if self.state.mode != mode {
            debug!(from = %self.state.mode, to = %mode, "mode change");
        }
        self.state.mode = mode;
    }

    fn finish(&mut self, status: Status) {
        debug!(?status, "line finished");
        self.state.buffer.clear_prediction();
        self.state.status = status;
    }

    /// Saves the line to the undo history unless it is already saved.
    /// Repeats of a coalescing command share the snapshot taken by the
    /// first of them.
    fn save_undo(&mut self) {
        if self.current.coalesces_undo() && self.state.last_command == Some(self.current) {
            return;
        }
        let buffer = &self.state.buffer;
        self.state.undo.save(buffer.confirmed(), buffer.cursor());
    }

    /// Remembers the running command for `redo`.
    fn save_edit(&mut self) {
        if self.redoing || self.state.mode == ModeId::ViInsert {
            return;
        }
        self.state.last_edit = Some(LastEdit {
            command: self.current,
            arg: self.current_arg,
            pending: self.state.pending,
        });
    }

    /// Moves the cursor to `index`, or applies the pending operator to the
    /// span between the cursor and `index`. Inclusive motions extend the
    /// span over the character at its end.
    fn exec_motion(&mut self, index: usize, inclusive: bool) {
        self.save_undo();
        let len = self.state.buffer.len();
        let index = index.min(len);
        let cursor = self.state.buffer.cursor();
        let (start, mut end) = if cursor <= index {
            (cursor, index)
        } else {
            (index, cursor)
        };
        if inclusive && end < len {
            end += 1;
        }
        match self.state.pending.operator {
            None => self.state.buffer.set_cursor(index),
            Some(op) => self.apply_operator(op, start..end, index),
        }
        self.state.pending.reset();
    }

    fn apply_operator(&mut self, op: Operator, span: Range<usize>, target: usize) {
        trace!(kind = %op.kind, ?span, "apply operator");
        if op.is_mutating() || op.insert {
            self.save_edit();
        }
        if op.copy {
            let text = self.state.buffer.chars()[span.clone()].to_vec();
            self.rt.kill_ring.push(text);
        }
        if let Some(case) = op.case {
            for i in span.clone() {
                if let Some(c) = self.state.buffer.get(i) {
                    self.state.buffer.replace_char(i, case.apply(c));
                }
            }
        }
        if op.delete {
            self.state.buffer.remove(span.clone());
        }
        let cursor = match op.cursor {
            CursorPolicy::SpanStart => span.start,
            CursorPolicy::SpanEnd if op.delete => span.start,
            CursorPolicy::SpanEnd => span.end,
            CursorPolicy::MotionTarget => target,
            CursorPolicy::Unchanged => self.state.buffer.cursor(),
        };
        self.state.buffer.set_cursor(cursor);
        if op.insert {
            self.set_mode(ModeId::ViInsert);
            self.state.overwrite = false;
        }
    }

    /// Suggests a continuation when the cursor sits at the end of the line
    /// in an insert-type mode.
    fn update_prediction(&mut self) {
        if !self.rt.config.prediction
            || !self.state.mode.is_insert()
            || self.state.is_done()
            || self.state.buffer.has_prediction()
        {
            return;
        }
        let buffer = &self.state.buffer;
        if buffer.is_empty() || buffer.cursor() != buffer.len() {
            return;
        }
        if let Some(tail) = self.rt.predictor.predict(buffer.chars()) {
            let tail: Vec<char> = tail.chars().collect();
            self.state.buffer.set_prediction(&tail);
        }
    }
}

/// Convenience for callers holding the state and runtime separately.
pub fn execute(state: &mut EditorState, rt: &mut EditorRuntime, command: CommandId, arg: char) {
    CommandEngine::new(state, rt).execute(command, arg);
}
