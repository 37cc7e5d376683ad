//! Per-session editing state.

use crate::buffer::LineBuffer;
use crate::command::CommandId;
use crate::complete::CandidateList;
use crate::history::Direction;
use crate::keymap::ModeId;
use crate::undo::UndoHistory;

/// Largest absolute count a user can type.
pub const COUNT_ABS_MAX: u32 = 9999;

/// The numeric argument being typed, and the multiplier left by a pending
/// operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Count {
    /// `0` while no count has been typed, otherwise `1` or `-1`.
    pub sign: i8,
    pub abs: u32,
    pub multiplier: i32,
}

impl Default for Count {
    fn default() -> Self {
        Self {
            sign: 0,
            abs: 0,
            multiplier: 1,
        }
    }
}

impl Count {
    pub fn is_set(&self) -> bool {
        self.sign != 0
    }

    /// The effective count, or `default` scaled by the multiplier when none
    /// was typed. A lone minus sign counts as `-1`.
    pub fn get(&self, default: i32) -> i32 {
        if self.sign == 0 {
            default.saturating_mul(self.multiplier)
        } else if self.sign < 0 && self.abs == 0 {
            -self.multiplier
        } else {
            (i32::from(self.sign) * self.abs as i32).saturating_mul(self.multiplier)
        }
    }

    /// Appends a decimal digit. Returns `false`, leaving the count
    /// untouched, when the result would exceed [`COUNT_ABS_MAX`].
    pub fn push_digit(&mut self, digit: u32) -> bool {
        if self.abs > COUNT_ABS_MAX / 10 {
            return false;
        }
        let next = self.abs * 10 + digit;
        if next > COUNT_ABS_MAX {
            return false;
        }
        if self.sign == 0 {
            self.sign = 1;
        }
        self.abs = next;
        true
    }

    /// Flips the sign, starting a negative count if none was typed.
    pub fn negate(&mut self) {
        self.sign = if self.sign == 0 { -1 } else { -self.sign };
    }

    /// Moves the typed count into the multiplier, as an operator does.
    pub fn fold_into_multiplier(&mut self) {
        self.multiplier = self.get(1);
        self.sign = 0;
        self.abs = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseChange {
    Upper,
    Lower,
    Toggle,
}

impl CaseChange {
    pub fn apply(self, c: char) -> char {
        let convert = match self {
            CaseChange::Upper => true,
            CaseChange::Lower => false,
            CaseChange::Toggle => !c.is_uppercase(),
        };
        let mapped: Vec<char> = if convert {
            c.to_uppercase().collect()
        } else {
            c.to_lowercase().collect()
        };
        match (mapped.first(), mapped.get(1)) {
            (Some(&single), None) => single,
            _ => c,
        }
    }
}

/// Where the cursor lands after an operator is applied to a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPolicy {
    SpanStart,
    SpanEnd,
    MotionTarget,
    /// Stays where it was before the motion.
    Unchanged,
}

/// What a pending operator does to the span a motion covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    /// The command that set the operator; pressing it again applies the
    /// operator to the whole line.
    pub kind: CommandId,
    /// Save the span to the kill ring.
    pub copy: bool,
    pub delete: bool,
    pub case: Option<CaseChange>,
    pub cursor: CursorPolicy,
    /// Enter vi insert mode afterwards.
    pub insert: bool,
}

impl Operator {
    const fn new(kind: CommandId) -> Self {
        Self {
            kind,
            copy: false,
            delete: false,
            case: None,
            cursor: CursorPolicy::SpanStart,
            insert: false,
        }
    }

    /// The operator set by `command`, if it is an operator command.
    pub fn for_command(command: CommandId) -> Option<Self> {
        let op = Self::new(command);
        Some(match command {
            CommandId::ViYank => Self {
                copy: true,
                cursor: CursorPolicy::Unchanged,
                ..op
            },
            CommandId::ViDelete => Self {
                copy: true,
                delete: true,
                ..op
            },
            CommandId::ViChange => Self {
                delete: true,
                insert: true,
                ..op
            },
            CommandId::ViYankAndChange => Self {
                copy: true,
                delete: true,
                insert: true,
                ..op
            },
            CommandId::ViSwitchCase => Self {
                case: Some(CaseChange::Toggle),
                ..op
            },
            CommandId::ViUpcase => Self {
                case: Some(CaseChange::Upper),
                ..op
            },
            CommandId::ViDowncase => Self {
                case: Some(CaseChange::Lower),
                ..op
            },
            _ => return None,
        })
    }

    /// Changes the case of a span and leaves the cursor after it.
    pub fn case_to_end(kind: CommandId, case: CaseChange) -> Self {
        Self {
            case: Some(case),
            cursor: CursorPolicy::SpanEnd,
            ..Self::new(kind)
        }
    }

    pub fn is_mutating(&self) -> bool {
        self.delete || self.case.is_some()
    }
}

/// State carried between the keystrokes of one command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingState {
    pub count: Count,
    pub operator: Option<Operator>,
    /// Command waiting for a character argument in char-expect mode.
    pub char_command: Option<CommandId>,
}

impl PendingState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// How the read loop should end, if it should.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Editing,
    Accepted,
    Interrupted,
    Eof,
}

/// Repaint requests from commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Redraw {
    #[default]
    None,
    All,
    ClearScreen,
}

/// A history search in progress.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub direction: Direction,
    pub pattern: Vec<char>,
    /// Mode to return to on accept or abort.
    pub return_mode: ModeId,
    /// Main buffer and history position when the search began.
    pub saved_text: Vec<char>,
    pub saved_cursor: usize,
    pub saved_index: usize,
    /// History entry currently previewed.
    pub result: Option<usize>,
}

/// Text inserted by the last put, replaced by put-pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PutSpan {
    pub start: usize,
    pub end: usize,
    /// The cursor rests on the last inserted character rather than after it.
    pub cursor_on_last: bool,
}

/// The last edit command, replayed by `redo`.
#[derive(Debug, Clone, Copy)]
pub struct LastEdit {
    pub command: CommandId,
    pub arg: char,
    pub pending: PendingState,
}

/// Everything one `read_line` call edits.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub buffer: LineBuffer,
    pub mode: ModeId,
    /// Mode char-expect returns to.
    pub char_return_mode: ModeId,
    pub pending: PendingState,
    pub undo: UndoHistory,
    pub status: Status,
    /// Typed characters overwrite instead of insert (vi `R`).
    pub overwrite: bool,
    /// The next character is inserted without keymap lookup.
    pub verbatim: bool,
    pub alert: bool,
    pub redraw: Redraw,
    pub last_command: Option<CommandId>,
    pub last_edit: Option<LastEdit>,
    /// Last find/till command and its character, for refind.
    pub last_find: Option<(CommandId, char)>,
    pub last_put: Option<PutSpan>,
    pub search: Option<SearchState>,
    /// History entry being edited; `history.len()` is the new line.
    pub history_index: usize,
    /// The new line as it was when navigation into history began.
    pub new_line: Option<Vec<char>>,
    pub candidates: Option<CandidateList>,
}

impl EditorState {
    pub fn new(mode: ModeId, history_len: usize) -> Self {
        let mut undo = UndoHistory::new();
        undo.save(&[], 0);
        Self {
            buffer: LineBuffer::new(),
            mode,
            char_return_mode: mode,
            pending: PendingState::default(),
            undo,
            status: Status::Editing,
            overwrite: false,
            verbatim: false,
            alert: false,
            redraw: Redraw::None,
            last_command: None,
            last_edit: None,
            last_find: None,
            last_put: None,
            search: None,
            history_index: history_len,
            new_line: None,
            candidates: None,
        }
    }

    /// The confirmed text of the edit line.
    pub fn text(&self) -> String {
        self.buffer.confirmed().iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    pub fn is_done(&self) -> bool {
        self.status != Status::Editing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_multiplies_and_caps() {
        let mut count = Count::default();
        assert_eq!(count.get(1), 1);
        count.push_digit(2);
        count.fold_into_multiplier();
        count.push_digit(3);
        assert_eq!(count.get(1), 6);

        let mut count = Count::default();
        for _ in 0..4 {
            assert!(count.push_digit(9));
        }
        assert!(!count.push_digit(9));
        assert_eq!(count.get(1), 9999);
    }

    #[test]
    fn lone_minus_is_minus_one() {
        let mut count = Count::default();
        count.negate();
        assert_eq!(count.get(1), -1);
        count.push_digit(4);
        assert_eq!(count.get(1), -4);
    }

    #[test]
    fn toggle_case() {
        assert_eq!(CaseChange::Toggle.apply('a'), 'A');
        assert_eq!(CaseChange::Toggle.apply('A'), 'a');
        assert_eq!(CaseChange::Upper.apply('1'), '1');
        assert_eq!(CaseChange::Upper.apply('ß'), 'ß');
        assert_eq!(CaseChange::Lower.apply('Ä'), 'ä');
        // Lowercases to two characters.
        assert_eq!(CaseChange::Lower.apply('İ'), 'İ');
    }
}
