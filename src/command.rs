//! Editing commands, identified by stable names.
//!
//! Names are the contract of the binding surface: keymaps are configured
//! and introspected by name, and the set of names never depends on how a
//! command is implemented.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

macro_rules! commands {
    ($($(#[$doc:meta])* $variant:ident => $name:literal,)*) => {
        /// Every command the engine can execute.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum CommandId {
            $($(#[$doc])* $variant,)*
        }

        impl CommandId {
            const ALL: &'static [CommandId] = &[$(CommandId::$variant,)*];

            /// The stable name used in key bindings.
            pub fn name(self) -> &'static str {
                match self {
                    $(CommandId::$variant => $name,)*
                }
            }

            /// Looks a command up by its stable name.
            pub fn from_name(name: &str) -> Option<CommandId> {
                match name {
                    $($name => Some(CommandId::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

commands! {
    // basic
    Noop => "noop",
    Alert => "alert",
    /// Inserts the character that invoked it.
    SelfInsert => "self-insert",
    InsertTab => "insert-tab",
    /// The next character is inserted as-is, bypassing the keymap.
    ExpectVerbatim => "expect-verbatim",
    DigitArgument => "digit-argument",
    BolOrDigit => "bol-or-digit",
    AcceptLine => "accept-line",
    AbortLine => "abort-line",
    Eof => "eof",
    EofIfEmpty => "eof-if-empty",
    EofOrDelete => "eof-or-delete",
    AcceptWithHash => "accept-with-hash",
    SetModeViInsert => "setmode-viinsert",
    SetModeViCommand => "setmode-vicommand",
    SetModeEmacs => "setmode-emacs",
    /// Default command of the char-expect mode: runs the pending character
    /// command with the typed character.
    ExpectChar => "expect-char",
    AbortExpectChar => "abort-expect-char",
    RedrawAll => "redraw-all",
    ClearAndRedrawAll => "clear-and-redraw-all",

    // motions
    ForwardChar => "forward-char",
    BackwardChar => "backward-char",
    ForwardBigword => "forward-bigword",
    EndOfBigword => "end-of-bigword",
    BackwardBigword => "backward-bigword",
    ForwardSemiword => "forward-semiword",
    EndOfSemiword => "end-of-semiword",
    BackwardSemiword => "backward-semiword",
    ForwardViword => "forward-viword",
    EndOfViword => "end-of-viword",
    BackwardViword => "backward-viword",
    ForwardEmacsword => "forward-emacsword",
    BackwardEmacsword => "backward-emacsword",
    BeginningOfLine => "beginning-of-line",
    EndOfLine => "end-of-line",
    GoToColumn => "go-to-column",
    FirstNonblank => "first-nonblank",
    FindChar => "find-char",
    FindCharRev => "find-char-rev",
    TillChar => "till-char",
    TillCharRev => "till-char-rev",
    RefindChar => "refind-char",
    RefindCharRev => "refind-char-rev",

    // editing
    DeleteChar => "delete-char",
    DeleteBigword => "delete-bigword",
    DeleteSemiword => "delete-semiword",
    DeleteViword => "delete-viword",
    DeleteEmacsword => "delete-emacsword",
    BackwardDeleteChar => "backward-delete-char",
    BackwardDeleteBigword => "backward-delete-bigword",
    BackwardDeleteSemiword => "backward-delete-semiword",
    BackwardDeleteViword => "backward-delete-viword",
    BackwardDeleteEmacsword => "backward-delete-emacsword",
    DeleteLine => "delete-line",
    ForwardDeleteLine => "forward-delete-line",
    BackwardDeleteLine => "backward-delete-line",
    KillChar => "kill-char",
    KillBigword => "kill-bigword",
    KillSemiword => "kill-semiword",
    KillViword => "kill-viword",
    KillEmacsword => "kill-emacsword",
    BackwardKillChar => "backward-kill-char",
    BackwardKillBigword => "backward-kill-bigword",
    BackwardKillSemiword => "backward-kill-semiword",
    BackwardKillViword => "backward-kill-viword",
    BackwardKillEmacsword => "backward-kill-emacsword",
    KillLine => "kill-line",
    ForwardKillLine => "forward-kill-line",
    BackwardKillLine => "backward-kill-line",
    PutBefore => "put-before",
    Put => "put",
    PutLeft => "put-left",
    PutPop => "put-pop",
    Undo => "undo",
    UndoAll => "undo-all",
    CancelUndo => "cancel-undo",
    CancelUndoAll => "cancel-undo-all",
    /// Repeats the last editing command (vi `.`).
    Redo => "redo",

    // completion
    Complete => "complete",
    CompleteNextCandidate => "complete-next-candidate",
    CompletePrevCandidate => "complete-prev-candidate",
    CompleteNextColumn => "complete-next-column",
    CompletePrevColumn => "complete-prev-column",
    CompleteNextPage => "complete-next-page",
    CompletePrevPage => "complete-prev-page",
    CompleteAll => "complete-all",
    ClearCandidates => "clear-candidates",

    // vi
    ViReplaceChar => "vi-replace-char",
    ViInsertBeginning => "vi-insert-beginning",
    ViAppend => "vi-append",
    ViAppendToEol => "vi-append-to-eol",
    ViReplace => "vi-replace",
    ViSwitchCase => "vi-switch-case",
    ViSwitchCaseChar => "vi-switch-case-char",
    ViUpcase => "vi-upcase",
    ViDowncase => "vi-downcase",
    ViYank => "vi-yank",
    ViYankToEol => "vi-yank-to-eol",
    ViDelete => "vi-delete",
    ViDeleteToEol => "vi-delete-to-eol",
    ViChange => "vi-change",
    ViChangeToEol => "vi-change-to-eol",
    ViChangeLine => "vi-change-line",
    ViYankAndChange => "vi-yank-and-change",
    ViYankAndChangeToEol => "vi-yank-and-change-to-eol",
    ViYankAndChangeLine => "vi-yank-and-change-line",
    ViSubstitute => "vi-substitute",
    ViAppendLastBigword => "vi-append-last-bigword",
    ViSearchForward => "vi-search-forward",
    ViSearchBackward => "vi-search-backward",

    // emacs
    EmacsTransposeChars => "emacs-transpose-chars",
    EmacsTransposeWords => "emacs-transpose-words",
    EmacsUpcaseWord => "emacs-upcase-word",
    EmacsDowncaseWord => "emacs-downcase-word",
    EmacsCapitalizeWord => "emacs-capitalize-word",
    EmacsDeleteHorizontalSpace => "emacs-delete-horizontal-space",
    EmacsJustOneSpace => "emacs-just-one-space",
    EmacsSearchForward => "emacs-search-forward",
    EmacsSearchBackward => "emacs-search-backward",

    // history
    OldestHistory => "oldest-history",
    NewestHistory => "newest-history",
    ReturnHistory => "return-history",
    NextHistory => "next-history",
    PrevHistory => "prev-history",
    NextHistoryEol => "next-history-eol",
    PrevHistoryEol => "prev-history-eol",

    // history search
    SrchSelfInsert => "srch-self-insert",
    SrchBackwardDeleteChar => "srch-backward-delete-char",
    SrchBackwardDeleteLine => "srch-backward-delete-line",
    SrchContinueForward => "srch-continue-forward",
    SrchContinueBackward => "srch-continue-backward",
    SrchAcceptSearch => "srch-accept-search",
    SrchAbortSearch => "srch-abort-search",
    SearchAgain => "search-again",
    SearchAgainRev => "search-again-rev",
    SearchAgainForward => "search-again-forward",
    SearchAgainBackward => "search-again-backward",
}

impl CommandId {
    /// All commands, in declaration order.
    pub fn all() -> &'static [CommandId] {
        Self::ALL
    }

    /// Commands that keep the candidate list on screen.
    pub fn is_completion(self) -> bool {
        use CommandId::*;
        matches!(
            self,
            Complete
                | CompleteNextCandidate
                | CompletePrevCandidate
                | CompleteNextColumn
                | CompletePrevColumn
                | CompleteNextPage
                | CompletePrevPage
                | CompleteAll
        )
    }

    /// Commands whose consecutive invocations share one undo snapshot.
    pub fn coalesces_undo(self) -> bool {
        matches!(
            self,
            CommandId::SelfInsert | CommandId::BackwardDeleteChar | CommandId::DeleteChar
        )
    }

    /// Motions that may move the cursor into a predicted tail, which
    /// confirms the text they pass over.
    pub fn accepts_prediction(self) -> bool {
        use CommandId::*;
        matches!(
            self,
            ForwardChar | EndOfLine | ForwardBigword | ForwardSemiword | ForwardEmacsword
                | ForwardViword | EndOfBigword | EndOfSemiword | EndOfViword
        )
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CommandId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandId::from_name(s).ok_or_else(|| Error::UnknownCommand(s.to_string()))
    }
}
