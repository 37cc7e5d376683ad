//! Editing modes and their keymaps.

use std::fmt;

use tracing::warn;

use crate::command::CommandId;
use crate::config::EditStyle;
use crate::error::Result;
use crate::key::{Key, format_key_seq, parse_key_seq};
use crate::trie::KeyTrie;

/// The six editing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeId {
    ViInsert,
    ViCommand,
    ViSearch,
    Emacs,
    EmacsSearch,
    /// Waiting for the character argument of a find, till or replace.
    CharExpect,
}

impl ModeId {
    pub const ALL: [ModeId; 6] = [
        ModeId::ViInsert,
        ModeId::ViCommand,
        ModeId::ViSearch,
        ModeId::Emacs,
        ModeId::EmacsSearch,
        ModeId::CharExpect,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModeId::ViInsert => "vi-insert",
            ModeId::ViCommand => "vi-command",
            ModeId::ViSearch => "vi-search",
            ModeId::Emacs => "emacs",
            ModeId::EmacsSearch => "emacs-search",
            ModeId::CharExpect => "char-expect",
        }
    }

    pub fn from_name(name: &str) -> Option<ModeId> {
        Self::ALL.into_iter().find(|mode| mode.name() == name)
    }

    /// The mode a session in `style` starts in.
    pub fn initial(style: EditStyle) -> ModeId {
        match style {
            EditStyle::Vi => ModeId::ViInsert,
            EditStyle::Emacs => ModeId::Emacs,
        }
    }

    /// Modes in which typed characters are inserted into the edit line.
    pub fn is_insert(self) -> bool {
        matches!(self, ModeId::ViInsert | ModeId::Emacs)
    }

    pub fn is_search(self) -> bool {
        matches!(self, ModeId::ViSearch | ModeId::EmacsSearch)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
struct Mode {
    keymap: KeyTrie<Key, CommandId>,
    default: CommandId,
}

impl Mode {
    fn new(default: CommandId, bindings: &[(&str, CommandId)]) -> Self {
        let mut keymap = KeyTrie::new();
        for (notation, command) in bindings {
            match parse_key_seq(notation) {
                Ok(keys) => {
                    keymap.insert(&keys, *command);
                }
                Err(err) => warn!(%notation, %err, "skipping default binding"),
            }
        }
        Self { keymap, default }
    }
}

/// The keymap and default command of every mode.
#[derive(Debug, Clone)]
pub struct ModeTable {
    modes: Vec<Mode>,
}

impl Default for ModeTable {
    fn default() -> Self {
        let modes = ModeId::ALL
            .into_iter()
            .map(|id| {
                let (default, bindings) = default_bindings(id);
                Mode::new(default, bindings)
            })
            .collect();
        Self { modes }
    }
}

impl ModeTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn mode(&self, id: ModeId) -> &Mode {
        &self.modes[id.index()]
    }

    fn mode_mut(&mut self, id: ModeId) -> &mut Mode {
        &mut self.modes[id.index()]
    }

    pub fn keymap(&self, id: ModeId) -> &KeyTrie<Key, CommandId> {
        &self.mode(id).keymap
    }

    /// The command run for a key sequence bound to nothing.
    pub fn default_command(&self, id: ModeId) -> CommandId {
        self.mode(id).default
    }

    pub fn set_default_command(&mut self, id: ModeId, command: CommandId) {
        self.mode_mut(id).default = command;
    }

    /// Binds a key sequence in notation form to a command name, returning
    /// the command previously bound.
    pub fn set_binding(
        &mut self,
        id: ModeId,
        key_seq: &str,
        command: &str,
    ) -> Result<Option<CommandId>> {
        let keys = parse_key_seq(key_seq)?;
        let command: CommandId = command.parse()?;
        Ok(self.mode_mut(id).keymap.insert(&keys, command))
    }

    pub fn remove_binding(&mut self, id: ModeId, key_seq: &str) -> Result<Option<CommandId>> {
        let keys = parse_key_seq(key_seq)?;
        Ok(self.mode_mut(id).keymap.remove(&keys))
    }

    pub fn binding(&self, id: ModeId, key_seq: &str) -> Result<Option<CommandId>> {
        let keys = parse_key_seq(key_seq)?;
        Ok(self.mode(id).keymap.get(&keys).copied())
    }

    /// All bindings of a mode in notation form, in key order.
    pub fn bindings(&self, id: ModeId) -> Vec<(String, CommandId)> {
        self.mode(id)
            .keymap
            .iter()
            .into_iter()
            .map(|(keys, command)| (format_key_seq(&keys), *command))
            .collect()
    }

    /// Key sequences bound to `command` in a mode.
    pub fn keys_for(&self, id: ModeId, command: CommandId) -> Vec<String> {
        self.mode(id)
            .keymap
            .iter()
            .into_iter()
            .filter(|(_, bound)| **bound == command)
            .map(|(keys, _)| format_key_seq(&keys))
            .collect()
    }
}

fn default_bindings(id: ModeId) -> (CommandId, &'static [(&'static str, CommandId)]) {
    match id {
        ModeId::ViInsert => (CommandId::SelfInsert, VI_INSERT),
        ModeId::ViCommand => (CommandId::Alert, VI_COMMAND),
        ModeId::ViSearch => (CommandId::SrchSelfInsert, VI_SEARCH),
        ModeId::Emacs => (CommandId::SelfInsert, EMACS),
        ModeId::EmacsSearch => (CommandId::SrchSelfInsert, EMACS_SEARCH),
        ModeId::CharExpect => (CommandId::ExpectChar, CHAR_EXPECT),
    }
}

use CommandId as C;

const VI_INSERT: &[(&str, CommandId)] = &[
    ("\\^[", C::SetModeViCommand),
    ("\\^J", C::AcceptLine),
    ("\\^M", C::AcceptLine),
    ("\\!", C::AbortLine),
    ("\\^C", C::AbortLine),
    ("\\#", C::EofIfEmpty),
    ("\\?", C::BackwardDeleteChar),
    ("\\B", C::BackwardDeleteChar),
    ("\\^H", C::BackwardDeleteChar),
    ("\\^?", C::BackwardDeleteChar),
    ("\\$", C::BackwardDeleteLine),
    ("\\^U", C::BackwardDeleteLine),
    ("\\^W", C::BackwardDeleteSemiword),
    ("\\^V", C::ExpectVerbatim),
    ("\\^L", C::ClearAndRedrawAll),
    ("\\^I", C::Complete),
    ("\\^N", C::CompleteNextCandidate),
    ("\\^P", C::CompletePrevCandidate),
    ("\\X", C::DeleteChar),
    ("\\R", C::ForwardChar),
    ("\\L", C::BackwardChar),
    ("\\H", C::BeginningOfLine),
    ("\\E", C::EndOfLine),
    ("\\U", C::PrevHistoryEol),
    ("\\D", C::NextHistoryEol),
];

const VI_COMMAND: &[(&str, CommandId)] = &[
    ("\\^[", C::Noop),
    ("\\^J", C::AcceptLine),
    ("\\^M", C::AcceptLine),
    ("\\!", C::AbortLine),
    ("\\^C", C::AbortLine),
    ("\\#", C::EofIfEmpty),
    ("\\^L", C::ClearAndRedrawAll),
    ("\\^R", C::CancelUndo),
    ("i", C::SetModeViInsert),
    ("\\I", C::SetModeViInsert),
    ("I", C::ViInsertBeginning),
    ("a", C::ViAppend),
    ("A", C::ViAppendToEol),
    ("R", C::ViReplace),
    ("r", C::ViReplaceChar),
    ("~", C::ViSwitchCaseChar),
    ("g~", C::ViSwitchCase),
    ("gU", C::ViUpcase),
    ("gu", C::ViDowncase),
    ("y", C::ViYank),
    ("Y", C::ViYankToEol),
    ("d", C::ViDelete),
    ("D", C::ViDeleteToEol),
    ("c", C::ViChange),
    ("C", C::ViChangeToEol),
    ("S", C::ViChangeLine),
    ("s", C::ViSubstitute),
    ("x", C::KillChar),
    ("X", C::BackwardKillChar),
    ("\\X", C::KillChar),
    ("p", C::Put),
    ("P", C::PutBefore),
    ("u", C::Undo),
    ("U", C::UndoAll),
    (".", C::Redo),
    ("h", C::BackwardChar),
    ("\\L", C::BackwardChar),
    ("\\B", C::BackwardChar),
    ("\\?", C::BackwardChar),
    ("\\^H", C::BackwardChar),
    ("l", C::ForwardChar),
    (" ", C::ForwardChar),
    ("\\R", C::ForwardChar),
    ("w", C::ForwardViword),
    ("W", C::ForwardBigword),
    ("e", C::EndOfViword),
    ("E", C::EndOfBigword),
    ("b", C::BackwardViword),
    ("B", C::BackwardBigword),
    ("0", C::BolOrDigit),
    ("1", C::DigitArgument),
    ("2", C::DigitArgument),
    ("3", C::DigitArgument),
    ("4", C::DigitArgument),
    ("5", C::DigitArgument),
    ("6", C::DigitArgument),
    ("7", C::DigitArgument),
    ("8", C::DigitArgument),
    ("9", C::DigitArgument),
    ("$", C::EndOfLine),
    ("\\E", C::EndOfLine),
    ("\\H", C::BeginningOfLine),
    ("^", C::FirstNonblank),
    ("|", C::GoToColumn),
    ("f", C::FindChar),
    ("F", C::FindCharRev),
    ("t", C::TillChar),
    ("T", C::TillCharRev),
    (";", C::RefindChar),
    (",", C::RefindCharRev),
    ("k", C::PrevHistory),
    ("-", C::PrevHistory),
    ("\\U", C::PrevHistory),
    ("j", C::NextHistory),
    ("+", C::NextHistory),
    ("\\D", C::NextHistory),
    ("G", C::OldestHistory),
    ("gg", C::ReturnHistory),
    ("/", C::ViSearchBackward),
    ("?", C::ViSearchForward),
    ("n", C::SearchAgain),
    ("N", C::SearchAgainRev),
    ("#", C::AcceptWithHash),
    ("_", C::ViAppendLastBigword),
    ("\\^I", C::Complete),
];

const VI_SEARCH: &[(&str, CommandId)] = &[
    ("\\^[", C::SrchAbortSearch),
    ("\\^J", C::SrchAcceptSearch),
    ("\\^M", C::SrchAcceptSearch),
    ("\\!", C::AbortLine),
    ("\\^C", C::AbortLine),
    ("\\?", C::SrchBackwardDeleteChar),
    ("\\B", C::SrchBackwardDeleteChar),
    ("\\^H", C::SrchBackwardDeleteChar),
    ("\\^?", C::SrchBackwardDeleteChar),
    ("\\$", C::SrchBackwardDeleteLine),
    ("\\^U", C::SrchBackwardDeleteLine),
    ("\\^V", C::ExpectVerbatim),
];

const EMACS: &[(&str, CommandId)] = &[
    ("\\^J", C::AcceptLine),
    ("\\^M", C::AcceptLine),
    ("\\!", C::AbortLine),
    ("\\^C", C::AbortLine),
    ("\\#", C::EofOrDelete),
    ("\\^D", C::EofOrDelete),
    ("\\?", C::BackwardDeleteChar),
    ("\\B", C::BackwardDeleteChar),
    ("\\^H", C::BackwardDeleteChar),
    ("\\^?", C::BackwardDeleteChar),
    ("\\X", C::DeleteChar),
    ("\\$", C::BackwardKillLine),
    ("\\^U", C::BackwardKillLine),
    ("\\^K", C::ForwardKillLine),
    ("\\^W", C::BackwardKillBigword),
    ("\\^[\\^H", C::BackwardKillEmacsword),
    ("\\^[\\^?", C::BackwardKillEmacsword),
    ("\\^[\\?", C::BackwardKillEmacsword),
    ("\\^[\\B", C::BackwardKillEmacsword),
    ("\\^[d", C::KillEmacsword),
    ("\\^Y", C::PutLeft),
    ("\\^[y", C::PutPop),
    ("\\^_", C::Undo),
    ("\\^X\\^U", C::Undo),
    ("\\^[\\^R", C::UndoAll),
    ("\\^[r", C::UndoAll),
    ("\\^A", C::BeginningOfLine),
    ("\\H", C::BeginningOfLine),
    ("\\^E", C::EndOfLine),
    ("\\E", C::EndOfLine),
    ("\\^B", C::BackwardChar),
    ("\\L", C::BackwardChar),
    ("\\^F", C::ForwardChar),
    ("\\R", C::ForwardChar),
    ("\\^[f", C::ForwardEmacsword),
    ("\\^[b", C::BackwardEmacsword),
    ("\\^]", C::FindChar),
    ("\\^[\\^]", C::FindCharRev),
    ("\\^T", C::EmacsTransposeChars),
    ("\\^[t", C::EmacsTransposeWords),
    ("\\^[u", C::EmacsUpcaseWord),
    ("\\^[l", C::EmacsDowncaseWord),
    ("\\^[c", C::EmacsCapitalizeWord),
    ("\\^[\\\\", C::EmacsDeleteHorizontalSpace),
    ("\\^[ ", C::EmacsJustOneSpace),
    ("\\^R", C::EmacsSearchBackward),
    ("\\^S", C::EmacsSearchForward),
    ("\\^P", C::PrevHistory),
    ("\\U", C::PrevHistory),
    ("\\^N", C::NextHistory),
    ("\\D", C::NextHistory),
    ("\\^[<", C::OldestHistory),
    ("\\^[>", C::NewestHistory),
    ("\\^[0", C::DigitArgument),
    ("\\^[1", C::DigitArgument),
    ("\\^[2", C::DigitArgument),
    ("\\^[3", C::DigitArgument),
    ("\\^[4", C::DigitArgument),
    ("\\^[5", C::DigitArgument),
    ("\\^[6", C::DigitArgument),
    ("\\^[7", C::DigitArgument),
    ("\\^[8", C::DigitArgument),
    ("\\^[9", C::DigitArgument),
    ("\\^[-", C::DigitArgument),
    ("\\^V", C::ExpectVerbatim),
    ("\\^Q", C::ExpectVerbatim),
    ("\\^I", C::Complete),
    ("\\^[\\^I", C::CompletePrevCandidate),
    ("\\^[=", C::CompleteAll),
    ("\\^[#", C::AcceptWithHash),
    ("\\^L", C::ClearAndRedrawAll),
];

const EMACS_SEARCH: &[(&str, CommandId)] = &[
    ("\\^R", C::SrchContinueBackward),
    ("\\^S", C::SrchContinueForward),
    ("\\^G", C::SrchAbortSearch),
    ("\\^[", C::SrchAcceptSearch),
    ("\\^J", C::SrchAcceptSearch),
    ("\\^M", C::SrchAcceptSearch),
    ("\\!", C::AbortLine),
    ("\\^C", C::AbortLine),
    ("\\?", C::SrchBackwardDeleteChar),
    ("\\B", C::SrchBackwardDeleteChar),
    ("\\^H", C::SrchBackwardDeleteChar),
    ("\\^?", C::SrchBackwardDeleteChar),
    ("\\$", C::SrchBackwardDeleteLine),
    ("\\^U", C::SrchBackwardDeleteLine),
    ("\\^V", C::ExpectVerbatim),
    ("\\^Q", C::ExpectVerbatim),
];

const CHAR_EXPECT: &[(&str, CommandId)] = &[
    ("\\^[", C::AbortExpectChar),
    ("\\!", C::AbortLine),
    ("\\^C", C::AbortLine),
];
