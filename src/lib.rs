pub mod buffer;
pub mod command;
pub mod complete;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod input;
pub mod key;
pub mod keymap;
pub mod killring;
pub mod predict;
pub mod render;
pub mod runtime;
pub mod session;
pub mod state;
pub mod term;
pub mod trie;
pub mod undo;
pub mod word;

pub use crate::buffer::LineBuffer;
pub use crate::command::CommandId;
pub use crate::complete::{Candidate, CandidateList, Completer, CompletionContext};
pub use crate::config::{Config, ConfigBuilder, ControlCharStyle, EditStyle, MetaPolicy, TtySpecial};
pub use crate::engine::CommandEngine;
pub use crate::error::{Error, KeySeqError, Result};
pub use crate::history::{Direction, History};
pub use crate::key::{Key, format_key_seq, parse_key_seq};
pub use crate::keymap::{ModeId, ModeTable};
pub use crate::killring::KillRing;
pub use crate::predict::PredictionModel;
pub use crate::render::{CandidateLayout, Renderer};
pub use crate::runtime::EditorRuntime;
pub use crate::session::{LineEditor, ReadLine, Session};
pub use crate::state::{EditorState, Status};
pub use crate::term::{PlainTerminal, ReadResult, TermCaps, Terminal};
pub use crate::trie::{KeyTrie, TrieMatch};
pub use crate::undo::UndoHistory;
