use std::io;

use thiserror::Error;

/// Errors reported by the line editor.
///
/// Command-level failures (a motion past the end of the line, undo with
/// nothing to undo, ...) are never reported through this type; they ring the
/// terminal bell and reset the pending state instead.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error on the terminal that could not be retried.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// The terminal cannot host an interactive session (not a tty, or a
    /// required capability is missing). Callers fall back to plain line
    /// reading.
    #[error("terminal unusable for line editing: {0}")]
    TerminalUnusable(String),

    /// A key sequence in binding notation could not be parsed.
    #[error(transparent)]
    KeySeq(#[from] KeySeqError),

    /// No command has the given name.
    #[error("no such editing command: {0}")]
    UnknownCommand(String),
}

/// Failure to parse a key sequence written in binding notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeySeqError {
    #[error("empty key sequence")]
    Empty,
    #[error("key sequence ends with an unfinished escape")]
    Truncated,
    #[error("unknown escape `\\{0}` in key sequence")]
    UnknownEscape(char),
    #[error("`\\^{0}` is not a control character")]
    BadControl(char),
}

pub type Result<T> = std::result::Result<T, Error>;
