//! The terminal the editor runs on.
//!
//! Everything the session needs from the terminal goes through the
//! [`Terminal`] trait: capability flags, size, raw mode and a byte read with
//! an optional timeout. [`StdTerminal`] implements it for the process's
//! controlling terminal on unix.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use bitflags::bitflags;

use crate::error::{Error, Result};

bitflags! {
    /// What the terminal can do.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TermCaps: u16 {
        const CURSOR_UP = 1 << 0;
        const CURSOR_HORIZONTAL = 1 << 1;
        const CLEAR_EOL = 1 << 2;
        const CLEAR_EOS = 1 << 3;
        const ATTRIBUTES = 1 << 4;
        const BELL = 1 << 5;
        /// The cursor stays on the last column after it is filled, until
        /// the next character is printed.
        const EAT_NEWLINE_GLITCH = 1 << 6;
        /// Attributes must be turned off before moving the cursor.
        const MOVE_RESETS_ATTRS = 1 << 7;
    }
}

impl TermCaps {
    /// Needed for an interactive session.
    pub const REQUIRED: TermCaps = TermCaps::CURSOR_UP
        .union(TermCaps::CURSOR_HORIZONTAL)
        .union(TermCaps::CLEAR_EOL);

    /// What an ANSI/xterm-compatible terminal offers.
    pub fn ansi() -> TermCaps {
        TermCaps::all().difference(TermCaps::MOVE_RESETS_ATTRS)
    }

    /// Capabilities for a `TERM` value; empty for dumb or unknown
    /// terminals.
    pub fn from_term(term: Option<&str>) -> TermCaps {
        match term.map(str::trim) {
            None | Some("" | "dumb" | "unknown" | "cons25") => TermCaps::empty(),
            Some(name) if name.starts_with("vt52") => TermCaps::CURSOR_UP,
            Some(name) if name.starts_with("sun") => {
                TermCaps::ansi().difference(TermCaps::EAT_NEWLINE_GLITCH)
            }
            Some(_) => TermCaps::ansi(),
        }
    }

    /// Fails with the missing capabilities when an interactive session is
    /// not possible.
    pub fn check(self) -> Result<()> {
        let missing = TermCaps::REQUIRED.difference(self);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::TerminalUnusable(format!("missing capabilities {missing:?}")))
        }
    }
}

/// Outcome of waiting for an input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadResult {
    Byte(u8),
    Timeout,
    Eof,
}

pub trait Terminal {
    fn caps(&self) -> TermCaps;

    /// Columns and rows.
    fn size(&self) -> (u16, u16);

    fn enter_raw(&mut self) -> Result<()>;

    fn leave_raw(&mut self) -> Result<()>;

    /// Waits for one byte, at most `timeout` when one is given.
    fn read_byte(&mut self, timeout: Option<Duration>) -> Result<ReadResult>;

    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    /// Reports, once, that the size changed since the last call.
    fn take_resized(&mut self) -> bool;

    /// Reads a line without editing, for when the terminal is unusable.
    /// `None` at end of input.
    fn read_plain_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = io::stdout();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
        }
        Ok(Some(line))
    }
}

impl<T: Terminal + ?Sized> Terminal for Box<T> {
    fn caps(&self) -> TermCaps {
        (**self).caps()
    }

    fn size(&self) -> (u16, u16) {
        (**self).size()
    }

    fn enter_raw(&mut self) -> Result<()> {
        (**self).enter_raw()
    }

    fn leave_raw(&mut self) -> Result<()> {
        (**self).leave_raw()
    }

    fn read_byte(&mut self, timeout: Option<Duration>) -> Result<ReadResult> {
        (**self).read_byte(timeout)
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_all(bytes)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn take_resized(&mut self) -> bool {
        (**self).take_resized()
    }

    fn read_plain_line(&mut self, prompt: &str) -> Result<Option<String>> {
        (**self).read_plain_line(prompt)
    }
}

/// Standard input and output when they are not an interactive terminal.
/// It has no capabilities, so every line is read without editing.
#[derive(Debug, Default)]
pub struct PlainTerminal;

impl Terminal for PlainTerminal {
    fn caps(&self) -> TermCaps {
        TermCaps::empty()
    }

    fn size(&self) -> (u16, u16) {
        (80, 24)
    }

    fn enter_raw(&mut self) -> Result<()> {
        Err(Error::TerminalUnusable("no terminal".into()))
    }

    fn leave_raw(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_byte(&mut self, _timeout: Option<Duration>) -> Result<ReadResult> {
        Ok(ReadResult::Eof)
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        io::stdout().write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn take_resized(&mut self) -> bool {
        false
    }
}

/// The controlling terminal if standard input and output are one, else a
/// [`PlainTerminal`].
pub fn stdio() -> Box<dyn Terminal> {
    #[cfg(unix)]
    match StdTerminal::open() {
        Ok(terminal) => return Box::new(terminal),
        Err(e) => tracing::warn!(error = %e, "using plain input"),
    }
    Box::new(PlainTerminal)
}

#[cfg(unix)]
pub use unix::StdTerminal;

#[cfg(unix)]
mod unix {
    use std::fs::File;
    use std::io::{self, IsTerminal, Read, Write};
    use std::os::fd::AsFd;
    use std::time::Duration;

    use crossterm::terminal;
    use nix::errno::Errno;
    use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
    use tracing::{debug, warn};

    use super::{ReadResult, TermCaps, Terminal};
    use crate::error::{Error, Result};

    /// The process's standard input and output.
    pub struct StdTerminal {
        input: File,
        caps: TermCaps,
        size: (u16, u16),
        raw: bool,
    }

    impl StdTerminal {
        /// Opens the terminal on standard input, with capabilities
        /// inferred from `TERM`.
        pub fn open() -> Result<Self> {
            let stdin = io::stdin();
            if !stdin.is_terminal() || !io::stdout().is_terminal() {
                return Err(Error::TerminalUnusable("not a terminal".into()));
            }
            let term = std::env::var("TERM").ok();
            let caps = TermCaps::from_term(term.as_deref());
            if caps.is_empty() {
                warn!(?term, "terminal lacks cursor control");
            }
            // An unbuffered handle, so poll sees every pending byte.
            let input = File::from(stdin.as_fd().try_clone_to_owned()?);
            let size = terminal::size().unwrap_or((80, 24));
            debug!(?term, ?size, "terminal opened");
            Ok(Self {
                input,
                caps,
                size,
                raw: false,
            })
        }

        /// Waits until input is readable; `false` on timeout.
        fn wait(&self, timeout: Option<Duration>) -> Result<bool> {
            let timeout = match timeout {
                None => PollTimeout::NONE,
                Some(t) => PollTimeout::from(u16::try_from(t.as_millis()).unwrap_or(u16::MAX)),
            };
            loop {
                let mut fds = [PollFd::new(self.input.as_fd(), PollFlags::POLLIN)];
                match poll(&mut fds, timeout) {
                    Ok(0) => return Ok(false),
                    Ok(_) => return Ok(true),
                    Err(Errno::EINTR) => continue,
                    Err(errno) => return Err(io::Error::from(errno).into()),
                }
            }
        }
    }

    impl Terminal for StdTerminal {
        fn caps(&self) -> TermCaps {
            self.caps
        }

        fn size(&self) -> (u16, u16) {
            self.size
        }

        fn enter_raw(&mut self) -> Result<()> {
            if !self.raw {
                terminal::enable_raw_mode()?;
                self.raw = true;
            }
            Ok(())
        }

        fn leave_raw(&mut self) -> Result<()> {
            if self.raw {
                terminal::disable_raw_mode()?;
                self.raw = false;
            }
            Ok(())
        }

        fn read_byte(&mut self, timeout: Option<Duration>) -> Result<ReadResult> {
            if !self.wait(timeout)? {
                return Ok(ReadResult::Timeout);
            }
            let mut byte = [0u8; 1];
            loop {
                match self.input.read(&mut byte) {
                    Ok(0) => return Ok(ReadResult::Eof),
                    Ok(_) => return Ok(ReadResult::Byte(byte[0])),
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            }
        }

        fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
            io::stdout().lock().write_all(bytes)?;
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            io::stdout().flush()?;
            Ok(())
        }

        fn take_resized(&mut self) -> bool {
            match terminal::size() {
                Ok(size) if size != self.size => {
                    debug!(?size, "terminal resized");
                    self.size = size;
                    true
                }
                _ => false,
            }
        }
    }

    impl Drop for StdTerminal {
        fn drop(&mut self) {
            if self.raw {
                let _ = terminal::disable_raw_mode();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dumb_terminals_are_unusable() {
        assert!(TermCaps::from_term(None).check().is_err());
        assert!(TermCaps::from_term(Some("dumb")).check().is_err());
        assert!(TermCaps::from_term(Some("xterm-256color")).check().is_ok());
        assert!(
            !TermCaps::from_term(Some("sun-color")).contains(TermCaps::EAT_NEWLINE_GLITCH)
        );
    }
}
