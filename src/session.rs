//! The read loop.
//!
//! A [`Session`] edits one line: it takes input bytes and timeouts, runs the
//! commands they resolve to and repaints into a byte buffer. It does no I/O
//! itself, which keeps it usable from tests and benchmarks. [`LineEditor`]
//! drives a session against a [`Terminal`].

use std::io;

use tracing::{debug, warn};

use crate::command::CommandId;
use crate::engine::CommandEngine;
use crate::error::{Error, Result};
use crate::input::{InputPump, Step};
use crate::key::Key;
use crate::keymap::ModeId;
use crate::render::Renderer;
use crate::runtime::EditorRuntime;
use crate::state::{EditorState, Status};
use crate::term::{ReadResult, Terminal};

/// How a `read_line` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadLine {
    Line(String),
    Interrupted,
    Eof,
}

/// One line being edited.
pub struct Session {
    state: EditorState,
    pump: InputPump,
    renderer: Renderer,
    /// Buffered input is ambiguous until the key timeout passes.
    waiting: bool,
}

impl Session {
    pub fn new(rt: &EditorRuntime, renderer: Renderer) -> Self {
        let mode = ModeId::initial(rt.config.initial_mode);
        Self {
            state: EditorState::new(mode, rt.history.len()),
            pump: InputPump::new(),
            renderer,
            waiting: false,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    /// Whether the next read should give up after the key timeout.
    pub fn wants_timeout(&self) -> bool {
        self.waiting
    }

    pub fn feed(&mut self, byte: u8, rt: &mut EditorRuntime) {
        if self.is_done() {
            return;
        }
        if !self.pump.push_byte(byte, &rt.config) {
            self.state.alert = true;
        }
        self.drain(rt, false);
    }

    pub fn feed_bytes(&mut self, bytes: &[u8], rt: &mut EditorRuntime) {
        for &byte in bytes {
            self.feed(byte, rt);
        }
    }

    /// No byte arrived within the key timeout.
    pub fn timeout(&mut self, rt: &mut EditorRuntime) {
        self.drain(rt, true);
    }

    pub fn end_of_input(&mut self) {
        debug!("end of input");
        self.pump.clear();
        self.state.buffer.clear_prediction();
        self.state.status = Status::Eof;
    }

    pub fn resize(&mut self, size: (u16, u16)) {
        self.renderer.resize(size);
    }

    pub fn render(&mut self, out: &mut Vec<u8>) -> io::Result<()> {
        self.renderer.render(&mut self.state, out)
    }

    /// Leaves the cursor below the finished line.
    pub fn finish(&mut self, out: &mut Vec<u8>) -> io::Result<()> {
        self.renderer.finish(out)
    }

    pub fn into_result(self) -> ReadLine {
        match self.state.status {
            Status::Accepted => ReadLine::Line(self.state.text()),
            Status::Interrupted => ReadLine::Interrupted,
            Status::Editing | Status::Eof => ReadLine::Eof,
        }
    }

    fn execute(&mut self, rt: &mut EditorRuntime, command: CommandId, arg: char) {
        CommandEngine::new(&mut self.state, rt)
            .with_layout(self.renderer.layout())
            .execute(command, arg);
    }

    /// Runs every command the buffered input resolves to.
    fn drain(&mut self, rt: &mut EditorRuntime, timed_out: bool) {
        self.waiting = false;
        loop {
            if self.is_done() {
                self.pump.clear();
                return;
            }

            if self.state.verbatim && !self.pump.has_keys() {
                let Some(c) = self.pump.take_char() else {
                    return;
                };
                self.state.verbatim = false;
                let command = if self.state.mode.is_search() {
                    CommandId::SrchSelfInsert
                } else {
                    CommandId::SelfInsert
                };
                self.execute(rt, command, c);
                continue;
            }

            match self.pump.next_command(&rt.modes, self.state.mode, timed_out) {
                Step::Ready((command, arg)) => {
                    self.execute(rt, command, arg);
                    continue;
                }
                Step::WaitTimeout if !self.pump.has_chars() => {
                    self.waiting = true;
                    return;
                }
                Step::WaitTimeout | Step::Wait | Step::Empty => {}
            }

            match self.pump.next_key(&rt.keycodes, timed_out) {
                Step::Ready(Key::Interrupt) => {
                    self.pump.clear();
                    let command = rt
                        .modes
                        .keymap(self.state.mode)
                        .get(&[Key::Interrupt])
                        .copied()
                        .unwrap_or(CommandId::AbortLine);
                    self.execute(rt, command, '\0');
                }
                Step::Ready(key) => self.pump.push_key(key),
                Step::WaitTimeout => {
                    self.waiting = true;
                    return;
                }
                Step::Wait | Step::Empty => return,
            }
        }
    }
}

/// Reads lines from a terminal.
pub struct LineEditor<T: Terminal> {
    terminal: T,
    runtime: EditorRuntime,
}

impl<T: Terminal> LineEditor<T> {
    pub fn new(terminal: T, runtime: EditorRuntime) -> Self {
        Self { terminal, runtime }
    }

    pub fn runtime(&self) -> &EditorRuntime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut EditorRuntime {
        &mut self.runtime
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn read_line(&mut self, prompt: &str) -> Result<ReadLine> {
        self.read_line_with(prompt, "")
    }

    /// Reads a line with a right prompt. Falls back to plain line reading
    /// when the terminal cannot support editing.
    pub fn read_line_with(&mut self, prompt: &str, right_prompt: &str) -> Result<ReadLine> {
        if let Err(e) = self.terminal.caps().check() {
            warn!(error = %e, "line editing unavailable");
            return self.read_plain(prompt);
        }
        if let Err(e) = self.terminal.enter_raw() {
            warn!(error = %e, "cannot enter raw mode");
            return self.read_plain(prompt);
        }
        let result = self.edit(prompt, right_prompt);
        let restored = self.terminal.leave_raw();
        let line = result?;
        restored?;
        if let ReadLine::Line(text) = &line {
            self.runtime.record_line(text);
        }
        Ok(line)
    }

    fn read_plain(&mut self, prompt: &str) -> Result<ReadLine> {
        match self.terminal.read_plain_line(prompt)? {
            Some(line) => {
                self.runtime.record_line(&line);
                Ok(ReadLine::Line(line))
            }
            None => Ok(ReadLine::Eof),
        }
    }

    fn edit(&mut self, prompt: &str, right_prompt: &str) -> Result<ReadLine> {
        let mut renderer = Renderer::new(
            self.terminal.caps(),
            self.terminal.size(),
            &self.runtime.config,
        );
        renderer.set_prompt(prompt, right_prompt);
        let mut session = Session::new(&self.runtime, renderer);
        debug!(mode = %session.state().mode, "session started");

        let mut out = Vec::new();
        loop {
            session.render(&mut out)?;
            self.send(&mut out)?;
            if session.is_done() {
                break;
            }

            let timeout = session
                .wants_timeout()
                .then_some(self.runtime.config.key_timeout);
            match self.terminal.read_byte(timeout) {
                Ok(ReadResult::Byte(byte)) => session.feed(byte, &mut self.runtime),
                Ok(ReadResult::Timeout) => session.timeout(&mut self.runtime),
                Ok(ReadResult::Eof) => session.end_of_input(),
                Err(Error::Io(e)) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    warn!(error = %e, "read failed");
                    session.end_of_input();
                }
            }
            if self.terminal.take_resized() {
                session.resize(self.terminal.size());
            }
        }

        session.finish(&mut out)?;
        self.send(&mut out)?;
        let status = session.status();
        debug!(?status, "session ended");
        Ok(session.into_result())
    }

    fn send(&mut self, out: &mut Vec<u8>) -> Result<()> {
        if out.is_empty() {
            return Ok(());
        }
        self.terminal.write_all(out)?;
        self.terminal.flush()?;
        out.clear();
        Ok(())
    }
}
