use std::collections::VecDeque;
use std::time::Duration;

use shline::{ReadResult, Result, TermCaps, Terminal};

#[derive(Debug, Clone, Copy)]
pub enum Input {
    Byte(u8),
    /// Nothing arrives for longer than the key timeout.
    Pause,
}

/// A scripted terminal that records what is written to it.
pub struct MockTerminal {
    caps: TermCaps,
    size: (u16, u16),
    input: VecDeque<Input>,
    pub output: Vec<u8>,
    pub raw: bool,
    pub raw_entered: usize,
    plain_lines: VecDeque<String>,
    pub plain_prompts: Vec<String>,
}

impl MockTerminal {
    pub fn new() -> Self {
        Self {
            caps: TermCaps::ansi(),
            size: (80, 24),
            input: VecDeque::new(),
            output: Vec::new(),
            raw: false,
            raw_entered: 0,
            plain_lines: VecDeque::new(),
            plain_prompts: Vec::new(),
        }
    }

    /// A terminal without cursor control.
    pub fn dumb() -> Self {
        Self {
            caps: TermCaps::empty(),
            ..Self::new()
        }
    }

    pub fn input(mut self, bytes: &str) -> Self {
        self.input.extend(bytes.bytes().map(Input::Byte));
        self
    }

    pub fn pause(mut self) -> Self {
        self.input.push_back(Input::Pause);
        self
    }

    pub fn plain_line(mut self, line: &str) -> Self {
        self.plain_lines.push_back(line.to_string());
        self
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Terminal for MockTerminal {
    fn caps(&self) -> TermCaps {
        self.caps
    }

    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn enter_raw(&mut self) -> Result<()> {
        self.raw = true;
        self.raw_entered += 1;
        Ok(())
    }

    fn leave_raw(&mut self) -> Result<()> {
        self.raw = false;
        Ok(())
    }

    fn read_byte(&mut self, timeout: Option<Duration>) -> Result<ReadResult> {
        loop {
            match self.input.front().copied() {
                None => return Ok(ReadResult::Eof),
                Some(Input::Byte(b)) => {
                    self.input.pop_front();
                    return Ok(ReadResult::Byte(b));
                }
                Some(Input::Pause) => {
                    self.input.pop_front();
                    if timeout.is_some() {
                        return Ok(ReadResult::Timeout);
                    }
                }
            }
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn take_resized(&mut self) -> bool {
        false
    }

    fn read_plain_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.plain_prompts.push(prompt.to_string());
        Ok(self.plain_lines.pop_front())
    }
}
