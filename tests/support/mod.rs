#![allow(dead_code)]

pub mod mock_completer;
pub mod mock_terminal;

use shline::{Config, EditStyle, EditorRuntime, ModeId, Renderer, Session, Status, TermCaps};

pub const PROMPT: &str = "$ ";

/// A session on an 80x24 ANSI terminal, driven byte by byte.
pub struct Harness {
    pub rt: EditorRuntime,
    pub session: Session,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn emacs() -> Self {
        Self::with_config(Config::builder().initial_mode(EditStyle::Emacs).build())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_runtime(EditorRuntime::new(config))
    }

    pub fn with_runtime(rt: EditorRuntime) -> Self {
        let session = Self::session(&rt, TermCaps::ansi(), (80, 24));
        Self { rt, session }
    }

    pub fn with_terminal(config: Config, caps: TermCaps, size: (u16, u16)) -> Self {
        let rt = EditorRuntime::new(config);
        let session = Self::session(&rt, caps, size);
        Self { rt, session }
    }

    fn session(rt: &EditorRuntime, caps: TermCaps, size: (u16, u16)) -> Session {
        let mut renderer = Renderer::new(caps, size, &rt.config);
        renderer.set_prompt(PROMPT, "");
        Session::new(rt, renderer)
    }

    /// Runtime with `lines` already entered, oldest first.
    pub fn with_history(config: Config, lines: &[&str]) -> Self {
        let mut rt = EditorRuntime::new(config);
        for line in lines {
            rt.record_line(line);
        }
        Self::with_runtime(rt)
    }

    pub fn keys(&mut self, input: &str) -> &mut Self {
        self.session.feed_bytes(input.as_bytes(), &mut self.rt);
        self
    }

    pub fn timeout(&mut self) -> &mut Self {
        self.session.timeout(&mut self.rt);
        self
    }

    /// A lone escape, settled by the key timeout.
    pub fn esc(&mut self) -> &mut Self {
        self.keys("\x1b").timeout()
    }

    /// Starts the next line on the same runtime, recording the accepted one.
    pub fn next_line(&mut self) -> &mut Self {
        if self.session.status() == Status::Accepted {
            let line = self.text();
            self.rt.record_line(&line);
        }
        self.session = Self::session(&self.rt, TermCaps::ansi(), (80, 24));
        self
    }

    pub fn text(&self) -> String {
        self.session.state().text()
    }

    pub fn cursor(&self) -> usize {
        self.session.state().cursor()
    }

    pub fn mode(&self) -> ModeId {
        self.session.state().mode
    }

    pub fn status(&self) -> Status {
        self.session.status()
    }

    /// Whether an alert is pending, clearing it.
    pub fn take_alert(&mut self) -> bool {
        std::mem::take(&mut self.session.state_mut().alert)
    }

    pub fn render(&mut self) -> Vec<u8> {
        let mut out = Vec::new();
        self.session.render(&mut out).unwrap();
        out
    }
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
