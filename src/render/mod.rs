//! Incremental terminal repaint.
//!
//! The [`Renderer`] keeps a model of what it last painted: the screen
//! coordinate of every character of the edit line, where the right prompt
//! went, the status line and the candidate area. Each repaint diffs the new
//! editor state against that model and only sends what changed, so painting
//! an unchanged state emits nothing.
//!
//! Positions are relative to the line the prompt starts on. The terminal
//! cursor may rest on the boundary column after the last cell of a line is
//! filled when the terminal has [`TermCaps::EAT_NEWLINE_GLITCH`]; it is
//! moved off it before any relative cursor motion.

mod candidates;
mod width;

use std::io::{self, Write};
use std::mem;

use crossterm::QueueableCommand;
use crossterm::cursor::{MoveDown, MoveTo, MoveToColumn, MoveUp};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use tracing::trace;

pub use candidates::CandidateLayout;
pub use width::{char_width, str_width};

use crate::complete::{Candidate, CandidateList};
use crate::config::{Config, ControlCharStyle};
use crate::history::Direction;
use crate::keymap::ModeId;
use crate::state::{EditorState, Redraw};
use crate::term::TermCaps;
use width::Glyph;

/// A screen position relative to the first prompt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub line: usize,
    pub column: usize,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { line: 0, column: 0 };

    fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attr {
    Normal,
    Dim,
    Reverse,
}

/// The painted edit line.
#[derive(Debug, Clone)]
struct Screen {
    text: Vec<char>,
    prediction_start: usize,
    /// Where each character is drawn.
    starts: Vec<Pos>,
    /// Where the cursor rests after each character.
    ends: Vec<Pos>,
    right_prompt: Option<Pos>,
    edit_lines: usize,
    status: Option<String>,
    candidates: Option<PaintedCandidates>,
    total_lines: usize,
}

impl Screen {
    /// The cursor position before character `index`.
    fn before(&self, index: usize, prompt_end: Pos) -> Pos {
        match index.checked_sub(1) {
            Some(i) => self.ends[i],
            None => prompt_end,
        }
    }

    fn end(&self, prompt_end: Pos) -> Pos {
        self.ends.last().copied().unwrap_or(prompt_end)
    }

    fn status_line(&self) -> usize {
        self.edit_lines
    }

    fn candidate_line(&self) -> usize {
        self.edit_lines + usize::from(self.status.is_some())
    }
}

#[derive(Debug, Clone)]
struct PaintedCandidates {
    items: Vec<Candidate>,
    layout: CandidateLayout,
    page: usize,
    selected: Option<usize>,
    start_line: usize,
    lines: usize,
}

/// Paints an [`EditorState`] by sending the difference from the previous
/// paint.
#[derive(Debug)]
pub struct Renderer {
    caps: TermCaps,
    width: usize,
    height: usize,
    style: ControlCharStyle,
    force_right_prompt: bool,
    prompt: String,
    right_prompt: String,
    prompt_end: Pos,
    screen: Option<Screen>,
    cur: Pos,
    /// Lines from the origin down that exist on the screen; zero before
    /// the first paint.
    lines: usize,
    attr: Attr,
}

impl Renderer {
    pub fn new(caps: TermCaps, (width, height): (u16, u16), config: &Config) -> Self {
        Self {
            caps,
            width: usize::from(width).max(1),
            height: usize::from(height).max(1),
            style: config.control_chars,
            force_right_prompt: config.force_right_prompt,
            prompt: String::new(),
            right_prompt: String::new(),
            prompt_end: Pos::ORIGIN,
            screen: None,
            cur: Pos::ORIGIN,
            lines: 0,
            attr: Attr::Normal,
        }
    }

    /// Sets the prompts for the next paint, which is then a full one.
    pub fn set_prompt(&mut self, prompt: &str, right_prompt: &str) {
        self.prompt = prompt.to_string();
        self.right_prompt = right_prompt.to_string();
        self.prompt_end = self.measure_prompt();
        self.screen = None;
    }

    /// Adopts a new terminal size. The screen model is dropped since the
    /// terminal has reflowed what was on it.
    pub fn resize(&mut self, (width, height): (u16, u16)) {
        self.width = usize::from(width).max(1);
        self.height = usize::from(height).max(1);
        self.prompt_end = self.measure_prompt();
        self.screen = None;
        self.cur.column = self.cur.column.min(self.width - 1);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Geometry of the candidate area last painted.
    pub fn layout(&self) -> Option<&CandidateLayout> {
        let screen = self.screen.as_ref()?;
        screen.candidates.as_ref().map(|c| &c.layout)
    }

    /// Where the terminal cursor is.
    pub fn cursor(&self) -> Pos {
        self.cur
    }

    // ----- geometry -----

    /// Where a glyph `w` cells wide is drawn when the cursor sits at `pos`,
    /// and where the cursor rests after it.
    fn place(&self, pos: Pos, w: usize) -> (Pos, Pos) {
        let w = w.min(self.width);
        let mut start = pos;
        if w > 0 && (start.column >= self.width || start.column + w > self.width) {
            start = Pos::new(start.line + 1, 0);
        }
        let mut end = Pos::new(start.line, start.column + w);
        if end.column >= self.width && !self.caps.contains(TermCaps::EAT_NEWLINE_GLITCH) {
            end = Pos::new(end.line + 1, 0);
        }
        (start, end)
    }

    /// The position a cursor at `pos` is displayed at.
    fn normalize(&self, pos: Pos) -> Pos {
        if pos.column >= self.width {
            Pos::new(pos.line + 1, 0)
        } else {
            pos
        }
    }

    fn control_effect(&self, pos: Pos, c: char) -> Pos {
        let last = self.width - 1;
        match c {
            '\r' => Pos::new(pos.line, 0),
            '\n' => Pos::new(pos.line + 1, pos.column.min(last)),
            '\t' => Pos::new(pos.line, ((pos.column / 8 + 1) * 8).min(last)),
            '\x08' => Pos::new(pos.line, pos.column.min(last).saturating_sub(1)),
            _ => pos,
        }
    }

    fn measure_prompt(&self) -> Pos {
        let mut pos = Pos::ORIGIN;
        for piece in prompt_pieces(&self.prompt) {
            pos = match piece {
                PromptPiece::Sequence(_) => pos,
                PromptPiece::Newline => Pos::new(self.normalize(pos).line + 1, 0),
                PromptPiece::Char(c) => self.place(pos, char_width(c)).1,
            };
        }
        pos
    }

    /// Lays out the edit line after the prompt.
    fn frame(&self, state: &EditorState) -> Screen {
        let text = state.buffer.chars().to_vec();
        let mut starts = Vec::with_capacity(text.len());
        let mut ends = Vec::with_capacity(text.len());
        let mut pos = self.prompt_end;
        for &c in &text {
            let (start, end) = match width::glyph(c, self.style) {
                Glyph::Text(_, w) => self.place(pos, w),
                Glyph::Escaped(s) => {
                    let (start, mut end) = self.place(pos, 1);
                    for _ in s.chars().skip(1) {
                        end = self.place(end, 1).1;
                    }
                    (start, end)
                }
                Glyph::Control(c) => (pos, self.control_effect(pos, c)),
            };
            starts.push(start);
            ends.push(end);
            pos = end;
        }

        let end = self.normalize(pos);
        let right_prompt = self.right_prompt_position(end);
        let edit_lines = end.line.max(right_prompt.map_or(0, |p| p.line)) + 1;
        Screen {
            prediction_start: state.buffer.prediction_start(),
            text,
            starts,
            ends,
            right_prompt,
            edit_lines,
            status: status_text(state),
            candidates: None,
            total_lines: edit_lines,
        }
    }

    /// The right prompt sits at the end of the last edit line, one column
    /// short of the margin, if it fits after the text.
    fn right_prompt_position(&self, end: Pos) -> Option<Pos> {
        let w = str_width(&self.right_prompt);
        if w == 0 || w + 1 >= self.width {
            return None;
        }
        let column = self.width - 1 - w;
        if end.column < column {
            Some(Pos::new(end.line, column))
        } else if self.force_right_prompt {
            Some(Pos::new(end.line + 1, column))
        } else {
            None
        }
    }

    // ----- painting -----

    /// Brings the terminal up to date with `state`. Consumes the state's
    /// alert and redraw requests.
    pub fn render(&mut self, state: &mut EditorState, out: &mut Vec<u8>) -> io::Result<()> {
        let before = out.len();
        let alert = mem::take(&mut state.alert);
        match mem::take(&mut state.redraw) {
            Redraw::None => {}
            Redraw::All => self.screen = None,
            Redraw::ClearScreen => {
                out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
                self.cur = Pos::ORIGIN;
                self.lines = 1;
                self.screen = None;
            }
        }

        let mut next = self.frame(state);
        match self.screen.take() {
            None => self.paint_all(&mut next, state, out)?,
            Some(old) => self.update(old, &mut next, state, out)?,
        }

        let target = self.cursor_target(&next, state);
        self.move_to(target, out)?;
        self.set_attr(Attr::Normal, out)?;
        if alert && self.caps.contains(TermCaps::BELL) {
            out.write_all(b"\x07")?;
        }
        self.screen = Some(next);
        trace!(bytes = out.len() - before, "repaint");
        Ok(())
    }

    fn cursor_target(&self, screen: &Screen, state: &EditorState) -> Pos {
        if let Some(status) = &screen.status {
            let w = str_width(status).min(self.width - 1);
            return Pos::new(screen.status_line(), w);
        }
        let cursor = state.buffer.cursor();
        let pos = match screen.starts.get(cursor) {
            Some(&start) => start,
            None => screen.end(self.prompt_end),
        };
        self.normalize(pos)
    }

    fn paint_all(
        &mut self,
        next: &mut Screen,
        state: &EditorState,
        out: &mut Vec<u8>,
    ) -> io::Result<()> {
        if self.lines == 0 {
            out.write_all(b"\r")?;
            self.cur = Pos::ORIGIN;
            self.lines = 1;
        } else {
            out.write_all(b"\r")?;
            self.cur.column = 0;
            self.move_to(Pos::ORIGIN, out)?;
        }
        let used = self.lines;
        self.clear_below(0, used, out)?;

        self.paint_prompt(out)?;
        self.paint_text(next, 0, out)?;
        self.paint_right_prompt(next, out)?;
        if let Some(status) = next.status.clone() {
            self.paint_status(next.status_line(), &status, out)?;
        }
        next.candidates = self.paint_candidates(state, next, None, out)?;
        next.total_lines = next.candidate_line() + next.candidates.as_ref().map_or(0, |c| c.lines);
        Ok(())
    }

    fn update(
        &mut self,
        old: Screen,
        next: &mut Screen,
        state: &EditorState,
        out: &mut Vec<u8>,
    ) -> io::Result<()> {
        // Lines from here down are repainted from scratch.
        let mut dirty: Option<usize> = None;

        let diff = first_difference(&old, next);
        if diff < old.text.len() || diff < next.text.len() || old.right_prompt != next.right_prompt {
            self.paint_text(next, diff, out)?;
            self.clear_eol(out)?;
            let end_line = self.normalize(next.end(self.prompt_end)).line;
            for line in end_line + 1..next.edit_lines.min(self.lines) {
                self.move_to(Pos::new(line, 0), out)?;
                self.clear_eol(out)?;
            }
            self.paint_right_prompt(next, out)?;
            if old.edit_lines != next.edit_lines {
                dirty = Some(next.edit_lines);
            }
        }

        if old.status.is_some() != next.status.is_some() {
            dirty = Some(dirty.map_or(next.status_line(), |d| d.min(next.status_line())));
        } else if dirty.is_none() && old.status != next.status {
            if let Some(status) = next.status.clone() {
                self.paint_status(next.status_line(), &status, out)?;
            }
        }

        match (dirty, old.candidates, state.candidates.as_ref()) {
            (None, None, None) => {}
            (None, Some(painted), Some(list))
                if painted.items == list.candidates
                    && painted.start_line == next.candidate_line() =>
            {
                let page = list
                    .selected
                    .and_then(|i| painted.layout.page_of(i))
                    .unwrap_or(0);
                if page == painted.page {
                    next.candidates = Some(self.rehighlight(painted, list, out)?);
                } else {
                    self.clear_below(painted.start_line, old.total_lines, out)?;
                    next.candidates = self.paint_candidates(state, next, Some(painted.layout), out)?;
                }
            }
            (dirty, painted, _) => {
                let from = dirty.unwrap_or(next.candidate_line());
                self.clear_below(from, old.total_lines, out)?;
                if let Some(status) = next.status.clone().filter(|_| next.status_line() >= from) {
                    self.paint_status(next.status_line(), &status, out)?;
                }
                let layout = painted
                    .filter(|p| state.candidates.as_ref().is_some_and(|l| l.candidates == p.items))
                    .map(|p| p.layout);
                next.candidates = self.paint_candidates(state, next, layout, out)?;
            }
        }
        next.total_lines = next.candidate_line() + next.candidates.as_ref().map_or(0, |c| c.lines);
        Ok(())
    }

    fn paint_prompt(&mut self, out: &mut Vec<u8>) -> io::Result<()> {
        let prompt = mem::take(&mut self.prompt);
        for piece in prompt_pieces(&prompt) {
            match piece {
                PromptPiece::Sequence(seq) => out.write_all(seq.as_bytes())?,
                PromptPiece::Newline => {
                    let line = self.normalize(self.cur).line + 1;
                    self.move_to(Pos::new(line, 0), out)?;
                }
                PromptPiece::Char(c) => self.put(c, char_width(c), out)?,
            }
        }
        self.prompt = prompt;
        Ok(())
    }

    /// Paints the edit line from character `from` to its end.
    fn paint_text(&mut self, screen: &Screen, from: usize, out: &mut Vec<u8>) -> io::Result<()> {
        let before = screen.before(from, self.prompt_end);
        if self.cur != before {
            self.move_to(self.normalize(before), out)?;
        }
        for (i, &c) in screen.text.iter().enumerate().skip(from) {
            let attr = if i >= screen.prediction_start {
                Attr::Dim
            } else {
                Attr::Normal
            };
            self.set_attr(attr, out)?;
            match width::glyph(c, self.style) {
                Glyph::Text(c, w) => self.put(c, w, out)?,
                Glyph::Escaped(s) => {
                    for c in s.chars() {
                        self.put(c, 1, out)?;
                    }
                }
                Glyph::Control(c) => {
                    out.queue(Print(c))?;
                    self.cur = self.control_effect(self.cur, c);
                    self.lines = self.lines.max(self.cur.line + 1);
                }
            }
        }
        self.set_attr(Attr::Normal, out)
    }

    /// Prints one character, filling the rest of the line first when it
    /// does not fit there.
    fn put(&mut self, c: char, w: usize, out: &mut Vec<u8>) -> io::Result<()> {
        let (start, end) = self.place(self.cur, w);
        if start.line > self.cur.line && self.cur.column < self.width {
            let fill = self.width - self.cur.column;
            out.queue(Print(" ".repeat(fill)))?;
        }
        out.queue(Print(c))?;
        self.cur = end;
        self.lines = self.lines.max(end.line + 1);
        Ok(())
    }

    fn paint_right_prompt(&mut self, screen: &Screen, out: &mut Vec<u8>) -> io::Result<()> {
        let Some(pos) = screen.right_prompt else {
            return Ok(());
        };
        self.move_to(pos, out)?;
        out.queue(Print(&self.right_prompt))?;
        self.cur.column += str_width(&self.right_prompt);
        Ok(())
    }

    fn paint_status(&mut self, line: usize, status: &str, out: &mut Vec<u8>) -> io::Result<()> {
        self.move_to(Pos::new(line, 0), out)?;
        let (shown, w) = width::truncate(status, self.width - 1);
        out.queue(Print(shown))?;
        self.cur.column = w;
        self.clear_eol(out)
    }

    fn paint_candidates(
        &mut self,
        state: &EditorState,
        screen: &Screen,
        layout: Option<CandidateLayout>,
        out: &mut Vec<u8>,
    ) -> io::Result<Option<PaintedCandidates>> {
        let Some(list) = state.candidates.as_ref().filter(|l| !l.is_empty()) else {
            return Ok(None);
        };
        let start_line = screen.candidate_line();
        let layout = layout.unwrap_or_else(|| {
            let max_rows = self.height.saturating_sub(start_line + 1).max(1);
            CandidateLayout::compute(&list.candidates, self.width, max_rows)
        });
        let page = list
            .selected
            .and_then(|i| layout.page_of(i))
            .unwrap_or(0);

        for row in 0..layout.rows() {
            for (x, w, items) in layout.page_columns(page) {
                let index = items.start + row;
                if index < items.end {
                    self.paint_candidate(list, index, Pos::new(start_line + row, x), w, out)?;
                }
            }
        }
        let mut lines = layout.rows();
        if layout.page_count() > 1 {
            self.move_to(Pos::new(start_line + lines, 0), out)?;
            let footer = format!("Page {}/{}", page + 1, layout.page_count());
            self.cur.column += footer.len();
            out.queue(Print(footer))?;
            lines += 1;
        }
        Ok(Some(PaintedCandidates {
            items: list.candidates.clone(),
            layout,
            page,
            selected: list.selected,
            start_line,
            lines,
        }))
    }

    fn candidate_cell(&self, painted: &PaintedCandidates, index: usize) -> Option<(Pos, usize)> {
        painted
            .layout
            .page_columns(painted.page)
            .into_iter()
            .find(|(_, _, items)| items.contains(&index))
            .map(|(x, w, items)| {
                (Pos::new(painted.start_line + index - items.start, x), w)
            })
    }

    /// Repaints only the cells whose selection state changed.
    fn rehighlight(
        &mut self,
        mut painted: PaintedCandidates,
        list: &CandidateList,
        out: &mut Vec<u8>,
    ) -> io::Result<PaintedCandidates> {
        if painted.selected != list.selected {
            for index in [painted.selected, list.selected].into_iter().flatten() {
                if let Some((pos, w)) = self.candidate_cell(&painted, index) {
                    self.paint_candidate(list, index, pos, w, out)?;
                }
            }
            painted.selected = list.selected;
        }
        Ok(painted)
    }

    fn paint_candidate(
        &mut self,
        list: &CandidateList,
        index: usize,
        pos: Pos,
        w: usize,
        out: &mut Vec<u8>,
    ) -> io::Result<()> {
        if pos.column + 1 >= self.width {
            return Ok(());
        }
        let label = candidates::label(&list.candidates[index]);
        let (shown, shown_w) = width::truncate(&label, w.min(self.width - 1 - pos.column));
        self.move_to(pos, out)?;
        let attr = if list.selected == Some(index) {
            Attr::Reverse
        } else {
            Attr::Normal
        };
        self.set_attr(attr, out)?;
        out.queue(Print(shown))?;
        self.cur.column += shown_w;
        self.set_attr(Attr::Normal, out)
    }

    /// Moves below the edit line, erasing the status line and candidate
    /// area. The next paint starts afresh from the cursor.
    pub fn finish(&mut self, out: &mut Vec<u8>) -> io::Result<()> {
        let Some(screen) = self.screen.take() else {
            return Ok(());
        };
        self.set_attr(Attr::Normal, out)?;
        self.clear_below(screen.edit_lines, screen.total_lines, out)?;
        self.move_to(Pos::new(screen.edit_lines, 0), out)?;
        self.cur = Pos::ORIGIN;
        self.lines = 0;
        Ok(())
    }

    // ----- terminal primitives -----

    fn set_attr(&mut self, attr: Attr, out: &mut Vec<u8>) -> io::Result<()> {
        if self.attr == attr || !self.caps.contains(TermCaps::ATTRIBUTES) {
            return Ok(());
        }
        out.queue(SetAttribute(Attribute::Reset))?;
        match attr {
            Attr::Normal => {}
            Attr::Dim => {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            Attr::Reverse => {
                out.queue(SetAttribute(Attribute::Reverse))?;
            }
        }
        self.attr = attr;
        Ok(())
    }

    fn clear_eol(&mut self, out: &mut Vec<u8>) -> io::Result<()> {
        if self.cur.column < self.width {
            out.queue(Clear(ClearType::UntilNewLine))?;
        }
        Ok(())
    }

    /// Erases lines `from..to` that exist on the screen.
    fn clear_below(&mut self, from: usize, to: usize, out: &mut Vec<u8>) -> io::Result<()> {
        let to = to.min(self.lines);
        if from >= to {
            return Ok(());
        }
        self.move_to(Pos::new(from, 0), out)?;
        if self.caps.contains(TermCaps::CLEAR_EOS) {
            out.queue(Clear(ClearType::FromCursorDown))?;
            return Ok(());
        }
        for line in from..to {
            self.move_to(Pos::new(line, 0), out)?;
            out.queue(Clear(ClearType::UntilNewLine))?;
        }
        Ok(())
    }

    /// Moves the terminal cursor to `target`, which must not be on the
    /// boundary column.
    fn move_to(&mut self, target: Pos, out: &mut Vec<u8>) -> io::Result<()> {
        if self.cur == target {
            return Ok(());
        }
        if self.attr != Attr::Normal && self.caps.contains(TermCaps::MOVE_RESETS_ATTRS) {
            self.set_attr(Attr::Normal, out)?;
        }
        if self.cur.column >= self.width {
            if self.cur.line + 1 >= self.lines {
                // Print and erase a space so the terminal wraps.
                out.write_all(b" \r")?;
                out.queue(Clear(ClearType::UntilNewLine))?;
                self.cur = Pos::new(self.cur.line + 1, 0);
                self.lines = self.lines.max(self.cur.line + 1);
            } else {
                out.write_all(b"\r")?;
                self.cur.column = 0;
            }
            if self.cur == target {
                return Ok(());
            }
        }

        if target.line < self.cur.line {
            out.queue(MoveUp(to_u16(self.cur.line - target.line)))?;
        } else if target.line > self.cur.line {
            let last = self.lines.saturating_sub(1).max(self.cur.line);
            let down = target.line.min(last) - self.cur.line;
            if down > 0 {
                out.queue(MoveDown(to_u16(down)))?;
            }
            for _ in last..target.line {
                out.write_all(b"\r\n")?;
                self.cur.column = 0;
            }
            self.lines = self.lines.max(target.line + 1);
        }
        self.cur.line = target.line;

        if self.cur.column != target.column {
            if target.column == 0 {
                out.write_all(b"\r")?;
            } else {
                out.queue(MoveToColumn(to_u16(target.column)))?;
            }
        }
        self.cur = target;
        Ok(())
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Index of the first character painted differently.
fn first_difference(old: &Screen, next: &Screen) -> usize {
    let common = old.text.len().min(next.text.len());
    (0..common)
        .find(|&i| {
            old.text[i] != next.text[i]
                || (i >= old.prediction_start) != (i >= next.prediction_start)
        })
        .unwrap_or(common)
}

fn status_text(state: &EditorState) -> Option<String> {
    let search = state.search.as_ref()?;
    let lead = match (state.mode, search.direction) {
        (ModeId::ViSearch, Direction::Backward) => "/",
        (ModeId::ViSearch, Direction::Forward) => "?",
        (_, Direction::Backward) => "bck-i-search: ",
        (_, Direction::Forward) => "fwd-i-search: ",
    };
    let mut status = lead.to_string();
    for &c in &search.pattern {
        match width::glyph(c, ControlCharStyle::Escaped) {
            Glyph::Text(c, _) | Glyph::Control(c) => status.push(c),
            Glyph::Escaped(s) => status.push_str(&s),
        }
    }
    Some(status)
}

enum PromptPiece<'a> {
    Char(char),
    Newline,
    /// A CSI sequence, passed through without taking room.
    Sequence(&'a str),
}

fn prompt_pieces(prompt: &str) -> Vec<PromptPiece<'_>> {
    let mut pieces = Vec::new();
    let mut iter = prompt.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        match c {
            '\n' => pieces.push(PromptPiece::Newline),
            '\x1b' if iter.peek().is_some_and(|&(_, c)| c == '[') => {
                let mut end = prompt.len();
                iter.next();
                for (j, c) in iter.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        end = j + c.len_utf8();
                        break;
                    }
                }
                pieces.push(PromptPiece::Sequence(&prompt[i..end]));
            }
            c if char_width(c) > 0 => pieces.push(PromptPiece::Char(c)),
            _ => {}
        }
    }
    pieces
}
