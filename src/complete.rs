//! The completion boundary.
//!
//! Candidate generation belongs to the shell. The editor finds the word
//! being completed, asks a [`Completer`] for candidates and manages the
//! selection among them.

use crate::word::is_blank;

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    /// Shown next to the value in the candidate area.
    pub description: Option<String>,
    /// Inserting this candidate completes the word, so a space follows it.
    pub terminate_word: bool,
}

impl Candidate {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
            terminate_word: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// A candidate after which the word continues, such as a directory.
    pub fn partial(mut self) -> Self {
        self.terminate_word = false;
        self
    }
}

/// What the completer is asked about.
#[derive(Debug, Clone, Copy)]
pub struct CompletionContext<'a> {
    /// The confirmed edit line.
    pub line: &'a [char],
    /// Cursor index in characters.
    pub cursor: usize,
    /// Index where the word being completed starts.
    pub word_start: usize,
}

impl CompletionContext<'_> {
    /// The part of the word before the cursor.
    pub fn word(&self) -> String {
        self.line[self.word_start..self.cursor].iter().collect()
    }
}

pub trait Completer {
    fn generate_candidates(&self, ctx: &CompletionContext<'_>) -> Vec<Candidate>;
}

impl<F> Completer for F
where
    F: Fn(&CompletionContext<'_>) -> Vec<Candidate>,
{
    fn generate_candidates(&self, ctx: &CompletionContext<'_>) -> Vec<Candidate> {
        self(ctx)
    }
}

fn is_word_separator(c: char) -> bool {
    is_blank(c) || matches!(c, ';' | '&' | '|' | '<' | '>' | '(' | ')')
}

/// Start index of the word ending at `cursor`.
pub fn word_start(line: &[char], cursor: usize) -> usize {
    let mut i = cursor.min(line.len());
    while i > 0 && !is_word_separator(line[i - 1]) {
        i -= 1;
    }
    i
}

/// The longest prefix shared by all candidate values.
pub fn common_prefix(candidates: &[Candidate]) -> String {
    let Some((first, rest)) = candidates.split_first() else {
        return String::new();
    };
    let mut len = first.value.len();
    for candidate in rest {
        len = first
            .value
            .char_indices()
            .zip(candidate.value.chars())
            .take_while(|((_, a), b)| a == b)
            .map(|((i, a), _)| i + a.len_utf8())
            .last()
            .unwrap_or(0)
            .min(len);
    }
    first.value[..len].to_string()
}

/// The candidates on screen and which one, if any, is in the line.
#[derive(Debug, Clone)]
pub struct CandidateList {
    pub candidates: Vec<Candidate>,
    pub selected: Option<usize>,
    pub word_start: usize,
    /// End of the text currently occupying the word.
    pub word_end: usize,
    /// The word as it was before any candidate replaced it.
    pub original: Vec<char>,
}

impl CandidateList {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.selected.and_then(|i| self.candidates.get(i))
    }

    /// The text the word takes for the current selection.
    pub fn replacement(&self) -> Vec<char> {
        match self.selected_candidate() {
            Some(candidate) => candidate.value.chars().collect(),
            None => self.original.clone(),
        }
    }

    /// Moves the selection by `offset` candidates, wrapping through the
    /// "no selection" state that shows the original word.
    pub fn step(&mut self, offset: isize) {
        let slots = self.len() as isize + 1;
        let current = self.selected.map_or(self.len() as isize, |i| i as isize);
        let next = (current + offset).rem_euclid(slots) as usize;
        self.selected = (next < self.len()).then_some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_prefix_is_char_aligned() {
        let list = [Candidate::new("éa"), Candidate::new("éb")];
        assert_eq!(common_prefix(&list), "é");
        let list = [Candidate::new("foo"), Candidate::new("bar")];
        assert_eq!(common_prefix(&list), "");
        assert_eq!(common_prefix(&[Candidate::new("x")]), "x");
    }

    #[test]
    fn word_start_stops_at_separators() {
        let line: Vec<char> = "ls foo;ba".chars().collect();
        assert_eq!(word_start(&line, line.len()), 7);
        assert_eq!(word_start(&line, 6), 3);
    }

    #[test]
    fn step_wraps_through_original() {
        let mut list = CandidateList {
            candidates: vec![Candidate::new("a"), Candidate::new("b")],
            selected: None,
            word_start: 0,
            word_end: 0,
            original: Vec::new(),
        };
        list.step(1);
        assert_eq!(list.selected, Some(0));
        list.step(1);
        list.step(1);
        assert_eq!(list.selected, None);
        list.step(-1);
        assert_eq!(list.selected, Some(1));
    }
}
