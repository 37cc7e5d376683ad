use shline::{Candidate, Completer, CompletionContext};

/// Completes the word before the cursor from a fixed list.
pub struct WordList {
    words: Vec<&'static str>,
}

impl WordList {
    pub fn new(words: &[&'static str]) -> Self {
        Self {
            words: words.to_vec(),
        }
    }
}

impl Completer for WordList {
    fn generate_candidates(&self, ctx: &CompletionContext<'_>) -> Vec<Candidate> {
        let word = ctx.word();
        self.words
            .iter()
            .filter(|w| w.starts_with(&word))
            .map(|w| Candidate::new(*w))
            .collect()
    }
}
