//! Word boundaries for the word motions.
//!
//! A word is a maximal run of characters sharing one non-zero class; class
//! zero separates words. The four kinds differ only in how they classify
//! characters.

/// Word flavours used by the motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    /// A maximal run of non-blank characters.
    Bigword,
    /// A run of characters that are neither blank nor punctuation.
    Semiword,
    /// Either a run of alphanumerics and underscores, or a run of other
    /// non-blank characters.
    Viword,
    /// A run of alphanumerics.
    Emacsword,
}

pub fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || (c.is_whitespace() && !matches!(c, '\n' | '\r' | '\x0b' | '\x0c'))
}

pub fn is_punct(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control()
}

impl WordKind {
    fn class(self, c: char) -> u8 {
        match self {
            WordKind::Bigword => u8::from(!is_blank(c)),
            WordKind::Semiword => u8::from(!is_blank(c) && !is_punct(c)),
            WordKind::Viword => {
                if is_blank(c) {
                    0
                } else if c == '_' || c.is_alphanumeric() {
                    1
                } else {
                    2
                }
            }
            WordKind::Emacsword => u8::from(c.is_alphanumeric()),
        }
    }
}

fn class_at(s: &[char], i: usize, kind: WordKind) -> u8 {
    s.get(i).map_or(0, |&c| kind.class(c))
}

fn is_word_start(s: &[char], i: usize, kind: WordKind) -> bool {
    let class = class_at(s, i, kind);
    class != 0 && (i == 0 || class_at(s, i - 1, kind) != class)
}

/// Index of the start of the next word after `i`.
///
/// Without `progress`, an index already at the start of a word is returned
/// unchanged. The result is `s.len()` when no word follows.
pub fn next_word_start(s: &[char], i: usize, kind: WordKind, progress: bool) -> usize {
    let len = s.len();
    if i >= len {
        return len;
    }
    if !progress && is_word_start(s, i, kind) {
        return i;
    }
    let mut j = i;
    let class = class_at(s, j, kind);
    if class != 0 {
        while j < len && class_at(s, j, kind) == class {
            j += 1;
        }
    }
    while j < len && class_at(s, j, kind) == 0 {
        j += 1;
    }
    j
}

/// Index of the last character of the word ending after `i` (or at `i`
/// without `progress`). The result is `s.len()` when no word ends there.
pub fn word_end(s: &[char], i: usize, kind: WordKind, progress: bool) -> usize {
    let len = s.len();
    let min = if progress { i + 1 } else { i };
    let mut j = i;
    loop {
        while j < len && class_at(s, j, kind) == 0 {
            j += 1;
        }
        if j >= len {
            return len;
        }
        let class = class_at(s, j, kind);
        while j + 1 < len && class_at(s, j + 1, kind) == class {
            j += 1;
        }
        if j >= min {
            return j;
        }
        j += 1;
    }
}

/// Index of the start of the word before `i` (or containing `i` without
/// `progress`). The result is `0` when no word precedes.
pub fn prev_word_start(s: &[char], i: usize, kind: WordKind, progress: bool) -> usize {
    let i = i.min(s.len());
    let mut j = if progress { i } else { (i + 1).min(s.len()) };
    while j > 0 && class_at(s, j - 1, kind) == 0 {
        j -= 1;
    }
    if j == 0 {
        return 0;
    }
    let class = class_at(s, j - 1, kind);
    while j > 0 && class_at(s, j - 1, kind) == class {
        j -= 1;
    }
    j
}

/// Index just past the end of the next word at or after `i`; the target of
/// the emacs forward-word motion.
pub fn next_word_end(s: &[char], i: usize, kind: WordKind) -> usize {
    let len = s.len();
    let mut j = i.min(len);
    while j < len && class_at(s, j, kind) == 0 {
        j += 1;
    }
    if j < len {
        let class = class_at(s, j, kind);
        while j < len && class_at(s, j, kind) == class {
            j += 1;
        }
    }
    j
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn viword_splits_alnum_from_punct() {
        let s = chars("foo.bar baz");
        assert_eq!(next_word_start(&s, 0, WordKind::Viword, true), 3);
        assert_eq!(next_word_start(&s, 3, WordKind::Viword, true), 4);
        assert_eq!(next_word_start(&s, 4, WordKind::Viword, true), 8);
        assert_eq!(next_word_start(&s, 0, WordKind::Bigword, true), 8);
    }

    #[test]
    fn word_end_progress() {
        let s = chars("ab cd");
        assert_eq!(word_end(&s, 0, WordKind::Bigword, true), 1);
        assert_eq!(word_end(&s, 1, WordKind::Bigword, true), 4);
        assert_eq!(word_end(&s, 1, WordKind::Bigword, false), 1);
    }

    #[test]
    fn prev_word_start_skips_blanks() {
        let s = chars("ab   cd");
        assert_eq!(prev_word_start(&s, 5, WordKind::Bigword, true), 0);
        assert_eq!(prev_word_start(&s, 6, WordKind::Bigword, true), 5);
        assert_eq!(prev_word_start(&s, 6, WordKind::Bigword, false), 5);
    }

    #[test]
    fn semiword_stops_at_punctuation() {
        let s = chars("a/b c");
        assert_eq!(next_word_start(&s, 0, WordKind::Semiword, true), 2);
        assert_eq!(next_word_end(&s, 0, WordKind::Emacsword), 1);
    }
}
