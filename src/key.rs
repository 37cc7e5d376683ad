use std::fmt;

use crate::config::TtySpecial;
use crate::error::KeySeqError;
use crate::trie::KeyTrie;

/// A single key unit as seen by the mode keymaps.
///
/// Ordinary input arrives as [`Key::Char`], including control characters.
/// Terminal escape sequences and the tty special characters are translated to
/// the symbolic variants before the keymap sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// A character, possibly a control character such as `'\x1b'`.
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Insert,
    Delete,
    PageUp,
    PageDown,
    Backspace,
    /// The tty interrupt character (usually ^C).
    Interrupt,
    /// The tty end-of-file character (usually ^D).
    Eof,
    /// The tty erase character (usually ^?).
    Erase,
    /// The tty line-kill character (usually ^U).
    Kill,
}

pub const ESCAPE: char = '\x1b';

impl Key {
    /// The character passed to a command invoked by this key.
    ///
    /// Symbolic keys carry no character and yield `'\0'`.
    pub fn as_char(self) -> char {
        match self {
            Key::Char(c) => c,
            _ => '\0',
        }
    }

    fn escape_letter(self) -> Option<&'static str> {
        Some(match self {
            Key::Char(_) => return None,
            Key::Up => "U",
            Key::Down => "D",
            Key::Left => "L",
            Key::Right => "R",
            Key::Home => "H",
            Key::End => "E",
            Key::Insert => "I",
            Key::Delete => "X",
            Key::PageUp => "P",
            Key::PageDown => "N",
            Key::Backspace => "B",
            Key::Interrupt => "!",
            Key::Eof => "#",
            Key::Erase => "?",
            Key::Kill => "$",
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(letter) = self.escape_letter() {
            return write!(f, "\\{letter}");
        }
        match self.as_char() {
            '\\' => f.write_str("\\\\"),
            '\x7f' => f.write_str("\\^?"),
            c if (c as u32) < 0x20 => write!(f, "\\^{}", char::from(c as u8 + 0x40)),
            c => write!(f, "{c}"),
        }
    }
}

/// Parses a key sequence written in binding notation.
///
/// Literal characters stand for themselves; a backslash introduces an
/// escape: `\^X` for control characters, `\\` for a backslash and single
/// letters for the symbolic keys (`\U` up, `\X` delete, `\!` interrupt, ...).
pub fn parse_key_seq(notation: &str) -> Result<Vec<Key>, KeySeqError> {
    let mut keys = Vec::new();
    let mut chars = notation.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            keys.push(Key::Char(c));
            continue;
        }
        let escape = chars.next().ok_or(KeySeqError::Truncated)?;
        let key = match escape {
            '\\' => Key::Char('\\'),
            '^' => {
                let target = chars.next().ok_or(KeySeqError::Truncated)?;
                control_key(target)?
            }
            'U' => Key::Up,
            'D' => Key::Down,
            'L' => Key::Left,
            'R' => Key::Right,
            'H' => Key::Home,
            'E' => Key::End,
            'I' => Key::Insert,
            'X' => Key::Delete,
            'P' => Key::PageUp,
            'N' => Key::PageDown,
            'B' => Key::Backspace,
            '!' => Key::Interrupt,
            '#' => Key::Eof,
            '?' => Key::Erase,
            '$' => Key::Kill,
            other => return Err(KeySeqError::UnknownEscape(other)),
        };
        keys.push(key);
    }
    if keys.is_empty() {
        return Err(KeySeqError::Empty);
    }
    Ok(keys)
}

fn control_key(c: char) -> Result<Key, KeySeqError> {
    match c {
        '?' => Ok(Key::Char('\x7f')),
        '@'..='_' => Ok(Key::Char(char::from(c as u8 - 0x40))),
        'a'..='z' => Ok(Key::Char(char::from(c as u8 - 0x60))),
        other => Err(KeySeqError::BadControl(other)),
    }
}

/// Formats a key sequence in binding notation; the inverse of
/// [`parse_key_seq`].
pub fn format_key_seq(keys: &[Key]) -> String {
    keys.iter().map(Key::to_string).collect()
}

/// Escape sequences sent by common terminals for the symbolic keys.
const INPUT_SEQUENCES: &[(&str, Key)] = &[
    ("\x1b[A", Key::Up),
    ("\x1b[B", Key::Down),
    ("\x1b[C", Key::Right),
    ("\x1b[D", Key::Left),
    ("\x1bOA", Key::Up),
    ("\x1bOB", Key::Down),
    ("\x1bOC", Key::Right),
    ("\x1bOD", Key::Left),
    ("\x1b[H", Key::Home),
    ("\x1b[F", Key::End),
    ("\x1bOH", Key::Home),
    ("\x1bOF", Key::End),
    ("\x1b[1~", Key::Home),
    ("\x1b[7~", Key::Home),
    ("\x1b[4~", Key::End),
    ("\x1b[8~", Key::End),
    ("\x1b[2~", Key::Insert),
    ("\x1b[3~", Key::Delete),
    ("\x1b[5~", Key::PageUp),
    ("\x1b[6~", Key::PageDown),
];

/// Builds the first-level table translating input characters to keys.
///
/// A bare escape is bound to itself so that, being also the start of every
/// escape sequence, it resolves as ambiguous and commits on timeout.
pub fn input_sequences(tty: &TtySpecial) -> KeyTrie<char, Key> {
    let mut trie = KeyTrie::new();
    for (seq, key) in INPUT_SEQUENCES {
        let seq: Vec<char> = seq.chars().collect();
        trie.insert(&seq, *key);
    }
    trie.insert(&[ESCAPE], Key::Char(ESCAPE));
    for (c, key) in [
        (tty.interrupt, Key::Interrupt),
        (tty.eof, Key::Eof),
        (tty.erase, Key::Erase),
        (tty.kill, Key::Kill),
    ] {
        if let Some(c) = c {
            trie.insert(&[c], key);
        }
    }
    trie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_control_and_symbolic_escapes() {
        let keys = parse_key_seq("\\^Ax\\U\\\\").unwrap();
        assert_eq!(
            keys,
            vec![Key::Char('\x01'), Key::Char('x'), Key::Up, Key::Char('\\')]
        );
    }

    #[test]
    fn format_round_trips() {
        for notation in ["\\^[", "\\^?", "ab", "\\X\\#", "\\\\"] {
            let keys = parse_key_seq(notation).unwrap();
            assert_eq!(format_key_seq(&keys), notation);
        }
    }

    #[test]
    fn rejects_bad_notation() {
        assert_eq!(parse_key_seq(""), Err(KeySeqError::Empty));
        assert_eq!(parse_key_seq("a\\"), Err(KeySeqError::Truncated));
        assert_eq!(parse_key_seq("\\q"), Err(KeySeqError::UnknownEscape('q')));
        assert_eq!(parse_key_seq("\\^1"), Err(KeySeqError::BadControl('1')));
    }
}
