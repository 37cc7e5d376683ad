//! From input bytes to commands.
//!
//! Bytes are decoded into characters (with optional meta conversion),
//! characters are matched against the terminal's input sequences to give
//! keys, and keys are matched against the active mode's keymap to give
//! commands. Either match may stall on an ambiguous sequence; the caller
//! then waits for more input or for the key timeout.

use tracing::{trace, warn};

use crate::command::CommandId;
use crate::config::Config;
use crate::key::{ESCAPE, Key};
use crate::keymap::{ModeId, ModeTable};
use crate::trie::{KeyTrie, TrieMatch};

/// Incremental UTF-8 decoder.
#[derive(Debug, Default, Clone)]
struct Utf8Decoder {
    buf: Vec<u8>,
    need: usize,
}

impl Utf8Decoder {
    /// Feeds one byte, appending any completed character to `out`. Returns
    /// `false` when bytes had to be discarded.
    fn push(&mut self, byte: u8, out: &mut Vec<char>) -> bool {
        if self.need > 0 {
            if byte & 0xc0 == 0x80 {
                self.buf.push(byte);
                if self.buf.len() < self.need {
                    return true;
                }
                let ok = match std::str::from_utf8(&self.buf) {
                    Ok(s) => {
                        out.extend(s.chars());
                        true
                    }
                    Err(_) => false,
                };
                self.reset();
                return ok;
            }
            // Truncated sequence; start over with this byte.
            self.reset();
            self.push(byte, out);
            return false;
        }

        let need = match byte {
            0x00..=0x7f => {
                out.push(char::from(byte));
                return true;
            }
            0xc2..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf4 => 4,
            _ => return false,
        };
        self.buf.push(byte);
        self.need = need;
        true
    }

    fn reset(&mut self) {
        self.buf.clear();
        self.need = 0;
    }
}

/// What a resolution step produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<T> {
    Ready(T),
    /// More input is needed; it may be waited for indefinitely.
    Wait,
    /// More input is needed, but the key timeout settles it.
    WaitTimeout,
    /// Nothing is buffered.
    Empty,
}

/// The buffers between input bytes and commands.
#[derive(Debug, Default, Clone)]
pub struct InputPump {
    decoder: Utf8Decoder,
    chars: Vec<char>,
    keys: Vec<Key>,
}

impl InputPump {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `byte` into the character buffer. Returns `false` when
    /// invalid input was discarded.
    pub fn push_byte(&mut self, byte: u8, config: &Config) -> bool {
        if byte >= 0x80 && config.converts_meta() {
            self.chars.push(ESCAPE);
            self.chars.push(char::from(byte & 0x7f));
            return true;
        }
        if !config.utf8_locale {
            self.chars.push(char::from(byte));
            return true;
        }
        let ok = self.decoder.push(byte, &mut self.chars);
        if !ok {
            warn!(byte, "discarded invalid input");
        }
        ok
    }

    pub fn push_char(&mut self, c: char) {
        self.chars.push(c);
    }

    pub fn has_chars(&self) -> bool {
        !self.chars.is_empty()
    }

    /// Takes the next character as it is, bypassing key matching.
    pub fn take_char(&mut self) -> Option<char> {
        (!self.chars.is_empty()).then(|| self.chars.remove(0))
    }

    /// Discards everything buffered.
    pub fn clear(&mut self) {
        self.decoder.reset();
        self.chars.clear();
        self.keys.clear();
    }

    /// Matches buffered characters against the input sequences. After a
    /// timeout, an ambiguous sequence takes its shorter match and an
    /// incomplete one is taken literally.
    pub fn next_key(&mut self, keycodes: &KeyTrie<char, Key>, timed_out: bool) -> Step<Key> {
        if self.chars.is_empty() {
            return Step::Empty;
        }
        let (len, key) = match keycodes.lookup(&self.chars) {
            TrieMatch::NoMatch => (1, Key::Char(self.chars[0])),
            TrieMatch::Exact { len, value } => (len, *value),
            TrieMatch::Ambiguous { len, value } if timed_out => (len, *value),
            TrieMatch::Prefix if timed_out => (1, Key::Char(self.chars[0])),
            TrieMatch::Ambiguous { .. } | TrieMatch::Prefix => return Step::WaitTimeout,
        };
        self.chars.drain(..len);
        trace!(%key, "key");
        Step::Ready(key)
    }

    pub fn push_key(&mut self, key: Key) {
        self.keys.push(key);
    }

    pub fn has_keys(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Matches buffered keys against `mode`'s keymap. Unbound keys go to
    /// the mode's default command one at a time.
    pub fn next_command(
        &mut self,
        modes: &ModeTable,
        mode: ModeId,
        timed_out: bool,
    ) -> Step<(CommandId, char)> {
        if self.keys.is_empty() {
            return Step::Empty;
        }
        let (len, command) = match modes.keymap(mode).lookup(&self.keys) {
            TrieMatch::NoMatch => (1, modes.default_command(mode)),
            TrieMatch::Exact { len, value } => (len, *value),
            TrieMatch::Ambiguous { len, value } if timed_out => (len, *value),
            TrieMatch::Ambiguous { .. } => return Step::WaitTimeout,
            TrieMatch::Prefix => return Step::Wait,
        };
        let arg = self.keys[len - 1].as_char();
        self.keys.drain(..len);
        Step::Ready((command, arg))
    }
}
