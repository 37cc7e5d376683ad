use std::env;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How input bytes with the 8th bit set are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MetaPolicy {
    /// Bytes are decoded as UTF-8.
    Never,
    /// A byte with the 8th bit set is an escape followed by the byte with
    /// the 8th bit cleared.
    Always,
    /// `Always` unless the locale uses UTF-8.
    #[default]
    Auto,
}

/// How control characters in the edit line are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlCharStyle {
    /// `^X` for C0 controls and DEL, `<U+XXXX>` for other non-printables.
    #[default]
    Escaped,
    /// Sent to the terminal as-is. Bell, carriage return and newline are
    /// tracked for their effect on the cursor.
    Literal,
}

/// Which keymap family a session starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EditStyle {
    #[default]
    Vi,
    Emacs,
}

/// The terminal driver's special characters. `None` disables one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TtySpecial {
    pub interrupt: Option<char>,
    pub eof: Option<char>,
    pub erase: Option<char>,
    pub kill: Option<char>,
}

impl Default for TtySpecial {
    fn default() -> Self {
        Self {
            interrupt: Some('\x03'),
            eof: Some('\x04'),
            erase: Some('\x7f'),
            kill: Some('\x15'),
        }
    }
}

/// Line editor configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// How long an ambiguous key sequence waits for its next byte.
    pub key_timeout: Duration,
    pub meta: MetaPolicy,
    pub control_chars: ControlCharStyle,
    pub initial_mode: EditStyle,
    /// Show the right prompt on the line below when it does not fit.
    pub force_right_prompt: bool,
    /// Offer inline suggestions from history.
    pub prediction: bool,
    /// Maximum number of history entries kept in memory.
    pub history_limit: usize,
    pub tty: TtySpecial,
    /// Whether the locale encodes text as UTF-8; consulted by
    /// [`MetaPolicy::Auto`].
    pub utf8_locale: bool,
}

impl Default for Config {
    fn default() -> Self {
        ConfigBuilder::default().build()
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Defaults with the locale taken from `LC_ALL`, `LC_CTYPE` and `LANG`.
    pub fn from_env() -> Self {
        let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .filter_map(|name| env::var(name).ok())
            .find(|value| !value.is_empty());
        let utf8_locale = locale.is_some_and(|l| {
            let l = l.to_ascii_lowercase();
            l.contains("utf-8") || l.contains("utf8")
        });
        ConfigBuilder::default().utf8_locale(utf8_locale).build()
    }

    /// Whether bytes with the 8th bit set are converted to escape prefixes.
    pub fn converts_meta(&self) -> bool {
        match self.meta {
            MetaPolicy::Never => false,
            MetaPolicy::Always => true,
            MetaPolicy::Auto => !self.utf8_locale,
        }
    }
}

pub struct ConfigBuilder {
    config: Config,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            config: Config {
                key_timeout: Duration::from_millis(100),
                meta: MetaPolicy::Auto,
                control_chars: ControlCharStyle::Escaped,
                initial_mode: EditStyle::Vi,
                force_right_prompt: false,
                prediction: false,
                history_limit: 500,
                tty: TtySpecial::default(),
                utf8_locale: true,
            },
        }
    }
}

impl ConfigBuilder {
    pub fn key_timeout(mut self, timeout: Duration) -> Self {
        self.config.key_timeout = timeout;
        self
    }

    pub fn meta(mut self, meta: MetaPolicy) -> Self {
        self.config.meta = meta;
        self
    }

    pub fn control_chars(mut self, style: ControlCharStyle) -> Self {
        self.config.control_chars = style;
        self
    }

    pub fn initial_mode(mut self, style: EditStyle) -> Self {
        self.config.initial_mode = style;
        self
    }

    pub fn force_right_prompt(mut self, force: bool) -> Self {
        self.config.force_right_prompt = force;
        self
    }

    pub fn prediction(mut self, enabled: bool) -> Self {
        self.config.prediction = enabled;
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit.max(1);
        self
    }

    pub fn tty(mut self, tty: TtySpecial) -> Self {
        self.config.tty = tty;
        self
    }

    pub fn utf8_locale(mut self, utf8: bool) -> Self {
        self.config.utf8_locale = utf8;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
