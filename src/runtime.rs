use crate::command::CommandId;
use crate::complete::Completer;
use crate::config::Config;
use crate::history::{Direction, History};
use crate::key::{Key, input_sequences};
use crate::keymap::ModeTable;
use crate::killring::KillRing;
use crate::predict::PredictionModel;
use crate::trie::KeyTrie;

/// Editor context that outlives a single `read_line` call.
///
/// Keymaps, the kill ring, history and the prediction model are shared by
/// every session of the process.
pub struct EditorRuntime {
    pub config: Config,
    pub modes: ModeTable,
    pub kill_ring: KillRing,
    pub history: History,
    pub predictor: PredictionModel,
    /// Terminal input sequences and tty special characters.
    pub keycodes: KeyTrie<char, Key>,
    /// Pattern and direction of the last history search.
    pub last_search: Option<(Vec<char>, Direction)>,
    pub completer: Option<Box<dyn Completer>>,
}

impl Default for EditorRuntime {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl EditorRuntime {
    pub fn new(config: Config) -> Self {
        Self {
            keycodes: input_sequences(&config.tty),
            history: History::with_limit(config.history_limit),
            modes: ModeTable::new(),
            kill_ring: KillRing::new(),
            predictor: PredictionModel::new(),
            last_search: None,
            completer: None,
            config,
        }
    }

    pub fn set_completer(&mut self, completer: impl Completer + 'static) {
        self.completer = Some(Box::new(completer));
    }

    /// Records an accepted line in the history and the prediction model.
    pub fn record_line(&mut self, line: &str) {
        if self.config.prediction {
            self.predictor.record(line);
        }
        self.history.push(line);
    }

    /// The key sequences bound to `command` in any mode, for help output.
    pub fn describe(&self, command: CommandId) -> Vec<String> {
        crate::keymap::ModeId::ALL
            .into_iter()
            .flat_map(|mode| {
                self.modes
                    .keys_for(mode, command)
                    .into_iter()
                    .map(move |keys| format!("{mode}: {keys}"))
            })
            .collect()
    }
}
