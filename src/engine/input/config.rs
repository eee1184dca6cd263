// Input binding tables

use super::action::{self, Action, Command, InputSource};
use std::collections::HashMap;
use std::hash::Hash;

/// Binding table mapping input sources (keys/buttons) to `T`
#[derive(Debug, Clone)]
pub struct InputConfig<T> {
    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, T>,
}

impl<T: Copy + Eq + Hash> InputConfig<T> {
    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(InputSource, T)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<T> {
        self.bindings.get(&source).copied()
    }

    /// Check if an input source is bound to any action
    pub fn is_bound(&self, source: InputSource) -> bool {
        self.bindings.contains_key(&source)
    }
}

/// Binding tables for both players plus the global commands
#[derive(Debug)]
pub struct InputConfigManager {
    /// Configurations for each player
    configs: Vec<InputConfig<Action>>,

    /// Global bindings (not player-specific)
    global_config: InputConfig<Command>,
}

impl InputConfigManager {
    /// Build the fixed two-player layout
    pub fn new() -> Self {
        Self {
            configs: vec![
                InputConfig::from_bindings(action::default_p1_bindings()),
                InputConfig::from_bindings(action::default_p2_bindings()),
            ],
            global_config: InputConfig::from_bindings(action::global_bindings()),
        }
    }

    /// Get a player's configuration
    pub fn get_config(&self, player_id: usize) -> Option<&InputConfig<Action>> {
        self.configs.get(player_id)
    }

    /// Number of players with a binding table
    pub fn num_players(&self) -> usize {
        self.configs.len()
    }

    /// Get the player action bound to a source
    pub fn get_action(&self, player_id: usize, source: InputSource) -> Option<Action> {
        self.get_config(player_id)
            .and_then(|config| config.get_action(source))
    }

    /// Get the global command bound to a source
    pub fn get_command(&self, source: InputSource) -> Option<Command> {
        self.global_config.get_action(source)
    }

    /// Check if any player or global table binds `source`
    pub fn is_bound(&self, source: InputSource) -> bool {
        self.global_config.is_bound(source) || self.configs.iter().any(|c| c.is_bound(source))
    }
}

impl Default for InputConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
