// Input manager - Main coordination system for all input

use super::action::{Action, Command, InputSource};
use super::config::InputConfigManager;
use super::player::PlayerInput;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::{Key, PhysicalKey};

/// A discrete input that must be applied in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key-down of a player's discrete action
    Player { player_id: usize, action: Action },
    /// Key-down of a global command
    Command(Command),
}

/// Main input manager that coordinates all input for both players
pub struct InputManager {
    /// Binding tables
    config: InputConfigManager,

    /// Input state for each player
    players: Vec<PlayerInput>,

    /// Discrete events received since the last drain
    events: Vec<InputEvent>,
}

impl InputManager {
    /// Create a new input manager with the fixed bindings
    pub fn new() -> Self {
        let config = InputConfigManager::new();
        let players = (0..config.num_players()).map(PlayerInput::new).collect();

        Self {
            config,
            players,
            events: Vec::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        self.process_key(
            event.physical_key,
            &event.logical_key,
            event.state == ElementState::Pressed,
            event.repeat,
        );
    }

    /// Route a key by the character it types when that character is bound,
    /// otherwise by its physical position
    pub fn process_key(&mut self, physical: PhysicalKey, logical: &Key, pressed: bool, repeat: bool) {
        if let Some(ch) = typed_char(logical) {
            let source = InputSource::character(ch);
            if self.config.is_bound(source) {
                self.process_source(source, pressed, repeat);
                return;
            }
        }

        if let PhysicalKey::Code(key_code) = physical {
            self.process_source(InputSource::key(key_code), pressed, repeat);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.process_source(
            InputSource::mouse(button),
            state == ElementState::Pressed,
            false,
        );
    }

    /// Route a press or release of `source` to the global table and every player table
    pub fn process_source(&mut self, source: InputSource, pressed: bool, repeat: bool) {
        // OS key repeats are not new presses
        if pressed && repeat {
            return;
        }

        if pressed {
            if let Some(command) = self.config.get_command(source) {
                log::debug!("Command {:?}", command);
                self.events.push(InputEvent::Command(command));
            }
        }

        for (player_id, player) in self.players.iter_mut().enumerate() {
            let Some(action) = self.config.get_action(player_id, source) else {
                continue;
            };

            if !pressed {
                player.release(action);
            } else if player.press(action) && action.is_discrete() {
                self.events.push(InputEvent::Player { player_id, action });
            }
        }
    }

    /// Take the discrete events received since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Update all player input states for a new frame
    /// Call this once per frame after the frame's input has been consumed
    pub fn update(&mut self) {
        for player in &mut self.players {
            player.update();
        }
    }

    /// Get input state for a specific player
    pub fn player(&self, player_id: usize) -> Option<&PlayerInput> {
        self.players.get(player_id)
    }

    /// Reset all player input states, e.g. when the window loses focus
    pub fn reset_all(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
    }
}

/// Single character produced by a key, ignoring case
fn typed_char(key: &Key) -> Option<char> {
    let Key::Character(text) = key else {
        return None;
    };
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch.to_ascii_lowercase()),
        _ => None,
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
