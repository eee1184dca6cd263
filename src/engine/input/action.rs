// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Per-player in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (held)
    MoveLeft,
    MoveRight,
    Jump,

    // Discrete
    Attack,
    /// Debug input that makes the player take a hit
    Hit,
}

impl Action {
    /// Actions that fire once per key-down event rather than while held
    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Attack | Self::Hit)
    }
}

/// Actions that are not tied to a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    TogglePlayerTwo,
    ToggleFullscreen,
    Quit,
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// A key by its position on the keyboard
    Keyboard(KeyCode),
    /// A key by the lowercase character it types in the active layout
    Character(char),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a layout-dependent input source
    pub fn character(ch: char) -> Self {
        Self::Character(ch.to_ascii_lowercase())
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Fixed keyboard/mouse bindings for Player 1
pub fn default_p1_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::ArrowUp), Action::Jump),
        (InputSource::mouse(MouseButton::Left), Action::Attack),
        (InputSource::character('j'), Action::Hit),
    ]
}

/// Fixed keyboard bindings for Player 2
///
/// Letters are matched on the character typed, so Q/D/Z keep their AZERTY
/// meaning whatever the physical layout.
pub fn default_p2_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::character('q'), Action::MoveLeft),
        (InputSource::character('d'), Action::MoveRight),
        (InputSource::character('z'), Action::Jump),
        (InputSource::key(KeyCode::ShiftLeft), Action::Attack),
        (InputSource::character('k'), Action::Hit),
    ]
}

/// Global bindings (not player-specific)
pub fn global_bindings() -> Vec<(InputSource, Command)> {
    vec![
        (InputSource::character('p'), Command::TogglePlayerTwo),
        (InputSource::character('m'), Command::ToggleFullscreen),
        (InputSource::key(KeyCode::Escape), Command::Quit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_discrete_actions() {
        assert!(Action::Attack.is_discrete());
        assert!(Action::Hit.is_discrete());
        assert!(!Action::Jump.is_discrete());
        assert!(!Action::MoveLeft.is_discrete());
    }

    #[test]
    fn test_input_source_creation() {
        assert_eq!(
            InputSource::key(KeyCode::KeyA),
            InputSource::Keyboard(KeyCode::KeyA)
        );
        assert_eq!(
            InputSource::mouse(MouseButton::Left),
            InputSource::Mouse(MouseButton::Left)
        );
        assert_eq!(InputSource::character('Q'), InputSource::Character('q'));
    }

    #[test]
    fn test_player_two_letters_follow_layout() {
        let bindings = default_p2_bindings();
        for (ch, action) in [('q', Action::MoveLeft), ('d', Action::MoveRight), ('z', Action::Jump)] {
            assert!(bindings.contains(&(InputSource::Character(ch), action)));
        }
        assert!(!bindings
            .iter()
            .any(|(source, _)| matches!(source, InputSource::Keyboard(KeyCode::KeyQ | KeyCode::KeyZ))));
    }

    #[test]
    fn test_player_one_attacks_with_mouse() {
        let bindings = default_p1_bindings();
        let attack = bindings.iter().find(|(_, action)| *action == Action::Attack);
        assert!(matches!(
            attack,
            Some((InputSource::Mouse(MouseButton::Left), _))
        ));
    }

    #[test]
    fn test_both_players_bind_every_action() {
        let all = [
            Action::MoveLeft,
            Action::MoveRight,
            Action::Jump,
            Action::Attack,
            Action::Hit,
        ];
        for bindings in [default_p1_bindings(), default_p2_bindings()] {
            for action in all {
                assert!(bindings.iter().any(|(_, a)| *a == action));
            }
        }
    }

    #[test]
    fn test_no_source_shared_between_tables() {
        let mut seen = HashSet::new();
        let p1 = default_p1_bindings().into_iter().map(|(s, _)| s);
        let p2 = default_p2_bindings().into_iter().map(|(s, _)| s);
        let global = global_bindings().into_iter().map(|(s, _)| s);

        for source in p1.chain(p2).chain(global) {
            assert!(seen.insert(source), "{:?} bound twice", source);
        }
    }
}
