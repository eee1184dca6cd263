// Per-player input state management

use super::action::Action;
use crate::game::characters::Direction;
use std::collections::HashSet;

/// Represents the input state for a single player
#[derive(Debug)]
pub struct PlayerInput {
    /// Player ID (0 or 1)
    player_id: usize,

    /// Actions that are currently held
    pressed: HashSet<Action>,

    /// Actions that were pressed since the last frame
    just_pressed: HashSet<Action>,
}

impl PlayerInput {
    /// Create a new player input state
    pub fn new(player_id: usize) -> Self {
        Self {
            player_id,
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
        }
    }

    /// Get the player ID
    pub fn player_id(&self) -> usize {
        self.player_id
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was pressed since the last frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Register an action press, returns false for a press of an already held action
    pub(crate) fn press(&mut self, action: Action) -> bool {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
            true
        } else {
            false
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Clear per-frame state, call once at the end of every frame
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
    }

    /// Held horizontal direction, left wins when both are held
    pub fn direction(&self) -> Option<Direction> {
        if self.is_pressed(Action::MoveLeft) {
            Some(Direction::Left)
        } else if self.is_pressed(Action::MoveRight) {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_input_creation() {
        let input = PlayerInput::new(1);
        assert_eq!(input.player_id(), 1);
        assert!(!input.is_pressed(Action::Jump));
        assert_eq!(input.direction(), None);
    }

    #[test]
    fn test_press_action() {
        let mut input = PlayerInput::new(0);
        assert!(input.press(Action::Jump));
        assert!(input.is_pressed(Action::Jump));
        assert!(input.just_pressed(Action::Jump));

        // Second press of a held key is not a new press
        assert!(!input.press(Action::Jump));
    }

    #[test]
    fn test_just_pressed_cleared_on_update() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.update();

        assert!(input.is_pressed(Action::Jump));
        assert!(!input.just_pressed(Action::Jump));
    }

    #[test]
    fn test_tap_within_one_frame_still_counts() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.release(Action::Jump);

        assert!(!input.is_pressed(Action::Jump));
        assert!(input.just_pressed(Action::Jump));
    }

    #[test]
    fn test_direction_left_priority() {
        let mut input = PlayerInput::new(0);
        input.press(Action::MoveRight);
        assert_eq!(input.direction(), Some(Direction::Right));

        input.press(Action::MoveLeft);
        assert_eq!(input.direction(), Some(Direction::Left));

        input.release(Action::MoveLeft);
        assert_eq!(input.direction(), Some(Direction::Right));
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new(0);
        input.press(Action::MoveLeft);
        input.press(Action::Attack);
        input.reset();

        assert!(!input.is_pressed(Action::MoveLeft));
        assert!(!input.just_pressed(Action::Attack));
    }
}
