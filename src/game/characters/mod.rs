// Character system
//
// This module contains everything related to the two fighters:
// - Character data and the per-frame transitions (move, jump, attack, hit)
// - Character stats and tuning constants
// - State machine for character behavior
// - Frame-timed animation of the sprite strips

pub mod animation;
pub mod character;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::SpriteSheetConfig;
pub use character::{Character, Direction};
pub use state::CharacterState;
pub use stats::CharacterStats;
