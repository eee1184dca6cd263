// Input handling system
//
// This module turns raw winit keyboard and mouse events into per-player
// actions for the two local players, plus a few global commands.
//
// ## Architecture
//
// - `action`: Defines game actions, global commands and the fixed key bindings
// - `player`: Per-player held / just-pressed state
// - `config`: Binding tables
// - `manager`: Main input manager coordinating everything
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, InputEvent, Action};
//
// let mut input_manager = InputManager::new();
//
// // In your event loop, process keyboard events
// input_manager.process_keyboard_event(&key_event);
//
// // Once per frame, apply discrete events in order...
// for event in input_manager.drain_events() {
//     // InputEvent::Player { player_id, action: Action::Attack } ...
// }
//
// // ...read held state...
// if let Some(player) = input_manager.player(0) {
//     let direction = player.direction();
//     let jump = player.just_pressed(Action::Jump);
// }
//
// // ...and clear per-frame state at the end of the frame
// input_manager.update();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, Command, InputSource};
pub use manager::{InputEvent, InputManager};
pub use player::PlayerInput;
