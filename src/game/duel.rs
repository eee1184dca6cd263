// Two-fighter session: input routing, per-frame update order and frame composition

use log::{info, trace, warn};

use crate::config::GameConfig;
use crate::engine::input::{Action, Command, InputEvent, InputManager, PlayerInput};
use crate::engine::renderer::{DrawTarget, BLACK};
use crate::game::characters::{Character, CharacterStats};
use crate::game::render::{draw_character, draw_hud, SpriteSet};

/// Window presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Windowed,
    Fullscreen,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Windowed => Self::Fullscreen,
            Self::Fullscreen => Self::Windowed,
        }
    }

    /// Logical resolution of this mode
    pub fn size(self, config: &GameConfig) -> (u32, u32) {
        match self {
            Self::Windowed => config.windowed_size,
            Self::Fullscreen => config.fullscreen_size,
        }
    }
}

/// Index of player 2 in [`Duel::fighters`]
const PLAYER_TWO: usize = 1;

/// Both fighters plus the session toggles
pub struct Duel {
    config: GameConfig,
    sprites: SpriteSet,
    fighters: [Character; 2],
    player_two_enabled: bool,
    display_mode: DisplayMode,
    running: bool,
}

impl Duel {
    /// Start a session with player 2 hidden, in windowed mode
    pub fn new(config: GameConfig, sprites: SpriteSet, now_ms: u64) -> Self {
        let fighters = [
            Character::new("Player 1", CharacterStats::standard(), config.spawn_x[0], now_ms),
            Character::new("Player 2", CharacterStats::standard(), config.spawn_x[1], now_ms),
        ];
        info!(
            "Players initialized: p1=({}, {}), p2=({}, {})",
            fighters[0].position.x,
            fighters[0].position.y,
            fighters[1].position.x,
            fighters[1].position.y
        );

        Self {
            config,
            sprites,
            fighters,
            player_two_enabled: false,
            display_mode: DisplayMode::Windowed,
            running: true,
        }
    }

    pub fn fighters(&self) -> &[Character; 2] {
        &self.fighters
    }

    pub fn fighter_mut(&mut self, index: usize) -> Option<&mut Character> {
        self.fighters.get_mut(index)
    }

    pub fn player_two_enabled(&self) -> bool {
        self.player_two_enabled
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Width the fighters are clamped to in the current display mode
    pub fn screen_width(&self) -> u32 {
        self.display_mode.size(&self.config).0
    }

    /// Stop the session
    pub fn quit(&mut self) {
        if self.running {
            info!("Quit requested, shutting down...");
        }
        self.running = false;
    }

    /// The requested display mode could not be applied
    pub fn display_failed(&mut self) {
        warn!("Display mode switch to {:?} failed", self.display_mode);
        self.running = false;
    }

    /// Apply one discrete input event
    pub fn handle_event(&mut self, event: InputEvent, now_ms: u64) {
        match event {
            InputEvent::Command(Command::Quit) => self.quit(),
            InputEvent::Command(Command::ToggleFullscreen) => {
                self.display_mode = self.display_mode.toggled();
                info!("Display mode: {:?}", self.display_mode);
            }
            InputEvent::Command(Command::TogglePlayerTwo) => {
                self.player_two_enabled = !self.player_two_enabled;
                if !self.player_two_enabled {
                    self.fighters[PLAYER_TWO].reset_position(self.config.spawn_x[PLAYER_TWO]);
                }
                info!(
                    "Player 2 {}",
                    if self.player_two_enabled { "joined" } else { "hidden" }
                );
            }
            InputEvent::Player { player_id, action } => {
                if player_id == PLAYER_TWO && !self.player_two_enabled {
                    return;
                }
                let Some(fighter) = self.fighters.get_mut(player_id) else {
                    return;
                };

                match action {
                    Action::Attack => fighter.attack(now_ms),
                    Action::Hit => fighter.take_hit(now_ms),
                    _ => {}
                }
            }
        }
    }

    /// Run the simulation part of one frame.
    ///
    /// Discrete events are applied in arrival order, then movement and jumps
    /// from the held keys, then animation. Returns the new display mode if it
    /// changed during this frame.
    pub fn update(&mut self, input: &mut InputManager, now_ms: u64) -> Option<DisplayMode> {
        let mode_before = self.display_mode;
        for event in input.drain_events() {
            self.handle_event(event, now_ms);
        }

        let width = self.screen_width();
        Self::step_fighter(&mut self.fighters[0], input.player(0), now_ms, width);
        if self.player_two_enabled {
            let fighter = &mut self.fighters[PLAYER_TWO];
            Self::step_fighter(fighter, input.player(PLAYER_TWO), now_ms, width);
            fighter.tick_animation(now_ms);
        }
        self.fighters[0].tick_animation(now_ms);

        (self.display_mode != mode_before).then_some(self.display_mode)
    }

    fn step_fighter(fighter: &mut Character, input: Option<&PlayerInput>, now_ms: u64, width: u32) {
        let direction = input.and_then(PlayerInput::direction);
        let jump_pressed = input.is_some_and(|p| p.just_pressed(Action::Jump));

        fighter.move_horizontal(direction, now_ms, width);
        fighter.jump(jump_pressed);
    }

    /// Compose the frame: background, fighters, then HUDs
    pub fn render<T: DrawTarget>(&self, target: &mut T) {
        target.clear(BLACK);

        draw_character(target, &self.sprites, &self.fighters[0]);
        if self.player_two_enabled {
            draw_character(target, &self.sprites, &self.fighters[PLAYER_TWO]);
        }

        draw_hud(target, &self.fighters[0], 1);
        if self.player_two_enabled {
            draw_hud(target, &self.fighters[PLAYER_TWO], 2);
        }

        trace!(
            "Frame: p1=({}, {}), p2=({}, {})",
            self.fighters[0].position.x,
            self.fighters[0].position.y,
            self.fighters[PLAYER_TWO].position.x,
            self.fighters[PLAYER_TWO].position.y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::InputSource;
    use crate::game::characters::{CharacterState, Direction};
    use crate::game::render::tests::{test_sprites, DrawCall, RecordingTarget};
    use winit::event::MouseButton;
    use winit::keyboard::KeyCode;

    fn duel() -> Duel {
        Duel::new(GameConfig::default(), test_sprites(), 0)
    }

    fn press(input: &mut InputManager, source: InputSource) {
        input.process_source(source, true, false);
    }

    fn release(input: &mut InputManager, source: InputSource) {
        input.process_source(source, false, false);
    }

    #[test]
    fn test_new_duel() {
        let duel = duel();
        assert!(duel.is_running());
        assert!(!duel.player_two_enabled());
        assert_eq!(duel.display_mode(), DisplayMode::Windowed);
        assert_eq!(duel.fighters()[0].position.x, 50);
        assert_eq!(duel.fighters()[1].position.x, 662);
        assert_eq!(duel.screen_width(), 1024);
    }

    #[test]
    fn test_escape_quits() {
        let mut duel = duel();
        let mut input = InputManager::new();
        press(&mut input, InputSource::key(KeyCode::Escape));

        duel.update(&mut input, 16);
        assert!(!duel.is_running());
    }

    #[test]
    fn test_player_one_moves_and_jumps() {
        let mut duel = duel();
        let mut input = InputManager::new();
        press(&mut input, InputSource::key(KeyCode::ArrowRight));
        press(&mut input, InputSource::key(KeyCode::ArrowUp));

        duel.update(&mut input, 16);
        input.update();

        let p1 = &duel.fighters()[0];
        assert_eq!(p1.position.x, 54);
        assert!(p1.is_airborne);
        assert_eq!(p1.state(), CharacterState::Jump);

        // Holding jump does not start another one after landing
        let ground = p1.stats.ground_level;
        let mut now = 16;
        while duel.fighters()[0].is_airborne {
            now += 16;
            duel.update(&mut input, now);
        }
        assert_eq!(duel.fighters()[0].position.y, ground);
        duel.update(&mut input, now + 16);
        assert!(!duel.fighters()[0].is_airborne);
    }

    #[test]
    fn test_hidden_player_two_ignores_input() {
        let mut duel = duel();
        let mut input = InputManager::new();
        press(&mut input, InputSource::character('d'));
        press(&mut input, InputSource::character('k'));

        duel.update(&mut input, 16);

        let p2 = &duel.fighters()[1];
        assert_eq!(p2.position.x, 662);
        assert_eq!(p2.health, 100);
    }

    #[test]
    fn test_toggle_player_two_and_hit() {
        let mut duel = duel();
        let mut input = InputManager::new();
        press(&mut input, InputSource::character('p'));
        press(&mut input, InputSource::character('k'));

        duel.update(&mut input, 16);

        assert!(duel.player_two_enabled());
        let p2 = &duel.fighters()[1];
        assert_eq!(p2.health, 80);
        assert_eq!(p2.state(), CharacterState::Hurt);
        assert_eq!(duel.fighters()[0].health, 100);
    }

    #[test]
    fn test_hiding_player_two_resets_position() {
        let mut duel = duel();
        let mut input = InputManager::new();
        press(&mut input, InputSource::character('p'));
        duel.update(&mut input, 16);
        release(&mut input, InputSource::character('p'));

        press(&mut input, InputSource::character('q'));
        for i in 2..10 {
            duel.update(&mut input, i * 16);
            input.update();
        }
        assert!(duel.fighters()[1].position.x < 662);
        assert_eq!(duel.fighters()[1].state(), CharacterState::Run);
        release(&mut input, InputSource::character('q'));

        press(&mut input, InputSource::character('p'));
        duel.update(&mut input, 200);

        let p2 = &duel.fighters()[1];
        assert!(!duel.player_two_enabled());
        assert_eq!(p2.position.x, 662);
        assert_eq!(p2.state(), CharacterState::Idle);
        assert_eq!(p2.frame_index(), 0);
    }

    #[test]
    fn test_mouse_attack_then_hurt_in_order() {
        let mut duel = duel();
        let mut input = InputManager::new();
        press(&mut input, InputSource::mouse(MouseButton::Left));
        press(&mut input, InputSource::character('j'));

        duel.update(&mut input, 16);

        // The hit arrives after the attack and interrupts it
        let p1 = &duel.fighters()[0];
        assert_eq!(p1.state(), CharacterState::Hurt);
        assert_eq!(p1.health, 80);
    }

    #[test]
    fn test_fullscreen_toggle_changes_clamp_width() {
        let mut duel = duel();
        let mut input = InputManager::new();
        press(&mut input, InputSource::character('m'));

        assert_eq!(duel.update(&mut input, 16), Some(DisplayMode::Fullscreen));
        assert_eq!(duel.screen_width(), 1920);
        assert_eq!(duel.update(&mut input, 32), None);

        if let Some(p1) = duel.fighter_mut(0) {
            p1.position.x = 1900;
        }
        press(&mut input, InputSource::key(KeyCode::ArrowRight));
        duel.update(&mut input, 48);
        assert_eq!(duel.fighters()[0].position.x, 1920 - 128);
    }

    #[test]
    fn test_display_failure_stops() {
        let mut duel = duel();
        duel.display_failed();
        assert!(!duel.is_running());
    }

    #[test]
    fn test_render_order() {
        let mut duel = duel();
        duel.handle_event(InputEvent::Command(Command::TogglePlayerTwo), 0);
        if let Some(p2) = duel.fighter_mut(1) {
            p2.move_horizontal(Some(Direction::Left), 0, 1024);
        }

        let mut target = RecordingTarget::new(1024, 767);
        duel.render(&mut target);

        assert_eq!(target.calls[0], DrawCall::Clear(BLACK));
        let sprites = target.sprites();
        assert_eq!(sprites.len(), 2);
        assert!(matches!(sprites[0], DrawCall::Sprite { mirrored: false, .. }));
        assert!(matches!(sprites[1], DrawCall::Sprite { mirrored: true, .. }));

        let labels: Vec<String> = target
            .texts()
            .into_iter()
            .filter(|(text, _)| text.starts_with("Player"))
            .map(|(text, _)| text)
            .collect();
        assert_eq!(labels, vec!["Player 1", "Player 2"]);

        // HUD is drawn after both fighters
        let last_sprite = target
            .calls
            .iter()
            .rposition(|c| matches!(c, DrawCall::Sprite { .. }));
        let first_text = target
            .calls
            .iter()
            .position(|c| matches!(c, DrawCall::Text(..)));
        assert!(last_sprite < first_text);
    }

    #[test]
    fn test_render_single_player() {
        let duel = duel();
        let mut target = RecordingTarget::new(1024, 767);
        duel.render(&mut target);

        assert_eq!(target.sprites().len(), 1);
        assert_eq!(
            target.texts(),
            vec![
                ("Player 1".to_string(), glam::IVec2::new(10, 5)),
                ("Score: 0".to_string(), glam::IVec2::new(10, 45)),
            ]
        );
    }
}
