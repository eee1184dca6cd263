// Character entity: position, combat state and the transitions driven each frame

use glam::IVec2;
use log::{debug, trace};

use crate::core::math::clamp_span;

use super::animation::{clip_for, AnimationFrameData, AnimationPlayer, FrameAdvance};
use super::state::{CharacterState, CharacterStateMachine};
use super::stats::CharacterStats;

/// Horizontal direction, used both for movement input and facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Sign applied to horizontal movement
    pub fn sign(&self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// One player-controlled fighter
#[derive(Debug)]
pub struct Character {
    /// Display name (e.g. "Player 1")
    pub name: String,
    /// Tuning shared by every fighter
    pub stats: CharacterStats,
    /// Current action
    pub state_machine: CharacterStateMachine,
    /// Frame-timed animation position
    pub animation: AnimationPlayer,

    // Physics
    /// Top-left corner in screen pixels
    pub position: IVec2,
    /// Direction the sprite looks at
    pub facing: Direction,
    /// Only meaningful while airborne (negative is up)
    pub vertical_velocity: f32,
    pub is_airborne: bool,

    // Combat
    /// Always within `[0, stats.max_health]`
    pub health: i32,
    /// Rendered on the HUD, never awarded
    pub score: u32,
    /// Time of the last hit that landed
    last_hit_time_ms: Option<u64>,
    /// Latched once the Dead strip has played through
    pub has_played_death_anim: bool,
    pub is_dead: bool,

    // Hold-to-accelerate
    /// Direction currently held, `None` when no direction key is down
    held_direction: Option<Direction>,
    /// When the current hold started
    hold_start_time_ms: u64,
    /// Ramped speed in pixels per tick
    current_speed: f32,
}

impl Character {
    /// Create a grounded, idle character with full health
    pub fn new(name: &str, stats: CharacterStats, spawn_x: i32, now_ms: u64) -> Self {
        let position = IVec2::new(spawn_x, stats.ground_level);
        debug!("{} init: x={}, y={}", name, position.x, position.y);

        Self {
            name: name.to_string(),
            health: stats.max_health,
            current_speed: stats.base_speed,
            stats,
            state_machine: CharacterStateMachine::new(),
            animation: AnimationPlayer::new(now_ms),
            position,
            facing: Direction::Right,
            vertical_velocity: 0.0,
            is_airborne: false,
            score: 0,
            last_hit_time_ms: None,
            has_played_death_anim: false,
            is_dead: false,
            held_direction: None,
            hold_start_time_ms: now_ms,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CharacterState {
        self.state_machine.state()
    }

    /// Current animation frame
    pub fn frame_index(&self) -> usize {
        self.animation.current_frame()
    }

    /// Current ramped movement speed
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Direction currently held, if any
    pub fn held_direction(&self) -> Option<Direction> {
        self.held_direction
    }

    /// Dead, attacking or hurt characters ignore movement, jumps and attacks
    fn is_locked(&self) -> bool {
        self.is_dead || self.state().is_locked()
    }

    /// Switch state and start the new strip from its first frame
    fn enter(&mut self, state: CharacterState) {
        if self.state_machine.transition(state) {
            self.animation.rewind();
        }
    }

    fn set_facing(&mut self, direction: Direction) {
        self.facing = direction;
        self.animation
            .set_flip_horizontal(direction == Direction::Left);
    }

    /// Apply one tick of horizontal movement.
    ///
    /// `direction` is the direction held this tick. Speed starts at the base
    /// speed and ramps up once the hold lasts longer than the acceleration
    /// delay; releasing every direction resets it.
    pub fn move_horizontal(&mut self, direction: Option<Direction>, now_ms: u64, screen_width: u32) {
        if self.is_locked() {
            return;
        }

        match direction {
            Some(direction) => {
                if self.held_direction.is_none() {
                    self.hold_start_time_ms = now_ms;
                    self.current_speed = self.stats.base_speed;
                }
                self.held_direction = Some(direction);

                let held_ms = now_ms.saturating_sub(self.hold_start_time_ms);
                if held_ms > self.stats.accel_delay_ms {
                    let ramp_ms = (held_ms - self.stats.accel_delay_ms) as f32;
                    self.current_speed += self.stats.acceleration * ramp_ms * self.stats.tick_secs;
                    self.current_speed = self.current_speed.min(self.stats.max_speed);
                }

                self.position.x += direction.sign() * self.current_speed as i32;
                self.set_facing(direction);
                if !self.is_airborne {
                    self.enter(CharacterState::Run);
                }

                trace!(
                    "{} moving {:?}: x={}, speed={}",
                    self.name,
                    direction,
                    self.position.x,
                    self.current_speed
                );
            }
            None => {
                self.held_direction = None;
                self.current_speed = self.stats.base_speed;
            }
        }

        self.position.x = clamp_span(self.position.x, self.stats.width, screen_width);

        if direction.is_none() && !self.is_airborne {
            self.enter(CharacterState::Idle);
        }
    }

    /// Start a jump when `jump_pressed` and grounded, then integrate the arc.
    ///
    /// The arc is integrated every unlocked tick while airborne, whatever the input.
    pub fn jump(&mut self, jump_pressed: bool) {
        if self.is_locked() {
            return;
        }

        if jump_pressed && !self.is_airborne {
            self.vertical_velocity = self.stats.jump_velocity;
            self.is_airborne = true;
            self.enter(CharacterState::Jump);
            self.animation.rewind();
            debug!(
                "{} jump: y={}, velocity_y={}",
                self.name, self.position.y, self.vertical_velocity
            );
        }

        if self.is_airborne {
            self.position.y = (self.position.y as f32 + self.vertical_velocity) as i32;
            self.vertical_velocity += self.stats.gravity;

            if self.position.y >= self.stats.ground_level {
                self.position.y = self.stats.ground_level;
                self.vertical_velocity = 0.0;
                self.is_airborne = false;
                self.enter(CharacterState::Idle);
                self.animation.rewind();
                debug!("{} land: y={}", self.name, self.position.y);
            }
        }
    }

    /// Start an attack. Allowed mid-air.
    pub fn attack(&mut self, now_ms: u64) {
        if self.is_locked() {
            return;
        }

        self.state_machine.transition(CharacterState::Attack);
        self.animation.restart(now_ms);
        debug!("{} attack", self.name);
    }

    /// Take one hit of damage, subject to the hit cooldown
    pub fn take_hit(&mut self, now_ms: u64) {
        if self.is_dead || !self.state().can_take_hit() {
            return;
        }
        if let Some(last_hit) = self.last_hit_time_ms {
            if now_ms.saturating_sub(last_hit) < self.stats.hit_cooldown_ms {
                return;
            }
        }

        self.state_machine.transition(CharacterState::Hurt);
        self.animation.restart(now_ms);
        self.health -= self.stats.hit_damage;
        self.last_hit_time_ms = Some(now_ms);
        debug!("{} hit: health={}", self.name, self.health);

        if self.health <= 0 {
            self.health = 0;
            self.state_machine.transition(CharacterState::Dead);
            self.animation.rewind();
            self.is_dead = true;
            debug!("{} died", self.name);
        }
    }

    /// Advance the sprite animation if the current strip's interval elapsed
    pub fn tick_animation(&mut self, now_ms: u64) {
        if self.is_dead && self.has_played_death_anim {
            return;
        }

        let state = self.state();
        let clip = clip_for(state);
        if !self.animation.is_due(clip, now_ms) {
            return;
        }

        if self.animation.advance(clip, now_ms) == FrameAdvance::Finished {
            match state {
                CharacterState::Hurt => {
                    let next = if self.health > 0 {
                        CharacterState::Idle
                    } else {
                        self.is_dead = true;
                        CharacterState::Dead
                    };
                    self.state_machine.transition(next);
                    self.animation.rewind();
                }
                CharacterState::Attack => {
                    self.state_machine.transition(CharacterState::Idle);
                    self.animation.rewind();
                }
                CharacterState::Dead => {
                    self.has_played_death_anim = true;
                    self.is_dead = true;
                    debug!("{} death animation finished", self.name);
                }
                _ => {}
            }
        }

        debug_assert!(self.frame_index() < clip_for(self.state()).frame_count);
        trace!(
            "{} anim: state={:?}, frame={}",
            self.name,
            self.state(),
            self.frame_index()
        );
    }

    /// Put the character back at `x` in Idle on frame 0.
    ///
    /// Health, death and the jump arc are left untouched.
    pub fn reset_position(&mut self, x: i32) {
        self.position.x = x;
        self.state_machine.reset();
        self.animation.rewind();
    }

    /// Whether the character should still be drawn
    pub fn is_visible(&self) -> bool {
        !(self.is_dead && self.has_played_death_anim)
    }

    /// Get animation data for rendering
    pub fn frame_data(&self) -> AnimationFrameData {
        AnimationFrameData {
            state: self.state(),
            frame_index: self.frame_index(),
            flip_horizontal: self.animation.is_flipped_horizontal(),
        }
    }
}
