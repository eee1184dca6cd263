// Character state machine

/// The character's current behavior and animation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterState {
    /// Standing still
    Idle,
    /// Moving horizontally on the ground
    Run,
    /// Playing an attack, uninterruptible until the strip ends
    Attack,
    /// Airborne after a jump
    Jump,
    /// Reeling from a hit, uninterruptible until the strip ends
    Hurt,
    /// Health reached zero
    Dead,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::Idle
    }
}

impl CharacterState {
    /// Every state, in sprite sheet order
    pub const ALL: [CharacterState; 6] = [
        Self::Idle,
        Self::Run,
        Self::Attack,
        Self::Jump,
        Self::Hurt,
        Self::Dead,
    ];

    /// Position of this state in [`CharacterState::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Run => 1,
            Self::Attack => 2,
            Self::Jump => 3,
            Self::Hurt => 4,
            Self::Dead => 5,
        }
    }

    /// States that suppress movement, jumping and new attacks
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Attack | Self::Hurt | Self::Dead)
    }

    /// Check if the character can be hit in this state
    pub fn can_take_hit(&self) -> bool {
        !matches!(self, Self::Hurt | Self::Dead)
    }

    /// Get the animation name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Run => "run",
            Self::Attack => "attack",
            Self::Jump => "jump",
            Self::Hurt => "hurt",
            Self::Dead => "dead",
        }
    }

    /// File name of the sprite sheet holding this state's strip
    pub fn sprite_sheet(&self) -> &'static str {
        match self {
            Self::Idle => "Idle.png",
            Self::Run => "Run.png",
            Self::Attack => "Attack.png",
            Self::Jump => "Jump.png",
            Self::Hurt => "Hurt.png",
            Self::Dead => "Dead.png",
        }
    }
}

/// Tracks the current and previous state of a character
#[derive(Debug)]
pub struct CharacterStateMachine {
    current_state: CharacterState,
    previous_state: CharacterState,
}

impl Default for CharacterStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterStateMachine {
    pub fn new() -> Self {
        Self {
            current_state: CharacterState::Idle,
            previous_state: CharacterState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CharacterState {
        self.current_state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> CharacterState {
        self.previous_state
    }

    /// Transition to a new state, returns true if the state changed
    pub fn transition(&mut self, new_state: CharacterState) -> bool {
        if self.current_state == new_state {
            return false;
        }

        log::trace!("state {:?} -> {:?}", self.current_state, new_state);
        self.previous_state = self.current_state;
        self.current_state = new_state;
        true
    }

    /// Put the machine back into Idle without going through the guards
    pub fn reset(&mut self) {
        self.previous_state = self.current_state;
        self.current_state = CharacterState::Idle;
    }
}
