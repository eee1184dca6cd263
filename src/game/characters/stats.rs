// Character stats - BOTH PLAYERS HAVE THE SAME STATS
// Players differ only by their input bindings and spawn point

/// Fixed character tuning shared by every fighter
#[derive(Debug, Clone)]
pub struct CharacterStats {
    // Horizontal extent used to keep the fighter on screen
    /// Width in pixels
    pub width: u32,

    // Movement
    /// Speed applied as soon as a direction is held (pixels/tick)
    pub base_speed: f32,
    /// Speed cap reached after holding a direction long enough
    pub max_speed: f32,
    /// Ramp-up factor applied per millisecond held beyond `accel_delay_ms`
    pub acceleration: f32,
    /// How long a direction must be held before the ramp-up starts
    pub accel_delay_ms: u64,
    /// Nominal tick length used to scale the ramp-up (seconds)
    pub tick_secs: f32,

    // Jumping
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_velocity: f32,
    /// Added to the vertical velocity every airborne tick
    pub gravity: f32,
    /// Floor y coordinate
    pub ground_level: i32,

    // Combat
    /// Starting (and maximum) health
    pub max_health: i32,
    /// Health removed by one successful hit
    pub hit_damage: i32,
    /// Minimum time between two successful hits
    pub hit_cooldown_ms: u64,
}

/// The ONE set of stats used by both players
pub const BASE_STATS: CharacterStats = CharacterStats {
    width: 128,

    base_speed: 4.0,
    max_speed: 8.0,
    acceleration: 0.1,
    accel_delay_ms: 500,
    tick_secs: 16.0 / 1000.0,

    jump_velocity: -15.0,
    gravity: 0.5,
    // Sprite bottom lands at 728, inside the 767 pixel tall window
    ground_level: 600,

    max_health: 100,
    hit_damage: 20,
    hit_cooldown_ms: 1000,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    /// Get the standard character stats (same for both players)
    pub fn standard() -> Self {
        BASE_STATS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = CharacterStats::default();
        assert_eq!(stats.base_speed, 4.0);
        assert_eq!(stats.max_speed, 8.0);
        assert_eq!(stats.max_health, 100);
        assert_eq!(stats.hit_damage, 20);
        assert_eq!(stats.hit_cooldown_ms, 1000);
    }

    #[test]
    fn test_standard_equals_default() {
        let standard = CharacterStats::standard();
        let default = CharacterStats::default();
        assert_eq!(standard.jump_velocity, default.jump_velocity);
        assert_eq!(standard.ground_level, default.ground_level);
    }

    #[test]
    fn test_health_is_whole_number_of_hits() {
        let stats = CharacterStats::standard();
        assert_eq!(stats.max_health % stats.hit_damage, 0);
    }
}
