// Fixed game configuration

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the asset root
pub const ASSETS_ENV_VAR: &str = "SPRITE_DUEL_ASSETS";

/// Window, pacing and asset settings for a session
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub title: String,
    /// Logical resolution in windowed mode
    pub windowed_size: (u32, u32),
    /// Logical resolution in fullscreen mode
    pub fullscreen_size: (u32, u32),
    /// Delay between the end of one frame and the start of the next
    pub frame_delay: Duration,
    /// Directory holding `textures/` and `fonts/`
    pub asset_root: PathBuf,
    pub font_name: String,
    pub font_size: f32,
    /// Spawn x of each player
    pub spawn_x: [i32; 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Sprite Duel".to_string(),
            windowed_size: (1024, 767),
            fullscreen_size: (1920, 1080),
            frame_delay: Duration::from_millis(16),
            asset_root: PathBuf::from("assets"),
            font_name: "arial.ttf".to_string(),
            font_size: 20.0,
            spawn_x: [50, 662],
        }
    }
}

impl GameConfig {
    /// Defaults, with the asset root taken from the environment when set
    pub fn from_env() -> Self {
        Self::with_asset_override(std::env::var_os(ASSETS_ENV_VAR).map(PathBuf::from))
    }

    fn with_asset_override(asset_root: Option<PathBuf>) -> Self {
        let mut config = Self::default();
        if let Some(root) = asset_root.filter(|root| !root.as_os_str().is_empty()) {
            config.asset_root = root;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.windowed_size, (1024, 767));
        assert_eq!(config.fullscreen_size, (1920, 1080));
        assert_eq!(config.frame_delay, Duration::from_millis(16));
        assert_eq!(config.spawn_x, [50, 662]);
        assert_eq!(config.asset_root, PathBuf::from("assets"));
    }

    #[test]
    fn test_asset_override() {
        let config = GameConfig::with_asset_override(Some(PathBuf::from("/opt/duel")));
        assert_eq!(config.asset_root, PathBuf::from("/opt/duel"));

        let config = GameConfig::with_asset_override(Some(PathBuf::new()));
        assert_eq!(config.asset_root, PathBuf::from("assets"));

        let config = GameConfig::with_asset_override(None);
        assert_eq!(config.asset_root, PathBuf::from("assets"));
    }
}
