// Drawing fighters and their HUD onto a render target

use anyhow::{anyhow, Result};
use glam::IVec2;

use crate::core::math::Rect;
use crate::engine::assets::{AssetManager, TextureHandle};
use crate::engine::renderer::{DrawTarget, TextureManager, GREEN, RED, WHITE};
use crate::game::characters::{Character, CharacterState, SpriteSheetConfig};

/// Width of the health bar fill at full health
pub const HEALTH_BAR_WIDTH: u32 = 100;
const HEALTH_BAR_HEIGHT: u32 = 10;
const HUD_MARGIN: i32 = 10;

/// The six action sheets, shared by both fighters
pub struct SpriteSet {
    sheets: [TextureHandle; 6],
    layout: SpriteSheetConfig,
}

impl SpriteSet {
    /// Load every action sheet; any missing sheet is an error
    pub fn load(assets: &mut AssetManager, textures: &mut TextureManager) -> Result<Self> {
        let mut sheets = Vec::with_capacity(CharacterState::ALL.len());
        for state in CharacterState::ALL {
            sheets.push(assets.load_texture(textures, state.sprite_sheet())?);
        }

        let sheets = sheets
            .try_into()
            .map_err(|_| anyhow!("Expected one sprite sheet per action"))?;
        log::info!("Loaded {} sprite sheets", CharacterState::ALL.len());

        Ok(Self::new(sheets, SpriteSheetConfig::standard_character()))
    }

    pub fn new(sheets: [TextureHandle; 6], layout: SpriteSheetConfig) -> Self {
        Self { sheets, layout }
    }

    /// Sheet holding the strip for `state`
    pub fn sheet(&self, state: CharacterState) -> TextureHandle {
        self.sheets[state.index()]
    }

    pub fn layout(&self) -> SpriteSheetConfig {
        self.layout
    }
}

/// Draw the character's current frame at its position
pub fn draw_character<T: DrawTarget>(target: &mut T, sprites: &SpriteSet, character: &Character) {
    if !character.is_visible() {
        return;
    }

    let frame = character.frame_data();
    target.draw_sprite_frame(
        sprites.sheet(frame.state),
        sprites.layout().frame_rect(frame.frame_index),
        character.position,
        frame.flip_horizontal,
    );
}

/// Left edge of a player's HUD block
pub fn hud_x(player_number: usize, screen_width: u32) -> i32 {
    if player_number <= 1 {
        HUD_MARGIN
    } else {
        screen_width as i32 - HEALTH_BAR_WIDTH as i32 - HUD_MARGIN
    }
}

/// Draw the label, health bar and score of one player
pub fn draw_hud<T: DrawTarget>(target: &mut T, character: &Character, player_number: usize) {
    if !character.is_visible() {
        return;
    }

    let (screen_width, _) = target.size();
    let x = hud_x(player_number, screen_width);
    let health = character.health.clamp(0, HEALTH_BAR_WIDTH as i32) as u32;

    target.draw_text(&format!("Player {}", player_number), IVec2::new(x, 5), WHITE);

    // Border, background, then the remaining health
    target.fill_rect(
        Rect::new(x, 30, HEALTH_BAR_WIDTH + 2, HEALTH_BAR_HEIGHT + 2),
        WHITE,
    );
    target.fill_rect(
        Rect::new(x + 1, 31, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT),
        RED,
    );
    if health > 0 {
        target.fill_rect(Rect::new(x + 1, 31, health, HEALTH_BAR_HEIGHT), GREEN);
    }

    target.draw_text(&format!("Score: {}", character.score), IVec2::new(x, 45), WHITE);
}
