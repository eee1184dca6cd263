// HUD text rasterised on the CPU with ab_glyph

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use glam::IVec2;
use image::Rgba;

use super::canvas::{Canvas, Color};
use crate::engine::assets::AssetError;

/// Draws single-line text in one font at one size
pub struct TextRenderer {
    font: FontArc,
    scale: PxScale,
}

impl TextRenderer {
    /// Parse a TrueType/OpenType font
    pub fn from_bytes(name: &str, bytes: Vec<u8>, px: f32) -> Result<Self, AssetError> {
        let font = FontArc::try_from_vec(bytes).map_err(|e| AssetError::Font {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            font,
            scale: PxScale::from(px),
        })
    }

    /// Draw `text` with its top-left corner at `position`
    pub fn draw(&self, canvas: &mut Canvas, text: &str, position: IVec2, color: Color) {
        let font = self.font.as_scaled(self.scale);
        let mut caret = point(position.x as f32, position.y as f32 + font.ascent());
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }

            let mut glyph = font.scaled_glyph(ch);
            if let Some(prev) = previous {
                caret.x += font.kern(prev, glyph.id);
            }
            glyph.position = caret;
            previous = Some(glyph.id);
            caret.x += font.h_advance(glyph.id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, coverage| {
                let alpha = (coverage.clamp(0.0, 1.0) * color[3] as f32) as u8;
                canvas.blend_pixel(
                    bounds.min.x as i32 + x as i32,
                    bounds.min.y as i32 + y as i32,
                    Rgba([color[0], color[1], color[2], alpha]),
                );
            });
        }
    }
}
