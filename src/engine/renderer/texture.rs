// Sprite sheet decoding and storage

use crate::engine::assets::{AssetError, AssetHandle, AssetId, TextureHandle};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;

/// Colour treated as transparent in sprite sheets
pub const COLOR_KEY: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A decoded sprite sheet kept in CPU memory
pub struct Texture {
    pub image: RgbaImage,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Decode image bytes and make colour-keyed pixels transparent
    pub fn from_bytes(bytes: &[u8], label: &str) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)?;
        let texture = Self::from_image(img.to_rgba8());
        log::debug!(
            "Decoded {} ({}x{})",
            label,
            texture.width,
            texture.height
        );
        Ok(texture)
    }

    /// Wrap an RGBA image, applying the colour key
    pub fn from_image(mut image: RgbaImage) -> Self {
        for pixel in image.pixels_mut() {
            if *pixel == COLOR_KEY {
                *pixel = Rgba([255, 255, 255, 0]);
            }
        }

        let (width, height) = image.dimensions();
        Self {
            image,
            width,
            height,
        }
    }
}

/// Stores decoded textures by asset id
#[derive(Default)]
pub struct TextureManager {
    textures: HashMap<AssetId, Texture>,
}

impl TextureManager {
    /// Create a new texture manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a texture under `name`, replacing any previous one with that name
    pub fn insert(&mut self, name: &str, texture: Texture) -> TextureHandle {
        let id = AssetId::from_path(name);
        self.textures.insert(id, texture);
        AssetHandle::new(id)
    }

    /// Get a texture by handle
    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(&handle.id())
    }

    /// Get the number of loaded textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageOutputFormat;
    use std::io::Cursor;

    #[test]
    fn test_color_key_becomes_transparent() {
        let mut image = RgbaImage::from_pixel(2, 1, COLOR_KEY);
        image.put_pixel(1, 0, Rgba([10, 20, 30, 255]));

        let texture = Texture::from_image(image);
        assert_eq!(texture.image.get_pixel(0, 0)[3], 0);
        assert_eq!(*texture.image.get_pixel(1, 0), Rgba([10, 20, 30, 255]));
        assert_eq!((texture.width, texture.height), (2, 1));
    }

    #[test]
    fn test_from_png_bytes() {
        let image = RgbaImage::from_pixel(4, 2, Rgba([0, 128, 0, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();

        let texture = Texture::from_bytes(&bytes, "test.png").unwrap();
        assert_eq!((texture.width, texture.height), (4, 2));
        assert_eq!(*texture.image.get_pixel(3, 1), Rgba([0, 128, 0, 255]));
    }

    #[test]
    fn test_garbage_bytes_fail() {
        assert!(matches!(
            Texture::from_bytes(b"definitely not a png", "bad.png"),
            Err(AssetError::Decode(_))
        ));
    }

    #[test]
    fn test_texture_manager() {
        let mut textures = TextureManager::new();
        let handle = textures.insert("Idle.png", Texture::from_image(RgbaImage::new(8, 8)));

        assert_eq!(textures.texture_count(), 1);
        assert_eq!(textures.get(handle).map(|t| t.width), Some(8));
    }
}
