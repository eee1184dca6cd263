// Central asset management system

use super::{AssetId, AssetLoader, AssetType, TextureHandle};
use crate::engine::assets::AssetHandle;
use crate::engine::renderer::texture::{Texture, TextureManager};
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// Central asset manager for the game
///
/// Resolves asset names against the asset root, decodes sprite sheets into
/// the renderer's texture store and caches them by name.
pub struct AssetManager {
    /// Asset loader
    loader: AssetLoader,

    /// Name to ID mapping for textures already loaded
    texture_paths: HashMap<String, AssetId>,
}

impl AssetManager {
    /// Create a new asset manager
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            texture_paths: HashMap::new(),
        }
    }

    /// Load a sprite sheet from disk into `textures`
    pub fn load_texture(&mut self, textures: &mut TextureManager, name: &str) -> Result<TextureHandle> {
        // Check if already loaded
        if let Some(&id) = self.texture_paths.get(name) {
            return Ok(AssetHandle::new(id));
        }

        let bytes = self.loader.load_bytes(AssetType::Texture, name)?;
        let texture = Texture::from_bytes(&bytes, name)?;

        let handle = textures.insert(name, texture);
        self.texture_paths.insert(name.to_string(), handle.id());
        log::info!("Loaded texture {}", name);

        Ok(handle)
    }

    /// Read a font file
    pub fn load_font_bytes(&self, name: &str) -> Result<Vec<u8>> {
        Ok(self.loader.load_bytes(AssetType::Font, name)?)
    }

    /// Check if an asset exists
    pub fn asset_exists(&self, asset_type: AssetType, name: &str) -> bool {
        self.loader.exists(asset_type, name)
    }

    /// Number of textures loaded through this manager
    pub fn texture_count(&self) -> usize {
        self.texture_paths.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::AssetError;
    use image::{ImageOutputFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::path::PathBuf;

    fn asset_root(tag: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("sprite-duel-{}-{}", tag, std::process::id()));
        std::fs::create_dir_all(root.join("textures")).unwrap();
        root
    }

    fn write_png(root: &Path, name: &str) {
        let image = RgbaImage::from_pixel(256, 128, Rgba([255, 255, 255, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        std::fs::write(root.join("textures").join(name), bytes).unwrap();
    }

    #[test]
    fn test_load_texture_is_cached() {
        let root = asset_root("cache");
        write_png(&root, "Idle.png");

        let mut assets = AssetManager::new(&root);
        let mut textures = TextureManager::new();

        let first = assets.load_texture(&mut textures, "Idle.png").unwrap();
        let second = assets.load_texture(&mut textures, "Idle.png").unwrap();

        assert_eq!(first, second);
        assert_eq!(assets.texture_count(), 1);
        assert_eq!(textures.texture_count(), 1);
        // White background is keyed out
        assert_eq!(textures.get(first).unwrap().image.get_pixel(0, 0)[3], 0);

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_missing_texture_fails() {
        let root = asset_root("missing");
        let mut assets = AssetManager::new(&root);
        let mut textures = TextureManager::new();

        assert!(!assets.asset_exists(AssetType::Texture, "Run.png"));
        let err = assets.load_texture(&mut textures, "Run.png").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AssetError>(),
            Some(AssetError::NotFound(_))
        ));
        assert_eq!(textures.texture_count(), 0);

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_missing_font_fails() {
        let assets = AssetManager::new("/definitely/not/here");
        assert!(assets.load_font_bytes("arial.ttf").is_err());
    }
}
