// Locating and reading asset files under the asset root

use super::AssetError;
use std::path::{Path, PathBuf};

/// Kinds of files the game loads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    /// Sprite sheets
    Texture,
    /// HUD font
    Font,
}

impl AssetType {
    /// Sub-directory of the asset root holding this kind of file
    pub fn directory(&self) -> &'static str {
        match self {
            AssetType::Texture => "textures",
            AssetType::Font => "fonts",
        }
    }

    /// Accepted file extensions, lowercase
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AssetType::Texture => &["png", "jpg", "jpeg"],
            AssetType::Font => &["ttf", "otf"],
        }
    }

    /// Whether `name` has one of the accepted extensions
    pub fn accepts(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .is_some_and(|ext| self.extensions().contains(&ext.as_str()))
    }
}

/// Resolves asset names against the asset root and reads them
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// `<root>/<directory>/<name>`
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.root.join(asset_type.directory()).join(name)
    }

    /// Read a whole asset file
    pub fn load_bytes(&self, asset_type: AssetType, name: &str) -> Result<Vec<u8>, AssetError> {
        if !asset_type.accepts(name) {
            return Err(AssetError::LoadError(format!(
                "{} is not a supported {:?} file",
                name, asset_type
            )));
        }

        let path = self.resolve_path(asset_type, name);
        if !path.is_file() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(&path)?;
        log::debug!("Read {} ({} bytes)", path.display(), bytes.len());
        Ok(bytes)
    }

    /// Check if an asset file is present
    pub fn exists(&self, asset_type: AssetType, name: &str) -> bool {
        self.resolve_path(asset_type, name).is_file()
    }
}
