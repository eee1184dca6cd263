// Asset management system
//
// Loads the sprite sheets and the HUD font from the asset root at startup.
// Every asset is required: a missing or undecodable file aborts startup.

mod handle;
mod loader;
mod manager;

pub use handle::{AssetHandle, AssetId, TextureHandle};
pub use loader::{AssetLoader, AssetType};
pub use manager::AssetManager;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Invalid font {name}: {reason}")]
    Font { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
