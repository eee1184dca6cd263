// Type-safe asset handles

use std::marker::PhantomData;

/// Unique identifier for an asset, derived from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Create a new asset ID from an asset name
    pub fn from_path(path: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Handle to a loaded asset
///
/// The `T` parameter ties a handle to the kind of asset it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetHandle<T> {
    pub(crate) id: AssetId,
    _phantom: PhantomData<T>,
}

impl<T> AssetHandle<T> {
    pub(crate) fn new(id: AssetId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying asset ID
    pub fn id(&self) -> AssetId {
        self.id
    }
}

/// Marker for decoded sprite sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureAsset;

pub type TextureHandle = AssetHandle<TextureAsset>;
