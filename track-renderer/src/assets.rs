//! Icon asset sources.
//!
//! An element type maps to an image resource at the conventional
//! `elements/{name}.png` path. Absence is the recoverable
//! [`AssetUnavailable`] condition handled by the exporter, never an error.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::AssetUnavailable;

/// Conventional relative path for an element type's icon.
#[must_use]
pub fn conventional_path(type_name: &str) -> String {
    format!("elements/{type_name}.png")
}

/// Provides icon bytes for element types.
///
/// Loads are asynchronous and may settle in any order; the exporter joins
/// over all of them before finalizing.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Load the icon bytes for an element type name.
    ///
    /// # Errors
    ///
    /// Returns [`AssetUnavailable`] when no asset exists for the type.
    async fn load(&self, type_name: &str) -> Result<Vec<u8>, AssetUnavailable>;
}

/// Loads icons from a directory on disk, `{dir}/{name}.png` per type.
///
/// Hosts typically point this at their `elements/` directory.
#[derive(Debug, Clone)]
pub struct DirAssetSource {
    dir: PathBuf,
}

impl DirAssetSource {
    /// Create a source rooted at the given icon directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl AssetSource for DirAssetSource {
    async fn load(&self, type_name: &str) -> Result<Vec<u8>, AssetUnavailable> {
        let path = self.dir.join(format!("{type_name}.png"));
        tokio::fs::read(&path).await.map_err(|e| {
            tracing::debug!(type_name, path = %path.display(), "icon not on disk");
            AssetUnavailable::new(type_name, e.to_string())
        })
    }
}

/// In-memory icon store, for hosts that embed their assets and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    icons: HashMap<String, Vec<u8>>,
}

impl StaticAssets {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add icon bytes for a type name.
    #[must_use]
    pub fn with_icon(mut self, type_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.icons.insert(type_name.into(), bytes);
        self
    }
}

#[async_trait]
impl AssetSource for StaticAssets {
    async fn load(&self, type_name: &str) -> Result<Vec<u8>, AssetUnavailable> {
        self.icons
            .get(type_name)
            .cloned()
            .ok_or_else(|| AssetUnavailable::new(type_name, "no icon registered"))
    }
}

/// A source with no assets at all: every element renders via its glyph.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

#[async_trait]
impl AssetSource for NoAssets {
    async fn load(&self, type_name: &str) -> Result<Vec<u8>, AssetUnavailable> {
        Err(AssetUnavailable::new(type_name, "asset source is empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::solid_pixel_png;

    #[tokio::test]
    async fn test_static_assets_hit_and_miss() {
        let assets = StaticAssets::new().with_icon("straight", solid_pixel_png(0, 0, 0, 255));

        assert!(assets.load("straight").await.is_ok());
        let err = assets.load("corner").await.expect_err("missing");
        assert_eq!(err.type_name, "corner");
    }

    #[tokio::test]
    async fn test_no_assets_always_misses() {
        assert!(NoAssets.load("start").await.is_err());
    }

    #[tokio::test]
    async fn test_dir_source_missing_file() {
        let source = DirAssetSource::new("/nonexistent/icon/dir");
        assert!(source.load("start").await.is_err());
    }

    #[test]
    fn test_conventional_path() {
        assert_eq!(conventional_path("corner"), "elements/corner.png");
    }
}
