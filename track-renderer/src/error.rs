//! Renderer error types.

use thiserror::Error;

/// Result type for export operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that are fatal to a single export.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Scene assembly or rasterization failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// Raster-to-image-bytes encoding failed.
    #[error("Encoding failed: {0}")]
    Encoding(String),
}

/// An element's icon asset could not be loaded.
///
/// Recoverable by design: the element renders via its fallback glyph and the
/// export carries on. This never propagates out of an export.
#[derive(Debug, Clone, Error)]
#[error("Asset unavailable for '{type_name}': {reason}")]
pub struct AssetUnavailable {
    /// The element type the asset was requested for.
    pub type_name: String,
    /// Why the asset could not be provided.
    pub reason: String,
}

impl AssetUnavailable {
    /// Create an asset-unavailable condition.
    #[must_use]
    pub fn new(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}
