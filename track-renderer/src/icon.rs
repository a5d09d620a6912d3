//! Icon asset validation and data-URI embedding.
//!
//! Raw bytes coming from an [`crate::assets::AssetSource`] are decoded once
//! to prove they are a real image before the export embeds them; undecodable
//! bytes are treated the same as a missing asset.

use base64::Engine;

use crate::error::AssetUnavailable;

/// Supported icon formats, detected from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconFormat {
    /// PNG with alpha support.
    Png,
    /// JPEG (no alpha).
    Jpeg,
    /// WebP (alpha support).
    WebP,
    /// Unknown/other format.
    Unknown,
}

impl IconFormat {
    /// Detect format from magic bytes.
    #[must_use]
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.len() < 4 {
            return Self::Unknown;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Self::Png;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }

        Self::Unknown
    }

    /// MIME type used in data URIs.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Unknown => "application/octet-stream",
        }
    }
}

/// A validated icon asset ready for embedding.
#[derive(Debug, Clone)]
pub struct IconData {
    /// Pixel width of the decoded image.
    pub width: u32,
    /// Pixel height of the decoded image.
    pub height: u32,
    /// The original encoded bytes.
    pub bytes: Vec<u8>,
    /// Detected container format.
    pub format: IconFormat,
}

impl IconData {
    /// Validate raw asset bytes by decoding them.
    ///
    /// # Errors
    ///
    /// Returns [`AssetUnavailable`] if the bytes are not a decodable image.
    pub fn from_bytes(type_name: &str, bytes: Vec<u8>) -> Result<Self, AssetUnavailable> {
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| AssetUnavailable::new(type_name, format!("undecodable image: {e}")))?;

        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            format: IconFormat::from_magic_bytes(&bytes),
            bytes,
        })
    }

    /// Encode as a `data:` URI for SVG embedding.
    #[must_use]
    pub fn data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{encoded}", self.format.mime())
    }
}

/// Encode a 1x1 RGBA pixel as PNG bytes. Test helper for building valid
/// in-memory assets without fixture files.
#[must_use]
pub fn solid_pixel_png(r: u8, g: u8, b: u8, a: u8) -> Vec<u8> {
    let mut bytes = Vec::new();
    let img = image::RgbaImage::from_raw(1, 1, vec![r, g, b, a]).unwrap_or_default();
    // Writing PNG to an in-memory cursor cannot fail.
    let _ = img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    );
    bytes
}
