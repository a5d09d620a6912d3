//! # Track Renderer
//!
//! Deterministic image export for the grid track editor.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐   ┌─────────────┐   ┌───────────┐   ┌──────────────┐
//! │ Snapshot │──▶│ Asset loads │──▶│ SVG scene │──▶│ PNG/JPEG/SVG │
//! └──────────┘   │ (bounded,   │   │ assembly  │   │   encoding   │
//!                │  parallel)  │   └───────────┘   └──────────────┘
//!                └─────────────┘
//! ```
//!
//! Icon assets load concurrently through an [`assets::AssetSource`]; each
//! load is bounded by a timeout, and any that fail fall back to the element
//! type's glyph. The assembled scene rasterizes through resvg/tiny-skia at a
//! configurable cell size and scale, so the same snapshot always yields the
//! same pixel dimensions.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assets;
pub mod error;
pub mod export;
pub mod icon;

pub use assets::{AssetSource, DirAssetSource, NoAssets, StaticAssets};
pub use error::{AssetUnavailable, RenderError, RenderResult};
pub use export::{suggested_filename, ExportConfig, ExportFormat, TrackExporter};
pub use icon::{IconData, IconFormat};
