//! Track layout export to image formats.
//!
//! Renders a [`Snapshot`] to PNG, JPEG, or SVG using an SVG intermediate
//! representation and the resvg/tiny-skia rasterization pipeline. Icon assets
//! load concurrently with a bounded wait; any that fail fall back to the
//! element's glyph independently, so one missing asset never aborts an
//! export.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write;
use std::time::Duration;

use futures::future::join_all;
use image::ImageEncoder;
use track_core::Snapshot;

use crate::assets::AssetSource;
use crate::error::{RenderError, RenderResult};
use crate::icon::IconData;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// SVG vector graphics (returns the SVG XML string as UTF-8 bytes).
    Svg,
}

impl ExportFormat {
    /// File extension for the format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Svg => "svg",
        }
    }
}

/// Configuration for track export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Edge length of one grid cell in pixels (default: 80).
    pub cell_size: u32,
    /// Resolution multiplier for export quality (default: 2.0).
    pub scale: f32,
    /// Background color as RGBA bytes.
    pub background: [u8; 4],
    /// JPEG quality 1-100 (default: 85).
    pub jpeg_quality: u8,
    /// Bounded wait per icon load before forcing glyph fallback.
    pub asset_timeout: Duration,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            cell_size: 80,
            scale: 2.0,
            background: [255, 255, 255, 255],
            jpeg_quality: 85,
            asset_timeout: Duration::from_secs(10),
        }
    }
}

/// Suggested download filename for an exported track.
#[must_use]
pub fn suggested_filename(snapshot: &Snapshot, format: ExportFormat) -> String {
    format!(
        "Custom Track - {}x{}.{}",
        snapshot.width,
        snapshot.height,
        format.extension()
    )
}

/// Exports a [`Snapshot`] to raster and vector image formats.
///
/// `export` takes `&mut self`, so overlapping exports on one exporter are
/// rejected at compile time; callers that need them run one exporter each.
pub struct TrackExporter {
    config: ExportConfig,
}

impl TrackExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Get the exporter configuration.
    #[must_use]
    pub const fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export a snapshot to the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be rasterized or encoded.
    /// Missing or undecodable icon assets are not errors; those elements
    /// render via their glyph.
    pub async fn export(
        &mut self,
        snapshot: &Snapshot,
        assets: &dyn AssetSource,
        format: ExportFormat,
    ) -> RenderResult<Vec<u8>> {
        let icons = self.resolve_assets(snapshot, assets).await;
        let (svg, drawn) = self.assemble_svg(snapshot, &icons);

        // Finalization is gated on the drawn-element count reaching the
        // total, never on load ordering or timing.
        if drawn != snapshot.elements.len() {
            return Err(RenderError::Export(format!(
                "drew {drawn} of {} elements",
                snapshot.elements.len()
            )));
        }

        match format {
            ExportFormat::Svg => Ok(svg.into_bytes()),
            ExportFormat::Png => {
                let pixmap = Self::rasterize_svg(&svg)?;
                pixmap
                    .encode_png()
                    .map_err(|e| RenderError::Encoding(format!("PNG encoding failed: {e}")))
            }
            ExportFormat::Jpeg => {
                let pixmap = Self::rasterize_svg(&svg)?;
                self.encode_jpeg(&pixmap)
            }
        }
    }

    /// Load every distinct icon the snapshot needs, concurrently.
    ///
    /// Each load is independently bounded by the configured timeout. The
    /// join over all loads is the completion barrier: this returns only
    /// after every load has settled, in whatever order that happens.
    async fn resolve_assets(
        &self,
        snapshot: &Snapshot,
        assets: &dyn AssetSource,
    ) -> HashMap<String, IconData> {
        let names: BTreeSet<&str> = snapshot
            .elements
            .iter()
            .map(|e| e.element_type.name())
            .collect();
        let total = names.len();

        let loads = names.into_iter().map(|name| async move {
            let icon = match tokio::time::timeout(self.config.asset_timeout, assets.load(name))
                .await
            {
                Ok(Ok(bytes)) => match IconData::from_bytes(name, bytes) {
                    Ok(icon) => Some(icon),
                    Err(e) => {
                        tracing::warn!(%e, "icon bytes rejected, using glyph");
                        None
                    }
                },
                Ok(Err(e)) => {
                    tracing::debug!(%e, "icon unavailable, using glyph");
                    None
                }
                Err(_) => {
                    tracing::warn!(type_name = name, "icon load timed out, using glyph");
                    None
                }
            };
            (name.to_string(), icon)
        });

        let settled = join_all(loads).await;
        let resolved: HashMap<String, IconData> = settled
            .into_iter()
            .filter_map(|(name, icon)| icon.map(|i| (name, i)))
            .collect();

        tracing::debug!(loaded = resolved.len(), total, "icon loads settled");
        resolved
    }

    /// Assemble the SVG scene: background, grid lattice, then every placed
    /// element. Returns the SVG string and the number of elements drawn.
    #[allow(clippy::cast_precision_loss)]
    fn assemble_svg(&self, snapshot: &Snapshot, icons: &HashMap<String, IconData>) -> (String, usize) {
        let cell = self.config.cell_size as f32;
        let view_w = snapshot.width * self.config.cell_size;
        let view_h = snapshot.height * self.config.cell_size;
        let (out_w, out_h) = self.output_dimensions(snapshot);

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {view_w} {view_h}\">",
        );

        // Background
        let bg = &self.config.background;
        let bg_alpha = f32::from(bg[3]) / 255.0;
        let _ = write!(
            svg,
            "<rect width=\"100%\" height=\"100%\" fill=\"rgb({},{},{})\" fill-opacity=\"{bg_alpha}\"/>",
            bg[0], bg[1], bg[2],
        );

        // Grid lattice: outer edges plus one line per interior boundary.
        for col in 0..=snapshot.width {
            let x = col as f32 * cell;
            let _ = write!(
                svg,
                "<line x1=\"{x}\" y1=\"0\" x2=\"{x}\" y2=\"{view_h}\" stroke=\"#000000\" stroke-opacity=\"0.12\" stroke-width=\"0.5\" stroke-linecap=\"round\"/>",
            );
        }
        for row in 0..=snapshot.height {
            let y = row as f32 * cell;
            let _ = write!(
                svg,
                "<line x1=\"0\" y1=\"{y}\" x2=\"{view_w}\" y2=\"{y}\" stroke=\"#000000\" stroke-opacity=\"0.12\" stroke-width=\"0.5\" stroke-linecap=\"round\"/>",
            );
        }

        let mut drawn = 0;
        for element in &snapshot.elements {
            let x = element.col as f32 * cell;
            let y = element.row as f32 * cell;
            let icon = icons.get(element.element_type.name());
            self.render_cell_svg(&mut svg, element, x, y, icon);
            drawn += 1;
        }

        svg.push_str("</svg>");
        (svg, drawn)
    }

    /// Render one occupied cell: tint, border, and the icon or glyph rotated
    /// about the cell center.
    #[allow(clippy::cast_precision_loss)]
    fn render_cell_svg(
        &self,
        svg: &mut String,
        element: &track_core::SnapshotElement,
        x: f32,
        y: f32,
        icon: Option<&IconData>,
    ) {
        let cell = self.config.cell_size as f32;
        let cx = x + cell / 2.0;
        let cy = y + cell / 2.0;
        let degrees = element.rotation.degrees();
        let rotate = if degrees == 0 {
            String::new()
        } else {
            format!(" transform=\"rotate({degrees} {cx} {cy})\"")
        };

        // Cell background tint and border.
        let _ = write!(
            svg,
            "<rect x=\"{x}\" y=\"{y}\" width=\"{cell}\" height=\"{cell}\" fill=\"#e8f4fd\"/>",
        );
        let _ = write!(
            svg,
            "<rect x=\"{x}\" y=\"{y}\" width=\"{cell}\" height=\"{cell}\" fill=\"none\" stroke=\"#2196f3\" stroke-opacity=\"0.2\" stroke-width=\"0.5\"/>",
        );

        if let Some(icon) = icon {
            let uri = icon.data_uri();
            let _ = write!(
                svg,
                "<image x=\"{x}\" y=\"{y}\" width=\"{cell}\" height=\"{cell}\" preserveAspectRatio=\"xMidYMid meet\" href=\"{uri}\"{rotate}/>",
            );
        } else {
            let glyph = escape_xml(&element.element_type.glyph().to_string());
            let baseline = cy + 8.5;
            let _ = write!(
                svg,
                "<text x=\"{cx}\" y=\"{baseline}\" font-size=\"24\" font-weight=\"bold\" font-family=\"sans-serif\" fill=\"#1a1a1a\" text-anchor=\"middle\"{rotate}>{glyph}</text>",
            );
        }
    }

    /// Get output dimensions (width, height) in pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn output_dimensions(&self, snapshot: &Snapshot) -> (u32, u32) {
        let out_w = ((snapshot.width * self.config.cell_size) as f32 * self.config.scale) as u32;
        let out_h = ((snapshot.height * self.config.cell_size) as f32 * self.config.scale) as u32;
        (out_w.max(1), out_h.max(1))
    }

    /// Rasterize an SVG string to a tiny-skia Pixmap.
    fn rasterize_svg(svg_string: &str) -> RenderResult<tiny_skia::Pixmap> {
        let mut options = usvg::Options::default();
        // Glyph fallbacks are text nodes; they need real fonts to shape.
        options.fontdb_mut().load_system_fonts();

        let tree = usvg::Tree::from_str(svg_string, &options)
            .map_err(|e| RenderError::Export(format!("SVG parsing failed: {e}")))?;
        let size = tree.size().to_int_size();

        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
            RenderError::Export(format!(
                "pixmap allocation failed at {}x{}",
                size.width(),
                size.height()
            ))
        })?;
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
        Ok(pixmap)
    }

    /// Encode a pixmap to JPEG, compositing alpha over the background color.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn encode_jpeg(&self, pixmap: &tiny_skia::Pixmap) -> RenderResult<Vec<u8>> {
        let [bg_r, bg_g, bg_b, _] = self.config.background;
        let over = |fg: u8, bg: u8, alpha: f32| -> u8 {
            f32::from(fg).mul_add(alpha, f32::from(bg) * (1.0 - alpha)) as u8
        };

        // JPEG has no alpha channel; flatten each pixel onto the background.
        let rgb: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let straight = pixel.demultiply();
                let alpha = f32::from(straight.alpha()) / 255.0;
                [
                    over(straight.red(), bg_r, alpha),
                    over(straight.green(), bg_g, alpha),
                    over(straight.blue(), bg_b, alpha),
                ]
            })
            .collect();

        let mut buf = std::io::Cursor::new(Vec::new());
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, self.config.jpeg_quality)
            .write_image(
                &rgb,
                pixmap.width(),
                pixmap.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| RenderError::Encoding(format!("JPEG encoding failed: {e}")))?;
        Ok(buf.into_inner())
    }
}

impl Default for TrackExporter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{NoAssets, StaticAssets};
    use crate::icon::solid_pixel_png;
    use track_core::{ElementType, GridCoordinate, GridEditor};

    fn snapshot_with(elements: &[(u32, u32, ElementType)]) -> Snapshot {
        let mut editor = GridEditor::new(5, 5);
        for (row, col, ty) in elements {
            editor
                .place(GridCoordinate::new(*row, *col), ty.clone())
                .expect("place");
        }
        editor.snapshot()
    }

    #[tokio::test]
    async fn test_svg_export_empty_board() {
        let snapshot = snapshot_with(&[]);
        let mut exporter = TrackExporter::with_defaults();
        let svg_bytes = exporter
            .export(&snapshot, &NoAssets, ExportFormat::Svg)
            .await
            .expect("svg export");
        let svg = String::from_utf8(svg_bytes).expect("utf8");

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        // 5x5 board at 80 px cells and 2x scale: 800x800 out, 400x400 view.
        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("viewBox=\"0 0 400 400\""));
        // 6 vertical + 6 horizontal lattice lines.
        assert_eq!(svg.matches("<line").count(), 12);
    }

    #[tokio::test]
    async fn test_svg_glyph_fallback_without_assets() {
        let snapshot = snapshot_with(&[(0, 0, ElementType::Start)]);
        let mut exporter = TrackExporter::with_defaults();
        let svg_bytes = exporter
            .export(&snapshot, &NoAssets, ExportFormat::Svg)
            .await
            .expect("svg export");
        let svg = String::from_utf8(svg_bytes).expect("utf8");

        assert!(svg.contains(">S</text>"));
        assert!(svg.contains("#e8f4fd"));
        assert!(!svg.contains("<image"));
    }

    #[tokio::test]
    async fn test_svg_embeds_loaded_icon() {
        let snapshot = snapshot_with(&[(1, 1, ElementType::Corner)]);
        let assets = StaticAssets::new().with_icon("corner", solid_pixel_png(10, 20, 30, 255));

        let mut exporter = TrackExporter::with_defaults();
        let svg_bytes = exporter
            .export(&snapshot, &assets, ExportFormat::Svg)
            .await
            .expect("svg export");
        let svg = String::from_utf8(svg_bytes).expect("utf8");

        assert!(svg.contains("data:image/png;base64,"));
        assert!(!svg.contains("</text>"));
    }

    #[tokio::test]
    async fn test_rotation_transform_in_svg() {
        let mut editor = GridEditor::new(5, 5);
        editor
            .place(GridCoordinate::new(2, 3), ElementType::Straight)
            .expect("place");
        editor.rotate(GridCoordinate::new(2, 3)).expect("rotate");

        let mut exporter = TrackExporter::with_defaults();
        let svg_bytes = exporter
            .export(&editor.snapshot(), &NoAssets, ExportFormat::Svg)
            .await
            .expect("svg export");
        let svg = String::from_utf8(svg_bytes).expect("utf8");

        // Rotated about the center of cell (row 2, col 3): (280, 200).
        assert!(svg.contains("rotate(90 280 200)"));
    }

    #[tokio::test]
    async fn test_png_export_produces_valid_bytes() {
        let snapshot = snapshot_with(&[(0, 0, ElementType::Start)]);
        let mut exporter = TrackExporter::with_defaults();
        let png = exporter
            .export(&snapshot, &NoAssets, ExportFormat::Png)
            .await
            .expect("png export");

        // PNG magic bytes: \x89PNG
        assert!(png.len() > 8);
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }

    #[tokio::test]
    async fn test_jpeg_export_produces_valid_bytes() {
        let snapshot = snapshot_with(&[(0, 0, ElementType::Start)]);
        let mut exporter = TrackExporter::with_defaults();
        let jpeg = exporter
            .export(&snapshot, &NoAssets, ExportFormat::Jpeg)
            .await
            .expect("jpeg export");

        // JPEG magic bytes: FFD8
        assert!(jpeg.len() > 2);
        assert_eq!(jpeg[0], 0xFF);
        assert_eq!(jpeg[1], 0xD8);
    }

    #[tokio::test]
    async fn test_custom_cell_size_and_scale() {
        let snapshot = snapshot_with(&[]);
        let mut exporter = TrackExporter::new(ExportConfig {
            cell_size: 40,
            scale: 1.0,
            ..ExportConfig::default()
        });

        let svg_bytes = exporter
            .export(&snapshot, &NoAssets, ExportFormat::Svg)
            .await
            .expect("svg");
        let svg = String::from_utf8(svg_bytes).expect("utf8");
        assert!(svg.contains("width=\"200\""));
        assert!(svg.contains("viewBox=\"0 0 200 200\""));
    }

    #[test]
    fn test_suggested_filename() {
        let snapshot = snapshot_with(&[]);
        assert_eq!(
            suggested_filename(&snapshot, ExportFormat::Png),
            "Custom Track - 5x5.png"
        );
        assert_eq!(
            suggested_filename(&snapshot, ExportFormat::Jpeg),
            "Custom Track - 5x5.jpg"
        );
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("A<&>\"'"), "A&lt;&amp;&gt;&quot;&apos;");
    }
}
