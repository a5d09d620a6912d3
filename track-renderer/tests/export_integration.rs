//! End-to-end export tests: editor state through the full raster pipeline.

use track_core::{ChangeEvent, ElementType, GridCoordinate, GridEditor};
use track_renderer::{
    suggested_filename, ExportConfig, ExportFormat, NoAssets, StaticAssets, TrackExporter,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sample_editor() -> GridEditor {
    init_logging();
    let mut editor = GridEditor::new(5, 7);
    editor
        .place(GridCoordinate::new(0, 0), ElementType::Start)
        .expect("place start");
    editor
        .place(GridCoordinate::new(0, 1), ElementType::Straight)
        .expect("place straight");
    editor
        .place(GridCoordinate::new(1, 1), ElementType::Corner)
        .expect("place corner");
    editor
        .place(GridCoordinate::new(6, 4), ElementType::Finish)
        .expect("place finish");
    editor.rotate(GridCoordinate::new(1, 1)).expect("rotate");
    editor
}

#[tokio::test]
async fn png_export_has_expected_dimensions() {
    let editor = sample_editor();
    let mut exporter = TrackExporter::with_defaults();

    let png = exporter
        .export(&editor.snapshot(), &NoAssets, ExportFormat::Png)
        .await
        .expect("png export");

    assert_eq!(&png[0..4], &[137, 80, 78, 71]);

    // 5 wide x 7 tall board at 80 px cells, doubled for export quality.
    let decoded = image::load_from_memory(&png).expect("decodable png");
    assert_eq!(decoded.width(), 5 * 80 * 2);
    assert_eq!(decoded.height(), 7 * 80 * 2);
}

#[tokio::test]
async fn jpeg_export_composites_over_white() {
    let editor = sample_editor();
    let mut exporter = TrackExporter::with_defaults();

    let jpeg = exporter
        .export(&editor.snapshot(), &NoAssets, ExportFormat::Jpeg)
        .await
        .expect("jpeg export");

    assert_eq!(jpeg[0], 0xFF);
    assert_eq!(jpeg[1], 0xD8);

    // An untinted corner pixel should be (near) white, not black.
    let decoded = image::load_from_memory(&jpeg)
        .expect("decodable jpeg")
        .to_rgb8();
    let corner = decoded.get_pixel(decoded.width() - 2, decoded.height() - 2);
    assert!(corner[0] > 240 && corner[1] > 240 && corner[2] > 240);
}

#[tokio::test]
async fn svg_export_draws_every_element() {
    let editor = sample_editor();
    let mut exporter = TrackExporter::with_defaults();

    let svg_bytes = exporter
        .export(&editor.snapshot(), &NoAssets, ExportFormat::Svg)
        .await
        .expect("svg export");
    let svg = String::from_utf8(svg_bytes).expect("utf8");

    // Four placed elements, each with a tint rect and a glyph.
    assert_eq!(svg.matches("#e8f4fd").count(), 4);
    assert_eq!(svg.matches("</text>").count(), 4);
    assert!(svg.contains(">S</text>"));
    assert!(svg.contains(">F</text>"));
}

#[tokio::test]
async fn missing_assets_never_abort_an_export() {
    // One real icon, three elements without one. The export must settle all
    // loads, embed the hit, and fall back to glyphs for the misses.
    let editor = sample_editor();
    let assets = StaticAssets::new().with_icon(
        "straight",
        track_renderer::icon::solid_pixel_png(40, 40, 40, 255),
    );

    let mut exporter = TrackExporter::with_defaults();
    let svg_bytes = exporter
        .export(&editor.snapshot(), &assets, ExportFormat::Svg)
        .await
        .expect("svg export");
    let svg = String::from_utf8(svg_bytes).expect("utf8");

    assert_eq!(svg.matches("data:image/png;base64,").count(), 1);
    assert_eq!(svg.matches("</text>").count(), 3);
}

#[tokio::test]
async fn filled_board_exports_at_reduced_scale() {
    let mut editor = GridEditor::new(3, 3);
    editor
        .place(GridCoordinate::new(1, 1), ElementType::Start)
        .expect("place");
    let filled = editor.fill_empty_spaces();
    assert_eq!(filled, ChangeEvent::Filled { count: 8 });

    let mut exporter = TrackExporter::new(ExportConfig {
        scale: 1.0,
        ..ExportConfig::default()
    });
    let png = exporter
        .export(&editor.snapshot(), &NoAssets, ExportFormat::Png)
        .await
        .expect("png export");

    let decoded = image::load_from_memory(&png).expect("decodable png");
    assert_eq!(decoded.width(), 3 * 80);
    assert_eq!(decoded.height(), 3 * 80);
}

#[tokio::test]
async fn snapshot_round_trip_then_export() {
    let editor = sample_editor();
    let json = editor.snapshot().to_json().expect("serialize");

    let mut restored = GridEditor::default();
    let snapshot = track_core::Snapshot::from_json(&json).expect("deserialize");
    restored.restore(&snapshot).expect("restore");

    let mut exporter = TrackExporter::with_defaults();
    let png = exporter
        .export(&restored.snapshot(), &NoAssets, ExportFormat::Png)
        .await
        .expect("png export");
    assert_eq!(&png[0..4], &[137, 80, 78, 71]);
}

#[test]
fn download_filename_matches_board_dimensions() {
    let editor = sample_editor();
    assert_eq!(
        suggested_filename(&editor.snapshot(), ExportFormat::Png),
        "Custom Track - 5x7.png"
    );
}
