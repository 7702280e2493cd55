//! Edge case tests for inkset-canvas
//!
//! Tests for font shorthand parsing and the database-backed surfaces.

use inkset_canvas::*;
use inkset_font::FontDatabase;

// ============================================================================
// FONT SHORTHAND TESTS
// ============================================================================

#[test]
fn test_fallback_only_font_string() {
    let spec = FontSpec::parse("72px \"serif\", serif").unwrap();
    assert_eq!(spec.size_px, 72.0);
    assert_eq!(spec.query.families.len(), 2);
}

#[test]
fn test_family_with_spaces() {
    let spec = FontSpec::parse("48px \"Permanent Marker\", cursive").unwrap();
    assert_eq!(
        spec.query.families[0],
        inkset_font::FamilyName::Named("Permanent Marker".into())
    );
}

#[test]
fn test_zero_size_rejected() {
    assert!(matches!(
        FontSpec::parse("0px serif"),
        Err(CanvasError::InvalidFont(_))
    ));
}

// ============================================================================
// SURFACE TESTS
// ============================================================================

#[test]
fn test_canvas_same_font_is_noop() {
    let mut canvas = FontCanvas::new(FontDatabase::new().shared());
    canvas.set_font("20px serif").unwrap();
    canvas.set_font("20px serif").unwrap();
    assert_eq!(canvas.font(), "20px serif");
}

#[test]
fn test_canvas_and_probe_agree_on_width() {
    let db = FontDatabase::with_system_fonts();
    if db.is_empty() {
        // Skip on systems without fonts
        return;
    }
    let db = db.shared();
    let font = "36px \"Lobster\", serif";

    let mut canvas = FontCanvas::new(db.clone());
    canvas.set_font(font).unwrap();
    let Ok(metrics) = canvas.measure_text("Hello World") else { return };

    let mut probe = LineBoxProbe::new(db);
    let style = ProbeStyle {
        font,
        letter_spacing: "normal",
    };
    let probed = probe.create_probe(&style, "Hello World").unwrap();
    probe.destroy_probe();

    assert!((metrics.width - probed.width).abs() < 1e-3);
    assert!(probed.height > 0.0);
}

#[test]
fn test_destroy_without_probe_is_harmless() {
    let mut probe = LineBoxProbe::new(FontDatabase::new().shared());
    probe.destroy_probe();
    probe.destroy_probe();
    assert!(!probe.is_attached());
}
