//! Integration tests - Font resolution through layout to rendering
//!
//! Tests the complete workflow: font request → layout → visual description

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use inkset_canvas::{FontSpec, TextMetrics, TextMetricsProvider};
use inkset_engine::*;
use inkset_font::{DeferredFetcher, FetchOutcome, FontDatabase, FontFamily, FontLoadFailed, FontLoadState};
use inkset_text::{Measurer, Shadow, ShadowSpec, StyleConfig};

/// Half an em per character; remembers every font it was configured with
struct RecordingCanvas {
    size_px: f64,
    fonts: Rc<RefCell<Vec<String>>>,
}

impl TextMetricsProvider for RecordingCanvas {
    fn set_font(&mut self, font: &str) -> inkset_canvas::Result<()> {
        self.size_px = FontSpec::parse(font)?.size_px;
        self.fonts.borrow_mut().push(font.to_string());
        Ok(())
    }

    fn measure_text(&self, text: &str) -> inkset_canvas::Result<TextMetrics> {
        Ok(TextMetrics {
            width: text.chars().count() as f64 * self.size_px * 0.5,
            actual_bounding_box_ascent: Some(self.size_px * 0.7),
            actual_bounding_box_descent: Some(self.size_px * 0.2),
            ..TextMetrics::default()
        })
    }
}

fn recording_measurer() -> (Measurer, Rc<RefCell<Vec<String>>>) {
    let fonts = Rc::new(RefCell::new(Vec::new()));
    let canvas = RecordingCanvas {
        size_px: 10.0,
        fonts: fonts.clone(),
    };
    (Measurer::estimate_only().with_primary(canvas), fonts)
}

#[derive(Default, Clone)]
struct Notices {
    loaded: Rc<Cell<usize>>,
    errors: Rc<RefCell<Vec<FontLoadFailed>>>,
}

impl Notices {
    fn callbacks(&self) -> FontCallbacks {
        let loaded = self.loaded.clone();
        let errors = self.errors.clone();
        FontCallbacks::new()
            .on_font_load(move || loaded.set(loaded.get() + 1))
            .on_font_error(move |e| errors.borrow_mut().push(e.clone()))
    }
}

struct Harness {
    config: EngineConfig,
    fetcher: DeferredFetcher,
    registry: inkset_font::FontRegistry,
}

impl Harness {
    fn new() -> Self {
        let config = EngineConfig::default();
        let fetcher = DeferredFetcher::new();
        let registry = config.registry(fetcher.clone());
        Self {
            config,
            fetcher,
            registry,
        }
    }

    fn text(&self, text: &str, style: StyleConfig, notices: &Notices) -> CreativeText {
        CreativeText::with_callbacks(
            Props::new(text, style),
            self.registry.clone(),
            Measurer::estimate_only(),
            &self.config,
            notices.callbacks(),
        )
    }
}

// ============================================================================
// FONT RESOLUTION
// ============================================================================

#[test]
fn test_timeout_falls_back() {
    let harness = Harness::new();
    let notices = Notices::default();
    let (measurer, fonts) = recording_measurer();
    let text = CreativeText::with_callbacks(
        Props::new("Hello World", StyleConfig::default()),
        harness.registry.clone(),
        measurer,
        &harness.config,
        notices.callbacks(),
    );
    assert!(text.render().is_placeholder());

    assert_eq!(harness.fetcher.advance(Duration::from_secs(9)), 0);
    assert_eq!(text.phase(), FontPhase::Awaiting);
    assert_eq!(harness.fetcher.advance(Duration::from_secs(1)), 1);

    assert_eq!(text.phase(), FontPhase::Failed);
    assert_eq!(notices.loaded.get(), 0);
    let errors = notices.errors.borrow();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].family, "Pacifico");
    assert!(errors[0].timed_out);
    assert_eq!(errors[0].to_string(), "Failed to load font: Pacifico");

    assert_eq!(text.effective_font(), "serif");
    assert!(text.is_ready());
    let desc = text.render();
    assert!(!desc.is_placeholder());
    assert_eq!(desc.lines[0].font_family, "serif");
    assert!(!fonts.borrow().is_empty());
    assert!(fonts.borrow().iter().all(|f| f == "72px \"serif\", serif"));

    // A late outcome after the timeout changes nothing
    assert!(!harness.fetcher.resolve("Pacifico", FetchOutcome::Active));
    assert_eq!(text.phase(), FontPhase::Failed);
}

#[test]
fn test_shared_font_loaded_once() {
    let harness = Harness::new();
    let notices = Notices::default();
    let a = harness.text("First", StyleConfig::default(), &notices);
    let b = harness.text("Second", StyleConfig::default(), &notices);

    assert_eq!(harness.fetcher.requests(), vec!["Pacifico"]);
    assert_eq!(harness.registry.state("Pacifico"), FontLoadState::Loading);

    harness.fetcher.resolve("Pacifico", FetchOutcome::Active);
    assert_eq!(notices.loaded.get(), 2);
    assert_eq!(a.phase(), FontPhase::Ready);
    assert_eq!(b.phase(), FontPhase::Ready);
    assert_eq!(a.effective_font(), "Pacifico");

    // Cached: a later instance is ready without another request
    let c = harness.text("Third", StyleConfig::default(), &notices);
    assert!(c.is_ready());
    assert_eq!(notices.loaded.get(), 3);
    assert_eq!(harness.registry.requests_issued(), 1);
}

#[test]
fn test_failed_font_cached() {
    let harness = Harness::new();
    let notices = Notices::default();
    let _a = harness.text("One", StyleConfig::default(), &notices);
    harness.fetcher.resolve("Pacifico", FetchOutcome::Inactive);
    assert_eq!(notices.errors.borrow().len(), 1);
    assert!(!notices.errors.borrow()[0].timed_out);

    let b = harness.text("Two", StyleConfig::default(), &notices);
    assert_eq!(b.phase(), FontPhase::Failed);
    assert!(b.is_ready());
    assert_eq!(notices.errors.borrow().len(), 2);
    assert_eq!(harness.fetcher.requests().len(), 1);
}

#[test]
fn test_family_change_uses_fallback_while_pending() {
    let harness = Harness::new();
    let notices = Notices::default();
    let text = harness.text("Swap fonts", StyleConfig::default(), &notices);
    harness.fetcher.resolve("Pacifico", FetchOutcome::Active);
    assert_eq!(text.layout().unwrap().font_family, "Pacifico");

    text.edit(|props| props.style.font_family = Some(FontFamily::Lobster));
    assert_eq!(text.phase(), FontPhase::Awaiting);
    assert_eq!(text.effective_font(), "serif");
    assert_eq!(text.layout().unwrap().font_family, "serif");
    assert!(!text.render().is_placeholder());

    harness.fetcher.resolve("Lobster", FetchOutcome::Active);
    assert_eq!(text.phase(), FontPhase::Ready);
    assert_eq!(text.layout().unwrap().font_family, "Lobster");
    assert_eq!(notices.loaded.get(), 2);
}

#[test]
fn test_abandoned_family_outcome_ignored() {
    let harness = Harness::new();
    let notices = Notices::default();
    let text = harness.text("Pending", StyleConfig::default(), &notices);

    text.edit(|props| props.style.font_family = Some(FontFamily::Bangers));
    harness.fetcher.resolve("Pacifico", FetchOutcome::Active);
    assert_eq!(text.phase(), FontPhase::Awaiting);
    assert_eq!(notices.loaded.get(), 0);

    harness.fetcher.resolve("Bangers", FetchOutcome::Active);
    assert_eq!(text.effective_font(), "Bangers");
    assert_eq!(notices.loaded.get(), 1);
}

#[test]
fn test_drop_revokes_callbacks() {
    let harness = Harness::new();
    let notices = Notices::default();
    let text = harness.text("Gone", StyleConfig::default(), &notices);
    drop(text);

    assert!(harness.fetcher.resolve("Pacifico", FetchOutcome::Active));
    assert_eq!(notices.loaded.get(), 0);
    assert_eq!(harness.registry.state("Pacifico"), FontLoadState::Loaded);
}

// ============================================================================
// RECOMPUTATION
// ============================================================================

#[test]
fn test_only_size_affecting_changes_relayout() {
    let harness = Harness::new();
    let text = harness.text("Steady", StyleConfig::default(), &Notices::default());
    harness.fetcher.resolve("Pacifico", FetchOutcome::Active);
    assert_eq!(text.layout_count(), 1);

    text.edit(|props| {
        props.style.color = "tomato".into();
        props.style.rotation = 15.0;
    });
    assert_eq!(text.layout_count(), 1);
    let desc = text.render();
    assert_eq!(desc.lines[0].fill, "tomato");
    assert_eq!(desc.container.transform.as_deref(), Some("rotate(15deg)"));

    text.edit(|props| {
        props.text = "Steady and wider".into();
        props.style.stroke_width = 2.0;
    });
    assert_eq!(text.layout_count(), 2);

    text.set_text("Steady and wider");
    assert_eq!(text.layout_count(), 2);
}

#[test]
fn test_responsive_resize() {
    let harness = Harness::new();
    let words = "resize me please ".repeat(4);
    let text = harness.text(&words, StyleConfig::default(), &Notices::default());
    harness.fetcher.resolve("Pacifico", FetchOutcome::Active);
    let before = text.layout().unwrap();

    text.resize_container(400.0);
    let narrow = text.layout().unwrap();
    assert!(narrow.line_count() > before.line_count());
    assert_eq!(text.layout_count(), 2);

    text.resize_container(400.0);
    assert_eq!(text.layout_count(), 2);
    assert_eq!(harness.fetcher.requests().len(), 1);
}

#[test]
fn test_fixed_text_ignores_resize() {
    let harness = Harness::new();
    let style = StyleConfig {
        responsive: false,
        ..StyleConfig::default()
    };
    let text = harness.text("Fixed size", style, &Notices::default());
    harness.fetcher.resolve("Pacifico", FetchOutcome::Active);

    text.resize_container(320.0);
    assert_eq!(text.layout_count(), 1);
}

#[test]
fn test_explicit_width_wins_over_container() {
    let harness = Harness::new();
    let style = StyleConfig::default().max_width(900.0f32);
    let text = harness.text("Explicit width", style, &Notices::default());
    harness.fetcher.resolve("Pacifico", FetchOutcome::Active);

    text.resize_container(200.0);
    assert_eq!(text.layout_count(), 1);
}

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn test_custom_shadow_rendered() {
    let harness = Harness::new();
    let style = StyleConfig {
        shadow: Shadow::Custom(ShadowSpec {
            offset_x: Some(10.0),
            blur: Some(2.0),
            ..ShadowSpec::default()
        }),
        ..StyleConfig::default()
    };
    let text = harness.text("Shadowed", style, &Notices::default());
    harness.fetcher.resolve("Pacifico", FetchOutcome::Active);

    let filter = text.render().filter.unwrap();
    assert_eq!(filter.id, text.definition_ids().filter);
    assert_eq!(filter.shadow.offset_x, 10.0);
    assert_eq!(filter.shadow.offset_y, 6.0);
    assert_eq!(filter.shadow.blur, 2.0);

    let svg = text.render_svg();
    assert!(svg.contains(r#"dx="10" dy="6" stdDeviation="2""#));
    assert!(svg.contains(&format!("filter=\"url(#{}-filter)\"", text.id())));
}

#[test]
fn test_style_json() {
    let harness = Harness::new();
    let text = harness.text("Json", StyleConfig::default(), &Notices::default());

    text.set_style_json(r#"{"fontFamily": null, "strokeWidth": 2}"#)
        .expect("valid style");
    assert_eq!(text.phase(), FontPhase::Ready);
    assert!(text.is_ready());
    assert_eq!(text.props().style.stroke_width, 2.0);

    let err = text.set_style_json(r#"{"fontFamily": "Not A Font"}"#).unwrap_err();
    assert!(matches!(err, EngineError::Style(_)));
    assert_eq!(text.props().style.stroke_width, 2.0);
}

#[test]
fn test_real_database_without_fonts_still_lays_out() {
    let config = EngineConfig::default();
    let fetcher = DeferredFetcher::new();
    let text = CreativeText::new(
        Props::new("Hello World", StyleConfig::default().font_family(None)),
        config.registry(fetcher),
        Measurer::from_database(FontDatabase::new().shared()),
        &config,
    );

    let layout = text.layout().expect("laid out");
    assert_eq!(layout.texts(), vec!["Hello World"]);
    assert!(layout.height >= 108);
}
