//! Example: Basic usage of inkset
//!
//! Lays out a piece of creative text against the system fonts and prints
//! the resulting SVG. Pass a directory of font files to resolve web font
//! families from it.

use inkset_engine::{CreativeText, EngineConfig, FontCallbacks, Props};
use inkset_font::{DatabaseFetcher, FontDatabase};
use inkset_text::{Measurer, StyleConfig};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let db = FontDatabase::with_system_fonts().shared();
    let mut fetcher = DatabaseFetcher::new(db.clone());
    if let Some(dir) = std::env::args().nth(1) {
        fetcher = fetcher.with_search_dir(dir);
    }

    let config = EngineConfig::default();
    let style = StyleConfig::from_json(
        r##"{
            "fontSize": 64,
            "maxWidth": "720px",
            "gradient": { "colors": ["#ff6b6b", "#feca57", "#48dbfb"], "direction": "diagonal" },
            "shadow": { "offsetX": 4, "blur": 2 },
            "rotation": -3
        }"##,
    )?;

    let text = CreativeText::with_callbacks(
        Props::new("Creative text that wraps across lines", style),
        config.registry(fetcher),
        Measurer::from_database(db),
        &config,
        FontCallbacks::new()
            .on_font_load(|| tracing::info!("Font loaded"))
            .on_font_error(|e| tracing::warn!("{}", e)),
    );

    println!("inkset v{} ({} with {})", inkset_engine::VERSION, text.id(), text.effective_font());
    if let Some(layout) = text.layout() {
        for line in &layout.lines {
            println!("  {:?} ({:.1}px)", line.text, line.width);
        }
        println!("Box: {}x{}", layout.width, layout.height);
    }
    println!("{}", text.render_svg());
    Ok(())
}
