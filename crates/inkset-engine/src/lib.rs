//! inkset Engine
//!
//! Renders user text as stylized vector graphics whose box is known before
//! paint.
//!
//! # Pipeline
//! - Wait for the web font (or give up and use the fallback)
//! - Measure and wrap the text, then size the box around it
//! - Compose gradient, shadow, transform and per-line paint records
//!
//! # Example
//! ```rust,ignore
//! use inkset_engine::{CreativeText, EngineConfig, Props};
//! use inkset_font::{DeferredFetcher, FetchOutcome};
//! use inkset_text::{Measurer, StyleConfig};
//!
//! let config = EngineConfig::default();
//! let fetcher = DeferredFetcher::new();
//! let registry = config.registry(fetcher.clone());
//! let text = CreativeText::new(
//!     Props::new("Hello World", StyleConfig::default()),
//!     registry,
//!     Measurer::estimate_only(),
//!     &config,
//! );
//! fetcher.resolve("Pacifico", FetchOutcome::Active);
//! println!("{}", text.render_svg());
//! ```

mod component;
mod config;

pub use component::{CreativeText, FontCallbacks, FontPhase, LayoutInputs, Props};
pub use config::EngineConfig;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine error
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid style: {0}")]
    Style(#[from] inkset_text::TextError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
