//! inkset Text - Text layout engine
//!
//! Turns a string, a font and a style into lines and a bounding box:
//! - Style configuration with defaults for every field
//! - Measurement over a 2D metrics surface, a layout probe, or an estimate
//! - Greedy word wrapping with hyphenation of overlong words
//! - Box sizing with stroke-safe padding and per-line vertical placement

pub mod layout;
mod measure;
pub mod style;

pub use layout::{layout, padding, LayoutLine, LayoutResult, LineBreaker, HYPHEN, MIN_WIDTH};
pub use measure::{font_string, Measurement, Measurer, TextFont};
pub use style::{
    Animation, Gradient, GradientDirection, LayoutKey, Length, LineHeight, Shadow, ShadowSpec,
    Skew, StyleConfig, TextTransform,
};

/// Text layout error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Measurement unavailable: {0}")]
    MeasurementUnavailable(String),

    #[error("Measurement surface error: {0}")]
    Canvas(#[from] inkset_canvas::CanvasError),

    #[error("Invalid style configuration: {0}")]
    InvalidStyle(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TextError>;
