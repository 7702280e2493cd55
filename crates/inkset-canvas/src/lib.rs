//! inkset Canvas - Text measurement surfaces
//!
//! The collaborators the layout engine queries for text geometry:
//! - A canvas-style 2D text-metrics provider ([`TextMetricsProvider`])
//! - An off-screen layout probe ([`LayoutProbe`])
//!
//! Both come with font-database backed implementations.

mod context2d;
mod font_spec;
mod probe;
mod text;

pub use context2d::FontCanvas;
pub use font_spec::{parse_css_length, FontSpec};
pub use probe::{LayoutProbe, LineBoxProbe, ProbeBox, ProbeStyle};
pub use text::{TextMetrics, TextMetricsProvider};

/// Canvas error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CanvasError {
    #[error("Invalid font: {0}")]
    InvalidFont(String),

    #[error("No font matches: {0}")]
    NoMatchingFont(String),

    #[error("Failed to parse font face for: {0}")]
    FaceParsing(String),

    #[error("Measurement surface unavailable")]
    Unavailable,
}

pub type Result<T> = std::result::Result<T, CanvasError>;
