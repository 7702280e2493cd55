//! Text layout module

mod line;
mod paragraph;

pub use line::{LineBreaker, HYPHEN};
pub use paragraph::{layout, padding, MIN_WIDTH};

/// A laid out line of text
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    /// Line content (may be empty for blank input)
    pub text: String,
    /// Measured width
    pub width: f32,
    /// Measured height
    pub height: f32,
    /// Vertical center as a percentage of the box height
    pub y_percent: f32,
}

/// Complete text layout result
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Lines of text, top to bottom
    pub lines: Vec<LayoutLine>,
    /// Box width including padding
    pub width: u32,
    /// Box height including padding
    pub height: u32,
    /// Font family the lines were measured with
    pub font_family: String,
}

impl LayoutResult {
    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line contents, top to bottom
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }
}
