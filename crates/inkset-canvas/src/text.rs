//! Text Metrics
//!
//! Canvas 2D `measureText` equivalent.

use crate::Result;

/// Text metrics
///
/// Bounding-box fields are optional: a surface reports them only when it
/// can compute them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width
    pub width: f64,
    pub actual_bounding_box_ascent: Option<f64>,
    pub actual_bounding_box_descent: Option<f64>,
    pub font_bounding_box_ascent: Option<f64>,
    pub font_bounding_box_descent: Option<f64>,
}

impl TextMetrics {
    /// Ink height when available, else the font bounding box height
    pub fn height(&self) -> Option<f64> {
        match (self.actual_bounding_box_ascent, self.actual_bounding_box_descent) {
            (Some(ascent), Some(descent)) => Some(ascent + descent),
            _ => match (self.font_bounding_box_ascent, self.font_bounding_box_descent) {
                (Some(ascent), Some(descent)) => Some(ascent + descent),
                _ => None,
            },
        }
    }
}

/// A 2D text-metrics provider
pub trait TextMetricsProvider {
    /// Set the CSS font shorthand used by later measurements
    fn set_font(&mut self, font: &str) -> Result<()>;

    /// Measure text with the current font
    fn measure_text(&self, text: &str) -> Result<TextMetrics>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_prefers_ink_box() {
        let metrics = TextMetrics {
            width: 10.0,
            actual_bounding_box_ascent: Some(50.0),
            actual_bounding_box_descent: Some(12.0),
            font_bounding_box_ascent: Some(70.0),
            font_bounding_box_descent: Some(20.0),
        };
        assert_eq!(metrics.height(), Some(62.0));
    }

    #[test]
    fn test_height_falls_back_to_font_box() {
        let metrics = TextMetrics {
            width: 10.0,
            actual_bounding_box_ascent: None,
            actual_bounding_box_descent: None,
            font_bounding_box_ascent: Some(70.0),
            font_bounding_box_descent: Some(20.0),
        };
        assert_eq!(metrics.height(), Some(90.0));
        assert_eq!(TextMetrics::default().height(), None);
    }
}
