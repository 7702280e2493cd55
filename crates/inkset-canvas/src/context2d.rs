//! Font-database backed 2D text metrics

use inkset_font::SharedFontDatabase;

use crate::font_spec::FontSpec;
use crate::text::{TextMetrics, TextMetricsProvider};
use crate::Result;

/// Canvas default font
const DEFAULT_FONT: &str = "10px sans-serif";

/// Measurement-only 2D context.
///
/// Keeps the `font` state a canvas context would and answers
/// `measure_text` from glyph advances and bounding boxes of the first face
/// in the family list that the font database can match.
pub struct FontCanvas {
    db: SharedFontDatabase,
    font: String,
    spec: FontSpec,
}

impl FontCanvas {
    pub fn new(db: SharedFontDatabase) -> Self {
        let spec = FontSpec {
            size_px: 10.0,
            query: inkset_font::FontQuery::default(),
        };
        Self {
            db,
            font: DEFAULT_FONT.to_string(),
            spec,
        }
    }

    /// Current font shorthand
    pub fn font(&self) -> &str {
        &self.font
    }
}

impl TextMetricsProvider for FontCanvas {
    fn set_font(&mut self, font: &str) -> Result<()> {
        if font == self.font {
            return Ok(());
        }
        // An unparsable font leaves the previous one in effect, like a canvas
        self.spec = FontSpec::parse(font)
            .inspect_err(|e| tracing::debug!("Keeping font {}: {}", self.font, e))?;
        self.font = font.to_string();
        Ok(())
    }

    fn measure_text(&self, text: &str) -> Result<TextMetrics> {
        let run = self.spec.measure(&self.db, text)?;
        Ok(TextMetrics {
            width: f64::from(run.advance),
            actual_bounding_box_ascent: run.ink_ascent.map(f64::from),
            actual_bounding_box_descent: run.ink_descent.map(f64::from),
            font_bounding_box_ascent: Some(f64::from(run.ascent)),
            font_bounding_box_descent: Some(f64::from(run.descent)),
        })
    }
}
