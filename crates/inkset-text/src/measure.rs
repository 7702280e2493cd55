//! Text measurement
//!
//! Asks the 2D metrics surface first, then the layout probe, and falls back
//! to an analytic estimate. Measuring never fails.

use inkset_canvas::{
    FontCanvas, LayoutProbe, LineBoxProbe, ProbeStyle, TextMetricsProvider,
};
use inkset_font::SharedFontDatabase;

use crate::style::DEFAULT_FONT_SIZE;
use crate::{Result, TextError};

/// Width of one character in the analytic estimate, in ems
const ESTIMATE_EM_PER_CHAR: f32 = 0.6;

/// Width and height of a text run, in the units of the rendering box
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measurement {
    pub width: f32,
    pub height: f32,
}

/// The font a run is measured with
#[derive(Debug, Clone, PartialEq)]
pub struct TextFont<'a> {
    pub family: &'a str,
    /// CSS font size, e.g. `"72px"`
    pub size: &'a str,
    /// Numeric font size used by estimates
    pub size_px: f32,
    pub fallback: &'a str,
    /// CSS letter spacing, e.g. `"normal"`
    pub letter_spacing: &'a str,
}

impl<'a> TextFont<'a> {
    pub fn new(family: &'a str, size: &'a str, fallback: &'a str, letter_spacing: &'a str) -> Self {
        let size_px = size
            .trim()
            .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
            .parse::<f32>()
            .ok()
            .filter(|px| px.is_finite() && *px > 0.0)
            .unwrap_or(DEFAULT_FONT_SIZE);
        Self {
            family,
            size,
            size_px,
            fallback,
            letter_spacing,
        }
    }

    /// Override the numeric size used by estimates
    pub fn with_size_px(mut self, size_px: f32) -> Self {
        self.size_px = size_px;
        self
    }

    /// Composite CSS font: `<size> "<family>", <fallback>`
    pub fn font_string(&self) -> String {
        font_string(self.size, self.family, self.fallback)
    }
}

/// Composite CSS font: `<size> "<family>", <fallback>`
pub fn font_string(size: &str, family: &str, fallback: &str) -> String {
    format!("{} \"{}\", {}", size, family, fallback)
}

/// Measurement surface adapter
pub struct Measurer {
    primary: Option<Box<dyn TextMetricsProvider>>,
    probe: Option<Box<dyn LayoutProbe>>,
}

impl Measurer {
    pub fn new(
        primary: Option<Box<dyn TextMetricsProvider>>,
        probe: Option<Box<dyn LayoutProbe>>,
    ) -> Self {
        Self { primary, probe }
    }

    /// Both surfaces backed by a shared font database
    pub fn from_database(db: SharedFontDatabase) -> Self {
        Self::new(
            Some(Box::new(FontCanvas::new(db.clone()))),
            Some(Box::new(LineBoxProbe::new(db))),
        )
    }

    /// No surfaces: every measurement is the analytic estimate
    pub fn estimate_only() -> Self {
        Self::new(None, None)
    }

    pub fn with_primary(mut self, primary: impl TextMetricsProvider + 'static) -> Self {
        self.primary = Some(Box::new(primary));
        self
    }

    pub fn with_probe(mut self, probe: impl LayoutProbe + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Measure `text` in `font`
    pub fn measure(&mut self, text: &str, font: &TextFont<'_>) -> Measurement {
        self.measure_surfaces(text, font).unwrap_or_else(|e| {
            tracing::debug!("{}; estimating {:?}", e, text);
            estimate(text, font)
        })
    }

    fn measure_surfaces(&mut self, text: &str, font: &TextFont<'_>) -> Result<Measurement> {
        let font_string = font.font_string();

        let primary_error = match self.measure_primary(text, font, &font_string) {
            Ok(m) if m.width > 0.0 && m.height > 0.0 => return Ok(m),
            Ok(m) => format!("non-positive metrics {}x{}", m.width, m.height),
            Err(e) => e.to_string(),
        };
        tracing::trace!("Primary measurement unusable ({}), probing", primary_error);

        self.measure_probe(text, font, &font_string)
            .map_err(|e| TextError::MeasurementUnavailable(format!("{}; {}", primary_error, e)))
    }

    fn measure_primary(
        &mut self,
        text: &str,
        font: &TextFont<'_>,
        font_string: &str,
    ) -> Result<Measurement> {
        let provider = self
            .primary
            .as_mut()
            .ok_or(inkset_canvas::CanvasError::Unavailable)?;
        provider.set_font(font_string)?;
        let metrics = provider.measure_text(text)?;
        let height = metrics.height().unwrap_or(f64::from(font.size_px));
        Ok(Measurement {
            width: metrics.width as f32,
            height: height as f32,
        })
    }

    fn measure_probe(
        &mut self,
        text: &str,
        font: &TextFont<'_>,
        font_string: &str,
    ) -> Result<Measurement> {
        let probe = self
            .probe
            .as_mut()
            .ok_or(inkset_canvas::CanvasError::Unavailable)?;
        let style = ProbeStyle {
            font: font_string,
            letter_spacing: font.letter_spacing,
        };
        let probed = probe.create_probe(&style, text);
        probe.destroy_probe();
        let probed = probed?;

        let width = if probed.width > 0.0 {
            probed.width as f32
        } else {
            estimate(text, font).width
        };
        let height = if probed.height > 0.0 {
            probed.height as f32
        } else {
            font.size_px
        };
        Ok(Measurement { width, height })
    }
}

/// Analytic estimate: 0.6em per character, one em high
fn estimate(text: &str, font: &TextFont<'_>) -> Measurement {
    Measurement {
        width: text.chars().count() as f32 * font.size_px * ESTIMATE_EM_PER_CHAR,
        height: font.size_px,
    }
}
