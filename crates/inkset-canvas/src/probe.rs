//! Off-screen layout probe
//!
//! The second way of measuring text: lay the run out as an inline box that
//! is never painted, read back the box, then tear the probe down.

use inkset_font::SharedFontDatabase;

use crate::font_spec::{parse_css_length, FontSpec};
use crate::{CanvasError, Result};

/// Styling applied to a probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeStyle<'a> {
    /// CSS font shorthand
    pub font: &'a str,
    /// CSS `letter-spacing` (`normal` or a length)
    pub letter_spacing: &'a str,
}

/// Box occupied by a probe
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProbeBox {
    pub width: f64,
    pub height: f64,
}

/// Off-screen layout-probe provider
pub trait LayoutProbe {
    /// Lay `text` out invisibly and report the box it occupies
    fn create_probe(&mut self, style: &ProbeStyle<'_>, text: &str) -> Result<ProbeBox>;

    /// Remove the probe created last; harmless when none exists
    fn destroy_probe(&mut self);
}

/// Probe that sizes an inline box from face metrics: advances plus letter
/// spacing after every character, and the face's line box for height.
pub struct LineBoxProbe {
    db: SharedFontDatabase,
    attached: Option<ProbeBox>,
}

impl LineBoxProbe {
    pub fn new(db: SharedFontDatabase) -> Self {
        Self { db, attached: None }
    }

    /// Whether a probe is currently attached
    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }
}

impl LayoutProbe for LineBoxProbe {
    fn create_probe(&mut self, style: &ProbeStyle<'_>, text: &str) -> Result<ProbeBox> {
        if self.attached.is_some() {
            self.destroy_probe();
        }

        let spec = FontSpec::parse(style.font)?;
        let spacing = match style.letter_spacing.trim() {
            "" | "normal" => 0.0,
            other => parse_css_length(other, spec.size_px)
                .ok_or_else(|| CanvasError::InvalidFont(format!("letter-spacing: {}", other)))?,
        };

        let run = spec.measure(&self.db, text)?;
        let chars = text.chars().count() as f64;
        let probe = ProbeBox {
            width: f64::from(run.advance) + spacing * chars,
            height: f64::from(run.line_box()),
        };
        tracing::trace!("Probe for {:?}: {}x{}", text, probe.width, probe.height);
        self.attached = Some(probe);
        Ok(probe)
    }

    fn destroy_probe(&mut self) {
        self.attached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkset_font::FontDatabase;

    #[test]
    fn test_probe_without_fonts_fails_detached() {
        let mut probe = LineBoxProbe::new(FontDatabase::new().shared());
        let style = ProbeStyle {
            font: "72px \"Pacifico\", serif",
            letter_spacing: "normal",
        };
        assert!(probe.create_probe(&style, "Hello").is_err());
        assert!(!probe.is_attached());
    }

    #[test]
    fn test_bad_letter_spacing() {
        let mut probe = LineBoxProbe::new(FontDatabase::new().shared());
        let style = ProbeStyle {
            font: "72px serif",
            letter_spacing: "wide",
        };
        assert!(matches!(
            probe.create_probe(&style, "Hello"),
            Err(CanvasError::InvalidFont(_))
        ));
    }

    #[test]
    fn test_letter_spacing_widens_box() {
        let db = FontDatabase::with_system_fonts();
        if db.is_empty() {
            // Skip on systems without fonts
            return;
        }
        let mut probe = LineBoxProbe::new(db.shared());
        let tight = ProbeStyle {
            font: "40px sans-serif",
            letter_spacing: "normal",
        };
        let loose = ProbeStyle {
            letter_spacing: "4px",
            ..tight
        };
        let Ok(a) = probe.create_probe(&tight, "abc") else { return };
        probe.destroy_probe();
        let b = probe.create_probe(&loose, "abc").unwrap();
        probe.destroy_probe();
        assert!((b.width - a.width - 12.0).abs() < 1e-3);
        assert!(!probe.is_attached());
    }
}
