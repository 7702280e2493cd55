//! CSS font shorthand

use inkset_font::{FontFace, FontQuery, RunMetrics, SharedFontDatabase};

use crate::{CanvasError, Result};

/// Pixels per `em` when no parent size is known
const DEFAULT_EM_PX: f64 = 16.0;

/// A parsed `font` shorthand: size plus family list
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub size_px: f64,
    pub query: FontQuery,
}

impl FontSpec {
    /// Parse `[style] [weight] <size>[/<line-height>] <family-list>`.
    pub fn parse(font: &str) -> Result<Self> {
        let mut rest = font.trim();
        loop {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let token = &rest[..end];
            if token.is_empty() {
                return Err(CanvasError::InvalidFont(font.to_string()));
            }
            rest = rest[end..].trim_start();

            let size_token = token.split('/').next().unwrap_or(token);
            if let Some(size_px) = parse_css_length(size_token, DEFAULT_EM_PX) {
                let query = FontQuery::from_css_list(rest);
                if query.is_empty() || size_px <= 0.0 {
                    return Err(CanvasError::InvalidFont(font.to_string()));
                }
                return Ok(Self { size_px, query });
            }
            if !is_prefix_keyword(token) {
                return Err(CanvasError::InvalidFont(font.to_string()));
            }
        }
    }

    /// Measure `text` with the first matching face in `db`
    pub fn measure(&self, db: &SharedFontDatabase, text: &str) -> Result<RunMetrics> {
        let db = db.borrow();
        let id = db
            .query(&self.query)
            .ok_or_else(|| CanvasError::NoMatchingFont(format!("{:?}", self.query.families)))?;
        db.with_face_data(id, |data, index| {
            FontFace::parse(data, index, id).map(|face| face.measure_run(text, self.size_px as f32))
        })
        .flatten()
        .ok_or_else(|| CanvasError::FaceParsing(format!("{:?}", self.query.families)))
    }
}

fn is_prefix_keyword(token: &str) -> bool {
    matches!(
        token.to_ascii_lowercase().as_str(),
        "normal" | "italic" | "oblique" | "bold" | "bolder" | "lighter" | "small-caps"
    ) || token.parse::<u16>().is_ok()
}

/// Resolve a CSS length to pixels. `em`, `rem` and `%` resolve against
/// `em_px`. Unitless zero is accepted; other unitless numbers are not.
pub fn parse_css_length(value: &str, em_px: f64) -> Option<f64> {
    let value = value.trim().to_ascii_lowercase();
    let (number, factor) = if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = value.strip_suffix("pt") {
        (n, 4.0 / 3.0)
    } else if let Some(n) = value.strip_suffix("rem") {
        (n, DEFAULT_EM_PX)
    } else if let Some(n) = value.strip_suffix("em") {
        (n, em_px)
    } else if let Some(n) = value.strip_suffix('%') {
        (n, em_px / 100.0)
    } else if value == "0" {
        ("0", 0.0)
    } else {
        return None;
    };
    let number: f64 = number.trim().parse().ok()?;
    number.is_finite().then_some(number * factor)
}
