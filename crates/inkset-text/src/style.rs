//! Style configuration
//!
//! Every field has a default, so a host can supply any subset, either by
//! struct update or as JSON (`camelCase` keys).

use inkset_font::FontFamily;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Font size used when a size string carries no digits
pub const DEFAULT_FONT_SIZE: f32 = 72.0;

/// Line-height multiplier used when the configured one is not a number
pub const DEFAULT_LINE_HEIGHT: f32 = 1.2;

/// A length given either as a number of pixels or as a CSS string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Length {
    Px(f32),
    Css(String),
}

impl Length {
    /// CSS form; bare numbers become pixels
    pub fn to_css(&self) -> String {
        match self {
            Length::Px(px) => format!("{}px", px),
            Length::Css(css) => css.clone(),
        }
    }

    /// Leading integer of the CSS form (`"350px"` → 350), if any
    pub fn leading_integer(&self) -> Option<f32> {
        match self {
            Length::Px(px) => px.is_finite().then(|| px.trunc()),
            Length::Css(css) => leading_integer(css),
        }
    }
}

impl From<f32> for Length {
    fn from(px: f32) -> Self {
        Length::Px(px)
    }
}

impl From<&str> for Length {
    fn from(css: &str) -> Self {
        Length::Css(css.to_string())
    }
}

/// Optional sign followed by digits, after leading whitespace
fn leading_integer(s: &str) -> Option<f32> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<f32>().ok().map(|n| sign * n)
}

/// First run of digits anywhere in the string
fn first_digit_run(s: &str) -> Option<f32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Line-height multiplier as a number or numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineHeight {
    Number(f32),
    Text(String),
}

impl LineHeight {
    pub fn multiplier(&self) -> f32 {
        let value = match self {
            LineHeight::Number(n) => Some(*n),
            LineHeight::Text(s) => s.trim().parse::<f32>().ok(),
        };
        value
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(DEFAULT_LINE_HEIGHT)
    }
}

/// Explicit drop-shadow parameters; omitted fields take the defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShadowSpec {
    pub offset_x: Option<f32>,
    pub offset_y: Option<f32>,
    pub blur: Option<f32>,
    pub color: Option<String>,
    pub opacity: Option<f32>,
}

/// Shadow switch or explicit shadow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Shadow {
    Enabled(bool),
    Custom(ShadowSpec),
}

impl Default for Shadow {
    fn default() -> Self {
        Shadow::Enabled(true)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    #[default]
    Horizontal,
    Vertical,
    Diagonal,
}

/// Linear gradient fill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub colors: Vec<String>,
    #[serde(default)]
    pub direction: GradientDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    #[default]
    None,
    Fade,
    Slide,
    Bounce,
    Glow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

impl TextTransform {
    /// CSS keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            TextTransform::None => "none",
            TextTransform::Uppercase => "uppercase",
            TextTransform::Lowercase => "lowercase",
            TextTransform::Capitalize => "capitalize",
        }
    }
}

/// Skew angles in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skew {
    pub x: f32,
    pub y: f32,
}

/// Immutable style input of a creative text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConfig {
    /// Web font to request; `None` renders with the fallback font only
    pub font_family: Option<FontFamily>,
    pub font_size: Length,
    pub color: String,
    pub stroke_color: String,
    pub stroke_width: f32,
    pub shadow: Shadow,
    pub gradient: Option<Gradient>,
    pub animation: Animation,
    pub responsive: bool,
    /// Absent means the width is derived from the content
    pub max_width: Option<Length>,
    pub fallback_font: String,
    pub letter_spacing: Length,
    pub line_height: LineHeight,
    pub text_transform: TextTransform,
    pub opacity: f32,
    /// Degrees
    pub rotation: f32,
    pub skew: Skew,
    /// Extra container classes
    pub class_name: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: Some(FontFamily::Pacifico),
            font_size: Length::Css("72px".to_string()),
            color: "white".to_string(),
            stroke_color: "black".to_string(),
            stroke_width: 8.0,
            shadow: Shadow::default(),
            gradient: None,
            animation: Animation::None,
            responsive: true,
            max_width: None,
            fallback_font: "serif".to_string(),
            letter_spacing: Length::Css("normal".to_string()),
            line_height: LineHeight::Number(DEFAULT_LINE_HEIGHT),
            text_transform: TextTransform::None,
            opacity: 1.0,
            rotation: 0.0,
            skew: Skew::default(),
            class_name: String::new(),
        }
    }
}

impl StyleConfig {
    /// Parse a JSON style; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set font size
    pub fn font_size(mut self, size: impl Into<Length>) -> Self {
        self.font_size = size.into();
        self
    }

    /// Set max width
    pub fn max_width(mut self, width: impl Into<Length>) -> Self {
        self.max_width = Some(width.into());
        self
    }

    /// Set stroke width
    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    /// Set web font family
    pub fn font_family(mut self, family: Option<FontFamily>) -> Self {
        self.font_family = family;
        self
    }

    /// Font size as CSS (`72` → `"72px"`)
    pub fn font_size_css(&self) -> String {
        self.font_size.to_css()
    }

    /// Numeric font size: first digit run of the CSS size, 72 if none.
    ///
    /// Units are not resolved: `"4rem"` gives 4 here (padding, placeholder
    /// and height floor) while the measurement surface draws at 64px.
    pub fn numeric_font_size(&self) -> f32 {
        first_digit_run(&self.font_size_css()).unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Explicit max width in pixels; unparsable values count as absent
    pub fn max_width_px(&self) -> Option<f32> {
        self.max_width.as_ref().and_then(Length::leading_integer)
    }

    pub fn letter_spacing_css(&self) -> String {
        self.letter_spacing.to_css()
    }

    pub fn line_height_multiplier(&self) -> f32 {
        self.line_height.multiplier()
    }

    /// The gradient, if it has at least one color
    pub fn active_gradient(&self) -> Option<&Gradient> {
        self.gradient.as_ref().filter(|g| !g.colors.is_empty())
    }

    /// The fields that change the size of the laid-out box
    pub fn layout_key(&self) -> LayoutKey {
        LayoutKey {
            font_size: self.font_size_css(),
            stroke_width: self.stroke_width,
            line_height: self.line_height_multiplier(),
            max_width: self.max_width_px(),
            fallback_font: self.fallback_font.clone(),
            letter_spacing: self.letter_spacing_css(),
        }
    }
}

/// Size-affecting subset of [`StyleConfig`], compared to decide whether a
/// style change needs a new layout
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutKey {
    pub font_size: String,
    pub stroke_width: f32,
    pub line_height: f32,
    pub max_width: Option<f32>,
    pub fallback_font: String,
    pub letter_spacing: String,
}
