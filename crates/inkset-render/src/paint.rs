//! Visual composition
//!
//! A [`VisualDescription`] is a pure function of the style, the layout and
//! the definition ids; it is regenerated, never mutated.

use inkset_text::{Animation, LayoutResult, StyleConfig, TextTransform};

use crate::effects::{drop_shadow_filter, DropShadowFilter};
use crate::gradient::{linear_gradient, LinearGradient};
use crate::transform::transform;

/// Ids of the definitions one instance emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionIds {
    pub gradient: String,
    pub filter: String,
}

impl DefinitionIds {
    /// `<instance>-gradient` and `<instance>-filter`
    pub fn for_instance(instance: &str) -> Self {
        Self {
            gradient: format!("{}-gradient", instance),
            filter: format!("{}-filter", instance),
        }
    }
}

/// Presentation of the element wrapping the vector graphic
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerAttrs {
    pub classes: Vec<String>,
    /// CSS max width, when one is configured
    pub max_width: Option<String>,
    pub transform: Option<String>,
    pub opacity: f32,
}

/// Paint record for one line
#[derive(Debug, Clone, PartialEq)]
pub struct LinePaint {
    pub text: String,
    pub x: String,
    pub y: String,
    pub font_family: String,
    pub fallback_font: String,
    pub font_size: String,
    /// Flat color or gradient reference
    pub fill: String,
    /// Stroke color, `none` without a stroke
    pub stroke: String,
    pub stroke_width: f32,
    pub letter_spacing: String,
    pub text_transform: TextTransform,
    /// Shadow filter reference
    pub filter: Option<String>,
}

/// Self-contained vector description of a creative text
#[derive(Debug, Clone, PartialEq)]
pub struct VisualDescription {
    /// View box width
    pub width: u32,
    /// View box height
    pub height: u32,
    pub responsive: bool,
    pub container: ContainerAttrs,
    pub gradient: Option<LinearGradient>,
    pub filter: Option<DropShadowFilter>,
    pub lines: Vec<LinePaint>,
    /// Plain-text accessibility label
    pub label: String,
}

impl VisualDescription {
    /// Whether any text is painted
    pub fn is_placeholder(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Class applied for an animation kind
pub fn animation_class(animation: Animation) -> Option<&'static str> {
    match animation {
        Animation::None => None,
        Animation::Fade => Some("animate-fade-in"),
        Animation::Slide => Some("animate-slide-in"),
        Animation::Bounce => Some("animate-bounce"),
        Animation::Glow => Some("animate-pulse"),
    }
}

fn container(style: &StyleConfig) -> ContainerAttrs {
    let mut classes = vec!["creative-text-container".to_string()];
    if style.responsive {
        classes.push("w-full".to_string());
    }
    if let Some(class) = animation_class(style.animation) {
        classes.push(class.to_string());
    }
    classes.extend(style.class_name.split_whitespace().map(str::to_string));

    ContainerAttrs {
        classes,
        max_width: style.max_width.as_ref().map(|w| w.to_css()),
        transform: transform(style.rotation, style.skew),
        opacity: style.opacity,
    }
}

/// Compose the description of a laid-out text
pub fn compose(
    style: &StyleConfig,
    layout: &LayoutResult,
    ids: &DefinitionIds,
    label: &str,
) -> VisualDescription {
    let gradient = style
        .active_gradient()
        .and_then(|g| linear_gradient(&ids.gradient, g));
    let filter = drop_shadow_filter(&ids.filter, &style.shadow);

    let fill = gradient
        .as_ref()
        .map(LinearGradient::fill_ref)
        .unwrap_or_else(|| style.color.clone());
    let filter_ref = filter.as_ref().map(DropShadowFilter::filter_ref);
    let stroke = if style.stroke_width > 0.0 {
        style.stroke_color.clone()
    } else {
        "none".to_string()
    };
    let font_size = style.font_size_css();
    let letter_spacing = style.letter_spacing_css();

    let lines = layout
        .lines
        .iter()
        .map(|line| LinePaint {
            text: line.text.clone(),
            x: "50%".to_string(),
            y: format!("{}%", line.y_percent),
            font_family: layout.font_family.clone(),
            fallback_font: style.fallback_font.clone(),
            font_size: font_size.clone(),
            fill: fill.clone(),
            stroke: stroke.clone(),
            stroke_width: style.stroke_width,
            letter_spacing: letter_spacing.clone(),
            text_transform: style.text_transform,
            filter: filter_ref.clone(),
        })
        .collect::<Vec<_>>();

    tracing::trace!(
        "Composed {} line(s), gradient: {}, shadow: {}",
        lines.len(),
        gradient.is_some(),
        filter.is_some()
    );

    VisualDescription {
        width: layout.width,
        height: layout.height,
        responsive: style.responsive,
        container: container(style),
        gradient,
        filter,
        lines,
        label: label.to_string(),
    }
}

/// Box-only description shown before the first layout exists
pub fn placeholder(style: &StyleConfig, width: u32, height: u32, label: &str) -> VisualDescription {
    VisualDescription {
        width: width.max(1),
        height: height.max(1),
        responsive: style.responsive,
        container: container(style),
        gradient: None,
        filter: None,
        lines: Vec::new(),
        label: label.to_string(),
    }
}
