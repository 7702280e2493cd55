//! Shadow effects
//!
//! Drop shadows are emitted as a filter definition the lines reference.

use inkset_text::Shadow;

/// Drop shadow parameters after defaults are applied
#[derive(Debug, Clone, PartialEq)]
pub struct DropShadow {
    pub offset_x: f32,
    pub offset_y: f32,
    /// Blur standard deviation
    pub blur: f32,
    pub color: String,
    pub opacity: f32,
}

impl Default for DropShadow {
    fn default() -> Self {
        Self {
            offset_x: 6.0,
            offset_y: 6.0,
            blur: 0.0,
            color: "rgba(0,0,0,0.9)".to_string(),
            opacity: 1.0,
        }
    }
}

/// Filter definition wrapping a drop shadow; the filter region extends
/// half the bounding box on every side so offsets are never clipped
#[derive(Debug, Clone, PartialEq)]
pub struct DropShadowFilter {
    pub id: String,
    pub x: &'static str,
    pub y: &'static str,
    pub width: &'static str,
    pub height: &'static str,
    pub shadow: DropShadow,
}

impl DropShadowFilter {
    /// Filter reference to this definition
    pub fn filter_ref(&self) -> String {
        format!("url(#{})", self.id)
    }
}

/// Apply defaults to a shadow setting; `None` when shadows are off
pub fn resolve_shadow(shadow: &Shadow) -> Option<DropShadow> {
    match shadow {
        Shadow::Enabled(false) => None,
        Shadow::Enabled(true) => Some(DropShadow::default()),
        Shadow::Custom(spec) => {
            let defaults = DropShadow::default();
            Some(DropShadow {
                offset_x: spec.offset_x.unwrap_or(defaults.offset_x),
                offset_y: spec.offset_y.unwrap_or(defaults.offset_y),
                blur: spec.blur.unwrap_or(defaults.blur),
                color: spec.color.clone().unwrap_or(defaults.color),
                opacity: spec.opacity.unwrap_or(defaults.opacity),
            })
        }
    }
}

/// Build the filter definition for a shadow setting
pub fn drop_shadow_filter(id: &str, shadow: &Shadow) -> Option<DropShadowFilter> {
    resolve_shadow(shadow).map(|shadow| DropShadowFilter {
        id: id.to_string(),
        x: "-50%",
        y: "-50%",
        width: "200%",
        height: "200%",
        shadow,
    })
}
