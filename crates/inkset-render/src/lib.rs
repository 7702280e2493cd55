//! inkset Render - Visual composition
//!
//! Maps a style and a layout to a self-contained vector description:
//! gradient and drop-shadow definitions, a container transform, and one
//! paint record per line. [`to_svg`] serializes it.

mod effects;
mod gradient;
mod paint;
mod svg;
mod transform;

pub use effects::{drop_shadow_filter, resolve_shadow, DropShadow, DropShadowFilter};
pub use gradient::{linear_gradient, GradientStop, LinearGradient};
pub use paint::{
    animation_class, compose, placeholder, ContainerAttrs, DefinitionIds, LinePaint,
    VisualDescription,
};
pub use svg::to_svg;
pub use transform::transform;
