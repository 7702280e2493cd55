//! Linear gradient definitions

use inkset_text::{Gradient, GradientDirection};

/// A color stop in a gradient
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    /// Position in percent (0 - 100)
    pub offset: f32,
    pub color: String,
}

/// Linear gradient definition, axis given in bounding-box percentages
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub id: String,
    pub x1: &'static str,
    pub y1: &'static str,
    pub x2: &'static str,
    pub y2: &'static str,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Fill reference to this gradient
    pub fn fill_ref(&self) -> String {
        format!("url(#{})", self.id)
    }
}

/// Axis endpoints for a direction
fn axis(direction: GradientDirection) -> (&'static str, &'static str, &'static str, &'static str) {
    match direction {
        GradientDirection::Horizontal => ("0%", "0%", "100%", "0%"),
        GradientDirection::Vertical => ("0%", "0%", "0%", "100%"),
        GradientDirection::Diagonal => ("0%", "0%", "100%", "100%"),
    }
}

/// Build the gradient definition; `None` without colors.
///
/// Stops are spread evenly from 0% to 100%; a single color sits at 0%.
pub fn linear_gradient(id: &str, gradient: &Gradient) -> Option<LinearGradient> {
    if gradient.colors.is_empty() {
        return None;
    }
    let denominator = (gradient.colors.len() - 1).max(1) as f32;
    let stops = gradient
        .colors
        .iter()
        .enumerate()
        .map(|(index, color)| GradientStop {
            offset: index as f32 / denominator * 100.0,
            color: color.clone(),
        })
        .collect();

    let (x1, y1, x2, y2) = axis(gradient.direction);
    Some(LinearGradient {
        id: id.to_string(),
        x1,
        y1,
        x2,
        y2,
        stops,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(colors: &[&str], direction: GradientDirection) -> Gradient {
        Gradient {
            colors: colors.iter().map(|c| c.to_string()).collect(),
            direction,
        }
    }

    #[test]
    fn test_single_color_one_stop_at_zero() {
        let def = linear_gradient("g", &gradient(&["red"], GradientDirection::Horizontal)).unwrap();
        assert_eq!(def.stops.len(), 1);
        assert_eq!(def.stops[0].offset, 0.0);
    }

    #[test]
    fn test_stops_evenly_spaced() {
        let def = linear_gradient(
            "g",
            &gradient(&["red", "green", "blue", "white", "black"], GradientDirection::Vertical),
        )
        .unwrap();
        let offsets: Vec<f32> = def.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!((def.x2, def.y2), ("0%", "100%"));
    }

    #[test]
    fn test_no_colors_no_gradient() {
        assert!(linear_gradient("g", &gradient(&[], GradientDirection::Diagonal)).is_none());
    }

    #[test]
    fn test_diagonal_axis() {
        let def = linear_gradient("g", &gradient(&["a", "b"], GradientDirection::Diagonal)).unwrap();
        assert_eq!((def.x1, def.y1, def.x2, def.y2), ("0%", "0%", "100%", "100%"));
        assert_eq!(def.fill_ref(), "url(#g)");
    }
}
