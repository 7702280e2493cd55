//! Container transform

use inkset_text::Skew;

/// Compose `rotate`, `skewX` and `skewY` terms, in that order, skipping
/// zero angles. `None` when every angle is zero.
pub fn transform(rotation: f32, skew: Skew) -> Option<String> {
    let terms: Vec<String> = [("rotate", rotation), ("skewX", skew.x), ("skewY", skew.y)]
        .into_iter()
        .filter(|(_, degrees)| *degrees != 0.0)
        .map(|(name, degrees)| format!("{}({}deg)", name, degrees))
        .collect();
    (!terms.is_empty()).then(|| terms.join(" "))
}
