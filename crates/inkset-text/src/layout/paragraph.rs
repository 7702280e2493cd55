//! Box layout
//!
//! Wraps the text and sizes a box around it that leaves room for thick
//! strokes and shadows.

use super::{LayoutLine, LayoutResult, LineBreaker};
use crate::measure::{Measurer, TextFont};
use crate::style::StyleConfig;

/// Smallest box width and smallest wrapping width
pub const MIN_WIDTH: f32 = 300.0;

/// Implicit wrapping width never exceeds this many ems
const IMPLICIT_WIDTH_EMS: f32 = 20.0;

/// Box height never drops below this many ems
const MIN_HEIGHT_EMS: f32 = 1.5;

/// Distance from the top of the text block to the first line's center, in ems
const BASELINE_OFFSET_EMS: f32 = 0.8;

/// Padding added around the measured text for a given stroke width
pub fn padding(stroke_width: f32) -> f32 {
    (stroke_width * 4.0).max(20.0) + 40.0
}

/// Lay `text` out in `font_family` according to `style`
pub fn layout(
    text: &str,
    font_family: &str,
    style: &StyleConfig,
    measurer: &mut Measurer,
) -> LayoutResult {
    let size_css = style.font_size_css();
    let letter_spacing = style.letter_spacing_css();
    let font_size = style.numeric_font_size();
    let line_height = style.line_height_multiplier();
    let font = TextFont::new(font_family, &size_css, &style.fallback_font, &letter_spacing)
        .with_size_px(font_size);

    let padding = padding(style.stroke_width);
    let normalized = LineBreaker::normalize(text);

    let max_line_width = match style.max_width_px() {
        Some(explicit) => (explicit - padding).max(MIN_WIDTH),
        None => {
            let single_line = measurer.measure(&normalized, &font).width;
            single_line.min(font_size * IMPLICIT_WIDTH_EMS).max(MIN_WIDTH)
        }
    };

    let texts = LineBreaker::break_into_lines(&normalized, max_line_width, |candidate| {
        measurer.measure(candidate, &font).width
    });

    let mut max_width = 0.0f32;
    let mut total_height = 0.0f32;
    let mut lines = Vec::with_capacity(texts.len());
    for (index, text) in texts.into_iter().enumerate() {
        let probe = if text.is_empty() { " " } else { text.as_str() };
        let measured = measurer.measure(probe, &font);
        max_width = max_width.max(measured.width);
        total_height += if index == 0 {
            measured.height
        } else {
            measured.height * line_height
        };
        lines.push(LayoutLine {
            text,
            width: measured.width,
            height: measured.height,
            y_percent: 50.0,
        });
    }

    let width = (max_width + padding).max(MIN_WIDTH).ceil() as u32;
    let height = (total_height + padding)
        .max(font_size * MIN_HEIGHT_EMS)
        .ceil() as u32;

    let count = lines.len();
    for (index, line) in lines.iter_mut().enumerate() {
        line.y_percent = line_center_percent(index, count, height as f32, font_size, line_height);
    }

    tracing::debug!(
        "Layout of {} line(s) in {}: {}x{} (wrap at {})",
        count,
        font_family,
        width,
        height,
        max_line_width
    );

    LayoutResult {
        lines,
        width,
        height,
        font_family: font_family.to_string(),
    }
}

/// Vertical center of line `index` of `count`, as a percentage of the box.
///
/// The lines are centered as a block; one line always sits at 50%.
fn line_center_percent(
    index: usize,
    count: usize,
    box_height: f32,
    font_size: f32,
    line_height: f32,
) -> f32 {
    if count <= 1 || box_height <= 0.0 {
        return 50.0;
    }
    let line_pixels = font_size * line_height;
    let block_height = (count - 1) as f32 * line_pixels + font_size;
    let start_y = (box_height - block_height) / 2.0 + font_size * BASELINE_OFFSET_EMS;
    let y = start_y + index as f32 * line_pixels;
    y / box_height * 100.0
}
