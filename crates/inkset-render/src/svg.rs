//! SVG serialization

use inkset_text::TextTransform;

use crate::paint::{LinePaint, VisualDescription};

/// Escape text and attribute values
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize a description as self-contained SVG markup
pub fn to_svg(desc: &VisualDescription) -> String {
    let container = &desc.container;
    let mut style = Vec::new();
    if let Some(max_width) = &container.max_width {
        style.push(format!("max-width: {}", max_width));
    }
    if let Some(transform) = &container.transform {
        style.push(format!("transform: {}", transform));
    }
    if container.opacity != 1.0 {
        style.push(format!("opacity: {}", container.opacity));
    }

    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="{}" viewBox="0 0 {} {}" preserveAspectRatio="xMidYMid meet""#,
        escape(&container.classes.join(" ")),
        desc.width,
        desc.height
    );
    if desc.responsive {
        out.push_str(r#" width="100%""#);
    } else {
        out.push_str(&format!(r#" width="{}" height="{}""#, desc.width, desc.height));
    }
    if !style.is_empty() {
        out.push_str(&format!(r#" style="{}""#, escape(&style.join("; "))));
    }
    out.push_str(&format!(r#" role="img" aria-label="{}">"#, escape(&desc.label)));

    if desc.gradient.is_some() || desc.filter.is_some() {
        out.push_str("<defs>");
        if let Some(gradient) = &desc.gradient {
            out.push_str(&format!(
                r#"<linearGradient id="{}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                escape(&gradient.id),
                gradient.x1,
                gradient.y1,
                gradient.x2,
                gradient.y2
            ));
            for stop in &gradient.stops {
                out.push_str(&format!(
                    r#"<stop offset="{}%" stop-color="{}"/>"#,
                    stop.offset,
                    escape(&stop.color)
                ));
            }
            out.push_str("</linearGradient>");
        }
        if let Some(filter) = &desc.filter {
            let shadow = &filter.shadow;
            out.push_str(&format!(
                r#"<filter id="{}" x="{}" y="{}" width="{}" height="{}"><feDropShadow dx="{}" dy="{}" stdDeviation="{}" flood-color="{}" flood-opacity="{}"/></filter>"#,
                escape(&filter.id),
                filter.x,
                filter.y,
                filter.width,
                filter.height,
                shadow.offset_x,
                shadow.offset_y,
                shadow.blur,
                escape(&shadow.color),
                shadow.opacity
            ));
        }
        out.push_str("</defs>");
    }

    for line in &desc.lines {
        out.push_str(&line_svg(line));
    }
    out.push_str("</svg>");
    out
}

fn line_svg(line: &LinePaint) -> String {
    let font_family = format!("\"{}\", {}", line.font_family, line.fallback_font);
    let mut out = format!(
        r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="middle" font-family="{}" font-size="{}" fill="{}" stroke="{}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="round" paint-order="stroke fill""#,
        line.x,
        line.y,
        escape(&font_family),
        escape(&line.font_size),
        escape(&line.fill),
        escape(&line.stroke),
        line.stroke_width
    );
    if line.letter_spacing != "normal" {
        out.push_str(&format!(r#" letter-spacing="{}""#, escape(&line.letter_spacing)));
    }
    if line.text_transform != TextTransform::None {
        out.push_str(&format!(
            r#" style="text-transform: {}""#,
            line.text_transform.as_str()
        ));
    }
    if let Some(filter) = &line.filter {
        out.push_str(&format!(r#" filter="{}""#, escape(filter)));
    }
    out.push_str(&format!(">{}</text>", escape(&line.text)));
    out
}
