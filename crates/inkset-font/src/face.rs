//! Font face with parsed metrics

use ttf_parser::{Face, GlyphId};

use super::FontId;

/// Horizontal run metrics at a given font size, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunMetrics {
    /// Sum of glyph advances
    pub advance: f32,
    /// Highest ink extent above the baseline, if any glyph has ink
    pub ink_ascent: Option<f32>,
    /// Lowest ink extent below the baseline (positive downwards)
    pub ink_descent: Option<f32>,
    /// Face ascender
    pub ascent: f32,
    /// Face descender (positive downwards)
    pub descent: f32,
    /// Face line gap
    pub line_gap: f32,
}

impl RunMetrics {
    /// Height of the face's line box
    pub fn line_box(&self) -> f32 {
        self.ascent + self.descent + self.line_gap
    }
}

/// Parsed font face with metrics
pub struct FontFace<'a> {
    /// The underlying ttf-parser face
    face: Face<'a>,
    /// Font ID in database
    pub id: FontId,
}

impl<'a> FontFace<'a> {
    /// Parse a font face from data
    pub fn parse(data: &'a [u8], index: u32, id: FontId) -> Option<Self> {
        Face::parse(data, index).ok().map(|face| Self { face, id })
    }

    /// Units per em
    pub fn units_per_em(&self) -> u16 {
        self.face.units_per_em()
    }

    /// Ascender (above baseline)
    pub fn ascender(&self) -> i16 {
        self.face.ascender()
    }

    /// Descender (below baseline, usually negative)
    pub fn descender(&self) -> i16 {
        self.face.descender()
    }

    /// Line gap
    pub fn line_gap(&self) -> i16 {
        self.face.line_gap()
    }

    /// Get glyph ID for a character, `.notdef` when the face lacks it
    pub fn glyph_index(&self, c: char) -> GlyphId {
        self.face.glyph_index(c).unwrap_or(GlyphId(0))
    }

    /// Measure a run of text at `size` pixels per em.
    ///
    /// No shaping: advances are summed glyph by glyph.
    pub fn measure_run(&self, text: &str, size: f32) -> RunMetrics {
        let upem = self.units_per_em().max(1) as f32;
        let scale = size / upem;

        let mut advance = 0u32;
        let mut y_max: Option<i16> = None;
        let mut y_min: Option<i16> = None;
        for c in text.chars() {
            let glyph = self.glyph_index(c);
            advance += u32::from(self.face.glyph_hor_advance(glyph).unwrap_or(0));
            if let Some(bbox) = self.face.glyph_bounding_box(glyph) {
                y_max = Some(y_max.map_or(bbox.y_max, |y| y.max(bbox.y_max)));
                y_min = Some(y_min.map_or(bbox.y_min, |y| y.min(bbox.y_min)));
            }
        }

        RunMetrics {
            advance: advance as f32 * scale,
            ink_ascent: y_max.map(|y| f32::from(y) * scale),
            ink_descent: y_min.map(|y| -f32::from(y) * scale),
            ascent: f32::from(self.ascender()) * scale,
            descent: -f32::from(self.descender()) * scale,
            line_gap: f32::from(self.line_gap()) * scale,
        }
    }
}
