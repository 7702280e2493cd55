//! Line breaking
//!
//! Greedy wrapping at word boundaries. A word too wide for a line on its own
//! is split between characters, each split segment ending in a hyphen.

/// Appended to every segment of a split word except the last
pub const HYPHEN: char = '-';

/// Line breaker
pub struct LineBreaker;

impl LineBreaker {
    /// Collapse whitespace runs to single spaces and trim the ends
    pub fn normalize(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Split text into lines no wider than `max_width`.
    ///
    /// Empty or whitespace-only input yields one empty line. A line exceeds
    /// `max_width` only when it is a split-word segment holding a single
    /// character that is too wide by itself.
    pub fn break_into_lines(
        text: &str,
        max_width: f32,
        mut measure_fn: impl FnMut(&str) -> f32,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if measure_fn(&candidate) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                if measure_fn(word) <= max_width {
                    current = word.to_string();
                    continue;
                }
            }

            // The word cannot fit on a line of its own
            current = Self::split_word(word, max_width, &mut measure_fn, &mut lines);
        }

        if !current.is_empty() {
            lines.push(current);
        }
        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }

    /// Commit hyphenated segments of `word` to `lines`, returning the
    /// unhyphenated remainder that starts the next line.
    fn split_word(
        word: &str,
        max_width: f32,
        measure_fn: &mut impl FnMut(&str) -> f32,
        lines: &mut Vec<String>,
    ) -> String {
        let mut segment = String::new();
        for c in word.chars() {
            let mut candidate = segment.clone();
            candidate.push(c);
            candidate.push(HYPHEN);
            if !segment.is_empty() && measure_fn(&candidate) > max_width {
                segment.push(HYPHEN);
                lines.push(std::mem::take(&mut segment));
            }
            segment.push(c);
        }
        segment
    }
}
