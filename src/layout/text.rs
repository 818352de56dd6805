//! Deterministic approximate text metrics.
//!
//! Advances come from per-class em fractions instead of font tables, so layout and the paint
//! rendition agree on line breaks without loading fonts.

use crate::style::properties::ROOT_FONT_SIZE_PX;
use crate::style::resolved::ResolvedStyle;
use crate::style::value::{parse_number, parse_px};

/// Line-height multiplier used for `line-height: normal`.
pub const NORMAL_LINE_HEIGHT: f64 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    pub font_size: f64,
    pub line_height: f64,
    pub letter_spacing: f64,
    pub bold: bool,
    pub wrap: bool,
}

impl TextMetrics {
    pub fn from_style(style: &ResolvedStyle) -> Self {
        let font_size = parse_px(style.value("font-size")).unwrap_or(ROOT_FONT_SIZE_PX);
        let lh = style.value("line-height");
        let line_height = parse_px(lh)
            .or_else(|| parse_number(lh).map(|n| n * font_size))
            .unwrap_or(font_size * NORMAL_LINE_HEIGHT);
        let letter_spacing = parse_px(style.value("letter-spacing")).unwrap_or(0.0);
        let bold = parse_number(style.value("font-weight")).is_some_and(|w| w >= 600.0);
        let wrap = !matches!(style.value("white-space"), "nowrap" | "pre");
        Self {
            font_size,
            line_height,
            letter_spacing,
            bold,
            wrap,
        }
    }

    /// Advance of one character in px.
    pub fn advance(&self, ch: char) -> f64 {
        let em = match ch {
            ' ' => 0.28,
            'i' | 'l' | 'j' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.26,
            'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' => 0.36,
            'm' | 'w' => 0.82,
            'M' | 'W' => 0.9,
            '0'..='9' => 0.56,
            c if c.is_ascii_uppercase() => 0.66,
            c if c.is_ascii() => 0.53,
            c if c.len_utf8() >= 4 => 1.2,
            _ => 0.6,
        };
        let weight = if self.bold { 1.05 } else { 1.0 };
        em * weight * self.font_size + self.letter_spacing
    }

    /// Width of a single line.
    pub fn measure(&self, text: &str) -> f64 {
        text.chars().map(|c| self.advance(c)).sum()
    }
}

/// One laid-out line.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub width: f64,
}

/// Break `text` into lines no wider than `max_width` (when given and wrapping is enabled).
///
/// Whitespace collapses to single spaces. Words wider than the limit get a line of their own.
pub fn wrap_lines(text: &str, metrics: &TextMetrics, max_width: Option<f64>) -> Vec<TextLine> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    let limit = max_width.filter(|_| metrics.wrap);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in words {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        match limit {
            Some(max) if metrics.measure(&candidate) > max + 0.01 => {
                let width = metrics.measure(&current);
                lines.push(TextLine {
                    text: std::mem::replace(&mut current, word.to_string()),
                    width,
                });
            }
            _ => current = candidate,
        }
    }
    let width = metrics.measure(&current);
    lines.push(TextLine {
        text: current,
        width,
    });
    lines
}

/// `(width, height)` of the wrapped block.
pub fn measure_block(text: &str, metrics: &TextMetrics, max_width: Option<f64>) -> (f64, f64) {
    let lines = wrap_lines(text, metrics, max_width);
    let width = lines.iter().map(|l| l.width).fold(0.0, f64::max);
    (width, lines.len() as f64 * metrics.line_height)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
