//! CSS value parsing and computation helpers.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// Straight-alpha RGBA color with channels in `0..=255` and alpha in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    /// Computed-value serialization (`rgb(...)` when opaque, `rgba(...)` otherwise).
    pub fn to_css(self) -> String {
        if self.a >= 1.0 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                format_number(f64::from(self.a))
            )
        }
    }

    /// `#rrggbb` plus a separate opacity, the form SVG paint attributes take.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse a CSS color: hex (3/4/6/8 digits), `rgb()`/`rgba()`, `transparent` and a small
/// named-color table.
pub fn parse_color(value: &str) -> Option<Rgba> {
    let v = value.trim().to_ascii_lowercase();
    if let Some(hex) = v.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = v
        .strip_prefix("rgba(")
        .or_else(|| v.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<&str> = args
            .split(|c| c == ',' || c == '/' || c == ' ')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.len() < 3 {
            return None;
        }
        let channel = |s: &str| -> Option<u8> {
            let n = match s.strip_suffix('%') {
                Some(p) => p.parse::<f64>().ok()? * 2.55,
                None => s.parse::<f64>().ok()?,
            };
            Some(n.round().clamp(0.0, 255.0) as u8)
        };
        let a = match parts.get(3) {
            Some(s) => match s.strip_suffix('%') {
                Some(p) => p.parse::<f32>().ok()? / 100.0,
                None => s.parse::<f32>().ok()?,
            },
            None => 1.0,
        };
        return Some(Rgba {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
            a: a.clamp(0.0, 1.0),
        });
    }
    named_color(&v)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 | 4 => {
            let a = if hex.len() == 4 {
                f32::from(digit(3)? * 17) / 255.0
            } else {
                1.0
            };
            Some(Rgba {
                r: digit(0)? * 17,
                g: digit(1)? * 17,
                b: digit(2)? * 17,
                a,
            })
        }
        6 | 8 => {
            let a = if hex.len() == 8 {
                f32::from(pair(6)?) / 255.0
            } else {
                1.0
            };
            Some(Rgba {
                r: pair(0)?,
                g: pair(2)?,
                b: pair(4)?,
                a,
            })
        }
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Rgba> {
    let c = match name {
        "transparent" => Rgba::TRANSPARENT,
        "black" => Rgba::opaque(0, 0, 0),
        "white" => Rgba::opaque(255, 255, 255),
        "red" => Rgba::opaque(255, 0, 0),
        "green" => Rgba::opaque(0, 128, 0),
        "blue" => Rgba::opaque(0, 0, 255),
        "gray" | "grey" => Rgba::opaque(128, 128, 128),
        "silver" => Rgba::opaque(192, 192, 192),
        "yellow" => Rgba::opaque(255, 255, 0),
        "orange" => Rgba::opaque(255, 165, 0),
        _ => return None,
    };
    Some(c)
}

/// A specified length before computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f64),
    Em(f64),
    Rem(f64),
    Percent(f64),
}

/// Parse a single length token. Unitless zero is accepted as `0px`.
pub fn parse_length(value: &str) -> Option<Length> {
    let v = value.trim().to_ascii_lowercase();
    let num = |s: &str| s.trim().parse::<f64>().ok().filter(|n| n.is_finite());
    if let Some(n) = v.strip_suffix("rem") {
        return num(n).map(Length::Rem);
    }
    if let Some(n) = v.strip_suffix("em") {
        return num(n).map(Length::Em);
    }
    if let Some(n) = v.strip_suffix("px") {
        return num(n).map(Length::Px);
    }
    if let Some(n) = v.strip_suffix('%') {
        return num(n).map(Length::Percent);
    }
    match num(&v) {
        Some(n) if n == 0.0 => Some(Length::Px(0.0)),
        _ => None,
    }
}

/// Parse a computed `px` value.
pub fn parse_px(value: &str) -> Option<f64> {
    match parse_length(value)? {
        Length::Px(v) => Some(v),
        _ => None,
    }
}

/// Parse a plain number (`opacity`, `flex-grow`, ...).
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Format a number the way computed values print: no trailing zeros, at most 3 decimals.
pub fn format_number(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        let s = format!("{rounded:.3}");
        s.trim_end_matches('0').to_string()
    }
}

pub fn format_px(v: f64) -> String {
    format!("{}px", format_number(v))
}

/// Compute every length token of `value` (which may hold several space-separated
/// components) to `px`, relative to `em` and the root font size. Non-length tokens pass
/// through.
pub fn compute_lengths(value: &str, em: f64, rem: f64) -> String {
    split_top_level(value, ' ')
        .into_iter()
        .map(|tok| match parse_length(tok) {
            Some(Length::Px(v)) => format_px(v),
            Some(Length::Em(v)) => format_px(v * em),
            Some(Length::Rem(v)) => format_px(v * rem),
            _ => tok.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split on `sep` outside parentheses and quotes, dropping empty pieces.
pub fn split_top_level(value: &str, sep: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0usize;
    for (i, ch) in value.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => depth = (depth - 1).max(0),
            (None, c) if c == sep && depth == 0 => {
                let piece = value[start..i].trim();
                if !piece.is_empty() {
                    out.push(piece);
                }
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    let tail = value[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// One `url(...)` reference inside a CSS value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssUrl {
    /// Byte range of the whole `url(...)` token.
    pub span: Range<usize>,
    /// Unquoted reference.
    pub url: String,
}

static URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| {
        Regex::new(r#"url\(\s*(?:"([^"]*)"|'([^']*)'|([^)"'\s]*))\s*\)"#)
            .expect("Failed to compile css url regex")
    })
}

/// Every `url(...)` reference in `value`, in order. Empty references are skipped.
pub fn css_urls(value: &str) -> Vec<CssUrl> {
    url_regex()
        .captures_iter(value)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let url = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))?
                .as_str()
                .trim();
            (!url.is_empty()).then(|| CssUrl {
                span: whole.range(),
                url: url.to_string(),
            })
        })
        .collect()
}

/// Replace `url(...)` tokens in `value`. `replace` returns the new reference for each
/// url, or `None` to keep the original token.
pub fn replace_css_urls(value: &str, mut replace: impl FnMut(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut last = 0usize;
    for u in css_urls(value) {
        out.push_str(&value[last..u.span.start]);
        match replace(&u.url) {
            Some(new_ref) => {
                out.push_str("url(\"");
                out.push_str(&new_ref);
                out.push_str("\")");
            }
            None => out.push_str(&value[u.span.clone()]),
        }
        last = u.span.end;
    }
    out.push_str(&value[last..]);
    out
}

/// Expand a 1-4 value box shorthand into top/right/bottom/left.
pub fn expand_box(value: &str) -> Option<[String; 4]> {
    let parts = split_top_level(value, ' ');
    let [t, r, b, l] = match parts.as_slice() {
        [a] => [*a, *a, *a, *a],
        [a, b] => [*a, *b, *a, *b],
        [a, b, c] => [*a, *b, *c, *b],
        [a, b, c, d] => [*a, *b, *c, *d],
        _ => return None,
    };
    Some([t, r, b, l].map(str::to_string))
}

#[cfg(test)]
#[path = "../../tests/unit/style/value.rs"]
mod tests;
