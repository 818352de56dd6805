//! A small cascade: simple selectors, shorthand expansion, inheritance and computed values.

use std::collections::HashMap;

use crate::foundation::error::{LockshotError, LockshotResult};
use crate::style::properties::{PROPERTIES, ROOT_FONT_SIZE_PX, ValueKind, property};
use crate::style::resolved::{ResolvedStyle, StyleResolver, StyleScope};
use crate::style::value::{
    Length, compute_lengths, expand_box, format_number, format_px, parse_color, parse_length,
    parse_px, split_top_level,
};
use crate::tree::node::VisualNode;

const USER_AGENT_CSS: &str = r#"
html, body, article, aside, div, footer, header, main, nav, section, p, h1, h2, h3 {
  display: block;
}
img { display: inline-block; }
h1 { font-size: 2em; font-weight: bold; margin: 0.67em 0; }
h2 { font-size: 1.5em; font-weight: bold; margin: 0.83em 0; }
p { margin: 1em 0; }
strong, b { font-weight: bold; }
"#;

/// One compound selector: optional tag plus required classes. `*` has neither.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(text: &str) -> LockshotResult<Self> {
        if text.contains([':', '#', '[', '>', '+', '~']) {
            return Err(LockshotError::validation(format!(
                "unsupported selector component `{text}`"
            )));
        }
        let mut pieces = text.split('.');
        let head = pieces.next().unwrap_or("");
        let tag = match head {
            "" | "*" => None,
            t => Some(t.to_ascii_lowercase()),
        };
        let classes = pieces
            .map(|c| {
                if c.is_empty() {
                    Err(LockshotError::validation(format!(
                        "empty class in selector `{text}`"
                    )))
                } else {
                    Ok(c.to_string())
                }
            })
            .collect::<LockshotResult<Vec<_>>>()?;
        Ok(Self { tag, classes })
    }

    fn matches(&self, node: &VisualNode) -> bool {
        self.tag
            .as_deref()
            .is_none_or(|t| node.tag.eq_ignore_ascii_case(t))
            && self.classes.iter().all(|c| node.has_class(c))
    }
}

/// Compound selectors joined by descendant combinators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    pub fn parse(text: &str) -> LockshotResult<Self> {
        let parts = text
            .split_ascii_whitespace()
            .map(Compound::parse)
            .collect::<LockshotResult<Vec<_>>>()?;
        if parts.is_empty() {
            return Err(LockshotError::validation("empty selector"));
        }
        Ok(Self { parts })
    }

    /// `(class count, tag count)`.
    pub fn specificity(&self) -> (usize, usize) {
        self.parts.iter().fold((0, 0), |(c, t), p| {
            (c + p.classes.len(), t + usize::from(p.tag.is_some()))
        })
    }

    /// Match against `node` whose ancestors (root first) are `ancestors`.
    pub fn matches(&self, node: &VisualNode, ancestors: &[&VisualNode]) -> bool {
        let Some((last, rest)) = self.parts.split_last() else {
            return false;
        };
        if !last.matches(node) {
            return false;
        }
        let mut up = ancestors.iter().rev();
        'parts: for part in rest.iter().rev() {
            for a in up.by_ref() {
                if part.matches(a) {
                    continue 'parts;
                }
            }
            return false;
        }
        true
    }
}

/// A selector with its longhand declarations.
#[derive(Clone, Debug)]
pub struct Rule {
    pub selector: Selector,
    pub declarations: Vec<(String, String)>,
}

/// Ordered rule list.
#[derive(Clone, Debug, Default)]
pub struct Stylesheet {
    rules: Vec<Rule>,
}

impl Stylesheet {
    /// Parse plain rule blocks. At-rules, pseudo-classes and non-descendant combinators are
    /// rejected.
    pub fn parse(css: &str) -> LockshotResult<Self> {
        let css = strip_comments(css);
        let mut rules = Vec::new();
        let mut rest = css.as_str();
        while let Some(open) = rest.find('{') {
            let selectors = rest[..open].trim();
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| {
                LockshotError::validation(format!("unterminated rule block for `{selectors}`"))
            })?;
            if selectors.starts_with('@') {
                return Err(LockshotError::validation(format!(
                    "unsupported at-rule `{selectors}`"
                )));
            }
            let declarations = parse_declarations(&after[..close]);
            for sel in selectors.split(',') {
                rules.push(Rule {
                    selector: Selector::parse(sel.trim())?,
                    declarations: declarations.clone(),
                });
            }
            rest = &after[close + 1..];
        }
        if !rest.trim().is_empty() {
            return Err(LockshotError::validation(format!(
                "trailing text outside rule blocks: `{}`",
                rest.trim()
            )));
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        rest = match rest[start + 2..].find("*/") {
            Some(end) => &rest[start + 2 + end + 2..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

/// Parse a declaration block body into longhand `(property, value)` pairs.
pub fn parse_declarations(body: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for decl in split_top_level(body, ';') {
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();
        let value = value
            .strip_suffix("!important")
            .map(str::trim_end)
            .unwrap_or(value);
        if name.is_empty() || value.is_empty() {
            continue;
        }
        out.extend(expand_shorthand(&name, value));
    }
    out
}

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];
const CORNERS: [&str; 4] = ["top-left", "top-right", "bottom-right", "bottom-left"];

/// Expand a shorthand into longhands. Longhands the property list knows pass through;
/// anything else is dropped.
pub fn expand_shorthand(name: &str, value: &str) -> Vec<(String, String)> {
    let pair = |n: String, v: &str| (n, v.to_string());
    match name {
        "margin" | "padding" => expand_box(value)
            .map(|vals| {
                SIDES
                    .iter()
                    .zip(vals)
                    .map(|(s, v)| (format!("{name}-{s}"), v))
                    .collect()
            })
            .unwrap_or_default(),
        "inset" => expand_box(value)
            .map(|vals| SIDES.iter().map(|s| s.to_string()).zip(vals).collect())
            .unwrap_or_default(),
        "border-radius" => {
            let horizontal = value.split('/').next().unwrap_or(value);
            expand_box(horizontal)
                .map(|vals| {
                    CORNERS
                        .iter()
                        .zip(vals)
                        .map(|(c, v)| (format!("border-{c}-radius"), v))
                        .collect()
                })
                .unwrap_or_default()
        }
        "border-width" | "border-style" | "border-color" => {
            let suffix = &name["border-".len()..];
            expand_box(value)
                .map(|vals| {
                    SIDES
                        .iter()
                        .zip(vals)
                        .map(|(s, v)| (format!("border-{s}-{suffix}"), v))
                        .collect()
                })
                .unwrap_or_default()
        }
        "border" => SIDES
            .iter()
            .flat_map(|s| expand_border_side(s, value))
            .collect(),
        "border-top" | "border-right" | "border-bottom" | "border-left" => {
            expand_border_side(&name["border-".len()..], value)
        }
        "gap" => {
            let parts = split_top_level(value, ' ');
            match parts.as_slice() {
                [both] => vec![pair("row-gap".into(), both), pair("column-gap".into(), both)],
                [row, col] => vec![pair("row-gap".into(), row), pair("column-gap".into(), col)],
                _ => Vec::new(),
            }
        }
        "flex" => expand_flex(value),
        "background" => expand_background(value),
        "overflow-x" | "overflow-y" => vec![pair("overflow".into(), value)],
        _ => match property(name) {
            Some(_) => vec![pair(name.to_string(), value)],
            None => Vec::new(),
        },
    }
}

fn expand_border_side(side: &str, value: &str) -> Vec<(String, String)> {
    let mut width = "medium".to_string();
    let mut style = "none".to_string();
    let mut color = "currentcolor".to_string();
    for tok in split_top_level(value, ' ') {
        let lower = tok.to_ascii_lowercase();
        if matches!(lower.as_str(), "thin" | "medium" | "thick") || parse_length(tok).is_some() {
            width = lower;
        } else if matches!(
            lower.as_str(),
            "none" | "hidden" | "solid" | "dashed" | "dotted" | "double" | "groove" | "ridge"
                | "inset" | "outset"
        ) {
            style = lower;
        } else {
            color = tok.to_string();
        }
    }
    vec![
        (format!("border-{side}-width"), width),
        (format!("border-{side}-style"), style),
        (format!("border-{side}-color"), color),
    ]
}

fn expand_flex(value: &str) -> Vec<(String, String)> {
    let [grow, shrink, basis] = match value.trim().to_ascii_lowercase().as_str() {
        "none" => ["0", "0", "auto"].map(str::to_string),
        "auto" => ["1", "1", "auto"].map(str::to_string),
        "initial" => ["0", "1", "auto"].map(str::to_string),
        _ => {
            let parts = split_top_level(value, ' ');
            match parts.as_slice() {
                [g] if g.parse::<f64>().is_ok() => [g.to_string(), "1".into(), "0%".into()],
                [b] => ["1".into(), "1".into(), b.to_string()],
                [g, s] if s.parse::<f64>().is_ok() => [g.to_string(), s.to_string(), "0%".into()],
                [g, b] => [g.to_string(), "1".into(), b.to_string()],
                [g, s, b] => [g.to_string(), s.to_string(), b.to_string()],
                _ => return Vec::new(),
            }
        }
    };
    vec![
        ("flex-grow".into(), grow),
        ("flex-shrink".into(), shrink),
        ("flex-basis".into(), basis),
    ]
}

fn expand_background(value: &str) -> Vec<(String, String)> {
    let mut image = "none".to_string();
    let mut color = "rgba(0, 0, 0, 0)".to_string();
    let mut repeat = "repeat".to_string();
    let mut position: Vec<&str> = Vec::new();
    let mut size: Vec<&str> = Vec::new();
    let mut after_slash = false;
    for tok in split_top_level(value, ' ') {
        let lower = tok.to_ascii_lowercase();
        if lower.starts_with("url(") || lower.contains("gradient(") {
            image = tok.to_string();
        } else if tok == "/" {
            after_slash = true;
        } else if matches!(
            lower.as_str(),
            "repeat" | "no-repeat" | "repeat-x" | "repeat-y" | "space" | "round"
        ) {
            repeat = lower;
        } else if parse_color(tok).is_some() {
            color = tok.to_string();
        } else if let Some((pos, sz)) = tok.split_once('/') {
            if !pos.is_empty() {
                position.push(pos);
            }
            if !sz.is_empty() {
                size.push(sz);
            }
            after_slash = true;
        } else if after_slash {
            size.push(tok);
        } else {
            position.push(tok);
        }
    }
    let position = if position.is_empty() {
        "0% 0%".to_string()
    } else {
        position.join(" ")
    };
    let size = if size.is_empty() {
        "auto".to_string()
    } else {
        size.join(" ")
    };
    vec![
        ("background-color".into(), color),
        ("background-image".into(), image),
        ("background-position".into(), position),
        ("background-size".into(), size),
        ("background-repeat".into(), repeat),
    ]
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Origin {
    UserAgent,
    Author,
}

/// Stylesheet-driven [`StyleResolver`].
///
/// Cascade order: user-agent rules, then author rules by specificity and source order,
/// then the node's inline declarations.
#[derive(Clone, Debug)]
pub struct SheetResolver {
    rules: Vec<Rule>,
}

impl SheetResolver {
    pub fn new(author: Stylesheet) -> Self {
        let ua = user_agent_sheet();
        let mut ranked: Vec<(Origin, (usize, usize), usize, Rule)> = ua
            .rules
            .into_iter()
            .map(|r| (Origin::UserAgent, r))
            .chain(author.rules.into_iter().map(|r| (Origin::Author, r)))
            .enumerate()
            .map(|(i, (origin, r))| (origin, r.selector.specificity(), i, r))
            .collect();
        ranked.sort_by(|a, b| (a.0, a.1, a.2).cmp(&(b.0, b.1, b.2)));
        Self {
            rules: ranked.into_iter().map(|(_, _, _, r)| r).collect(),
        }
    }

    /// Cascaded (specified) longhands for `node`, later entries winning.
    fn cascade(&self, node: &VisualNode, ancestors: &[&VisualNode]) -> HashMap<String, String> {
        let mut specified = HashMap::new();
        for rule in &self.rules {
            if rule.selector.matches(node, ancestors) {
                for (p, v) in &rule.declarations {
                    specified.insert(p.clone(), v.clone());
                }
            }
        }
        for (p, v) in &node.inline_style {
            for (lp, lv) in expand_shorthand(&p.to_ascii_lowercase(), v) {
                specified.insert(lp, lv);
            }
        }
        specified
    }
}

impl Default for SheetResolver {
    fn default() -> Self {
        Self::new(Stylesheet::default())
    }
}

fn user_agent_sheet() -> Stylesheet {
    Stylesheet::parse(USER_AGENT_CSS).unwrap_or_default()
}

enum Cascaded<'a> {
    /// Already computed by the parent.
    Inherited(&'a str),
    Specified(&'a str),
}

fn cascaded<'a>(
    specified: &'a HashMap<String, String>,
    parent: Option<&'a ResolvedStyle>,
    name: &str,
    initial: &'static str,
    inherited: bool,
) -> Cascaded<'a> {
    let from_parent = || {
        parent
            .and_then(|p| p.get(name))
            .map(Cascaded::Inherited)
            .unwrap_or(Cascaded::Specified(initial))
    };
    match specified.get(name).map(String::as_str) {
        Some("inherit") => from_parent(),
        Some("initial") => Cascaded::Specified(initial),
        Some("unset") if inherited => from_parent(),
        Some("unset") => Cascaded::Specified(initial),
        Some(v) => Cascaded::Specified(v),
        None if inherited => from_parent(),
        None => Cascaded::Specified(initial),
    }
}

impl StyleResolver for SheetResolver {
    fn resolve_style(&self, node: &VisualNode, scope: &StyleScope<'_>) -> ResolvedStyle {
        let specified = self.cascade(node, scope.ancestors);
        let parent = scope.parent;

        let parent_font_size = parent
            .and_then(|p| parse_px(p.value("font-size")))
            .unwrap_or(ROOT_FONT_SIZE_PX);
        let font_size_text = match cascaded(&specified, parent, "font-size", "16px", true) {
            Cascaded::Inherited(v) => v.to_string(),
            Cascaded::Specified(v) => compute_font_size(v, parent_font_size),
        };
        let font_size = parse_px(&font_size_text).unwrap_or(ROOT_FONT_SIZE_PX);
        let color_text = match cascaded(&specified, parent, "color", "rgb(0, 0, 0)", true) {
            Cascaded::Inherited(v) => v.to_string(),
            Cascaded::Specified(v) => compute_color(v, None),
        };

        let mut declarations: Vec<(String, String)> = PROPERTIES
            .iter()
            .map(|def| {
                let value = match def.name {
                    "font-size" => font_size_text.clone(),
                    "color" => color_text.clone(),
                    _ => match cascaded(&specified, parent, def.name, def.initial, def.inherited)
                    {
                        Cascaded::Inherited(v) => v.to_string(),
                        Cascaded::Specified(v) => match def.kind {
                            ValueKind::Keyword => v.trim().to_string(),
                            ValueKind::Length => {
                                compute_lengths(v, font_size, ROOT_FONT_SIZE_PX)
                            }
                            ValueKind::Color => compute_color(v, Some(&color_text)),
                            ValueKind::FontSize => compute_font_size(v, parent_font_size),
                            ValueKind::FontWeight => compute_font_weight(v, parent),
                        },
                    },
                };
                (def.name.to_string(), value)
            })
            .collect();

        // A border side without a visible style has zero computed width.
        for side in SIDES {
            let style_key = format!("border-{side}-style");
            let hidden = declarations
                .iter()
                .any(|(p, v)| *p == style_key && matches!(v.as_str(), "none" | "hidden"));
            let width_key = format!("border-{side}-width");
            if let Some(slot) = declarations.iter_mut().find(|(p, _)| *p == width_key) {
                let keyword = match slot.1.as_str() {
                    _ if hidden => Some("0px"),
                    "thin" => Some("1px"),
                    "medium" => Some("3px"),
                    "thick" => Some("5px"),
                    _ => None,
                };
                if let Some(px) = keyword {
                    slot.1 = px.to_string();
                }
            }
        }

        ResolvedStyle::new(declarations)
    }
}

fn compute_font_size(value: &str, parent: f64) -> String {
    let px = match value.trim().to_ascii_lowercase().as_str() {
        "xx-small" => 9.0,
        "x-small" => 10.0,
        "small" => 13.0,
        "medium" => 16.0,
        "large" => 18.0,
        "x-large" => 24.0,
        "xx-large" => 32.0,
        "smaller" => parent / 1.2,
        "larger" => parent * 1.2,
        other => match parse_length(other) {
            Some(Length::Px(v)) => v,
            Some(Length::Em(v)) => v * parent,
            Some(Length::Rem(v)) => v * ROOT_FONT_SIZE_PX,
            Some(Length::Percent(v)) => v / 100.0 * parent,
            None => parent,
        },
    };
    format_px(px)
}

fn compute_color(value: &str, current: Option<&str>) -> String {
    let v = value.trim();
    if v.eq_ignore_ascii_case("currentcolor") {
        return current.unwrap_or("rgb(0, 0, 0)").to_string();
    }
    match parse_color(v) {
        Some(c) => c.to_css(),
        None => v.to_string(),
    }
}

fn compute_font_weight(value: &str, parent: Option<&ResolvedStyle>) -> String {
    let parent_weight = parent
        .and_then(|p| p.get("font-weight"))
        .and_then(|w| w.parse::<f64>().ok())
        .unwrap_or(400.0);
    let w = match value.trim().to_ascii_lowercase().as_str() {
        "normal" => 400.0,
        "bold" => 700.0,
        "bolder" => (parent_weight + 300.0).min(900.0),
        "lighter" => (parent_weight - 300.0).max(100.0),
        other => other.parse::<f64>().unwrap_or(400.0),
    };
    format_number(w)
}

#[cfg(test)]
#[path = "../../tests/unit/style/sheet.rs"]
mod tests;
