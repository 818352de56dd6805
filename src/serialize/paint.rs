//! SVG-native rendition of a styled, laid-out composition.
//!
//! Used as the `<switch>` fallback for renderers without an HTML engine. Reads each node's
//! computed style from its inline declarations and its box from [`VisualNode::layout`].

use std::fmt::Write;

use kurbo::{RoundedRect, RoundedRectRadii, Shape};

use crate::foundation::core::{Point, Rect};
use crate::layout::text::{TextMetrics, wrap_lines};
use crate::serialize::xml::escape_xml;
use crate::style::resolved::ResolvedStyle;
use crate::style::value::{Rgba, css_urls, format_number, parse_color, parse_number, parse_px};
use crate::tree::node::VisualNode;

/// Ascent as a fraction of the font size, for baseline placement.
const ASCENT: f64 = 0.8;

/// Append the rendition of `root` to `out`, translating page coordinates by `-origin`.
pub(crate) fn paint_tree(out: &mut String, root: &VisualNode, origin: Point) {
    let mut painter = Painter {
        out,
        origin,
        next_id: 0,
    };
    painter.paint_node(root);
}

struct Painter<'a> {
    out: &'a mut String,
    origin: Point,
    next_id: usize,
}

struct Edges {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Edges {
    fn read(style: &ResolvedStyle, pattern: impl Fn(&str) -> String) -> Self {
        let px = |side: &str| parse_px(style.value(&pattern(side))).unwrap_or(0.0).max(0.0);
        Self {
            top: px("top"),
            right: px("right"),
            bottom: px("bottom"),
            left: px("left"),
        }
    }
}

fn n(v: f64) -> String {
    format_number(v)
}

fn computed(node: &VisualNode) -> ResolvedStyle {
    ResolvedStyle::new(node.inline_style.clone())
}

fn radii(style: &ResolvedStyle) -> RoundedRectRadii {
    let r = |corner: &str| {
        parse_px(style.value(&format!("border-{corner}-radius")))
            .unwrap_or(0.0)
            .max(0.0)
    };
    RoundedRectRadii::new(
        r("top-left"),
        r("top-right"),
        r("bottom-right"),
        r("bottom-left"),
    )
}

fn has_radius(r: &RoundedRectRadii) -> bool {
    r.top_left > 0.0 || r.top_right > 0.0 || r.bottom_right > 0.0 || r.bottom_left > 0.0
}

/// Rounded rectangle as SVG path data.
fn rounded_path(rect: Rect, r: RoundedRectRadii) -> String {
    RoundedRect::from_rect(rect, r).to_path(0.1).to_svg()
}

fn fill_attrs(color: Rgba) -> String {
    if color.a >= 1.0 {
        format!("fill=\"{}\"", color.to_hex())
    } else {
        format!(
            "fill=\"{}\" fill-opacity=\"{}\"",
            color.to_hex(),
            n(f64::from(color.a))
        )
    }
}

/// `preserveAspectRatio` alignment from a CSS position (`center`, `left top`, `50% 0%`, ...).
fn align_from_position(position: &str) -> &'static str {
    let mut x = "xMid";
    let mut y = "YMid";
    let tokens: Vec<&str> = position.split_whitespace().collect();
    let axis_x = |t: &str| match t {
        "left" | "0%" | "0px" => Some("xMin"),
        "right" | "100%" => Some("xMax"),
        "center" | "50%" => Some("xMid"),
        _ => None,
    };
    let axis_y = |t: &str| match t {
        "top" | "0%" | "0px" => Some("YMin"),
        "bottom" | "100%" => Some("YMax"),
        "center" | "50%" => Some("YMid"),
        _ => None,
    };
    match tokens.as_slice() {
        [single] => match *single {
            "top" | "bottom" => y = axis_y(*single).unwrap_or(y),
            other => x = axis_x(other).unwrap_or(x),
        },
        [a, b, ..] => {
            // Keyword pairs may come in either order.
            if matches!(*a, "top" | "bottom") || matches!(*b, "left" | "right") {
                y = axis_y(*a).unwrap_or(y);
                x = axis_x(*b).unwrap_or(x);
            } else {
                x = axis_x(*a).unwrap_or(x);
                y = axis_y(*b).unwrap_or(y);
            }
        }
        [] => {}
    }
    match (x, y) {
        ("xMin", "YMin") => "xMinYMin",
        ("xMin", "YMid") => "xMinYMid",
        ("xMin", "YMax") => "xMinYMax",
        ("xMid", "YMin") => "xMidYMin",
        ("xMid", "YMax") => "xMidYMax",
        ("xMax", "YMin") => "xMaxYMin",
        ("xMax", "YMid") => "xMaxYMid",
        ("xMax", "YMax") => "xMaxYMax",
        _ => "xMidYMid",
    }
}

impl Painter<'_> {
    fn next_clip_id(&mut self) -> String {
        self.next_id += 1;
        format!("lockshot-clip-{}", self.next_id)
    }

    fn local(&self, rect: Rect) -> Rect {
        rect - self.origin.to_vec2()
    }

    /// Emit a clip path for `rect`/`r` and return its id.
    fn define_clip(&mut self, rect: Rect, r: RoundedRectRadii) -> String {
        let id = self.next_clip_id();
        let _ = write!(
            self.out,
            "<defs><clipPath id=\"{id}\"><path d=\"{}\"/></clipPath></defs>",
            rounded_path(rect, r)
        );
        id
    }

    fn paint_node(&mut self, node: &VisualNode) {
        let style = computed(node);
        if style.value("display") == "none" {
            return;
        }
        let Some(page_box) = node.layout else {
            return;
        };
        let opacity = parse_number(style.value("opacity"))
            .unwrap_or(1.0)
            .clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return;
        }

        let rect = self.local(page_box);
        let corner = radii(&style);
        let visible = style.value("visibility") != "hidden";

        if opacity < 1.0 {
            let _ = write!(self.out, "<g opacity=\"{}\">", n(opacity));
        }

        if visible {
            self.paint_background(&style, rect, corner);
            if node.is_image() {
                self.paint_image(node, &style, rect, corner);
            }
            self.paint_borders(&style, rect, corner);
            if node.children.is_empty()
                && let Some(text) = node.text.as_deref()
            {
                self.paint_text(text, &style, rect);
            }
        }

        if !node.children.is_empty() {
            let clips = matches!(style.value("overflow"), "hidden" | "clip");
            if clips {
                let id = self.define_clip(rect, corner);
                let _ = write!(self.out, "<g clip-path=\"url(#{id})\">");
            }
            for child in &node.children {
                self.paint_node(child);
            }
            if clips {
                self.out.push_str("</g>");
            }
        }

        if opacity < 1.0 {
            self.out.push_str("</g>");
        }
    }

    fn paint_background(&mut self, style: &ResolvedStyle, rect: Rect, corner: RoundedRectRadii) {
        if let Some(color) = parse_color(style.value("background-color"))
            && !color.is_transparent()
        {
            let _ = write!(
                self.out,
                "<path d=\"{}\" {}/>",
                rounded_path(rect, corner),
                fill_attrs(color)
            );
        }

        let image = style.value("background-image");
        if image.is_empty() || image == "none" {
            return;
        }
        let aspect = match style.value("background-size") {
            "contain" => "meet",
            _ => "slice",
        };
        let align = align_from_position(style.value("background-position"));
        // The first layer paints on top.
        let layers: Vec<_> = css_urls(image).into_iter().rev().collect();
        if layers.is_empty() {
            return;
        }
        let clip = self.define_clip(rect, corner);
        for layer in layers {
            let _ = write!(
                self.out,
                "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"{align} {aspect}\" clip-path=\"url(#{clip})\" href=\"{}\"/>",
                n(rect.x0),
                n(rect.y0),
                n(rect.width()),
                n(rect.height()),
                escape_xml(&layer.url)
            );
        }
    }

    fn paint_image(
        &mut self,
        node: &VisualNode,
        style: &ResolvedStyle,
        rect: Rect,
        corner: RoundedRectRadii,
    ) {
        let Some(src) = node.attr("src").filter(|s| !s.is_empty()) else {
            return;
        };
        let preserve = match style.value("object-fit") {
            "contain" | "scale-down" | "none" => "xMidYMid meet",
            "cover" => "xMidYMid slice",
            _ => "none",
        };
        let clip = if has_radius(&corner) {
            let id = self.define_clip(rect, corner);
            format!(" clip-path=\"url(#{id})\"")
        } else {
            String::new()
        };
        let _ = write!(
            self.out,
            "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"{preserve}\"{clip} href=\"{}\"/>",
            n(rect.x0),
            n(rect.y0),
            n(rect.width()),
            n(rect.height()),
            escape_xml(src)
        );
    }

    fn paint_borders(&mut self, style: &ResolvedStyle, rect: Rect, corner: RoundedRectRadii) {
        let widths = Edges::read(style, |side| format!("border-{side}-width"));
        let color = |side: &str| parse_color(style.value(&format!("border-{side}-color")));
        let drawn = |side: &str| {
            !matches!(
                style.value(&format!("border-{side}-style")),
                "none" | "hidden" | ""
            )
        };

        let uniform = widths.top > 0.0
            && [widths.right, widths.bottom, widths.left]
                .iter()
                .all(|w| (w - widths.top).abs() < 1e-6)
            && ["top", "right", "bottom", "left"].iter().all(|s| drawn(*s))
            && ["right", "bottom", "left"]
                .iter()
                .all(|s| color(*s) == color("top"));

        if uniform {
            let Some(c) = color("top").filter(|c| !c.is_transparent()) else {
                return;
            };
            let w = widths.top;
            let half = w / 2.0;
            let inset = Rect::new(rect.x0 + half, rect.y0 + half, rect.x1 - half, rect.y1 - half);
            let inner = RoundedRectRadii::new(
                (corner.top_left - half).max(0.0),
                (corner.top_right - half).max(0.0),
                (corner.bottom_right - half).max(0.0),
                (corner.bottom_left - half).max(0.0),
            );
            let opacity = if c.a < 1.0 {
                format!(" stroke-opacity=\"{}\"", n(f64::from(c.a)))
            } else {
                String::new()
            };
            let _ = write!(
                self.out,
                "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"{opacity}/>",
                rounded_path(inset, inner),
                c.to_hex(),
                n(w)
            );
            return;
        }

        let strips = [
            ("top", widths.top, Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + widths.top)),
            ("right", widths.right, Rect::new(rect.x1 - widths.right, rect.y0, rect.x1, rect.y1)),
            ("bottom", widths.bottom, Rect::new(rect.x0, rect.y1 - widths.bottom, rect.x1, rect.y1)),
            ("left", widths.left, Rect::new(rect.x0, rect.y0, rect.x0 + widths.left, rect.y1)),
        ];
        for (side, w, strip) in strips {
            if w <= 0.0 || !drawn(side) {
                continue;
            }
            let Some(c) = color(side).filter(|c| !c.is_transparent()) else {
                continue;
            };
            let _ = write!(
                self.out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}/>",
                n(strip.x0),
                n(strip.y0),
                n(strip.width()),
                n(strip.height()),
                fill_attrs(c)
            );
        }
    }

    fn paint_text(&mut self, text: &str, style: &ResolvedStyle, rect: Rect) {
        let padding = Edges::read(style, |side| format!("padding-{side}"));
        let border = Edges::read(style, |side| format!("border-{side}-width"));
        let content = Rect::new(
            rect.x0 + padding.left + border.left,
            rect.y0 + padding.top + border.top,
            rect.x1 - padding.right - border.right,
            rect.y1 - padding.bottom - border.bottom,
        );
        let metrics = TextMetrics::from_style(style);
        let lines = wrap_lines(text, &metrics, Some(content.width().max(0.0)));
        if lines.is_empty() {
            return;
        }

        let color = parse_color(style.value("color")).unwrap_or(Rgba::opaque(0, 0, 0));
        if color.is_transparent() {
            return;
        }
        let (x, anchor) = match style.value("text-align") {
            "center" => (content.center().x, "middle"),
            "right" | "end" => (content.x1, "end"),
            _ => (content.x0, "start"),
        };
        let family = escape_xml(style.value("font-family"));
        let weight = style.value("font-weight");
        let half_leading = (metrics.line_height - metrics.font_size) / 2.0;

        for (i, line) in lines.iter().enumerate() {
            let top = content.y0 + i as f64 * metrics.line_height;
            let baseline = top + half_leading + metrics.font_size * ASCENT;
            let _ = write!(
                self.out,
                "<text x=\"{}\" y=\"{}\" font-family=\"{family}\" font-size=\"{}\" font-weight=\"{weight}\" text-anchor=\"{anchor}\" {}>{}</text>",
                n(x),
                n(baseline),
                n(metrics.font_size),
                fill_attrs(color),
                escape_xml(&line.text)
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/serialize/paint.rs"]
mod tests;
