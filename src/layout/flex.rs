//! Box layout over a styled composition tree, driven by taffy.

use taffy::geometry::Point;
use taffy::prelude::{AvailableSpace, NodeId, Rect, Size};
use taffy::style::{
    AlignItems, BoxSizing, Dimension, Display, FlexDirection, FlexWrap, JustifyContent,
    LengthPercentage, LengthPercentageAuto, Overflow, Position, Style,
};

use crate::foundation::core as geom;
use crate::foundation::error::{LockshotError, LockshotResult};
use crate::layout::text::{TextMetrics, measure_block};
use crate::style::resolved::{ResolvedStyle, StyleResolver, resolve_subtree};
use crate::style::value::{Length, parse_length, parse_number, parse_px};
use crate::tree::node::VisualNode;

#[derive(Debug, Clone)]
enum LayoutNodeCtx {
    Text { text: String, metrics: TextMetrics },
    Replaced { intrinsic: Size<f32> },
}

fn layout_error(e: taffy::TaffyError) -> LockshotError {
    LockshotError::Other(anyhow::anyhow!("layout failed: {e}"))
}

/// Lay out `root` inside `viewport` and store the border box of every node in
/// [`VisualNode::layout`], in page coordinates with the root at the origin.
///
/// Returns the root box.
pub fn layout_tree<R: StyleResolver + ?Sized>(
    root: &mut VisualNode,
    resolver: &R,
    viewport: geom::Size,
) -> LockshotResult<geom::Rect> {
    let styles = resolve_subtree(resolver, root);
    let mut taffy: taffy::TaffyTree<LayoutNodeCtx> = taffy::TaffyTree::new();
    let mut styles_iter = styles.iter();
    let root_id = build_subtree(&mut taffy, root, &mut styles_iter)?;

    let available = Size {
        width: AvailableSpace::Definite(viewport.width as f32),
        height: AvailableSpace::Definite(viewport.height as f32),
    };
    taffy
        .compute_layout_with_measure(
            root_id,
            available,
            |known_dimensions, available_space, _node_id, node_context, _style| {
                let Some(ctx) = node_context else {
                    return known_dimensions.unwrap_or(Size::ZERO);
                };
                match ctx {
                    LayoutNodeCtx::Text { text, metrics } => {
                        let max_width = known_dimensions.width.or(match available_space.width {
                            AvailableSpace::Definite(w) => Some(w),
                            AvailableSpace::MinContent => Some(0.0),
                            AvailableSpace::MaxContent => None,
                        });
                        let (w, h) = measure_block(text, metrics, max_width.map(f64::from));
                        Size {
                            width: known_dimensions.width.unwrap_or(w as f32),
                            height: known_dimensions.height.unwrap_or(h as f32),
                        }
                    }
                    LayoutNodeCtx::Replaced { intrinsic } => known_dimensions.unwrap_or(*intrinsic),
                }
            },
        )
        .map_err(layout_error)?;

    write_boxes(&taffy, root, root_id, geom::Point::ZERO)?;
    root.layout
        .ok_or_else(|| LockshotError::Other(anyhow::anyhow!("layout produced no root box")))
}

fn build_subtree<'s>(
    taffy: &mut taffy::TaffyTree<LayoutNodeCtx>,
    node: &VisualNode,
    styles: &mut impl Iterator<Item = &'s ResolvedStyle>,
) -> LockshotResult<NodeId> {
    let style = styles
        .next()
        .ok_or_else(|| LockshotError::Other(anyhow::anyhow!("style list shorter than tree")))?;
    let taffy_style = style_from_resolved(style);

    if node.children.is_empty() {
        let ctx = if node.is_image() {
            Some(LayoutNodeCtx::Replaced {
                intrinsic: intrinsic_image_size(node),
            })
        } else {
            node.text
                .as_ref()
                .filter(|t| !t.trim().is_empty())
                .map(|t| LayoutNodeCtx::Text {
                    text: t.clone(),
                    metrics: TextMetrics::from_style(style),
                })
        };
        return match ctx {
            Some(ctx) => taffy.new_leaf_with_context(taffy_style, ctx),
            None => taffy.new_leaf(taffy_style),
        }
        .map_err(layout_error);
    }

    let mut children_ids = Vec::with_capacity(node.children.len());
    for child in &node.children {
        children_ids.push(build_subtree(taffy, child, styles)?);
    }
    taffy
        .new_with_children(taffy_style, &children_ids)
        .map_err(layout_error)
}

fn write_boxes(
    taffy: &taffy::TaffyTree<LayoutNodeCtx>,
    node: &mut VisualNode,
    nid: NodeId,
    origin: geom::Point,
) -> LockshotResult<()> {
    let l = taffy.layout(nid).map_err(layout_error)?;
    let x = origin.x + f64::from(l.location.x);
    let y = origin.y + f64::from(l.location.y);
    node.layout = Some(geom::Rect::new(
        x,
        y,
        x + f64::from(l.size.width),
        y + f64::from(l.size.height),
    ));
    let children = taffy.children(nid).map_err(layout_error)?;
    for (child, cid) in node.children.iter_mut().zip(children) {
        write_boxes(taffy, child, cid, geom::Point::new(x, y))?;
    }
    Ok(())
}

fn intrinsic_image_size(node: &VisualNode) -> Size<f32> {
    let attr = |name| {
        node.attr(name)
            .and_then(|v| v.trim().trim_end_matches("px").parse::<f32>().ok())
            .unwrap_or(0.0)
    };
    Size {
        width: attr("width"),
        height: attr("height"),
    }
}

/// Map a computed style onto a taffy style.
pub(crate) fn style_from_resolved(s: &ResolvedStyle) -> Style {
    let display = match s.value("display") {
        "none" => Display::None,
        "flex" | "inline-flex" => Display::Flex,
        "grid" | "inline-grid" => Display::Grid,
        _ => Display::Block,
    };
    let position = match s.value("position") {
        "absolute" | "fixed" => Position::Absolute,
        _ => Position::Relative,
    };
    let box_sizing = match s.value("box-sizing") {
        "border-box" => BoxSizing::BorderBox,
        _ => BoxSizing::ContentBox,
    };
    let flex_direction = match s.value("flex-direction") {
        "column" => FlexDirection::Column,
        "column-reverse" => FlexDirection::ColumnReverse,
        "row-reverse" => FlexDirection::RowReverse,
        _ => FlexDirection::Row,
    };
    let flex_wrap = match s.value("flex-wrap") {
        "wrap" => FlexWrap::Wrap,
        "wrap-reverse" => FlexWrap::WrapReverse,
        _ => FlexWrap::NoWrap,
    };
    let justify_content = match s.value("justify-content") {
        "start" | "left" => Some(JustifyContent::Start),
        "flex-start" => Some(JustifyContent::FlexStart),
        "end" | "right" => Some(JustifyContent::End),
        "flex-end" => Some(JustifyContent::FlexEnd),
        "center" => Some(JustifyContent::Center),
        "stretch" => Some(JustifyContent::Stretch),
        "space-between" => Some(JustifyContent::SpaceBetween),
        "space-around" => Some(JustifyContent::SpaceAround),
        "space-evenly" => Some(JustifyContent::SpaceEvenly),
        _ => None,
    };
    let align_items = match s.value("align-items") {
        "start" | "self-start" => Some(AlignItems::Start),
        "flex-start" => Some(AlignItems::FlexStart),
        "end" | "self-end" => Some(AlignItems::End),
        "flex-end" => Some(AlignItems::FlexEnd),
        "center" => Some(AlignItems::Center),
        "baseline" => Some(AlignItems::Baseline),
        "stretch" => Some(AlignItems::Stretch),
        _ => None,
    };
    let overflow = match s.value("overflow") {
        "hidden" | "clip" => Overflow::Hidden,
        "scroll" | "auto" => Overflow::Scroll,
        _ => Overflow::Visible,
    };

    Style {
        display,
        position,
        box_sizing,
        overflow: Point {
            x: overflow,
            y: overflow,
        },
        inset: Rect {
            left: length_percentage_auto(s.value("left")),
            right: length_percentage_auto(s.value("right")),
            top: length_percentage_auto(s.value("top")),
            bottom: length_percentage_auto(s.value("bottom")),
        },
        size: Size {
            width: dimension(s.value("width")),
            height: dimension(s.value("height")),
        },
        aspect_ratio: aspect_ratio(s.value("aspect-ratio")),
        margin: Rect {
            left: length_percentage_auto(s.value("margin-left")),
            right: length_percentage_auto(s.value("margin-right")),
            top: length_percentage_auto(s.value("margin-top")),
            bottom: length_percentage_auto(s.value("margin-bottom")),
        },
        padding: Rect {
            left: length_percentage(s.value("padding-left")),
            right: length_percentage(s.value("padding-right")),
            top: length_percentage(s.value("padding-top")),
            bottom: length_percentage(s.value("padding-bottom")),
        },
        border: Rect {
            left: length_percentage(s.value("border-left-width")),
            right: length_percentage(s.value("border-right-width")),
            top: length_percentage(s.value("border-top-width")),
            bottom: length_percentage(s.value("border-bottom-width")),
        },
        gap: Size {
            width: length_percentage(s.value("column-gap")),
            height: length_percentage(s.value("row-gap")),
        },
        flex_direction,
        flex_wrap,
        flex_grow: parse_number(s.value("flex-grow")).unwrap_or(0.0).max(0.0) as f32,
        flex_shrink: parse_number(s.value("flex-shrink")).unwrap_or(1.0).max(0.0) as f32,
        flex_basis: dimension(s.value("flex-basis")),
        justify_content,
        align_items,
        ..Style::default()
    }
}

fn dimension(v: &str) -> Dimension {
    match parse_length(v) {
        Some(Length::Px(px)) => Dimension::length(px.max(0.0) as f32),
        Some(Length::Percent(p)) => Dimension::percent((p / 100.0).max(0.0) as f32),
        _ => Dimension::auto(),
    }
}

fn length_percentage_auto(v: &str) -> LengthPercentageAuto {
    match parse_length(v) {
        Some(Length::Px(px)) => LengthPercentageAuto::length(px as f32),
        Some(Length::Percent(p)) => LengthPercentageAuto::percent((p / 100.0) as f32),
        _ => LengthPercentageAuto::auto(),
    }
}

fn length_percentage(v: &str) -> LengthPercentage {
    match parse_length(v) {
        Some(Length::Percent(p)) => LengthPercentage::percent((p / 100.0).max(0.0) as f32),
        _ => LengthPercentage::length(parse_px(v).unwrap_or(0.0).max(0.0) as f32),
    }
}

fn aspect_ratio(v: &str) -> Option<f32> {
    let ratio = match v.split_once('/') {
        Some((w, h)) => parse_number(w)? / parse_number(h)?,
        None => parse_number(v)?,
    };
    (ratio.is_finite() && ratio > 0.0).then_some(ratio as f32)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/flex.rs"]
mod tests;
