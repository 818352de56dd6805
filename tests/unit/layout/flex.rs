use super::*;
use crate::style::sheet::{SheetResolver, Stylesheet};

fn resolver(css: &str) -> SheetResolver {
    SheetResolver::new(Stylesheet::parse(css).unwrap())
}

fn viewport() -> geom::Size {
    geom::Size::new(1000.0, 1000.0)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.01
}

#[test]
fn aspect_ratio_card_with_absolute_overlay() {
    let r = resolver(
        "* { box-sizing: border-box; }
         .card { width: 390px; aspect-ratio: 390 / 644; padding: 24px 20px; position: relative; }
         .overlay { position: absolute; inset: 0; }",
    );
    let mut tree = VisualNode::new("article")
        .with_class("card")
        .with_child(VisualNode::new("div").with_class("overlay"));
    let root = layout_tree(&mut tree, &r, viewport()).unwrap();

    assert!(approx(root.width(), 390.0));
    assert!(approx(root.height(), 644.0));
    let overlay = tree.children[0].layout.unwrap();
    assert!(approx(overlay.x0, 0.0) && approx(overlay.y0, 0.0));
    assert!(approx(overlay.width(), 390.0) && approx(overlay.height(), 644.0));
}

#[test]
fn flex_row_places_fixed_badge_and_growing_content() {
    let r = resolver(
        "* { box-sizing: border-box; }
         .row { display: flex; gap: 12px; padding: 14px; width: 300px; align-items: center; }
         .badge { width: 45px; height: 45px; flex-shrink: 0; }
         .content { flex: 1; }",
    );
    let mut tree = VisualNode::new("div").with_class("row").with_children([
        VisualNode::new("div").with_class("badge"),
        VisualNode::new("div")
            .with_class("content")
            .with_child(VisualNode::new("span").with_text("Mensagem")),
    ]);
    layout_tree(&mut tree, &r, viewport()).unwrap();

    let badge = tree.children[0].layout.unwrap();
    let content = tree.children[1].layout.unwrap();
    assert!(approx(badge.x0, 14.0));
    assert!(approx(content.x0, 14.0 + 45.0 + 12.0));
    assert!(approx(content.width(), 300.0 - 28.0 - 57.0));
    // Children report page coordinates, not parent-relative ones.
    let span = tree.children[1].children[0].layout.unwrap();
    assert!(approx(span.x0, content.x0));
}

#[test]
fn text_leaves_take_line_height() {
    let r = resolver(".box { width: 100px; font-size: 10px; }");
    let mut tree = VisualNode::new("div")
        .with_class("box")
        .with_child(VisualNode::new("span").with_text("oi"));
    layout_tree(&mut tree, &r, viewport()).unwrap();
    let span = tree.children[0].layout.unwrap();
    assert!(approx(span.height(), 12.0));
    assert!(approx(tree.layout.unwrap().height(), 12.0));
}

#[test]
fn images_use_attribute_size_unless_styled() {
    let r = resolver(
        ".wrap { display: flex; align-items: flex-start; }
         .fill { width: 30px; height: 20px; }",
    );
    let mut tree = VisualNode::new("div").with_class("wrap").with_children([
        VisualNode::new("img")
            .with_attr("width", "16")
            .with_attr("height", "8"),
        VisualNode::new("img")
            .with_class("fill")
            .with_attr("width", "16"),
    ]);
    layout_tree(&mut tree, &r, viewport()).unwrap();
    let a = tree.children[0].layout.unwrap();
    let b = tree.children[1].layout.unwrap();
    assert!(approx(a.width(), 16.0) && approx(a.height(), 8.0));
    assert!(approx(b.width(), 30.0) && approx(b.height(), 20.0));
}

#[test]
fn display_none_collapses() {
    let r = resolver(".gone { display: none; } .fixed { height: 10px; }");
    let mut tree = VisualNode::new("div").with_children([
        VisualNode::new("div").with_class("gone").with_text("hidden text"),
        VisualNode::new("div").with_class("fixed"),
    ]);
    layout_tree(&mut tree, &r, viewport()).unwrap();
    assert!(approx(tree.layout.unwrap().height(), 10.0));
}

#[test]
fn aspect_ratio_parsing() {
    assert_eq!(aspect_ratio("2 / 1"), Some(2.0));
    assert_eq!(aspect_ratio("1.5"), Some(1.5));
    assert_eq!(aspect_ratio("auto"), None);
    assert_eq!(aspect_ratio("1 / 0"), None);
}
