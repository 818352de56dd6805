use super::*;

fn node(tag: &str, rect: Rect, styles: &[(&str, &str)]) -> VisualNode {
    let mut n = VisualNode::new(tag);
    for (p, v) in styles {
        n = n.with_style(p, *v);
    }
    n.layout = Some(rect);
    n
}

fn paint(root: &VisualNode) -> String {
    let mut out = String::new();
    paint_tree(&mut out, root, Point::new(root.layout.unwrap().x0, root.layout.unwrap().y0));
    out
}

#[test]
fn background_color_fills_rounded_box() {
    let root = node(
        "div",
        Rect::new(10.0, 10.0, 110.0, 60.0),
        &[
            ("background-color", "rgba(255, 255, 255, 0.18)"),
            ("border-top-left-radius", "18px"),
        ],
    );
    let out = paint(&root);
    assert!(out.starts_with("<path d=\"M"));
    assert!(out.contains("fill=\"#ffffff\" fill-opacity=\"0.18\""));
}

#[test]
fn hidden_and_transparent_nodes_paint_nothing() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(paint(&node("div", rect, &[("display", "none"), ("background-color", "#000")])).is_empty());
    assert!(paint(&node("div", rect, &[("opacity", "0"), ("background-color", "#000")])).is_empty());
    assert!(paint(&node("div", rect, &[("background-color", "rgba(0, 0, 0, 0)")])).is_empty());
}

#[test]
fn opacity_wraps_in_group_and_overflow_clips_children() {
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    let root = node(
        "article",
        rect,
        &[("opacity", "0.85"), ("overflow", "hidden"), ("border-top-left-radius", "40px")],
    )
    .with_child(node("div", rect, &[("background-color", "#000")]));
    let out = paint(&root);
    assert!(out.starts_with("<g opacity=\"0.85\">"));
    assert!(out.contains("<clipPath id=\"lockshot-clip-1\">"));
    assert!(out.contains("<g clip-path=\"url(#lockshot-clip-1)\">"));
    assert!(out.ends_with("</g></g>"));
}

#[test]
fn images_follow_object_fit() {
    let rect = Rect::new(0.0, 0.0, 45.0, 45.0);
    let img = node("img", rect, &[("object-fit", "contain")]).with_attr("src", "data:image/png;base64,AA==");
    let out = paint(&img);
    assert!(out.contains("preserveAspectRatio=\"xMidYMid meet\""));
    assert!(out.contains("href=\"data:image/png;base64,AA==\""));

    let stretched = node("img", rect, &[]).with_attr("src", "a.png");
    assert!(paint(&stretched).contains("preserveAspectRatio=\"none\""));
}

#[test]
fn background_images_cover_and_clip() {
    let root = node(
        "article",
        Rect::new(0.0, 0.0, 390.0, 644.0),
        &[
            ("background-image", "url(\"data:image/png;base64,AA==\")"),
            ("background-size", "cover"),
            ("background-position", "center"),
        ],
    );
    let out = paint(&root);
    assert!(out.contains("preserveAspectRatio=\"xMidYMid slice\""));
    assert!(out.contains("width=\"390\" height=\"644\""));
}

#[test]
fn uniform_borders_stroke_inside_the_box() {
    let mut styles = Vec::new();
    for side in ["top", "right", "bottom", "left"] {
        styles.push((format!("border-{side}-width"), "2px".to_string()));
        styles.push((format!("border-{side}-style"), "solid".to_string()));
        styles.push((format!("border-{side}-color"), "rgb(255, 255, 255)".to_string()));
    }
    let refs: Vec<(&str, &str)> = styles.iter().map(|(p, v)| (p.as_str(), v.as_str())).collect();
    let out = paint(&node("div", Rect::new(0.0, 0.0, 22.0, 10.0), &refs));
    assert!(out.contains("fill=\"none\" stroke=\"#ffffff\" stroke-width=\"2\""));
    assert_eq!(out.matches("<path").count(), 1);
}

#[test]
fn text_lines_are_anchored_by_alignment() {
    let root = node(
        "h1",
        Rect::new(0.0, 0.0, 350.0, 86.4),
        &[
            ("font-size", "72px"),
            ("font-weight", "300"),
            ("text-align", "center"),
            ("color", "rgb(255, 255, 255)"),
            ("font-family", "sans-serif"),
        ],
    )
    .with_text("09:41");
    let out = paint(&root);
    assert!(out.contains("text-anchor=\"middle\""));
    assert!(out.contains("x=\"175\""));
    assert!(out.contains("font-size=\"72\""));
    assert!(out.contains(">09:41</text>"));
}

#[test]
fn positions_map_to_aspect_alignment() {
    assert_eq!(align_from_position("center"), "xMidYMid");
    assert_eq!(align_from_position("0% 0%"), "xMinYMin");
    assert_eq!(align_from_position("top right"), "xMaxYMin");
    assert_eq!(align_from_position("left bottom"), "xMinYMax");
    assert_eq!(align_from_position("bottom"), "xMidYMax");
}
