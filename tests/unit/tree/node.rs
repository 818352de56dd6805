use super::*;
use crate::tree::load::LoadOutcome;

fn sample() -> VisualNode {
    VisualNode::new("article")
        .with_class("iphone")
        .with_style("background-image", "url(bg.png)")
        .with_child(VisualNode::new("div").with_class("a").with_text("x"))
        .with_child(
            VisualNode::new("div").with_child(
                VisualNode::new("img")
                    .with_attr("src", "icon.png")
                    .with_image(ImageState::default()),
            ),
        )
}

#[test]
fn classes_accumulate_in_order() {
    let n = VisualNode::new("div").with_class("a").with_class("b");
    assert_eq!(n.attr("class"), Some("a b"));
    assert!(n.has_class("b"));
    assert!(!n.has_class("c"));
}

#[test]
fn set_style_value_replaces_in_place() {
    let mut n = VisualNode::new("div")
        .with_style("color", "red")
        .with_style("opacity", "1");
    n.set_style_value("color", "blue");
    assert_eq!(
        n.inline_style,
        vec![
            ("color".to_string(), "blue".to_string()),
            ("opacity".to_string(), "1".to_string())
        ]
    );
}

#[test]
fn clone_keeps_shape_and_paths() {
    let a = sample();
    let b = a.clone();
    assert!(a.same_shape(&b));
    assert_eq!(a.subtree_len(), 4);
    assert_eq!(b.node_at(&[1, 0]).map(|n| n.tag.as_str()), Some("img"));
    assert!(b.node_at(&[2]).is_none());
}

#[test]
fn active_source_prefers_selected_source() {
    let mut img = VisualNode::new("img").with_attr("src", "small.png");
    assert_eq!(img.active_image_source(), Some("small.png"));
    img.image = Some(ImageState {
        current_src: Some("large.png".to_string()),
        load: ImageLoad::settled(LoadOutcome::Loaded),
    });
    assert_eq!(img.active_image_source(), Some("large.png"));
}

#[test]
fn image_loads_are_collected_for_img_nodes_only() {
    let tree = sample();
    assert_eq!(tree.image_loads().len(), 1);
}

#[tokio::test]
async fn pending_load_is_shared_between_clones() {
    let (tx, rx) = futures::channel::oneshot::channel::<()>();
    let load = ImageLoad::pending(async move {
        match rx.await {
            Ok(()) => LoadOutcome::Loaded,
            Err(_) => LoadOutcome::Failed,
        }
    });
    let copy = load.clone();
    assert!(!load.is_complete());
    tx.send(()).unwrap();
    assert_eq!(copy.wait().await, LoadOutcome::Loaded);
    assert_eq!(load.outcome(), Some(LoadOutcome::Loaded));
}
