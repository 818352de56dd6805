use std::collections::BTreeMap;

use crate::foundation::core::Rect;
use crate::tree::load::ImageLoad;

/// Runtime state of an image-content node.
#[derive(Clone, Debug, Default)]
pub struct ImageState {
    /// Source the renderer actually selected (after responsive `srcset` resolution).
    pub current_src: Option<String>,
    /// Completion handle of the image load.
    pub load: ImageLoad,
}

/// One node of a composition tree.
///
/// Trees are plain values: cloning produces an independent copy with the same child order and
/// count at every level, which is what positional source/clone pairing relies on.
#[derive(Clone, Debug, Default)]
pub struct VisualNode {
    /// Element name (`div`, `img`, ...).
    pub tag: String,
    /// Attributes other than `style`, kept sorted for stable serialization.
    pub attributes: BTreeMap<String, String>,
    /// Inline style declarations in source order.
    pub inline_style: Vec<(String, String)>,
    /// Direct text content.
    pub text: Option<String>,
    /// Border box in page coordinates, once laid out.
    pub layout: Option<Rect>,
    /// Present on image-content nodes.
    pub image: Option<ImageState>,
    /// Ordered children.
    pub children: Vec<VisualNode>,
}

impl VisualNode {
    /// Create an element without attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Append a class name.
    pub fn with_class(mut self, class: &str) -> Self {
        let classes = self.attributes.entry("class".to_string()).or_default();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
        self
    }

    /// Set an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add an inline style declaration.
    pub fn with_style(mut self, property: &str, value: impl Into<String>) -> Self {
        self.set_style_value(property, value);
        self
    }

    /// Set the direct text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attach image load state.
    pub fn with_image(mut self, image: ImageState) -> Self {
        self.image = Some(image);
        self
    }

    /// Append a child.
    pub fn with_child(mut self, child: VisualNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = VisualNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Class names from the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    /// `true` when the `class` attribute lists `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Inline style value for `property`.
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.inline_style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the inline value for `property`, keeping its position, or append it.
    pub fn set_style_value(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self.inline_style.iter_mut().find(|(p, _)| p == property) {
            Some(slot) => slot.1 = value,
            None => self.inline_style.push((property.to_string(), value)),
        }
    }

    /// `true` for image-content elements.
    pub fn is_image(&self) -> bool {
        self.tag.eq_ignore_ascii_case("img")
    }

    /// Source an image node currently displays: the selected source, else `src`.
    pub fn active_image_source(&self) -> Option<&str> {
        self.image
            .as_ref()
            .and_then(|i| i.current_src.as_deref())
            .filter(|s| !s.is_empty())
            .or_else(|| self.attr("src").filter(|s| !s.is_empty()))
    }

    /// Pre-order traversal.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a VisualNode)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Number of nodes in the subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        let mut n = 0usize;
        self.walk(&mut |_| n += 1);
        n
    }

    /// Node reached by following child indices from `self`.
    pub fn node_at(&self, path: &[usize]) -> Option<&VisualNode> {
        let mut node = self;
        for &i in path {
            node = node.children.get(i)?;
        }
        Some(node)
    }

    /// Mutable variant of [`VisualNode::node_at`].
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut VisualNode> {
        let mut node = self;
        for &i in path {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }

    /// Load handles of every image-content node in the subtree.
    pub fn image_loads(&self) -> Vec<ImageLoad> {
        let mut out = Vec::new();
        self.walk(&mut |n| {
            if n.is_image()
                && let Some(img) = &n.image
            {
                out.push(img.load.clone());
            }
        });
        out
    }

    /// `true` when both trees have the same tag and child count at every level.
    pub fn same_shape(&self, other: &VisualNode) -> bool {
        self.tag == other.tag
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_shape(b))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/node.rs"]
mod tests;
