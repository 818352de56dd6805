use std::sync::Arc;

use crate::tree::node::VisualNode;

/// Computed style of one node: every property of the resolver's list, in a fixed order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedStyle {
    declarations: Vec<(String, String)>,
}

impl ResolvedStyle {
    pub fn new(declarations: Vec<(String, String)>) -> Self {
        Self { declarations }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Value for `property`, or `""` when the resolver did not report it.
    pub fn value(&self, property: &str) -> &str {
        self.get(property).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// `property:value;` pairs concatenated in order.
    pub fn to_declaration_text(&self) -> String {
        let mut out = String::new();
        for (p, v) in &self.declarations {
            out.push_str(p);
            out.push(':');
            out.push_str(v);
            out.push(';');
        }
        out
    }

    pub fn into_declarations(self) -> Vec<(String, String)> {
        self.declarations
    }
}

/// Context a resolver sees for one node.
#[derive(Clone, Copy, Debug)]
pub struct StyleScope<'a> {
    /// Ancestors from the root down to the direct parent.
    pub ancestors: &'a [&'a VisualNode],
    /// Resolved style of the direct parent.
    pub parent: Option<&'a ResolvedStyle>,
}

impl StyleScope<'static> {
    /// Scope of a tree root: no ancestors, no parent style.
    pub const ROOT: Self = StyleScope {
        ancestors: &[],
        parent: None,
    };
}

/// Produces the computed style of a node.
///
/// Implementations must be deterministic and report the same property list, in the same
/// order, for every node.
pub trait StyleResolver: Send + Sync {
    fn resolve_style(&self, node: &VisualNode, scope: &StyleScope<'_>) -> ResolvedStyle;
}

impl<T: StyleResolver + ?Sized> StyleResolver for &T {
    fn resolve_style(&self, node: &VisualNode, scope: &StyleScope<'_>) -> ResolvedStyle {
        (**self).resolve_style(node, scope)
    }
}

impl<T: StyleResolver + ?Sized> StyleResolver for Arc<T> {
    fn resolve_style(&self, node: &VisualNode, scope: &StyleScope<'_>) -> ResolvedStyle {
        (**self).resolve_style(node, scope)
    }
}

/// Snapshot the computed style of a single node.
pub fn snapshot<R: StyleResolver + ?Sized>(
    resolver: &R,
    node: &VisualNode,
    scope: &StyleScope<'_>,
) -> ResolvedStyle {
    resolver.resolve_style(node, scope)
}

/// Resolve `source` and write each node's computed style as the sole inline declaration
/// list of the node at the same position in `target`.
///
/// Pairing is positional; children beyond the shorter list are left alone.
pub fn inline_styles_recursively<R: StyleResolver + ?Sized>(
    resolver: &R,
    source: &VisualNode,
    target: &mut VisualNode,
) {
    let mut ancestors = Vec::new();
    inline_pair(resolver, source, target, &mut ancestors, None);
}

fn inline_pair<'t, R: StyleResolver + ?Sized>(
    resolver: &R,
    source: &'t VisualNode,
    target: &mut VisualNode,
    ancestors: &mut Vec<&'t VisualNode>,
    parent: Option<&ResolvedStyle>,
) {
    let style = snapshot(
        resolver,
        source,
        &StyleScope {
            ancestors: ancestors.as_slice(),
            parent,
        },
    );
    target.inline_style = style.clone().into_declarations();

    ancestors.push(source);
    for (s, t) in source.children.iter().zip(target.children.iter_mut()) {
        inline_pair(resolver, s, t, ancestors, Some(&style));
    }
    ancestors.pop();
}

/// Resolved styles of every node in the subtree, in pre-order.
pub fn resolve_subtree<R: StyleResolver + ?Sized>(
    resolver: &R,
    root: &VisualNode,
) -> Vec<ResolvedStyle> {
    fn go<'t, R: StyleResolver + ?Sized>(
        resolver: &R,
        node: &'t VisualNode,
        ancestors: &mut Vec<&'t VisualNode>,
        parent: Option<&ResolvedStyle>,
        out: &mut Vec<ResolvedStyle>,
    ) {
        let style = snapshot(
            resolver,
            node,
            &StyleScope {
                ancestors: ancestors.as_slice(),
                parent,
            },
        );
        out.push(style.clone());
        ancestors.push(node);
        for child in &node.children {
            go(resolver, child, ancestors, Some(&style), out);
        }
        ancestors.pop();
    }

    let mut out = Vec::with_capacity(root.subtree_len());
    let mut ancestors = Vec::new();
    go(resolver, root, &mut ancestors, None, &mut out);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/style/resolved.rs"]
mod tests;
