use std::fmt::Write;

use crate::tree::node::VisualNode;

/// XHTML namespace of the embedded document.
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "input", "meta", "link", "source"];

/// Escape special XML characters.
pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Serialize `node` as well-formed XHTML: attributes in name order, inline declarations as
/// the `style` attribute, direct text before children.
pub fn write_xhtml(out: &mut String, node: &VisualNode) {
    let tag = node.tag.to_ascii_lowercase();
    let _ = write!(out, "<{tag}");
    for (name, value) in &node.attributes {
        if name == "style" {
            continue;
        }
        let _ = write!(out, " {name}=\"{}\"", escape_xml(value));
    }
    if !node.inline_style.is_empty() {
        let mut decl = String::new();
        for (p, v) in &node.inline_style {
            let _ = write!(decl, "{p}:{v};");
        }
        let _ = write!(out, " style=\"{}\"", escape_xml(&decl));
    }

    let text = node.text.as_deref().filter(|t| !t.is_empty());
    if VOID_ELEMENTS.contains(&tag.as_str()) || (text.is_none() && node.children.is_empty()) {
        out.push_str("/>");
        return;
    }
    out.push('>');
    if let Some(text) = text {
        out.push_str(&escape_xml(text));
    }
    for child in &node.children {
        write_xhtml(out, child);
    }
    let _ = write!(out, "</{tag}>");
}
