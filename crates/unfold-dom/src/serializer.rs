//! Markup serializer for [`Document`] trees.

use crate::document::{Document, NodeId, NodeKind};

/// Serialize the whole document (the children of the root) to markup.
#[must_use]
pub fn serialize(doc: &Document) -> String {
    let mut out = String::with_capacity(4096);
    for &child in doc.children(doc.root()) {
        serialize_node(doc, child, &mut out);
    }
    out
}

/// Serialize a single node and its subtree to markup.
#[must_use]
pub fn serialize_subtree(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    serialize_node(doc, node, &mut out);
    out
}

fn serialize_node(doc: &Document, node: NodeId, out: &mut String) {
    match doc.kind(node) {
        NodeKind::Text(text) => out.push_str(&escape_text(text)),
        NodeKind::Element(el) => {
            out.push('<');
            out.push_str(&el.name);
            for (key, value) in el.attrs() {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }

            let children = doc.children(node);
            if children.is_empty() && el.self_closing {
                out.push_str(" />");
                return;
            }
            out.push('>');
            for &child in children {
                serialize_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(&el.name);
            out.push('>');
        }
    }
}

/// Escape text for element content.
#[must_use]
pub fn escape_text(text: &str) -> String {
    escape_xml(text, false)
}

/// Escape text for attribute values.
#[must_use]
pub fn escape_attr(text: &str) -> String {
    escape_xml(text, true)
}

fn escape_xml(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            '\'' if escape_quotes => result.push_str("&apos;"),
            _ => result.push(ch),
        }
    }
    result
}
