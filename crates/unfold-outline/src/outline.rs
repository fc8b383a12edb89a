//! Outline tree and table of contents views.

use std::collections::HashMap;
use std::fmt::Write;

use unfold_dom::{NodeId, escape_attr, escape_text};

use crate::path::NumberPath;

/// One indexed heading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    /// Normalized rank (1 = top level).
    pub level: usize,
    /// Display title (override attribute or heading text).
    pub title: String,
    /// Anchor identifier used for linking.
    pub anchor_id: String,
    /// Hierarchical number.
    pub number: NumberPath,
    /// Heading element, when built from a document.
    pub node: Option<NodeId>,
}

/// Node of the outline tree.
///
/// Intermediate nodes created for skipped levels carry no heading.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutlineNode {
    /// Counter value of this node within its parent (0 for implicit frames).
    pub number: u32,
    /// Index into [`Outline::headings`].
    pub heading: Option<usize>,
    /// Child nodes in document order.
    pub children: Vec<OutlineNode>,
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Outline depth (1 = top level).
    pub level: usize,
    /// Dotted number (e.g. "2.1").
    pub number: String,
    /// Heading title.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Numbered outline of a document.
#[derive(Clone, Debug, Default)]
pub struct Outline {
    pub(crate) root: OutlineNode,
    pub(crate) headings: Vec<Heading>,
    pub(crate) by_path: HashMap<NumberPath, usize>,
    pub(crate) by_anchor: HashMap<String, usize>,
}

impl Outline {
    /// Tree root (depth 0, no heading).
    #[must_use]
    pub fn root(&self) -> &OutlineNode {
        &self.root
    }

    /// Headings in document order.
    #[must_use]
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    /// Heading by index.
    #[must_use]
    pub fn heading(&self, index: usize) -> Option<&Heading> {
        self.headings.get(index)
    }

    /// Whether no heading was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    /// Number of indexed headings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    /// Heading with the given number.
    #[must_use]
    pub fn find_by_path(&self, path: &NumberPath) -> Option<&Heading> {
        self.by_path.get(path).map(|&i| &self.headings[i])
    }

    /// Heading with the given anchor. With duplicate anchors the first
    /// heading in document order is returned.
    #[must_use]
    pub fn find_by_anchor(&self, anchor: &str) -> Option<&Heading> {
        self.by_anchor.get(anchor).map(|&i| &self.headings[i])
    }

    /// Flat table of contents in document order.
    #[must_use]
    pub fn toc_entries(&self) -> Vec<TocEntry> {
        self.headings
            .iter()
            .map(|h| TocEntry {
                level: h.level,
                number: h.number.to_string(),
                title: h.title.clone(),
                id: h.anchor_id.clone(),
            })
            .collect()
    }

    /// Render the outline as nested `<ul class="toc">` lists.
    ///
    /// Returns an empty string for an empty outline.
    #[must_use]
    pub fn render_toc_html(&self) -> String {
        if self.root.children.is_empty() {
            return String::new();
        }
        let mut out = String::with_capacity(self.headings.len() * 64);
        out.push_str(r#"<ul class="toc">"#);
        self.render_children(&self.root, &mut out);
        out.push_str("</ul>");
        out
    }

    fn render_children(&self, node: &OutlineNode, out: &mut String) {
        for child in &node.children {
            out.push_str("<li>");
            if let Some(heading) = child.heading.and_then(|i| self.headings.get(i)) {
                let _ = write!(
                    out,
                    r##"<a href="#{}"><span class="toc-number">{}</span> {}</a>"##,
                    escape_attr(&heading.anchor_id),
                    heading.number,
                    escape_text(&heading.title)
                );
            }
            if !child.children.is_empty() {
                out.push_str("<ul>");
                self.render_children(child, out);
                out.push_str("</ul>");
            }
            out.push_str("</li>");
        }
    }
}
