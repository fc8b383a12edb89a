//! Stack-based outline numbering.

use std::collections::HashSet;

use unfold_dom::NodeId;

use crate::outline::{Heading, Outline, OutlineNode};
use crate::path::NumberPath;

/// Default prefix for assigned anchor identifiers.
pub const DEFAULT_ANCHOR_PREFIX: &str = "heading_";

/// Raw heading fed to the [`OutlineBuilder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingSource {
    /// Heading rank (1 = top level). Zero is treated as 1.
    pub level: usize,
    /// Heading text.
    pub text: String,
    /// Existing identifier, kept when non-empty.
    pub id: Option<String>,
    /// Explicit title override.
    pub title: Option<String>,
    /// Element the heading came from.
    pub node: Option<NodeId>,
}

impl HeadingSource {
    /// Create a heading source with no identifier or override.
    #[must_use]
    pub fn new(level: usize, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            id: None,
            title: None,
            node: None,
        }
    }

    /// Set the existing identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the title override.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the source element.
    #[must_use]
    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }
}

/// Builds an [`Outline`] one heading at a time.
///
/// Keeps one counter frame per open depth. A heading deeper than the stack
/// pushes zero frames until the depths match, a shallower one pops frames,
/// and the top frame is then incremented.
///
/// Assigned anchors never reuse an identifier already kept or reserved: a
/// taken `heading_1_2` becomes `heading_1_2-2`, then `-3` and so on.
///
/// # Example
///
/// ```
/// use unfold_outline::{HeadingSource, OutlineBuilder};
///
/// let mut builder = OutlineBuilder::new();
/// builder.push(HeadingSource::new(1, "Intro"));
/// let heading = builder.push(HeadingSource::new(3, "Details"));
/// assert_eq!(heading.number.to_string(), "1.0.1");
/// assert_eq!(heading.anchor_id, "heading_1_0_1");
/// ```
#[derive(Debug)]
pub struct OutlineBuilder {
    frames: Vec<u32>,
    anchor_prefix: String,
    taken: HashSet<String>,
    outline: Outline,
}

impl OutlineBuilder {
    /// Create a builder using the default `heading_` anchor prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::with_anchor_prefix(DEFAULT_ANCHOR_PREFIX)
    }

    /// Create a builder with a custom anchor prefix.
    #[must_use]
    pub fn with_anchor_prefix(prefix: impl Into<String>) -> Self {
        Self {
            frames: Vec::new(),
            anchor_prefix: prefix.into(),
            taken: HashSet::new(),
            outline: Outline::default(),
        }
    }

    /// Mark identifiers already used elsewhere on the page.
    pub fn reserve_ids<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.taken.extend(ids.into_iter().map(Into::into));
    }

    /// Current stack depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Number the next heading in document order and record it.
    pub fn push(&mut self, source: HeadingSource) -> &Heading {
        let level = source.level.max(1);
        if self.frames.len() < level {
            self.frames.resize(level, 0);
        } else {
            self.frames.truncate(level);
        }
        if let Some(top) = self.frames.last_mut() {
            *top += 1;
        }
        let number = NumberPath::new(self.frames.clone());

        let anchor_id = match source.id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => self.free_anchor(&number),
        };
        self.taken.insert(anchor_id.clone());
        let title = source
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(source.text)
            .trim()
            .to_owned();

        let index = self.outline.headings.len();
        insert_node(&mut self.outline.root, number.counters(), index);
        self.outline.by_path.insert(number.clone(), index);
        self.outline
            .by_anchor
            .entry(anchor_id.clone())
            .or_insert(index);
        self.outline.headings.push(Heading {
            level,
            title,
            anchor_id,
            number,
            node: source.node,
        });
        &self.outline.headings[index]
    }

    /// First identifier derived from `number` that is not taken yet.
    fn free_anchor(&self, number: &NumberPath) -> String {
        let base = format!("{}{}", self.anchor_prefix, number.join("_"));
        if !self.taken.contains(&base) {
            return base;
        }
        (2..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| !self.taken.contains(candidate))
            .unwrap_or(base)
    }

    /// Finish building.
    #[must_use]
    pub fn finish(self) -> Outline {
        self.outline
    }
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Place heading `index` at `path`, creating implicit nodes for skipped levels.
///
/// Counters only grow within a scope, so an existing scope is always the
/// parent's last child.
fn insert_node(root: &mut OutlineNode, path: &[u32], index: usize) {
    let Some((&leaf, scopes)) = path.split_last() else {
        return;
    };
    let mut node = root;
    for &number in scopes {
        let reuse = node.children.last().is_some_and(|c| c.number == number);
        if !reuse {
            node.children.push(OutlineNode {
                number,
                ..OutlineNode::default()
            });
        }
        let last = node.children.len() - 1;
        node = &mut node.children[last];
    }
    node.children.push(OutlineNode {
        number: leaf,
        heading: Some(index),
        children: Vec::new(),
    });
}

/// Build an outline from headings in document order.
///
/// An empty input yields an empty outline.
pub fn build_outline(headings: impl IntoIterator<Item = HeadingSource>) -> Outline {
    let mut builder = OutlineBuilder::new();
    for heading in headings {
        builder.push(heading);
    }
    builder.finish()
}
