//! Indexing headings of a parsed page.

use unfold_dom::{Document, NodeId};

use crate::builder::{DEFAULT_ANCHOR_PREFIX, HeadingSource, OutlineBuilder};
use crate::outline::Outline;

/// Class of the number label inserted into numbered headings.
pub const NUMBER_LABEL_CLASS: &str = "outline-number";

/// Attribute that overrides the heading text as its outline title.
const TITLE_ATTR: &str = "title";

/// Options for [`index_document`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Shallowest heading level indexed (becomes outline depth 1).
    pub min_level: u8,
    /// Deepest heading level indexed.
    pub max_level: u8,
    /// Whether to prefix heading text with its number.
    pub number_headings: bool,
    /// Prefix for assigned anchor identifiers.
    pub anchor_prefix: String,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            min_level: 1,
            max_level: 6,
            number_headings: true,
            anchor_prefix: DEFAULT_ANCHOR_PREFIX.to_owned(),
        }
    }
}

/// Build the outline of a document and annotate its headings.
///
/// Collects `h1`..`h6` elements in document order within the configured
/// level range. Headings without an `id` get the assigned anchor, skipping
/// identifiers already present anywhere on the page, and when
/// numbering is enabled a `<span class="outline-number">` label is placed in
/// front of the heading text. An existing label is updated in place, so
/// indexing the same document twice yields the same markup.
///
/// # Example
///
/// ```
/// use unfold_dom::{parse_fragment, serialize};
/// use unfold_outline::{OutlineOptions, index_document};
///
/// let mut doc = parse_fragment("<h1>Intro</h1><h2>Setup</h2>").unwrap();
/// let outline = index_document(&mut doc, &OutlineOptions::default());
///
/// assert_eq!(outline.headings()[1].anchor_id, "heading_1_1");
/// assert_eq!(
///     serialize(&doc),
///     concat!(
///         r#"<h1 id="heading_1"><span class="outline-number">1 </span>Intro</h1>"#,
///         r#"<h2 id="heading_1_1"><span class="outline-number">1.1 </span>Setup</h2>"#,
///     )
/// );
/// ```
pub fn index_document(doc: &mut Document, options: &OutlineOptions) -> Outline {
    let headings = collect_headings(doc, options);
    let mut builder = OutlineBuilder::with_anchor_prefix(options.anchor_prefix.clone());
    builder.reserve_ids(
        doc.descendants(doc.root())
            .filter_map(|node| doc.attr(node, "id"))
            .filter(|id| !id.is_empty()),
    );

    for (node, level) in headings {
        let source = HeadingSource {
            level: usize::from(level - options.min_level + 1),
            text: heading_text(doc, node),
            id: doc.attr(node, "id").map(str::to_owned),
            title: doc.attr(node, TITLE_ATTR).map(str::to_owned),
            node: Some(node),
        };
        let heading = builder.push(source);
        let anchor_id = heading.anchor_id.clone();
        let label = format!("{} ", heading.number);

        if doc.attr(node, "id").is_none_or(str::is_empty) {
            doc.set_attr(node, "id", anchor_id);
        }
        if options.number_headings {
            set_number_label(doc, node, &label);
        } else if let Some(existing) = find_number_label(doc, node) {
            doc.detach(existing);
        }
    }

    let outline = builder.finish();
    tracing::debug!(headings = outline.len(), "Outline indexed");
    outline
}

/// Heading elements within the level range, with their HTML level.
fn collect_headings(doc: &Document, options: &OutlineOptions) -> Vec<(NodeId, u8)> {
    doc.descendants(doc.root())
        .filter_map(|node| {
            let level = heading_level(doc.tag(node)?)?;
            (options.min_level..=options.max_level)
                .contains(&level)
                .then_some((node, level))
        })
        .collect()
}

/// Level of an `h1`..`h6` tag name.
fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Heading text without a previously inserted number label.
fn heading_text(doc: &Document, node: NodeId) -> String {
    doc.children(node)
        .iter()
        .filter(|&&child| !doc.has_class(child, NUMBER_LABEL_CLASS))
        .map(|&child| doc.text_content(child))
        .collect()
}

fn find_number_label(doc: &Document, node: NodeId) -> Option<NodeId> {
    doc.children(node)
        .iter()
        .copied()
        .find(|&child| doc.has_class(child, NUMBER_LABEL_CLASS))
}

fn set_number_label(doc: &mut Document, node: NodeId, label: &str) {
    let span = match find_number_label(doc, node) {
        Some(span) => {
            for child in doc.children(span).to_vec() {
                doc.detach(child);
            }
            span
        }
        None => {
            let span = doc.create_element("span");
            doc.set_attr(span, "class", NUMBER_LABEL_CLASS);
            doc.insert_child(node, 0, span);
            span
        }
    };
    doc.append_text(span, label);
}
