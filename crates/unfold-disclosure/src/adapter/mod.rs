//! Adapters between widget markup and the uniform container model.
//!
//! Each widget kind keeps its own markup conventions. An adapter finds the
//! groups in a [`Document`] and writes committed state back into it, so the
//! registry never touches widget internals directly.

mod accordion;
mod tabs;

pub use accordion::{AccordionAdapter, DEFAULT_ACCORDION_CLASS};
pub use tabs::{DEFAULT_TABS_CLASS, TabsAdapter};

use unfold_dom::{Document, NodeId};

use crate::container::{Container, ContainerKind, GroupSpec};

/// Widget host for one kind of disclosure widget.
pub trait WidgetAdapter {
    /// Kind of containers this adapter produces.
    fn kind(&self) -> ContainerKind;

    /// Find all groups of this widget kind in document order.
    fn discover(&self, doc: &Document) -> Vec<GroupSpec>;

    /// Reflect a container's committed state into the markup.
    fn write_state(&self, doc: &mut Document, container: &Container);
}

/// Nearest ancestor carrying `class`.
fn nearest_with_class(doc: &Document, node: NodeId, class: &str) -> Option<NodeId> {
    doc.ancestors(node).find(|&a| doc.has_class(a, class))
}
