//! Accordion markup: `details` sections inside an `.accordion` wrapper.
//!
//! ```html
//! <div class="accordion">
//!   <details id="install" open="open"><summary>Install</summary>...</details>
//!   <details id="usage"><summary>Usage</summary>...</details>
//! </div>
//! ```

use unfold_dom::{Document, NodeId};

use super::WidgetAdapter;
use crate::container::{Container, ContainerKind, GroupSpec, SectionSpec};

/// Default class of accordion wrappers.
pub const DEFAULT_ACCORDION_CLASS: &str = "accordion";

/// Adapter for `details`-based accordions.
#[derive(Clone, Debug)]
pub struct AccordionAdapter {
    class: String,
    collapsible: bool,
}

impl AccordionAdapter {
    /// Create an adapter matching wrappers with `class`.
    #[must_use]
    pub fn new(class: impl Into<String>, collapsible: bool) -> Self {
        Self {
            class: class.into(),
            collapsible,
        }
    }

    fn section(doc: &Document, details: NodeId) -> SectionSpec {
        let header = doc
            .children(details)
            .iter()
            .copied()
            .find(|&c| doc.tag(c) == Some("summary"));
        SectionSpec {
            element: details,
            header,
            anchor_id: doc.attr(details, "id").map(str::to_owned),
            visible: doc.has_attr(details, "open"),
        }
    }
}

impl Default for AccordionAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_ACCORDION_CLASS, true)
    }
}

impl WidgetAdapter for AccordionAdapter {
    fn kind(&self) -> ContainerKind {
        ContainerKind::AccordionSection
    }

    fn discover(&self, doc: &Document) -> Vec<GroupSpec> {
        doc.descendants(doc.root())
            .filter(|&node| doc.has_class(node, &self.class))
            .map(|wrapper| GroupSpec {
                element: Some(wrapper),
                sections: doc
                    .children(wrapper)
                    .iter()
                    .copied()
                    .filter(|&c| doc.tag(c) == Some("details"))
                    .map(|details| Self::section(doc, details))
                    .collect(),
                collapsible: self.collapsible,
            })
            .filter(|group| !group.sections.is_empty())
            .collect()
    }

    fn write_state(&self, doc: &mut Document, container: &Container) {
        if container.is_visible() {
            doc.set_attr(container.element(), "open", "open");
        } else {
            doc.remove_attr(container.element(), "open");
        }
    }
}
