//! Tab set markup, as emitted by the tabs post-processor.
//!
//! ```html
//! <div class="tabs" id="tabs-0">
//!   <div class="tabs-buttons" role="tablist">
//!     <button role="tab" id="tab-0-0" aria-controls="panel-0-0"
//!             aria-selected="true" tabindex="0">macOS</button>
//!     <button role="tab" id="tab-0-1" aria-controls="panel-0-1"
//!             aria-selected="false" tabindex="-1">Linux</button>
//!   </div>
//!   <div role="tabpanel" id="panel-0-0" aria-labelledby="tab-0-0">...</div>
//!   <div role="tabpanel" id="panel-0-1" aria-labelledby="tab-0-1" hidden>...</div>
//! </div>
//! ```
//!
//! Panels and buttons belong to the nearest enclosing `.tabs` wrapper, so
//! tab sets nested inside panels are kept apart.

use unfold_dom::{Document, NodeId};

use super::{WidgetAdapter, nearest_with_class};
use crate::container::{Container, ContainerKind, GroupSpec, SectionSpec};

/// Default class of tab set wrappers.
pub const DEFAULT_TABS_CLASS: &str = "tabs";

/// Adapter for ARIA tab sets.
#[derive(Clone, Debug)]
pub struct TabsAdapter {
    class: String,
}

impl TabsAdapter {
    /// Create an adapter matching wrappers with `class`.
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }

    /// Descendants of `wrapper` with `role` that belong to this wrapper.
    fn owned_with_role(&self, doc: &Document, wrapper: NodeId, role: &str) -> Vec<NodeId> {
        doc.descendants(wrapper)
            .filter(|&n| doc.attr(n, "role") == Some(role))
            .filter(|&n| nearest_with_class(doc, n, &self.class) == Some(wrapper))
            .collect()
    }

    /// Button controlling `panel`, via `aria-controls` or `aria-labelledby`.
    fn header_for(doc: &Document, panel: NodeId, buttons: &[NodeId]) -> Option<NodeId> {
        let panel_id = doc.attr(panel, "id");
        let labelled_by = doc.attr(panel, "aria-labelledby");
        buttons.iter().copied().find(|&b| {
            (panel_id.is_some() && doc.attr(b, "aria-controls") == panel_id)
                || (labelled_by.is_some() && doc.attr(b, "id") == labelled_by)
        })
    }
}

impl Default for TabsAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_TABS_CLASS)
    }
}

impl WidgetAdapter for TabsAdapter {
    fn kind(&self) -> ContainerKind {
        ContainerKind::TabPanel
    }

    fn discover(&self, doc: &Document) -> Vec<GroupSpec> {
        doc.descendants(doc.root())
            .filter(|&node| doc.has_class(node, &self.class))
            .map(|wrapper| {
                let buttons = self.owned_with_role(doc, wrapper, "tab");
                let sections = self
                    .owned_with_role(doc, wrapper, "tabpanel")
                    .into_iter()
                    .map(|panel| SectionSpec {
                        element: panel,
                        header: Self::header_for(doc, panel, &buttons),
                        anchor_id: doc.attr(panel, "id").map(str::to_owned),
                        visible: !doc.has_attr(panel, "hidden"),
                    })
                    .collect();
                GroupSpec {
                    element: Some(wrapper),
                    sections,
                    collapsible: false,
                }
            })
            .filter(|group| !group.sections.is_empty())
            .collect()
    }

    fn write_state(&self, doc: &mut Document, container: &Container) {
        let visible = container.is_visible();
        if visible {
            doc.remove_attr(container.element(), "hidden");
        } else {
            doc.set_attr(container.element(), "hidden", "hidden");
        }
        if let Some(button) = container.header() {
            doc.set_attr(button, "aria-selected", if visible { "true" } else { "false" });
            doc.set_attr(button, "tabindex", if visible { "0" } else { "-1" });
        }
    }
}
