//! Container and change types shared by the registry and its adapters.

use unfold_dom::NodeId;

/// Handle to a registered container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub(crate) usize);

/// Handle to a registered accordion or tab set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) usize);

/// Kind of disclosure container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Section of an accordion (open/closed).
    AccordionSection,
    /// Panel of a tab set (active/inactive).
    TabPanel,
}

/// What triggered a visibility transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeCause {
    /// Direct user interaction with a tab or accordion header.
    User,
    /// Fragment resolution opening the path to a target.
    Navigation,
    /// Programmatic call to [`set_visible`](crate::DisclosureRegistry::set_visible).
    Program,
    /// Side effect of opening a sibling in the same group.
    Implicit,
}

/// A committed visibility transition, delivered to listeners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityChange {
    /// Container that changed.
    pub container: ContainerId,
    /// New state.
    pub visible: bool,
    /// Trigger of the change.
    pub cause: ChangeCause,
    /// Anchor of the container, if it has one.
    pub anchor_id: Option<String>,
}

/// A collapsible or tabbed region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    pub(crate) kind: ContainerKind,
    pub(crate) group: GroupId,
    pub(crate) element: NodeId,
    pub(crate) header: Option<NodeId>,
    pub(crate) anchor_id: Option<String>,
    pub(crate) visible: bool,
}

impl Container {
    /// Container kind.
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Group the container belongs to.
    #[must_use]
    pub fn group(&self) -> GroupId {
        self.group
    }

    /// Panel or section element.
    #[must_use]
    pub fn element(&self) -> NodeId {
        self.element
    }

    /// Header element (tab button, accordion summary).
    #[must_use]
    pub fn header(&self) -> Option<NodeId> {
        self.header
    }

    /// Identifier used for direct linking.
    #[must_use]
    pub fn anchor_id(&self) -> Option<&str> {
        self.anchor_id.as_deref()
    }

    /// Whether the container is open/active.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// An accordion or tab set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub(crate) kind: ContainerKind,
    pub(crate) element: Option<NodeId>,
    pub(crate) members: Vec<ContainerId>,
    pub(crate) collapsible: bool,
    pub(crate) adapter: Option<usize>,
}

impl Group {
    /// Kind of the member containers.
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Group element (accordion or tabs wrapper).
    #[must_use]
    pub fn element(&self) -> Option<NodeId> {
        self.element
    }

    /// Member containers in document order.
    #[must_use]
    pub fn members(&self) -> &[ContainerId] {
        &self.members
    }

    /// Whether all members may be closed at once.
    #[must_use]
    pub fn is_collapsible(&self) -> bool {
        self.collapsible
    }
}

/// Group discovered in markup by a [`WidgetAdapter`](crate::WidgetAdapter).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupSpec {
    /// Group element.
    pub element: Option<NodeId>,
    /// Sections in document order.
    pub sections: Vec<SectionSpec>,
    /// Whether all sections may be closed at once.
    pub collapsible: bool,
}

/// Section discovered in markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionSpec {
    /// Panel or section element.
    pub element: NodeId,
    /// Header element.
    pub header: Option<NodeId>,
    /// Anchor identifier (usually the element `id`).
    pub anchor_id: Option<String>,
    /// Initial state as found in markup.
    pub visible: bool,
}
