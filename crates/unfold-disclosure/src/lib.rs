//! Uniform disclosure state for accordions and tab sets.
//!
//! Accordion sections and tab panels are both treated as containers that
//! are either visible (open/active) or not:
//! - [`DisclosureRegistry`]: single source of truth for container state,
//!   change listeners and the lookup of containers enclosing an element
//! - [`WidgetAdapter`]: per-widget glue that finds groups in markup and
//!   writes committed state back ([`AccordionAdapter`], [`TabsAdapter`])
//!
//! Within a group at most one container is visible. Tab sets always keep
//! one panel active; accordions may be fully collapsed unless configured
//! otherwise.

mod adapter;
mod container;
mod registry;

pub use adapter::{
    AccordionAdapter, DEFAULT_ACCORDION_CLASS, DEFAULT_TABS_CLASS, TabsAdapter, WidgetAdapter,
};
pub use container::{
    ChangeCause, Container, ContainerId, ContainerKind, Group, GroupId, GroupSpec, SectionSpec,
    VisibilityChange,
};
pub use registry::{DisclosureRegistry, Listener, RegistryOptions};
