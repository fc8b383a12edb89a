//! The disclosure registry.

use std::collections::HashMap;
use std::fmt;

use unfold_dom::{Document, NodeId};

use crate::adapter::{
    AccordionAdapter, DEFAULT_ACCORDION_CLASS, DEFAULT_TABS_CLASS, TabsAdapter, WidgetAdapter,
};
use crate::container::{
    ChangeCause, Container, ContainerId, ContainerKind, Group, GroupId, GroupSpec, SectionSpec,
    VisibilityChange,
};

/// Callback invoked after a committed visibility transition.
pub type Listener = Box<dyn FnMut(&VisibilityChange)>;

/// Options for [`DisclosureRegistry::decorate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Whether accordions may have every section closed.
    pub collapsible: bool,
    /// Class marking accordion wrappers.
    pub accordion_class: String,
    /// Class marking tab set wrappers.
    pub tabs_class: String,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            collapsible: true,
            accordion_class: DEFAULT_ACCORDION_CLASS.to_owned(),
            tabs_class: DEFAULT_TABS_CLASS.to_owned(),
        }
    }
}

/// Uniform open/closed state for every accordion section and tab panel of
/// a page.
///
/// Constructed once per page and passed by reference to whoever needs it.
/// State lives here; markup is only touched by the widget adapters when
/// [`apply`](Self::apply) is called.
///
/// Listeners get `&VisibilityChange` and cannot reach the registry, so a
/// callback can never re-enter [`set_visible`](Self::set_visible).
///
/// # Example
///
/// ```
/// use unfold_dom::parse_fragment;
/// use unfold_disclosure::{DisclosureRegistry, RegistryOptions};
///
/// let doc = parse_fragment(concat!(
///     r#"<div class="accordion">"#,
///     r#"<details id="a" open="open"><summary>A</summary></details>"#,
///     r#"<details id="b"><summary>B</summary></details>"#,
///     r#"</div>"#,
/// ))
/// .unwrap();
/// let mut registry = DisclosureRegistry::decorate(&doc, &RegistryOptions::default());
///
/// let a = registry.container_by_anchor("a").unwrap();
/// let b = registry.container_by_anchor("b").unwrap();
/// registry.set_visible(b, true);
///
/// assert!(registry.is_visible(b));
/// assert!(!registry.is_visible(a));
/// ```
pub struct DisclosureRegistry {
    containers: Vec<Container>,
    groups: Vec<Group>,
    adapters: Vec<Box<dyn WidgetAdapter>>,
    by_element: HashMap<NodeId, ContainerId>,
    by_anchor: HashMap<String, ContainerId>,
    listeners: HashMap<ContainerId, Vec<Listener>>,
    subscribers: Vec<Listener>,
}

impl DisclosureRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            containers: Vec::new(),
            groups: Vec::new(),
            adapters: Vec::new(),
            by_element: HashMap::new(),
            by_anchor: HashMap::new(),
            listeners: HashMap::new(),
            subscribers: Vec::new(),
        }
    }

    /// Register every accordion and tab set of a document.
    #[must_use]
    pub fn decorate(doc: &Document, options: &RegistryOptions) -> Self {
        let adapters: Vec<Box<dyn WidgetAdapter>> = vec![
            Box::new(AccordionAdapter::new(
                options.accordion_class.clone(),
                options.collapsible,
            )),
            Box::new(TabsAdapter::new(options.tabs_class.clone())),
        ];
        Self::with_adapters(doc, adapters)
    }

    /// Register the groups found by the given adapters.
    #[must_use]
    pub fn with_adapters(doc: &Document, adapters: Vec<Box<dyn WidgetAdapter>>) -> Self {
        let mut registry = Self::new();
        for (index, adapter) in adapters.iter().enumerate() {
            for spec in adapter.discover(doc) {
                registry.insert_group(adapter.kind(), spec, Some(index));
            }
        }
        registry.adapters = adapters;
        tracing::debug!(
            groups = registry.groups.len(),
            containers = registry.containers.len(),
            "Disclosure containers registered"
        );
        registry
    }

    /// Register a group by hand. Its state is not written back by
    /// [`apply`](Self::apply).
    pub fn add_group(&mut self, kind: ContainerKind, spec: GroupSpec) -> GroupId {
        self.insert_group(kind, spec, None)
    }

    fn insert_group(
        &mut self,
        kind: ContainerKind,
        spec: GroupSpec,
        adapter: Option<usize>,
    ) -> GroupId {
        let group_id = GroupId(self.groups.len());
        let collapsible = kind == ContainerKind::AccordionSection && spec.collapsible;
        let states = normalize_initial(&spec.sections, collapsible);

        let mut members = Vec::with_capacity(spec.sections.len());
        for (section, visible) in spec.sections.into_iter().zip(states) {
            let id = ContainerId(self.containers.len());
            self.by_element.entry(section.element).or_insert(id);
            if let Some(header) = section.header {
                self.by_element.entry(header).or_insert(id);
            }
            if let Some(anchor) = &section.anchor_id {
                self.by_anchor.entry(anchor.clone()).or_insert(id);
            }
            self.containers.push(Container {
                kind,
                group: group_id,
                element: section.element,
                header: section.header,
                anchor_id: section.anchor_id,
                visible,
            });
            members.push(id);
        }

        self.groups.push(Group {
            kind,
            element: spec.element,
            members,
            collapsible,
            adapter,
        });
        group_id
    }

    /// Number of registered containers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Whether no container is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Container by handle.
    #[must_use]
    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(id.0)
    }

    /// All containers with their handles.
    pub fn containers(&self) -> impl Iterator<Item = (ContainerId, &Container)> {
        self.containers
            .iter()
            .enumerate()
            .map(|(i, c)| (ContainerId(i), c))
    }

    /// Group by handle.
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.0)
    }

    /// All groups in registration order.
    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.groups.iter().enumerate().map(|(i, g)| (GroupId(i), g))
    }

    /// Container whose own anchor is `anchor_id`.
    #[must_use]
    pub fn container_by_anchor(&self, anchor_id: &str) -> Option<ContainerId> {
        self.by_anchor.get(anchor_id).copied()
    }

    /// Container for a panel, section or header element.
    #[must_use]
    pub fn container_for_element(&self, node: NodeId) -> Option<ContainerId> {
        self.by_element.get(&node).copied()
    }

    /// Whether the container is open/active. Unknown handles are not visible.
    #[must_use]
    pub fn is_visible(&self, id: ContainerId) -> bool {
        self.container(id).is_some_and(Container::is_visible)
    }

    /// Set the container state.
    ///
    /// Returns `true` when a transition happened. Setting the current state
    /// again is a no-op that notifies nobody.
    pub fn set_visible(&mut self, id: ContainerId, visible: bool) -> bool {
        self.set_visible_with(id, visible, ChangeCause::Program)
    }

    /// Set the state in response to the user clicking a header.
    pub fn set_visible_by_user(&mut self, id: ContainerId, visible: bool) -> bool {
        self.set_visible_with(id, visible, ChangeCause::User)
    }

    /// Set the container state, recording what caused the change.
    ///
    /// Opening a section closes the other open member of its group. Closing
    /// is refused for tab panels (one stays active) and for the last open
    /// section of a non-collapsible accordion.
    pub fn set_visible_with(&mut self, id: ContainerId, visible: bool, cause: ChangeCause) -> bool {
        let Some(container) = self.containers.get(id.0) else {
            tracing::trace!(?id, "Unknown container");
            return false;
        };
        if container.visible == visible {
            return false;
        }
        let group = &self.groups[container.group.0];

        if !visible {
            if !group.collapsible {
                tracing::trace!(?id, kind = ?group.kind, "Refusing to close the only open member");
                return false;
            }
            self.containers[id.0].visible = false;
            self.notify(id, false, cause);
            return true;
        }

        let closed: Vec<ContainerId> = group
            .members
            .iter()
            .copied()
            .filter(|&m| m != id && self.containers[m.0].visible)
            .collect();
        for &other in &closed {
            self.containers[other.0].visible = false;
        }
        self.containers[id.0].visible = true;

        for other in closed {
            self.notify(other, false, ChangeCause::Implicit);
        }
        self.notify(id, true, cause);
        true
    }

    /// Listen for transitions of one container.
    pub fn on_visibility_change(
        &mut self,
        id: ContainerId,
        listener: impl FnMut(&VisibilityChange) + 'static,
    ) {
        self.listeners.entry(id).or_default().push(Box::new(listener));
    }

    /// Listen for transitions of every container.
    pub fn subscribe(&mut self, listener: impl FnMut(&VisibilityChange) + 'static) {
        self.subscribers.push(Box::new(listener));
    }

    fn notify(&mut self, id: ContainerId, visible: bool, cause: ChangeCause) {
        let change = VisibilityChange {
            container: id,
            visible,
            cause,
            anchor_id: self.containers[id.0].anchor_id.clone(),
        };
        if let Some(listeners) = self.listeners.get_mut(&id) {
            for listener in listeners {
                listener(&change);
            }
        }
        for subscriber in &mut self.subscribers {
            subscriber(&change);
        }
    }

    /// Containers enclosing `node` (including one `node` is the panel or
    /// header of), innermost first.
    #[must_use]
    pub fn containers_enclosing(&self, doc: &Document, node: NodeId) -> Vec<ContainerId> {
        let mut chain = Vec::new();
        for current in std::iter::once(node).chain(doc.ancestors(node)) {
            if let Some(&id) = self.by_element.get(&current)
                && !chain.contains(&id)
            {
                chain.push(id);
            }
        }
        chain
    }

    /// Containers enclosing the element an anchor resolves to, innermost
    /// first. Empty when the anchor is unknown or not inside any container.
    #[must_use]
    pub fn find_containers_for(&self, doc: &Document, anchor_id: &str) -> Vec<ContainerId> {
        doc.find_anchor(anchor_id)
            .map(|node| self.containers_enclosing(doc, node))
            .unwrap_or_default()
    }

    /// Write the committed state of adapter-discovered containers into the
    /// document.
    pub fn apply(&self, doc: &mut Document) {
        for container in &self.containers {
            let group = &self.groups[container.group.0];
            if let Some(adapter) = group.adapter.and_then(|i| self.adapters.get(i)) {
                adapter.write_state(doc, container);
            }
        }
    }
}

impl Default for DisclosureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DisclosureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisclosureRegistry")
            .field("containers", &self.containers)
            .field("groups", &self.groups)
            .field("listeners", &self.listeners.values().map(Vec::len).sum::<usize>())
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

/// Initial states honoring the group rules: at most one open section, and
/// exactly one when the group is not collapsible (the first one if markup
/// marks none).
fn normalize_initial(sections: &[SectionSpec], collapsible: bool) -> Vec<bool> {
    let keep = sections
        .iter()
        .position(|s| s.visible)
        .or((!collapsible && !sections.is_empty()).then_some(0));
    (0..sections.len()).map(|i| Some(i) == keep).collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use unfold_dom::{parse_fragment, serialize};

    use super::*;

    const ACCORDION: &str = concat!(
        r#"<div class="accordion">"#,
        r#"<details id="a"><summary>A</summary>Alpha</details>"#,
        r#"<details id="b"><summary>B</summary>Beta</details>"#,
        r#"<details id="c"><summary>C</summary>Gamma</details>"#,
        r#"</div>"#,
    );

    const NESTED: &str = concat!(
        r#"<div class="tabs">"#,
        r#"<div role="tablist">"#,
        r#"<button role="tab" id="t1" aria-controls="outer1">One</button>"#,
        r#"<button role="tab" id="t2" aria-controls="outer2">Two</button>"#,
        r#"</div>"#,
        r#"<div role="tabpanel" id="outer1">first</div>"#,
        r#"<div role="tabpanel" id="outer2" hidden="hidden">"#,
        r#"<div class="accordion">"#,
        r#"<details id="inner1"><summary>X</summary>x</details>"#,
        r#"<details id="inner2"><summary>Y</summary><p id="sec3">target</p></details>"#,
        r#"</div>"#,
        r#"</div>"#,
        r#"</div>"#,
    );

    fn registry(markup: &str) -> (Document, DisclosureRegistry) {
        let doc = parse_fragment(markup).unwrap();
        let registry = DisclosureRegistry::decorate(&doc, &RegistryOptions::default());
        (doc, registry)
    }

    fn id(registry: &DisclosureRegistry, anchor: &str) -> ContainerId {
        registry.container_by_anchor(anchor).unwrap()
    }

    fn recorder(registry: &mut DisclosureRegistry) -> Rc<RefCell<Vec<VisibilityChange>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        registry.subscribe(move |change| sink.borrow_mut().push(change.clone()));
        log
    }

    #[test]
    fn test_decorate_discovers_all_kinds() {
        let (_, registry) = registry(NESTED);
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.groups().count(), 2);
        let outer = registry.container(id(&registry, "outer1")).unwrap();
        assert_eq!(outer.kind(), ContainerKind::TabPanel);
        let inner = registry.container(id(&registry, "inner2")).unwrap();
        assert_eq!(inner.kind(), ContainerKind::AccordionSection);
    }

    #[test]
    fn test_initial_state_from_markup() {
        let (_, registry) = registry(NESTED);
        assert!(registry.is_visible(id(&registry, "outer1")));
        assert!(!registry.is_visible(id(&registry, "outer2")));
        assert!(!registry.is_visible(id(&registry, "inner1")));
    }

    #[test]
    fn test_tabs_without_active_panel_activate_first() {
        let markup = concat!(
            r#"<div class="tabs">"#,
            r#"<div role="tabpanel" id="p1" hidden="hidden">1</div>"#,
            r#"<div role="tabpanel" id="p2" hidden="hidden">2</div>"#,
            r#"</div>"#,
        );
        let (_, registry) = registry(markup);
        assert!(registry.is_visible(id(&registry, "p1")));
        assert!(!registry.is_visible(id(&registry, "p2")));
    }

    #[test]
    fn test_accordion_with_several_open_keeps_first() {
        let markup = concat!(
            r#"<div class="accordion">"#,
            r#"<details id="a" open="open"><summary>A</summary></details>"#,
            r#"<details id="b" open="open"><summary>B</summary></details>"#,
            r#"</div>"#,
        );
        let (_, registry) = registry(markup);
        assert!(registry.is_visible(id(&registry, "a")));
        assert!(!registry.is_visible(id(&registry, "b")));
    }

    #[test]
    fn test_accordion_mutual_exclusion() {
        let (_, mut registry) = registry(ACCORDION);
        let (a, b, c) = (id(&registry, "a"), id(&registry, "b"), id(&registry, "c"));

        registry.set_visible(a, true);
        registry.set_visible(b, true);

        assert!(!registry.is_visible(a));
        assert!(registry.is_visible(b));
        assert!(!registry.is_visible(c));
    }

    #[test]
    fn test_set_visible_is_idempotent() {
        let (_, mut registry) = registry(ACCORDION);
        let b = id(&registry, "b");
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        registry.on_visibility_change(b, move |_| *counter.borrow_mut() += 1);

        assert!(registry.set_visible(b, true));
        assert!(!registry.set_visible(b, true));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_listener_receives_new_state() {
        let (_, mut registry) = registry(ACCORDION);
        let a = id(&registry, "a");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        registry.on_visibility_change(a, move |change| sink.borrow_mut().push(change.visible));

        registry.set_visible(a, true);
        registry.set_visible(a, false);
        registry.set_visible(a, false);

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_implicit_close_notifies_sibling() {
        let (_, mut registry) = registry(ACCORDION);
        let (a, b) = (id(&registry, "a"), id(&registry, "b"));
        registry.set_visible(a, true);
        let log = recorder(&mut registry);

        registry.set_visible_by_user(b, true);

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].container, a);
        assert!(!log[0].visible);
        assert_eq!(log[0].cause, ChangeCause::Implicit);
        assert_eq!(log[1].container, b);
        assert_eq!(log[1].cause, ChangeCause::User);
        assert_eq!(log[1].anchor_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_collapsible_accordion_can_close_all() {
        let (_, mut registry) = registry(ACCORDION);
        let a = id(&registry, "a");
        registry.set_visible(a, true);
        assert!(registry.set_visible(a, false));
        assert!(registry.containers().all(|(_, c)| !c.is_visible()));
    }

    #[test]
    fn test_non_collapsible_accordion_keeps_one_open() {
        let doc = parse_fragment(ACCORDION).unwrap();
        let options = RegistryOptions {
            collapsible: false,
            ..RegistryOptions::default()
        };
        let mut registry = DisclosureRegistry::decorate(&doc, &options);
        let (a, b) = (id(&registry, "a"), id(&registry, "b"));

        assert!(registry.is_visible(a));
        assert!(!registry.set_visible(a, false));
        assert!(registry.set_visible(b, true));
        assert!(!registry.is_visible(a));
    }

    #[test]
    fn test_tab_activation_deactivates_previous() {
        let (_, mut registry) = registry(NESTED);
        let (one, two) = (id(&registry, "outer1"), id(&registry, "outer2"));
        let log = recorder(&mut registry);

        assert!(registry.set_visible(two, true));

        assert!(!registry.is_visible(one));
        assert!(registry.is_visible(two));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_active_tab_cannot_be_closed_directly() {
        let (_, mut registry) = registry(NESTED);
        let one = id(&registry, "outer1");
        assert!(!registry.set_visible(one, false));
        assert!(registry.is_visible(one));
    }

    #[test]
    fn test_find_containers_for_nested_target() {
        let (doc, registry) = registry(NESTED);
        let chain = registry.find_containers_for(&doc, "sec3");
        assert_eq!(chain, vec![id(&registry, "inner2"), id(&registry, "outer2")]);
    }

    #[test]
    fn test_find_containers_for_container_anchor() {
        let (doc, registry) = registry(NESTED);
        let chain = registry.find_containers_for(&doc, "inner1");
        assert_eq!(chain, vec![id(&registry, "inner1"), id(&registry, "outer2")]);
    }

    #[test]
    fn test_find_containers_for_tab_button() {
        let (doc, registry) = registry(NESTED);
        let chain = registry.find_containers_for(&doc, "t2");
        assert_eq!(chain, vec![id(&registry, "outer2")]);
    }

    #[test]
    fn test_find_containers_for_unknown_or_outside() {
        let (doc, registry) = registry(&format!("<p id=\"prose\">text</p>{NESTED}"));
        assert!(registry.find_containers_for(&doc, "prose").is_empty());
        assert!(registry.find_containers_for(&doc, "doesNotExist").is_empty());
    }

    #[test]
    fn test_unknown_container_is_ignored() {
        let mut registry = DisclosureRegistry::new();
        assert!(!registry.set_visible(ContainerId(7), true));
        assert!(!registry.is_visible(ContainerId(7)));
    }

    #[test]
    fn test_add_group_by_hand() {
        let mut doc = Document::new();
        let first = doc.create_element("div");
        let second = doc.create_element("div");
        let mut registry = DisclosureRegistry::new();
        let group = registry.add_group(
            ContainerKind::TabPanel,
            GroupSpec {
                element: None,
                sections: vec![
                    SectionSpec {
                        element: first,
                        header: None,
                        anchor_id: Some("one".to_owned()),
                        visible: false,
                    },
                    SectionSpec {
                        element: second,
                        header: None,
                        anchor_id: None,
                        visible: false,
                    },
                ],
                collapsible: true,
            },
        );

        let group = registry.group(group).unwrap();
        assert!(!group.is_collapsible());
        assert_eq!(group.members().len(), 2);
        assert!(registry.is_visible(registry.container_by_anchor("one").unwrap()));
        assert_eq!(registry.container_for_element(second), Some(group.members()[1]));
    }

    #[test]
    fn test_apply_writes_state_to_markup() {
        let (mut doc, mut registry) = registry(NESTED);
        registry.set_visible(id(&registry, "outer2"), true);
        registry.set_visible(id(&registry, "inner2"), true);

        registry.apply(&mut doc);

        let html = serialize(&doc);
        assert!(html.contains(r#"<div role="tabpanel" id="outer1" hidden="hidden">"#));
        assert!(html.contains(r#"<div role="tabpanel" id="outer2">"#));
        assert!(html.contains(r#"<details id="inner2" open="open">"#));
        assert!(html.contains(r#"id="t2" aria-controls="outer2" aria-selected="true" tabindex="0""#));
    }
}
