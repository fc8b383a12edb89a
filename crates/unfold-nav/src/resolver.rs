//! Fragment resolution and UI-to-URL binding.

use percent_encoding::percent_decode_str;
use unfold_disclosure::{ChangeCause, ContainerId, DisclosureRegistry};
use unfold_dom::{Document, NodeId};
use unfold_outline::TocEntry;

use crate::address::AddressBar;

/// Element a fragment resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationTarget {
    /// Identifier that matched (as written, or percent-decoded).
    pub anchor_id: String,
    /// Target element, for the host to scroll to and focus.
    pub element: NodeId,
    /// Enclosing containers, innermost first.
    pub chain: Vec<ContainerId>,
    /// Containers that were closed and got opened by the resolution.
    pub opened: Vec<ContainerId>,
}

/// Opens the disclosure containers around fragment targets and mirrors
/// user toggles into the address bar.
///
/// Binding is one-way in each direction: a resolution never writes the
/// fragment, and writing the fragment from a toggle never triggers a
/// resolution.
#[derive(Clone, Debug)]
pub struct NavigationResolver {
    address: AddressBar,
}

impl NavigationResolver {
    /// Create a resolver bound to `address`.
    #[must_use]
    pub fn new(address: AddressBar) -> Self {
        Self { address }
    }

    /// Address bar this resolver reads and writes.
    #[must_use]
    pub fn address(&self) -> &AddressBar {
        &self.address
    }

    /// Subscribe to the registry so user-opened containers with an anchor
    /// rewrite the fragment. Call once per registry.
    pub fn attach(&self, registry: &mut DisclosureRegistry) {
        let address = self.address.clone();
        registry.subscribe(move |change| {
            if change.cause != ChangeCause::User || !change.visible {
                return;
            }
            if let Some(anchor) = &change.anchor_id {
                address.replace_fragment(anchor);
            }
        });
    }

    /// Resolve `fragment` and open every container on the path to its
    /// target, innermost to outermost.
    ///
    /// Empty and unknown fragments resolve to `None` without touching the
    /// registry.
    pub fn resolve(
        &self,
        doc: &Document,
        registry: &mut DisclosureRegistry,
        fragment: &str,
    ) -> Option<NavigationTarget> {
        let Some(raw) = fragment_id(fragment) else {
            tracing::trace!("Empty fragment, nothing to resolve");
            return None;
        };
        let Some((anchor_id, element)) = find_target(doc, raw) else {
            tracing::debug!(fragment = %raw, "Fragment target not found");
            return None;
        };

        let chain = registry.containers_enclosing(doc, element);
        let opened: Vec<ContainerId> = chain
            .iter()
            .copied()
            .filter(|&id| registry.set_visible_with(id, true, ChangeCause::Navigation))
            .collect();

        tracing::debug!(
            fragment = %anchor_id,
            containers = chain.len(),
            opened = opened.len(),
            "Fragment resolved"
        );
        Some(NavigationTarget {
            anchor_id,
            element,
            chain,
            opened,
        })
    }

    /// Resolve the fragment present when the page loads.
    pub fn load(
        &self,
        doc: &Document,
        registry: &mut DisclosureRegistry,
    ) -> Option<NavigationTarget> {
        let fragment = self.address.fragment();
        self.resolve(doc, registry, &fragment)
    }

    /// Handle a fragment change coming from outside (link click, history
    /// navigation, manual edit).
    pub fn on_fragment_change(
        &self,
        doc: &Document,
        registry: &mut DisclosureRegistry,
        fragment: &str,
    ) -> Option<NavigationTarget> {
        let fragment = self.address.navigate(fragment);
        self.resolve(doc, registry, &fragment)
    }

    /// Follow a table of contents link.
    pub fn follow_toc_link(
        &self,
        doc: &Document,
        registry: &mut DisclosureRegistry,
        entry: &TocEntry,
    ) -> Option<NavigationTarget> {
        self.on_fragment_change(doc, registry, &entry.id)
    }

    /// Activate a container as if its header was clicked.
    ///
    /// Once [`attach`](Self::attach)ed, the container anchor becomes the
    /// address fragment.
    pub fn activate(&self, registry: &mut DisclosureRegistry, container: ContainerId) -> bool {
        registry.set_visible_by_user(container, true)
    }
}

/// Identifier named by a fragment, without `#`. `None` when empty.
fn fragment_id(fragment: &str) -> Option<&str> {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    (!raw.is_empty()).then_some(raw)
}

/// Element named by `raw`, tried as written first and percent-decoded
/// second, with the identifier that matched.
fn find_target(doc: &Document, raw: &str) -> Option<(String, NodeId)> {
    if let Some(element) = doc.find_anchor(raw) {
        return Some((raw.to_owned(), element));
    }
    let decoded = percent_decode_str(raw).decode_utf8_lossy();
    if decoded == raw {
        return None;
    }
    doc.find_anchor(&decoded)
        .map(|element| (decoded.into_owned(), element))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use unfold_disclosure::{RegistryOptions, VisibilityChange};
    use unfold_dom::parse_fragment;

    use super::*;

    const PAGE: &str = concat!(
        r#"<h1 id="top">Guide</h1>"#,
        r#"<div class="tabs" id="tabs-0">"#,
        r#"<div role="tablist">"#,
        r#"<button role="tab" id="tab-a" aria-controls="tabA">A</button>"#,
        r#"<button role="tab" id="tab-x" aria-controls="tabX">X</button>"#,
        r#"</div>"#,
        r#"<div role="tabpanel" id="tabA">alpha</div>"#,
        r#"<div role="tabpanel" id="tabX" hidden="hidden">"#,
        r#"<div class="accordion">"#,
        r#"<details id="acc1"><summary>One</summary>one</details>"#,
        r#"<details id="acc2"><summary>Two</summary><p id="sec3">Nested section</p>"#,
        r#"<a name="legacy"></a></details>"#,
        r#"</div>"#,
        r#"</div>"#,
        r#"</div>"#,
        r#"<p id="café">accent</p>"#,
    );

    fn setup(address: &AddressBar) -> (Document, DisclosureRegistry, NavigationResolver) {
        let doc = parse_fragment(PAGE).unwrap();
        let mut registry = DisclosureRegistry::decorate(&doc, &RegistryOptions::default());
        let resolver = NavigationResolver::new(address.clone());
        resolver.attach(&mut registry);
        (doc, registry, resolver)
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
    fn test_resolve_nested_target_opens_chain() {
        let address = AddressBar::new();
        let (doc, mut registry, resolver) = setup(&address);

        let target = resolver.resolve(&doc, &mut registry, "#sec3").unwrap();

        let (acc2, tab_x) = (id(&registry, "acc2"), id(&registry, "tabX"));
        assert_eq!(target.chain, vec![acc2, tab_x]);
        assert_eq!(target.opened, vec![acc2, tab_x]);
        assert_eq!(Some(target.element), doc.find_by_id("sec3"));
        assert!(registry.is_visible(acc2));
        assert!(registry.is_visible(tab_x));
        assert!(!registry.is_visible(id(&registry, "tabA")));
    }

    #[test]
    fn test_resolve_opens_innermost_first() {
        let address = AddressBar::new();
        let (doc, mut registry, resolver) = setup(&address);
        let log = recorder(&mut registry);

        resolver.resolve(&doc, &mut registry, "#sec3");

        let opened: Vec<_> = log
            .borrow()
            .iter()
            .filter(|c| c.visible)
            .map(|c| (c.anchor_id.clone(), c.cause))
            .collect();
        assert_eq!(
            opened,
            vec![
                (Some("acc2".to_owned()), ChangeCause::Navigation),
                (Some("tabX".to_owned()), ChangeCause::Navigation),
            ]
        );
    }

    #[test]
    fn test_resolve_does_not_write_fragment() {
        let address = AddressBar::new();
        let (doc, mut registry, resolver) = setup(&address);

        resolver.resolve(&doc, &mut registry, "#sec3");

        assert_eq!(address.fragment(), "");
        assert!(address.history().is_empty());
    }

    #[test]
    fn test_unknown_fragment_is_noop() {
        let address = AddressBar::new();
        let (doc, mut registry, resolver) = setup(&address);
        let log = recorder(&mut registry);

        assert_eq!(resolver.resolve(&doc, &mut registry, "#doesNotExist"), None);

        assert!(log.borrow().is_empty());
        assert!(registry.is_visible(id(&registry, "tabA")));
    }

    #[test]
    fn test_empty_fragment_is_noop() {
        let address = AddressBar::new();
        let (doc, mut registry, resolver) = setup(&address);
        assert_eq!(resolver.resolve(&doc, &mut registry, ""), None);
        assert_eq!(resolver.resolve(&doc, &mut registry, "#"), None);
        assert_eq!(resolver.load(&doc, &mut registry), None);
    }

    #[test]
    fn test_target_outside_containers() {
        let address = AddressBar::new();
        let (doc, mut registry, resolver) = setup(&address);
        let target = resolver.resolve(&doc, &mut registry, "top").unwrap();
        assert!(target.chain.is_empty());
        assert!(target.opened.is_empty());
    }

    #[test]
    fn test_already_open_chain_opens_nothing() {
        let address = AddressBar::new();
        let (doc, mut registry, resolver) = setup(&address);
        resolver.resolve(&doc, &mut registry, "#sec3");

        let again = resolver.resolve(&doc, &mut registry, "#sec3").unwrap();

        assert_eq!(again.chain.len(), 2);
        assert!(again.opened.is_empty());
    }

    #[test]
    fn test_named_anchor_fallback() {
        let address = AddressBar::new();
        let (doc, mut registry, resolver) = setup(&address);
        let target = resolver.resolve(&doc, &mut registry, "#legacy").unwrap();
        assert_eq!(target.chain.len(), 2);
        assert!(registry.is_visible(id(&registry, "acc2")));
    }

    #[test]
    fn test_percent_encoded_fragment() {
        let address = AddressBar::new();
        let (doc, mut registry, resolver) = setup(&address);
        let target = resolver.resolve(&doc, &mut registry, "#caf%C3%A9").unwrap();
        assert_eq!(target.anchor_id, "café");
        assert_eq!(Some(target.element), doc.find_by_id("café"));
    }

    #[test]
    fn test_literal_percent_id_round_trip() {
        let markup = concat!(
            r#"<div class="tabs">"#,
            r#"<div role="tabpanel" id="all">all</div>"#,
            r#"<div role="tabpanel" id="50%25off" hidden="hidden">sale</div>"#,
            r#"</div>"#,
        );
        let doc = parse_fragment(markup).unwrap();
        let address = AddressBar::new();
        let mut registry = DisclosureRegistry::decorate(&doc, &RegistryOptions::default());
        let resolver = NavigationResolver::new(address.clone());
        resolver.attach(&mut registry);
        let sale = id(&registry, "50%25off");
        resolver.activate(&mut registry, sale);
        assert_eq!(address.fragment(), "#50%25off");

        let mut fresh = DisclosureRegistry::decorate(&doc, &RegistryOptions::default());
        let reloaded = NavigationResolver::new(AddressBar::with_fragment(&address.fragment()));
        let target = reloaded.load(&doc, &mut fresh).unwrap();

        assert_eq!(target.anchor_id, "50%25off");
        assert!(fresh.is_visible(id(&fresh, "50%25off")));
        assert!(!fresh.is_visible(id(&fresh, "all")));
    }

    #[test]
    fn test_user_activation_updates_fragment() {
        let address = AddressBar::new();
        let (_, mut registry, resolver) = setup(&address);

        let tab_x = id(&registry, "tabX");
        assert!(resolver.activate(&mut registry, tab_x));

        assert_eq!(address.fragment(), "#tabX");
    }

    #[test]
    fn test_implicit_close_does_not_write_fragment() {
        let address = AddressBar::new();
        let (_, mut registry, resolver) = setup(&address);

        let tab_x = id(&registry, "tabX");
        resolver.activate(&mut registry, tab_x);

        assert_eq!(address.history(), vec!["#tabX"]);
    }

    #[test]
    fn test_user_close_keeps_fragment() {
        let address = AddressBar::new();
        let (_, mut registry, resolver) = setup(&address);
        let acc1 = id(&registry, "acc1");
        resolver.activate(&mut registry, acc1);

        assert!(registry.set_visible_by_user(acc1, false));

        assert_eq!(address.fragment(), "#acc1");
    }

    #[test]
    fn test_fragment_round_trip_reopens_container() {
        let address = AddressBar::new();
        let (_, mut registry, resolver) = setup(&address);
        let tab_x = id(&registry, "tabX");
        resolver.activate(&mut registry, tab_x);

        let reloaded = AddressBar::with_fragment(&address.fragment());
        let (doc, mut fresh, resolver) = setup(&reloaded);
        assert!(!fresh.is_visible(id(&fresh, "tabX")));

        resolver.load(&doc, &mut fresh).unwrap();

        assert!(fresh.is_visible(id(&fresh, "tabX")));
        assert!(!fresh.is_visible(id(&fresh, "tabA")));
    }

    #[test]
    fn test_on_fragment_change_records_and_resolves() {
        let address = AddressBar::new();
        let (doc, mut registry, resolver) = setup(&address);

        let target = resolver.on_fragment_change(&doc, &mut registry, "#acc1");

        assert!(target.is_some());
        assert_eq!(address.fragment(), "#acc1");
        assert!(registry.is_visible(id(&registry, "acc1")));
    }

    #[test]
    fn test_follow_toc_link() {
        let address = AddressBar::new();
        let (doc, mut registry, resolver) = setup(&address);
        let entry = TocEntry {
            level: 1,
            number: "1".to_owned(),
            title: "Nested section".to_owned(),
            id: "sec3".to_owned(),
        };

        let target = resolver.follow_toc_link(&doc, &mut registry, &entry).unwrap();

        assert_eq!(target.anchor_id, "sec3");
        assert_eq!(address.fragment(), "#sec3");
        assert!(registry.is_visible(id(&registry, "tabX")));
    }
}
