//! In-memory model of the browser address bar fragment.

use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to the current address fragment.
///
/// Clones share the same state, so the resolver's subscription and the host
/// see the same fragment. Fragments are stored with their leading `#`; an
/// empty fragment (or a bare `#`) is stored as the empty string.
#[derive(Clone, Debug, Default)]
pub struct AddressBar {
    state: Rc<RefCell<AddressState>>,
}

#[derive(Debug, Default)]
struct AddressState {
    fragment: String,
    history: Vec<String>,
}

impl AddressBar {
    /// Create an address bar with an empty fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an address bar holding `fragment` on page load.
    #[must_use]
    pub fn with_fragment(fragment: &str) -> Self {
        let bar = Self::new();
        bar.state.borrow_mut().fragment = normalize(fragment);
        bar
    }

    /// Current fragment, including the leading `#`.
    #[must_use]
    pub fn fragment(&self) -> String {
        self.state.borrow().fragment.clone()
    }

    /// Rewrite the fragment without triggering resolution (UI to URL).
    ///
    /// Writing the current fragment again is not recorded in the history.
    pub fn replace_fragment(&self, fragment: &str) {
        let fragment = normalize(fragment);
        let mut state = self.state.borrow_mut();
        if state.fragment == fragment {
            return;
        }
        tracing::trace!(%fragment, "Address fragment replaced");
        state.history.push(fragment.clone());
        state.fragment = fragment;
    }

    /// Record an external fragment change and return the fragment to resolve.
    pub fn navigate(&self, fragment: &str) -> String {
        let fragment = normalize(fragment);
        self.state.borrow_mut().fragment.clone_from(&fragment);
        fragment
    }

    /// Fragments written by [`replace_fragment`](Self::replace_fragment),
    /// oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state.borrow().history.clone()
    }
}

fn normalize(fragment: &str) -> String {
    let id = fragment.strip_prefix('#').unwrap_or(fragment);
    if id.is_empty() {
        String::new()
    } else {
        format!("#{id}")
    }
}
