//! Navigation between the address fragment and disclosure state.
//!
//! - [`NavigationResolver`]: resolves `#identifier` fragments to elements
//!   and opens every enclosing accordion section and tab panel, innermost
//!   to outermost
//! - [`AddressBar`]: shared single-threaded fragment holder, rewritten when
//!   the user opens a container that has an anchor
//!
//! # Example
//!
//! ```
//! use unfold_disclosure::{DisclosureRegistry, RegistryOptions};
//! use unfold_dom::parse_fragment;
//! use unfold_nav::{AddressBar, NavigationResolver};
//!
//! let doc = parse_fragment(concat!(
//!     r#"<div class="accordion">"#,
//!     r#"<details id="faq"><summary>FAQ</summary><p id="answer">42</p></details>"#,
//!     r#"</div>"#,
//! ))
//! .unwrap();
//! let mut registry = DisclosureRegistry::decorate(&doc, &RegistryOptions::default());
//! let resolver = NavigationResolver::new(AddressBar::with_fragment("#answer"));
//! resolver.attach(&mut registry);
//!
//! let target = resolver.load(&doc, &mut registry).unwrap();
//! assert!(registry.is_visible(target.chain[0]));
//! ```

mod address;
mod resolver;

pub use address::AddressBar;
pub use resolver::{NavigationResolver, NavigationTarget};
