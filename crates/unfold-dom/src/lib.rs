//! Page document model for unfold.
//!
//! The decorated pages are handled as a mutable tree of elements and text:
//! - [`Document`]: arena tree with parent links, anchor lookup and traversal
//! - [`parse_fragment`]: XHTML reader built on `quick-xml`
//! - [`serialize`]: writes the (annotated) tree back to markup
//!
//! # Example
//!
//! ```
//! use unfold_dom::{parse_fragment, serialize};
//!
//! let mut doc = parse_fragment(r#"<h2>Intro</h2>"#).unwrap();
//! let h2 = doc.elements_by_tag("h2").next().unwrap();
//! doc.set_attr(h2, "id", "intro");
//!
//! assert_eq!(serialize(&doc), r#"<h2 id="intro">Intro</h2>"#);
//! ```

mod document;
mod entities;
mod error;
mod parser;
mod serializer;

pub use document::{Ancestors, Descendants, Document, Element, NodeId, NodeKind};
pub use error::ParseError;
pub use parser::parse_fragment;
pub use serializer::{escape_attr, escape_text, serialize, serialize_subtree};
