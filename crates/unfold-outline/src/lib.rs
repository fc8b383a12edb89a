//! Numbered outline (table of contents) indexer.
//!
//! Scans headings in document order and builds a nested outline with
//! hierarchical numbers (`2.1.3`) and stable anchors (`heading_2_1_3`).
//!
//! # Architecture
//!
//! - [`OutlineBuilder`]: the stack-based numbering algorithm over
//!   [`HeadingSource`] values, independent of any markup
//! - [`index_document`]: runs the builder over a parsed [`unfold_dom::Document`]
//!   and annotates the headings (ids, number labels)
//! - [`Outline`]: the resulting tree with lookups and TOC rendering
//!
//! # Example
//!
//! ```
//! use unfold_outline::{HeadingSource, build_outline};
//!
//! let outline = build_outline(vec![
//!     HeadingSource::new(1, "Install"),
//!     HeadingSource::new(2, "macOS"),
//!     HeadingSource::new(2, "Linux"),
//! ]);
//!
//! let entries = outline.toc_entries();
//! assert_eq!(entries[2].number, "1.2");
//! assert_eq!(entries[2].id, "heading_1_2");
//! ```

mod builder;
mod document;
mod outline;
mod path;

pub use builder::{DEFAULT_ANCHOR_PREFIX, HeadingSource, OutlineBuilder, build_outline};
pub use document::{NUMBER_LABEL_CLASS, OutlineOptions, index_document};
pub use outline::{Heading, Outline, OutlineNode, TocEntry};
pub use path::NumberPath;
