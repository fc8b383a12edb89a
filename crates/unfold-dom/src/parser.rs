//! XHTML reader producing a [`Document`].

use std::borrow::Cow;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::document::{Document, NodeId};
use crate::entities::{convert_html_entities, decode_entity};
use crate::error::ParseError;

/// Wrapper element so fragments with several top-level nodes parse.
const WRAPPER: &str = "unfold-root";

/// Parse an XHTML fragment into a [`Document`].
///
/// The markup may contain several top-level elements and text. Attributes
/// follow HTML rules (valueless `hidden` or `open` are accepted) and HTML
/// named entities are converted before parsing; comments, processing instructions
/// and doctype declarations are dropped.
///
/// # Errors
///
/// Returns an error if the markup is not well-formed XML.
///
/// # Example
///
/// ```
/// let doc = unfold_dom::parse_fragment("<h2 id=\"a\">One</h2><p>Two</p>").unwrap();
/// let h2 = doc.find_by_id("a").unwrap();
/// assert_eq!(doc.text_content(h2), "One");
/// ```
pub fn parse_fragment(markup: &str) -> Result<Document, ParseError> {
    let markup = convert_html_entities(markup);
    let wrapped = format!("<{WRAPPER}>{markup}</{WRAPPER}>");

    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    let mut doc = Document::new();
    build(&mut reader, &mut doc)?;
    Ok(doc)
}

fn build<R: BufRead>(reader: &mut Reader<R>, doc: &mut Document) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    // Open elements; the wrapper maps onto the document root.
    let mut stack: Vec<NodeId> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if stack.is_empty() {
                    stack.push(doc.root());
                } else {
                    let node = create_element(reader, doc, &e);
                    doc.append_child(current(&stack, doc), node);
                    stack.push(node);
                }
            }
            Event::Empty(e) => {
                let node = create_element(reader, doc, &e);
                if let Some(el) = doc.element_mut(node) {
                    el.self_closing = true;
                }
                doc.append_child(current(&stack, doc), node);
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                doc.append_text(current(&stack, doc), &text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                doc.append_text(current(&stack, doc), &decode_entity(&entity));
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                doc.append_text(current(&stack, doc), &text);
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => return Ok(()),
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

fn current(stack: &[NodeId], doc: &Document) -> NodeId {
    stack.last().copied().unwrap_or_else(|| doc.root())
}

fn create_element<R: BufRead>(reader: &Reader<R>, doc: &mut Document, e: &BytesStart<'_>) -> NodeId {
    let node = doc.create_element(decode_lossy(reader, e.name().as_ref()));
    for attr in e.html_attributes().flatten() {
        let key = decode_lossy(reader, attr.key.as_ref());
        let value = attr
            .unescape_value()
            .map_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned(), Cow::into_owned);
        doc.set_attr(node, &key, value);
    }
    node
}

fn decode_lossy<R: BufRead>(reader: &Reader<R>, bytes: &[u8]) -> String {
    reader
        .decoder()
        .decode(bytes)
        .map_or_else(|_| String::from_utf8_lossy(bytes).into_owned(), Cow::into_owned)
}
