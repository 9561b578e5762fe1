//! XML front end: builds the [`Tag`] tree that the converters consume.

use std::collections::HashMap;

use log::trace;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;

use crate::{Error, Tag};

/// Parse an SVG string into a document tree.
///
/// Returns the first top-level element (usually `<svg>`). A document
/// without any element yields an empty tag that converts to nothing.
pub(crate) fn parse_document(svg: &str) -> Result<Tag, Error> {
    trace!("parse_document");

    let mut reader = quick_xml::Reader::from_str(svg);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Tag> = Vec::new();
    let mut root: Option<Tag> = None;
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref e) => {
                trace!("parse_document: Start of {:?}", e.name());
                stack.push(tag_from_element(e));
            }
            Event::Empty(ref e) => {
                trace!("parse_document: Empty element {:?}", e.name());
                let tag = tag_from_element(e);
                attach(&mut stack, &mut root, tag);
            }
            Event::End(_) => {
                if let Some(tag) = stack.pop() {
                    attach(&mut stack, &mut root, tag);
                }
            }
            Event::Eof => break,
            _ => {}
        }

        // If we don't keep a borrow elsewhere, we can clear the buffer to keep memory usage low
        buf.clear();
    }

    // Elements left unclosed at the end of input still become part of the tree.
    while let Some(tag) = stack.pop() {
        attach(&mut stack, &mut root, tag);
    }

    Ok(root.unwrap_or_default())
}

/// Attach a finished tag to its parent, or make it the document root.
fn attach(stack: &mut Vec<Tag>, root: &mut Option<Tag>, tag: Tag) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(tag);
    } else if root.is_none() {
        *root = Some(tag);
    }
}

fn tag_from_element(element: &BytesStart) -> Tag {
    let name = String::from_utf8_lossy(element.name()).into_owned();
    let mut attributes = HashMap::new();
    for attr in element.attributes().filter_map(Result::ok) {
        let key = String::from_utf8_lossy(attr.key).into_owned();
        let value = attr
            .unescaped_value()
            .map(|v| String::from_utf8_lossy(&v).into_owned())
            .unwrap_or_default();
        // The first occurrence of an attribute wins.
        attributes.entry(key).or_insert(value);
    }
    Tag {
        name,
        attributes,
        children: Vec::new(),
    }
}
