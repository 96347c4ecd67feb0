//! DOM Operations Adapter
//!
//! The few document reads the extractor needs, on top of `dom_query`.
//! Parsing goes through html5ever's tree builder, which recovers from any
//! malformed input instead of failing.

pub use dom_query::{Document, Selection};

/// Parse an HTML string into a document.
///
/// Never fails: unclosed tags, bad nesting and stray text all produce a
/// best-effort tree. Parse errors are recovered silently.
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> String {
    sel.text().to_string()
}

/// Text content of the first element matching `tag`, if there is one.
#[must_use]
pub fn first_text(doc: &Document, tag: &str) -> Option<String> {
    doc.select(tag)
        .nodes()
        .first()
        .map(|node| text_content(&Selection::from(*node)))
}
