//! HTML Meta Tag Collection
//!
//! Builds the identifier → content lookup that the preview accessors read.
//! The identifier of a `<meta>` tag is its `name` attribute, or its
//! `property` attribute when `name` is missing or empty. This covers both
//! standard tags (`name="description"`) and Open Graph tags
//! (`property="og:title"`).

use std::collections::HashMap;

use dom_query::{Document, Selection};

use crate::dom;

/// Open Graph title.
pub const OG_TITLE: &str = "og:title";
/// Open Graph description.
pub const OG_DESCRIPTION: &str = "og:description";
/// Open Graph canonical URL.
pub const OG_URL: &str = "og:url";
/// Open Graph image.
pub const OG_IMAGE: &str = "og:image";
/// Standard meta description.
pub const DESCRIPTION: &str = "description";

/// Meta tag identifier → content lookup for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaTable {
    entries: HashMap<String, String>,
}

impl MetaTable {
    /// Collect every `<meta>` tag of a document, in document order.
    ///
    /// Tags with no usable identifier are skipped. A missing `content`
    /// attribute is stored as an empty string. When two tags share an
    /// identifier the later one wins.
    #[must_use]
    pub fn from_document(doc: &Document) -> Self {
        let mut entries = HashMap::new();

        for node in doc.select("meta").nodes() {
            let meta = Selection::from(*node);

            let identifier = dom::get_attribute(&meta, "name")
                .filter(|name| !name.is_empty())
                .or_else(|| dom::get_attribute(&meta, "property"))
                .unwrap_or_default();

            if identifier.is_empty() {
                continue;
            }

            let content = dom::get_attribute(&meta, "content").unwrap_or_default();
            entries.insert(identifier, content);
        }

        Self { entries }
    }

    /// Content stored for `identifier`, including empty content.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.entries.get(identifier).map(String::as_str)
    }

    /// Content stored for `identifier`, treating empty content as absent.
    #[must_use]
    pub fn non_empty(&self, identifier: &str) -> Option<&str> {
        self.get(identifier).filter(|content| !content.is_empty())
    }

    /// Number of distinct identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document had no usable meta tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(identifier, content)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
