//! Link preview extraction.
//!
//! [`PreviewExtractor`] owns the source URL and the last successfully
//! fetched page. A page is the parsed document together with its meta
//! table; both are replaced as one value, and a failed fetch leaves the
//! previous page in place.

use std::fmt;

use crate::dom::{self, Document};
use crate::encoding;
use crate::error::{Error, Result};
use crate::meta::{MetaTable, DESCRIPTION, OG_DESCRIPTION, OG_IMAGE, OG_TITLE, OG_URL};
use crate::options::FetchOptions;
use crate::result::Preview;
use crate::text;
use crate::transport::{Body, HttpTransport, Transport};

/// Parsed document and the meta table built from it.
struct Page {
    document: Document,
    meta: MetaTable,
}

impl Page {
    fn parse(body: &Body) -> Self {
        let (html, used) = encoding::transcode_to_utf8(&body.bytes, body.content_type.as_deref());
        let document = dom::parse(&html);
        let meta = MetaTable::from_document(&document);

        tracing::debug!(
            bytes = body.bytes.len(),
            encoding = used.name(),
            meta_tags = meta.len(),
            "parsed page"
        );

        Self { document, meta }
    }
}

/// Fetches a page and answers link preview queries about it.
///
/// # Example
///
/// ```rust
/// use link_preview::PreviewExtractor;
///
/// let mut extractor = PreviewExtractor::new(None);
/// extractor.load_html(
///     Some("https://example.com/post"),
///     br#"<html><head>
///         <meta property="og:title" content="Hello">
///         <meta name="description" content="A post">
///     </head></html>"#,
/// );
///
/// assert_eq!(extractor.title(), "Hello");
/// assert_eq!(extractor.description(), "A post");
/// assert_eq!(extractor.url(), "https://example.com/post");
/// assert!(!extractor.has_image());
/// ```
pub struct PreviewExtractor<T = HttpTransport> {
    source: Option<String>,
    page: Option<Page>,
    options: FetchOptions,
    transport: T,
}

impl PreviewExtractor<HttpTransport> {
    /// Create an extractor with default options, fetching `url` right away
    /// when one is given.
    ///
    /// The outcome of that first fetch is observable through
    /// [`is_loaded`](Self::is_loaded).
    #[must_use]
    pub fn new(url: Option<&str>) -> Self {
        Self::with_options(url, FetchOptions::default())
    }

    /// Like [`new`](Self::new), with custom fetch options.
    #[must_use]
    pub fn with_options(url: Option<&str>, options: FetchOptions) -> Self {
        let transport = HttpTransport::new(&options);
        Self::with_transport(url, options, transport)
    }
}

impl<T: Transport> PreviewExtractor<T> {
    /// Create an extractor that fetches through `transport`.
    ///
    /// Fetches `url` immediately when one is given.
    pub fn with_transport(url: Option<&str>, options: FetchOptions, transport: T) -> Self {
        let mut extractor = Self {
            source: None,
            page: None,
            options,
            transport,
        };

        if let Some(url) = url.filter(|u| !u.is_empty()) {
            extractor.source = Some(url.to_string());
            extractor.fetch(None);
        }

        extractor
    }

    /// Fetch and parse a page, returning whether the transport succeeded.
    ///
    /// A non-empty `url` replaces the stored source URL before anything
    /// else happens, even if the fetch then fails. With no URL given and
    /// none stored, returns `false` without side effects.
    ///
    /// Markup quality has no effect on the result: any body the transport
    /// delivers is parsed and counts as success.
    pub fn fetch(&mut self, url: Option<&str>) -> bool {
        self.try_fetch(url).is_ok()
    }

    /// Same as [`fetch`](Self::fetch), reporting why a fetch failed.
    pub fn try_fetch(&mut self, url: Option<&str>) -> Result<()> {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            self.source = Some(url.to_string());
        }

        let source = self.source.as_deref().ok_or(Error::MissingUrl)?;

        tracing::debug!(url = source, timeout = ?self.options.timeout, "fetching page");

        let body = self
            .transport
            .get(source, self.options.timeout)
            .inspect_err(|e| tracing::warn!(url = source, error = %e, "fetch failed"))?;

        self.page = Some(Page::parse(&body));
        Ok(())
    }

    /// Parse HTML the caller already has, as if it had been fetched.
    ///
    /// A non-empty `url` replaces the stored source URL.
    pub fn load_html(&mut self, url: Option<&str>, html: &[u8]) {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            self.source = Some(url.to_string());
        }
        self.page = Some(Page::parse(&Body::new(html)));
    }
}

impl<T> PreviewExtractor<T> {
    /// Page title as plain text.
    ///
    /// Returns the first found of:
    /// 1. `og:title` meta content
    /// 2. text of the first `<title>`
    /// 3. text of the first `<h1>`, whenever the above left the title empty
    ///
    /// Empty when nothing was found or no page is loaded.
    #[must_use]
    pub fn title(&self) -> String {
        let Some(page) = &self.page else {
            return String::new();
        };

        let mut title = page
            .meta
            .non_empty(OG_TITLE)
            .map(str::to_string)
            .or_else(|| dom::first_text(&page.document, "title"))
            .unwrap_or_default();

        if title.is_empty() {
            title = dom::first_text(&page.document, "h1").unwrap_or_default();
        }

        text::clean_text(&title)
    }

    /// Page description as plain text.
    ///
    /// `og:description` when non-empty, otherwise the standard
    /// `description` meta tag. Empty when neither exists or no page is
    /// loaded.
    #[must_use]
    pub fn description(&self) -> String {
        let Some(page) = &self.page else {
            return String::new();
        };

        let description = page
            .meta
            .non_empty(OG_DESCRIPTION)
            .or_else(|| page.meta.get(DESCRIPTION))
            .unwrap_or_default();

        text::clean_text(description)
    }

    /// Canonical URL: `og:url` when present, otherwise the source URL.
    ///
    /// Usable before any fetch; returns the stored URL or an empty string.
    #[must_use]
    pub fn url(&self) -> String {
        self.page
            .as_ref()
            .and_then(|page| page.meta.non_empty(OG_URL))
            .or(self.source.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    /// Whether the page declares a non-empty `og:image`.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.og_image().is_some()
    }

    /// The `og:image` content verbatim, or an empty string.
    #[must_use]
    pub fn image_src(&self) -> String {
        self.og_image().unwrap_or_default().to_string()
    }

    /// All preview fields at once.
    #[must_use]
    pub fn preview(&self) -> Preview {
        Preview {
            title: self.title(),
            description: self.description(),
            url: self.url(),
            image: self.og_image().map(str::to_string),
        }
    }

    /// Meta table of the loaded page, if any.
    #[must_use]
    pub fn meta(&self) -> Option<&MetaTable> {
        self.page.as_ref().map(|page| &page.meta)
    }

    /// Whether a fetch has succeeded at least once.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.page.is_some()
    }

    /// The stored source URL.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn og_image(&self) -> Option<&str> {
        self.page.as_ref().and_then(|page| page.meta.non_empty(OG_IMAGE))
    }
}

impl<T> fmt::Debug for PreviewExtractor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewExtractor")
            .field("source", &self.source)
            .field("loaded", &self.page.is_some())
            .field("meta_tags", &self.meta().map_or(0, MetaTable::len))
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
