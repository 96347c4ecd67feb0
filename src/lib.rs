//! # link-preview
//!
//! Fetch a web page and extract the facts needed to render a link preview:
//! title, description, canonical URL and image.
//!
//! Open Graph tags are preferred. When they are missing the extractor falls
//! back to standard meta tags and document structure (`<title>`, `<h1>`).
//! Malformed HTML never causes a failure; only the network can.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use link_preview::PreviewExtractor;
//!
//! let extractor = PreviewExtractor::new(Some("https://www.rust-lang.org/"));
//! if extractor.is_loaded() {
//!     println!("Title: {}", extractor.title());
//!     println!("Description: {}", extractor.description());
//!     println!("URL: {}", extractor.url());
//!     if extractor.has_image() {
//!         println!("Image: {}", extractor.image_src());
//!     }
//! }
//! ```
//!
//! ## Fallback rules
//!
//! | field | sources, in order |
//! |---|---|
//! | title | `og:title`, first `<title>`, first `<h1>` |
//! | description | `og:description`, `description` |
//! | url | `og:url`, the fetched URL |
//! | image | `og:image` only |

mod error;
mod options;
mod preview;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Meta tag collection (name/property → content).
pub mod meta;

/// Text cleaning: encoding normalization and markup stripping.
pub mod text;

/// Character encoding detection and transcoding.
pub mod encoding;

/// URL validation for fetching.
pub mod url_utils;

/// HTTP transport abstraction and the default `reqwest` implementation.
pub mod transport;

// Public API - re-exports
pub use error::{Error, Result};
pub use meta::MetaTable;
pub use options::FetchOptions;
pub use preview::PreviewExtractor;
pub use result::Preview;
pub use transport::{Body, HttpTransport, Transport};
