//! Configuration options for fetching.
//!
//! The `FetchOptions` struct controls how the default HTTP transport talks to
//! the network. Extraction itself has no knobs.

use std::time::Duration;

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default redirect limit.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Configuration options for fetching a page.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use link_preview::FetchOptions;
/// use std::time::Duration;
///
/// let options = FetchOptions {
///     timeout: Duration::from_secs(10),
///     ..FetchOptions::default()
/// };
/// assert_eq!(options.max_redirects, 5);
/// ```
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Total time allowed for a single GET, including the body read.
    ///
    /// Default: 120 seconds
    pub timeout: Duration,

    /// Value of the `User-Agent` header.
    ///
    /// Default: `link-preview/<crate version>`
    pub user_agent: String,

    /// Maximum number of redirects to follow before failing.
    ///
    /// Default: `5`
    pub max_redirects: usize,

    /// Refuse URLs whose host is `localhost` or resolves to a loopback,
    /// private, link-local, unspecified or broadcast address. Applies to the
    /// initial URL and to every redirect target. Hostnames that do not
    /// resolve are refused as well. Resolution happens before the request,
    /// so a DNS answer that changes before the client connects is not caught.
    ///
    /// Default: `true`
    pub reject_unsafe_urls: bool,

    /// Truncate response bodies to this many bytes.
    ///
    /// Default: `None` (no limit)
    pub max_body_bytes: Option<usize>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("link-preview/", env!("CARGO_PKG_VERSION")).to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            reject_unsafe_urls: true,
            max_body_bytes: None,
        }
    }
}
