//! Error types for link-preview.
//!
//! Only the fetch phase can fail. Accessors never return errors; they degrade
//! to empty values instead.

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `fetch` was called with no URL and none was stored.
    #[error("No URL to fetch")]
    MissingUrl,

    /// The URL could not be parsed or is not an http(s) URL with a host.
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The URL points at a loopback, private or otherwise local host.
    #[error("Refusing to fetch unsafe URL: {0}")]
    UnsafeUrl(String),

    /// More redirects than the configured limit.
    #[error("Too many redirects (limit {0})")]
    TooManyRedirects(usize),

    /// The HTTP client could not be built.
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    /// Network-level failure (connect, timeout, body read).
    #[error("Transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Transport failure reported by a [`Transport`](crate::Transport)
    /// implementation that is not backed by `reqwest`.
    #[error("Network failure: {0}")]
    Network(String),
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, Error>;
