//! HTTP transport.
//!
//! The extractor never talks to the network directly. It asks a
//! [`Transport`] for the body of a URL, which makes the fetch phase
//! replaceable in tests and embeddable behind other HTTP stacks.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;

use crate::error::{Error, Result};
use crate::options::FetchOptions;
use crate::url_utils;

/// A fetched response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    /// Raw body bytes, not yet decoded.
    pub bytes: Vec<u8>,

    /// `Content-Type` header value, if the server sent one.
    pub content_type: Option<String>,
}

impl Body {
    /// Body with no content type.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
        }
    }
}

/// Fetches the body of a URL with a timeout.
///
/// A returned error means transport failure; the HTTP status of a
/// successful exchange is not an error.
pub trait Transport {
    /// Perform a single GET.
    fn get(&self, url: &str, timeout: Duration) -> Result<Body>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str, timeout: Duration) -> Result<Body> {
        (**self).get(url, timeout)
    }
}

/// Blocking HTTP transport backed by `reqwest`.
///
/// A client is built per request, so the timeout passed to
/// [`Transport::get`] is the only one in effect. Fetches are single-shot and
/// there is no connection reuse to lose.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    user_agent: String,
    max_redirects: usize,
    reject_unsafe_urls: bool,
    max_body_bytes: Option<usize>,
}

impl HttpTransport {
    /// Build a transport from fetch options.
    #[must_use]
    pub fn new(options: &FetchOptions) -> Self {
        Self {
            user_agent: options.user_agent.clone(),
            max_redirects: options.max_redirects,
            reject_unsafe_urls: options.reject_unsafe_urls,
            max_body_bytes: options.max_body_bytes,
        }
    }

    fn client(&self, timeout: Duration) -> Result<Client> {
        Client::builder()
            .timeout(timeout)
            .user_agent(self.user_agent.clone())
            .redirect(self.redirect_policy())
            .build()
            .map_err(|e| Error::Client(e.to_string()))
    }

    /// Follow redirects up to the limit, validating every target like the
    /// initial URL.
    fn redirect_policy(&self) -> Policy {
        let max_redirects = self.max_redirects;
        let reject_unsafe = self.reject_unsafe_urls;

        Policy::custom(move |attempt| {
            match url_utils::check_redirect(
                attempt.url().as_str(),
                attempt.previous().len(),
                max_redirects,
                reject_unsafe,
            ) {
                Ok(()) => attempt.follow(),
                Err(e) => {
                    tracing::warn!(target_url = %attempt.url(), error = %e, "redirect refused");
                    attempt.error(e)
                }
            }
        })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(&FetchOptions::default())
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<Body> {
        let url = url_utils::check_fetch_url(url, self.reject_unsafe_urls)?;

        let response = self.client(timeout)?.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, url = %response.url(), "non-success status, parsing body anyway");
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = match self.max_body_bytes {
            Some(limit) => {
                let mut buf = Vec::new();
                let limit = u64::try_from(limit).unwrap_or(u64::MAX);
                response
                    .take(limit)
                    .read_to_end(&mut buf)
                    .map_err(|e| Error::Client(format!("reading body: {e}")))?;
                buf
            }
            None => response.bytes()?.to_vec(),
        };

        Ok(Body {
            bytes,
            content_type,
        })
    }
}
