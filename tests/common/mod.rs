//! Shared test transport.
//!
//! `ScriptedTransport` hands out queued responses in order and records every
//! request it receives, so tests can drive the fetch phase without a network.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use link_preview::{Body, Error, FetchOptions, PreviewExtractor, Result, Transport};

/// Requests seen by a `ScriptedTransport`: `(url, timeout)`.
pub type CallLog = Rc<RefCell<Vec<(String, Duration)>>>;

#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<Body>>>,
    calls: CallLog,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful HTML response.
    pub fn html(self, html: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(Body::new(html)));
        self
    }

    /// Queue a successful response with raw bytes and a content type.
    pub fn bytes(self, bytes: &[u8], content_type: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(Body {
            bytes: bytes.to_vec(),
            content_type: Some(content_type.to_string()),
        }));
        self
    }

    /// Queue a transport failure.
    pub fn fail(self) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(Error::Network("connection refused".to_string())));
        self
    }

    pub fn calls(&self) -> CallLog {
        Rc::clone(&self.calls)
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<Body> {
        self.calls.borrow_mut().push((url.to_string(), timeout));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Network("no scripted response left".to_string())))
    }
}

/// Extractor with no source URL over the given transport.
pub fn extractor(transport: ScriptedTransport) -> PreviewExtractor<ScriptedTransport> {
    PreviewExtractor::with_transport(None, FetchOptions::default(), transport)
}

/// Extractor that has fetched `html` from `url`.
pub fn fetched(url: &str, html: &str) -> PreviewExtractor<ScriptedTransport> {
    let mut extractor = extractor(ScriptedTransport::new().html(html));
    assert!(extractor.fetch(Some(url)), "scripted fetch should succeed");
    extractor
}
