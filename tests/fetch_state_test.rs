mod common;

use std::time::Duration;

use common::{extractor, ScriptedTransport};
use link_preview::{Error, FetchOptions, PreviewExtractor};

const PAGE: &str = r#"
<html>
  <head>
    <meta property="og:title" content="First Page">
    <meta property="og:description" content="First description">
    <meta property="og:image" content="https://example.com/first.png">
  </head>
</html>
"#;

#[test]
fn constructor_fetches_when_url_given() {
    let transport = ScriptedTransport::new().html(PAGE);
    let calls = transport.calls();

    let extractor = PreviewExtractor::with_transport(
        Some("https://example.com/"),
        FetchOptions::default(),
        transport,
    );

    assert!(extractor.is_loaded());
    assert_eq!(extractor.title(), "First Page");
    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(calls.borrow()[0].0, "https://example.com/");
}

#[test]
fn constructor_without_url_does_not_fetch() {
    let transport = ScriptedTransport::new().html(PAGE);
    let calls = transport.calls();

    let extractor = PreviewExtractor::with_transport(None, FetchOptions::default(), transport);

    assert!(!extractor.is_loaded());
    assert!(calls.borrow().is_empty());
}

#[test]
fn failed_constructor_fetch_keeps_url() {
    let extractor = PreviewExtractor::with_transport(
        Some("https://down.example.com/"),
        FetchOptions::default(),
        ScriptedTransport::new().fail(),
    );

    assert!(!extractor.is_loaded());
    assert_eq!(extractor.title(), "");
    assert_eq!(extractor.url(), "https://down.example.com/");
}

#[test]
fn fetch_without_any_url_fails_without_calling_transport() {
    let transport = ScriptedTransport::new().html(PAGE);
    let calls = transport.calls();
    let mut extractor = extractor(transport);

    assert!(!extractor.fetch(None));
    assert!(matches!(extractor.try_fetch(None), Err(Error::MissingUrl)));
    assert!(calls.borrow().is_empty());
    assert!(!extractor.is_loaded());
}

#[test]
fn fetch_reuses_stored_url() {
    let transport = ScriptedTransport::new().html(PAGE).html(PAGE);
    let calls = transport.calls();
    let mut extractor = extractor(transport);

    assert!(extractor.fetch(Some("https://example.com/a")));
    assert!(extractor.fetch(None));

    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].0, "https://example.com/a");
}

#[test]
fn fetch_passes_configured_timeout() {
    let transport = ScriptedTransport::new().html(PAGE).html(PAGE);
    let calls = transport.calls();

    let mut default_timeout = extractor(transport);
    assert!(default_timeout.fetch(Some("https://example.com/")));
    assert_eq!(calls.borrow()[0].1, Duration::from_secs(120));

    let transport = ScriptedTransport::new().html(PAGE);
    let calls = transport.calls();
    let options = FetchOptions {
        timeout: Duration::from_secs(3),
        ..FetchOptions::default()
    };
    let mut short = PreviewExtractor::with_transport(None, options, transport);
    assert!(short.fetch(Some("https://example.com/")));
    assert_eq!(calls.borrow()[0].1, Duration::from_secs(3));
}

#[test]
fn failed_fetch_preserves_previous_page() {
    let transport = ScriptedTransport::new().html(PAGE).fail().fail();
    let mut extractor = extractor(transport);

    assert!(extractor.fetch(Some("https://example.com/first")));
    let before = extractor.preview();

    assert!(!extractor.fetch(Some("https://example.com/second")));
    assert!(matches!(
        extractor.try_fetch(None),
        Err(Error::Network(_))
    ));

    assert_eq!(extractor.title(), before.title);
    assert_eq!(extractor.description(), before.description);
    assert!(extractor.has_image());
    assert_eq!(extractor.image_src(), "https://example.com/first.png");
}

#[test]
fn failed_fetch_still_overwrites_url() {
    let transport = ScriptedTransport::new().html("<title>No og:url</title>").fail();
    let mut extractor = extractor(transport);

    assert!(extractor.fetch(Some("https://example.com/first")));
    assert!(!extractor.fetch(Some("https://example.com/second")));

    assert_eq!(extractor.source(), Some("https://example.com/second"));
    assert_eq!(extractor.url(), "https://example.com/second");
    assert_eq!(extractor.title(), "No og:url");
}

#[test]
fn meta_table_rebuilt_on_each_fetch() {
    let second = r#"<head><meta name="description" content="Second only"></head>"#;
    let transport = ScriptedTransport::new().html(PAGE).html(second);
    let mut extractor = extractor(transport);

    assert!(extractor.fetch(Some("https://example.com/1")));
    assert!(extractor.has_image());

    assert!(extractor.fetch(Some("https://example.com/2")));
    assert!(!extractor.has_image());
    assert_eq!(extractor.title(), "");
    assert_eq!(extractor.description(), "Second only");

    let meta = extractor.meta().expect("page loaded");
    assert_eq!(meta.len(), 1);
    assert_eq!(meta.get("og:title"), None);
}

#[test]
fn duplicate_identifiers_resolve_to_last() {
    let html = r#"
        <head>
          <meta property="og:title" content="Early">
          <meta name="og:title" content="Late">
          <meta property="og:image" content="first.png">
          <meta property="og:image" content="second.png">
        </head>
    "#;
    let transport = ScriptedTransport::new().html(html);
    let mut extractor = extractor(transport);

    assert!(extractor.fetch(Some("https://example.com/")));
    assert_eq!(extractor.title(), "Late");
    assert_eq!(extractor.image_src(), "second.png");
}

#[test]
fn accessors_before_fetch_are_empty() {
    let extractor = extractor(ScriptedTransport::new());
    assert_eq!(extractor.title(), "");
    assert_eq!(extractor.description(), "");
    assert!(!extractor.has_image());
    assert_eq!(extractor.image_src(), "");
    assert_eq!(extractor.url(), "");
}

#[test]
fn accessors_are_idempotent() {
    let transport = ScriptedTransport::new().html(PAGE);
    let mut extractor = extractor(transport);
    assert!(extractor.fetch(Some("https://example.com/")));

    let first = extractor.preview();
    let second = extractor.preview();
    assert_eq!(first, second);
}
