//! Character encoding detection and transcoding.
//!
//! Response bodies arrive as raw bytes. Before parsing they are converted to
//! UTF-8 using, in order, the `Content-Type` header charset, the document's
//! own charset declaration, and finally UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>/;]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static HTTP_EQUIV_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Match the `charset` parameter of a `Content-Type` header value
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*"?([^";\s]+)"#).expect("valid regex")
});

/// Number of leading bytes searched for an in-document charset declaration.
const SNIFF_LEN: usize = 1024;

/// Detect character encoding from a `Content-Type` header and HTML bytes.
///
/// The header wins when it names a known encoding. Otherwise the first
/// 1024 bytes are searched for `<meta charset>` and then
/// `<meta http-equiv="Content-Type">`. Defaults to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some(encoding) = content_type
        .and_then(charset_from_content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);

    [&*CHARSET_META_RE, &*HTTP_EQUIV_CHARSET_RE]
        .into_iter()
        .filter_map(|re| re.captures(&head).and_then(|c| c.get(1)))
        .find_map(|m| Encoding::for_label(m.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Extract the charset label from a `Content-Type` header value.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    HEADER_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Transcode HTML bytes to a UTF-8 string.
///
/// Returns the decoded text and the encoding that was used. Invalid
/// sequences become U+FFFD rather than errors, and a leading BOM overrides
/// any declared encoding.
///
/// # Examples
///
/// ```
/// use link_preview::encoding::transcode_to_utf8;
///
/// let (text, encoding) = transcode_to_utf8(b"<p>Caf\xE9</p>", Some("text/html; charset=latin1"));
/// assert_eq!(text, "<p>Caf\u{e9}</p>");
/// assert_eq!(encoding.name(), "windows-1252");
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8], content_type: Option<&str>) -> (String, &'static Encoding) {
    let encoding = detect_encoding(html, content_type);
    let (decoded, used, _had_errors) = encoding.decode(html);
    (decoded.into_owned(), used)
}
