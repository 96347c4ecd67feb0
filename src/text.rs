//! Text cleaning for extracted preview fields.
//!
//! Every human-readable field goes through [`clean_text`], which is
//! `strip_markup(decode_text(raw))`.

use encoding_rs::WINDOWS_1252;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// `<script>` and `<style>` elements, content included
#[allow(clippy::expect_used)]
static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("valid regex")
});

/// Comments, tags, doctypes and processing instructions
#[allow(clippy::expect_used)]
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z!?][^>]*>").expect("valid regex")
});

/// Normalize the encoding of already-decoded text.
///
/// Document text is UTF-8 by the time it gets here, so well-formed input is
/// returned untouched (borrowed). The one repair performed is for
/// double-encoded text: UTF-8 bytes that were once decoded as Windows-1252 or
/// Latin-1 (`CafÃ©` instead of `Café`). Such text is re-encoded to its bytes
/// and decoded again as UTF-8. If that does not yield valid UTF-8 the input is
/// kept as-is, so a lone accented letter (`é`) is never touched.
///
/// The repair cannot tell mojibake from genuine text that happens to form a
/// valid UTF-8 sequence once re-encoded: `Ã…` (A-tilde followed by an
/// ellipsis) becomes `Å`. Such pairs are rare in real titles and
/// descriptions, and far less common than double-encoded pages.
#[must_use]
pub fn decode_text(raw: &str) -> Cow<'_, str> {
    if raw.is_ascii() {
        return Cow::Borrowed(raw);
    }

    let (bytes, _, had_unmappable) = WINDOWS_1252.encode(raw);
    if had_unmappable {
        return Cow::Borrowed(raw);
    }

    match std::str::from_utf8(&bytes) {
        Ok(repaired) if repaired != raw => Cow::Owned(repaired.to_string()),
        _ => Cow::Borrowed(raw),
    }
}

/// Remove markup from text, leaving plain text.
///
/// Script and style elements are dropped together with their content, then
/// all remaining tags and comments are removed and the result is trimmed.
/// A bare `<` that does not open a tag (`a < b`) is kept.
#[must_use]
pub fn strip_markup(text: &str) -> String {
    let without_scripts = SCRIPT_STYLE_RE.replace_all(text, "");
    let without_tags = TAG_RE.replace_all(&without_scripts, "");
    without_tags.trim().to_string()
}

/// Full cleaning pipeline applied to titles and descriptions.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    strip_markup(&decode_text(raw))
}
