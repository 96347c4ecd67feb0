//! Result types for preview output.

use serde::{Deserialize, Serialize};

/// Snapshot of every preview field for one page.
///
/// Built by [`PreviewExtractor::preview`](crate::PreviewExtractor::preview).
/// Empty strings mean "not found"; `image` is `None` when the page declares
/// no `og:image`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    /// Page title (cleaned plain text).
    pub title: String,

    /// Page description (cleaned plain text).
    pub description: String,

    /// Canonical URL, or the fetched URL.
    pub url: String,

    /// Open Graph image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
