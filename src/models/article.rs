//! Single-article lookup results.

use serde::{Deserialize, Serialize};

/// Article returned by the single-article endpoint.
///
/// The shape depends on the configured [`ArticleMode`](super::ArticleMode).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Article {
    /// Strict mode: canonical page URL
    Page {
        title: String,
        extract: String,
        page_url: String,
    },
    /// Linked mode: titles linked from the summary
    Linked {
        title: String,
        extract: String,
        links: Vec<String>,
    },
}

/// Subset of the REST summary payload the endpoint reads.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SummaryPayload {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub extract: String,

    #[serde(default)]
    pub extract_html: String,

    #[serde(default)]
    pub content_urls: Option<ContentUrls>,
}

impl SummaryPayload {
    /// Desktop page URL reported by the summary, if any.
    pub fn desktop_page(&self) -> Option<&str> {
        self.content_urls
            .as_ref()
            .and_then(|urls| urls.desktop.as_ref())
            .map(|desktop| desktop.page.as_str())
            .filter(|page| !page.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ContentUrls {
    #[serde(default)]
    pub desktop: Option<PageUrls>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PageUrls {
    #[serde(default)]
    pub page: String,
}
