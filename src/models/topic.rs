//! Topic records and their enriched form.

use serde::{Deserialize, Serialize};

/// A title + URL pair pointing at one encyclopedia page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    /// Page title, unique within one result list
    pub title: String,

    /// Absolute URL to the page
    pub url: String,
}

impl Topic {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Attach a summary, producing the record returned to callers.
    pub fn enrich(&self, summary: ArticleSummary) -> EnrichedTopic {
        EnrichedTopic {
            title: self.title.clone(),
            url: self.url.clone(),
            summary: summary.summary,
            image_url: summary.image_url,
        }
    }
}

/// Summary text and representative image for one page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleSummary {
    pub summary: String,
    pub image_url: String,
}

/// A topic annotated with its summary, as served in a page view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrichedTopic {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub image_url: String,
}
