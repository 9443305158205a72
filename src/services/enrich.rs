//! Per-topic summary enrichment.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::models::{ArticleSummary, EnrichedTopic, Topic};
use crate::services::extract::{PLACEHOLDER_IMAGE, extract_summary};
use crate::services::fetcher::Fetch;

/// Summary text used when an article page cannot be fetched.
pub const FETCH_FAILED_SUMMARY: &str = "Error fetching article";

/// Attaches summaries to topics with a bounded number of concurrent fetches.
#[derive(Clone)]
pub struct Enricher {
    fetcher: Arc<dyn Fetch>,
    max_concurrent: usize,
}

impl Enricher {
    pub fn new(fetcher: Arc<dyn Fetch>, max_concurrent: usize) -> Self {
        Self {
            fetcher,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Fetch one article page and extract its summary.
    ///
    /// A failed fetch degrades to a fixed error summary with the placeholder
    /// image.
    pub async fn summarize(&self, url: &str) -> ArticleSummary {
        match self.fetcher.fetch(url).await {
            Ok(content) => extract_summary(&content.body),
            Err(error) => {
                log::warn!("Failed to fetch article summary {url}: {error}");
                ArticleSummary {
                    summary: FETCH_FAILED_SUMMARY.to_string(),
                    image_url: PLACEHOLDER_IMAGE.to_string(),
                }
            }
        }
    }

    /// Enrich every topic. Output order matches input order.
    pub async fn enrich(&self, topics: Vec<Topic>) -> Vec<EnrichedTopic> {
        stream::iter(topics)
            .map(|topic| async move {
                let summary = self.summarize(&topic.url).await;
                topic.enrich(summary)
            })
            .buffered(self.max_concurrent)
            .collect()
            .await
    }
}
