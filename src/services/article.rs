//! Single-article lookup through the REST summary endpoint.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Article, ArticleConfig, ArticleMode, SummaryPayload, WikiConfig};
use crate::services::extract::extract_links;
use crate::services::fetcher::Fetch;

/// Looks up one article by topic name.
pub struct ArticleService {
    fetcher: Arc<dyn Fetch>,
    wiki: WikiConfig,
    config: ArticleConfig,
}

impl ArticleService {
    pub fn new(fetcher: Arc<dyn Fetch>, wiki: WikiConfig, config: ArticleConfig) -> Self {
        Self {
            fetcher,
            wiki,
            config,
        }
    }

    /// Resolve the requested topic according to the configured mode.
    ///
    /// Strict mode requires a non-blank topic; linked mode substitutes the
    /// default topic.
    pub fn resolve_topic(&self, topic: Option<&str>) -> Result<String> {
        match (topic.filter(|t| !t.trim().is_empty()), self.config.mode) {
            (Some(topic), _) => Ok(topic.to_string()),
            (None, ArticleMode::Linked) => Ok(self.config.default_topic.clone()),
            (None, ArticleMode::Strict) => Err(AppError::missing_parameter("topic")),
        }
    }

    /// Fetch the summary for a topic and shape it for the configured mode.
    ///
    /// Any upstream failure, including a non-200 status, is reported as
    /// [`AppError::NotFound`].
    pub async fn get_article(&self, topic: Option<&str>) -> Result<Article> {
        let topic = self.resolve_topic(topic)?;
        let url = self.wiki.summary_url(&topic)?;

        let content = match self.fetcher.fetch(&url).await {
            Ok(content) if content.status == 200 => content,
            Ok(content) => {
                log::info!("Summary for '{topic}' returned status {}", content.status);
                return Err(AppError::not_found(topic));
            }
            Err(error) => {
                log::warn!("Failed to fetch summary for '{topic}': {error}");
                return Err(AppError::not_found(topic));
            }
        };

        let payload: SummaryPayload = serde_json::from_str(&content.body).unwrap_or_else(|e| {
            log::warn!("Malformed summary for '{topic}': {e}");
            SummaryPayload::default()
        });
        let title = if payload.title.is_empty() {
            topic.replace('_', " ")
        } else {
            payload.title.clone()
        };

        Ok(match self.config.mode {
            ArticleMode::Strict => Article::Page {
                page_url: payload
                    .desktop_page()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.wiki.article_url(&topic)),
                title,
                extract: payload.extract,
            },
            ArticleMode::Linked => Article::Linked {
                links: extract_links(&payload.extract_html),
                title,
                extract: payload.extract,
            },
        })
    }
}
