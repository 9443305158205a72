//! Paginated, enriched topic feeds.

use std::sync::Arc;

use crate::models::{Config, EnrichedTopic, Topic, WikiConfig};
use crate::services::cache::{TRENDING_KEY, TopicCache};
use crate::services::enrich::Enricher;
use crate::services::fetcher::Fetch;
use crate::services::paginate::{Page, paginate};
use crate::services::tags::search_tag;
use crate::services::trending::{discover_topics, fallback_topics};

/// Composes caches, discovery, pagination and enrichment.
///
/// Trending topics and tag results live in separate caches, so a tag named
/// like the trending key never reads or fills the trending entry.
pub struct FeedService {
    fetcher: Arc<dyn Fetch>,
    wiki: WikiConfig,
    trending: TopicCache,
    tags: TopicCache,
    enricher: Enricher,
    page_size: usize,
}

impl FeedService {
    pub fn new(config: &Config, fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            enricher: Enricher::new(Arc::clone(&fetcher), config.enrich.max_concurrent),
            fetcher,
            wiki: config.wiki.clone(),
            trending: TopicCache::new(),
            tags: TopicCache::new(),
            page_size: config.pagination.page_size.max(1),
        }
    }

    /// Full trending list, from cache when populated.
    ///
    /// Never fails: unreachable upstream yields the fixed fallback list,
    /// which is not cached.
    pub async fn trending_topics(&self) -> Arc<Vec<Topic>> {
        let result = self
            .trending
            .get_or_populate(TRENDING_KEY, || {
                discover_topics(self.fetcher.as_ref(), &self.wiki)
            })
            .await;

        result.unwrap_or_else(|error| {
            log::warn!("Error fetching trending topics: {error}. Using fallback topics.");
            Arc::new(fallback_topics(&self.wiki))
        })
    }

    /// Full result list for a tag; empty when the search fails.
    pub async fn tag_articles(&self, tag: &str) -> Arc<Vec<Topic>> {
        let result = self
            .tags
            .get_or_populate(tag, || search_tag(self.fetcher.as_ref(), &self.wiki, tag))
            .await;

        result.unwrap_or_else(|error| {
            log::warn!("Error fetching articles for tag {tag}: {error}");
            Arc::new(Vec::new())
        })
    }

    /// One enriched page of trending topics.
    pub async fn trending_page(&self, page: i64) -> Page<EnrichedTopic> {
        let topics = self.trending_topics().await;
        self.enriched_page(&topics, page).await
    }

    /// One enriched page of a tag's articles.
    pub async fn tag_page(&self, tag: &str, page: i64) -> Page<EnrichedTopic> {
        let articles = self.tag_articles(tag).await;
        self.enriched_page(&articles, page).await
    }

    async fn enriched_page(&self, topics: &[Topic], page: i64) -> Page<EnrichedTopic> {
        let Page { items, has_more } = paginate(topics, page, self.page_size);
        Page {
            items: self.enricher.enrich(items).await,
            has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::enrich::FETCH_FAILED_SUMMARY;
    use crate::services::testing::StaticFetcher;

    fn portal(count: usize) -> String {
        let links: String = (0..count)
            .map(|i| format!(r#"<a href="/wiki/Topic_{i}" title="Topic {i}">t</a>"#))
            .collect();
        format!(r#"<div class="current-events-content vevent">{links}</div>"#)
    }

    fn article_page(title: &str) -> String {
        format!(
            r#"<div id="mw-content-text"><table class="infobox"><tr><td><img src="//img/{title}.png"></td></tr></table>
            <p>{title} is an article with a paragraph long enough to count as a summary.</p></div>"#
        )
    }

    fn fetcher_with_topics(wiki: &WikiConfig, count: usize) -> StaticFetcher {
        let mut fetcher = StaticFetcher::new().page(&wiki.portal_url(), &portal(count));
        for i in 0..count {
            fetcher = fetcher.page(
                &wiki.page_url(&format!("/wiki/Topic_{i}")),
                &article_page(&format!("Topic{i}")),
            );
        }
        fetcher
    }

    #[tokio::test]
    async fn test_trending_pages() {
        let config = Config::default();
        let fetcher = Arc::new(fetcher_with_topics(&config.wiki, 7));
        let feed = FeedService::new(&config, fetcher.clone());

        let first = feed.trending_page(1).await;
        assert_eq!(first.items.len(), 5);
        assert!(first.has_more);
        assert_eq!(first.items[0].title, "Topic 0");
        assert_eq!(first.items[0].image_url, "https://img/Topic0.png");
        assert!(first.items[0].summary.starts_with("Topic0 is an article"));

        let second = feed.trending_page(2).await;
        assert_eq!(second.items.len(), 2);
        assert!(!second.has_more);
        assert_eq!(second.items[1].title, "Topic 6");

        assert_eq!(fetcher.calls_to(&config.wiki.portal_url()), 1);
    }

    #[tokio::test]
    async fn test_cached_list_is_not_mutated_by_enrichment() {
        let config = Config::default();
        let feed = FeedService::new(&config, Arc::new(fetcher_with_topics(&config.wiki, 3)));

        let before = feed.trending_topics().await;
        feed.trending_page(1).await;
        let after = feed.trending_topics().await;

        assert_eq!(before, after);
        assert_eq!(
            after[0],
            Topic::new("Topic 0", "https://en.wikipedia.org/wiki/Topic_0")
        );
    }

    #[tokio::test]
    async fn test_unreachable_upstream_uses_uncached_fallback() {
        let config = Config::default();
        let feed = FeedService::new(&config, Arc::new(StaticFetcher::new()));

        let page = feed.trending_page(1).await;
        assert_eq!(page.items.len(), 5);
        assert!(!page.has_more);
        assert_eq!(page.items[0].title, "Artificial Intelligence");
        assert_eq!(page.items[0].summary, FETCH_FAILED_SUMMARY);
        assert!(feed.trending.get(TRENDING_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_discovery_is_retried() {
        let config = Config::default();
        let fetcher = Arc::new(
            StaticFetcher::new()
                .page(&config.wiki.portal_url(), "<html></html>")
                .page(&config.wiki.featured_url(), "<html></html>"),
        );
        let feed = FeedService::new(&config, fetcher.clone());

        assert!(feed.trending_page(1).await.items.is_empty());
        assert!(feed.trending_page(1).await.items.is_empty());
        assert_eq!(fetcher.calls_to(&config.wiki.portal_url()), 2);
    }

    #[tokio::test]
    async fn test_tag_failure_is_empty() {
        let config = Config::default();
        let feed = FeedService::new(&config, Arc::new(StaticFetcher::new()));

        let page = feed.tag_page("Science", 1).await;
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_tag_results_are_cached_per_tag() {
        let config = Config::default();
        let url = config.wiki.search_url("History").unwrap();
        let fetcher = Arc::new(StaticFetcher::new().page(
            &url,
            r#"{"query":{"search":[{"title":"Rome"}]}}"#,
        ));
        let feed = FeedService::new(&config, fetcher.clone());

        let first = feed.tag_articles("History").await;
        let second = feed.tag_articles("History").await;
        assert_eq!(first, second);
        assert_eq!(fetcher.calls_to(&url), 1);
        assert!(feed.tags.get("History").await.is_some());
    }

    #[tokio::test]
    async fn test_trending_and_tag_caches_are_separate() {
        let config = Config::default();
        let search_url = config.wiki.search_url(TRENDING_KEY).unwrap();
        let fetcher = Arc::new(
            StaticFetcher::new()
                .page(
                    &config.wiki.portal_url(),
                    r#"<div class="current-events-content vevent"><a href="/wiki/Mars" title="Mars">Mars</a></div>"#,
                )
                .page(
                    &search_url,
                    r#"{"query":{"search":[{"title":"Topic (linguistics)"}]}}"#,
                ),
        );
        let feed = FeedService::new(&config, fetcher.clone());

        let trending = feed.trending_topics().await;
        let tagged = feed.tag_articles(TRENDING_KEY).await;
        assert_eq!(trending[0].title, "Mars");
        assert_eq!(tagged[0].title, "Topic (linguistics)");
        assert_eq!(fetcher.calls_to(&search_url), 1);

        assert_eq!(feed.trending_topics().await[0].title, "Mars");
        assert_eq!(feed.tag_articles(TRENDING_KEY).await[0].title, "Topic (linguistics)");
        assert_eq!(fetcher.calls_to(&config.wiki.portal_url()), 1);
        assert_eq!(fetcher.calls_to(&search_url), 1);
    }

    #[tokio::test]
    async fn test_tag_named_like_trending_key_first() {
        let config = Config::default();
        let search_url = config.wiki.search_url(TRENDING_KEY).unwrap();
        let fetcher = Arc::new(
            StaticFetcher::new()
                .page(
                    &config.wiki.portal_url(),
                    r#"<div class="current-events-content vevent"><a href="/wiki/Venus" title="Venus">Venus</a></div>"#,
                )
                .page(&search_url, r#"{"query":{"search":[{"title":"Subject"}]}}"#),
        );
        let feed = FeedService::new(&config, fetcher);

        assert_eq!(feed.tag_articles(TRENDING_KEY).await[0].title, "Subject");
        assert!(feed.trending.get(TRENDING_KEY).await.is_none());
        assert_eq!(feed.trending_topics().await[0].title, "Venus");
    }
}
