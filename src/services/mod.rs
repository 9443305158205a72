//! Service layer for the wikifeed application.
//!
//! This module contains the business logic for:
//! - Page fetching (`HttpFetcher`)
//! - Topic, summary and link extraction (`extract`)
//! - Read-through topic caching (`TopicCache`)
//! - Pagination and summary enrichment (`paginate`, `Enricher`)
//! - Feeds and single-article lookup (`FeedService`, `ArticleService`)

pub mod article;
pub mod cache;
pub mod enrich;
pub mod extract;
pub mod feed;
pub mod fetcher;
pub mod paginate;
pub mod tags;
pub mod trending;

#[cfg(test)]
pub(crate) mod testing;

pub use article::ArticleService;
pub use cache::TopicCache;
pub use enrich::Enricher;
pub use feed::FeedService;
pub use fetcher::{Fetch, HttpFetcher, RawContent};
pub use paginate::{Page, paginate};
