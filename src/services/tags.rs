//! Tag (category) search.

use crate::error::Result;
use crate::models::{Topic, WikiConfig};
use crate::services::extract::extract_search_results;
use crate::services::fetcher::Fetch;

/// Tags offered on the index page.
pub const AVAILABLE_TAGS: [&str; 10] = [
    "Technology",
    "Science",
    "Entertainment",
    "Sports",
    "Politics",
    "Health",
    "History",
    "Art",
    "Music",
    "Literature",
];

/// Search articles matching a tag, in relevance order.
pub async fn search_tag(fetcher: &dyn Fetch, wiki: &WikiConfig, tag: &str) -> Result<Vec<Topic>> {
    let url = wiki.search_url(tag)?;
    let content = fetcher.fetch(&url).await?.ensure_success()?;
    let articles = extract_search_results(&content.body, wiki);
    log::info!("Found {} articles for tag '{tag}'", articles.len());
    Ok(articles)
}
