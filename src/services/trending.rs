//! Trending topic discovery.

use crate::error::Result;
use crate::models::{Topic, WikiConfig};
use crate::services::extract::{extract_featured_topics, extract_topics};
use crate::services::fetcher::Fetch;

/// Topics served when the upstream cannot be reached.
const FALLBACK_TOPICS: [(&str, &str); 5] = [
    ("Artificial Intelligence", "Artificial_intelligence"),
    ("Climate Change", "Climate_change"),
    ("Solar System", "Solar_System"),
    ("Internet", "Internet"),
    (
        "Python (programming language)",
        "Python_(programming_language)",
    ),
];

/// Fixed topic list used when discovery fails.
pub fn fallback_topics(wiki: &WikiConfig) -> Vec<Topic> {
    FALLBACK_TOPICS
        .iter()
        .map(|(title, slug)| Topic::new(*title, wiki.page_url(&format!("/wiki/{slug}"))))
        .collect()
}

/// Discover trending topics from the current-events portal.
///
/// Falls back to the featured-articles page when the portal yields nothing.
/// Fetch failures are returned as errors; an empty `Ok` means both pages
/// were reachable but had no usable links.
pub async fn discover_topics(fetcher: &dyn Fetch, wiki: &WikiConfig) -> Result<Vec<Topic>> {
    let portal = fetcher.fetch(&wiki.portal_url()).await?;
    let topics = extract_topics(&portal.body, wiki);
    if !topics.is_empty() {
        log::info!("Discovered {} trending topics from portal", topics.len());
        return Ok(topics);
    }

    log::info!("Portal yielded no topics, trying featured articles");
    let featured = fetcher.fetch(&wiki.featured_url()).await?;
    let topics = extract_featured_topics(&featured.body, wiki);
    log::info!("Discovered {} topics from featured articles", topics.len());
    Ok(topics)
}
