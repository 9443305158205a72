//! Structured extraction from encyclopedia pages.
//!
//! Every function here is total: missing markup yields an empty list or a
//! documented default, never an error.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::models::{ArticleSummary, Topic, WikiConfig};
use crate::utils::url::{is_article_href, normalize_protocol_relative};
use crate::utils::{normalize_whitespace, parse_selector};

/// Maximum records kept from one page or search.
pub const MAX_TOPICS: usize = 15;

/// Maximum link titles kept from one summary.
pub const MAX_LINKS: usize = 5;

/// Summary text used when no paragraph qualifies.
pub const NO_SUMMARY: &str = "No summary available";

/// Image used when a page has none.
pub const PLACEHOLDER_IMAGE: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/8/80/Wikipedia-logo-v2.svg/200px-Wikipedia-logo-v2.svg.png";

const CURRENT_EVENTS_REGION: &str = "div.current-events-content.vevent";
const CONTENT_REGION: &str = "div#mw-content-text";
const INFOBOX_REGION: &str = "table.infobox";

/// Paragraphs must be longer than this (trimmed) to count as a summary.
const MIN_PARAGRAPH_CHARS: usize = 50;
const MAX_SUMMARY_CHARS: usize = 300;
const ELLIPSIS: &str = "...";

/// How a region of a page is scanned for topic links.
#[derive(Debug, Clone, Copy)]
struct LinkScan {
    region: &'static str,
    /// Number of leading anchors considered before filtering
    pool: usize,
    min_title_chars: usize,
}

const CURRENT_EVENTS_SCAN: LinkScan = LinkScan {
    region: CURRENT_EVENTS_REGION,
    pool: 20,
    min_title_chars: 1,
};

const FEATURED_SCAN: LinkScan = LinkScan {
    region: CONTENT_REGION,
    pool: 30,
    min_title_chars: 3,
};

/// Extract trending topics from the current-events portal.
pub fn extract_topics(html: &str, wiki: &WikiConfig) -> Vec<Topic> {
    scan_topics(&Html::parse_document(html), CURRENT_EVENTS_SCAN, wiki)
}

/// Extract topics from the featured-articles page.
///
/// This is the fallback source when the portal yields nothing; it draws from
/// a larger pool of anchors and skips titles under 3 characters.
pub fn extract_featured_topics(html: &str, wiki: &WikiConfig) -> Vec<Topic> {
    scan_topics(&Html::parse_document(html), FEATURED_SCAN, wiki)
}

fn scan_topics(document: &Html, scan: LinkScan, wiki: &WikiConfig) -> Vec<Topic> {
    let (Some(region_sel), Some(anchor_sel)) = (selector(scan.region), selector("a[href]")) else {
        return Vec::new();
    };
    let Some(region) = document.select(&region_sel).next() else {
        log::debug!("Region '{}' not found", scan.region);
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut topics = Vec::new();

    for anchor in region.select(&anchor_sel).take(scan.pool) {
        let href = anchor.value().attr("href").unwrap_or_default();
        if !is_article_href(href) {
            continue;
        }

        let title = anchor_title(&anchor);
        if title.chars().count() < scan.min_title_chars {
            continue;
        }
        if !seen.insert(title.clone()) {
            continue;
        }

        topics.push(Topic::new(title, wiki.page_url(href)));
        if topics.len() >= MAX_TOPICS {
            break;
        }
    }

    topics
}

/// Title attribute when present, otherwise the anchor text.
fn anchor_title(anchor: &ElementRef) -> String {
    match anchor.value().attr("title") {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => normalize_whitespace(&anchor.text().collect::<String>()),
    }
}

/// Where an article's representative image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Infobox(String),
    Content(String),
    Placeholder,
}

impl ImageSource {
    pub fn into_url(self) -> String {
        match self {
            ImageSource::Infobox(url) | ImageSource::Content(url) => url,
            ImageSource::Placeholder => PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

/// Extract a short summary and an image URL from an article page.
pub fn extract_summary(html: &str) -> ArticleSummary {
    let document = Html::parse_document(html);
    ArticleSummary {
        summary: first_paragraph(&document).unwrap_or_else(|| NO_SUMMARY.to_string()),
        image_url: resolve_image(&document).into_url(),
    }
}

fn first_paragraph(document: &Html) -> Option<String> {
    let paragraph_sel = selector("p")?;
    document
        .select(&paragraph_sel)
        .map(|p| p.text().collect::<String>())
        .find(|text| text.trim().chars().count() > MIN_PARAGRAPH_CHARS)
        .map(|text| truncate_summary(&text))
}

/// Cut text to 300 characters, appending `...` when anything was dropped.
pub fn truncate_summary(text: &str) -> String {
    if text.chars().count() <= MAX_SUMMARY_CHARS {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(MAX_SUMMARY_CHARS).collect();
    cut.push_str(ELLIPSIS);
    cut
}

/// Resolve an image: infobox first, then main content, then placeholder.
pub fn resolve_image(document: &Html) -> ImageSource {
    if let Some(src) = first_image_in(document, INFOBOX_REGION) {
        return ImageSource::Infobox(src);
    }
    if let Some(src) = first_image_in(document, CONTENT_REGION) {
        return ImageSource::Content(src);
    }
    ImageSource::Placeholder
}

fn first_image_in(document: &Html, region: &str) -> Option<String> {
    let region_sel = selector(region)?;
    let img_sel = selector("img")?;
    let src = document
        .select(&region_sel)
        .next()?
        .select(&img_sel)
        .next()?
        .value()
        .attr("src")
        .filter(|src| !src.is_empty())?;
    Some(normalize_protocol_relative(src))
}

/// Map a full-text search response to topics, preserving relevance order.
///
/// A repeated title keeps only its first position.
pub fn extract_search_results(json: &str, wiki: &WikiConfig) -> Vec<Topic> {
    let value: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Search response is not JSON: {e}");
            return Vec::new();
        }
    };

    let Some(items) = value.pointer("/query/search").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|item| item.get("title").and_then(Value::as_str))
        .filter(|title| !title.is_empty() && seen.insert(*title))
        .take(MAX_TOPICS)
        .map(|title| Topic::new(title, wiki.article_url(title)))
        .collect()
}

/// Collect up to five distinct article link titles from a summary's HTML.
pub fn extract_links(html_extract: &str) -> Vec<String> {
    let Some(anchor_sel) = selector("a[href]") else {
        return Vec::new();
    };
    let fragment = Html::parse_fragment(html_extract);

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for anchor in fragment.select(&anchor_sel) {
        let href = anchor.value().attr("href").unwrap_or_default();
        if !is_article_href(href) {
            continue;
        }
        let text = normalize_whitespace(&anchor.text().collect::<String>());
        if text.is_empty() || !seen.insert(text.clone()) {
            continue;
        }
        links.push(text);
        if links.len() >= MAX_LINKS {
            break;
        }
    }
    links
}

fn selector(s: &str) -> Option<Selector> {
    parse_selector(s)
        .map_err(|e| log::warn!("{e}"))
        .ok()
}
