//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream encyclopedia endpoints
    #[serde(default)]
    pub wiki: WikiConfig,

    /// Outbound HTTP client settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Summary enrichment settings
    #[serde(default)]
    pub enrich: EnrichConfig,

    /// Single-article endpoint settings
    #[serde(default)]
    pub article: ArticleConfig,

    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.enrich.max_concurrent == 0 {
            return Err(AppError::validation("enrich.max_concurrent must be > 0"));
        }
        if self.pagination.page_size == 0 {
            return Err(AppError::validation("pagination.page_size must be > 0"));
        }
        if self.article.default_topic.trim().is_empty() {
            return Err(AppError::validation("article.default_topic is empty"));
        }
        Url::parse(&self.wiki.base_url)
            .map_err(|e| AppError::validation(format!("wiki.base_url is invalid: {e}")))?;
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::host")]
    pub host: String,

    #[serde(default = "defaults::port")]
    pub port: u16,
}

impl ServerConfig {
    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
        }
    }
}

/// Upstream encyclopedia endpoints.
///
/// Every URL the pipeline fetches is derived from `base_url`, so pointing it
/// at a local server redirects the whole pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Site root, e.g. `https://en.wikipedia.org`
    #[serde(default = "defaults::base_url")]
    pub base_url: String,
}

impl WikiConfig {
    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Current-events portal, the primary source of trending topics.
    pub fn portal_url(&self) -> String {
        format!("{}/wiki/Portal:Current_events", self.base())
    }

    /// Featured-articles page, the fallback source of trending topics.
    pub fn featured_url(&self) -> String {
        format!("{}/wiki/Wikipedia:Featured_articles", self.base())
    }

    /// Absolute URL for a site-relative link such as `/wiki/Rust`.
    pub fn page_url(&self, href: &str) -> String {
        format!("{}{}", self.base(), href)
    }

    /// Canonical article URL for a title (`Solar System` → `/wiki/Solar_System`).
    pub fn article_url(&self, title: &str) -> String {
        self.page_url(&format!("/wiki/{}", title.replace(' ', "_")))
    }

    /// Full-text search API URL for a tag.
    pub fn search_url(&self, tag: &str) -> Result<String> {
        let url = Url::parse_with_params(
            &format!("{}/w/api.php", self.base()),
            &[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", tag),
                ("format", "json"),
                ("utf8", ""),
            ],
        )?;
        Ok(url.to_string())
    }

    /// REST summary URL for a topic.
    pub fn summary_url(&self, topic: &str) -> Result<String> {
        let mut url = Url::parse(&format!("{}/api/rest_v1/page/summary/", self.base()))?;
        url.path_segments_mut()
            .map_err(|_| AppError::config("wiki.base_url cannot be a base"))?
            .pop_if_empty()
            .push(topic);
        Ok(url.to_string())
    }
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
        }
    }
}

/// Outbound HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Summary enrichment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichConfig {
    /// Maximum concurrent summary fetches per page
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Which shape the single-article endpoint uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArticleMode {
    /// `topic` is required; responds with `{title, extract, page_url}`
    #[default]
    Strict,
    /// `topic` falls back to the default; responds with `{title, extract, links}`
    Linked,
}

/// Single-article endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleConfig {
    #[serde(default)]
    pub mode: ArticleMode,

    /// Topic used by linked mode when the request names none
    #[serde(default = "defaults::default_topic")]
    pub default_topic: String,
}

impl Default for ArticleConfig {
    fn default() -> Self {
        Self {
            mode: ArticleMode::default(),
            default_topic: defaults::default_topic(),
        }
    }
}

/// Pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
        }
    }
}

mod defaults {
    // Server defaults
    pub fn host() -> String {
        "127.0.0.1".into()
    }
    pub fn port() -> u16 {
        5000
    }

    // Upstream defaults
    pub fn base_url() -> String {
        "https://en.wikipedia.org".into()
    }

    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; wikifeed/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }

    // Enrichment defaults
    pub fn max_concurrent() -> usize {
        5
    }

    // Article defaults
    pub fn default_topic() -> String {
        "Python_(programming_language)".into()
    }

    // Pagination defaults
    pub fn page_size() -> usize {
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.fetch.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.enrich.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.wiki.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [article]
            mode = "linked"

            [server]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.article.mode, ArticleMode::Linked);
        assert_eq!(config.article.default_topic, "Python_(programming_language)");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.pagination.page_size, 5);
    }

    #[test]
    fn load_reads_file_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[wiki]\nbase_url = \"http://localhost:9999/\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.wiki.base_url, "http://localhost:9999/");

        let missing = Config::load_or_default(dir.path().join("missing.toml"));
        assert_eq!(missing.wiki.base_url, "https://en.wikipedia.org");
    }

    #[test]
    fn wiki_urls() {
        let wiki = WikiConfig {
            base_url: "https://en.wikipedia.org/".to_string(),
        };
        assert_eq!(
            wiki.portal_url(),
            "https://en.wikipedia.org/wiki/Portal:Current_events"
        );
        assert_eq!(
            wiki.article_url("Solar System"),
            "https://en.wikipedia.org/wiki/Solar_System"
        );
        assert_eq!(
            wiki.summary_url("Python_(programming_language)").unwrap(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/Python_(programming_language)"
        );
        assert_eq!(
            wiki.search_url("Art & Music").unwrap(),
            "https://en.wikipedia.org/w/api.php?action=query&list=search&srsearch=Art+%26+Music&format=json&utf8="
        );
    }
}
