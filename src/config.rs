// src/config.rs

//! Configuration loading utilities.
//!
//! Reads the TOML file (falling back to defaults), applies `WIKIFEED_*`
//! environment overrides, then validates the result.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{ArticleMode, Config};

/// Listen host override.
pub const ENV_HOST: &str = "WIKIFEED_HOST";
/// Listen port override.
pub const ENV_PORT: &str = "WIKIFEED_PORT";
/// Upstream site root override.
pub const ENV_BASE_URL: &str = "WIKIFEED_BASE_URL";
/// Article mode override (`strict` or `linked`).
pub const ENV_ARTICLE_MODE: &str = "WIKIFEED_ARTICLE_MODE";

/// Load, override and validate configuration.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = Config::load_or_default(path);
    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

/// Apply overrides looked up through `lookup`.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(ENV_HOST) {
        config.server.host = host;
    }
    if let Some(port) = lookup(ENV_PORT) {
        config.server.port = port
            .parse()
            .map_err(|e| AppError::config(format!("{ENV_PORT}={port}: {e}")))?;
    }
    if let Some(base_url) = lookup(ENV_BASE_URL) {
        config.wiki.base_url = base_url;
    }
    if let Some(mode) = lookup(ENV_ARTICLE_MODE) {
        config.article.mode = match mode.to_lowercase().as_str() {
            "strict" => ArticleMode::Strict,
            "linked" => ArticleMode::Linked,
            other => {
                return Err(AppError::config(format!(
                    "{ENV_ARTICLE_MODE} must be 'strict' or 'linked', got '{other}'"
                )));
            }
        };
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = Config::default();
        apply_overrides(
            &mut config,
            lookup(&[
                (ENV_HOST, "0.0.0.0"),
                (ENV_PORT, "8081"),
                (ENV_BASE_URL, "http://localhost:9000"),
                (ENV_ARTICLE_MODE, "Linked"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.bind_addr(), "0.0.0.0:8081");
        assert_eq!(config.wiki.base_url, "http://localhost:9000");
        assert_eq!(config.article.mode, ArticleMode::Linked);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = Config::default();
        apply_overrides(&mut config, lookup(&[])).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.article.mode, ArticleMode::Strict);
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        let mut config = Config::default();
        assert!(apply_overrides(&mut config, lookup(&[(ENV_PORT, "http")])).is_err());
        assert!(apply_overrides(&mut config, lookup(&[(ENV_ARTICLE_MODE, "loose")])).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wikifeed.toml");
        std::fs::write(&path, "[pagination]\npage_size = 0\n").unwrap();
        assert!(load_config(&path).is_err());

        std::fs::write(&path, "[enrich]\nmax_concurrent = 3\n").unwrap();
        assert_eq!(load_config(&path).unwrap().enrich.max_concurrent, 3);
    }
}
