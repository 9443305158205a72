//! Outbound page fetching.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::FetchConfig;
use crate::utils::http::create_async_client;

/// Raw response from an upstream GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContent {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl RawContent {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Require a 2xx status, as JSON endpoints do.
    pub fn ensure_success(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(AppError::fetch(self.url, self.status))
        }
    }
}

/// Capability to GET a URL.
///
/// Network failures and timeouts come back as `Err`; a response with any
/// status comes back as `Ok`.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawContent>;
}

/// [`Fetch`] backed by a reqwest client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a fetcher with a client configured from `config`.
    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        Ok(Self::new(create_async_client(config)?))
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawContent> {
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawContent {
            url: url.to_string(),
            status,
            body,
        })
    }
}
