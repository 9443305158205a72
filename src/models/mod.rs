// src/models/mod.rs

//! Domain models for the wikifeed application.

mod article;
mod config;
mod topic;

// Re-export all public types
pub use article::{Article, ContentUrls, PageUrls, SummaryPayload};
pub use config::{
    ArticleConfig, ArticleMode, Config, EnrichConfig, FetchConfig, PaginationConfig,
    ServerConfig, WikiConfig,
};
pub use topic::{ArticleSummary, EnrichedTopic, Topic};
