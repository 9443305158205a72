//! Route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::api::AppState;
use crate::api::error::ApiError;
use crate::models::{Article, EnrichedTopic};
use crate::services::tags::AVAILABLE_TAGS;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    /// Requested page, defaulting to 1.
    pub fn page(&self) -> Result<i64, ApiError> {
        match self.page.as_deref() {
            None => Ok(1),
            Some(raw) => raw.trim().parse().map_err(|_| ApiError::InvalidPage),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ArticleQuery {
    topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub topics: Vec<EnrichedTopic>,
    pub has_more: bool,
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub articles: Vec<EnrichedTopic>,
    pub has_more: bool,
}

pub async fn index() -> Html<String> {
    let tags: String = AVAILABLE_TAGS
        .iter()
        .map(|tag| format!(r#"<li><a href="/api/tags/{tag}">{tag}</a></li>"#))
        .collect();
    Html(format!(
        "<!DOCTYPE html>\n<html><head><title>wikifeed</title></head><body>\
         <h1>wikifeed</h1><p><a href=\"/api/trending\">Trending</a></p>\
         <ul>{tags}</ul></body></html>"
    ))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn tags() -> Json<Value> {
    Json(json!({ "tags": AVAILABLE_TAGS }))
}

pub async fn trending(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<TrendingResponse>, ApiError> {
    let page = state.feed.trending_page(query.page()?).await;
    Ok(Json(TrendingResponse {
        topics: page.items,
        has_more: page.has_more,
    }))
}

pub async fn tag(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<TagResponse>, ApiError> {
    let page = state.feed.tag_page(&tag, query.page()?).await;
    Ok(Json(TagResponse {
        articles: page.items,
        has_more: page.has_more,
    }))
}

pub async fn get_article(
    State(state): State<AppState>,
    Query(query): Query<ArticleQuery>,
) -> Result<Json<Article>, ApiError> {
    let article = state.articles.get_article(query.topic.as_deref()).await?;
    Ok(Json(article))
}
