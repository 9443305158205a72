//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::error::AppError;

/// Errors surfaced to HTTP clients as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No topic provided")]
    MissingTopic,

    #[error("Article not found")]
    ArticleNotFound,

    #[error("Invalid page parameter")]
    InvalidPage,

    #[error("Internal server error")]
    Internal(#[source] AppError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingTopic => StatusCode::BAD_REQUEST,
            ApiError::ArticleNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidPage => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::MissingParameter(_) => ApiError::MissingTopic,
            AppError::NotFound(_) => ApiError::ArticleNotFound,
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(source) => log::error!("{self}: {source}"),
            _ => log::debug!("{self}"),
        }

        let payload = Json(json!({ "error": self.to_string() }));
        (self.status(), payload).into_response()
    }
}
