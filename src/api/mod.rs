//! HTTP endpoint layer.
//!
//! Routes:
//! - `GET /` index page listing the available tags
//! - `GET /health` liveness check
//! - `GET /api/tags` available tags
//! - `GET /api/trending?page=N` enriched trending topics
//! - `GET /api/tags/{tag}?page=N` enriched search results for a tag
//! - `GET /get_article?topic=T` single article summary

pub mod error;
pub mod handlers;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use tokio::net::TcpListener;

use crate::error::Result;
use crate::models::Config;
use crate::services::{ArticleService, FeedService, Fetch, HttpFetcher};

/// Shared state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<FeedService>,
    pub articles: Arc<ArticleService>,
}

impl AppState {
    /// Build state around an arbitrary fetcher.
    pub fn new(config: &Config, fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            feed: Arc::new(FeedService::new(config, Arc::clone(&fetcher))),
            articles: Arc::new(ArticleService::new(
                fetcher,
                config.wiki.clone(),
                config.article.clone(),
            )),
        }
    }

    /// Build state with a reqwest-backed fetcher.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::from_config(&config.fetch)?;
        Ok(Self::new(config, Arc::new(fetcher)))
    }
}

/// Assemble the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/tags", get(handlers::tags))
        .route("/api/trending", get(handlers::trending))
        .route("/api/tags/{tag}", get(handlers::tag))
        .route("/get_article", get(handlers::get_article))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} -> {} ({} ms)",
        method,
        uri,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

/// Serve the router until Ctrl+C or SIGTERM.
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    let bind_addr = config.server.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    log::info!("wikifeed listening on http://{bind_addr}");
    log::info!(
        "Upstream: {} (article mode: {:?})",
        config.wiki.base_url,
        config.article.mode
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("Received Ctrl+C signal"),
        _ = terminate => log::info!("Received terminate signal"),
    }
}
