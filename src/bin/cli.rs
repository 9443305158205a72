//! wikifeed CLI
//!
//! Runs the HTTP server, or drives the same pipeline once from the terminal.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wikifeed::{
    api::{self, AppState},
    config::load_config,
    error::Result,
    models::ArticleMode,
};

/// wikifeed - Trending Wikipedia topics as paginated JSON
#[derive(Parser, Debug)]
#[command(
    name = "wikifeed",
    version,
    about = "Serves trending and tagged Wikipedia articles"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "wikifeed.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override the listen host
        #[arg(long)]
        host: Option<String>,

        /// Override the listen port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration file
    Validate,

    /// Print one page of enriched trending topics
    Trending {
        #[arg(short, long, default_value_t = 1)]
        page: i64,
    },

    /// Print one page of enriched articles for a tag
    Tag {
        tag: String,

        #[arg(short, long, default_value_t = 1)]
        page: i64,
    },

    /// Print a single article summary
    Article {
        topic: Option<String>,

        /// Answer with linked titles instead of the page URL
        #[arg(long)]
        linked: bool,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
    };

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            api::serve(&config).await?;
        }

        Command::Validate => {
            log::info!("✓ Config OK ({})", cli.config.display());
            log::info!("Upstream: {}", config.wiki.base_url);
            log::info!("Article mode: {:?}", config.article.mode);
        }

        Command::Trending { page } => {
            let state = AppState::from_config(&config)?;
            let page = state.feed.trending_page(page).await;
            print_json(&serde_json::json!({
                "topics": page.items,
                "has_more": page.has_more,
            }))?;
        }

        Command::Tag { tag, page } => {
            let state = AppState::from_config(&config)?;
            let page = state.feed.tag_page(&tag, page).await;
            print_json(&serde_json::json!({
                "articles": page.items,
                "has_more": page.has_more,
            }))?;
        }

        Command::Article { topic, linked } => {
            if linked {
                config.article.mode = ArticleMode::Linked;
            }
            let state = AppState::from_config(&config)?;
            let article = state.articles.get_article(topic.as_deref()).await?;
            print_json(&serde_json::to_value(&article)?)?;
        }
    }

    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
