//! # Web front-end
//! Single page hosting the review form. The sentiment context is loaded on a runner thread before
//! the socket is bound: a missing or corrupt artifact stops the process at startup.
//!
//! ```no_run
//! use imdb_sentiment::server::{serve, ServerConfig};
//! use imdb_sentiment::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), imdb_sentiment::SentimentError> {
//! let config = ServerConfig::from_file("imdb-sentiment.json")?;
//! serve(config).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod routes;
mod runner;

pub use config::{DeviceOption, ServerConfig};
pub use routes::{create_router, AppState, ReviewForm};
pub use runner::SentimentRunner;

use crate::common::error::SentimentError;
use crate::pipelines::sentiment::SentimentContext;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Loads every artifact, then serves the page until the process is stopped.
pub async fn serve(config: ServerConfig) -> Result<(), SentimentError> {
    let background_config = config.clone();
    let background = tokio::task::spawn_blocking(move || background_config.background())
        .await
        .map_err(|e| SentimentError::ServerError(e.to_string()))??;

    let sentiment_config = config.sentiment_config()?;
    let (_handle, runner) = tokio::task::spawn_blocking(move || {
        SentimentRunner::spawn(move || SentimentContext::new(sentiment_config))
    })
    .await
    .map_err(|e| SentimentError::ServerError(e.to_string()))??;

    let state = Arc::new(AppState {
        runner,
        background: Some(background),
    });
    let app = create_router(state);

    let listener = TcpListener::bind(config.address.as_str()).await?;
    info!(address = %config.address, "serving sentiment classifier");
    axum::serve(listener, app).await?;
    Ok(())
}
