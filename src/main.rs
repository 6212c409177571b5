// ABOUTME: Main entry point for the marketplace accounts backend
// ABOUTME: Loads configuration, sets up logging and storage, and serves the HTTP API

use axum::Router;
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod entities;
mod error;
mod media;
mod migration;
mod password;
mod representation;
mod storage;
mod types;
mod validation;

#[cfg(test)]
mod integration_tests;

use config::Config;
use media::{MediaStore, MEDIA_URL};
use storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub media: MediaStore,
}

pub fn app(state: AppState) -> Router {
    let media_root = state.media.root().to_path_buf();

    api::routes()
        .nest_service(MEDIA_URL.trim_end_matches('/'), ServeDir::new(media_root))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn init_logger(default_filter: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(env_filter)
        .try_init()?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logger(&config.log_level)?;

    let storage = Arc::new(Storage::new(&config.database_url).await.inspect_err(|e| {
        tracing::error!(error = %e, "Schema migration or database connection failed");
    })?);
    let media = MediaStore::new(&config.media_root);

    let app_state = AppState { storage, media };
    let router = app(app_state);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}
