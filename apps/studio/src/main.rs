mod collection;
mod config;
mod editor;
mod errors;
mod export;
mod models;
mod notify;
mod render;
mod routes;
mod state;
mod storage;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::editor::Synchronizer;
use crate::export::JsonTreeGenerator;
use crate::models::Document;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{FileSnapshotStore, MemorySnapshotStore, RedisSnapshotStore, SnapshotStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Studio v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(&config)?;
    info!("Snapshot store initialized ({})", store.backend());

    let document = initial_document(store.as_ref()).await;
    let session = Synchronizer::new(document, config.template);
    info!("Session ready (template: {})", config.template);

    let state = AppState::new(session, store, Arc::new(JsonTreeGenerator), config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Redis when `REDIS_URL` is set, else a file under `STORE_DIR`, else memory.
fn build_store(config: &Config) -> Result<Arc<dyn SnapshotStore>> {
    if let Some(url) = &config.redis_url {
        let store = RedisSnapshotStore::open(url).context("REDIS_URL is not a valid Redis URL")?;
        return Ok(Arc::new(store));
    }
    if let Some(dir) = &config.store_dir {
        return Ok(Arc::new(FileSnapshotStore::new(dir.clone())));
    }
    Ok(Arc::new(MemorySnapshotStore::new()))
}

/// The saved snapshot when one is readable, otherwise the built-in sample.
async fn initial_document(store: &dyn SnapshotStore) -> Document {
    match store.load().await {
        Ok(Some(text)) => match Document::from_snapshot(&text) {
            Ok(document) => {
                info!("Restored saved resume");
                return document;
            }
            Err(e) => warn!("Saved resume is unreadable, using sample: {e}"),
        },
        Ok(None) => {}
        Err(e) => warn!("Could not read saved resume, using sample: {e}"),
    }
    Document::sample()
}
