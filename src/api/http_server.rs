// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::{
    detect_people::detect_people_handler, download::download_handler,
    remove_people::remove_people_handler, status::status_handler, upload::upload_handler,
};
use crate::config::ServiceConfig;
use crate::storage::ImageStore;
use crate::vendors::Vendors;

/// Room for multipart boundaries and headers on top of the image limit
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ImageStore>,
    pub vendors: Vendors,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(store: ImageStore, vendors: Vendors, config: ServiceConfig) -> Self {
        Self {
            store: Arc::new(store),
            vendors,
            config: Arc::new(config),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/upload", post(upload_handler))
        .route("/detect-people", post(detect_people_handler))
        .route("/remove-people", post(remove_people_handler))
        .route("/download/:result_id", get(download_handler))
        .route("/status", get(status_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically delete expired records until the task is aborted
pub fn spawn_expiry_sweep(store: Arc<ImageStore>, config: &ServiceConfig) -> JoinHandle<()> {
    let period = config.storage.sweep_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if let Err(e) = store.purge_expired().await {
                warn!("Expiry sweep failed: {}", e);
            }
        }
    })
}

pub async fn start_server(config: ServiceConfig) -> Result<()> {
    let store = ImageStore::open(&config.storage)
        .await
        .with_context(|| format!("failed to open storage at {:?}", config.storage.root))?;
    let vendors = Vendors::from_config(&config.vendors)?;

    info!(
        "Vendor mode {}: detection={} ({}), cleanup={} ({}), auto_mask={} ({})",
        config.vendors.mode.as_str(),
        vendors.detector.provider(),
        configured_label(vendors.detector.is_configured()),
        vendors.inpainter.provider(),
        configured_label(vendors.inpainter.is_configured()),
        vendors.mask_generator.provider(),
        configured_label(vendors.mask_generator.is_configured()),
    );

    let addr = config.listen_addr;
    let state = AppState::new(store, vendors, config);
    let sweeper = spawn_expiry_sweep(state.store.clone(), &state.config);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    sweeper.abort();
    Ok(())
}

fn configured_label(configured: bool) -> &'static str {
    if configured {
        "configured"
    } else {
        "fallback only"
    }
}
