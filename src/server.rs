//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::api;
use crate::error::ApiError;
use crate::models::{AppConfig, STATIC_URL_PREFIX};
use crate::services::{FsArtifactStore, SynthesisService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<FsArtifactStore>,
    pub synthesizer: Arc<SynthesisService>,
}

/// Create application state from configuration.
///
/// Opens (and creates, if needed) the static directory tree.
pub async fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let store = FsArtifactStore::open(&config.static_dir)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open artifact store: {e}"))?;

    Ok(AppState {
        config: Arc::new(config),
        store: Arc::new(store),
        synthesizer: Arc::new(SynthesisService::default()),
    })
}

/// Build the router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. Generated and
/// uploaded files are served from the store root under `/static`.
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(state.store.root());
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/api/upload", post(handle_upload))
        .route("/api/gallery", get(handle_gallery))
        // Older clients post here
        .route("/upload_dataset/", post(handle_upload))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .nest_service(STATIC_URL_PREFIX, static_files)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        // Browser front-ends are served from anywhere (file://, dev servers)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_upload(
    axum::extract::State(state): axum::extract::State<AppState>,
    multipart: axum::extract::Multipart,
) -> Result<axum::Json<api::UploadResponse>, ApiError> {
    api::handle_upload(
        axum::extract::State(state.store),
        axum::extract::State(state.synthesizer),
        multipart,
    )
    .await
}

async fn handle_gallery(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<axum::Json<api::GalleryResponse>, ApiError> {
    api::handle_gallery(axum::extract::State(state.store)).await
}
