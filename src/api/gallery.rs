use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::ArtifactStore;

/// Generated images, newest first
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GalleryResponse {
    /// URLs of generated JPEGs ordered by modification time, newest first
    pub images: Vec<String>,
}

/// List previously generated images
#[utoipa::path(
    get,
    path = "/api/gallery",
    responses(
        (status = 200, description = "Generated image URLs", body = GalleryResponse),
    ),
    tag = "Gallery"
)]
pub async fn handle_gallery<S: ArtifactStore>(
    State(store): State<Arc<S>>,
) -> Result<Json<GalleryResponse>, ApiError> {
    let images = store.list_generated().await?;

    tracing::debug!(count = images.len(), "Gallery listed");

    Ok(Json(GalleryResponse { images }))
}
