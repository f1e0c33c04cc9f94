use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::{ArtifactStore, SynthesisService};

/// Multipart form field carrying the source image
pub const UPLOAD_FIELD: &str = "mri_image";

/// Multipart form accepted by the upload endpoint
#[derive(ToSchema)]
pub struct UploadForm {
    /// Source image (any common format, any size)
    #[schema(value_type = String, format = Binary)]
    pub mri_image: Vec<u8>,
}

/// Response from a successful upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// URL of the generated JPEG
    pub generated: String,
}

/// Body-limit hits become 413; anything else is a malformed request.
fn multipart_error(context: &str, e: MultipartError) -> ApiError {
    let message = format!("{context}: {e}");
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(message)
    } else {
        ApiError::BadRequest(message)
    }
}

/// Upload an image and generate a synthetic scan from it
///
/// The upload is stored first, then run through the synthesis pipeline; the
/// generated 256x256 JPEG is stored under a fresh name and its URL returned.
/// Every call draws fresh noise, so repeated uploads of the same file give
/// different results.
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image generated", body = UploadResponse),
        (status = 400, description = "Missing or malformed multipart field"),
        (status = 413, description = "Request body exceeds the upload limit"),
        (status = 500, description = "Image could not be decoded or stored"),
    ),
    tag = "Generation"
)]
pub async fn handle_upload<S: ArtifactStore>(
    State(store): State<Arc<S>>,
    State(synthesizer): State<Arc<SynthesisService>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Multipart error", e))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue; // ignore unknown fields
        }
        let filename = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Read error", e))?;
        upload = Some((filename, bytes.to_vec()));
    }

    let (filename, bytes) = upload.ok_or_else(|| {
        ApiError::BadRequest(format!("Missing field {UPLOAD_FIELD} in multipart form"))
    })?;

    tracing::info!(
        filename = filename.as_deref().unwrap_or("-"),
        bytes = bytes.len(),
        "Upload received"
    );

    // The raw upload is kept even when decoding fails below.
    let record = store.save_upload(filename.as_deref(), &bytes).await?;

    let output = synthesizer.synthesize(bytes).await.inspect_err(|e| {
        tracing::warn!(upload = %record.file_name, error = %e, "Synthesis failed");
    })?;

    let artifact = store.save_generated(&output.jpeg).await?;

    tracing::info!(
        upload = %record.file_name,
        artifact = %artifact.file_name,
        created_at = %artifact.created_at,
        "Generated synthetic image"
    );

    Ok(Json(UploadResponse {
        generated: artifact.url(),
    }))
}
