use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mri_synth::SynthError;
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Image could not be decoded: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SynthError> for ApiError {
    fn from(e: SynthError) -> Self {
        match &e {
            SynthError::Decode(_) => ApiError::Decode(e.to_string()),
            _ => ApiError::Internal(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Description without filesystem paths, safe to return to clients
    pub fn public_message(&self) -> String {
        let (action, source) = match self {
            StorageError::CreateDir { source, .. } => ("create storage directory", source),
            StorageError::Write { source, .. } => ("write file", source),
            StorageError::List { source, .. } => ("list stored files", source),
        };
        format!("Failed to {action}: {}", source.kind())
    }
}

impl ApiError {
    /// Message placed in the response body
    fn public_message(&self) -> String {
        match self {
            ApiError::Storage(e) => format!("Storage error: {}", e.public_message()),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            // Undecodable uploads surface as a plain server failure.
            ApiError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.public_message(),
        }));

        (status, body).into_response()
    }
}
