pub mod artifact;
pub mod config;

pub use artifact::{
    generated_url, sanitize_filename, ArtifactToken, GeneratedArtifact, UploadRecord,
    GENERATED_DIR, MAX_FILENAME_BYTES, STATIC_URL_PREFIX, UPLOADS_DIR,
};
pub use config::AppConfig;
