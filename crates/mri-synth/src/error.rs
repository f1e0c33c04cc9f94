//! Error type for the synthesis pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single pipeline run.
///
/// Any variant aborts the whole run; no output is produced.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Input bytes could not be interpreted as an image.
    #[error("failed to decode input image: {0}")]
    Decode(#[source] image::ImageError),

    /// The output raster could not be encoded as JPEG.
    #[error("failed to encode output image: {0}")]
    Encode(#[source] image::ImageError),

    /// Reading the source or writing the destination failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SynthError>;
