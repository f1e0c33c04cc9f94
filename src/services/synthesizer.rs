use crate::error::ApiError;
use mri_synth::{Pipeline, Synthesized};
use std::sync::Arc;

/// Runs the synthesis pipeline for request handlers
pub struct SynthesisService {
    pipeline: Arc<Pipeline>,
}

impl SynthesisService {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Decode, transform and encode an uploaded image.
    ///
    /// Uses spawn_blocking so the CPU-bound transform chain never stalls the
    /// async runtime.
    pub async fn synthesize(&self, bytes: Vec<u8>) -> Result<Synthesized, ApiError> {
        let pipeline = self.pipeline.clone();

        tokio::task::spawn_blocking(move || pipeline.generate(&bytes))
            .await
            .map_err(|e| ApiError::Internal(format!("Synthesis task failed: {e}")))?
            .map_err(ApiError::from)
    }
}

impl Default for SynthesisService {
    fn default() -> Self {
        Self::new(Pipeline::default())
    }
}
