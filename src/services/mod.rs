pub mod storage;
pub mod synthesizer;

pub use storage::{ArtifactStore, FsArtifactStore};
pub use synthesizer::SynthesisService;
