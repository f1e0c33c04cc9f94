use crate::error::StorageError;
use crate::models::{
    generated_url, sanitize_filename, ArtifactToken, GeneratedArtifact, UploadRecord,
    GENERATED_DIR, UPLOADS_DIR,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Persistence for uploads and generated artifacts
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist raw upload bytes under a fresh unique name
    async fn save_upload(
        &self,
        filename: Option<&str>,
        bytes: &[u8],
    ) -> Result<UploadRecord, StorageError>;

    /// Persist an encoded JPEG under a fresh unique name
    async fn save_generated(&self, jpeg: &[u8]) -> Result<GeneratedArtifact, StorageError>;

    /// Public URLs of all generated artifacts, newest first
    async fn list_generated(&self) -> Result<Vec<String>, StorageError>;
}

/// Directory-backed store: `<root>/uploads` and `<root>/generated`.
///
/// The directory contents are the whole state. Listing is an uncoordinated
/// scan, so an upload completing concurrently may or may not appear.
pub struct FsArtifactStore {
    root: PathBuf,
    uploads: PathBuf,
    generated: PathBuf,
}

impl FsArtifactStore {
    /// Open a store rooted at `root`, creating both subdirectories
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        let uploads = root.join(UPLOADS_DIR);
        let generated = root.join(GENERATED_DIR);

        for dir in [&uploads, &generated] {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| StorageError::CreateDir {
                    path: dir.clone(),
                    source,
                })?;
        }

        tracing::info!(root = %root.display(), "Artifact store ready");

        Ok(Self {
            root,
            uploads,
            generated,
        })
    }

    /// Root of the static tree (served under `/static`)
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn generated_dir(&self) -> &Path {
        &self.generated
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn save_upload(
        &self,
        filename: Option<&str>,
        bytes: &[u8],
    ) -> Result<UploadRecord, StorageError> {
        let token = ArtifactToken::generate();
        let file_name = format!("{token}_{}", sanitize_filename(filename));
        let path = self.uploads.join(&file_name);

        write_file(&path, bytes).await?;

        tracing::debug!(upload = %file_name, bytes = bytes.len(), "Stored upload");

        Ok(UploadRecord {
            token,
            file_name,
            path,
            size_bytes: bytes.len(),
        })
    }

    async fn save_generated(&self, jpeg: &[u8]) -> Result<GeneratedArtifact, StorageError> {
        let token = ArtifactToken::generate();
        let file_name = format!("{token}.jpg");
        let path = self.generated.join(&file_name);

        // Hidden temp name keeps half-written files out of the gallery.
        let staging = self.generated.join(format!(".{token}.jpg.tmp"));
        if let Err(e) = write_file(&staging, jpeg).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e);
        }
        if let Err(source) = tokio::fs::rename(&staging, &path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(StorageError::Write { path, source });
        }

        tracing::debug!(artifact = %file_name, bytes = jpeg.len(), "Stored generated image");

        Ok(GeneratedArtifact {
            token,
            file_name,
            path,
            created_at: chrono::Utc::now(),
        })
    }

    async fn list_generated(&self) -> Result<Vec<String>, StorageError> {
        let list_err = |source| StorageError::List {
            path: self.generated.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.generated)
            .await
            .map_err(list_err)?;
        let mut found: Vec<(SystemTime, String)> = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(list_err)? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') || !name.ends_with(".jpg") {
                continue;
            }
            // Files removed between the scan and the stat are skipped.
            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            found.push((modified, name));
        }

        found.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        Ok(found
            .into_iter()
            .map(|(_, name)| generated_url(&name))
            .collect())
    }
}
