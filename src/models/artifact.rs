use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;

/// Public URL prefix under which the static tree is served
pub const STATIC_URL_PREFIX: &str = "/static";

/// Subdirectory holding raw uploads
pub const UPLOADS_DIR: &str = "uploads";

/// Subdirectory holding generated JPEG artifacts
pub const GENERATED_DIR: &str = "generated";

/// Longest sanitized filename kept after the token prefix, in bytes
pub const MAX_FILENAME_BYTES: usize = 150;

/// Extensions longer than this are treated as part of the stem when capping
const MAX_EXTENSION_BYTES: usize = 16;

/// Random identifier prefixing every stored file name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactToken(String);

impl ArtifactToken {
    /// 128 random bits as 32 lowercase hex characters
    pub fn generate() -> Self {
        use rand::Rng;
        let bytes: [u8; 16] = rand::thread_rng().gen();
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reduce a client-supplied filename to a safe final path component.
///
/// Directory parts (either separator) are dropped; an empty result becomes
/// `upload`. Names longer than [`MAX_FILENAME_BYTES`] are cut on a char
/// boundary, keeping the extension.
pub fn sanitize_filename(name: Option<&str>) -> String {
    let base = name
        .unwrap_or_default()
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();
    match base {
        "" | "." | ".." => "upload".to_string(),
        other => cap_filename(other),
    }
}

fn cap_filename(name: &str) -> String {
    if name.len() <= MAX_FILENAME_BYTES {
        return name.to_string();
    }

    let (stem, extension) = match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot <= MAX_EXTENSION_BYTES => name.split_at(dot),
        _ => (name, ""),
    };

    let mut end = MAX_FILENAME_BYTES - extension.len();
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{extension}", &stem[..end])
}

/// A user-submitted image, persisted before it is decoded
#[derive(Debug, Clone)]
pub struct UploadRecord {
    pub token: ArtifactToken,
    /// Stored file name: `<token>_<original filename>`
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: usize,
}

impl UploadRecord {
    pub fn url(&self) -> String {
        format!("{STATIC_URL_PREFIX}/{UPLOADS_DIR}/{}", self.file_name)
    }
}

/// One persisted pipeline output
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub token: ArtifactToken,
    /// Stored file name: `<token>.jpg`
    pub file_name: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
}

impl GeneratedArtifact {
    pub fn url(&self) -> String {
        generated_url(&self.file_name)
    }
}

/// Public URL of a file in the generated directory
pub fn generated_url(file_name: &str) -> String {
    format!("{STATIC_URL_PREFIX}/{GENERATED_DIR}/{file_name}")
}
