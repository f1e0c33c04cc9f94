use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from an optional YAML file, then
/// overridden by environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Root of the public static tree (holds `uploads/` and `generated/`)
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Largest accepted request body, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./static")
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            static_dir: default_static_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl AppConfig {
    /// Load from `CONFIG_FILE` (if set) and apply `BIND_ADDR`, `STATIC_DIR`
    /// and `MAX_UPLOAD_BYTES` overrides from the process environment.
    pub fn from_env() -> Self {
        let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
        Self::load(config_file.as_deref()).with_overrides(|key| std::env::var(key).ok())
    }

    /// Load configuration from a YAML file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        static_dir = %config.static_dir.display(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Apply overrides from a key lookup (the environment in production)
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(addr) = lookup("BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.static_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("MAX_UPLOAD_BYTES") {
            match raw.parse() {
                Ok(limit) => self.max_upload_bytes = limit,
                Err(e) => tracing::warn!(%e, value = %raw, "Ignoring invalid MAX_UPLOAD_BYTES"),
            }
        }
        self
    }
}
