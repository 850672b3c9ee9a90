//! Application configuration
//!
//! Central location for configuration constants, validation boundaries,
//! and the runtime `AppConfig` passed to every component at construction.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

// ===== Defaults =====

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Default location of the persisted item collection
pub const DEFAULT_DATA_FILE: &str = "furniture_inventory.json";

/// Default directory for uploaded photos
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// URL path segment photos are served under
pub const UPLOADS_ROUTE_PREFIX: &str = "/uploads";

/// Photo extensions accepted by default
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Default request body limit (16 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

// ===== Validation Limits =====

/// Maximum length of an item name in characters
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of item notes in characters
pub const MAX_NOTES_LENGTH: usize = 2000;

/// Maximum length of a stored photo filename.
/// Matches the common filesystem limit for a single path component.
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_file: PathBuf,
    pub upload_dir: PathBuf,
    /// Origin prepended to photo URLs, e.g. "http://inventory.local:5000".
    /// When unset, records store rooted paths like "/uploads/chair.jpg".
    pub public_base_url: Option<String>,
    pub allowed_extensions: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 5000))),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            public_base_url: None,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    AppError::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                let config = Self::from_toml(&content)?;
                tracing::info!("Loaded configuration from {:?}", path);
                config
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text; missing keys take defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse configuration: {}", e)))
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.allowed_extensions.is_empty() {
            return Err(AppError::Config(
                "allowed_extensions must not be empty".to_string(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(AppError::Config(
                "max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        if let Some(base) = &self.public_base_url {
            if base.trim().is_empty() {
                return Err(AppError::Config(
                    "public_base_url must not be blank".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Build the public URL for a stored photo file
    pub fn photo_url(&self, file_name: &str) -> String {
        let file_name = urlencoding::encode(file_name);
        match &self.public_base_url {
            Some(base) => format!(
                "{}{}/{}",
                base.trim_end_matches('/'),
                UPLOADS_ROUTE_PREFIX,
                file_name
            ),
            None => format!("{}/{}", UPLOADS_ROUTE_PREFIX, file_name),
        }
    }
}
