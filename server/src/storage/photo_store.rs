//! Photo storage
//!
//! Stores uploaded item photos in a single directory under their
//! (sanitized) original filename. A name that is already taken gets a
//! numeric suffix, so one upload never replaces another item's photo.
//!
//! Example: a second "chair.jpg" is stored as "uploads/chair-1.jpg"

use crate::config::MAX_FILENAME_LENGTH;
use crate::error::{AppError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Longest extension kept intact when a name has to be shortened
const MAX_EXTENSION_LENGTH: usize = 16;

/// Directory-backed photo store
#[derive(Clone)]
pub struct PhotoStore {
    root: PathBuf,
    allowed_extensions: Vec<String>,
}

impl PhotoStore {
    /// Create a new photo store at the given root directory
    pub fn new(root: PathBuf, allowed_extensions: Vec<String>) -> Self {
        let allowed_extensions = allowed_extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        Self {
            root,
            allowed_extensions,
        }
    }

    /// Initialize the photo store (create directory if needed)
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        tracing::info!("Photo store initialized at: {:?}", self.root);
        Ok(())
    }

    /// Whether the filename carries an allow-listed extension
    pub fn is_allowed(&self, filename: &str) -> bool {
        extension_of(filename)
            .map(|ext| self.allowed_extensions.iter().any(|a| *a == ext))
            .unwrap_or(false)
    }

    /// Sanitized name an upload would be stored under, if its type is allowed
    pub fn accepted_name(&self, filename: &str) -> Result<String> {
        let safe_name = sanitize_filename(filename);
        if safe_name.is_empty() {
            return Err(AppError::Validation("Invalid file name.".to_string()));
        }
        if !self.is_allowed(&safe_name) {
            return Err(AppError::UnsupportedFileType(safe_name));
        }
        Ok(safe_name)
    }

    /// Write a photo, returns the name it was stored under
    pub async fn write(&self, filename: &str, data: &[u8]) -> Result<String> {
        let safe_name = self.accepted_name(filename)?;

        fs::create_dir_all(&self.root).await?;

        let stored_name = self.available_name(&safe_name).await?;
        let path = self.root.join(&stored_name);

        // Write to temp file first (atomic write); the temp name has a fixed length
        let temp_path = self.root.join(format!(".{}.tmp", Uuid::new_v4().simple()));
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;

        // Rename to final location
        fs::rename(temp_path, &path).await?;

        tracing::debug!("Wrote photo: {} ({} bytes)", stored_name, data.len());

        Ok(stored_name)
    }

    /// Read a stored photo by name
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self
            .resolve(filename)
            .ok_or_else(|| AppError::PhotoNotFound(filename.to_string()))?;

        if !fs::try_exists(&path).await? {
            return Err(AppError::PhotoNotFound(filename.to_string()));
        }

        let data = fs::read(&path).await?;

        tracing::debug!("Read photo: {} ({} bytes)", filename, data.len());

        Ok(data)
    }

    /// Check if a photo exists
    pub async fn exists(&self, filename: &str) -> Result<bool> {
        match self.resolve(filename) {
            Some(path) => Ok(fs::try_exists(&path).await?),
            None => Ok(false),
        }
    }

    /// Delete a photo
    pub async fn delete(&self, filename: &str) -> Result<()> {
        let Some(path) = self.resolve(filename) else {
            return Ok(());
        };

        if !fs::try_exists(&path).await? {
            return Ok(()); // Already deleted
        }

        fs::remove_file(&path).await?;

        tracing::debug!("Deleted photo: {}", filename);

        Ok(())
    }

    /// Get photo store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for a requested name, `None` if it could escape the root
    fn resolve(&self, filename: &str) -> Option<PathBuf> {
        if filename.is_empty() || sanitize_filename(filename) != filename || filename.starts_with('.')
        {
            return None;
        }
        Some(self.root.join(filename))
    }

    /// First free name among "name.ext", "name-1.ext", "name-2.ext", ...
    ///
    /// The stem is shortened when a suffix would push the name past
    /// `MAX_FILENAME_LENGTH` bytes.
    async fn available_name(&self, filename: &str) -> Result<String> {
        if !fs::try_exists(self.root.join(filename)).await? {
            return Ok(filename.to_string());
        }

        let (stem, ext) = split_extension(filename);

        let mut counter = 1u32;
        loop {
            let candidate = fit_name(stem, &format!("-{}", counter), ext);
            if !fs::try_exists(self.root.join(&candidate)).await? {
                return Ok(candidate);
            }
            counter += 1;
        }
    }
}

/// Split "stem.ext" into its parts; names without a usable extension keep it all in the stem
fn split_extension(filename: &str) -> (&str, Option<&str>) {
    match filename.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty() && !ext.is_empty() && ext.len() <= MAX_EXTENSION_LENGTH =>
        {
            (stem, Some(ext))
        }
        _ => (filename, None),
    }
}

/// Longest prefix of `s` within `max_bytes` that ends on a char boundary
fn truncate_to_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// "{stem}{suffix}.{ext}" with the stem shortened to fit `MAX_FILENAME_LENGTH` bytes
fn fit_name(stem: &str, suffix: &str, ext: Option<&str>) -> String {
    let ext_len = ext.map_or(0, |ext| ext.len() + 1);
    let budget = MAX_FILENAME_LENGTH.saturating_sub(suffix.len() + ext_len);
    let stem = truncate_to_boundary(stem, budget).trim_end();
    match ext {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext),
        None => format!("{}{}", stem, suffix),
    }
}

/// Lowercased extension after the last dot
fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Sanitize filename to prevent path traversal attacks.
///
/// The result is at most `MAX_FILENAME_LENGTH` bytes; long names lose the
/// end of their stem and keep their extension.
pub fn sanitize_filename(filename: &str) -> String {
    // Remove path separators and null bytes
    let cleaned: String = filename
        .chars()
        .filter(|c| *c != '/' && *c != '\\' && *c != '\0')
        .collect();

    // Leading dots would produce hidden files or "." / ".."
    let cleaned = cleaned.trim_start_matches('.').trim();
    if cleaned.len() <= MAX_FILENAME_LENGTH {
        return cleaned.to_string();
    }

    let (stem, ext) = split_extension(cleaned);
    fit_name(stem, "", ext)
}

/// Content type for serving a stored photo
pub fn content_type_for(filename: &str) -> &'static str {
    match extension_of(filename).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
