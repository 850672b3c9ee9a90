//! Flat-file inventory store
//!
//! The whole item collection lives in one JSON file and is the unit of
//! persistence: callers load it, change it in memory, and save it back.
//! Saves are atomic (temp file + rename) so readers never see a partial
//! collection. Mutations are serialized through `lock()`.

use super::models::Item;
use crate::error::{AppError, Result};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// JSON store for the item collection
#[derive(Clone)]
pub struct InventoryStore {
    path: PathBuf,
    writer: Arc<Mutex<()>>,
}

impl InventoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Create the parent directory and an empty collection if none exists yet
    pub async fn initialize(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let _guard = self.lock().await;
        if !fs::try_exists(&self.path).await? {
            tracing::info!("Inventory file not found, creating empty collection");
            self.save(&[]).await?;
        }

        tracing::info!("Inventory store initialized at: {:?}", self.path);
        Ok(())
    }

    /// Acquire the single-writer guard.
    ///
    /// Every read-modify-write sequence must hold this guard from its
    /// `load` through its `save`.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().await
    }

    /// Load the full collection.
    ///
    /// Never writes. A missing file reads as an empty collection; it is
    /// created by `initialize` or by the next `save`. Unparseable content
    /// is an error and the file is left untouched.
    pub async fn load(&self) -> Result<Vec<Item>> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Inventory file {:?} not found, treating as empty", self.path);
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(AppError::Persistence(format!(
                    "Failed to read {:?}: {}",
                    self.path, e
                )))
            }
        };

        let items: Vec<Item> = serde_json::from_slice(&content).map_err(|e| {
            AppError::Persistence(format!("Corrupt inventory file {:?}: {}", self.path, e))
        })?;

        tracing::debug!("Loaded {} items from {:?}", items.len(), self.path);
        Ok(items)
    }

    /// Overwrite the persisted collection with `items`.
    ///
    /// Each call writes through its own uniquely named temp file.
    pub async fn save(&self, items: &[Item]) -> Result<()> {
        let content = encode(items)?;

        // Write to temp file first (atomic write)
        let temp_path = self.temp_path();
        let result = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(&content).await?;
            file.sync_all().await?;
            fs::rename(&temp_path, &self.path).await
        }
        .await;

        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path).await;
            return Err(AppError::Persistence(format!(
                "Failed to write {:?}: {}",
                self.path, e
            )));
        }

        tracing::debug!("Saved {} items to {:?}", items.len(), self.path);
        Ok(())
    }

    /// Location of the persisted collection
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
        self.path.with_file_name(name)
    }
}

/// First item with the given id
pub fn find_by_id(items: &[Item], id: u64) -> Option<&Item> {
    items.iter().find(|item| item.id == id)
}

/// Position of the item with the given id
pub fn position_of(items: &[Item], id: u64) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

/// Id for the next created item: one past the largest, or 1 when empty
pub fn next_id(items: &[Item]) -> u64 {
    items.iter().map(|item| item.id).max().map_or(1, |max| max + 1)
}

/// Pretty JSON with four-space indentation
fn encode(items: &[Item]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    items.serialize(&mut serializer)?;
    Ok(buf)
}
