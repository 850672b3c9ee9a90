//! Items service
//!
//! Business rules for the item lifecycle: create, list, edit, archive,
//! delete. Integrates InventoryStore and PhotoStore.
//!
//! Every mutation holds the store's writer lock across its whole
//! load -> mutate -> save sequence, including the photo write on create.

use crate::config::{AppConfig, MAX_NAME_LENGTH, MAX_NOTES_LENGTH};
use crate::database::{
    find_by_id, next_id, position_of, InventoryStore, Item, ItemFilter, ItemForm, PhotoUpload,
};
use crate::error::{AppError, Result, MISSING_FIELDS_MESSAGE};
use crate::storage::PhotoStore;
use std::sync::Arc;

/// Service for managing inventory items
#[derive(Clone)]
pub struct ItemsService {
    store: InventoryStore,
    photos: PhotoStore,
    config: Arc<AppConfig>,
}

/// Form fields after presence and number checks
#[derive(Debug, Clone, PartialEq)]
struct ItemFields {
    name: String,
    value: f64,
    cost: f64,
    notes: String,
}

impl ItemsService {
    pub fn new(store: InventoryStore, photos: PhotoStore, config: Arc<AppConfig>) -> Self {
        Self {
            store,
            photos,
            config,
        }
    }

    /// Create a new item from form fields and an uploaded photo
    pub async fn create_item(&self, form: ItemForm, photo: Option<PhotoUpload>) -> Result<Item> {
        let photo = photo.filter(|p| !p.is_empty());
        let photo = match (has_required_fields(&form), photo) {
            (true, Some(photo)) => photo,
            _ => return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string())),
        };

        // Same name check the photo store applies when writing
        self.photos.accepted_name(&photo.file_name)?;

        let fields = parse_fields(&form)?;

        tracing::info!(
            "Creating item: {} (photo: {}, {} bytes)",
            fields.name,
            photo.file_name,
            photo.data.len()
        );

        let _guard = self.store.lock().await;

        let stored_name = self.photos.write(&photo.file_name, &photo.data).await?;

        let mut items = match self.store.load().await {
            Ok(items) => items,
            Err(e) => {
                self.discard_photo(&stored_name).await;
                return Err(e);
            }
        };

        let item = Item {
            id: next_id(&items),
            name: fields.name,
            value: fields.value,
            cost: fields.cost,
            notes: fields.notes,
            photo_path: self.config.photo_url(&stored_name),
            archived: false,
        };
        items.push(item.clone());

        if let Err(e) = self.store.save(&items).await {
            self.discard_photo(&stored_name).await;
            return Err(e);
        }

        tracing::info!("Item created: {}", item.id);

        Ok(item)
    }

    /// Get an item by ID
    pub async fn get_item(&self, id: u64) -> Result<Item> {
        let items = self.store.load().await?;
        find_by_id(&items, id)
            .cloned()
            .ok_or(AppError::NotFound(id))
    }

    /// List active or archived items in creation order
    pub async fn list_items(&self, filter: ItemFilter) -> Result<Vec<Item>> {
        let items = self.store.load().await?;
        Ok(items.into_iter().filter(|item| filter.matches(item)).collect())
    }

    /// List the full collection
    pub async fn all_items(&self) -> Result<Vec<Item>> {
        self.store.load().await
    }

    /// Overwrite name, value, cost and notes of an item
    pub async fn edit_item(&self, id: u64, form: ItemForm) -> Result<Item> {
        tracing::debug!("Editing item: {}", id);

        let _guard = self.store.lock().await;
        let mut items = self.store.load().await?;
        let index = position_of(&items, id).ok_or(AppError::NotFound(id))?;

        if !has_required_fields(&form) {
            return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }
        let fields = parse_fields(&form)?;

        let item = &mut items[index];
        item.name = fields.name;
        item.value = fields.value;
        item.cost = fields.cost;
        item.notes = fields.notes;
        let updated = item.clone();

        self.store.save(&items).await?;

        tracing::debug!("Item updated successfully: {}", id);

        Ok(updated)
    }

    /// Mark an item archived. Archiving twice leaves the same state.
    pub async fn archive_item(&self, id: u64) -> Result<Item> {
        tracing::info!("Archiving item: {}", id);

        let _guard = self.store.lock().await;
        let mut items = self.store.load().await?;
        let index = position_of(&items, id).ok_or(AppError::NotFound(id))?;

        items[index].archived = true;
        let archived = items[index].clone();

        self.store.save(&items).await?;

        tracing::info!("Item archived: {}", id);

        Ok(archived)
    }

    /// Permanently remove an item, returning the removed record
    pub async fn delete_item(&self, id: u64) -> Result<Item> {
        tracing::info!("Deleting item: {}", id);

        let _guard = self.store.lock().await;
        let mut items = self.store.load().await?;
        let index = position_of(&items, id).ok_or(AppError::NotFound(id))?;

        let removed = items.remove(index);

        self.store.save(&items).await?;

        tracing::info!("Item deleted: {} ({})", id, removed.name);

        Ok(removed)
    }

    /// Read a stored photo by file name
    pub async fn photo_data(&self, filename: &str) -> Result<Vec<u8>> {
        self.photos.read(filename).await
    }

    /// Best-effort removal of a photo whose record never got persisted
    async fn discard_photo(&self, stored_name: &str) {
        if let Err(e) = self.photos.delete(stored_name).await {
            tracing::warn!("Failed to remove orphaned photo {}: {}", stored_name, e);
        }
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn has_required_fields(form: &ItemForm) -> bool {
    non_blank(&form.name).is_some() && non_blank(&form.value).is_some() && non_blank(&form.cost).is_some()
}

/// Parse a submitted amount; only finite numbers are accepted
fn parse_amount(label: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| AppError::Validation(format!("{} must be a number.", label)))
}

fn parse_fields(form: &ItemForm) -> Result<ItemFields> {
    let missing = || AppError::Validation(MISSING_FIELDS_MESSAGE.to_string());

    let name = non_blank(&form.name).ok_or_else(missing)?;
    let value = parse_amount("Value", non_blank(&form.value).ok_or_else(missing)?)?;
    let cost = parse_amount("Cost", non_blank(&form.cost).ok_or_else(missing)?)?;
    // Notes are kept exactly as submitted
    let notes = form.notes.as_deref().unwrap_or("");

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "Name must be at most {} characters.",
            MAX_NAME_LENGTH
        )));
    }
    if notes.chars().count() > MAX_NOTES_LENGTH {
        return Err(AppError::Validation(format!(
            "Notes must be at most {} characters.",
            MAX_NOTES_LENGTH
        )));
    }

    Ok(ItemFields {
        name: name.to_string(),
        value,
        cost,
        notes: notes.to_string(),
    })
}
