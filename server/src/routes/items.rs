//! Item routes
//!
//! Pages and form actions for the item lifecycle. Actions redirect back
//! to the inventory on success; errors render as plain-text responses.

use crate::app::AppState;
use crate::database::{ItemFilter, ItemForm, PhotoUpload};
use crate::error::{AppError, Result};
use crate::views;
use axum::extract::{Multipart, Path, State};
use axum::response::{Html, Redirect};
use axum::Form;

const INVENTORY_PATH: &str = "/inventory";

/// Upload form
pub async fn home() -> Html<String> {
    Html(views::home_page())
}

/// Create an item from the multipart upload form
pub async fn upload(State(state): State<AppState>, multipart: Multipart) -> Result<Redirect> {
    let (form, photo) = read_upload_form(multipart).await?;

    state.items_service.create_item(form, photo).await?;

    Ok(Redirect::to(INVENTORY_PATH))
}

/// Active items with controls
pub async fn inventory(State(state): State<AppState>) -> Result<Html<String>> {
    let items = state.items_service.list_items(ItemFilter::Active).await?;
    Ok(Html(views::inventory_page(&items, false)))
}

/// Active items without controls
pub async fn read_only_inventory(State(state): State<AppState>) -> Result<Html<String>> {
    let items = state.items_service.list_items(ItemFilter::Active).await?;
    Ok(Html(views::inventory_page(&items, true)))
}

/// Archived items
pub async fn archived(State(state): State<AppState>) -> Result<Html<String>> {
    let items = state.items_service.list_items(ItemFilter::Archived).await?;
    Ok(Html(views::archived_page(&items)))
}

/// Edit form for one item
pub async fn edit_form(
    State(state): State<AppState>,
    Path(item_id): Path<u64>,
) -> Result<Html<String>> {
    let item = state.items_service.get_item(item_id).await?;
    Ok(Html(views::edit_page(&item)))
}

/// Apply an edit
pub async fn edit(
    State(state): State<AppState>,
    Path(item_id): Path<u64>,
    Form(form): Form<ItemForm>,
) -> Result<Redirect> {
    state.items_service.edit_item(item_id, form).await?;
    Ok(Redirect::to(INVENTORY_PATH))
}

/// Archive an item
pub async fn archive(State(state): State<AppState>, Path(item_id): Path<u64>) -> Result<Redirect> {
    state.items_service.archive_item(item_id).await?;
    Ok(Redirect::to(INVENTORY_PATH))
}

/// Delete an item
pub async fn delete(State(state): State<AppState>, Path(item_id): Path<u64>) -> Result<Redirect> {
    let removed = state.items_service.delete_item(item_id).await?;
    tracing::debug!("Removed '{}' via web form", removed.name);
    Ok(Redirect::to(INVENTORY_PATH))
}

/// Collect the text fields and the photo from a multipart form
async fn read_upload_form(mut multipart: Multipart) -> Result<(ItemForm, Option<PhotoUpload>)> {
    let mut form = ItemForm::default();
    let mut photo = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "itemPhoto" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Malformed upload: {}", e)))?;
            photo = Some(PhotoUpload::new(file_name, data.to_vec()));
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {}", e)))?;

        match name.as_str() {
            "itemName" => form.name = Some(text),
            "itemValue" => form.value = Some(text),
            "itemCost" => form.cost = Some(text),
            "itemNotes" => form.notes = Some(text),
            other => tracing::debug!("Ignoring unknown upload field: {}", other),
        }
    }

    Ok((form, photo))
}
