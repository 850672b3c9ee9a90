//! Integration tests for the furniture inventory
//!
//! These tests verify end-to-end functionality including:
//! - The item lifecycle across service restarts
//! - Compatibility with existing inventory files
//! - Photo storage next to the collection

use furniture_inventory::app::{setup, AppState};
use furniture_inventory::config::AppConfig;
use furniture_inventory::database::{ItemFilter, ItemForm, PhotoUpload};
use furniture_inventory::error::AppError;
use tempfile::TempDir;

fn test_config(temp_dir: &TempDir) -> AppConfig {
    AppConfig {
        data_file: temp_dir.path().join("furniture_inventory.json"),
        upload_dir: temp_dir.path().join("uploads"),
        public_base_url: Some("http://localhost:5000".to_string()),
        ..AppConfig::default()
    }
}

async fn create_app(temp_dir: &TempDir) -> AppState {
    setup(test_config(temp_dir)).await.unwrap()
}

fn photo(name: &str) -> Option<PhotoUpload> {
    Some(PhotoUpload::new(name, vec![0xFF, 0xD8, 0xFF]))
}

#[tokio::test]
async fn test_first_run_creates_storage() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_app(&temp_dir).await;

    assert!(temp_dir.path().join("furniture_inventory.json").exists());
    assert!(temp_dir.path().join("uploads").is_dir());
    assert!(state.items_service.all_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_lifecycle_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let state = create_app(&temp_dir).await;
        let items = &state.items_service;

        let chair = items
            .create_item(ItemForm::new("Chair", "50.00", "20.00", ""), photo("chair.jpg"))
            .await
            .unwrap();
        assert_eq!(chair.photo_path, "http://localhost:5000/uploads/chair.jpg");

        items
            .create_item(ItemForm::new("Table", "100", "40", ""), photo("table.jpg"))
            .await
            .unwrap();
        items.archive_item(chair.id).await.unwrap();
    }

    // A fresh process sees the same collection
    {
        let state = create_app(&temp_dir).await;
        let items = &state.items_service;

        let active = items.list_items(ItemFilter::Active).await.unwrap();
        let archived = items.list_items(ItemFilter::Archived).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Table");
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].name, "Chair");

        items.delete_item(2).await.unwrap();
        assert!(items.list_items(ItemFilter::Active).await.unwrap().is_empty());

        let edited = items
            .edit_item(1, ItemForm::new("Chair", "999.0", "300.0", "refinished"))
            .await
            .unwrap();
        assert!(edited.archived);
        assert_eq!(edited.notes, "refinished");

        // Next id continues after the largest remaining id
        let lamp = items
            .create_item(ItemForm::new("Lamp", "15", "5", ""), photo("lamp.png"))
            .await
            .unwrap();
        assert_eq!(lamp.id, 2);
    }
}

#[tokio::test]
async fn test_reads_existing_inventory_file() {
    let temp_dir = TempDir::new().unwrap();
    let existing = r#"[
    {
        "id": 1,
        "name": "Dresser",
        "value": 250.0,
        "cost": 90.0,
        "notes": "",
        "photo_path": "http://127.0.0.1:5000/uploads/dresser.jpg",
        "archived": false
    },
    {
        "id": 4,
        "name": "Bench",
        "value": 60.5,
        "cost": 12.0,
        "photo_path": "http://127.0.0.1:5000/uploads/bench.jpg"
    }
]"#;
    std::fs::write(temp_dir.path().join("furniture_inventory.json"), existing).unwrap();

    let state = create_app(&temp_dir).await;
    let items = state.items_service.all_items().await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[1].notes, "");
    assert!(!items[1].archived);

    let created = state
        .items_service
        .create_item(ItemForm::new("Mirror", "75", "30", ""), photo("mirror.gif"))
        .await
        .unwrap();
    assert_eq!(created.id, 5);
}

#[tokio::test]
async fn test_untouched_file_is_stable_across_writes() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_app(&temp_dir).await;
    let data_file = temp_dir.path().join("furniture_inventory.json");

    state
        .items_service
        .create_item(ItemForm::new("Shelf", "45.25", "10", "pine"), photo("shelf.png"))
        .await
        .unwrap();
    state.items_service.archive_item(1).await.unwrap();
    let before = std::fs::read(&data_file).unwrap();

    // Archiving an archived item rewrites identical bytes
    state.items_service.archive_item(1).await.unwrap();
    assert_eq!(std::fs::read(&data_file).unwrap(), before);
}

#[tokio::test]
async fn test_corrupt_inventory_fails_without_data_loss() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_app(&temp_dir).await;
    let data_file = temp_dir.path().join("furniture_inventory.json");

    std::fs::write(&data_file, "[{\"id\": 1,").unwrap();

    let result = state.items_service.list_items(ItemFilter::Active).await;
    assert!(matches!(result, Err(AppError::Persistence(_))));

    let result = state.items_service.archive_item(1).await;
    assert!(matches!(result, Err(AppError::Persistence(_))));

    assert_eq!(std::fs::read_to_string(&data_file).unwrap(), "[{\"id\": 1,");
}

#[tokio::test]
async fn test_photos_are_not_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_app(&temp_dir).await;

    let first = state
        .items_service
        .create_item(
            ItemForm::new("Chair A", "1", "1", ""),
            Some(PhotoUpload::new("chair.jpg", b"first".to_vec())),
        )
        .await
        .unwrap();
    let second = state
        .items_service
        .create_item(
            ItemForm::new("Chair B", "1", "1", ""),
            Some(PhotoUpload::new("chair.jpg", b"second".to_vec())),
        )
        .await
        .unwrap();

    assert_ne!(first.photo_path, second.photo_path);
    assert_eq!(
        state.items_service.photo_data("chair.jpg").await.unwrap(),
        b"first"
    );
    assert_eq!(
        state.items_service.photo_data("chair-1.jpg").await.unwrap(),
        b"second"
    );
}
