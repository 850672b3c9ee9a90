//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! All services are initialized here and made available through AppState.

use crate::config::AppConfig;
use crate::database::InventoryStore;
use crate::error::Result;
use crate::routes::create_router;
use crate::services::ItemsService;
use crate::storage::PhotoStore;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub items_service: ItemsService,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let config = Arc::new(config);
        let store = InventoryStore::new(config.data_file.clone());
        let photos = PhotoStore::new(config.upload_dir.clone(), config.allowed_extensions.clone());
        let items_service = ItemsService::new(store, photos, config.clone());

        Self {
            config,
            items_service,
        }
    }
}

/// Application setup - called once on startup
pub async fn setup(config: AppConfig) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("Data file: {:?}", config.data_file);
    tracing::info!("Upload directory: {:?}", config.upload_dir);

    // Create the data file and upload directory on first run
    InventoryStore::new(config.data_file.clone())
        .initialize()
        .await?;
    PhotoStore::new(config.upload_dir.clone(), config.allowed_extensions.clone())
        .initialize()
        .await?;

    let state = AppState::new(config);

    tracing::info!("Application initialized successfully");

    Ok(state)
}

/// Start serving requests
pub async fn serve(state: AppState) -> Result<()> {
    let addr = state.config.bind_addr;
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Furniture inventory listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
