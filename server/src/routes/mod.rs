//! HTTP routes exposed to the browser
//!
//! This module organizes handlers into logical submodules:
//! - `items`: Item pages and lifecycle actions (upload, edit, archive, delete)
//! - `uploads`: Serving stored photos

pub mod items;
pub mod uploads;

use crate::app::AppState;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

/// Build the router with every inventory endpoint
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        // Item pages
        .route("/", get(items::home))
        .route("/upload", post(items::upload))
        .route("/inventory", get(items::inventory))
        .route("/inventory/read-only", get(items::read_only_inventory))
        .route("/archived", get(items::archived))
        .route("/edit/{item_id}", get(items::edit_form).post(items::edit))
        .route("/archive/{item_id}", post(items::archive))
        .route("/delete/{item_id}", post(items::delete))
        // Photos
        .route("/uploads/{filename}", get(uploads::photo))
        // System
        .route("/info", get(get_app_info))
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Application information structure
#[derive(serde::Serialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub data_file: String,
    pub upload_dir: String,
}

/// Get application information
pub async fn get_app_info(State(state): State<AppState>) -> Json<AppInfo> {
    Json(AppInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data_file: state.config.data_file.to_string_lossy().to_string(),
        upload_dir: state.config.upload_dir.to_string_lossy().to_string(),
    })
}
