//! Photo serving
//!
//! Streams stored photos back by file name.

use crate::app::AppState;
use crate::error::Result;
use crate::storage::photo_store::content_type_for;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

/// Serve a stored photo, 404 when it does not exist
pub async fn photo(State(state): State<AppState>, Path(filename): Path<String>) -> Result<Response> {
    let data = state.items_service.photo_data(&filename).await?;

    Ok(([(header::CONTENT_TYPE, content_type_for(&filename))], data).into_response())
}
