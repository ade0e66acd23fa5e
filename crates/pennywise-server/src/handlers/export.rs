//! CSV export handler

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Response, StatusCode},
};
use tracing::info;

use crate::{AppError, AppState};
use pennywise_core::export::CSV_FILENAME;

/// GET /export/csv - Download every expense as CSV
pub async fn export_csv(State(state): State<Arc<AppState>>) -> Result<Response<Body>, AppError> {
    let csv = state.db.export_expenses_csv()?;
    let lines = csv.lines().count().saturating_sub(1);
    info!("Exported {} expenses to CSV", lines);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", CSV_FILENAME),
        )
        .body(Body::from(csv))
        .map_err(|e| AppError::internal(&e.to_string()))
}
