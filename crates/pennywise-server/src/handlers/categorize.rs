//! Description categorization handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use serde::Deserialize;

use crate::{read_json, AppError, AppState};
use pennywise_core::classifier::{categorize_simple, Classification, SimpleCategorization};

/// Request body for both categorization endpoints
#[derive(Debug, Deserialize)]
pub struct CategorizeRequest {
    pub description: Option<String>,
}

/// POST /categorize - Keyword-table categorization
///
/// A missing description is treated as empty and comes back as Other.
pub async fn categorize(request: Request) -> Result<Json<SimpleCategorization>, AppError> {
    let req: CategorizeRequest = read_json(request).await?;
    Ok(Json(categorize_simple(
        req.description.as_deref().unwrap_or_default(),
    )))
}

/// POST /classify - Full classifier cascade with probabilities
pub async fn classify(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Classification>, AppError> {
    let req: CategorizeRequest = read_json(request).await?;
    let description = req
        .description
        .ok_or_else(|| AppError::bad_request("Description is required"))?;

    Ok(Json(state.classifier.classify(&description)))
}
