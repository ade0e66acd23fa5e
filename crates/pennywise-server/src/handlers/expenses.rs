//! Expense handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{read_json, AppError, AppState};
use pennywise_core::models::{Category, Expense, NewExpense};

#[derive(Debug, Serialize)]
pub struct ExpensesResponse {
    pub expenses: Vec<Expense>,
}

/// GET /expenses - All expenses, newest first
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExpensesResponse>, AppError> {
    let expenses = state.db.list_expenses()?;
    Ok(Json(ExpensesResponse { expenses }))
}

/// Request body for adding an expense
///
/// Every field is optional at the JSON level so missing values produce a
/// validation message instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CreateExpenseResponse {
    pub id: i64,
    pub success: bool,
}

/// POST /expenses - Add an expense dated today
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<CreateExpenseResponse>), AppError> {
    let req: CreateExpenseRequest = read_json(request).await?;

    let description = req
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Description and amount are required"))?;
    let amount = req
        .amount
        .filter(|a| *a != 0.0)
        .ok_or_else(|| AppError::bad_request("Description and amount are required"))?;

    let category = match req.category.as_deref() {
        Some(c) if !c.trim().is_empty() => c
            .parse::<Category>()
            .map_err(|e| AppError::bad_request(&e))?,
        _ => Category::Other,
    };

    let expense = NewExpense::new(description, amount, category)
        .with_confidence(req.confidence.unwrap_or(NewExpense::DEFAULT_CONFIDENCE));
    expense.validate().map_err(AppError::from_core)?;

    let id = state.db.add_expense(&expense)?;
    info!(
        "Added expense {} ({} {:.2})",
        id, expense.category, expense.amount
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateExpenseResponse { id, success: true }),
    ))
}
