//! Spending analytics handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};
use pennywise_core::analytics::category_totals;
use pennywise_core::models::{CategoryTotals, MonthlySpending};

/// GET /analytics/categories - Total spend per category and overall
pub async fn category_analytics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoryTotals>, AppError> {
    let expenses = state.db.list_expenses()?;
    Ok(Json(category_totals(&expenses)))
}

#[derive(Debug, Serialize)]
pub struct MonthlyResponse {
    pub monthly_data: MonthlySpending,
}

/// GET /analytics/monthly - Spend per category for every month, keyed `YYYY-MM`
pub async fn monthly_analytics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MonthlyResponse>, AppError> {
    let monthly_data = state.db.expenses_by_month()?;
    Ok(Json(MonthlyResponse { monthly_data }))
}
