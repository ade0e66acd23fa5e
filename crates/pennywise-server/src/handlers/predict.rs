//! Spending prediction handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};
use pennywise_core::analytics::{self, ExpensePredictor};
use pennywise_core::models::{NextMonthPrediction, RollingForecast};

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub prediction: NextMonthPrediction,
}

/// GET /predict/next-month - Average of the last three months
pub async fn predict_next_month(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PredictionResponse>, AppError> {
    let monthly = state.db.expenses_by_month()?;
    Ok(Json(PredictionResponse {
        prediction: analytics::predict_next_month(&monthly),
    }))
}

/// GET /predict/forecast - Rolling average over up to six months
pub async fn forecast(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RollingForecast>, AppError> {
    let expenses = state.db.list_expenses()?;
    Ok(Json(ExpensePredictor::new().predict(&expenses)))
}
