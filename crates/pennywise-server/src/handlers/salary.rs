//! Monthly salary handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{read_json, AppError, AppState};

#[derive(Debug, Serialize)]
pub struct SalaryResponse {
    pub monthly_salary: f64,
}

/// GET /salary - Current monthly salary (0 when never set)
pub async fn get_salary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SalaryResponse>, AppError> {
    let monthly_salary = state.db.get_salary()?;
    Ok(Json(SalaryResponse { monthly_salary }))
}

/// Request body for setting the salary
#[derive(Debug, Deserialize)]
pub struct SetSalaryRequest {
    pub monthly_salary: Option<f64>,
}

/// POST /salary - Overwrite the monthly salary
pub async fn set_salary(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<SalaryResponse>, AppError> {
    let req: SetSalaryRequest = read_json(request).await?;
    let amount = req
        .monthly_salary
        .ok_or_else(|| AppError::bad_request("monthly_salary is required"))?;

    let monthly_salary = state.db.set_salary(amount).map_err(AppError::from_core)?;
    info!("Monthly salary set to {:.2}", monthly_salary);

    Ok(Json(SalaryResponse { monthly_salary }))
}
