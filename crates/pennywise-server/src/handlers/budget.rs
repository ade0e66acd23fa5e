//! Budget goal and suggestion handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{read_json, AppError, AppState};
use pennywise_core::analytics;
use pennywise_core::models::{BudgetSuggestion, Category, YearMonth};

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<BudgetSuggestion>,
}

/// GET /budget/suggestions - This month's spend against each budget limit
pub async fn budget_suggestions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let salary = state.db.get_salary()?;
    let limits = state.db.get_budget_limits(salary)?;
    let expenses = state.db.list_expenses()?;
    let current_month = YearMonth::from_date(Local::now().date_naive());

    let suggestions = analytics::budget_suggestions(&expenses, salary, &limits, current_month);
    Ok(Json(SuggestionsResponse { suggestions }))
}

#[derive(Debug, Serialize)]
pub struct GoalsResponse {
    pub goals: BTreeMap<Category, f64>,
}

/// GET /budget/goals - Budget goals as percentages of salary
pub async fn list_budget_goals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GoalsResponse>, AppError> {
    let goals = state.db.get_budget_goals()?;
    Ok(Json(GoalsResponse { goals }))
}

/// Request body for updating a budget goal
#[derive(Debug, Deserialize)]
pub struct UpdateGoalRequest {
    pub percentage: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub category: Category,
    pub percentage: f64,
}

/// PUT /budget/goals/:category - Overwrite one category's goal
pub async fn update_budget_goal(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    request: Request,
) -> Result<Json<GoalResponse>, AppError> {
    let category: Category = category.parse().map_err(|e: String| AppError::not_found(&e))?;

    let req: UpdateGoalRequest = read_json(request).await?;
    let percentage = req
        .percentage
        .ok_or_else(|| AppError::bad_request("percentage is required"))?;

    state
        .db
        .set_budget_goal(category, percentage)
        .map_err(AppError::from_core)?;
    info!("Budget goal for {} set to {}%", category, percentage);

    Ok(Json(GoalResponse {
        category,
        percentage,
    }))
}
