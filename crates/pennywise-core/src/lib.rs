//! Pennywise Core Library
//!
//! Shared functionality for the Pennywise expense tracker:
//! - Database access and migrations (expenses, salary, budget goals)
//! - Expense description classification (keyword cascade with a statistical fallback)
//! - Spending analytics, budget suggestions and next-month prediction
//! - CSV export
//! - Sample data fixtures for local development

pub mod analytics;
pub mod classifier;
pub mod db;
pub mod error;
pub mod export;
pub mod fixtures;
pub mod models;

pub use analytics::{
    budget_suggestions, category_totals, predict_next_month, ExpensePredictor, MONTHLY_SUMMARY,
};
pub use classifier::{categorize_simple, Classification, ExpenseClassifier, SimpleCategorization};
pub use db::Database;
pub use error::{Error, Result};
pub use export::{expenses_to_csv, CSV_FILENAME, CSV_HEADER};
pub use models::{
    BudgetStatus, BudgetSuggestion, Category, CategoryTotals, Expense, MonthlySpending,
    NewExpense, NextMonthPrediction, RollingForecast, YearMonth,
};
