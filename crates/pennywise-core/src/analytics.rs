//! Spending aggregation, budget suggestions and next-month prediction
//!
//! Everything here is pure: callers load expenses, salary and limits from the
//! [`Database`](crate::db::Database) and pass them in.

use std::collections::BTreeMap;

use crate::models::{
    round2, BudgetStatus, BudgetSuggestion, Category, CategoryTotals, Expense, ForecastConfidence,
    MonthlySpending, NextMonthPrediction, PredictionConfidence, PredictionTrend, RollingForecast,
    Trend, YearMonth,
};

/// Category name used for the trailing summary row of [`budget_suggestions`]
pub const MONTHLY_SUMMARY: &str = "Monthly Summary";

const INSUFFICIENT_DATA: &str = "Insufficient data";

/// Total spend per category plus the grand total
pub fn category_totals(expenses: &[Expense]) -> CategoryTotals {
    let mut category_totals: BTreeMap<Category, f64> = BTreeMap::new();
    let mut total_spending = 0.0;

    for expense in expenses {
        *category_totals.entry(expense.category).or_insert(0.0) += expense.amount;
        total_spending += expense.amount;
    }

    CategoryTotals {
        category_totals,
        total_spending,
    }
}

/// Compare this month's spending against each category's budget limit
///
/// One row per category in `limits`, then a "Monthly Summary" row with the
/// salary as its limit. Expenses outside `current_month` are ignored.
pub fn budget_suggestions(
    expenses: &[Expense],
    salary: f64,
    limits: &BTreeMap<Category, f64>,
    current_month: YearMonth,
) -> Vec<BudgetSuggestion> {
    let mut spending: BTreeMap<Category, f64> = BTreeMap::new();
    let mut month_total = 0.0;

    for expense in expenses.iter().filter(|e| current_month.contains(e.date)) {
        *spending.entry(expense.category).or_insert(0.0) += expense.amount;
        month_total += expense.amount;
    }

    let mut suggestions: Vec<BudgetSuggestion> = limits
        .iter()
        .map(|(&category, &limit)| {
            let spent = spending.get(&category).copied().unwrap_or(0.0);
            let percentage = if limit > 0.0 {
                spent / limit * 100.0
            } else {
                0.0
            };
            let status = BudgetStatus::from_percentage(percentage);

            BudgetSuggestion {
                category: category.to_string(),
                budget_limit: limit,
                current_spending: spent,
                percentage,
                status,
                suggestion: suggestion_text(status, category, percentage),
            }
        })
        .collect();

    suggestions.push(BudgetSuggestion {
        category: MONTHLY_SUMMARY.to_string(),
        budget_limit: salary,
        current_spending: month_total,
        percentage: if salary > 0.0 {
            month_total / salary * 100.0
        } else {
            0.0
        },
        status: BudgetStatus::Info,
        suggestion: format!(
            "Total spent: ₹{:.2} | Remaining: ₹{:.2}",
            month_total,
            salary - month_total
        ),
    });

    suggestions
}

fn suggestion_text(status: BudgetStatus, category: Category, percentage: f64) -> String {
    match status {
        BudgetStatus::OverBudget => format!(
            "⚠️ You've exceeded your {} budget! Consider reducing expenses.",
            category
        ),
        BudgetStatus::Warning => format!(
            "📊 You're using {:.0}% of your {} budget. Be careful!",
            percentage, category
        ),
        BudgetStatus::OnTrack | BudgetStatus::Info => format!(
            "✅ You're doing great! {:.0}% of {} budget used.",
            percentage, category
        ),
    }
}

/// Predict next month's total from the three most recent months
pub fn predict_next_month(monthly: &MonthlySpending) -> NextMonthPrediction {
    if monthly.is_empty() {
        return NextMonthPrediction {
            predicted_amount: 0.0,
            confidence: PredictionConfidence::Score(0.0),
            trend: PredictionTrend::InsufficientData,
        };
    }

    // Most recent first
    let totals: Vec<f64> = monthly
        .values()
        .rev()
        .take(3)
        .map(|categories| categories.values().sum())
        .collect();

    if totals.len() < 2 {
        return NextMonthPrediction {
            predicted_amount: 0.0,
            confidence: PredictionConfidence::Score(0.5),
            trend: PredictionTrend::InsufficientData,
        };
    }

    let mean = totals.iter().sum::<f64>() / totals.len() as f64;
    let newest = totals[0];
    let oldest = totals[totals.len() - 1];

    NextMonthPrediction {
        predicted_amount: round2(mean),
        confidence: PredictionConfidence::Label("75%".to_string()),
        trend: Trend::between(oldest, newest).into(),
    }
}

/// Rolling-average forecaster over a trailing window of months
#[derive(Debug, Clone)]
pub struct ExpensePredictor {
    window: usize,
}

impl ExpensePredictor {
    pub const DEFAULT_WINDOW: usize = 6;

    pub fn new() -> Self {
        Self {
            window: Self::DEFAULT_WINDOW,
        }
    }

    pub fn with_window(months: usize) -> Self {
        Self {
            window: months.max(1),
        }
    }

    /// Forecast next month's total from raw expenses
    ///
    /// Confidence reflects how many months the window actually covered, not
    /// the window size.
    pub fn predict(&self, expenses: &[Expense]) -> RollingForecast {
        let mut monthly: BTreeMap<YearMonth, f64> = BTreeMap::new();
        for expense in expenses {
            *monthly.entry(YearMonth::from_date(expense.date)).or_insert(0.0) += expense.amount;
        }

        if monthly.is_empty() {
            return RollingForecast::Insufficient {
                predicted_amount: 0.0,
                prediction: INSUFFICIENT_DATA.to_string(),
            };
        }

        let skip = monthly.len().saturating_sub(self.window);
        let selected: Vec<(YearMonth, f64)> = monthly.into_iter().skip(skip).collect();
        let amounts: Vec<f64> = selected.iter().map(|(_, amount)| *amount).collect();

        let mean = amounts.iter().sum::<f64>() / amounts.len() as f64;
        let first = amounts[0];
        let last = amounts[amounts.len() - 1];

        RollingForecast::Forecast {
            predicted_amount: round2(mean),
            confidence: ForecastConfidence::from_month_count(amounts.len()),
            trend: Trend::between(first, last),
            months_used: selected.iter().map(|(month, _)| *month).collect(),
            monthly_sums: selected
                .into_iter()
                .map(|(month, amount)| (month, round2(amount)))
                .collect(),
        }
    }
}

impl Default for ExpensePredictor {
    fn default() -> Self {
        Self::new()
    }
}
