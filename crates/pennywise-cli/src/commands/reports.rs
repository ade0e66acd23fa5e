//! Report command implementations

use anyhow::Result;
use chrono::NaiveDate;
use pennywise_core::analytics::{
    budget_suggestions, category_totals, predict_next_month, ExpensePredictor,
};
use pennywise_core::db::Database;
use pennywise_core::models::{
    BudgetStatus, PredictionConfidence, RollingForecast, YearMonth,
};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn cmd_report_categories(db: &Database, json: bool) -> Result<()> {
    let totals = category_totals(&db.list_expenses()?);

    if json {
        return print_json(&totals);
    }

    println!();
    println!("📊 Spending by Category");
    println!();

    if totals.category_totals.is_empty() {
        println!("   No expenses recorded.");
        return Ok(());
    }

    let mut ranked: Vec<_> = totals.category_totals.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(a.1));

    for (category, amount) in ranked {
        let share = if totals.total_spending > 0.0 {
            amount / totals.total_spending * 100.0
        } else {
            0.0
        };
        println!("   {:15} {:>12.2}  ({:>4.1}%)", category, amount, share);
    }
    println!("   {}", "-".repeat(36));
    println!("   {:15} {:>12.2}", "Total", totals.total_spending);

    Ok(())
}

pub fn cmd_report_monthly(db: &Database, json: bool) -> Result<()> {
    let monthly = db.expenses_by_month()?;

    if json {
        return print_json(&monthly);
    }

    println!();
    println!("📅 Monthly Spending");

    if monthly.is_empty() {
        println!();
        println!("   No expenses recorded.");
        return Ok(());
    }

    for (month, categories) in monthly.iter().rev() {
        let total: f64 = categories.values().sum();
        println!();
        println!("   {}  total {:.2}", month, total);
        for (category, amount) in categories {
            println!("      {:15} {:>12.2}", category, amount);
        }
    }

    Ok(())
}

/// This month's spending against each budget limit
pub fn cmd_report_budget(db: &Database, today: NaiveDate, json: bool) -> Result<()> {
    let salary = db.get_salary()?;
    let limits = db.get_budget_limits(salary)?;
    let month = YearMonth::from_date(today);
    let suggestions = budget_suggestions(&db.list_expenses()?, salary, &limits, month);

    if json {
        return print_json(&suggestions);
    }

    println!();
    println!("🎯 Budget Status for {}", month);
    println!();

    if salary == 0.0 {
        println!("   No salary set, so there are no limits to check.");
        println!("   Set one with: pennywise salary 50000");
        println!();
    }

    for row in &suggestions {
        let icon = match row.status {
            BudgetStatus::OverBudget => "🔴",
            BudgetStatus::Warning => "🟡",
            BudgetStatus::OnTrack => "🟢",
            BudgetStatus::Info => "📋",
        };
        println!(
            "   {} {:16} {:>10.2} / {:>10.2}  ({:>5.1}%)",
            icon, row.category, row.current_spending, row.budget_limit, row.percentage
        );
        println!("      {}", row.suggestion);
    }

    Ok(())
}

/// Next month's total from the three most recent months
pub fn cmd_report_predict(db: &Database, json: bool) -> Result<()> {
    let prediction = predict_next_month(&db.expenses_by_month()?);

    if json {
        return print_json(&prediction);
    }

    let confidence = match &prediction.confidence {
        PredictionConfidence::Score(score) => format!("{:.0}%", score * 100.0),
        PredictionConfidence::Label(label) => label.clone(),
    };

    println!();
    println!("🔮 Next Month Prediction");
    println!();
    println!("   Predicted spending: {:.2}", prediction.predicted_amount);
    println!("   Confidence:         {}", confidence);
    println!(
        "   Trend:              {}",
        serde_json::to_value(prediction.trend)?
            .as_str()
            .unwrap_or_default()
    );

    Ok(())
}

/// Rolling average over the trailing six months
pub fn cmd_report_forecast(db: &Database, json: bool) -> Result<()> {
    let forecast = ExpensePredictor::new().predict(&db.list_expenses()?);

    if json {
        return print_json(&forecast);
    }

    println!();
    println!("📈 Spending Forecast");
    println!();

    match &forecast {
        RollingForecast::Insufficient { prediction, .. } => {
            println!("   {}", prediction);
        }
        RollingForecast::Forecast {
            predicted_amount,
            confidence,
            trend,
            months_used,
            monthly_sums,
        } => {
            println!("   Predicted spending: {:.2}", predicted_amount);
            println!("   Confidence:         {:?}", confidence);
            println!("   Trend:              {:?}", trend);
            println!();
            for month in months_used {
                let total = monthly_sums.get(month).copied().unwrap_or(0.0);
                println!("   {}  {:>12.2}", month, total);
            }
        }
    }

    Ok(())
}
