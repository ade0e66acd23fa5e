//! Salary and budget goal commands

use anyhow::{Context, Result};
use pennywise_core::db::Database;
use pennywise_core::models::Category;

pub fn cmd_salary_show(db: &Database) -> Result<()> {
    let salary = db.get_salary()?;
    if salary == 0.0 {
        println!("💰 No salary set. Set one with: pennywise salary 50000");
    } else {
        println!("💰 Monthly salary: {:.2}", salary);
    }
    Ok(())
}

pub fn cmd_salary_set(db: &Database, amount: f64) -> Result<()> {
    let salary = db.set_salary(amount).context("Failed to set salary")?;
    println!("✅ Monthly salary set to {:.2}", salary);
    Ok(())
}

pub fn cmd_goals_list(db: &Database) -> Result<()> {
    let goals = db.get_budget_goals()?;
    let salary = db.get_salary()?;
    let limits = db.get_budget_limits(salary)?;

    println!();
    println!("🎯 Budget Goals");
    println!();
    println!("{:15}  {:>6}  {:>12}", "Category", "Share", "Limit");
    println!("{}", "-".repeat(37));

    for (category, percentage) in &goals {
        let limit = limits
            .get(category)
            .map(|l| format!("{:.2}", l))
            .unwrap_or_else(|| "-".to_string());
        println!("{:15}  {:>5.1}%  {:>12}", category, percentage, limit);
    }

    let total: f64 = goals.values().sum();
    println!("{}", "-".repeat(37));
    println!("{:15}  {:>5.1}%", "Total", total);

    if salary == 0.0 {
        println!();
        println!("   Set a salary to see limits: pennywise salary 50000");
    }

    Ok(())
}

pub fn cmd_goals_set(db: &Database, category: &str, percentage: f64) -> Result<()> {
    let category: Category = category.parse().map_err(anyhow::Error::msg)?;
    db.set_budget_goal(category, percentage)
        .context("Failed to update budget goal")?;
    println!("✅ {} budget set to {:.1}% of salary", category, percentage);
    Ok(())
}
