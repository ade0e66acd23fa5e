//! Expense command implementations

use anyhow::{Context, Result};
use pennywise_core::classifier::ExpenseClassifier;
use pennywise_core::db::Database;
use pennywise_core::models::{Category, NewExpense};

use super::truncate;

/// Add an expense dated today, returning its id
///
/// An explicit category wins. With `auto` the classifier picks the category
/// and its confidence is stored; otherwise the expense lands in Other.
pub fn cmd_add(
    db: &Database,
    description: &str,
    amount: f64,
    category: Option<&str>,
    auto: bool,
) -> Result<i64> {
    let expense = match (category, auto) {
        (Some(name), _) => {
            let category: Category = name.parse().map_err(anyhow::Error::msg)?;
            NewExpense::new(description, amount, category)
        }
        (None, true) => {
            let classifier =
                ExpenseClassifier::new().context("Failed to build expense classifier")?;
            let result = classifier.classify(description);
            tracing::debug!(probabilities = ?result.all_probabilities, "Classified {:?}", description);
            println!(
                "🤖 Classified as {} ({:.0}% confidence)",
                result.category,
                result.confidence * 100.0
            );
            NewExpense::new(description, amount, result.category)
                .with_confidence(result.confidence)
        }
        (None, false) => NewExpense::new(description, amount, Category::Other),
    };
    expense.validate()?;

    let id = db.add_expense(&expense).context("Failed to add expense")?;
    println!(
        "✅ Added expense #{}: {} {:.2} [{}]",
        id, expense.description, expense.amount, expense.category
    );

    Ok(id)
}

pub fn cmd_list(db: &Database, limit: usize) -> Result<()> {
    let expenses = db.list_expenses()?;

    if expenses.is_empty() {
        println!("No expenses yet. Add one with: pennywise add \"Coffee\" 4.50 --auto");
        return Ok(());
    }

    println!();
    println!(
        "{:>5}  {:10}  {:30}  {:>10}  {:15}  {:>5}",
        "ID", "Date", "Description", "Amount", "Category", "Conf"
    );
    println!("{}", "-".repeat(86));

    for expense in expenses.iter().take(limit) {
        println!(
            "{:>5}  {:10}  {:30}  {:>10.2}  {:15}  {:>4.0}%",
            expense.id,
            expense.date,
            truncate(&expense.description, 30),
            expense.amount,
            expense.category,
            expense.confidence * 100.0
        );
    }

    if expenses.len() > limit {
        println!();
        println!("   ... and {} more", expenses.len() - limit);
    }

    Ok(())
}
