//! Expense operations

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use rusqlite::params;

use super::{parse_date, Database, DATE_FORMAT};
use crate::error::{Error, Result};
use crate::models::{Category, Expense, MonthlySpending, NewExpense, YearMonth};

impl Database {
    /// Insert an expense dated today, returning the new expense ID
    pub fn add_expense(&self, expense: &NewExpense) -> Result<i64> {
        self.add_expense_on(expense, Local::now().date_naive())
    }

    /// Insert an expense with an explicit date
    pub fn add_expense_on(&self, expense: &NewExpense, date: NaiveDate) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO expenses (description, amount, category, date, confidence)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                expense.description,
                expense.amount,
                expense.category.as_str(),
                date.format(DATE_FORMAT).to_string(),
                expense.confidence,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List all expenses, newest date first
    ///
    /// Expenses sharing a date come back in reverse insertion order.
    pub fn list_expenses(&self) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, description, amount, category, date, confidence
            FROM expenses
            ORDER BY date DESC, id DESC
            "#,
        )?;

        let expenses = stmt
            .query_map([], |row| {
                let category: String = row.get(3)?;
                let date: String = row.get(4)?;
                Ok(Expense {
                    id: row.get(0)?,
                    description: row.get(1)?,
                    amount: row.get(2)?,
                    category: Category::from_stored(&category),
                    date: parse_date(4, &date)?,
                    confidence: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Count stored expenses
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Sum expenses by calendar month and category
    pub fn expenses_by_month(&self) -> Result<MonthlySpending> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT strftime('%Y-%m', date) AS month, category, SUM(amount)
            FROM expenses
            GROUP BY month, category
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut monthly: MonthlySpending = BTreeMap::new();
        for (month, category, total) in rows {
            let month: YearMonth = month.parse().map_err(Error::InvalidData)?;
            // Unknown stored categories fold into Other, so accumulate
            *monthly
                .entry(month)
                .or_default()
                .entry(Category::from_stored(&category))
                .or_insert(0.0) += total;
        }

        Ok(monthly)
    }
}
