//! Salary and budget goal operations

use std::collections::BTreeMap;

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::{Error, Result};
use crate::models::{round2, Category};

impl Database {
    /// Get the monthly salary (0 when never set)
    pub fn get_salary(&self) -> Result<f64> {
        let conn = self.conn()?;
        let salary: Option<f64> = conn
            .query_row(
                "SELECT monthly_salary FROM user_salary WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(salary.unwrap_or(0.0))
    }

    /// Overwrite the monthly salary, returning the stored value
    pub fn set_salary(&self, amount: f64) -> Result<f64> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidData("Salary cannot be negative".to_string()));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO user_salary (id, monthly_salary) VALUES (1, ?1)
            ON CONFLICT(id) DO UPDATE SET monthly_salary = excluded.monthly_salary
            "#,
            params![amount],
        )?;

        Ok(amount)
    }

    /// Get budget goals as percentages of salary
    pub fn get_budget_goals(&self) -> Result<BTreeMap<Category, f64>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT category, percentage FROM budget_goals")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows
            .into_iter()
            .filter_map(|(category, percentage)| {
                category
                    .parse::<Category>()
                    .ok()
                    .map(|category| (category, percentage))
            })
            .collect())
    }

    /// Set the budget goal for a category, replacing any existing value
    pub fn set_budget_goal(&self, category: Category, percentage: f64) -> Result<()> {
        if !(0.0..=100.0).contains(&percentage) {
            return Err(Error::InvalidData(
                "Budget percentage must be between 0 and 100".to_string(),
            ));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO budget_goals (category, percentage) VALUES (?1, ?2)
            ON CONFLICT(category) DO UPDATE SET percentage = excluded.percentage
            "#,
            params![category.as_str(), percentage],
        )?;

        Ok(())
    }

    /// Budget limits in currency for a given salary
    ///
    /// Each limit is `percentage / 100 * salary` rounded to cents. Returns an
    /// empty map when the salary is zero.
    pub fn get_budget_limits(&self, salary: f64) -> Result<BTreeMap<Category, f64>> {
        if salary == 0.0 {
            return Ok(BTreeMap::new());
        }

        Ok(self
            .get_budget_goals()?
            .into_iter()
            .map(|(category, percentage)| (category, round2(percentage / 100.0 * salary)))
            .collect())
    }
}
