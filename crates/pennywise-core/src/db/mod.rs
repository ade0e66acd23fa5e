//! Database access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `expenses` - Expense inserts, listing and monthly grouping
//! - `budget` - Salary singleton, budget goals and derived limits

use chrono::NaiveDate;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::Result;
use crate::models::Category;

mod budget;
mod expenses;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Date format used for the `expenses.date` column
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a stored `YYYY-MM-DD` date column
pub(crate) fn parse_date(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) the database at `path` and run migrations
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create an isolated throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because every pooled
    /// connection to `:memory:` would see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "pennywise_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any leftover file from a previous run
        let _ = std::fs::remove_file(&path);

        Self::new(&path.to_string_lossy())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Seed default budget goals and the zero salary
    ///
    /// Each table is only seeded when it is empty, so this is safe to call on
    /// every startup.
    pub fn seed_defaults(&self) -> Result<()> {
        let conn = self.conn()?;

        let goal_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM budget_goals", [], |row| row.get(0))?;
        if goal_count == 0 {
            for category in Category::ALL {
                conn.execute(
                    "INSERT INTO budget_goals (category, percentage) VALUES (?1, ?2)",
                    rusqlite::params![category.as_str(), category.default_budget_percentage()],
                )?;
            }
            info!("Seeded {} default budget goals", Category::ALL.len());
        }

        let salary_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM user_salary", [], |row| row.get(0))?;
        if salary_count == 0 {
            conn.execute(
                "INSERT INTO user_salary (id, monthly_salary) VALUES (1, 0)",
                [],
            )?;
            info!("Initialized monthly salary to 0");
        }

        Ok(())
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the writer
            PRAGMA journal_mode = WAL;

            -- Synchronous NORMAL: good balance of safety and performance
            PRAGMA synchronous = NORMAL;

            -- Expenses (immutable once inserted)
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount >= 0),
                category TEXT NOT NULL,
                date DATE NOT NULL,                        -- YYYY-MM-DD
                confidence REAL NOT NULL DEFAULT 0.8,      -- classifier confidence at insert
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
            CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category);

            -- Monthly salary (single row, id = 1)
            CREATE TABLE IF NOT EXISTS user_salary (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                monthly_salary REAL NOT NULL DEFAULT 0 CHECK (monthly_salary >= 0)
            );

            -- Budget goals as a percentage of salary, keyed by category
            CREATE TABLE IF NOT EXISTS budget_goals (
                category TEXT PRIMARY KEY,
                percentage REAL NOT NULL CHECK (percentage >= 0 AND percentage <= 100)
            );
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}
