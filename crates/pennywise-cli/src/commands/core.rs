//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use pennywise_core::db::Database;

/// Open the database, creating the schema and default budget goals if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    let db = Database::new(path_str).context("Failed to open database")?;
    db.seed_defaults().context("Failed to seed defaults")?;
    tracing::debug!("Opened database at {}", db.path());
    Ok(db)
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;

    let goals = db.get_budget_goals().context("Failed to read budget goals")?;
    println!("   Budget goals: {} categories", goals.len());
    println!("   Monthly salary: {:.2}", db.get_salary()?);

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Set your salary: pennywise salary 50000");
    println!("  2. Add an expense: pennywise add \"Coffee\" 4.50 --auto");
    println!("  3. Start web UI: pennywise serve");

    Ok(())
}
