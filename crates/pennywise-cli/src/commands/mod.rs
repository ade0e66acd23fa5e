//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budget` - Salary and budget goal commands
//! - `classify` - Description categorization commands
//! - `core` - Core commands (init) and shared utilities (open_db)
//! - `expenses` - Expense commands (add, list)
//! - `export` - CSV export command
//! - `reports` - Report generation commands
//! - `seed` - Sample data command
//! - `serve` - Web server command

pub mod budget;
pub mod classify;
pub mod core;
pub mod expenses;
pub mod export;
pub mod reports;
pub mod seed;
pub mod serve;

// Re-export command functions for main.rs
pub use budget::*;
pub use classify::*;
pub use core::*;
pub use expenses::*;
pub use export::*;
pub use reports::*;
pub use seed::*;
pub use serve::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
