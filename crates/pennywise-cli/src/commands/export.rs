//! CSV export command

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use pennywise_core::db::Database;

/// Write all expenses as CSV to a file, or to stdout when no path is given
pub fn cmd_export(db: &Database, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let count = db
                .export_expenses_to_file(path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            println!("📄 Exported {} expenses to {}", count, path.display());
        }
        None => {
            let csv = db.export_expenses_csv()?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(csv.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
