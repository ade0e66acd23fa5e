//! CSV export of all stored expenses

use std::path::Path;

use tracing::info;

use crate::db::{Database, DATE_FORMAT};
use crate::error::{Error, Result};
use crate::models::Expense;

/// Column order of the exported file
pub const CSV_HEADER: [&str; 6] = ["ID", "Description", "Amount", "Category", "Date", "Confidence"];

/// File name offered to browsers downloading the export
pub const CSV_FILENAME: &str = "expenses.csv";

/// Render expenses as CSV, one row per expense in the given order
pub fn expenses_to_csv(expenses: &[Expense]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for expense in expenses {
        writer.write_record([
            expense.id.to_string(),
            expense.description.clone(),
            expense.amount.to_string(),
            expense.category.to_string(),
            expense.date.format(DATE_FORMAT).to_string(),
            expense.confidence.to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}

impl Database {
    /// Export every expense, newest first
    pub fn export_expenses_csv(&self) -> Result<String> {
        expenses_to_csv(&self.list_expenses()?)
    }

    /// Write the export to `path`, returning the number of expenses written
    pub fn export_expenses_to_file(&self, path: &Path) -> Result<usize> {
        let expenses = self.list_expenses()?;
        std::fs::write(path, expenses_to_csv(&expenses)?)?;
        info!("Exported {} expenses to {}", expenses.len(), path.display());
        Ok(expenses.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NewExpense};
    use chrono::NaiveDate;

    fn db_with_expenses() -> Database {
        let db = Database::in_memory().unwrap();
        db.add_expense_on(
            &NewExpense::new("Coffee, large", 4.5, Category::Food).with_confidence(0.85),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
        .unwrap();
        db.add_expense_on(
            &NewExpense::new("\"Quoted\" jacket", 89.99, Category::Shopping),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        )
        .unwrap();
        db
    }

    #[test]
    fn test_export_empty_has_header_only() {
        let db = Database::in_memory().unwrap();
        let csv = db.export_expenses_csv().unwrap();
        assert_eq!(csv, "ID,Description,Amount,Category,Date,Confidence\n");
    }

    #[test]
    fn test_export_round_trip() {
        let db = db_with_expenses();
        let expenses = db.list_expenses().unwrap();
        let csv = db.export_expenses_csv().unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(headers, CSV_HEADER);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), expenses.len());

        for (row, expense) in rows.iter().zip(&expenses) {
            assert_eq!(row[0].parse::<i64>().unwrap(), expense.id);
            assert_eq!(&row[1], expense.description);
            assert_eq!(row[2].parse::<f64>().unwrap(), expense.amount);
            assert_eq!(row[3].parse::<Category>().unwrap(), expense.category);
            assert_eq!(
                NaiveDate::parse_from_str(&row[4], DATE_FORMAT).unwrap(),
                expense.date
            );
            assert_eq!(row[5].parse::<f64>().unwrap(), expense.confidence);
        }

        // newest first
        assert_eq!(&rows[0][1], "\"Quoted\" jacket");
        assert_eq!(&rows[1][1], "Coffee, large");
    }

    #[test]
    fn test_export_to_file() {
        let db = db_with_expenses();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let written = db.export_expenses_to_file(&path).unwrap();
        assert_eq!(written, 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, db.export_expenses_csv().unwrap());
    }
}
