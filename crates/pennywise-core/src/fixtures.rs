//! Sample data for local development
//!
//! Nothing calls this implicitly; the CLI exposes it as `pennywise seed`.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use tracing::info;

use crate::db::Database;
use crate::error::Result;
use crate::models::{round2, Category, NewExpense};

/// Months of history generated, ending just before `today`
pub const SAMPLE_MONTHS: usize = 3;

/// Expenses generated per month by [`seed_sample_expenses`]
pub const SAMPLE_PER_MONTH: usize = 15;

const SAMPLE_DESCRIPTIONS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &["Groceries", "Restaurant", "Coffee Shop", "Food Delivery", "Lunch"],
    ),
    (
        Category::Transportation,
        &["Gas Station", "Bus Fare", "Taxi", "Car Maintenance", "Parking"],
    ),
    (
        Category::Entertainment,
        &["Movie Tickets", "Concert", "Netflix", "Sports Event"],
    ),
    (
        Category::Utilities,
        &["Electric Bill", "Internet", "Phone Bill", "Water Bill"],
    ),
    (
        Category::Shopping,
        &["Clothing", "Electronics", "Amazon", "Department Store"],
    ),
    (
        Category::Healthcare,
        &["Pharmacy", "Doctor Visit", "Health Insurance", "Gym Membership"],
    ),
];

/// Seed three months of random expenses, fifteen per month
///
/// Does nothing when the store already holds expenses. Returns the number of
/// expenses inserted.
pub fn seed_sample_expenses<R: Rng>(
    db: &Database,
    rng: &mut R,
    today: NaiveDate,
) -> Result<usize> {
    seed_sample_expenses_per_month(db, rng, today, SAMPLE_PER_MONTH)
}

/// Same as [`seed_sample_expenses`] with a custom number of expenses per month
pub fn seed_sample_expenses_per_month<R: Rng>(
    db: &Database,
    rng: &mut R,
    today: NaiveDate,
    per_month: usize,
) -> Result<usize> {
    if db.count_expenses()? > 0 {
        info!("Expenses already present, skipping sample data");
        return Ok(0);
    }

    let mut inserted = 0;
    for month in 0..SAMPLE_MONTHS {
        let base = today - Duration::days(90 - month as i64 * 30);
        for _ in 0..per_month {
            let (category, descriptions) =
                SAMPLE_DESCRIPTIONS[rng.gen_range(0..SAMPLE_DESCRIPTIONS.len())];
            let description = descriptions[rng.gen_range(0..descriptions.len())];
            let amount = round2(rng.gen_range(5.0..=200.0));
            let confidence = round2(rng.gen_range(0.70..=0.95));
            let date = base + Duration::days(rng.gen_range(0..=29));

            db.add_expense_on(
                &NewExpense::new(description, amount, category).with_confidence(confidence),
                date,
            )?;
            inserted += 1;
        }
    }

    info!("Seeded {} sample expenses", inserted);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_seed_sample_expenses() {
        let db = Database::in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let inserted = seed_sample_expenses(&db, &mut rng, today()).unwrap();
        assert_eq!(inserted, SAMPLE_MONTHS * SAMPLE_PER_MONTH);

        let expenses = db.list_expenses().unwrap();
        assert_eq!(expenses.len(), 45);

        let earliest = today() - Duration::days(90);
        for expense in &expenses {
            assert_ne!(expense.category, Category::Other);
            assert!((5.0..=200.0).contains(&expense.amount));
            assert!((0.70..=0.95).contains(&expense.confidence));
            assert!(expense.date >= earliest && expense.date < today());
        }
    }

    #[test]
    fn test_seed_skips_non_empty_store() {
        let db = Database::in_memory().unwrap();
        db.add_expense(&NewExpense::new("Existing", 1.0, Category::Other))
            .unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(seed_sample_expenses(&db, &mut rng, today()).unwrap(), 0);
        assert_eq!(db.count_expenses().unwrap(), 1);
    }

    #[test]
    fn test_seed_is_deterministic_for_a_seed() {
        let a = Database::in_memory().unwrap();
        let b = Database::in_memory().unwrap();
        seed_sample_expenses_per_month(&a, &mut StdRng::seed_from_u64(42), today(), 4).unwrap();
        seed_sample_expenses_per_month(&b, &mut StdRng::seed_from_u64(42), today(), 4).unwrap();

        let strip = |db: &Database| -> Vec<(String, f64, Category, NaiveDate)> {
            db.list_expenses()
                .unwrap()
                .into_iter()
                .map(|e| (e.description, e.amount, e.category, e.date))
                .collect()
        };
        assert_eq!(strip(&a), strip(&b));
        assert_eq!(a.count_expenses().unwrap(), 12);
    }
}
