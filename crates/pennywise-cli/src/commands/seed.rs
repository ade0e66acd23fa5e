//! Sample data command

use anyhow::{Context, Result};
use pennywise_core::db::Database;
use pennywise_core::fixtures::{seed_sample_expenses_per_month, SAMPLE_MONTHS};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Fill an empty database with random expenses over the last three months
pub fn cmd_seed(db: &Database, per_month: usize, rng_seed: Option<u64>) -> Result<()> {
    let mut rng = match rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let today = chrono::Local::now().date_naive();

    println!(
        "🌱 Seeding {} months of sample expenses ({} per month)...",
        SAMPLE_MONTHS, per_month
    );

    let inserted = seed_sample_expenses_per_month(db, &mut rng, today, per_month)
        .context("Failed to seed sample expenses")?;

    if inserted == 0 {
        println!("   Database already has expenses, nothing to do.");
    } else {
        println!("✅ Added {} sample expenses", inserted);
    }

    Ok(())
}
