//! Pennywise CLI - Personal expense tracker
//!
//! Usage:
//!   pennywise init                      Initialize database
//!   pennywise add "Coffee" 4.50 --auto  Add an expense, classifying it
//!   pennywise report budget             This month's budget status
//!   pennywise serve --port 8000         Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Serve {
            port,
            host,
            static_dir,
            allowed_origin,
        } => {
            commands::cmd_serve(&cli.db, &host, port, static_dir.as_deref(), allowed_origin)
                .await
        }
        Commands::Seed { count, rng_seed } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_seed(&db, count, rng_seed)
        }
        Commands::Add {
            description,
            amount,
            category,
            auto,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(&db, &description, amount, category.as_deref(), auto).map(|_| ())
        }
        Commands::List { limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_list(&db, limit)
        }
        Commands::Salary { amount } => {
            let db = commands::open_db(&cli.db)?;
            match amount {
                Some(amount) => commands::cmd_salary_set(&db, amount),
                None => commands::cmd_salary_show(&db),
            }
        }
        Commands::Goals {
            category,
            percentage,
        } => {
            let db = commands::open_db(&cli.db)?;
            match (category, percentage) {
                (Some(category), Some(percentage)) => {
                    commands::cmd_goals_set(&db, &category, percentage)
                }
                _ => commands::cmd_goals_list(&db),
            }
        }
        Commands::Categorize { text } => commands::cmd_categorize(&text),
        Commands::Classify { text } => commands::cmd_classify(&text),
        Commands::Report { json, report_type } => {
            let db = commands::open_db(&cli.db)?;
            match report_type {
                ReportType::Categories => commands::cmd_report_categories(&db, json),
                ReportType::Monthly => commands::cmd_report_monthly(&db, json),
                ReportType::Budget => {
                    let today = chrono::Local::now().date_naive();
                    commands::cmd_report_budget(&db, today, json)
                }
                ReportType::Predict => commands::cmd_report_predict(&db, json),
                ReportType::Forecast => commands::cmd_report_forecast(&db, json),
            }
        }
        Commands::Export { output } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_export(&db, output.as_deref())
        }
    }
}
