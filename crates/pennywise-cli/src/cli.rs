//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pennywise - Track expenses and stay on budget
#[derive(Parser)]
#[command(name = "pennywise")]
#[command(about = "Self-hosted personal expense tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "pennywise.db", env = "PENNYWISE_DB", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database with default budget goals
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory of static frontend files to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Allowed CORS origin (repeatable; adds to PENNYWISE_ALLOWED_ORIGINS)
        #[arg(long)]
        allowed_origin: Vec<String>,
    },

    /// Fill an empty database with three months of sample expenses
    Seed {
        /// Expenses per month
        #[arg(short, long, default_value = "15")]
        count: usize,

        /// Seed for the random generator (for reproducible data)
        #[arg(long)]
        rng_seed: Option<u64>,
    },

    /// Add an expense dated today
    Add {
        /// What the money was spent on
        description: String,

        /// Amount spent
        #[arg(allow_negative_numbers = true)]
        amount: f64,

        /// Category (Food, Transportation, Entertainment, Shopping, Utilities, Healthcare, Other)
        #[arg(short, long, conflicts_with = "auto")]
        category: Option<String>,

        /// Pick the category with the classifier
        #[arg(long)]
        auto: bool,
    },

    /// List recent expenses
    List {
        /// Maximum number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show or set the monthly salary
    Salary {
        /// New monthly salary
        #[arg(allow_negative_numbers = true)]
        amount: Option<f64>,
    },

    /// Show budget goals, or set one category's percentage
    Goals {
        /// Category to update
        #[arg(requires = "percentage")]
        category: Option<String>,

        /// Share of salary, 0-100
        percentage: Option<f64>,
    },

    /// Categorize a description with the keyword table
    Categorize {
        /// Expense description
        text: String,
    },

    /// Classify a description with the full classifier cascade
    Classify {
        /// Expense description
        text: String,
    },

    /// Generate reports
    Report {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Export all expenses as CSV
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Total spending per category
    Categories,
    /// Spending per category for every month
    Monthly,
    /// This month's spending against budget limits
    Budget,
    /// Next month's spending from the last three months
    Predict,
    /// Rolling six-month forecast
    Forecast,
}
