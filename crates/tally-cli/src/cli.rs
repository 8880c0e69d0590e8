//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tally_core::Category;

/// Daily event counter.
///
/// Logs water refills and restroom visits and shows the time between the
/// last two of each.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log an event now (water, restroom).
    Add {
        /// Event category, case-insensitive.
        category: Category,
    },

    /// Show records for a day (today by default).
    Show {
        /// Day to show, as YYYY-MM-DD.
        #[arg(long, conflicts_with = "all")]
        date: Option<NaiveDate>,

        /// Show records from every day.
        #[arg(long)]
        all: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Delete a record by ID.
    Remove {
        /// Record ID as shown by `show`.
        id: i64,
    },

    /// Show database location and record count.
    Status,
}
