//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Casa - Shared household expense analytics
#[derive(Parser)]
#[command(name = "casa")]
#[command(about = "Recurring charges, savings rate and budgets for a shared household", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Transaction snapshot (.json or .csv)
    #[arg(short, long, default_value = "transactions.json", global = true)]
    pub file: PathBuf,

    /// Household settings file (TOML)
    ///
    /// Falls back to ~/.config/casa/config.toml, then built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List recurring charges ranked by monthly cost
    Recurring,

    /// Show recurring charges due soon
    Upcoming {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        today: Option<String>,

        /// Days ahead to look (defaults to reminders.due_soon_days)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Monthly savings rate, rolling averages and years to FI
    Savings,

    /// Budget status for a month
    Budget {
        /// Month to report (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Spending breakdown by category for a month
    Categories {
        /// Month to report (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Who paid what towards shared expenses
    Split {
        /// Restrict to one month (YYYY-MM, defaults to all time)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show the resolved household settings
    Config,
}
