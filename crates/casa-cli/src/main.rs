//! Casa CLI - Shared household expense analytics
//!
//! Usage:
//!   casa recurring                   Recurring charges by monthly cost
//!   casa upcoming --days 14          Charges due in the next two weeks
//!   casa savings                     Savings rate and years to FI
//!   casa budget --month 2024-05      Budget status for May 2024
//!   casa split                       Shared-expense balances per member

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
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
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let settings = commands::load_settings(cli.config.as_deref())?;
    let load = || commands::load_transactions(&cli.file);

    match cli.command {
        Commands::Recurring => commands::cmd_recurring(&load()?, &settings, cli.json),
        Commands::Upcoming { today, days } => {
            let today = commands::resolve_today(today.as_deref())?;
            let days = days.unwrap_or(settings.due_soon_days);
            commands::cmd_upcoming(&load()?, &settings, today, days, cli.json)
        }
        Commands::Savings => commands::cmd_savings(&load()?, &settings, cli.json),
        Commands::Budget { month } => {
            let month = commands::resolve_month(month.as_deref())?;
            commands::cmd_budget(&load()?, &settings, month, cli.json)
        }
        Commands::Categories { month } => {
            let month = commands::resolve_month(month.as_deref())?;
            commands::cmd_categories(&load()?, &settings, month, cli.json)
        }
        Commands::Split { month } => {
            let month = month.as_deref().map(commands::parse_month).transpose()?;
            commands::cmd_split(&load()?, &settings, month, cli.json)
        }
        Commands::Config => commands::cmd_config(&settings, cli.json),
    }
}
