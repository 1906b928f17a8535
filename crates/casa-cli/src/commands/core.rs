//! Shared utilities for command implementations
//!
//! This module contains:
//! - `load_transactions` / `load_settings` - Snapshot and settings loading
//! - `resolve_today` / `resolve_month` - Date arguments, defaulting to the clock
//! - `print_json` - JSON output for `--json`
//! - `cmd_config` - Show the resolved settings

use std::path::Path;

use anyhow::{Context, Result};
use casa_core::{import, Settings, Transaction, YearMonth};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

/// Load the transaction snapshot, with the path in any error
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    import::load_snapshot(path)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))
}

pub fn load_settings(config: Option<&Path>) -> Result<Settings> {
    let settings = Settings::load(config).context("Failed to load household settings")?;
    debug!("Using settings from {}", settings.source);
    Ok(settings)
}

/// `--today` if given, otherwise the local date
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --today date format (use YYYY-MM-DD)"),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn parse_month(s: &str) -> Result<YearMonth> {
    s.parse::<YearMonth>()
        .map_err(|e| anyhow::anyhow!("Invalid --month (use YYYY-MM): {}", e))
}

/// `--month` if given, otherwise the current month
pub fn resolve_month(month: Option<&str>) -> Result<YearMonth> {
    match month {
        Some(s) => parse_month(s),
        None => Ok(YearMonth::from_date(Local::now().date_naive())),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output to JSON")?;
    println!("{}", out);
    Ok(())
}

/// Amount with the household currency symbol
pub fn money(settings: &Settings, amount: f64) -> String {
    format!("{}{:.2}", settings.currency, amount)
}

pub fn cmd_config(settings: &Settings, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({
            "source": settings.source.to_string(),
            "settings": settings,
        }));
    }

    println!();
    println!("⚙️  Household Settings");
    println!("   Source: {}", settings.source);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Name:      {}", settings.household_name);
    println!("   Currency:  {}", settings.currency);
    if settings.members.is_empty() {
        println!("   Members:   (none configured)");
    } else {
        println!("   Members:   {}", settings.members.join(", "));
    }
    println!("   Due soon:  {} days", settings.due_soon_days);

    if settings.budgets.is_empty() {
        println!("   Budgets:   (none configured)");
    } else {
        println!("   Budgets:");
        for budget in &settings.budgets {
            println!(
                "     {:20} {:>10}",
                budget.category,
                money(settings, budget.amount_limit)
            );
        }
    }

    Ok(())
}
