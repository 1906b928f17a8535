//! Savings command implementation

use anyhow::Result;
use casa_core::savings::savings_report;
use casa_core::{Settings, Transaction};

use super::{money, print_json};

fn percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v))
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn cmd_savings(transactions: &[Transaction], settings: &Settings, json: bool) -> Result<()> {
    let report = savings_report(transactions);

    if json {
        return print_json(&report);
    }

    if !report.has_income() {
        println!("No income recorded yet - savings rate needs at least one income transaction.");
        return Ok(());
    }

    println!();
    println!("💰 Savings Rate");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:7} │ {:>12} │ {:>12} │ {:>7}",
        "Month", "Income", "Expenses", "Rate"
    );
    println!("   ────────┼──────────────┼──────────────┼────────");

    for month in &report.months {
        println!(
            "   {:7} │ {:>12} │ {:>12} │ {:>6.1}%",
            month.month.to_string(),
            money(settings, month.income),
            money(settings, month.expenses),
            month.savings_rate_percent
        );
    }

    println!();
    println!("   Rolling 3 months:  {}", percent(report.rolling_3m));
    println!("   Rolling 12 months: {}", percent(report.rolling_12m));

    match report.fi_years {
        Some(years) if years == 0.0 => {
            println!("   🎉 Saving everything - financially independent already");
        }
        Some(years) => println!("   🏁 Years to FI at the latest rate: {:.1}", years),
        None => println!("   🏁 Years to FI: n/a (not saving in the latest month)"),
    }

    Ok(())
}
