//! Budget and category command implementations

use anyhow::Result;
use casa_core::budget::{category_breakdown, compute_budget_status};
use casa_core::{Settings, Transaction, YearMonth};
use serde_json::json;

use super::{money, print_json, truncate};

/// Width of the usage bar, in characters at 100%
const BAR_WIDTH: usize = 20;

fn usage_bar(percent_used: f64) -> String {
    let filled = ((percent_used / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn cmd_budget(
    transactions: &[Transaction],
    settings: &Settings,
    month: YearMonth,
    json: bool,
) -> Result<()> {
    let statuses = compute_budget_status(transactions, &settings.budgets, month);

    if json {
        return print_json(&json!({
            "month": month,
            "budgets": statuses,
        }));
    }

    if statuses.is_empty() {
        println!("No budgets configured. Add them to your config file:");
        println!("  [[budgets]]");
        println!("  category = \"groceries\"");
        println!("  amount_limit = 400.0");
        return Ok(());
    }

    println!();
    println!("🎯 Budgets for {}", month);
    println!("   ─────────────────────────────────────────────────────────────");

    for status in &statuses {
        let icon = if status.is_over() { "🔴" } else { "🟢" };
        println!(
            "   {} {:18} │ {:>10} / {:>10} │ {} {:>5.0}%",
            icon,
            truncate(&status.category, 18),
            money(settings, status.spent),
            money(settings, status.limit),
            usage_bar(status.percent_used),
            status.percent_used
        );
    }

    let over = statuses.iter().filter(|s| s.is_over()).count();
    if over > 0 {
        println!();
        println!("   ⚠️  {} of {} budgets exceeded", over, statuses.len());
    }

    Ok(())
}

pub fn cmd_categories(
    transactions: &[Transaction],
    settings: &Settings,
    month: YearMonth,
    json: bool,
) -> Result<()> {
    let categories = category_breakdown(transactions, month);

    if json {
        return print_json(&json!({
            "month": month,
            "categories": categories,
        }));
    }

    if categories.is_empty() {
        println!("No spending found in {}.", month);
        return Ok(());
    }

    let total: f64 = categories.iter().map(|c| c.amount).sum();

    println!();
    println!("📊 Spending by Category ({})", month);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total: {}", money(settings, total));
    println!();
    println!(
        "   {:25} │ {:>12} │ {:>6} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   ──────────────────────────┼──────────────┼────────┼───────");

    for cat in &categories {
        println!(
            "   {:25} │ {:>12} │ {:>5.1}% │ {:>5}",
            truncate(&cat.category, 25),
            money(settings, cat.amount),
            cat.percentage,
            cat.transaction_count
        );
    }

    Ok(())
}
