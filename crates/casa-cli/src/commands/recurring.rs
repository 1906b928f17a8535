//! Recurring charge command implementations

use anyhow::Result;
use casa_core::recurring::{detect_recurring, total_monthly_cost};
use casa_core::upcoming::{total_expected, upcoming_charges};
use casa_core::{Settings, Transaction};
use chrono::NaiveDate;
use serde_json::json;

use super::{money, print_json, truncate};

pub fn cmd_recurring(transactions: &[Transaction], settings: &Settings, json: bool) -> Result<()> {
    let items = detect_recurring(transactions);
    let total = total_monthly_cost(&items);

    if json {
        return print_json(&json!({
            "items": items,
            "total_monthly_cost": total,
        }));
    }

    if items.is_empty() {
        println!("No recurring charges found in {} transactions.", transactions.len());
        return Ok(());
    }

    println!();
    println!("🔁 Recurring Charges");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:24} │ {:>10} │ {:9} │ {:>10} │ {:10}",
        "Description", "Amount", "Frequency", "Per month", "Next"
    );
    println!("   ─────────────────────────┼────────────┼───────────┼────────────┼───────────");

    for item in &items {
        let change = match item.price_change_percent {
            Some(pct) if pct > 0.0 => format!("  ⬆️ {:+.1}%", pct),
            Some(pct) => format!("  ⬇️ {:+.1}%", pct),
            None => String::new(),
        };
        println!(
            "   {:24} │ {:>10} │ {:9} │ {:>10} │ {}{}",
            truncate(&item.display_description, 24),
            money(settings, item.avg_amount),
            item.frequency.as_str(),
            money(settings, item.monthly_equivalent),
            item.next_expected_date,
            change
        );
    }

    println!();
    println!(
        "   Total: {} per month across {} charges",
        money(settings, total),
        items.len()
    );

    Ok(())
}

pub fn cmd_upcoming(
    transactions: &[Transaction],
    settings: &Settings,
    today: NaiveDate,
    days: u32,
    json: bool,
) -> Result<()> {
    let items = detect_recurring(transactions);
    let charges = upcoming_charges(&items, today, days);
    let total = total_expected(&charges);

    if json {
        return print_json(&json!({
            "today": today,
            "window_days": days,
            "charges": charges,
            "total": total,
        }));
    }

    if charges.is_empty() {
        println!("No recurring charges due in the next {} days.", days);
        return Ok(());
    }

    println!();
    println!("⏰ Due Soon (next {} days from {})", days, today);
    println!("   ─────────────────────────────────────────────────────────────");

    for charge in &charges {
        let when = match charge.days_until {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {} days", n),
        };
        println!(
            "   {} {:24} │ {:>10} │ {:12}",
            charge.due_date,
            truncate(&charge.description, 24),
            money(settings, charge.amount),
            when
        );
    }

    println!();
    println!("   Expected: {}", money(settings, total));

    Ok(())
}
