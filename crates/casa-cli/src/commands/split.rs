//! Shared-expense split command implementation

use anyhow::Result;
use casa_core::split::member_balances;
use casa_core::{Settings, Transaction, YearMonth};
use serde_json::json;

use super::{money, print_json, truncate};

pub fn cmd_split(
    transactions: &[Transaction],
    settings: &Settings,
    month: Option<YearMonth>,
    json: bool,
) -> Result<()> {
    let balances = member_balances(transactions, &settings.members, month);

    if json {
        return print_json(&json!({
            "month": month,
            "balances": balances,
        }));
    }

    if balances.is_empty() {
        println!("No household members configured and no expenses to split.");
        println!("Add members to your config file:");
        println!("  [household]");
        println!("  members = [\"ana\", \"luis\"]");
        return Ok(());
    }

    let period = month
        .map(|m| m.to_string())
        .unwrap_or_else(|| "all time".to_string());

    println!();
    println!("🤝 Shared Expenses ({})", period);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:14} │ {:>12} │ {:>12} │ {:>12} │ {:>12}",
        "Member", "Paid", "Fair share", "Balance", "Personal"
    );
    println!("   ───────────────┼──────────────┼──────────────┼──────────────┼─────────────");

    for balance in &balances {
        println!(
            "   {:14} │ {:>12} │ {:>12} │ {:>12} │ {:>12}",
            truncate(display_name(&balance.member), 14),
            money(settings, balance.shared_paid),
            money(settings, balance.fair_share),
            money(settings, balance.balance),
            money(settings, balance.personal_spent)
        );
    }

    println!();
    for balance in &balances {
        let name = display_name(&balance.member);
        if balance.balance > 0.005 {
            println!("   {} is owed {}", name, money(settings, balance.balance));
        } else if balance.balance < -0.005 {
            println!("   {} owes {}", name, money(settings, -balance.balance));
        }
    }

    Ok(())
}

/// Expenses with no `paid_by` are grouped under an empty member name
fn display_name(member: &str) -> &str {
    if member.is_empty() {
        "(unassigned)"
    } else {
        member
    }
}
