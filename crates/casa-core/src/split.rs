//! Shared-expense split between household members
//!
//! Shared expenses are divided equally across members. Each member's
//! balance is what they paid towards shared costs minus their fair share.
//! Personal expenses are reported per member but never split.

use tracing::{debug, warn};

use crate::dates::YearMonth;
use crate::models::{ExpenseType, MemberBalance, Transaction};

#[derive(Default)]
struct Tally {
    shared_paid: f64,
    personal_spent: f64,
}

/// Per-member balances over expenses, optionally restricted to one month.
///
/// Output follows `members` order. A `paid_by` missing from `members` is
/// appended in first-seen order so its spend still counts. Such a payer
/// joins the fair-share divisor only once they pay for something shared;
/// with personal spend alone they are listed with a zero share.
pub fn member_balances(
    transactions: &[Transaction],
    members: &[String],
    month: Option<YearMonth>,
) -> Vec<MemberBalance> {
    let mut names: Vec<String> = members.to_vec();
    let mut tallies: Vec<Tally> = names.iter().map(|_| Tally::default()).collect();

    let expenses = transactions
        .iter()
        .filter(|tx| tx.is_expense())
        .filter(|tx| match month {
            Some(m) => m.contains(tx.date),
            None => true,
        });

    for tx in expenses {
        let idx = match names.iter().position(|name| *name == tx.paid_by) {
            Some(idx) => idx,
            None => {
                warn!(member = %tx.paid_by, id = %tx.id, "Expense paid by unknown member");
                names.push(tx.paid_by.clone());
                tallies.push(Tally::default());
                names.len() - 1
            }
        };

        let tally = &mut tallies[idx];
        match tx.expense_type {
            ExpenseType::Shared => tally.shared_paid += tx.amount,
            ExpenseType::Personal => tally.personal_spent += tx.amount,
        }
    }

    if names.is_empty() {
        return Vec::new();
    }

    // Configured members always share; appended payers only with shared spend
    let configured = members.len();
    let shares: Vec<bool> = tallies
        .iter()
        .enumerate()
        .map(|(idx, tally)| idx < configured || tally.shared_paid > 0.0)
        .collect();
    let sharers = shares.iter().filter(|&&s| s).count();

    let total_shared: f64 = tallies.iter().map(|t| t.shared_paid).sum();
    let fair_share = if sharers > 0 {
        total_shared / sharers as f64
    } else {
        0.0
    };

    debug!(
        members = names.len(),
        sharers, total_shared, fair_share, "Member balances computed"
    );

    names
        .into_iter()
        .zip(tallies)
        .zip(shares)
        .map(|((member, tally), shares_cost)| {
            let share = if shares_cost { fair_share } else { 0.0 };
            MemberBalance {
                member,
                shared_paid: tally.shared_paid,
                fair_share: share,
                balance: tally.shared_paid - share,
                personal_spent: tally.personal_spent,
            }
        })
        .collect()
}
