//! Budget status and per-category spending for a month
//!
//! Only expenses count towards budgets. Income in a budgeted category is
//! ignored, and category matching is exact on the slug.

use std::collections::BTreeMap;

use tracing::debug;

use crate::dates::YearMonth;
use crate::models::{Budget, BudgetStatus, CategorySpending, Transaction};

/// Expense total and count per category within `month`
fn spend_by_category(
    transactions: &[Transaction],
    month: YearMonth,
) -> BTreeMap<&str, (f64, usize)> {
    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.is_expense() && month.contains(tx.date))
    {
        let (amount, count) = totals.entry(tx.category.as_str()).or_insert((0.0, 0));
        *amount += tx.amount;
        *count += 1;
    }
    totals
}

/// Spend against each budget for `month`, in the order budgets were given.
///
/// A budgeted category with no spend reports `spent = 0`. `percent_used` is
/// not capped, so an overspent budget reads above 100.
pub fn compute_budget_status(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: YearMonth,
) -> Vec<BudgetStatus> {
    let totals = spend_by_category(transactions, month);

    let statuses: Vec<BudgetStatus> = budgets
        .iter()
        .map(|budget| {
            let spent = totals
                .get(budget.category.as_str())
                .map(|(amount, _)| *amount)
                .unwrap_or(0.0);
            let percent_used = if budget.amount_limit > 0.0 {
                spent / budget.amount_limit * 100.0
            } else {
                0.0
            };

            BudgetStatus {
                category: budget.category.clone(),
                spent,
                limit: budget.amount_limit,
                percent_used,
            }
        })
        .collect();

    debug!(
        %month,
        budgets = statuses.len(),
        over = statuses.iter().filter(|s| s.is_over()).count(),
        "Budget status computed"
    );

    statuses
}

/// Every expense category of `month` with its share of the month's expenses.
///
/// Sorted by amount descending, ties broken by category name.
pub fn category_breakdown(
    transactions: &[Transaction],
    month: YearMonth,
) -> Vec<CategorySpending> {
    let totals = spend_by_category(transactions, month);
    let total: f64 = totals.values().map(|(amount, _)| amount).sum();

    let mut categories: Vec<CategorySpending> = totals
        .into_iter()
        .map(|(category, (amount, transaction_count))| CategorySpending {
            category: category.to_string(),
            amount,
            percentage: if total > 0.0 {
                (amount / total) * 100.0
            } else {
                0.0
            },
            transaction_count,
        })
        .collect();

    categories.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });

    categories
}
