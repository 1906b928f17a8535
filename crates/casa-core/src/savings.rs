//! Savings-rate aggregation
//!
//! Buckets transactions by calendar month and derives:
//! - Income, expenses and savings rate per month
//! - Rolling savings rate over the last 3 and 12 months
//! - Years to financial independence at the latest month's savings rate
//!
//! Rolling rates are computed from summed income and expenses, not by
//! averaging per-month rates, so a zero-income month doesn't skew the figure.

use std::collections::BTreeMap;

use tracing::debug;

use crate::dates::YearMonth;
use crate::models::{MonthSummary, SavingsReport, Transaction};
use crate::stats::round_to;

/// Real annual return assumed for invested savings
const REAL_RETURN_RATE: f64 = 0.05;

/// Portfolio needed as a multiple of annual expenses (4% withdrawal rate)
const FI_EXPENSE_MULTIPLE: f64 = 25.0;

/// `(income - expenses) / income` as a percentage, 0 without income
pub fn savings_rate(income: f64, expenses: f64) -> f64 {
    if income > 0.0 {
        round_to((income - expenses) / income * 100.0, 1)
    } else {
        0.0
    }
}

/// One summary per month present in the snapshot, oldest first
pub fn compute_monthly_summaries(transactions: &[Transaction]) -> Vec<MonthSummary> {
    let mut buckets: BTreeMap<YearMonth, (f64, f64)> = BTreeMap::new();
    for tx in transactions {
        let (income, expenses) = buckets.entry(tx.month()).or_insert((0.0, 0.0));
        if tx.is_income {
            *income += tx.amount;
        } else {
            *expenses += tx.amount;
        }
    }

    buckets
        .into_iter()
        .map(|(month, (income, expenses))| MonthSummary {
            month,
            income,
            expenses,
            savings_rate_percent: savings_rate(income, expenses),
        })
        .collect()
}

/// Savings rate over the last `window` months combined.
///
/// `None` when fewer than `window` months are present.
pub fn rolling_savings_rate(months: &[MonthSummary], window: usize) -> Option<f64> {
    if window == 0 || months.len() < window {
        return None;
    }

    let recent = &months[months.len() - window..];
    let income: f64 = recent.iter().map(|m| m.income).sum();
    let expenses: f64 = recent.iter().map(|m| m.expenses).sum();
    Some(savings_rate(income, expenses))
}

/// Years until savings reach 25x annual expenses at `savings_rate_percent`.
///
/// `None` when nothing is being saved, 0 when everything is.
pub fn years_to_fi(savings_rate_percent: f64) -> Option<f64> {
    if savings_rate_percent <= 0.0 {
        return None;
    }
    if savings_rate_percent >= 100.0 {
        return Some(0.0);
    }

    let s = savings_rate_percent / 100.0;
    let r = REAL_RETURN_RATE;
    let years = (1.0 + FI_EXPENSE_MULTIPLE * (1.0 - s) * r / s).ln() / (1.0 + r).ln();
    Some(round_to(years, 1))
}

/// Monthly summaries with rolling rates and FI projection for the latest month
pub fn savings_report(transactions: &[Transaction]) -> SavingsReport {
    let months = compute_monthly_summaries(transactions);
    let rolling_3m = rolling_savings_rate(&months, 3);
    let rolling_12m = rolling_savings_rate(&months, 12);
    let fi_years = months
        .last()
        .and_then(|latest| years_to_fi(latest.savings_rate_percent));

    debug!(
        months = months.len(),
        ?rolling_3m,
        ?rolling_12m,
        ?fi_years,
        "Savings report computed"
    );

    SavingsReport {
        months,
        rolling_3m,
        rolling_12m,
        fi_years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expense, income};

    #[test]
    fn test_savings_rate() {
        assert_eq!(savings_rate(1000.0, 700.0), 30.0);
        assert_eq!(savings_rate(1000.0, 1250.0), -25.0);
        assert_eq!(savings_rate(0.0, 500.0), 0.0);
        assert_eq!(savings_rate(3000.0, 1000.0), 66.7);
    }

    #[test]
    fn test_monthly_summary_basic() {
        let txs = vec![
            income("2024-01-01", "Salary", 1000.0).build(),
            expense("2024-01-05", "Rent", 500.0).build(),
            expense("2024-01-20", "Groceries", 200.0).build(),
        ];
        let months = compute_monthly_summaries(&txs);

        assert_eq!(months.len(), 1);
        assert_eq!(months[0].month.to_string(), "2024-01");
        assert_eq!(months[0].income, 1000.0);
        assert_eq!(months[0].expenses, 700.0);
        assert_eq!(months[0].savings_rate_percent, 30.0);
    }

    #[test]
    fn test_months_sorted_oldest_first() {
        let txs = vec![
            expense("2024-03-02", "Rent", 500.0).build(),
            income("2023-12-31", "Salary", 900.0).build(),
            expense("2024-01-15", "Rent", 500.0).build(),
        ];
        let months: Vec<String> = compute_monthly_summaries(&txs)
            .iter()
            .map(|m| m.month.to_string())
            .collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-03"]);
    }

    #[test]
    fn test_month_without_income_has_zero_rate() {
        let txs = vec![expense("2024-02-01", "Rent", 500.0).build()];
        let months = compute_monthly_summaries(&txs);
        assert_eq!(months[0].savings_rate_percent, 0.0);
    }

    #[test]
    fn test_rolling_rate_uses_aggregate() {
        let txs = vec![
            income("2024-01-01", "Salary", 1000.0).build(),
            expense("2024-01-02", "Rent", 500.0).build(),
            // No income in February
            expense("2024-02-02", "Rent", 500.0).build(),
            income("2024-03-01", "Salary", 2000.0).build(),
            expense("2024-03-02", "Rent", 500.0).build(),
        ];
        let months = compute_monthly_summaries(&txs);

        // (3000 - 1500) / 3000 = 50%, while the mean of monthly rates would be 41.7
        assert_eq!(rolling_savings_rate(&months, 3), Some(50.0));
        assert_eq!(rolling_savings_rate(&months, 12), None);
        assert_eq!(rolling_savings_rate(&months, 0), None);
    }

    #[test]
    fn test_rolling_rate_takes_latest_months() {
        let txs = vec![
            income("2024-01-01", "Salary", 1000.0).build(),
            expense("2024-01-02", "Rent", 1000.0).build(),
            income("2024-02-01", "Salary", 1000.0).build(),
            expense("2024-02-02", "Rent", 800.0).build(),
            income("2024-03-01", "Salary", 1000.0).build(),
            expense("2024-03-02", "Rent", 800.0).build(),
            income("2024-04-01", "Salary", 1000.0).build(),
            expense("2024-04-02", "Rent", 800.0).build(),
        ];
        let months = compute_monthly_summaries(&txs);
        assert_eq!(rolling_savings_rate(&months, 3), Some(20.0));
    }

    #[test]
    fn test_years_to_fi() {
        let expected = round_to((1.0 + 25.0 * 0.7 * 0.05 / 0.3_f64).ln() / 1.05_f64.ln(), 1);
        assert_eq!(years_to_fi(30.0), Some(expected));
        assert_eq!(years_to_fi(30.0), Some(28.0));
        assert_eq!(years_to_fi(50.0), Some(16.6));
    }

    #[test]
    fn test_years_to_fi_bounds() {
        assert_eq!(years_to_fi(0.0), None);
        assert_eq!(years_to_fi(-12.5), None);
        assert_eq!(years_to_fi(100.0), Some(0.0));
        assert_eq!(years_to_fi(120.0), Some(0.0));
    }

    #[test]
    fn test_years_to_fi_decreases_with_rate() {
        let low = years_to_fi(10.0).unwrap();
        let mid = years_to_fi(40.0).unwrap();
        let high = years_to_fi(75.0).unwrap();
        assert!(low > mid && mid > high);
    }

    #[test]
    fn test_savings_report() {
        let txs = vec![
            income("2024-01-01", "Salary", 1000.0).build(),
            expense("2024-01-10", "Rent", 700.0).build(),
        ];
        let report = savings_report(&txs);

        assert_eq!(report.months.len(), 1);
        assert!(report.has_income());
        assert_eq!(report.rolling_3m, None);
        assert_eq!(report.fi_years, Some(28.0));
    }

    #[test]
    fn test_savings_report_without_income() {
        let txs = vec![
            expense("2024-01-10", "Rent", 700.0).build(),
            expense("2024-02-10", "Rent", 700.0).build(),
        ];
        let report = savings_report(&txs);

        assert_eq!(report.months.len(), 2);
        assert!(!report.has_income());
        assert_eq!(report.fi_years, None);
    }

    #[test]
    fn test_savings_report_empty() {
        let report = savings_report(&[]);
        assert!(report.months.is_empty());
        assert!(report.latest().is_none());
        assert_eq!(report.fi_years, None);
    }

    #[test]
    fn test_savings_report_is_idempotent() {
        let txs = vec![
            income("2024-01-01", "Salary", 1834.17).build(),
            expense("2024-01-10", "Rent", 712.4).build(),
            expense("2024-01-12", "Groceries", 93.61).build(),
            income("2024-02-01", "Salary", 1834.17).build(),
            expense("2024-02-10", "Rent", 712.4).build(),
        ];
        assert_eq!(savings_report(&txs), savings_report(&txs));
    }
}
