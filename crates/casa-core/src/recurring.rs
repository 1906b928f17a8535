//! Recurring charge detection
//!
//! Detects charges that repeat on a regular cadence:
//! - Groups expenses by normalized description (exact match, no fuzzy merging)
//! - Classifies the median gap between occurrences into a billing frequency
//! - Rejects groups whose spacing is too irregular to be a real schedule
//! - Flags a price change between the two most recent charges
//!
//! Results are ranked by their monthly-equivalent cost so a weekly coffee
//! subscription and a quarterly insurance premium can be compared directly.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::dates::{add_days, days_between};
use crate::models::{Frequency, RecurringItem, Transaction};
use crate::stats::{mean, median, population_std_dev, round_to};

/// A single charge can't establish a pattern
const MIN_OCCURRENCES: usize = 2;

/// Groups whose interval std-dev exceeds this fraction of the median are irregular
const MAX_INTERVAL_SPREAD: f64 = 0.35;

/// Amount deltas at or below this are treated as the same price
const PRICE_CHANGE_EPSILON: f64 = 0.01;

/// Grouping key for a description: trimmed and lowercased
pub fn normalize_description(description: &str) -> String {
    description.trim().to_lowercase()
}

/// Classify a median day-interval into a frequency bucket.
///
/// The ranges are inclusive and deliberately leave gaps (11, 19-24, 39-79,
/// 101+). A median in a gap is noise, not a schedule.
pub fn classify_interval(median_days: f64) -> Option<Frequency> {
    if (5.0..=10.0).contains(&median_days) {
        Some(Frequency::Weekly)
    } else if (12.0..=18.0).contains(&median_days) {
        Some(Frequency::Biweekly)
    } else if (25.0..=38.0).contains(&median_days) {
        Some(Frequency::Monthly)
    } else if (80.0..=100.0).contains(&median_days) {
        Some(Frequency::Quarterly)
    } else {
        None
    }
}

/// Convert an amount charged at `frequency` into an average-month cost
pub fn monthly_equivalent(amount: f64, frequency: Frequency) -> f64 {
    amount * frequency.monthly_factor()
}

/// Next charge after `last_date`, using fixed cycle lengths (not calendar months)
pub fn next_expected_date(last_date: NaiveDate, frequency: Frequency) -> NaiveDate {
    add_days(last_date, frequency.days())
}

/// Percentage change between the last two amounts of a chronological history.
///
/// `None` when there are fewer than two amounts, the change is within a cent,
/// or the previous amount is zero.
pub fn price_change_percent(amounts: &[f64]) -> Option<f64> {
    let [.., prev, last] = amounts else {
        return None;
    };

    let delta = last - prev;
    if delta.abs() <= PRICE_CHANGE_EPSILON || *prev == 0.0 {
        return None;
    }

    Some(round_to(delta / prev * 100.0, 1))
}

/// Sum of monthly-equivalent costs across detected items
pub fn total_monthly_cost(items: &[RecurringItem]) -> f64 {
    items.iter().map(|item| item.monthly_equivalent).sum()
}

/// Detect recurring expenses in a transaction snapshot.
///
/// Income is ignored. Output is ordered by monthly-equivalent cost, highest
/// first, with ties broken by group key.
pub fn detect_recurring(transactions: &[Transaction]) -> Vec<RecurringItem> {
    // BTreeMap keeps group iteration (and therefore float sums) in a fixed order
    let mut groups: BTreeMap<String, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        groups
            .entry(normalize_description(&tx.description))
            .or_default()
            .push(tx);
    }

    let group_count = groups.len();
    let mut items: Vec<RecurringItem> = groups
        .into_iter()
        .filter_map(|(key, txs)| detect_pattern(key, txs))
        .collect();

    items.sort_by(|a, b| {
        b.monthly_equivalent
            .total_cmp(&a.monthly_equivalent)
            .then_with(|| a.group_key.cmp(&b.group_key))
    });

    debug!(
        groups = group_count,
        recurring = items.len(),
        "Recurring detection complete"
    );

    items
}

/// Decide whether one description group forms a recurring pattern
fn detect_pattern(group_key: String, mut txs: Vec<&Transaction>) -> Option<RecurringItem> {
    if txs.len() < MIN_OCCURRENCES {
        return None;
    }

    // Stable sort: same-day charges keep snapshot order
    txs.sort_by_key(|tx| tx.date);

    let intervals: Vec<f64> = txs
        .windows(2)
        .map(|w| days_between(w[0].date, w[1].date) as f64)
        .collect();

    let median_interval = median(&intervals);
    let Some(frequency) = classify_interval(median_interval) else {
        debug!(
            group = %group_key,
            median_interval,
            "Skipping group - median interval matches no frequency"
        );
        return None;
    };

    let spread = population_std_dev(&intervals);
    if spread > median_interval * MAX_INTERVAL_SPREAD {
        debug!(
            group = %group_key,
            median_interval,
            spread,
            "Skipping group - intervals too irregular"
        );
        return None;
    }

    let amount_history: Vec<f64> = txs.iter().map(|tx| tx.amount).collect();
    let avg_amount = mean(&amount_history);
    let latest = txs.last()?;

    Some(RecurringItem {
        display_description: latest.description.clone(),
        category: latest.category.clone(),
        avg_amount,
        frequency,
        occurrence_count: txs.len(),
        last_date: latest.date,
        next_expected_date: next_expected_date(latest.date, frequency),
        price_change_percent: price_change_percent(&amount_history),
        monthly_equivalent: monthly_equivalent(avg_amount, frequency),
        amount_history,
        group_key,
    })
}
