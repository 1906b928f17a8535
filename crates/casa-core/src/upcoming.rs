//! Upcoming recurring charges ("due soon" reminders)
//!
//! Projects each detected recurring item onto the reminder window that
//! starts at `today`. The current date is always a parameter so the result
//! is deterministic for a given snapshot.

use chrono::NaiveDate;

use crate::dates::add_days;
use crate::models::{RecurringItem, UpcomingCharge};

/// Expected charge date on or after `today`.
///
/// An overdue charge (expected date already passed without a new occurrence
/// in the snapshot) is advanced by whole cycles to its next due date.
pub fn projected_charge_date(item: &RecurringItem, today: NaiveDate) -> NaiveDate {
    let next = item.next_expected_date;
    if next >= today {
        return next;
    }

    let cycle = item.frequency.days();
    let behind = (today - next).num_days();
    let cycles = (behind + cycle - 1) / cycle;
    add_days(next, cycles * cycle)
}

/// Recurring charges due within `window_days` of `today` (inclusive).
///
/// The reminder amount is the most recent charge, which already reflects any
/// price change. Sorted by due date, then description.
pub fn upcoming_charges(
    items: &[RecurringItem],
    today: NaiveDate,
    window_days: u32,
) -> Vec<UpcomingCharge> {
    let window_end = add_days(today, i64::from(window_days));

    let mut charges: Vec<UpcomingCharge> = items
        .iter()
        .filter_map(|item| {
            let due_date = projected_charge_date(item, today);
            if due_date > window_end {
                return None;
            }

            Some(UpcomingCharge {
                description: item.display_description.clone(),
                category: item.category.clone(),
                amount: item
                    .amount_history
                    .last()
                    .copied()
                    .unwrap_or(item.avg_amount),
                frequency: item.frequency,
                due_date,
                days_until: (due_date - today).num_days(),
            })
        })
        .collect();

    charges.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.description.cmp(&b.description))
    });

    charges
}

/// Total expected across a set of upcoming charges
pub fn total_expected(charges: &[UpcomingCharge]) -> f64 {
    charges.iter().map(|c| c.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use crate::recurring::detect_recurring;
    use crate::test_utils::{date, series, series_at};

    #[test]
    fn test_projected_date_in_future_unchanged() {
        let items = detect_recurring(&series("2024-01-01", "Netflix", 15.99, 30, 3));
        // Last charge 2024-03-01, next expected 2024-03-31
        let today = date("2024-03-10");
        assert_eq!(projected_charge_date(&items[0], today), date("2024-03-31"));
    }

    #[test]
    fn test_projected_date_due_today() {
        let items = detect_recurring(&series("2024-01-01", "Netflix", 15.99, 30, 3));
        let today = date("2024-03-31");
        assert_eq!(projected_charge_date(&items[0], today), today);
    }

    #[test]
    fn test_overdue_charge_rolls_forward() {
        let items = detect_recurring(&series("2024-01-01", "Coffee", 4.0, 7, 3));
        // Last 2024-01-15, next expected 2024-01-22
        assert_eq!(items[0].frequency, Frequency::Weekly);

        let today = date("2024-01-30");
        // 01-22 -> 01-29 -> 02-05
        assert_eq!(projected_charge_date(&items[0], today), date("2024-02-05"));

        let today = date("2024-01-29");
        assert_eq!(projected_charge_date(&items[0], today), date("2024-01-29"));
    }

    #[test]
    fn test_upcoming_charges_window() {
        let mut txs = series("2024-01-01", "Netflix", 15.99, 30, 3); // next 03-31
        txs.extend(series("2024-01-20", "Gym", 40.0, 30, 2)); // next 03-20
        let items = detect_recurring(&txs);

        let today = date("2024-03-15");
        let due = upcoming_charges(&items, today, 7);

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].description, "Gym");
        assert_eq!(due[0].due_date, date("2024-03-20"));
        assert_eq!(due[0].days_until, 5);

        let due = upcoming_charges(&items, today, 30);
        let names: Vec<_> = due.iter().map(|c| c.description.as_str()).collect();
        assert_eq!(names, vec!["Gym", "Netflix"]);
    }

    #[test]
    fn test_upcoming_uses_latest_amount() {
        let txs = series_at("2024-01-01", "Internet", &[(0, 30.0), (30, 30.0), (60, 35.0)]);
        let items = detect_recurring(&txs);
        let today = date("2024-03-25");
        let due = upcoming_charges(&items, today, 14);

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].amount, 35.0);
        assert_eq!(total_expected(&due), 35.0);
    }

    #[test]
    fn test_no_items_no_reminders() {
        assert!(upcoming_charges(&[], date("2024-01-01"), 7).is_empty());
    }
}
