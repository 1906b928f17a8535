//! Test utilities: transaction fixtures shared by unit and CLI tests
//!
//! Enabled for this crate's own tests and, through the `test-utils` feature,
//! for downstream crates' tests.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;

use crate::dates::add_days;
use crate::models::{ExpenseType, PaymentMethod, Transaction};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_id() -> String {
    format!("tx_{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Parse a `YYYY-MM-DD` literal, panicking on bad fixtures
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("fixture dates use YYYY-MM-DD")
}

/// Builder for fixture transactions
pub struct TransactionBuilder {
    tx: Transaction,
}

impl TransactionBuilder {
    pub fn category(mut self, category: &str) -> Self {
        self.tx.category = category.to_string();
        self
    }

    pub fn paid_by(mut self, member: &str) -> Self {
        self.tx.paid_by = member.to_string();
        self
    }

    pub fn personal(mut self) -> Self {
        self.tx.expense_type = ExpenseType::Personal;
        self
    }

    pub fn payment_method(mut self, method: PaymentMethod) -> Self {
        self.tx.payment_method = method;
        self
    }

    pub fn build(self) -> Transaction {
        self.tx
    }
}

fn builder(date_str: &str, description: &str, amount: f64, is_income: bool) -> TransactionBuilder {
    TransactionBuilder {
        tx: Transaction {
            id: next_id(),
            date: date(date_str),
            description: description.to_string(),
            amount,
            category: "other".to_string(),
            expense_type: ExpenseType::Shared,
            payment_method: PaymentMethod::Other,
            is_income,
            paid_by: "ana".to_string(),
        },
    }
}

/// A shared expense paid by `ana` in category `other`
pub fn expense(date_str: &str, description: &str, amount: f64) -> TransactionBuilder {
    builder(date_str, description, amount, false)
}

/// An income record received by `ana`
pub fn income(date_str: &str, description: &str, amount: f64) -> TransactionBuilder {
    builder(date_str, description, amount, true)
}

/// `count` identical expenses spaced `every_days` apart, starting at `start`
pub fn series(
    start: &str,
    description: &str,
    amount: f64,
    every_days: i64,
    count: usize,
) -> Vec<Transaction> {
    let first = date(start);
    (0..count)
        .map(|i| {
            let mut tx = expense(start, description, amount).build();
            tx.date = add_days(first, every_days * i as i64);
            tx
        })
        .collect()
}

/// Expenses at explicit day offsets from `start`, one amount per offset
pub fn series_at(
    start: &str,
    description: &str,
    offsets_and_amounts: &[(i64, f64)],
) -> Vec<Transaction> {
    let first = date(start);
    offsets_and_amounts
        .iter()
        .map(|&(offset, amount)| {
            let mut tx = expense(start, description, amount).build();
            tx.date = add_days(first, offset);
            tx
        })
        .collect()
}
