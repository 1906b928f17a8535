//! Snapshot loading from JSON and CSV
//!
//! Both formats use the transaction field names as keys (JSON) or header
//! columns (CSV). Missing optional fields take their defaults. Rows without
//! an `id` get one derived from their content and position.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{ExpenseType, PaymentMethod, Transaction};

/// Category applied when a row doesn't carry one
pub const DEFAULT_CATEGORY: &str = "other";

/// A snapshot row before defaults and validation
#[derive(Debug, Default, Deserialize)]
struct RawTransaction {
    id: Option<String>,
    date: Option<String>,
    description: Option<String>,
    amount: Option<f64>,
    category: Option<String>,
    expense_type: Option<String>,
    payment_method: Option<String>,
    is_income: Option<bool>,
    paid_by: Option<String>,
}

/// Load a snapshot file, choosing the format from its extension
pub fn load_snapshot(path: &Path) -> Result<Vec<Transaction>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let file = std::fs::File::open(path)?;
    let transactions = match extension.as_deref() {
        Some("json") => parse_json(file)?,
        Some("csv") => parse_csv(file)?,
        _ => {
            return Err(Error::InvalidData(format!(
                "Unsupported snapshot format: {} (expected .json or .csv)",
                path.display()
            )))
        }
    };

    info!(
        "Loaded {} transactions from {}",
        transactions.len(),
        path.display()
    );
    Ok(transactions)
}

/// Parse a JSON array of transaction objects
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let rows: Vec<RawTransaction> = serde_json::from_reader(reader)?;
    let transactions = finish_rows(rows)?;
    debug!("Parsed {} JSON transactions", transactions.len());
    Ok(transactions)
}

/// Parse a CSV with a header row naming the transaction fields
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        rows.push(csv_row(&headers, &record, index + 1)?);
    }

    let transactions = finish_rows(rows)?;
    debug!("Parsed {} CSV transactions", transactions.len());
    Ok(transactions)
}

/// Map a CSV record onto the named fields; empty cells count as missing
fn csv_row(headers: &StringRecord, record: &StringRecord, row: usize) -> Result<RawTransaction> {
    let field = |name: &str| -> Option<String> {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .and_then(|idx| record.get(idx))
            .filter(|value| !value.is_empty())
            .map(|value| value.to_string())
    };

    let amount = field("amount")
        .map(|s| parse_amount(&s).map_err(|e| row_error(row, e)))
        .transpose()?;
    let is_income = field("is_income")
        .map(|s| parse_bool(&s).map_err(|e| row_error(row, e)))
        .transpose()?;

    Ok(RawTransaction {
        id: field("id"),
        date: field("date"),
        description: field("description"),
        amount,
        category: field("category"),
        expense_type: field("expense_type"),
        payment_method: field("payment_method"),
        is_income,
        paid_by: field("paid_by"),
    })
}

/// Apply defaults, validate, and assign ids
fn finish_rows(rows: Vec<RawTransaction>) -> Result<Vec<Transaction>> {
    let mut seen_ids = HashSet::new();
    let mut transactions = Vec::with_capacity(rows.len());

    for (index, raw) in rows.into_iter().enumerate() {
        let tx = to_transaction(raw, index)?;
        if !seen_ids.insert(tx.id.clone()) {
            warn!(id = %tx.id, row = index + 1, "Duplicate transaction id in snapshot");
        }
        transactions.push(tx);
    }

    Ok(transactions)
}

fn to_transaction(raw: RawTransaction, index: usize) -> Result<Transaction> {
    let row = index + 1;

    let date_str = raw
        .date
        .ok_or_else(|| row_error(row, "missing date"))?;
    let date = parse_date(&date_str).map_err(|e| row_error(row, e))?;

    let amount = raw.amount.unwrap_or(0.0);
    if amount < 0.0 || !amount.is_finite() {
        return Err(row_error(
            row,
            format!("amount must be a non-negative number, got {}", amount),
        ));
    }

    let expense_type = match raw.expense_type {
        Some(s) => s.parse::<ExpenseType>().map_err(|e| row_error(row, e))?,
        None => ExpenseType::default(),
    };
    let payment_method = match raw.payment_method {
        Some(s) => s.parse::<PaymentMethod>().map_err(|e| row_error(row, e))?,
        None => PaymentMethod::default(),
    };

    let description = raw.description.unwrap_or_default();
    let id = match raw.id.filter(|id| !id.trim().is_empty()) {
        Some(id) => id,
        None => generate_id(&date, &description, amount, index),
    };

    Ok(Transaction {
        id,
        date,
        description,
        amount,
        category: raw
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        expense_type,
        payment_method,
        is_income: raw.is_income.unwrap_or(false),
        paid_by: raw.paid_by.unwrap_or_default(),
    })
}

fn row_error(row: usize, reason: impl std::fmt::Display) -> Error {
    Error::Import(format!("row {}: {}", row, reason))
}

/// Stable id for a row that didn't carry one.
///
/// The row index keeps identical same-day charges apart.
fn generate_id(date: &NaiveDate, description: &str, amount: f64, index: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(description.as_bytes());
    hasher.update(amount.to_be_bytes());
    hasher.update((index as u64).to_be_bytes());
    hex::encode(hasher.finalize())
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("unable to parse date: {} (expected YYYY-MM-DD)", s))
}

/// Parse an amount, tolerating currency symbols and thousands separators
fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    let cleaned: String = s.trim().replace(['€', '$', ',', ' '], "");
    cleaned
        .parse::<f64>()
        .map_err(|_| format!("unable to parse amount: {}", s))
}

fn parse_bool(s: &str) -> std::result::Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(format!("unable to parse is_income: {}", s)),
    }
}
