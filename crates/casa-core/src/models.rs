//! Domain models for Casa

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::YearMonth;

/// Whether an expense is split across the household or owned by one member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseType {
    #[default]
    Shared,
    Personal,
}

impl ExpenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Personal => "personal",
        }
    }
}

impl std::str::FromStr for ExpenseType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shared" => Ok(Self::Shared),
            "personal" => Ok(Self::Personal),
            _ => Err(format!("Unknown expense type: {}", s)),
        }
    }
}

impl std::fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method used for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    DebitCard,
    CreditCard,
    /// Spanish instant mobile payments
    Bizum,
    BankTransfer,
    Revolut,
    #[default]
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::DebitCard => "debit_card",
            Self::CreditCard => "credit_card",
            Self::Bizum => "bizum",
            Self::BankTransfer => "bank_transfer",
            Self::Revolut => "revolut",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "debit_card" => Ok(Self::DebitCard),
            "credit_card" => Ok(Self::CreditCard),
            "bizum" => Ok(Self::Bizum),
            "bank_transfer" => Ok(Self::BankTransfer),
            "revolut" => Ok(Self::Revolut),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown payment method: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A household transaction, as supplied by the storage layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    /// Shown verbatim; trimmed and lowercased for recurrence grouping
    pub description: String,
    /// Always >= 0, direction comes from `is_income`
    pub amount: f64,
    /// snake_case slug, e.g. `groceries`
    pub category: String,
    /// Ignored for income
    pub expense_type: ExpenseType,
    pub payment_method: PaymentMethod,
    pub is_income: bool,
    /// Household member who paid (or received) the money
    pub paid_by: String,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        !self.is_income
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }
}

/// Per-category monthly spending limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub amount_limit: f64,
}

/// Recurring charge billing frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
        }
    }

    /// Fixed cycle length used to project the next charge
    pub fn days(&self) -> i64 {
        match self {
            Self::Weekly => 7,
            Self::Biweekly => 14,
            Self::Monthly => 30,
            Self::Quarterly => 90,
        }
    }

    /// Occurrences per average month
    pub fn monthly_factor(&self) -> f64 {
        match self {
            Self::Weekly => 4.33,
            Self::Biweekly => 2.17,
            Self::Monthly => 1.0,
            Self::Quarterly => 1.0 / 3.0,
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ========== Derived Views ==========

/// A recurring charge detected from repeated descriptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringItem {
    /// Normalized description shared by every occurrence
    pub group_key: String,
    /// Description of the most recent occurrence
    pub display_description: String,
    pub category: String,
    pub avg_amount: f64,
    pub frequency: Frequency,
    pub occurrence_count: usize,
    pub last_date: NaiveDate,
    pub next_expected_date: NaiveDate,
    /// Amounts in chronological order
    pub amount_history: Vec<f64>,
    pub price_change_percent: Option<f64>,
    /// `avg_amount` normalized to a per-month figure
    pub monthly_equivalent: f64,
}

/// Income and expenses for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: YearMonth,
    pub income: f64,
    pub expenses: f64,
    pub savings_rate_percent: f64,
}

/// Monthly summaries plus the figures derived from the latest months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsReport {
    /// Oldest first
    pub months: Vec<MonthSummary>,
    pub rolling_3m: Option<f64>,
    pub rolling_12m: Option<f64>,
    /// Years to financial independence at the latest month's savings rate
    pub fi_years: Option<f64>,
}

impl SavingsReport {
    pub fn latest(&self) -> Option<&MonthSummary> {
        self.months.last()
    }

    /// False when no income was ever recorded (insufficient data)
    pub fn has_income(&self) -> bool {
        self.months.iter().any(|m| m.income > 0.0)
    }
}

/// Spend against one budget line for a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    /// Uncapped, can exceed 100
    pub percent_used: f64,
}

impl BudgetStatus {
    pub fn is_over(&self) -> bool {
        self.spent > self.limit
    }
}

/// One category's share of a month's expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
    pub transaction_count: usize,
}

/// A recurring charge expected soon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingCharge {
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub frequency: Frequency,
    pub due_date: NaiveDate,
    pub days_until: i64,
}

/// What a member paid towards shared costs and where they stand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberBalance {
    pub member: String,
    pub shared_paid: f64,
    pub fair_share: f64,
    /// Positive: the household owes this member
    pub balance: f64,
    pub personal_spent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_from_str() {
        assert_eq!(
            "bizum".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::Bizum
        );
        assert_eq!(
            "Bank_Transfer".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::BankTransfer
        );
        assert!("paypal".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_serde() {
        let json = serde_json::to_string(&PaymentMethod::DebitCard).unwrap();
        assert_eq!(json, r#""debit_card""#);

        let parsed: PaymentMethod = serde_json::from_str(r#""revolut""#).unwrap();
        assert_eq!(parsed, PaymentMethod::Revolut);
    }

    #[test]
    fn test_expense_type_round_trip_names() {
        for ty in [ExpenseType::Shared, ExpenseType::Personal] {
            assert_eq!(ty.as_str().parse::<ExpenseType>().unwrap(), ty);
        }
        assert!("joint".parse::<ExpenseType>().is_err());
    }

    #[test]
    fn test_frequency_constants() {
        assert_eq!(Frequency::Weekly.days(), 7);
        assert_eq!(Frequency::Biweekly.days(), 14);
        assert_eq!(Frequency::Monthly.days(), 30);
        assert_eq!(Frequency::Quarterly.days(), 90);
        assert_eq!(Frequency::Weekly.monthly_factor(), 4.33);
        assert_eq!(Frequency::Biweekly.monthly_factor(), 2.17);
        assert_eq!(Frequency::Monthly.monthly_factor(), 1.0);
        assert_eq!(Frequency::Quarterly.monthly_factor(), 1.0 / 3.0);
    }

    #[test]
    fn test_frequency_serde() {
        let json = serde_json::to_string(&Frequency::Biweekly).unwrap();
        assert_eq!(json, r#""biweekly""#);
    }

    #[test]
    fn test_savings_report_has_income() {
        let month = YearMonth::new(2024, 1).unwrap();
        let report = SavingsReport {
            months: vec![MonthSummary {
                month,
                income: 0.0,
                expenses: 120.0,
                savings_rate_percent: 0.0,
            }],
            rolling_3m: None,
            rolling_12m: None,
            fi_years: None,
        };
        assert!(!report.has_income());
        assert_eq!(report.latest().map(|m| m.month), Some(month));
    }
}
