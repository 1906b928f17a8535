//! Casa Core Library
//!
//! Analytics engine for the Casa household shared-expense tracker:
//! - Recurring charge detection with monthly-equivalent ranking
//! - Due-soon reminders for recurring charges
//! - Monthly savings rate, rolling averages and years to financial independence
//! - Budget status and category breakdown per month
//! - Shared-expense split between household members
//! - JSON/CSV snapshot loading and TOML household settings
//!
//! Every analytical function is pure: it takes a transaction snapshot (and
//! the current date where needed) and returns a derived view.

pub mod budget;
pub mod config;
pub mod dates;
pub mod error;
pub mod import;
pub mod models;
pub mod recurring;
pub mod savings;
pub mod split;
pub mod stats;
pub mod upcoming;

/// Transaction fixtures for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigSource, Settings};
pub use dates::YearMonth;
pub use error::{Error, Result};
pub use models::{
    Budget, BudgetStatus, CategorySpending, ExpenseType, Frequency, MemberBalance, MonthSummary,
    PaymentMethod, RecurringItem, SavingsReport, Transaction, UpcomingCharge,
};
