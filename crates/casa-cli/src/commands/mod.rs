//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budget` - Budget status and category breakdown for a month
//! - `core` - Shared utilities (snapshot/settings loading, date args) and `config`
//! - `recurring` - Recurring charges and due-soon reminders
//! - `savings` - Savings rate and years to FI
//! - `split` - Shared-expense balances per member
//!
//! Every command takes the already-loaded snapshot so it can be tested
//! without touching the filesystem.

pub mod budget;
pub mod core;
pub mod recurring;
pub mod savings;
pub mod split;

// Re-export command functions for main.rs
pub use budget::*;
pub use core::*;
pub use recurring::*;
pub use savings::*;
pub use split::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
