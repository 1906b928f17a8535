//! Household settings
//!
//! Resolution order:
//! 1. Explicit path (e.g. `--config`), if it exists
//! 2. `<config dir>/casa/config.toml`, if it exists
//! 3. Embedded defaults compiled into the binary

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Budget;

const DEFAULT_CONFIG: &str = include_str!("../../../config/casa.toml");

/// Default reminder window in days
pub const DEFAULT_DUE_SOON_DAYS: u32 = 7;

/// Where the active settings were read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Embedded => write!(f, "built-in defaults"),
        }
    }
}

/// Resolved household settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub household_name: String,
    /// Symbol prefixed to amounts in reports
    pub currency: String,
    /// Members who share expenses, in display order
    pub members: Vec<String>,
    pub due_soon_days: u32,
    pub budgets: Vec<Budget>,
    #[serde(skip)]
    pub source: ConfigSource,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            household_name: "Casa".to_string(),
            currency: "€".to_string(),
            members: Vec::new(),
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
            budgets: Vec::new(),
            source: ConfigSource::Embedded,
        }
    }
}

impl Settings {
    /// Load settings, falling back through the resolution order
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit.filter(|p| p.exists()) {
            return Self::from_file(path);
        }
        if let Some(explicit) = explicit {
            debug!("Config {} not found, trying defaults", explicit.display());
        }

        if let Some(path) = default_config_path().filter(|p| p.exists()) {
            return Self::from_file(&path);
        }

        debug!("Using embedded default config");
        parse_config(DEFAULT_CONFIG, ConfigSource::Embedded)
    }

    /// Load settings from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        debug!("Loading config from {}", path.display());
        parse_config(&content, ConfigSource::File(path.to_path_buf()))
    }

    /// Budget limit for a category, if one is configured
    pub fn budget_for(&self, category: &str) -> Option<f64> {
        self.budgets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.amount_limit)
    }
}

/// User config location, e.g. `~/.config/casa/config.toml` on Linux
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("casa").join("config.toml"))
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    household: Option<RawHousehold>,
    reminders: Option<RawReminders>,
    budgets: Option<Vec<RawBudget>>,
}

#[derive(Debug, Deserialize)]
struct RawHousehold {
    name: Option<String>,
    currency: Option<String>,
    members: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawReminders {
    due_soon_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    category: String,
    amount_limit: f64,
}

/// Parse settings from TOML content, keeping defaults for missing keys
pub fn parse_config(content: &str, source: ConfigSource) -> Result<Settings> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut settings = Settings {
        source,
        ..Settings::default()
    };

    if let Some(household) = raw.household {
        if let Some(name) = household.name {
            settings.household_name = name;
        }
        if let Some(currency) = household.currency {
            settings.currency = currency;
        }
        if let Some(members) = household.members {
            settings.members = members
                .into_iter()
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect();
        }
    }

    if let Some(days) = raw.reminders.and_then(|r| r.due_soon_days) {
        settings.due_soon_days = days;
    }

    for budget in raw.budgets.unwrap_or_default() {
        if budget.amount_limit <= 0.0 {
            return Err(Error::Config(format!(
                "Budget for '{}' must be positive, got {}",
                budget.category, budget.amount_limit
            )));
        }
        if settings.budget_for(&budget.category).is_some() {
            return Err(Error::Config(format!(
                "Duplicate budget for category '{}'",
                budget.category
            )));
        }
        settings.budgets.push(Budget {
            category: budget.category,
            amount_limit: budget.amount_limit,
        });
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_embedded_default() {
        let settings = parse_config(DEFAULT_CONFIG, ConfigSource::Embedded).unwrap();
        assert_eq!(settings.household_name, "Casa");
        assert_eq!(settings.currency, "€");
        assert_eq!(settings.due_soon_days, DEFAULT_DUE_SOON_DAYS);
        assert!(settings.members.is_empty());
        assert!(settings.budgets.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[household]
name = "Piso Lavapiés"
currency = "EUR "
members = ["ana", " luis ", ""]

[reminders]
due_soon_days = 10

[[budgets]]
category = "groceries"
amount_limit = 400.0

[[budgets]]
category = "dining"
amount_limit = 120
"#;
        let settings = parse_config(toml, ConfigSource::Embedded).unwrap();

        assert_eq!(settings.household_name, "Piso Lavapiés");
        assert_eq!(settings.currency, "EUR ");
        assert_eq!(settings.members, vec!["ana", "luis"]);
        assert_eq!(settings.due_soon_days, 10);
        assert_eq!(settings.budgets.len(), 2);
        assert_eq!(settings.budgets[0].category, "groceries");
        assert_eq!(settings.budget_for("dining"), Some(120.0));
        assert_eq!(settings.budget_for("travel"), None);
    }

    #[test]
    fn test_missing_sections_keep_defaults() {
        let settings = parse_config("[reminders]\n", ConfigSource::Embedded).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_rejects_non_positive_budget() {
        let toml = "[[budgets]]\ncategory = \"groceries\"\namount_limit = 0\n";
        assert!(matches!(
            parse_config(toml, ConfigSource::Embedded),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_budget() {
        let toml = "[[budgets]]\ncategory = \"dining\"\namount_limit = 50\n\n\
                    [[budgets]]\ncategory = \"dining\"\namount_limit = 80\n";
        assert!(matches!(
            parse_config(toml, ConfigSource::Embedded),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_toml() {
        assert!(matches!(
            parse_config("[household", ConfigSource::Embedded),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("casa.toml");
        fs::write(&path, "[household]\nmembers = [\"ana\", \"luis\"]\n").unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(settings.members, vec!["ana", "luis"]);
        assert_eq!(settings.source, ConfigSource::File(path.clone()));
        assert_eq!(settings.source.to_string(), path.display().to_string());
    }
}
