//! User settings for Minted
//!
//! Holds the spending tiers, the subcategory depth used by detail breakdowns
//! and a small set of string variables (journal location, port).

use std::collections::BTreeMap;
use std::path::PathBuf;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use super::paths::MintedPaths;
use crate::error::MintedError;

/// A user-defined group of expense categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub name: String,
    /// Categories in insertion order
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub color: String,
}

impl Tier {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
            color: color.into(),
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// User settings for Minted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Named string variables, expanded against the environment on read
    #[serde(default = "default_variables")]
    pub variables: BTreeMap<String, String>,

    /// Spending tiers in priority order
    #[serde(default = "default_tiers")]
    pub tiers: Vec<Tier>,

    #[serde(default = "default_theme")]
    pub theme: String,

    /// Levels kept below the category in detail breakdowns
    #[serde(default = "default_subcategory_depth")]
    pub subcategory_depth: usize,

    #[serde(default)]
    pub preferences: BTreeMap<String, serde_json::Value>,
}

fn default_variables() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "HLEDGER_FILE".to_string(),
            "$HOME/.local/share/hledger/journal.journal".to_string(),
        ),
        ("PORT".to_string(), "9999".to_string()),
    ])
}

fn default_tiers() -> Vec<Tier> {
    vec![
        Tier::new("Essential", "#27ae60")
            .with_categories(["Groceries", "Utilities", "Insurance", "Transport"]),
        Tier::new("Discretionary", "#e74c3c")
            .with_categories(["Entertainment", "Dining", "Shopping", "Hobbies"]),
        Tier::new("Fixed", "#3498db").with_categories(["Rent", "Subscriptions", "Phone"]),
    ]
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_subcategory_depth() -> usize {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variables: default_variables(),
            tiers: default_tiers(),
            theme: default_theme(),
            subcategory_depth: default_subcategory_depth(),
            preferences: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &MintedPaths) -> Result<Self, MintedError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                MintedError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MintedError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MintedPaths) -> Result<(), MintedError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            MintedError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            MintedError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Get a variable with `$VAR` / `${VAR}` references expanded
    pub fn variable_value(&self, key: &str) -> Option<String> {
        self.variables.get(key).map(|raw| expand_env(raw))
    }

    /// Resolve the journal file handed to hledger
    pub fn ledger_file(&self) -> Option<PathBuf> {
        self.variable_value("HLEDGER_FILE")
            .filter(|value| !value.is_empty())
            .or_else(|| std::env::var("LEDGER_FILE").ok())
            .map(PathBuf::from)
    }

    /// Find the tier a category rolls up into. First match in configuration order wins.
    pub fn tier_for_category(&self, category: &str) -> Option<&Tier> {
        self.tiers.iter().find(|tier| tier.contains(category))
    }

    pub fn find_tier(&self, name: &str) -> Option<&Tier> {
        self.tiers.iter().find(|tier| tier.name == name)
    }

    /// Create a new, empty tier
    pub fn create_tier(&mut self, name: &str, color: &str) -> Result<(), MintedError> {
        if self.find_tier(name).is_some() {
            return Err(MintedError::Duplicate {
                entity_type: "Tier",
                identifier: name.to_string(),
            });
        }
        self.tiers.push(Tier::new(name, color));
        Ok(())
    }

    pub fn delete_tier(&mut self, name: &str) -> Result<Tier, MintedError> {
        let index = self
            .tiers
            .iter()
            .position(|tier| tier.name == name)
            .ok_or_else(|| MintedError::tier_not_found(name))?;
        Ok(self.tiers.remove(index))
    }

    /// Append a category to a tier
    pub fn add_category(&mut self, tier_name: &str, category: &str) -> Result<(), MintedError> {
        let tier = self
            .tiers
            .iter_mut()
            .find(|tier| tier.name == tier_name)
            .ok_or_else(|| MintedError::tier_not_found(tier_name))?;

        if tier.contains(category) {
            return Err(MintedError::Duplicate {
                entity_type: "Category",
                identifier: format!("{} in tier {}", category, tier_name),
            });
        }
        tier.categories.push(category.to_string());
        Ok(())
    }

    pub fn remove_category(&mut self, tier_name: &str, category: &str) -> Result<(), MintedError> {
        let tier = self
            .tiers
            .iter_mut()
            .find(|tier| tier.name == tier_name)
            .ok_or_else(|| MintedError::tier_not_found(tier_name))?;

        let index = tier
            .categories
            .iter()
            .position(|c| c == category)
            .ok_or_else(|| MintedError::category_not_found(format!("{} in tier {}", category, tier_name)))?;
        tier.categories.remove(index);
        Ok(())
    }
}

/// Expand `~`, `$VAR` and `${VAR}`. Unset variables expand to "".
fn expand_env(raw: &str) -> String {
    shellexpand::full_with_context_no_errors(
        raw,
        || BaseDirs::new().map(|dirs| dirs.home_dir().to_string_lossy().into_owned()),
        |name| Some(std::env::var(name).unwrap_or_default()),
    )
    .into_owned()
}
