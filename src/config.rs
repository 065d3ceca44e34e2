//! Form configuration
//!
//! The fixed choices offered by the form. Loaded once at startup and handed
//! to the core, which never reads them from anywhere else.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::{AllergySeverity, MealCategory};

/// Default limit for special instructions, in characters
pub const MAX_INSTRUCTIONS: usize = 500;

/// Default number of autocomplete suggestions
pub const SUGGESTION_LIMIT: usize = 8;

pub const COMMON_ALLERGENS: [&str; 8] = [
    "Nuts", "Dairy", "Gluten", "Eggs", "Soy", "Fish", "Shellfish", "Sesame",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Category order used by the grouped favorites view
    pub categories: Vec<MealCategory>,
    /// Allergens offered as quick-select pills, in display order
    pub common_allergens: Vec<String>,
    pub max_instructions: usize,
    pub suggestion_limit: usize,
    /// Severity given to allergies created from a pill
    pub quick_allergy_severity: AllergySeverity,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            categories: MealCategory::ALL.to_vec(),
            common_allergens: COMMON_ALLERGENS.iter().map(|s| s.to_string()).collect(),
            max_instructions: MAX_INSTRUCTIONS,
            suggestion_limit: SUGGESTION_LIMIT,
            quick_allergy_severity: AllergySeverity::Severe,
        }
    }
}

impl FormConfig {
    /// Load a config file, filling unspecified fields with defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: FormConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `MEALPREFS_CONFIG_PATH` if set, otherwise use defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading form config");
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::Invalid("categories cannot be empty".to_string()));
        }
        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category) {
                return Err(ConfigError::Invalid(format!(
                    "category {} listed twice",
                    category.as_str()
                )));
            }
        }

        let mut seen = HashSet::new();
        for allergen in &self.common_allergens {
            if allergen.trim().is_empty() || allergen.trim() != allergen {
                return Err(ConfigError::Invalid(format!(
                    "common allergen {:?} must be non-empty and trimmed",
                    allergen
                )));
            }
            if !seen.insert(allergen.to_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "common allergen {} listed twice",
                    allergen
                )));
            }
        }

        if self.max_instructions == 0 {
            return Err(ConfigError::Invalid("max_instructions must be greater than 0".to_string()));
        }
        if self.suggestion_limit == 0 {
            return Err(ConfigError::Invalid("suggestion_limit must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn is_common_allergen(&self, name: &str) -> bool {
        self.common_allergens.iter().any(|a| a == name)
    }
}

fn config_path() -> Option<PathBuf> {
    std::env::var("MEALPREFS_CONFIG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}
