//! Mapping tables that drive categorical normalization.
//!
//! A rule set is a list of exact-match replacement tables keyed by column
//! name, followed by numeric coercions that strip characters from a column's
//! text and parse the remainder as a float. The built-in set covers the
//! customer dataset; alternative sets can be loaded from YAML.

use std::{borrow::Cow, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{CleanError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueReplacement {
    pub from: String,
    pub to: String,
}

impl ValueReplacement {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnRule {
    pub column: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replace: Vec<ValueReplacement>,
}

impl ColumnRule {
    pub fn new(column: &str, pairs: &[(&str, &str)]) -> Self {
        Self {
            column: column.to_string(),
            replace: pairs
                .iter()
                .map(|(from, to)| ValueReplacement::new(from, to))
                .collect(),
        }
    }

    /// Returns the replacement for an exact match, or the input unchanged.
    pub fn normalize_value<'a>(&self, value: &'a str) -> Cow<'a, str> {
        for replacement in &self.replace {
            if value == replacement.from {
                return Cow::Owned(replacement.to.clone());
            }
        }
        Cow::Borrowed(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NumericCoercion {
    pub column: String,
    /// Characters removed from the text form before parsing.
    #[serde(default)]
    pub strip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleaningRules {
    #[serde(default)]
    pub replacements: Vec<ColumnRule>,
    #[serde(default)]
    pub coercions: Vec<NumericCoercion>,
}

impl Default for CleaningRules {
    fn default() -> Self {
        Self {
            replacements: vec![
                ColumnRule::new(
                    "gender",
                    &[
                        ("Female", "F"),
                        ("female", "F"),
                        ("Femal", "F"),
                        ("Male", "M"),
                        ("male", "M"),
                        ("M", "M"),
                    ],
                ),
                ColumnRule::new("education", &[("Bachelors", "Bachelor")]),
                ColumnRule::new(
                    "state",
                    &[("AZ", "Arizona"), ("Cali", "California"), ("WA", "Washington")],
                ),
                ColumnRule::new(
                    "vehicle_class",
                    &[
                        ("Sports Car", "Luxury"),
                        ("Luxury SUV", "Luxury"),
                        ("Luxury Car", "Luxury"),
                    ],
                ),
            ],
            coercions: vec![NumericCoercion {
                column: "customer_lifetime_value".to_string(),
                strip: "%".to_string(),
            }],
        }
    }
}

impl CleaningRules {
    pub fn empty() -> Self {
        Self {
            replacements: Vec::new(),
            coercions: Vec::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| CleanError::DataAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let rules: CleaningRules = serde_yaml::from_str(&text).map_err(|err| {
            CleanError::configuration(format!("invalid rules file {path:?}: {err}"))
        })?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|err| CleanError::configuration(format!("serializing rules: {err}")))
    }

    /// Rejects rules whose tables could never behave deterministically.
    pub fn validate(&self) -> Result<()> {
        for rule in &self.replacements {
            if rule.column.trim().is_empty() {
                return Err(CleanError::configuration(
                    "replacement rule is missing a column name",
                ));
            }
            for (idx, replacement) in rule.replace.iter().enumerate() {
                if let Some(conflict) = rule.replace[..idx]
                    .iter()
                    .find(|earlier| earlier.from == replacement.from && earlier.to != replacement.to)
                {
                    return Err(CleanError::configuration(format!(
                        "column '{}' maps '{}' to both '{}' and '{}'",
                        rule.column, replacement.from, conflict.to, replacement.to
                    )));
                }
            }
        }
        if let Some(coercion) = self.coercions.iter().find(|c| c.column.trim().is_empty()) {
            return Err(CleanError::configuration(format!(
                "numeric coercion stripping '{}' is missing a column name",
                coercion.strip
            )));
        }
        Ok(())
    }
}
