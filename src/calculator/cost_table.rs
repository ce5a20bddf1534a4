//! CoP baseline table: per-unit cost for each action.
//!
//! ## Format
//!
//! ```json
//! { "version": 1, "actions": [ { "name": "Train SSS", "baseline": 475 } ] }
//! ```
//!
//! - `baseline` may be `null` or omitted: the action is offered in the
//!   dropdown but has no CoP baseline.
//! - `provisional: true` marks a value that still needs confirming in game.
//!
//! Entry order is the order shown in the action dropdown.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

/// The table compiled into the binary.
const EMBEDDED_TABLE: &str = include_str!("../../assets/cost_table.json");

/// Config format version this build understands.
pub const SUPPORTED_VERSION: u32 = 1;

/// Most actions a table may list; each one needs its own menu row ID.
pub const MAX_ACTIONS: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cost table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cost table version {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("cost table has no actions")]
    Empty,
    #[error("cost table lists {count} actions (at most {max} allowed)")]
    TooManyActions { count: usize, max: usize },
    #[error("action \"{0}\" is listed more than once")]
    DuplicateAction(String),
    #[error("baseline for \"{0}\" must be a finite, non-negative number")]
    InvalidBaseline(String),
}

#[derive(Deserialize)]
struct TableFile {
    version: u32,
    actions: Vec<CostEntry>,
}

/// One selectable action and its baseline CoP per unit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CostEntry {
    pub name: String,
    #[serde(default)]
    pub baseline: Option<f64>,
    #[serde(default)]
    pub provisional: bool,
}

/// Immutable action → baseline mapping. Built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCostTable {
    entries: Vec<CostEntry>,
}

impl ActionCostTable {
    /// Parse and validate a table document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: TableFile = serde_json::from_str(json)?;
        if file.version != SUPPORTED_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: file.version,
                supported: SUPPORTED_VERSION,
            });
        }
        Self::from_entries(file.actions)
    }

    pub fn from_entries(entries: Vec<CostEntry>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::Empty);
        }
        if entries.len() > MAX_ACTIONS {
            return Err(ConfigError::TooManyActions {
                count: entries.len(),
                max: MAX_ACTIONS,
            });
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::DuplicateAction(entry.name.clone()));
            }
            if let Some(b) = entry.baseline {
                if !b.is_finite() || b < 0.0 {
                    return Err(ConfigError::InvalidBaseline(entry.name.clone()));
                }
            }
        }
        Ok(Self { entries })
    }

    /// The table shipped with the app.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(EMBEDDED_TABLE)
    }

    /// Action names in display order.
    pub fn action_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub fn get(&self, action: &str) -> Option<&CostEntry> {
        self.entries.iter().find(|e| e.name == action)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
