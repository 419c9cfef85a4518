//! Search configuration, loadable from TOML.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::heuristics::Heuristic;

/// Errors raised while loading a `SearchConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunable parameters of the best-first search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    /// A cancellation check is offered whenever a new node's path cost is a
    /// multiple of this value. `0` disables checks.
    #[serde(default = "default_check_interval")]
    pub check_interval: u32,

    /// Maximum number of node expansions before the search stops with a
    /// partial result. Unlimited when absent.
    #[serde(default)]
    pub max_expansions: Option<u64>,

    /// Distance estimate used to order the frontier.
    #[serde(default)]
    pub heuristic: Heuristic,

    /// Expand each distinct board at most once.
    #[serde(default = "default_true")]
    pub closed_set: bool,

    /// Reject boards whose permutation parity makes the goal unreachable
    /// before searching.
    #[serde(default = "default_true")]
    pub check_solvability: bool,
}

fn default_check_interval() -> u32 {
    30
}
fn default_true() -> bool {
    true
}

impl SearchConfig {
    /// Parse a config from TOML text; unspecified fields keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), "Loaded search config");
        Ok(config)
    }

    /// Log a warning for settings that make the search unbounded or inert.
    pub fn validate(&self) {
        if self.check_interval == 0 {
            tracing::warn!("check_interval = 0, cancellation checks are disabled");
        }
        if self.max_expansions == Some(0) {
            tracing::warn!("max_expansions = 0, the search will stop before expanding the root");
        }
        if !self.closed_set && !self.check_solvability && self.max_expansions.is_none() {
            tracing::warn!(
                "closed_set and check_solvability are both off with no expansion limit; \
                 an unsolvable board will search until cancelled"
            );
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            check_interval: default_check_interval(),
            max_expansions: None,
            heuristic: Heuristic::default(),
            closed_set: default_true(),
            check_solvability: default_true(),
        }
    }
}
