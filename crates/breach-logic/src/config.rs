//! Router configuration.
//!
//! Budgets are threaded into each search from here rather than stored on the
//! mission, so one mission can be queried under different budgets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Health an agent starts a mission with.
pub const DEFAULT_STARTING_POINTS: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Points on arrival at the origin of a best-path search.
    pub starting_points: i32,
    /// Hypothetical budget used when scoring candidate legs of a round trip.
    pub scoring_points: i32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            starting_points: DEFAULT_STARTING_POINTS,
            scoring_points: DEFAULT_STARTING_POINTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A search starting at zero or below can never accept a step.
    #[error("starting points must be positive, got {0}")]
    NonPositiveStartingPoints(i32),
    #[error("scoring points must be positive, got {0}")]
    NonPositiveScoringPoints(i32),
}

impl RouterConfig {
    /// Validate, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.starting_points <= 0 {
            errors.push(ConfigError::NonPositiveStartingPoints(self.starting_points));
        }
        if self.scoring_points <= 0 {
            errors.push(ConfigError::NonPositiveScoringPoints(self.scoring_points));
        }
        errors
    }
}
