//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading contest
//! configuration from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::PointWeightRule;

use super::types::{ContestSettings, PointWeightsConfig, ScoringConfig};

/// Highest deduction a rule may carry.
pub const MAX_POINTS_DEDUCTED: i32 = 10;

/// Loads and provides access to the scoring configuration.
///
/// # Directory Structure
///
/// ```text
/// config/dros_contest/
/// ├── contest.yaml        # Contest name, minimum DROS, exempt departments
/// └── point_weights.yaml  # Audit label to deduction weight
/// ```
///
/// # Example
///
/// ```no_run
/// use dros_scoring::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/dros_contest")?;
/// println!("{} rules loaded", loader.point_weight_rules().len());
/// # Ok::<(), dros_scoring::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ScoringConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails if either file is missing, is not valid YAML, or if the rule
    /// table is empty or holds a rule with an empty label or a weight
    /// outside `0..=10`.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let contest = Self::load_yaml::<ContestSettings>(&path.join("contest.yaml"))?;
        let weights = Self::load_yaml::<PointWeightsConfig>(&path.join("point_weights.yaml"))?;

        Self::validate_rules(&weights.rules)?;

        info!(
            path = %path.display(),
            contest = %contest.name,
            rules = weights.rules.len(),
            minimum_transactions = contest.minimum_transactions,
            "Loaded scoring configuration"
        );

        Ok(Self {
            config: ScoringConfig::new(contest, weights.rules),
        })
    }

    /// Builds a loader from in-memory parts, applying the same rule validation as [`load`](Self::load).
    pub fn from_parts(
        contest: ContestSettings,
        point_weight_rules: Vec<PointWeightRule>,
    ) -> EngineResult<Self> {
        Self::validate_rules(&point_weight_rules)?;
        Ok(Self {
            config: ScoringConfig::new(contest, point_weight_rules),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_rules(rules: &[PointWeightRule]) -> EngineResult<()> {
        if rules.is_empty() {
            return Err(EngineError::InvalidWeightRule {
                error_location: String::new(),
                message: "rule table is empty".to_string(),
            });
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for rule in rules {
            if rule.error_location.trim().is_empty() {
                return Err(EngineError::InvalidWeightRule {
                    error_location: rule.error_location.clone(),
                    message: "error_location must not be empty".to_string(),
                });
            }
            if !(0..=MAX_POINTS_DEDUCTED).contains(&rule.points_deducted) {
                return Err(EngineError::InvalidWeightRule {
                    error_location: rule.error_location.clone(),
                    message: format!(
                        "points_deducted must be between 0 and {}, got {}",
                        MAX_POINTS_DEDUCTED, rule.points_deducted
                    ),
                });
            }
            if !seen.insert(rule.error_location.as_str()) {
                warn!(
                    error_location = %rule.error_location,
                    "Duplicate point weight rule, first entry wins"
                );
            }
        }

        Ok(())
    }

    /// Returns the underlying scoring configuration.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Returns the contest settings.
    pub fn contest(&self) -> &ContestSettings {
        self.config.contest()
    }

    /// Returns the point-weight rule table.
    pub fn point_weight_rules(&self) -> &[PointWeightRule] {
        self.config.point_weight_rules()
    }
}
