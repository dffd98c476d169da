//! Configuration types for contest scoring.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};

use crate::calculation::DEFAULT_MINIMUM_TRANSACTIONS;
use crate::models::{DEFAULT_EXEMPT_DEPARTMENT, PointWeightRule};

fn default_contest_name() -> String {
    "DROS Sales Contest".to_string()
}

fn default_minimum_transactions() -> u32 {
    DEFAULT_MINIMUM_TRANSACTIONS
}

fn default_exempt_departments() -> Vec<String> {
    vec![DEFAULT_EXEMPT_DEPARTMENT.to_string()]
}

/// Contest settings from `contest.yaml`.
///
/// Every field has a default, so an empty file yields the standard contest:
/// a 20 DROS minimum with Operations staff exempt.
///
/// # Example
///
/// ```
/// use dros_scoring::config::ContestSettings;
///
/// let settings: ContestSettings = serde_yaml::from_str("minimum_transactions: 15").unwrap();
/// assert_eq!(settings.minimum_transactions, 15);
/// assert_eq!(settings.exempt_departments, vec!["Operations".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestSettings {
    /// The display name of the contest.
    #[serde(default = "default_contest_name")]
    pub name: String,
    /// Minimum DROS volume needed to qualify.
    #[serde(default = "default_minimum_transactions")]
    pub minimum_transactions: u32,
    /// Departments whose staff never qualify.
    #[serde(default = "default_exempt_departments")]
    pub exempt_departments: Vec<String>,
}

impl Default for ContestSettings {
    fn default() -> Self {
        Self {
            name: default_contest_name(),
            minimum_transactions: default_minimum_transactions(),
            exempt_departments: default_exempt_departments(),
        }
    }
}

/// Point-weight rule table from `point_weights.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PointWeightsConfig {
    /// The rules, in table order.
    pub rules: Vec<PointWeightRule>,
}

/// The complete scoring configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    contest: ContestSettings,
    point_weight_rules: Vec<PointWeightRule>,
}

impl ScoringConfig {
    /// Creates a new ScoringConfig from its component parts.
    pub fn new(contest: ContestSettings, point_weight_rules: Vec<PointWeightRule>) -> Self {
        Self {
            contest,
            point_weight_rules,
        }
    }

    /// Returns the contest settings.
    pub fn contest(&self) -> &ContestSettings {
        &self.contest
    }

    /// Returns the rule table in file order.
    pub fn point_weight_rules(&self) -> &[PointWeightRule] {
        &self.point_weight_rules
    }
}
