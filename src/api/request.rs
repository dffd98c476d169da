//! Request types for the DROS scoring API.
//!
//! Records arrive in the same shape the models serialize to, so the bodies
//! deserialize straight into domain types.

use serde::{Deserialize, Serialize};

use crate::config::ContestSettings;
use crate::models::{AuditRecord, Employee, SalesRecord, ScoringWindow};

/// Request body for the `/score` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    /// The employee to score.
    pub employee: Employee,
    /// Only records dated inside this window are scored.
    #[serde(default)]
    pub window: Option<ScoringWindow>,
    /// Sales lines; lines for other employees are ignored.
    #[serde(default)]
    pub sales: Vec<SalesRecord>,
    /// Audit findings; findings for other employees are ignored.
    #[serde(default)]
    pub audits: Vec<AuditRecord>,
    /// Overrides the configured minimum DROS volume.
    #[serde(default)]
    pub minimum_transactions: Option<u32>,
}

/// Request body for the `/leaderboard` and `/leaderboard/export` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRequest {
    /// Known employees and their departments.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Only records dated inside this window are scored.
    #[serde(default)]
    pub window: Option<ScoringWindow>,
    /// Sales lines for all employees.
    #[serde(default)]
    pub sales: Vec<SalesRecord>,
    /// Audit findings for all employees.
    #[serde(default)]
    pub audits: Vec<AuditRecord>,
    /// Overrides the configured minimum DROS volume.
    #[serde(default)]
    pub minimum_transactions: Option<u32>,
}

/// Applies a per-request minimum override to the configured settings.
pub(crate) fn effective_settings(
    configured: &ContestSettings,
    minimum_transactions: Option<u32>,
) -> ContestSettings {
    let mut settings = configured.clone();
    if let Some(minimum) = minimum_transactions {
        settings.minimum_transactions = minimum;
    }
    settings
}
