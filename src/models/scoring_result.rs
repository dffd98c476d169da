//! Scoring result models.
//!
//! This module contains the [`ScoringResult`] type and the audit trace that
//! records every decision taken while scoring one employee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PerformanceMetrics;

/// A single step in the audit trace recording a scoring decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during scoring.
///
/// Warnings flag suspicious input. They never change the metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a scoring run.
///
/// # Example
///
/// ```
/// use dros_scoring::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of scoring steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during scoring.
    pub warnings: Vec<AuditWarning>,
    /// The total scoring duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of scoring one employee, with its audit trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Unique identifier for this scoring run.
    pub calculation_id: Uuid,
    /// When the scoring run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the score.
    pub engine_version: String,
    /// The LAN ID of the scored employee.
    pub employee_code: String,
    /// The computed metrics.
    pub metrics: PerformanceMetrics,
    /// Complete audit trace of scoring decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_metrics() -> PerformanceMetrics {
        PerformanceMetrics {
            employee_code: "jdoe".to_string(),
            total_transactions: 0,
            minor_mistakes: 0,
            major_mistakes: 0,
            cancelled_transactions: 0,
            weighted_error_rate: Decimal::ZERO,
            total_weighted_mistakes: 0,
            qualified: false,
            disqualification_reason: "Not Qualified (< 20 DROS)".to_string(),
        }
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "dros_volume".to_string(),
            rule_name: "DROS Volume".to_string(),
            input: serde_json::json!({"sales_records": 3}),
            output: serde_json::json!({"total_transactions": 2}),
            reasoning: "2 of 3 sales lines are DROS fees".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"dros_volume\""));
        assert!(json.contains("\"total_transactions\":2"));
    }

    #[test]
    fn test_audit_warning_new() {
        let warning = AuditWarning::new("UNMATCHED_ERROR_LOCATION", "no rule", "low");
        assert_eq!(warning.code, "UNMATCHED_ERROR_LOCATION");
        assert_eq!(warning.message, "no rule");
        assert_eq!(warning.severity, "low");
    }

    #[test]
    fn test_scoring_result_round_trips_through_json() {
        let result = ScoringResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            employee_code: "jdoe".to_string(),
            metrics: sample_metrics(),
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![AuditWarning::new("TEST", "test warning", "low")],
                duration_us: 5,
            },
        };

        let json = serde_json::to_string(&result).unwrap();
        let deserialized: ScoringResult = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.calculation_id, result.calculation_id);
        assert_eq!(deserialized.metrics, result.metrics);
        assert_eq!(deserialized.audit_trace.warnings.len(), 1);
    }
}
