//! Severity-weighted mistake totals.

use crate::models::AuditStep;

/// Weight of one minor mistake.
pub const MINOR_MISTAKE_WEIGHT: u32 = 1;

/// Weight of one major mistake.
pub const MAJOR_MISTAKE_WEIGHT: u32 = 2;

/// Weight of one cancelled transaction.
pub const CANCELLED_TRANSACTION_WEIGHT: u32 = 3;

/// The weighted mistake total and its audit step.
#[derive(Debug, Clone)]
pub struct WeightedMistakesResult {
    /// `minor * 1 + major * 2 + cancelled * 3`.
    pub total_weighted_mistakes: u32,
    /// The audit step recording this total.
    pub audit_step: AuditStep,
}

/// Combines mistake and cancellation counts into one weighted total.
///
/// # Example
///
/// ```
/// use dros_scoring::calculation::calculate_weighted_mistakes;
///
/// let result = calculate_weighted_mistakes(1, 2, 1, 1);
/// assert_eq!(result.total_weighted_mistakes, 1 + 4 + 3);
/// ```
pub fn calculate_weighted_mistakes(
    minor_mistakes: u32,
    major_mistakes: u32,
    cancelled_transactions: u32,
    step_number: u32,
) -> WeightedMistakesResult {
    let total_weighted_mistakes = minor_mistakes * MINOR_MISTAKE_WEIGHT
        + major_mistakes * MAJOR_MISTAKE_WEIGHT
        + cancelled_transactions * CANCELLED_TRANSACTION_WEIGHT;

    let audit_step = AuditStep {
        step_number,
        rule_id: "weighted_mistakes".to_string(),
        rule_name: "Weighted Mistakes".to_string(),
        input: serde_json::json!({
            "minor_mistakes": minor_mistakes,
            "major_mistakes": major_mistakes,
            "cancelled_transactions": cancelled_transactions
        }),
        output: serde_json::json!({
            "total_weighted_mistakes": total_weighted_mistakes
        }),
        reasoning: format!(
            "{} x {} + {} x {} + {} x {} = {}",
            minor_mistakes,
            MINOR_MISTAKE_WEIGHT,
            major_mistakes,
            MAJOR_MISTAKE_WEIGHT,
            cancelled_transactions,
            CANCELLED_TRANSACTION_WEIGHT,
            total_weighted_mistakes
        ),
    };

    WeightedMistakesResult {
        total_weighted_mistakes,
        audit_step,
    }
}
