//! Per-employee scoring output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reason text attached to a qualified employee.
pub const QUALIFIED_REASON: &str = "Qualified";

/// The performance score of one employee over one window.
///
/// Produced fresh by every engine run and never mutated afterwards.
///
/// # Example
///
/// ```
/// use dros_scoring::models::PerformanceMetrics;
/// use rust_decimal::Decimal;
///
/// let metrics = PerformanceMetrics {
///     employee_code: "jdoe".to_string(),
///     total_transactions: 25,
///     minor_mistakes: 1,
///     major_mistakes: 0,
///     cancelled_transactions: 0,
///     weighted_error_rate: Decimal::new(400, 2),
///     total_weighted_mistakes: 1,
///     qualified: true,
///     disqualification_reason: "Qualified".to_string(),
/// };
/// assert_eq!(metrics.weighted_error_rate.to_string(), "4.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// The LAN ID of the scored employee.
    pub employee_code: String,
    /// Number of DROS fee lines in the window.
    pub total_transactions: u32,
    /// Audit findings whose rule carries a minor weight.
    pub minor_mistakes: u32,
    /// Audit findings whose rule carries a major weight.
    pub major_mistakes: u32,
    /// Cancellations found on sales lines plus cancellations found on audits.
    pub cancelled_transactions: u32,
    /// Weighted mistakes per 100 transactions, rounded to two places.
    pub weighted_error_rate: Decimal,
    /// `minor + 2 * major + 3 * cancelled`.
    pub total_weighted_mistakes: u32,
    /// Whether the employee counts toward the contest ranking.
    pub qualified: bool,
    /// Human-readable qualification status.
    pub disqualification_reason: String,
}
