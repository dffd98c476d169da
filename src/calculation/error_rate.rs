//! Weighted error rate calculation.
//!
//! The rate is the weighted mistake total per 100 DROS transactions. It is
//! computed in decimal arithmetic and rounded half away from zero to two
//! places, so `1 / 3` becomes `33.33` and `1 / 8` becomes `12.50`.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::AuditStep;

/// Number of decimal places kept on the error rate.
pub const ERROR_RATE_DECIMAL_PLACES: u32 = 2;

/// The weighted error rate and its audit step.
#[derive(Debug, Clone)]
pub struct ErrorRateResult {
    /// The percentage, always carrying two decimal places.
    pub weighted_error_rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Rounds a percentage to two places and pads it to exactly two places.
pub fn round_rate(rate: Decimal) -> Decimal {
    let mut rounded =
        rate.round_dp_with_strategy(ERROR_RATE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(ERROR_RATE_DECIMAL_PLACES);
    rounded
}

/// Calculates the weighted error rate.
///
/// With no transactions the rate is zero rather than undefined.
///
/// # Examples
///
/// ```
/// use dros_scoring::calculation::calculate_error_rate;
/// use rust_decimal::Decimal;
///
/// let result = calculate_error_rate(1, 25, 1);
/// assert_eq!(result.weighted_error_rate.to_string(), "4.00");
///
/// let result = calculate_error_rate(5, 0, 1);
/// assert_eq!(result.weighted_error_rate, Decimal::ZERO);
/// ```
pub fn calculate_error_rate(
    total_weighted_mistakes: u32,
    total_transactions: u32,
    step_number: u32,
) -> ErrorRateResult {
    let weighted_error_rate = if total_transactions > 0 {
        let raw = Decimal::from(total_weighted_mistakes) * Decimal::from(100)
            / Decimal::from(total_transactions);
        round_rate(raw)
    } else {
        round_rate(Decimal::ZERO)
    };

    let reasoning = if total_transactions > 0 {
        format!(
            "{} / {} x 100 = {}%",
            total_weighted_mistakes, total_transactions, weighted_error_rate
        )
    } else {
        "No DROS transactions in window, rate is 0".to_string()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "weighted_error_rate".to_string(),
        rule_name: "Weighted Error Rate".to_string(),
        input: serde_json::json!({
            "total_weighted_mistakes": total_weighted_mistakes,
            "total_transactions": total_transactions
        }),
        output: serde_json::json!({
            "weighted_error_rate": weighted_error_rate.to_string()
        }),
        reasoning,
    };

    ErrorRateResult {
        weighted_error_rate,
        audit_step,
    }
}
