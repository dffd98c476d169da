//! Contest qualification gate.
//!
//! An employee qualifies for the ranking when they are not in an exempt
//! department and processed at least the minimum number of DROS
//! transactions in the window.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, QUALIFIED_REASON};

/// Minimum number of DROS transactions needed to qualify, unless configured otherwise.
pub const DEFAULT_MINIMUM_TRANSACTIONS: u32 = 20;

/// Why an employee did or did not qualify.
///
/// The [`Display`](fmt::Display) form is the reason text shown in the
/// contest table.
///
/// # Example
///
/// ```
/// use dros_scoring::calculation::QualificationStatus;
///
/// let status = QualificationStatus::BelowMinimum { minimum_transactions: 20 };
/// assert_eq!(status.to_string(), "Not Qualified (< 20 DROS)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QualificationStatus {
    /// Counts toward the ranking.
    Qualified,
    /// The employee's department does not compete.
    ExemptDepartment,
    /// Too few DROS transactions.
    BelowMinimum {
        /// The threshold that was missed.
        minimum_transactions: u32,
    },
    /// Not qualified for any other reason.
    NotQualified,
}

impl QualificationStatus {
    /// Returns true for [`QualificationStatus::Qualified`].
    pub fn is_qualified(&self) -> bool {
        matches!(self, QualificationStatus::Qualified)
    }
}

impl fmt::Display for QualificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualificationStatus::Qualified => write!(f, "{}", QUALIFIED_REASON),
            QualificationStatus::ExemptDepartment => write!(f, "Not Qualified (Ops Department)"),
            QualificationStatus::BelowMinimum {
                minimum_transactions,
            } => write!(f, "Not Qualified (< {} DROS)", minimum_transactions),
            QualificationStatus::NotQualified => write!(f, "Not Qualified"),
        }
    }
}

/// The qualification decision and its audit step.
#[derive(Debug, Clone)]
pub struct QualificationResult {
    /// Whether the employee qualifies.
    pub qualified: bool,
    /// The reason behind the decision.
    pub status: QualificationStatus,
    /// The audit step recording the decision.
    pub audit_step: AuditStep,
}

/// Applies the qualification gate.
///
/// Exempt employees never qualify, whatever their volume. Exemption is
/// reported ahead of a volume shortfall.
///
/// # Examples
///
/// ```
/// use dros_scoring::calculation::{QualificationStatus, evaluate_qualification};
///
/// let result = evaluate_qualification(25, false, 20, 1);
/// assert!(result.qualified);
///
/// let result = evaluate_qualification(50, true, 20, 1);
/// assert!(!result.qualified);
/// assert_eq!(result.status, QualificationStatus::ExemptDepartment);
/// ```
pub fn evaluate_qualification(
    total_transactions: u32,
    is_exempt_department: bool,
    minimum_transactions: u32,
    step_number: u32,
) -> QualificationResult {
    let qualified = !is_exempt_department && total_transactions >= minimum_transactions;

    let status = if qualified {
        QualificationStatus::Qualified
    } else if is_exempt_department {
        QualificationStatus::ExemptDepartment
    } else if total_transactions < minimum_transactions {
        QualificationStatus::BelowMinimum {
            minimum_transactions,
        }
    } else {
        QualificationStatus::NotQualified
    };

    let reasoning = match status {
        QualificationStatus::Qualified => format!(
            "{} DROS meets minimum of {}",
            total_transactions, minimum_transactions
        ),
        QualificationStatus::ExemptDepartment => {
            "Exempt department does not compete, volume not considered".to_string()
        }
        QualificationStatus::BelowMinimum { .. } => format!(
            "{} DROS is below minimum of {}",
            total_transactions, minimum_transactions
        ),
        QualificationStatus::NotQualified => "Not qualified".to_string(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "qualification".to_string(),
        rule_name: "Contest Qualification".to_string(),
        input: serde_json::json!({
            "total_transactions": total_transactions,
            "is_exempt_department": is_exempt_department,
            "minimum_transactions": minimum_transactions
        }),
        output: serde_json::json!({
            "qualified": qualified,
            "disqualification_reason": status.to_string()
        }),
        reasoning,
    };

    QualificationResult {
        qualified,
        status,
        audit_step,
    }
}
