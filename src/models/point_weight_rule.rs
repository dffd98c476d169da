//! Point-weight rules mapping audit defect labels to deductions.

use serde::{Deserialize, Serialize};

/// Label reserved for the cancelled-DROS deduction row of the rule table.
pub const CANCELLED_DROS_LABEL: &str = "Cancelled DROS";

/// Maps a defect classification to a deduction weight.
///
/// Rules are shared by every employee and are matched against
/// [`AuditRecord::error_location`](super::AuditRecord) by exact equality.
///
/// # Example
///
/// ```
/// use dros_scoring::models::PointWeightRule;
///
/// let rule = PointWeightRule::new("Serial Number", 2);
/// assert!(rule.matches("Serial Number"));
/// assert!(!rule.matches("serial number"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointWeightRule {
    /// The defect label this rule applies to.
    pub error_location: String,
    /// The number of points deducted for one finding.
    pub points_deducted: i32,
}

impl PointWeightRule {
    /// Creates a rule.
    pub fn new(error_location: impl Into<String>, points_deducted: i32) -> Self {
        Self {
            error_location: error_location.into(),
            points_deducted,
        }
    }

    /// Returns true when the label equals this rule's label exactly.
    pub fn matches(&self, error_location: &str) -> bool {
        self.error_location == error_location
    }

    /// Returns true for the reserved cancelled-DROS row.
    pub fn is_cancelled_dros(&self) -> bool {
        self.error_location == CANCELLED_DROS_LABEL
    }
}
