//! Compliance audit findings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CancelledFlag;

/// One compliance-audit finding tied to a transaction.
///
/// `error_location` is the free-text defect label that is matched against
/// the point-weight rule table. A finding without a label matches no rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// The LAN ID of the audited employee.
    #[serde(default)]
    pub employee_code: String,
    /// The defect classification label.
    #[serde(default)]
    pub error_location: Option<String>,
    /// The date the audit was performed.
    #[serde(default)]
    pub audited_at: Option<NaiveDate>,
    /// Whether the audited transaction was cancelled.
    #[serde(default)]
    pub cancelled: CancelledFlag,
}

impl AuditRecord {
    /// Creates a finding with the given label and no cancellation.
    pub fn finding(
        employee_code: impl Into<String>,
        error_location: impl Into<String>,
        audited_at: NaiveDate,
    ) -> Self {
        Self {
            employee_code: employee_code.into(),
            error_location: Some(error_location.into()),
            audited_at: Some(audited_at),
            cancelled: CancelledFlag::Unset,
        }
    }

    /// Returns true when the audit recorded the transaction as cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_audit_record() {
        let json = r#"{
            "employee_code": "jdoe",
            "error_location": "Serial Number",
            "audited_at": "2024-03-07",
            "cancelled": "No"
        }"#;
        let record: AuditRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.employee_code, "jdoe");
        assert_eq!(record.error_location.as_deref(), Some("Serial Number"));
        assert_eq!(
            record.audited_at,
            Some(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
        );
        assert!(!record.is_cancelled());
    }

    #[test]
    fn test_deserialize_audit_without_label() {
        let record: AuditRecord =
            serde_json::from_str(r#"{"employee_code": "jdoe", "cancelled": "Yes"}"#).unwrap();
        assert_eq!(record.error_location, None);
        assert!(record.is_cancelled());
    }

    #[test]
    fn test_finding_constructor() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let record = AuditRecord::finding("jdoe", "Purchaser Info", date);
        assert_eq!(record.error_location.as_deref(), Some("Purchaser Info"));
        assert_eq!(record.audited_at, Some(date));
        assert_eq!(record.cancelled, CancelledFlag::Unset);
    }
}
