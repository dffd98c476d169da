//! Sales transaction records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CancelledFlag;

/// Description of the sales line that represents one DROS transaction.
///
/// Only lines carrying exactly this description count toward volume.
pub const DROS_FEE_DESCRIPTION: &str = "Dros Fee";

/// One completed sales line tied to a specific fee type.
///
/// # Example
///
/// ```
/// use dros_scoring::models::{CancelledFlag, SalesRecord};
///
/// let json = r#"{
///     "employee_code": "jdoe",
///     "sold_at": "2024-03-05",
///     "description": "Dros Fee",
///     "cancelled": "Yes"
/// }"#;
/// let record: SalesRecord = serde_json::from_str(json).unwrap();
///
/// assert!(record.is_dros_fee());
/// assert!(record.is_cancelled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// The LAN ID of the employee who processed the sale.
    #[serde(default)]
    pub employee_code: String,
    /// The date of the sale.
    #[serde(default)]
    pub sold_at: Option<NaiveDate>,
    /// The fee category of the line (e.g. "Dros Fee").
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the transaction was later cancelled.
    #[serde(default)]
    pub cancelled: CancelledFlag,
}

impl SalesRecord {
    /// Creates a DROS fee line for the given employee and date.
    pub fn dros_fee(employee_code: impl Into<String>, sold_at: NaiveDate) -> Self {
        Self {
            employee_code: employee_code.into(),
            sold_at: Some(sold_at),
            description: Some(DROS_FEE_DESCRIPTION.to_string()),
            cancelled: CancelledFlag::Unset,
        }
    }

    /// Returns true when the line is a DROS fee and therefore counts toward volume.
    pub fn is_dros_fee(&self) -> bool {
        self.description.as_deref() == Some(DROS_FEE_DESCRIPTION)
    }

    /// Returns true when the sale was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_dros_fee_constructor() {
        let record = SalesRecord::dros_fee("jdoe", date());
        assert_eq!(record.employee_code, "jdoe");
        assert_eq!(record.sold_at, Some(date()));
        assert!(record.is_dros_fee());
        assert!(!record.is_cancelled());
    }

    #[test]
    fn test_other_descriptions_are_not_dros() {
        let mut record = SalesRecord::dros_fee("jdoe", date());
        record.description = Some("Ammunition".to_string());
        assert!(!record.is_dros_fee());

        record.description = Some("DROS FEE".to_string());
        assert!(!record.is_dros_fee());

        record.description = None;
        assert!(!record.is_dros_fee());
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let record: SalesRecord = serde_json::from_str(r#"{"employee_code": "asmith"}"#).unwrap();
        assert_eq!(record.employee_code, "asmith");
        assert_eq!(record.sold_at, None);
        assert_eq!(record.description, None);
        assert_eq!(record.cancelled, CancelledFlag::Unset);
        assert!(!record.is_dros_fee());
    }

    #[test]
    fn test_deserialize_with_null_fields() {
        let json = r#"{
            "employee_code": "asmith",
            "sold_at": null,
            "description": "Dros Fee",
            "cancelled": null
        }"#;
        let record: SalesRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_dros_fee());
        assert!(!record.is_cancelled());
    }

    #[test]
    fn test_serialize_sales_record() {
        let mut record = SalesRecord::dros_fee("jdoe", date());
        record.cancelled = CancelledFlag::Yes;
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"employee_code\":\"jdoe\""));
        assert!(json.contains("\"sold_at\":\"2024-03-05\""));
        assert!(json.contains("\"description\":\"Dros Fee\""));
        assert!(json.contains("\"cancelled\":\"Yes\""));
    }
}
