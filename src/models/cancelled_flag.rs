//! Tri-state cancellation flag shared by sales and audit records.

use serde::{Deserialize, Serialize};

/// The literal the record store writes when a transaction was cancelled.
pub const CANCELLED_YES: &str = "Yes";

/// Whether a transaction was cancelled after the fact.
///
/// The record store writes `"Yes"` for a cancelled transaction and leaves
/// the column empty, writes `"No"`, or omits it otherwise. Only an exact
/// `"Yes"` counts as cancelled; any other value is kept verbatim so it
/// serializes back unchanged.
///
/// # Example
///
/// ```
/// use dros_scoring::models::CancelledFlag;
///
/// let flag: CancelledFlag = serde_json::from_str("\"Yes\"").unwrap();
/// assert!(flag.is_cancelled());
///
/// let flag: CancelledFlag = serde_json::from_str("null").unwrap();
/// assert_eq!(flag, CancelledFlag::Unset);
/// assert!(!flag.is_cancelled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum CancelledFlag {
    /// The transaction was cancelled.
    Yes,
    /// Any other recorded value, including `"No"` and the empty string.
    Other(String),
    /// No value was recorded.
    #[default]
    Unset,
}

impl CancelledFlag {
    /// Returns true only for an exact `"Yes"`.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CancelledFlag::Yes)
    }
}

impl From<Option<String>> for CancelledFlag {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) if v == CANCELLED_YES => CancelledFlag::Yes,
            Some(v) => CancelledFlag::Other(v),
            None => CancelledFlag::Unset,
        }
    }
}

impl From<CancelledFlag> for Option<String> {
    fn from(flag: CancelledFlag) -> Self {
        match flag {
            CancelledFlag::Yes => Some(CANCELLED_YES.to_string()),
            CancelledFlag::Other(v) => Some(v),
            CancelledFlag::Unset => None,
        }
    }
}

impl From<bool> for CancelledFlag {
    fn from(cancelled: bool) -> Self {
        if cancelled {
            CancelledFlag::Yes
        } else {
            CancelledFlag::Other("No".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_is_cancelled() {
        let flag: CancelledFlag = serde_json::from_str("\"Yes\"").unwrap();
        assert_eq!(flag, CancelledFlag::Yes);
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_no_is_not_cancelled() {
        let flag: CancelledFlag = serde_json::from_str("\"No\"").unwrap();
        assert_eq!(flag, CancelledFlag::Other("No".to_string()));
        assert!(!flag.is_cancelled());
    }

    #[test]
    fn test_empty_string_is_not_cancelled() {
        let flag: CancelledFlag = serde_json::from_str("\"\"").unwrap();
        assert!(!flag.is_cancelled());
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let flag: CancelledFlag = serde_json::from_str("\"yes\"").unwrap();
        assert!(!flag.is_cancelled());

        let flag: CancelledFlag = serde_json::from_str("\"YES\"").unwrap();
        assert!(!flag.is_cancelled());
    }

    #[test]
    fn test_null_is_unset() {
        let flag: CancelledFlag = serde_json::from_str("null").unwrap();
        assert_eq!(flag, CancelledFlag::Unset);
    }

    #[test]
    fn test_other_value_serializes_verbatim() {
        let flag = CancelledFlag::Other("N/A".to_string());
        assert_eq!(serde_json::to_string(&flag).unwrap(), "\"N/A\"");
        assert_eq!(serde_json::to_string(&CancelledFlag::Unset).unwrap(), "null");
    }

    #[test]
    fn test_from_bool() {
        assert!(CancelledFlag::from(true).is_cancelled());
        assert!(!CancelledFlag::from(false).is_cancelled());
    }
}
