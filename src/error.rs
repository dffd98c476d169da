//! Error types for the DROS scoring engine.
//!
//! The scoring computation itself never fails. These errors cover the
//! fallible edges around it: loading configuration, reading from a record
//! store, validating request windows and writing exports.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the scoring engine.
///
/// # Example
///
/// ```
/// use dros_scoring::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/contest.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/contest.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A point-weight rule in the configuration is unusable.
    #[error("Invalid point weight rule '{error_location}': {message}")]
    InvalidWeightRule {
        /// The label of the offending rule.
        error_location: String,
        /// What is wrong with it.
        message: String,
    },

    /// A scoring window ends before it starts.
    #[error("Invalid scoring window: {end} is before {start}")]
    InvalidWindow {
        /// First day of the window.
        start: NaiveDate,
        /// Last day of the window.
        end: NaiveDate,
    },

    /// The record store could not supply records.
    #[error("Record store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the store failure.
        message: String,
    },

    /// An environment setting holds an unusable value.
    #[error("Invalid setting {name}='{value}'")]
    InvalidSetting {
        /// The name of the setting.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// Export rows could not be written.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the write failure.
        message: String,
    },
}

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        EngineError::ExportError {
            message: error.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/point_weights.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/point_weights.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_weight_rule_displays_label_and_message() {
        let error = EngineError::InvalidWeightRule {
            error_location: "Serial Number".to_string(),
            message: "points_deducted must be between 0 and 10".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid point weight rule 'Serial Number': points_deducted must be between 0 and 10"
        );
    }

    #[test]
    fn test_invalid_window_displays_dates() {
        let error = EngineError::InvalidWindow {
            start: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid scoring window: 2024-03-01 is before 2024-03-31"
        );
    }

    #[test]
    fn test_store_unavailable_displays_message() {
        let error = EngineError::StoreUnavailable {
            message: "lock poisoned".to_string(),
        };
        assert_eq!(error.to_string(), "Record store unavailable: lock poisoned");
    }

    #[test]
    fn test_invalid_setting_displays_name_and_value() {
        let error = EngineError::InvalidSetting {
            name: "APP_PORT".to_string(),
            value: "eighty".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid setting APP_PORT='eighty'");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_store_error() -> EngineResult<()> {
            Err(EngineError::StoreUnavailable {
                message: "offline".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_store_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
