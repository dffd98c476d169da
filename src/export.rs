//! CSV export of contest results.
//!
//! Produces the table the contest is published from: one row per employee
//! in leaderboard order, with the error rate shown as a percentage.

use std::io;

use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::models::PerformanceMetrics;

/// Column headers, in output order.
pub const EXPORT_HEADERS: [&str; 8] = [
    "Employee",
    "Total DROS",
    "Minor Mistakes",
    "Major Mistakes",
    "Cancelled DROS",
    "Weighted Mistakes",
    "Error Rate",
    "Status",
];

/// One line of the exported table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    /// Employee LAN ID.
    #[serde(rename = "Employee")]
    pub employee: String,
    /// DROS fee lines in the window.
    #[serde(rename = "Total DROS")]
    pub total_dros: u32,
    /// Minor audit findings.
    #[serde(rename = "Minor Mistakes")]
    pub minor_mistakes: u32,
    /// Major audit findings.
    #[serde(rename = "Major Mistakes")]
    pub major_mistakes: u32,
    /// Cancelled transactions.
    #[serde(rename = "Cancelled DROS")]
    pub cancelled_dros: u32,
    /// Total weighted mistakes.
    #[serde(rename = "Weighted Mistakes")]
    pub weighted_mistakes: u32,
    /// Weighted error rate, e.g. `"4.00%"`.
    #[serde(rename = "Error Rate")]
    pub error_rate: String,
    /// Qualification status text.
    #[serde(rename = "Status")]
    pub status: String,
}

impl From<&PerformanceMetrics> for ExportRow {
    fn from(metrics: &PerformanceMetrics) -> Self {
        Self {
            employee: metrics.employee_code.clone(),
            total_dros: metrics.total_transactions,
            minor_mistakes: metrics.minor_mistakes,
            major_mistakes: metrics.major_mistakes,
            cancelled_dros: metrics.cancelled_transactions,
            weighted_mistakes: metrics.total_weighted_mistakes,
            error_rate: format!("{:.2}%", metrics.weighted_error_rate),
            status: metrics.disqualification_reason.clone(),
        }
    }
}

/// Converts metrics rows to export rows, keeping their order.
pub fn export_rows<'a, I>(metrics: I) -> Vec<ExportRow>
where
    I: IntoIterator<Item = &'a PerformanceMetrics>,
{
    metrics.into_iter().map(ExportRow::from).collect()
}

/// Writes the header row and one row per metrics entry to `writer`.
///
/// The header is written even when `metrics` is empty.
pub fn write_csv<'a, W, I>(writer: W, metrics: I) -> EngineResult<W>
where
    W: io::Write,
    I: IntoIterator<Item = &'a PerformanceMetrics>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(EXPORT_HEADERS)?;
    for row in export_rows(metrics) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;

    csv_writer
        .into_inner()
        .map_err(|e| EngineError::ExportError {
            message: e.error().to_string(),
        })
}

/// Renders the CSV table to a string.
///
/// # Example
///
/// ```
/// use dros_scoring::export::to_csv_string;
///
/// let csv = to_csv_string(&[]).unwrap();
/// assert_eq!(
///     csv,
///     "Employee,Total DROS,Minor Mistakes,Major Mistakes,Cancelled DROS,Weighted Mistakes,Error Rate,Status\n"
/// );
/// ```
pub fn to_csv_string(metrics: &[PerformanceMetrics]) -> EngineResult<String> {
    let buffer = write_csv(Vec::new(), metrics)?;
    String::from_utf8(buffer).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn metrics(code: &str, rate: Decimal, reason: &str) -> PerformanceMetrics {
        PerformanceMetrics {
            employee_code: code.to_string(),
            total_transactions: 25,
            minor_mistakes: 1,
            major_mistakes: 0,
            cancelled_transactions: 0,
            weighted_error_rate: rate,
            total_weighted_mistakes: 1,
            qualified: reason == "Qualified",
            disqualification_reason: reason.to_string(),
        }
    }

    #[test]
    fn test_export_row_formats_rate_as_percentage() {
        let row = ExportRow::from(&metrics("jdoe", Decimal::new(400, 2), "Qualified"));
        assert_eq!(row.error_rate, "4.00%");
        assert_eq!(row.status, "Qualified");
        assert_eq!(row.total_dros, 25);
    }

    #[test]
    fn test_zero_rate_keeps_two_places() {
        let row = ExportRow::from(&metrics("jdoe", Decimal::ZERO, "Not Qualified"));
        assert_eq!(row.error_rate, "0.00%");
    }

    #[test]
    fn test_csv_has_header_and_rows_in_order() {
        let rows = vec![
            metrics("amy", Decimal::new(400, 2), "Qualified"),
            metrics("zed", Decimal::new(1250, 2), "Not Qualified (< 20 DROS)"),
        ];

        let csv = to_csv_string(&rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], EXPORT_HEADERS.join(","));
        assert_eq!(lines[1], "amy,25,1,0,0,1,4.00%,Qualified");
        assert_eq!(lines[2], "zed,25,1,0,0,1,12.50%,Not Qualified (< 20 DROS)");
    }

    #[test]
    fn test_status_with_comma_is_quoted() {
        let rows = vec![metrics("amy", Decimal::ZERO, "Not Qualified, on leave")];

        let csv = to_csv_string(&rows).unwrap();

        assert!(csv.contains("\"Not Qualified, on leave\""));
    }

    #[test]
    fn test_write_csv_returns_the_writer() {
        let rows = vec![metrics("amy", Decimal::ZERO, "Qualified")];
        let buffer = write_csv(Vec::new(), &rows).unwrap();
        assert!(!buffer.is_empty());
    }
}
