//! DROS volume counting.
//!
//! Only sales lines described as a DROS fee represent a regulatory
//! transaction. Everything else on the sales feed is dropped before any
//! counting takes place.

use crate::models::{AuditStep, DROS_FEE_DESCRIPTION, SalesRecord};

/// The result of counting qualifying transaction volume.
#[derive(Debug, Clone)]
pub struct DrosVolumeResult {
    /// Number of DROS fee lines.
    pub total_transactions: u32,
    /// The audit step recording this count.
    pub audit_step: AuditStep,
}

/// Keeps only the DROS fee lines of a sales feed.
///
/// Lines with any other description, or none, are discarded silently.
///
/// # Example
///
/// ```
/// use dros_scoring::calculation::retain_dros_fees;
/// use dros_scoring::models::SalesRecord;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// let mut ammo = SalesRecord::dros_fee("jdoe", date);
/// ammo.description = Some("Ammunition".to_string());
/// let sales = vec![SalesRecord::dros_fee("jdoe", date), ammo];
///
/// let retained = retain_dros_fees(&sales);
/// assert_eq!(retained.len(), 1);
/// ```
pub fn retain_dros_fees<'a, I>(sales_records: I) -> Vec<&'a SalesRecord>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    sales_records
        .into_iter()
        .filter(|record| record.is_dros_fee())
        .collect()
}

/// Counts the retained DROS lines and records how many were discarded.
///
/// # Arguments
///
/// * `retained` - The DROS fee lines kept by [`retain_dros_fees`]
/// * `discarded` - How many sales lines the filter dropped
/// * `step_number` - The step number for audit trail sequencing
pub fn count_dros_volume(
    retained: &[&SalesRecord],
    discarded: u32,
    step_number: u32,
) -> DrosVolumeResult {
    let total_transactions = retained.len() as u32;

    let reasoning = if discarded == 0 {
        format!("{} DROS fee lines in window", total_transactions)
    } else {
        format!(
            "{} DROS fee lines in window; {} non-DROS sales lines ignored",
            total_transactions, discarded
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "dros_volume".to_string(),
        rule_name: "DROS Volume".to_string(),
        input: serde_json::json!({
            "sales_lines": total_transactions + discarded,
            "description_filter": DROS_FEE_DESCRIPTION
        }),
        output: serde_json::json!({
            "total_transactions": total_transactions,
            "discarded_lines": discarded
        }),
        reasoning,
    };

    DrosVolumeResult {
        total_transactions,
        audit_step,
    }
}
