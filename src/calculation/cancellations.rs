//! Cancelled transaction counting.
//!
//! Cancellations are read from both feeds. A sale flagged cancelled on the
//! sales feed and again on its audit is counted once per feed.

use crate::models::{AuditRecord, AuditStep, SalesRecord};

/// The result of counting cancellations across the sales and audit feeds.
#[derive(Debug, Clone)]
pub struct CancellationResult {
    /// Cancelled DROS lines on the sales feed.
    pub sales_cancelled: u32,
    /// Audits flagged cancelled.
    pub audit_cancelled: u32,
    /// `sales_cancelled + audit_cancelled`.
    pub cancelled_transactions: u32,
    /// The audit step recording this count.
    pub audit_step: AuditStep,
}

/// Counts cancelled transactions on both feeds and sums the two counts.
///
/// # Example
///
/// ```
/// use dros_scoring::calculation::count_cancellations;
/// use dros_scoring::models::{AuditRecord, CancelledFlag, SalesRecord};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// let mut sale = SalesRecord::dros_fee("jdoe", date);
/// sale.cancelled = CancelledFlag::Yes;
/// let mut audit = AuditRecord::finding("jdoe", "Serial Number", date);
/// audit.cancelled = CancelledFlag::Yes;
///
/// let result = count_cancellations([&sale], [&audit], 2);
/// assert_eq!(result.cancelled_transactions, 2);
/// ```
pub fn count_cancellations<'a, S, A>(
    sales_records: S,
    audit_records: A,
    step_number: u32,
) -> CancellationResult
where
    S: IntoIterator<Item = &'a SalesRecord>,
    A: IntoIterator<Item = &'a AuditRecord>,
{
    let sales_cancelled = sales_records
        .into_iter()
        .filter(|record| record.is_cancelled())
        .count() as u32;
    let audit_cancelled = audit_records
        .into_iter()
        .filter(|record| record.is_cancelled())
        .count() as u32;
    let cancelled_transactions = sales_cancelled + audit_cancelled;

    let audit_step = AuditStep {
        step_number,
        rule_id: "cancelled_transactions".to_string(),
        rule_name: "Cancelled Transactions".to_string(),
        input: serde_json::json!({
            "sales_cancelled": sales_cancelled,
            "audit_cancelled": audit_cancelled
        }),
        output: serde_json::json!({
            "cancelled_transactions": cancelled_transactions
        }),
        reasoning: format!(
            "{} cancelled on sales feed + {} cancelled on audits = {}",
            sales_cancelled, audit_cancelled, cancelled_transactions
        ),
    };

    CancellationResult {
        sales_cancelled,
        audit_cancelled,
        cancelled_transactions,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CancelledFlag;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn sale(cancelled: CancelledFlag) -> SalesRecord {
        let mut record = SalesRecord::dros_fee("jdoe", date());
        record.cancelled = cancelled;
        record
    }

    fn audit(cancelled: CancelledFlag) -> AuditRecord {
        let mut record = AuditRecord::finding("jdoe", "Serial Number", date());
        record.cancelled = cancelled;
        record
    }

    #[test]
    fn test_no_cancellations() {
        let sales = vec![sale(CancelledFlag::Unset), sale(CancelledFlag::from(false))];
        let audits = vec![audit(CancelledFlag::Other(String::new()))];

        let result = count_cancellations(&sales, &audits, 1);

        assert_eq!(result.sales_cancelled, 0);
        assert_eq!(result.audit_cancelled, 0);
        assert_eq!(result.cancelled_transactions, 0);
    }

    #[test]
    fn test_same_transaction_cancelled_on_both_feeds_counts_twice() {
        let sales = vec![sale(CancelledFlag::Yes)];
        let audits = vec![audit(CancelledFlag::Yes)];

        let result = count_cancellations(&sales, &audits, 1);

        assert_eq!(result.sales_cancelled, 1);
        assert_eq!(result.audit_cancelled, 1);
        assert_eq!(result.cancelled_transactions, 2);
    }

    #[test]
    fn test_audit_cancellation_without_matching_rule_still_counts() {
        let mut unlabeled = audit(CancelledFlag::Yes);
        unlabeled.error_location = None;

        let result = count_cancellations(std::iter::empty::<&SalesRecord>(), &[unlabeled], 1);

        assert_eq!(result.cancelled_transactions, 1);
    }

    #[test]
    fn test_audit_step_explains_sum() {
        let sales = vec![sale(CancelledFlag::Yes), sale(CancelledFlag::Yes)];
        let audits = vec![audit(CancelledFlag::Yes)];

        let result = count_cancellations(&sales, &audits, 3);

        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "cancelled_transactions");
        assert_eq!(result.audit_step.output["cancelled_transactions"], 3);
        assert_eq!(
            result.audit_step.reasoning,
            "2 cancelled on sales feed + 1 cancelled on audits = 3"
        );
    }
}
