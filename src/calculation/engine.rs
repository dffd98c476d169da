//! The weighted audit scoring engine.
//!
//! [`ScoringEngine`] scores one employee over one window. It borrows the
//! caller's records, keeps only the DROS fee lines at construction, and
//! computes a fresh [`PerformanceMetrics`] on every call. It performs no I/O
//! and holds no shared state, so engines for different employees can run in
//! parallel.
//!
//! The caller is responsible for handing over records of a single employee
//! and a single window. Mixed records are not rejected; they only raise a
//! warning in the audit trace.

use std::time::Instant;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    AuditRecord, AuditStep, AuditTrace, AuditWarning, PerformanceMetrics, PointWeightRule,
    SalesRecord, ScoringResult,
};

use super::cancellations::count_cancellations;
use super::dros_volume::{count_dros_volume, retain_dros_fees};
use super::error_rate::calculate_error_rate;
use super::mistake_classification::classify_mistakes;
use super::qualification::{DEFAULT_MINIMUM_TRANSACTIONS, evaluate_qualification};
use super::weighted_mistakes::{CANCELLED_TRANSACTION_WEIGHT, calculate_weighted_mistakes};

/// Warning code for an audit label that matches no rule.
pub const WARNING_UNMATCHED_ERROR_LOCATION: &str = "UNMATCHED_ERROR_LOCATION";

/// Warning code for records that belong to another employee.
pub const WARNING_MIXED_EMPLOYEE_RECORDS: &str = "MIXED_EMPLOYEE_RECORDS";

/// Warning code for a cancelled-DROS rule whose weight differs from the fixed cancellation weight.
pub const WARNING_CANCELLED_DROS_WEIGHT_MISMATCH: &str = "CANCELLED_DROS_WEIGHT_MISMATCH";

/// Scores one employee's sales and audit records.
///
/// # Example
///
/// ```
/// use dros_scoring::calculation::ScoringEngine;
/// use dros_scoring::models::{AuditRecord, PointWeightRule, SalesRecord};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// let sales: Vec<SalesRecord> = (0..25).map(|_| SalesRecord::dros_fee("jdoe", date)).collect();
/// let audits = vec![AuditRecord::finding("jdoe", "Serial Number", date)];
/// let rules = vec![PointWeightRule::new("Serial Number", 2)];
///
/// let metrics = ScoringEngine::new("jdoe", &sales, &audits, &rules).compute_metrics();
///
/// assert_eq!(metrics.minor_mistakes, 1);
/// assert_eq!(metrics.weighted_error_rate.to_string(), "4.00");
/// assert!(metrics.qualified);
/// assert_eq!(metrics.disqualification_reason, "Qualified");
/// ```
#[derive(Debug, Clone)]
pub struct ScoringEngine<'a> {
    employee_code: String,
    sales_records: Vec<&'a SalesRecord>,
    discarded_sales: u32,
    audit_records: Vec<&'a AuditRecord>,
    point_weight_rules: &'a [PointWeightRule],
    is_exempt_department: bool,
    minimum_transactions: u32,
}

/// Metrics plus the per-stage audit data they were derived from.
struct Evaluation {
    metrics: PerformanceMetrics,
    steps: Vec<AuditStep>,
    unmatched_locations: Vec<String>,
}

impl<'a> ScoringEngine<'a> {
    /// Creates an engine for one employee.
    ///
    /// Sales lines that are not DROS fees are dropped here. The engine
    /// starts out non-exempt with the default minimum of 20 transactions.
    ///
    /// # Arguments
    ///
    /// * `employee_code` - The LAN ID reported on the metrics
    /// * `sales_records` - The employee's sales lines for the window
    /// * `audit_records` - The employee's audit findings for the window
    /// * `point_weight_rules` - The full rule table, shared by all employees
    pub fn new<S, A>(
        employee_code: impl Into<String>,
        sales_records: S,
        audit_records: A,
        point_weight_rules: &'a [PointWeightRule],
    ) -> Self
    where
        S: IntoIterator<Item = &'a SalesRecord>,
        A: IntoIterator<Item = &'a AuditRecord>,
    {
        let all_sales: Vec<&'a SalesRecord> = sales_records.into_iter().collect();
        let retained = retain_dros_fees(all_sales.iter().copied());
        let discarded_sales = (all_sales.len() - retained.len()) as u32;

        Self {
            employee_code: employee_code.into(),
            sales_records: retained,
            discarded_sales,
            audit_records: audit_records.into_iter().collect(),
            point_weight_rules,
            is_exempt_department: false,
            minimum_transactions: DEFAULT_MINIMUM_TRANSACTIONS,
        }
    }

    /// Marks the employee as belonging to a department that does not compete.
    pub fn exempt_department(mut self, is_exempt_department: bool) -> Self {
        self.is_exempt_department = is_exempt_department;
        self
    }

    /// Overrides the minimum DROS volume needed to qualify.
    pub fn minimum_transactions(mut self, minimum_transactions: u32) -> Self {
        self.minimum_transactions = minimum_transactions;
        self
    }

    /// Returns the LAN ID being scored.
    pub fn employee_code(&self) -> &str {
        &self.employee_code
    }

    /// Returns the DROS fee lines kept at construction.
    pub fn qualifying_sales(&self) -> &[&'a SalesRecord] {
        &self.sales_records
    }

    /// Computes the employee's metrics.
    pub fn compute_metrics(&self) -> PerformanceMetrics {
        self.evaluate().metrics
    }

    /// Computes the employee's metrics together with a full audit trace.
    pub fn compute_with_trace(&self) -> ScoringResult {
        let start_time = Instant::now();
        let evaluation = self.evaluate();
        let warnings = self.collect_warnings(&evaluation.unmatched_locations);
        let duration_us = start_time.elapsed().as_micros() as u64;

        debug!(
            employee_code = %self.employee_code,
            total_transactions = evaluation.metrics.total_transactions,
            weighted_error_rate = %evaluation.metrics.weighted_error_rate,
            qualified = evaluation.metrics.qualified,
            warnings = warnings.len(),
            duration_us,
            "Scored employee"
        );

        ScoringResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            employee_code: self.employee_code.clone(),
            metrics: evaluation.metrics,
            audit_trace: AuditTrace {
                steps: evaluation.steps,
                warnings,
                duration_us,
            },
        }
    }

    fn evaluate(&self) -> Evaluation {
        let mut steps: Vec<AuditStep> = Vec::with_capacity(6);
        let mut step_number: u32 = 1;

        let volume = count_dros_volume(&self.sales_records, self.discarded_sales, step_number);
        steps.push(volume.audit_step);
        step_number += 1;

        let cancellations = count_cancellations(
            self.sales_records.iter().copied(),
            self.audit_records.iter().copied(),
            step_number,
        );
        steps.push(cancellations.audit_step);
        step_number += 1;

        let tally = classify_mistakes(
            self.audit_records.iter().copied(),
            self.point_weight_rules,
            step_number,
        );
        steps.push(tally.audit_step);
        step_number += 1;

        let weighted = calculate_weighted_mistakes(
            tally.minor_mistakes,
            tally.major_mistakes,
            cancellations.cancelled_transactions,
            step_number,
        );
        steps.push(weighted.audit_step);
        step_number += 1;

        let rate = calculate_error_rate(
            weighted.total_weighted_mistakes,
            volume.total_transactions,
            step_number,
        );
        steps.push(rate.audit_step);
        step_number += 1;

        let qualification = evaluate_qualification(
            volume.total_transactions,
            self.is_exempt_department,
            self.minimum_transactions,
            step_number,
        );
        steps.push(qualification.audit_step);

        let metrics = PerformanceMetrics {
            employee_code: self.employee_code.clone(),
            total_transactions: volume.total_transactions,
            minor_mistakes: tally.minor_mistakes,
            major_mistakes: tally.major_mistakes,
            cancelled_transactions: cancellations.cancelled_transactions,
            weighted_error_rate: rate.weighted_error_rate,
            total_weighted_mistakes: weighted.total_weighted_mistakes,
            qualified: qualification.qualified,
            disqualification_reason: qualification.status.to_string(),
        };

        Evaluation {
            metrics,
            steps,
            unmatched_locations: tally.unmatched_locations,
        }
    }

    fn collect_warnings(&self, unmatched_locations: &[String]) -> Vec<AuditWarning> {
        let mut warnings = Vec::new();

        for label in unmatched_locations {
            warnings.push(AuditWarning::new(
                WARNING_UNMATCHED_ERROR_LOCATION,
                format!("Audit label '{}' matches no point weight rule", label),
                "low",
            ));
        }

        let foreign_records = self
            .sales_records
            .iter()
            .filter(|r| r.employee_code != self.employee_code)
            .count()
            + self
                .audit_records
                .iter()
                .filter(|r| r.employee_code != self.employee_code)
                .count();
        if foreign_records > 0 {
            warnings.push(AuditWarning::new(
                WARNING_MIXED_EMPLOYEE_RECORDS,
                format!(
                    "{} records belong to an employee other than '{}'",
                    foreign_records, self.employee_code
                ),
                "high",
            ));
        }

        let cancellation_weight = CANCELLED_TRANSACTION_WEIGHT as i32;
        if let Some(rule) = self
            .point_weight_rules
            .iter()
            .find(|rule| rule.is_cancelled_dros() && rule.points_deducted != cancellation_weight)
        {
            warnings.push(AuditWarning::new(
                WARNING_CANCELLED_DROS_WEIGHT_MISMATCH,
                format!(
                    "Rule '{}' deducts {} points but cancellations are weighted {}",
                    rule.error_location, rule.points_deducted, cancellation_weight
                ),
                "medium",
            ));
        }

        warnings
    }
}
