//! Contest leaderboard.
//!
//! Scores every employee seen in a window and ranks them: qualified
//! employees first, then by ascending weighted error rate. Only qualified
//! rows receive a rank.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ContestSettings;
use crate::models::{AuditRecord, Employee, PerformanceMetrics, PointWeightRule, SalesRecord};

use super::engine::ScoringEngine;

/// One row of the contest table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position among qualified employees; `None` when not qualified.
    pub rank: Option<u32>,
    /// The employee's metrics.
    pub metrics: PerformanceMetrics,
}

/// Orders metrics for display.
///
/// Qualified rows come first. Within each group a lower error rate ranks
/// better, and ties fall back to the employee code so the order is stable.
pub fn compare_metrics(a: &PerformanceMetrics, b: &PerformanceMetrics) -> Ordering {
    b.qualified
        .cmp(&a.qualified)
        .then_with(|| a.weighted_error_rate.cmp(&b.weighted_error_rate))
        .then_with(|| a.employee_code.cmp(&b.employee_code))
}

/// Sorts metrics with [`compare_metrics`] and assigns ranks to qualified rows.
///
/// # Example
///
/// ```
/// use dros_scoring::calculation::rank_metrics;
/// use dros_scoring::models::PerformanceMetrics;
/// use rust_decimal::Decimal;
///
/// fn row(code: &str, rate: i64, qualified: bool) -> PerformanceMetrics {
///     PerformanceMetrics {
///         employee_code: code.to_string(),
///         total_transactions: 20,
///         minor_mistakes: 0,
///         major_mistakes: 0,
///         cancelled_transactions: 0,
///         weighted_error_rate: Decimal::new(rate, 2),
///         total_weighted_mistakes: 0,
///         qualified,
///         disqualification_reason: String::new(),
///     }
/// }
///
/// let ranked = rank_metrics(vec![row("c", 100, false), row("b", 500, true), row("a", 200, true)]);
///
/// assert_eq!(ranked[0].metrics.employee_code, "a");
/// assert_eq!(ranked[0].rank, Some(1));
/// assert_eq!(ranked[1].rank, Some(2));
/// assert_eq!(ranked[2].rank, None);
/// ```
pub fn rank_metrics(mut metrics: Vec<PerformanceMetrics>) -> Vec<LeaderboardEntry> {
    metrics.sort_by(compare_metrics);

    let mut next_rank: u32 = 1;
    metrics
        .into_iter()
        .map(|metrics| {
            let rank = if metrics.qualified {
                let rank = next_rank;
                next_rank += 1;
                Some(rank)
            } else {
                None
            };
            LeaderboardEntry { rank, metrics }
        })
        .collect()
}

/// Scores every employee in the window and returns the ranked table.
///
/// The employees scored are those appearing on either feed plus everyone
/// in `roster`, so rostered staff with no activity still get a zero row.
/// Department exemption comes from the roster; an employee missing from the
/// roster is treated as non-exempt. Records without an employee code are
/// skipped.
///
/// Records must already be limited to the window being ranked.
///
/// # Arguments
///
/// * `sales_records` - Sales lines for all employees
/// * `audit_records` - Audit findings for all employees
/// * `point_weight_rules` - The full rule table
/// * `roster` - Known employees with their departments
/// * `settings` - Minimum volume and exempt departments
pub fn build_leaderboard(
    sales_records: &[SalesRecord],
    audit_records: &[AuditRecord],
    point_weight_rules: &[PointWeightRule],
    roster: &[Employee],
    settings: &ContestSettings,
) -> Vec<LeaderboardEntry> {
    let mut by_employee: BTreeMap<&str, (Vec<&SalesRecord>, Vec<&AuditRecord>)> = BTreeMap::new();

    for employee in roster {
        by_employee.entry(employee.code.as_str()).or_default();
    }
    for sale in sales_records {
        if !sale.employee_code.is_empty() {
            by_employee
                .entry(sale.employee_code.as_str())
                .or_default()
                .0
                .push(sale);
        }
    }
    for audit in audit_records {
        if !audit.employee_code.is_empty() {
            by_employee
                .entry(audit.employee_code.as_str())
                .or_default()
                .1
                .push(audit);
        }
    }

    let roster_by_code: HashMap<&str, &Employee> =
        roster.iter().map(|e| (e.code.as_str(), e)).collect();

    let metrics: Vec<PerformanceMetrics> = by_employee
        .into_iter()
        .map(|(code, (sales, audits))| {
            let is_exempt = roster_by_code
                .get(code)
                .is_some_and(|e| e.is_exempt(&settings.exempt_departments));

            ScoringEngine::new(code, sales, audits, point_weight_rules)
                .exempt_department(is_exempt)
                .minimum_transactions(settings.minimum_transactions)
                .compute_metrics()
        })
        .collect();

    let entries = rank_metrics(metrics);
    debug!(
        employees = entries.len(),
        qualified = entries.iter().filter(|e| e.rank.is_some()).count(),
        "Built leaderboard"
    );
    entries
}
