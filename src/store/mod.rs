//! Record access for scoring runs.
//!
//! The scoring engine only ever sees slices of records. A [`RecordStore`]
//! is where those slices come from: it answers filtered queries for sales
//! lines and audit findings and supplies the point-weight rule table.
//! [`score_employee`] and [`leaderboard_from_store`] tie a store to the
//! engine.

mod memory;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculation::{LeaderboardEntry, ScoringEngine, build_leaderboard};
use crate::config::ContestSettings;
use crate::error::EngineResult;
use crate::models::{
    AuditRecord, Employee, PointWeightRule, SalesRecord, ScoringResult, ScoringWindow,
};

pub use memory::InMemoryRecordStore;

/// Selects records by employee and date window.
///
/// An unset field matches everything. When a window is set, records
/// without a date are excluded.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use dros_scoring::models::{SalesRecord, ScoringWindow};
/// use dros_scoring::store::RecordFilter;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// let filter = RecordFilter::for_employee("jdoe").within(ScoringWindow::single_day(day));
///
/// assert!(filter.matches_sale(&SalesRecord::dros_fee("jdoe", day)));
/// assert!(!filter.matches_sale(&SalesRecord::dros_fee("asmith", day)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Only records for this employee.
    #[serde(default)]
    pub employee_code: Option<String>,
    /// Only records dated inside this window.
    #[serde(default)]
    pub window: Option<ScoringWindow>,
}

impl RecordFilter {
    /// A filter that matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter for one employee's records.
    pub fn for_employee(employee_code: impl Into<String>) -> Self {
        Self {
            employee_code: Some(employee_code.into()),
            window: None,
        }
    }

    /// Restricts the filter to a window.
    pub fn within(mut self, window: ScoringWindow) -> Self {
        self.window = Some(window);
        self
    }

    fn matches(&self, employee_code: &str, date: Option<chrono::NaiveDate>) -> bool {
        let employee_matches = self
            .employee_code
            .as_deref()
            .is_none_or(|code| code == employee_code);
        let date_matches = self.window.is_none_or(|window| window.contains(date));
        employee_matches && date_matches
    }

    /// Returns true if the sales line passes the filter.
    pub fn matches_sale(&self, sale: &SalesRecord) -> bool {
        self.matches(&sale.employee_code, sale.sold_at)
    }

    /// Returns true if the audit finding passes the filter.
    pub fn matches_audit(&self, audit: &AuditRecord) -> bool {
        self.matches(&audit.employee_code, audit.audited_at)
    }
}

/// Source of records and rules for scoring.
///
/// Implementations must be shareable across request handlers.
pub trait RecordStore: Send + Sync {
    /// Sales lines passing `filter`, in insertion order.
    fn sales(&self, filter: &RecordFilter) -> EngineResult<Vec<SalesRecord>>;

    /// Audit findings passing `filter`, in insertion order.
    fn audits(&self, filter: &RecordFilter) -> EngineResult<Vec<AuditRecord>>;

    /// The point-weight rule table.
    fn point_weight_rules(&self) -> EngineResult<Vec<PointWeightRule>>;
}

/// Scores one employee from the records held by `store`.
///
/// Only the employee's own records are fetched, limited to `window` when
/// one is given. Exemption and the minimum volume come from `settings`.
pub fn score_employee<S>(
    store: &S,
    employee: &Employee,
    window: Option<ScoringWindow>,
    settings: &ContestSettings,
) -> EngineResult<ScoringResult>
where
    S: RecordStore + ?Sized,
{
    if let Some(window) = &window {
        window.validate()?;
    }

    let filter = RecordFilter {
        employee_code: Some(employee.code.clone()),
        window,
    };
    let sales = store.sales(&filter)?;
    let audits = store.audits(&filter)?;
    let rules = store.point_weight_rules()?;

    debug!(
        employee_code = %employee.code,
        sales = sales.len(),
        audits = audits.len(),
        "Fetched records for employee"
    );

    let result = ScoringEngine::new(employee.code.as_str(), &sales, &audits, &rules)
        .exempt_department(employee.is_exempt(&settings.exempt_departments))
        .minimum_transactions(settings.minimum_transactions)
        .compute_with_trace();

    Ok(result)
}

/// Builds the ranked contest table from the records held by `store`.
///
/// Every employee with records in the window is scored, plus everyone on
/// `roster`.
pub fn leaderboard_from_store<S>(
    store: &S,
    roster: &[Employee],
    window: Option<ScoringWindow>,
    settings: &ContestSettings,
) -> EngineResult<Vec<LeaderboardEntry>>
where
    S: RecordStore + ?Sized,
{
    if let Some(window) = &window {
        window.validate()?;
    }

    let filter = RecordFilter {
        employee_code: None,
        window,
    };
    let sales = store.sales(&filter)?;
    let audits = store.audits(&filter)?;
    let rules = store.point_weight_rules()?;

    Ok(build_leaderboard(&sales, &audits, &rules, roster, settings))
}
