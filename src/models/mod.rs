//! Core data models for the DROS scoring engine.
//!
//! This module contains the record shapes supplied by the record store, the
//! rule table, and the metrics produced by a scoring run.

mod audit_record;
mod cancelled_flag;
mod employee;
mod performance_metrics;
mod point_weight_rule;
mod sales_record;
mod scoring_result;
mod scoring_window;

pub use audit_record::AuditRecord;
pub use cancelled_flag::{CANCELLED_YES, CancelledFlag};
pub use employee::{DEFAULT_EXEMPT_DEPARTMENT, Employee};
pub use performance_metrics::{PerformanceMetrics, QUALIFIED_REASON};
pub use point_weight_rule::{CANCELLED_DROS_LABEL, PointWeightRule};
pub use sales_record::{DROS_FEE_DESCRIPTION, SalesRecord};
pub use scoring_result::{AuditStep, AuditTrace, AuditWarning, ScoringResult};
pub use scoring_window::ScoringWindow;
