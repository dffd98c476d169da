//! Calculation logic for the DROS scoring engine.
//!
//! This module contains one function per scoring stage (DROS volume,
//! cancellations, mistake classification, weighting, error rate and the
//! qualification gate), the [`ScoringEngine`] that chains them for one
//! employee, and the leaderboard that ranks many employees.

mod cancellations;
mod dros_volume;
mod engine;
mod error_rate;
mod leaderboard;
mod mistake_classification;
mod qualification;
mod weighted_mistakes;

pub use cancellations::{CancellationResult, count_cancellations};
pub use dros_volume::{DrosVolumeResult, count_dros_volume, retain_dros_fees};
pub use engine::{
    ScoringEngine, WARNING_CANCELLED_DROS_WEIGHT_MISMATCH, WARNING_MIXED_EMPLOYEE_RECORDS,
    WARNING_UNMATCHED_ERROR_LOCATION,
};
pub use error_rate::{ERROR_RATE_DECIMAL_PLACES, ErrorRateResult, calculate_error_rate, round_rate};
pub use leaderboard::{LeaderboardEntry, build_leaderboard, compare_metrics, rank_metrics};
pub use mistake_classification::{
    MAJOR_POINTS, MINOR_POINTS, MistakeSeverity, MistakeTally, RuleIndex, classify_mistakes,
    classify_points,
};
pub use qualification::{
    DEFAULT_MINIMUM_TRANSACTIONS, QualificationResult, QualificationStatus,
    evaluate_qualification,
};
pub use weighted_mistakes::{
    CANCELLED_TRANSACTION_WEIGHT, MAJOR_MISTAKE_WEIGHT, MINOR_MISTAKE_WEIGHT,
    WeightedMistakesResult, calculate_weighted_mistakes,
};
