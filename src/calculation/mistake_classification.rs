//! Audit finding classification.
//!
//! Each audit finding is matched to a point-weight rule by its exact
//! `error_location` label, and the rule's weight decides whether the finding
//! is a minor or a major mistake. A weight of 2 is checked first, so it is
//! always minor even though it also falls in the major range.

use std::collections::{BTreeSet, HashMap};
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::models::{AuditRecord, AuditStep, PointWeightRule};

/// Rule weight that marks a finding as minor.
pub const MINOR_POINTS: i32 = 2;

/// Rule weights that mark a finding as major, once the minor weight is excluded.
pub const MAJOR_POINTS: RangeInclusive<i32> = 1..=5;

/// Severity of a classified audit finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MistakeSeverity {
    /// Weight 2.
    Minor,
    /// Weight 1, 3, 4 or 5.
    Major,
}

/// Classifies a rule weight.
///
/// Returns `None` for weights outside both classes (0, negative, or above 5).
///
/// # Examples
///
/// ```
/// use dros_scoring::calculation::{MistakeSeverity, classify_points};
///
/// assert_eq!(classify_points(2), Some(MistakeSeverity::Minor));
/// assert_eq!(classify_points(4), Some(MistakeSeverity::Major));
/// assert_eq!(classify_points(1), Some(MistakeSeverity::Major));
/// assert_eq!(classify_points(0), None);
/// assert_eq!(classify_points(6), None);
/// ```
pub fn classify_points(points_deducted: i32) -> Option<MistakeSeverity> {
    if points_deducted == MINOR_POINTS {
        Some(MistakeSeverity::Minor)
    } else if MAJOR_POINTS.contains(&points_deducted) {
        Some(MistakeSeverity::Major)
    } else {
        None
    }
}

/// Index of rule weights by label.
///
/// When a label appears more than once in the table the first row wins.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex<'a> {
    weights: HashMap<&'a str, i32>,
}

impl<'a> RuleIndex<'a> {
    /// Builds the index from the full rule table.
    pub fn new(rules: &'a [PointWeightRule]) -> Self {
        let mut weights = HashMap::with_capacity(rules.len());
        for rule in rules {
            weights
                .entry(rule.error_location.as_str())
                .or_insert(rule.points_deducted);
        }
        Self { weights }
    }

    /// Looks up the weight for a label. A missing label matches nothing.
    pub fn points_for(&self, error_location: Option<&str>) -> Option<i32> {
        error_location.and_then(|label| self.weights.get(label).copied())
    }
}

/// The result of classifying every audit finding in a window.
#[derive(Debug, Clone)]
pub struct MistakeTally {
    /// Findings classified as minor.
    pub minor_mistakes: u32,
    /// Findings classified as major.
    pub major_mistakes: u32,
    /// Findings whose rule weight fell outside both classes.
    pub unweighted_findings: u32,
    /// Distinct labels that matched no rule, in sorted order.
    pub unmatched_locations: Vec<String>,
    /// Findings without any label.
    pub unlabeled_findings: u32,
    /// The audit step recording the classification.
    pub audit_step: AuditStep,
}

/// Classifies every audit finding against the rule table.
///
/// An audit's cancelled flag plays no part here; cancellations are counted
/// separately by [`count_cancellations`](super::count_cancellations).
///
/// # Example
///
/// ```
/// use dros_scoring::calculation::classify_mistakes;
/// use dros_scoring::models::{AuditRecord, PointWeightRule};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// let rules = vec![
///     PointWeightRule::new("Serial Number", 2),
///     PointWeightRule::new("Purchaser Info", 4),
/// ];
/// let audits = vec![
///     AuditRecord::finding("jdoe", "Serial Number", date),
///     AuditRecord::finding("jdoe", "Purchaser Info", date),
///     AuditRecord::finding("jdoe", "Unknown", date),
/// ];
///
/// let tally = classify_mistakes(&audits, &rules, 1);
/// assert_eq!(tally.minor_mistakes, 1);
/// assert_eq!(tally.major_mistakes, 1);
/// assert_eq!(tally.unmatched_locations, vec!["Unknown".to_string()]);
/// ```
pub fn classify_mistakes<'a, A>(
    audit_records: A,
    rules: &[PointWeightRule],
    step_number: u32,
) -> MistakeTally
where
    A: IntoIterator<Item = &'a AuditRecord>,
{
    let index = RuleIndex::new(rules);

    let mut audits_seen: u32 = 0;
    let mut minor_mistakes: u32 = 0;
    let mut major_mistakes: u32 = 0;
    let mut unweighted_findings: u32 = 0;
    let mut unlabeled_findings: u32 = 0;
    let mut unmatched: BTreeSet<String> = BTreeSet::new();

    for audit in audit_records {
        audits_seen += 1;
        let label = audit.error_location.as_deref();

        match index.points_for(label) {
            Some(points) => match classify_points(points) {
                Some(MistakeSeverity::Minor) => minor_mistakes += 1,
                Some(MistakeSeverity::Major) => major_mistakes += 1,
                None => unweighted_findings += 1,
            },
            None => match label {
                Some(label) => {
                    unmatched.insert(label.to_string());
                }
                None => unlabeled_findings += 1,
            },
        }
    }

    let unmatched_locations: Vec<String> = unmatched.into_iter().collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "mistake_classification".to_string(),
        rule_name: "Mistake Classification".to_string(),
        input: serde_json::json!({
            "audit_findings": audits_seen,
            "rules": rules.len()
        }),
        output: serde_json::json!({
            "minor_mistakes": minor_mistakes,
            "major_mistakes": major_mistakes,
            "unweighted_findings": unweighted_findings,
            "unlabeled_findings": unlabeled_findings,
            "unmatched_locations": unmatched_locations
        }),
        reasoning: format!(
            "{} findings: {} minor (weight {}), {} major (weight {}-{}), {} not weighted",
            audits_seen,
            minor_mistakes,
            MINOR_POINTS,
            major_mistakes,
            MAJOR_POINTS.start(),
            MAJOR_POINTS.end(),
            audits_seen - minor_mistakes - major_mistakes
        ),
    };

    MistakeTally {
        minor_mistakes,
        major_mistakes,
        unweighted_findings,
        unmatched_locations,
        unlabeled_findings,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn audit(label: &str) -> AuditRecord {
        AuditRecord::finding("jdoe", label, date())
    }

    fn rules() -> Vec<PointWeightRule> {
        vec![
            PointWeightRule::new("Serial Number", 2),
            PointWeightRule::new("Purchaser Info", 4),
            PointWeightRule::new("Signature", 1),
            PointWeightRule::new("Waiting Period", 5),
            PointWeightRule::new("Informational", 0),
            PointWeightRule::new("Legacy", 7),
        ]
    }

    #[test]
    fn test_weight_two_is_minor_not_major() {
        let tally = classify_mistakes(&[audit("Serial Number")], &rules(), 1);
        assert_eq!(tally.minor_mistakes, 1);
        assert_eq!(tally.major_mistakes, 0);
    }

    #[test]
    fn test_weights_one_to_five_except_two_are_major() {
        let audits = vec![audit("Signature"), audit("Purchaser Info"), audit("Waiting Period")];
        let tally = classify_mistakes(&audits, &rules(), 1);
        assert_eq!(tally.minor_mistakes, 0);
        assert_eq!(tally.major_mistakes, 3);
    }

    #[test]
    fn test_weights_outside_classes_contribute_nothing() {
        let audits = vec![audit("Informational"), audit("Legacy")];
        let tally = classify_mistakes(&audits, &rules(), 1);
        assert_eq!(tally.minor_mistakes, 0);
        assert_eq!(tally.major_mistakes, 0);
        assert_eq!(tally.unweighted_findings, 2);
    }

    #[test]
    fn test_unmatched_labels_are_collected_once() {
        let audits = vec![audit("Typo"), audit("Typo"), audit("Other")];
        let tally = classify_mistakes(&audits, &rules(), 1);
        assert_eq!(tally.minor_mistakes + tally.major_mistakes, 0);
        assert_eq!(
            tally.unmatched_locations,
            vec!["Other".to_string(), "Typo".to_string()]
        );
    }

    #[test]
    fn test_missing_label_matches_nothing() {
        let mut record = audit("Serial Number");
        record.error_location = None;

        let tally = classify_mistakes(&[record], &rules(), 1);

        assert_eq!(tally.minor_mistakes, 0);
        assert_eq!(tally.unlabeled_findings, 1);
        assert!(tally.unmatched_locations.is_empty());
    }

    #[test]
    fn test_matching_is_exact() {
        let tally = classify_mistakes(&[audit("serial number")], &rules(), 1);
        assert_eq!(tally.minor_mistakes, 0);
        assert_eq!(tally.unmatched_locations, vec!["serial number".to_string()]);
    }

    #[test]
    fn test_first_rule_wins_for_duplicate_labels() {
        let rules = vec![
            PointWeightRule::new("Serial Number", 2),
            PointWeightRule::new("Serial Number", 4),
        ];
        let tally = classify_mistakes(&[audit("Serial Number")], &rules, 1);
        assert_eq!(tally.minor_mistakes, 1);
        assert_eq!(tally.major_mistakes, 0);
    }

    #[test]
    fn test_empty_rule_table_matches_nothing() {
        let tally = classify_mistakes(&[audit("Serial Number")], &[], 1);
        assert_eq!(tally.minor_mistakes + tally.major_mistakes, 0);
        assert_eq!(tally.unmatched_locations.len(), 1);
    }

    #[test]
    fn test_audit_step_records_counts() {
        let audits = vec![audit("Serial Number"), audit("Purchaser Info"), audit("Typo")];
        let tally = classify_mistakes(&audits, &rules(), 3);

        assert_eq!(tally.audit_step.step_number, 3);
        assert_eq!(tally.audit_step.rule_id, "mistake_classification");
        assert_eq!(tally.audit_step.input["audit_findings"], 3);
        assert_eq!(tally.audit_step.output["minor_mistakes"], 1);
        assert_eq!(tally.audit_step.output["major_mistakes"], 1);
        assert!(tally.audit_step.reasoning.contains("1 not weighted"));
    }

    #[test]
    fn test_classify_points_boundaries() {
        assert_eq!(classify_points(-1), None);
        assert_eq!(classify_points(0), None);
        assert_eq!(classify_points(1), Some(MistakeSeverity::Major));
        assert_eq!(classify_points(2), Some(MistakeSeverity::Minor));
        assert_eq!(classify_points(3), Some(MistakeSeverity::Major));
        assert_eq!(classify_points(5), Some(MistakeSeverity::Major));
        assert_eq!(classify_points(6), None);
    }
}
