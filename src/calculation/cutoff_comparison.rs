//! Score comparison against external cutoffs.

use std::collections::BTreeMap;

use crate::models::{AuditStep, CutoffComparison, CutoffScores, ProgramId, ScoreSection};

/// The result of comparing a total score with every program's cutoff.
#[derive(Debug, Clone)]
pub struct CutoffComparisonResult {
    /// Comparison per program; every program is present.
    pub comparisons: BTreeMap<ProgramId, CutoffComparison>,
    /// The audit step recording the comparisons.
    pub audit_step: AuditStep,
}

/// Compares a total score with one cutoff.
///
/// # Examples
///
/// ```
/// use crs_engine::calculation::compare_to_cutoff;
/// use crs_engine::models::CutoffComparison;
///
/// assert_eq!(
///     compare_to_cutoff(449, Some(534)),
///     CutoffComparison::Known { cutoff: 534, delta: -85 }
/// );
/// assert_eq!(compare_to_cutoff(449, None), CutoffComparison::Unknown);
/// ```
pub fn compare_to_cutoff(total_score: u32, cutoff: Option<u32>) -> CutoffComparison {
    match cutoff {
        Some(cutoff) => CutoffComparison::Known {
            cutoff,
            delta: i64::from(total_score) - i64::from(cutoff),
        },
        None => CutoffComparison::Unknown,
    }
}

/// Compares a total score with the cutoff of every program.
///
/// Programs without a known cutoff are reported as unknown, never as a
/// zero delta.
pub fn compare_to_cutoffs(
    total_score: u32,
    cutoffs: &CutoffScores,
    step_number: u32,
) -> CutoffComparisonResult {
    let comparisons: BTreeMap<ProgramId, CutoffComparison> = ProgramId::ALL
        .iter()
        .map(|program| (*program, compare_to_cutoff(total_score, cutoffs.get(*program))))
        .collect();

    let known = comparisons
        .values()
        .filter(|comparison| comparison.delta().is_some())
        .count();

    let audit_step = AuditStep {
        step_number,
        rule_id: "cutoff_comparison".to_string(),
        rule_name: "Cutoff Comparison".to_string(),
        section: ScoreSection::Cutoff,
        input: serde_json::json!({ "total_score": total_score, "cutoffs": cutoffs }),
        output: serde_json::json!({ "comparisons": comparisons }),
        reasoning: format!(
            "Compared {} points with {} known cutoffs; {} unknown",
            total_score,
            known,
            comparisons.len() - known
        ),
    };

    CutoffComparisonResult {
        comparisons,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_is_signed() {
        assert_eq!(compare_to_cutoff(500, Some(480)).delta(), Some(20));
        assert_eq!(compare_to_cutoff(480, Some(500)).delta(), Some(-20));
        assert_eq!(compare_to_cutoff(500, Some(500)).delta(), Some(0));
    }

    #[test]
    fn test_every_program_is_reported() {
        let cutoffs = CutoffScores::new().with(ProgramId::CanadianExperience, 534);

        let result = compare_to_cutoffs(449, &cutoffs, 1);

        assert_eq!(result.comparisons.len(), ProgramId::ALL.len());
        assert_eq!(
            result.comparisons[&ProgramId::CanadianExperience],
            CutoffComparison::Known {
                cutoff: 534,
                delta: -85
            }
        );
        assert_eq!(
            result.comparisons[&ProgramId::SkilledWorker],
            CutoffComparison::Unknown
        );
    }

    #[test]
    fn test_explicitly_unknown_cutoff() {
        let cutoffs = CutoffScores::new().with_unknown(ProgramId::SkilledTrades);

        let result = compare_to_cutoffs(300, &cutoffs, 1);

        assert_eq!(
            result.comparisons[&ProgramId::SkilledTrades],
            CutoffComparison::Unknown
        );
    }

    #[test]
    fn test_empty_cutoffs_are_all_unknown() {
        let result = compare_to_cutoffs(449, &CutoffScores::new(), 7);

        assert!(
            result
                .comparisons
                .values()
                .all(|comparison| *comparison == CutoffComparison::Unknown)
        );
        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(
            result.audit_step.reasoning,
            "Compared 449 points with 0 known cutoffs; 5 unknown"
        );
    }
}
