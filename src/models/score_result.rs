//! Score result models for the CRS scoring engine.
//!
//! This module contains the [`ScoreResult`] type and its associated structures
//! that capture every output of a scoring call: proficiency levels, per-category
//! breakdowns, the total score, program eligibility, cutoff comparisons and an
//! audit trace. A result carries no timestamps or ids, so identical inputs always
//! produce an identical result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::program::ProgramId;
use super::skill::ProficiencyLevels;

/// The part of the scoring pipeline a step or warning belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSection {
    /// Raw score to proficiency level conversion.
    LanguageConversion,
    /// Age, education, language and Canadian experience.
    CoreHumanCapital,
    /// Spouse or partner factors.
    Spouse,
    /// Skill transferability combinations.
    SkillTransferability,
    /// Flat additional bonuses.
    Additional,
    /// Program eligibility gates.
    Eligibility,
    /// Comparison against external cutoffs.
    Cutoff,
}

/// A single step in the audit trace recording a scoring decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The pipeline section the rule belongs to.
    pub section: ScoreSection,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Warning code for a table lookup that found no row.
pub const LOOKUP_MISS: &str = "LOOKUP_MISS";

/// Warning code for a profile value clamped to a table boundary.
pub const VALUE_CLAMPED: &str = "VALUE_CLAMPED";

/// A non-fatal diagnostic generated during scoring.
///
/// Warnings never change the score; they document lookup misses and
/// clamped values so the result can be audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// A lookup that found no row and contributed zero points.
    pub fn lookup_miss(message: impl Into<String>) -> Self {
        Self {
            code: LOOKUP_MISS.to_string(),
            message: message.into(),
            severity: "low".to_string(),
        }
    }

    /// A profile value that fell outside a table and was clamped.
    pub fn value_clamped(message: impl Into<String>) -> Self {
        Self {
            code: VALUE_CLAMPED.to_string(),
            message: message.into(),
            severity: "low".to_string(),
        }
    }
}

/// The complete audit trace for a scoring call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of scoring steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during scoring.
    pub warnings: Vec<AuditWarning>,
}

/// Proficiency levels derived for each language slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProficiencySummary {
    /// Levels for the first official language.
    pub first_language: ProficiencyLevels,
    /// Levels for the second official language (all 0 when absent).
    pub second_language: ProficiencyLevels,
    /// Levels for the spouse's language (all 0 when absent).
    pub spouse_language: ProficiencyLevels,
}

/// Core human-capital points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreBreakdown {
    /// Points for age.
    pub age: u32,
    /// Points for education.
    pub education: u32,
    /// Points for the first official language.
    pub first_language: u32,
    /// Points for the second official language.
    pub second_language: u32,
    /// Points for Canadian work experience.
    pub canadian_experience: u32,
    /// Reference points for foreign work experience.
    ///
    /// Reported for display only and excluded from `subtotal`; foreign
    /// experience counts toward the total through skill transferability.
    pub foreign_experience_reference: u32,
    /// Sum of the five scored factors.
    pub subtotal: u32,
}

/// Spouse or partner points; all zero for single candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpouseBreakdown {
    /// Points for spouse education.
    pub education: u32,
    /// Points for spouse language ability.
    pub language: u32,
    /// Points for spouse Canadian work experience.
    pub work_experience: u32,
    /// Sum of the spouse factors.
    pub subtotal: u32,
}

/// Skill transferability points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferabilityBreakdown {
    /// Education combined with language ability.
    pub education_language: u32,
    /// Foreign experience combined with language ability.
    pub foreign_experience_language: u32,
    /// Canadian experience combined with foreign experience.
    pub canadian_foreign_experience: u32,
    /// Canadian experience combined with education.
    pub canadian_experience_education: u32,
    /// Trades certification combined with language ability.
    pub trades_certification: u32,
    /// Sum of the five contributions before the cap.
    pub uncapped_total: u32,
    /// The capped subtotal, always within 0..=100.
    pub subtotal: u32,
}

/// Flat additional bonuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalBreakdown {
    /// Canadian education bonus.
    pub canadian_education: u32,
    /// Provincial nomination bonus.
    pub provincial_nomination: u32,
    /// Arranged employment bonus.
    pub arranged_employment: u32,
    /// Sibling in Canada bonus.
    pub canadian_sibling: u32,
    /// French floor bonus (NCLC 7 on all skills).
    pub french_floor: u32,
    /// Extended French plus English bonus.
    pub french_english_dual: u32,
    /// Sum of all bonuses.
    pub subtotal: u32,
}

/// One requirement checked by an eligibility gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityCheck {
    /// Short requirement name (e.g. "language_floor").
    pub requirement: String,
    /// Whether the candidate met it.
    pub met: bool,
    /// The values compared, for display.
    pub detail: String,
}

/// Outcome of one program's eligibility gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramEligibility {
    /// True when every check passed.
    pub eligible: bool,
    /// The individual requirements and their outcomes.
    pub checks: Vec<EligibilityCheck>,
}

/// Total score compared against a program's external cutoff.
///
/// # Example
///
/// ```
/// use crs_engine::models::CutoffComparison;
///
/// let known = CutoffComparison::Known { cutoff: 500, delta: -12 };
/// assert_eq!(known.delta(), Some(-12));
/// assert_eq!(CutoffComparison::Unknown.delta(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CutoffComparison {
    /// The cutoff is known; `delta` is `total_score - cutoff`.
    Known {
        /// The external cutoff.
        cutoff: u32,
        /// Signed distance from the cutoff.
        delta: i64,
    },
    /// No cutoff is known for the program.
    Unknown,
}

impl CutoffComparison {
    /// The signed delta, if the cutoff is known.
    pub fn delta(&self) -> Option<i64> {
        match self {
            CutoffComparison::Known { delta, .. } => Some(*delta),
            CutoffComparison::Unknown => None,
        }
    }
}

/// The complete result of a scoring call.
///
/// Created fresh on every call and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// The version of the engine that produced the result.
    pub engine_version: String,
    /// The version of the configuration tables used.
    pub config_version: String,
    /// Derived proficiency levels.
    pub proficiency: ProficiencySummary,
    /// Core human-capital points.
    pub core: CoreBreakdown,
    /// Spouse or partner points.
    pub spouse: SpouseBreakdown,
    /// Skill transferability points.
    pub transferability: TransferabilityBreakdown,
    /// Additional points.
    pub additional: AdditionalBreakdown,
    /// Sum of the four subtotals.
    pub total_score: u32,
    /// Eligibility per program.
    pub eligibility: BTreeMap<ProgramId, ProgramEligibility>,
    /// Total score against each program's cutoff.
    pub cutoff_comparisons: BTreeMap<ProgramId, CutoffComparison>,
    /// Complete audit trace of scoring decisions.
    pub audit_trace: AuditTrace,
}

impl ScoreResult {
    /// Whether the candidate is eligible for a program.
    pub fn is_eligible(&self, program: ProgramId) -> bool {
        self.eligibility
            .get(&program)
            .is_some_and(|outcome| outcome.eligible)
    }

    /// The comparison for a program; unknown when the program is absent.
    pub fn cutoff_comparison(&self, program: ProgramId) -> CutoffComparison {
        self.cutoff_comparisons
            .get(&program)
            .copied()
            .unwrap_or(CutoffComparison::Unknown)
    }
}
