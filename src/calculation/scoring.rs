//! The scoring pipeline.
//!
//! Converts language results, runs the four point calculators, sums their
//! subtotals, then evaluates eligibility and compares the total with each
//! program's cutoff. The pipeline is a pure function of its inputs.

use tracing::debug;

use crate::config::ScoringConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CandidateProfile, CutoffScores, LanguageScores,
    ProficiencySummary, ScoreResult,
};

use super::additional_points::calculate_additional_points;
use super::core_points::calculate_core_points;
use super::cutoff_comparison::compare_to_cutoffs;
use super::eligibility::evaluate_eligibility;
use super::interpolation::saturating_sum;
use super::language_conversion::convert_language;
use super::spouse_points::calculate_spouse_points;
use super::transferability::calculate_transferability;

/// Version of the engine recorded in every result.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scores a candidate profile.
///
/// This is the single entry point of the engine. It fails only when no
/// configuration is supplied; every well-typed profile produces a result,
/// with out-of-range values clamped and lookup misses scored as zero.
///
/// # Errors
///
/// Returns `EngineError::ConfigurationMissing` when `config` is `None`.
///
/// # Examples
///
/// ```
/// use crs_engine::calculation::score;
/// use crs_engine::error::EngineError;
/// # use crs_engine::models::*;
/// # use rust_decimal::Decimal;
/// # let profile = CandidateProfile {
/// #     age: 30,
/// #     marital_status: MaritalStatus::Single,
/// #     education: EducationLevel::Bachelors,
/// #     canadian_education: CanadianEducation::None,
/// #     first_language: LanguageScores::uniform(LanguageTest::CelpipGeneral, Decimal::from(9)),
/// #     second_language: None,
/// #     canadian_work_experience: Decimal::ZERO,
/// #     foreign_work_experience: Decimal::from(3),
/// #     occupation: OccupationTeer::Teer1,
/// #     spouse_education: EducationLevel::None,
/// #     spouse_language: None,
/// #     spouse_work_experience: Decimal::ZERO,
/// #     provincial_nomination: false,
/// #     job_offer: JobOffer::None,
/// #     canadian_sibling: false,
/// #     trades_certification: false,
/// # };
///
/// let result = score(&profile, None, &CutoffScores::new());
/// assert!(matches!(result, Err(EngineError::ConfigurationMissing)));
/// ```
pub fn score(
    profile: &CandidateProfile,
    config: Option<&ScoringConfig>,
    cutoffs: &CutoffScores,
) -> EngineResult<ScoreResult> {
    let config = config.ok_or(EngineError::ConfigurationMissing)?;
    Ok(compute_score(profile, config, cutoffs))
}

/// Runs the scoring pipeline against a loaded configuration.
pub fn compute_score(
    profile: &CandidateProfile,
    config: &ScoringConfig,
    cutoffs: &CutoffScores,
) -> ScoreResult {
    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    // Language conversion
    let conversion = config.language_conversion();
    let spouse_language = if profile.is_married() {
        profile.spouse_language.as_ref()
    } else {
        None
    };
    let mut convert = |slot: &str, scores: Option<&LanguageScores>| {
        let result = convert_language(slot, scores, conversion, step_number);
        audit_steps.push(result.audit_step);
        warnings.extend(result.warnings);
        step_number += 1;
        result.levels
    };
    let proficiency = ProficiencySummary {
        first_language: convert("first_language", Some(&profile.first_language)),
        second_language: convert("second_language", profile.second_language.as_ref()),
        spouse_language: convert("spouse_language", spouse_language),
    };

    // Core human capital
    let core = calculate_core_points(profile, &proficiency, config, step_number);
    step_number += core.audit_steps.len() as u32;
    audit_steps.extend(core.audit_steps);
    warnings.extend(core.warnings);

    // Spouse factors
    let spouse = calculate_spouse_points(
        profile,
        &proficiency.spouse_language,
        config,
        step_number,
    );
    step_number += spouse.audit_steps.len() as u32;
    audit_steps.extend(spouse.audit_steps);
    warnings.extend(spouse.warnings);

    // Skill transferability
    let transferability =
        calculate_transferability(profile, &proficiency.first_language, config, step_number);
    step_number += transferability.audit_steps.len() as u32;
    audit_steps.extend(transferability.audit_steps);
    warnings.extend(transferability.warnings);

    // Additional points
    let additional = calculate_additional_points(profile, &proficiency, config, step_number);
    audit_steps.push(additional.audit_step);
    warnings.extend(additional.warnings);
    step_number += 1;

    let total_score = saturating_sum([
        core.breakdown.subtotal,
        spouse.breakdown.subtotal,
        transferability.breakdown.subtotal,
        additional.breakdown.subtotal,
    ]);

    // Eligibility
    let eligibility = evaluate_eligibility(
        profile,
        &proficiency.first_language,
        additional.french,
        total_score,
        config,
        step_number,
    );
    step_number += eligibility.audit_steps.len() as u32;
    audit_steps.extend(eligibility.audit_steps);

    // Cutoffs
    let comparison = compare_to_cutoffs(total_score, cutoffs, step_number);
    audit_steps.push(comparison.audit_step);

    debug!(
        total_score,
        steps = audit_steps.len(),
        warnings = warnings.len(),
        "Scored candidate profile"
    );

    ScoreResult {
        engine_version: ENGINE_VERSION.to_string(),
        config_version: config.metadata().version.clone(),
        proficiency,
        core: core.breakdown,
        spouse: spouse.breakdown,
        transferability: transferability.breakdown,
        additional: additional.breakdown,
        total_score,
        eligibility: eligibility.programs,
        cutoff_comparisons: comparison.comparisons,
        audit_trace: AuditTrace {
            steps: audit_steps,
            warnings,
        },
    }
}
