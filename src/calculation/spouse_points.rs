//! Spouse or common-law partner factors.
//!
//! These points apply only to married candidates. Spouse experience uses an
//! exact lookup on whole years rather than interpolation.

use tracing::debug;

use crate::config::ScoringConfig;
use crate::models::{
    AuditStep, AuditWarning, CandidateProfile, ProficiencyLevels, ScoreSection, SpouseBreakdown,
};

use super::core_points::{language_points, missing_columns};
use super::interpolation::{capped_whole_years, saturating_sum};

/// The result of the spouse factor calculation.
#[derive(Debug, Clone)]
pub struct SpousePointsResult {
    /// Points per factor and the subtotal.
    pub breakdown: SpouseBreakdown,
    /// The audit steps recording each factor.
    pub audit_steps: Vec<AuditStep>,
    /// Lookup misses.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates spouse points for a candidate.
///
/// Single candidates get an all-zero breakdown and a single audit step.
/// Married candidates get one step each for education, language and
/// Canadian work experience.
pub fn calculate_spouse_points(
    profile: &CandidateProfile,
    spouse_levels: &ProficiencyLevels,
    config: &ScoringConfig,
    step_number: u32,
) -> SpousePointsResult {
    if !profile.is_married() {
        return SpousePointsResult {
            breakdown: SpouseBreakdown::default(),
            audit_steps: vec![AuditStep {
                step_number,
                rule_id: "spouse_factors".to_string(),
                rule_name: "Spouse Factors".to_string(),
                section: ScoreSection::Spouse,
                input: serde_json::json!({ "marital_status": profile.marital_status }),
                output: serde_json::json!({ "applicable": false, "points": 0 }),
                reasoning: "No accompanying spouse - spouse factors not applicable".to_string(),
            }],
            warnings: Vec::new(),
        };
    }

    let spouse = config.spouse();
    let mut warnings = Vec::new();

    // Education
    let education = match spouse
        .education
        .iter()
        .find(|row| row.level == profile.spouse_education)
    {
        Some(row) => row.points,
        None => {
            debug!(level = ?profile.spouse_education, "No spouse education row");
            warnings.push(AuditWarning::lookup_miss(format!(
                "No spouse education row for {:?}",
                profile.spouse_education
            )));
            0
        }
    };
    let education_step = AuditStep {
        step_number,
        rule_id: "spouse_education_points".to_string(),
        rule_name: "Spouse Education Points".to_string(),
        section: ScoreSection::Spouse,
        input: serde_json::json!({ "education": profile.spouse_education }),
        output: serde_json::json!({ "points": education }),
        reasoning: format!(
            "Spouse education {:?} = {} points",
            profile.spouse_education, education
        ),
    };

    // Language
    let language = language_points(spouse_levels, &spouse.language);
    warnings.extend(missing_columns("spouse_language", &language));
    let language_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "spouse_language_points".to_string(),
        rule_name: "Spouse Language Points".to_string(),
        section: ScoreSection::Spouse,
        input: serde_json::json!({ "levels": spouse_levels }),
        output: serde_json::json!({ "per_skill": language.per_skill, "points": language.total }),
        reasoning: format!("Spouse language = {} points", language.total),
    };

    // Canadian work experience, exact lookup on capped whole years
    let max_years = spouse
        .work_experience
        .iter()
        .map(|row| row.years)
        .max()
        .unwrap_or(0);
    let years = capped_whole_years(profile.spouse_work_experience, max_years);
    let work_experience = match spouse.work_experience.iter().find(|row| row.years == years) {
        Some(row) => row.points,
        None => {
            debug!(years, "No spouse work experience row");
            warnings.push(AuditWarning::lookup_miss(format!(
                "No spouse work experience row for {} years",
                years
            )));
            0
        }
    };
    let experience_step = AuditStep {
        step_number: step_number + 2,
        rule_id: "spouse_experience_points".to_string(),
        rule_name: "Spouse Canadian Work Experience Points".to_string(),
        section: ScoreSection::Spouse,
        input: serde_json::json!({
            "years": profile.spouse_work_experience.normalize().to_string(),
            "lookup_years": years
        }),
        output: serde_json::json!({ "points": work_experience }),
        reasoning: format!(
            "{} years (looked up as {}) = {} points",
            profile.spouse_work_experience.normalize(),
            years,
            work_experience
        ),
    };

    SpousePointsResult {
        breakdown: SpouseBreakdown {
            education,
            language: language.total,
            work_experience,
            subtotal: saturating_sum([education, language.total, work_experience]),
        },
        audit_steps: vec![education_step, language_step, experience_step],
        warnings,
    }
}
