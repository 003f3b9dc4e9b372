//! Additional points.
//!
//! Flat bonuses for Canadian education, provincial nomination, arranged
//! employment, a sibling in Canada and French-language ability. Every bonus
//! is independent and they are summed.

use tracing::debug;

use crate::config::ScoringConfig;
use crate::models::{
    AdditionalBreakdown, AuditStep, AuditWarning, CandidateProfile, CanadianEducation, JobOffer,
    LanguageFamily, LanguageScores, ProficiencyLevels, ProficiencySummary, ScoreSection,
};

use super::interpolation::saturating_sum;

/// Proficiency floor on all four skills of a French test for the French bonus.
pub const FRENCH_FLOOR: u8 = 7;

/// Proficiency floor on all four skills of the English test for the dual bonus.
pub const ENGLISH_DUAL_FLOOR: u8 = 5;

/// Which French-language conditions a candidate meets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrenchConditions {
    /// One language slot is a French test at level 7 or more on all skills.
    pub french_floor: bool,
    /// The French floor holds and the other slot is an English test at level 5
    /// or more on all skills.
    pub french_english_dual: bool,
}

/// Evaluates the French-language conditions over both language slots.
pub fn french_conditions(
    profile: &CandidateProfile,
    proficiency: &ProficiencySummary,
) -> FrenchConditions {
    let first = (profile.first_language.test.family(), &proficiency.first_language);
    let second = profile
        .second_language
        .as_ref()
        .map(|scores: &LanguageScores| (scores.test.family(), &proficiency.second_language));

    let french_at_floor = |slot: &(LanguageFamily, &ProficiencyLevels)| {
        slot.0 == LanguageFamily::French && slot.1.all_at_least(FRENCH_FLOOR)
    };
    let english_at_dual_floor = |slot: &(LanguageFamily, &ProficiencyLevels)| {
        slot.0 == LanguageFamily::English && slot.1.all_at_least(ENGLISH_DUAL_FLOOR)
    };

    let french_floor = french_at_floor(&first) || second.as_ref().is_some_and(french_at_floor);
    let french_english_dual = match &second {
        Some(second) => {
            (french_at_floor(&first) && english_at_dual_floor(second))
                || (french_at_floor(second) && english_at_dual_floor(&first))
        }
        None => false,
    };

    FrenchConditions {
        french_floor,
        french_english_dual,
    }
}

/// The result of the additional points calculation.
#[derive(Debug, Clone)]
pub struct AdditionalPointsResult {
    /// Points per bonus and the subtotal.
    pub breakdown: AdditionalBreakdown,
    /// The French conditions, reused by the eligibility gates.
    pub french: FrenchConditions,
    /// The audit step recording every bonus.
    pub audit_step: AuditStep,
    /// Lookup misses.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates the additional points for a candidate.
///
/// Both French bonuses may apply together: the floor bonus whenever a French
/// slot is at level 7 on all skills, and the dual bonus on top of it when
/// the other slot is English at level 5 on all skills.
pub fn calculate_additional_points(
    profile: &CandidateProfile,
    proficiency: &ProficiencySummary,
    config: &ScoringConfig,
    step_number: u32,
) -> AdditionalPointsResult {
    let additional = config.additional();
    let mut warnings = Vec::new();

    let canadian_education = match profile.canadian_education {
        CanadianEducation::None => 0,
        level => match additional
            .canadian_education
            .iter()
            .find(|row| row.level == level)
        {
            Some(row) => row.points,
            None => {
                debug!(level = ?level, "No Canadian education row");
                warnings.push(AuditWarning::lookup_miss(format!(
                    "No Canadian education row for {:?}",
                    level
                )));
                0
            }
        },
    };

    let provincial_nomination = if profile.provincial_nomination {
        additional.provincial_nomination
    } else {
        0
    };

    let arranged_employment = match profile.job_offer {
        JobOffer::None => 0,
        JobOffer::SeniorManagement => additional.arranged_employment.senior_management,
        JobOffer::SkilledCategory => additional.arranged_employment.skilled_category,
        JobOffer::Other => additional.arranged_employment.other,
    };

    let canadian_sibling = if profile.canadian_sibling {
        additional.canadian_sibling
    } else {
        0
    };

    let french = french_conditions(profile, proficiency);
    let french_floor = if french.french_floor {
        additional.french_language.only_bonus
    } else {
        0
    };
    let french_english_dual = if french.french_english_dual {
        additional.french_language.dual_bonus
    } else {
        0
    };

    let subtotal = saturating_sum([
        canadian_education,
        provincial_nomination,
        arranged_employment,
        canadian_sibling,
        french_floor,
        french_english_dual,
    ]);

    let breakdown = AdditionalBreakdown {
        canadian_education,
        provincial_nomination,
        arranged_employment,
        canadian_sibling,
        french_floor,
        french_english_dual,
        subtotal,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "additional_points".to_string(),
        rule_name: "Additional Points".to_string(),
        section: ScoreSection::Additional,
        input: serde_json::json!({
            "canadian_education": profile.canadian_education,
            "provincial_nomination": profile.provincial_nomination,
            "job_offer": profile.job_offer,
            "canadian_sibling": profile.canadian_sibling,
            "french_floor_met": french.french_floor,
            "french_english_dual_met": french.french_english_dual
        }),
        output: serde_json::to_value(&breakdown).unwrap_or_default(),
        reasoning: format!(
            "{} + {} + {} + {} + {} + {} = {} points",
            canadian_education,
            provincial_nomination,
            arranged_employment,
            canadian_sibling,
            french_floor,
            french_english_dual,
            subtotal
        ),
    };

    AdditionalPointsResult {
        breakdown,
        french,
        audit_step,
        warnings,
    }
}
