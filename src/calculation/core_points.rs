//! Core human-capital points.
//!
//! Age and Canadian experience are interpolated, education is a direct
//! lookup, and language ability is looked up per skill at the converted
//! proficiency level. Foreign experience is interpolated for display only.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{ExperienceRow, LanguagePoints, MIN_SCORED_LEVEL, ScoringConfig, SpouseColumns};
use crate::models::{
    AuditStep, AuditWarning, CandidateProfile, CoreBreakdown, PerSkill, ProficiencyLevels,
    ProficiencySummary, ScoreSection, Skill,
};

use super::interpolation::{ClampSide, interpolate, saturating_sum};

/// The result of the core human-capital calculation.
#[derive(Debug, Clone)]
pub struct CorePointsResult {
    /// Points per factor and the subtotal.
    pub breakdown: CoreBreakdown,
    /// The audit steps, one per factor.
    pub audit_steps: Vec<AuditStep>,
    /// Lookup misses and clamped values.
    pub warnings: Vec<AuditWarning>,
}

/// Language points for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePointsLookup {
    /// Points per skill.
    pub per_skill: PerSkill<u32>,
    /// Sum of the four skills.
    pub total: u32,
    /// Skills scored at a level with no column in the table.
    pub missing: Vec<(Skill, u8)>,
}

/// Looks up per-skill points at each skill's proficiency level.
///
/// Levels below 4 contribute 0. A level with no column in the table also
/// contributes 0 and is reported in `missing`.
pub fn language_points(levels: &ProficiencyLevels, table: &LanguagePoints) -> LanguagePointsLookup {
    let mut missing = Vec::new();

    let per_skill = levels.map(|skill, level| {
        if *level < MIN_SCORED_LEVEL {
            return 0;
        }
        match table.get(skill).get(level) {
            Some(points) => *points,
            None => {
                missing.push((skill, *level));
                0
            }
        }
    });

    let total = saturating_sum(per_skill.iter().map(|(_, points)| *points));

    LanguagePointsLookup {
        per_skill,
        total,
        missing,
    }
}

/// Calculates the core human-capital points for a candidate.
///
/// # Arguments
///
/// * `profile` - The candidate profile
/// * `proficiency` - The converted proficiency levels
/// * `config` - The scoring configuration
/// * `step_number` - The step number of the first audit step
///
/// # Returns
///
/// Returns a `CorePointsResult` with six audit steps: age, education, first
/// language, second language, Canadian experience and the foreign
/// experience reference.
pub fn calculate_core_points(
    profile: &CandidateProfile,
    proficiency: &ProficiencySummary,
    config: &ScoringConfig,
    step_number: u32,
) -> CorePointsResult {
    let core = config.core();
    let married = profile.is_married();
    let column = if married { "with_spouse" } else { "without_spouse" };
    let mut audit_steps = Vec::with_capacity(6);
    let mut warnings = Vec::new();

    // Age
    let age_table: Vec<(u32, u32)> = core
        .age
        .iter()
        .map(|row| (row.age, row.points_for(married)))
        .collect();
    let age = interpolate(&age_table, Decimal::from(profile.age));
    let age_points = age.map(|result| result.points).unwrap_or(0);
    if let Some(side) = age.and_then(|result| result.clamped) {
        warnings.push(AuditWarning::value_clamped(format!(
            "Age {} is {} the age table; using the boundary row",
            profile.age,
            side_label(side)
        )));
    }
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "age_points".to_string(),
        rule_name: "Age Points".to_string(),
        section: ScoreSection::CoreHumanCapital,
        input: serde_json::json!({ "age": profile.age, "column": column }),
        output: serde_json::json!({ "points": age_points }),
        reasoning: format!("Age {} ({}) = {} points", profile.age, column, age_points),
    });

    // Education
    let education_row = core.education.iter().find(|row| row.level == profile.education);
    let education_points = match education_row {
        Some(row) => row.points_for(married),
        None => {
            debug!(level = ?profile.education, "No education row");
            warnings.push(AuditWarning::lookup_miss(format!(
                "No education row for {:?}",
                profile.education
            )));
            0
        }
    };
    audit_steps.push(AuditStep {
        step_number: step_number + 1,
        rule_id: "education_points".to_string(),
        rule_name: "Education Points".to_string(),
        section: ScoreSection::CoreHumanCapital,
        input: serde_json::json!({ "education": profile.education, "column": column }),
        output: serde_json::json!({ "points": education_points, "matched": education_row.is_some() }),
        reasoning: format!(
            "Education {:?} ({}) = {} points",
            profile.education, column, education_points
        ),
    });

    // First language
    let first_table = if married {
        &core.language_with_spouse
    } else {
        &core.language
    };
    let first = language_points(&proficiency.first_language, first_table);
    warnings.extend(missing_columns("first_language", &first));
    audit_steps.push(language_step(
        step_number + 2,
        "first_language_points",
        "First Language Points",
        &proficiency.first_language,
        &first,
    ));

    // Second language
    let second = language_points(&proficiency.second_language, &core.second_language);
    warnings.extend(missing_columns("second_language", &second));
    audit_steps.push(language_step(
        step_number + 3,
        "second_language_points",
        "Second Language Points",
        &proficiency.second_language,
        &second,
    ));

    // Canadian experience
    let canadian = experience_points(
        &core.work_experience.canadian,
        profile.canadian_work_experience,
        married,
    );
    if canadian.clamped == Some(ClampSide::Below) {
        warnings.push(AuditWarning::value_clamped(format!(
            "Canadian experience {} is below the table; using the boundary row",
            profile.canadian_work_experience
        )));
    }
    audit_steps.push(AuditStep {
        step_number: step_number + 4,
        rule_id: "canadian_experience_points".to_string(),
        rule_name: "Canadian Work Experience Points".to_string(),
        section: ScoreSection::CoreHumanCapital,
        input: serde_json::json!({
            "years": profile.canadian_work_experience.normalize().to_string(),
            "column": column
        }),
        output: serde_json::json!({
            "points": canadian.points,
            "capped": canadian.clamped == Some(ClampSide::Above)
        }),
        reasoning: format!(
            "{} years Canadian experience ({}) = {} points",
            profile.canadian_work_experience.normalize(),
            column,
            canadian.points
        ),
    });

    // Foreign experience (reference only)
    let foreign = experience_points(
        &core.work_experience.foreign,
        profile.foreign_work_experience,
        married,
    );
    audit_steps.push(AuditStep {
        step_number: step_number + 5,
        rule_id: "foreign_experience_reference".to_string(),
        rule_name: "Foreign Work Experience Reference".to_string(),
        section: ScoreSection::CoreHumanCapital,
        input: serde_json::json!({
            "years": profile.foreign_work_experience.normalize().to_string()
        }),
        output: serde_json::json!({ "reference_points": foreign.points, "counted": false }),
        reasoning: format!(
            "{} years foreign experience = {} reference points, not added to the subtotal",
            profile.foreign_work_experience.normalize(),
            foreign.points
        ),
    });

    let subtotal = saturating_sum([
        age_points,
        education_points,
        first.total,
        second.total,
        canadian.points,
    ]);

    CorePointsResult {
        breakdown: CoreBreakdown {
            age: age_points,
            education: education_points,
            first_language: first.total,
            second_language: second.total,
            canadian_experience: canadian.points,
            foreign_experience_reference: foreign.points,
            subtotal,
        },
        audit_steps,
        warnings,
    }
}

struct ExperiencePoints {
    points: u32,
    clamped: Option<ClampSide>,
}

/// Interpolates an experience table; years beyond the last row are capped.
fn experience_points(rows: &[ExperienceRow], years: Decimal, married: bool) -> ExperiencePoints {
    let table: Vec<(u32, u32)> = rows
        .iter()
        .map(|row| (row.years, row.points_for(married)))
        .collect();

    match interpolate(&table, years) {
        Some(result) => ExperiencePoints {
            points: result.points,
            clamped: result.clamped,
        },
        None => ExperiencePoints {
            points: 0,
            clamped: None,
        },
    }
}

fn language_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    levels: &ProficiencyLevels,
    lookup: &LanguagePointsLookup,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        section: ScoreSection::CoreHumanCapital,
        input: serde_json::json!({ "levels": levels }),
        output: serde_json::json!({ "per_skill": lookup.per_skill, "points": lookup.total }),
        reasoning: format!(
            "S{} + L{} + R{} + W{} = {} points",
            lookup.per_skill.speaking,
            lookup.per_skill.listening,
            lookup.per_skill.reading,
            lookup.per_skill.writing,
            lookup.total
        ),
    }
}

pub(crate) fn missing_columns(slot: &str, lookup: &LanguagePointsLookup) -> Vec<AuditWarning> {
    lookup
        .missing
        .iter()
        .map(|(skill, level)| {
            debug!(slot, skill = skill.as_str(), level, "No language points column");
            AuditWarning::lookup_miss(format!(
                "No {} points for {} at level {}",
                slot,
                skill.as_str(),
                level
            ))
        })
        .collect()
}

fn side_label(side: ClampSide) -> &'static str {
    match side {
        ClampSide::Below => "below",
        ClampSide::Above => "above",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{default_config, levels, single_candidate};
    use crate::models::{EducationLevel, MaritalStatus};
    use std::collections::BTreeMap;

    fn summary(first: u8, second: u8) -> ProficiencySummary {
        ProficiencySummary {
            first_language: levels(first),
            second_language: levels(second),
            spouse_language: levels(0),
        }
    }

    #[test]
    fn test_single_candidate_core_subtotal() {
        let config = default_config();
        let profile = single_candidate();

        let result = calculate_core_points(&profile, &summary(9, 0), &config, 1);

        assert_eq!(result.breakdown.age, 105);
        assert_eq!(result.breakdown.education, 120);
        assert_eq!(result.breakdown.first_language, 124);
        assert_eq!(result.breakdown.second_language, 0);
        assert_eq!(result.breakdown.canadian_experience, 0);
        assert_eq!(result.breakdown.subtotal, 349);
        assert_eq!(result.audit_steps.len(), 6);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_married_candidate_uses_with_spouse_columns() {
        let config = default_config();
        let mut profile = single_candidate();
        profile.marital_status = MaritalStatus::Married;

        let result = calculate_core_points(&profile, &summary(9, 0), &config, 1);

        assert_eq!(result.breakdown.age, 95);
        assert_eq!(result.breakdown.education, 112);
        assert_eq!(result.breakdown.first_language, 116);
    }

    #[test]
    fn test_level_four_uses_level_four_column() {
        let config = default_config();
        let result = calculate_core_points(&single_candidate(), &summary(4, 0), &config, 1);
        assert_eq!(result.breakdown.first_language, 24);
    }

    #[test]
    fn test_second_language_points() {
        let config = default_config();
        let result = calculate_core_points(&single_candidate(), &summary(9, 7), &config, 1);
        assert_eq!(result.breakdown.second_language, 12);
        assert_eq!(result.breakdown.subtotal, 361);
    }

    #[test]
    fn test_level_below_four_contributes_zero_without_warning() {
        let config = default_config();
        let result = calculate_core_points(&single_candidate(), &summary(3, 0), &config, 1);
        assert_eq!(result.breakdown.first_language, 0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_level_column_contributes_zero_with_warning() {
        let table: LanguagePoints = PerSkill::uniform(BTreeMap::from([(9, 31)]));
        let lookup = language_points(&levels(12), &table);

        assert_eq!(lookup.total, 0);
        assert_eq!(lookup.missing.len(), 4);
        assert_eq!(missing_columns("first_language", &lookup).len(), 4);
    }

    #[test]
    fn test_age_outside_table_clamps_with_warning() {
        let config = default_config();
        let mut profile = single_candidate();
        profile.age = 16;

        let result = calculate_core_points(&profile, &summary(9, 0), &config, 1);

        assert_eq!(result.breakdown.age, 0);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, crate::models::VALUE_CLAMPED);
    }

    #[test]
    fn test_age_in_plateau() {
        let config = default_config();
        let mut profile = single_candidate();
        profile.age = 25;

        let result = calculate_core_points(&profile, &summary(9, 0), &config, 1);
        assert_eq!(result.breakdown.age, 110);
    }

    #[test]
    fn test_canadian_experience_capped_at_table_maximum() {
        let config = default_config();
        let mut profile = single_candidate();

        profile.canadian_work_experience = Decimal::from(5);
        let at_cap = calculate_core_points(&profile, &summary(9, 0), &config, 1);

        profile.canadian_work_experience = Decimal::from(9);
        let beyond_cap = calculate_core_points(&profile, &summary(9, 0), &config, 1);

        assert_eq!(at_cap.breakdown.canadian_experience, 80);
        assert_eq!(beyond_cap.breakdown.canadian_experience, 80);
        assert!(beyond_cap.warnings.is_empty());
    }

    #[test]
    fn test_negative_canadian_experience_clamps_to_zero_row() {
        let config = default_config();
        let mut profile = single_candidate();
        profile.canadian_work_experience = Decimal::from(-2);

        let result = calculate_core_points(&profile, &summary(9, 0), &config, 1);

        assert_eq!(result.breakdown.canadian_experience, 0);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_foreign_experience_reference_not_in_subtotal() {
        let config = default_config();
        let profile = single_candidate();

        let result = calculate_core_points(&profile, &summary(9, 0), &config, 1);

        assert_eq!(result.breakdown.foreign_experience_reference, 11);
        assert_eq!(result.breakdown.subtotal, 349);
    }

    #[test]
    fn test_unmatched_education_contributes_zero() {
        let mut sections = default_config().into_sections();
        sections
            .core
            .education
            .retain(|row| row.level != EducationLevel::Doctoral);
        let config = ScoringConfig::new(sections).unwrap();

        let mut profile = single_candidate();
        profile.education = EducationLevel::Doctoral;

        let result = calculate_core_points(&profile, &summary(9, 0), &config, 1);

        assert_eq!(result.breakdown.education, 0);
        assert_eq!(result.warnings[0].code, crate::models::LOOKUP_MISS);
    }

    #[test]
    fn test_audit_steps_are_sequential() {
        let config = default_config();
        let result = calculate_core_points(&single_candidate(), &summary(9, 0), &config, 4);
        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_oversized_language_points_saturate() {
        let table: LanguagePoints = PerSkill::uniform(BTreeMap::from([(9, u32::MAX)]));
        let lookup = language_points(&levels(9), &table);

        assert_eq!(lookup.per_skill.speaking, u32::MAX);
        assert_eq!(lookup.total, u32::MAX);
        assert!(lookup.missing.is_empty());
    }
}
