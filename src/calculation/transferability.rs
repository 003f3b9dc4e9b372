//! Skill transferability points.
//!
//! Five independent combinations reward education and experience backed by
//! strong first-language ability. Their sum is capped at
//! [`TRANSFERABILITY_CAP`].

use tracing::debug;

use crate::config::ScoringConfig;
use crate::models::{
    AuditStep, AuditWarning, CandidateProfile, ProficiencyLevels, ScoreSection,
    TransferabilityBreakdown,
};

use super::interpolation::{capped_whole_years, saturating_sum};

/// Maximum skill transferability subtotal.
pub const TRANSFERABILITY_CAP: u32 = 100;

/// Proficiency floor on all four skills for the lower language tier.
pub const TIER_7_FLOOR: u8 = 7;

/// Proficiency floor on all four skills for the upper language tier.
pub const TIER_9_FLOOR: u8 = 9;

/// Proficiency floor on all four skills for the lower trades bonus.
pub const TRADES_TIER_5_FLOOR: u8 = 5;

/// Canadian years are capped at this value for the Canadian experience by
/// education lookup, even where the table lists longer experience.
pub const CANADIAN_EDUCATION_COMBINATION_YEAR_CAP: u32 = 1;

/// First-language tier reached on all four skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageTier {
    /// All skills at 7 or more.
    Tier7,
    /// All skills at 9 or more; supersedes tier 7.
    Tier9,
}

impl LanguageTier {
    /// The highest tier the levels meet, if any.
    pub fn from_levels(levels: &ProficiencyLevels) -> Option<Self> {
        if levels.all_at_least(TIER_9_FLOOR) {
            Some(LanguageTier::Tier9)
        } else if levels.all_at_least(TIER_7_FLOOR) {
            Some(LanguageTier::Tier7)
        } else {
            None
        }
    }

    /// Selects the column for this tier.
    pub fn select(self, tier7: u32, tier9: u32) -> u32 {
        match self {
            LanguageTier::Tier7 => tier7,
            LanguageTier::Tier9 => tier9,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            LanguageTier::Tier7 => "tier7",
            LanguageTier::Tier9 => "tier9",
        }
    }
}

/// The result of the skill transferability calculation.
#[derive(Debug, Clone)]
pub struct TransferabilityResult {
    /// Points per combination, the uncapped sum and the capped subtotal.
    pub breakdown: TransferabilityBreakdown,
    /// The audit steps, one per combination plus the cap.
    pub audit_steps: Vec<AuditStep>,
    /// Lookup misses.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates skill transferability points for a candidate.
///
/// # Arguments
///
/// * `profile` - The candidate profile
/// * `first_language` - The candidate's first-language proficiency levels
/// * `config` - The scoring configuration
/// * `step_number` - The step number of the first audit step
///
/// # Returns
///
/// Returns a `TransferabilityResult` whose subtotal is always within
/// `0..=TRANSFERABILITY_CAP`.
pub fn calculate_transferability(
    profile: &CandidateProfile,
    first_language: &ProficiencyLevels,
    config: &ScoringConfig,
    step_number: u32,
) -> TransferabilityResult {
    let tables = config.transferability();
    let tier = LanguageTier::from_levels(first_language);
    let tier_label = tier.map(LanguageTier::as_str).unwrap_or("none");
    let has_foreign = profile.foreign_work_experience > rust_decimal::Decimal::ZERO;
    let has_canadian = profile.canadian_work_experience > rust_decimal::Decimal::ZERO;
    let has_education = !profile.education.is_lowest();
    let mut warnings = Vec::new();
    let mut audit_steps = Vec::with_capacity(6);

    // Education x language
    let education_language = match tier {
        Some(tier) if has_education => {
            match tables
                .education_language
                .iter()
                .find(|row| row.level == profile.education)
            {
                Some(row) => tier.select(row.tier7, row.tier9),
                None => {
                    warnings.push(miss(format!(
                        "No education x language row for {:?}",
                        profile.education
                    )));
                    0
                }
            }
        }
        _ => 0,
    };
    audit_steps.push(combination_step(
        step_number,
        "education_language",
        "Education with Language Ability",
        serde_json::json!({ "education": profile.education, "tier": tier_label }),
        education_language,
    ));

    // Foreign experience x language
    let foreign_experience_language = match tier {
        Some(tier) if has_foreign => {
            let cap = tables
                .foreign_experience_language
                .iter()
                .map(|row| row.years)
                .max()
                .unwrap_or(0);
            let years = capped_whole_years(profile.foreign_work_experience, cap);
            match tables
                .foreign_experience_language
                .iter()
                .find(|row| row.years == years)
            {
                Some(row) => tier.select(row.tier7, row.tier9),
                None => {
                    warnings.push(miss(format!(
                        "No foreign experience x language row for {} years",
                        years
                    )));
                    0
                }
            }
        }
        _ => 0,
    };
    audit_steps.push(combination_step(
        step_number + 1,
        "foreign_experience_language",
        "Foreign Experience with Language Ability",
        serde_json::json!({
            "foreign_years": profile.foreign_work_experience.normalize().to_string(),
            "tier": tier_label
        }),
        foreign_experience_language,
    ));

    // Canadian x foreign experience
    let canadian_foreign_experience = if has_canadian && has_foreign {
        let rows = &tables.canadian_foreign_experience;
        let canadian_cap = rows.iter().map(|row| row.canadian_years).max().unwrap_or(0);
        let foreign_cap = rows.iter().map(|row| row.foreign_years).max().unwrap_or(0);
        let canadian_years = capped_whole_years(profile.canadian_work_experience, canadian_cap);
        let foreign_years = capped_whole_years(profile.foreign_work_experience, foreign_cap);
        match rows
            .iter()
            .find(|row| row.canadian_years == canadian_years && row.foreign_years == foreign_years)
        {
            Some(row) => row.points,
            None => {
                warnings.push(miss(format!(
                    "No Canadian x foreign experience row for ({}, {}) years",
                    canadian_years, foreign_years
                )));
                0
            }
        }
    } else {
        0
    };
    audit_steps.push(combination_step(
        step_number + 2,
        "canadian_foreign_experience",
        "Canadian with Foreign Experience",
        serde_json::json!({
            "canadian_years": profile.canadian_work_experience.normalize().to_string(),
            "foreign_years": profile.foreign_work_experience.normalize().to_string()
        }),
        canadian_foreign_experience,
    ));

    // Canadian experience x education
    let canadian_experience_education = if has_canadian && has_education {
        let years = capped_whole_years(
            profile.canadian_work_experience,
            CANADIAN_EDUCATION_COMBINATION_YEAR_CAP,
        );
        match tables
            .canadian_experience_education
            .iter()
            .find(|row| row.canadian_years == years && row.level == profile.education)
        {
            Some(row) => row.points,
            None => {
                warnings.push(miss(format!(
                    "No Canadian experience x education row for ({} years, {:?})",
                    years, profile.education
                )));
                0
            }
        }
    } else {
        0
    };
    audit_steps.push(combination_step(
        step_number + 3,
        "canadian_experience_education",
        "Canadian Experience with Education",
        serde_json::json!({
            "canadian_years": profile.canadian_work_experience.normalize().to_string(),
            "year_cap": CANADIAN_EDUCATION_COMBINATION_YEAR_CAP,
            "education": profile.education
        }),
        canadian_experience_education,
    ));

    // Trades certification x language
    let trades = &tables.trades_certification;
    let trades_certification = if !profile.trades_certification {
        0
    } else if first_language.all_at_least(TIER_7_FLOOR) {
        trades.tier7
    } else if first_language.all_at_least(TRADES_TIER_5_FLOOR) {
        trades.tier5
    } else {
        0
    };
    audit_steps.push(combination_step(
        step_number + 4,
        "trades_certification",
        "Trades Certification with Language Ability",
        serde_json::json!({
            "certified": profile.trades_certification,
            "lowest_level": first_language.lowest()
        }),
        trades_certification,
    ));

    let uncapped_total = saturating_sum([
        education_language,
        foreign_experience_language,
        canadian_foreign_experience,
        canadian_experience_education,
        trades_certification,
    ]);
    let subtotal = uncapped_total.min(TRANSFERABILITY_CAP);

    audit_steps.push(AuditStep {
        step_number: step_number + 5,
        rule_id: "transferability_cap".to_string(),
        rule_name: "Skill Transferability Cap".to_string(),
        section: ScoreSection::SkillTransferability,
        input: serde_json::json!({ "uncapped_total": uncapped_total, "cap": TRANSFERABILITY_CAP }),
        output: serde_json::json!({ "points": subtotal, "capped": uncapped_total > subtotal }),
        reasoning: if uncapped_total > subtotal {
            format!(
                "{} points capped at {}",
                uncapped_total, TRANSFERABILITY_CAP
            )
        } else {
            format!("{} points within the cap of {}", uncapped_total, TRANSFERABILITY_CAP)
        },
    });

    TransferabilityResult {
        breakdown: TransferabilityBreakdown {
            education_language,
            foreign_experience_language,
            canadian_foreign_experience,
            canadian_experience_education,
            trades_certification,
            uncapped_total,
            subtotal,
        },
        audit_steps,
        warnings,
    }
}

fn combination_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    input: serde_json::Value,
    points: u32,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        section: ScoreSection::SkillTransferability,
        input,
        output: serde_json::json!({ "points": points }),
        reasoning: format!("{} = {} points", rule_name, points),
    }
}

fn miss(message: String) -> AuditWarning {
    debug!(%message, "Transferability lookup miss");
    AuditWarning::lookup_miss(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{default_config, levels, single_candidate};
    use crate::models::{EducationLevel, PerSkill};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_language_tier() {
        assert_eq!(LanguageTier::from_levels(&levels(9)), Some(LanguageTier::Tier9));
        assert_eq!(LanguageTier::from_levels(&levels(8)), Some(LanguageTier::Tier7));
        assert_eq!(LanguageTier::from_levels(&levels(6)), None);

        let mixed = PerSkill {
            speaking: 10,
            listening: 9,
            reading: 9,
            writing: 8,
        };
        assert_eq!(LanguageTier::from_levels(&mixed), Some(LanguageTier::Tier7));
    }

    #[test]
    fn test_tier9_education_and_foreign_experience_reach_cap() {
        let config = default_config();
        let result = calculate_transferability(&single_candidate(), &levels(9), &config, 1);

        assert_eq!(result.breakdown.education_language, 50);
        assert_eq!(result.breakdown.foreign_experience_language, 50);
        assert_eq!(result.breakdown.uncapped_total, 100);
        assert_eq!(result.breakdown.subtotal, 100);
        assert_eq!(result.audit_steps.len(), 6);
    }

    #[test]
    fn test_tier7_values() {
        let config = default_config();
        let result = calculate_transferability(&single_candidate(), &levels(7), &config, 1);

        assert_eq!(result.breakdown.education_language, 25);
        assert_eq!(result.breakdown.foreign_experience_language, 25);
        assert_eq!(result.breakdown.subtotal, 50);
    }

    #[test]
    fn test_below_tier7_all_language_gated_combinations_zero() {
        let config = default_config();
        let mut profile = single_candidate();
        profile.foreign_work_experience = Decimal::ZERO;
        profile.trades_certification = true;

        let result = calculate_transferability(&profile, &levels(4), &config, 1);

        assert_eq!(result.breakdown, TransferabilityBreakdown::default());
    }

    #[test]
    fn test_adversarial_combination_is_capped() {
        let config = default_config();
        let mut profile = single_candidate();
        profile.education = EducationLevel::Doctoral;
        profile.canadian_work_experience = dec("3");
        profile.foreign_work_experience = dec("4");
        profile.trades_certification = true;

        let result = calculate_transferability(&profile, &levels(10), &config, 1);

        // 50 + 50 + 50 + 25 + 50
        assert_eq!(result.breakdown.uncapped_total, 225);
        assert_eq!(result.breakdown.subtotal, TRANSFERABILITY_CAP);
        assert_eq!(result.audit_steps[5].output["capped"], true);
    }

    #[test]
    fn test_foreign_experience_years_truncate() {
        let config = default_config();
        let mut profile = single_candidate();
        profile.education = EducationLevel::None;

        profile.foreign_work_experience = dec("2.9");
        let two = calculate_transferability(&profile, &levels(9), &config, 1);
        assert_eq!(two.breakdown.foreign_experience_language, 25);

        profile.foreign_work_experience = dec("0.5");
        let none = calculate_transferability(&profile, &levels(9), &config, 1);
        assert_eq!(none.breakdown.foreign_experience_language, 0);
    }

    #[test]
    fn test_canadian_foreign_combination_caps_both_axes() {
        let config = default_config();
        let mut profile = single_candidate();
        profile.canadian_work_experience = dec("5");
        profile.foreign_work_experience = dec("8");

        let result = calculate_transferability(&profile, &levels(0), &config, 1);

        assert_eq!(result.breakdown.canadian_foreign_experience, 50);
    }

    #[test]
    fn test_canadian_foreign_combination_needs_both() {
        let config = default_config();
        let mut profile = single_candidate();
        profile.canadian_work_experience = Decimal::ZERO;
        profile.foreign_work_experience = dec("3");

        let result = calculate_transferability(&profile, &levels(0), &config, 1);
        assert_eq!(result.breakdown.canadian_foreign_experience, 0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_canadian_education_combination_is_capped_at_one_year() {
        // The table lists 2-year rows, but lookups never reach them: a
        // candidate with 2+ Canadian years scores the 1-year row.
        let config = default_config();
        let mut profile = single_candidate();
        profile.education = EducationLevel::Masters;
        profile.foreign_work_experience = Decimal::ZERO;

        profile.canadian_work_experience = dec("1");
        let one_year = calculate_transferability(&profile, &levels(0), &config, 1);

        profile.canadian_work_experience = dec("4");
        let four_years = calculate_transferability(&profile, &levels(0), &config, 1);

        assert_eq!(one_year.breakdown.canadian_experience_education, 25);
        assert_eq!(four_years.breakdown.canadian_experience_education, 25);
        assert!(
            config
                .transferability()
                .canadian_experience_education
                .iter()
                .any(|row| row.canadian_years == 2 && row.points == 50)
        );
    }

    #[test]
    fn test_canadian_education_combination_needs_education() {
        let config = default_config();
        let mut profile = single_candidate();
        profile.education = EducationLevel::None;
        profile.canadian_work_experience = dec("2");

        let result = calculate_transferability(&profile, &levels(9), &config, 1);
        assert_eq!(result.breakdown.canadian_experience_education, 0);
    }

    #[test]
    fn test_secondary_education_scores_zero_without_warning() {
        let config = default_config();
        let mut profile = single_candidate();
        profile.education = EducationLevel::Secondary;
        profile.canadian_work_experience = dec("2");
        profile.foreign_work_experience = Decimal::ZERO;

        let result = calculate_transferability(&profile, &levels(9), &config, 1);

        assert_eq!(result.breakdown.education_language, 0);
        assert_eq!(result.breakdown.canadian_experience_education, 0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_education_row_warns() {
        let mut sections = default_config().into_sections();
        sections
            .transferability
            .education_language
            .retain(|row| row.level != EducationLevel::Secondary);
        let config = ScoringConfig::new(sections).unwrap();

        let mut profile = single_candidate();
        profile.education = EducationLevel::Secondary;
        profile.foreign_work_experience = Decimal::ZERO;

        let result = calculate_transferability(&profile, &levels(9), &config, 1);

        assert_eq!(result.breakdown.education_language, 0);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, crate::models::LOOKUP_MISS);
    }

    #[test]
    fn test_under_one_year_scores_zero_without_warning() {
        let config = default_config();
        let mut profile = single_candidate();
        profile.canadian_work_experience = dec("0.5");
        profile.foreign_work_experience = dec("0.5");

        let result = calculate_transferability(&profile, &levels(9), &config, 1);

        assert_eq!(result.breakdown.foreign_experience_language, 0);
        assert_eq!(result.breakdown.canadian_foreign_experience, 0);
        assert_eq!(result.breakdown.canadian_experience_education, 0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_trades_certification_tiers() {
        let config = default_config();
        let mut profile = single_candidate();
        profile.education = EducationLevel::None;
        profile.foreign_work_experience = Decimal::ZERO;
        profile.trades_certification = true;

        let tier7 = calculate_transferability(&profile, &levels(7), &config, 1);
        let tier5 = calculate_transferability(&profile, &levels(5), &config, 1);
        let below = calculate_transferability(&profile, &levels(4), &config, 1);

        assert_eq!(tier7.breakdown.trades_certification, 50);
        assert_eq!(tier5.breakdown.trades_certification, 25);
        assert_eq!(below.breakdown.trades_certification, 0);
    }

    #[test]
    fn test_oversized_table_values_still_respect_cap() {
        let mut sections = default_config().into_sections();
        sections.transferability.trades_certification.tier7 = u32::MAX;
        let config = ScoringConfig::new(sections).unwrap();

        let mut profile = single_candidate();
        profile.trades_certification = true;

        let result = calculate_transferability(&profile, &levels(9), &config, 1);

        assert_eq!(result.breakdown.trades_certification, u32::MAX);
        assert_eq!(result.breakdown.uncapped_total, u32::MAX);
        assert_eq!(result.breakdown.subtotal, TRANSFERABILITY_CAP);
        assert_eq!(result.audit_steps[5].output["capped"], true);
    }
}
