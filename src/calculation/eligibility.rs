//! Program eligibility gates.
//!
//! Each gate is a pure predicate over the profile, the converted proficiency
//! levels, the total score and the program minimums. Every requirement a
//! gate checks is reported with the values it compared.

use std::collections::BTreeMap;

use crate::config::ScoringConfig;
use crate::models::{
    AuditStep, CandidateProfile, EligibilityCheck, ProficiencyLevels, ProgramEligibility,
    ProgramId, ScoreSection,
};

use super::additional_points::FrenchConditions;

/// The result of evaluating every program gate.
#[derive(Debug, Clone)]
pub struct EligibilityResult {
    /// Outcome per program.
    pub programs: BTreeMap<ProgramId, ProgramEligibility>,
    /// One audit step per program, in program order.
    pub audit_steps: Vec<AuditStep>,
}

/// Evaluates the eligibility gates for all five programs.
///
/// # Arguments
///
/// * `profile` - The candidate profile
/// * `first_language` - First-language proficiency levels
/// * `french` - The French-language conditions from the additional points
/// * `total_score` - The candidate's total score
/// * `config` - The scoring configuration
/// * `step_number` - The step number of the first audit step
pub fn evaluate_eligibility(
    profile: &CandidateProfile,
    first_language: &ProficiencyLevels,
    french: FrenchConditions,
    total_score: u32,
    config: &ScoringConfig,
    step_number: u32,
) -> EligibilityResult {
    let skilled_worker = skilled_worker(profile, first_language, total_score, config);
    let canadian_experience = canadian_experience(profile, first_language, config);
    let skilled_trades = skilled_trades(profile, first_language, config);
    let french_proficiency = french_proficiency(
        french,
        [
            (ProgramId::SkilledWorker, skilled_worker.eligible),
            (ProgramId::CanadianExperience, canadian_experience.eligible),
            (ProgramId::SkilledTrades, skilled_trades.eligible),
        ],
    );
    let provincial_nomination = provincial_nomination(profile);

    let programs = BTreeMap::from([
        (ProgramId::SkilledWorker, skilled_worker),
        (ProgramId::CanadianExperience, canadian_experience),
        (ProgramId::SkilledTrades, skilled_trades),
        (ProgramId::FrenchProficiency, french_proficiency),
        (ProgramId::ProvincialNomination, provincial_nomination),
    ]);

    let audit_steps = programs
        .iter()
        .zip(step_number..)
        .map(|((program, outcome), number)| AuditStep {
            step_number: number,
            rule_id: format!("{}_eligibility", program_key(*program)),
            rule_name: format!("{} Eligibility", program.display_name()),
            section: ScoreSection::Eligibility,
            input: serde_json::json!({ "checks": outcome.checks }),
            output: serde_json::json!({ "eligible": outcome.eligible }),
            reasoning: reasoning(outcome),
        })
        .collect();

    EligibilityResult {
        programs,
        audit_steps,
    }
}

fn skilled_worker(
    profile: &CandidateProfile,
    first_language: &ProficiencyLevels,
    total_score: u32,
    config: &ScoringConfig,
) -> ProgramEligibility {
    let minimums = &config.programs().skilled_worker;

    outcome(vec![
        check(
            "language_floor",
            first_language.all_at_least(minimums.language_floor),
            format!(
                "lowest level {} vs floor {}",
                first_language.lowest(),
                minimums.language_floor
            ),
        ),
        check(
            "education",
            !profile.education.is_lowest() && profile.education >= minimums.min_education,
            format!(
                "{:?} vs minimum {:?}",
                profile.education, minimums.min_education
            ),
        ),
        check(
            "foreign_experience",
            profile.foreign_work_experience >= minimums.min_foreign_years,
            format!(
                "{} years vs minimum {}",
                profile.foreign_work_experience.normalize(),
                minimums.min_foreign_years.normalize()
            ),
        ),
        check(
            "total_points",
            total_score >= minimums.min_total_points,
            format!(
                "{} points vs minimum {}",
                total_score, minimums.min_total_points
            ),
        ),
    ])
}

fn canadian_experience(
    profile: &CandidateProfile,
    first_language: &ProficiencyLevels,
    config: &ScoringConfig,
) -> ProgramEligibility {
    let minimums = &config.programs().canadian_experience;
    let (floor, category) = if profile.occupation.is_management_adjacent() {
        (minimums.strict_language_floor, "management-adjacent")
    } else {
        (minimums.relaxed_language_floor, "other")
    };

    outcome(vec![
        check(
            "language_floor",
            first_language.all_at_least(floor),
            format!(
                "lowest level {} vs floor {} ({:?}, {})",
                first_language.lowest(),
                floor,
                profile.occupation,
                category
            ),
        ),
        check(
            "canadian_experience",
            profile.canadian_work_experience >= minimums.min_canadian_years,
            format!(
                "{} years vs minimum {}",
                profile.canadian_work_experience.normalize(),
                minimums.min_canadian_years.normalize()
            ),
        ),
    ])
}

fn skilled_trades(
    profile: &CandidateProfile,
    first_language: &ProficiencyLevels,
    config: &ScoringConfig,
) -> ProgramEligibility {
    let minimums = &config.programs().skilled_trades;
    let floors = &minimums.language_floors;

    outcome(vec![
        check(
            "language_floors",
            first_language.meets_floors(floors),
            format!(
                "levels S{} L{} R{} W{} vs floors S{} L{} R{} W{}",
                first_language.speaking,
                first_language.listening,
                first_language.reading,
                first_language.writing,
                floors.speaking,
                floors.listening,
                floors.reading,
                floors.writing
            ),
        ),
        check(
            "foreign_experience",
            profile.foreign_work_experience >= minimums.min_foreign_years,
            format!(
                "{} years vs minimum {}",
                profile.foreign_work_experience.normalize(),
                minimums.min_foreign_years.normalize()
            ),
        ),
    ])
}

fn french_proficiency(
    french: FrenchConditions,
    base_programs: [(ProgramId, bool); 3],
) -> ProgramEligibility {
    let qualifying: Vec<&str> = base_programs
        .iter()
        .filter(|(_, eligible)| *eligible)
        .map(|(program, _)| program.display_name())
        .collect();

    outcome(vec![
        check(
            "french_english_dual",
            french.french_english_dual,
            format!(
                "French floor {}, English dual floor {}",
                french.french_floor, french.french_english_dual
            ),
        ),
        check(
            "base_program",
            !qualifying.is_empty(),
            if qualifying.is_empty() {
                "not eligible for any base program".to_string()
            } else {
                format!("eligible for {}", qualifying.join(", "))
            },
        ),
    ])
}

fn provincial_nomination(profile: &CandidateProfile) -> ProgramEligibility {
    outcome(vec![check(
        "nomination",
        profile.provincial_nomination,
        format!("nominated: {}", profile.provincial_nomination),
    )])
}

fn check(requirement: &str, met: bool, detail: String) -> EligibilityCheck {
    EligibilityCheck {
        requirement: requirement.to_string(),
        met,
        detail,
    }
}

fn outcome(checks: Vec<EligibilityCheck>) -> ProgramEligibility {
    ProgramEligibility {
        eligible: checks.iter().all(|check| check.met),
        checks,
    }
}

fn reasoning(outcome: &ProgramEligibility) -> String {
    let failed: Vec<&str> = outcome
        .checks
        .iter()
        .filter(|check| !check.met)
        .map(|check| check.requirement.as_str())
        .collect();

    if failed.is_empty() {
        "All requirements met".to_string()
    } else {
        format!("Not met: {}", failed.join(", "))
    }
}

pub(crate) fn program_key(program: ProgramId) -> &'static str {
    match program {
        ProgramId::SkilledWorker => "skilled_worker",
        ProgramId::CanadianExperience => "canadian_experience",
        ProgramId::SkilledTrades => "skilled_trades",
        ProgramId::FrenchProficiency => "french_proficiency",
        ProgramId::ProvincialNomination => "provincial_nomination",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{default_config, levels, single_candidate};
    use crate::models::{EducationLevel, OccupationTeer, PerSkill};
    use rust_decimal::Decimal;

    fn dual() -> FrenchConditions {
        FrenchConditions {
            french_floor: true,
            french_english_dual: true,
        }
    }

    fn evaluate(profile: &CandidateProfile, level: u8, total: u32) -> EligibilityResult {
        evaluate_eligibility(
            profile,
            &levels(level),
            FrenchConditions::default(),
            total,
            &default_config(),
            1,
        )
    }

    #[test]
    fn test_skilled_worker_eligible() {
        let result = evaluate(&single_candidate(), 9, 449);

        let outcome = &result.programs[&ProgramId::SkilledWorker];
        assert!(outcome.eligible);
        assert_eq!(outcome.checks.len(), 4);
    }

    #[test]
    fn test_skilled_worker_fails_language_floor() {
        let result = evaluate(&single_candidate(), 6, 449);

        let outcome = &result.programs[&ProgramId::SkilledWorker];
        assert!(!outcome.eligible);
        assert!(!outcome.checks[0].met);
        assert_eq!(result.audit_steps[0].reasoning, "Not met: language_floor");
    }

    #[test]
    fn test_skilled_worker_requires_education_above_lowest() {
        let mut profile = single_candidate();
        profile.education = EducationLevel::None;

        let result = evaluate(&profile, 9, 449);
        assert!(!result.programs[&ProgramId::SkilledWorker].eligible);
    }

    #[test]
    fn test_skilled_worker_requires_foreign_experience_and_points() {
        let mut profile = single_candidate();
        profile.foreign_work_experience = Decimal::new(5, 1);
        assert!(!evaluate(&profile, 9, 449).programs[&ProgramId::SkilledWorker].eligible);

        let profile = single_candidate();
        assert!(!evaluate(&profile, 9, 66).programs[&ProgramId::SkilledWorker].eligible);
        assert!(evaluate(&profile, 9, 67).programs[&ProgramId::SkilledWorker].eligible);
    }

    #[test]
    fn test_canadian_experience_floor_depends_on_occupation() {
        let mut profile = single_candidate();
        profile.canadian_work_experience = Decimal::ONE;

        profile.occupation = OccupationTeer::Teer1;
        assert!(!evaluate(&profile, 6, 400).programs[&ProgramId::CanadianExperience].eligible);
        assert!(evaluate(&profile, 7, 400).programs[&ProgramId::CanadianExperience].eligible);

        profile.occupation = OccupationTeer::Teer3;
        assert!(evaluate(&profile, 5, 400).programs[&ProgramId::CanadianExperience].eligible);
        assert!(!evaluate(&profile, 4, 400).programs[&ProgramId::CanadianExperience].eligible);
    }

    #[test]
    fn test_canadian_experience_requires_minimum_years() {
        let result = evaluate(&single_candidate(), 9, 449);
        assert!(!result.programs[&ProgramId::CanadianExperience].eligible);
    }

    #[test]
    fn test_skilled_trades_per_skill_floors() {
        let profile = single_candidate();
        let config = default_config();

        let meets = PerSkill {
            speaking: 5,
            listening: 5,
            reading: 4,
            writing: 4,
        };
        let result =
            evaluate_eligibility(&profile, &meets, FrenchConditions::default(), 300, &config, 1);
        assert!(result.programs[&ProgramId::SkilledTrades].eligible);

        let weak_speaking = PerSkill {
            speaking: 4,
            listening: 9,
            reading: 9,
            writing: 9,
        };
        let result = evaluate_eligibility(
            &profile,
            &weak_speaking,
            FrenchConditions::default(),
            300,
            &config,
            1,
        );
        assert!(!result.programs[&ProgramId::SkilledTrades].eligible);
    }

    #[test]
    fn test_skilled_trades_requires_two_years_foreign() {
        let mut profile = single_candidate();
        profile.foreign_work_experience = Decimal::new(19, 1);

        let result = evaluate(&profile, 9, 449);
        assert!(!result.programs[&ProgramId::SkilledTrades].eligible);
    }

    #[test]
    fn test_french_proficiency_needs_dual_and_base_program() {
        let config = default_config();
        let profile = single_candidate();

        let with_base =
            evaluate_eligibility(&profile, &levels(9), dual(), 449, &config, 1);
        assert!(with_base.programs[&ProgramId::FrenchProficiency].eligible);

        let without_dual = evaluate(&profile, 9, 449);
        assert!(!without_dual.programs[&ProgramId::FrenchProficiency].eligible);

        let mut no_base = single_candidate();
        no_base.education = EducationLevel::None;
        no_base.foreign_work_experience = Decimal::ZERO;
        let result = evaluate_eligibility(&no_base, &levels(9), dual(), 449, &config, 1);
        assert!(!result.programs[&ProgramId::FrenchProficiency].eligible);
    }

    #[test]
    fn test_provincial_nomination_follows_flag() {
        let mut profile = single_candidate();
        assert!(!evaluate(&profile, 9, 449).programs[&ProgramId::ProvincialNomination].eligible);

        profile.provincial_nomination = true;
        assert!(evaluate(&profile, 0, 0).programs[&ProgramId::ProvincialNomination].eligible);
    }

    #[test]
    fn test_one_audit_step_per_program() {
        let result = evaluate(&single_candidate(), 9, 449);
        let ids: Vec<&str> = result
            .audit_steps
            .iter()
            .map(|step| step.rule_id.as_str())
            .collect();

        assert_eq!(
            ids,
            vec![
                "skilled_worker_eligibility",
                "canadian_experience_eligibility",
                "skilled_trades_eligibility",
                "french_proficiency_eligibility",
                "provincial_nomination_eligibility",
            ]
        );
    }
}
