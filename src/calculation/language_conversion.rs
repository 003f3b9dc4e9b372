//! Language proficiency conversion.
//!
//! Raw test scores are converted to the standardized proficiency scale with
//! one algorithm for every test: scan the threshold array from the highest
//! threshold down and take the level of the first threshold the score meets.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{ConversionTable, LanguageConversion};
use crate::models::{
    AuditStep, AuditWarning, LanguageScores, PerSkill, ProficiencyLevels, ScoreSection,
};

/// The result of converting one language slot, including the audit step.
#[derive(Debug, Clone)]
pub struct ProficiencyConversionResult {
    /// The proficiency level per skill.
    pub levels: ProficiencyLevels,
    /// The audit step recording this conversion.
    pub audit_step: AuditStep,
    /// Warnings raised when the test has no conversion table.
    pub warnings: Vec<AuditWarning>,
}

/// Converts one raw score to a proficiency level.
///
/// A raw score of zero or less means "not entered" and yields level 0, as
/// does a score below the lowest threshold.
///
/// # Examples
///
/// ```
/// use crs_engine::calculation::convert_raw_score;
/// use crs_engine::config::ConversionTable;
/// use rust_decimal::Decimal;
///
/// let table = ConversionTable {
///     thresholds: vec![Decimal::ZERO, Decimal::new(40, 1), Decimal::new(65, 1)],
///     levels: vec![0, 4, 8],
/// };
/// assert_eq!(convert_raw_score(Decimal::new(70, 1), &table), 8);
/// assert_eq!(convert_raw_score(Decimal::new(50, 1), &table), 4);
/// assert_eq!(convert_raw_score(Decimal::ZERO, &table), 0);
/// ```
pub fn convert_raw_score(raw: Decimal, table: &ConversionTable) -> u8 {
    if raw <= Decimal::ZERO {
        return 0;
    }

    table
        .thresholds
        .iter()
        .zip(&table.levels)
        .rev()
        .find(|(threshold, _)| raw >= **threshold)
        .map(|(_, level)| *level)
        .unwrap_or(0)
}

/// Converts the four raw scores of a language slot.
///
/// An absent slot converts to level 0 on every skill. A test without a
/// configured table also converts to level 0 and raises a lookup-miss
/// warning.
///
/// # Arguments
///
/// * `slot` - Name of the slot being converted (e.g. "first_language")
/// * `scores` - The raw scores, if the slot was filled
/// * `conversion` - The conversion tables per test
/// * `step_number` - The step number for audit trail sequencing
pub fn convert_language(
    slot: &str,
    scores: Option<&LanguageScores>,
    conversion: &LanguageConversion,
    step_number: u32,
) -> ProficiencyConversionResult {
    let rule_id = format!("{}_proficiency", slot);
    let rule_name = format!("{} Proficiency", title_case(slot));

    let Some(scores) = scores else {
        let levels = PerSkill::uniform(0);
        return ProficiencyConversionResult {
            audit_step: AuditStep {
                step_number,
                rule_id,
                rule_name,
                section: ScoreSection::LanguageConversion,
                input: serde_json::json!({ "slot": slot, "present": false }),
                output: serde_json::json!({ "levels": levels }),
                reasoning: format!("No {} results entered; all skills at level 0", slot),
            },
            levels,
            warnings: Vec::new(),
        };
    };

    let raw = scores.as_per_skill();

    let Some(tables) = conversion.get(scores.test) else {
        debug!(slot, test = ?scores.test, "No conversion table for language test");
        let levels = PerSkill::uniform(0);
        return ProficiencyConversionResult {
            audit_step: AuditStep {
                step_number,
                rule_id,
                rule_name,
                section: ScoreSection::LanguageConversion,
                input: serde_json::json!({ "slot": slot, "test": scores.test, "raw": raw }),
                output: serde_json::json!({ "levels": levels }),
                reasoning: format!(
                    "No conversion table for {:?}; all skills at level 0",
                    scores.test
                ),
            },
            levels,
            warnings: vec![AuditWarning::lookup_miss(format!(
                "No conversion table for test {:?} ({})",
                scores.test, slot
            ))],
        };
    };

    let levels = raw.map(|skill, score| convert_raw_score(*score, tables.get(skill)));

    let audit_step = AuditStep {
        step_number,
        rule_id,
        rule_name,
        section: ScoreSection::LanguageConversion,
        input: serde_json::json!({ "slot": slot, "test": scores.test, "raw": raw }),
        output: serde_json::json!({ "levels": levels }),
        reasoning: format!(
            "{:?} converted to levels S{} L{} R{} W{}",
            scores.test, levels.speaking, levels.listening, levels.reading, levels.writing
        ),
    };

    ProficiencyConversionResult {
        levels,
        audit_step,
        warnings: Vec::new(),
    }
}

fn title_case(slot: &str) -> String {
    slot.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
