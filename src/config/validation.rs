//! Load-time checks for configuration tables.
//!
//! Scoring assumes sorted interpolation tables, unique lookup keys and
//! well-formed conversion arrays. These checks reject configurations that
//! break those assumptions before they can be used.

use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::error::{EngineError, EngineResult};

use super::types::{ConversionTable, LanguagePoints, ScoringSections};

/// Highest proficiency level on the standardized scale.
pub const MAX_PROFICIENCY_LEVEL: u8 = 12;

/// Lowest proficiency level that can earn language points.
pub const MIN_SCORED_LEVEL: u8 = 4;

/// Runs every table check over the sections.
pub(crate) fn validate(sections: &ScoringSections) -> EngineResult<()> {
    for (test, tables) in &sections.language_conversion.0 {
        for (skill, table) in tables.iter() {
            conversion_table(
                &format!("language_conversion.{:?}.{}", test, skill.as_str()),
                table,
            )?;
        }
    }

    let core = &sections.core;
    strictly_increasing("core.age", core.age.iter().map(|row| row.age))?;
    unique_keys("core.education", core.education.iter().map(|row| row.level))?;
    language_points("core.language", &core.language)?;
    language_points("core.language_with_spouse", &core.language_with_spouse)?;
    language_points("core.second_language", &core.second_language)?;
    strictly_increasing(
        "core.work_experience.foreign",
        core.work_experience.foreign.iter().map(|row| row.years),
    )?;
    strictly_increasing(
        "core.work_experience.canadian",
        core.work_experience.canadian.iter().map(|row| row.years),
    )?;

    let spouse = &sections.spouse;
    unique_keys(
        "spouse.education",
        spouse.education.iter().map(|row| row.level),
    )?;
    language_points("spouse.language", &spouse.language)?;
    unique_keys(
        "spouse.work_experience",
        spouse.work_experience.iter().map(|row| row.years),
    )?;

    let transferability = &sections.transferability;
    unique_keys(
        "transferability.education_language",
        transferability.education_language.iter().map(|row| row.level),
    )?;
    unique_keys(
        "transferability.foreign_experience_language",
        transferability
            .foreign_experience_language
            .iter()
            .map(|row| row.years),
    )?;
    unique_keys(
        "transferability.canadian_foreign_experience",
        transferability
            .canadian_foreign_experience
            .iter()
            .map(|row| (row.canadian_years, row.foreign_years)),
    )?;
    unique_keys(
        "transferability.canadian_experience_education",
        transferability
            .canadian_experience_education
            .iter()
            .map(|row| (row.canadian_years, row.level)),
    )?;

    unique_keys(
        "additional.canadian_education",
        sections
            .additional
            .canadian_education
            .iter()
            .map(|row| row.level),
    )?;

    let programs = &sections.programs;
    level_in_range(
        "programs.skilled_worker.language_floor",
        programs.skilled_worker.language_floor,
    )?;
    level_in_range(
        "programs.canadian_experience.strict_language_floor",
        programs.canadian_experience.strict_language_floor,
    )?;
    level_in_range(
        "programs.canadian_experience.relaxed_language_floor",
        programs.canadian_experience.relaxed_language_floor,
    )?;
    for (skill, floor) in programs.skilled_trades.language_floors.iter() {
        level_in_range(
            &format!("programs.skilled_trades.language_floors.{}", skill.as_str()),
            *floor,
        )?;
    }

    Ok(())
}

/// Conversion arrays must be non-empty, parallel and non-decreasing.
pub(crate) fn conversion_table(table: &str, conversion: &ConversionTable) -> EngineResult<()> {
    if conversion.thresholds.is_empty() {
        return Err(EngineError::invalid_config(table, "thresholds must not be empty"));
    }

    if conversion.thresholds.len() != conversion.levels.len() {
        return Err(EngineError::invalid_config(
            table,
            format!(
                "{} thresholds but {} levels",
                conversion.thresholds.len(),
                conversion.levels.len()
            ),
        ));
    }

    if conversion.thresholds.windows(2).any(|pair| pair[0] > pair[1]) {
        return Err(EngineError::invalid_config(
            table,
            "thresholds must be non-decreasing",
        ));
    }

    if conversion.levels.windows(2).any(|pair| pair[0] > pair[1]) {
        return Err(EngineError::invalid_config(
            table,
            "levels must be non-decreasing",
        ));
    }

    if let Some(level) = conversion
        .levels
        .iter()
        .find(|level| **level > MAX_PROFICIENCY_LEVEL)
    {
        return Err(EngineError::invalid_config(
            table,
            format!("level {} exceeds {}", level, MAX_PROFICIENCY_LEVEL),
        ));
    }

    Ok(())
}

/// Interpolation keys must be present and strictly increasing.
pub(crate) fn strictly_increasing(
    table: &str,
    keys: impl IntoIterator<Item = u32>,
) -> EngineResult<()> {
    let keys: Vec<u32> = keys.into_iter().collect();

    if keys.is_empty() {
        return Err(EngineError::invalid_config(table, "table must not be empty"));
    }

    if let Some(pair) = keys.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(EngineError::invalid_config(
            table,
            format!(
                "keys must be strictly increasing, found {} followed by {}",
                pair[0], pair[1]
            ),
        ));
    }

    Ok(())
}

/// Lookup tables allow at most one row per key.
pub(crate) fn unique_keys<K: Ord + Debug>(
    table: &str,
    keys: impl IntoIterator<Item = K>,
) -> EngineResult<()> {
    let mut seen = BTreeSet::new();
    for key in keys {
        let message = format!("duplicate row for key {:?}", key);
        if !seen.insert(key) {
            return Err(EngineError::invalid_config(table, message));
        }
    }
    Ok(())
}

fn language_points(table: &str, points: &LanguagePoints) -> EngineResult<()> {
    for (skill, columns) in points.iter() {
        if let Some(level) = columns
            .keys()
            .find(|level| !(MIN_SCORED_LEVEL..=MAX_PROFICIENCY_LEVEL).contains(*level))
        {
            return Err(EngineError::invalid_config(
                format!("{}.{}", table, skill.as_str()),
                format!(
                    "level {} outside {}..={}",
                    level, MIN_SCORED_LEVEL, MAX_PROFICIENCY_LEVEL
                ),
            ));
        }
    }
    Ok(())
}

fn level_in_range(table: &str, level: u8) -> EngineResult<()> {
    if level > MAX_PROFICIENCY_LEVEL {
        return Err(EngineError::invalid_config(
            table,
            format!("level {} exceeds {}", level, MAX_PROFICIENCY_LEVEL),
        ));
    }
    Ok(())
}
