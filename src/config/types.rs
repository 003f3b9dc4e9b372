//! Configuration types for CRS scoring.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files or from a JSON snapshot.
//! Section structs are plain data; [`ScoringConfig`] is only constructed
//! through validation, so every instance upholds the table invariants.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CanadianEducation, EducationLevel, LanguageTest, PerSkill};

use super::validation;

/// Metadata identifying a configuration version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Human-readable name of the table set.
    pub name: String,
    /// Version label of the table set.
    pub version: String,
    /// Date from which the tables apply.
    pub effective_date: NaiveDate,
    /// Where the tables were sourced from.
    pub source_url: String,
}

/// Parallel ascending arrays mapping raw scores to proficiency levels.
///
/// `thresholds[i]` is the lowest raw score that earns `levels[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionTable {
    /// Raw-score thresholds, non-decreasing, conventionally starting at 0.
    pub thresholds: Vec<Decimal>,
    /// Proficiency level earned at each threshold, non-decreasing.
    pub levels: Vec<u8>,
}

/// Conversion tables per test and skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageConversion(pub BTreeMap<LanguageTest, PerSkill<ConversionTable>>);

impl LanguageConversion {
    /// The per-skill tables for a test, if configured.
    pub fn get(&self, test: LanguageTest) -> Option<&PerSkill<ConversionTable>> {
        self.0.get(&test)
    }
}

/// Points per proficiency level, for each skill.
pub type LanguagePoints = PerSkill<BTreeMap<u8, u32>>;

/// A row of a table with with-spouse and without-spouse columns.
pub trait SpouseColumns {
    /// Points when the candidate has an accompanying spouse.
    fn with_spouse(&self) -> u32;
    /// Points when the candidate is single.
    fn without_spouse(&self) -> u32;

    /// Selects the column for the candidate's marital status.
    fn points_for(&self, married: bool) -> u32 {
        if married {
            self.with_spouse()
        } else {
            self.without_spouse()
        }
    }
}

/// Age points row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRow {
    /// Age in years.
    pub age: u32,
    /// Points with an accompanying spouse.
    pub with_spouse: u32,
    /// Points without a spouse.
    pub without_spouse: u32,
}

/// Education points row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRow {
    /// Education level.
    pub level: EducationLevel,
    /// Points with an accompanying spouse.
    pub with_spouse: u32,
    /// Points without a spouse.
    pub without_spouse: u32,
}

/// Work experience points row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRow {
    /// Years of experience.
    pub years: u32,
    /// Points with an accompanying spouse.
    pub with_spouse: u32,
    /// Points without a spouse.
    pub without_spouse: u32,
}

macro_rules! spouse_columns {
    ($($row:ty),*) => {
        $(impl SpouseColumns for $row {
            fn with_spouse(&self) -> u32 {
                self.with_spouse
            }

            fn without_spouse(&self) -> u32 {
                self.without_spouse
            }
        })*
    };
}

spouse_columns!(AgeRow, EducationRow, ExperienceRow);

/// Interpolated work experience tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperiencePoints {
    /// Foreign experience (reference points only).
    pub foreign: Vec<ExperienceRow>,
    /// Canadian experience.
    pub canadian: Vec<ExperienceRow>,
}

/// Core human-capital tables, from core_points.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorePoints {
    /// Age rows, strictly increasing by age.
    pub age: Vec<AgeRow>,
    /// Education rows, one per level.
    pub education: Vec<EducationRow>,
    /// First-language points for single candidates.
    pub language: LanguagePoints,
    /// First-language points for candidates with a spouse.
    pub language_with_spouse: LanguagePoints,
    /// Second-language points.
    pub second_language: LanguagePoints,
    /// Work experience tables.
    pub work_experience: WorkExperiencePoints,
}

/// Spouse education row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpouseEducationRow {
    /// Education level.
    pub level: EducationLevel,
    /// Points awarded.
    pub points: u32,
}

/// Spouse work experience row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpouseExperienceRow {
    /// Whole years of Canadian experience.
    pub years: u32,
    /// Points awarded.
    pub points: u32,
}

/// Spouse or partner tables, from spouse_points.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpousePoints {
    /// Spouse education rows.
    pub education: Vec<SpouseEducationRow>,
    /// Spouse language points per skill and level.
    pub language: LanguagePoints,
    /// Spouse Canadian experience rows (exact lookup).
    pub work_experience: Vec<SpouseExperienceRow>,
}

/// Education by language-tier row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationTierRow {
    /// Education level.
    pub level: EducationLevel,
    /// Points when all first-language skills are at least 7.
    pub tier7: u32,
    /// Points when all first-language skills are at least 9.
    pub tier9: u32,
}

/// Foreign experience by language-tier row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceTierRow {
    /// Whole years of foreign experience.
    pub years: u32,
    /// Points when all first-language skills are at least 7.
    pub tier7: u32,
    /// Points when all first-language skills are at least 9.
    pub tier9: u32,
}

/// Canadian by foreign experience combination row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanadianForeignRow {
    /// Whole years of Canadian experience.
    pub canadian_years: u32,
    /// Whole years of foreign experience.
    pub foreign_years: u32,
    /// Points awarded.
    pub points: u32,
}

/// Canadian experience by education combination row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanadianEducationRow {
    /// Whole years of Canadian experience.
    pub canadian_years: u32,
    /// Education level.
    pub level: EducationLevel,
    /// Points awarded.
    pub points: u32,
}

/// Trades certification bonuses by first-language tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradesCertificationPoints {
    /// Points when all first-language skills are at least 5.
    pub tier5: u32,
    /// Points when all first-language skills are at least 7.
    pub tier7: u32,
}

/// Skill transferability tables, from transferability.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferabilityPoints {
    /// Education by language tier.
    pub education_language: Vec<EducationTierRow>,
    /// Foreign experience by language tier.
    pub foreign_experience_language: Vec<ExperienceTierRow>,
    /// Canadian by foreign experience combinations.
    pub canadian_foreign_experience: Vec<CanadianForeignRow>,
    /// Canadian experience by education combinations.
    pub canadian_experience_education: Vec<CanadianEducationRow>,
    /// Trades certification bonuses.
    pub trades_certification: TradesCertificationPoints,
}

/// Canadian education bonus row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanadianEducationPoints {
    /// Canadian credential level.
    pub level: CanadianEducation,
    /// Points awarded.
    pub points: u32,
}

/// Arranged employment points per job-offer category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrangedEmploymentPoints {
    /// Senior management offers.
    pub senior_management: u32,
    /// Other skilled category offers.
    pub skilled_category: u32,
    /// Offers outside the skilled categories.
    #[serde(default)]
    pub other: u32,
}

/// French-language bonuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrenchLanguageBonus {
    /// French floor bonus (NCLC 7 on all skills).
    pub only_bonus: u32,
    /// Extended bonus when the other slot is English at CLB 5 or more.
    pub dual_bonus: u32,
}

/// Flat additional bonuses, from additional_points.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalPoints {
    /// Canadian education bonus rows.
    pub canadian_education: Vec<CanadianEducationPoints>,
    /// Provincial nomination bonus.
    pub provincial_nomination: u32,
    /// Arranged employment bonuses.
    pub arranged_employment: ArrangedEmploymentPoints,
    /// Sibling in Canada bonus.
    pub canadian_sibling: u32,
    /// French-language bonuses.
    pub french_language: FrenchLanguageBonus,
}

/// Skilled-worker stream minimums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkilledWorkerMinimums {
    /// Minimum level on all four first-language skills.
    pub language_floor: u8,
    /// Lowest qualifying education level.
    pub min_education: EducationLevel,
    /// Minimum years of foreign experience.
    pub min_foreign_years: Decimal,
    /// Minimum total score.
    pub min_total_points: u32,
}

/// Canadian-experience stream minimums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanadianExperienceMinimums {
    /// Language floor for management-adjacent occupations.
    pub strict_language_floor: u8,
    /// Language floor for other occupations.
    pub relaxed_language_floor: u8,
    /// Minimum years of Canadian experience.
    pub min_canadian_years: Decimal,
}

/// Skilled-trades stream minimums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkilledTradesMinimums {
    /// Independent floor per first-language skill.
    pub language_floors: PerSkill<u8>,
    /// Minimum years of foreign experience.
    pub min_foreign_years: Decimal,
}

/// Program thresholds, from programs.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramMinimums {
    /// Skilled-worker stream.
    pub skilled_worker: SkilledWorkerMinimums,
    /// Canadian-experience stream.
    pub canadian_experience: CanadianExperienceMinimums,
    /// Skilled-trades stream.
    pub skilled_trades: SkilledTradesMinimums,
}

/// All configuration sections before validation.
///
/// This is the shape of a configuration snapshot; converting it into a
/// [`ScoringConfig`] runs every table check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSections {
    /// Version metadata.
    pub metadata: ConfigMetadata,
    /// Raw score conversion tables.
    pub language_conversion: LanguageConversion,
    /// Core human-capital tables.
    pub core: CorePoints,
    /// Spouse tables.
    pub spouse: SpousePoints,
    /// Skill transferability tables.
    pub transferability: TransferabilityPoints,
    /// Additional bonuses.
    pub additional: AdditionalPoints,
    /// Program thresholds.
    pub programs: ProgramMinimums,
}

/// The complete, validated scoring configuration.
///
/// Read-only once built. Deserializing a `ScoringConfig` validates it, so a
/// malformed snapshot is rejected at load time instead of scoring as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScoringSections")]
pub struct ScoringConfig {
    metadata: ConfigMetadata,
    language_conversion: LanguageConversion,
    core: CorePoints,
    spouse: SpousePoints,
    transferability: TransferabilityPoints,
    additional: AdditionalPoints,
    programs: ProgramMinimums,
}

impl ScoringConfig {
    /// Validates the sections and builds a configuration.
    pub fn new(sections: ScoringSections) -> EngineResult<Self> {
        validation::validate(&sections)?;

        let ScoringSections {
            metadata,
            language_conversion,
            core,
            spouse,
            transferability,
            additional,
            programs,
        } = sections;

        Ok(Self {
            metadata,
            language_conversion,
            core,
            spouse,
            transferability,
            additional,
            programs,
        })
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &ConfigMetadata {
        &self.metadata
    }

    /// Returns the language conversion tables.
    pub fn language_conversion(&self) -> &LanguageConversion {
        &self.language_conversion
    }

    /// Returns the core human-capital tables.
    pub fn core(&self) -> &CorePoints {
        &self.core
    }

    /// Returns the spouse tables.
    pub fn spouse(&self) -> &SpousePoints {
        &self.spouse
    }

    /// Returns the skill transferability tables.
    pub fn transferability(&self) -> &TransferabilityPoints {
        &self.transferability
    }

    /// Returns the additional bonuses.
    pub fn additional(&self) -> &AdditionalPoints {
        &self.additional
    }

    /// Returns the program thresholds.
    pub fn programs(&self) -> &ProgramMinimums {
        &self.programs
    }

    /// Returns the sections for editing; rebuild with [`ScoringConfig::new`].
    pub fn into_sections(self) -> ScoringSections {
        ScoringSections {
            metadata: self.metadata,
            language_conversion: self.language_conversion,
            core: self.core,
            spouse: self.spouse,
            transferability: self.transferability,
            additional: self.additional,
            programs: self.programs,
        }
    }
}

impl TryFrom<ScoringSections> for ScoringConfig {
    type Error = EngineError;

    fn try_from(sections: ScoringSections) -> Result<Self, Self::Error> {
        Self::new(sections)
    }
}
