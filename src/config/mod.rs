//! Configuration loading and management for the CRS scoring engine.
//!
//! This module provides functionality to load scoring tables from YAML files,
//! including language conversion tables, point tables for every factor,
//! program minimums and the external cutoff history. Every table is checked
//! when it is loaded; scoring never sees a malformed configuration.
//!
//! # Example
//!
//! ```no_run
//! use crs_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/crs").unwrap();
//! println!("Loaded tables: {}", loader.config().metadata().name);
//! ```

mod loader;
mod types;
mod validation;

pub use loader::{
    ADDITIONAL_POINTS_FILE, CORE_POINTS_FILE, CUTOFFS_FILE, ConfigLoader,
    LANGUAGE_CONVERSION_FILE, METADATA_FILE, PROGRAMS_FILE, SPOUSE_POINTS_FILE,
    TRANSFERABILITY_FILE,
};
pub use types::{
    AdditionalPoints, AgeRow, ArrangedEmploymentPoints, CanadianEducationPoints,
    CanadianEducationRow, CanadianExperienceMinimums, CanadianForeignRow, ConfigMetadata,
    ConversionTable, CorePoints, EducationRow, EducationTierRow, ExperienceRow,
    ExperienceTierRow, FrenchLanguageBonus, LanguageConversion, LanguagePoints,
    ProgramMinimums, ScoringConfig, ScoringSections, SkilledTradesMinimums,
    SkilledWorkerMinimums, SpouseColumns, SpouseEducationRow, SpouseExperienceRow, SpousePoints,
    TradesCertificationPoints, TransferabilityPoints, WorkExperiencePoints,
};
pub use validation::{MAX_PROFICIENCY_LEVEL, MIN_SCORED_LEVEL};
