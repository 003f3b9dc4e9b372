//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading scoring
//! configurations from YAML files, either from a directory on disk or from
//! the default tables compiled into the crate.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{CutoffDraw, CutoffScores};

use super::types::{
    AdditionalPoints, ConfigMetadata, CorePoints, LanguageConversion, ProgramMinimums,
    ScoringConfig, ScoringSections, SpousePoints, TransferabilityPoints,
};

/// Version metadata file.
pub const METADATA_FILE: &str = "metadata.yaml";
/// Raw score conversion tables file.
pub const LANGUAGE_CONVERSION_FILE: &str = "language_conversion.yaml";
/// Core human-capital tables file.
pub const CORE_POINTS_FILE: &str = "core_points.yaml";
/// Spouse tables file.
pub const SPOUSE_POINTS_FILE: &str = "spouse_points.yaml";
/// Skill transferability tables file.
pub const TRANSFERABILITY_FILE: &str = "transferability.yaml";
/// Additional bonuses file.
pub const ADDITIONAL_POINTS_FILE: &str = "additional_points.yaml";
/// Program thresholds file.
pub const PROGRAMS_FILE: &str = "programs.yaml";
/// Optional cutoff draw history file.
pub const CUTOFFS_FILE: &str = "cutoffs.yaml";

const EMBEDDED: [(&str, &str); 8] = [
    (METADATA_FILE, include_str!("../../config/crs/metadata.yaml")),
    (
        LANGUAGE_CONVERSION_FILE,
        include_str!("../../config/crs/language_conversion.yaml"),
    ),
    (CORE_POINTS_FILE, include_str!("../../config/crs/core_points.yaml")),
    (
        SPOUSE_POINTS_FILE,
        include_str!("../../config/crs/spouse_points.yaml"),
    ),
    (
        TRANSFERABILITY_FILE,
        include_str!("../../config/crs/transferability.yaml"),
    ),
    (
        ADDITIONAL_POINTS_FILE,
        include_str!("../../config/crs/additional_points.yaml"),
    ),
    (PROGRAMS_FILE, include_str!("../../config/crs/programs.yaml")),
    (CUTOFFS_FILE, include_str!("../../config/crs/cutoffs.yaml")),
];

/// Cutoff history file structure.
#[derive(Debug, Deserialize)]
struct CutoffsFile {
    #[serde(default)]
    draws: Vec<CutoffDraw>,
}

/// Loads and provides access to a scoring configuration.
///
/// # Directory Structure
///
/// ```text
/// config/crs/
/// ├── metadata.yaml            # Name, version, effective date
/// ├── language_conversion.yaml # Raw score -> proficiency level tables
/// ├── core_points.yaml         # Age, education, language, experience
/// ├── spouse_points.yaml       # Spouse factors
/// ├── transferability.yaml     # Skill transferability combinations
/// ├── additional_points.yaml   # Flat bonuses
/// ├── programs.yaml            # Program minimums
/// └── cutoffs.yaml             # Optional draw history
/// ```
///
/// # Example
///
/// ```no_run
/// use crs_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/crs")?;
/// println!("Loaded tables: {}", loader.config().metadata().version);
/// # Ok::<(), crs_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ScoringConfig,
    cutoffs: CutoffScores,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - Any table violates a structural invariant (`InvalidConfig`)
    ///
    /// A missing `cutoffs.yaml` is not an error; every cutoff is then unknown.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let sections = ScoringSections {
            metadata: Self::load_yaml::<ConfigMetadata>(&path.join(METADATA_FILE))?,
            language_conversion: Self::load_yaml::<LanguageConversion>(
                &path.join(LANGUAGE_CONVERSION_FILE),
            )?,
            core: Self::load_yaml::<CorePoints>(&path.join(CORE_POINTS_FILE))?,
            spouse: Self::load_yaml::<SpousePoints>(&path.join(SPOUSE_POINTS_FILE))?,
            transferability: Self::load_yaml::<TransferabilityPoints>(
                &path.join(TRANSFERABILITY_FILE),
            )?,
            additional: Self::load_yaml::<AdditionalPoints>(&path.join(ADDITIONAL_POINTS_FILE))?,
            programs: Self::load_yaml::<ProgramMinimums>(&path.join(PROGRAMS_FILE))?,
        };
        let config = ScoringConfig::new(sections)?;

        let cutoffs_path = path.join(CUTOFFS_FILE);
        let cutoffs = if cutoffs_path.exists() {
            Self::load_cutoffs(&cutoffs_path)?
        } else {
            CutoffScores::new()
        };

        debug!(
            path = %path.display(),
            version = %config.metadata().version,
            cutoffs = cutoffs.len(),
            "Loaded scoring configuration"
        );

        Ok(Self { config, cutoffs })
    }

    /// Loads the default tables compiled into the crate.
    pub fn embedded() -> EngineResult<Self> {
        let source = |name: &str| {
            EMBEDDED
                .iter()
                .find(|(file, _)| *file == name)
                .map(|(_, content)| *content)
                .ok_or_else(|| EngineError::ConfigNotFound {
                    path: format!("embedded:{}", name),
                })
        };

        let sections = ScoringSections {
            metadata: Self::parse_yaml(METADATA_FILE, source(METADATA_FILE)?)?,
            language_conversion: Self::parse_yaml(
                LANGUAGE_CONVERSION_FILE,
                source(LANGUAGE_CONVERSION_FILE)?,
            )?,
            core: Self::parse_yaml(CORE_POINTS_FILE, source(CORE_POINTS_FILE)?)?,
            spouse: Self::parse_yaml(SPOUSE_POINTS_FILE, source(SPOUSE_POINTS_FILE)?)?,
            transferability: Self::parse_yaml(
                TRANSFERABILITY_FILE,
                source(TRANSFERABILITY_FILE)?,
            )?,
            additional: Self::parse_yaml(ADDITIONAL_POINTS_FILE, source(ADDITIONAL_POINTS_FILE)?)?,
            programs: Self::parse_yaml(PROGRAMS_FILE, source(PROGRAMS_FILE)?)?,
        };
        let config = ScoringConfig::new(sections)?;

        let cutoffs_file: CutoffsFile = Self::parse_yaml(CUTOFFS_FILE, source(CUTOFFS_FILE)?)?;
        let cutoffs = CutoffScores::from_draws(&cutoffs_file.draws);

        Ok(Self { config, cutoffs })
    }

    /// Loads a cutoff draw history file and keeps the latest draw per program.
    pub fn load_cutoffs<P: AsRef<Path>>(path: P) -> EngineResult<CutoffScores> {
        let file = Self::load_yaml::<CutoffsFile>(path.as_ref())?;
        Ok(CutoffScores::from_draws(&file.draws))
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&path_str, &content)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(label: &str, content: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: label.to_string(),
            message: e.to_string(),
        })
    }

    /// Pairs an already validated configuration with cutoffs.
    pub fn from_parts(config: ScoringConfig, cutoffs: CutoffScores) -> Self {
        Self { config, cutoffs }
    }

    /// Returns the validated scoring configuration.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Returns the cutoffs loaded alongside the configuration.
    pub fn cutoffs(&self) -> &CutoffScores {
        &self.cutoffs
    }

    /// Splits the loader into its configuration and cutoffs.
    pub fn into_parts(self) -> (ScoringConfig, CutoffScores) {
        (self.config, self.cutoffs)
    }
}
