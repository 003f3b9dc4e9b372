//! Language skills and the per-skill container used across the engine.

use serde::{Deserialize, Serialize};

/// One of the four abilities every language test reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    /// Speaking ability.
    Speaking,
    /// Listening ability.
    Listening,
    /// Reading ability.
    Reading,
    /// Writing ability.
    Writing,
}

impl Skill {
    /// All four skills in reporting order.
    pub const ALL: [Skill; 4] = [
        Skill::Speaking,
        Skill::Listening,
        Skill::Reading,
        Skill::Writing,
    ];

    /// The snake_case name used in configuration and audit output.
    pub fn as_str(self) -> &'static str {
        match self {
            Skill::Speaking => "speaking",
            Skill::Listening => "listening",
            Skill::Reading => "reading",
            Skill::Writing => "writing",
        }
    }
}

/// A value for each of the four skills.
///
/// Used for raw-score conversion tables, point tables keyed by skill,
/// per-skill program floors, and derived proficiency levels.
///
/// # Example
///
/// ```
/// use crs_engine::models::{PerSkill, Skill};
///
/// let levels = PerSkill::uniform(7u8);
/// assert!(levels.all_at_least(7));
/// assert_eq!(*levels.get(Skill::Reading), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerSkill<T> {
    /// Value for speaking.
    pub speaking: T,
    /// Value for listening.
    pub listening: T,
    /// Value for reading.
    pub reading: T,
    /// Value for writing.
    pub writing: T,
}

impl<T> PerSkill<T> {
    /// Returns the value for one skill.
    pub fn get(&self, skill: Skill) -> &T {
        match skill {
            Skill::Speaking => &self.speaking,
            Skill::Listening => &self.listening,
            Skill::Reading => &self.reading,
            Skill::Writing => &self.writing,
        }
    }

    /// Iterates `(skill, value)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Skill, &T)> {
        Skill::ALL.into_iter().map(move |skill| (skill, self.get(skill)))
    }

    /// Builds a new container by applying `f` to every skill.
    pub fn map<U>(&self, mut f: impl FnMut(Skill, &T) -> U) -> PerSkill<U> {
        PerSkill {
            speaking: f(Skill::Speaking, &self.speaking),
            listening: f(Skill::Listening, &self.listening),
            reading: f(Skill::Reading, &self.reading),
            writing: f(Skill::Writing, &self.writing),
        }
    }
}

impl<T: Clone> PerSkill<T> {
    /// The same value for all four skills.
    pub fn uniform(value: T) -> Self {
        Self {
            speaking: value.clone(),
            listening: value.clone(),
            reading: value.clone(),
            writing: value,
        }
    }
}

/// Standardized proficiency levels (CLB/NCLC) for the four skills.
///
/// A level of 0 means the skill was not evaluated or fell below the
/// lowest conversion threshold.
pub type ProficiencyLevels = PerSkill<u8>;

impl PerSkill<u8> {
    /// True when every skill is at or above `floor`.
    pub fn all_at_least(&self, floor: u8) -> bool {
        self.iter().all(|(_, level)| *level >= floor)
    }

    /// True when each skill meets its own floor.
    pub fn meets_floors(&self, floors: &PerSkill<u8>) -> bool {
        self.iter().all(|(skill, level)| *level >= *floors.get(skill))
    }

    /// The weakest of the four levels.
    pub fn lowest(&self) -> u8 {
        self.iter().map(|(_, level)| *level).min().unwrap_or(0)
    }
}
