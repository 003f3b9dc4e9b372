//! Shared fixtures for calculator tests.

use rust_decimal::Decimal;

use crate::config::{ConfigLoader, ScoringConfig};
use crate::models::{
    CandidateProfile, CanadianEducation, CutoffScores, EducationLevel, JobOffer, LanguageScores,
    LanguageTest, MaritalStatus, OccupationTeer, PerSkill, ProficiencyLevels,
};

pub(crate) fn default_config() -> ScoringConfig {
    ConfigLoader::embedded().unwrap().into_parts().0
}

pub(crate) fn default_cutoffs() -> CutoffScores {
    ConfigLoader::embedded().unwrap().into_parts().1
}

pub(crate) fn levels(level: u8) -> ProficiencyLevels {
    PerSkill::uniform(level)
}

/// CELPIP raw scores equal their proficiency level.
pub(crate) fn celpip(level: u32) -> LanguageScores {
    LanguageScores::uniform(LanguageTest::CelpipGeneral, Decimal::from(level))
}

/// Age 30, bachelor's degree, level 9 English, 3 years foreign experience.
pub(crate) fn single_candidate() -> CandidateProfile {
    CandidateProfile {
        age: 30,
        marital_status: MaritalStatus::Single,
        education: EducationLevel::Bachelors,
        canadian_education: CanadianEducation::None,
        first_language: celpip(9),
        second_language: None,
        canadian_work_experience: Decimal::ZERO,
        foreign_work_experience: Decimal::from(3),
        occupation: OccupationTeer::Teer1,
        spouse_education: EducationLevel::None,
        spouse_language: None,
        spouse_work_experience: Decimal::ZERO,
        provincial_nomination: false,
        job_offer: JobOffer::None,
        canadian_sibling: false,
        trades_certification: false,
    }
}

pub(crate) fn married_candidate() -> CandidateProfile {
    CandidateProfile {
        marital_status: MaritalStatus::Married,
        spouse_education: EducationLevel::Secondary,
        ..single_candidate()
    }
}
