//! Candidate profile model and related enums.
//!
//! A [`CandidateProfile`] is built from user input for one scoring call
//! and never mutated by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::skill::{PerSkill, Skill};

/// Marital status; selects the with-spouse or without-spouse point columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    /// No accompanying spouse or partner.
    #[default]
    Single,
    /// Married or common-law, with the spouse accompanying.
    Married,
}

/// Highest completed level of education, in ascending order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    /// Less than secondary school.
    #[default]
    None,
    /// Secondary school diploma.
    Secondary,
    /// One-year post-secondary program.
    OneYearPostSecondary,
    /// Two-year post-secondary program.
    TwoYearPostSecondary,
    /// Bachelor's degree or a post-secondary program of three years or more.
    Bachelors,
    /// Two or more credentials, at least one of three years or more.
    TwoOrMoreCredentials,
    /// Master's degree or entry-to-practice professional degree.
    Masters,
    /// Doctoral degree.
    Doctoral,
}

impl EducationLevel {
    /// Every level in ascending order.
    pub const ALL: [EducationLevel; 8] = [
        EducationLevel::None,
        EducationLevel::Secondary,
        EducationLevel::OneYearPostSecondary,
        EducationLevel::TwoYearPostSecondary,
        EducationLevel::Bachelors,
        EducationLevel::TwoOrMoreCredentials,
        EducationLevel::Masters,
        EducationLevel::Doctoral,
    ];

    /// True only for [`EducationLevel::None`], the bottom of the scale.
    pub fn is_lowest(self) -> bool {
        self == EducationLevel::None
    }
}

/// Education completed in Canada, for the additional-points bonus.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CanadianEducation {
    /// No Canadian credential.
    #[default]
    None,
    /// A one- or two-year Canadian post-secondary credential.
    OneOrTwoYear,
    /// A Canadian credential of three years or longer.
    ThreeYearOrLonger,
}

/// Broad language family of a test; drives the French bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageFamily {
    /// English-language test.
    English,
    /// French-language test.
    French,
}

/// An approved language test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageTest {
    /// IELTS General Training (band scores 0-9 in half steps).
    IeltsGeneral,
    /// CELPIP General (levels 1-12).
    CelpipGeneral,
    /// PTE Core (10-90).
    PteCore,
    /// TEF Canada (0-699 per skill).
    TefCanada,
    /// TCF Canada (0-699 comprehension, 0-20 expression).
    TcfCanada,
}

impl LanguageTest {
    /// The language family the test certifies.
    pub fn family(self) -> LanguageFamily {
        match self {
            LanguageTest::IeltsGeneral | LanguageTest::CelpipGeneral | LanguageTest::PteCore => {
                LanguageFamily::English
            }
            LanguageTest::TefCanada | LanguageTest::TcfCanada => LanguageFamily::French,
        }
    }
}

/// Raw results of one language test.
///
/// A score of zero means the skill was not entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageScores {
    /// The test these scores come from.
    pub test: LanguageTest,
    /// Raw speaking score.
    pub speaking: Decimal,
    /// Raw listening score.
    pub listening: Decimal,
    /// Raw reading score.
    pub reading: Decimal,
    /// Raw writing score.
    pub writing: Decimal,
}

impl LanguageScores {
    /// Creates scores for a test, one per skill.
    pub fn new(
        test: LanguageTest,
        speaking: Decimal,
        listening: Decimal,
        reading: Decimal,
        writing: Decimal,
    ) -> Self {
        Self {
            test,
            speaking,
            listening,
            reading,
            writing,
        }
    }

    /// The same raw score on all four skills.
    pub fn uniform(test: LanguageTest, score: Decimal) -> Self {
        Self::new(test, score, score, score, score)
    }

    /// The raw score for one skill.
    pub fn raw(&self, skill: Skill) -> Decimal {
        match skill {
            Skill::Speaking => self.speaking,
            Skill::Listening => self.listening,
            Skill::Reading => self.reading,
            Skill::Writing => self.writing,
        }
    }

    /// The raw scores as a per-skill container.
    pub fn as_per_skill(&self) -> PerSkill<Decimal> {
        PerSkill {
            speaking: self.speaking,
            listening: self.listening,
            reading: self.reading,
            writing: self.writing,
        }
    }
}

/// Category of a qualifying offer of arranged employment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOffer {
    /// No job offer.
    #[default]
    None,
    /// Senior management occupation.
    SeniorManagement,
    /// Any other skilled occupation category.
    SkilledCategory,
    /// An offer outside the skilled categories.
    Other,
}

/// Declared occupation category (TEER) of the candidate's experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupationTeer {
    /// Management occupations.
    Teer0,
    /// Occupations usually requiring a university degree.
    #[default]
    Teer1,
    /// Occupations usually requiring a college diploma or apprenticeship of two years or more.
    Teer2,
    /// Occupations usually requiring a shorter diploma or apprenticeship.
    Teer3,
}

impl OccupationTeer {
    /// Management and management-adjacent categories (TEER 0 and 1).
    pub fn is_management_adjacent(self) -> bool {
        matches!(self, OccupationTeer::Teer0 | OccupationTeer::Teer1)
    }
}

/// A candidate profile submitted for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    /// Age in whole years.
    pub age: u32,
    /// Marital status.
    pub marital_status: MaritalStatus,
    /// Highest completed education.
    pub education: EducationLevel,
    /// Highest education completed in Canada.
    pub canadian_education: CanadianEducation,
    /// First official language results.
    pub first_language: LanguageScores,
    /// Second official language results, if a second test was taken.
    pub second_language: Option<LanguageScores>,
    /// Years of skilled work experience in Canada.
    pub canadian_work_experience: Decimal,
    /// Years of skilled work experience outside Canada.
    pub foreign_work_experience: Decimal,
    /// Occupation category of the candidate's experience.
    pub occupation: OccupationTeer,
    /// Spouse's highest completed education.
    pub spouse_education: EducationLevel,
    /// Spouse's first official language results.
    pub spouse_language: Option<LanguageScores>,
    /// Spouse's years of Canadian work experience.
    pub spouse_work_experience: Decimal,
    /// Holds a provincial or territorial nomination.
    pub provincial_nomination: bool,
    /// Category of any arranged-employment offer.
    pub job_offer: JobOffer,
    /// Has a sibling living in Canada who is a citizen or permanent resident.
    pub canadian_sibling: bool,
    /// Holds a certificate of qualification in a trade.
    pub trades_certification: bool,
}

impl CandidateProfile {
    /// True when scoring should use the with-spouse columns and spouse factors.
    pub fn is_married(&self) -> bool {
        self.marital_status == MaritalStatus::Married
    }
}
