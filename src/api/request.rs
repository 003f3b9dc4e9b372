//! Request types for the CRS scoring engine API.
//!
//! This module defines the JSON request structures for the `/score` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::models::{
    CandidateProfile, CanadianEducation, CutoffScores, EducationLevel, JobOffer, LanguageScores,
    MaritalStatus, OccupationTeer,
};

/// Request body for the `/score` endpoint.
///
/// The configuration and cutoffs are optional; when omitted, the session
/// configuration and cutoffs loaded at startup are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    /// The candidate profile to score.
    pub profile: ProfileRequest,
    /// A configuration snapshot, validated on deserialization.
    #[serde(default)]
    pub config: Option<ScoringConfig>,
    /// Cutoffs per program; `null` entries are unknown.
    #[serde(default)]
    pub cutoffs: Option<CutoffScores>,
}

/// Candidate profile in a score request.
///
/// Only age, education and the first language are required; every other
/// factor defaults to its "none" value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest {
    /// Age in whole years.
    pub age: u32,
    /// Marital status.
    #[serde(default)]
    pub marital_status: MaritalStatus,
    /// Highest completed education.
    pub education: EducationLevel,
    /// Highest education completed in Canada.
    #[serde(default)]
    pub canadian_education: CanadianEducation,
    /// First official language results.
    pub first_language: LanguageScores,
    /// Second official language results.
    #[serde(default)]
    pub second_language: Option<LanguageScores>,
    /// Years of Canadian skilled work experience.
    #[serde(default)]
    pub canadian_work_experience: Decimal,
    /// Years of foreign skilled work experience.
    #[serde(default)]
    pub foreign_work_experience: Decimal,
    /// Occupation category of the candidate's experience.
    #[serde(default)]
    pub occupation: OccupationTeer,
    /// Spouse's highest completed education.
    #[serde(default)]
    pub spouse_education: EducationLevel,
    /// Spouse's language results.
    #[serde(default)]
    pub spouse_language: Option<LanguageScores>,
    /// Spouse's years of Canadian work experience.
    #[serde(default)]
    pub spouse_work_experience: Decimal,
    /// Holds a provincial nomination.
    #[serde(default)]
    pub provincial_nomination: bool,
    /// Arranged employment category.
    #[serde(default)]
    pub job_offer: JobOffer,
    /// Has a sibling in Canada.
    #[serde(default)]
    pub canadian_sibling: bool,
    /// Holds a trades certificate of qualification.
    #[serde(default)]
    pub trades_certification: bool,
}

impl From<ProfileRequest> for CandidateProfile {
    fn from(req: ProfileRequest) -> Self {
        CandidateProfile {
            age: req.age,
            marital_status: req.marital_status,
            education: req.education,
            canadian_education: req.canadian_education,
            first_language: req.first_language,
            second_language: req.second_language,
            canadian_work_experience: req.canadian_work_experience,
            foreign_work_experience: req.foreign_work_experience,
            occupation: req.occupation,
            spouse_education: req.spouse_education,
            spouse_language: req.spouse_language,
            spouse_work_experience: req.spouse_work_experience,
            provincial_nomination: req.provincial_nomination,
            job_offer: req.job_offer,
            canadian_sibling: req.canadian_sibling,
            trades_certification: req.trades_certification,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LanguageTest, ProgramId};

    #[test]
    fn test_deserialize_minimal_score_request() {
        let json = r#"{
            "profile": {
                "age": 30,
                "education": "bachelors",
                "first_language": {
                    "test": "ielts_general",
                    "speaking": "7.0",
                    "listening": "8.0",
                    "reading": "7.0",
                    "writing": "7.0"
                }
            }
        }"#;

        let request: ScoreRequest = serde_json::from_str(json).unwrap();
        assert!(request.config.is_none());
        assert!(request.cutoffs.is_none());

        let profile: CandidateProfile = request.profile.into();
        assert_eq!(profile.age, 30);
        assert_eq!(profile.marital_status, MaritalStatus::Single);
        assert_eq!(profile.first_language.test, LanguageTest::IeltsGeneral);
        assert_eq!(profile.foreign_work_experience, Decimal::ZERO);
        assert_eq!(profile.occupation, OccupationTeer::Teer1);
        assert!(profile.second_language.is_none());
        assert_eq!(profile.job_offer, JobOffer::None);
    }

    #[test]
    fn test_deserialize_full_profile() {
        let json = r#"{
            "profile": {
                "age": 34,
                "marital_status": "married",
                "education": "masters",
                "canadian_education": "one_or_two_year",
                "first_language": { "test": "tef_canada", "speaking": 460, "listening": 460, "reading": 460, "writing": 460 },
                "second_language": { "test": "celpip_general", "speaking": 5, "listening": 5, "reading": 5, "writing": 5 },
                "canadian_work_experience": "1.5",
                "foreign_work_experience": 2,
                "occupation": "teer3",
                "spouse_education": "bachelors",
                "spouse_work_experience": 1,
                "provincial_nomination": true,
                "job_offer": "senior_management",
                "canadian_sibling": true,
                "trades_certification": true
            }
        }"#;

        let request: ScoreRequest = serde_json::from_str(json).unwrap();
        let profile: CandidateProfile = request.profile.into();

        assert!(profile.is_married());
        assert_eq!(profile.canadian_work_experience, Decimal::new(15, 1));
        assert_eq!(profile.occupation, OccupationTeer::Teer3);
        assert_eq!(profile.job_offer, JobOffer::SeniorManagement);
        assert!(profile.trades_certification);
    }

    #[test]
    fn test_deserialize_cutoffs_with_unknown() {
        let json = r#"{
            "profile": {
                "age": 30,
                "education": "bachelors",
                "first_language": { "test": "celpip_general", "speaking": 9, "listening": 9, "reading": 9, "writing": 9 }
            },
            "cutoffs": { "canadian_experience": 529, "skilled_trades": null }
        }"#;

        let request: ScoreRequest = serde_json::from_str(json).unwrap();
        let cutoffs = request.cutoffs.unwrap();

        assert_eq!(cutoffs.get(ProgramId::CanadianExperience), Some(529));
        assert_eq!(cutoffs.get(ProgramId::SkilledTrades), None);
        assert_eq!(cutoffs.len(), 2);
    }

    #[test]
    fn test_missing_first_language_is_rejected() {
        let json = r#"{ "profile": { "age": 30, "education": "bachelors" } }"#;
        let err = serde_json::from_str::<ScoreRequest>(json).unwrap_err();
        assert!(err.to_string().contains("missing field `first_language`"));
    }
}
