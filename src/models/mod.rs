//! Core data models for the CRS scoring engine.
//!
//! This module contains the candidate profile, the per-skill container,
//! program identifiers with their external cutoffs, and the score result.

mod profile;
mod program;
mod score_result;
mod skill;

pub use profile::{
    CandidateProfile, CanadianEducation, EducationLevel, JobOffer, LanguageFamily,
    LanguageScores, LanguageTest, MaritalStatus, OccupationTeer,
};
pub use program::{CutoffDraw, CutoffScores, ProgramId};
pub use score_result::{
    AdditionalBreakdown, AuditStep, AuditTrace, AuditWarning, CoreBreakdown, CutoffComparison,
    EligibilityCheck, LOOKUP_MISS, ProficiencySummary, ProgramEligibility, ScoreResult,
    ScoreSection, SpouseBreakdown, TransferabilityBreakdown, VALUE_CLAMPED,
};
pub use skill::{PerSkill, ProficiencyLevels, Skill};
