//! Calculation logic for the CRS scoring engine.
//!
//! This module contains the language proficiency converter, piecewise
//! interpolation, the core human-capital, spouse, skill transferability and
//! additional points calculators, the program eligibility gates, the cutoff
//! comparator, and the [`score`] pipeline that ties them together.

mod additional_points;
mod core_points;
mod cutoff_comparison;
mod eligibility;
mod interpolation;
mod language_conversion;
mod scoring;
mod spouse_points;
mod transferability;

#[cfg(test)]
pub(crate) mod test_support;

pub use additional_points::{
    AdditionalPointsResult, ENGLISH_DUAL_FLOOR, FRENCH_FLOOR, FrenchConditions,
    calculate_additional_points, french_conditions,
};
pub use core_points::{CorePointsResult, LanguagePointsLookup, calculate_core_points, language_points};
pub use cutoff_comparison::{CutoffComparisonResult, compare_to_cutoff, compare_to_cutoffs};
pub use eligibility::{EligibilityResult, evaluate_eligibility};
pub use interpolation::{
    ClampSide, Interpolation, capped_whole_years, interpolate, saturating_sum,
};
pub use language_conversion::{ProficiencyConversionResult, convert_language, convert_raw_score};
pub use scoring::{ENGINE_VERSION, compute_score, score};
pub use spouse_points::{SpousePointsResult, calculate_spouse_points};
pub use transferability::{
    CANADIAN_EDUCATION_COMBINATION_YEAR_CAP, LanguageTier, TIER_7_FLOOR, TIER_9_FLOOR,
    TRADES_TIER_5_FLOOR, TRANSFERABILITY_CAP, TransferabilityResult, calculate_transferability,
};
