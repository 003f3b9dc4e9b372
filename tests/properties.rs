//! Property tests for the scoring pipeline.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crs_engine::calculation::{capped_whole_years, compute_score, convert_raw_score, interpolate};
use crs_engine::config::{ConfigLoader, ScoringConfig};
use crs_engine::models::{
    CandidateProfile, CanadianEducation, CutoffScores, EducationLevel, JobOffer, LanguageScores,
    LanguageTest, MaritalStatus, OccupationTeer, Skill,
};

const TESTS: [LanguageTest; 5] = [
    LanguageTest::IeltsGeneral,
    LanguageTest::CelpipGeneral,
    LanguageTest::PteCore,
    LanguageTest::TefCanada,
    LanguageTest::TcfCanada,
];

const JOB_OFFERS: [JobOffer; 4] = [
    JobOffer::None,
    JobOffer::SeniorManagement,
    JobOffer::SkilledCategory,
    JobOffer::Other,
];

const TEERS: [OccupationTeer; 4] = [
    OccupationTeer::Teer0,
    OccupationTeer::Teer1,
    OccupationTeer::Teer2,
    OccupationTeer::Teer3,
];

const CANADIAN_EDUCATION: [CanadianEducation; 3] = [
    CanadianEducation::None,
    CanadianEducation::OneOrTwoYear,
    CanadianEducation::ThreeYearOrLonger,
];

fn config() -> ScoringConfig {
    ConfigLoader::embedded().unwrap().into_parts().0
}

fn cutoffs() -> CutoffScores {
    ConfigLoader::embedded().unwrap().into_parts().1
}

/// A table value: mostly realistic, sometimes at or near `u32::MAX`.
fn point_value() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => 0u32..=200,
        1 => Just(u32::MAX),
        1 => any::<u32>(),
    ]
}

/// The default tables with every transferability and additional point
/// value replaced.
fn scoring_config() -> impl Strategy<Value = ScoringConfig> {
    proptest::collection::vec(point_value(), 64).prop_map(|values| {
        let mut values = values.into_iter().cycle();
        let mut next = move || values.next().unwrap_or_default();
        let mut sections = config().into_sections();

        let transferability = &mut sections.transferability;
        for row in &mut transferability.education_language {
            row.tier7 = next();
            row.tier9 = next();
        }
        for row in &mut transferability.foreign_experience_language {
            row.tier7 = next();
            row.tier9 = next();
        }
        for row in &mut transferability.canadian_foreign_experience {
            row.points = next();
        }
        for row in &mut transferability.canadian_experience_education {
            row.points = next();
        }
        transferability.trades_certification.tier5 = next();
        transferability.trades_certification.tier7 = next();

        let additional = &mut sections.additional;
        for row in &mut additional.canadian_education {
            row.points = next();
        }
        additional.provincial_nomination = next();
        additional.arranged_employment.senior_management = next();
        additional.arranged_employment.skilled_category = next();
        additional.arranged_employment.other = next();
        additional.canadian_sibling = next();
        additional.french_language.only_bonus = next();
        additional.french_language.dual_bonus = next();

        ScoringConfig::new(sections).unwrap()
    })
}

/// A raw score in tenths, wide enough to cover every test's range.
fn raw_score() -> impl Strategy<Value = Decimal> {
    (-50i64..=7000).prop_map(|tenths| Decimal::new(tenths, 1))
}

fn language_scores() -> impl Strategy<Value = LanguageScores> {
    (0usize..TESTS.len(), raw_score(), raw_score(), raw_score(), raw_score()).prop_map(
        |(test, speaking, listening, reading, writing)| {
            LanguageScores::new(TESTS[test], speaking, listening, reading, writing)
        },
    )
}

/// Years of experience in tenths, including negative and over-cap values.
fn years() -> impl Strategy<Value = Decimal> {
    (-20i64..=120).prop_map(|tenths| Decimal::new(tenths, 1))
}

fn profile() -> impl Strategy<Value = CandidateProfile> {
    let candidate = (
        0u32..=80,
        any::<bool>(),
        0usize..EducationLevel::ALL.len(),
        0usize..CANADIAN_EDUCATION.len(),
        language_scores(),
        proptest::option::of(language_scores()),
        years(),
        years(),
        0usize..TEERS.len(),
    );
    let spouse_and_bonuses = (
        0usize..EducationLevel::ALL.len(),
        proptest::option::of(language_scores()),
        years(),
        any::<bool>(),
        0usize..JOB_OFFERS.len(),
        any::<bool>(),
        any::<bool>(),
    );

    (candidate, spouse_and_bonuses).prop_map(
        |(
            (age, married, education, canadian_education, first, second, canadian, foreign, teer),
            (spouse_education, spouse_language, spouse_years, nomination, offer, sibling, trades),
        )| CandidateProfile {
            age,
            marital_status: if married {
                MaritalStatus::Married
            } else {
                MaritalStatus::Single
            },
            education: EducationLevel::ALL[education],
            canadian_education: CANADIAN_EDUCATION[canadian_education],
            first_language: first,
            second_language: second,
            canadian_work_experience: canadian,
            foreign_work_experience: foreign,
            occupation: TEERS[teer],
            spouse_education: EducationLevel::ALL[spouse_education],
            spouse_language,
            spouse_work_experience: spouse_years,
            provincial_nomination: nomination,
            job_offer: JOB_OFFERS[offer],
            canadian_sibling: sibling,
            trades_certification: trades,
        },
    )
}

proptest! {
    #[test]
    fn conversion_is_monotonic(test in 0usize..TESTS.len(), a in raw_score(), b in raw_score()) {
        let config = config();
        let tables = config.language_conversion().get(TESTS[test]).unwrap();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        for skill in Skill::ALL {
            let table = tables.get(skill);
            prop_assert!(convert_raw_score(low, table) <= convert_raw_score(high, table));
        }
    }

    #[test]
    fn non_positive_raw_scores_convert_to_zero(test in 0usize..TESTS.len(), tenths in -500i64..=0) {
        let config = config();
        let tables = config.language_conversion().get(TESTS[test]).unwrap();

        for skill in Skill::ALL {
            prop_assert_eq!(convert_raw_score(Decimal::new(tenths, 1), tables.get(skill)), 0);
        }
    }

    #[test]
    fn interpolation_stays_within_table_range(key in -100i64..=1000) {
        let table = [(10u32, 40u32), (20, 100), (30, 70), (60, 0)];
        let key = Decimal::new(key, 1);

        let result = interpolate(&table, key).unwrap();
        prop_assert!(result.points <= 100);
    }

    #[test]
    fn interpolation_is_exact_at_tabulated_keys(row in 0usize..4) {
        let table = [(10u32, 40u32), (20, 100), (30, 70), (60, 0)];
        let (key, points) = table[row];

        let result = interpolate(&table, Decimal::from(key)).unwrap();
        prop_assert_eq!(result.points, points);
        prop_assert!(result.clamped.is_none());
    }

    #[test]
    fn capped_years_never_exceed_cap(years in years(), cap in 0u32..=6) {
        let whole = capped_whole_years(years, cap);
        prop_assert!(whole <= cap);
        if years <= Decimal::ZERO {
            prop_assert_eq!(whole, 0);
        }
    }

    #[test]
    fn transferability_never_exceeds_cap(profile in profile()) {
        let result = compute_score(&profile, &config(), &cutoffs());
        prop_assert!(result.transferability.subtotal <= 100);
        prop_assert!(result.transferability.subtotal <= result.transferability.uncapped_total);
    }

    #[test]
    fn total_is_sum_of_subtotals(profile in profile()) {
        let result = compute_score(&profile, &config(), &cutoffs());
        prop_assert_eq!(
            result.total_score,
            result.core.subtotal
                + result.spouse.subtotal
                + result.transferability.subtotal
                + result.additional.subtotal
        );
        prop_assert_eq!(result.core.subtotal, result.core.age
            + result.core.education
            + result.core.first_language
            + result.core.second_language
            + result.core.canadian_experience);
    }

    #[test]
    fn transferability_cap_holds_for_any_table_values(
        profile in profile(),
        config in scoring_config(),
    ) {
        let result = compute_score(&profile, &config, &cutoffs());
        let transferability = &result.transferability;

        let uncapped = transferability.education_language as u64
            + transferability.foreign_experience_language as u64
            + transferability.canadian_foreign_experience as u64
            + transferability.canadian_experience_education as u64
            + transferability.trades_certification as u64;
        prop_assert_eq!(transferability.uncapped_total as u64, uncapped.min(u32::MAX as u64));
        prop_assert_eq!(transferability.subtotal as u64, uncapped.min(100));
    }

    #[test]
    fn total_is_saturating_sum_for_any_table_values(
        profile in profile(),
        config in scoring_config(),
    ) {
        let result = compute_score(&profile, &config, &cutoffs());
        let additional = &result.additional;

        let bonuses = additional.canadian_education as u64
            + additional.provincial_nomination as u64
            + additional.arranged_employment as u64
            + additional.canadian_sibling as u64
            + additional.french_floor as u64
            + additional.french_english_dual as u64;
        prop_assert_eq!(additional.subtotal as u64, bonuses.min(u32::MAX as u64));

        let total = result.core.subtotal as u64
            + result.spouse.subtotal as u64
            + result.transferability.subtotal as u64
            + additional.subtotal as u64;
        prop_assert_eq!(result.total_score as u64, total.min(u32::MAX as u64));
    }

    #[test]
    fn single_candidates_earn_no_spouse_points(mut profile in profile()) {
        profile.marital_status = MaritalStatus::Single;
        let result = compute_score(&profile, &config(), &cutoffs());
        prop_assert_eq!(result.spouse.subtotal, 0);
        prop_assert_eq!(result.proficiency.spouse_language.lowest(), 0);
    }

    #[test]
    fn scoring_is_deterministic(profile in profile()) {
        let config = config();
        let cutoffs = cutoffs();
        let first = compute_score(&profile, &config, &cutoffs);
        let second = compute_score(&profile, &config, &cutoffs);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn audit_steps_are_numbered_sequentially(profile in profile()) {
        let result = compute_score(&profile, &config(), &cutoffs());
        for (index, step) in result.audit_trace.steps.iter().enumerate() {
            prop_assert_eq!(step.step_number as usize, index + 1);
        }
    }
}
