//! Immigration programs and externally supplied cutoff scores.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The programs the engine evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramId {
    /// Federal skilled-worker stream.
    SkilledWorker,
    /// Canadian-experience stream.
    CanadianExperience,
    /// Federal skilled-trades stream.
    SkilledTrades,
    /// French-language proficiency stream.
    FrenchProficiency,
    /// Provincial nomination.
    ProvincialNomination,
}

impl ProgramId {
    /// Every program in reporting order.
    pub const ALL: [ProgramId; 5] = [
        ProgramId::SkilledWorker,
        ProgramId::CanadianExperience,
        ProgramId::SkilledTrades,
        ProgramId::FrenchProficiency,
        ProgramId::ProvincialNomination,
    ];

    /// Human-readable program name.
    pub fn display_name(self) -> &'static str {
        match self {
            ProgramId::SkilledWorker => "Federal Skilled Worker",
            ProgramId::CanadianExperience => "Canadian Experience Class",
            ProgramId::SkilledTrades => "Federal Skilled Trades",
            ProgramId::FrenchProficiency => "French-Language Proficiency",
            ProgramId::ProvincialNomination => "Provincial Nominee Program",
        }
    }
}

/// A single historical draw for a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoffDraw {
    /// The program the draw targeted.
    pub program: ProgramId,
    /// Date the draw took place.
    pub draw_date: NaiveDate,
    /// Lowest score invited in the draw.
    pub score: u32,
}

/// The most recent known cutoff per program.
///
/// Absence is meaningful: a program with no entry, or an explicit `null`
/// entry, has an unknown cutoff.
///
/// # Example
///
/// ```
/// use crs_engine::models::{CutoffScores, ProgramId};
///
/// let cutoffs = CutoffScores::new()
///     .with(ProgramId::CanadianExperience, 529)
///     .with_unknown(ProgramId::SkilledTrades);
///
/// assert_eq!(cutoffs.get(ProgramId::CanadianExperience), Some(529));
/// assert_eq!(cutoffs.get(ProgramId::SkilledTrades), None);
/// assert_eq!(cutoffs.get(ProgramId::SkilledWorker), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CutoffScores(BTreeMap<ProgramId, Option<u32>>);

impl CutoffScores {
    /// An empty set: every cutoff unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a known cutoff for a program.
    pub fn with(mut self, program: ProgramId, score: u32) -> Self {
        self.0.insert(program, Some(score));
        self
    }

    /// Records a program whose cutoff is explicitly unknown.
    pub fn with_unknown(mut self, program: ProgramId) -> Self {
        self.0.insert(program, None);
        self
    }

    /// The cutoff for a program, if known.
    pub fn get(&self, program: ProgramId) -> Option<u32> {
        self.0.get(&program).copied().flatten()
    }

    /// Builds cutoffs from a draw history, keeping the most recent draw per program.
    ///
    /// When two draws for the same program share a date, the later entry wins.
    pub fn from_draws(draws: &[CutoffDraw]) -> Self {
        let mut latest: BTreeMap<ProgramId, &CutoffDraw> = BTreeMap::new();
        for draw in draws {
            match latest.get(&draw.program) {
                Some(current) if current.draw_date > draw.draw_date => {}
                _ => {
                    latest.insert(draw.program, draw);
                }
            }
        }

        Self(
            latest
                .into_iter()
                .map(|(program, draw)| (program, Some(draw.score)))
                .collect(),
        )
    }

    /// Number of programs with an entry (known or explicitly unknown).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no program has an entry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
