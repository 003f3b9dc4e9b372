//! Piecewise-linear interpolation and whole-year capping.
//!
//! Age and experience tables list points at selected keys. Keys between two
//! rows are interpolated linearly; keys outside the table clamp to the
//! boundary row and never extrapolate.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Which boundary a key was clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampSide {
    /// The key was below the first row.
    Below,
    /// The key was above the last row.
    Above,
}

/// The outcome of an interpolated lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpolation {
    /// The points at the key, rounded to the nearest integer.
    pub points: u32,
    /// Set when the key fell outside the table.
    pub clamped: Option<ClampSide>,
}

/// Interpolates over `(key, points)` pairs sorted by strictly increasing key.
///
/// Returns `None` only for an empty table.
///
/// # Examples
///
/// ```
/// use crs_engine::calculation::interpolate;
/// use rust_decimal::Decimal;
///
/// let table = [(20, 110), (30, 100)];
/// let result = interpolate(&table, Decimal::from(25)).unwrap();
/// assert_eq!(result.points, 105);
/// assert!(result.clamped.is_none());
/// ```
pub fn interpolate(table: &[(u32, u32)], key: Decimal) -> Option<Interpolation> {
    let (first, last) = (table.first()?, table.last()?);

    if key <= Decimal::from(first.0) {
        return Some(Interpolation {
            points: first.1,
            clamped: (key < Decimal::from(first.0)).then_some(ClampSide::Below),
        });
    }

    if key >= Decimal::from(last.0) {
        return Some(Interpolation {
            points: last.1,
            clamped: (key > Decimal::from(last.0)).then_some(ClampSide::Above),
        });
    }

    let (lower, upper) = table
        .windows(2)
        .map(|pair| (pair[0], pair[1]))
        .find(|(_, upper)| key <= Decimal::from(upper.0))?;

    let (lower_key, upper_key) = (Decimal::from(lower.0), Decimal::from(upper.0));
    let (lower_points, upper_points) = (Decimal::from(lower.1), Decimal::from(upper.1));

    let fraction = (key - lower_key) / (upper_key - lower_key);
    let value = (lower_points + (upper_points - lower_points) * fraction)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    Some(Interpolation {
        points: value.to_u32().unwrap_or_default(),
        clamped: None,
    })
}

/// Caps a year count at `cap` and truncates it to whole completed years.
///
/// Negative and zero counts give 0.
pub fn capped_whole_years(years: Decimal, cap: u32) -> u32 {
    if years <= Decimal::ZERO {
        return 0;
    }

    years
        .min(Decimal::from(cap))
        .trunc()
        .to_u32()
        .unwrap_or_default()
}

/// Sums point values, saturating at `u32::MAX` instead of overflowing.
///
/// Tables supplied with a request are not bounded, so every subtotal goes
/// through this.
pub fn saturating_sum(points: impl IntoIterator<Item = u32>) -> u32 {
    points.into_iter().fold(0, u32::saturating_add)
}
