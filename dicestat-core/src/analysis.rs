//! Chi-squared goodness-of-fit and per-face deviation against a fair die.

use dicestat_stats::chi_squared as kernel;
use dicestat_stats::critical::{critical_value, LEGACY_CRITICAL_VALUE};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::aggregate::FrequencyTable;

/// How the bias verdict picks its critical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CriticalValuePolicy {
    /// Always compare against 12.592, whatever the die size.
    #[default]
    Fixed,
    /// Use the α = 0.05 quantile for `sides - 1` degrees of freedom.
    DegreesOfFreedom,
}

impl CriticalValuePolicy {
    /// The threshold to compare against, or `None` when no test is possible.
    pub fn critical_value(self, sides: u32) -> Option<f64> {
        match self {
            CriticalValuePolicy::Fixed => Some(LEGACY_CRITICAL_VALUE),
            CriticalValuePolicy::DegreesOfFreedom => critical_value(sides.saturating_sub(1)),
        }
    }
}

/// Outcome of a chi-squared test against the uniform distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChiSquaredResult {
    pub statistic: f64,
    pub degrees_of_freedom: u32,
    pub critical_value: Option<f64>,
    pub is_biased: bool,
}

/// Deviation of one face from its expected count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FaceDeviation {
    pub face: u32,
    pub observed: u64,
    pub expected: f64,
    pub absolute: f64,
    pub percent: f64,
}

/// Runs the chi-squared test for `sides` faces and `total_rolls` rolls.
///
/// Faces missing from `table` count as zero observations.
pub fn chi_squared(
    table: &FrequencyTable,
    total_rolls: u64,
    sides: u32,
    policy: CriticalValuePolicy,
) -> ChiSquaredResult {
    cross_check(table, total_rolls, sides);

    let observed = observed_counts(table, sides);
    let statistic = kernel::chi_squared(&observed, total_rolls);
    let critical_value = policy.critical_value(sides);
    let is_biased = critical_value.is_some_and(|critical| statistic > critical);

    debug!(
        "chi-squared = {:.4} (df = {}, critical = {:?}, biased = {})",
        statistic,
        sides.saturating_sub(1),
        critical_value,
        is_biased
    );

    ChiSquaredResult {
        statistic,
        degrees_of_freedom: sides.saturating_sub(1),
        critical_value,
        is_biased,
    }
}

/// Absolute and percentage deviation of each face from `total_rolls / sides`.
pub fn deviation(table: &FrequencyTable, total_rolls: u64, sides: u32) -> Vec<FaceDeviation> {
    let observed = observed_counts(table, sides);
    kernel::deviations(&observed, total_rolls)
        .into_iter()
        .zip(1u32..)
        .map(|(d, face)| FaceDeviation {
            face,
            observed: d.observed,
            expected: d.expected,
            absolute: d.absolute,
            percent: d.percent,
        })
        .collect()
}

fn observed_counts(table: &FrequencyTable, sides: u32) -> Vec<u64> {
    (1..=sides).map(|face| table.count(face)).collect()
}

fn cross_check(table: &FrequencyTable, total_rolls: u64, sides: u32) {
    if table.total() != total_rolls {
        warn!(
            "Frequency table sums to {} but {} rolls were expected.",
            table.total(),
            total_rolls
        );
    }
    if table.sides() != sides {
        warn!(
            "Frequency table has {} faces but the die has {}.",
            table.sides(),
            sides
        );
    }
}
