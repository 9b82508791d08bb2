//! Reduction of a roll sequence into per-face counts and summary statistics.

use dicestat_stats::summary::compute_summary;

use crate::die::RollSequence;
use crate::errors::{DiceError, DiceResult};

/// Min, max, mean, mode and total of a roll sequence.
pub use dicestat_stats::summary::RollSummary as SummaryStatistics;

/// Observed count for every face of a die, in face order.
///
/// Faces that were never rolled are present with a count of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: Vec<u64>,
}

impl FrequencyTable {
    pub fn from_rolls(rolls: &RollSequence) -> Self {
        let mut counts = vec![0u64; rolls.sides() as usize];
        for &value in rolls.values() {
            counts[(value - 1) as usize] += 1;
        }
        Self { counts }
    }

    /// Wraps counts for faces `1..=counts.len()`. At least one face is required.
    pub fn from_counts(counts: Vec<u64>) -> DiceResult<Self> {
        if counts.is_empty() {
            return Err(DiceError::InvalidConfiguration(
                "A frequency table needs at least one face".to_string(),
            ));
        }
        Ok(Self { counts })
    }

    pub fn sides(&self) -> u32 {
        self.counts.len() as u32
    }

    /// Count for `face`, or 0 if the die has no such face.
    pub fn count(&self, face: u32) -> u64 {
        face.checked_sub(1)
            .and_then(|i| self.counts.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Share of all rolls that landed on `face`, in percent.
    pub fn percentage(&self, face: u32) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(face) as f64 / total as f64 * 100.0
    }

    /// `(face, count)` pairs in ascending face order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u32 + 1, count))
    }
}

/// Summary statistics of the actual rolled values.
pub fn summarize(rolls: &RollSequence) -> DiceResult<SummaryStatistics> {
    compute_summary(rolls.values()).ok_or_else(|| {
        DiceError::InvalidConfiguration("Must roll at least once".to_string())
    })
}
