//! The die itself and the roll sequences it produces.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::{DiceError, DiceResult};

/// An N-sided die backed by an injectable random source.
///
/// The number of sides is fixed at construction. Every value the die
/// produces is also appended to its history, which is kept for reporting
/// and never feeds back into the distribution.
#[derive(Debug)]
pub struct Die<R: Rng = StdRng> {
    sides: u32,
    rng: R,
    history: Vec<u32>,
}

impl Die<StdRng> {
    /// Creates a die seeded from the operating system.
    pub fn new(sides: u32) -> DiceResult<Self> {
        Self::with_rng(sides, StdRng::from_os_rng())
    }

    /// Creates a die whose rolls are reproducible for a given seed.
    pub fn seeded(sides: u32, seed: u64) -> DiceResult<Self> {
        Self::with_rng(sides, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Die<R> {
    pub fn with_rng(sides: u32, rng: R) -> DiceResult<Self> {
        if sides < 1 {
            return Err(DiceError::InvalidConfiguration(
                "Die must have at least 1 side".to_string(),
            ));
        }
        Ok(Self {
            sides,
            rng,
            history: Vec::new(),
        })
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Rolls once, returning a value in `1..=sides`.
    pub fn roll(&mut self) -> u32 {
        let value = self.rng.random_range(1..=self.sides);
        self.history.push(value);
        value
    }

    /// Rolls `count` times and returns the results in roll order.
    pub fn roll_many(&mut self, count: usize) -> DiceResult<RollSequence> {
        if count < 1 {
            return Err(DiceError::InvalidConfiguration(
                "Must roll at least once".to_string(),
            ));
        }
        debug!("Rolling d{} {} times.", self.sides, count);

        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.roll());
        }
        Ok(RollSequence {
            sides: self.sides,
            values,
        })
    }

    /// Every value rolled so far, oldest first.
    pub fn history(&self) -> &[u32] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

/// An ordered, non-empty list of rolls of one die.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollSequence {
    sides: u32,
    values: Vec<u32>,
}

impl RollSequence {
    /// Builds a sequence from values obtained elsewhere (e.g. a stored file).
    ///
    /// Fails if the sequence is empty or any value falls outside `1..=sides`.
    pub fn new(sides: u32, values: Vec<u32>) -> DiceResult<Self> {
        if sides < 1 {
            return Err(DiceError::InvalidConfiguration(
                "Die must have at least 1 side".to_string(),
            ));
        }
        if values.is_empty() {
            return Err(DiceError::InvalidConfiguration(
                "Must roll at least once".to_string(),
            ));
        }
        if let Some((index, bad)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| **v < 1 || **v > sides)
        {
            return Err(DiceError::MalformedInput(format!(
                "roll #{} has value {}, outside 1..={}",
                index + 1,
                bad,
                sides
            )));
        }
        Ok(Self { sides, values })
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed sequence; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
