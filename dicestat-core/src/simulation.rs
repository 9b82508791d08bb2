// File: dicestat-core/src/simulation.rs

//! `simulation.rs`
//! The end-to-end pipeline: roll, aggregate, persist, reload, analyze.
//!
//! The analysis always runs on the data read back from disk rather than on
//! the in-memory rolls, so every run also exercises the storage round-trip.

use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info};
use rand::Rng;

use crate::aggregate::{summarize, FrequencyTable, SummaryStatistics};
use crate::analysis::{chi_squared, deviation, ChiSquaredResult, CriticalValuePolicy, FaceDeviation};
use crate::config::SimulatorConfig;
use crate::die::{Die, RollSequence};
use crate::errors::{DiceError, DiceResult};
use crate::storage::{self, PersistenceMode};

/// What to roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationRequest {
    pub sides: u32,
    pub rolls: usize,
    /// Fixed seed for a reproducible run; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl SimulationRequest {
    pub fn validate(&self) -> DiceResult<()> {
        if self.sides < 1 {
            return Err(DiceError::InvalidConfiguration(
                "Die must have at least 1 side".to_string(),
            ));
        }
        if self.rolls < 1 {
            return Err(DiceError::InvalidConfiguration(
                "Must roll at least once".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything derived from a stored results file.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub source: PathBuf,
    pub frequencies: FrequencyTable,
    /// Present whenever the individual rolls are known.
    pub summary: Option<SummaryStatistics>,
    pub chi_squared: ChiSquaredResult,
    pub deviations: Vec<FaceDeviation>,
}

/// Result of a full simulation run.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub rolls: RollSequence,
    pub mode: PersistenceMode,
    pub report: AnalysisReport,
}

impl SimulationOutcome {
    pub fn saved_to(&self) -> &Path {
        &self.report.source
    }
}

/// Runs the pipeline for `request`, writing into `config.output_dir`.
pub fn run_simulation(
    request: &SimulationRequest,
    config: &SimulatorConfig,
) -> DiceResult<SimulationOutcome> {
    request.validate()?;
    match request.seed {
        Some(seed) => run_with_die(&mut Die::seeded(request.sides, seed)?, request.rolls, config),
        None => run_with_die(&mut Die::new(request.sides)?, request.rolls, config),
    }
}

/// Runs the pipeline with a caller-supplied die.
pub fn run_with_die<R: Rng>(
    die: &mut Die<R>,
    rolls: usize,
    config: &SimulatorConfig,
) -> DiceResult<SimulationOutcome> {
    info!("Starting simulation: d{} x {}", die.sides(), rolls);

    let sequence = die.roll_many(rolls)?;
    let summary = summarize(&sequence)?;
    let table = FrequencyTable::from_rolls(&sequence);

    let file_name = storage::default_file_name(config.persistence, die.sides(), &Local::now());
    let path = config.output_dir.join(file_name);
    save_run(config.persistence, &sequence, &table, &path)?;

    let reloaded = reload_table(config.persistence, &path, die.sides())?;
    if reloaded != table {
        return Err(DiceError::MalformedInput(format!(
            "{} did not read back the data that was written",
            path.display()
        )));
    }

    let report = analyze_table(
        path,
        reloaded,
        Some(summary),
        sequence.len() as u64,
        die.sides(),
        config.critical_value,
    );
    info!("Simulation finished, results in {}", report.source.display());

    Ok(SimulationOutcome {
        rolls: sequence,
        mode: config.persistence,
        report,
    })
}

/// Loads a stored results file and analyzes it.
///
/// `mode` defaults to whatever the file header says. Sequence files do not
/// record the die size, so `sides` is mandatory for them; for frequency
/// files it is optional and must match the stored face count.
pub fn analyze_stored(
    path: &Path,
    mode: Option<PersistenceMode>,
    sides: Option<u32>,
    policy: CriticalValuePolicy,
) -> DiceResult<AnalysisReport> {
    let mode = match mode {
        Some(mode) => mode,
        None => storage::detect_mode(path)?,
    };
    debug!("Analyzing {} as {:?}", path.display(), mode);

    match mode {
        PersistenceMode::Sequence => {
            let sides = sides.ok_or_else(|| {
                DiceError::InvalidConfiguration(
                    "the die size is required to analyze a roll sequence".to_string(),
                )
            })?;
            let sequence = storage::load_sequence(path, sides)?;
            let summary = summarize(&sequence)?;
            let table = FrequencyTable::from_rolls(&sequence);
            Ok(analyze_table(
                path.to_path_buf(),
                table,
                Some(summary),
                sequence.len() as u64,
                sides,
                policy,
            ))
        }
        PersistenceMode::Frequency => {
            let table = storage::load_frequencies(path)?;
            if let Some(sides) = sides {
                if sides != table.sides() {
                    return Err(DiceError::InvalidConfiguration(format!(
                        "{} holds {} faces but a d{} was requested",
                        path.display(),
                        table.sides(),
                        sides
                    )));
                }
            }
            let total = table.total();
            if total == 0 {
                return Err(DiceError::MalformedInput(format!(
                    "{} records no rolls (every face has a count of 0)",
                    path.display()
                )));
            }
            let sides = table.sides();
            Ok(analyze_table(path.to_path_buf(), table, None, total, sides, policy))
        }
    }
}

/// Writes the representation selected by `mode`.
pub fn save_run(
    mode: PersistenceMode,
    rolls: &RollSequence,
    table: &FrequencyTable,
    path: &Path,
) -> DiceResult<()> {
    match mode {
        PersistenceMode::Sequence => storage::save_sequence(rolls, path),
        PersistenceMode::Frequency => storage::save_frequencies(table, path),
    }
}

/// Reads a stored run back as a frequency table.
pub fn reload_table(mode: PersistenceMode, path: &Path, sides: u32) -> DiceResult<FrequencyTable> {
    match mode {
        PersistenceMode::Sequence => {
            storage::load_sequence(path, sides).map(|seq| FrequencyTable::from_rolls(&seq))
        }
        PersistenceMode::Frequency => storage::load_frequencies(path),
    }
}

fn analyze_table(
    source: PathBuf,
    frequencies: FrequencyTable,
    summary: Option<SummaryStatistics>,
    total_rolls: u64,
    sides: u32,
    policy: CriticalValuePolicy,
) -> AnalysisReport {
    let chi_squared = chi_squared(&frequencies, total_rolls, sides, policy);
    let deviations = deviation(&frequencies, total_rolls, sides);
    AnalysisReport {
        source,
        frequencies,
        summary,
        chi_squared,
        deviations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation() {
        let ok = SimulationRequest { sides: 6, rolls: 1, seed: None };
        assert!(ok.validate().is_ok());

        let no_sides = SimulationRequest { sides: 0, rolls: 10, seed: None };
        assert!(matches!(no_sides.validate(), Err(DiceError::InvalidConfiguration(_))));

        let no_rolls = SimulationRequest { sides: 6, rolls: 0, seed: None };
        assert!(matches!(no_rolls.validate(), Err(DiceError::InvalidConfiguration(_))));
    }
}
