// dicestat-core/src/lib.rs
//! # dicestat Core Library
//!
//! `dicestat-core` holds the platform-independent logic of dicestat: rolling
//! an N-sided die, reducing the rolls to summary statistics and a frequency
//! table, persisting either representation as CSV, and testing the reloaded
//! data for bias with a chi-squared goodness-of-fit test.
//!
//! Presentation (console output, colours, charts) lives in the `dicestat`
//! binary crate.
//!
//! ## Modules
//!
//! * `die`: the [`Die`] and the [`RollSequence`] it produces.
//! * `aggregate`: [`FrequencyTable`] and [`summarize`].
//! * `storage`: CSV save/load for both record layouts.
//! * `analysis`: [`chi_squared`] and [`deviation`].
//! * `config`: [`SimulatorConfig`], loaded from YAML.
//! * `input`: parsing of typed die sizes and roll counts.
//! * `simulation`: the end-to-end pipeline.
//! * `errors`: the [`DiceError`] enum.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use dicestat_core::{run_simulation, SimulationRequest, SimulatorConfig};
//!
//! fn main() -> Result<(), dicestat_core::DiceError> {
//!     let config = SimulatorConfig::load_default()?;
//!     let request = SimulationRequest { sides: 6, rolls: 600, seed: Some(7) };
//!     let outcome = run_simulation(&request, &config)?;
//!
//!     println!("saved to {}", outcome.saved_to().display());
//!     println!("chi-squared = {:.3}", outcome.report.chi_squared.statistic);
//!     Ok(())
//! }
//! ```
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod aggregate;
pub mod analysis;
pub mod config;
pub mod die;
pub mod errors;
pub mod input;
pub mod simulation;
pub mod storage;

pub use aggregate::{summarize, FrequencyTable, SummaryStatistics};
pub use analysis::{chi_squared, deviation, ChiSquaredResult, CriticalValuePolicy, FaceDeviation};
pub use config::{config_candidate_paths, HistogramConfig, SimulatorConfig};
pub use die::{Die, RollSequence};
pub use errors::{DiceError, DiceResult};
pub use input::{parse_die_size, parse_roll_count};
pub use simulation::{
    analyze_stored, reload_table, run_simulation, run_with_die, save_run, AnalysisReport,
    SimulationOutcome, SimulationRequest,
};
pub use storage::{
    default_file_name, detect_mode, load_frequencies, load_sequence, save_frequencies,
    save_sequence, PersistenceMode,
};

/// Significance level of the bias test.
pub use dicestat_stats::critical::ALPHA;
