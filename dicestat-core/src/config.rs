//! Configuration management for `dicestat-core`.
//!
//! Settings live in a small YAML document. An embedded default is always
//! available; users can drop a file into one of the candidate locations or
//! point the CLI at one explicitly.
//!
//! License: MIT OR Apache-2.0

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::CriticalValuePolicy;
use crate::errors::{DiceError, DiceResult};
use crate::storage::PersistenceMode;

/// Default bar length, in characters, of the longest bar in a chart.
pub const DEFAULT_BAR_WIDTH: usize = 50;

/// Number of rolls shown on each side of the preview ellipsis.
pub const DEFAULT_PREVIEW_LEN: usize = 5;

/// Settings for the ASCII bar chart and the optional image export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HistogramConfig {
    pub bar_width: usize,
    /// Write an image of the distribution after each run.
    pub export_image: bool,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            export_image: false,
        }
    }
}

/// Top-level configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Directory that receives the CSV (and image) output.
    pub output_dir: PathBuf,
    pub persistence: PersistenceMode,
    pub critical_value: CriticalValuePolicy,
    pub preview_len: usize,
    pub histogram: HistogramConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            persistence: PersistenceMode::default(),
            critical_value: CriticalValuePolicy::default(),
            preview_len: DEFAULT_PREVIEW_LEN,
            histogram: HistogramConfig::default(),
        }
    }
}

impl SimulatorConfig {
    /// Loads and validates a configuration file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DiceResult<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)?;
        let config: SimulatorConfig = serde_yml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// The configuration embedded in the binary.
    pub fn load_default() -> DiceResult<Self> {
        debug!("Loading default configuration from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config: SimulatorConfig = serde_yml::from_str(default_yaml)?;
        Ok(config)
    }

    /// The first configuration file found among [`config_candidate_paths`],
    /// or the embedded default.
    pub fn discover() -> DiceResult<Self> {
        match config_candidate_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::load_from_file(path),
            None => {
                debug!("No configuration file found, using defaults.");
                Self::load_default()
            }
        }
    }

    pub fn validate(&self) -> DiceResult<()> {
        if self.histogram.bar_width == 0 {
            return Err(DiceError::InvalidConfiguration(
                "histogram.bar_width must be greater than 0".to_string(),
            ));
        }
        if self.preview_len == 0 {
            return Err(DiceError::InvalidConfiguration(
                "preview_len must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Locations searched for a user configuration file, in priority order.
pub fn config_candidate_paths() -> Vec<PathBuf> {
    let candidates = vec![
        dirs::home_dir().map(|p| p.join(".dicestat").join("config.yaml")),
        dirs::config_dir().map(|p| p.join("dicestat").join("config.yaml")),
        Some(PathBuf::from("./config/dicestat.yaml")),
    ];
    candidates.into_iter().flatten().collect()
}
