//! Command implementations and the plumbing they share.

pub mod analyze;
pub mod interactive;
pub mod roll;

use anyhow::{Context, Result};
use log::warn;
use std::io::Write;

use dicestat_core::{DiceError, SimulationOutcome, SimulatorConfig};

use crate::cli::RunOptions;
use crate::ui::histogram::{export_histogram, histogram_file_name};
use crate::ui::output_format::{print_success_message, print_warn_message};
use crate::ui::report::ReportOptions;
use crate::ui::theme::ThemeMap;

/// Layers command-line overrides on top of the loaded configuration.
pub fn apply_run_options(mut config: SimulatorConfig, run: &RunOptions) -> SimulatorConfig {
    if let Some(mode) = run.mode {
        config.persistence = mode.into();
    }
    if let Some(dir) = &run.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(policy) = run.critical_value {
        config.critical_value = policy.into();
    }
    if run.plot {
        config.histogram.export_image = true;
    }
    config
}

pub fn report_options(config: &SimulatorConfig, bars: bool, chi_squared: bool) -> ReportOptions {
    ReportOptions {
        preview_len: config.preview_len,
        bar_width: bars.then_some(config.histogram.bar_width),
        chi_squared,
    }
}

/// Writes the histogram image next to the CSV output.
///
/// A build without image support prints a notice and returns `Ok`.
pub fn export_plot(
    outcome: &SimulationOutcome,
    config: &SimulatorConfig,
    notices: &mut dyn Write,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    let path = config
        .output_dir
        .join(histogram_file_name(outcome.rolls.sides()));

    match export_histogram(&outcome.report.frequencies, &path) {
        Ok(written) => {
            print_success_message(
                notices,
                &format!("Histogram saved to: {}", written.display()),
                theme,
                enable_colors,
            )?;
        }
        Err(DiceError::MissingOptionalDependency(reason)) => {
            warn!("Skipping histogram export: {}", reason);
            print_warn_message(
                notices,
                &format!("\nHistogram export not available. Skipping histogram.\nTo enable it: {}", reason),
                theme,
                enable_colors,
            )?;
        }
        Err(e) => return Err(e).context("Failed to export histogram"),
    }
    Ok(())
}
