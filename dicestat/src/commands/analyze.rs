//! `dicestat analyze`: report on a results file written by an earlier run.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::info;
use serde::Serialize;
use std::io::{self, Write};

use dicestat_core::{
    AnalysisReport, ChiSquaredResult, FaceDeviation, SimulatorConfig, analyze_stored,
};

use crate::cli::AnalyzeCommand;
use crate::commands::report_options;
use crate::ui::report::print_report;
use crate::ui::theme::ThemeMap;

/// Machine-readable form of an [`AnalysisReport`].
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub source: String,
    pub sides: u32,
    pub total_rolls: u64,
    pub frequencies: &'a [u64],
    pub summary: Option<JsonSummary>,
    pub chi_squared: &'a ChiSquaredResult,
    pub deviations: &'a [FaceDeviation],
}

#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    pub mode: u32,
    pub total: usize,
}

impl<'a> From<&'a AnalysisReport> for JsonReport<'a> {
    fn from(report: &'a AnalysisReport) -> Self {
        JsonReport {
            source: report.source.display().to_string(),
            sides: report.frequencies.sides(),
            total_rolls: report.frequencies.total(),
            frequencies: report.frequencies.counts(),
            summary: report.summary.map(|s| JsonSummary {
                min: s.min,
                max: s.max,
                mean: s.mean,
                mode: s.mode,
                total: s.total,
            }),
            chi_squared: &report.chi_squared,
            deviations: &report.deviations,
        }
    }
}

pub fn run_analyze(cmd: &AnalyzeCommand, config: &SimulatorConfig, theme: &ThemeMap) -> Result<()> {
    info!("Analyzing stored results: {}", cmd.input.display());

    let policy = cmd
        .critical_value
        .map(Into::into)
        .unwrap_or(config.critical_value);
    let report = analyze_stored(&cmd.input, cmd.format.map(Into::into), cmd.sides, policy)
        .with_context(|| format!("Failed to analyze {}", cmd.input.display()))?;

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut out = stdout.lock();

    if cmd.json {
        serde_json::to_writer_pretty(&mut out, &JsonReport::from(&report))
            .context("Failed to serialize analysis")?;
        writeln!(out)?;
        return Ok(());
    }

    let opts = report_options(config, cmd.bars, true);
    print_report(&mut out, &report, None, &opts, theme, supports_color)?;
    Ok(())
}
