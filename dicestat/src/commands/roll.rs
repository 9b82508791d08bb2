//! `dicestat roll`: one non-interactive simulation run.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io;

use dicestat_core::{SimulationRequest, SimulatorConfig, run_simulation};

use crate::cli::RollCommand;
use crate::commands::{apply_run_options, export_plot, report_options};
use crate::ui::output_format::print_info_message;
use crate::ui::report::print_report;
use crate::ui::theme::ThemeMap;

pub fn run_roll(cmd: &RollCommand, config: SimulatorConfig, theme: &ThemeMap) -> Result<()> {
    info!("Starting roll command.");
    let config = apply_run_options(config, &cmd.run);
    debug!("Effective configuration: {:?}", config);

    let request = SimulationRequest {
        sides: cmd.sides,
        rolls: cmd.rolls,
        seed: cmd.seed,
    };
    let outcome = run_simulation(&request, &config).context("Simulation failed")?;

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut out = stdout.lock();

    let opts = report_options(&config, cmd.run.bars, !cmd.no_chi_squared);
    print_report(&mut out, &outcome.report, Some(&outcome.rolls), &opts, theme, supports_color)?;
    print_info_message(
        &mut out,
        &format!("\nResults saved to: {}", outcome.saved_to().display()),
        theme,
        supports_color,
    )?;

    if config.histogram.export_image {
        let stderr_supports_color = io::stderr().is_terminal();
        export_plot(&outcome, &config, &mut io::stderr(), theme, stderr_supports_color)?;
    }

    info!("Roll command completed.");
    Ok(())
}
