//! dicestat entry point.
//!
//! Parses the command line, sets up logging, theme and configuration, and
//! dispatches to the selected command.

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use log::{LevelFilter, debug};
use std::io;

use dicestat::cli::{Cli, Commands};
use dicestat::commands::analyze::run_analyze;
use dicestat::commands::interactive::InteractiveSession;
use dicestat::commands::roll::run_roll;
use dicestat::commands::{apply_run_options, report_options};
use dicestat::logger;
use dicestat::ui::theme::build_theme_map;
use dicestat_core::SimulatorConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    let theme_map = build_theme_map(cli.theme.as_ref()).context("Theme error")?;

    let config = match &cli.config {
        Some(path) => SimulatorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => SimulatorConfig::discover().context("Failed to load configuration")?,
    };
    config.validate().context("Invalid configuration")?;
    debug!("Loaded configuration: {:?}", config);

    match &cli.command {
        Commands::Roll(cmd) => run_roll(cmd, config, &theme_map)?,
        Commands::Analyze(cmd) => run_analyze(cmd, &config, &theme_map)?,
        Commands::Interactive(cmd) => {
            let config = apply_run_options(config, &cmd.run);
            // The interactive loop always draws the bar chart.
            let report = report_options(&config, true, true);
            let session = InteractiveSession {
                config,
                report,
                seed: cmd.seed,
            };

            let stdout = io::stdout();
            let supports_color = stdout.is_terminal();
            session
                .run(&mut io::stdin().lock(), &mut stdout.lock(), &theme_map, supports_color)
                .context("Interactive session failed")?;
        }
    }

    Ok(())
}
