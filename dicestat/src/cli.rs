// dicestat/src/cli.rs
//! This file defines the command-line interface (CLI) for the dicestat
//! application, including all available commands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use dicestat_core::{CriticalValuePolicy, PersistenceMode, parse_die_size, parse_roll_count};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "dicestat",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Roll dice, keep the results, and test the die for bias",
    long_about = "dicestat simulates rolling an N-sided die, stores every run as CSV, reloads it, and reports summary statistics, the frequency distribution and a chi-squared goodness-of-fit verdict.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a YAML configuration file.
    #[arg(long = "config", value_name = "FILE", global = true, env = "DICESTAT_CONFIG", help = "Path to a YAML configuration file.")]
    pub config: Option<PathBuf>,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `dicestat` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rolls a die, saves the results and reports on them.
    #[command(about = "Rolls a die, saves the results and reports on them.")]
    Roll(RollCommand),

    /// Reloads a stored results file and reports on it.
    #[command(about = "Reloads a stored results file and reports on it.")]
    Analyze(AnalyzeCommand),

    /// Prompts for die size and roll count until you stop.
    #[command(about = "Prompts for die size and roll count until you stop.")]
    Interactive(InteractiveCommand),
}

/// Arguments for the `roll` command.
#[derive(Parser, Debug)]
pub struct RollCommand {
    /// Die size, as a number or a `d` token.
    #[arg(long, short = 's', value_name = "SIDES", value_parser = die_size_arg, help = "Die size, e.g. 6 or d20.")]
    pub sides: u32,

    /// Number of rolls.
    #[arg(long, short = 'n', value_name = "N", value_parser = roll_count_arg, help = "Number of rolls (at least 1).")]
    pub rolls: usize,

    #[command(flatten)]
    pub run: RunOptions,

    /// Fixed random seed.
    #[arg(long, value_name = "SEED", help = "Seed the random generator for a reproducible run.")]
    pub seed: Option<u64>,

    /// Skip the chi-squared section of the report.
    #[arg(long = "no-chi-squared", help = "Skip the chi-squared section of the report.")]
    pub no_chi_squared: bool,
}

/// Arguments for the `analyze` command.
#[derive(Parser, Debug)]
pub struct AnalyzeCommand {
    /// The stored results file.
    #[arg(long, short = 'i', value_name = "FILE", help = "CSV file written by a previous run.")]
    pub input: PathBuf,

    /// Record layout; detected from the header when omitted.
    #[arg(long, value_name = "FORMAT", help = "Record layout of the file (detected from the header by default).")]
    pub format: Option<ModeChoice>,

    /// Die size, required for roll sequence files.
    #[arg(long, short = 's', value_name = "SIDES", value_parser = die_size_arg, help = "Die size; required for roll sequence files.")]
    pub sides: Option<u32>,

    #[arg(long = "critical-value", value_name = "POLICY", help = "How to pick the chi-squared critical value.")]
    pub critical_value: Option<CriticalChoice>,

    /// Draw an ASCII bar chart.
    #[arg(long, short = 'b', help = "Draw an ASCII bar chart of the frequencies.")]
    pub bars: bool,

    /// Print the analysis as JSON on stdout.
    #[arg(long, conflicts_with = "bars", help = "Print the analysis as JSON on stdout.")]
    pub json: bool,
}

/// Arguments for the `interactive` command.
#[derive(Parser, Debug)]
pub struct InteractiveCommand {
    #[command(flatten)]
    pub run: RunOptions,

    /// Seed for the first run; later runs use consecutive seeds.
    #[arg(long, value_name = "SEED", help = "Seed for the first run; later runs use consecutive seeds.")]
    pub seed: Option<u64>,
}

/// Options shared by every command that performs a simulation.
#[derive(clap::Args, Debug, Default)]
pub struct RunOptions {
    /// What to store for each run.
    #[arg(long, short = 'm', value_name = "MODE", help = "Store every roll (sequence) or one count per face (frequency).")]
    pub mode: Option<ModeChoice>,

    /// Output directory for CSV and image files.
    #[arg(long, short = 'o', value_name = "DIR", help = "Directory for the CSV (and image) output.")]
    pub output_dir: Option<PathBuf>,

    #[arg(long = "critical-value", value_name = "POLICY", help = "How to pick the chi-squared critical value.")]
    pub critical_value: Option<CriticalChoice>,

    /// Draw an ASCII bar chart.
    #[arg(long, short = 'b', help = "Draw an ASCII bar chart of the frequencies.")]
    pub bars: bool,

    /// Export the distribution as an image.
    #[arg(long, short = 'p', help = "Export the distribution as an SVG histogram.")]
    pub plot: bool,
}

/// Enum for selecting the persistence layout.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum ModeChoice {
    /// One row per roll.
    Sequence,
    /// One row per face.
    Frequency,
}

impl From<ModeChoice> for PersistenceMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Sequence => PersistenceMode::Sequence,
            ModeChoice::Frequency => PersistenceMode::Frequency,
        }
    }
}

/// Enum for selecting the critical value policy.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum CriticalChoice {
    /// The legacy constant 12.592.
    Fixed,
    /// The α = 0.05 value for (sides - 1) degrees of freedom.
    DegreesOfFreedom,
}

impl From<CriticalChoice> for CriticalValuePolicy {
    fn from(choice: CriticalChoice) -> Self {
        match choice {
            CriticalChoice::Fixed => CriticalValuePolicy::Fixed,
            CriticalChoice::DegreesOfFreedom => CriticalValuePolicy::DegreesOfFreedom,
        }
    }
}

fn die_size_arg(s: &str) -> Result<u32, String> {
    parse_die_size(s).map_err(|e| e.to_string())
}

fn roll_count_arg(s: &str) -> Result<usize, String> {
    parse_roll_count(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_d_token_for_sides() {
        let cli = Cli::try_parse_from(["dicestat", "roll", "--sides", "d20", "--rolls", "5"]).unwrap();
        match cli.command {
            Commands::Roll(cmd) => {
                assert_eq!(cmd.sides, 20);
                assert_eq!(cmd.rolls, 5);
                assert!(cmd.run.mode.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_zero_rolls() {
        assert!(Cli::try_parse_from(["dicestat", "roll", "-s", "6", "-n", "0"]).is_err());
        assert!(Cli::try_parse_from(["dicestat", "roll", "-s", "0", "-n", "3"]).is_err());
    }

    #[test]
    fn parses_kebab_case_policy() {
        let cli = Cli::try_parse_from([
            "dicestat", "roll", "-s", "6", "-n", "3", "--critical-value", "degrees-of-freedom",
        ])
        .unwrap();
        match cli.command {
            Commands::Roll(cmd) => assert_eq!(cmd.run.critical_value, Some(CriticalChoice::DegreesOfFreedom)),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
