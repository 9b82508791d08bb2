//! `dicestat interactive`: the prompt loop.
//!
//! Reads die size and roll count, runs the pipeline, and asks whether to go
//! again. Bad input is reported and re-prompted; end of input ends the
//! session cleanly.

use anyhow::Result;
use log::{debug, info};
use std::io::{BufRead, Write};

use dicestat_core::{
    DiceResult, SimulationRequest, SimulatorConfig, parse_die_size, parse_roll_count,
    run_simulation,
};

use crate::commands::export_plot;
use crate::ui::output_format::{print_error_message, print_info_message, styled};
use crate::ui::report::{ReportOptions, print_report};
use crate::ui::theme::{ThemeEntry, ThemeMap};

const TITLE: &str = "DICE ROLL SIMULATOR";
const TITLE_WIDTH: usize = 50;

/// Settings for one interactive session.
#[derive(Debug, Clone)]
pub struct InteractiveSession {
    pub config: SimulatorConfig,
    pub report: ReportOptions,
    /// Seed of the first run; each later run adds one.
    pub seed: Option<u64>,
}

impl InteractiveSession {
    pub fn run(
        &self,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
        theme: &ThemeMap,
        enable_colors: bool,
    ) -> Result<()> {
        info!("Starting interactive session.");
        let rule = "=".repeat(TITLE_WIDTH);
        writeln!(out, "{}", styled(&rule, ThemeEntry::Header, theme, enable_colors))?;
        writeln!(out, "{}", styled(&format!("{:^TITLE_WIDTH$}", TITLE), ThemeEntry::Header, theme, enable_colors))?;
        writeln!(out, "{}", styled(&rule, ThemeEntry::Header, theme, enable_colors))?;

        let mut round: u64 = 0;
        loop {
            let Some(sides) = prompt_until_valid(
                input,
                out,
                "\nEnter die type (e.g., d4, d6, d20) or number of sides: ",
                parse_die_size,
                "Please enter a valid die size (e.g., 6, d10)",
                theme,
                enable_colors,
            )?
            else {
                break;
            };
            let Some(rolls) = prompt_until_valid(
                input,
                out,
                "Number of rolls: ",
                parse_roll_count,
                "Please enter a positive integer",
                theme,
                enable_colors,
            )?
            else {
                break;
            };

            let request = SimulationRequest {
                sides,
                rolls,
                seed: self.seed.map(|s| s.wrapping_add(round)),
            };
            round += 1;
            debug!("Interactive round {}: {:?}", round, request);

            match run_simulation(&request, &self.config) {
                Ok(outcome) => {
                    print_report(out, &outcome.report, Some(&outcome.rolls), &self.report, theme, enable_colors)?;
                    print_info_message(
                        out,
                        &format!("\nResults saved to: {}", outcome.saved_to().display()),
                        theme,
                        enable_colors,
                    )?;
                    if self.config.histogram.export_image {
                        export_plot(&outcome, &self.config, out, theme, enable_colors)?;
                    }
                }
                Err(e) => {
                    print_error_message(out, &format!("\nSimulation failed: {}", e), theme, enable_colors)?;
                }
            }

            write!(out, "{}", styled("\nRoll again? (y/n): ", ThemeEntry::Prompt, theme, enable_colors))?;
            out.flush()?;
            match read_trimmed(input)? {
                Some(answer) if answer.eq_ignore_ascii_case("y") => continue,
                _ => break,
            }
        }

        writeln!(out, "\nThanks for rolling! Goodbye!")?;
        info!("Interactive session ended.");
        Ok(())
    }
}

/// Prompts until `parse` accepts the answer. `None` means input ran out.
fn prompt_until_valid<T>(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    prompt: &str,
    parse: fn(&str) -> DiceResult<T>,
    error_msg: &str,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<Option<T>> {
    loop {
        write!(out, "{}", styled(prompt, ThemeEntry::Prompt, theme, enable_colors))?;
        out.flush()?;

        let Some(line) = read_trimmed(input)? else {
            return Ok(None);
        };
        if line.is_empty() {
            continue;
        }
        match parse(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => {
                print_error_message(out, &format!("\nInvalid input: {}", error_msg), theme, enable_colors)?;
                writeln!(out, "Error details: {}\n", e)?;
            }
        }
    }
}

fn read_trimmed(input: &mut dyn BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
