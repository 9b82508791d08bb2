//! Console rendering of simulation and analysis results.
//!
//! Every function writes to a caller-supplied stream so the same code serves
//! stdout, files and tests.

use anyhow::Result;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{CellAlignment, Table};
use std::io::Write;

use dicestat_core::{
    ALPHA, AnalysisReport, ChiSquaredResult, FaceDeviation, FrequencyTable, RollSequence,
    SummaryStatistics,
};

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Placeholder between the head and tail of a long roll preview.
pub const ELLIPSIS: &str = "...";

const BANNER_WIDTH: usize = 40;
const BAR_CHAR: char = '#';

/// What to include in a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Rolls shown on each side of the preview ellipsis.
    pub preview_len: usize,
    /// Width of the longest chart bar, or `None` for no chart.
    pub bar_width: Option<usize>,
    pub chi_squared: bool,
}

/// Preview tokens for a roll sequence: the first and last `edge` values
/// around an ellipsis when there are more than `2 * edge`, everything otherwise.
pub fn preview_tokens(values: &[u32], edge: usize) -> Vec<String> {
    if values.len() > edge.saturating_mul(2) {
        values[..edge]
            .iter()
            .map(ToString::to_string)
            .chain(std::iter::once(ELLIPSIS.to_string()))
            .chain(values[values.len() - edge..].iter().map(ToString::to_string))
            .collect()
    } else {
        values.iter().map(ToString::to_string).collect()
    }
}

/// Bar length per face: `floor(count / max_count * width)`.
///
/// Empty when no face has any count, in which case no chart is drawn.
pub fn bar_lengths(table: &FrequencyTable, width: usize) -> Vec<usize> {
    let max = table.max_count();
    if max == 0 {
        return Vec::new();
    }
    table
        .counts()
        .iter()
        .map(|&count| (u128::from(count) * width as u128 / u128::from(max)) as usize)
        .collect()
}

/// Renders the full report for a run or a reloaded file.
pub fn print_report(
    out: &mut dyn Write,
    report: &AnalysisReport,
    rolls: Option<&RollSequence>,
    opts: &ReportOptions,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    let sides = report.frequencies.sides();
    let title = match rolls {
        Some(_) => format!("RESULTS (d{}):", sides),
        None => format!("ANALYSIS (d{}): {}", sides, report.source.display()),
    };
    print_banner(out, &title, theme, enable_colors)?;

    if let Some(rolls) = rolls {
        let tokens = preview_tokens(rolls.values(), opts.preview_len);
        writeln!(out, "\nRolls: {}", tokens.join(", "))?;
    }
    if let Some(summary) = &report.summary {
        print_summary(out, summary, theme, enable_colors)?;
    }
    print_frequency(out, &report.frequencies, theme, enable_colors)?;

    if let Some(width) = opts.bar_width {
        print_bar_chart(out, &report.frequencies, width, theme, enable_colors)?;
    }
    if opts.chi_squared {
        print_chi_squared(out, &report.chi_squared, &report.deviations, theme, enable_colors)?;
    }
    Ok(())
}

fn print_banner(out: &mut dyn Write, title: &str, theme: &ThemeMap, enable_colors: bool) -> Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "\n{}", styled(&rule, ThemeEntry::Header, theme, enable_colors))?;
    writeln!(out, "{}", styled(title, ThemeEntry::Header, theme, enable_colors))?;
    writeln!(out, "{}", styled(&rule, ThemeEntry::Header, theme, enable_colors))?;
    Ok(())
}

pub fn print_summary(
    out: &mut dyn Write,
    summary: &SummaryStatistics,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    let label = |text: &str| styled(text, ThemeEntry::StatLabel, theme, enable_colors);

    writeln!(out, "\n{}", styled("STATISTICS:", ThemeEntry::Header, theme, enable_colors))?;
    writeln!(out, "• {} {}", label("Minimum:"), summary.min)?;
    writeln!(out, "• {} {}", label("Maximum:"), summary.max)?;
    writeln!(out, "• {} {:.2}", label("Average:"), summary.mean)?;
    writeln!(out, "• {} {}", label("Most common:"), summary.mode)?;
    writeln!(out, "• {} {}", label("Total rolls:"), summary.total)?;
    Ok(())
}

pub fn print_frequency(
    out: &mut dyn Write,
    table: &FrequencyTable,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    writeln!(out, "\n{}", styled("FREQUENCY:", ThemeEntry::Header, theme, enable_colors))?;
    for (face, count) in table.iter() {
        writeln!(out, "{}: {} rolls ({:.1}%)", face, count, table.percentage(face))?;
    }
    Ok(())
}

pub fn print_bar_chart(
    out: &mut dyn Write,
    table: &FrequencyTable,
    width: usize,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    writeln!(out, "\n{}", styled("HISTOGRAM:", ThemeEntry::Header, theme, enable_colors))?;

    let lengths = bar_lengths(table, width);
    if lengths.is_empty() {
        writeln!(out, "(no rolls to chart)")?;
        return Ok(());
    }

    let label_width = table.sides().to_string().len();
    for ((face, count), length) in table.iter().zip(lengths) {
        let bar: String = std::iter::repeat_n(BAR_CHAR, length).collect();
        writeln!(
            out,
            "{:>label_width$} | {} {}",
            face,
            styled(&bar, ThemeEntry::Bar, theme, enable_colors),
            count,
        )?;
    }
    Ok(())
}

pub fn print_chi_squared(
    out: &mut dyn Write,
    result: &ChiSquaredResult,
    deviations: &[FaceDeviation],
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    let label = |text: &str| styled(text, ThemeEntry::StatLabel, theme, enable_colors);

    writeln!(out, "\n{}", styled("CHI-SQUARED TEST:", ThemeEntry::Header, theme, enable_colors))?;
    writeln!(out, "• {} {:.3}", label("Statistic:"), result.statistic)?;
    writeln!(out, "• {} {}", label("Degrees of freedom:"), result.degrees_of_freedom)?;

    match result.critical_value {
        Some(critical) => {
            writeln!(out, "• {} {:.3}", label(&format!("Critical value (α = {}):", ALPHA)), critical)?;
            let verdict = if result.is_biased {
                styled("BIASED (statistic exceeds the critical value)", ThemeEntry::Biased, theme, enable_colors)
            } else {
                styled("consistent with a fair die", ThemeEntry::Fair, theme, enable_colors)
            };
            writeln!(out, "• {} {}", label("Verdict:"), verdict)?;
        }
        None => {
            writeln!(out, "• {} n/a (a single face cannot be tested)", label("Critical value:"))?;
        }
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_header(vec!["Face", "Observed", "Expected", "Deviation", "Deviation %"]);
    for d in deviations {
        table.add_row(vec![
            d.face.to_string(),
            d.observed.to_string(),
            format!("{:.2}", d.expected),
            format!("{:+.2}", d.absolute),
            format!("{:+.1}%", d.percent),
        ]);
    }
    for index in 1..5 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    writeln!(out, "\n{table}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use dicestat_core::{CriticalValuePolicy, chi_squared, deviation, summarize};
    use std::path::PathBuf;

    fn render(report: &AnalysisReport, rolls: Option<&RollSequence>, opts: ReportOptions) -> String {
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        print_report(&mut buf, report, rolls, &opts, &theme, false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn report_for(rolls: &RollSequence) -> AnalysisReport {
        let table = FrequencyTable::from_rolls(rolls);
        let total = rolls.len() as u64;
        AnalysisReport {
            source: PathBuf::from("rolls.csv"),
            chi_squared: chi_squared(&table, total, rolls.sides(), CriticalValuePolicy::Fixed),
            deviations: deviation(&table, total, rolls.sides()),
            summary: Some(summarize(rolls).unwrap()),
            frequencies: table,
        }
    }

    #[test]
    fn preview_of_twelve_shows_eleven_tokens() {
        let values: Vec<u32> = (1..=12).collect();
        let tokens = preview_tokens(&values, 5);
        assert_eq!(tokens.len(), 11);
        assert_eq!(tokens[..5], ["1", "2", "3", "4", "5"]);
        assert_eq!(tokens[5], ELLIPSIS);
        assert_eq!(tokens[6..], ["8", "9", "10", "11", "12"]);
    }

    #[test]
    fn short_preview_shows_everything() {
        let values: Vec<u32> = (1..=10).collect();
        let tokens = preview_tokens(&values, 5);
        assert_eq!(tokens.len(), 10);
        assert!(!tokens.contains(&ELLIPSIS.to_string()));
    }

    #[test]
    fn huge_preview_length_shows_everything() {
        let values: Vec<u32> = (1..=12).collect();
        let tokens = preview_tokens(&values, usize::MAX);
        assert_eq!(tokens.len(), 12);
        assert!(!tokens.contains(&ELLIPSIS.to_string()));
    }

    #[test]
    fn bars_are_floored_proportions() {
        let table = FrequencyTable::from_counts(vec![10, 5, 3, 0]).unwrap();
        assert_eq!(bar_lengths(&table, 50), vec![50, 25, 15, 0]);

        let table = FrequencyTable::from_counts(vec![3, 1]).unwrap();
        // 1 / 3 * 50 = 16.67
        assert_eq!(bar_lengths(&table, 50), vec![50, 16]);
    }

    #[test]
    fn no_bars_without_rolls() {
        let table = FrequencyTable::from_counts(vec![0, 0, 0]).unwrap();
        assert!(bar_lengths(&table, 50).is_empty());

        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        print_bar_chart(&mut buf, &table, 50, &theme, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("(no rolls to chart)"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn full_report_layout() {
        let rolls = RollSequence::new(6, vec![1, 2, 2, 3, 4, 5, 6, 6, 6, 1, 2, 6]).unwrap();
        let text = render(
            &report_for(&rolls),
            Some(&rolls),
            ReportOptions { preview_len: 5, bar_width: Some(10), chi_squared: true },
        );

        assert!(text.contains("RESULTS (d6):"));
        assert!(text.contains("Rolls: 1, 2, 2, 3, 4, ..., 6, 6, 1, 2, 6"), "{}", text);
        assert!(text.contains("• Minimum: 1"));
        assert!(text.contains("• Maximum: 6"));
        assert!(text.contains("• Average: 3.67"));
        assert!(text.contains("• Most common: 6"));
        assert!(text.contains("• Total rolls: 12"));
        assert!(text.contains("6: 4 rolls (33.3%)"));
        assert!(text.contains("3: 1 rolls (8.3%)"));
        assert!(text.contains("6 | ########## 4"));
        assert!(text.contains("CHI-SQUARED TEST:"));
        assert!(text.contains("Deviation %"));
    }

    #[test]
    fn biased_verdict_is_reported() {
        let rolls = RollSequence::new(6, vec![1; 6]).unwrap();
        let text = render(
            &report_for(&rolls),
            Some(&rolls),
            ReportOptions { preview_len: 5, bar_width: None, chi_squared: true },
        );
        assert!(text.contains("• Statistic: 30.000"));
        assert!(text.contains("• Critical value (α = 0.05): 12.592"));
        assert!(text.contains("BIASED"));
        assert!(text.contains("-100.0%"));
        assert!(!text.contains("HISTOGRAM:"));
    }

    #[test]
    fn analysis_without_rolls_skips_preview() {
        let rolls = RollSequence::new(4, vec![1, 2, 3, 4]).unwrap();
        let mut report = report_for(&rolls);
        report.summary = None;
        let text = render(
            &report,
            None,
            ReportOptions { preview_len: 5, bar_width: None, chi_squared: false },
        );
        assert!(text.contains("ANALYSIS (d4): rolls.csv"));
        assert!(!text.contains("Rolls:"));
        assert!(!text.contains("STATISTICS:"));
        assert!(text.contains("FREQUENCY:"));
        assert!(!text.contains("CHI-SQUARED"));
    }
}
