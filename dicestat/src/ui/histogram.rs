//! Image export of the roll distribution.
//!
//! Rendering uses `plotters` and is compiled only with the `plot` feature.
//! Without it, [`export_histogram`] reports
//! [`DiceError::MissingOptionalDependency`] and the caller carries on.

use std::path::{Path, PathBuf};

use dicestat_core::{DiceError, DiceResult, FrequencyTable};

/// File name of the exported chart, e.g. `d20_histogram.svg`.
pub fn histogram_file_name(sides: u32) -> String {
    format!("d{}_histogram.svg", sides)
}

#[cfg(feature = "plot")]
pub fn export_histogram(table: &FrequencyTable, path: &Path) -> DiceResult<PathBuf> {
    use plotters::prelude::*;

    let sides = table.sides();
    let max = table.max_count();
    let y_top = max + max / 10 + 1;

    let root = SVGBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("d{} Roll Distribution (n={})", sides, table.total()),
            ("sans-serif", 28),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((1u32..sides.saturating_add(1)).into_segmented(), 0u64..y_top)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Value")
        .y_desc("Frequency")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.75).filled())
                .margin(4)
                .data(table.iter()),
        )
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(path.to_path_buf())
}

#[cfg(not(feature = "plot"))]
pub fn export_histogram(_table: &FrequencyTable, _path: &Path) -> DiceResult<PathBuf> {
    Err(DiceError::MissingOptionalDependency(
        "image export needs the `plot` feature (cargo install dicestat --features plot)".to_string(),
    ))
}

#[cfg(feature = "plot")]
fn render_err<E: std::fmt::Display>(err: E) -> DiceError {
    DiceError::Render(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_carries_die_size() {
        assert_eq!(histogram_file_name(20), "d20_histogram.svg");
    }

    #[cfg(not(feature = "plot"))]
    #[test]
    fn export_without_feature_is_missing_dependency() {
        let table = FrequencyTable::from_counts(vec![1, 2, 3]).unwrap();
        let err = export_histogram(&table, Path::new("unused.svg")).unwrap_err();
        assert!(matches!(err, DiceError::MissingOptionalDependency(_)));
    }

    #[cfg(feature = "plot")]
    #[test]
    fn export_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(histogram_file_name(6));
        let table = FrequencyTable::from_counts(vec![3, 1, 4, 1, 5, 9]).unwrap();
        let written = export_histogram(&table, &path).unwrap();
        assert_eq!(written, path);
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }
}
