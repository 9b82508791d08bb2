//! storage.rs - CSV persistence for roll sequences and frequency tables.
//!
//! Two flat formats are supported, both with a mandatory header row:
//!
//! * sequence: `Roll #,Result`, one row per roll, 1-indexed.
//! * frequency: `Face,Frequency`, one row per face, ascending.
//!
//! Writing creates or truncates the destination. Loading a path that does
//! not exist returns [`DiceError::StorageNotFound`] so callers can tell a
//! missing file apart from a corrupt one.

use std::fs;
use std::fs::File;
use std::path::Path;

use chrono::{DateTime, TimeZone};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::aggregate::FrequencyTable;
use crate::die::RollSequence;
use crate::errors::{DiceError, DiceResult};

pub const SEQUENCE_HEADER: &str = "Roll #,Result";
pub const FREQUENCY_HEADER: &str = "Face,Frequency";

/// Which of the two record layouts a run persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceMode {
    /// Every roll in order.
    #[default]
    Sequence,
    /// One count per face.
    Frequency,
}

impl PersistenceMode {
    fn file_stem(self) -> &'static str {
        match self {
            PersistenceMode::Sequence => "rolls",
            PersistenceMode::Frequency => "frequencies",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RollRecord {
    #[serde(rename = "Roll #")]
    roll: usize,
    #[serde(rename = "Result")]
    result: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct FaceRecord {
    #[serde(rename = "Face")]
    face: u32,
    #[serde(rename = "Frequency")]
    frequency: u64,
}

/// File name for a run, e.g. `d20_rolls_20250101_093000.csv`.
pub fn default_file_name<Tz: TimeZone>(
    mode: PersistenceMode,
    sides: u32,
    timestamp: &DateTime<Tz>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "d{}_{}_{}.csv",
        sides,
        mode.file_stem(),
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

pub fn save_sequence(rolls: &RollSequence, path: &Path) -> DiceResult<()> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for (index, &result) in rolls.values().iter().enumerate() {
        writer.serialize(RollRecord {
            roll: index + 1,
            result,
        })?;
    }
    writer.flush()?;
    info!("Saved {} rolls to {}", rolls.len(), path.display());
    Ok(())
}

/// Reloads a roll sequence, checking every value against `sides`.
pub fn load_sequence(path: &Path, sides: u32) -> DiceResult<RollSequence> {
    let mut reader = open_reader(path)?;
    let mut values = Vec::new();

    for (row, record) in reader.deserialize::<RollRecord>().enumerate() {
        let record = record.map_err(|e| malformed_row(path, row, e))?;
        values.push(record.result);
    }
    if values.is_empty() {
        return Err(DiceError::MalformedInput(format!(
            "{} contains no rolls",
            path.display()
        )));
    }
    debug!("Loaded {} rolls from {}", values.len(), path.display());
    RollSequence::new(sides, values)
}

pub fn save_frequencies(table: &FrequencyTable, path: &Path) -> DiceResult<()> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for (face, frequency) in table.iter() {
        writer.serialize(FaceRecord { face, frequency })?;
    }
    writer.flush()?;
    info!(
        "Saved frequency table for {} faces to {}",
        table.sides(),
        path.display()
    );
    Ok(())
}

/// Reloads a frequency table in stored order.
///
/// Faces must run 1, 2, 3, ... without gaps; anything else is malformed.
pub fn load_frequencies(path: &Path) -> DiceResult<FrequencyTable> {
    let mut reader = open_reader(path)?;
    let mut counts = Vec::new();

    for (row, record) in reader.deserialize::<FaceRecord>().enumerate() {
        let record = record.map_err(|e| malformed_row(path, row, e))?;
        let expected_face = row as u32 + 1;
        if record.face != expected_face {
            return Err(DiceError::MalformedInput(format!(
                "{}: expected face {} on data row {}, found {}",
                path.display(),
                expected_face,
                row + 1,
                record.face
            )));
        }
        counts.push(record.frequency);
    }
    if counts.is_empty() {
        return Err(DiceError::MalformedInput(format!(
            "{} contains no faces",
            path.display()
        )));
    }
    debug!("Loaded {} faces from {}", counts.len(), path.display());
    FrequencyTable::from_counts(counts)
}

/// Identifies the layout of a stored file from its header row.
pub fn detect_mode(path: &Path) -> DiceResult<PersistenceMode> {
    let mut reader = open_reader(path)?;
    let header = reader.headers()?.clone();
    let fields: Vec<&str> = header
        .iter()
        .map(|field| field.trim_start_matches('\u{feff}'))
        .collect();

    match fields.as_slice() {
        ["Roll #", "Result"] => Ok(PersistenceMode::Sequence),
        ["Face", "Frequency"] => Ok(PersistenceMode::Frequency),
        _ => Err(DiceError::MalformedInput(format!(
            "{}: unrecognised header '{}' (expected '{}' or '{}')",
            path.display(),
            fields.join(","),
            SEQUENCE_HEADER,
            FREQUENCY_HEADER
        ))),
    }
}

fn open_reader(path: &Path) -> DiceResult<csv::Reader<File>> {
    if !path.exists() {
        return Err(DiceError::StorageNotFound(path.to_path_buf()));
    }
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?)
}

fn ensure_parent_dir(path: &Path) -> DiceResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn malformed_row(path: &Path, row: usize, err: csv::Error) -> DiceError {
    DiceError::MalformedInput(format!(
        "{}: data row {}: {}",
        path.display(),
        row + 1,
        err
    ))
}
