//! errors.rs - Error types for the dicestat-core library.
//!
//! Each variant maps to one failure class a caller may want to handle
//! differently: bad parameters, unparsable text, missing stored results,
//! and capabilities that were not compiled in.
//!
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;
use thiserror::Error;

/// All error types produced by `dicestat-core`.
///
/// Marked `#[non_exhaustive]` so new variants can be added without a
/// breaking release.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiceError {
    /// A die size or roll count below 1, or an unusable configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Text that cannot be parsed as a number, die token or stored record.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A stored results file that does not exist.
    #[error("No stored results found at '{}'", .0.display())]
    StorageNotFound(PathBuf),

    /// A feature that this build was compiled without.
    #[error("Optional dependency unavailable: {0}")]
    MissingOptionalDependency(String),

    #[error("Failed to render chart: {0}")]
    Render(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_yml::Error),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type DiceResult<T> = std::result::Result<T, DiceError>;
