//! Parsing of user-typed die sizes and roll counts.

use crate::errors::{DiceError, DiceResult};

/// Parses a die size such as `6`, `d20` or `D8`.
///
/// Non-numeric text is [`DiceError::MalformedInput`]; numbers below 1 are
/// [`DiceError::InvalidConfiguration`].
pub fn parse_die_size(token: &str) -> DiceResult<u32> {
    let lowered = token.trim().to_lowercase();
    let digits = lowered.strip_prefix('d').unwrap_or(&lowered);

    let size: i64 = digits.parse().map_err(|_| {
        DiceError::MalformedInput(format!(
            "'{}' is not a die size (try 6 or d20)",
            token.trim()
        ))
    })?;
    if size < 1 {
        return Err(DiceError::InvalidConfiguration(
            "Die size must be at least 1".to_string(),
        ));
    }
    u32::try_from(size).map_err(|_| {
        DiceError::InvalidConfiguration(format!("Die size {} is too large", size))
    })
}

/// Parses a positive roll count.
pub fn parse_roll_count(token: &str) -> DiceResult<usize> {
    let trimmed = token.trim();
    let count: i64 = trimmed.parse().map_err(|_| {
        DiceError::MalformedInput(format!("'{}' is not a whole number", trimmed))
    })?;
    if count < 1 {
        return Err(DiceError::InvalidConfiguration(
            "Must roll at least once".to_string(),
        ));
    }
    usize::try_from(count).map_err(|_| {
        DiceError::InvalidConfiguration(format!("Roll count {} is too large", count))
    })
}
