use libm::{pow, sqrt};

/// Significance level the whole crate is calibrated for.
pub const ALPHA: f64 = 0.05;

/// The fixed critical value dicestat has always compared against.
///
/// It is the α = 0.05 quantile for six degrees of freedom, and is only
/// meaningful for a narrow range of die sizes.
pub const LEGACY_CRITICAL_VALUE: f64 = 12.592;

/// Upper 5% points of the chi-squared distribution, df = 1..=30.
const CRITICAL_005: [f64; 30] = [
    3.841, 5.991, 7.815, 9.488, 11.070, 12.592, 14.067, 15.507, 16.919, 18.307,
    19.675, 21.026, 22.362, 23.685, 24.996, 26.296, 27.587, 28.869, 30.144, 31.410,
    32.671, 33.924, 35.172, 36.415, 37.652, 38.885, 40.113, 41.337, 42.557, 43.773,
];

/// Standard normal quantile for 1 - ALPHA.
const Z_UPPER_005: f64 = 1.644_853_626_951_472;

/// Critical value of the chi-squared distribution at [`ALPHA`] for the given
/// degrees of freedom.
///
/// Uses the exact table up to 30 degrees of freedom and the Wilson-Hilferty
/// approximation beyond. Returns `None` for zero degrees of freedom, where
/// the goodness-of-fit test is undefined.
pub fn critical_value(degrees_of_freedom: u32) -> Option<f64> {
    match degrees_of_freedom {
        0 => None,
        df if (df as usize) <= CRITICAL_005.len() => Some(CRITICAL_005[df as usize - 1]),
        df => Some(wilson_hilferty(df)),
    }
}

fn wilson_hilferty(degrees_of_freedom: u32) -> f64 {
    let k = degrees_of_freedom as f64;
    let a = 2.0 / (9.0 * k);
    k * pow(1.0 - a + Z_UPPER_005 * sqrt(a), 3.0)
}
