use alloc::vec::Vec;

/// Expected count per face under the uniform hypothesis.
///
/// Real-valued on purpose: 10 rolls of a d6 expect 1.666.. per face.
pub fn expected_per_face(total: u64, faces: usize) -> f64 {
    if faces == 0 {
        return 0.0;
    }
    total as f64 / faces as f64
}

/// Pearson's chi-squared statistic of `observed` against a uniform distribution
/// over `observed.len()` faces with `total` rolls.
///
/// Returns 0.0 when there is nothing to compare (no faces or no rolls).
pub fn chi_squared(observed: &[u64], total: u64) -> f64 {
    let expected = expected_per_face(total, observed.len());
    if expected <= 0.0 {
        return 0.0;
    }

    observed
        .iter()
        .map(|&count| {
            let diff = count as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// How far one face landed from its expected count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    pub observed: u64,
    pub expected: f64,
    /// `observed - expected`
    pub absolute: f64,
    /// `absolute / expected * 100`
    pub percent: f64,
}

/// Per-face deviation from the uniform expectation, in face order.
pub fn deviations(observed: &[u64], total: u64) -> Vec<Deviation> {
    let expected = expected_per_face(total, observed.len());

    observed
        .iter()
        .map(|&count| {
            let absolute = count as f64 - expected;
            let percent = if expected > 0.0 {
                absolute / expected * 100.0
            } else {
                0.0
            };
            Deviation {
                observed: count,
                expected,
                absolute,
                percent,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_chi_squared_perfectly_uniform() {
        assert_eq!(chi_squared(&[100; 6], 600), 0.0);
        assert_eq!(chi_squared(&[1, 1, 1, 1, 1, 1], 6), 0.0);
    }

    #[test]
    fn test_chi_squared_all_on_one_face() {
        // expected = 1; (6-1)^2 + 5 * (0-1)^2 = 30
        let stat = chi_squared(&[6, 0, 0, 0, 0, 0], 6);
        assert!((stat - 30.0).abs() < EPSILON);
    }

    #[test]
    fn test_chi_squared_nothing_to_compare() {
        assert_eq!(chi_squared(&[], 10), 0.0);
        assert_eq!(chi_squared(&[0, 0], 0), 0.0);
    }

    #[test]
    fn test_expected_is_not_rounded() {
        let expected = expected_per_face(10, 6);
        assert!((expected - 10.0 / 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_deviation_of_missing_face_is_minus_hundred() {
        let devs = deviations(&[3, 0, 3], 6);
        assert_eq!(devs.len(), 3);
        assert!((devs[1].percent + 100.0).abs() < EPSILON);
        assert!((devs[1].absolute + 2.0).abs() < EPSILON);
        assert!((devs[0].percent - 50.0).abs() < EPSILON);
    }
}
