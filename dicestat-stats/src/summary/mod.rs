use alloc::collections::BTreeMap;

/// Descriptive statistics over a sequence of die rolls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollSummary {
    pub min: u32,
    pub max: u32,
    /// The arithmetic mean of all rolled values.
    pub mean: f64,
    /// The most frequent value. Ties go to the value that was rolled first.
    pub mode: u32,
    pub total: usize,
}

/// Computes min, max, mean and mode for a slice of rolled values.
///
/// Returns `None` for an empty slice, since none of the four statistics
/// is defined without at least one observation.
pub fn compute_summary(values: &[u32]) -> Option<RollSummary> {
    let first = *values.first()?;

    let mut min = first;
    let mut max = first;
    let mut sum: u64 = 0;
    // value -> (count, index of first occurrence)
    let mut counts: BTreeMap<u32, (u64, usize)> = BTreeMap::new();

    for (index, &value) in values.iter().enumerate() {
        min = min.min(value);
        max = max.max(value);
        sum += u64::from(value);
        counts.entry(value).or_insert((0, index)).0 += 1;
    }

    let mut mode = first;
    let mut best = (0u64, usize::MAX);
    for (&value, &(count, first_seen)) in counts.iter() {
        if count > best.0 || (count == best.0 && first_seen < best.1) {
            best = (count, first_seen);
            mode = value;
        }
    }

    Some(RollSummary {
        min,
        max,
        mean: sum as f64 / values.len() as f64,
        mode,
        total: values.len(),
    })
}
