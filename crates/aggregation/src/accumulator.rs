//! Running offset statistics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Online statistics over offset magnitudes (count, sum, min, max).
///
/// `min` / `max` are undefined until the first observation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetAccumulator {
    count: u64,
    sum: u128,
    min: Option<u64>,
    max: Option<u64>,
}

impl OffsetAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new value
    pub fn observe(&mut self, value: u64) {
        self.count += 1;
        self.sum += u128::from(value);
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    /// Fold another accumulator into this one
    pub fn merge(&mut self, other: &OffsetAccumulator) {
        self.count += other.count;
        self.sum += other.sum;
        self.min = match (self.min, other.min) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max = match (self.max, other.max) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    /// Sample count
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of observed values
    pub fn sum(&self) -> u128 {
        self.sum
    }

    /// Smallest observed value
    pub fn min(&self) -> Option<u64> {
        self.min
    }

    /// Largest observed value
    pub fn max(&self) -> Option<u64> {
        self.max
    }

    /// Arithmetic mean, `None` when nothing was observed
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum as f64 / self.count as f64)
        }
    }

    /// Read-only copy of the current statistics
    pub fn snapshot(&self) -> AccumulatorSnapshot {
        AccumulatorSnapshot::from(self)
    }
}

/// Statistics summary handed to reporting code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccumulatorSnapshot {
    pub count: u64,
    pub sum: u128,
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub mean: Option<f64>,
}

impl From<&OffsetAccumulator> for AccumulatorSnapshot {
    fn from(acc: &OffsetAccumulator) -> Self {
        Self {
            count: acc.count,
            sum: acc.sum,
            min: acc.min,
            max: acc.max,
            mean: acc.mean(),
        }
    }
}

/// `{}` gives one line of prose; `{:#}` gives fixed-width table columns.
impl fmt::Display for AccumulatorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(mean), Some(min), Some(max)) = (self.mean, self.min, self.max) else {
            return write!(f, "no data");
        };
        if f.alternate() {
            write!(
                f,
                "n={:<5} mean={:>12.1}  min={:>10}  max={:>10}",
                self.count, mean, min, max
            )
        } else {
            write!(
                f,
                "min={}, max={}, mean={:.3} (n={})",
                min, max, mean, self.count
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_observe() {
        let mut acc = OffsetAccumulator::new();

        acc.observe(1);
        acc.observe(2);
        acc.observe(3);
        acc.observe(4);
        acc.observe(5);

        assert_eq!(acc.count(), 5);
        assert_eq!(acc.sum(), 15);
        assert_eq!(acc.min(), Some(1));
        assert_eq!(acc.max(), Some(5));
        assert!((acc.mean().unwrap() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_has_no_data() {
        let acc = OffsetAccumulator::new();
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.mean(), None);
        assert_eq!(acc.min(), None);
        assert_eq!(acc.max(), None);
        assert_eq!(acc.snapshot().to_string(), "no data");
    }

    #[test]
    fn test_zero_is_a_real_observation() {
        let mut acc = OffsetAccumulator::new();
        acc.observe(0);
        assert_eq!(acc.min(), Some(0));
        assert_eq!(acc.max(), Some(0));
        assert_eq!(acc.mean(), Some(0.0));
    }

    #[test]
    fn test_sum_does_not_overflow_u64() {
        let mut acc = OffsetAccumulator::new();
        acc.observe(u64::MAX);
        acc.observe(u64::MAX);
        assert_eq!(acc.sum(), 2 * u128::from(u64::MAX));
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let mut rng = StdRng::seed_from_u64(42);
        let values: Vec<u64> = (0..500).map(|_| rng.random_range(0..7_200_000)).collect();

        let mut whole = OffsetAccumulator::new();
        let mut left = OffsetAccumulator::new();
        let mut right = OffsetAccumulator::new();
        for (i, v) in values.iter().enumerate() {
            whole.observe(*v);
            if i % 3 == 0 {
                left.observe(*v);
            } else {
                right.observe(*v);
            }
        }

        left.merge(&right);
        assert_eq!(left, whole);
    }

    #[test]
    fn test_merge_with_empty() {
        let mut acc = OffsetAccumulator::new();
        acc.observe(10);
        acc.merge(&OffsetAccumulator::new());
        assert_eq!(acc.count(), 1);
        assert_eq!(acc.min(), Some(10));

        let mut empty = OffsetAccumulator::new();
        empty.merge(&acc);
        assert_eq!(empty, acc);
    }

    #[test]
    fn test_snapshot_display() {
        let mut acc = OffsetAccumulator::new();
        acc.observe(1000);
        acc.observe(3000);
        assert_eq!(
            acc.snapshot().to_string(),
            "min=1000, max=3000, mean=2000.000 (n=2)"
        );
    }

    #[test]
    fn test_snapshot_table_display() {
        let mut acc = OffsetAccumulator::new();
        acc.observe(1000);
        acc.observe(3000);
        assert_eq!(
            format!("{:#}", acc.snapshot()),
            "n=2     mean=      2000.0  min=      1000  max=      3000"
        );

        let line = format!("{:#}", OffsetAccumulator::new().snapshot());
        assert_eq!(line, "no data");
    }
}
