//! Run-level corruption.
//!
//! Corruption lives on the player for the whole run, so a session receives
//! it through the [`PlayerProfile`](super::PlayerProfile) and hands the final
//! value back out. Inside a combat it is clamped to `0..=100`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::InvariantViolation;

/// Upper bound of the meter.
pub const MAX_CORRUPTION: i64 = 100;

/// Result of one corruption delta.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorruptionChange {
    pub before: i64,
    pub after: i64,
    /// Thresholds crossed upward by this delta, ascending.
    pub crossed: SmallVec<[i64; 4]>,
}

impl CorruptionChange {
    #[must_use]
    pub fn delta(&self) -> i64 {
        self.after - self.before
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

/// Clamped corruption value.
///
/// ```
/// use roguedeck::status::CorruptionMeter;
///
/// let mut meter = CorruptionMeter::new(24);
/// let change = meter.apply(3, &[25, 50, 75, 100]);
///
/// assert_eq!(change.after, 27);
/// assert_eq!(change.crossed.as_slice(), &[25]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorruptionMeter {
    value: i64,
}

impl CorruptionMeter {
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self {
            value: value.clamp(0, MAX_CORRUPTION),
        }
    }

    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Apply a delta and report every threshold `t` with `before < t <= after`.
    ///
    /// Thresholds are expected in ascending order. Drops never report.
    pub fn apply(&mut self, delta: i64, thresholds: &[i64]) -> CorruptionChange {
        let before = self.value;
        let after = before.saturating_add(delta).clamp(0, MAX_CORRUPTION);
        self.value = after;

        let crossed = thresholds
            .iter()
            .copied()
            .filter(|&t| before < t && t <= after)
            .collect();

        CorruptionChange { before, after, crossed }
    }

    pub fn verify(&self) -> Result<(), InvariantViolation> {
        if (0..=MAX_CORRUPTION).contains(&self.value) {
            Ok(())
        } else {
            Err(InvariantViolation::CorruptionOutOfRange(self.value))
        }
    }

    pub fn repair(&mut self) {
        self.value = self.value.clamp(0, MAX_CORRUPTION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: [i64; 4] = [25, 50, 75, 100];

    #[test]
    fn test_single_crossing() {
        let mut meter = CorruptionMeter::new(24);
        let change = meter.apply(3, &THRESHOLDS);
        assert_eq!((change.before, change.after), (24, 27));
        assert_eq!(change.crossed.as_slice(), &[25]);

        // Already past 25: no second report.
        let change = meter.apply(3, &THRESHOLDS);
        assert!(change.crossed.is_empty());
    }

    #[test]
    fn test_large_delta_crosses_several() {
        let mut meter = CorruptionMeter::new(10);
        let change = meter.apply(70, &THRESHOLDS);
        assert_eq!(change.crossed.as_slice(), &[25, 50, 75]);
    }

    #[test]
    fn test_landing_on_threshold_counts() {
        let mut meter = CorruptionMeter::new(49);
        assert_eq!(meter.apply(1, &THRESHOLDS).crossed.as_slice(), &[50]);
    }

    #[test]
    fn test_clamps_and_crosses_cap() {
        let mut meter = CorruptionMeter::new(90);
        let change = meter.apply(500, &THRESHOLDS);
        assert_eq!(change.after, 100);
        assert_eq!(change.crossed.as_slice(), &[100]);

        let change = meter.apply(i64::MAX, &THRESHOLDS);
        assert_eq!(change.after, 100);
        assert!(change.is_noop());
    }

    #[test]
    fn test_huge_gain_lands_on_cap() {
        let mut meter = CorruptionMeter::new(90);
        let change = meter.apply(i64::MAX, &THRESHOLDS);
        assert_eq!(change.after, 100);
        assert_eq!(change.crossed.as_slice(), &[100]);

        let change = meter.apply(i64::MIN, &THRESHOLDS);
        assert_eq!(change.after, 0);
    }

    #[test]
    fn test_drop_never_reports() {
        let mut meter = CorruptionMeter::new(60);
        let change = meter.apply(-100, &THRESHOLDS);
        assert_eq!(change.after, 0);
        assert_eq!(change.delta(), -60);
        assert!(change.crossed.is_empty());

        // Re-crossing after a drop reports again.
        assert_eq!(meter.apply(30, &THRESHOLDS).crossed.as_slice(), &[25]);
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(CorruptionMeter::new(-5).value(), 0);
        assert_eq!(CorruptionMeter::new(250).value(), 100);
    }
}
