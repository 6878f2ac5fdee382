//! Guarded arithmetic for hp, damage, block and corruption.
//!
//! All combat numbers are `i64`. Steps followed by a clamp (hp, block,
//! energy, stacks, corruption) saturate and then clamp, so a huge but valid
//! amount still lands on the bound. Unbounded steps (strength, dexterity,
//! damage scaling) go through these helpers instead: a step that would
//! overflow is discarded and the last known-good value is kept, with a
//! warning logged.

use tracing::warn;

/// Run one arithmetic step, falling back to `last_good` if it overflows.
pub fn guarded(last_good: i64, what: &'static str, step: impl FnOnce() -> Option<i64>) -> i64 {
    match step() {
        Some(value) => value,
        None => {
            warn!(what, last_good, "arithmetic overflow, keeping last known-good value");
            last_good
        }
    }
}

/// `current + delta`, guarded.
pub fn add(current: i64, delta: i64, what: &'static str) -> i64 {
    guarded(current, what, || current.checked_add(delta))
}

/// `floor(amount * numerator / denominator)`, guarded.
///
/// On overflow the unscaled `amount` is kept.
pub fn scale(amount: i64, numerator: i64, denominator: i64, what: &'static str) -> i64 {
    guarded(amount, what, || {
        amount
            .checked_mul(numerator)?
            .checked_div_euclid(denominator)
    })
}

/// `floor(amount * 1.5)`.
pub fn vulnerable_scale(amount: i64) -> i64 {
    scale(amount, 3, 2, "vulnerable multiplier")
}

/// `floor(amount * 0.75)`.
pub fn weak_scale(amount: i64) -> i64 {
    scale(amount, 3, 4, "weak multiplier")
}
