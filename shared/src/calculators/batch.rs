//! Bird count calculations for inventory batches

use serde::{Deserialize, Serialize};

use crate::input::coerce_count;

/// Total birds in a batch: crates times birds per crate
pub fn compute_total(crates: u32, per_crate: u32) -> u32 {
    crates.saturating_mul(per_crate)
}

/// Total birds from raw form fields. Absent or non-numeric input counts as 0.
pub fn compute_total_raw(crates: Option<&str>, per_crate: Option<&str>) -> u32 {
    compute_total(coerce_count(crates), coerce_count(per_crate))
}

/// Females implied by a total and a declared male count, floored at zero
pub fn compute_complementary_females(total: u32, males: u32) -> u32 {
    total.saturating_sub(males)
}

/// Result of checking a sex split against the batch total
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reconciliation {
    pub sum: u32,
    /// `total - sum`; negative when the split exceeds the total
    pub difference: i64,
    pub is_balanced: bool,
}

/// Compare males + females against the total.
///
/// An empty split (sum of 0) is never balanced, even against a total of 0.
pub fn reconcile(total: u32, males: u32, females: u32) -> Reconciliation {
    let sum = males.saturating_add(females);
    let difference = i64::from(total) - i64::from(sum);
    Reconciliation {
        sum,
        difference,
        is_balanced: difference == 0 && sum > 0,
    }
}
