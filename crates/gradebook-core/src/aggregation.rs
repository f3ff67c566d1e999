//! # Per-Discipline Aggregation
//!
//! Pure functions over a grade collection. None of them can fail: an empty
//! collection yields empty average/max maps and an all-`false` promotion map.
//!
//! Average and max are *partial*: a discipline without grades is absent.
//! Promotion is *total*: every [`Discipline`] is present, `false` unless its
//! average strictly exceeds [`PROMOTE_THRESHOLD`].

use crate::primitives::PROMOTE_THRESHOLD;
use crate::{Discipline, Grade};
use std::collections::BTreeMap;

/// Arithmetic mean of the grade values in each discipline that has grades.
///
/// The mean is updated incrementally and stays finite for any finite inputs.
pub fn average_per_discipline(grades: &[Grade]) -> BTreeMap<Discipline, f64> {
    let mut running: BTreeMap<Discipline, (f64, u64)> = BTreeMap::new();
    for grade in grades {
        let (mean, count) = running.entry(grade.discipline()).or_insert((0.0, 0));
        *count = count.saturating_add(1);
        let n = *count as f64;
        // Both terms are divided before subtracting so opposite extremes cannot overflow.
        *mean += grade.value() / n - *mean / n;
    }

    running
        .into_iter()
        .map(|(discipline, (mean, _))| (discipline, mean))
        .collect()
}

/// Highest grade value in each discipline that has grades.
pub fn max_per_discipline(grades: &[Grade]) -> BTreeMap<Discipline, f64> {
    let mut max: BTreeMap<Discipline, f64> = BTreeMap::new();
    for grade in grades {
        max.entry(grade.discipline())
            .and_modify(|current| *current = current.max(grade.value()))
            .or_insert(grade.value());
    }
    max
}

/// Promotion decision for every discipline.
pub fn promotion_per_discipline(grades: &[Grade]) -> BTreeMap<Discipline, bool> {
    let mut promoted: BTreeMap<Discipline, bool> =
        Discipline::ALL.into_iter().map(|d| (d, false)).collect();

    for (discipline, average) in average_per_discipline(grades) {
        promoted.insert(discipline, is_promoted(average));
    }
    promoted
}

/// Strict comparison against [`PROMOTE_THRESHOLD`].
#[inline]
pub fn is_promoted(average: f64) -> bool {
    average > PROMOTE_THRESHOLD
}

// =============================================================================
// TESTS
// =============================================================================
