//! Raw score derivation from (attempts, accuracy) pairs.
//!
//! `raw = floor(attempts * accuracy / 100)`: integer truncation, not
//! rounding. Inputs are assumed validated; there are no error conditions.

use crate::model::{Battery, BatteryInput, CandidateRecord};

/// Raw score for a single battery.
pub fn raw_score(input: &BatteryInput) -> f64 {
    ((f64::from(input.attempts) * input.accuracy) / 100.0).floor()
}

/// Compute and cache all five raw scores on the record.
///
/// Idempotent: recomputation from the same inputs yields the same stored
/// values. Callers must persist the record afterward.
pub fn compute_raw_scores(record: &mut CandidateRecord) {
    record.raw_scores = Some(record.batteries.map(|_, input| raw_score(input)));
}

/// Compute raw scores only if the cache is empty. Returns `true` when the
/// record changed, so callers know to persist it.
pub fn ensure_raw_scores(record: &mut CandidateRecord) -> bool {
    if record.raw_scores.is_some() {
        return false;
    }
    compute_raw_scores(record);
    true
}

/// Eagerly fill raw-score caches across a whole record set. Returns how
/// many records were updated. Run before any grouping or statistics pass.
pub fn ensure_all_raw_scores(records: &mut [CandidateRecord]) -> usize {
    let mut updated = 0;
    for record in records.iter_mut() {
        if ensure_raw_scores(record) {
            updated += 1;
        }
    }
    updated
}

/// The raw score for one battery, from the cache when present, otherwise
/// recomputed on the fly from the stored inputs.
pub fn raw_of(record: &CandidateRecord, battery: Battery) -> f64 {
    match &record.raw_scores {
        Some(set) => *set.get(battery),
        None => raw_score(record.batteries.get(battery)),
    }
}
