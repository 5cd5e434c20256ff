//! Submission lifecycle: create on first sight, overwrite only with
//! explicit confirmation.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use cbat_core::error::StoreError;
use cbat_core::model::CandidateRecord;
use cbat_core::parser::Submission;
use cbat_core::traits::RecordStore;

/// The identity/context slice of a stored record, echoed back when a
/// submission collides with an existing roll number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub roll_no: String,
    pub is_reexam: bool,
    pub rrb_zone: String,
    pub exam_date: NaiveDate,
    pub shift: String,
}

impl From<&CandidateRecord> for RecordSummary {
    fn from(record: &CandidateRecord) -> Self {
        Self {
            roll_no: record.roll_no.clone(),
            is_reexam: record.is_reexam,
            rrb_zone: record.rrb_zone.clone(),
            exam_date: record.exam_date,
            shift: record.shift.clone(),
        }
    }
}

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Fresh roll number; record created.
    Created,
    /// Existing roll number, confirmation given; all fields overwritten
    /// and raw scores recomputed. `created_at` is preserved.
    Updated,
    /// Existing roll number, no confirmation; nothing was written.
    Exists(RecordSummary),
}

/// Apply a validated submission to the store.
///
/// An unconfirmed collision returns [`SubmitOutcome::Exists`] without
/// touching the store. Raw scores are computed before the write, so a
/// persisted record always carries its derived fields.
pub fn submit(
    store: &mut dyn RecordStore,
    submission: Submission,
    confirm_update: bool,
) -> Result<SubmitOutcome, StoreError> {
    match store.get(&submission.roll_no)? {
        Some(existing) if !confirm_update => {
            tracing::info!(roll_no = %existing.roll_no, "submission rejected: roll number exists");
            Ok(SubmitOutcome::Exists(RecordSummary::from(&existing)))
        }
        Some(existing) => {
            let record = submission.into_record(existing.created_at);
            store.upsert(record)?;
            Ok(SubmitOutcome::Updated)
        }
        None => {
            let record = submission.into_record(Utc::now());
            store.upsert(record)?;
            Ok(SubmitOutcome::Created)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use cbat_core::model::{BatteryInput, BatterySet};

    fn submission(roll_no: &str, zone: &str, attempts: u32) -> Submission {
        Submission {
            roll_no: roll_no.into(),
            is_reexam: false,
            cbt2_marks: 88.0,
            rrb_zone: zone.into(),
            exam_date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            shift: "morning".into(),
            batteries: BatterySet::from_fn(|_| BatteryInput {
                attempts,
                accuracy: 100.0,
            }),
        }
    }

    #[test]
    fn fresh_roll_no_is_created_with_raw_scores() {
        let mut store = MemoryStore::new();
        let outcome = submit(&mut store, submission("R1", "Chennai", 10), false).unwrap();
        assert_eq!(outcome, SubmitOutcome::Created);

        let stored = store.get("R1").unwrap().unwrap();
        assert_eq!(stored.raw_scores.unwrap().memory, 10.0);
    }

    #[test]
    fn unconfirmed_resubmission_is_rejected_without_overwrite() {
        let mut store = MemoryStore::new();
        submit(&mut store, submission("R1", "Chennai", 10), false).unwrap();

        let outcome = submit(&mut store, submission("R1", "Mumbai", 20), false).unwrap();
        match outcome {
            SubmitOutcome::Exists(summary) => {
                assert_eq!(summary.roll_no, "R1");
                assert_eq!(summary.rrb_zone, "Chennai");
            }
            other => panic!("expected Exists, got {other:?}"),
        }
        // Store still holds the original record.
        let stored = store.get("R1").unwrap().unwrap();
        assert_eq!(stored.rrb_zone, "Chennai");
        assert_eq!(stored.raw_scores.unwrap().memory, 10.0);
    }

    #[test]
    fn confirmed_resubmission_overwrites_and_recomputes() {
        let mut store = MemoryStore::new();
        submit(&mut store, submission("R1", "Chennai", 10), false).unwrap();
        let created_at = store.get("R1").unwrap().unwrap().created_at;

        let outcome = submit(&mut store, submission("R1", "Mumbai", 20), true).unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated);

        let stored = store.get("R1").unwrap().unwrap();
        assert_eq!(stored.rrb_zone, "Mumbai");
        assert_eq!(stored.raw_scores.unwrap().memory, 20.0);
        assert_eq!(stored.created_at, created_at);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn confirmation_on_fresh_roll_no_still_creates() {
        let mut store = MemoryStore::new();
        let outcome = submit(&mut store, submission("R1", "Chennai", 10), true).unwrap();
        assert_eq!(outcome, SubmitOutcome::Created);
    }
}
