//! Peer group selection.
//!
//! A candidate is compared against two cohorts drawn from the records
//! sharing its exact (rrb_zone, shift): the subset with the same re-exam
//! status, and the full zone-shift group. The target is always a member
//! of both.

use crate::model::CandidateRecord;

/// The comparison cohorts applicable to one target candidate.
#[derive(Debug)]
pub struct PeerGroups<'a> {
    /// Everyone in the target's (rrb_zone, shift), target included.
    pub zone_shift: Vec<&'a CandidateRecord>,
    /// Zone-shift members whose re-exam flag equals the target's.
    pub exam_status: Vec<&'a CandidateRecord>,
}

impl<'a> PeerGroups<'a> {
    /// Select both cohorts for `target` out of `records`.
    ///
    /// Records outside the target's zone/shift are ignored, so passing a
    /// broader set than one zone-shift group is harmless. An exam-status
    /// cohort containing only the target is still returned; normalization
    /// handles the degenerate size-one case.
    pub fn select(records: &'a [CandidateRecord], target: &CandidateRecord) -> Self {
        let zone_shift: Vec<&CandidateRecord> = records
            .iter()
            .filter(|r| r.same_zone_shift(target))
            .collect();
        let exam_status = zone_shift
            .iter()
            .copied()
            .filter(|r| r.is_reexam == target.is_reexam)
            .collect();
        Self {
            zone_shift,
            exam_status,
        }
    }

    /// Like [`PeerGroups::select`], but over an already-borrowed slice.
    /// Used by batch export, which groups records by zone-shift first.
    pub fn select_from_refs(records: &[&'a CandidateRecord], target: &CandidateRecord) -> Self {
        let zone_shift: Vec<&CandidateRecord> = records
            .iter()
            .copied()
            .filter(|r| r.same_zone_shift(target))
            .collect();
        let exam_status = zone_shift
            .iter()
            .copied()
            .filter(|r| r.is_reexam == target.is_reexam)
            .collect();
        Self {
            zone_shift,
            exam_status,
        }
    }

    /// The all-candidates cohort: the full zone-shift group regardless of
    /// re-exam status.
    pub fn all_candidates(&self) -> &[&'a CandidateRecord] {
        &self.zone_shift
    }
}
