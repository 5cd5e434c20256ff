//! The record store seam.
//!
//! The scoring core has zero dependency on any particular persistence
//! technology; it sees candidate records through this trait. The
//! `cbat-store` crate provides the implementations.

use crate::error::StoreError;
use crate::model::CandidateRecord;

/// Keyed storage of candidate records.
///
/// Roll numbers are globally unique: a record is either freshly inserted
/// or updated in place, never duplicated. Implementations are expected to
/// serialize one logical write per call; the core never coordinates
/// concurrent writers.
pub trait RecordStore {
    /// Fetch one record by roll number.
    fn get(&self, roll_no: &str) -> Result<Option<CandidateRecord>, StoreError>;

    /// Insert or overwrite the record with the same roll number.
    fn upsert(&mut self, record: CandidateRecord) -> Result<(), StoreError>;

    /// All records, in stable roll-number order.
    fn all(&self) -> Result<Vec<CandidateRecord>, StoreError>;

    /// Records matching an arbitrary predicate.
    fn find(
        &self,
        predicate: &dyn Fn(&CandidateRecord) -> bool,
    ) -> Result<Vec<CandidateRecord>, StoreError>;

    /// Records in one comparison group: exact (rrb_zone, shift) equality.
    fn find_zone_shift(
        &self,
        rrb_zone: &str,
        shift: &str,
    ) -> Result<Vec<CandidateRecord>, StoreError> {
        self.find(&|r| r.rrb_zone == rrb_zone && r.shift == shift)
    }
}
