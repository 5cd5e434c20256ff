//! In-memory record store for tests and ephemeral use.

use std::collections::BTreeMap;

use cbat_core::error::StoreError;
use cbat_core::model::CandidateRecord;
use cbat_core::traits::RecordStore;

/// A `RecordStore` that lives entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, CandidateRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from a list of records (later duplicates win).
    pub fn from_records(records: impl IntoIterator<Item = CandidateRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.records.insert(record.roll_no.clone(), record);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, roll_no: &str) -> Result<Option<CandidateRecord>, StoreError> {
        Ok(self.records.get(roll_no).cloned())
    }

    fn upsert(&mut self, record: CandidateRecord) -> Result<(), StoreError> {
        self.records.insert(record.roll_no.clone(), record);
        Ok(())
    }

    fn all(&self) -> Result<Vec<CandidateRecord>, StoreError> {
        Ok(self.records.values().cloned().collect())
    }

    fn find(
        &self,
        predicate: &dyn Fn(&CandidateRecord) -> bool,
    ) -> Result<Vec<CandidateRecord>, StoreError> {
        Ok(self
            .records
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbat_core::model::{BatteryInput, BatterySet};
    use chrono::{NaiveDate, Utc};

    fn candidate(roll_no: &str, zone: &str, shift: &str) -> CandidateRecord {
        CandidateRecord {
            roll_no: roll_no.into(),
            is_reexam: false,
            cbt2_marks: 0.0,
            rrb_zone: zone.into(),
            exam_date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            shift: shift.into(),
            batteries: BatterySet::from_fn(|_| BatteryInput {
                attempts: 10,
                accuracy: 80.0,
            }),
            raw_scores: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn get_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("R1").unwrap().is_none());
    }

    #[test]
    fn upsert_then_get() {
        let mut store = MemoryStore::new();
        store.upsert(candidate("R1", "Chennai", "morning")).unwrap();
        let fetched = store.get("R1").unwrap().unwrap();
        assert_eq!(fetched.roll_no, "R1");
    }

    #[test]
    fn upsert_same_roll_no_overwrites() {
        let mut store = MemoryStore::new();
        store.upsert(candidate("R1", "Chennai", "morning")).unwrap();
        store.upsert(candidate("R1", "Mumbai", "evening")).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("R1").unwrap().unwrap().rrb_zone, "Mumbai");
    }

    #[test]
    fn all_is_roll_no_ordered() {
        let mut store = MemoryStore::new();
        store.upsert(candidate("R2", "Chennai", "morning")).unwrap();
        store.upsert(candidate("R1", "Chennai", "morning")).unwrap();
        let rolls: Vec<String> = store.all().unwrap().into_iter().map(|r| r.roll_no).collect();
        assert_eq!(rolls, vec!["R1", "R2"]);
    }

    #[test]
    fn find_zone_shift_filters_exactly() {
        let store = MemoryStore::from_records(vec![
            candidate("R1", "Chennai", "morning"),
            candidate("R2", "Chennai", "evening"),
            candidate("R3", "Mumbai", "morning"),
        ]);
        let found = store.find_zone_shift("Chennai", "morning").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].roll_no, "R1");
    }
}
