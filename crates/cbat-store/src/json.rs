//! JSON-file-backed record store.
//!
//! The whole record collection is held in memory and written back as one
//! JSON document on every mutation. Adequate for the expected record-set
//! sizes (a few hundred per zone/shift); the write-through keeps "compute
//! derived fields, then persist" a single logical step for callers.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cbat_core::error::StoreError;
use cbat_core::model::CandidateRecord;
use cbat_core::traits::RecordStore;

/// A `RecordStore` persisted as a single JSON file.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    records: BTreeMap<String, CandidateRecord>,
}

impl JsonStore {
    /// Open a store at `path`. A missing file means an empty store; the
    /// file is created on first write. Undecodable content is surfaced as
    /// [`StoreError::Corrupt`] rather than silently discarded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let list: Vec<CandidateRecord> = serde_json::from_str(&content)
                .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))?;
            list.into_iter().map(|r| (r.roll_no.clone(), r)).collect()
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let list: Vec<&CandidateRecord> = self.records.values().collect();
        let json = serde_json::to_string_pretty(&list)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl RecordStore for JsonStore {
    fn get(&self, roll_no: &str) -> Result<Option<CandidateRecord>, StoreError> {
        Ok(self.records.get(roll_no).cloned())
    }

    fn upsert(&mut self, record: CandidateRecord) -> Result<(), StoreError> {
        self.records.insert(record.roll_no.clone(), record);
        self.persist()
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
