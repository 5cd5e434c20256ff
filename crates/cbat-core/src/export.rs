//! Batch export: one flat row per candidate for the admin CSV.
//!
//! Every record is normalized against the cohorts of its own zone-shift
//! group, so a single export mixes candidates from many groups. The
//! status label travels with each row: it names the row's own exam
//! status, never a fixed per-export choice.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cohort::PeerGroups;
use crate::model::{BatterySet, CandidateRecord};
use crate::report::CohortLabel;
use crate::scoring::ensure_all_raw_scores;
use crate::statistics::{normalize, round2};

/// One export row. All score fields are rounded to 2 decimals; this is a
/// reporting boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub roll_no: String,
    pub is_reexam: bool,
    pub rrb_zone: String,
    pub exam_date: NaiveDate,
    pub shift: String,
    pub cbt2_marks: f64,
    pub raw_scores: BatterySet<f64>,
    /// Which exam-status cohort the `status_*` fields compare against.
    pub status_label: CohortLabel,
    pub status_t_scores: BatterySet<f64>,
    pub status_overall: f64,
    pub all_t_scores: BatterySet<f64>,
    pub all_overall: f64,
}

/// Build export rows for the whole record set, in input order.
///
/// Missing raw-score caches are filled for every record before grouping
/// (an eager full-scan pass; callers should persist updated records).
pub fn build_batch_export(records: &mut [CandidateRecord]) -> Vec<ExportRow> {
    let recomputed = ensure_all_raw_scores(records);
    if recomputed > 0 {
        tracing::debug!(recomputed, "filled missing raw-score caches for export");
    }

    // Group records by (zone, shift) so each row normalizes against its
    // own group only.
    let mut groups: HashMap<(&str, &str), Vec<&CandidateRecord>> = HashMap::new();
    for record in records.iter() {
        groups
            .entry((record.rrb_zone.as_str(), record.shift.as_str()))
            .or_default()
            .push(record);
    }

    records
        .iter()
        .map(|record| {
            let group = &groups[&(record.rrb_zone.as_str(), record.shift.as_str())];
            let peers = PeerGroups::select_from_refs(group, record);
            let status_norm = normalize(&peers.exam_status, record);
            let all_norm = normalize(peers.all_candidates(), record);

            ExportRow {
                roll_no: record.roll_no.clone(),
                is_reexam: record.is_reexam,
                rrb_zone: record.rrb_zone.clone(),
                exam_date: record.exam_date,
                shift: record.shift.clone(),
                cbt2_marks: record.cbt2_marks,
                raw_scores: BatterySet::from_fn(|b| round2(crate::scoring::raw_of(record, b))),
                status_label: CohortLabel::for_status(record.is_reexam),
                status_t_scores: status_norm.t_scores.map(|_, t| round2(*t)),
                status_overall: round2(status_norm.overall),
                all_t_scores: all_norm.t_scores.map(|_, t| round2(*t)),
                all_overall: round2(all_norm.overall),
            }
        })
        .collect()
}
