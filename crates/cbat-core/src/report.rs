//! Candidate report assembly with JSON persistence.
//!
//! A report compares one candidate against two cohorts: peers with the
//! same re-exam status, and everyone in the zone-shift group. Both views
//! are always present; the status view's label depends on the candidate.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cohort::PeerGroups;
use crate::error::CoreError;
use crate::model::{BatterySet, CandidateRecord};
use crate::scoring::ensure_all_raw_scores;
use crate::statistics::{normalize, round2, BatteryStats, Normalization};

/// Which exam-status cohort a report view compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortLabel {
    ReexamOnly,
    NonReexamOnly,
}

impl CohortLabel {
    pub fn for_status(is_reexam: bool) -> Self {
        if is_reexam {
            CohortLabel::ReexamOnly
        } else {
            CohortLabel::NonReexamOnly
        }
    }

    /// Serialized view key, e.g. in JSON output.
    pub fn key(&self) -> &'static str {
        match self {
            CohortLabel::ReexamOnly => "reexam_only",
            CohortLabel::NonReexamOnly => "non_reexam_only",
        }
    }

    /// Tag used in CSV column names ("ReExam" / "NonReExam").
    pub fn column_tag(&self) -> &'static str {
        match self {
            CohortLabel::ReexamOnly => "ReExam",
            CohortLabel::NonReexamOnly => "NonReExam",
        }
    }

    /// Human-readable cohort description used in comparison-group strings.
    pub fn describe(&self) -> &'static str {
        match self {
            CohortLabel::ReexamOnly => "Re-Exam Candidates",
            CohortLabel::NonReexamOnly => "Non Re-Exam Candidates",
        }
    }
}

impl std::fmt::Display for CohortLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Identity and context fields echoed back with every report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateInfo {
    pub roll_no: String,
    pub is_reexam: bool,
    pub rrb_zone: String,
    pub exam_date: NaiveDate,
    pub shift: String,
    pub cbt2_marks: f64,
}

impl From<&CandidateRecord> for CandidateInfo {
    fn from(record: &CandidateRecord) -> Self {
        Self {
            roll_no: record.roll_no.clone(),
            is_reexam: record.is_reexam,
            rrb_zone: record.rrb_zone.clone(),
            exam_date: record.exam_date,
            shift: record.shift.clone(),
            cbt2_marks: record.cbt2_marks,
        }
    }
}

/// One comparison view: T-scores, rounded overall score, cohort
/// statistics, and a human-readable cohort description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportView {
    pub t_scores: BatterySet<f64>,
    /// Rounded to 2 decimals; this is the reporting boundary.
    pub overall_score: f64,
    pub battery_stats: BatterySet<BatteryStats>,
    pub comparison_group: String,
    /// How many records the statistics were computed over. A size of one
    /// means the view is degenerate and uninformative.
    pub cohort_size: usize,
}

impl ReportView {
    fn new(norm: Normalization, comparison_group: String, cohort_size: usize) -> Self {
        Self {
            t_scores: norm.t_scores,
            overall_score: round2(norm.overall),
            battery_stats: norm.battery_stats,
            comparison_group,
            cohort_size,
        }
    }
}

/// The complete two-view report for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    pub candidate: CandidateInfo,
    /// Which exam-status cohort `status_view` compares against.
    pub status_label: CohortLabel,
    /// Comparison against same-status peers only.
    pub status_view: ReportView,
    /// Comparison against the full zone-shift group.
    pub all_candidates: ReportView,
}

impl CandidateReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: CandidateReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

/// Assemble the two-view report for `roll_no` out of `records`.
///
/// `records` is whatever the caller fetched for the target's zone and
/// shift; cohort selection filters it again, so a broader set is fine.
/// Missing raw-score caches are filled first (callers should persist
/// records afterward). Fails with [`CoreError::NotFound`] when the roll
/// number is absent from the set.
pub fn build_report(
    roll_no: &str,
    records: &mut [CandidateRecord],
) -> Result<CandidateReport, CoreError> {
    let recomputed = ensure_all_raw_scores(records);
    if recomputed > 0 {
        tracing::debug!(recomputed, "filled missing raw-score caches");
    }

    let target = records
        .iter()
        .find(|r| r.roll_no == roll_no)
        .cloned()
        .ok_or_else(|| CoreError::NotFound {
            roll_no: roll_no.to_string(),
        })?;

    let groups = PeerGroups::select(records, &target);
    let label = CohortLabel::for_status(target.is_reexam);

    let status_norm = normalize(&groups.exam_status, &target);
    let all_norm = normalize(groups.all_candidates(), &target);

    let status_view = ReportView::new(
        status_norm,
        format!(
            "{} in {} - Shift {}",
            label.describe(),
            target.rrb_zone,
            target.shift
        ),
        groups.exam_status.len(),
    );
    let all_view = ReportView::new(
        all_norm,
        format!(
            "All Candidates in {} - Shift {}",
            target.rrb_zone, target.shift
        ),
        groups.all_candidates().len(),
    );

    Ok(CandidateReport {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        candidate: CandidateInfo::from(&target),
        status_label: label,
        status_view,
        all_candidates: all_view,
    })
}
