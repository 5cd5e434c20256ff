//! CSV materialization of the batch export.
//!
//! The header carries both exam-status column groups (`ReExam_Only` and
//! `NonReExam_Only`) plus the `All` group. Each row fills the group
//! matching its own status and leaves the other blank; an export mixing
//! re-exam and fresh candidates is the normal case, not an edge case.

use std::path::Path;

use anyhow::{Context, Result};

use cbat_core::export::ExportRow;
use cbat_core::model::Battery;
use cbat_core::report::CohortLabel;

/// Escape a field for CSV: quote when it contains a comma, quote, or
/// newline, doubling embedded quotes.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn header() -> String {
    let mut columns: Vec<String> = vec![
        "Roll_No".into(),
        "Is_ReExam".into(),
        "RRB_Zone".into(),
        "Exam_Date".into(),
        "Shift".into(),
        "CBT2_Marks".into(),
    ];
    for battery in Battery::ALL {
        columns.push(format!("{}_Raw_Score", battery.column_name()));
    }
    for label in [CohortLabel::ReexamOnly, CohortLabel::NonReexamOnly] {
        for battery in Battery::ALL {
            columns.push(format!(
                "{}_T_Score_{}_Only",
                battery.column_name(),
                label.column_tag()
            ));
        }
        columns.push(format!("Overall_Score_{}_Only", label.column_tag()));
    }
    for battery in Battery::ALL {
        columns.push(format!("{}_T_Score_All", battery.column_name()));
    }
    columns.push("Overall_Score_All".into());
    columns.join(",")
}

fn render_row(row: &ExportRow) -> String {
    let mut fields: Vec<String> = vec![
        csv_escape(&row.roll_no),
        row.is_reexam.to_string(),
        csv_escape(&row.rrb_zone),
        row.exam_date.format("%Y-%m-%d").to_string(),
        csv_escape(&row.shift),
        format!("{:.2}", row.cbt2_marks),
    ];
    for battery in Battery::ALL {
        fields.push(format!("{:.2}", row.raw_scores.get(battery)));
    }
    for label in [CohortLabel::ReexamOnly, CohortLabel::NonReexamOnly] {
        if row.status_label == label {
            for battery in Battery::ALL {
                fields.push(format!("{:.2}", row.status_t_scores.get(battery)));
            }
            fields.push(format!("{:.2}", row.status_overall));
        } else {
            // The other status group stays blank for this row.
            fields.extend(std::iter::repeat(String::new()).take(Battery::ALL.len() + 1));
        }
    }
    for battery in Battery::ALL {
        fields.push(format!("{:.2}", row.all_t_scores.get(battery)));
    }
    fields.push(format!("{:.2}", row.all_overall));
    fields.join(",")
}

/// Render the full export as a CSV string.
pub fn render_csv(rows: &[ExportRow]) -> String {
    let mut out = String::new();
    out.push_str(&header());
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out
}

/// Write the export CSV to a file.
pub fn write_csv_export(rows: &[ExportRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, render_csv(rows))
        .with_context(|| format!("failed to write CSV export to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbat_core::export::build_batch_export;
    use cbat_core::model::{BatteryInput, BatterySet, CandidateRecord};
    use chrono::{NaiveDate, Utc};

    fn candidate(roll_no: &str, is_reexam: bool, attempts: u32) -> CandidateRecord {
        CandidateRecord {
            roll_no: roll_no.into(),
            is_reexam,
            cbt2_marks: 70.0,
            rrb_zone: "Chennai".into(),
            exam_date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            shift: "morning".into(),
            batteries: BatterySet::from_fn(|_| BatteryInput {
                attempts,
                accuracy: 100.0,
            }),
            raw_scores: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn csv_escape_quotes_and_commas() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn header_has_both_status_groups() {
        let h = header();
        assert!(h.contains("Memory_T_Score_ReExam_Only"));
        assert!(h.contains("Memory_T_Score_NonReExam_Only"));
        assert!(h.contains("Overall_Score_ReExam_Only"));
        assert!(h.contains("Overall_Score_NonReExam_Only"));
        assert!(h.contains("Perceptual_T_Score_All"));
        assert!(h.ends_with("Overall_Score_All"));
    }

    #[test]
    fn header_and_rows_have_matching_field_counts() {
        let mut records = vec![candidate("R1", false, 10)];
        let rows = build_batch_export(&mut records);
        let csv = render_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0].split(',').count(),
            lines[1].split(',').count(),
        );
    }

    #[test]
    fn rows_fill_only_their_own_status_group() {
        let mut records = vec![candidate("R1", true, 10), candidate("R2", false, 10)];
        let rows = build_batch_export(&mut records);
        let csv = render_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();
        let columns: Vec<&str> = lines[0].split(',').collect();

        let reexam_col = columns
            .iter()
            .position(|c| *c == "Memory_T_Score_ReExam_Only")
            .unwrap();
        let non_reexam_col = columns
            .iter()
            .position(|c| *c == "Memory_T_Score_NonReExam_Only")
            .unwrap();

        let reexam_row: Vec<&str> = lines[1].split(',').collect();
        let fresh_row: Vec<&str> = lines[2].split(',').collect();

        assert_eq!(reexam_row[reexam_col], "50.00");
        assert_eq!(reexam_row[non_reexam_col], "");
        assert_eq!(fresh_row[reexam_col], "");
        assert_eq!(fresh_row[non_reexam_col], "50.00");
    }

    #[test]
    fn writes_file_with_all_rows() {
        let mut records = vec![candidate("R1", false, 8), candidate("R2", false, 12)];
        let rows = build_batch_export(&mut records);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export/cbat_reports.csv");
        write_csv_export(&rows, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains("R1"));
        assert!(content.contains("R2"));
    }
}
