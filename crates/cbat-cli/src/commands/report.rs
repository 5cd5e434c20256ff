//! The `cbat report` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use cbat_core::model::Battery;
use cbat_core::report::{build_report, CandidateReport, ReportView};
use cbat_core::traits::RecordStore;
use cbat_report::md::report_to_markdown;
use cbat_store::config::load_config_from;
use cbat_store::JsonStore;

pub fn execute(
    roll_no: String,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut store = JsonStore::open(&config.data_path)?;

    let Some(target) = store.get(&roll_no)? else {
        anyhow::bail!("no record for roll number {roll_no}");
    };

    let mut records = store.find_zone_shift(&target.rrb_zone, &target.shift)?;

    // Remember which records had no raw-score cache so the recomputed
    // values can be written back after the report pass.
    let stale: Vec<String> = records
        .iter()
        .filter(|r| r.raw_scores.is_none())
        .map(|r| r.roll_no.clone())
        .collect();

    let report = build_report(&roll_no, &mut records)?;

    for record in records.iter().filter(|r| stale.contains(&r.roll_no)) {
        store.upsert(record.clone())?;
    }

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "markdown" | "md" => {
            println!("{}", report_to_markdown(&report));
        }
        _ => {
            print_text(&report);
        }
    }

    if let Some(path) = output {
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_text(report: &CandidateReport) {
    println!("Candidate {}", report.candidate.roll_no);
    println!(
        "  zone {} | shift {} | exam date {} | re-exam {}",
        report.candidate.rrb_zone,
        report.candidate.shift,
        report.candidate.exam_date.format("%d-%m-%Y"),
        if report.candidate.is_reexam { "yes" } else { "no" }
    );
    println!("  CBT2 marks: {:.2}", report.candidate.cbt2_marks);

    print_view(&report.status_view);
    print_view(&report.all_candidates);
}

fn print_view(view: &ReportView) {
    println!("\n{}", view.comparison_group);

    let mut table = Table::new();
    table.set_header(vec!["Battery", "T-Score", "Cohort Mean", "Cohort Std"]);
    for battery in Battery::ALL {
        let stats = view.battery_stats.get(battery);
        table.add_row(vec![
            Cell::new(battery.column_name()),
            Cell::new(format!("{:.2}", view.t_scores.get(battery))),
            Cell::new(format!("{:.2}", stats.mean)),
            Cell::new(format!("{:.2}", stats.std)),
        ]);
    }
    println!("{table}");

    println!(
        "Overall score: {:.2} (cohort of {})",
        view.overall_score, view.cohort_size
    );
    if view.cohort_size == 1 {
        println!("Note: cohort of one; T-scores are degenerate.");
    }
}
