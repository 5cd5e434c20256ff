//! Markdown rendering of a candidate report.

use cbat_core::model::Battery;
use cbat_core::report::{CandidateReport, ReportView};

/// Format the report as markdown: candidate header plus one table per
/// comparison view.
pub fn report_to_markdown(report: &CandidateReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# CBAT Report — {}\n\n", report.candidate.roll_no));
    md.push_str(&format!(
        "**Zone:** {} | **Shift:** {} | **Exam date:** {} | **Re-exam:** {}\n\n",
        report.candidate.rrb_zone,
        report.candidate.shift,
        report.candidate.exam_date.format("%d-%m-%Y"),
        if report.candidate.is_reexam { "yes" } else { "no" }
    ));
    md.push_str(&format!("CBT2 marks: {:.2}\n\n", report.candidate.cbt2_marks));

    view_to_markdown(&mut md, &report.status_view);
    view_to_markdown(&mut md, &report.all_candidates);

    md
}

fn view_to_markdown(md: &mut String, view: &ReportView) {
    md.push_str(&format!("## {}\n\n", view.comparison_group));
    if view.cohort_size == 1 {
        md.push_str("_Cohort of one: scores are degenerate (every T-score is 50)._\n\n");
    }
    md.push_str("| Battery | T-Score | Cohort Mean | Cohort Std |\n");
    md.push_str("|---------|---------|-------------|------------|\n");
    for battery in Battery::ALL {
        let stats = view.battery_stats.get(battery);
        md.push_str(&format!(
            "| {} | {:.2} | {:.2} | {:.2} |\n",
            battery.column_name(),
            view.t_scores.get(battery),
            stats.mean,
            stats.std
        ));
    }
    md.push_str(&format!(
        "\n**Overall score:** {:.2} (cohort of {})\n\n",
        view.overall_score, view.cohort_size
    ));
}
