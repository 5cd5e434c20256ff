//! The `cbat submit` command.

use std::path::PathBuf;

use anyhow::Result;

use cbat_core::parser::parse_submission;
use cbat_store::config::load_config_from;
use cbat_store::{submit, JsonStore, SubmitOutcome};

pub fn execute(file: PathBuf, confirm_update: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let submission = parse_submission(&file)?;
    let roll_no = submission.roll_no.clone();

    let mut store = JsonStore::open(&config.data_path)?;
    let outcome = submit(&mut store, submission, confirm_update)?;

    match outcome {
        SubmitOutcome::Created => {
            println!("Created record for {roll_no}");
        }
        SubmitOutcome::Updated => {
            println!("Updated record for {roll_no}");
        }
        SubmitOutcome::Exists(summary) => {
            println!(
                "Roll number {} already exists ({}, shift {}, exam date {}).",
                summary.roll_no,
                summary.rrb_zone,
                summary.shift,
                summary.exam_date.format("%Y-%m-%d")
            );
            println!("Re-run with --confirm-update to overwrite all fields.");
            std::process::exit(1);
        }
    }

    Ok(())
}
