//! The `cbat check` command.

use std::path::PathBuf;

use anyhow::Result;

use cbat_core::traits::RecordStore;
use cbat_store::config::load_config_from;
use cbat_store::{JsonStore, RecordSummary};

pub fn execute(roll_no: String, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = JsonStore::open(&config.data_path)?;

    match store.get(&roll_no)? {
        Some(record) => {
            let summary = RecordSummary::from(&record);
            if format == "json" {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "exists": true,
                        "record": summary,
                    }))?
                );
            } else {
                println!("Roll number {} is on record:", summary.roll_no);
                println!("  zone:      {}", summary.rrb_zone);
                println!("  shift:     {}", summary.shift);
                println!("  exam date: {}", summary.exam_date.format("%Y-%m-%d"));
                println!("  re-exam:   {}", if summary.is_reexam { "yes" } else { "no" });
            }
        }
        None => {
            if format == "json" {
                println!("{}", serde_json::json!({ "exists": false }));
            } else {
                println!("No record for roll number {roll_no}");
            }
        }
    }

    Ok(())
}
