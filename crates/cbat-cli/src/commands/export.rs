//! The `cbat export` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use cbat_core::export::build_batch_export;
use cbat_core::traits::RecordStore;
use cbat_report::csv::write_csv_export;
use cbat_store::config::load_config_from;
use cbat_store::JsonStore;

pub fn execute(
    output: PathBuf,
    password: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    // Credential check happens before any record is read.
    anyhow::ensure!(
        config.admin.is_configured(),
        "admin credential not configured; set [admin] salt and password_sha256 in cbat.toml \
         (generate the hash with `cbat credential`)"
    );
    let password = password
        .or_else(|| std::env::var("CBAT_ADMIN_PASSWORD").ok())
        .context("admin password required: pass --password or set CBAT_ADMIN_PASSWORD")?;
    anyhow::ensure!(config.admin.verify(&password), "invalid admin credential");

    let mut store = JsonStore::open(&config.data_path)?;
    let mut records = store.all()?;

    let stale: Vec<String> = records
        .iter()
        .filter(|r| r.raw_scores.is_none())
        .map(|r| r.roll_no.clone())
        .collect();

    let rows = build_batch_export(&mut records);

    for record in records.iter().filter(|r| stale.contains(&r.roll_no)) {
        store.upsert(record.clone())?;
    }

    write_csv_export(&rows, &output)?;
    eprintln!(
        "CSV export written to {} ({} rows)",
        output.display(),
        rows.len()
    );

    Ok(())
}
