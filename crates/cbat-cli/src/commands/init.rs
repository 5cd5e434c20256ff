//! The `cbat init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create cbat.toml
    if std::path::Path::new("cbat.toml").exists() {
        println!("cbat.toml already exists, skipping.");
    } else {
        std::fs::write("cbat.toml", SAMPLE_CONFIG)?;
        println!("Created cbat.toml");
    }

    // Create example submission
    std::fs::create_dir_all("candidates")?;
    let example_path = std::path::Path::new("candidates/example.toml");
    if example_path.exists() {
        println!("candidates/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_SUBMISSION)?;
        println!("Created candidates/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Generate an admin hash: cbat credential --salt <salt> <password>");
    println!("  2. Put the salt and hash into cbat.toml (or export CBAT_ADMIN_SALT / CBAT_ADMIN_HASH)");
    println!("  3. Submit the example: cbat submit --file candidates/example.toml");
    println!("  4. View the report: cbat report RRB2025001");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# cbat configuration

data_path = "./cbat-data/records.json"

# Gate for the admin CSV export. The password itself is never stored:
# put its salted SHA-256 here, generated with `cbat credential`.
[admin]
salt = "${CBAT_ADMIN_SALT}"
password_sha256 = "${CBAT_ADMIN_HASH}"
"#;

const EXAMPLE_SUBMISSION: &str = r#"[candidate]
roll_no = "RRB2025001"
is_reexam = false
cbt2_marks = 92.5
rrb_zone = "Secunderabad"
exam_date = "2025-06-14"
shift = "morning"

[batteries.memory]
attempts = 42
accuracy = 85.5

[batteries.directions]
attempts = 30
accuracy = 90.0

[batteries.depth]
attempts = 25
accuracy = 72.0

[batteries.concentration]
attempts = 55
accuracy = 80.0

[batteries.perceptual]
attempts = 38
accuracy = 95.0
"#;
