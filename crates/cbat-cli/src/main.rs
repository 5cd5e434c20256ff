//! cbat CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cbat", version, about = "CBAT psychometric battery score reporting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a candidate's battery results
    Submit {
        /// Path to a submission .toml file
        #[arg(long)]
        file: PathBuf,

        /// Overwrite an existing record with the same roll number
        #[arg(long)]
        confirm_update: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check whether a roll number is already on record
    Check {
        /// Roll number to look up
        roll_no: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate the two-view comparison report for a candidate
    Report {
        /// Roll number to report on
        roll_no: String,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Also save the report as JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export all records as CSV (admin-gated)
    Export {
        /// Where to write the CSV file
        #[arg(long)]
        output: PathBuf,

        /// Admin password (falls back to CBAT_ADMIN_PASSWORD)
        #[arg(long)]
        password: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compute the salted password hash for the config file
    Credential {
        /// Salt to prepend before hashing
        #[arg(long)]
        salt: String,

        /// The admin password to hash
        password: String,
    },

    /// Create starter config and an example submission
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cbat=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Submit {
            file,
            confirm_update,
            config,
        } => commands::submit::execute(file, confirm_update, config),
        Commands::Check {
            roll_no,
            format,
            config,
        } => commands::check::execute(roll_no, format, config),
        Commands::Report {
            roll_no,
            format,
            output,
            config,
        } => commands::report::execute(roll_no, format, output, config),
        Commands::Export {
            output,
            password,
            config,
        } => commands::export::execute(output, password, config),
        Commands::Credential { salt, password } => commands::credential::execute(salt, password),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
