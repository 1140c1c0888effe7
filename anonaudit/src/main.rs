//! Report inspection and validation tool.
//!
//! This binary post-processes a JSON report produced by
//! `anonaudit-collect`: `show` prints a section in human-readable form,
//! `validate` checks the report against the embedded JSON Schema.
//!
//! # Security Guarantees
//! - Operates completely offline (no network connectivity required)
//! - No telemetry or external reporting

use std::fs;
use std::path::PathBuf;

use anonaudit_core::logging::init_logging;
use anonaudit_core::validation;
use anonaudit_core::{AnonAuditError, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::info;

#[derive(Parser)]
#[command(name = "anonaudit")]
#[command(about = "Report inspection and validation tool for anonymization audit reports")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print one section of a report in human-readable form.
    Show(ShowArgs),
    /// Validate a report against the embedded JSON Schema.
    Validate(ValidateArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Path to the report JSON file.
    pub report: PathBuf,

    /// The section to print; prints the whole report if omitted.
    #[arg(long, value_enum)]
    pub section: Option<Section>,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the report JSON file.
    pub report: PathBuf,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Clone, ValueEnum)]
pub enum Section {
    Summary,
    Privacy,
    Classes,
    Risk,
}

impl Section {
    fn key(&self) -> &'static str {
        match self {
            Section::Summary => "Summary statistics",
            Section::Privacy => "Privacy model verification",
            Section::Classes => "Equivalence class statistics",
            Section::Risk => "Attacker model risks",
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(error) = init_logging(cli.global.verbose, cli.global.quiet) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }

    let result = match &cli.command {
        Command::Show(args) => show(args),
        Command::Validate(args) => validate(args),
    };

    if let Err(error) = result {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn load_report(path: &PathBuf) -> Result<Value> {
    let contents = fs::read_to_string(path).map_err(|e| AnonAuditError::Io {
        context: format!("failed to read report file {}", path.display()),
        source: e,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

fn show(args: &ShowArgs) -> Result<()> {
    let report = load_report(&args.report)?;
    info!("loaded report from {}", args.report.display());

    let rendered = match &args.section {
        Some(section) => report.get(section.key()).cloned().unwrap_or(Value::Object(serde_json::Map::new())),
        None => report,
    };

    println!("{}", anonaudit_core::report::to_canonical_json(&rendered));
    Ok(())
}

fn validate(args: &ValidateArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.report).map_err(|e| AnonAuditError::Io {
        context: format!("failed to read report file {}", args.report.display()),
        source: e,
    })?;

    validation::validate_report_str(&contents).map_err(|e| {
        AnonAuditError::configuration(format!("report failed schema validation: {e}"))
    })?;
    println!("report is valid");
    Ok(())
}
