//! CLI argument parsing and command execution for `anonaudit-collect`.
//!
//! The binary ingests an original and/or anonymized CSV plus a TOML
//! configuration, runs the engine, and writes the JSON report to disk or
//! stdout. Argument parsing lives here rather than in `main.rs` so the CLI
//! surface can be exercised directly in unit tests.

use std::fs;
use std::path::{Path, PathBuf};

use anonaudit_core::ingest::{self, EngineConfig};
use anonaudit_core::model::Table;
use anonaudit_core::{analyze, AnonAuditError, Report, Result};
use clap::{Parser, Subcommand};

/// CLI argument structure.
#[derive(Parser)]
#[command(name = "anonaudit-collect")]
#[command(about = "Dataset ingestion and audit-run CLI for the anonymization audit toolchain")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the audit engine over an original/anonymized dataset pair.
    Run {
        /// Path to the TOML configuration file.
        #[arg(long, value_name = "FILE")]
        config: PathBuf,

        /// Path to the original (pre-anonymization) CSV file.
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Path to the anonymized CSV file.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Path to write the JSON report to. Defaults to stdout.
        #[arg(long, value_name = "FILE")]
        report_out: Option<PathBuf>,

        /// Pretty-print the report with 4-space indentation.
        #[arg(long)]
        pretty: bool,
    },
    /// Parse and validate a configuration file without running the engine.
    ValidateConfig {
        /// Path to the TOML configuration file.
        config: PathBuf,
    },
}

/// Runs the parsed CLI command, returning the text to print on success.
///
/// # Errors
/// Returns any `AnonAuditError` raised while reading files, parsing
/// configuration, or running the engine.
pub fn execute_cli(cli: &Cli) -> Result<String> {
    match &cli.command {
        Commands::Run { config, input, output, report_out, pretty } => {
            run(config, input.as_deref(), output.as_deref(), report_out.as_deref(), *pretty)
        }
        Commands::ValidateConfig { config } => validate_config(config),
    }
}

fn run(
    config_path: &Path,
    input_path: Option<&Path>,
    output_path: Option<&Path>,
    report_out: Option<&Path>,
    pretty: bool,
) -> Result<String> {
    let config = load_config(config_path)?;
    let input = input_path.map(|p| load_table(p)).transpose_or_warn("input");
    let output = output_path.map(|p| load_table(p)).transpose_or_warn("output");

    let report = analyze(input.as_ref(), output.as_ref(), &config)?;
    let rendered = render_report(&report, pretty)?;

    if let Some(report_out) = report_out {
        fs::write(report_out, &rendered).map_err(|e| AnonAuditError::Io {
            context: format!("failed to write report to {}", report_out.display()),
            source: e,
        })?;
        Ok(format!("report written to {}", report_out.display()))
    } else {
        Ok(rendered)
    }
}

fn validate_config(config_path: &Path) -> Result<String> {
    let config = load_config(config_path)?;
    Ok(format!(
        "configuration is valid: {} quasi-identifying column(s), K={:?}, L={:?}",
        config.qidspec.quasi_identifying.len(),
        config.conf_min_k,
        config.conf_min_l
    ))
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    let contents = fs::read_to_string(path).map_err(|e| AnonAuditError::Io {
        context: format!("failed to read configuration file {}", path.display()),
        source: e,
    })?;
    ingest::parse_config(&contents)
}

fn load_table(path: &Path) -> Result<Table> {
    let path_str = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| AnonAuditError::Io {
        context: format!("failed to read dataset file {path_str}"),
        source: e,
    })?;
    ingest::parse_table(&path_str, &contents)
}

fn render_report(report: &Report, pretty: bool) -> Result<String> {
    if pretty {
        Ok(report.to_canonical_json())
    } else {
        Ok(serde_json::to_string(&report.to_value())?)
    }
}

/// A failed dataset load degrades to "absent" with a warning, rather than
/// aborting the run — the orchestrator surfaces a fatal error only when
/// both datasets are absent.
trait TransposeOrWarn<T> {
    fn transpose_or_warn(self, which: &str) -> Option<T>;
}

impl<T> TransposeOrWarn<T> for Option<Result<T>> {
    fn transpose_or_warn(self, which: &str) -> Option<T> {
        match self {
            Some(Ok(value)) => Some(value),
            Some(Err(error)) => {
                tracing::warn!(dataset = which, error = %error, "failed to load dataset, proceeding without it");
                None
            }
            None => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const CONFIG: &str = r#"
        [main]
        identifying = "id"
        quasi_identifying = "gender"
        sensitive = "dgn"
        blind = "*"

        [thresholds]
        k = "2"
        l = "2"
    "#;

    #[test]
    fn validate_config_reports_column_and_threshold_summary() {
        let config_file = write_temp(CONFIG);
        let output = validate_config(config_file.path()).unwrap();
        assert!(output.contains("1 quasi-identifying column"));
        assert!(output.contains("K=Some(2)"));
    }

    #[test]
    fn run_degrades_to_fatal_error_when_no_dataset_loads() {
        let config_file = write_temp(CONFIG);
        let err = run(config_file.path(), None, None, None, false).unwrap_err();
        assert!(matches!(err, AnonAuditError::NoUsableInput { .. }));
    }

    #[test]
    fn run_produces_a_report_from_a_single_dataset() {
        let config_file = write_temp(CONFIG);
        let data_file = write_temp("id,gender,dgn\n1,M,A\n2,F,B\n3,M,A\n4,F,C\n");
        let output = run(config_file.path(), Some(data_file.path()), None, None, false).unwrap();
        assert!(output.contains("Summary statistics"));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let err = load_config(Path::new("does-not-exist.toml")).unwrap_err();
        assert!(matches!(err, AnonAuditError::Io { .. }));
    }
}
