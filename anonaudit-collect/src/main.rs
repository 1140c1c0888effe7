//! Dataset ingestion and audit-run CLI.

use anonaudit_collect::{execute_cli, Cli};
use anonaudit_core::logging::init_logging;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    if let Err(error) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }

    match execute_cli(&cli) {
        Ok(output) => println!("{output}"),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}
