//! SizeTree: disk usage by directory, as a sorted tree.
//!
//! Thin binary entry point. All logic lives in the `sizetree-core`
//! and `sizetree-cli` crates.

use clap::Parser;
use sizetree_cli::Args;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("SizeTree starting");

    match sizetree_cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
