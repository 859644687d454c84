//! filemap - embed directory trees as a path -> contents map
//!
//! filemap provides:
//! - Concurrent collection of every regular file under one or more roots
//! - Key derivation (raw, absolute, relative to a single root)
//! - Generated output as Rust source, JSON or JSON Lines

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod engine;

use crate::core::error::CollectError;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    setup_logging(cli.verbose, cli.quiet);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            exit_code(&e)
        }
    }
}

/// 2 for usage errors, 1 for everything else
fn exit_code(e: &anyhow::Error) -> ExitCode {
    match e.downcast_ref::<CollectError>() {
        Some(err) if err.is_usage() => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "filemap=debug,warn"
    } else if quiet {
        "filemap=error"
    } else {
        "filemap=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(verbose)
        .with_file(false)
        .with_line_number(false)
        .init();
}
