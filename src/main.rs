use clap::Parser;
use colored::*;
use std::process;
use taxtree::cli::Cli;
use taxtree::TaxTreeError;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins, then TAXTREE_LOG, then the -v count
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let log_level = std::env::var("TAXTREE_LOG").unwrap_or_else(|_| default_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = taxtree::cli::commands::run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<TaxTreeError>() {
            Some(TaxTreeError::Config(_)) => 2,
            Some(TaxTreeError::Io(_)) | Some(TaxTreeError::SourceNotFound { .. }) => 3,
            Some(TaxTreeError::TreeConstruction(_))
            | Some(TaxTreeError::DuplicateName { .. }) => 4,
            Some(TaxTreeError::UnknownTaxon(_)) | Some(TaxTreeError::InvalidRank(_)) => 5,
            Some(TaxTreeError::Invariant(_)) | None => 1,
        };
        process::exit(exit_code);
    }
}
