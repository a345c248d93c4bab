//! Main entry point for the t64dump CLI application.
//!
//! Inputs are processed one after another. A missing input or an image that
//! cannot be decoded makes the exit status non-zero; failures of single
//! programs are reported but do not.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use t64dump::source::{self, LoadedArchive};
use t64dump::{Cli, ExtractOutcome, Extractor, FsSink, Selection, T64Archive, render_listing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    println!("t64dump");
    println!("=======\n");

    let mut ok = true;
    for input in &cli.inputs {
        match process_input(input, &cli).await {
            Ok(all_decoded) => ok &= all_decoded,
            Err(e) => {
                eprintln!("** {}: {:#}", input, e);
                ok = false;
            }
        }
    }

    println!("(end)");

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Log to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load one input and process every tape image in it.
///
/// Returns `Ok(false)` when at least one image could not be read or decoded.
async fn process_input(input: &str, cli: &Cli) -> Result<bool> {
    let archives = source::load(input).await?;
    info!(input, images = archives.len(), "loaded input");

    let mut ok = true;
    for loaded in archives {
        ok &= process_archive(loaded, cli).await;
    }
    Ok(ok)
}

async fn process_archive(loaded: LoadedArchive, cli: &Cli) -> bool {
    let data = match loaded.bytes {
        Ok(data) => data,
        Err(e) => {
            eprintln!("** {}: {:#}", loaded.label, e);
            return false;
        }
    };

    let archive = match T64Archive::parse(&data) {
        Ok(archive) => archive,
        Err(e) => {
            eprintln!("** {}: {}", loaded.label, e);
            return false;
        }
    };

    match cli.selection() {
        None => print!("{}", render_listing(&archive)),
        Some(selection) => extract(&archive, &selection, cli).await,
    }

    true
}

/// Extract the selected programs and report each record.
async fn extract(archive: &T64Archive<'_>, selection: &Selection, cli: &Cli) {
    let sink = FsSink::new(&cli.dest);
    let report = Extractor::new(&sink).extract(archive, selection).await;

    for outcome in &report.outcomes {
        match outcome {
            ExtractOutcome::Extracted {
                name, identifier, ..
            } => {
                if !cli.quiet {
                    println!(
                        "Extracting file {} to {}",
                        name,
                        sink.path_for(identifier).display()
                    );
                }
            }
            ExtractOutcome::Skipped { name } => {
                if !cli.quiet {
                    println!("Skipping file {}", name);
                }
            }
            ExtractOutcome::Failed { name, error } => {
                eprintln!("** Error extracting {}: {}", name, error);
            }
        }
    }

    for name in &report.missing {
        eprintln!("** File not found in archive: {}", name);
    }
}
