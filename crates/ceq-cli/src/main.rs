//! # ceq CLI entry point
//!
//! Initializes tracing and prints the engine banner.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ceq_cli::{write_banner, ENGINE_VERSION};
use ceq_engine::EquivalenceEngine;

/// Computational Equivalence Engine
///
/// Classifies pairs of legal concepts from different jurisdictions into an
/// 8-level equivalence taxonomy. Output is advisory only.
#[derive(Parser, Debug)]
#[command(name = "ceq", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!("ceq v{ENGINE_VERSION} starting");

    let engine = EquivalenceEngine::new();
    tracing::debug!(calibration = ?engine.calibration(), "engine initialized");

    let stdout = std::io::stdout();
    match write_banner(&mut stdout.lock(), engine.calibration()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
