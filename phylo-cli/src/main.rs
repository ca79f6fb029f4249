use anyhow::Context;
use clap::Parser;
use colored::*;
use std::process;

mod cli;

use crate::cli::{Cli, Commands};
use phylo_core::{init_logging, load_config, Config, PhyloError};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(exit_code(&e));
    }
}

/// Use appropriate exit codes based on error type
fn exit_code(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<PhyloError>() {
        Some(PhyloError::Configuration(_)) => 2,
        Some(PhyloError::Io(_)) => 3,
        Some(PhyloError::Parse(_)) => 4,
        Some(
            PhyloError::InvalidParameter { .. }
            | PhyloError::EmptyInput
            | PhyloError::DuplicateIdentifier(_)
            | PhyloError::MergeLimitExceeded { .. },
        ) => 5,
        _ => 1,
    }
}

/// Each `-v` raises the level one step above the configured one
fn log_level(config: &Config, verbose: u8) -> &str {
    match verbose {
        0 => &config.logging.level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    init_logging(log_level(&config, cli.verbose), config.logging.json)?;

    // Configure thread pool
    let num_threads = if cli.threads == 0 {
        num_cpus::get()
    } else {
        cli.threads
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .context("Failed to initialize thread pool")?;

    tracing::debug!("Using {} threads", num_threads);

    match cli.command {
        Commands::Tree(args) => crate::cli::commands::tree::run(args, &config),
        Commands::Similarity(args) => crate::cli::commands::similarity::run(args, &config),
    }
}
