mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("pairscan CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        configure_threads(num_threads)?;
    }

    let command_result = match cli.command {
        Commands::Scan(args) => {
            info!("Dispatching to 'scan' command.");
            commands::scan::run(args)
        }
        Commands::Check(args) => {
            info!("Dispatching to 'check' command.");
            commands::check::run(args)
        }
        Commands::Criteria(args) => commands::criteria::run(args),
    };

    match &command_result {
        Ok(()) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    command_result
}

#[cfg(feature = "parallel")]
fn configure_threads(num_threads: usize) -> Result<()> {
    info!("Setting Rayon global thread pool to {} threads.", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .map_err(|e| anyhow::anyhow!("Failed to build global thread pool: {}", e).into())
}

#[cfg(not(feature = "parallel"))]
fn configure_threads(num_threads: usize) -> Result<()> {
    tracing::warn!(
        "Ignoring --threads {}: built without the 'parallel' feature.",
        num_threads
    );
    Ok(())
}
