use crate::error::{CliError, Result};
use std::fs::File;
use std::path::Path;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Maps `-q` and the `-v` count to the most detailed level that is emitted.
pub fn level_filter_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber: compact lines on stderr and, with `log_file`, a full
/// record including thread ids and span fields.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let file_layer = log_file
        .map(|path| {
            File::create(path)
                .map(|file| {
                    fmt::layer()
                        .with_writer(file)
                        .with_ansi(false)
                        .with_thread_ids(true)
                        .with_target(true)
                })
                .map_err(CliError::Io)
        })
        .transpose()?;

    tracing_subscriber::registry()
        .with(level_filter_for(verbosity, quiet))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {e}")))
}
