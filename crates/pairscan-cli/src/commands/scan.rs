use super::read_structure;
use crate::cli::ScanArgs;
use crate::config::PartialScanConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use pairscan::core::models::residue::ScanStructure;
use pairscan::engine::keyer::Validation;
use pairscan::engine::progress::ProgressReporter;
use pairscan::workflows::scan::{self, ScanResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::{info, warn};

pub fn run(args: ScanArgs) -> Result<()> {
    let partial_config = PartialScanConfig::load(&args.source)?;
    let mut builder = partial_config.into_builder(&args.source)?;
    if let Some(kind) = args.index_store {
        builder = builder.index_store(kind.into());
    }
    if let Some(kind) = args.query_store {
        builder = builder.query_store(kind.into());
    }
    if let Some(density) = args.density {
        builder = builder.index_density(density.into());
    }
    if args.unchecked {
        builder = builder.validation(Validation::Unchecked);
    }
    let config = builder.build().map_err(|e| CliError::Config(e.to_string()))?;
    info!(
        criteria = %config.criteria,
        index_store = %config.index_store,
        density = %config.index_density,
        "Configuration resolved."
    );

    let query = read_structure(&args.query)?;
    let index_structures = args
        .index
        .iter()
        .map(|path| read_structure(path))
        .collect::<Result<Vec<_>>>()?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Scanning {} against {} indexed structure(s)...",
        query.name(),
        index_structures.len()
    );
    let result = scan::run(&query, &index_structures, &config, &reporter)?;

    if result.matches.is_empty() {
        warn!("Scan completed but found no matches.");
    }

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_matches(&result, &index_structures, &mut writer)?;
            writer.flush()?;
            println!("✓ {} match(es) written to: {}", result.matches.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_matches(&result, &index_structures, &mut stdout.lock())?;
        }
    }

    let stats = &result.stats;
    info!(
        index_cells = stats.index_cells,
        index_entries = stats.index_entries,
        index_bytes = stats.index_bytes,
        query_entries = stats.query_entries,
        examined = stats.candidates_examined,
        "Scan statistics."
    );
    Ok(())
}

/// One tab-separated line per match: index structure name, then query and index positions.
fn write_matches(
    result: &ScanResult,
    index_structures: &[ScanStructure],
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "# structure\tquery_from\tquery_to\tindex_from\tindex_to")?;
    for m in &result.matches {
        let name = index_structures
            .get(m.index_structure)
            .map_or("?", ScanStructure::name);
        writeln!(
            out,
            "{name}\t{}\t{}\t{}\t{}",
            m.query_from, m.query_to, m.index_from, m.index_to
        )?;
    }
    Ok(())
}
