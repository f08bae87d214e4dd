use super::read_structure;
use crate::cli::CheckArgs;
use crate::config::PartialScanConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use pairscan::core::io::alignment_file::AlignmentFile;
use pairscan::core::io::traits::ScanInputFile;
use pairscan::engine::progress::ProgressReporter;
use pairscan::workflows::check::check_alignment;
use tracing::info;

pub fn run(args: CheckArgs) -> Result<()> {
    let partial_config = PartialScanConfig::load(&args.source)?;
    let criteria = partial_config.resolve_criteria(&args.source)?;
    let stride = partial_config.resolve_stride(&args.source);
    info!(%criteria, "Criteria resolved.");

    let query = read_structure(&args.query)?;
    let index = read_structure(&args.index)?;
    let alignment = AlignmentFile::read_from_path(&args.alignment).map_err(|e| CliError::FileParsing {
        path: args.alignment.clone(),
        source: e.into(),
    })?;
    info!(positions = alignment.len(), "Alignment loaded.");

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let check = check_alignment(&query, &index, &alignment, &criteria, &stride, &reporter)?;

    println!("{} quads over {} aligned positions", check.num_quads(), alignment.len());
    println!("{check}");
    if let Some(recall) = check.rep_recall() {
        println!("representative recall: {:.1}%", 100.0 * recall);
    }
    Ok(())
}
