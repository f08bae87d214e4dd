pub mod check;
pub mod criteria;
pub mod scan;

use crate::error::{CliError, Result};
use pairscan::core::io::structure_file::TomlStructureFile;
use pairscan::core::io::traits::ScanInputFile;
use pairscan::core::models::residue::ScanStructure;
use std::path::Path;
use tracing::info;

pub(crate) fn read_structure(path: &Path) -> Result<ScanStructure> {
    info!("Loading structure from {:?}", path);
    let structure = TomlStructureFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    info!(
        name = structure.name(),
        residues = structure.len(),
        "Structure loaded."
    );
    Ok(structure)
}
