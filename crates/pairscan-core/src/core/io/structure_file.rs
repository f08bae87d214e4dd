use super::traits::ScanInputFile;
use crate::core::geometry::angle::Angle;
use crate::core::models::residue::{ModelError, ScanResidue, ScanStructure};
use nalgebra::Point3;
use serde::Deserialize;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StructureFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid residue: {0}")]
    Model(#[from] ModelError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawResidue {
    n: [f64; 3],
    ca: [f64; 3],
    c: [f64; 3],
    phi: f64,
    psi: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStructure {
    name: String,
    #[serde(default, rename = "residue")]
    residues: Vec<RawResidue>,
}

/// A structure as a TOML list of backbone residues.
///
/// ```toml
/// name = "1abcA00"
///
/// [[residue]]
/// n = [-0.5, 1.4, 0.0]
/// ca = [0.0, 0.0, 0.0]
/// c = [1.5, 0.0, 0.0]
/// phi = -60.0   # degrees, any range
/// psi = -45.0
/// ```
pub struct TomlStructureFile;

impl ScanInputFile for TomlStructureFile {
    type Output = ScanStructure;
    type Error = StructureFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<ScanStructure, StructureFileError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let raw: RawStructure = toml::from_str(&content)?;

        let residues = raw
            .residues
            .into_iter()
            .enumerate()
            .map(|(index, r)| {
                ScanResidue::from_backbone(
                    index,
                    Point3::from(r.n),
                    Point3::from(r.ca),
                    Point3::from(r.c),
                    Angle::from_degrees(r.phi),
                    Angle::from_degrees(r.psi),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Parsed structure '{}' with {} residues.",
            raw.name,
            residues.len()
        );
        Ok(ScanStructure::new(raw.name, residues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::{Cursor, Write};
    use tempfile::tempdir;

    const TWO_RESIDUES: &str = r#"
        name = "test"

        [[residue]]
        n = [-0.5, 1.4, 0.0]
        ca = [0.0, 0.0, 0.0]
        c = [1.5, 0.0, 0.0]
        phi = -60.0
        psi = -45.0

        [[residue]]
        n = [3.3, 1.4, 0.0]
        ca = [3.8, 0.0, 0.0]
        c = [5.3, 0.0, 0.0]
        phi = 120.0
        psi = 130.0
    "#;

    #[test]
    fn read_from_parses_residues_in_order() {
        let structure = TomlStructureFile::read_from(&mut Cursor::new(TWO_RESIDUES)).unwrap();
        assert_eq!(structure.name(), "test");
        assert_eq!(structure.len(), 2);
        let second = structure.residue(1).unwrap();
        assert!((second.carbon_alpha().x - 3.8).abs() < 1e-9);
        assert!((structure.residue(0).unwrap().phi().degrees() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn read_from_path_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("structure.toml");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", TWO_RESIDUES).unwrap();

        let structure = TomlStructureFile::read_from_path(&path).unwrap();
        assert_eq!(structure.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = TomlStructureFile::read_from_path("/definitely/not/here.toml");
        assert!(matches!(result, Err(StructureFileError::Io(_))));
    }

    #[test]
    fn unknown_residue_field_is_rejected() {
        let content = r#"
            name = "bad"
            [[residue]]
            n = [0.0, 1.0, 0.0]
            ca = [0.0, 0.0, 0.0]
            c = [1.0, 0.0, 0.0]
            phi = 0.0
            psi = 0.0
            omega = 180.0
        "#;
        let result = TomlStructureFile::read_from(&mut Cursor::new(content));
        assert!(matches!(result, Err(StructureFileError::Toml(_))));
    }

    #[test]
    fn degenerate_backbone_is_model_error() {
        let content = r#"
            name = "flat"
            [[residue]]
            n = [-1.0, 0.0, 0.0]
            ca = [0.0, 0.0, 0.0]
            c = [1.0, 0.0, 0.0]
            phi = 0.0
            psi = 0.0
        "#;
        let result = TomlStructureFile::read_from(&mut Cursor::new(content));
        assert!(matches!(
            result,
            Err(StructureFileError::Model(ModelError::DegenerateBackbone { index: 0 }))
        ));
    }
}
