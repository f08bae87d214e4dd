use crate::core::geometry::angle::Angle;
use crate::core::geometry::backbone::{self, CbCreationParams};
use crate::core::geometry::frame::Frame;
use nalgebra::{Point3, Rotation3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("{name} angle ({degrees}°) is not in valid range [0, 360]")]
    AngleOutOfRange { name: &'static str, degrees: f64 },
    #[error("Backbone atoms of residue {index} are degenerate (collinear or coincident)")]
    DegenerateBackbone { index: usize },
}

/// The per-residue data the scanner needs: positions, orientation and backbone dihedrals.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResidue {
    carbon_alpha: Point3<f64>,
    carbon_beta: Point3<f64>,
    frame: Rotation3<f64>,
    phi: Angle,
    psi: Angle,
}

impl ScanResidue {
    /// Builds a residue from explicit values.
    ///
    /// `phi` and `psi` must lie in `[0, 2pi]`; a full revolution is stored as zero.
    pub fn new(
        carbon_alpha: Point3<f64>,
        carbon_beta: Point3<f64>,
        frame: Rotation3<f64>,
        phi: Angle,
        psi: Angle,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            carbon_alpha,
            carbon_beta,
            frame,
            phi: checked_dihedral("Phi", phi)?,
            psi: checked_dihedral("Psi", psi)?,
        })
    }

    /// Builds a residue from its N, CA and C atoms, placing an ideal carbon-beta.
    ///
    /// Dihedrals may be given in any range (e.g. `(-180, 180]`) and are shifted.
    pub fn from_backbone(
        index: usize,
        n: Point3<f64>,
        carbon_alpha: Point3<f64>,
        c: Point3<f64>,
        phi: Angle,
        psi: Angle,
    ) -> Result<Self, ModelError> {
        let degenerate = || ModelError::DegenerateBackbone { index };
        let frame = backbone::backbone_frame(&n, &carbon_alpha, &c).ok_or_else(degenerate)?;
        let carbon_beta =
            backbone::calculate_cb_position(&n, &carbon_alpha, &c, &CbCreationParams::default())
                .ok_or_else(degenerate)?;
        Ok(Self {
            carbon_alpha,
            carbon_beta,
            frame,
            phi: phi.shifted(),
            psi: psi.shifted(),
        })
    }

    pub fn carbon_alpha(&self) -> &Point3<f64> {
        &self.carbon_alpha
    }

    pub fn carbon_beta(&self) -> &Point3<f64> {
        &self.carbon_beta
    }

    pub fn frame(&self) -> &Rotation3<f64> {
        &self.frame
    }

    pub fn frame_quaternion(&self) -> Frame {
        Frame::from_rotation_matrix(&self.frame)
    }

    pub fn phi(&self) -> Angle {
        self.phi
    }

    pub fn psi(&self) -> Angle {
        self.psi
    }
}

fn checked_dihedral(name: &'static str, angle: Angle) -> Result<Angle, ModelError> {
    if angle < Angle::ZERO || angle > Angle::ONE_REVOLUTION {
        return Err(ModelError::AngleOutOfRange {
            name,
            degrees: angle.degrees(),
        });
    }
    Ok(angle.shifted())
}

/// An ordered list of residues, addressed by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanStructure {
    name: String,
    residues: Vec<ScanResidue>,
}

impl ScanStructure {
    pub fn new(name: impl Into<String>, residues: Vec<ScanResidue>) -> Self {
        Self {
            name: name.into(),
            residues,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn residue(&self, index: usize) -> Option<&ScanResidue> {
        self.residues.get(index)
    }

    pub fn residues(&self) -> &[ScanResidue] {
        &self.residues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_residue(phi_degrees: f64, psi_degrees: f64) -> Result<ScanResidue, ModelError> {
        ScanResidue::new(
            Point3::origin(),
            Point3::new(0.0, 0.0, 1.5),
            Rotation3::identity(),
            Angle::from_degrees(phi_degrees),
            Angle::from_degrees(psi_degrees),
        )
    }

    #[test]
    fn new_accepts_dihedrals_within_one_revolution() {
        let residue = sample_residue(120.0, 300.0).unwrap();
        assert!((residue.phi().degrees() - 120.0).abs() < 1e-9);
        assert!((residue.psi().degrees() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn new_stores_full_revolution_as_zero() {
        let residue = sample_residue(360.0, 0.0).unwrap();
        assert_eq!(residue.phi(), Angle::ZERO);
    }

    #[test]
    fn new_rejects_negative_dihedral() {
        let result = sample_residue(-10.0, 20.0);
        assert!(matches!(
            result,
            Err(ModelError::AngleOutOfRange { name: "Phi", .. })
        ));
    }

    #[test]
    fn new_rejects_dihedral_beyond_one_revolution() {
        let result = sample_residue(10.0, 361.0);
        assert!(matches!(
            result,
            Err(ModelError::AngleOutOfRange { name: "Psi", .. })
        ));
    }

    #[test]
    fn from_backbone_shifts_signed_dihedrals() {
        let residue = ScanResidue::from_backbone(
            0,
            Point3::new(-0.5, 1.4, 0.0),
            Point3::origin(),
            Point3::new(1.5, 0.0, 0.0),
            Angle::from_degrees(-60.0),
            Angle::from_degrees(-45.0),
        )
        .unwrap();
        assert!((residue.phi().degrees() - 300.0).abs() < 1e-9);
        assert!((residue.psi().degrees() - 315.0).abs() < 1e-9);
        assert!((residue.carbon_beta() - residue.carbon_alpha()).norm() > 1.0);
    }

    #[test]
    fn from_backbone_reports_degenerate_residue_index() {
        let result = ScanResidue::from_backbone(
            7,
            Point3::new(-1.0, 0.0, 0.0),
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Angle::ZERO,
            Angle::ZERO,
        );
        assert_eq!(result, Err(ModelError::DegenerateBackbone { index: 7 }));
    }

    #[test]
    fn structure_addresses_residues_by_position() {
        let structure = ScanStructure::new(
            "1abc",
            vec![sample_residue(1.0, 2.0).unwrap(), sample_residue(3.0, 4.0).unwrap()],
        );
        assert_eq!(structure.len(), 2);
        assert_eq!(structure.name(), "1abc");
        assert!(structure.residue(1).is_some());
        assert!(structure.residue(2).is_none());
    }
}
