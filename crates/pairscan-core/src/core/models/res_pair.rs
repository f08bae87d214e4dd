use super::residue::{ScanResidue, ScanStructure};
use crate::core::geometry::angle::Angle;
use crate::core::geometry::backbone;
use crate::core::geometry::frame::{self, Frame};
use nalgebra::Vector3;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Whether a pair runs forwards (from-residue before to-residue) or backwards along the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum ResPairDirn {
    Increase = 0,
    Decrease = 1,
}

impl ResPairDirn {
    pub fn of_indices(from: usize, to: usize) -> Self {
        if from < to {
            ResPairDirn::Increase
        } else {
            ResPairDirn::Decrease
        }
    }
}

// Hashed through the discriminant so that composite keys hash the same integer stream
// regardless of how the enum is laid out.
impl Hash for ResPairDirn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (*self as u8).hash(state);
    }
}

impl fmt::Display for ResPairDirn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResPairDirn::Increase => write!(f, "INCREASE"),
            ResPairDirn::Decrease => write!(f, "DECREASE"),
        }
    }
}

/// The relative geometry of an ordered pair of residues.
///
/// - `view`: the to-residue's carbon-beta as seen from the from-residue (its carbon-alpha at
///   the origin, axes along its frame).
/// - `frame`: the to-residue's orientation relative to the from-residue's.
/// - the backbone dihedrals of both residues.
#[derive(Debug, Clone, PartialEq)]
pub struct ResPairCore {
    view: Vector3<f64>,
    frame: Frame,
    from_phi: Angle,
    from_psi: Angle,
    to_phi: Angle,
    to_psi: Angle,
}

impl ResPairCore {
    pub fn new(
        view: Vector3<f64>,
        frame: Frame,
        from_phi: Angle,
        from_psi: Angle,
        to_phi: Angle,
        to_psi: Angle,
    ) -> Self {
        Self {
            view,
            frame,
            from_phi,
            from_psi,
            to_phi,
            to_psi,
        }
    }

    pub fn between(from: &ScanResidue, to: &ScanResidue) -> Self {
        let view =
            backbone::local_coordinates(from.frame(), from.carbon_alpha(), to.carbon_beta());
        let relative = from.frame().inverse() * to.frame();
        Self {
            view,
            frame: Frame::from_rotation_matrix(&relative),
            from_phi: from.phi(),
            from_psi: from.psi(),
            to_phi: to.phi(),
            to_psi: to.psi(),
        }
    }

    pub fn view(&self) -> &Vector3<f64> {
        &self.view
    }

    pub fn view_x(&self) -> f64 {
        self.view.x
    }

    pub fn view_y(&self) -> f64 {
        self.view.y
    }

    pub fn view_z(&self) -> f64 {
        self.view.z
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn from_phi(&self) -> Angle {
        self.from_phi
    }

    pub fn from_psi(&self) -> Angle {
        self.from_psi
    }

    pub fn to_phi(&self) -> Angle {
        self.to_phi
    }

    pub fn to_psi(&self) -> Angle {
        self.to_psi
    }

    pub fn squared_distance(&self, other: &ResPairCore) -> f64 {
        (self.view - other.view).norm_squared()
    }

    pub fn distance_1_between_frames(&self, other: &ResPairCore) -> f64 {
        frame::distance_1(&self.frame, &other.frame)
    }

    pub fn angle_between_frames(&self, other: &ResPairCore) -> Angle {
        frame::angle_between(&self.frame, &other.frame)
    }

    pub fn max_phi_angle_difference(&self, other: &ResPairCore) -> Angle {
        self.from_phi
            .wrapped_difference(other.from_phi)
            .max(self.to_phi.wrapped_difference(other.to_phi))
    }

    pub fn max_psi_angle_difference(&self, other: &ResPairCore) -> Angle {
        self.from_psi
            .wrapped_difference(other.from_psi)
            .max(self.to_psi.wrapped_difference(other.to_psi))
    }
}

/// Anything built on a [`ResPairCore`] that knows which way it runs.
pub trait ResPair {
    fn core(&self) -> &ResPairCore;
    fn direction(&self) -> ResPairDirn;

    fn same_direction(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.direction() == other.direction()
    }
}

/// A pair of representative residues within one of several structures; the payload of index cells.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiStrucResRepPair {
    core: ResPairCore,
    structure_index: usize,
    from_rep: usize,
    to_rep: usize,
}

impl MultiStrucResRepPair {
    pub fn new(core: ResPairCore, structure_index: usize, from_rep: usize, to_rep: usize) -> Self {
        Self {
            core,
            structure_index,
            from_rep,
            to_rep,
        }
    }

    pub fn from_residues(
        from: &ScanResidue,
        to: &ScanResidue,
        structure_index: usize,
        from_rep: usize,
        to_rep: usize,
    ) -> Self {
        Self::new(
            ResPairCore::between(from, to),
            structure_index,
            from_rep,
            to_rep,
        )
    }

    pub fn structure_index(&self) -> usize {
        self.structure_index
    }

    pub fn from_rep(&self) -> usize {
        self.from_rep
    }

    pub fn to_rep(&self) -> usize {
        self.to_rep
    }
}

impl ResPair for MultiStrucResRepPair {
    fn core(&self) -> &ResPairCore {
        &self.core
    }

    fn direction(&self) -> ResPairDirn {
        ResPairDirn::of_indices(self.from_rep, self.to_rep)
    }
}

impl fmt::Display for MultiStrucResRepPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rep_pair[struc:{}, {}->{}, view:({:.3}, {:.3}, {:.3})]",
            self.structure_index,
            self.from_rep,
            self.to_rep,
            self.core.view_x(),
            self.core.view_y(),
            self.core.view_z()
        )
    }
}

/// A pair of residues within a single structure, addressed by residue index.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleStrucResPair {
    core: ResPairCore,
    from_index: usize,
    to_index: usize,
}

impl SingleStrucResPair {
    pub fn new(core: ResPairCore, from_index: usize, to_index: usize) -> Self {
        Self {
            core,
            from_index,
            to_index,
        }
    }

    /// Returns `None` if either index is outside the structure.
    pub fn from_structure(structure: &ScanStructure, from_index: usize, to_index: usize) -> Option<Self> {
        let from = structure.residue(from_index)?;
        let to = structure.residue(to_index)?;
        Some(Self::new(
            ResPairCore::between(from, to),
            from_index,
            to_index,
        ))
    }

    pub fn from_index(&self) -> usize {
        self.from_index
    }

    pub fn to_index(&self) -> usize {
        self.to_index
    }
}

impl ResPair for SingleStrucResPair {
    fn core(&self) -> &ResPairCore {
        &self.core
    }

    fn direction(&self) -> ResPairDirn {
        ResPairDirn::of_indices(self.from_index, self.to_index)
    }
}
