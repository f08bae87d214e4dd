//! Residue-level inputs to the scanner and the residue-pair values derived from them.
//!
//! Structures arrive already parsed: each residue carries its carbon-alpha and carbon-beta
//! positions, a local frame and backbone dihedrals. Pairs of residues are summarised by a
//! [`res_pair::ResPairCore`] which is what the keyers and criteria look at.

pub mod res_pair;
pub mod residue;
