//! Geometric primitives shared by the residue models and the keyers: plane angles with
//! circular arithmetic, residue frames, and backbone-derived positions.

pub mod angle;
pub mod backbone;
pub mod frame;

pub use angle::Angle;
pub use frame::Frame;
