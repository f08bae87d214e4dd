//! The concrete keyer dimensions.

mod index_dirn;
mod orientation;
mod phi_psi_angle;
mod skip;
mod view_axis;

pub use index_dirn::IndexDirnKeyerPart;
pub use orientation::OrientationKeyerPart;
pub use phi_psi_angle::{PhiPsiAngle, PhiPsiAngleKeyerPart};
pub use skip::Skip;
pub use view_axis::{ViewAxis, ViewAxisKeyerPart};
