use nalgebra::{Matrix3, Point3, Rotation3, Unit, Vector3};

const DEGENERATE_LENGTH: f64 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub struct CbCreationParams {
    pub off_bisector_angle: f64,
    pub off_plane_angle: f64,
    pub bond_length: f64,
}

impl Default for CbCreationParams {
    fn default() -> Self {
        Self {
            off_bisector_angle: 0.0,
            off_plane_angle: 54.75,
            bond_length: 1.53,
        }
    }
}

/// Places an ideal carbon-beta from the N, CA and C backbone atoms.
///
/// Returns `None` when the backbone atoms are collinear or coincident.
pub fn calculate_cb_position(
    n_pos: &Point3<f64>,
    ca_pos: &Point3<f64>,
    c_pos: &Point3<f64>,
    params: &CbCreationParams,
) -> Option<Point3<f64>> {
    let ca_n = (n_pos - ca_pos).try_normalize(DEGENERATE_LENGTH)?;
    let ca_c = (c_pos - ca_pos).try_normalize(DEGENERATE_LENGTH)?;

    let bisector = -(ca_n + ca_c).try_normalize(DEGENERATE_LENGTH)?;
    let plane_normal = Unit::try_new(ca_n.cross(&ca_c), DEGENERATE_LENGTH)?;

    let rot_off_bisector =
        Rotation3::from_axis_angle(&plane_normal, params.off_bisector_angle.to_radians());
    let cb_vec_in_plane = rot_off_bisector * bisector;

    let in_plane_axis = Unit::new_normalize(plane_normal.cross(&cb_vec_in_plane));
    let rot_off_plane =
        Rotation3::from_axis_angle(&in_plane_axis, params.off_plane_angle.to_radians());
    let final_cb_vec = rot_off_plane * cb_vec_in_plane;

    Some(ca_pos + final_cb_vec * params.bond_length)
}

/// Right-handed residue frame: x along CA->C, z normal to the N-CA-C plane.
///
/// The returned rotation maps residue-local coordinates to global coordinates.
pub fn backbone_frame(
    n_pos: &Point3<f64>,
    ca_pos: &Point3<f64>,
    c_pos: &Point3<f64>,
) -> Option<Rotation3<f64>> {
    let x_axis = (c_pos - ca_pos).try_normalize(DEGENERATE_LENGTH)?;
    let z_axis = x_axis
        .cross(&(n_pos - ca_pos))
        .try_normalize(DEGENERATE_LENGTH)?;
    let y_axis = z_axis.cross(&x_axis);
    Some(Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[
        x_axis, y_axis, z_axis,
    ])))
}

pub fn local_coordinates(
    frame: &Rotation3<f64>,
    origin: &Point3<f64>,
    point: &Point3<f64>,
) -> Vector3<f64> {
    frame.inverse_transform_vector(&(point - origin))
}
