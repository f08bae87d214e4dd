use super::angle::Angle;
use nalgebra::UnitQuaternion;

/// Orientation of a residue, or the relative orientation between two residues.
pub type Frame = UnitQuaternion<f64>;

/// Cheap monotone stand-in for the angle between two frames: `1 - |a . b|`.
///
/// Zero for identical orientations, one for orientations half a revolution apart.
pub fn distance_1(a: &Frame, b: &Frame) -> f64 {
    1.0 - a.coords.dot(&b.coords).abs()
}

/// The [`distance_1`] value of two frames separated by `angle`.
pub fn distance_1_of_angle(angle: Angle) -> f64 {
    1.0 - (angle / 2.0).cos().abs()
}

pub fn angle_between(a: &Frame, b: &Frame) -> Angle {
    Angle::from_radians(a.angle_to(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn distance_1_of_identical_frames_is_zero() {
        let frame = Frame::from_axis_angle(&Vector3::z_axis(), 0.7);
        assert!(f64_approx_equal(distance_1(&frame, &frame), 0.0));
    }

    #[test]
    fn distance_1_matches_distance_1_of_angle_between_frames() {
        let a = Frame::from_axis_angle(&Vector3::x_axis(), 0.2);
        let b = Frame::from_axis_angle(&Vector3::x_axis(), 0.2 + 35f64.to_radians());
        let expected = distance_1_of_angle(Angle::from_degrees(35.0));
        assert!(f64_approx_equal(distance_1(&a, &b), expected));
        assert!(f64_approx_equal(angle_between(&a, &b).degrees(), 35.0));
    }

    #[test]
    fn distance_1_ignores_quaternion_sign() {
        let a = Frame::from_axis_angle(&Vector3::y_axis(), 1.0);
        let negated = Frame::new_unchecked(-a.into_inner());
        assert!(f64_approx_equal(distance_1(&a, &negated), 0.0));
    }

    #[test]
    fn distance_1_of_angle_grows_with_angle() {
        let small = distance_1_of_angle(Angle::from_degrees(22.5));
        let large = distance_1_of_angle(Angle::from_degrees(45.0));
        assert!(small < large);
        assert!(f64_approx_equal(distance_1_of_angle(Angle::ZERO), 0.0));
        assert!(f64_approx_equal(distance_1_of_angle(Angle::HALF_REVOLUTION), 1.0));
    }
}
