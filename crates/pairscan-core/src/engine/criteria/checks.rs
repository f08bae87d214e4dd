use super::QuadCriteria;
use crate::core::models::res_pair::{MultiStrucResRepPair, ResPair, ResPairCore, SingleStrucResPair};

/// A residue pair that can be screened on its own before being compared with another.
pub trait SingleChecks: ResPair {
    /// Whether this pair could match anything under `criteria`.
    fn are_not_violated_by(&self, criteria: &QuadCriteria) -> bool;
}

impl SingleChecks for MultiStrucResRepPair {
    fn are_not_violated_by(&self, _criteria: &QuadCriteria) -> bool {
        self.from_rep() != self.to_rep()
    }
}

impl SingleChecks for SingleStrucResPair {
    fn are_not_violated_by(&self, criteria: &QuadCriteria) -> bool {
        let (from, to) = (self.from_index(), self.to_index());
        from != to && from.abs_diff(to) >= criteria.minimum_index_distance()
    }
}

/// Geometric checks only: view distance, frame, phi, psi.
pub fn core_are_met_by(criteria: &QuadCriteria, a: &ResPairCore, b: &ResPairCore) -> bool {
    a.squared_distance(b) <= criteria.maximum_squared_distance()
        && a.distance_1_between_frames(b) <= criteria.maximum_frame_angle_distance_1()
        && a.max_phi_angle_difference(b) <= criteria.maximum_phi_angle_difference()
        && a.max_psi_angle_difference(b) <= criteria.maximum_psi_angle_difference()
}

/// Every pairwise check, including direction when the criteria require it.
pub fn are_met_by<P: ResPair>(criteria: &QuadCriteria, a: &P, b: &P) -> bool {
    core_are_met_by(criteria, a.core(), b.core())
        && (!criteria.requires_matching_directions() || a.same_direction(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::angle::Angle;
    use crate::core::geometry::frame::Frame;
    use crate::engine::criteria::{DirectionCriterion, QuadCriteriaBuilder};
    use nalgebra::Vector3;

    fn core(view_x: f64, frame_degrees: f64, phi_degrees: f64, psi_degrees: f64) -> ResPairCore {
        ResPairCore::new(
            Vector3::new(view_x, 0.0, 0.0),
            Frame::from_axis_angle(&Vector3::z_axis(), frame_degrees.to_radians()),
            Angle::from_degrees(phi_degrees),
            Angle::from_degrees(psi_degrees),
            Angle::from_degrees(phi_degrees),
            Angle::from_degrees(psi_degrees),
        )
    }

    #[test]
    fn rep_pair_fails_single_checks_only_when_reps_coincide() {
        let criteria = QuadCriteria::default();
        let same = MultiStrucResRepPair::new(core(0.0, 0.0, 0.0, 0.0), 0, 4, 4);
        let close = MultiStrucResRepPair::new(core(0.0, 0.0, 0.0, 0.0), 0, 4, 5);
        assert!(!same.are_not_violated_by(&criteria));
        assert!(close.are_not_violated_by(&criteria));
    }

    #[test]
    fn single_pair_needs_minimum_index_distance() {
        let criteria = QuadCriteria::default();
        let near = SingleStrucResPair::new(core(0.0, 0.0, 0.0, 0.0), 20, 10);
        let far = SingleStrucResPair::new(core(0.0, 0.0, 0.0, 0.0), 20, 9);
        assert!(!near.are_not_violated_by(&criteria));
        assert!(far.are_not_violated_by(&criteria));
    }

    #[test]
    fn identical_cores_meet_criteria() {
        let criteria = QuadCriteria::default();
        let a = core(1.0, 10.0, 100.0, 200.0);
        assert!(core_are_met_by(&criteria, &a, &a.clone()));
    }

    #[test]
    fn each_geometric_threshold_is_enforced() {
        let criteria = QuadCriteria::default();
        let base = core(0.0, 0.0, 100.0, 100.0);
        assert!(!core_are_met_by(&criteria, &base, &core(6.4, 0.0, 100.0, 100.0)));
        assert!(!core_are_met_by(&criteria, &base, &core(0.0, 36.0, 100.0, 100.0)));
        assert!(!core_are_met_by(&criteria, &base, &core(0.0, 0.0, 170.0, 100.0)));
        assert!(!core_are_met_by(&criteria, &base, &core(0.0, 0.0, 100.0, 30.0)));
        assert!(core_are_met_by(&criteria, &base, &core(6.3, 34.0, 167.0, 33.0)));
    }

    #[test]
    fn direction_is_only_checked_when_required() {
        let must_match = QuadCriteria::default();
        let need_not_match = QuadCriteriaBuilder::from_criteria(&must_match)
            .index_direction_criterion(DirectionCriterion::NeedNotMatch)
            .build()
            .unwrap();
        let forwards = MultiStrucResRepPair::new(core(0.0, 0.0, 0.0, 0.0), 0, 1, 9);
        let backwards = MultiStrucResRepPair::new(core(0.0, 0.0, 0.0, 0.0), 1, 9, 1);
        assert!(!are_met_by(&must_match, &forwards, &backwards));
        assert!(are_met_by(&need_not_match, &forwards, &backwards));
    }
}
