//! Thresholds deciding whether two residue pairs match, and the ordered checks applied with them.

pub mod checks;
pub mod parse;
pub mod result;

use super::config::ConfigError;
use crate::core::geometry::angle::Angle;
use crate::core::geometry::frame::distance_1_of_angle;
use std::fmt;

/// Whether two pairs must run in the same direction along their chains to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionCriterion {
    MustMatch,
    NeedNotMatch,
}

impl fmt::Display for DirectionCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionCriterion::MustMatch => write!(f, "MUST_MATCH"),
            DirectionCriterion::NeedNotMatch => write!(f, "NEED_NOT_MATCH"),
        }
    }
}

/// Immutable match thresholds for comparing a query residue pair with an index residue pair.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadCriteria {
    index_direction_criterion: DirectionCriterion,
    minimum_index_distance: usize,
    maximum_squared_distance: f64,
    maximum_frame_angle_difference: Angle,
    /// Cached [`distance_1_of_angle`] of the frame threshold.
    maximum_frame_angle_distance_1: f64,
    maximum_phi_angle_difference: Angle,
    maximum_psi_angle_difference: Angle,
}

impl QuadCriteria {
    pub fn index_direction_criterion(&self) -> DirectionCriterion {
        self.index_direction_criterion
    }

    pub fn requires_matching_directions(&self) -> bool {
        self.index_direction_criterion == DirectionCriterion::MustMatch
    }

    pub fn minimum_index_distance(&self) -> usize {
        self.minimum_index_distance
    }

    pub fn maximum_squared_distance(&self) -> f64 {
        self.maximum_squared_distance
    }

    /// Upper bound on any single view-vector component difference between matching pairs.
    pub fn maximum_view_component_difference(&self) -> f64 {
        self.maximum_squared_distance.sqrt()
    }

    pub fn maximum_frame_angle_difference(&self) -> Angle {
        self.maximum_frame_angle_difference
    }

    pub fn maximum_frame_angle_distance_1(&self) -> f64 {
        self.maximum_frame_angle_distance_1
    }

    pub fn maximum_phi_angle_difference(&self) -> Angle {
        self.maximum_phi_angle_difference
    }

    pub fn maximum_psi_angle_difference(&self) -> Angle {
        self.maximum_psi_angle_difference
    }
}

impl Default for QuadCriteria {
    /// Directions must match, residues at least 11 apart, squared view distance up to 40,
    /// frames within 35°, dihedrals within 67.5°.
    fn default() -> Self {
        let frame = Angle::from_degrees(35.0);
        Self {
            index_direction_criterion: DirectionCriterion::MustMatch,
            minimum_index_distance: 11,
            maximum_squared_distance: 40.0,
            maximum_frame_angle_difference: frame,
            maximum_frame_angle_distance_1: distance_1_of_angle(frame),
            maximum_phi_angle_difference: Angle::from_degrees(67.5),
            maximum_psi_angle_difference: Angle::from_degrees(67.5),
        }
    }
}

impl fmt::Display for QuadCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "quad_criteria[require_matching_directions:{},minimum_index_distance:{},maximum_squared_distance:{},maximum_frame_angle_difference:{},maximum_phi_angle_difference:{},maximum_psi_angle_difference:{}]",
            self.index_direction_criterion,
            self.minimum_index_distance,
            self.maximum_squared_distance,
            self.maximum_frame_angle_difference,
            self.maximum_phi_angle_difference,
            self.maximum_psi_angle_difference,
        )
    }
}

#[derive(Default)]
pub struct QuadCriteriaBuilder {
    index_direction_criterion: Option<DirectionCriterion>,
    minimum_index_distance: Option<usize>,
    maximum_squared_distance: Option<f64>,
    maximum_frame_angle_difference: Option<Angle>,
    maximum_phi_angle_difference: Option<Angle>,
    maximum_psi_angle_difference: Option<Angle>,
}

impl QuadCriteriaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the values of an existing set of criteria.
    pub fn from_criteria(criteria: &QuadCriteria) -> Self {
        Self {
            index_direction_criterion: Some(criteria.index_direction_criterion),
            minimum_index_distance: Some(criteria.minimum_index_distance),
            maximum_squared_distance: Some(criteria.maximum_squared_distance),
            maximum_frame_angle_difference: Some(criteria.maximum_frame_angle_difference),
            maximum_phi_angle_difference: Some(criteria.maximum_phi_angle_difference),
            maximum_psi_angle_difference: Some(criteria.maximum_psi_angle_difference),
        }
    }

    pub fn index_direction_criterion(mut self, criterion: DirectionCriterion) -> Self {
        self.index_direction_criterion = Some(criterion);
        self
    }
    pub fn minimum_index_distance(mut self, distance: usize) -> Self {
        self.minimum_index_distance = Some(distance);
        self
    }
    pub fn maximum_squared_distance(mut self, distance: f64) -> Self {
        self.maximum_squared_distance = Some(distance);
        self
    }
    pub fn maximum_frame_angle_difference(mut self, angle: Angle) -> Self {
        self.maximum_frame_angle_difference = Some(angle);
        self
    }
    pub fn maximum_phi_angle_difference(mut self, angle: Angle) -> Self {
        self.maximum_phi_angle_difference = Some(angle);
        self
    }
    pub fn maximum_psi_angle_difference(mut self, angle: Angle) -> Self {
        self.maximum_psi_angle_difference = Some(angle);
        self
    }

    pub fn build(self) -> Result<QuadCriteria, ConfigError> {
        let maximum_squared_distance = self
            .maximum_squared_distance
            .ok_or(ConfigError::MissingParameter("maximum_squared_distance"))?;
        if !maximum_squared_distance.is_finite() || maximum_squared_distance < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "maximum_squared_distance",
                reason: format!("{maximum_squared_distance} is not a finite, non-negative distance"),
            });
        }

        let frame = checked_angle_threshold(
            "maximum_frame_angle_difference",
            self.maximum_frame_angle_difference,
        )?;
        let phi = checked_angle_threshold(
            "maximum_phi_angle_difference",
            self.maximum_phi_angle_difference,
        )?;
        let psi = checked_angle_threshold(
            "maximum_psi_angle_difference",
            self.maximum_psi_angle_difference,
        )?;

        Ok(QuadCriteria {
            index_direction_criterion: self
                .index_direction_criterion
                .ok_or(ConfigError::MissingParameter("index_direction_criterion"))?,
            minimum_index_distance: self
                .minimum_index_distance
                .ok_or(ConfigError::MissingParameter("minimum_index_distance"))?,
            maximum_squared_distance,
            maximum_frame_angle_difference: frame,
            maximum_frame_angle_distance_1: distance_1_of_angle(frame),
            maximum_phi_angle_difference: phi,
            maximum_psi_angle_difference: psi,
        })
    }
}

// Wrapped differences never exceed half a revolution, so larger thresholds are meaningless.
fn checked_angle_threshold(name: &'static str, angle: Option<Angle>) -> Result<Angle, ConfigError> {
    let angle = angle.ok_or(ConfigError::MissingParameter(name))?;
    if !(Angle::ZERO..=Angle::HALF_REVOLUTION).contains(&angle) {
        return Err(ConfigError::InvalidParameter {
            name,
            reason: format!("{angle} is outside [0°, 180°]"),
        });
    }
    Ok(angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn complete_builder() -> QuadCriteriaBuilder {
        QuadCriteriaBuilder::new()
            .index_direction_criterion(DirectionCriterion::NeedNotMatch)
            .minimum_index_distance(5)
            .maximum_squared_distance(12.0)
            .maximum_frame_angle_difference(Angle::from_degrees(22.5))
            .maximum_phi_angle_difference(Angle::from_degrees(45.0))
            .maximum_psi_angle_difference(Angle::from_degrees(90.0))
    }

    #[test]
    fn default_criteria_match_documented_values() {
        let criteria = QuadCriteria::default();
        assert!(criteria.requires_matching_directions());
        assert_eq!(criteria.minimum_index_distance(), 11);
        assert!(f64_approx_equal(criteria.maximum_squared_distance(), 40.0));
        assert!(f64_approx_equal(criteria.maximum_frame_angle_difference().degrees(), 35.0));
        assert!(f64_approx_equal(criteria.maximum_phi_angle_difference().degrees(), 67.5));
        assert!(f64_approx_equal(criteria.maximum_psi_angle_difference().degrees(), 67.5));
    }

    #[test]
    fn builder_caches_frame_distance_1() {
        let criteria = complete_builder().build().unwrap();
        assert!(f64_approx_equal(
            criteria.maximum_frame_angle_distance_1(),
            distance_1_of_angle(Angle::from_degrees(22.5))
        ));
        assert!(!criteria.requires_matching_directions());
    }

    #[test]
    fn builder_reports_first_missing_parameter() {
        let result = QuadCriteriaBuilder::new()
            .maximum_squared_distance(1.0)
            .build();
        assert_eq!(
            result,
            Err(ConfigError::MissingParameter("maximum_frame_angle_difference"))
        );
    }

    #[test]
    fn builder_rejects_negative_distance() {
        let result = complete_builder().maximum_squared_distance(-1.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "maximum_squared_distance",
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_angle_beyond_half_revolution() {
        let result = complete_builder()
            .maximum_psi_angle_difference(Angle::from_degrees(181.0))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "maximum_psi_angle_difference",
                ..
            })
        ));
    }

    #[test]
    fn from_criteria_round_trips_through_builder() {
        let original = complete_builder().build().unwrap();
        let rebuilt = QuadCriteriaBuilder::from_criteria(&original).build().unwrap();
        assert_eq!(original, rebuilt);
    }

    #[test]
    fn display_lists_every_threshold() {
        let text = QuadCriteria::default().to_string();
        assert!(text.starts_with("quad_criteria[require_matching_directions:MUST_MATCH"));
        assert!(text.contains("minimum_index_distance:11"));
        assert!(text.contains("maximum_squared_distance:40"));
        assert!(text.ends_with(']'));
    }
}
