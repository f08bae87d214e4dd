use crate::core::geometry::angle::Angle;
use crate::core::models::res_pair::ResPair;
use crate::engine::criteria::QuadCriteria;
use crate::engine::error::KeyerError;
use crate::engine::keyer::part::KeyerPart;
use std::fmt;
use std::iter::Chain;
use std::ops::Range;

const WIDTH_TOLERANCE: f64 = 1e-9;

/// Which of the four backbone dihedrals of a pair a part keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhiPsiAngle {
    FromPhi,
    FromPsi,
    ToPhi,
    ToPsi,
}

impl PhiPsiAngle {
    fn part_name(self) -> &'static str {
        match self {
            PhiPsiAngle::FromPhi => "from_phi",
            PhiPsiAngle::FromPsi => "from_psi",
            PhiPsiAngle::ToPhi => "to_phi",
            PhiPsiAngle::ToPsi => "to_psi",
        }
    }

    fn is_phi(self) -> bool {
        matches!(self, PhiPsiAngle::FromPhi | PhiPsiAngle::ToPhi)
    }
}

impl fmt::Display for PhiPsiAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.part_name())
    }
}

/// Buckets a shifted dihedral into equal arcs of the circle.
///
/// The width has to split the full revolution into a whole number of cells so that the
/// last cell meets the first one at 0/360°. A search arc that crosses that seam yields
/// the cells from the start to the end of the table followed by the cells from zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhiPsiAngleKeyerPart {
    angle: PhiPsiAngle,
    cell_width: Angle,
    num_cells: u8,
}

impl PhiPsiAngleKeyerPart {
    pub fn new(angle: PhiPsiAngle, cell_width: Angle) -> Result<Self, KeyerError> {
        let invalid = |reason| KeyerError::InvalidCellWidth {
            part: angle.part_name(),
            width: cell_width.degrees(),
            reason,
        };
        let width = cell_width.radians();
        if !width.is_finite() || width <= 0.0 {
            return Err(invalid("must be a positive finite angle"));
        }
        if cell_width > Angle::ONE_REVOLUTION {
            return Err(invalid("must not exceed one revolution"));
        }
        let cells = (Angle::ONE_REVOLUTION / cell_width).round();
        if (cells * width - Angle::ONE_REVOLUTION.radians()).abs() > WIDTH_TOLERANCE {
            return Err(invalid("must divide one revolution into a whole number of cells"));
        }
        if cells > f64::from(u8::MAX) {
            return Err(invalid("must give at most 255 cells"));
        }
        Ok(Self {
            angle,
            cell_width,
            num_cells: cells as u8,
        })
    }

    pub fn angle(&self) -> PhiPsiAngle {
        self.angle
    }

    pub fn cell_width(&self) -> Angle {
        self.cell_width
    }

    pub fn num_cells(&self) -> u8 {
        self.num_cells
    }

    fn all_cells(&self) -> Chain<Range<u8>, Range<u8>> {
        (0..self.num_cells).chain(0..0)
    }
}

impl KeyerPart for PhiPsiAngleKeyerPart {
    type Value = Angle;
    type Key = u8;
    type Radius = Angle;
    type CloseKeys = Chain<Range<u8>, Range<u8>>;

    fn short_name(&self) -> String {
        format!("{}[{}]", self.angle, self.cell_width)
    }

    fn get_value<P: ResPair>(&self, pair: &P) -> Angle {
        let core = pair.core();
        match self.angle {
            PhiPsiAngle::FromPhi => core.from_phi(),
            PhiPsiAngle::FromPsi => core.from_psi(),
            PhiPsiAngle::ToPhi => core.to_phi(),
            PhiPsiAngle::ToPsi => core.to_psi(),
        }
    }

    fn get_search_radius(&self, criteria: &QuadCriteria) -> Angle {
        if self.angle.is_phi() {
            criteria.maximum_phi_angle_difference()
        } else {
            criteria.maximum_psi_angle_difference()
        }
    }

    fn key_part(&self, value: Angle) -> u8 {
        // An angle just below one revolution can round into a cell past the end.
        let cell = (value / self.cell_width).floor().max(0.0) as u8;
        cell.min(self.num_cells - 1)
    }

    fn min_close_key_part(&self, value: Angle, radius: Angle) -> u8 {
        self.key_part((value - radius).shifted())
    }

    fn max_close_key_part(&self, value: Angle, radius: Angle) -> u8 {
        self.key_part((value + radius).shifted())
    }

    fn close_key_parts(&self, value: Angle, radius: Angle) -> Self::CloseKeys {
        if radius >= Angle::HALF_REVOLUTION {
            return self.all_cells();
        }
        let start = (value - radius).shifted();
        let stop = (value + radius).shifted();
        let begin = self.key_part(start);
        let end = self.key_part(stop) + 1;
        if start <= stop {
            (begin..end).chain(0..0)
        } else if end > begin {
            // Both ends of the wrapped arc landed in overlapping cells.
            self.all_cells()
        } else {
            (begin..self.num_cells).chain(0..end)
        }
    }

    fn check_value(&self, value: Angle) -> Result<(), KeyerError> {
        if value.is_shifted() {
            Ok(())
        } else {
            Err(KeyerError::AngleOutOfRange {
                degrees: value.degrees(),
            })
        }
    }

    fn check_search_radius(&self, radius: Angle) -> Result<(), KeyerError> {
        if radius > Angle::ZERO && radius < Angle::HALF_REVOLUTION {
            Ok(())
        } else {
            Err(KeyerError::SearchRadiusOutOfRange {
                part: self.angle.part_name(),
                radius: radius.degrees(),
                range: "(0°, 180°)",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(width_degrees: f64) -> PhiPsiAngleKeyerPart {
        PhiPsiAngleKeyerPart::new(PhiPsiAngle::FromPhi, Angle::from_degrees(width_degrees)).unwrap()
    }

    fn keys(part: &PhiPsiAngleKeyerPart, value: f64, radius: f64) -> Vec<u8> {
        part.close_key_parts(Angle::from_degrees(value), Angle::from_degrees(radius))
            .collect()
    }

    #[test]
    fn width_must_divide_revolution() {
        assert_eq!(part(45.0).num_cells(), 8);
        assert_eq!(part(360.0).num_cells(), 1);
        for bad in [0.0, -30.0, 70.0, 400.0] {
            assert!(
                PhiPsiAngleKeyerPart::new(PhiPsiAngle::ToPsi, Angle::from_degrees(bad)).is_err(),
                "width {bad} should be rejected"
            );
        }
    }

    #[test]
    fn width_must_not_give_more_than_255_cells() {
        assert!(PhiPsiAngleKeyerPart::new(PhiPsiAngle::ToPsi, Angle::from_degrees(1.0)).is_err());
        assert_eq!(part(1.5).num_cells(), 240);
    }

    #[test]
    fn key_part_stays_within_table() {
        let part = part(45.0);
        assert_eq!(part.key_part(Angle::ZERO), 0);
        assert_eq!(part.key_part(Angle::from_degrees(44.9)), 0);
        assert_eq!(part.key_part(Angle::from_degrees(45.0)), 1);
        assert_eq!(part.key_part(Angle::from_degrees(359.999_999)), 7);
    }

    #[test]
    fn unwrapped_search_is_one_contiguous_run() {
        let part = part(45.0);
        assert_eq!(keys(&part, 100.0, 30.0), vec![1, 2]);
        assert_eq!(keys(&part, 100.0, 1.0), vec![2]);
    }

    #[test]
    fn search_across_zero_wraps_to_both_ends() {
        let part = part(45.0);
        assert_eq!(keys(&part, 10.0, 30.0), vec![7, 0]);
        assert_eq!(keys(&part, 350.0, 60.0), vec![6, 7, 0, 1]);
        assert!(keys(&part, 5.0, 20.0).contains(&part.key_part(Angle::ZERO)));
    }

    #[test]
    fn wrapped_search_with_overlapping_ends_covers_every_cell_once() {
        let part = part(120.0);
        assert_eq!(keys(&part, 10.0, 170.0), vec![0, 1, 2]);
        assert_eq!(keys(&part, 0.0, 179.0), vec![0, 1, 2]);
    }

    #[test]
    fn close_keys_bracket_own_key() {
        let part = part(30.0);
        for value in [0.0, 15.0, 29.9, 180.0, 345.0, 359.0] {
            let key = part.key_part(Angle::from_degrees(value));
            for radius in [1.0, 20.0, 90.0, 179.0] {
                assert!(keys(&part, value, radius).contains(&key));
            }
        }
    }

    #[test]
    fn checks_enforce_angle_and_radius_ranges() {
        let part = part(45.0);
        assert!(matches!(
            part.checked_key_part(Angle::from_degrees(-1.0)),
            Err(KeyerError::AngleOutOfRange { .. })
        ));
        assert!(part.checked_key_part(Angle::ONE_REVOLUTION).is_err());
        for radius in [Angle::ZERO, Angle::HALF_REVOLUTION, Angle::from_degrees(200.0)] {
            assert!(matches!(
                part.checked_close_key_parts(Angle::from_degrees(10.0), radius),
                Err(KeyerError::SearchRadiusOutOfRange { .. })
            ));
        }
        assert!(
            part.checked_close_key_parts(Angle::from_degrees(10.0), Angle::from_degrees(60.0))
                .is_ok()
        );
    }

    #[test]
    fn phi_parts_use_phi_threshold_and_psi_parts_psi_threshold() {
        let criteria = crate::engine::criteria::QuadCriteriaBuilder::from_criteria(&QuadCriteria::default())
            .maximum_phi_angle_difference(Angle::from_degrees(20.0))
            .maximum_psi_angle_difference(Angle::from_degrees(40.0))
            .build()
            .unwrap();
        let width = Angle::from_degrees(45.0);
        let to_phi = PhiPsiAngleKeyerPart::new(PhiPsiAngle::ToPhi, width).unwrap();
        let from_psi = PhiPsiAngleKeyerPart::new(PhiPsiAngle::FromPsi, width).unwrap();
        assert_eq!(to_phi.get_search_radius(&criteria), Angle::from_degrees(20.0));
        assert_eq!(from_psi.get_search_radius(&criteria), Angle::from_degrees(40.0));
    }
}
