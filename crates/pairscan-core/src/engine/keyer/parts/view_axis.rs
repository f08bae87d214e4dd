use crate::core::models::res_pair::ResPair;
use crate::engine::criteria::QuadCriteria;
use crate::engine::error::KeyerError;
use crate::engine::keyer::part::KeyerPart;
use std::fmt;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAxis {
    X,
    Y,
    Z,
}

impl ViewAxis {
    fn part_name(self) -> &'static str {
        match self {
            ViewAxis::X => "view_x",
            ViewAxis::Y => "view_y",
            ViewAxis::Z => "view_z",
        }
    }
}

impl fmt::Display for ViewAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.part_name())
    }
}

/// Buckets one Cartesian component of the view vector into cells of fixed width.
///
/// Cell `k` holds values in `[k * width, (k + 1) * width)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewAxisKeyerPart {
    axis: ViewAxis,
    cell_width: f64,
}

impl ViewAxisKeyerPart {
    pub fn new(axis: ViewAxis, cell_width: f64) -> Result<Self, KeyerError> {
        if !cell_width.is_finite() || cell_width <= 0.0 {
            return Err(KeyerError::InvalidCellWidth {
                part: axis.part_name(),
                width: cell_width,
                reason: "must be a positive finite number",
            });
        }
        Ok(Self { axis, cell_width })
    }

    pub fn axis(&self) -> ViewAxis {
        self.axis
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }
}

impl KeyerPart for ViewAxisKeyerPart {
    type Value = f64;
    type Key = i32;
    type Radius = f64;
    type CloseKeys = RangeInclusive<i32>;

    fn short_name(&self) -> String {
        format!("{}[{}]", self.axis, self.cell_width)
    }

    fn get_value<P: ResPair>(&self, pair: &P) -> f64 {
        let core = pair.core();
        match self.axis {
            ViewAxis::X => core.view_x(),
            ViewAxis::Y => core.view_y(),
            ViewAxis::Z => core.view_z(),
        }
    }

    fn get_search_radius(&self, criteria: &QuadCriteria) -> f64 {
        criteria.maximum_view_component_difference()
    }

    fn key_part(&self, value: f64) -> i32 {
        (value / self.cell_width).floor() as i32
    }

    fn min_close_key_part(&self, value: f64, radius: f64) -> i32 {
        self.key_part(value - radius)
    }

    fn max_close_key_part(&self, value: f64, radius: f64) -> i32 {
        self.key_part(value + radius)
    }

    fn close_key_parts(&self, value: f64, radius: f64) -> RangeInclusive<i32> {
        self.min_close_key_part(value, radius)..=self.max_close_key_part(value, radius)
    }

    fn check_value(&self, value: f64) -> Result<(), KeyerError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(KeyerError::NonFiniteValue {
                part: self.axis.part_name(),
                value,
            })
        }
    }

    fn check_search_radius(&self, radius: f64) -> Result<(), KeyerError> {
        if radius.is_finite() && radius >= 0.0 {
            Ok(())
        } else {
            Err(KeyerError::SearchRadiusOutOfRange {
                part: self.axis.part_name(),
                radius,
                range: "[0, inf)",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(width: f64) -> ViewAxisKeyerPart {
        ViewAxisKeyerPart::new(ViewAxis::X, width).unwrap()
    }

    #[test]
    fn rejects_non_positive_or_non_finite_width() {
        for width in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                ViewAxisKeyerPart::new(ViewAxis::Y, width),
                Err(KeyerError::InvalidCellWidth { part: "view_y", .. })
            ));
        }
    }

    #[test]
    fn key_part_floors_towards_negative_infinity() {
        let part = part(2.0);
        assert_eq!(part.key_part(0.0), 0);
        assert_eq!(part.key_part(1.99), 0);
        assert_eq!(part.key_part(2.0), 1);
        assert_eq!(part.key_part(-0.1), -1);
        assert_eq!(part.key_part(-2.0), -1);
        assert_eq!(part.key_part(-2.1), -2);
    }

    #[test]
    fn close_keys_cover_value_plus_and_minus_radius() {
        let part = part(2.0);
        let keys: Vec<_> = part.close_key_parts(5.0, 3.0).collect();
        assert_eq!(keys, vec![1, 2, 3, 4]);
        assert_eq!(part.min_close_key_part(5.0, 3.0), 1);
        assert_eq!(part.max_close_key_part(5.0, 3.0), 4);
    }

    #[test]
    fn close_keys_bracket_own_key() {
        let part = part(1.5);
        for value in [-7.3, -0.2, 0.0, 0.7, 4.4, 12.9] {
            for radius in [0.0, 0.1, 1.5, 6.3] {
                let key = part.key_part(value);
                assert!(part.min_close_key_part(value, radius) <= key);
                assert!(key <= part.max_close_key_part(value, radius));
                assert!(part.close_key_parts(value, radius).any(|k| k == key));
            }
        }
    }

    #[test]
    fn checks_reject_non_finite_value_and_negative_radius() {
        let part = part(1.0);
        assert!(part.checked_key_part(f64::NAN).is_err());
        assert!(part.checked_close_key_parts(1.0, -0.5).is_err());
        assert_eq!(part.checked_key_part(3.5), Ok(3));
    }

    #[test]
    fn search_radius_is_root_of_squared_distance() {
        let part = part(1.0);
        let radius = part.get_search_radius(&QuadCriteria::default());
        assert!((radius - 40.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn short_name_includes_axis_and_width() {
        let part = ViewAxisKeyerPart::new(ViewAxis::Z, 2.5).unwrap();
        assert_eq!(part.short_name(), "view_z[2.5]");
    }
}
