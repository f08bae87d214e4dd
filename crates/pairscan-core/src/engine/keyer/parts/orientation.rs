use crate::core::geometry::frame::Frame;
use crate::core::models::res_pair::ResPair;
use crate::engine::criteria::QuadCriteria;
use crate::engine::error::KeyerError;
use crate::engine::keyer::part::KeyerPart;
use std::convert::Infallible;
use std::iter::Empty;

/// Placeholder for keying on the relative frame of a pair.
///
/// There is no covering scheme for bucketing rotations yet, so this part cannot be
/// constructed: [`OrientationKeyerPart::new`] always fails and the trait methods are
/// statically unreachable.
#[derive(Debug, Clone, Copy)]
pub struct OrientationKeyerPart {
    never: Infallible,
}

impl OrientationKeyerPart {
    pub fn new(cell_width: f64) -> Result<Self, KeyerError> {
        Err(KeyerError::NotImplemented {
            feature: format!("orientation keyer part (cell width {cell_width})"),
        })
    }
}

impl KeyerPart for OrientationKeyerPart {
    type Value = Frame;
    type Key = u16;
    type Radius = f64;
    type CloseKeys = Empty<u16>;

    fn short_name(&self) -> String {
        match self.never {}
    }

    fn get_value<P: ResPair>(&self, _pair: &P) -> Frame {
        match self.never {}
    }

    fn get_search_radius(&self, _criteria: &QuadCriteria) -> f64 {
        match self.never {}
    }

    fn key_part(&self, _value: Frame) -> u16 {
        match self.never {}
    }

    fn min_close_key_part(&self, _value: Frame, _radius: f64) -> u16 {
        match self.never {}
    }

    fn max_close_key_part(&self, _value: Frame, _radius: f64) -> u16 {
        match self.never {}
    }

    fn close_key_parts(&self, _value: Frame, _radius: f64) -> Empty<u16> {
        match self.never {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_is_not_implemented() {
        assert!(matches!(
            OrientationKeyerPart::new(0.5),
            Err(KeyerError::NotImplemented { .. })
        ));
    }
}
