use crate::core::models::res_pair::ResPair;
use crate::engine::criteria::QuadCriteria;
use crate::engine::error::KeyerError;
use std::fmt::Debug;
use std::hash::Hash;

/// One dimension of a composite keyer.
///
/// A part extracts a value from a residue pair, quantizes it to a cell index, and lists
/// every cell that could hold a value within a search radius of it. The unchecked methods
/// assume the value and radius already satisfy [`KeyerPart::check_value`] and
/// [`KeyerPart::check_search_radius`]; the `checked_` variants enforce that first.
pub trait KeyerPart {
    type Value: Copy + Debug;
    type Key: Copy + Ord + Hash + Debug + Send + Sync;
    type Radius: Copy + Debug;
    type CloseKeys: Iterator<Item = Self::Key> + Clone;

    /// Short description for diagnostics, including any configured cell width.
    fn short_name(&self) -> String;

    fn get_value<P: ResPair>(&self, pair: &P) -> Self::Value;

    fn get_search_radius(&self, criteria: &QuadCriteria) -> Self::Radius;

    fn key_part(&self, value: Self::Value) -> Self::Key;

    fn min_close_key_part(&self, value: Self::Value, radius: Self::Radius) -> Self::Key;

    fn max_close_key_part(&self, value: Self::Value, radius: Self::Radius) -> Self::Key;

    fn close_key_parts(&self, value: Self::Value, radius: Self::Radius) -> Self::CloseKeys;

    fn check_value(&self, _value: Self::Value) -> Result<(), KeyerError> {
        Ok(())
    }

    fn check_search_radius(&self, _radius: Self::Radius) -> Result<(), KeyerError> {
        Ok(())
    }

    fn checked_key_part(&self, value: Self::Value) -> Result<Self::Key, KeyerError> {
        self.check_value(value)?;
        Ok(self.key_part(value))
    }

    fn checked_close_key_parts(
        &self,
        value: Self::Value,
        radius: Self::Radius,
    ) -> Result<Self::CloseKeys, KeyerError> {
        self.check_value(value)?;
        self.check_search_radius(radius)?;
        Ok(self.close_key_parts(value, radius))
    }

    /// Skipped parts still occupy a tuple slot but contribute nothing to bucketing or naming.
    fn is_skipped(&self) -> bool {
        false
    }
}
