use crate::core::models::res_pair::ResPair;
use crate::engine::criteria::QuadCriteria;
use crate::engine::keyer::part::KeyerPart;
use std::iter::{self, Once};

/// Keeps a part's slot in a composite keyer while taking it out of play.
///
/// Every value, key and radius collapses to `()`, so the slot has a single cell and
/// never splits a bucket. The wrapped part is kept only for naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Skip<P> {
    part: P,
}

impl<P> Skip<P> {
    pub fn new(part: P) -> Self {
        Self { part }
    }

    pub fn inner(&self) -> &P {
        &self.part
    }
}

impl<P: KeyerPart> KeyerPart for Skip<P> {
    type Value = ();
    type Key = ();
    type Radius = ();
    type CloseKeys = Once<()>;

    fn short_name(&self) -> String {
        format!("skip[{}]", self.part.short_name())
    }

    fn get_value<R: ResPair>(&self, _pair: &R) {}

    fn get_search_radius(&self, _criteria: &QuadCriteria) {}

    fn key_part(&self, _value: ()) {}

    fn min_close_key_part(&self, _value: (), _radius: ()) {}

    fn max_close_key_part(&self, _value: (), _radius: ()) {}

    fn close_key_parts(&self, _value: (), _radius: ()) -> Once<()> {
        iter::once(())
    }

    fn is_skipped(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::keyer::parts::IndexDirnKeyerPart;

    #[test]
    fn skipped_part_has_exactly_one_close_key() {
        let skip = Skip::new(IndexDirnKeyerPart);
        assert!(skip.is_skipped());
        assert_eq!(skip.close_key_parts((), ()).count(), 1);
        assert_eq!(skip.short_name(), "skip[index_dirn]");
    }
}
