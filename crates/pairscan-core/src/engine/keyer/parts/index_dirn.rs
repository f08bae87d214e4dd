use crate::core::models::res_pair::{ResPair, ResPairDirn};
use crate::engine::criteria::QuadCriteria;
use crate::engine::error::KeyerError;
use crate::engine::keyer::part::KeyerPart;
use std::iter::{self, Once};

/// Keys on the direction of a pair along its chain.
///
/// Only exact matches are supported, so the search radius is always zero and the only
/// close key is the pair's own direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexDirnKeyerPart;

impl KeyerPart for IndexDirnKeyerPart {
    type Value = ResPairDirn;
    type Key = ResPairDirn;
    type Radius = f64;
    type CloseKeys = Once<ResPairDirn>;

    fn short_name(&self) -> String {
        "index_dirn".to_string()
    }

    fn get_value<P: ResPair>(&self, pair: &P) -> ResPairDirn {
        pair.direction()
    }

    fn get_search_radius(&self, _criteria: &QuadCriteria) -> f64 {
        0.0
    }

    fn key_part(&self, value: ResPairDirn) -> ResPairDirn {
        value
    }

    fn min_close_key_part(&self, value: ResPairDirn, _radius: f64) -> ResPairDirn {
        value
    }

    fn max_close_key_part(&self, value: ResPairDirn, _radius: f64) -> ResPairDirn {
        value
    }

    fn close_key_parts(&self, value: ResPairDirn, _radius: f64) -> Once<ResPairDirn> {
        iter::once(value)
    }

    fn check_search_radius(&self, radius: f64) -> Result<(), KeyerError> {
        if radius == 0.0 {
            Ok(())
        } else {
            Err(KeyerError::NotImplemented {
                feature: format!("index direction search with non-zero radius {radius}"),
            })
        }
    }
}
