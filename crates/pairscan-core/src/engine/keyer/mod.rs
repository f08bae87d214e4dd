//! Composite keyers: several [`KeyerPart`]s combined into one tuple-valued key.
//!
//! A keyer maps a residue pair to a cell address made of one key per part, and to the
//! set of cell addresses whose entries could lie within the criteria of that pair. The
//! set is the cross product of each part's close keys.

pub mod part;
pub mod parts;

use crate::core::models::res_pair::ResPair;
use crate::engine::criteria::QuadCriteria;
use crate::engine::error::KeyerError;
use crate::engine::store::{IndexEntry, IndexStore};
use itertools::Itertools;
use std::fmt::{self, Debug};
use std::hash::Hash;

pub use part::KeyerPart;
use parts::{IndexDirnKeyerPart, PhiPsiAngleKeyerPart, Skip, ViewAxisKeyerPart};

/// Whether value and radius preconditions are enforced on every keying call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    #[default]
    Checked,
    /// Callers guarantee the preconditions; out-of-range input gives unspecified keys.
    Unchecked,
}

/// A fixed tuple of keyer parts, keyed together.
pub trait KeyerParts {
    type Value: Copy + Debug;
    type Key: Copy + Ord + Hash + Debug + Send + Sync;
    type CloseKeys: Clone;

    fn make_value<R: ResPair>(&self, pair: &R) -> Self::Value;

    fn make_key<R: ResPair>(&self, pair: &R, validation: Validation) -> Result<Self::Key, KeyerError>;

    fn make_close_keys<R: ResPair>(
        &self,
        pair: &R,
        criteria: &QuadCriteria,
        validation: Validation,
    ) -> Result<Self::CloseKeys, KeyerError>;

    /// Calls `f` with every key in the cross product of `close_keys`.
    fn for_each_close_key<F: FnMut(Self::Key)>(close_keys: &Self::CloseKeys, f: &mut F);

    /// Checks each part's search radius under `criteria` without keying a pair.
    fn check_search_radii(&self, criteria: &QuadCriteria) -> Result<(), KeyerError>;

    /// Names of the parts that take part in keying, in slot order.
    fn part_names(&self) -> Vec<String>;
}

macro_rules! nested_close_keys {
    ($f:ident, $keys:ident; [$($done:ident)*];) => {
        $f(($($done,)*))
    };
    ($f:ident, $keys:ident; [$($done:ident)*]; ($idx:tt, $k:ident) $($rest:tt)*) => {
        for $k in $keys.$idx.clone() {
            nested_close_keys!($f, $keys; [$($done)* $k]; $($rest)*);
        }
    };
}

macro_rules! impl_keyer_parts {
    ($(($idx:tt, $P:ident, $k:ident)),+) => {
        impl<$($P: KeyerPart),+> KeyerParts for ($($P,)+) {
            type Value = ($($P::Value,)+);
            type Key = ($($P::Key,)+);
            type CloseKeys = ($($P::CloseKeys,)+);

            fn make_value<R: ResPair>(&self, pair: &R) -> Self::Value {
                ($(self.$idx.get_value(pair),)+)
            }

            fn make_key<R: ResPair>(
                &self,
                pair: &R,
                validation: Validation,
            ) -> Result<Self::Key, KeyerError> {
                Ok(($({
                    let value = self.$idx.get_value(pair);
                    match validation {
                        Validation::Checked => self.$idx.checked_key_part(value)?,
                        Validation::Unchecked => self.$idx.key_part(value),
                    }
                },)+))
            }

            fn make_close_keys<R: ResPair>(
                &self,
                pair: &R,
                criteria: &QuadCriteria,
                validation: Validation,
            ) -> Result<Self::CloseKeys, KeyerError> {
                Ok(($({
                    let value = self.$idx.get_value(pair);
                    let radius = self.$idx.get_search_radius(criteria);
                    match validation {
                        Validation::Checked => self.$idx.checked_close_key_parts(value, radius)?,
                        Validation::Unchecked => self.$idx.close_key_parts(value, radius),
                    }
                },)+))
            }

            fn for_each_close_key<F: FnMut(Self::Key)>(close_keys: &Self::CloseKeys, f: &mut F) {
                nested_close_keys!(f, close_keys; []; $(($idx, $k))+);
            }

            fn check_search_radii(&self, criteria: &QuadCriteria) -> Result<(), KeyerError> {
                $(
                    self.$idx.check_search_radius(self.$idx.get_search_radius(criteria))?;
                )+
                Ok(())
            }

            fn part_names(&self) -> Vec<String> {
                let mut names = Vec::new();
                $(
                    if !self.$idx.is_skipped() {
                        names.push(self.$idx.short_name());
                    }
                )+
                names
            }
        }
    };
}

impl_keyer_parts!((0, P0, k0));
impl_keyer_parts!((0, P0, k0), (1, P1, k1));
impl_keyer_parts!((0, P0, k0), (1, P1, k1), (2, P2, k2));
impl_keyer_parts!((0, P0, k0), (1, P1, k1), (2, P2, k2), (3, P3, k3));
impl_keyer_parts!((0, P0, k0), (1, P1, k1), (2, P2, k2), (3, P3, k3), (4, P4, k4));
impl_keyer_parts!(
    (0, P0, k0),
    (1, P1, k1),
    (2, P2, k2),
    (3, P3, k3),
    (4, P4, k4),
    (5, P5, k5)
);
impl_keyer_parts!(
    (0, P0, k0),
    (1, P1, k1),
    (2, P2, k2),
    (3, P3, k3),
    (4, P4, k4),
    (5, P5, k5),
    (6, P6, k6)
);
impl_keyer_parts!(
    (0, P0, k0),
    (1, P1, k1),
    (2, P2, k2),
    (3, P3, k3),
    (4, P4, k4),
    (5, P5, k5),
    (6, P6, k6),
    (7, P7, k7)
);

/// Keys residue pairs on a tuple of parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ResPairKeyer<T> {
    parts: T,
    validation: Validation,
}

impl<T: KeyerParts> ResPairKeyer<T> {
    pub fn new(parts: T) -> Self {
        Self {
            parts,
            validation: Validation::default(),
        }
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    pub fn validation(&self) -> Validation {
        self.validation
    }

    pub fn parts(&self) -> &T {
        &self.parts
    }

    pub fn make_value<R: ResPair>(&self, pair: &R) -> T::Value {
        self.parts.make_value(pair)
    }

    /// The cell a pair is stored under.
    pub fn make_key<R: ResPair>(&self, pair: &R) -> Result<T::Key, KeyerError> {
        self.parts.make_key(pair, self.validation)
    }

    /// Per-part close keys; their cross product is every cell that could hold a match.
    pub fn make_close_keys<R: ResPair>(
        &self,
        pair: &R,
        criteria: &QuadCriteria,
    ) -> Result<T::CloseKeys, KeyerError> {
        self.parts.make_close_keys(pair, criteria, self.validation)
    }

    pub fn for_each_close_key<F: FnMut(T::Key)>(&self, close_keys: &T::CloseKeys, mut f: F) {
        T::for_each_close_key(close_keys, &mut f);
    }

    /// Every cell that could hold a match for `pair`, materialized.
    pub fn close_keys<R: ResPair>(
        &self,
        pair: &R,
        criteria: &QuadCriteria,
    ) -> Result<Vec<T::Key>, KeyerError> {
        let close_keys = self.make_close_keys(pair, criteria)?;
        let mut keys = Vec::new();
        self.for_each_close_key(&close_keys, |key| keys.push(key));
        Ok(keys)
    }

    /// Stores `pair` together with its unquantized values in the cell at `key`.
    pub fn store_emplace_value<S, R>(&self, store: &mut S, key: T::Key, pair: &R)
    where
        R: ResPair + Clone,
        S: IndexStore<Key = T::Key, Entry = IndexEntry<T::Value, R>>,
    {
        store.emplace_back_entry_to_cell(key, (self.make_value(pair), pair.clone()));
    }

    /// Fails if `criteria` would be rejected by [`ResPairKeyer::make_close_keys`] for any pair.
    /// Unchecked keyers accept any criteria.
    pub fn check_criteria(&self, criteria: &QuadCriteria) -> Result<(), KeyerError> {
        match self.validation {
            Validation::Checked => self.parts.check_search_radii(criteria),
            Validation::Unchecked => Ok(()),
        }
    }

    pub fn name(&self) -> String {
        format!("res_pair_keyer[{}]", self.parts.part_names().iter().join(","))
    }
}

impl<T: KeyerParts> fmt::Display for ResPairKeyer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

type GeometricParts<D> = (
    ViewAxisKeyerPart,
    ViewAxisKeyerPart,
    ViewAxisKeyerPart,
    PhiPsiAngleKeyerPart,
    PhiPsiAngleKeyerPart,
    PhiPsiAngleKeyerPart,
    PhiPsiAngleKeyerPart,
    D,
);

/// View vector and dihedrals; direction is left to the criteria check.
pub type StandardKeyer = ResPairKeyer<GeometricParts<Skip<IndexDirnKeyerPart>>>;

/// View vector, dihedrals and direction.
pub type DirectedKeyer = ResPairKeyer<GeometricParts<IndexDirnKeyerPart>>;
