//! Bucketed storage of entries under composite keys.
//!
//! Both back ends share one contract: appending to a cell preserves insertion order, and
//! looking up a key that was never written yields an empty slice without touching the
//! store.

pub mod build;
mod hash;
mod sorted_vec;

pub use build::{RepPairEntry, StorePlan, add_structure_to_store};
pub use hash::{CombiningHasher, HashIndexStore};
pub use sorted_vec::SortedVecIndexStore;

use std::mem;

/// A stored candidate: the unquantized per-part values it was keyed on, and the pair itself.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry<V, P> {
    value: V,
    pair: P,
}

impl<V, P> IndexEntry<V, P> {
    pub fn new(value: V, pair: P) -> Self {
        Self { value, pair }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn pair(&self) -> &P {
        &self.pair
    }
}

impl<V, P> From<(V, P)> for IndexEntry<V, P> {
    fn from((value, pair): (V, P)) -> Self {
        Self::new(value, pair)
    }
}

pub trait IndexStore {
    type Key;
    type Entry;
    type Cells<'a>: Iterator<Item = (&'a Self::Key, &'a [Self::Entry])>
    where
        Self: 'a;

    fn push_back_entry_to_cell(&mut self, key: Self::Key, entry: Self::Entry);

    /// Builds the entry in place from `args`.
    fn emplace_back_entry_to_cell<A>(&mut self, key: Self::Key, args: A)
    where
        Self::Entry: From<A>,
    {
        self.push_back_entry_to_cell(key, Self::Entry::from(args));
    }

    /// The cell for `key`, empty if nothing was ever stored there.
    fn find_matches(&self, key: &Self::Key) -> &[Self::Entry];

    fn cells(&self) -> Self::Cells<'_>;

    fn num_cells(&self) -> usize;

    fn num_entries(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.num_entries() == 0
    }

    /// Rough byte count of the store, for reporting.
    fn get_info_size(&self) -> usize
    where
        Self: Sized,
    {
        mem::size_of::<Self>()
            + self.num_cells() * mem::size_of::<(Self::Key, Vec<Self::Entry>)>()
            + self.num_entries() * mem::size_of::<Self::Entry>()
    }
}
