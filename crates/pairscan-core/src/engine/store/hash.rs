use super::IndexStore;
use std::collections::HashMap;
use std::collections::hash_map;
use std::hash::{BuildHasherDefault, Hash, Hasher};

const GOLDEN_RATIO: u64 = 0x9e37_79b9_7f4a_7c15;

/// Folds each integer written into a running seed with the classic shift-and-xor mix.
///
/// Composite keys are small tuples of small integers, so hashing each element to itself
/// and mixing the results is cheap and spreads adjacent cells well.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombiningHasher {
    seed: u64,
}

impl CombiningHasher {
    fn combine(&mut self, value: u64) {
        self.seed ^= value
            .wrapping_add(GOLDEN_RATIO)
            .wrapping_add(self.seed << 6)
            .wrapping_add(self.seed >> 2);
    }
}

impl Hasher for CombiningHasher {
    fn finish(&self) -> u64 {
        self.seed
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.combine(u64::from(byte));
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.combine(u64::from(i));
    }

    fn write_u16(&mut self, i: u16) {
        self.combine(u64::from(i));
    }

    fn write_u32(&mut self, i: u32) {
        self.combine(u64::from(i));
    }

    fn write_u64(&mut self, i: u64) {
        self.combine(i);
    }

    fn write_usize(&mut self, i: usize) {
        self.combine(i as u64);
    }

    fn write_i8(&mut self, i: i8) {
        self.combine(i as u64);
    }

    fn write_i16(&mut self, i: i16) {
        self.combine(i as u64);
    }

    fn write_i32(&mut self, i: i32) {
        self.combine(i as u64);
    }

    fn write_i64(&mut self, i: i64) {
        self.combine(i as u64);
    }
}

type CombiningBuildHasher = BuildHasherDefault<CombiningHasher>;

/// Cells in a hash map; suited to sparse, high-cardinality key spaces.
#[derive(Debug, Clone)]
pub struct HashIndexStore<K, E> {
    cells: HashMap<K, Vec<E>, CombiningBuildHasher>,
    num_entries: usize,
}

impl<K, E> HashIndexStore<K, E> {
    pub fn new() -> Self {
        Self {
            cells: HashMap::default(),
            num_entries: 0,
        }
    }
}

impl<K, E> Default for HashIndexStore<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct HashCells<'a, K, E> {
    inner: hash_map::Iter<'a, K, Vec<E>>,
}

impl<'a, K, E> Iterator for HashCells<'a, K, E> {
    type Item = (&'a K, &'a [E]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Eq + Hash, E> IndexStore for HashIndexStore<K, E> {
    type Key = K;
    type Entry = E;
    type Cells<'a>
        = HashCells<'a, K, E>
    where
        Self: 'a;

    fn push_back_entry_to_cell(&mut self, key: K, entry: E) {
        self.cells.entry(key).or_default().push(entry);
        self.num_entries += 1;
    }

    fn find_matches(&self, key: &K) -> &[E] {
        self.cells.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    fn cells(&self) -> HashCells<'_, K, E> {
        HashCells {
            inner: self.cells.iter(),
        }
    }

    fn num_cells(&self) -> usize {
        self.cells.len()
    }

    fn num_entries(&self) -> usize {
        self.num_entries
    }
}
