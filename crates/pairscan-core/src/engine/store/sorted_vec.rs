use super::IndexStore;
use std::slice;

/// Cells in a vector kept sorted by key; compact, with `O(log n)` lookup and `O(n)` insert
/// of a new cell.
#[derive(Debug, Clone)]
pub struct SortedVecIndexStore<K, E> {
    cells: Vec<(K, Vec<E>)>,
    num_entries: usize,
}

impl<K, E> SortedVecIndexStore<K, E> {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            num_entries: 0,
        }
    }
}

impl<K, E> Default for SortedVecIndexStore<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, E> SortedVecIndexStore<K, E> {
    fn position(&self, key: &K) -> Result<usize, usize> {
        self.cells.binary_search_by(|(cell_key, _)| cell_key.cmp(key))
    }
}

pub struct SortedVecCells<'a, K, E> {
    inner: slice::Iter<'a, (K, Vec<E>)>,
}

impl<'a, K, E> Iterator for SortedVecCells<'a, K, E> {
    type Item = (&'a K, &'a [E]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Ord, E> IndexStore for SortedVecIndexStore<K, E> {
    type Key = K;
    type Entry = E;
    type Cells<'a>
        = SortedVecCells<'a, K, E>
    where
        Self: 'a;

    fn push_back_entry_to_cell(&mut self, key: K, entry: E) {
        match self.position(&key) {
            Ok(index) => self.cells[index].1.push(entry),
            Err(index) => self.cells.insert(index, (key, vec![entry])),
        }
        self.num_entries += 1;
    }

    fn find_matches(&self, key: &K) -> &[E] {
        match self.position(key) {
            Ok(index) => self.cells[index].1.as_slice(),
            Err(_) => &[],
        }
    }

    /// Cells in ascending key order.
    fn cells(&self) -> SortedVecCells<'_, K, E> {
        SortedVecCells {
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
