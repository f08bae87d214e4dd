use std::ops::Range;

/// Picks every `(stride + 1)`th residue as a representative, starting from the first.
///
/// Representative `r` stands in at residue `r * (stride + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepStrider {
    stride: usize,
}

impl RepStrider {
    pub const fn new(stride: usize) -> Self {
        Self { stride }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    fn period(&self) -> usize {
        self.stride + 1
    }

    /// Number of representatives among `num_residues` residues.
    pub fn num_reps(&self, num_residues: usize) -> usize {
        num_residues.div_ceil(self.period())
    }

    pub fn index_of_rep(&self, rep: usize) -> usize {
        rep * self.period()
    }

    /// The representative sitting exactly at `index`, if there is one.
    pub fn rep_of_index(&self, index: usize) -> Option<usize> {
        (index % self.period() == 0).then(|| index / self.period())
    }

    pub fn rep_indices(&self, num_residues: usize) -> Range<usize> {
        0..self.num_reps(num_residues)
    }
}

/// Rounds `entry` to the nearest representative position under `stride`.
pub fn entry_index_of_stride_rep(entry: usize, stride: usize) -> usize {
    let period = stride + 1;
    ((entry + stride / 2) / period) * period
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// The stride at which representatives of two striders coincide.
pub fn co_stride(stride_a: usize, stride_b: usize) -> usize {
    let (a, b) = (stride_a + 1, stride_b + 1);
    a / gcd(a, b) * b - 1
}

/// The four striders of a scan: from/to residues of the query and of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanStride {
    query_from: RepStrider,
    query_to: RepStrider,
    index_from: RepStrider,
    index_to: RepStrider,
}

impl ScanStride {
    pub fn new(
        query_from: RepStrider,
        query_to: RepStrider,
        index_from: RepStrider,
        index_to: RepStrider,
    ) -> Self {
        Self {
            query_from,
            query_to,
            index_from,
            index_to,
        }
    }

    pub fn uniform(strider: RepStrider) -> Self {
        Self::new(strider, strider, strider, strider)
    }

    pub fn query_from(&self) -> RepStrider {
        self.query_from
    }

    pub fn query_to(&self) -> RepStrider {
        self.query_to
    }

    pub fn index_from(&self) -> RepStrider {
        self.index_from
    }

    pub fn index_to(&self) -> RepStrider {
        self.index_to
    }

    pub fn from_co_stride(&self) -> usize {
        co_stride(self.query_from.stride, self.index_from.stride)
    }

    pub fn to_co_stride(&self) -> usize {
        co_stride(self.query_to.stride, self.index_to.stride)
    }

    /// `(query rep, index rep)` for a pair of aligned from-residues, if both have one.
    pub fn from_rep_of_indices(&self, query_index: usize, index_index: usize) -> Option<(usize, usize)> {
        Some((
            self.query_from.rep_of_index(query_index)?,
            self.index_from.rep_of_index(index_index)?,
        ))
    }

    /// `(query rep, index rep)` for a pair of aligned to-residues, if both have one.
    pub fn to_rep_of_indices(&self, query_index: usize, index_index: usize) -> Option<(usize, usize)> {
        Some((
            self.query_to.rep_of_index(query_index)?,
            self.index_to.rep_of_index(index_index)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stride_makes_every_residue_a_rep() {
        let strider = RepStrider::new(0);
        assert_eq!(strider.num_reps(7), 7);
        assert_eq!(strider.index_of_rep(4), 4);
        assert_eq!(strider.rep_of_index(5), Some(5));
    }

    #[test]
    fn num_reps_rounds_up() {
        let strider = RepStrider::new(2);
        assert_eq!(strider.num_reps(0), 0);
        assert_eq!(strider.num_reps(1), 1);
        assert_eq!(strider.num_reps(3), 1);
        assert_eq!(strider.num_reps(4), 2);
        assert_eq!(strider.num_reps(10), 4);
        assert_eq!(strider.rep_indices(10), 0..4);
    }

    #[test]
    fn rep_positions_are_multiples_of_period() {
        let strider = RepStrider::new(2);
        let positions: Vec<_> = strider
            .rep_indices(10)
            .map(|rep| strider.index_of_rep(rep))
            .collect();
        assert_eq!(positions, vec![0, 3, 6, 9]);
        assert_eq!(strider.rep_of_index(6), Some(2));
        assert_eq!(strider.rep_of_index(7), None);
    }

    #[test]
    fn entry_index_rounds_to_nearest_rep_position() {
        assert_eq!(entry_index_of_stride_rep(0, 2), 0);
        assert_eq!(entry_index_of_stride_rep(1, 2), 0);
        assert_eq!(entry_index_of_stride_rep(2, 2), 3);
        assert_eq!(entry_index_of_stride_rep(4, 2), 3);
        assert_eq!(entry_index_of_stride_rep(5, 2), 6);
        assert_eq!(entry_index_of_stride_rep(7, 0), 7);
    }

    #[test]
    fn co_stride_matches_known_values() {
        assert_eq!(co_stride(1, 2), 5);
        assert_eq!(co_stride(2, 3), 11);
        assert_eq!(co_stride(1, 4), 9);
        assert_eq!(co_stride(2, 4), 14);
        assert_eq!(co_stride(3, 4), 19);
        assert_eq!(co_stride(4, 5), 29);
    }

    #[test]
    fn co_stride_is_symmetric_with_identity_cases() {
        for a in 0..6 {
            assert_eq!(co_stride(a, a), a);
            assert_eq!(co_stride(0, a), a);
            for b in 0..6 {
                assert_eq!(co_stride(a, b), co_stride(b, a));
            }
        }
        assert_eq!(co_stride(1, 3), 3);
    }

    #[test]
    fn scan_stride_needs_reps_on_both_sides() {
        let stride = ScanStride::new(
            RepStrider::new(1),
            RepStrider::new(0),
            RepStrider::new(2),
            RepStrider::new(0),
        );
        assert_eq!(stride.from_rep_of_indices(4, 6), Some((2, 2)));
        assert_eq!(stride.from_rep_of_indices(4, 5), None);
        assert_eq!(stride.from_rep_of_indices(3, 6), None);
        assert_eq!(stride.to_rep_of_indices(3, 5), Some((3, 5)));
        assert_eq!(stride.from_co_stride(), 5);
        assert_eq!(stride.to_co_stride(), 0);
    }
}
