use super::{IndexEntry, IndexStore};
use crate::core::models::res_pair::MultiStrucResRepPair;
use crate::core::models::residue::ScanStructure;
use crate::engine::config::StoreDensity;
use crate::engine::criteria::QuadCriteria;
use crate::engine::error::KeyerError;
use crate::engine::keyer::{KeyerParts, ResPairKeyer};
use crate::engine::stride::RepStrider;
use tracing::{debug, instrument};

/// Entries of a store holding representative pairs keyed by `T`.
pub type RepPairEntry<T> = IndexEntry<<T as KeyerParts>::Value, MultiStrucResRepPair>;

/// How the representative pairs of a structure are chosen and filed.
#[derive(Debug, Clone, Copy)]
pub struct StorePlan<'a> {
    pub from_strider: RepStrider,
    pub to_strider: RepStrider,
    pub density: StoreDensity,
    /// Radii for close keys; only read for dense stores.
    pub criteria: &'a QuadCriteria,
}

/// Adds every ordered pair of distinct representatives of `structure` to `store`.
///
/// Returns the number of entries written, which for a dense store counts each pair once
/// per cell it lands in.
#[instrument(level = "debug", skip_all, fields(structure = structure.name(), structure_index))]
pub fn add_structure_to_store<T, S>(
    keyer: &ResPairKeyer<T>,
    store: &mut S,
    structure: &ScanStructure,
    structure_index: usize,
    plan: &StorePlan,
) -> Result<usize, KeyerError>
where
    T: KeyerParts,
    S: IndexStore<Key = T::Key, Entry = RepPairEntry<T>>,
{
    let residues = structure.residues();
    let mut written = 0;

    for from_rep in plan.from_strider.rep_indices(residues.len()) {
        let from = &residues[plan.from_strider.index_of_rep(from_rep)];
        for to_rep in plan.to_strider.rep_indices(residues.len()) {
            if from_rep == to_rep {
                continue;
            }
            let to = &residues[plan.to_strider.index_of_rep(to_rep)];
            let pair = MultiStrucResRepPair::from_residues(from, to, structure_index, from_rep, to_rep);

            match plan.density {
                StoreDensity::Sparse => {
                    let key = keyer.make_key(&pair)?;
                    keyer.store_emplace_value(store, key, &pair);
                    written += 1;
                }
                StoreDensity::Dense => {
                    let close_keys = keyer.make_close_keys(&pair, plan.criteria)?;
                    keyer.for_each_close_key(&close_keys, |key| {
                        keyer.store_emplace_value(store, key, &pair);
                        written += 1;
                    });
                }
            }
        }
    }

    debug!(entries = written, cells = store.num_cells(), "Structure added to store.");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::angle::Angle;
    use crate::core::models::residue::ScanResidue;
    use crate::engine::keyer::parts::{ViewAxis, ViewAxisKeyerPart};
    use crate::engine::store::{HashIndexStore, SortedVecIndexStore};
    use nalgebra::{Point3, Rotation3};

    fn line_structure(len: usize) -> ScanStructure {
        let residues = (0..len)
            .map(|i| {
                let x = 3.8 * i as f64;
                ScanResidue::new(
                    Point3::new(x, 0.0, 0.0),
                    Point3::new(x, 1.5, 0.0),
                    Rotation3::identity(),
                    Angle::from_degrees(300.0),
                    Angle::from_degrees(320.0),
                )
                .unwrap()
            })
            .collect();
        ScanStructure::new("line", residues)
    }

    fn keyer() -> ResPairKeyer<(ViewAxisKeyerPart,)> {
        ResPairKeyer::new((ViewAxisKeyerPart::new(ViewAxis::X, 2.0).unwrap(),))
    }

    fn plan(stride: usize, density: StoreDensity, criteria: &QuadCriteria) -> StorePlan<'_> {
        StorePlan {
            from_strider: RepStrider::new(stride),
            to_strider: RepStrider::new(stride),
            density,
            criteria,
        }
    }

    #[test]
    fn sparse_store_holds_each_rep_pair_once() {
        let criteria = QuadCriteria::default();
        let structure = line_structure(10);
        let mut store = HashIndexStore::new();
        let written = add_structure_to_store(
            &keyer(),
            &mut store,
            &structure,
            3,
            &plan(0, StoreDensity::Sparse, &criteria),
        )
        .unwrap();
        assert_eq!(written, 90);
        assert_eq!(store.num_entries(), 90);
        assert!(store
            .cells()
            .flat_map(|(_, cell)| cell)
            .all(|entry| entry.pair().structure_index() == 3
                && entry.pair().from_rep() != entry.pair().to_rep()));
    }

    #[test]
    fn striding_pairs_only_representatives() {
        let criteria = QuadCriteria::default();
        let structure = line_structure(10);
        let mut store = SortedVecIndexStore::new();
        let written = add_structure_to_store(
            &keyer(),
            &mut store,
            &structure,
            0,
            &plan(2, StoreDensity::Sparse, &criteria),
        )
        .unwrap();
        // Reps sit at residues 0, 3, 6 and 9.
        assert_eq!(written, 4 * 3);
    }

    #[test]
    fn sparse_entry_lies_in_cell_of_its_own_key() {
        let criteria = QuadCriteria::default();
        let structure = line_structure(10);
        let keyer = keyer();
        let mut store = SortedVecIndexStore::new();
        add_structure_to_store(&keyer, &mut store, &structure, 0, &plan(0, StoreDensity::Sparse, &criteria))
            .unwrap();
        for (key, cell) in store.cells() {
            for entry in cell {
                assert_eq!(keyer.make_key(entry.pair()).unwrap(), *key);
            }
        }
    }

    #[test]
    fn dense_store_files_each_pair_under_every_close_key() {
        let criteria = QuadCriteria::default();
        let structure = line_structure(4);
        let keyer = keyer();
        let mut sparse = HashIndexStore::new();
        let mut dense = HashIndexStore::new();
        let sparse_written =
            add_structure_to_store(&keyer, &mut sparse, &structure, 0, &plan(0, StoreDensity::Sparse, &criteria))
                .unwrap();
        let dense_written =
            add_structure_to_store(&keyer, &mut dense, &structure, 0, &plan(0, StoreDensity::Dense, &criteria))
                .unwrap();
        assert_eq!(sparse_written, 12);
        assert!(dense_written > sparse_written);
        for (key, cell) in sparse.cells() {
            for entry in cell {
                assert!(dense.find_matches(key).contains(entry));
            }
        }
    }
}
