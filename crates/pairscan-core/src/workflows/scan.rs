use crate::core::models::res_pair::MultiStrucResRepPair;
use crate::core::models::residue::ScanStructure;
use crate::engine::config::{ScanConfig, StoreDensity, StoreKind};
use crate::engine::criteria::QuadCriteria;
use crate::engine::criteria::checks::are_met_by;
use crate::engine::error::{KeyerError, ScanError};
use crate::engine::keyer::{KeyerParts, ResPairKeyer};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::store::{
    HashIndexStore, IndexStore, RepPairEntry, SortedVecIndexStore, StorePlan, add_structure_to_store,
};
use crate::engine::stride::RepStrider;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// A query residue pair and the index residue pair that matched it, as residue positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanMatch {
    pub index_structure: usize,
    pub query_from: usize,
    pub query_to: usize,
    pub index_from: usize,
    pub index_to: usize,
}

impl fmt::Display for ScanMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "query {}->{} ~ structure {} {}->{}",
            self.query_from, self.query_to, self.index_structure, self.index_from, self.index_to
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub index_cells: usize,
    pub index_entries: usize,
    pub index_bytes: usize,
    pub query_cells: usize,
    pub query_entries: usize,
    /// Index entries compared with a query pair by the full criteria check.
    pub candidates_examined: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    pub matches: Vec<ScanMatch>,
    pub stats: ScanStats,
}

/// Representative pairs of a set of structures, filed by key.
pub struct ScanIndex<T: KeyerParts, S> {
    keyer: ResPairKeyer<T>,
    store: S,
    density: StoreDensity,
    criteria: QuadCriteria,
    from_strider: RepStrider,
    to_strider: RepStrider,
    structure_names: Vec<String>,
}

impl<T, S> ScanIndex<T, S>
where
    T: KeyerParts,
    S: IndexStore<Key = T::Key, Entry = RepPairEntry<T>> + Default,
{
    /// Builds an index over `structures`.
    ///
    /// A dense index files each pair under every cell a query within `criteria` would
    /// address, so it can only be scanned with those same criteria.
    #[instrument(level = "info", skip_all, fields(structures = structures.len(), density = %density))]
    pub fn build(
        keyer: ResPairKeyer<T>,
        structures: &[ScanStructure],
        from_strider: RepStrider,
        to_strider: RepStrider,
        density: StoreDensity,
        criteria: &QuadCriteria,
        reporter: &ProgressReporter,
    ) -> Result<Self, KeyerError> {
        reporter.report(Progress::IndexBuildStart {
            total_structures: structures.len() as u64,
        });
        let plan = StorePlan {
            from_strider,
            to_strider,
            density,
            criteria,
        };

        let mut store = S::default();
        for (structure_index, structure) in structures.iter().enumerate() {
            let entries = add_structure_to_store(&keyer, &mut store, structure, structure_index, &plan)?;
            reporter.report(Progress::StructureIndexed {
                name: structure.name().to_string(),
                entries,
            });
        }

        info!(
            keyer = %keyer,
            cells = store.num_cells(),
            entries = store.num_entries(),
            bytes = store.get_info_size(),
            "Index built."
        );
        reporter.report(Progress::IndexBuildFinish {
            cells: store.num_cells(),
            entries: store.num_entries(),
        });

        Ok(Self {
            keyer,
            store,
            density,
            criteria: criteria.clone(),
            from_strider,
            to_strider,
            structure_names: structures.iter().map(|s| s.name().to_string()).collect(),
        })
    }

    pub fn keyer(&self) -> &ResPairKeyer<T> {
        &self.keyer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn density(&self) -> StoreDensity {
        self.density
    }

    pub fn num_structures(&self) -> usize {
        self.structure_names.len()
    }

    pub fn structure_name(&self, structure_index: usize) -> Option<&str> {
        self.structure_names.get(structure_index).map(String::as_str)
    }
}

/// Representative pairs of one query structure, grouped by key.
pub struct ScanQuerySet<T: KeyerParts, S> {
    store: S,
    from_strider: RepStrider,
    to_strider: RepStrider,
    _keyer: std::marker::PhantomData<T>,
}

impl<T, S> ScanQuerySet<T, S>
where
    T: KeyerParts,
    S: IndexStore<Key = T::Key, Entry = RepPairEntry<T>> + Default,
{
    /// Keys the query with the index's own keyer so that query cells line up with index cells.
    pub fn build<IS>(
        index: &ScanIndex<T, IS>,
        structure: &ScanStructure,
        from_strider: RepStrider,
        to_strider: RepStrider,
    ) -> Result<Self, KeyerError> {
        let mut store = S::default();
        let plan = StorePlan {
            from_strider,
            to_strider,
            density: StoreDensity::Sparse,
            criteria: &index.criteria,
        };
        add_structure_to_store(&index.keyer, &mut store, structure, 0, &plan)?;
        Ok(Self {
            store,
            from_strider,
            to_strider,
            _keyer: std::marker::PhantomData,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

struct CellOutcome {
    matches: Vec<ScanMatch>,
    examined: usize,
}

/// Finds every index pair matching a query pair under `criteria`.
///
/// Matches are sorted by index structure and then by residue positions.
#[instrument(level = "info", skip_all, fields(density = %index.density))]
pub fn scan<T, IS, QS>(
    index: &ScanIndex<T, IS>,
    query: &ScanQuerySet<T, QS>,
    criteria: &QuadCriteria,
    reporter: &ProgressReporter,
) -> Result<ScanResult, ScanError>
where
    T: KeyerParts + Sync,
    T::Value: Send + Sync,
    IS: IndexStore<Key = T::Key, Entry = RepPairEntry<T>> + Sync,
    QS: IndexStore<Key = T::Key, Entry = RepPairEntry<T>> + Sync,
{
    if index.density == StoreDensity::Dense && index.criteria != *criteria {
        return Err(ScanError::DenseCriteriaMismatch {
            built: index.criteria.to_string(),
            requested: criteria.to_string(),
        });
    }

    let query_cells: Vec<_> = query.store.cells().collect();
    reporter.report(Progress::ScanStart {
        total_cells: query_cells.len() as u64,
    });

    let to_match = |query_pair: &MultiStrucResRepPair, index_pair: &MultiStrucResRepPair| ScanMatch {
        index_structure: index_pair.structure_index(),
        query_from: query.from_strider.index_of_rep(query_pair.from_rep()),
        query_to: query.to_strider.index_of_rep(query_pair.to_rep()),
        index_from: index.from_strider.index_of_rep(index_pair.from_rep()),
        index_to: index.to_strider.index_of_rep(index_pair.to_rep()),
    };

    let scan_cell = |(key, entries): &(&T::Key, &[RepPairEntry<T>])| -> Result<CellOutcome, KeyerError> {
        let mut outcome = CellOutcome {
            matches: Vec::new(),
            examined: 0,
        };
        let mut examine = |query_pair: &MultiStrucResRepPair, candidates: &[RepPairEntry<T>]| {
            outcome.examined += candidates.len();
            outcome.matches.extend(
                candidates
                    .iter()
                    .filter(|candidate| are_met_by(criteria, query_pair, candidate.pair()))
                    .map(|candidate| to_match(query_pair, candidate.pair())),
            );
        };
        match index.density {
            StoreDensity::Dense => {
                let candidates = index.store.find_matches(key);
                for entry in entries.iter() {
                    examine(entry.pair(), candidates);
                }
            }
            StoreDensity::Sparse => {
                for entry in entries.iter() {
                    let close_keys = index.keyer.make_close_keys(entry.pair(), criteria)?;
                    index.keyer.for_each_close_key(&close_keys, |close_key| {
                        examine(entry.pair(), index.store.find_matches(&close_key));
                    });
                }
            }
        }
        reporter.report(Progress::CellScanned);
        Ok(outcome)
    };

    #[cfg(not(feature = "parallel"))]
    let iterator = query_cells.iter();

    #[cfg(feature = "parallel")]
    let iterator = query_cells.par_iter();

    let outcomes: Vec<CellOutcome> = iterator.map(scan_cell).collect::<Result<_, _>>()?;

    let mut result = ScanResult {
        matches: Vec::new(),
        stats: ScanStats {
            index_cells: index.store.num_cells(),
            index_entries: index.store.num_entries(),
            index_bytes: index.store.get_info_size(),
            query_cells: query.store.num_cells(),
            query_entries: query.store.num_entries(),
            candidates_examined: 0,
        },
    };
    for outcome in outcomes {
        result.stats.candidates_examined += outcome.examined;
        result.matches.extend(outcome.matches);
    }
    result.matches.sort_unstable();

    reporter.report(Progress::ScanFinish {
        matches: result.matches.len(),
    });
    info!(
        matches = result.matches.len(),
        examined = result.stats.candidates_examined,
        "Scan complete."
    );
    Ok(result)
}

type HashStore<T> = HashIndexStore<<T as KeyerParts>::Key, RepPairEntry<T>>;
type SortedVecStore<T> = SortedVecIndexStore<<T as KeyerParts>::Key, RepPairEntry<T>>;

/// Scans `query` against an index over `index_structures`, with stores and keyer chosen
/// from `config`.
///
/// The direction-keyed keyer is used only when the criteria require matching directions;
/// otherwise a pair and its reverse-direction match would land in different cells.
#[instrument(skip_all, name = "scan_workflow", fields(query = query.name()))]
pub fn run(
    query: &ScanStructure,
    index_structures: &[ScanStructure],
    config: &ScanConfig,
    reporter: &ProgressReporter,
) -> Result<ScanResult, ScanError> {
    if index_structures.is_empty() {
        return Err(ScanError::EmptyInput("no index structures were given"));
    }
    if query.is_empty() {
        warn!("Query structure has no residues; nothing will match.");
    }

    if config.criteria.requires_matching_directions() {
        run_with_keyer(config.keyer.directed_keyer()?, query, index_structures, config, reporter)
    } else {
        run_with_keyer(config.keyer.standard_keyer()?, query, index_structures, config, reporter)
    }
}

fn run_with_keyer<T>(
    keyer: ResPairKeyer<T>,
    query: &ScanStructure,
    index_structures: &[ScanStructure],
    config: &ScanConfig,
    reporter: &ProgressReporter,
) -> Result<ScanResult, ScanError>
where
    T: KeyerParts + Sync,
    T::Value: Send + Sync,
{
    debug!(
        keyer = %keyer,
        index_store = %config.index_store,
        query_store = %config.query_store,
        "Selected scan back ends."
    );
    match (config.index_store, config.query_store) {
        (StoreKind::Hash, StoreKind::Hash) => {
            run_with_stores::<T, HashStore<T>, HashStore<T>>(keyer, query, index_structures, config, reporter)
        }
        (StoreKind::Hash, StoreKind::SortedVec) => {
            run_with_stores::<T, HashStore<T>, SortedVecStore<T>>(keyer, query, index_structures, config, reporter)
        }
        (StoreKind::SortedVec, StoreKind::Hash) => {
            run_with_stores::<T, SortedVecStore<T>, HashStore<T>>(keyer, query, index_structures, config, reporter)
        }
        (StoreKind::SortedVec, StoreKind::SortedVec) => run_with_stores::<T, SortedVecStore<T>, SortedVecStore<T>>(
            keyer,
            query,
            index_structures,
            config,
            reporter,
        ),
    }
}

fn run_with_stores<T, IS, QS>(
    keyer: ResPairKeyer<T>,
    query: &ScanStructure,
    index_structures: &[ScanStructure],
    config: &ScanConfig,
    reporter: &ProgressReporter,
) -> Result<ScanResult, ScanError>
where
    T: KeyerParts + Sync,
    T::Value: Send + Sync,
    IS: IndexStore<Key = T::Key, Entry = RepPairEntry<T>> + Default + Sync,
    QS: IndexStore<Key = T::Key, Entry = RepPairEntry<T>> + Default + Sync,
{
    let stride = &config.stride;
    let index = ScanIndex::<T, IS>::build(
        keyer,
        index_structures,
        stride.index_from(),
        stride.index_to(),
        config.index_density,
        &config.criteria,
        reporter,
    )?;
    let query_set =
        ScanQuerySet::<T, QS>::build(&index, query, stride.query_from(), stride.query_to())?;
    scan(&index, &query_set, &config.criteria, reporter)
}
