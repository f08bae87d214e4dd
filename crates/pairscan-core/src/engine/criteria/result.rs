use super::QuadCriteria;
use super::checks::{SingleChecks, core_are_met_by};
use crate::core::models::res_pair::{MultiStrucResRepPair, ResPairCore, SingleStrucResPair};
use crate::core::models::residue::{ScanResidue, ScanStructure};
use crate::engine::error::ScanError;
use crate::engine::stride::ScanStride;
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

/// Why a candidate pair of residue pairs was rejected, or that it passed.
///
/// Variants are listed in the order the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuadCriteriaResult {
    HasNoRep,
    QueryFailsSingleChecks,
    IndexFailsSingleChecks,
    FailsViewCheck,
    FailsPhiCheck,
    FailsPsiCheck,
    FailsFrameCheck,
    FailsQuadChecks,
    Pass,
}

impl QuadCriteriaResult {
    pub const ALL: [QuadCriteriaResult; 9] = [
        QuadCriteriaResult::HasNoRep,
        QuadCriteriaResult::QueryFailsSingleChecks,
        QuadCriteriaResult::IndexFailsSingleChecks,
        QuadCriteriaResult::FailsViewCheck,
        QuadCriteriaResult::FailsPhiCheck,
        QuadCriteriaResult::FailsPsiCheck,
        QuadCriteriaResult::FailsFrameCheck,
        QuadCriteriaResult::FailsQuadChecks,
        QuadCriteriaResult::Pass,
    ];

    pub fn is_pass(self) -> bool {
        self == QuadCriteriaResult::Pass
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuadCriteriaResult::HasNoRep => "HAS_NO_REP",
            QuadCriteriaResult::QueryFailsSingleChecks => "QUERY_FAILS_SINGLE_CHECKS",
            QuadCriteriaResult::IndexFailsSingleChecks => "INDEX_FAILS_SINGLE_CHECKS",
            QuadCriteriaResult::FailsViewCheck => "FAILS_VIEW_CHECK",
            QuadCriteriaResult::FailsPhiCheck => "FAILS_PHI_CHECK",
            QuadCriteriaResult::FailsPsiCheck => "FAILS_PSI_CHECK",
            QuadCriteriaResult::FailsFrameCheck => "FAILS_FRAME_CHECK",
            QuadCriteriaResult::FailsQuadChecks => "FAILS_QUAD_CHECKS",
            QuadCriteriaResult::Pass => "PASS",
        }
    }
}

impl fmt::Display for QuadCriteriaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs the ordered checks on a query pair and an index pair, stopping at the first failure.
pub fn criteria_result_of<P: SingleChecks>(
    criteria: &QuadCriteria,
    query: &P,
    index: &P,
) -> QuadCriteriaResult {
    if !query.are_not_violated_by(criteria) {
        return QuadCriteriaResult::QueryFailsSingleChecks;
    }
    if !index.are_not_violated_by(criteria) {
        return QuadCriteriaResult::IndexFailsSingleChecks;
    }

    let (a, b) = (query.core(), index.core());
    if a.squared_distance(b) > criteria.maximum_squared_distance() {
        return QuadCriteriaResult::FailsViewCheck;
    }
    if a.max_phi_angle_difference(b) > criteria.maximum_phi_angle_difference() {
        return QuadCriteriaResult::FailsPhiCheck;
    }
    if a.max_psi_angle_difference(b) > criteria.maximum_psi_angle_difference() {
        return QuadCriteriaResult::FailsPsiCheck;
    }
    if a.distance_1_between_frames(b) > criteria.maximum_frame_angle_distance_1() {
        return QuadCriteriaResult::FailsFrameCheck;
    }
    if !core_are_met_by(criteria, a, b)
        || (criteria.requires_matching_directions() && !query.same_direction(index))
    {
        return QuadCriteriaResult::FailsQuadChecks;
    }
    QuadCriteriaResult::Pass
}

/// Residue positions of a query pair and the index pair it is aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadIndices {
    pub query_from: usize,
    pub query_to: usize,
    pub index_from: usize,
    pub index_to: usize,
}

fn residue_of(structure: &ScanStructure, index: usize) -> Result<&ScanResidue, ScanError> {
    structure
        .residue(index)
        .ok_or_else(|| ScanError::ResidueIndexOutOfRange {
            structure: structure.name().to_string(),
            index,
            len: structure.len(),
        })
}

/// Classifies the pairs at exactly the given residue positions.
pub fn quad_criteria_result_of(
    query_structure: &ScanStructure,
    index_structure: &ScanStructure,
    criteria: &QuadCriteria,
    indices: &QuadIndices,
) -> Result<QuadCriteriaResult, ScanError> {
    let query = SingleStrucResPair::new(
        ResPairCore::between(
            residue_of(query_structure, indices.query_from)?,
            residue_of(query_structure, indices.query_to)?,
        ),
        indices.query_from,
        indices.query_to,
    );
    let index = SingleStrucResPair::new(
        ResPairCore::between(
            residue_of(index_structure, indices.index_from)?,
            residue_of(index_structure, indices.index_to)?,
        ),
        indices.index_from,
        indices.index_to,
    );
    Ok(criteria_result_of(criteria, &query, &index))
}

/// Classifies the representative pairs standing in for the given residue positions.
///
/// Returns [`QuadCriteriaResult::HasNoRep`] before any geometric check when either end of
/// the alignment has no representative under `stride`.
pub fn rep_criteria_result_of(
    query_structure: &ScanStructure,
    index_structure: &ScanStructure,
    criteria: &QuadCriteria,
    stride: &ScanStride,
    indices: &QuadIndices,
) -> Result<QuadCriteriaResult, ScanError> {
    let from_reps = stride.from_rep_of_indices(indices.query_from, indices.index_from);
    let to_reps = stride.to_rep_of_indices(indices.query_to, indices.index_to);
    let (Some((query_from_rep, index_from_rep)), Some((query_to_rep, index_to_rep))) =
        (from_reps, to_reps)
    else {
        return Ok(QuadCriteriaResult::HasNoRep);
    };

    let query = MultiStrucResRepPair::from_residues(
        residue_of(query_structure, stride.query_from().index_of_rep(query_from_rep))?,
        residue_of(query_structure, stride.query_to().index_of_rep(query_to_rep))?,
        0,
        query_from_rep,
        query_to_rep,
    );
    let index = MultiStrucResRepPair::from_residues(
        residue_of(index_structure, stride.index_from().index_of_rep(index_from_rep))?,
        residue_of(index_structure, stride.index_to().index_of_rep(index_to_rep))?,
        1,
        index_from_rep,
        index_to_rep,
    );
    let result = criteria_result_of(criteria, &query, &index);
    trace!(
        "Quad: [({},{})->({},{})], Rep[({},{})->({},{})]={}",
        indices.query_from,
        indices.index_from,
        indices.query_to,
        indices.index_to,
        query_from_rep,
        index_from_rep,
        query_to_rep,
        index_to_rep,
        result
    );
    Ok(result)
}

/// Counts of classification results, for reporting by failure reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaResultTally {
    counts: BTreeMap<QuadCriteriaResult, usize>,
}

impl CriteriaResultTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: QuadCriteriaResult) {
        *self.counts.entry(result).or_default() += 1;
    }

    pub fn count(&self, result: QuadCriteriaResult) -> usize {
        self.counts.get(&result).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn merge(&mut self, other: &CriteriaResultTally) {
        for (&result, &count) in &other.counts {
            *self.counts.entry(result).or_default() += count;
        }
    }

    /// Non-zero counts in check order.
    pub fn iter(&self) -> impl Iterator<Item = (QuadCriteriaResult, usize)> + '_ {
        self.counts.iter().map(|(&result, &count)| (result, count))
    }
}

impl FromIterator<QuadCriteriaResult> for CriteriaResultTally {
    fn from_iter<I: IntoIterator<Item = QuadCriteriaResult>>(iter: I) -> Self {
        let mut tally = Self::new();
        for result in iter {
            tally.add(result);
        }
        tally
    }
}

impl fmt::Display for CriteriaResultTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();
        for (result, count) in self.iter() {
            let percent = if total == 0 {
                0.0
            } else {
                100.0 * count as f64 / total as f64
            };
            writeln!(f, "{:>25} {:>8} ({:5.1}%)", result, count, percent)?;
        }
        Ok(())
    }
}
