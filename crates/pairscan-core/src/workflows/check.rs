use crate::core::models::residue::ScanStructure;
use crate::engine::criteria::QuadCriteria;
use crate::engine::criteria::result::{
    CriteriaResultTally, QuadCriteriaResult, QuadIndices, quad_criteria_result_of, rep_criteria_result_of,
};
use crate::engine::error::ScanError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::stride::ScanStride;
use std::fmt;
use tracing::{info, instrument};

/// Classification counts over every ordered pair of aligned positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentCheck {
    /// Results for the residues at exactly the aligned positions.
    pub quad: CriteriaResultTally,
    /// Results for the representatives standing in for those positions.
    pub rep: CriteriaResultTally,
}

impl AlignmentCheck {
    pub fn num_quads(&self) -> usize {
        self.quad.total()
    }

    /// Share of quads passing exactly that also pass through representatives.
    pub fn rep_recall(&self) -> Option<f64> {
        let quad_passes = self.quad.count(QuadCriteriaResult::Pass);
        (quad_passes > 0).then(|| self.rep.count(QuadCriteriaResult::Pass) as f64 / quad_passes as f64)
    }
}

impl fmt::Display for AlignmentCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "quad: {}", self.quad)?;
        write!(f, "rep:  {}", self.rep)
    }
}

/// Classifies every ordered pair of distinct aligned positions `(a, b)` as the quad
/// `query[a.0] -> query[b.0]` against `index[a.1] -> index[b.1]`.
#[instrument(skip_all, name = "check_workflow", fields(query = query.name(), index = index.name(), aligned = alignment.len()))]
pub fn check_alignment(
    query: &ScanStructure,
    index: &ScanStructure,
    alignment: &[(usize, usize)],
    criteria: &QuadCriteria,
    stride: &ScanStride,
    reporter: &ProgressReporter,
) -> Result<AlignmentCheck, ScanError> {
    reporter.report(Progress::CheckStart {
        total_positions: alignment.len() as u64,
    });

    let mut check = AlignmentCheck::default();
    for (from_pos, &(query_from, index_from)) in alignment.iter().enumerate() {
        for (to_pos, &(query_to, index_to)) in alignment.iter().enumerate() {
            if from_pos == to_pos {
                continue;
            }
            let indices = QuadIndices {
                query_from,
                query_to,
                index_from,
                index_to,
            };
            check
                .quad
                .add(quad_criteria_result_of(query, index, criteria, &indices)?);
            check
                .rep
                .add(rep_criteria_result_of(query, index, criteria, stride, &indices)?);
        }
        reporter.report(Progress::PositionChecked);
    }

    reporter.report(Progress::CheckFinish);
    info!(
        quads = check.num_quads(),
        quad_passes = check.quad.count(QuadCriteriaResult::Pass),
        rep_passes = check.rep.count(QuadCriteriaResult::Pass),
        "Alignment check complete."
    );
    Ok(check)
}
