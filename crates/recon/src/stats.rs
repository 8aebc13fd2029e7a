use crate::model::{MatchResult, MergeStats};

/// Totals over every match result of a run.
pub fn compute_stats(results: &[MatchResult]) -> MergeStats {
    let matched_count = results.iter().filter(|r| r.is_matched()).count();

    MergeStats {
        total_count: results.len(),
        matched_count,
        unmatched_count: results.len() - matched_count,
    }
}
