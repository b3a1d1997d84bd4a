//! Assignment of candidate skills to role skills from a similarity matrix.
//!
//! `SkillGapAnalyzer` holds an `Arc<dyn MatchStrategy>`; `GreedyMatcher` is the
//! default and the only strategy shipped.

use serde::{Deserialize, Serialize};

/// Row-major `candidate × role` similarity values.
pub type SimilarityMatrix = Vec<Vec<f64>>;

/// One accepted pairing of a candidate index with a role index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub candidate_index: usize,
    pub role_index: usize,
    pub similarity: f64,
}

/// Turns a similarity matrix into a one-to-one set of assignments.
///
/// Implementations must be deterministic: identical matrices and thresholds
/// produce identical assignments in identical order. The analyzer discards
/// any returned pair that is out of range, reuses an index, or falls below
/// the threshold.
pub trait MatchStrategy: Send + Sync {
    /// Label recorded on every `GapResult` for transparency.
    fn name(&self) -> &'static str;

    fn assign(&self, matrix: &SimilarityMatrix, threshold: f64) -> Vec<Assignment>;
}

/// Greedy highest-similarity-first matching.
///
/// Algorithm:
/// 1. Collect every cell with similarity ≥ threshold, candidate-major then role order
/// 2. Stable-sort descending by similarity, so ties keep that collection order
/// 3. Accept each pair unless its candidate or role index is already taken
///
/// Not a maximum-weight matching: a near-tie can leave a better global
/// assignment unexplored.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyMatcher;

impl MatchStrategy for GreedyMatcher {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn assign(&self, matrix: &SimilarityMatrix, threshold: f64) -> Vec<Assignment> {
        let role_count = matrix.first().map_or(0, Vec::len);

        let mut candidates: Vec<Assignment> = matrix
            .iter()
            .enumerate()
            .flat_map(move |(ci, row)| {
                row.iter()
                    .enumerate()
                    .filter(move |&(_, &sim)| sim >= threshold)
                    .map(move |(ri, &similarity)| Assignment {
                        candidate_index: ci,
                        role_index: ri,
                        similarity,
                    })
            })
            .collect();

        // Vec::sort_by is stable
        candidates.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

        let mut candidate_taken = vec![false; matrix.len()];
        let mut role_taken = vec![false; role_count];
        let mut accepted = Vec::new();

        for pair in candidates {
            if candidate_taken[pair.candidate_index] || role_taken[pair.role_index] {
                continue;
            }
            candidate_taken[pair.candidate_index] = true;
            role_taken[pair.role_index] = true;
            accepted.push(pair);
        }

        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greedy_takes_highest_first() {
        let matrix = vec![vec![0.9, 0.8], vec![0.85, 0.1]];
        let pairs = GreedyMatcher.assign(&matrix, 0.3);
        // (0,0)=0.9 wins, which blocks (1,0)=0.85; (0,1) is blocked by candidate 0.
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].candidate_index, 0);
        assert_eq!(pairs[0].role_index, 0);
    }

    #[test]
    fn test_one_to_one() {
        let matrix = vec![vec![1.0, 1.0, 1.0], vec![1.0, 1.0, 1.0]];
        let pairs = GreedyMatcher.assign(&matrix, 0.5);
        assert_eq!(pairs.len(), 2);
        // Ties resolve in candidate-major order.
        assert_eq!((pairs[0].candidate_index, pairs[0].role_index), (0, 0));
        assert_eq!((pairs[1].candidate_index, pairs[1].role_index), (1, 1));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let matrix = vec![vec![0.3]];
        assert_eq!(GreedyMatcher.assign(&matrix, 0.3).len(), 1);
        assert!(GreedyMatcher.assign(&matrix, 0.31).is_empty());
    }

    #[test]
    fn test_empty_matrix() {
        assert!(GreedyMatcher.assign(&Vec::new(), 0.3).is_empty());
        assert!(GreedyMatcher.assign(&vec![Vec::new(), Vec::new()], 0.3).is_empty());
    }

    #[test]
    fn test_raising_threshold_never_adds_matches() {
        let matrix = vec![
            vec![0.95, 0.40, 0.0],
            vec![0.50, 0.45, 0.31],
            vec![0.00, 0.60, 0.70],
        ];
        let mut previous = usize::MAX;
        for step in 0..=10 {
            let threshold = step as f64 / 10.0;
            let count = GreedyMatcher.assign(&matrix, threshold).len();
            assert!(count <= previous, "threshold {threshold} increased matches");
            previous = count;
        }
    }
}
