//! Skill-gap analyzer: aligns a candidate's skills with a role's skills.
//!
//! Pure and synchronous: the analyzer keeps only its threshold and matching
//! strategy, both read-only after construction.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{validate_range, FitError};
use crate::gap::explain::{explain_missing, GapExplanation};
use crate::gap::matching::{GreedyMatcher, MatchStrategy, SimilarityMatrix};
use crate::gap::vectorizer::TfIdfModel;
use crate::models::role::RoleSkillSpec;
use crate::models::skill::{SkillSet, SkillToken};

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// A candidate skill paired with the role skill it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedPair {
    pub candidate_skill: SkillToken,
    pub role_skill: SkillToken,
    pub similarity: f64, // 0.0 – 1.0
    pub candidate_index: usize,
    pub role_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapStats {
    pub total_candidate_skills: usize,
    pub total_role_skills: usize,
    pub matched_count: usize,
    pub missing_count: usize,
    pub extra_count: usize,
    pub match_percentage: f64,   // 0 – 100, share of role skills matched
    pub average_similarity: f64, // mean over matched pairs, 0 if none
}

/// Full gap analysis returned to callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapResult {
    pub matched: Vec<MatchedPair>,
    pub missing_required: SkillSet,
    pub missing_preferred: SkillSet,
    pub extra: SkillSet,
    pub stats: GapStats,
    /// Keyed by missing role skill.
    pub explanations: BTreeMap<String, GapExplanation>,
    /// `candidate × role`, for audit and debugging.
    pub similarity_matrix: SimilarityMatrix,
    pub threshold: f64,
    pub matcher: String, // name of the match strategy used
}

impl GapResult {
    pub fn missing_count(&self) -> usize {
        self.missing_required.len() + self.missing_preferred.len()
    }

    pub fn matched_role_skills(&self) -> impl Iterator<Item = &SkillToken> {
        self.matched.iter().map(|m| &m.role_skill)
    }

    pub fn matched_candidate_skills(&self) -> impl Iterator<Item = &SkillToken> {
        self.matched.iter().map(|m| &m.candidate_skill)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Analyzer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SkillGapAnalyzer {
    threshold: f64,
    strategy: Arc<dyn MatchStrategy>,
}

impl std::fmt::Debug for SkillGapAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillGapAnalyzer")
            .field("threshold", &self.threshold)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

impl Default for SkillGapAnalyzer {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            strategy: Arc::new(GreedyMatcher),
        }
    }
}

impl SkillGapAnalyzer {
    /// Fails with `FitError::Configuration` unless `threshold` lies in [0, 1].
    pub fn new(threshold: f64) -> Result<Self, FitError> {
        let threshold = validate_range("similarity threshold", threshold, 0.0, 1.0)?;
        Ok(Self {
            threshold,
            ..Self::default()
        })
    }

    pub fn with_strategy(mut self, strategy: Arc<dyn MatchStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Analyzes a candidate against a role's required/preferred split.
    pub fn analyze_spec(&self, candidate: &[SkillToken], spec: &RoleSkillSpec) -> GapResult {
        self.analyze(candidate, &spec.all_skills(), &spec.required, &spec.preferred)
    }

    /// Aligns `candidate` with `role_skills`.
    ///
    /// Algorithm:
    /// 1. Fit TF-IDF over the distinct candidate and role strings
    /// 2. Build the `candidate × role` cosine similarity matrix
    /// 3. Run the match strategy at the configured threshold, keeping only
    ///    in-range, one-to-one pairs that meet the threshold
    /// 4. Unmatched role skills → missing_required / missing_preferred
    /// 5. Unmatched candidate skills → extra
    ///
    /// A role skill listed in `required` (or in neither partition) is
    /// classified as required when missing. Never fails.
    pub fn analyze(
        &self,
        candidate: &[SkillToken],
        role_skills: &[SkillToken],
        required: &[SkillToken],
        preferred: &[SkillToken],
    ) -> GapResult {
        let matrix = similarity_matrix(candidate, role_skills);
        let assignments = self.strategy.assign(&matrix, self.threshold);

        let mut candidate_matched = vec![false; candidate.len()];
        let mut role_matched = vec![false; role_skills.len()];
        let mut matched: Vec<MatchedPair> = Vec::with_capacity(assignments.len());
        for a in assignments {
            let (ci, ri) = (a.candidate_index, a.role_index);
            // Strategies are pluggable: out-of-range, reused or sub-threshold pairs are dropped.
            let Some(&similarity) = matrix.get(ci).and_then(|row| row.get(ri)) else {
                continue;
            };
            if candidate_matched[ci] || role_matched[ri] || similarity < self.threshold {
                continue;
            }
            candidate_matched[ci] = true;
            role_matched[ri] = true;
            matched.push(MatchedPair {
                candidate_skill: candidate[ci].clone(),
                role_skill: role_skills[ri].clone(),
                similarity,
                candidate_index: ci,
                role_index: ri,
            });
        }

        let required: HashSet<&SkillToken> = required.iter().collect();
        let preferred: HashSet<&SkillToken> = preferred.iter().collect();

        let mut missing_required = Vec::new();
        let mut missing_preferred = Vec::new();
        let mut explanations = BTreeMap::new();
        for (ri, skill) in role_skills.iter().enumerate() {
            if role_matched[ri] {
                continue;
            }
            if preferred.contains(skill) && !required.contains(skill) {
                missing_preferred.push(skill.clone());
            } else {
                missing_required.push(skill.clone());
            }
            explanations
                .entry(skill.as_str().to_string())
                .or_insert_with(|| {
                    explain_missing(skill, ri, candidate, &matrix, self.threshold)
                });
        }

        let extra: SkillSet = candidate
            .iter()
            .zip(&candidate_matched)
            .filter(|&(_, &taken)| !taken)
            .map(|(skill, _)| skill.clone())
            .collect();

        let stats = compute_stats(candidate.len(), role_skills.len(), &matched, extra.len());

        GapResult {
            matched,
            missing_required,
            missing_preferred,
            extra,
            stats,
            explanations,
            similarity_matrix: matrix,
            threshold: self.threshold,
            matcher: self.strategy.name().to_string(),
        }
    }

    /// Similarity of a single pair, fitted on just those two strings.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        if a.trim().is_empty() || b.trim().is_empty() {
            return 0.0;
        }
        TfIdfModel::fit([a, b]).similarity(a, b)
    }
}

/// Builds the `candidate × role` cosine similarity matrix over a shared TF-IDF fit.
pub fn similarity_matrix(candidate: &[SkillToken], role_skills: &[SkillToken]) -> SimilarityMatrix {
    let model = TfIdfModel::fit(
        candidate
            .iter()
            .chain(role_skills.iter())
            .map(SkillToken::as_str),
    );

    let role_docs: Vec<Option<usize>> = role_skills
        .iter()
        .map(|s| model.document_id(s.as_str()))
        .collect();

    candidate
        .iter()
        .map(|c| {
            let cd = model.document_id(c.as_str());
            role_docs
                .iter()
                .map(|rd| match (cd, *rd) {
                    (Some(a), Some(b)) => model.document_similarity(a, b),
                    _ => 0.0,
                })
                .collect()
        })
        .collect()
}

fn compute_stats(
    candidate_total: usize,
    role_total: usize,
    matched: &[MatchedPair],
    extra_count: usize,
) -> GapStats {
    let matched_count = matched.len();
    let match_percentage = if role_total > 0 {
        matched_count as f64 / role_total as f64 * 100.0
    } else {
        0.0
    };
    let average_similarity = if matched_count > 0 {
        matched.iter().map(|m| m.similarity).sum::<f64>() / matched_count as f64
    } else {
        0.0
    };

    GapStats {
        total_candidate_skills: candidate_total,
        total_role_skills: role_total,
        matched_count,
        missing_count: role_total - matched_count,
        extra_count,
        match_percentage,
        average_similarity,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
