use serde::{Deserialize, Serialize};

use crate::gap::matching::SimilarityMatrix;
use crate::models::skill::SkillToken;

/// Why a role skill ended up missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapExplanation {
    /// Highest-similarity candidate skill, if any candidate shares a term with the role skill.
    pub closest_candidate: Option<SkillToken>,
    pub closest_similarity: f64,
    pub threshold: f64,
    /// `threshold - closest_similarity`, floored at 0.
    pub threshold_gap: f64,
    pub message: String,
}

/// Builds the explanation for the role skill at `role_index`.
pub(crate) fn explain_missing(
    skill: &SkillToken,
    role_index: usize,
    candidate: &[SkillToken],
    matrix: &SimilarityMatrix,
    threshold: f64,
) -> GapExplanation {
    // First candidate wins ties.
    let mut closest: Option<(usize, f64)> = None;
    for (ci, row) in matrix.iter().enumerate() {
        let sim = row.get(role_index).copied().unwrap_or(0.0);
        if sim > 0.0 && closest.map_or(true, |(_, best)| sim > best) {
            closest = Some((ci, sim));
        }
    }

    let closest_similarity = closest.map_or(0.0, |(_, sim)| sim);
    let threshold_gap = (threshold - closest_similarity).max(0.0);

    let message = match closest {
        _ if candidate.is_empty() => format!(
            "Skill '{skill}' is missing because the candidate skill list is empty."
        ),
        None => format!(
            "Skill '{skill}' is missing because no candidate skill shares any terms with it."
        ),
        Some((ci, sim)) if sim < threshold => format!(
            "Skill '{skill}' is missing: the closest candidate skill is '{}' with similarity {sim:.2}, \
             {threshold_gap:.2} below the threshold of {threshold:.2}.",
            candidate[ci]
        ),
        Some((ci, sim)) => format!(
            "Skill '{skill}' is missing: its closest candidate skill '{}' (similarity {sim:.2}) \
             was already matched to a more similar role skill.",
            candidate[ci]
        ),
    };

    GapExplanation {
        closest_candidate: closest.map(|(ci, _)| candidate[ci].clone()),
        closest_similarity,
        threshold,
        threshold_gap,
        message,
    }
}

/// Plain-language description of how similarity and matching decisions are made.
pub fn methodology(threshold: f64) -> String {
    format!(
        "HOW SKILL MATCHING WORKS\n\
         \n\
         1. TF-IDF vectorization\n\
         \x20  - Every distinct skill string is treated as its own short document.\n\
         \x20  - Text is lowercased and split into words; single words and adjacent word pairs are terms.\n\
         \x20  - Each term is weighted by its count times ln((1 + documents) / (1 + documents containing it)) + 1.\n\
         \x20  - Vectors are scaled to unit length.\n\
         \n\
         2. Cosine similarity\n\
         \x20  - cos = (A . B) / (|A| x |B|), which lies in [0, 1] for these non-negative vectors.\n\
         \x20  - Skills with no words in common score 0; identical skills score 1.\n\
         \x20  - Abbreviations do not share words with their expansion (\"ML\" vs \"Machine Learning\" scores 0).\n\
         \n\
         3. Matching\n\
         \x20  - Every candidate/role pair with similarity >= {threshold:.2} is eligible.\n\
         \x20  - Eligible pairs are taken highest similarity first; each skill is used at most once.\n\
         \n\
         4. Missing skills\n\
         \x20  - A role skill left unmatched is missing. Its explanation names the closest candidate\n\
         \x20    skill and how far that similarity falls short of the threshold."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::skill::skill_set;

    #[test]
    fn test_below_threshold_names_closest_candidate() {
        let candidate = skill_set(["Java", "JavaScript Testing"]);
        let matrix = vec![vec![0.0], vec![0.2]];
        let e = explain_missing(&SkillToken::new("Testing"), 0, &candidate, &matrix, 0.3);
        assert_eq!(e.closest_candidate, Some(SkillToken::new("JavaScript Testing")));
        assert!((e.threshold_gap - 0.1).abs() < 1e-9);
        assert!(e.message.contains("0.20"));
        assert!(e.message.contains("0.30"));
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        let candidate = skill_set(["A B", "B C"]);
        let matrix = vec![vec![0.25], vec![0.25]];
        let e = explain_missing(&SkillToken::new("B"), 0, &candidate, &matrix, 0.3);
        assert_eq!(e.closest_candidate, Some(SkillToken::new("A B")));
    }

    #[test]
    fn test_no_shared_terms() {
        let candidate = skill_set(["Excel"]);
        let matrix = vec![vec![0.0]];
        let e = explain_missing(&SkillToken::new("Rust"), 0, &candidate, &matrix, 0.3);
        assert!(e.closest_candidate.is_none());
        assert_eq!(e.threshold_gap, 0.3);
        assert!(e.message.contains("shares any terms"));
    }

    #[test]
    fn test_methodology_mentions_threshold() {
        assert!(methodology(0.3).contains(">= 0.30"));
    }
}
