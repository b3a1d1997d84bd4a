//! Readiness scorer: turns a gap result plus experience and portfolio signals
//! into one 0–100 score.
//!
//! Every number is a closed-form function of its inputs, and the returned
//! `ScoreTrace` carries enough to recompute the overall score by hand.

use serde::{Deserialize, Serialize};

use crate::errors::FitError;
use crate::gap::GapResult;
use crate::readiness::explain::{explanation_report, ReadinessBand};
use crate::readiness::weights::ScoringWeights;

const MAX_MISSING_REQUIRED_PENALTY: f64 = 30.0;
const PENALTY_PER_MISSING_REQUIRED: f64 = 10.0;

const OPTIMAL_MIN_YEARS: f64 = 3.0;
const OPTIMAL_MAX_YEARS: f64 = 5.0;
const BELOW_MINIMUM_CEILING: f64 = 50.0;
const AT_MINIMUM_SCORE: f64 = 75.0;
const PENALTY_PER_EXCESS_YEAR: f64 = 2.0;
const MAX_EXCESS_PENALTY: f64 = 10.0;
const EXCESS_FLOOR: f64 = 90.0;

/// Project score by portfolio size; four or more items cap at the last step.
const PROJECT_STEPS: &[f64] = &[0.0, 30.0, 60.0, 85.0, 100.0];

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,     // 0 – 100
    pub experience: f64, // 0 – 100
    pub projects: f64,   // 0 – 100
}

/// Audit entry for one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentTrace {
    pub value: f64,
    pub weight: f64,
    /// `value × weight`, in overall-score points.
    pub contribution: f64,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallTrace {
    pub formula: String,
    pub result: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTrace {
    pub skills: ComponentTrace,
    pub experience: ComponentTrace,
    pub projects: ComponentTrace,
    pub overall: OverallTrace,
}

/// Full readiness result returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessScore {
    pub overall_score: f64, // 0 – 100, two decimals
    pub breakdown: ScoreBreakdown,
    pub band: ReadinessBand,
    pub trace: ScoreTrace,
    pub explanation: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadinessScorer {
    weights: ScoringWeights,
}

impl Default for ReadinessScorer {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }
}

impl ReadinessScorer {
    /// Normalises `weights` to sum to 1; invalid weights are a configuration error.
    pub fn new(weights: ScoringWeights) -> Result<Self, FitError> {
        Ok(Self {
            weights: weights.normalized()?,
        })
    }

    /// Effective (normalised) weights.
    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Scores a candidate for one role.
    ///
    /// Negative or NaN `experience_years` count as 0. `role_required_years` ≤ 0
    /// means the role has no minimum.
    pub fn score(
        &self,
        gap: &GapResult,
        experience_years: f64,
        portfolio_count: usize,
        role_required_years: f64,
    ) -> ReadinessScore {
        let (skills, skill_note) = skill_score(gap);
        let (experience, experience_note) = experience_score(experience_years, role_required_years);
        let (projects, project_note) = project_score(portfolio_count);

        let w = self.weights;
        let overall_score = round2(w.combine(skills, experience, projects)).clamp(0.0, 100.0);
        let breakdown = ScoreBreakdown {
            skills,
            experience,
            projects,
        };

        let trace = ScoreTrace {
            skills: component(skills, w.skills, skill_note),
            experience: component(experience, w.experience, experience_note),
            projects: component(projects, w.projects, project_note),
            overall: OverallTrace {
                formula: format!(
                    "({skills:.2} × {:.4}) + ({experience:.2} × {:.4}) + ({projects:.2} × {:.4})",
                    w.skills, w.experience, w.projects
                ),
                result: overall_score,
            },
        };

        let band = ReadinessBand::from_score(overall_score);
        let explanation = explanation_report(
            overall_score,
            band,
            &breakdown,
            &w,
            gap,
            clamp_years(experience_years),
            portfolio_count,
        );

        ReadinessScore {
            overall_score,
            breakdown,
            band,
            trace,
            explanation,
        }
    }
}

fn component(value: f64, weight: f64, explanation: String) -> ComponentTrace {
    ComponentTrace {
        value,
        weight,
        contribution: value * weight,
        explanation,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Component formulas
// ────────────────────────────────────────────────────────────────────────────

/// `matched / total × 100` minus `min(30, 10 × missing_required)`, floored at 0.
/// A role with no skills scores 100.
pub fn skill_score(gap: &GapResult) -> (f64, String) {
    let total = gap.stats.total_role_skills;
    let matched = gap.stats.matched_count;
    let missing_required = gap.missing_required.len();
    let missing_preferred = gap.missing_preferred.len();

    if total == 0 {
        return (
            100.0,
            "No role skills specified; treated as a full match (100/100 points).".to_string(),
        );
    }

    let base = matched as f64 / total as f64 * 100.0;
    let penalty =
        (missing_required as f64 * PENALTY_PER_MISSING_REQUIRED).min(MAX_MISSING_REQUIRED_PENALTY);
    let score = round2((base - penalty).clamp(0.0, 100.0));

    let explanation = format!(
        "Matched {matched}/{total} role skills ({base:.1}%); {missing_required} required missing \
         (-{penalty:.0} penalty), {missing_preferred} preferred missing. Skill score: {score:.2}/100."
    );
    (score, explanation)
}

/// Piecewise experience score.
///
/// | years `y` vs required `r`      | score                                  |
/// |--------------------------------|----------------------------------------|
/// | y = 0                          | 0                                      |
/// | 0 < y < r                      | (y / r) × 50                           |
/// | y = r                          | 75                                     |
/// | r < y < 3                      | 75 + 25 × (y − r) / (3 − r)            |
/// | y ≤ 5                          | 100                                    |
/// | y > 5                          | max(90, 100 − min(10, (y − 5) × 2))    |
pub fn experience_score(experience_years: f64, required_years: f64) -> (f64, String) {
    let y = clamp_years(experience_years);
    let r = if required_years.is_finite() && required_years > 0.0 {
        required_years
    } else {
        0.0
    };

    let (score, explanation) = if y == 0.0 {
        (0.0, "No experience specified (0 points).".to_string())
    } else if y < r {
        let score = y / r * BELOW_MINIMUM_CEILING;
        (
            score,
            format!(
                "Below required experience ({y:.1} < {r:.1} years). Linear scale: {score:.1}/50 points."
            ),
        )
    } else if y == r {
        (
            AT_MINIMUM_SCORE,
            format!("Meets minimum requirement ({y:.1} years). Score: 75/100 points."),
        )
    } else if y < OPTIMAL_MIN_YEARS {
        let progress = (y - r) / (OPTIMAL_MIN_YEARS - r);
        let score = AT_MINIMUM_SCORE + progress * (100.0 - AT_MINIMUM_SCORE);
        (
            score,
            format!(
                "Between required and optimal ({y:.1} years, {r:.1} required). Score: {score:.1}/100 points."
            ),
        )
    } else if y <= OPTIMAL_MAX_YEARS {
        (
            100.0,
            format!("Optimal experience range ({y:.1} years). Maximum score: 100/100 points."),
        )
    } else {
        let penalty = ((y - OPTIMAL_MAX_YEARS) * PENALTY_PER_EXCESS_YEAR).min(MAX_EXCESS_PENALTY);
        let score = (100.0 - penalty).max(EXCESS_FLOOR);
        (
            score,
            format!(
                "Beyond optimal range ({y:.1} years). Diminishing returns: {score:.1}/100 points."
            ),
        )
    };

    (round2(score.clamp(0.0, 100.0)), explanation)
}

/// Stepwise: 0 → 0, 1 → 30, 2 → 60, 3 → 85, 4+ → 100.
pub fn project_score(portfolio_count: usize) -> (f64, String) {
    let last = PROJECT_STEPS.len() - 1;
    let score = PROJECT_STEPS[portfolio_count.min(last)];
    let explanation = match portfolio_count {
        0 => "No portfolio items listed (0 points).".to_string(),
        1 => "1 portfolio item listed (30/100 points).".to_string(),
        n if n >= last => format!("{n} portfolio items listed (100/100 points, capped)."),
        n => format!("{n} portfolio items listed ({score:.0}/100 points)."),
    };
    (score, explanation)
}

fn clamp_years(years: f64) -> f64 {
    if years.is_nan() {
        0.0
    } else {
        years.max(0.0)
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gap::SkillGapAnalyzer;
    use crate::models::role::RoleSkillSpec;
    use crate::models::skill::skill_set;

    fn gap(candidate: &[&str], required: &[&str], preferred: &[&str]) -> GapResult {
        let spec = RoleSkillSpec::new(
            skill_set(required.iter().copied()),
            skill_set(preferred.iter().copied()),
        );
        SkillGapAnalyzer::default().analyze_spec(&skill_set(candidate.iter().copied()), &spec)
    }

    #[test]
    fn test_experience_at_required_is_exactly_75() {
        assert_eq!(experience_score(2.0, 2.0).0, 75.0);
    }

    #[test]
    fn test_experience_bands() {
        assert_eq!(experience_score(0.0, 2.0).0, 0.0);
        assert_eq!(experience_score(1.0, 2.0).0, 25.0);
        assert_eq!(experience_score(2.5, 2.0).0, 87.5);
        assert_eq!(experience_score(3.0, 2.0).0, 100.0);
        assert_eq!(experience_score(5.0, 2.0).0, 100.0);
        assert_eq!(experience_score(6.0, 2.0).0, 98.0);
        assert_eq!(experience_score(30.0, 2.0).0, 90.0);
    }

    #[test]
    fn test_negative_years_clamped_to_zero() {
        let (score, note) = experience_score(-3.0, 2.0);
        assert_eq!(score, 0.0);
        assert!(note.contains("No experience"));
    }

    #[test]
    fn test_no_minimum_skips_below_minimum_branch() {
        // r <= 0: 1.5 years lands in the 75–100 ramp toward the optimal band.
        assert_eq!(experience_score(1.5, 0.0).0, 87.5);
        assert_eq!(experience_score(1.5, -1.0).0, 87.5);
        assert_eq!(experience_score(0.0, 0.0).0, 0.0);
    }

    #[test]
    fn test_high_minimum_reaches_optimal_band_directly() {
        assert_eq!(experience_score(3.5, 4.0).0, 43.75);
        assert_eq!(experience_score(4.0, 4.0).0, 75.0);
        assert_eq!(experience_score(4.5, 4.0).0, 100.0);
    }

    #[test]
    fn test_project_steps() {
        let scores: Vec<f64> = (0..=6).map(|n| project_score(n).0).collect();
        assert_eq!(scores, vec![0.0, 30.0, 60.0, 85.0, 100.0, 100.0, 100.0]);
        assert!(project_score(7).1.contains("capped"));
    }

    #[test]
    fn test_skill_score_with_penalty() {
        // 1 of 3 matched (33.33) minus 10 for TensorFlow.
        let g = gap(&["Python", "SQL"], &["Python", "TensorFlow"], &["AWS"]);
        let (score, note) = skill_score(&g);
        assert_eq!(score, 23.33);
        assert!(note.contains("1/3"));
        assert!(note.contains("1 required missing"));
        assert!(note.contains("1 preferred missing"));
    }

    #[test]
    fn test_skill_score_empty_candidate_is_zero() {
        let g = gap(&[], &["Python", "Docker", "AWS"], &[]);
        assert_eq!(g.stats.matched_count, 0);
        assert_eq!(skill_score(&g).0, 0.0);
    }

    #[test]
    fn test_skill_score_no_role_skills_is_100() {
        let g = gap(&["Python"], &[], &[]);
        assert_eq!(skill_score(&g).0, 100.0);
    }

    #[test]
    fn test_skill_penalty_capped_at_30() {
        let held = ["A1", "A2", "A3", "A4", "A5", "A6"];
        let wanted = ["A1", "A2", "A3", "A4", "A5", "A6", "Z1", "Z2", "Z3", "Z4"];
        let g = gap(&held, &wanted, &[]);
        // 6/10 = 60, four missing → capped penalty 30.
        assert_eq!(skill_score(&g).0, 30.0);
    }

    #[test]
    fn test_overall_combination_and_trace() {
        let g = gap(&["Python", "SQL"], &["Python", "SQL"], &[]);
        let result = ReadinessScorer::default().score(&g, 2.0, 3, 2.0);

        // 100*0.6 + 75*0.25 + 85*0.15 = 60 + 18.75 + 12.75
        assert_eq!(result.overall_score, 91.5);
        assert_eq!(result.breakdown.skills, 100.0);
        assert_eq!(result.breakdown.experience, 75.0);
        assert_eq!(result.breakdown.projects, 85.0);
        assert_eq!(result.band, ReadinessBand::Excellent);

        let t = &result.trace;
        assert_eq!(t.skills.weight, 0.60);
        assert!((t.experience.contribution - 18.75).abs() < 1e-9);
        assert!(t.projects.explanation.contains("3 portfolio items"));
        assert!(t.experience.explanation.contains("2.0 years"));
        let sum = t.skills.contribution + t.experience.contribution + t.projects.contribution;
        assert!((sum - result.overall_score).abs() < 0.01);
        assert_eq!(t.overall.result, 91.5);
    }

    #[test]
    fn test_custom_weights_are_renormalized() {
        let scorer = ReadinessScorer::new(ScoringWeights::new(1.0, 0.6, 0.4)).unwrap();
        assert!((scorer.weights().total() - 1.0).abs() < 1e-12);

        let g = gap(&["Go"], &["Go", "Rust"], &[]);
        let result = scorer.score(&g, 4.0, 1, 2.0);
        let t = &result.trace;
        let sum = t.skills.contribution + t.experience.contribution + t.projects.contribution;
        assert!((sum - result.overall_score).abs() < 0.01);
        let weight_sum = t.skills.weight + t.experience.weight + t.projects.weight;
        assert!((weight_sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        assert!(matches!(
            ReadinessScorer::new(ScoringWeights::new(0.0, 0.0, 0.0)),
            Err(FitError::Configuration(_))
        ));
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let scorer = ReadinessScorer::default();
        let gaps = [
            gap(&[], &["A", "B", "C", "D"], &["E"]),
            gap(&["A", "B"], &["A", "B"], &[]),
            gap(&["X"], &[], &[]),
        ];
        for g in &gaps {
            for years in [0.0, 0.5, 2.0, 2.7, 3.0, 5.0, 7.5, 40.0, f64::INFINITY] {
                for portfolio in [0, 1, 3, 10] {
                    for required in [-1.0, 0.0, 2.0, 6.0] {
                        let r = scorer.score(g, years, portfolio, required);
                        for v in [
                            r.overall_score,
                            r.breakdown.skills,
                            r.breakdown.experience,
                            r.breakdown.projects,
                        ] {
                            assert!((0.0..=100.0).contains(&v), "{v} out of bounds");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_wire_shape_field_names() {
        let g = gap(&["Python"], &["Python"], &[]);
        let result = ReadinessScorer::default().score(&g, 1.0, 0, 2.0);
        let value = serde_json::to_value(result).unwrap();
        assert!(value.get("overall_score").is_some());
        assert!(value["breakdown"].get("skills").is_some());
        assert!(value["breakdown"].get("experience").is_some());
        assert!(value["breakdown"].get("projects").is_some());
        assert!(value["trace"]["skills"].get("contribution").is_some());
    }
}
