// Readiness scoring: component formulas, weights, and the audit trace.
// Pure computation: no logging, no I/O.

pub mod explain;
pub mod scorer;
pub mod weights;

pub use explain::{methodology, ReadinessBand};
pub use scorer::{
    experience_score, project_score, skill_score, ComponentTrace, OverallTrace, ReadinessScore,
    ReadinessScorer, ScoreBreakdown, ScoreTrace,
};
pub use weights::ScoringWeights;
