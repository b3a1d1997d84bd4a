// Skill-gap analysis: TF-IDF vectorisation, similarity matching, gap explanations.
// Pure computation: no logging, no I/O.

pub mod analyzer;
pub mod explain;
pub mod matching;
pub mod vectorizer;

pub use analyzer::{
    GapResult, GapStats, MatchedPair, SkillGapAnalyzer, DEFAULT_SIMILARITY_THRESHOLD,
};
pub use explain::{methodology, GapExplanation};
pub use matching::{Assignment, GreedyMatcher, MatchStrategy, SimilarityMatrix};
