//! Candidate–role fit engine.
//!
//! Three stages, each usable on its own:
//! - [`gap`] aligns a candidate's skills with a role's skills by TF-IDF similarity
//! - [`readiness`] turns a gap result plus experience and portfolio into a 0–100 score
//! - [`suitability`] ranks roles by readiness and explains each verdict
//!
//! [`roadmap`] turns the missing skills of a gap result into a learning plan.
//!
//! [`pipeline::FitEngine`] runs all of them over a [`models::RoleCatalog`].

pub mod config;
pub mod errors;
pub mod gap;
pub mod models;
pub mod pipeline;
pub mod readiness;
pub mod roadmap;
pub mod suitability;
pub mod telemetry;

pub use config::EngineConfig;
pub use errors::FitError;
pub use gap::{GapResult, SkillGapAnalyzer};
pub use models::{CandidateProfile, RoleCatalog, RoleDefinition, RoleSkillSpec, SkillSet, SkillToken};
pub use pipeline::{CatalogEvaluation, FitEngine, RoleEvaluation};
pub use readiness::{ReadinessScore, ReadinessScorer, ScoringWeights};
pub use roadmap::{LearningCatalog, LearningPath, RoadmapGenerator};
pub use suitability::{SuitabilityPredictor, SuitabilityReport, SuitabilityVerdict};
