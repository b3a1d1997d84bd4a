// Role suitability: ranking, verdicts, and rule-based reasons.
// Pure computation: no logging, no I/O.

pub mod predictor;
pub mod reasons;

pub use predictor::{
    RoleReadiness, Suitability, SuitabilityPredictor, SuitabilityReport, SuitabilityVerdict,
    DEFAULT_SUITABILITY_THRESHOLD,
};
pub use reasons::{KeywordReason, ReasonCatalog};
