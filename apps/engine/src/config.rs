use std::str::FromStr;

use anyhow::{Context, Result};

use crate::gap::{SkillGapAnalyzer, DEFAULT_SIMILARITY_THRESHOLD};
use crate::pipeline::FitEngine;
use crate::readiness::{ReadinessScorer, ScoringWeights};
use crate::suitability::{SuitabilityPredictor, DEFAULT_SUITABILITY_THRESHOLD};

/// Fallback years of experience a role asks for when it does not state a minimum.
pub const DEFAULT_REQUIRED_YEARS: f64 = 2.0;

/// Engine configuration loaded from environment variables.
/// Every variable is optional; unset ones take the documented defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub similarity_threshold: f64,
    pub suitability_threshold: f64,
    pub weights: ScoringWeights,
    pub default_required_years: f64,
    pub rust_log: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            suitability_threshold: DEFAULT_SUITABILITY_THRESHOLD,
            weights: ScoringWeights::default(),
            default_required_years: DEFAULT_REQUIRED_YEARS,
            rust_log: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Self::default();
        Ok(EngineConfig {
            similarity_threshold: parse_env(
                "FIT_SIMILARITY_THRESHOLD",
                defaults.similarity_threshold,
            )?,
            suitability_threshold: parse_env(
                "FIT_SUITABILITY_THRESHOLD",
                defaults.suitability_threshold,
            )?,
            weights: ScoringWeights::new(
                parse_env("FIT_SKILL_WEIGHT", defaults.weights.skills)?,
                parse_env("FIT_EXPERIENCE_WEIGHT", defaults.weights.experience)?,
                parse_env("FIT_PROJECT_WEIGHT", defaults.weights.projects)?,
            ),
            default_required_years: parse_env(
                "FIT_DEFAULT_REQUIRED_YEARS",
                defaults.default_required_years,
            )?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    /// Validates every threshold and weight, then wires the three components together.
    pub fn build_engine(&self) -> Result<FitEngine> {
        let analyzer = SkillGapAnalyzer::new(self.similarity_threshold)
            .context("FIT_SIMILARITY_THRESHOLD is out of range")?;
        let scorer = ReadinessScorer::new(self.weights).context("Scoring weights are invalid")?;
        let predictor = SuitabilityPredictor::new(self.suitability_threshold)
            .context("FIT_SUITABILITY_THRESHOLD is out of range")?;

        if !self.default_required_years.is_finite() {
            anyhow::bail!("FIT_DEFAULT_REQUIRED_YEARS must be a finite number");
        }

        Ok(FitEngine::new(analyzer, scorer, predictor)
            .with_default_required_years(self.default_required_years))
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_build() {
        let config = EngineConfig::default();
        assert_eq!(config.similarity_threshold, 0.3);
        assert_eq!(config.suitability_threshold, 50.0);
        assert_eq!(config.default_required_years, 2.0);

        let engine = config.build_engine().unwrap();
        assert_eq!(engine.analyzer().threshold(), 0.3);
        assert_eq!(engine.predictor().threshold(), 50.0);
    }

    #[test]
    fn test_rejects_out_of_range_similarity_threshold() {
        let config = EngineConfig {
            similarity_threshold: 1.5,
            ..EngineConfig::default()
        };
        let err = config.build_engine().unwrap_err();
        assert!(err.to_string().contains("FIT_SIMILARITY_THRESHOLD"));
    }

    #[test]
    fn test_rejects_zero_weights() {
        let config = EngineConfig {
            weights: ScoringWeights::new(0.0, 0.0, 0.0),
            ..EngineConfig::default()
        };
        assert!(config.build_engine().is_err());
    }

    #[test]
    fn test_from_env_reads_fit_variables() {
        let vars = [
            ("FIT_SIMILARITY_THRESHOLD", "0.45"),
            ("FIT_SUITABILITY_THRESHOLD", " 65 "),
            ("FIT_SKILL_WEIGHT", "0.5"),
            ("FIT_EXPERIENCE_WEIGHT", "0.3"),
            ("FIT_PROJECT_WEIGHT", "0.2"),
            ("FIT_DEFAULT_REQUIRED_YEARS", "3"),
        ];
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        let config = EngineConfig::from_env().unwrap();
        assert_eq!(config.similarity_threshold, 0.45);
        assert_eq!(config.suitability_threshold, 65.0);
        assert_eq!(config.weights, ScoringWeights::new(0.5, 0.3, 0.2));
        assert_eq!(config.default_required_years, 3.0);

        let engine = config.build_engine().unwrap();
        assert_eq!(engine.analyzer().threshold(), 0.45);
        assert_eq!(engine.default_required_years(), 3.0);

        std::env::set_var("FIT_SKILL_WEIGHT", "lots");
        let err = EngineConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("FIT_SKILL_WEIGHT"));

        for (key, _) in vars {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_parse_env_default_and_error() {
        assert_eq!(
            parse_env("FIT_ENGINE_TEST_UNSET_VARIABLE", 0.42_f64).unwrap(),
            0.42
        );

        std::env::set_var("FIT_ENGINE_TEST_BAD_FLOAT", "not-a-number");
        let err = parse_env("FIT_ENGINE_TEST_BAD_FLOAT", 0.0_f64).unwrap_err();
        assert!(err.to_string().contains("FIT_ENGINE_TEST_BAD_FLOAT"));
        std::env::remove_var("FIT_ENGINE_TEST_BAD_FLOAT");
    }
}
