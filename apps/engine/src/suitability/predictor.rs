//! Role-suitability predictor: ranks roles by readiness and explains each verdict.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{validate_range, FitError};
use crate::gap::GapResult;
use crate::suitability::reasons::{suitability_reasons, unsuitability_reasons, ReasonCatalog};

pub const DEFAULT_SUITABILITY_THRESHOLD: f64 = 50.0;

/// Up to this many best-fit roles after the first are named as alternatives.
const RUNNER_UP_LIMIT: usize = 2;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One role's readiness score, as input to `predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleReadiness {
    pub role_name: String,
    pub readiness_score: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl RoleReadiness {
    pub fn new(role_name: impl Into<String>, readiness_score: f64) -> Self {
        Self {
            role_name: role_name.into(),
            readiness_score,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suitability {
    BestFit,
    NotSuitable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityVerdict {
    pub role_name: String,
    pub verdict: Suitability,
    pub readiness_score: f64,
    pub reasons: Vec<String>,
    pub description: Option<String>,
}

/// Full prediction returned to callers. Both lists are ordered by score, highest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityReport {
    pub best_fit: Vec<SuitabilityVerdict>,
    pub not_suitable: Vec<SuitabilityVerdict>,
    pub recommendations: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Predictor
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SuitabilityPredictor {
    threshold: f64,
    reasons: ReasonCatalog,
}

impl Default for SuitabilityPredictor {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SUITABILITY_THRESHOLD,
            reasons: ReasonCatalog::default(),
        }
    }
}

impl SuitabilityPredictor {
    /// Fails with `FitError::Configuration` unless `threshold` lies in [0, 100].
    pub fn new(threshold: f64) -> Result<Self, FitError> {
        let threshold = validate_range("suitability threshold", threshold, 0.0, 100.0)?;
        Ok(Self {
            threshold,
            ..Self::default()
        })
    }

    pub fn with_reason_catalog(mut self, reasons: ReasonCatalog) -> Self {
        self.reasons = reasons;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn reason_catalog(&self) -> &ReasonCatalog {
        &self.reasons
    }

    /// Classifies every role as best fit (score ≥ threshold) or not suitable.
    ///
    /// Roles are ranked by score descending; equal scores keep their input
    /// order. A non-finite score counts as 0. A role with no entry in
    /// `gaps_by_role` is treated as an empty gap.
    pub fn predict(
        &self,
        readiness_by_role: &[RoleReadiness],
        gaps_by_role: &HashMap<String, GapResult>,
    ) -> SuitabilityReport {
        if readiness_by_role.is_empty() {
            return SuitabilityReport {
                recommendations: vec![
                    "No roles meet the suitability threshold: no roles were evaluated".to_string(),
                ],
                ..SuitabilityReport::default()
            };
        }

        let mut ranked: Vec<(f64, &RoleReadiness)> = readiness_by_role
            .iter()
            .map(|role| (finite_or_zero(role.readiness_score), role))
            .collect();
        // Vec::sort_by is stable
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

        let empty_gap = GapResult::default();
        let mut best_fit = Vec::new();
        let mut not_suitable = Vec::new();

        for (score, role) in ranked {
            let gap = gaps_by_role.get(&role.role_name).unwrap_or(&empty_gap);

            let (verdict, reasons) = if score >= self.threshold {
                (Suitability::BestFit, suitability_reasons(score, gap))
            } else {
                (
                    Suitability::NotSuitable,
                    unsuitability_reasons(score, gap, &self.reasons),
                )
            };

            let entry = SuitabilityVerdict {
                role_name: role.role_name.clone(),
                verdict,
                readiness_score: score,
                reasons,
                description: role.description.clone(),
            };

            match verdict {
                Suitability::BestFit => best_fit.push(entry),
                Suitability::NotSuitable => not_suitable.push(entry),
            }
        }

        let recommendations = build_recommendations(&best_fit, &not_suitable);

        SuitabilityReport {
            best_fit,
            not_suitable,
            recommendations,
        }
    }
}

fn finite_or_zero(score: f64) -> f64 {
    if score.is_finite() {
        score
    } else {
        0.0
    }
}

/// Summarises the top best-fit role, its runner-ups, and the top rejected role.
fn build_recommendations(
    best_fit: &[SuitabilityVerdict],
    not_suitable: &[SuitabilityVerdict],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if let Some((top, rest)) = best_fit.split_first() {
        recommendations.push(format!(
            "Best match: {} (Readiness: {:.1}/100)",
            top.role_name, top.readiness_score
        ));
        if !rest.is_empty() {
            let names: Vec<&str> = rest
                .iter()
                .take(RUNNER_UP_LIMIT)
                .map(|v| v.role_name.as_str())
                .collect();
            recommendations.push(format!("Also consider: {}", names.join(", ")));
        }
    } else {
        recommendations.push("No roles meet the suitability threshold".to_string());
        recommendations
            .push("Focus on building core skills before targeting specific roles".to_string());
    }

    if let Some(top) = not_suitable.first() {
        let primary = top.reasons.first().map(String::as_str).unwrap_or("");
        recommendations.push(format!("Not recommended: {} - {primary}", top.role_name));
    }

    recommendations
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
