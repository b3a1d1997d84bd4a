use serde::{Deserialize, Serialize};

use crate::errors::FitError;

/// Relative weight of each readiness component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub experience: f64,
    pub projects: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.60,
            experience: 0.25,
            projects: 0.15,
        }
    }
}

impl ScoringWeights {
    pub fn new(skills: f64, experience: f64, projects: f64) -> Self {
        Self {
            skills,
            experience,
            projects,
        }
    }

    pub fn total(&self) -> f64 {
        self.skills + self.experience + self.projects
    }

    /// Rescales the weights to sum to 1.
    /// Negative, non-finite, or all-zero weights are a configuration error.
    pub fn normalized(&self) -> Result<Self, FitError> {
        for (name, w) in [
            ("skills", self.skills),
            ("experience", self.experience),
            ("projects", self.projects),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(FitError::Configuration(format!(
                    "{name} weight must be a non-negative number, got {w}"
                )));
            }
        }
        let total = self.total();
        if total <= 0.0 {
            return Err(FitError::Configuration(
                "scoring weights must not all be zero".to_string(),
            ));
        }
        Ok(Self {
            skills: self.skills / total,
            experience: self.experience / total,
            projects: self.projects / total,
        })
    }

    /// Weighted sum of the three component scores.
    pub fn combine(&self, skills: f64, experience: f64, projects: f64) -> f64 {
        self.skills * skills + self.experience * experience + self.projects * projects
    }
}
