//! Catalog evaluation: runs the gap analyzer, readiness scorer and suitability
//! predictor over every role in a catalog for one candidate profile, and
//! attaches a learning roadmap to each role.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::DEFAULT_REQUIRED_YEARS;
use crate::gap::{GapResult, SkillGapAnalyzer};
use crate::models::{CandidateProfile, RoleCatalog, RoleDefinition};
use crate::readiness::{ReadinessScore, ReadinessScorer};
use crate::roadmap::{LearningPath, RoadmapGenerator};
use crate::suitability::{RoleReadiness, SuitabilityPredictor, SuitabilityReport};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleEvaluation {
    pub role_name: String,
    pub gap: GapResult,
    pub readiness: ReadinessScore,
    pub roadmap: Vec<LearningPath>,
}

/// Per-role evaluations in catalog order, plus the ranked suitability report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEvaluation {
    pub evaluations: Vec<RoleEvaluation>,
    pub suitability: SuitabilityReport,
}

#[derive(Debug, Clone)]
pub struct FitEngine {
    analyzer: SkillGapAnalyzer,
    scorer: ReadinessScorer,
    predictor: SuitabilityPredictor,
    roadmap: RoadmapGenerator,
    default_required_years: f64,
}

impl Default for FitEngine {
    fn default() -> Self {
        Self::new(
            SkillGapAnalyzer::default(),
            ReadinessScorer::default(),
            SuitabilityPredictor::default(),
        )
    }
}

impl FitEngine {
    pub fn new(
        analyzer: SkillGapAnalyzer,
        scorer: ReadinessScorer,
        predictor: SuitabilityPredictor,
    ) -> Self {
        Self {
            analyzer,
            scorer,
            predictor,
            roadmap: RoadmapGenerator::default(),
            default_required_years: DEFAULT_REQUIRED_YEARS,
        }
    }

    pub fn with_roadmap_generator(mut self, roadmap: RoadmapGenerator) -> Self {
        self.roadmap = roadmap;
        self
    }

    pub fn with_default_required_years(mut self, years: f64) -> Self {
        self.default_required_years = years;
        self
    }

    pub fn analyzer(&self) -> &SkillGapAnalyzer {
        &self.analyzer
    }

    pub fn scorer(&self) -> &ReadinessScorer {
        &self.scorer
    }

    pub fn predictor(&self) -> &SuitabilityPredictor {
        &self.predictor
    }

    pub fn roadmap_generator(&self) -> &RoadmapGenerator {
        &self.roadmap
    }

    pub fn default_required_years(&self) -> f64 {
        self.default_required_years
    }

    pub fn evaluate_role(&self, profile: &CandidateProfile, role: &RoleDefinition) -> RoleEvaluation {
        let gap = self.analyzer.analyze_spec(&profile.skills, &role.skill_spec());
        let required_years = role
            .min_years_experience
            .unwrap_or(self.default_required_years);
        let readiness = self.scorer.score(
            &gap,
            profile.experience_years,
            profile.portfolio_count,
            required_years,
        );

        debug!(
            role = %role.name,
            matched = gap.stats.matched_count,
            missing_required = gap.missing_required.len(),
            score = readiness.overall_score,
            "Evaluated role"
        );

        let roadmap = self.roadmap.generate(&gap);

        RoleEvaluation {
            role_name: role.name.clone(),
            gap,
            readiness,
            roadmap,
        }
    }

    /// Evaluates every role in catalog order and ranks them. Equal scores keep catalog order.
    pub fn evaluate_catalog(
        &self,
        profile: &CandidateProfile,
        catalog: &RoleCatalog,
    ) -> CatalogEvaluation {
        let evaluations: Vec<RoleEvaluation> = catalog
            .iter()
            .map(|role| self.evaluate_role(profile, role))
            .collect();

        let readiness_by_role: Vec<RoleReadiness> = catalog
            .iter()
            .zip(&evaluations)
            .map(|(role, eval)| RoleReadiness {
                role_name: eval.role_name.clone(),
                readiness_score: eval.readiness.overall_score,
                description: role.description.clone(),
            })
            .collect();

        let gaps_by_role: HashMap<String, GapResult> = evaluations
            .iter()
            .map(|eval| (eval.role_name.clone(), eval.gap.clone()))
            .collect();

        let suitability = self.predictor.predict(&readiness_by_role, &gaps_by_role);

        info!(
            "Evaluated {} roles: {} best fit, {} not suitable",
            evaluations.len(),
            suitability.best_fit.len(),
            suitability.not_suitable.len()
        );

        CatalogEvaluation {
            evaluations,
            suitability,
        }
    }
}
