//! Learning roadmap: turns the missing skills of a gap result into an ordered
//! list of learning steps with effort estimates, prerequisites and resources.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::FitError;
use crate::gap::GapResult;
use crate::models::skill::SkillToken;
use crate::roadmap::catalog::{LearningCatalog, ResourceLink};

pub const DEFAULT_REQUIRED_DAYS: u32 = 14;
pub const DEFAULT_PREFERRED_DAYS: u32 = 7;

/// Timeline entries list at most this many resources.
const TIMELINE_RESOURCE_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapCategory {
    Required,
    Preferred,
}

/// One step of a roadmap. `priority` starts at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    pub skill: SkillToken,
    pub category: GapCategory,
    pub priority: usize,
    pub estimated_days: u32,
    pub resources: Vec<ResourceLink>,
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub skill: SkillToken,
    pub priority: usize,
    pub days: u32,
    pub resources: Vec<ResourceLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadmapTimeline {
    pub total_days: u32,
    pub weeks: f64,
    pub months: f64,
    pub items: Vec<TimelineItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapGenerator {
    catalog: LearningCatalog,
    required_days: u32,
    preferred_days: u32,
}

impl Default for RoadmapGenerator {
    fn default() -> Self {
        Self {
            catalog: LearningCatalog::default(),
            required_days: DEFAULT_REQUIRED_DAYS,
            preferred_days: DEFAULT_PREFERRED_DAYS,
        }
    }
}

impl RoadmapGenerator {
    /// Base days per missing skill before the effort multiplier. Both must be positive.
    pub fn new(required_days: u32, preferred_days: u32) -> Result<Self, FitError> {
        if required_days == 0 || preferred_days == 0 {
            return Err(FitError::Configuration(format!(
                "roadmap base days must be positive, got required={required_days} preferred={preferred_days}"
            )));
        }
        Ok(Self {
            required_days,
            preferred_days,
            ..Self::default()
        })
    }

    pub fn with_catalog(mut self, catalog: LearningCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &LearningCatalog {
        &self.catalog
    }

    /// Builds the roadmap for every missing skill of `gap`.
    ///
    /// Required gaps come first, then preferred, each in role order. A skill
    /// listed more than once (ignoring case) appears once, at its first
    /// position. Blank skills are skipped.
    pub fn generate(&self, gap: &GapResult) -> Vec<LearningPath> {
        let ordered = gap
            .missing_required
            .iter()
            .map(|skill| (skill, GapCategory::Required))
            .chain(
                gap.missing_preferred
                    .iter()
                    .map(|skill| (skill, GapCategory::Preferred)),
            );

        let mut seen = HashSet::new();
        let mut paths = Vec::new();
        for (skill, category) in ordered {
            if skill.is_blank() || !seen.insert(skill.as_str().to_lowercase()) {
                continue;
            }
            paths.push(LearningPath {
                skill: skill.clone(),
                category,
                priority: paths.len() + 1,
                estimated_days: self.estimate_days(skill, category),
                resources: self.catalog.resources_for(skill),
                prerequisites: self.catalog.prerequisites_for(skill),
            });
        }
        paths
    }

    /// Base days for the category times the catalog's effort multiplier.
    pub fn estimate_days(&self, skill: &SkillToken, category: GapCategory) -> u32 {
        let base = match category {
            GapCategory::Required => self.required_days,
            GapCategory::Preferred => self.preferred_days,
        };
        base.saturating_mul(self.catalog.effort_multiplier(skill))
    }

    /// Summarises a roadmap. `total_days` defaults to the sum of the estimates.
    pub fn timeline(&self, paths: &[LearningPath], total_days: Option<u32>) -> RoadmapTimeline {
        let total_days = total_days.unwrap_or_else(|| {
            paths
                .iter()
                .fold(0u32, |sum, p| sum.saturating_add(p.estimated_days))
        });

        RoadmapTimeline {
            total_days,
            weeks: round1(f64::from(total_days) / 7.0),
            months: round1(f64::from(total_days) / 30.0),
            items: paths
                .iter()
                .map(|p| TimelineItem {
                    skill: p.skill.clone(),
                    priority: p.priority,
                    days: p.estimated_days,
                    resources: p
                        .resources
                        .iter()
                        .take(TIMELINE_RESOURCE_LIMIT)
                        .cloned()
                        .collect(),
                })
                .collect(),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
