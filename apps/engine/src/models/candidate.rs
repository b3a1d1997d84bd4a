use serde::{Deserialize, Deserializer, Serialize};

use crate::models::skill::SkillSet;

/// What the ingestion layer hands the engine about a candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub skills: SkillSet,
    #[serde(default)]
    pub experience_years: f64,
    /// Number of portfolio items. A list of project names is also accepted; its length is used.
    #[serde(default, alias = "projects", deserialize_with = "count_or_list")]
    pub portfolio_count: usize,
}

impl CandidateProfile {
    pub fn new(skills: SkillSet, experience_years: f64, portfolio_count: usize) -> Self {
        Self {
            skills,
            experience_years,
            portfolio_count,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Portfolio {
    Count(usize),
    Items(Vec<serde_json::Value>),
}

fn count_or_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    Ok(match Portfolio::deserialize(deserializer)? {
        Portfolio::Count(n) => n,
        Portfolio::Items(items) => items.len(),
    })
}
