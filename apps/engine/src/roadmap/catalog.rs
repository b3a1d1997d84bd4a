//! Learning-resource data for roadmap generation.
//!
//! `LearningCatalog` is a plain table: curated links per skill, the search
//! platforms used when no curated entry exists, effort multipliers and
//! prerequisite rules. Callers can replace or extend any part of it without
//! touching the generator. Keyword rules match whole words, ignoring case.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::skill::SkillToken;

/// `(skill, [(platform, title, url)])`
type CuratedEntry = (&'static str, &'static [(&'static str, &'static str, &'static str)]);

const DEFAULT_CURATED: &[CuratedEntry] = &[
    (
        "tensorflow",
        &[
            (
                "Coursera",
                "TensorFlow in Practice Specialization (deeplearning.ai)",
                "https://www.coursera.org/specializations/tensorflow-in-practice",
            ),
            (
                "YouTube",
                "TensorFlow Official YouTube Channel",
                "https://www.youtube.com/@TensorFlow",
            ),
            (
                "Udemy",
                "Udemy TensorFlow courses (search)",
                "https://www.udemy.com/courses/search/?q=tensorflow",
            ),
        ],
    ),
    (
        "sql",
        &[
            (
                "Coursera",
                "SQL for Data Science (UC Davis)",
                "https://www.coursera.org/learn/sql-for-data-science",
            ),
            (
                "YouTube",
                "SQL tutorial (YouTube search)",
                "https://www.youtube.com/results?search_query=sql+tutorial",
            ),
            (
                "Udemy",
                "Udemy SQL courses (search)",
                "https://www.udemy.com/courses/search/?q=sql",
            ),
        ],
    ),
    (
        "python",
        &[
            (
                "Coursera",
                "Python for Everybody (University of Michigan)",
                "https://www.coursera.org/specializations/python",
            ),
            (
                "YouTube",
                "Python tutorial (YouTube search)",
                "https://www.youtube.com/results?search_query=python+tutorial",
            ),
            (
                "Udemy",
                "Udemy Python courses (search)",
                "https://www.udemy.com/courses/search/?q=python",
            ),
        ],
    ),
];

/// `(platform, title template, base url, query parameter)`
const DEFAULT_SEARCH_PLATFORMS: &[(&str, &str, &str, &str)] = &[
    (
        "Coursera",
        "Search '{skill}' on Coursera",
        "https://www.coursera.org/search",
        "query",
    ),
    (
        "Udemy",
        "Search '{skill}' on Udemy",
        "https://www.udemy.com/courses/search/",
        "q",
    ),
    (
        "YouTube",
        "Search '{skill}' tutorials on YouTube",
        "https://www.youtube.com/results",
        "search_query",
    ),
];

/// First matching rule wins.
const DEFAULT_EFFORT_RULES: &[(&[&str], u32)] = &[
    (
        &[
            "deep learning",
            "neural network",
            "neural networks",
            "transformer",
            "transformers",
        ],
        3,
    ),
    (&["machine learning", "data science", "nlp"], 2),
    (&["cloud", "aws", "azure", "gcp"], 2),
];

/// Every matching rule contributes.
const DEFAULT_PREREQUISITE_RULES: &[(&[&str], &[&str])] = &[
    (
        &["machine learning", "deep learning", "tensorflow", "pytorch"],
        &["Python", "Mathematics/Statistics"],
    ),
    (
        &["deep learning", "neural network", "neural networks"],
        &["Machine Learning", "Linear Algebra"],
    ),
    (
        &["data science", "data analysis"],
        &["Python", "SQL", "Statistics"],
    ),
    (
        &["aws", "azure", "gcp", "cloud"],
        &["Linux/Command Line", "Networking Basics"],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub platform: String,
    pub title: String,
    pub url: String,
}

impl ResourceLink {
    pub fn new(
        platform: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            title: title.into(),
            url: url.into(),
        }
    }
}

/// A platform searched by skill name. `{skill}` in `title` is replaced by the skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPlatform {
    pub platform: String,
    pub title: String,
    pub base_url: String,
    pub query_param: String,
}

impl SearchPlatform {
    /// `None` when `base_url` does not parse.
    pub fn link_for(&self, skill: &str) -> Option<ResourceLink> {
        let url = Url::parse_with_params(&self.base_url, &[(self.query_param.as_str(), skill)])
            .ok()?;
        Some(ResourceLink {
            platform: self.platform.clone(),
            title: self.title.replace("{skill}", skill),
            url: url.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffortRule {
    pub keywords: Vec<String>,
    pub multiplier: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrerequisiteRule {
    pub keywords: Vec<String>,
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningCatalog {
    #[serde(default)]
    pub curated: BTreeMap<String, Vec<ResourceLink>>,
    #[serde(default)]
    pub search_platforms: Vec<SearchPlatform>,
    #[serde(default)]
    pub effort_rules: Vec<EffortRule>,
    #[serde(default)]
    pub prerequisite_rules: Vec<PrerequisiteRule>,
}

impl Default for LearningCatalog {
    fn default() -> Self {
        Self {
            curated: DEFAULT_CURATED
                .iter()
                .map(|(skill, links)| {
                    let links = links
                        .iter()
                        .map(|(platform, title, url)| ResourceLink::new(*platform, *title, *url))
                        .collect();
                    (skill.to_string(), links)
                })
                .collect(),
            search_platforms: DEFAULT_SEARCH_PLATFORMS
                .iter()
                .map(|(platform, title, base_url, query_param)| SearchPlatform {
                    platform: platform.to_string(),
                    title: title.to_string(),
                    base_url: base_url.to_string(),
                    query_param: query_param.to_string(),
                })
                .collect(),
            effort_rules: DEFAULT_EFFORT_RULES
                .iter()
                .map(|(keywords, multiplier)| EffortRule {
                    keywords: to_strings(keywords),
                    multiplier: *multiplier,
                })
                .collect(),
            prerequisite_rules: DEFAULT_PREREQUISITE_RULES
                .iter()
                .map(|(keywords, prerequisites)| PrerequisiteRule {
                    keywords: to_strings(keywords),
                    prerequisites: to_strings(prerequisites),
                })
                .collect(),
        }
    }
}

impl LearningCatalog {
    pub fn empty() -> Self {
        Self {
            curated: BTreeMap::new(),
            search_platforms: Vec::new(),
            effort_rules: Vec::new(),
            prerequisite_rules: Vec::new(),
        }
    }

    /// Adds or replaces the curated links for `skill`. The key is stored lowercase.
    pub fn with_curated(mut self, skill: &str, links: Vec<ResourceLink>) -> Self {
        self.curated.insert(skill.trim().to_lowercase(), links);
        self
    }

    pub fn with_search_platform(mut self, platform: SearchPlatform) -> Self {
        self.search_platforms.push(platform);
        self
    }

    pub fn with_effort_rule(mut self, rule: EffortRule) -> Self {
        self.effort_rules.push(rule);
        self
    }

    pub fn with_prerequisite_rule(mut self, rule: PrerequisiteRule) -> Self {
        self.prerequisite_rules.push(rule);
        self
    }

    /// Curated links when the skill has an entry (case-insensitive),
    /// otherwise one search link per platform.
    pub fn resources_for(&self, skill: &SkillToken) -> Vec<ResourceLink> {
        let key = skill.as_str().to_lowercase();
        let curated = self
            .curated
            .iter()
            .find(|(name, _)| name.trim().to_lowercase() == key);
        if let Some((_, links)) = curated {
            return links.clone();
        }
        self.search_platforms
            .iter()
            .filter_map(|platform| platform.link_for(skill.as_str()))
            .collect()
    }

    /// Multiplier of the first matching effort rule, 1 when none match.
    pub fn effort_multiplier(&self, skill: &SkillToken) -> u32 {
        self.effort_rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| skill.mentions(kw)))
            .map_or(1, |rule| rule.multiplier)
    }

    /// Prerequisites from every matching rule, first occurrence order, without
    /// duplicates and without the skill itself.
    pub fn prerequisites_for(&self, skill: &SkillToken) -> Vec<String> {
        let mut prerequisites: Vec<String> = Vec::new();
        for rule in &self.prerequisite_rules {
            if !rule.keywords.iter().any(|kw| skill.mentions(kw)) {
                continue;
            }
            for prerequisite in &rule.prerequisites {
                let is_self = prerequisite.eq_ignore_ascii_case(skill.as_str());
                let seen = prerequisites
                    .iter()
                    .any(|p| p.eq_ignore_ascii_case(prerequisite));
                if !is_self && !seen {
                    prerequisites.push(prerequisite.clone());
                }
            }
        }
        prerequisites
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
