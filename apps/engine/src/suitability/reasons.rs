//! Rule-based reason generation for suitability verdicts.
//!
//! Score bands and match-percentage bands are fixed rules. Skill-specific
//! reasons come from a `ReasonCatalog`, a plain data table that callers can
//! replace or extend without touching the predictor.

use serde::{Deserialize, Serialize};

use crate::gap::GapResult;
use crate::models::skill::SkillToken;

/// Missing-skill keyword table: any listed keyword among the missing required
/// skills adds the reason once.
const DEFAULT_GAP_REASONS: &[(&[&str], &str)] = &[
    (
        &["deep learning", "tensorflow", "pytorch"],
        "Lacks deployment and advanced ML experience",
    ),
    (&["statistics"], "Missing statistical foundations"),
    (
        &["aws", "docker", "kubernetes", "azure", "gcp"],
        "Lacks cloud/deployment experience",
    ),
];

/// One keyword → reason rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordReason {
    pub keywords: Vec<String>,
    pub reason: String,
}

impl KeywordReason {
    pub fn new<I, S>(keywords: I, reason: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            reason: reason.into(),
        }
    }

    /// True when any keyword appears as a whole word sequence in `skill`, ignoring case.
    pub fn matches(&self, skill: &SkillToken) -> bool {
        self.keywords.iter().any(|kw| skill.mentions(kw))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReasonCatalog {
    rules: Vec<KeywordReason>,
}

impl Default for ReasonCatalog {
    fn default() -> Self {
        Self {
            rules: DEFAULT_GAP_REASONS
                .iter()
                .map(|(keywords, reason)| KeywordReason::new(keywords.iter().copied(), *reason))
                .collect(),
        }
    }
}

impl ReasonCatalog {
    pub fn new(rules: Vec<KeywordReason>) -> Self {
        Self { rules }
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: KeywordReason) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[KeywordReason] {
        &self.rules
    }

    /// Reasons triggered by `missing_required`, in table order, each at most once.
    pub fn reasons_for(&self, missing_required: &[SkillToken]) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|rule| missing_required.iter().any(|skill| rule.matches(skill)))
            .map(|rule| rule.reason.as_str())
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Reason rules
// ────────────────────────────────────────────────────────────────────────────

/// Why a role at or above the threshold fits.
pub fn suitability_reasons(score: f64, gap: &GapResult) -> Vec<String> {
    let mut reasons = Vec::new();

    reasons.push(match score {
        s if s >= 80.0 => format!("Excellent readiness score ({score:.1}/100)"),
        s if s >= 65.0 => format!("Good readiness score ({score:.1}/100)"),
        _ => format!("Moderate readiness score ({score:.1}/100)"),
    });

    let match_pct = gap.stats.match_percentage;
    if match_pct >= 80.0 {
        reasons.push(format!("Strong skill match ({match_pct:.1}% of role skills)"));
    } else if match_pct >= 60.0 {
        reasons.push(format!("Good skill match ({match_pct:.1}% of role skills)"));
    }

    match gap.missing_required.len() {
        0 => reasons.push("All required skills are present".to_string()),
        n @ 1..=2 => reasons.push(format!("Only {n} required skill(s) missing")),
        _ => {}
    }

    let matched = gap.stats.matched_count;
    if matched > 0 {
        reasons.push(format!("{matched} skills matched successfully"));
    }

    reasons
}

/// Why a role below the threshold does not fit. The first reason is always the score band.
pub fn unsuitability_reasons(score: f64, gap: &GapResult, catalog: &ReasonCatalog) -> Vec<String> {
    let mut reasons = Vec::new();

    if score < 35.0 {
        reasons.push(format!("Very low readiness score ({score:.1}/100)"));
    } else {
        reasons.push(format!("Below threshold readiness score ({score:.1}/100)"));
    }

    let missing = &gap.missing_required;
    if missing.len() >= 3 {
        reasons.push(format!("Missing {} critical required skills", missing.len()));
        reasons.push(format!("Critical gaps: {}", join_skills(&missing[..3])));
    } else if !missing.is_empty() {
        reasons.push(format!("Missing required skills: {}", join_skills(missing)));
    }

    let match_pct = gap.stats.match_percentage;
    if match_pct < 50.0 {
        reasons.push(format!("Low skill match ({match_pct:.1}% of role skills)"));
    }

    reasons.extend(catalog.reasons_for(missing).into_iter().map(str::to_string));

    if reasons.len() == 1 {
        reasons.push("Significant skill gaps need to be addressed".to_string());
    }

    reasons
}

fn join_skills(skills: &[SkillToken]) -> String {
    skills
        .iter()
        .map(SkillToken::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
