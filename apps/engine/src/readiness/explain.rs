use serde::{Deserialize, Serialize};

use crate::gap::GapResult;
use crate::readiness::scorer::ScoreBreakdown;
use crate::readiness::weights::ScoringWeights;

/// Components scoring below this get an improvement note.
const IMPROVEMENT_CUTOFF: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessBand {
    Excellent,
    Good,
    Moderate,
    NeedsImprovement,
    Poor,
}

impl ReadinessBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => ReadinessBand::Excellent,
            s if s >= 65.0 => ReadinessBand::Good,
            s if s >= 50.0 => ReadinessBand::Moderate,
            s if s >= 35.0 => ReadinessBand::NeedsImprovement,
            _ => ReadinessBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadinessBand::Excellent => "Excellent readiness",
            ReadinessBand::Good => "Good readiness",
            ReadinessBand::Moderate => "Moderate readiness",
            ReadinessBand::NeedsImprovement => "Needs improvement",
            ReadinessBand::Poor => "Poor readiness",
        }
    }
}

/// Multi-line human-readable report of a readiness score.
pub(crate) fn explanation_report(
    overall: f64,
    band: ReadinessBand,
    breakdown: &ScoreBreakdown,
    weights: &ScoringWeights,
    gap: &GapResult,
    experience_years: f64,
    portfolio_count: usize,
) -> String {
    let ScoreBreakdown {
        skills,
        experience,
        projects,
    } = *breakdown;
    let missing_required = gap.missing_required.len();

    let mut lines = vec![
        format!("JOB READINESS SCORE: {overall:.1}/100 ({})", band.label()),
        String::new(),
        "SCORE BREAKDOWN:".to_string(),
        format!(
            "1. SKILLS ({skills:.1}/100) - Weight: {:.0}%, Contribution: {:.1} points",
            weights.skills * 100.0,
            skills * weights.skills
        ),
        format!(
            "   - {} skills matched, {missing_required} required missing, {} preferred missing",
            gap.stats.matched_count,
            gap.missing_preferred.len()
        ),
        format!(
            "2. EXPERIENCE ({experience:.1}/100) - Weight: {:.0}%, Contribution: {:.1} points",
            weights.experience * 100.0,
            experience * weights.experience
        ),
        format!("   - {experience_years:.1} years of experience"),
        format!(
            "3. PROJECTS ({projects:.1}/100) - Weight: {:.0}%, Contribution: {:.1} points",
            weights.projects * 100.0,
            projects * weights.projects
        ),
        format!("   - {portfolio_count} portfolio items"),
        String::new(),
        "IMPROVEMENT AREAS:".to_string(),
    ];

    let mut improvements = Vec::new();
    if skills < IMPROVEMENT_CUTOFF && missing_required > 0 {
        improvements.push(format!(
            "- Focus on learning {missing_required} missing required skills"
        ));
    }
    if experience < IMPROVEMENT_CUTOFF {
        improvements.push(format!(
            "- Gain more experience (currently {experience_years:.1} years)"
        ));
    }
    if projects < IMPROVEMENT_CUTOFF {
        improvements.push(format!(
            "- Add more projects to showcase skills (currently {portfolio_count})"
        ));
    }
    if improvements.is_empty() {
        improvements.push("- All components are strong. Keep building experience.".to_string());
    }
    lines.extend(improvements);

    lines.join("\n")
}

/// Describes the scoring formulas with the effective weights filled in.
pub fn methodology(weights: &ScoringWeights) -> String {
    format!(
        "JOB READINESS SCORING METHODOLOGY\n\
         \n\
         1. SKILLS ({:.0}% weight)\n\
         \x20  - Base: matched role skills / total role skills x 100 (100 when the role lists none)\n\
         \x20  - Penalty: 10 points per missing required skill, at most 30\n\
         \n\
         2. EXPERIENCE ({:.0}% weight)\n\
         \x20  - 0 years: 0 points\n\
         \x20  - Below the role minimum: linear, up to 50 points\n\
         \x20  - Exactly the minimum: 75 points\n\
         \x20  - Between the minimum and 3 years: linear from 75 to 100\n\
         \x20  - 3 to 5 years: 100 points\n\
         \x20  - Beyond 5 years: 2 points off per extra year, never below 90\n\
         \n\
         3. PROJECTS ({:.0}% weight)\n\
         \x20  - 0 / 1 / 2 / 3 / 4+ portfolio items: 0 / 30 / 60 / 85 / 100 points\n\
         \n\
         OVERALL = skills x {:.2} + experience x {:.2} + projects x {:.2},\n\
         rounded to 2 decimals and clamped to [0, 100].",
        weights.skills * 100.0,
        weights.experience * 100.0,
        weights.projects * 100.0,
        weights.skills,
        weights.experience,
        weights.projects,
    )
}
