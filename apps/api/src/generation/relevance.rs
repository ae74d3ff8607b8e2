//! Relevance Scorer: rates each experience and project entry against the parsed job.
//!
//! score = 2 × keyword matches + 3 × technical-term matches + 4 × role fit,
//! where role fit is the fraction of the role's keywords present, scaled to 0–10.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generation::jd_parser::{count_keyword_hits, ParsedJD, RoleCategory};
use crate::models::resume::ParsedResume;

const KEYWORD_WEIGHT: f64 = 2.0;
const TECH_WEIGHT: f64 = 3.0;
const ROLE_FIT_WEIGHT: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevanceScore {
    /// Index into the resume's experience or project list.
    pub entry_index: usize,
    pub score: f64,
    pub keyword_matches: usize,
    pub tech_matches: usize,
    pub role_type_fit: f64,
}

/// Per-section relevance, each list sorted by score descending (ties keep entry order).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionRelevance {
    pub experience: Vec<RelevanceScore>,
    pub projects: Vec<RelevanceScore>,
}

impl SectionRelevance {
    pub fn experience_score(&self, index: usize) -> Option<f64> {
        lookup(&self.experience, index)
    }

    pub fn project_score(&self, index: usize) -> Option<f64> {
        lookup(&self.projects, index)
    }
}

fn lookup(scores: &[RelevanceScore], index: usize) -> Option<f64> {
    scores
        .iter()
        .find(|s| s.entry_index == index)
        .map(|s| s.score)
}

pub fn evaluate_relevance(resume: &ParsedResume, job: &ParsedJD) -> SectionRelevance {
    let experience = rank(
        resume
            .experience
            .iter()
            .enumerate()
            .map(|(i, e)| score_blob(i, &e.text_blob(), job))
            .collect(),
    );
    let projects = rank(
        resume
            .projects
            .iter()
            .enumerate()
            .map(|(i, p)| score_blob(i, &p.text_blob(), job))
            .collect(),
    );

    debug!(
        "Relevance: {} experience, {} projects scored for role {}",
        experience.len(),
        projects.len(),
        job.role
    );

    SectionRelevance {
        experience,
        projects,
    }
}

/// Scores one lower-cased entry blob.
pub fn score_blob(entry_index: usize, blob: &str, job: &ParsedJD) -> RelevanceScore {
    let keyword_matches = job
        .keywords
        .iter()
        .filter(|kw| blob.contains(kw.as_str()))
        .count();
    let tech_matches = job
        .technical_terms
        .iter()
        .filter(|term| blob.contains(term.as_str()))
        .count();
    let role_type_fit = role_fit(blob, job.role);

    let score = KEYWORD_WEIGHT * keyword_matches as f64
        + TECH_WEIGHT * tech_matches as f64
        + ROLE_FIT_WEIGHT * role_type_fit;

    RelevanceScore {
        entry_index,
        score,
        keyword_matches,
        tech_matches,
        role_type_fit,
    }
}

/// Fraction of the role's keywords found in `blob`, scaled to 0–10. Always 0 for `General`.
pub fn role_fit(blob: &str, role: RoleCategory) -> f64 {
    let keywords = role.keywords();
    if keywords.is_empty() {
        return 0.0;
    }
    count_keyword_hits(blob, keywords) as f64 / keywords.len() as f64 * 10.0
}

fn rank(mut scores: Vec<RelevanceScore>) -> Vec<RelevanceScore> {
    // Stable sort keeps entry order among equal scores.
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores
}
