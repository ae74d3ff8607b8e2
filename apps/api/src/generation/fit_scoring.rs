//! ATS Scoring: pluggable, trait-based scorers that measure keyword overlap between a
//! resume and a job description.
//!
//! Default: `ExactKeywordScorer` (stemmed keywords compared verbatim).
//! Alternative: `FuzzySubstringScorer` (surface keywords matched by substring or stem,
//! score clamped to 30–90).
//!
//! `AppState` carries the configured default as a `ScoreStrategy`; requests may override it.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_textual, PipelineError};
use crate::generation::keywords::{extract_keywords, extract_surface_keywords, stem, tokenize};

// ────────────────────────────────────────────────────────────────────────────
// Output data models (shared across all scorer backends)
// ────────────────────────────────────────────────────────────────────────────

const MATCHING_LIMIT: usize = 15;
const MISSING_LIMIT: usize = 10;
const MATCHING_PREVIEW: usize = 5;
const WELL_OPTIMIZED_ABOVE: u32 = 80;
const FUZZY_FLOOR: u32 = 30;
const FUZZY_CEILING: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    fn positive(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Positive,
            message: message.into(),
        }
    }

    fn negative(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Negative,
            message: message.into(),
        }
    }
}

/// Full compatibility report returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    pub score: u32,                     // 0 – 100
    pub feedback: Vec<Feedback>,
    pub matching_keywords: Vec<String>, // at most 15
    pub missing_keywords: Vec<String>,  // at most 10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatch {
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The ATS scorer trait. Implement this to swap scoring backends without touching
/// the handlers or the optimization pipeline.
pub trait AtsScorer: Send + Sync {
    /// Backend label, reported in logs.
    fn name(&self) -> &'static str;

    fn score(&self, resume_text: &str, job_description: &str) -> Result<AtsReport, PipelineError>;
}

/// Named scoring backends, selectable per request or via `SCORE_STRATEGY`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreStrategy {
    #[default]
    Exact,
    Fuzzy,
}

impl ScoreStrategy {
    pub fn scorer(self) -> &'static dyn AtsScorer {
        match self {
            ScoreStrategy::Exact => &ExactKeywordScorer,
            ScoreStrategy::Fuzzy => &FuzzySubstringScorer,
        }
    }
}

impl FromStr for ScoreStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(ScoreStrategy::Exact),
            "fuzzy" => Ok(ScoreStrategy::Fuzzy),
            other => Err(format!("unknown score strategy '{other}' (expected exact|fuzzy)")),
        }
    }
}

impl fmt::Display for ScoreStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scorer().name())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ExactKeywordScorer: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// score = round(job keywords found among the resume's keywords / job keywords × 100).
pub struct ExactKeywordScorer;

impl AtsScorer for ExactKeywordScorer {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn score(&self, resume_text: &str, job_description: &str) -> Result<AtsReport, PipelineError> {
        let resume_keywords = extract_keywords(resume_text)?;
        let job_keywords = extract_keywords(job_description)?;
        let job_set: HashSet<&str> = job_keywords.iter().map(String::as_str).collect();
        let resume_set: HashSet<&str> = resume_keywords.iter().map(String::as_str).collect();

        let matching: Vec<String> = resume_keywords
            .iter()
            .filter(|kw| job_set.contains(kw.as_str()))
            .cloned()
            .collect();
        let missing: Vec<String> = job_keywords
            .iter()
            .filter(|kw| !resume_set.contains(kw.as_str()))
            .cloned()
            .collect();

        let score = percentage(matching.len(), job_keywords.len());
        Ok(build_report(score, matching, missing, resume_text))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FuzzySubstringScorer
// ────────────────────────────────────────────────────────────────────────────

/// Surface job keywords count as matched when they occur anywhere in the lower-cased
/// resume text or share a stem with a resume word. The score never leaves 30–90.
pub struct FuzzySubstringScorer;

impl AtsScorer for FuzzySubstringScorer {
    fn name(&self) -> &'static str {
        "fuzzy"
    }

    fn score(&self, resume_text: &str, job_description: &str) -> Result<AtsReport, PipelineError> {
        let job_keywords = extract_surface_keywords(job_description)?;
        ensure_textual("keyword extraction", resume_text)?;

        let lower = resume_text.to_lowercase();
        let resume_stems: HashSet<String> = tokenize(&lower).iter().map(|t| stem(t)).collect();

        let (matching, missing): (Vec<String>, Vec<String>) = job_keywords
            .into_iter()
            .partition(|kw| lower.contains(kw.as_str()) || resume_stems.contains(&stem(kw)));

        let raw = percentage(matching.len(), matching.len() + missing.len());
        let score = raw.clamp(FUZZY_FLOOR, FUZZY_CEILING);
        Ok(build_report(score, matching, missing, resume_text))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

/// Rounded percentage; 0 when `total` is 0.
fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

fn build_report(
    score: u32,
    mut matching: Vec<String>,
    mut missing: Vec<String>,
    resume_text: &str,
) -> AtsReport {
    missing.truncate(MISSING_LIMIT);

    let mut feedback = Vec::new();
    if score > WELL_OPTIMIZED_ABOVE {
        feedback.push(Feedback::positive("Your resume is well-optimized for this job."));
    } else {
        feedback.push(Feedback::negative("Your resume needs optimization for this job."));
    }

    if !matching.is_empty() {
        let preview: Vec<&str> = matching
            .iter()
            .take(MATCHING_PREVIEW)
            .map(String::as_str)
            .collect();
        feedback.push(Feedback::positive(format!(
            "Found {} matching keywords including: {}",
            matching.len(),
            preview.join(", ")
        )));
    }

    if !missing.is_empty() {
        feedback.push(Feedback::negative(format!(
            "Missing {} important keywords from job description.",
            missing.len()
        )));
    }

    if !name_is_standard(resume_text) {
        feedback.push(Feedback::negative(
            "Your name should be in a standard format for ATS systems.",
        ));
    }

    matching.truncate(MATCHING_LIMIT);

    AtsReport {
        score,
        feedback,
        matching_keywords: matching,
        missing_keywords: missing,
    }
}

/// The first non-blank line (the name) should carry no lower-case letters.
fn name_is_standard(resume_text: &str) -> bool {
    resume_text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(|name| !name.chars().any(char::is_lowercase))
        .unwrap_or(true)
}

/// Every stemmed job keyword split into those the resume's keywords contain and those it lacks.
pub fn match_keywords(resume_text: &str, job_description: &str) -> Result<KeywordMatch, PipelineError> {
    let resume_keywords: HashSet<String> = extract_keywords(resume_text)?.into_iter().collect();
    let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) = extract_keywords(job_description)?
        .into_iter()
        .partition(|kw| resume_keywords.contains(kw));
    Ok(KeywordMatch {
        matched_keywords,
        missing_keywords,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
