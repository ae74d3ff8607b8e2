//! Resume Optimization: orchestrates the full optimization pipeline.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::PipelineError;
use crate::generation::content_selector::filter_and_reorder_sections;
use crate::generation::fit_scoring::AtsScorer;
use crate::generation::jd_parser::{parse_jd, ParsedJD};
use crate::generation::keywords::{extract_keywords, stem};
use crate::generation::relevance::evaluate_relevance;
use crate::generation::tailor::{
    missing_keywords, tailor_resume_content, OptimizationSummary, SECTION_EXPERIENCE,
    SECTION_SKILLS, SECTION_SUMMARY,
};
use crate::models::resume::ParsedResume;
use crate::parsing::parse_resume;
use crate::render::{format_resume_text, DocumentRenderer};

const STAGE: &str = "optimization";
const APPEND_SUMMARY_KEYWORDS: usize = 5;
const APPEND_SKILL_KEYWORDS: usize = 8;
const APPEND_BULLET_KEYWORDS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Request / outcome models
// ────────────────────────────────────────────────────────────────────────────

/// How the resume is rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizeStrategy {
    /// Relevance scoring, selection and per-section tailoring.
    #[default]
    Tailored,
    /// Single pass that appends missing keywords to summary, skills and first bullets.
    KeywordAppend,
}

impl FromStr for OptimizeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tailored" => Ok(OptimizeStrategy::Tailored),
            "keyword_append" => Ok(OptimizeStrategy::KeywordAppend),
            other => Err(format!(
                "unknown optimize strategy '{other}' (expected tailored|keyword_append)"
            )),
        }
    }
}

impl fmt::Display for OptimizeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OptimizeStrategy::Tailored => "tailored",
            OptimizeStrategy::KeywordAppend => "keyword_append",
        })
    }
}

/// Result of one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeOutcome {
    pub original_score: u32,
    pub optimized_score: u32,
    pub summary: OptimizationSummary,
    pub optimized_resume: ParsedResume,
    /// The optimized resume rendered by the configured document backend.
    pub document: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Optimization pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full optimization pipeline.
///
/// Steps:
/// 1. parse_jd() → ParsedJD
/// 2. parse_resume() → ParsedResume
/// 3. format_resume_text() → scorer.score() → original score
/// 4. Tailored: evaluate_relevance() → filter_and_reorder_sections() → tailor_resume_content()
///    KeywordAppend: append_missing_keywords()
/// 5. format_resume_text() → scorer.score() → optimized score
/// 6. renderer.render() → document
pub fn optimize_resume(
    resume_text: &str,
    job_description: &str,
    scorer: &dyn AtsScorer,
    strategy: OptimizeStrategy,
    renderer: &dyn DocumentRenderer,
    today: NaiveDate,
) -> Result<OptimizeOutcome, PipelineError> {
    if job_description.trim().is_empty() {
        return Err(PipelineError::invalid_input(STAGE, "job description is empty"));
    }

    // Step 1: Parse JD
    let job = parse_jd(job_description)?;
    info!(
        "JD parsed: role={}, {} keywords, {} technical terms",
        job.role,
        job.keywords.len(),
        job.technical_terms.len()
    );

    // Step 2: Parse resume
    let parsed = parse_resume(resume_text)?;

    // Step 3: Original score
    let original = scorer.score(&format_resume_text(&parsed), job_description)?;
    info!("Original ATS score: {} ({} scorer)", original.score, scorer.name());

    // Step 4: Rewrite
    let (optimized_resume, summary) = match strategy {
        OptimizeStrategy::Tailored => {
            let relevance = evaluate_relevance(&parsed, &job);
            let selection = filter_and_reorder_sections(&parsed, &relevance, job.role);
            if !selection.excluded_entries.is_empty() {
                info!("Selection excluded {} entries", selection.excluded_entries.len());
            }
            let tailored =
                tailor_resume_content(&selection.resume, job_description, &job, today);
            (tailored.resume, tailored.summary)
        }
        OptimizeStrategy::KeywordAppend => append_missing_keywords(&parsed, &job)?,
    };

    // Step 5: Optimized score
    let optimized = scorer.score(&format_resume_text(&optimized_resume), job_description)?;
    info!(
        "Optimized ATS score: {} (was {}), strategy={}, {} keywords added",
        optimized.score,
        original.score,
        strategy,
        summary.keywords_added.len()
    );

    // Step 6: Render
    let document = renderer.render(&optimized_resume);

    Ok(OptimizeOutcome {
        original_score: original.score,
        optimized_score: optimized.score,
        summary,
        optimized_resume,
        document,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword-append strategy
// ────────────────────────────────────────────────────────────────────────────

/// Single-pass optimizer:
/// - summary: " with expertise in ..." (top 5 missing) before the final period
/// - skills: up to 8 missing keywords appended
/// - each job's first bullet: " Utilized a, b, c to drive results and improve efficiency."
pub fn append_missing_keywords(
    resume: &ParsedResume,
    job: &ParsedJD,
) -> Result<(ParsedResume, OptimizationSummary), PipelineError> {
    let mut out = resume.clone();
    let mut summary = OptimizationSummary::default();

    // Summary
    if !resume.summary.trim().is_empty() {
        let missing =
            missing_keywords(&resume.summary, &job.surface_keywords, APPEND_SUMMARY_KEYWORDS);
        if !missing.is_empty() {
            let trimmed = resume.summary.trim();
            let base = trimmed.strip_suffix('.').unwrap_or(trimmed);
            out.summary = format!("{base} with expertise in {}.", missing.join(", "));
            summary.add_keywords(&missing);
            summary.improve_section(
                SECTION_SUMMARY,
                "Enhanced professional summary with relevant keywords".to_string(),
            );
        }
    }

    // Skills
    if !resume.skills.is_empty() {
        let skill_forms: Vec<(String, String)> = resume
            .skills
            .iter()
            .map(|s| {
                let lower = s.to_lowercase();
                let stemmed = stem(&lower);
                (lower, stemmed)
            })
            .collect();
        let missing: Vec<String> = job
            .surface_keywords
            .iter()
            .filter(|kw| {
                let kw_stem = stem(kw);
                !skill_forms.iter().any(|(lower, stemmed)| {
                    lower.contains(kw.as_str()) || stemmed.contains(kw_stem.as_str())
                })
            })
            .take(APPEND_SKILL_KEYWORDS)
            .cloned()
            .collect();
        if !missing.is_empty() {
            out.skills.extend(missing.iter().cloned());
            summary.add_keywords(&missing);
            summary.improve_section(
                SECTION_SKILLS,
                format!("Added {} relevant skills from the job description", missing.len()),
            );
        }
    }

    // Experience
    let mut experience_improved = false;
    for job_entry in &mut out.experience {
        let Some(first) = job_entry.responsibilities.first() else {
            continue;
        };
        let present = extract_keywords(&job_entry.responsibilities.join(" "))?;
        let missing: Vec<String> = job
            .surface_keywords
            .iter()
            .filter(|kw| !present.contains(&stem(kw)))
            .take(APPEND_BULLET_KEYWORDS)
            .cloned()
            .collect();
        if missing.is_empty() {
            continue;
        }
        let enhanced = format!(
            "{first} Utilized {} to drive results and improve efficiency.",
            missing.join(", ")
        );
        job_entry.responsibilities[0] = enhanced;
        summary.add_keywords(&missing);
        experience_improved = true;
    }
    if experience_improved {
        summary.improve_section(
            SECTION_EXPERIENCE,
            "Enhanced work experience descriptions with relevant keywords".to_string(),
        );
    }

    Ok((out, summary.finish()))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
