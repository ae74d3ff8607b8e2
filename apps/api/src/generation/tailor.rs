//! Content Tailor: rewrites summary, titles and bullets to surface missing job keywords,
//! and reorders skills so the relevant ones lead.
//!
//! Rewrites are additive: existing text is kept and keywords are appended or spliced in.
//! Keywords written into prose use the unstemmed (surface) form.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generation::jd_parser::ParsedJD;
use crate::generation::keywords::{stem, tokenize};
use crate::generation::tech_terms::{is_vocabulary_term, vocabulary_display_name};
use crate::models::resume::ParsedResume;
use crate::parsing::dates::{months_between, parse_date_range};

/// Missing keywords considered for the summary.
const SUMMARY_KEYWORDS: usize = 5;
/// Missing keywords named per appended bullet clause.
const BULLET_KEYWORDS: usize = 3;
/// Highest-ranked surface keywords eligible for bullet clauses.
const BULLET_KEYWORD_POOL: usize = 10;
/// Technical terms appended to the skills list.
const MAX_ADDED_SKILLS: usize = 8;
/// Technical skills named in a synthesized summary.
const SUMMARY_TECH_SKILLS: usize = 3;

/// A generic "skills"/"expertise" mention, optionally followed by "in"/"with".
static EXPERTISE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(skills|expertise)\b(\s+(?:in|with)\b)?").expect("valid expertise regex")
});

pub const SECTION_SUMMARY: &str = "Professional Summary";
pub const SECTION_SKILLS: &str = "Skills";
pub const SECTION_EXPERIENCE: &str = "Work Experience";
pub const SECTION_PROJECTS: &str = "Projects";

/// What an optimization pass changed, for display alongside the rewritten resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSummary {
    pub changes: Vec<String>,
    pub keywords_added: Vec<String>,
    pub sections_improved: Vec<String>,
    pub notes: String,
}

impl OptimizationSummary {
    /// Records keywords in first-insertion order, ignoring repeats.
    pub fn add_keywords<'a>(&mut self, keywords: impl IntoIterator<Item = &'a String>) {
        for kw in keywords {
            if !self.keywords_added.iter().any(|k| k.eq_ignore_ascii_case(kw)) {
                self.keywords_added.push(kw.clone());
            }
        }
    }

    pub fn improve_section(&mut self, section: &str, change: String) {
        if !self.sections_improved.iter().any(|s| s == section) {
            self.sections_improved.push(section.to_string());
        }
        self.changes.push(change);
    }

    /// Fills `notes` from the recorded counts. Zero counts are left unmentioned.
    pub fn finish(mut self) -> Self {
        let mut notes =
            String::from("The resume has been optimized to better match the job description. ");
        if !self.keywords_added.is_empty() {
            notes.push_str(&format!(
                "Added {} relevant keywords to increase ATS match score. ",
                self.keywords_added.len()
            ));
        }
        if !self.sections_improved.is_empty() {
            notes.push_str(&format!(
                "Improved {} sections to highlight your qualifications. ",
                self.sections_improved.len()
            ));
        }
        notes.push_str(
            "Remember to review the optimized resume and make any additional adjustments \
             to ensure accuracy and authenticity.",
        );
        self.notes = notes;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredResume {
    pub resume: ParsedResume,
    pub summary: OptimizationSummary,
}

/// Tailors every section of `resume` toward the parsed job.
///
/// `today` anchors ongoing date ranges when estimating years of experience.
pub fn tailor_resume_content(
    resume: &ParsedResume,
    job_description: &str,
    job: &ParsedJD,
    today: NaiveDate,
) -> TailoredResume {
    let mut out = resume.clone();
    let mut summary = OptimizationSummary::default();
    let keyword_set: HashSet<&str> = job.keywords.iter().map(String::as_str).collect();
    let vocabulary_terms: Vec<&str> = job
        .technical_terms
        .iter()
        .map(String::as_str)
        .filter(|t| is_vocabulary_term(t))
        .collect();

    // Summary
    if resume.summary.trim().is_empty() {
        let synthesized = synthesize_summary(resume, job, today);
        debug!("Synthesized summary: {}", synthesized);
        out.summary = synthesized;
        summary.improve_section(
            SECTION_SUMMARY,
            "Generated a professional summary from your experience".to_string(),
        );
    } else {
        let missing = missing_keywords(&resume.summary, &job.surface_keywords, SUMMARY_KEYWORDS);
        let enhanced = enhance_summary(&resume.summary, &job.surface_keywords);
        if enhanced != resume.summary {
            out.summary = enhanced;
            summary.add_keywords(&missing);
            summary.improve_section(
                SECTION_SUMMARY,
                "Enhanced professional summary with relevant keywords".to_string(),
            );
        }
    }

    // Skills
    let (skills, added) = reorder_skills(&resume.skills, job);
    if skills != resume.skills {
        out.skills = skills;
        summary.add_keywords(&added);
        let change = if added.is_empty() {
            "Reordered skills to lead with those the job asks for".to_string()
        } else {
            format!("Added {} relevant skills from the job description", added.len())
        };
        summary.improve_section(SECTION_SKILLS, change);
    }

    let jd_words = JdVocabulary::from_text(job_description);

    // Experience
    let mut bullets_enhanced = 0usize;
    let mut titles_adjusted = 0usize;
    for entry in &mut out.experience {
        let adjusted = adjust_title(&entry.title, &jd_words);
        if adjusted != entry.title {
            titles_adjusted += 1;
            entry.title = adjusted;
        }
        let blob = entry.text_blob();
        let added = enhance_bullets(
            &mut entry.responsibilities,
            &blob,
            &job.surface_keywords,
            &keyword_set,
            &vocabulary_terms,
        );
        if !added.is_empty() {
            bullets_enhanced += 1;
            summary.add_keywords(&added);
        }
    }
    if bullets_enhanced > 0 {
        summary.improve_section(
            SECTION_EXPERIENCE,
            "Enhanced work experience descriptions with relevant keywords".to_string(),
        );
    }
    if titles_adjusted > 0 {
        summary.improve_section(
            SECTION_EXPERIENCE,
            format!("Aligned {titles_adjusted} job title(s) with the job description's wording"),
        );
    }

    // Projects
    let mut projects_enhanced = 0usize;
    for project in &mut out.projects {
        let adjusted = adjust_title(&project.role, &jd_words);
        if adjusted != project.role {
            project.role = adjusted;
            projects_enhanced += 1;
        }
        let blob = project.text_blob();
        let added = enhance_bullets(
            &mut project.description,
            &blob,
            &job.surface_keywords,
            &keyword_set,
            &vocabulary_terms,
        );
        if !added.is_empty() {
            projects_enhanced += 1;
            summary.add_keywords(&added);
        }
    }
    if projects_enhanced > 0 {
        summary.improve_section(
            SECTION_PROJECTS,
            "Enhanced project descriptions with relevant keywords".to_string(),
        );
    }

    TailoredResume {
        resume: out,
        summary: summary.finish(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Summary
// ────────────────────────────────────────────────────────────────────────────

/// Up to `limit` keywords, in rank order, that do not appear in `text` (case-insensitive).
pub fn missing_keywords(text: &str, keywords: &[String], limit: usize) -> Vec<String> {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|kw| !lower.contains(kw.to_lowercase().as_str()))
        .take(limit)
        .cloned()
        .collect()
}

/// Splices the top missing keywords into an existing summary.
///
/// Two or more sentences: the second sentence gets them, either attached to a generic
/// "skills"/"expertise" mention or as ", with expertise in ..." before its final
/// punctuation. One sentence: " Skilled in ..." is appended. Nothing missing: unchanged.
pub fn enhance_summary(summary: &str, keywords: &[String]) -> String {
    let missing = missing_keywords(summary, keywords, SUMMARY_KEYWORDS);
    if missing.is_empty() || summary.trim().is_empty() {
        return summary.to_string();
    }
    let list = missing.join(", ");

    let spans = sentence_spans(summary);
    if spans.len() >= 2 {
        let (start, end) = spans[1];
        let sentence = &summary[start..end];
        let rewritten = inject_into_sentence(sentence, &list);
        return format!("{}{}{}", &summary[..start], rewritten, &summary[end..]);
    }

    let mut text = summary.trim_end().to_string();
    if !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }
    format!("{text} Skilled in {list}.")
}

fn inject_into_sentence(sentence: &str, list: &str) -> String {
    if let Some(caps) = EXPERTISE_RE.captures(sentence) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
        let noun = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let replacement = match caps.get(2) {
            Some(prep) => format!("{noun}{} {list},", prep.as_str()),
            None => format!("{noun} in {list}"),
        };
        return format!(
            "{}{}{}",
            &sentence[..whole.start],
            replacement,
            &sentence[whole.end..]
        );
    }

    let trimmed = sentence.trim_end();
    let trailing = &sentence[trimmed.len()..];
    match trimmed.char_indices().last() {
        Some((i, c)) if matches!(c, '.' | '!' | '?') => {
            format!("{}, with expertise in {list}{c}{trailing}", &trimmed[..i])
        }
        _ => format!("{trimmed}, with expertise in {list}.{trailing}"),
    }
}

/// Byte spans of sentences. A sentence ends at `.`, `!` or `?` followed by whitespace;
/// each span after the first starts at that whitespace.
fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(next_i, next)) = chars.peek() {
                if next.is_whitespace() {
                    spans.push((start, i + c.len_utf8()));
                    start = next_i;
                }
            }
        }
    }
    if !text[start..].trim().is_empty() {
        spans.push((start, text.len()));
    }
    spans.retain(|&(s, e)| !text[s..e].trim().is_empty());
    spans
}

/// Builds a summary for resumes that lack one:
/// "{title} with {N}+ years of experience in {tech}. Skilled in {keywords}."
pub fn synthesize_summary(resume: &ParsedResume, job: &ParsedJD, today: NaiveDate) -> String {
    let title = most_common_title(resume).unwrap_or_else(|| "Professional".to_string());
    let years = estimate_years_of_experience(resume, today);

    let tech: Vec<String> = resume
        .skills
        .iter()
        .filter(|skill| job.technical_terms.contains(&skill.trim().to_lowercase()))
        .take(SUMMARY_TECH_SKILLS)
        .cloned()
        .collect();
    let tech_lower: HashSet<String> = tech.iter().map(|t| t.to_lowercase()).collect();
    let top: Vec<&str> = job
        .surface_keywords
        .iter()
        .filter(|kw| !tech_lower.contains(kw.as_str()))
        .take(3)
        .map(String::as_str)
        .collect();

    let mut text = match (years, tech.is_empty()) {
        (Some(y), false) => format!("{title} with {y}+ years of experience in {}.", tech.join(", ")),
        (Some(y), true) => format!("{title} with {y}+ years of experience."),
        (None, false) => format!("{title} with experience in {}.", tech.join(", ")),
        (None, true) => format!("{title}."),
    };
    if !top.is_empty() {
        text.push_str(&format!(" Skilled in {}.", top.join(", ")));
    }
    text
}

/// Most frequent non-empty experience title; ties go to the earliest entry.
fn most_common_title(resume: &ParsedResume) -> Option<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (i, entry) in resume.experience.iter().enumerate() {
        let title = entry.title.trim();
        if title.is_empty() {
            continue;
        }
        counts.entry(title.to_string()).or_insert((0, i)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
        .map(|(title, _)| title)
}

/// Whole years from the earliest start to the latest end; ongoing ranges end `today`.
/// `None` when no date parses or the span is under a year.
pub fn estimate_years_of_experience(resume: &ParsedResume, today: NaiveDate) -> Option<u32> {
    let ranges: Vec<_> = resume
        .experience
        .iter()
        .filter_map(|e| parse_date_range(&e.date))
        .collect();
    let start = ranges.iter().map(|r| r.start).min()?;
    let end = ranges.iter().map(|r| r.end.unwrap_or(today)).max()?;
    let years = (months_between(start, end) / 12.0).floor() as u32;
    (years > 0).then_some(years)
}

// ────────────────────────────────────────────────────────────────────────────
// Bullets
// ────────────────────────────────────────────────────────────────────────────

/// True when any word of `text` stems to a job keyword or a job vocabulary term appears in it.
fn mentions_job_terms(text: &str, keyword_set: &HashSet<&str>, vocabulary: &[&str]) -> bool {
    let lower = text.to_lowercase();
    tokenize(&lower)
        .iter()
        .any(|token| keyword_set.contains(stem(token).as_str()))
        || vocabulary.iter().any(|term| lower.contains(term))
}

/// Appends a keyword clause to each bullet that mentions no job term. Keywords already in
/// the entry, or already appended to an earlier bullet of it, are not used again.
/// Returns the keywords added.
pub fn enhance_bullets(
    bullets: &mut [String],
    entry_blob: &str,
    surface_keywords: &[String],
    keyword_set: &HashSet<&str>,
    vocabulary: &[&str],
) -> Vec<String> {
    let mut pool: Vec<String> = surface_keywords
        .iter()
        .take(BULLET_KEYWORD_POOL)
        .filter(|kw| !entry_blob.contains(kw.as_str()))
        .cloned()
        .collect();
    let mut added = Vec::new();

    for bullet in bullets.iter_mut() {
        if pool.is_empty() {
            break;
        }
        if mentions_job_terms(bullet, keyword_set, vocabulary) {
            continue;
        }
        let take = pool.len().min(BULLET_KEYWORDS);
        let chosen: Vec<String> = pool.drain(..take).collect();
        *bullet = enhance_responsibility(bullet, &chosen);
        added.extend(chosen);
    }

    added
}

/// "Built the dashboard." + [a, b, c] → "Built the dashboard, leveraging a, b and c."
pub fn enhance_responsibility(bullet: &str, keywords: &[String]) -> String {
    if keywords.is_empty() {
        return bullet.to_string();
    }
    let base = bullet.trim_end().trim_end_matches(['.', ';', ',']);
    format!("{base}, leveraging {}.", natural_list(keywords))
}

fn natural_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Titles
// ────────────────────────────────────────────────────────────────────────────

/// Words of the job description keyed by their lower-cased, hyphen-free form.
/// The first spelling seen wins.
pub struct JdVocabulary {
    forms: HashMap<String, String>,
    words: BTreeSet<String>,
}

impl JdVocabulary {
    pub fn from_text(text: &str) -> Self {
        let mut forms = HashMap::new();
        let mut words = BTreeSet::new();
        for raw in text.split_whitespace() {
            let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
            if word.is_empty() {
                continue;
            }
            forms.entry(squash(word)).or_insert_with(|| word.to_string());
            words.insert(word.to_lowercase());
        }
        Self { forms, words }
    }

    fn form_of(&self, squashed: &str) -> Option<&str> {
        self.forms.get(squashed).map(String::as_str)
    }

    /// The single JD word of at least six letters starting with `prefix`, if exactly one exists.
    fn unique_expansion(&self, prefix: &str) -> Option<&str> {
        let mut hits = self
            .words
            .iter()
            .filter(|w| w.len() >= 6 && w.starts_with(prefix) && w.chars().all(char::is_alphabetic));
        let first = hits.next()?;
        if hits.next().is_some() {
            return None;
        }
        self.form_of(&squash(first))
    }
}

/// Lower-cased with hyphens and spaces removed.
fn squash(word: &str) -> String {
    word.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Aligns title wording with the job description on unambiguous lexical matches only:
/// a word or adjacent word pair equal to a JD word once hyphens and spaces are ignored
/// ("Front-End" → "Frontend"), or a 3–4 letter abbreviation written with a trailing
/// period that prefixes exactly one JD word ("Eng." → "Engineering"). Otherwise unchanged.
pub fn adjust_title(title: &str, jd: &JdVocabulary) -> String {
    let tokens: Vec<&str> = title.split_whitespace().collect();
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    let mut changed = false;
    let mut i = 0usize;

    while i < tokens.len() {
        if let Some(&next) = tokens.get(i + 1) {
            let pair = format!("{}{}", tokens[i], next);
            if let Some(form) = jd.form_of(&squash(&pair)) {
                out.push(match_case(tokens[i], form));
                changed = true;
                i += 2;
                continue;
            }
        }

        let token = tokens[i];
        if token.contains('-') {
            if let Some(form) = jd.form_of(&squash(token)) {
                if !form.eq_ignore_ascii_case(token) {
                    out.push(match_case(token, form));
                    changed = true;
                    i += 1;
                    continue;
                }
            }
        }

        if let Some(abbrev) = token.strip_suffix('.') {
            let len = abbrev.chars().count();
            if (3..=4).contains(&len) && abbrev.chars().all(char::is_alphabetic) {
                if let Some(form) = jd.unique_expansion(&abbrev.to_lowercase()) {
                    out.push(match_case(token, form));
                    changed = true;
                    i += 1;
                    continue;
                }
            }
        }

        out.push(token.to_string());
        i += 1;
    }

    if changed {
        out.join(" ")
    } else {
        title.to_string()
    }
}

/// Capitalizes `form` when `original` starts with an upper-case letter.
fn match_case(original: &str, form: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    let mut chars = form.chars();
    match chars.next() {
        Some(first) if starts_upper => first.to_uppercase().chain(chars).collect(),
        _ => form.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Relevant skills first, then job vocabulary terms the list lacks (display casing, up to
/// eight), then everything else. Returns the new list and the terms added.
///
/// A skill and a term overlap when either contains the other, ignoring case, so
/// "React.js" covers "react" and "aws" is not added next to "Amazon AWS".
pub fn reorder_skills(skills: &[String], job: &ParsedJD) -> (Vec<String>, Vec<String>) {
    let keyword_set: HashSet<&str> = job.keywords.iter().map(String::as_str).collect();
    let lowered: Vec<String> = skills.iter().map(|s| s.trim().to_lowercase()).collect();

    let (relevant, rest): (Vec<(&String, &String)>, Vec<(&String, &String)>) =
        skills.iter().zip(&lowered).partition(|(_, lower)| {
            job.technical_terms.iter().any(|term| overlaps(lower, term))
                || tokenize(lower)
                    .iter()
                    .any(|token| keyword_set.contains(stem(token).as_str()))
        });

    let added: Vec<String> = job
        .technical_terms
        .iter()
        .filter(|term| !lowered.iter().any(|lower| overlaps(lower, term)))
        .filter_map(|term| vocabulary_display_name(term))
        .take(MAX_ADDED_SKILLS)
        .map(str::to_string)
        .collect();

    let reordered = relevant
        .into_iter()
        .map(|(skill, _)| skill.clone())
        .chain(added.iter().cloned())
        .chain(rest.into_iter().map(|(skill, _)| skill.clone()))
        .collect();

    (reordered, added)
}

/// Case-folded substring match in either direction. Empty strings never overlap.
fn overlaps(lower_skill: &str, term: &str) -> bool {
    !lower_skill.is_empty()
        && !term.is_empty()
        && (lower_skill.contains(term) || term.contains(lower_skill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::jd_parser::parse_jd;
    use crate::models::resume::{ExperienceEntry, ProjectEntry};

    fn kws(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_single_sentence_summary_gets_skilled_clause() {
        let enhanced = enhance_summary("I am a developer.", &kws(&["python", "react", "sql"]));
        assert_eq!(enhanced, "I am a developer. Skilled in python, react, sql.");
    }

    #[test]
    fn test_summary_without_period_is_terminated() {
        let enhanced = enhance_summary("Seasoned developer", &kws(&["rust"]));
        assert_eq!(enhanced, "Seasoned developer. Skilled in rust.");
    }

    #[test]
    fn test_nothing_missing_leaves_summary_unchanged() {
        let summary = "Python and SQL developer.";
        assert_eq!(enhance_summary(summary, &kws(&["python", "sql"])), summary);
    }

    #[test]
    fn test_second_sentence_expertise_mention_rewritten() {
        let summary = "Backend engineer. Strong expertise in building APIs. Team player.";
        let enhanced = enhance_summary(summary, &kws(&["rust", "kafka"]));
        assert_eq!(
            enhanced,
            "Backend engineer. Strong expertise in rust, kafka, building APIs. Team player."
        );
    }

    #[test]
    fn test_second_sentence_bare_skills_mention() {
        let summary = "Backend engineer. Known for sharp skills!";
        let enhanced = enhance_summary(summary, &kws(&["rust"]));
        assert_eq!(enhanced, "Backend engineer. Known for sharp skills in rust!");
    }

    #[test]
    fn test_second_sentence_without_mention_gets_clause() {
        let summary = "Backend engineer. Ships reliable services.";
        let enhanced = enhance_summary(summary, &kws(&["rust", "kafka"]));
        assert_eq!(
            enhanced,
            "Backend engineer. Ships reliable services, with expertise in rust, kafka."
        );
    }

    #[test]
    fn test_summary_uses_top_five_missing() {
        let keywords = kws(&["a1x", "b2x", "c3x", "d4x", "e5x", "f6x"]);
        let enhanced = enhance_summary("Engineer.", &keywords);
        assert_eq!(enhanced, "Engineer. Skilled in a1x, b2x, c3x, d4x, e5x.");
    }

    #[test]
    fn test_synthesized_summary() {
        let resume = ParsedResume {
            skills: kws(&["Rust", "Kafka", "Cooking"]),
            experience: vec![
                ExperienceEntry {
                    title: "Backend Engineer".to_string(),
                    date: "Jan 2020 - Present".to_string(),
                    ..Default::default()
                },
                ExperienceEntry {
                    title: "Backend Engineer".to_string(),
                    date: "2015 - 2019".to_string(),
                    ..Default::default()
                },
                ExperienceEntry {
                    title: "Intern".to_string(),
                    date: "2014".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let job = parse_jd("Rust engineer for streaming pipelines on Kafka. Rust everywhere.").unwrap();
        let text = synthesize_summary(&resume, &job, today());
        assert_eq!(
            text,
            "Backend Engineer with 12+ years of experience in Rust, Kafka. \
             Skilled in engineer, streaming, pipelines."
        );
    }

    #[test]
    fn test_synthesized_summary_without_experience() {
        let job = parse_jd("").unwrap();
        assert_eq!(synthesize_summary(&ParsedResume::default(), &job, today()), "Professional.");
    }

    #[test]
    fn test_years_of_experience_estimate() {
        let resume = ParsedResume {
            experience: vec![ExperienceEntry {
                date: "Mar 2024 - Jan 2025".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(estimate_years_of_experience(&resume, today()), None);
        assert_eq!(estimate_years_of_experience(&ParsedResume::default(), today()), None);
    }

    #[test]
    fn test_bullets_without_job_terms_get_clause() {
        let stems: Vec<String> = ["kafka", "streaming", "latency"].iter().map(|w| stem(w)).collect();
        let keyword_set: HashSet<&str> = stems.iter().map(String::as_str).collect();
        let mut bullets = vec![
            "Mentored two junior engineers.".to_string(),
            "Reduced latency of checkout".to_string(),
            "Organized the team offsite".to_string(),
        ];
        let added = enhance_bullets(
            &mut bullets,
            "acme mentored reduced latency organized",
            &kws(&["kafka", "streaming", "latency", "grpc", "redis"]),
            &keyword_set,
            &[],
        );
        assert_eq!(bullets[0], "Mentored two junior engineers, leveraging kafka, streaming and grpc.");
        assert_eq!(bullets[1], "Reduced latency of checkout", "already mentions a job term");
        assert_eq!(bullets[2], "Organized the team offsite, leveraging redis.");
        assert_eq!(added, kws(&["kafka", "streaming", "grpc", "redis"]));
    }

    #[test]
    fn test_enhance_responsibility_formats() {
        assert_eq!(enhance_responsibility("Built X;", &kws(&["a"])), "Built X, leveraging a.");
        assert_eq!(enhance_responsibility("Built X", &kws(&["a", "b"])), "Built X, leveraging a and b.");
        assert_eq!(enhance_responsibility("Built X", &[]), "Built X");
    }

    #[test]
    fn test_title_hyphen_alignment() {
        let jd = JdVocabulary::from_text("We are hiring a Frontend Developer.");
        assert_eq!(adjust_title("Front-End Developer", &jd), "Frontend Developer");
        assert_eq!(adjust_title("Front End Developer", &jd), "Frontend Developer");
    }

    #[test]
    fn test_title_abbreviation_expands_only_when_unique() {
        let jd = JdVocabulary::from_text("Engineering Manager for our platform engineering org");
        assert_eq!(adjust_title("Eng. Manager", &jd), "Engineering Manager");

        let ambiguous = JdVocabulary::from_text("Engineering team seeking an Engineer");
        assert_eq!(adjust_title("Eng. Manager", &ambiguous), "Eng. Manager");
    }

    #[test]
    fn test_title_without_match_unchanged() {
        let jd = JdVocabulary::from_text("Leadership role for a data engineer");
        assert_eq!(adjust_title("Lead  Analyst", &jd), "Lead  Analyst");
        assert_eq!(adjust_title("Data Engineer", &jd), "Data Engineer");
    }

    #[test]
    fn test_skills_reordered_with_missing_terms_added() {
        let job = parse_jd("Looking for Python and Docker experience. Kubernetes a plus.").unwrap();
        let (skills, added) = reorder_skills(&kws(&["Excel", "Python", "Public speaking"]), &job);
        assert_eq!(added, kws(&["Docker", "Kubernetes"]));
        assert_eq!(skills, kws(&["Python", "Docker", "Kubernetes", "Excel", "Public speaking"]));
    }

    #[test]
    fn test_skills_containing_a_term_are_not_duplicated() {
        let job = parse_jd("React developer with AWS").unwrap();
        let (skills, added) = reorder_skills(&kws(&["React.js", "Amazon AWS"]), &job);
        assert!(added.is_empty(), "nothing is missing, got {added:?}");
        assert_eq!(skills, kws(&["React.js", "Amazon AWS"]));
    }

    #[test]
    fn test_skill_matching_a_term_by_substring_leads() {
        let job = parse_jd("Kubernetes operators wanted").unwrap();
        let (skills, added) = reorder_skills(&kws(&["Excel", "Kubernetes (CKA)"]), &job);
        assert!(added.is_empty(), "got {added:?}");
        assert_eq!(skills, kws(&["Kubernetes (CKA)", "Excel"]));
    }

    #[test]
    fn test_added_skills_capped_at_eight() {
        let job = parse_jd(
            "Rust Python Kotlin Swift Docker Kubernetes Terraform Ansible Jenkins Redis Kafka",
        )
        .unwrap();
        let (_, added) = reorder_skills(&[], &job);
        assert_eq!(added.len(), 8);
    }

    #[test]
    fn test_tailor_records_summary_of_changes() {
        let resume = ParsedResume {
            summary: "Backend developer.".to_string(),
            skills: kws(&["Python"]),
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                title: "Developer".to_string(),
                date: "2020 - 2022".to_string(),
                responsibilities: kws(&["Organized the offsite"]),
            }],
            projects: vec![ProjectEntry {
                name: "Blog".to_string(),
                role: "Author".to_string(),
                date: "2021".to_string(),
                description: kws(&["Wrote posts about kafka"]),
            }],
            ..Default::default()
        };
        let jd = "Kafka streaming engineer. Kafka and Docker required.";
        let job = parse_jd(jd).unwrap();
        let tailored = tailor_resume_content(&resume, jd, &job, today());

        assert!(tailored.resume.summary.starts_with("Backend developer. Skilled in kafka"));
        assert!(tailored.resume.skills.contains(&"Docker".to_string()));
        assert!(tailored.resume.experience[0].responsibilities[0].contains("leveraging kafka"));
        assert_eq!(
            tailored.resume.projects[0].description,
            resume.projects[0].description,
            "bullet already mentions a job keyword"
        );
        assert_eq!(
            tailored.summary.sections_improved,
            vec![SECTION_SUMMARY, SECTION_SKILLS, SECTION_EXPERIENCE]
        );
        assert!(tailored.summary.keywords_added.contains(&"kafka".to_string()));
        assert!(tailored.summary.notes.contains("Improved 3 sections"));
        assert_eq!(resume.summary, "Backend developer.", "input is not mutated");
    }
}
