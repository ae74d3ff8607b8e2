//! Content Selector: filters low-relevance entries and reorders what is kept.
//!
//! Experience keeps everything scoring above the threshold plus the two most recent
//! entries, emitted most-recent first. Projects keep everything above a role-dependent
//! threshold, falling back to the top two, emitted by score.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generation::jd_parser::RoleCategory;
use crate::generation::relevance::SectionRelevance;
use crate::models::resume::{ExperienceEntry, ParsedResume, ProjectEntry};
use crate::parsing::dates::{is_ongoing, parse_date_range};

// ────────────────────────────────────────────────────────────────────────────
// Thresholds
// ────────────────────────────────────────────────────────────────────────────

const EXPERIENCE_THRESHOLD: f64 = 3.0;
/// Most-recent experience entries kept regardless of score.
const EXPERIENCE_RECENCY_FLOOR: usize = 2;
const PROJECT_THRESHOLD: f64 = 3.0;
const PROJECT_HEAVY_THRESHOLD: f64 = 5.0;
/// Minimum projects kept when at least this many exist.
const PROJECT_FLOOR: usize = 2;

/// Selected resume plus the entries that were dropped and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResult {
    pub resume: ParsedResume,
    pub excluded_entries: Vec<(String, String)>, // (entry label, reason)
}

// ────────────────────────────────────────────────────────────────────────────
// Recency
// ────────────────────────────────────────────────────────────────────────────

/// Sort key for "how recent is this entry". Greater is more recent: any parseable date
/// outranks an unparseable one, which fall back to raw string order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum RecencyKey {
    Unparsed(String),
    Dated { end: NaiveDate, start: NaiveDate },
}

pub fn recency_key(date: &str) -> RecencyKey {
    match parse_date_range(date) {
        Some(range) => RecencyKey::Dated {
            end: range.sort_end(),
            start: range.start,
        },
        // "Present" with no year still counts as ongoing.
        None if is_ongoing(date) => RecencyKey::Dated {
            end: NaiveDate::MAX,
            start: NaiveDate::MIN,
        },
        None => RecencyKey::Unparsed(date.trim().to_string()),
    }
}

/// Indices of `entries` ordered most-recent first. Equal keys keep input order.
pub fn recency_order(entries: &[ExperienceEntry]) -> Vec<usize> {
    let keys: Vec<RecencyKey> = entries.iter().map(|e| recency_key(&e.date)).collect();
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| keys[b].cmp(&keys[a]));
    order
}

// ────────────────────────────────────────────────────────────────────────────
// Selection
// ────────────────────────────────────────────────────────────────────────────

pub fn project_threshold(role: RoleCategory) -> f64 {
    if role.is_project_heavy() {
        PROJECT_HEAVY_THRESHOLD
    } else {
        PROJECT_THRESHOLD
    }
}

/// Applies the experience and project retention rules. Summary, skills, education and
/// additional sections pass through unchanged.
pub fn filter_and_reorder_sections(
    resume: &ParsedResume,
    relevance: &SectionRelevance,
    role: RoleCategory,
) -> SelectionResult {
    let mut excluded = Vec::new();

    let experience = select_experience(&resume.experience, relevance, &mut excluded);
    let projects = select_projects(&resume.projects, relevance, role, &mut excluded);

    debug!(
        "Selection kept {}/{} experience and {}/{} projects",
        experience.len(),
        resume.experience.len(),
        projects.len(),
        resume.projects.len()
    );

    SelectionResult {
        resume: ParsedResume {
            experience,
            projects,
            ..resume.clone()
        },
        excluded_entries: excluded,
    }
}

fn select_experience(
    entries: &[ExperienceEntry],
    relevance: &SectionRelevance,
    excluded: &mut Vec<(String, String)>,
) -> Vec<ExperienceEntry> {
    let order = recency_order(entries);
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut kept = Vec::new();

    for (rank, &index) in order.iter().enumerate() {
        let entry = &entries[index];
        let score = relevance.experience_score(index).unwrap_or(0.0);
        let label = experience_label(entry);

        if score <= EXPERIENCE_THRESHOLD && rank >= EXPERIENCE_RECENCY_FLOOR {
            excluded.push((label, format!("Relevance {score:.1} at or below {EXPERIENCE_THRESHOLD}")));
            continue;
        }

        let identity = (
            entry.company.trim().to_lowercase(),
            entry.title.trim().to_lowercase(),
        );
        if !seen.insert(identity) {
            excluded.push((label, "Duplicate of a more recent entry".to_string()));
            continue;
        }

        kept.push(entry.clone());
    }

    kept
}

fn select_projects(
    entries: &[ProjectEntry],
    relevance: &SectionRelevance,
    role: RoleCategory,
    excluded: &mut Vec<(String, String)>,
) -> Vec<ProjectEntry> {
    let threshold = project_threshold(role);

    // Unscored entries count as 0. Stable sort keeps input order among ties.
    let mut ranked: Vec<(usize, f64)> = (0..entries.len())
        .map(|index| (index, relevance.project_score(index).unwrap_or(0.0)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let survivors = ranked.iter().filter(|(_, score)| *score > threshold).count();
    let keep = if survivors < PROJECT_FLOOR && entries.len() >= PROJECT_FLOOR {
        debug!(
            "Only {} project(s) above {}; keeping the top {}",
            survivors, threshold, PROJECT_FLOOR
        );
        PROJECT_FLOOR
    } else {
        survivors
    };

    let mut kept = Vec::with_capacity(keep);
    for (rank, (index, score)) in ranked.into_iter().enumerate() {
        if rank < keep {
            kept.push(entries[index].clone());
        } else {
            excluded.push((
                entries[index].name.clone(),
                format!("Relevance {score:.1} at or below {threshold}"),
            ));
        }
    }
    kept
}

fn experience_label(entry: &ExperienceEntry) -> String {
    match (entry.title.trim(), entry.company.trim()) {
        ("", company) => company.to_string(),
        (title, "") => title.to_string(),
        (title, company) => format!("{title} at {company}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::relevance::RelevanceScore;

    fn job(company: &str, title: &str, date: &str) -> ExperienceEntry {
        ExperienceEntry {
            company: company.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            responsibilities: vec![],
        }
    }

    fn project(name: &str) -> ProjectEntry {
        ProjectEntry {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn scores(pairs: &[(usize, f64)]) -> Vec<RelevanceScore> {
        let mut out: Vec<RelevanceScore> = pairs
            .iter()
            .map(|&(entry_index, score)| RelevanceScore {
                entry_index,
                score,
                keyword_matches: 0,
                tech_matches: 0,
                role_type_fit: 0.0,
            })
            .collect();
        out.sort_by(|a, b| b.score.total_cmp(&a.score));
        out
    }

    #[test]
    fn test_two_most_recent_always_kept() {
        let resume = ParsedResume {
            experience: vec![
                job("Old Co", "Intern", "2010 - 2011"),
                job("Current Co", "Lead", "Jan 2022 - Present"),
                job("Mid Co", "Engineer", "2015 - 2019"),
                job("Prev Co", "Senior", "2019 - 2021"),
            ],
            ..Default::default()
        };
        let relevance = SectionRelevance {
            experience: scores(&[(0, 0.0), (1, 0.0), (2, 9.0), (3, 0.0)]),
            projects: vec![],
        };

        let result = filter_and_reorder_sections(&resume, &relevance, RoleCategory::General);
        let companies: Vec<&str> = result
            .resume
            .experience
            .iter()
            .map(|e| e.company.as_str())
            .collect();
        assert_eq!(companies, vec!["Current Co", "Prev Co", "Mid Co"]);
        assert_eq!(result.excluded_entries.len(), 1);
        assert_eq!(result.excluded_entries[0].0, "Intern at Old Co");
    }

    #[test]
    fn test_retention_floor_with_zero_scores() {
        let resume = ParsedResume {
            experience: vec![job("A", "x", "2001 - 2002"), job("B", "y", "2003 - 2004")],
            ..Default::default()
        };
        let result =
            filter_and_reorder_sections(&resume, &SectionRelevance::default(), RoleCategory::Data);
        assert_eq!(result.resume.experience.len(), 2);
        assert_eq!(result.resume.experience[0].company, "B");
    }

    #[test]
    fn test_duplicate_company_title_removed() {
        let resume = ParsedResume {
            experience: vec![
                job("Acme", "Engineer", "2020 - 2022"),
                job("ACME", "engineer", "2018 - 2019"),
                job("Globex", "Engineer", "2015 - 2017"),
            ],
            ..Default::default()
        };
        let relevance = SectionRelevance {
            experience: scores(&[(0, 10.0), (1, 10.0), (2, 10.0)]),
            projects: vec![],
        };
        let result = filter_and_reorder_sections(&resume, &relevance, RoleCategory::General);
        assert_eq!(result.resume.experience.len(), 2);
        assert_eq!(result.resume.experience[0].date, "2020 - 2022");
        assert_eq!(result.resume.experience[1].company, "Globex");
    }

    #[test]
    fn test_recency_key_ordering() {
        assert!(recency_key("Mar 2020 - Present") > recency_key("Jan 2019 - Dec 2023"));
        assert!(recency_key("Present") > recency_key("2023"));
        assert!(recency_key("2019") > recency_key("Summer"));
        assert!(recency_key("Winter") > recency_key("Summer"));
        assert!(recency_key("2018 - 2020") > recency_key("2015 - 2020"));
    }

    #[test]
    fn test_projects_fall_back_to_top_two() {
        let resume = ParsedResume {
            projects: vec![project("p0"), project("p1"), project("p2")],
            ..Default::default()
        };
        let relevance = SectionRelevance {
            experience: vec![],
            projects: scores(&[(0, 1.0), (1, 4.0), (2, 2.0)]),
        };
        let result =
            filter_and_reorder_sections(&resume, &relevance, RoleCategory::Blockchain);
        let names: Vec<&str> = result.resume.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["p1", "p2"]);
    }

    #[test]
    fn test_project_threshold_depends_on_role() {
        let resume = ParsedResume {
            projects: vec![project("a"), project("b"), project("c")],
            ..Default::default()
        };
        let relevance = SectionRelevance {
            experience: vec![],
            projects: scores(&[(0, 4.0), (1, 4.5), (2, 6.0)]),
        };

        let general = filter_and_reorder_sections(&resume, &relevance, RoleCategory::Backend);
        assert_eq!(general.resume.projects.len(), 3);

        let heavy = filter_and_reorder_sections(&resume, &relevance, RoleCategory::Mobile);
        let names: Vec<&str> = heavy.resume.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b"], "one survivor at 5 falls back to top two");
    }

    #[test]
    fn test_single_project_below_threshold_dropped() {
        let resume = ParsedResume {
            projects: vec![project("only")],
            ..Default::default()
        };
        let relevance = SectionRelevance {
            experience: vec![],
            projects: scores(&[(0, 1.0)]),
        };
        let result = filter_and_reorder_sections(&resume, &relevance, RoleCategory::General);
        assert!(result.resume.projects.is_empty());
    }

    #[test]
    fn test_other_sections_pass_through() {
        let resume = ParsedResume {
            summary: "Engineer.".to_string(),
            skills: vec!["Rust".to_string()],
            ..Default::default()
        };
        let result =
            filter_and_reorder_sections(&resume, &SectionRelevance::default(), RoleCategory::General);
        assert_eq!(result.resume, resume);
    }
}
