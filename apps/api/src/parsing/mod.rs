//! Resume segmenter: splits free-form resume text into a `ParsedResume`.
//!
//! Flow: normalize line endings → header line → greedy contact block → section headers
//! (all-caps lines) → per-section sub-parser chosen from `SECTION_RULES`.
//!
//! Parsing is best-effort: unrecognized content lands in `additional_sections`, and
//! lines between the contact block and the first section header are dropped.

pub mod dates;
pub mod entries;
pub mod skills;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::errors::{ensure_textual, PipelineError};
use crate::models::resume::{
    AdditionalSection, EducationEntry, ExperienceEntry, ParsedResume, ProjectEntry,
};
use crate::parsing::entries::{is_bullet_line, parse_entries};
use crate::parsing::skills::parse_skills;

const STAGE: &str = "resume parsing";

/// Which sub-parser a section body is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Experience,
    Projects,
    Education,
    Skills,
    Other,
}

/// Ordered routing table: the first rule whose marker appears in the upper-cased header wins.
const SECTION_RULES: &[(&[&str], SectionKind)] = &[
    (&["SUMMARY", "PROFILE", "OBJECTIVE"], SectionKind::Summary),
    (&["EXPERIENCE", "EMPLOYMENT"], SectionKind::Experience),
    (&["PROJECT"], SectionKind::Projects),
    (&["EDUCATION"], SectionKind::Education),
    (&["SKILLS"], SectionKind::Skills),
];

/// All-caps heading: letters plus a few joiners, at least four letters, nothing lower-case.
static SECTION_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z &/'\-:]*$").expect("valid section header regex"));

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4}|\+\d[\d\s().\-]{7,}\d")
        .expect("valid phone regex")
});

pub fn classify_section(header: &str) -> SectionKind {
    let upper = header.to_uppercase();
    SECTION_RULES
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| upper.contains(m)))
        .map(|(_, kind)| *kind)
        .unwrap_or(SectionKind::Other)
}

pub fn is_section_header(line: &str) -> bool {
    let trimmed = line.trim();
    !is_bullet_line(line)
        && SECTION_HEADER_RE.is_match(trimmed)
        && trimmed.chars().filter(|c| c.is_ascii_alphabetic()).count() >= 4
}

pub fn is_contact_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    line.contains('@')
        || lower.contains("linkedin")
        || lower.contains("phone")
        || line.contains('-')
        || PHONE_RE.is_match(line)
}

/// Segments resume text into header, contact block and canonical sections.
///
/// Fails only for non-text or blank input; otherwise returns whatever could be recognized.
pub fn parse_resume(resume_text: &str) -> Result<ParsedResume, PipelineError> {
    ensure_textual(STAGE, resume_text)?;
    if resume_text.trim().is_empty() {
        return Err(PipelineError::invalid_input(STAGE, "resume text is empty"));
    }

    let normalized = resume_text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.lines().collect();

    let mut cursor = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());

    let mut resume = ParsedResume {
        header: lines.get(cursor).map(|l| l.trim().to_string()).unwrap_or_default(),
        ..Default::default()
    };
    cursor += 1;

    // Contact block: skip blank lines after the name, then take contact-looking lines.
    while cursor < lines.len() && lines[cursor].trim().is_empty() {
        cursor += 1;
    }
    let mut contact = Vec::new();
    while cursor < lines.len() {
        let line = lines[cursor];
        if line.trim().is_empty() || is_section_header(line) || !is_contact_line(line) {
            break;
        }
        contact.push(line.trim());
        cursor += 1;
    }
    resume.contact_info = contact.join(" | ");

    let rest = &lines[cursor.min(lines.len())..];
    let first_header = rest.iter().position(|l| is_section_header(l));
    let dropped = rest[..first_header.unwrap_or(rest.len())]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .count();
    if dropped > 0 {
        debug!("Dropping {} line(s) before the first section header", dropped);
    }

    if let Some(start) = first_header {
        for (header, body) in split_sections(&rest[start..]) {
            route_section(&mut resume, header, &body);
        }
    }

    info!(
        "Parsed resume: {} experience, {} projects, {} education, {} skills, {} additional",
        resume.experience.len(),
        resume.projects.len(),
        resume.education.len(),
        resume.skills.len(),
        resume.additional_sections.len()
    );

    Ok(resume)
}

/// Groups lines into (header, body) pairs. `lines[0]` must be a header.
fn split_sections<'a>(lines: &[&'a str]) -> Vec<(&'a str, Vec<&'a str>)> {
    let mut sections: Vec<(&'a str, Vec<&'a str>)> = Vec::new();
    for &line in lines {
        if is_section_header(line) {
            sections.push((line.trim(), Vec::new()));
        } else if let Some((_, body)) = sections.last_mut() {
            body.push(line);
        }
    }
    sections
}

fn route_section(resume: &mut ParsedResume, header: &str, body: &[&str]) {
    let kind = classify_section(header);
    debug!("Routing section '{}' as {:?} ({} lines)", header, kind, body.len());

    match kind {
        SectionKind::Summary => {
            let text = body
                .iter()
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if !text.is_empty() {
                if !resume.summary.is_empty() {
                    resume.summary.push(' ');
                }
                resume.summary.push_str(&text);
            }
        }
        SectionKind::Experience => resume
            .experience
            .extend(parse_entries::<ExperienceEntry>(body)),
        SectionKind::Projects => resume.projects.extend(parse_entries::<ProjectEntry>(body)),
        SectionKind::Education => resume
            .education
            .extend(parse_entries::<EducationEntry>(body)),
        SectionKind::Skills => resume.skills.extend(parse_skills(body)),
        SectionKind::Other => resume.additional_sections.push(AdditionalSection {
            title: header.to_string(),
            content: body
                .iter()
                .map(|l| l.trim_end())
                .collect::<Vec<_>>()
                .join("\n")
                .trim_matches('\n')
                .to_string(),
        }),
    }
}
