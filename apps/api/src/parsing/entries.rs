//! Entry sub-parsers for the experience, projects and education sections.
//!
//! Each body line is classified by an ordered rule list (blank → bullet → boundary → plain)
//! and the classification drives a small accumulator that flushes one entry per boundary.

use crate::models::resume::{EducationEntry, ExperienceEntry, ProjectEntry};
use crate::parsing::dates::{extract_date_from_line, has_date_like_token, is_date_line};

const BULLET_MARKERS: &[char] = &['•', '-', '*', '▪', '◦', '‣'];

/// Behaviour that differs between the three entry-bearing sections.
pub trait SectionEntry: Default {
    /// Section-specific boundary heuristic, evaluated on a non-bullet line.
    fn is_boundary(line: &str) -> bool;

    /// Whether a non-bullet line right after a blank line opens a new entry.
    fn starts_after_break(line: &str) -> bool;

    /// Builds a new entry from a boundary line's comma-separated fields.
    fn from_boundary(line: &str) -> Self;

    fn bullets_mut(&mut self) -> &mut Vec<String>;

    fn bullets(&self) -> &[String];

    /// Fills a missing scalar field from a plain line. Returns false when nothing was missing.
    fn backfill(&mut self, line: &str) -> bool;
}

#[derive(Debug, PartialEq)]
enum LineKind {
    Blank,
    Bullet(String),
    Boundary,
    Plain,
}

/// True for lines that open with a bullet marker or with indentation.
pub fn is_bullet_line(line: &str) -> bool {
    (line.starts_with(char::is_whitespace) && !line.trim().is_empty())
        || line.trim_start().starts_with(BULLET_MARKERS)
}

/// Removes the leading bullet marker (if any) and surrounding whitespace.
pub fn strip_bullet(line: &str) -> String {
    line.trim()
        .trim_start_matches(BULLET_MARKERS)
        .trim()
        .to_string()
}

fn classify_line<E: SectionEntry>(line: &str, after_break: bool) -> LineKind {
    if line.trim().is_empty() {
        LineKind::Blank
    } else if is_bullet_line(line) {
        LineKind::Bullet(strip_bullet(line))
    } else if E::is_boundary(line)
        || (after_break && E::starts_after_break(line) && !is_date_line(line))
    {
        LineKind::Boundary
    } else {
        LineKind::Plain
    }
}

/// Splits a section body into entries.
///
/// A line that follows a blank line (or opens the section) starts a new entry when the section
/// accepts it there and it is not a bullet or a bare date. Experience and project headings must
/// carry a comma for that; any education line qualifies. Bullets before any entry open an
/// entry with empty scalar fields.
pub fn parse_entries<E: SectionEntry>(lines: &[&str]) -> Vec<E> {
    let mut entries = Vec::new();
    let mut current: Option<E> = None;
    let mut after_break = true;

    for line in lines {
        match classify_line::<E>(line, after_break) {
            LineKind::Blank => {
                after_break = true;
                continue;
            }
            LineKind::Bullet(text) => {
                if !text.is_empty() {
                    current.get_or_insert_with(E::default).bullets_mut().push(text);
                }
            }
            LineKind::Boundary => {
                if let Some(done) = current.take() {
                    entries.push(done);
                }
                current = Some(E::from_boundary(line.trim()));
            }
            LineKind::Plain => {
                let text = line.trim();
                let entry = current.get_or_insert_with(E::default);
                let filled = entry.bullets().is_empty() && entry.backfill(text);
                if !filled {
                    entry.bullets_mut().push(text.to_string());
                }
            }
        }
        after_break = false;
    }

    if let Some(done) = current {
        entries.push(done);
    }

    entries
}

/// Comma-split fields, trimmed, positions preserved.
fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(|f| f.trim().to_string()).collect()
}

/// Removes `date` from `field`, tidying separators left behind.
fn strip_date(field: &str, date: &str) -> String {
    field
        .replacen(date, "", 1)
        .trim_matches(|c: char| c.is_whitespace() || ",|()-–—".contains(c))
        .to_string()
}

/// Fills the date from the line when no positional date field exists, removing it
/// from whichever field carried it.
fn fallback_date(fields: &mut [&mut String], line: &str) -> String {
    let date = extract_date_from_line(line);
    if date.is_empty() {
        return date;
    }
    if let Some(field) = fields.iter_mut().find(|f| f.contains(&date)) {
        let stripped = strip_date(field.as_str(), &date);
        **field = stripped;
    }
    date
}

/// Backfill shared by experience and projects: a date line fills the date, any other line
/// fills the title-like field and then a date found inside it.
fn backfill_scalar(label: &mut String, date: &mut String, line: &str) -> bool {
    if is_date_line(line) {
        if date.is_empty() {
            *date = extract_date_from_line(line);
            return true;
        }
        return false;
    }
    if label.is_empty() {
        *label = line.to_string();
        return true;
    }
    if date.is_empty() {
        let found = extract_date_from_line(line);
        if !found.is_empty() {
            *date = found;
            return true;
        }
    }
    false
}

fn is_dated_record(line: &str) -> bool {
    line.contains(',') && has_date_like_token(line)
}

impl SectionEntry for ExperienceEntry {
    fn is_boundary(line: &str) -> bool {
        is_dated_record(line)
    }

    fn starts_after_break(line: &str) -> bool {
        line.contains(',')
    }

    fn from_boundary(line: &str) -> Self {
        let fields = split_fields(line);
        let mut company = fields.first().cloned().unwrap_or_default();
        let mut title = fields.get(1).cloned().unwrap_or_default();
        let mut date = fields.get(2..).map(|rest| rest.join(", ")).unwrap_or_default();
        if date.is_empty() {
            date = fallback_date(&mut [&mut title, &mut company], line);
        }
        ExperienceEntry {
            company,
            title,
            date,
            responsibilities: Vec::new(),
        }
    }

    fn bullets_mut(&mut self) -> &mut Vec<String> {
        &mut self.responsibilities
    }

    fn bullets(&self) -> &[String] {
        &self.responsibilities
    }

    fn backfill(&mut self, line: &str) -> bool {
        backfill_scalar(&mut self.title, &mut self.date, line)
    }
}

impl SectionEntry for ProjectEntry {
    fn is_boundary(line: &str) -> bool {
        is_dated_record(line)
    }

    fn starts_after_break(line: &str) -> bool {
        line.contains(',')
    }

    fn from_boundary(line: &str) -> Self {
        let fields = split_fields(line);
        let mut name = fields.first().cloned().unwrap_or_default();
        let mut role = fields.get(1).cloned().unwrap_or_default();
        let mut date = fields.get(2..).map(|rest| rest.join(", ")).unwrap_or_default();
        if date.is_empty() {
            date = fallback_date(&mut [&mut role, &mut name], line);
        }
        ProjectEntry {
            name,
            role,
            date,
            description: Vec::new(),
        }
    }

    fn bullets_mut(&mut self) -> &mut Vec<String> {
        &mut self.description
    }

    fn bullets(&self) -> &[String] {
        &self.description
    }

    fn backfill(&mut self, line: &str) -> bool {
        backfill_scalar(&mut self.role, &mut self.date, line)
    }
}

impl SectionEntry for EducationEntry {
    fn is_boundary(line: &str) -> bool {
        ["University", "College", "School"]
            .iter()
            .any(|marker| line.contains(marker))
    }

    fn starts_after_break(_line: &str) -> bool {
        true
    }

    fn from_boundary(line: &str) -> Self {
        let fields = split_fields(line);
        let mut institution = fields.first().cloned().unwrap_or_default();
        let mut location = fields
            .get(1..)
            .map(|rest| {
                rest.iter()
                    .filter(|f| !f.is_empty())
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        let date = fallback_date(&mut [&mut location, &mut institution], line);
        EducationEntry {
            institution,
            location,
            degree: String::new(),
            date,
            details: Vec::new(),
        }
    }

    fn bullets_mut(&mut self) -> &mut Vec<String> {
        &mut self.details
    }

    fn bullets(&self) -> &[String] {
        &self.details
    }

    fn backfill(&mut self, line: &str) -> bool {
        backfill_scalar(&mut self.degree, &mut self.date, line)
    }
}
