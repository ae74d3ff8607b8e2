// Output side of the pipeline.
// `formatter` produces the canonical re-parseable text; renderers produce the
// human-facing document from the same structure.

pub mod formatter;
pub mod plain_text;

pub use formatter::format_resume_text;
pub use plain_text::PlainTextRenderer;

use crate::models::resume::ParsedResume;

/// One visual element of a rendered resume document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// The candidate's name.
    Title(String),
    /// Centered line under the title (contact details).
    Centered(String),
    /// Section heading, e.g. "EXPERIENCE".
    Heading(String),
    /// Entry heading, e.g. "Backend Engineer at Acme".
    Subheading(String),
    Paragraph(String),
    Bullet(String),
    Spacer,
}

/// A document backend. Implementations decide presentation only; content and
/// ordering come from [`document_blocks`].
pub trait DocumentRenderer: Send + Sync {
    /// Short backend name, used in logs and responses.
    fn name(&self) -> &'static str;

    fn render_blocks(&self, blocks: &[Block]) -> String;

    fn render(&self, resume: &ParsedResume) -> String {
        self.render_blocks(&document_blocks(resume))
    }
}

/// Walks the resume field by field in canonical section order, skipping empty
/// sections and empty sub-fields.
pub fn document_blocks(resume: &ParsedResume) -> Vec<Block> {
    let mut blocks = Vec::new();

    if !resume.header.trim().is_empty() {
        blocks.push(Block::Title(resume.header.trim().to_string()));
    }
    if !resume.contact_info.trim().is_empty() {
        blocks.push(Block::Centered(resume.contact_info.trim().to_string()));
    }

    if !resume.summary.trim().is_empty() {
        blocks.push(Block::Heading("PROFESSIONAL SUMMARY".to_string()));
        blocks.push(Block::Paragraph(resume.summary.trim().to_string()));
    }

    if !resume.skills.is_empty() {
        blocks.push(Block::Heading("SKILLS".to_string()));
        blocks.push(Block::Paragraph(resume.skills.join(" • ")));
    }

    if !resume.experience.is_empty() {
        blocks.push(Block::Heading("EXPERIENCE".to_string()));
        for job in &resume.experience {
            push_entry(
                &mut blocks,
                entry_heading(&job.title, &job.company),
                &job.date,
                &[],
                &job.responsibilities,
            );
        }
    }

    if !resume.projects.is_empty() {
        blocks.push(Block::Heading("PROJECTS".to_string()));
        for project in &resume.projects {
            push_entry(
                &mut blocks,
                entry_heading(&project.role, &project.name),
                &project.date,
                &[],
                &project.description,
            );
        }
    }

    if !resume.education.is_empty() {
        blocks.push(Block::Heading("EDUCATION".to_string()));
        for edu in &resume.education {
            push_entry(
                &mut blocks,
                edu.institution.trim().to_string(),
                &edu.date,
                &[edu.degree.as_str(), edu.location.as_str()],
                &edu.details,
            );
        }
    }

    for section in &resume.additional_sections {
        if section.content.trim().is_empty() {
            continue;
        }
        blocks.push(Block::Heading(section.title.trim().to_uppercase()));
        blocks.extend(
            section
                .content
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(|l| Block::Paragraph(l.trim().to_string())),
        );
    }

    blocks
}

/// "Title at Company", degrading to whichever half is present.
fn entry_heading(title: &str, org: &str) -> String {
    match (title.trim(), org.trim()) {
        ("", "") => String::new(),
        (title, "") => title.to_string(),
        ("", org) => org.to_string(),
        (title, org) => format!("{title} at {org}"),
    }
}

fn push_entry(
    blocks: &mut Vec<Block>,
    heading: String,
    date: &str,
    extra_lines: &[&str],
    bullets: &[String],
) {
    if !heading.is_empty() {
        blocks.push(Block::Subheading(heading));
    }
    for line in std::iter::once(date).chain(extra_lines.iter().copied()) {
        if !line.trim().is_empty() {
            blocks.push(Block::Paragraph(line.trim().to_string()));
        }
    }
    blocks.extend(
        bullets
            .iter()
            .filter(|b| !b.trim().is_empty())
            .map(|b| Block::Bullet(b.trim().to_string())),
    );
    blocks.push(Block::Spacer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{AdditionalSection, EducationEntry, ExperienceEntry};

    #[test]
    fn test_empty_resume_has_no_blocks() {
        assert!(document_blocks(&ParsedResume::default()).is_empty());
    }

    #[test]
    fn test_empty_subsections_are_skipped() {
        let resume = ParsedResume {
            header: "JANE DOE".to_string(),
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                title: "Engineer".to_string(),
                date: String::new(),
                responsibilities: vec!["".to_string(), "Built things".to_string()],
            }],
            additional_sections: vec![AdditionalSection {
                title: "Awards".to_string(),
                content: "  ".to_string(),
            }],
            ..Default::default()
        };
        let blocks = document_blocks(&resume);
        assert_eq!(
            blocks,
            vec![
                Block::Title("JANE DOE".to_string()),
                Block::Heading("EXPERIENCE".to_string()),
                Block::Subheading("Engineer at Acme".to_string()),
                Block::Bullet("Built things".to_string()),
                Block::Spacer,
            ]
        );
    }

    #[test]
    fn test_education_lists_degree_before_location() {
        let resume = ParsedResume {
            education: vec![EducationEntry {
                institution: "State University".to_string(),
                location: "Anytown".to_string(),
                degree: "BS Computer Science".to_string(),
                date: "2016 - 2020".to_string(),
                details: vec![],
            }],
            ..Default::default()
        };
        let blocks = document_blocks(&resume);
        let degree = blocks
            .iter()
            .position(|b| *b == Block::Paragraph("BS Computer Science".to_string()));
        let location = blocks
            .iter()
            .position(|b| *b == Block::Paragraph("Anytown".to_string()));
        assert!(degree < location, "degree should precede location: {blocks:?}");
    }

    #[test]
    fn test_entry_heading_fallbacks() {
        assert_eq!(entry_heading("Engineer", "Acme"), "Engineer at Acme");
        assert_eq!(entry_heading("", "Acme"), "Acme");
        assert_eq!(entry_heading("Engineer", " "), "Engineer");
        assert_eq!(entry_heading("", ""), "");
    }
}
