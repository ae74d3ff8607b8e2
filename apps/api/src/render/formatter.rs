//! Canonical text form of a `ParsedResume`, laid out so that `parse_resume` reads it back.

use crate::models::resume::ParsedResume;

/// Renders the resume as plain text in canonical section order.
///
/// Empty sections are omitted. Entries are written as one comma-separated heading
/// line followed by `•` bullets, with a blank line between entries. Heading fields keep
/// their positions even when empty, so every heading carries a comma.
pub fn format_resume_text(resume: &ParsedResume) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !resume.header.trim().is_empty() {
        lines.push(resume.header.trim().to_string());
    }
    if !resume.contact_info.trim().is_empty() {
        lines.push(resume.contact_info.trim().to_string());
    }

    if !resume.summary.trim().is_empty() {
        open_section(&mut lines, "SUMMARY");
        lines.push(resume.summary.trim().to_string());
    }

    if !resume.skills.is_empty() {
        open_section(&mut lines, "SKILLS");
        lines.push(resume.skills.join(", "));
    }

    if !resume.experience.is_empty() {
        open_section(&mut lines, "EXPERIENCE");
        for (i, job) in resume.experience.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            push_heading(&mut lines, &[&job.company, &job.title, &job.date]);
            push_bullets(&mut lines, &job.responsibilities);
        }
    }

    if !resume.projects.is_empty() {
        open_section(&mut lines, "PROJECTS");
        for (i, project) in resume.projects.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            push_heading(&mut lines, &[&project.name, &project.role, &project.date]);
            push_bullets(&mut lines, &project.description);
        }
    }

    if !resume.education.is_empty() {
        open_section(&mut lines, "EDUCATION");
        for (i, edu) in resume.education.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            push_heading(&mut lines, &[&edu.institution, &edu.location]);
            for scalar in [&edu.degree, &edu.date] {
                if !scalar.trim().is_empty() {
                    lines.push(scalar.trim().to_string());
                }
            }
            push_bullets(&mut lines, &edu.details);
        }
    }

    for section in &resume.additional_sections {
        open_section(&mut lines, &section.title.trim().to_uppercase());
        lines.extend(
            section
                .content
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(str::to_string),
        );
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn open_section(lines: &mut Vec<String>, title: &str) {
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(title.to_string());
}

/// Positional heading. Trailing empty fields leave their separators behind
/// ("Globex, Engineer,") so the line still opens an entry and never reads as a section header.
fn push_heading(lines: &mut Vec<String>, fields: &[&String]) {
    let heading = fields
        .iter()
        .map(|f| f.trim())
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(heading.trim_end().to_string());
}

fn push_bullets(lines: &mut Vec<String>, bullets: &[String]) {
    lines.extend(
        bullets
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .map(|b| format!("• {b}")),
    );
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::models::resume::{AdditionalSection, EducationEntry, ExperienceEntry, ProjectEntry};
    use crate::parsing::parse_resume;

    fn sample() -> ParsedResume {
        ParsedResume {
            header: "JANE DOE".to_string(),
            contact_info: "jane@example.com | 555-123-4567".to_string(),
            summary: "Backend engineer with eight years of experience. Ships reliable services."
                .to_string(),
            skills: vec!["Rust".to_string(), "PostgreSQL".to_string(), "Kafka".to_string()],
            experience: vec![
                ExperienceEntry {
                    company: "Acme Corp".to_string(),
                    title: "Senior Engineer".to_string(),
                    date: "Jan 2021 - Present".to_string(),
                    responsibilities: vec![
                        "Built the ledger service".to_string(),
                        "Led incident reviews".to_string(),
                    ],
                },
                ExperienceEntry {
                    company: "Globex".to_string(),
                    title: "Engineer".to_string(),
                    date: String::new(),
                    responsibilities: vec!["Maintained billing".to_string()],
                },
            ],
            projects: vec![ProjectEntry {
                name: "Chess Engine".to_string(),
                role: "Author".to_string(),
                date: "Mar 2022".to_string(),
                description: vec!["Bitboard move generation".to_string()],
            }],
            education: vec![
                EducationEntry {
                    institution: "State University".to_string(),
                    location: "Anytown".to_string(),
                    degree: "BS Computer Science".to_string(),
                    date: "2012 - 2016".to_string(),
                    details: vec!["Dean's list".to_string()],
                },
                EducationEntry {
                    institution: "Coding Bootcamp".to_string(),
                    location: String::new(),
                    degree: "Certificate".to_string(),
                    date: String::new(),
                    details: vec![],
                },
            ],
            additional_sections: vec![AdditionalSection {
                title: "AWARDS".to_string(),
                content: "Hackathon winner".to_string(),
            }],
        }
    }

    #[test]
    fn test_canonical_layout() {
        let resume = ParsedResume {
            header: "JOHN DOE".to_string(),
            skills: vec!["Python".to_string(), "SQL".to_string()],
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                title: "Engineer".to_string(),
                date: "2019 - 2021".to_string(),
                responsibilities: vec!["Wrote reports".to_string()],
            }],
            ..Default::default()
        };
        assert_eq!(
            format_resume_text(&resume),
            "JOHN DOE\n\nSKILLS\nPython, SQL\n\nEXPERIENCE\nAcme, Engineer, 2019 - 2021\n• Wrote reports\n"
        );
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let text = format_resume_text(&ParsedResume {
            header: "JOHN DOE".to_string(),
            ..Default::default()
        });
        assert_eq!(text, "JOHN DOE\n");
    }

    #[test]
    fn test_format_then_parse_round_trip() {
        let original = sample();
        let reparsed = parse_resume(&format_resume_text(&original)).unwrap();

        assert_eq!(reparsed.header, original.header);
        assert_eq!(reparsed.contact_info, original.contact_info);
        assert_eq!(reparsed.summary, original.summary);
        assert_eq!(
            reparsed.skills.iter().collect::<BTreeSet<_>>(),
            original.skills.iter().collect::<BTreeSet<_>>()
        );
        assert_eq!(reparsed.experience.len(), original.experience.len());
        assert_eq!(reparsed.projects.len(), original.projects.len());
        assert_eq!(reparsed.education.len(), original.education.len());
        assert_eq!(reparsed.additional_sections, original.additional_sections);
    }

    #[test]
    fn test_headings_keep_empty_positions() {
        let resume = ParsedResume {
            experience: vec![
                ExperienceEntry {
                    company: "Globex".to_string(),
                    title: "Engineer".to_string(),
                    ..Default::default()
                },
                ExperienceEntry {
                    title: "Contractor".to_string(),
                    date: "2018".to_string(),
                    ..Default::default()
                },
            ],
            education: vec![EducationEntry {
                institution: "Coding Bootcamp".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(
            format_resume_text(&resume),
            "EXPERIENCE\nGlobex, Engineer,\n\n, Contractor, 2018\n\nEDUCATION\nCoding Bootcamp,\n"
        );
    }

    #[test]
    fn test_round_trip_keeps_untitled_and_all_caps_entries() {
        let mut original = sample();
        original.experience.insert(
            1,
            ExperienceEntry {
                responsibilities: vec!["Volunteered at the food bank".to_string()],
                ..Default::default()
            },
        );
        original.experience.push(ExperienceEntry {
            company: "NASA".to_string(),
            responsibilities: vec!["Tested flight software".to_string()],
            ..Default::default()
        });
        original.education.push(EducationEntry {
            institution: "MIT".to_string(),
            ..Default::default()
        });

        let reparsed = parse_resume(&format_resume_text(&original)).unwrap();

        assert_eq!(
            reparsed.experience.len(),
            original.experience.len(),
            "every experience entry survives the round trip"
        );
        assert!(reparsed.experience[1].company.is_empty());
        assert_eq!(
            reparsed.experience[1].responsibilities,
            vec!["Volunteered at the food bank"],
            "untitled entry keeps its own bullets"
        );
        assert_eq!(reparsed.experience[2].company, "Globex");
        assert_eq!(reparsed.experience[3].company, "NASA");
        assert_eq!(reparsed.experience[3].responsibilities, vec!["Tested flight software"]);
        assert_eq!(reparsed.education.len(), original.education.len());
        assert_eq!(reparsed.education[2].institution, "MIT");
        assert_eq!(
            reparsed.additional_sections, original.additional_sections,
            "no entry heading is promoted to a section"
        );
    }

    #[test]
    fn test_round_trip_preserves_entry_fields() {
        let reparsed = parse_resume(&format_resume_text(&sample())).unwrap();
        assert_eq!(reparsed.experience[0], sample().experience[0]);
        assert_eq!(reparsed.experience[1].company, "Globex");
        assert_eq!(reparsed.experience[1].title, "Engineer");
        assert_eq!(reparsed.projects[0], sample().projects[0]);
        assert_eq!(reparsed.education[0], sample().education[0]);
        assert_eq!(reparsed.education[1].degree, "Certificate");
    }
}
