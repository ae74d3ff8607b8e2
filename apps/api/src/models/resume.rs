use serde::{Deserialize, Serialize};

/// Structured resume produced by the segmenter and consumed by every later stage.
///
/// Every field defaults to empty so partially-filled JSON bodies deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedResume {
    pub header: String,
    pub contact_info: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub education: Vec<EducationEntry>,
    pub additional_sections: Vec<AdditionalSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub company: String,
    pub title: String,
    pub date: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub name: String,
    pub role: String,
    pub date: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub institution: String,
    pub location: String,
    pub degree: String,
    pub date: String,
    pub details: Vec<String>,
}

/// A section the segmenter did not recognize, kept verbatim under its header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdditionalSection {
    pub title: String,
    pub content: String,
}

impl ExperienceEntry {
    /// All textual fields joined into one lower-cased blob for keyword matching.
    pub fn text_blob(&self) -> String {
        let mut parts = vec![self.company.as_str(), self.title.as_str(), self.date.as_str()];
        parts.extend(self.responsibilities.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }
}

impl ProjectEntry {
    pub fn text_blob(&self) -> String {
        let mut parts = vec![self.name.as_str(), self.role.as_str(), self.date.as_str()];
        parts.extend(self.description.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }
}

impl ParsedResume {
    /// True when no section carries any content beyond the header.
    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty()
            && self.skills.is_empty()
            && self.experience.is_empty()
            && self.projects.is_empty()
            && self.education.is_empty()
            && self.additional_sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"header": "JANE DOE", "skills": ["Rust"]}"#;
        let resume: ParsedResume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.header, "JANE DOE");
        assert_eq!(resume.skills, vec!["Rust".to_string()]);
        assert!(resume.experience.is_empty());
        assert!(resume.contact_info.is_empty());
    }

    #[test]
    fn test_wire_fields_are_camel_case() {
        let resume = ParsedResume {
            contact_info: "jane@example.com".to_string(),
            additional_sections: vec![AdditionalSection {
                title: "AWARDS".to_string(),
                content: "Hackathon winner".to_string(),
            }],
            ..Default::default()
        };
        let value = serde_json::to_value(&resume).unwrap();
        assert_eq!(value["contactInfo"], "jane@example.com");
        assert_eq!(value["additionalSections"][0]["title"], "AWARDS");
    }

    #[test]
    fn test_experience_blob_is_lowercase_and_complete() {
        let entry = ExperienceEntry {
            company: "Acme".to_string(),
            title: "Backend Engineer".to_string(),
            date: "Jan 2020 - Present".to_string(),
            responsibilities: vec!["Built APIs in Rust".to_string()],
        };
        let blob = entry.text_blob();
        assert!(blob.contains("acme"));
        assert!(blob.contains("built apis in rust"));
        assert!(blob.contains("present"));
    }

    #[test]
    fn test_is_empty_ignores_header() {
        let resume = ParsedResume {
            header: "JANE DOE".to_string(),
            ..Default::default()
        };
        assert!(resume.is_empty());
    }
}
