//! Skills sub-parser: flattens delimiter-separated skill lines into one ordered list.

use crate::parsing::entries::{is_bullet_line, strip_bullet};

const SKILL_DELIMITERS: &[char] = &[',', ':', ';', '•', '|'];

/// Parses a skills section body.
///
/// Bulleted lines split on every delimiter. Plain lines with a colon drop the leading
/// category label ("Languages: Rust, Go" → ["Rust", "Go"]). Everything else splits whole.
pub fn parse_skills(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .flat_map(|line| {
            let text = if is_bullet_line(line) {
                strip_bullet(line)
            } else if let Some((_label, rest)) = line.split_once(':') {
                rest.to_string()
            } else {
                line.trim().to_string()
            };
            split_skills(&text)
        })
        .collect()
}

fn split_skills(text: &str) -> Vec<String> {
    text.split(SKILL_DELIMITERS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated_line() {
        assert_eq!(parse_skills(&["Python, SQL, React"]), vec!["Python", "SQL", "React"]);
    }

    #[test]
    fn test_category_label_dropped() {
        let skills = parse_skills(&["Languages: Rust; Go | TypeScript", "Tools: Git, Docker"]);
        assert_eq!(skills, vec!["Rust", "Go", "TypeScript", "Git", "Docker"]);
    }

    #[test]
    fn test_bulleted_line_splits_on_every_delimiter() {
        let skills = parse_skills(&["• Cloud: AWS, GCP"]);
        assert_eq!(skills, vec!["Cloud", "AWS", "GCP"]);
    }

    #[test]
    fn test_bullet_separated_inline_list() {
        let skills = parse_skills(&["Swift • Kotlin • Flutter"]);
        assert_eq!(skills, vec!["Swift", "Kotlin", "Flutter"]);
    }

    #[test]
    fn test_blank_lines_and_empty_fragments_dropped() {
        let skills = parse_skills(&["", "Rust,, ,Go", "   "]);
        assert_eq!(skills, vec!["Rust", "Go"]);
    }
}
