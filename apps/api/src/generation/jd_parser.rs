//! JD Parser: classifies the role and extracts keywords and technical terms from a raw job description.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::PipelineError;
use crate::generation::keywords::{extract_keywords, extract_surface_keywords};
use crate::generation::tech_terms::extract_technical_keywords;

/// Coarse job-function bucket. Weights relevance scoring and project thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleCategory {
    Frontend,
    Backend,
    Fullstack,
    Mobile,
    Devops,
    Data,
    Blockchain,
    Product,
    Design,
    #[default]
    General,
}

impl RoleCategory {
    /// Classification order. Earlier categories win ties.
    pub const RANKED: [RoleCategory; 9] = [
        RoleCategory::Frontend,
        RoleCategory::Backend,
        RoleCategory::Fullstack,
        RoleCategory::Mobile,
        RoleCategory::Devops,
        RoleCategory::Data,
        RoleCategory::Blockchain,
        RoleCategory::Product,
        RoleCategory::Design,
    ];

    /// Lower-cased keywords associated with the category, matched as substrings.
    /// `General` has none.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            RoleCategory::Frontend => &[
                "frontend", "front-end", "front end", "react", "vue", "angular", "javascript",
                "typescript", "css", "html", "user interface", "web",
            ],
            RoleCategory::Backend => &[
                "backend", "back-end", "back end", "api", "server", "database", "microservice",
                "node.js", "django", "flask", "java", "sql",
            ],
            RoleCategory::Fullstack => &[
                "fullstack", "full-stack", "full stack", "end-to-end", "frontend and backend",
                "mern", "mean stack",
            ],
            RoleCategory::Mobile => &[
                "mobile", "ios", "android", "swift", "kotlin", "react native", "flutter",
                "app store",
            ],
            RoleCategory::Devops => &[
                "devops", "infrastructure", "kubernetes", "docker", "ci/cd", "terraform", "aws",
                "cloud", "sre", "monitoring",
            ],
            RoleCategory::Data => &[
                "data scien", "data analy", "data engineer", "machine learning", "analytics",
                "statistics", "tableau", "pandas", "etl", "warehouse",
            ],
            RoleCategory::Blockchain => &[
                "blockchain", "solidity", "ethereum", "smart contract", "web3", "defi", "nft",
                "crypto",
            ],
            RoleCategory::Product => &[
                "product manager", "product management", "roadmap", "stakeholder",
                "user research", "requirements", "prioritiz", "go-to-market",
            ],
            RoleCategory::Design => &[
                "designer", "ux design", "ui/ux", "figma", "sketch", "prototyp", "wireframe",
                "user experience", "visual design",
            ],
            RoleCategory::General => &[],
        }
    }

    /// Categories whose projects must clear the stricter relevance threshold.
    pub fn is_project_heavy(&self) -> bool {
        matches!(
            self,
            RoleCategory::Blockchain | RoleCategory::Mobile | RoleCategory::Data | RoleCategory::Design
        )
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoleCategory::Frontend => "frontend",
            RoleCategory::Backend => "backend",
            RoleCategory::Fullstack => "fullstack",
            RoleCategory::Mobile => "mobile",
            RoleCategory::Devops => "devops",
            RoleCategory::Data => "data",
            RoleCategory::Blockchain => "blockchain",
            RoleCategory::Product => "product",
            RoleCategory::Design => "design",
            RoleCategory::General => "general",
        };
        f.write_str(name)
    }
}

/// Job-side analysis shared by every later pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedJD {
    /// Stemmed, frequency-ranked keywords. Used for scoring.
    pub keywords: Vec<String>,
    /// Unstemmed keywords in the same ranking. Used when writing keywords into prose.
    pub surface_keywords: Vec<String>,
    pub technical_terms: BTreeSet<String>,
    pub role: RoleCategory,
}

/// Runs keyword extraction, technical-term matching and role classification over a JD.
pub fn parse_jd(jd_text: &str) -> Result<ParsedJD, PipelineError> {
    Ok(ParsedJD {
        keywords: extract_keywords(jd_text)?,
        surface_keywords: extract_surface_keywords(jd_text)?,
        technical_terms: extract_technical_keywords(jd_text),
        role: determine_role_type(jd_text),
    })
}

/// Counts distinct category keywords present in the JD and returns the strict winner.
///
/// Ties go to the category listed first in `RoleCategory::RANKED`; no hits → `General`.
pub fn determine_role_type(job_description: &str) -> RoleCategory {
    let text = job_description.to_lowercase();

    let mut best = RoleCategory::General;
    let mut best_count = 0usize;

    for category in RoleCategory::RANKED {
        let count = count_keyword_hits(&text, category.keywords());
        if count > best_count {
            best = category;
            best_count = count;
        }
    }

    best
}

/// Number of keywords from `keywords` found in already-lower-cased `text`, each counted once.
pub fn count_keyword_hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| text.contains(*kw)).count()
}
