//! Technical-term matcher: curated vocabulary plus a proper-noun/acronym heuristic.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Curated technology, tool and domain vocabulary, in display casing.
/// Matched case-insensitively as substrings, so no entry is shorter than three characters.
const TECH_VOCABULARY: &[&str] = &[
    // Languages
    "JavaScript", "TypeScript", "Python", "Java", "Kotlin", "Swift", "Objective-C", "Rust",
    "Golang", "Ruby", "PHP", "C++", "Solidity", "SQL", "HTML", "CSS", "Sass", "Bash",
    "GraphQL", "Haskell", "Elixir",
    // Frontend
    "React", "React Native", "Redux", "Next.js", "Vue", "Angular", "Svelte", "Tailwind",
    "Webpack", "jQuery", "Bootstrap", "Storybook",
    // Backend
    "Node.js", "Express.js", "Django", "Flask", "FastAPI", "Spring Boot", "Ruby on Rails",
    "Laravel", ".NET", "RESTful", "gRPC", "Microservices", "Kafka", "RabbitMQ",
    // Data stores
    "PostgreSQL", "MySQL", "MongoDB", "Redis", "DynamoDB", "Elasticsearch", "Firebase",
    "SQLite", "Cassandra", "Snowflake", "BigQuery",
    // Cloud & DevOps
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Terraform", "Ansible", "Jenkins",
    "GitHub", "GitLab", "GitHub Actions", "CI/CD", "Linux", "Nginx", "Heroku", "Vercel",
    "Prometheus", "Grafana",
    // Mobile
    "iOS", "Android", "SwiftUI", "Flutter", "Xcode", "Jetpack Compose",
    // Data & ML
    "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "Pandas", "NumPy",
    "scikit-learn", "Apache Spark", "Hadoop", "Airflow", "Tableau", "Power BI",
    "Microsoft Excel", "Data Analytics", "Statistics", "NLP",
    // Blockchain
    "Blockchain", "Ethereum", "Smart Contracts", "Web3", "DeFi", "NFT", "Hardhat", "OpenZeppelin",
    // Design & product
    "Figma", "Adobe XD", "UI/UX", "Prototyping", "Jira", "Agile", "Scrum",
    // Tooling
    "Bitbucket", "Postman", "Jest", "Cypress", "Selenium", "Mocha",
];

/// Leading capital followed by letters/digits, which also covers all-caps acronyms (≥ 2 chars).
static PROPER_NOUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][A-Za-z0-9]+\b").expect("valid proper-noun regex"));

/// Returns vocabulary hits plus capitalized/acronym tokens, lower-cased and deduplicated.
pub fn extract_technical_keywords(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();

    let mut terms: BTreeSet<String> = TECH_VOCABULARY
        .iter()
        .map(|term| term.to_lowercase())
        .filter(|term| lower.contains(term.as_str()))
        .collect();

    terms.extend(
        PROPER_NOUN_RE
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase()),
    );

    terms
}

/// Display casing for a vocabulary term given in any case. `None` for non-vocabulary terms.
pub fn vocabulary_display_name(term: &str) -> Option<&'static str> {
    TECH_VOCABULARY
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(term))
}

pub fn is_vocabulary_term(term: &str) -> bool {
    vocabulary_display_name(term).is_some()
}
