// Resume optimization engine.
// Implements: keyword extraction, JD parsing, relevance scoring, content selection,
// tailoring, ATS scoring and the end-to-end optimization pipeline.
// Everything below handlers.rs is synchronous and pure over its inputs.

pub mod content_selector;
pub mod fit_scoring;
pub mod generator;
pub mod handlers;
pub mod jd_parser;
pub mod keywords;
pub mod relevance;
pub mod tailor;
pub mod tech_terms;
