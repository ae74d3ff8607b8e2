//! Keyword extraction: tokenizes text, drops noise, and ranks salient terms by frequency.
//!
//! Two extractors share one tokenizer:
//! - `extract_keywords` stems every token so morphological variants collapse
//!   ("developing", "developed" → "develop"). Used for scoring.
//! - `extract_surface_keywords` keeps the lower-cased surface form. Used wherever a
//!   keyword is written back into resume prose, where a stem would read as a typo.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};

use crate::errors::{ensure_textual, PipelineError};

/// Maximum number of keywords returned by either extractor.
pub const KEYWORD_LIMIT: usize = 50;

const STAGE: &str = "keyword extraction";

/// Common English function words. Tokens of length ≤ 2 are dropped separately.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "is", "are", "in", "to", "for", "with", "of", "on",
    "at", "as", "by", "from", "this", "that", "these", "those", "will", "our", "you", "your",
    "we", "they", "their", "its", "was", "were", "has", "have", "had", "can", "not", "into",
    "who", "all", "any",
];

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Porter-family stem of a single lower-cased token.
pub fn stem(token: &str) -> String {
    STEMMER.stem(token).into_owned()
}

/// Lower-cases and splits on anything that is not a letter, digit or underscore, then
/// keeps tokens longer than two characters that are ASCII alphanumeric and not stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| {
            token.len() > 2
                && token.chars().all(|c| c.is_ascii_alphanumeric())
                && !is_stop_word(token)
        })
        .map(str::to_string)
        .collect()
}

/// Frequency-ranked, stemmed keywords (top `KEYWORD_LIMIT`).
///
/// Length and stop-word filters run again on the stems, since stemming can shorten a
/// token ("ies" → "ie") or land on a stop word ("ours" → "our").
/// Equal frequencies keep first-occurrence order.
pub fn extract_keywords(text: &str) -> Result<Vec<String>, PipelineError> {
    ensure_textual(STAGE, text)?;
    Ok(rank(
        tokenize(text)
            .into_iter()
            .map(|t| stem(&t))
            .filter(|s| s.len() > 2 && !is_stop_word(s)),
    ))
}

/// Frequency-ranked, unstemmed keywords (top `KEYWORD_LIMIT`).
pub fn extract_surface_keywords(text: &str) -> Result<Vec<String>, PipelineError> {
    ensure_textual(STAGE, text)?;
    Ok(rank(tokenize(text).into_iter()))
}

fn rank(tokens: impl Iterator<Item = String>) -> Vec<String> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, u32)> = Vec::new();

    for token in tokens {
        match positions.get(&token) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(token.clone(), counts.len());
                counts.push((token, 1));
            }
        }
    }

    // Stable sort: ties stay in first-occurrence order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(KEYWORD_LIMIT)
        .map(|(token, _)| token)
        .collect()
}
