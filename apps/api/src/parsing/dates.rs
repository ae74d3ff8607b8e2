//! Date extraction and date-range parsing for free-form resume lines.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";
const DASH: &str = r"(?:\s*[-–—]\s*|\s+to\s+)";
const ONGOING: &str = r"(?:present|current)";

/// Extraction patterns in priority order: full month range, month-to-present,
/// year range, year-to-present, bare month-year.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(r"(?i)\b{MONTH}\s+\d{{4}}{DASH}{MONTH}\s+\d{{4}}\b"),
        format!(r"(?i)\b{MONTH}\s+\d{{4}}{DASH}{ONGOING}\b"),
        format!(r"(?i)\b\d{{4}}{DASH}\d{{4}}\b"),
        format!(r"(?i)\b\d{{4}}{DASH}{ONGOING}\b"),
        format!(r"(?i)\b{MONTH}\s+\d{{4}}\b"),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid date pattern"))
    .collect()
});

/// A month name followed by a year, a year range, or a dash used as a range separator.
static DATE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b{MONTH}\s+'?\d{{2,4}}\b|\b\d{{4}}{DASH}(?:\d{{4}}|{ONGOING})\b|\s[-–—]\s"
    ))
    .expect("valid date token pattern")
});

/// Optional month followed by a four-digit year.
static DATE_POINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:({MONTH})\s+)?((?:19|20)\d{{2}})\b"))
        .expect("valid date point pattern")
});

static ONGOING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\b{ONGOING}\b")).expect("valid ongoing pattern"));

/// Returns the first date expression found in `line`, trying patterns in priority order.
/// Empty string when nothing matches.
pub fn extract_date_from_line(line: &str) -> String {
    DATE_PATTERNS
        .iter()
        .find_map(|re| re.find(line))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// True when the line carries a token that usually marks an entry's date.
pub fn has_date_like_token(line: &str) -> bool {
    DATE_TOKEN_RE.is_match(line)
}

/// True when the whole line is a date expression, ignoring surrounding punctuation.
pub fn is_date_line(line: &str) -> bool {
    let date = extract_date_from_line(line);
    if date.is_empty() {
        return false;
    }
    line.replacen(&date, "", 1)
        .chars()
        .all(|c| !c.is_alphanumeric())
}

/// True when the date mentions "Present" or "Current".
pub fn is_ongoing(date: &str) -> bool {
    ONGOING_RE.is_match(date)
}

/// A parsed start/end pair. `end` is `None` for ongoing ranges ("Present", "Current").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// End date for ordering purposes; ongoing ranges sort after every dated one.
    pub fn sort_end(&self) -> NaiveDate {
        self.end.unwrap_or(NaiveDate::MAX)
    }
}

/// Parses a free-form date string into a range.
///
/// A lone date is treated as both start and end. Month-less years start in January
/// and end in December. Returns `None` when no year is present.
pub fn parse_date_range(date: &str) -> Option<DateRange> {
    let points: Vec<(Option<u32>, i32)> = DATE_POINT_RE
        .captures_iter(date)
        .filter_map(|caps| {
            let year = caps.get(2)?.as_str().parse::<i32>().ok()?;
            let month = caps.get(1).and_then(|m| month_number(m.as_str()));
            Some((month, year))
        })
        .collect();

    let (first_month, first_year) = *points.first()?;
    let start = NaiveDate::from_ymd_opt(first_year, first_month.unwrap_or(1), 1)?;

    let end = if is_ongoing(date) {
        None
    } else {
        let (last_month, last_year) = *points.last()?;
        Some(NaiveDate::from_ymd_opt(last_year, last_month.unwrap_or(12), 1)?)
    };

    Some(DateRange { start, end })
}

/// Whole months from `start` to `end`, never negative.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> f64 {
    let years = end.year() - start.year();
    let months = end.month() as i32 - start.month() as i32;
    let total = years * 12 + months;
    let day_frac = (end.day() as f64 - start.day() as f64) / 30.0;
    (total as f64 + day_frac).max(0.0)
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
