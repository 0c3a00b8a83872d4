//! Compiled regex patterns shared by the detector and the field extractor.
//!
//! Patterns are compiled once into an immutable [`PatternLibrary`] that is
//! passed by reference into every component. [`DEFAULT_PATTERNS`] holds the
//! instance used by the crate-level convenience functions.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// CSS Selectors
// =============================================================================

/// Headings considered by the title and link chains.
pub const HEADING_SELECTOR: &str = "h1, h2, h3";

/// Any heading level, used for structural signatures and content scoring.
pub const ANY_HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Elements carrying a machine-readable or visible timestamp.
pub const TIME_SELECTOR: &str = "time, [datetime]";

// =============================================================================
// Raw pattern sources
// =============================================================================

/// Full month names, or a three-letter abbreviation ("Sept" too) ending at a
/// word boundary, so "Decision" or "Marketing" never read as months.
const MONTHS: &str = "(?:january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)\\b\\.?";

const ARTICLE_CLASS: &str = r"(?i)\b(?:article|post|entry|story|news-item|content-item)\b";
const ARTICLE_BOOST: &str = r"(?i)article|news-item";
const TITLE_CLASS: &str = r"(?i)title|headline|heading|header|h-title";
const DATE_CLASS: &str = r"(?i)date|time|published|posted|timestamp|datetime|pub-date|post-date";
const SUMMARY_CLASS: &str =
    r"(?i)summary|excerpt|description|desc|teaser|intro|blurb|snippet|standfirst";

/// Date literal patterns, most specific first. When two patterns match at the
/// same offset the earlier one wins.
fn date_literal_sources() -> Vec<String> {
    vec![
        // 2024-03-04, 2024/3/4, 2024.03.04
        r"\b\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2}\b".to_string(),
        // 03/04/2024, 3-4-24, 03.04.2024
        r"\b\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}\b".to_string(),
        // 3 March 2024, 3rd Mar. 2024
        format!(r"(?i)\b\d{{1,2}}(?:st|nd|rd|th)?\s+{MONTHS},?\s+\d{{4}}\b"),
        // March 3, 2024
        format!(r"(?i)\b{MONTHS}\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s+\d{{4}}\b"),
        // 3 March
        format!(r"(?i)\b\d{{1,2}}(?:st|nd|rd|th)?\s+{MONTHS}(?:\s|$|[,;])"),
        // March 3, March 2024
        format!(r"(?i)\b{MONTHS}\s+\d{{1,4}}\b"),
        r"(?i)\b(?:yesterday|today|tomorrow)\b".to_string(),
        r"(?i)\b\d+\s+(?:minute|min|hour|hr|day|week|month|year)s?\s+ago\b".to_string(),
    ]
}

// =============================================================================
// Pattern Library
// =============================================================================

/// Immutable set of compiled patterns.
///
/// Construct once and share by reference; it is `Send + Sync` and never
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    /// Word-boundary match for article-like class/id names.
    pub article_class: Regex,
    /// Literal tokens that boost a class/id match (`article`, `news-item`).
    pub article_boost: Regex,
    /// Class/id names of title elements.
    pub title_class: Regex,
    /// Class/id names of date elements.
    pub date_class: Regex,
    /// Class/id names of summary elements.
    pub summary_class: Regex,
    /// Date literals, most specific first.
    pub date_literals: Vec<Regex>,
    /// Runs of whitespace for normalization.
    pub whitespace: Regex,
}

impl PatternLibrary {
    /// Compile the full pattern set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            article_class: Regex::new(ARTICLE_CLASS).expect("ARTICLE_CLASS regex"),
            article_boost: Regex::new(ARTICLE_BOOST).expect("ARTICLE_BOOST regex"),
            title_class: Regex::new(TITLE_CLASS).expect("TITLE_CLASS regex"),
            date_class: Regex::new(DATE_CLASS).expect("DATE_CLASS regex"),
            summary_class: Regex::new(SUMMARY_CLASS).expect("SUMMARY_CLASS regex"),
            date_literals: date_literal_sources()
                .iter()
                .map(|src| Regex::new(src).expect("date literal regex"))
                .collect(),
            whitespace: Regex::new(r"\s+").expect("whitespace regex"),
        }
    }

    /// Whether any date literal occurs in `text`.
    #[must_use]
    pub fn is_date_like(&self, text: &str) -> bool {
        self.date_literals.iter().any(|re| re.is_match(text))
    }

    /// Find the first date literal in `text`.
    ///
    /// The leftmost match wins; at equal offsets the more specific pattern
    /// wins. The matched text is returned verbatim (trimmed of trailing
    /// separators).
    #[must_use]
    pub fn find_date<'t>(&self, text: &'t str) -> Option<&'t str> {
        let mut best: Option<regex::Match<'t>> = None;
        for re in &self.date_literals {
            if let Some(m) = re.find(text) {
                if best.is_none_or(|b| m.start() < b.start()) {
                    best = Some(m);
                }
            }
        }
        best.map(|m| m.as_str().trim_end_matches([',', ';']).trim())
    }

    /// Collapse whitespace runs to single spaces and trim.
    #[must_use]
    pub fn normalize_whitespace(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Pattern library used by the crate-level convenience functions.
pub static DEFAULT_PATTERNS: LazyLock<PatternLibrary> = LazyLock::new(PatternLibrary::new);
