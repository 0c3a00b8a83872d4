//! Result types for detection and extraction output.
//!
//! Candidates borrow the parsed document for one pass; article records and
//! reports are owned and serializable.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use dom_query::Selection;
use serde::{Deserialize, Serialize};

/// Label used when a field chain produced nothing.
pub const METHOD_NONE: &str = "none";

/// Clamp a score into `[0, 1]`. NaN maps to 0.
#[inline]
#[must_use]
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Strategy that proposed a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DetectionMethod {
    /// `<article>` / `<section>` markup.
    #[serde(rename = "semanticHTML")]
    SemanticHtml,
    /// Article-like class or id names.
    #[serde(rename = "classPatterns")]
    ClassPatterns,
    /// Repeated sibling structure with headings.
    #[serde(rename = "domStructure")]
    DomStructure,
    /// Text, heading, image and link density scoring.
    #[serde(rename = "contentHeuristics")]
    ContentHeuristics,
    /// Whole-document readability fallback.
    #[serde(rename = "readability")]
    Readability,
}

impl DetectionMethod {
    /// Stable label, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SemanticHtml => "semanticHTML",
            Self::ClassPatterns => "classPatterns",
            Self::DomStructure => "domStructure",
            Self::ContentHeuristics => "contentHeuristics",
            Self::Readability => "readability",
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DOM subtree proposed as a single news item.
#[derive(Clone)]
pub struct Candidate<'a> {
    /// The proposed element.
    pub element: Selection<'a>,
    /// Strategy that produced it.
    pub method: DetectionMethod,
    /// Score in `[0, 1]`.
    pub confidence: f64,
    /// Deduplication key derived from tag, id and classes.
    pub selector: String,
}

impl<'a> Candidate<'a> {
    /// Build a candidate, clamping the confidence.
    #[must_use]
    pub fn new(element: Selection<'a>, method: DetectionMethod, confidence: f64, selector: String) -> Self {
        Self {
            element,
            method,
            confidence: clamp_confidence(confidence),
            selector,
        }
    }
}

impl fmt::Debug for Candidate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("selector", &self.selector)
            .field("method", &self.method)
            .field("confidence", &self.confidence)
            .finish_non_exhaustive()
    }
}

/// Outcome of one field chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldResult {
    /// Extracted value, `None` when no strategy produced one.
    pub value: Option<String>,
    /// Score in `[0, 1]`.
    pub confidence: f64,
    /// Label of the strategy that produced the value.
    pub method: &'static str,
}

impl FieldResult {
    /// A produced value. Empty or whitespace-only values count as absent.
    #[must_use]
    pub fn found(value: impl Into<String>, confidence: f64, method: &'static str) -> Self {
        let value = value.into();
        let value = value.trim();
        if value.is_empty() {
            return Self::none();
        }
        Self {
            value: Some(value.to_string()),
            confidence: clamp_confidence(confidence),
            method,
        }
    }

    /// No value: confidence 0 and method `"none"`.
    #[must_use]
    pub fn none() -> Self {
        Self {
            value: None,
            confidence: 0.0,
            method: METHOD_NONE,
        }
    }

    /// Whether a value is present.
    #[inline]
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.value.is_some()
    }
}

impl Default for FieldResult {
    fn default() -> Self {
        Self::none()
    }
}

/// Per-field confidences plus their mean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfidence {
    pub title: f64,
    pub link: f64,
    pub date: f64,
    pub summary: f64,
    /// Mean of the four field confidences.
    pub overall: f64,
}

/// Per-field strategy labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMethods {
    pub title: String,
    pub link: String,
    pub date: String,
    pub summary: String,
}

/// One extracted news item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: Option<String>,
    pub link: Option<String>,
    pub date: Option<String>,
    pub summary: Option<String>,
    pub confidence: FieldConfidence,
    pub methods: FieldMethods,
}

impl ArticleRecord {
    /// Assemble a record from the four field results.
    ///
    /// `confidence.overall` is always the arithmetic mean of the field
    /// confidences.
    #[must_use]
    pub fn from_fields(title: FieldResult, link: FieldResult, date: FieldResult, summary: FieldResult) -> Self {
        let overall = (title.confidence + link.confidence + date.confidence + summary.confidence) / 4.0;

        Self {
            confidence: FieldConfidence {
                title: title.confidence,
                link: link.confidence,
                date: date.confidence,
                summary: summary.confidence,
                overall: clamp_confidence(overall),
            },
            methods: FieldMethods {
                title: title.method.to_string(),
                link: link.method.to_string(),
                date: date.method.to_string(),
                summary: summary.method.to_string(),
            },
            title: title.value,
            link: link.value,
            date: date.value,
            summary: summary.value,
        }
    }

    /// Title and link are both present.
    #[must_use]
    pub fn has_title_and_link(&self) -> bool {
        self.title.is_some() && self.link.is_some()
    }

    /// All four fields are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.has_title_and_link() && self.date.is_some() && self.summary.is_some()
    }

    /// Field method labels, in title/link/date/summary order.
    #[must_use]
    pub fn method_labels(&self) -> [&str; 4] {
        [
            self.methods.title.as_str(),
            self.methods.link.as_str(),
            self.methods.date.as_str(),
            self.methods.summary.as_str(),
        ]
    }
}

/// Records extracted from one or more documents, plus aggregate statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    /// Kept records in rank order.
    pub articles: Vec<ArticleRecord>,
    /// Candidates returned by the combiner, before extraction.
    pub candidates_found: usize,
    /// Whether the readability fallback produced the records.
    pub used_readability: bool,
    /// Field method labels present in `articles`.
    pub methods_used: BTreeSet<String>,
    /// Share of records with all four fields present.
    pub success_rate: f64,
}

impl ExtractionReport {
    /// Build a report and compute its statistics.
    #[must_use]
    pub fn new(articles: Vec<ArticleRecord>, candidates_found: usize, used_readability: bool) -> Self {
        let mut report = Self {
            articles,
            candidates_found,
            used_readability,
            ..Self::default()
        };
        report.refresh_stats();
        report
    }

    /// Number of kept records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether no record was kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Append the records of another page, skipping links already present.
    ///
    /// Records without a link are always appended.
    pub fn merge(&mut self, other: ExtractionReport) {
        let mut seen: HashSet<String> = self.articles.iter().filter_map(|a| a.link.clone()).collect();

        for article in other.articles {
            if let Some(ref link) = article.link {
                if !seen.insert(link.clone()) {
                    continue;
                }
            }
            self.articles.push(article);
        }

        self.candidates_found += other.candidates_found;
        self.used_readability |= other.used_readability;
        self.refresh_stats();
    }

    /// Keep at most `max_items` records.
    pub fn truncate(&mut self, max_items: usize) {
        self.articles.truncate(max_items);
        self.refresh_stats();
    }

    fn refresh_stats(&mut self) {
        self.methods_used = self
            .articles
            .iter()
            .flat_map(ArticleRecord::method_labels)
            .filter(|m| *m != METHOD_NONE)
            .map(str::to_string)
            .collect();

        let complete = self.articles.iter().filter(|a| a.is_complete()).count();
        self.success_rate = if self.articles.is_empty() {
            0.0
        } else {
            complete as f64 / self.articles.len() as f64
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(link: &str, complete: bool) -> ArticleRecord {
        ArticleRecord::from_fields(
            FieldResult::found("A title long enough", 0.9, "heading"),
            FieldResult::found(link, 0.8, "first-anchor"),
            if complete {
                FieldResult::found("2024-01-01", 0.95, "datetime-attribute")
            } else {
                FieldResult::none()
            },
            FieldResult::found("Summary text", 0.7, "paragraph"),
        )
    }

    #[test]
    fn test_overall_is_mean() {
        let r = record("https://x.com/a", true);
        let expected = (0.9 + 0.8 + 0.95 + 0.7) / 4.0;
        assert!((r.confidence.overall - expected).abs() < 1e-12);
    }

    #[test]
    fn test_found_trims_and_treats_blank_as_none() {
        let r = FieldResult::found("   ", 0.9, "heading");
        assert_eq!(r, FieldResult::none());

        let r = FieldResult::found("  Title ", 1.4, "heading");
        assert_eq!(r.value.as_deref(), Some("Title"));
        assert_eq!(r.confidence, 1.0);
    }

    #[test]
    fn test_clamp_confidence() {
        assert_eq!(clamp_confidence(-0.2), 0.0);
        assert_eq!(clamp_confidence(1.2), 1.0);
        assert_eq!(clamp_confidence(f64::NAN), 0.0);
        assert_eq!(clamp_confidence(0.42), 0.42);
    }

    #[test]
    fn test_record_serializes_expected_shape() {
        let r = record("https://x.com/a", true);
        let json = serde_json::to_value(&r).unwrap_or_default();

        assert_eq!(json["link"], "https://x.com/a");
        assert_eq!(json["methods"]["date"], "datetime-attribute");
        assert!(json["confidence"]["overall"].is_f64());
    }

    #[test]
    fn test_detection_method_labels() {
        assert_eq!(DetectionMethod::SemanticHtml.to_string(), "semanticHTML");
        let json = serde_json::to_string(&DetectionMethod::DomStructure).unwrap_or_default();
        assert_eq!(json, "\"domStructure\"");
    }

    #[test]
    fn test_report_stats() {
        let report = ExtractionReport::new(
            vec![record("https://x.com/a", true), record("https://x.com/b", false)],
            4,
            false,
        );

        assert_eq!(report.len(), 2);
        assert!((report.success_rate - 0.5).abs() < f64::EPSILON);
        assert!(report.methods_used.contains("heading"));
        assert!(!report.methods_used.contains(METHOD_NONE));
    }

    #[test]
    fn test_report_merge_dedupes_by_link() {
        let mut first = ExtractionReport::new(vec![record("https://x.com/a", true)], 1, false);
        let second = ExtractionReport::new(
            vec![record("https://x.com/a", true), record("https://x.com/b", true)],
            2,
            false,
        );

        first.merge(second);

        assert_eq!(first.len(), 2);
        assert_eq!(first.candidates_found, 3);
        assert!((first.success_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_report_truncate() {
        let mut report = ExtractionReport::new(
            vec![record("https://x.com/a", true), record("https://x.com/b", false)],
            2,
            false,
        );
        report.truncate(1);
        assert_eq!(report.len(), 1);
        assert!((report.success_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_report_has_zero_success_rate() {
        let report = ExtractionReport::default();
        assert!(report.is_empty());
        assert_eq!(report.success_rate, 0.0);
    }
}
