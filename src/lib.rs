//! # rs-news-extract
//!
//! Adaptive news item detection and extraction from arbitrary news-site HTML.
//!
//! Given a rendered HTML document and its URL, the library proposes DOM
//! subtrees that look like single news items, ranks them by confidence, and
//! extracts a title, link, publish date and summary from each one. No
//! per-site configuration is needed.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_news_extract::{extract_articles, Options};
//!
//! let html = r#"<html><body><main>
//!   <article><h2><a href="/x">A headline worth reading</a></h2>
//!   <time datetime="2024-01-01">Jan 1</time>
//!   <p>Some summary text over twenty chars.</p></article>
//! </main></body></html>"#;
//!
//! let report = extract_articles(html, "https://news.example/", &Options::default());
//! assert_eq!(report.articles[0].link.as_deref(), Some("https://news.example/x"));
//! ```
//!
//! ## Pipeline
//!
//! - **Metadata**: `<title>`, OpenGraph, Twitter Card, `article:*`, canonical
//!   link and JSON-LD
//! - **Detection**: semantic markup, class/id patterns, repeated structure and
//!   content heuristics, combined by selector and ranked
//! - **Field chains**: ordered fallbacks per field, each with a confidence
//! - **Readability fallback**: whole-page single article when detection finds
//!   nothing usable (feature `readability`, on by default)

mod error;
mod extract;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Candidate detection strategies and the result combiner.
pub mod detector;

/// Field chains and the readability fallback.
pub mod extractor;

/// Metadata extraction (meta tags, OpenGraph, JSON-LD).
pub mod metadata;

/// URL resolution and normalization.
pub mod url_utils;

use dom_query::{Document, Selection};

// Public API - re-exports
pub use error::{Error, Result};
pub use metadata::MetadataMap;
pub use options::Options;
pub use patterns::{PatternLibrary, DEFAULT_PATTERNS};
pub use result::{
    clamp_confidence, ArticleRecord, Candidate, DetectionMethod, ExtractionReport, FieldConfidence,
    FieldMethods, FieldResult, METHOD_NONE,
};

/// Detects candidate news items using the default patterns and options.
///
/// The result holds at most one candidate per selector, sorted by descending
/// confidence.
///
/// # Example
///
/// ```rust
/// use rs_news_extract::{detect_candidates, dom, DetectionMethod};
///
/// let doc = dom::parse("<main><article><h2>Title</h2></article></main>");
/// let candidates = detect_candidates(&doc);
/// assert_eq!(candidates[0].method, DetectionMethod::SemanticHtml);
/// assert_eq!(candidates[0].confidence, 0.95);
/// ```
#[must_use]
pub fn detect_candidates(doc: &Document) -> Vec<Candidate<'_>> {
    detector::detect_candidates(doc, &DEFAULT_PATTERNS, &Options::default())
}

/// Extracts one record from a candidate element.
#[must_use]
pub fn extract_article(element: &Selection, metadata: &MetadataMap, base_url: &str) -> ArticleRecord {
    extractor::extract_article(element, metadata, base_url, &DEFAULT_PATTERNS)
}

/// Runs the readability fallback over a whole page.
///
/// Returns `None` when the algorithm fails, when `page_url` is not an
/// absolute http(s) URL, or when the `readability` feature is disabled.
#[must_use]
pub fn extract_with_readability(html: &str, page_url: &str) -> Option<ArticleRecord> {
    let options = Options::default();
    extractor::readability_record(html, page_url, options.readability_max_elements, &DEFAULT_PATTERNS)
}

/// Extracts page-level metadata.
#[must_use]
pub fn extract_metadata(doc: &Document) -> MetadataMap {
    metadata::extract_metadata(doc)
}

/// Runs the full pipeline: detection, field extraction, completeness gate,
/// link deduplication and the readability fallback.
#[must_use]
pub fn extract_articles(html: &str, base_url: &str, options: &Options) -> ExtractionReport {
    extract::extract_articles(html, base_url, options, &DEFAULT_PATTERNS)
}

/// Extractor owning its pattern library and options.
///
/// # Example
///
/// ```rust
/// use rs_news_extract::{NewsExtractor, Options};
///
/// let extractor = NewsExtractor::new(Options {
///     max_items: Some(10),
///     ..Options::default()
/// });
/// let report = extractor.extract_articles("<html><body></body></html>", "https://news.example/");
/// assert!(report.len() <= 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewsExtractor {
    patterns: PatternLibrary,
    options: Options,
}

impl NewsExtractor {
    /// Creates an extractor with freshly compiled patterns.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            patterns: PatternLibrary::new(),
            options,
        }
    }

    /// Creates an extractor with a caller-supplied pattern library.
    #[must_use]
    pub fn with_patterns(patterns: PatternLibrary, options: Options) -> Self {
        Self { patterns, options }
    }

    /// The configured options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The pattern library in use.
    #[must_use]
    pub fn patterns(&self) -> &PatternLibrary {
        &self.patterns
    }

    /// See [`detect_candidates`].
    #[must_use]
    pub fn detect_candidates<'a>(&self, doc: &'a Document) -> Vec<Candidate<'a>> {
        detector::detect_candidates(doc, &self.patterns, &self.options)
    }

    /// See [`extract_article`].
    #[must_use]
    pub fn extract_article(&self, element: &Selection, metadata: &MetadataMap, base_url: &str) -> ArticleRecord {
        extractor::extract_article(element, metadata, base_url, &self.patterns)
    }

    /// See [`extract_with_readability`].
    #[must_use]
    pub fn extract_with_readability(&self, html: &str, page_url: &str) -> Option<ArticleRecord> {
        extractor::readability_record(html, page_url, self.options.readability_max_elements, &self.patterns)
    }

    /// See [`extract_articles`].
    #[must_use]
    pub fn extract_articles(&self, html: &str, base_url: &str) -> ExtractionReport {
        extract::extract_articles(html, base_url, &self.options, &self.patterns)
    }
}
