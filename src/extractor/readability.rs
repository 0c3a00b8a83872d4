//! Readability Fallback
//!
//! Whole-document, single-article extraction through `dom_smoothie` for pages
//! where no candidate yielded a usable record. The algorithm finds no publish
//! date, so the date field is always empty.
//!
//! Requires the `readability` feature; without it [`readability_record`]
//! always returns `None`.

use tracing::debug;

use crate::error::Result;
use crate::patterns::PatternLibrary;
use crate::result::ArticleRecord;

#[cfg(feature = "readability")]
const TITLE_CONFIDENCE: f64 = 0.8;
#[cfg(feature = "readability")]
const SUMMARY_CONFIDENCE: f64 = 0.7;
#[cfg(feature = "readability")]
const PAGE_URL_CONFIDENCE: f64 = 1.0;

/// Run the readability algorithm over `html` and build a single record.
///
/// The record's link is `page_url` itself. Any failure (unusable page URL,
/// too many elements, nothing extractable) yields `None`.
#[must_use]
pub fn readability_record(
    html: &str,
    page_url: &str,
    max_elements: usize,
    patterns: &PatternLibrary,
) -> Option<ArticleRecord> {
    match run(html, page_url, max_elements, patterns) {
        Ok(record) => Some(record),
        Err(err) => {
            debug!(%err, "readability fallback produced no record");
            None
        }
    }
}

#[cfg(feature = "readability")]
fn run(html: &str, page_url: &str, max_elements: usize, patterns: &PatternLibrary) -> Result<ArticleRecord> {
    use dom_smoothie::{Config, Readability};

    use super::summary::{excerpt, EXCERPT_CHARS};
    use crate::error::Error;
    use crate::result::FieldResult;
    use crate::url_utils::parse_base;

    let page = parse_base(page_url)?;

    let cfg = Config {
        max_elements_to_parse: max_elements,
        ..Default::default()
    };

    let mut reader = Readability::new(html, Some(page.as_str()), Some(cfg))
        .map_err(|e| Error::Readability(e.to_string()))?;
    let article = reader.parse().map_err(|e| Error::Readability(e.to_string()))?;

    let title = patterns.normalize_whitespace(&article.title);
    let text = patterns.normalize_whitespace(&article.text_content);
    let summary = article
        .excerpt
        .as_deref()
        .map(|e| patterns.normalize_whitespace(e))
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| excerpt(&text, EXCERPT_CHARS));

    if title.is_empty() && summary.is_empty() {
        return Err(Error::NoContent);
    }

    debug!(title_len = title.len(), text_len = text.len(), "readability article parsed");

    Ok(ArticleRecord::from_fields(
        FieldResult::found(title, TITLE_CONFIDENCE, "readability"),
        FieldResult::found(page.as_str(), PAGE_URL_CONFIDENCE, "page-url"),
        FieldResult::none(),
        FieldResult::found(summary, SUMMARY_CONFIDENCE, "readability"),
    ))
}

#[cfg(not(feature = "readability"))]
fn run(_html: &str, _page_url: &str, _max_elements: usize, _patterns: &PatternLibrary) -> Result<ArticleRecord> {
    Err(crate::error::Error::Readability(
        "built without the `readability` feature".to_string(),
    ))
}
