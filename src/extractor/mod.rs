//! Field Extractor
//!
//! Turns one candidate subtree into an [`ArticleRecord`] by running the
//! title, link, date and summary chains.
//!
//! # Module Structure
//!
//! - `chain`: gates, chain tables and the shared runner
//! - `title`, `link`, `date`, `summary`: the four field chains
//! - `readability`: whole-document fallback

pub mod chain;
pub mod date;
pub mod link;
pub mod readability;
pub mod summary;
pub mod title;

use dom_query::Selection;
use tracing::{debug, trace};
use url::Url;

use crate::metadata::MetadataMap;
use crate::patterns::PatternLibrary;
use crate::result::{clamp_confidence, ArticleRecord};
use crate::url_utils;

pub use chain::{run_chain, FieldContext, Gate, Step};
pub use readability::readability_record;

/// Multiplier for values shorter than the step's minimum length.
pub const SHORT_VALUE_PENALTY: f64 = 0.8;
/// Multiplier for values failing the step's format check.
pub const BAD_FORMAT_PENALTY: f64 = 0.7;

/// Shared confidence adjustment.
///
/// Applies [`SHORT_VALUE_PENALTY`] when `value` has fewer than `min_length`
/// characters, [`BAD_FORMAT_PENALTY`] when `format_ok` is false, then the
/// optional reliability multiplier, and clamps the result to `[0, 1]`.
#[must_use]
pub fn adjust_confidence(base: f64, value: &str, min_length: usize, format_ok: bool, reliability: Option<f64>) -> f64 {
    let mut confidence = base;

    if value.chars().count() < min_length {
        confidence *= SHORT_VALUE_PENALTY;
    }
    if !format_ok {
        confidence *= BAD_FORMAT_PENALTY;
    }
    if let Some(factor) = reliability {
        confidence *= factor;
    }

    clamp_confidence(confidence)
}

/// Extract a record from `element`, resolving links against `base_url`.
///
/// An unusable base URL only disables link resolution; the other fields are
/// still extracted.
#[must_use]
pub fn extract_article(
    element: &Selection,
    metadata: &MetadataMap,
    base_url: &str,
    patterns: &PatternLibrary,
) -> ArticleRecord {
    let base = match url_utils::parse_base(base_url) {
        Ok(url) => Some(url),
        Err(err) => {
            debug!(%err, "base URL unusable, links will not resolve");
            None
        }
    };

    extract_with_base(element, metadata, base.as_ref(), patterns)
}

/// Extract a record with an already parsed base URL.
#[must_use]
pub fn extract_with_base(
    element: &Selection,
    metadata: &MetadataMap,
    base_url: Option<&Url>,
    patterns: &PatternLibrary,
) -> ArticleRecord {
    let ctx = FieldContext {
        element,
        metadata,
        base_url,
        patterns,
    };

    let record = ArticleRecord::from_fields(
        run_chain("title", title::STEPS, &ctx),
        run_chain("link", link::STEPS, &ctx),
        run_chain("date", date::STEPS, &ctx),
        run_chain("summary", summary::STEPS, &ctx),
    );

    trace!(
        overall = record.confidence.overall,
        title = %record.methods.title,
        link = %record.methods.link,
        "extracted record"
    );

    record
}
