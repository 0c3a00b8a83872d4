//! Class/ID pattern strategy.

use dom_query::Document;

use super::{derive_selector, warn_if_truncated};
use crate::dom;
use crate::patterns::PatternLibrary;
use crate::result::{Candidate, DetectionMethod};

const BASE_CONFIDENCE: f64 = 0.8;
const BOOSTED_CONFIDENCE: f64 = 0.85;
/// Penalty for a `div` with fewer than two element children.
const THIN_WRAPPER_PENALTY: f64 = 0.7;

/// Tags that never represent a news item even when their class matches
/// (e.g. WordPress `body.single-post`).
const SKIPPED_TAGS: &[&str] = &[
    "html", "head", "body", "script", "style", "link", "meta", "noscript", "template",
];

/// Propose elements whose `class` or `id` looks like an article container.
///
/// At most `limit` elements carrying a class or id are inspected.
#[must_use]
pub fn class_patterns<'a>(doc: &'a Document, patterns: &PatternLibrary, limit: usize) -> Vec<Candidate<'a>> {
    let elements = dom::select_all(doc, "[class], [id]");
    warn_if_truncated("class_patterns", elements.len(), limit);

    let mut out = Vec::new();

    for element in elements.into_iter().take(limit) {
        let tag = dom::tag_name(&element).unwrap_or_default();
        if SKIPPED_TAGS.contains(&tag.as_str()) {
            continue;
        }

        if !dom::class_or_id_matches(&element, &patterns.article_class) {
            continue;
        }

        let mut confidence = if dom::class_or_id_matches(&element, &patterns.article_boost) {
            BOOSTED_CONFIDENCE
        } else {
            BASE_CONFIDENCE
        };

        if tag == "div" && dom::element_children(&element).len() < 2 {
            confidence *= THIN_WRAPPER_PENALTY;
        }

        let selector = derive_selector(&element);
        out.push(Candidate::new(element, DetectionMethod::ClassPatterns, confidence, selector));
    }

    out
}
