//! Content heuristics strategy.

use dom_query::Document;

use super::{derive_selector, warn_if_truncated};
use crate::dom;
use crate::patterns::ANY_HEADING_SELECTOR;
use crate::result::{Candidate, DetectionMethod};

const MIN_TEXT: usize = 50;
const LONG_TEXT: usize = 200;

const BASE: f64 = 0.6;
const HEADING_BONUS: f64 = 0.10;
const IMAGE_BONUS: f64 = 0.10;
const LINK_BONUS: f64 = 0.05;
const LONG_TEXT_BONUS: f64 = 0.05;
/// A nested `<article>` is already proposed by the semantic strategy.
const NESTED_ARTICLE_PENALTY: f64 = 0.20;

/// Score `div`, `section` and `li` elements with at least 50 characters of
/// text.
///
/// At most `limit` elements are inspected.
#[must_use]
pub fn content_heuristics(doc: &Document, limit: usize) -> Vec<Candidate<'_>> {
    let elements = dom::select_all(doc, "div, section, li");
    warn_if_truncated("content_heuristics", elements.len(), limit);

    let mut out = Vec::new();

    for element in elements.into_iter().take(limit) {
        let text_len = dom::text_len(&element);
        if text_len < MIN_TEXT {
            continue;
        }

        let mut score = BASE;
        if dom::has_descendant(&element, ANY_HEADING_SELECTOR) {
            score += HEADING_BONUS;
        }
        if dom::has_descendant(&element, "img") {
            score += IMAGE_BONUS;
        }
        if dom::has_descendant(&element, "a") {
            score += LINK_BONUS;
        }
        if text_len > LONG_TEXT {
            score += LONG_TEXT_BONUS;
        }
        if dom::has_descendant(&element, "article") {
            score -= NESTED_ARTICLE_PENALTY;
        }

        let selector = derive_selector(&element);
        out.push(Candidate::new(element, DetectionMethod::ContentHeuristics, score, selector));
    }

    out
}
