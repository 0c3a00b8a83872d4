//! Candidate detection.
//!
//! Four independent strategies propose elements that look like a single news
//! item. Their outputs are concatenated in a fixed order (semantic, class,
//! structure, content) and handed to the combiner.
//!
//! # Module Structure
//!
//! - `semantic`: `<article>` / `<section>` markup
//! - `class_patterns`: article-like class and id names
//! - `structure`: repeated sibling structure with headings
//! - `heuristics`: text, heading, image and link density scoring
//! - `combine`: selector deduplication and ranking

pub mod class_patterns;
pub mod combine;
pub mod heuristics;
pub mod semantic;
pub mod structure;

use dom_query::{Document, Selection};
use tracing::{debug, instrument};

use crate::dom;
use crate::patterns::PatternLibrary;
use crate::result::Candidate;
use crate::Options;

pub use class_patterns::class_patterns;
pub use combine::combine_candidates;
pub use heuristics::content_heuristics;
pub use semantic::semantic_html;
pub use structure::dom_structure;

/// Run all four strategies and combine their candidates.
///
/// The result holds at most one candidate per selector and is sorted by
/// descending confidence.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn detect_candidates<'a>(
    doc: &'a Document,
    patterns: &PatternLibrary,
    options: &Options,
) -> Vec<Candidate<'a>> {
    let limit = options.max_scan_elements;

    let semantic = semantic_html(doc);
    let class = class_patterns(doc, patterns, limit);
    let structure = dom_structure(doc, limit);
    let content = content_heuristics(doc, limit);

    debug!(
        semantic = semantic.len(),
        class = class.len(),
        structure = structure.len(),
        content = content.len(),
        "candidate strategies finished"
    );

    let combined = combine_candidates(
        semantic
            .into_iter()
            .chain(class)
            .chain(structure)
            .chain(content),
    );

    debug!(count = combined.len(), "combined candidates");
    combined
}

/// Deduplication key for an element.
///
/// The tag name always comes first, followed by `#id` when the element has
/// one, else every class token joined with `.`.
///
/// ```
/// use rs_news_extract::{detector::derive_selector, dom};
///
/// let doc = dom::parse(r#"<div class=" card  featured ">x</div><p id="lead">y</p>"#);
/// assert_eq!(derive_selector(&doc.select("div")), "div.card.featured");
/// assert_eq!(derive_selector(&doc.select("p")), "p#lead");
/// ```
#[must_use]
pub fn derive_selector(sel: &Selection) -> String {
    let tag = dom::tag_name(sel).unwrap_or_else(|| "*".to_string());

    if let Some(id) = dom::id(sel) {
        let id = id.trim();
        if !id.is_empty() {
            return format!("{tag}#{id}");
        }
    }

    let classes = dom::class_name(sel).unwrap_or_default();
    let tokens: Vec<&str> = classes.split_whitespace().collect();
    if tokens.is_empty() {
        tag
    } else {
        format!("{tag}.{}", tokens.join("."))
    }
}

/// Log when a strategy stopped at the element bound.
pub(crate) fn warn_if_truncated(strategy: &'static str, total: usize, limit: usize) {
    if total > limit {
        tracing::warn!(strategy, total, limit, "element scan truncated");
    }
}
