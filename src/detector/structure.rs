//! DOM-structure repetition strategy.
//!
//! Listing pages repeat the same item shape: a container holding several
//! siblings that each carry a heading, usually a link and an image. Children
//! are grouped by a structural signature and every large enough group with a
//! heading is proposed.

use std::collections::HashMap;

use dom_query::{Document, Selection};

use super::{derive_selector, warn_if_truncated};
use crate::dom;
use crate::patterns::ANY_HEADING_SELECTOR;
use crate::result::{Candidate, DetectionMethod};

/// Confidence of every member of a repeated group.
pub const REPEATED_ITEM_CONFIDENCE: f64 = 0.75;

/// Minimum element children of a container, and minimum group size.
const MIN_REPEAT: usize = 3;

const HEADING: &str = "heading";

/// Structural label of an element: which of heading, image, link and text it
/// contains, joined with `+`.
#[must_use]
pub fn signature(element: &Selection) -> String {
    let mut features: Vec<&str> = Vec::with_capacity(4);

    if dom::has_descendant(element, ANY_HEADING_SELECTOR) {
        features.push(HEADING);
    }
    if dom::has_descendant(element, "img") {
        features.push("image");
    }
    if dom::has_descendant(element, "a") {
        features.push("link");
    }
    if dom::text_len(element) > 0 {
        features.push("text");
    }

    if features.is_empty() {
        "empty".to_string()
    } else {
        features.join("+")
    }
}

/// Propose members of repeated sibling groups.
///
/// At most `limit` containers are inspected.
#[must_use]
pub fn dom_structure(doc: &Document, limit: usize) -> Vec<Candidate<'_>> {
    let containers = dom::select_all(doc, "div, section, main");
    warn_if_truncated("dom_structure", containers.len(), limit);

    let mut out = Vec::new();

    for container in containers.into_iter().take(limit) {
        let children = dom::element_children(&container);
        if children.len() < MIN_REPEAT {
            continue;
        }

        // Signature -> members, in first-seen order.
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<Selection>> = HashMap::new();

        for child in children {
            let sig = signature(&child);
            if !groups.contains_key(&sig) {
                order.push(sig.clone());
            }
            groups.entry(sig).or_default().push(child);
        }

        for sig in order {
            if !sig.split('+').any(|f| f == HEADING) {
                continue;
            }
            let Some(members) = groups.remove(&sig) else {
                continue;
            };
            if members.len() < MIN_REPEAT {
                continue;
            }

            tracing::trace!(signature = %sig, size = members.len(), "repeated item group");

            for member in members {
                let selector = derive_selector(&member);
                out.push(Candidate::new(
                    member,
                    DetectionMethod::DomStructure,
                    REPEATED_ITEM_CONFIDENCE,
                    selector,
                ));
            }
        }
    }

    out
}
