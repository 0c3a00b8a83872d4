//! Result combiner: selector deduplication and confidence ranking.

use std::collections::HashMap;

use crate::result::Candidate;

/// Deduplicate candidates by selector and rank them.
///
/// For a repeated selector only a strictly higher confidence replaces the
/// kept entry, and the replacement takes the original slot. The output is
/// sorted by descending confidence; ties keep insertion order.
#[must_use]
pub fn combine_candidates<'a, I>(candidates: I) -> Vec<Candidate<'a>>
where
    I: IntoIterator<Item = Candidate<'a>>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<Candidate<'a>> = Vec::new();

    for candidate in candidates {
        match index.get(&candidate.selector) {
            Some(&slot) => {
                if candidate.confidence > kept[slot].confidence {
                    kept[slot] = candidate;
                }
            }
            None => {
                index.insert(candidate.selector.clone(), kept.len());
                kept.push(candidate);
            }
        }
    }

    // `sort_by` is stable.
    kept.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    kept
}
