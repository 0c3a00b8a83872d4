//! Extraction pipeline.
//!
//! Parses the document once, builds the metadata map, ranks candidates and
//! turns them into records. Records missing a title or link, and repeated
//! links, are dropped according to [`Options`]. When nothing usable is left
//! the readability fallback gets the whole page.

use std::collections::{HashMap, HashSet};

use dom_query::NodeId;
use tracing::{debug, info, instrument, trace};

use crate::detector::{self, derive_selector};
use crate::dom::{self, Document, Selection};
use crate::extractor::{self, readability_record};
use crate::metadata;
use crate::options::Options;
use crate::patterns::PatternLibrary;
use crate::result::{ArticleRecord, Candidate, ExtractionReport};
use crate::url_utils;

/// Run the full pipeline over one page.
#[instrument(level = "debug", skip_all, fields(html_len = html.len()))]
pub(crate) fn extract_articles(
    html: &str,
    base_url: &str,
    options: &Options,
    patterns: &PatternLibrary,
) -> ExtractionReport {
    let document = Document::from(html);
    let metadata = metadata::extract_metadata(&document);
    let candidates = detector::detect_candidates(&document, patterns, options);

    let base = match url_utils::parse_base(base_url) {
        Ok(url) => Some(url),
        Err(err) => {
            debug!(%err, "base URL unusable, relative links will be dropped");
            None
        }
    };

    let mut visited: HashSet<NodeId> = HashSet::new();
    // link -> (index into `articles`, element that produced it)
    let mut seen_links: HashMap<String, (usize, Selection)> = HashMap::new();
    let mut articles: Vec<ArticleRecord> = Vec::new();

    'candidates: for candidate in &candidates {
        for element in elements_for(&document, candidate, options) {
            if options.max_items.is_some_and(|max| articles.len() >= max) {
                break 'candidates;
            }

            if let Some(id) = dom::node_id(&element) {
                if !visited.insert(id) {
                    continue;
                }
            }

            let record = extractor::extract_with_base(&element, &metadata, base.as_ref(), patterns);

            if options.require_title_and_link && !record.has_title_and_link() {
                trace!(selector = %candidate.selector, "dropping incomplete record");
                continue;
            }

            if options.deduplicate {
                if let Some(link) = record.link.clone() {
                    if let Some((index, owner)) = seen_links.get_mut(&link) {
                        if dom::is_inside(&element, owner) {
                            trace!(%link, "nested element replaces wrapper record");
                            articles[*index] = record;
                            *owner = element;
                        } else {
                            trace!(%link, "dropping duplicate link");
                        }
                        continue;
                    }
                    seen_links.insert(link, (articles.len(), element));
                }
            }

            articles.push(record);
        }
    }

    let candidates_found = candidates.len();

    if articles.is_empty() && options.use_readability_fallback && options.max_items != Some(0) {
        debug!(candidates_found, "no usable record, trying readability fallback");
        let fallback = readability_record(html, base_url, options.readability_max_elements, patterns)
            .filter(|record| !options.require_title_and_link || record.has_title_and_link());
        if let Some(record) = fallback {
            info!(candidates_found, "readability fallback produced a record");
            return ExtractionReport::new(vec![record], candidates_found, true);
        }
    }

    info!(candidates_found, records = articles.len(), "extraction finished");
    ExtractionReport::new(articles, candidates_found, false)
}

/// The candidate itself, followed by every other element with the same
/// derived selector when expansion is enabled.
fn elements_for<'a>(document: &'a Document, candidate: &Candidate<'a>, options: &Options) -> Vec<Selection<'a>> {
    let mut out = vec![candidate.element.clone()];
    if !options.expand_selector_matches {
        return out;
    }

    let Some(tag) = dom::tag_name(&candidate.element) else {
        return out;
    };
    let own = dom::node_id(&candidate.element);

    out.extend(
        dom::select_all(document, &tag)
            .into_iter()
            .take(options.max_scan_elements)
            .filter(|el| dom::node_id(el) != own)
            .filter(|el| derive_selector(el) == candidate.selector),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://news.example/";

    fn listing(count: usize) -> String {
        let cards: String = (1..=count)
            .map(|i| {
                format!(
                    r#"<article class="story"><h2><a href="/story/{i}">Story number {i} headline</a></h2>
                       <time datetime="2024-01-0{i}">Jan {i}</time>
                       <p>Summary paragraph for story number {i} with detail.</p></article>"#
                )
            })
            .collect();
        format!("<html><body><main>{cards}</main></body></html>")
    }

    #[test]
    fn test_listing_expands_to_all_cards() {
        let report = extract_articles(&listing(3), BASE, &Options::default(), &PatternLibrary::new());

        let links: Vec<&str> = report.articles.iter().filter_map(|a| a.link.as_deref()).collect();
        assert_eq!(
            links,
            vec![
                "https://news.example/story/1",
                "https://news.example/story/2",
                "https://news.example/story/3"
            ]
        );
        assert!(!report.used_readability);
        assert!((report.success_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_card_record_replaces_wrapper_record() {
        let html = r#"<html><body><div><div id="list">
            <div><h3><a href="/story/1">First story about the harbour works</a></h3>
                 <p>Crews started clearing the old quay wall this morning after weeks of planning.</p></div>
            <div><h3><a href="/story/2">Second story about the school board</a></h3>
                 <p>The board voted to extend the library hours for students during exam season.</p>
                 <time datetime="2024-05-02">Yesterday</time></div>
            <div><h3><a href="/story/3">Third story about the night market</a></h3>
                 <p>Stallholders say the new lighting has brought more visitors after dark.</p>
                 <time datetime="2024-05-03">Today</time></div>
        </div></div></body></html>"#;

        let report = extract_articles(html, BASE, &Options::default(), &PatternLibrary::new());

        let first = report
            .articles
            .iter()
            .find(|a| a.link.as_deref() == Some("https://news.example/story/1"));
        let Some(first) = first else {
            panic!("story 1 missing from {:?}", report.articles);
        };
        assert_eq!(first.date, None);
        assert_eq!(first.title.as_deref(), Some("First story about the harbour works"));

        let second = report
            .articles
            .iter()
            .find(|a| a.link.as_deref() == Some("https://news.example/story/2"));
        assert_eq!(second.and_then(|a| a.date.as_deref()), Some("2024-05-02"));
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn test_max_items_caps_records() {
        let options = Options {
            max_items: Some(2),
            ..Options::default()
        };
        let report = extract_articles(&listing(4), BASE, &options, &PatternLibrary::new());
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_without_expansion_one_record_per_selector() {
        let options = Options {
            expand_selector_matches: false,
            use_readability_fallback: false,
            ..Options::default()
        };
        let report = extract_articles(&listing(3), BASE, &options, &PatternLibrary::new());

        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_empty_page_without_fallback() {
        let options = Options {
            use_readability_fallback: false,
            ..Options::default()
        };
        let report = extract_articles("<html><body></body></html>", BASE, &options, &PatternLibrary::new());

        assert!(report.is_empty());
        assert_eq!(report.candidates_found, 0);
        assert_eq!(report.success_rate, 0.0);
    }

    #[test]
    fn test_zero_max_items_is_empty() {
        let options = Options {
            max_items: Some(0),
            ..Options::default()
        };
        let report = extract_articles(&listing(2), BASE, &options, &PatternLibrary::new());
        assert!(report.is_empty());
        assert!(!report.used_readability);
    }
}
