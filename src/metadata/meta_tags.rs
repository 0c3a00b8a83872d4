//! HTML Meta Tag Extraction
//!
//! Reads `<title>`, `<meta>` tags and `<link rel="canonical">` into the
//! metadata map. Prefixed vocabularies keep their namespace in the key:
//! `og:title` → `og_title`, `twitter:card` → `twitter_card`,
//! `article:published_time` → `article_published_time`.

use dom_query::{Document, Selection};

use super::{keys, MetadataMap};
use crate::dom;

/// Examine the document head and fill `metadata`.
///
/// The first occurrence of a key wins.
pub fn examine_meta(doc: &Document, metadata: &mut MetadataMap) {
    if let Some(title) = document_title(doc) {
        metadata.insert_if_absent(keys::TITLE, &title);
    }

    for node in doc.select("meta").nodes() {
        let meta = Selection::from(*node);

        let name = dom::get_attribute(&meta, "property")
            .or_else(|| dom::get_attribute(&meta, "name"))
            .or_else(|| dom::get_attribute(&meta, "itemprop"))
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        let content = dom::get_attribute(&meta, "content").unwrap_or_default();

        if name.is_empty() || content.trim().is_empty() {
            continue;
        }

        route_meta(&name, &content, metadata);
    }

    if let Some(canonical) = canonical_href(doc) {
        metadata.insert_if_absent(keys::CANONICAL, &canonical);
    }
}

/// Store one meta tag under its normalized key.
fn route_meta(name: &str, content: &str, metadata: &mut MetadataMap) {
    if let Some(rest) = name.strip_prefix("og:") {
        metadata.insert_if_absent(format!("og_{}", key_suffix(rest)), content);
        return;
    }

    if let Some(rest) = name.strip_prefix("twitter:") {
        metadata.insert_if_absent(format!("twitter_{}", key_suffix(rest)), content);
        return;
    }

    if let Some(rest) = name.strip_prefix("article:") {
        metadata.insert_if_absent(format!("article_{}", key_suffix(rest)), content);
        match rest {
            "published_time" => {
                metadata.insert_if_absent(keys::PUBLISHED_TIME, content);
            }
            "modified_time" => {
                metadata.insert_if_absent(keys::MODIFIED_TIME, content);
            }
            _ => {}
        }
        return;
    }

    match name {
        "description" => {
            metadata.insert_if_absent(keys::DESCRIPTION, content);
        }
        "author" => {
            metadata.insert_if_absent(keys::AUTHOR, content);
        }
        "keywords" | "news_keywords" => {
            metadata.insert_if_absent(keys::KEYWORDS, content);
        }
        "datepublished" | "pubdate" | "publish_date" => {
            metadata.insert_if_absent(keys::PUBLISHED_TIME, content);
        }
        "datemodified" => {
            metadata.insert_if_absent(keys::MODIFIED_TIME, content);
        }
        _ => {}
    }
}

fn key_suffix(rest: &str) -> String {
    rest.trim().replace([':', '.', '-'], "_")
}

/// Text of the head `<title>`, ignoring inline SVG titles in the body.
fn document_title(doc: &Document) -> Option<String> {
    let title = doc.select("head title");
    let title = if title.exists() { title } else { doc.select("title") };

    title
        .nodes()
        .first()
        .map(|n| dom::trimmed_text(&Selection::from(*n)))
        .filter(|t| !t.is_empty())
}

fn canonical_href(doc: &Document) -> Option<String> {
    doc.select("link[rel]")
        .nodes()
        .iter()
        .map(|n| Selection::from(*n))
        .find(|link| {
            dom::get_attribute(link, "rel")
                .is_some_and(|rel| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case("canonical")))
        })
        .and_then(|link| dom::get_attribute(&link, "href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}
