//! JSON-LD Metadata Parsing
//!
//! Every `<script type="application/ld+json">` body is parsed with
//! `serde_json` and kept in the metadata map. A malformed block is skipped on
//! its own without affecting the others. Article-typed objects (including
//! `@graph` members) also fill missing date, headline and description keys.

use dom_query::{Document, Selection};
use serde_json::{Map, Value};

use super::{keys, MetadataMap};
use crate::dom;

/// Parse all JSON-LD scripts of `doc` into `metadata`.
pub fn collect_json_ld(doc: &Document, metadata: &mut MetadataMap) {
    for script in doc.select(r#"script[type="application/ld+json"]"#).nodes() {
        let script_sel = Selection::from(*script);
        let json_text = dom::trimmed_text(&script_sel);

        if json_text.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(&json_text) {
            Ok(value) => metadata.push_json_ld(value),
            Err(err) => {
                tracing::debug!(%err, "skipping malformed JSON-LD block");
            }
        }
    }

    let mut articles = Vec::new();
    for value in metadata.json_ld() {
        collect_article_objects(value, 0, &mut articles);
    }

    for article in articles {
        fill_from_article(&article, metadata);
    }
}

/// Depth limit for walking nested JSON-LD.
const MAX_DEPTH: usize = 8;

/// Collect article-typed objects in document order.
fn collect_article_objects(value: &Value, depth: usize, out: &mut Vec<Map<String, Value>>) {
    if depth > MAX_DEPTH {
        return;
    }

    match value {
        Value::Object(map) => {
            if is_article_type(&schema_types(map)) {
                out.push(map.clone());
            }
            for child in map.values() {
                collect_article_objects(child, depth + 1, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_article_objects(item, depth + 1, out);
            }
        }
        _ => {}
    }
}

fn fill_from_article(article: &Map<String, Value>, metadata: &mut MetadataMap) {
    let fields = [
        ("datePublished", keys::PUBLISHED_TIME),
        ("dateModified", keys::MODIFIED_TIME),
        ("headline", keys::HEADLINE),
        ("description", keys::DESCRIPTION),
    ];

    for (property, key) in fields {
        if let Some(value) = single_string_value(article, property) {
            metadata.insert_if_absent(key, &value);
        }
    }
}

/// Lowercased `@type` values of a schema object.
fn schema_types(obj: &Map<String, Value>) -> Vec<String> {
    match obj.get("@type") {
        Some(Value::String(s)) => vec![s.to_lowercase()],
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        _ => Vec::new(),
    }
}

fn is_article_type(types: &[String]) -> bool {
    types.iter().any(|t| {
        matches!(
            t.as_str(),
            "article" | "newsarticle" | "blogposting" | "reportagenewsarticle" | "report"
                | "analysisnewsarticle" | "opinionnewsarticle" | "liveblogposting"
                | "techarticle" | "socialmediaposting"
        )
    })
}

/// First non-empty string under `key`, from a string or an array of strings.
fn single_string_value(data: &Map<String, Value>, key: &str) -> Option<String> {
    let value = data.get(key)?;

    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { None } else { Some(s.to_string()) }
        }
        Value::Array(arr) => arr
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    }
}
