//! Metadata extraction module.
//!
//! Builds a flat, read-only [`MetadataMap`] from the document head: `<title>`,
//! OpenGraph, Twitter Card, `article:*` and standard meta tags, the canonical
//! link, and JSON-LD blocks. Field chains use it as their page-level fallback.

pub mod json_ld;
pub mod meta_tags;

use std::collections::BTreeMap;

use dom_query::Document;
use serde::Serialize;
use serde_json::Value;

pub use json_ld::collect_json_ld;
pub use meta_tags::examine_meta;

/// Well-known metadata keys read by the field chains.
pub mod keys {
    pub const TITLE: &str = "title";
    pub const OG_TITLE: &str = "og_title";
    pub const DESCRIPTION: &str = "description";
    pub const OG_DESCRIPTION: &str = "og_description";
    pub const CANONICAL: &str = "canonical";
    pub const OG_URL: &str = "og_url";
    pub const PUBLISHED_TIME: &str = "published_time";
    pub const ARTICLE_PUBLISHED_TIME: &str = "article_published_time";
    pub const MODIFIED_TIME: &str = "modified_time";
    pub const HEADLINE: &str = "headline";
    pub const AUTHOR: &str = "author";
    pub const KEYWORDS: &str = "keywords";
}

/// Page-level metadata: string entries plus parsed JSON-LD blocks.
///
/// Entries keep the first value seen for a key. Iteration order is the key
/// order, so serialization is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataMap {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
    #[serde(rename = "jsonLd")]
    json_ld: Vec<Value>,
}

impl MetadataMap {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether `key` has a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Insert `value` under `key` unless the key is already set or the value
    /// is blank. Returns whether the value was stored.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        let key = key.into();
        if self.values.contains_key(&key) {
            return false;
        }
        self.values.insert(key, value.to_string());
        true
    }

    /// Parsed JSON-LD blocks in document order.
    #[must_use]
    pub fn json_ld(&self) -> &[Value] {
        &self.json_ld
    }

    /// Append a parsed JSON-LD block.
    pub fn push_json_ld(&mut self, value: Value) {
        self.json_ld.push(value);
    }

    /// Number of string entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no string entries and no JSON-LD blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.json_ld.is_empty()
    }

    /// String entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Extract all metadata from a document.
///
/// Meta tags are read first, then JSON-LD only fills keys that are still
/// missing.
#[must_use]
pub fn extract_metadata(doc: &Document) -> MetadataMap {
    let mut metadata = MetadataMap::new();

    meta_tags::examine_meta(doc, &mut metadata);
    json_ld::collect_json_ld(doc, &mut metadata);

    tracing::debug!(
        entries = metadata.len(),
        json_ld = metadata.json_ld().len(),
        "extracted page metadata"
    );

    metadata
}
