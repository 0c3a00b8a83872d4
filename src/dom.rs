//! DOM Operations Adapter
//!
//! Typed read-only view over `dom_query` used by the detector and the field
//! chains: tag names, attributes, text, child and ancestor traversal, and
//! selector queries. Every function accepts a `Selection` and looks at its
//! first node.

use dom_query::NodeId;
use regex::Regex;

// Re-export core types for external use
pub use dom_query::{Document, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

// === Attribute Operations ===

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Whether the element's `class` or `id` matches `pattern`.
#[must_use]
pub fn class_or_id_matches(sel: &Selection, pattern: &Regex) -> bool {
    class_name(sel).is_some_and(|c| pattern.is_match(&c))
        || id(sel).is_some_and(|i| pattern.is_match(&i))
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Whether the element has the given (lowercase) tag name.
#[inline]
#[must_use]
pub fn is_tag(sel: &Selection, tag: &str) -> bool {
    tag_name(sel).is_some_and(|t| t == tag)
}

/// Identity of the first node, stable for the lifetime of the document.
#[inline]
#[must_use]
pub fn node_id(sel: &Selection) -> Option<NodeId> {
    sel.nodes().first().map(|n| n.id)
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Text content with surrounding whitespace removed.
#[must_use]
pub fn trimmed_text(sel: &Selection) -> String {
    text_content(sel).trim().to_string()
}

/// Character count of the trimmed text content.
#[must_use]
pub fn text_len(sel: &Selection) -> usize {
    text_content(sel).trim().chars().count()
}

// === Tree Navigation ===

/// Direct element children, one `Selection` per child.
#[must_use]
pub fn element_children<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.children()
        .nodes()
        .iter()
        .map(|n| Selection::from(*n))
        .collect()
}

/// Nearest ancestor (or `boundary` itself) with tag `tag`.
///
/// The walk starts at the parent of `sel` and stops after visiting
/// `boundary`, so nothing outside the boundary element is returned.
#[must_use]
pub fn closest_within<'a>(
    sel: &Selection<'a>,
    tag: &str,
    boundary: &Selection<'a>,
) -> Option<Selection<'a>> {
    let stop = node_id(boundary);
    let mut current = sel.parent();

    while current.exists() {
        if is_tag(&current, tag) {
            return Some(current);
        }
        if node_id(&current) == stop {
            break;
        }
        current = current.parent();
    }

    None
}

/// Whether `sel` lies strictly inside `ancestor`.
#[must_use]
pub fn is_inside(sel: &Selection, ancestor: &Selection) -> bool {
    let Some(target) = node_id(ancestor) else {
        return false;
    };
    let mut current = sel.parent();

    while current.exists() {
        if node_id(&current) == Some(target) {
            return true;
        }
        current = current.parent();
    }

    false
}

// === Querying ===

/// All descendants matching `selector`, one `Selection` per element,
/// in document order.
#[must_use]
pub fn query_all<'a>(sel: &Selection<'a>, selector: &str) -> Vec<Selection<'a>> {
    sel.select(selector)
        .nodes()
        .iter()
        .map(|n| Selection::from(*n))
        .collect()
}

/// First descendant matching `selector`.
#[must_use]
pub fn query_first<'a>(sel: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    sel.select(selector)
        .nodes()
        .first()
        .map(|n| Selection::from(*n))
}

/// Whether any descendant matches `selector`.
#[inline]
#[must_use]
pub fn has_descendant(sel: &Selection, selector: &str) -> bool {
    sel.select(selector).exists()
}

/// All elements of a document matching `selector`, in document order.
#[must_use]
pub fn select_all<'a>(doc: &'a Document, selector: &str) -> Vec<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .iter()
        .map(|n| Selection::from(*n))
        .collect()
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_attributes() {
        let doc = parse(r#"<div id="main" class="container wide">content</div>"#);
        let div = doc.select("div");

        assert_eq!(id(&div), Some("main".to_string()));
        assert_eq!(class_name(&div), Some("container wide".to_string()));
        assert_eq!(tag_name(&div), Some("div".to_string()));
        assert!(is_tag(&div, "div"));
    }

    #[test]
    fn test_is_inside() {
        let doc = parse(r#"<div id="outer"><div id="inner"><p>text</p></div></div><p id="other">x</p>"#);
        let outer = doc.select("#outer");
        let inner = doc.select("#inner");
        let other = doc.select("#other");

        assert!(is_inside(&inner, &outer));
        assert!(!is_inside(&outer, &inner));
        assert!(!is_inside(&outer, &outer));
        assert!(!is_inside(&other, &outer));
    }

    #[test]
    fn test_text_helpers() {
        let doc = parse("<p>  héllo world  </p>");
        let p = doc.select("p");

        assert_eq!(trimmed_text(&p), "héllo world");
        assert_eq!(text_len(&p), 11);
    }

    #[test]
    fn test_element_children_skips_text_nodes() {
        let doc = parse("<ul>text<li>a</li> <li>b</li><li>c</li></ul>");
        let ul = doc.select("ul");

        assert_eq!(element_children(&ul).len(), 3);
    }

    #[test]
    fn test_closest_within_respects_boundary() {
        let doc = parse(
            r#"<div id="box"><a id="inner"><h2>Title</h2></a></div>"#,
        );
        let heading = doc.select("h2");
        let boxed = doc.select("#box");

        let found = closest_within(&heading, "a", &boxed);
        assert_eq!(found.as_ref().and_then(id), Some("inner".to_string()));

        let doc = parse(r#"<a id="outer"><div id="box"><h2>Title</h2></div></a>"#);
        let heading = doc.select("h2");
        let boxed = doc.select("#box");
        assert!(closest_within(&heading, "a", &boxed).is_none());
    }

    #[test]
    fn test_class_or_id_matches() {
        let re = crate::patterns::PatternLibrary::new().summary_class;
        let doc = parse(r#"<p id="Summary">x</p><p class="other">y</p>"#);

        assert!(class_or_id_matches(&doc.select("#Summary"), &re));
        assert!(!class_or_id_matches(&doc.select(".other"), &re));
    }

    #[test]
    fn test_query_helpers() {
        let doc = parse("<div><span>a</span><span>b</span></div>");
        let div = doc.select("div");

        assert_eq!(query_all(&div, "span").len(), 2);
        assert_eq!(query_first(&div, "span").map(|s| trimmed_text(&s)), Some("a".to_string()));
        assert!(has_descendant(&div, "span"));
        assert!(!has_descendant(&div, "img"));
    }
}
