//! Date chain.
//!
//! Values are returned as written on the page. `datetime` attributes must
//! parse as a date before they are trusted; nothing is normalized to a
//! timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::chain::{FieldContext, Gate, Step};
use crate::dom;
use crate::metadata::keys;
use crate::patterns::TIME_SELECTOR;
use crate::result::FieldResult;

/// Date-class elements with longer text are wrappers, not date labels.
const MAX_DATE_LABEL: usize = 100;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub const STEPS: &[Step] = &[
    Step::new(Gate::Always, from_time_element),
    Step::new(Gate::Missing, from_date_pattern),
    Step::new(Gate::Missing, from_text_scan),
    Step::new(Gate::Missing, from_metadata),
];

/// Whether `value` parses as an RFC 3339, RFC 2822 or ISO 8601 date or
/// date-time.
#[must_use]
pub fn is_machine_date(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }

    DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_rfc2822(value).is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NAIVE_DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
}

fn from_time_element(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    for el in dom::query_all(ctx.element, TIME_SELECTOR) {
        if let Some(attr) = dom::get_attribute(&el, "datetime") {
            if is_machine_date(&attr) {
                return Some(FieldResult::found(attr.trim(), 0.95, "datetime-attribute"));
            }
        }

        let text = ctx.text_of(&el);
        if ctx.patterns.is_date_like(&text) {
            return Some(FieldResult::found(text, 0.85, "time-text"));
        }
    }

    None
}

fn from_date_pattern(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    dom::query_all(ctx.element, "[class], [id]")
        .into_iter()
        .filter(|el| dom::class_or_id_matches(el, &ctx.patterns.date_class))
        .map(|el| ctx.text_of(&el))
        .find(|text| text.chars().count() <= MAX_DATE_LABEL && ctx.patterns.is_date_like(text))
        .map(|text| FieldResult::found(text, 0.8, "date-pattern"))
}

fn from_text_scan(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    let text = ctx.text_of(ctx.element);
    ctx.patterns
        .find_date(&text)
        .map(|date| FieldResult::found(date, 0.7, "text-scan"))
}

fn from_metadata(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    const KEYS: [(&str, f64, &str); 3] = [
        (keys::PUBLISHED_TIME, 0.85, "metadata-published-time"),
        (keys::ARTICLE_PUBLISHED_TIME, 0.85, "metadata-article-published-time"),
        (keys::MODIFIED_TIME, 0.8, "metadata-modified-time"),
    ];

    KEYS.iter()
        .find_map(|&(key, confidence, method)| ctx.meta(key).map(|v| FieldResult::found(v, confidence, method)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::chain::run_chain;
    use crate::metadata::MetadataMap;
    use crate::patterns::PatternLibrary;

    fn date_of(html: &str, metadata: &MetadataMap) -> FieldResult {
        let doc = dom::parse(html);
        let element = doc.select("#item");
        let patterns = PatternLibrary::new();
        let ctx = FieldContext {
            element: &element,
            metadata,
            base_url: None,
            patterns: &patterns,
        };
        run_chain("date", STEPS, &ctx)
    }

    #[test]
    fn test_machine_date_formats() {
        assert!(is_machine_date("2024-01-01"));
        assert!(is_machine_date("2024-01-01T08:30:00Z"));
        assert!(is_machine_date("2024-01-01T08:30:00+02:00"));
        assert!(is_machine_date("2024-01-01T08:30"));
        assert!(is_machine_date("Mon, 01 Jan 2024 08:30:00 +0000"));
        assert!(!is_machine_date("Jan 1"));
        assert!(!is_machine_date(""));
        assert!(!is_machine_date("2024-13-45"));
    }

    #[test]
    fn test_datetime_attribute() {
        let r = date_of(
            r#"<div id="item"><time datetime="2024-01-01">Jan 1</time></div>"#,
            &MetadataMap::new(),
        );

        assert_eq!(r.value.as_deref(), Some("2024-01-01"));
        assert_eq!(r.method, "datetime-attribute");
        assert_eq!(r.confidence, 0.95);
    }

    #[test]
    fn test_invalid_attribute_falls_back_to_text() {
        let r = date_of(
            r#"<div id="item"><time datetime="soon">March 3, 2024</time></div>"#,
            &MetadataMap::new(),
        );

        assert_eq!(r.value.as_deref(), Some("March 3, 2024"));
        assert_eq!(r.method, "time-text");
        assert_eq!(r.confidence, 0.85);
    }

    #[test]
    fn test_date_class_element() {
        let r = date_of(
            r#"<div id="item"><span class="post-date">Posted 2 days ago</span></div>"#,
            &MetadataMap::new(),
        );

        assert_eq!(r.value.as_deref(), Some("Posted 2 days ago"));
        assert_eq!(r.method, "date-pattern");
    }

    #[test]
    fn test_free_text_scan() {
        let r = date_of(
            r#"<div id="item"><p>Filed on 12 Sep 2023 from the capital.</p></div>"#,
            &MetadataMap::new(),
        );

        assert_eq!(r.value.as_deref(), Some("12 Sep 2023"));
        assert_eq!(r.method, "text-scan");
        assert_eq!(r.confidence, 0.7);
    }

    #[test]
    fn test_metadata_order() {
        let mut meta = MetadataMap::new();
        meta.insert_if_absent(keys::MODIFIED_TIME, "2024-02-02");
        meta.insert_if_absent(keys::ARTICLE_PUBLISHED_TIME, "2024-01-01");

        let r = date_of(r#"<div id="item"><p>No dates</p></div>"#, &meta);

        assert_eq!(r.value.as_deref(), Some("2024-01-01"));
        assert_eq!(r.method, "metadata-article-published-time");
    }

    #[test]
    fn test_no_date() {
        let r = date_of(r#"<div id="item"><p>Breaking News</p></div>"#, &MetadataMap::new());
        assert_eq!(r, FieldResult::none());
    }
}
