//! Title chain.

use super::adjust_confidence;
use super::chain::{FieldContext, Gate, Step};
use crate::dom;
use crate::metadata::keys;
use crate::patterns::HEADING_SELECTOR;
use crate::result::FieldResult;

/// Titles shorter than this are penalized.
const MIN_TITLE_LEN: usize = 10;
/// Headings and title-class elements need more than this many characters.
const MIN_HEADING_TEXT: usize = 5;
/// Anchor and first-line titles must be strictly longer than this ...
const MIN_LOOSE_TEXT: usize = 10;
/// ... and strictly shorter than this.
const MAX_LOOSE_TEXT: usize = 200;

pub const STEPS: &[Step] = &[
    Step::new(Gate::Always, from_heading),
    Step::new(Gate::Below(0.8), from_title_pattern),
    Step::new(Gate::Below(0.7), from_anchor),
    Step::new(Gate::Below(0.6), from_metadata),
    Step::new(Gate::Missing, from_first_line),
];

/// A date masquerading as a title fails the format check.
fn scored(ctx: &FieldContext<'_, '_>, base: f64, text: &str) -> f64 {
    let format_ok = !ctx.patterns.find_date(text).is_some_and(|d| d.len() == text.len());
    adjust_confidence(base, text, MIN_TITLE_LEN, format_ok, None)
}

fn from_heading(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    let heading = dom::query_all(ctx.element, HEADING_SELECTOR)
        .into_iter()
        .find(|h| dom::text_len(h) > MIN_HEADING_TEXT)?;

    let text = ctx.text_of(&heading);
    let confidence = scored(ctx, 0.9, &text);
    Some(FieldResult::found(text, confidence, "heading"))
}

fn from_title_pattern(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    let mut best: Option<FieldResult> = None;

    for el in dom::query_all(ctx.element, "[class], [id]") {
        if !dom::class_or_id_matches(&el, &ctx.patterns.title_class) {
            continue;
        }
        if dom::text_len(&el) <= MIN_HEADING_TEXT {
            continue;
        }

        let text = ctx.text_of(&el);
        let confidence = scored(ctx, 0.85, &text);
        if best.as_ref().is_none_or(|b| confidence > b.confidence) {
            best = Some(FieldResult::found(text, confidence, "title-pattern"));
        }
    }

    best
}

fn from_anchor(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    dom::query_all(ctx.element, "a").into_iter().find_map(|a| {
        let len = dom::text_len(&a);
        (len > MIN_LOOSE_TEXT && len < MAX_LOOSE_TEXT).then(|| FieldResult::found(ctx.text_of(&a), 0.75, "anchor"))
    })
}

fn from_metadata(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    if let Some(title) = ctx.meta(keys::TITLE) {
        return Some(FieldResult::found(title, 0.6, "metadata-title"));
    }
    if let Some(title) = ctx.meta(keys::OG_TITLE) {
        return Some(FieldResult::found(title, 0.65, "metadata-og-title"));
    }
    ctx.meta(keys::HEADLINE)
        .map(|headline| FieldResult::found(headline, 0.6, "metadata-headline"))
}

fn from_first_line(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    let text = dom::text_content(ctx.element);
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    let line = ctx.patterns.normalize_whitespace(line);

    let len = line.chars().count();
    (len > MIN_LOOSE_TEXT && len < MAX_LOOSE_TEXT).then(|| FieldResult::found(line, 0.4, "text-first-line"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::chain::run_chain;
    use crate::metadata::MetadataMap;
    use crate::patterns::PatternLibrary;

    fn title_of(html: &str, metadata: &MetadataMap) -> FieldResult {
        let doc = dom::parse(html);
        let element = doc.select("#item");
        let patterns = PatternLibrary::new();
        let ctx = FieldContext {
            element: &element,
            metadata,
            base_url: None,
            patterns: &patterns,
        };
        run_chain("title", STEPS, &ctx)
    }

    #[test]
    fn test_long_heading_wins_immediately() {
        let r = title_of(
            r#"<div id="item"><h2>Council approves new budget</h2><span class="title">Other title text</span></div>"#,
            &MetadataMap::new(),
        );

        assert_eq!(r.value.as_deref(), Some("Council approves new budget"));
        assert_eq!(r.method, "heading");
        assert!((r.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_short_heading_is_penalized_but_kept() {
        let r = title_of(r#"<div id="item"><h3>Headline</h3></div>"#, &MetadataMap::new());

        assert_eq!(r.value.as_deref(), Some("Headline"));
        assert!((r.confidence - 0.72).abs() < 1e-9);
    }

    #[test]
    fn test_title_pattern_replaces_weak_heading() {
        let r = title_of(
            r#"<div id="item"><h3>Sports</h3><p class="headline">Local team wins championship</p></div>"#,
            &MetadataMap::new(),
        );

        assert_eq!(r.value.as_deref(), Some("Local team wins championship"));
        assert_eq!(r.method, "title-pattern");
        assert!((r.confidence - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_title() {
        let r = title_of(
            r#"<div id="item"><a href="/a">Markets rally after rate decision</a></div>"#,
            &MetadataMap::new(),
        );

        assert_eq!(r.method, "anchor");
        assert_eq!(r.value.as_deref(), Some("Markets rally after rate decision"));
    }

    #[test]
    fn test_metadata_title_fallback() {
        let mut meta = MetadataMap::new();
        meta.insert_if_absent(keys::OG_TITLE, "From OpenGraph");

        let r = title_of(r#"<div id="item"><img src="a.png"></div>"#, &meta);

        assert_eq!(r.method, "metadata-og-title");
        assert_eq!(r.value.as_deref(), Some("From OpenGraph"));
        assert!((r.confidence - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_json_ld_headline_fallback() {
        let mut meta = MetadataMap::new();
        meta.insert_if_absent(keys::HEADLINE, "Headline from structured data");

        let r = title_of(r#"<div id="item"><img src="a.png"></div>"#, &meta);

        assert_eq!(r.method, "metadata-headline");
        assert_eq!(r.value.as_deref(), Some("Headline from structured data"));
        assert!((r.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_og_title_preferred_over_headline() {
        let mut meta = MetadataMap::new();
        meta.insert_if_absent(keys::OG_TITLE, "From OpenGraph");
        meta.insert_if_absent(keys::HEADLINE, "Headline from structured data");

        let r = title_of(r#"<div id="item"><img src="a.png"></div>"#, &meta);

        assert_eq!(r.method, "metadata-og-title");
    }

    #[test]
    fn test_first_line_fallback() {
        let r = title_of(
            "<div id=\"item\">\n  A plain line of text here\n  second line\n</div>",
            &MetadataMap::new(),
        );

        assert_eq!(r.method, "text-first-line");
        assert_eq!(r.value.as_deref(), Some("A plain line of text here"));
    }

    #[test]
    fn test_date_heading_fails_format_check() {
        let r = title_of(r#"<div id="item"><h2>March 3, 2024</h2></div>"#, &MetadataMap::new());

        assert_eq!(r.method, "heading");
        assert!((r.confidence - 0.9 * 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_nothing_found() {
        let r = title_of(r#"<div id="item"><span>tiny</span></div>"#, &MetadataMap::new());
        assert_eq!(r, FieldResult::none());
    }
}
