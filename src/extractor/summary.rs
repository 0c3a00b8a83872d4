//! Summary chain.
//!
//! First match wins. `description` is consulted before `og_description`
//! even though the latter scores higher.

use super::chain::{FieldContext, Gate, Step};
use crate::dom;
use crate::metadata::keys;
use crate::result::FieldResult;

const MIN_SUMMARY_TEXT: usize = 20;
const MIN_PARAGRAPH_TEXT: usize = 30;
/// Date-like paragraphs shorter than this are bylines or date lines.
const DATE_LINE_MAX: usize = 80;
/// Length of the plain-text excerpt fallback.
pub const EXCERPT_CHARS: usize = 150;

pub const STEPS: &[Step] = &[
    Step::new(Gate::Always, from_summary_pattern),
    Step::new(Gate::Missing, from_description),
    Step::new(Gate::Missing, from_og_description),
    Step::new(Gate::Missing, from_paragraph),
    Step::new(Gate::Missing, from_text_excerpt),
];

/// First `max_chars` characters of `text`, with `...` appended when the text
/// was cut and the cut does not end a sentence.
///
/// ```
/// use rs_news_extract::extractor::summary::excerpt;
///
/// assert_eq!(excerpt("Short text.", 150), "Short text.");
/// assert_eq!(excerpt("abcdef", 3), "abc...");
/// assert_eq!(excerpt("ab. def", 3), "ab.");
/// ```
#[must_use]
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => {
            let head = text[..cut].trim_end();
            if head.ends_with('.') {
                head.to_string()
            } else {
                format!("{head}...")
            }
        }
    }
}

fn from_summary_pattern(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    dom::query_all(ctx.element, "[class], [id]")
        .into_iter()
        .filter(|el| dom::class_or_id_matches(el, &ctx.patterns.summary_class))
        .find(|el| dom::text_len(el) > MIN_SUMMARY_TEXT)
        .map(|el| FieldResult::found(ctx.text_of(&el), 0.9, "summary-pattern"))
}

fn from_description(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    ctx.meta(keys::DESCRIPTION)
        .map(|v| FieldResult::found(v, 0.8, "metadata-description"))
}

fn from_og_description(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    ctx.meta(keys::OG_DESCRIPTION)
        .map(|v| FieldResult::found(v, 0.85, "metadata-og-description"))
}

fn from_paragraph(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    dom::query_all(ctx.element, "p")
        .into_iter()
        .map(|p| ctx.text_of(&p))
        .find(|text| {
            let len = text.chars().count();
            let date_line = len < DATE_LINE_MAX && ctx.patterns.is_date_like(text);
            len > MIN_PARAGRAPH_TEXT && !date_line
        })
        .map(|text| FieldResult::found(text, 0.7, "paragraph"))
}

fn from_text_excerpt(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    let text = ctx.text_of(ctx.element);
    if text.is_empty() {
        return None;
    }
    Some(FieldResult::found(excerpt(&text, EXCERPT_CHARS), 0.5, "text-excerpt"))
}
