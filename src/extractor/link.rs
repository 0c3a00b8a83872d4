//! Link chain.

use dom_query::Selection;

use super::chain::{FieldContext, Gate, Step};
use crate::dom;
use crate::metadata::keys;
use crate::patterns::HEADING_SELECTOR;
use crate::result::FieldResult;
use crate::url_utils::normalize_with_base;

/// First-anchor links need more than this many characters of anchor text.
const MIN_ANCHOR_TEXT: usize = 10;

pub const STEPS: &[Step] = &[
    Step::new(Gate::Always, from_heading),
    Step::new(Gate::Missing, from_first_anchor),
    Step::new(Gate::Missing, from_metadata),
    Step::new(Gate::Missing, from_base_url),
];

fn resolve(ctx: &FieldContext<'_, '_>, href: &str) -> Option<String> {
    normalize_with_base(href, ctx.base_url?)
}

fn anchor_href(ctx: &FieldContext<'_, '_>, anchor: &Selection) -> Option<String> {
    let href = dom::get_attribute(anchor, "href")?;
    resolve(ctx, &href)
}

/// Link attached to a headline: an anchor wrapping the heading, an anchor
/// inside it, or a sibling anchor repeating the headline text.
fn from_heading(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    let headings = dom::query_all(ctx.element, HEADING_SELECTOR);

    for heading in &headings {
        if let Some(wrapper) = dom::closest_within(heading, "a", ctx.element) {
            if let Some(link) = anchor_href(ctx, &wrapper) {
                return Some(FieldResult::found(link, 0.95, "heading-wrapper"));
            }
        }

        if let Some(link) = dom::query_all(heading, "a[href]")
            .iter()
            .find_map(|a| anchor_href(ctx, a))
        {
            return Some(FieldResult::found(link, 0.9, "heading-link"));
        }

        let headline = ctx.text_of(heading);
        if headline.is_empty() {
            continue;
        }
        let repeated = dom::query_all(ctx.element, "a[href]")
            .iter()
            .filter(|a| ctx.text_of(a).eq_ignore_ascii_case(&headline))
            .find_map(|a| anchor_href(ctx, a));
        if let Some(link) = repeated {
            return Some(FieldResult::found(link, 0.9, "headline-anchor"));
        }
    }

    None
}

fn from_first_anchor(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    dom::query_all(ctx.element, "a[href]")
        .iter()
        .filter(|a| dom::text_len(a) > MIN_ANCHOR_TEXT)
        .find_map(|a| anchor_href(ctx, a))
        .map(|link| FieldResult::found(link, 0.8, "first-anchor"))
}

fn from_metadata(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    if let Some(link) = ctx.meta(keys::CANONICAL).and_then(|href| resolve(ctx, href)) {
        return Some(FieldResult::found(link, 0.7, "metadata-canonical"));
    }
    ctx.meta(keys::OG_URL)
        .and_then(|href| resolve(ctx, href))
        .map(|link| FieldResult::found(link, 0.75, "metadata-og-url"))
}

fn from_base_url(ctx: &FieldContext<'_, '_>) -> Option<FieldResult> {
    ctx.base_url
        .map(|base| FieldResult::found(base.as_str(), 0.5, "base-url"))
}
