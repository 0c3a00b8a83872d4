//! Semantic-HTML strategy: `<article>` and long `<section>` elements.

use dom_query::Document;

use super::derive_selector;
use crate::dom;
use crate::result::{Candidate, DetectionMethod};

/// Any `<article>`.
pub const ARTICLE_CONFIDENCE: f64 = 0.9;

/// `<article>` scoped under `<main>` or `[role=main]`.
pub const MAIN_ARTICLE_CONFIDENCE: f64 = 0.95;

/// `<section>` with enough text. Sections are often plain layout containers.
pub const SECTION_CONFIDENCE: f64 = 0.7;

/// Minimum section text length (exclusive).
const SECTION_MIN_TEXT: usize = 100;

/// Propose `<article>` and text-bearing `<section>` elements.
#[must_use]
pub fn semantic_html(doc: &Document) -> Vec<Candidate<'_>> {
    let mut out = Vec::new();

    for article in dom::select_all(doc, "article") {
        let selector = derive_selector(&article);
        out.push(Candidate::new(article, DetectionMethod::SemanticHtml, ARTICLE_CONFIDENCE, selector));
    }

    for article in dom::select_all(doc, "main article, [role=main] article") {
        let selector = derive_selector(&article);
        out.push(Candidate::new(article, DetectionMethod::SemanticHtml, MAIN_ARTICLE_CONFIDENCE, selector));
    }

    for section in dom::select_all(doc, "section") {
        if dom::text_len(&section) > SECTION_MIN_TEXT {
            let selector = derive_selector(&section);
            out.push(Candidate::new(section, DetectionMethod::SemanticHtml, SECTION_CONFIDENCE, selector));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_confidences() {
        let doc = dom::parse(
            r#"<body>
                <aside><article class="promo">Promo</article></aside>
                <div role="main"><article class="lead">Lead</article></div>
            </body>"#,
        );

        let found = semantic_html(&doc);
        let conf = |sel: &str| {
            found
                .iter()
                .filter(|c| c.selector == sel)
                .map(|c| c.confidence)
                .fold(0.0_f64, f64::max)
        };

        assert_eq!(conf("article.promo"), ARTICLE_CONFIDENCE);
        assert_eq!(conf("article.lead"), MAIN_ARTICLE_CONFIDENCE);
        assert!(found.iter().all(|c| c.method == DetectionMethod::SemanticHtml));
    }

    #[test]
    fn test_short_sections_ignored() {
        let long = "word ".repeat(30);
        let html = format!(r#"<section id="short">tiny</section><section id="long">{long}</section>"#);
        let doc = dom::parse(&html);

        let found = semantic_html(&doc);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].selector, "section#long");
        assert_eq!(found[0].confidence, SECTION_CONFIDENCE);
    }
}
