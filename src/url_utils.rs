//! URL Utility Functions
//!
//! Resolution of extracted `href` values against the page URL. Malformed
//! input never escapes as an error: the public helpers return `None`.

use url::Url;

use crate::error::{Error, Result};

/// Parse a base URL, requiring an absolute http(s) URL with a host.
pub fn parse_base(base: &str) -> Result<Url> {
    let base = base.trim();
    let url = Url::parse(base).map_err(|e| Error::InvalidUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })?;

    if !is_http(&url) || url.host().is_none() {
        return Err(Error::InvalidUrl {
            url: base.to_string(),
            reason: "not an absolute http(s) URL".to_string(),
        });
    }

    Ok(url)
}

/// Resolve `href` against an already parsed base URL.
///
/// Fails for empty hrefs, bare fragments, unparsable input and anything that
/// does not resolve to an http(s) URL (`javascript:`, `mailto:`, ...).
pub fn resolve(href: &str, base: &Url) -> Result<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return Err(Error::InvalidUrl {
            url: href.to_string(),
            reason: "empty or fragment-only href".to_string(),
        });
    }

    let resolved = base.join(href).map_err(|e| Error::InvalidUrl {
        url: href.to_string(),
        reason: e.to_string(),
    })?;

    if !is_http(&resolved) {
        return Err(Error::InvalidUrl {
            url: href.to_string(),
            reason: format!("unsupported scheme {:?}", resolved.scheme()),
        });
    }

    Ok(resolved)
}

/// Normalize `href` against `base_url`.
///
/// # Examples
///
/// ```
/// use rs_news_extract::url_utils::normalize_url;
///
/// assert_eq!(
///     normalize_url("/a/b", "https://x.com/c").as_deref(),
///     Some("https://x.com/a/b"),
/// );
/// assert_eq!(normalize_url("http://[bad", "https://x.com/"), None);
/// ```
#[must_use]
pub fn normalize_url(href: &str, base_url: &str) -> Option<String> {
    let base = parse_base(base_url).ok()?;
    normalize_with_base(href, &base)
}

/// Normalize `href` against a parsed base URL.
#[must_use]
pub fn normalize_with_base(href: &str, base: &Url) -> Option<String> {
    match resolve(href, base) {
        Ok(url) => Some(url.to_string()),
        Err(err) => {
            tracing::trace!(%err, "dropping unresolvable href");
            None
        }
    }
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
