//! Configuration options for the extraction pipeline.
//!
//! The `Options` struct controls the orchestration around the detector and
//! field extractor: completeness gating, deduplication, capping, traversal
//! bounds and the readability fallback.

/// Configuration options for news item extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_news_extract::Options;
///
/// let options = Options {
///     max_items: Some(20),
///     use_readability_fallback: false,
///     ..Options::default()
/// };
/// assert_eq!(options.max_items, Some(20));
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Maximum number of records returned for one document.
    ///
    /// Default: `None` (no cap)
    pub max_items: Option<usize>,

    /// Drop records that have no title or no link.
    ///
    /// Default: `true`
    pub require_title_and_link: bool,

    /// Drop records whose link was already emitted for this document.
    ///
    /// Default: `true`
    pub deduplicate: bool,

    /// Extract every element sharing a ranked candidate's selector, so one
    /// candidate card on a listing page yields all of its siblings.
    ///
    /// Default: `true`
    pub expand_selector_matches: bool,

    /// Run the readability fallback when structured detection yields no
    /// usable record.
    ///
    /// Requires the `readability` feature flag.
    ///
    /// Default: `true`
    pub use_readability_fallback: bool,

    /// Upper bound on elements inspected by the class/ID and content
    /// strategies, and on containers inspected by the DOM-structure strategy.
    ///
    /// Default: `10000`
    pub max_scan_elements: usize,

    /// Element limit handed to the readability algorithm.
    ///
    /// Default: `9000`
    pub readability_max_elements: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_items: None,
            require_title_and_link: true,
            deduplicate: true,
            expand_selector_matches: true,
            use_readability_fallback: true,
            max_scan_elements: 10_000,
            readability_max_elements: 9_000,
        }
    }
}
