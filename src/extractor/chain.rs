//! Ordered fallback chains.
//!
//! Every field is a table of `(gate, strategy)` steps. [`run_chain`] walks the
//! table once: the first step always runs, later steps run only while their
//! gate is open, and a step's value replaces the current best only when there
//! is none yet or its confidence is strictly higher.

use dom_query::Selection;
use tracing::trace;
use url::Url;

use crate::dom;
use crate::metadata::MetadataMap;
use crate::patterns::PatternLibrary;
use crate::result::FieldResult;

/// Condition under which a step runs, given the best result so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    /// Always run.
    Always,
    /// Run only while no value has been found.
    Missing,
    /// Run while no value has been found or the best confidence is below
    /// the threshold.
    Below(f64),
}

impl Gate {
    /// Whether a step with this gate may run.
    #[must_use]
    pub fn is_open(self, best: Option<&FieldResult>) -> bool {
        match self {
            Self::Always => true,
            Self::Missing => best.is_none(),
            Self::Below(threshold) => best.is_none_or(|b| b.confidence < threshold),
        }
    }
}

/// Inputs shared by every strategy of every chain.
#[derive(Clone, Copy)]
pub struct FieldContext<'a, 'doc> {
    /// The candidate subtree.
    pub element: &'a Selection<'doc>,
    /// Page-level metadata.
    pub metadata: &'a MetadataMap,
    /// Parsed base URL, `None` when the caller's base was unusable.
    pub base_url: Option<&'a Url>,
    /// Compiled patterns.
    pub patterns: &'a PatternLibrary,
}

impl FieldContext<'_, '_> {
    /// Whitespace-normalized text of `sel`.
    #[must_use]
    pub fn text_of(&self, sel: &Selection) -> String {
        self.patterns.normalize_whitespace(&dom::text_content(sel))
    }

    /// Metadata value for `key`, if non-blank.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(str::trim).filter(|v| !v.is_empty())
    }
}

/// A strategy inspects the context and may produce a value.
pub type Strategy = fn(&FieldContext<'_, '_>) -> Option<FieldResult>;

/// One row of a chain table.
#[derive(Clone, Copy)]
pub struct Step {
    pub gate: Gate,
    pub strategy: Strategy,
}

impl Step {
    #[must_use]
    pub const fn new(gate: Gate, strategy: Strategy) -> Self {
        Self { gate, strategy }
    }
}

/// Run a chain table and return its best result.
///
/// Returns [`FieldResult::none`] when no step produced a value.
#[must_use]
pub fn run_chain(field: &'static str, steps: &[Step], ctx: &FieldContext<'_, '_>) -> FieldResult {
    let mut best: Option<FieldResult> = None;

    for (index, step) in steps.iter().enumerate() {
        if index > 0 && !step.gate.is_open(best.as_ref()) {
            continue;
        }

        let Some(result) = (step.strategy)(ctx) else {
            continue;
        };
        if !result.is_found() {
            continue;
        }

        trace!(field, method = result.method, confidence = result.confidence, "strategy produced value");

        if best.as_ref().is_none_or(|b| result.confidence > b.confidence) {
            best = Some(result);
        }
    }

    best.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn low(_: &FieldContext<'_, '_>) -> Option<FieldResult> {
        Some(FieldResult::found("low", 0.5, "low"))
    }

    fn high(_: &FieldContext<'_, '_>) -> Option<FieldResult> {
        Some(FieldResult::found("high", 0.9, "high"))
    }

    fn nothing(_: &FieldContext<'_, '_>) -> Option<FieldResult> {
        None
    }

    fn blank(_: &FieldContext<'_, '_>) -> Option<FieldResult> {
        Some(FieldResult::found("  ", 1.0, "blank"))
    }

    fn run(steps: &[Step]) -> FieldResult {
        let doc = dom::parse("<div>x</div>");
        let element = doc.select("div");
        let metadata = MetadataMap::new();
        let patterns = PatternLibrary::new();
        let ctx = FieldContext {
            element: &element,
            metadata: &metadata,
            base_url: None,
            patterns: &patterns,
        };
        run_chain("test", steps, &ctx)
    }

    #[test]
    fn test_gate_is_open() {
        let found = FieldResult::found("v", 0.75, "m");

        assert!(Gate::Always.is_open(Some(&found)));
        assert!(Gate::Missing.is_open(None));
        assert!(!Gate::Missing.is_open(Some(&found)));
        assert!(Gate::Below(0.8).is_open(Some(&found)));
        assert!(!Gate::Below(0.7).is_open(Some(&found)));
        assert!(Gate::Below(0.1).is_open(None));
    }

    #[test]
    fn test_missing_gate_keeps_first_value() {
        let result = run(&[Step::new(Gate::Always, low), Step::new(Gate::Missing, high)]);
        assert_eq!(result.method, "low");
    }

    #[test]
    fn test_below_gate_lets_better_value_replace() {
        let result = run(&[Step::new(Gate::Always, low), Step::new(Gate::Below(0.8), high)]);
        assert_eq!(result.method, "high");
        assert_eq!(result.value.as_deref(), Some("high"));
    }

    #[test]
    fn test_lower_value_never_replaces() {
        let result = run(&[Step::new(Gate::Always, high), Step::new(Gate::Always, low)]);
        assert_eq!(result.method, "high");
    }

    #[test]
    fn test_empty_chain_is_none() {
        let result = run(&[Step::new(Gate::Always, nothing), Step::new(Gate::Missing, blank)]);
        assert_eq!(result, FieldResult::none());
    }
}
