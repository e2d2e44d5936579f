//! Span lookup for pointing diagnostics at configuration values.

use miette::SourceSpan;

/// Find the span of the `nth` (zero-based) occurrence of `needle` in `src`.
///
/// Used to point at quoted values such as `"demo"` in a JSON document;
/// the search is textual, so a value repeated elsewhere may match first.
pub(crate) fn find_quoted_span(src: &str, needle: &str, nth: usize) -> Option<SourceSpan> {
    src.match_indices(needle)
        .nth(nth)
        .map(|(offset, matched)| SourceSpan::from((offset, matched.len())))
}
