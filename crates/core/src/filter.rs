//! Conjunctive facet filtering over a verse corpus.
//!
//! Pure functions only. An empty result is returned as-is; deciding what to
//! do about it is the caller's business.

use crate::facet::FacetSelection;
use crate::verse::VerseRecord;

/// Whether a record satisfies every constrained facet of a selection.
pub fn matches_selection(record: &VerseRecord, selection: &FacetSelection) -> bool {
    selection
        .constraints()
        .all(|(facet, value)| record.tags.matches(facet, value))
}

/// Records matching the selection, preserving input order.
pub fn filter_verses<'a>(
    corpus: &'a [VerseRecord],
    selection: &FacetSelection,
) -> Vec<&'a VerseRecord> {
    corpus
        .iter()
        .filter(|record| matches_selection(record, selection))
        .collect()
}
