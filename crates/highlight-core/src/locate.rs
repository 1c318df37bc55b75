//! Exact snippet search
//!
//! Each record is searched independently and in input order. The first page
//! containing the snippet gives the reported position; the occurrence count
//! covers every page. With fuzzy search enabled, a record the exact search
//! misses gets the best approximate word hit in `fuzzy_match` instead.

use crate::color::ColorTable;
use crate::corpus::PageCorpus;
use crate::fuzzy::{self, FuzzyOptions};
use crate::record::HighlightRecord;
use crate::report::{BatchOutcome, MatchResult};

/// Searches records against a corpus using one color table
#[derive(Debug, Clone, Copy, Default)]
pub struct Locator {
    colors: ColorTable,
    fuzzy: Option<FuzzyOptions>,
}

impl Locator {
    pub fn new(colors: ColorTable) -> Self {
        Self {
            colors,
            fuzzy: None,
        }
    }

    /// Fall back to fuzzy word matching for records the exact search misses
    pub fn with_fuzzy(mut self, options: FuzzyOptions) -> Self {
        self.fuzzy = Some(options);
        self
    }

    /// Find the first occurrence of `record.snippet_text` and count all of them
    ///
    /// An empty snippet never matches.
    pub fn locate(&self, record: &HighlightRecord, corpus: &PageCorpus) -> MatchResult {
        let color = self.colors.resolve(record.color_code);
        let mut result = MatchResult::not_found(record.clone(), color);
        let snippet = record.snippet_text.as_str();
        if snippet.is_empty() {
            return result;
        }

        for (index, page) in corpus.pages().iter().enumerate() {
            let mut matches = page.match_indices(snippet);
            let Some((byte_offset, _)) = matches.next() else {
                continue;
            };

            if result.first_page_index.is_none() {
                let before = &page[..byte_offset];
                result.first_page_index = Some(index);
                result.approximate_position = Some(before.chars().count());
                result.line_index = Some(before.matches('\n').count());
            }
            result.occurrence_count += 1 + matches.count();
        }

        result.found = result.occurrence_count > 0;
        if !result.found {
            if let Some(options) = &self.fuzzy {
                result.fuzzy_match = fuzzy::best_match(snippet, corpus, options);
            }
        }
        result
    }

    /// Locate records in order, stopping after `limit` records when `limit > 0`
    pub fn run_batch(
        &self,
        records: &[HighlightRecord],
        corpus: &PageCorpus,
        limit: Option<i64>,
    ) -> BatchOutcome {
        self.run_batch_with(records, corpus, limit, |_, _, _| {})
    }

    /// Like `run_batch`, calling `observer(index, total, result)` after each record
    pub fn run_batch_with<F>(
        &self,
        records: &[HighlightRecord],
        corpus: &PageCorpus,
        limit: Option<i64>,
        mut observer: F,
    ) -> BatchOutcome
    where
        F: FnMut(usize, usize, &MatchResult),
    {
        let selected = &records[..effective_len(records.len(), limit)];
        let total = selected.len();

        let results = selected
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let result = self.locate(record, corpus);
                observer(index, total, &result);
                result
            })
            .collect();

        BatchOutcome::new(results)
    }
}

/// Number of records a run processes; a non-positive or absent limit means all
fn effective_len(available: usize, limit: Option<i64>) -> usize {
    match limit {
        Some(n) if n > 0 => usize::try_from(n).map_or(available, |n| n.min(available)),
        _ => available,
    }
}

/// Locate one record using the built-in color table
pub fn locate(record: &HighlightRecord, corpus: &PageCorpus) -> MatchResult {
    Locator::default().locate(record, corpus)
}

/// Run a batch using the built-in color table
pub fn run_batch(
    records: &[HighlightRecord],
    corpus: &PageCorpus,
    limit: Option<i64>,
) -> BatchOutcome {
    Locator::default().run_batch(records, corpus, limit)
}
