use crate::color::Rgb;
use crate::fuzzy::FuzzyMatch;
use crate::record::HighlightRecord;
use serde::{Deserialize, Serialize};

/// Outcome of searching one record in the corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub record: HighlightRecord,
    pub found: bool,
    /// Non-overlapping occurrences summed over every page
    pub occurrence_count: usize,
    /// 0-based page of the first occurrence
    pub first_page_index: Option<usize>,
    /// Character offset of the first occurrence within its page
    pub approximate_position: Option<usize>,
    /// Line breaks preceding the first occurrence within its page
    pub line_index: Option<usize>,
    pub resolved_color: Rgb,
    /// Approximate hit, only looked for when the exact search fails
    #[serde(default)]
    pub fuzzy_match: Option<FuzzyMatch>,
}

impl MatchResult {
    pub fn not_found(record: HighlightRecord, resolved_color: Rgb) -> Self {
        Self {
            record,
            found: false,
            occurrence_count: 0,
            first_page_index: None,
            approximate_position: None,
            line_index: None,
            resolved_color,
            fuzzy_match: None,
        }
    }

    /// Page and line to mark: the exact hit, else the fuzzy one
    pub fn anchor(&self) -> Option<(usize, usize)> {
        match (self.first_page_index, &self.fuzzy_match) {
            (Some(page), _) => Some((page, self.line_index.unwrap_or(0))),
            (None, Some(fuzzy)) => Some((fuzzy.page_index, fuzzy.line_index)),
            (None, None) => None,
        }
    }
}

/// Run-level tally
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub total: usize,
    pub found_count: usize,
    pub not_found_count: usize,
    /// `found_count / total`, 0.0 for an empty run
    pub success_rate: f64,
    /// Not-found records with a fuzzy hit
    #[serde(default)]
    pub fuzzy_count: usize,
}

impl RunReport {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let total = results.len();
        let found_count = results.iter().filter(|r| r.found).count();
        let fuzzy_count = results.iter().filter(|r| r.fuzzy_match.is_some()).count();
        let success_rate = if total == 0 {
            0.0
        } else {
            found_count as f64 / total as f64
        };

        Self {
            total,
            found_count,
            not_found_count: total - found_count,
            success_rate,
            fuzzy_count,
        }
    }

    pub fn success_percent(&self) -> f64 {
        self.success_rate * 100.0
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::from_results(&[])
    }
}

/// Ordered results of a batch run plus its tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<MatchResult>,
    pub report: RunReport,
}

impl BatchOutcome {
    pub fn new(results: Vec<MatchResult>) -> Self {
        let report = RunReport::from_results(&results);
        Self { results, report }
    }
}
