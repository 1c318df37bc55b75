//! Approximate word matching
//!
//! A fallback for snippets the exact search misses. Every page word of at
//! least four characters is scored against the snippet with a partial ratio
//! (the shorter string compared to each equally long window of the longer
//! one, case-insensitive); the best word at or above the threshold wins.
//! A fuzzy hit never counts as an exact occurrence.

use crate::corpus::PageCorpus;
use serde::{Deserialize, Serialize};

/// Minimum score (0-100) for a fuzzy hit
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Shorter page words are ignored
const MIN_WORD_CHARS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyOptions {
    pub threshold: u8,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Best-scoring page word for a snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    pub page_index: usize,
    pub line_index: usize,
    pub word: String,
    pub score: u8,
}

/// Similarity of the best-aligned window, 0-100
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let width = short.chars().count();
    if width == 0 {
        return 0;
    }
    if long.contains(short) {
        return 100;
    }

    let long: Vec<char> = long.chars().collect();
    let best = long
        .windows(width)
        .map(|window| {
            let window: String = window.iter().collect();
            strsim::normalized_levenshtein(short, &window)
        })
        .fold(0.0_f64, f64::max);

    (best * 100.0).round() as u8
}

/// Earliest highest-scoring word across the corpus, if any reaches the threshold
pub fn best_match(snippet: &str, corpus: &PageCorpus, options: &FuzzyOptions) -> Option<FuzzyMatch> {
    let needle = snippet.to_lowercase();
    if needle.trim().is_empty() {
        return None;
    }

    let mut best: Option<FuzzyMatch> = None;
    for (page_index, page) in corpus.pages().iter().enumerate() {
        for (line_index, line) in page.lines().enumerate() {
            for word in line.split_whitespace() {
                if word.chars().count() < MIN_WORD_CHARS {
                    continue;
                }

                let score = partial_ratio(&needle, &word.to_lowercase());
                if score < options.threshold || best.as_ref().is_some_and(|b| b.score >= score) {
                    continue;
                }

                best = Some(FuzzyMatch {
                    page_index,
                    line_index,
                    word: word.to_string(),
                    score,
                });
                if score == 100 {
                    return best;
                }
            }
        }
    }
    best
}
