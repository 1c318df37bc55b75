//! Highlight locating for e-reader annotations
//!
//! This crate takes highlight records exported by an e-reader (snippet text,
//! ARGB color code, declared length) and the page-ordered plain text of a
//! PDF, and reports where each snippet first appears.
//!
//! Matching is exact: case, whitespace and punctuation must agree. Low match
//! rates on real exports are expected, since e-readers often store snippets
//! with line breaks or hyphenation that the extracted PDF text lacks. An
//! opt-in fuzzy fallback reports the closest page word for missed snippets
//! without changing the exact-match tally.
//!
//! - `color`: fixed color code table and `Rgb` values
//! - `corpus`: page texts of one document
//! - `fuzzy`: optional approximate word matching for missed snippets
//! - `locate`: single-record search and the sequential batch run
//! - `report`: per-record outcomes and the run tally

pub mod color;
pub mod corpus;
pub mod error;
pub mod fuzzy;
pub mod locate;
pub mod record;
pub mod report;

pub use color::{resolve_color, ColorTable, Rgb, DEFAULT_COLOR};
pub use corpus::PageCorpus;
pub use error::ColorError;
pub use fuzzy::{FuzzyMatch, FuzzyOptions};
pub use locate::{locate, run_batch, Locator};
pub use record::HighlightRecord;
pub use report::{BatchOutcome, MatchResult, RunReport};
