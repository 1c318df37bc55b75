//! Moon+ Reader highlighter
//!
//! Reads highlights from a Moon+ Reader backup database, locates each one in
//! the text of a PDF and writes a copy of the PDF with highlight annotations.
//!
//! - `config`: command-line flags and the resolved run settings
//! - `store`: read-only access to the reader's `notes` table
//! - `run`: the end-to-end pipeline plus the check and list modes
//! - `report`: console and JSON rendering of a run

pub mod config;
pub mod error;
pub mod report;
pub mod run;
pub mod store;

pub use config::{Args, Mode, RunConfig};
pub use error::{HighlighterError, Result};
pub use run::{check, list_books, run, CheckSummary, RunSummary};
pub use store::{BookSummary, HighlightStore};
