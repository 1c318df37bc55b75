//! Command-line configuration
//!
//! Flags may also come from the environment (`MOON_*`), and a `.env` file in
//! the working directory is loaded before parsing.

use crate::error::{HighlighterError, Result};
use clap::Parser;
use highlight_core::fuzzy::DEFAULT_THRESHOLD;
use highlight_core::{ColorTable, FuzzyOptions, Rgb, DEFAULT_COLOR};
use highlight_pdf::AnnotateOptions;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(name = "moon-highlighter")]
#[command(
    version,
    about = "Locate Moon+ Reader highlights in a PDF and write an annotated copy"
)]
pub struct Args {
    /// Path to the PDF file
    #[arg(short, long, env = "MOON_PDF", required_unless_present = "list_books")]
    pub pdf: Option<PathBuf>,

    /// Book name as stored in the reader's notes table
    #[arg(short, long, env = "MOON_BOOK", required_unless_present = "list_books")]
    pub book: Option<String>,

    /// Path to the Moon+ Reader SQLite database
    #[arg(short, long, env = "MOON_DATABASE")]
    pub database: PathBuf,

    /// Output PDF path (defaults to <name>_highlighted.pdf next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Process at most this many highlights (test run)
    #[arg(short, long)]
    pub limit: Option<i64>,

    /// Color for codes outside the reader palette, as #RRGGBB
    #[arg(long, env = "MOON_DEFAULT_COLOR")]
    pub default_color: Option<Rgb>,

    /// Fall back to fuzzy word matching for highlights without an exact match
    #[arg(long, env = "MOON_FUZZY")]
    pub fuzzy: bool,

    /// Minimum fuzzy score, 0-100
    #[arg(
        long,
        default_value_t = DEFAULT_THRESHOLD,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub fuzzy_threshold: u8,

    /// Write a plain copy without highlight annotations
    #[arg(long)]
    pub no_annotate: bool,

    /// Also write the report as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Only verify the database and PDF, then exit
    #[arg(long, conflicts_with = "list_books")]
    pub check: bool,

    /// List the books that have highlights, then exit
    #[arg(long)]
    pub list_books: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Process,
    Check,
    ListBooks,
}

impl Args {
    pub fn mode(&self) -> Mode {
        if self.list_books {
            Mode::ListBooks
        } else if self.check {
            Mode::Check
        } else {
            Mode::Process
        }
    }
}

/// Resolved settings for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub pdf: PathBuf,
    pub book: String,
    pub database: PathBuf,
    pub output: PathBuf,
    pub limit: Option<i64>,
    pub colors: ColorTable,
    pub fuzzy: Option<FuzzyOptions>,
    pub annotate: AnnotateOptions,
    pub json: Option<PathBuf>,
}

impl RunConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let pdf = args
            .pdf
            .clone()
            .ok_or(HighlighterError::MissingArgument("pdf"))?;
        let book = args
            .book
            .clone()
            .ok_or(HighlighterError::MissingArgument("book"))?;

        let output = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&pdf, is_limited(args.limit)));

        Ok(Self {
            pdf,
            book,
            database: args.database.clone(),
            output,
            limit: args.limit,
            colors: ColorTable::with_default(args.default_color.unwrap_or(DEFAULT_COLOR)),
            fuzzy: args.fuzzy.then_some(FuzzyOptions {
                threshold: args.fuzzy_threshold,
            }),
            annotate: AnnotateOptions {
                annotate: !args.no_annotate,
                ..Default::default()
            },
            json: args.json.clone(),
        })
    }

    pub fn is_limited(&self) -> bool {
        is_limited(self.limit)
    }
}

fn is_limited(limit: Option<i64>) -> bool {
    matches!(limit, Some(n) if n > 0)
}

/// `<stem>_highlighted.<ext>` beside the input, `_test_highlighted` for limited runs
pub fn default_output_path(pdf: &Path, limited: bool) -> PathBuf {
    let stem = pdf
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let extension = pdf
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let suffix = if limited {
        "_test_highlighted"
    } else {
        "_highlighted"
    };

    let file_name = format!("{}{}{}", stem, suffix, extension);
    match pdf.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}
