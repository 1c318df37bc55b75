//! Console and JSON rendering

use crate::error::{HighlighterError, Result};
use crate::run::{CheckSummary, RunSummary};
use crate::store::BookSummary;
use highlight_core::{BatchOutcome, MatchResult};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// Snippet characters shown per result line
pub const PREVIEW_CHARS: usize = 50;

pub fn result_line(index: usize, total: usize, result: &MatchResult) -> String {
    let preview = result.record.preview(PREVIEW_CHARS);
    match (result.first_page_index, &result.fuzzy_match) {
        (Some(page), _) if result.found => format!(
            "[{}/{}] ✓ found on page {} ({} occurrences) color {}: {}",
            index + 1,
            total,
            page + 1,
            result.occurrence_count,
            result.resolved_color,
            preview
        ),
        (_, Some(fuzzy)) => format!(
            "[{}/{}] ~ fuzzy match on page {} (score {}%, word {:?}) color {}: {}",
            index + 1,
            total,
            fuzzy.page_index + 1,
            fuzzy.score,
            fuzzy.word,
            result.resolved_color,
            preview
        ),
        _ => format!("[{}/{}] ✗ not found: {}", index + 1, total, preview),
    }
}

pub fn render(summary: &RunSummary) -> String {
    let mut out = String::new();
    let results = &summary.outcome.results;
    for (index, result) in results.iter().enumerate() {
        let _ = writeln!(out, "{}", result_line(index, results.len(), result));
    }

    let report = &summary.outcome.report;
    if !results.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "=== HIGHLIGHT REPORT ===");
    let _ = writeln!(out, "Book: {}", summary.book);
    let _ = writeln!(out, "Total processed: {}", report.total);
    let _ = writeln!(out, "Found: {}", report.found_count);
    let _ = writeln!(out, "Not found: {}", report.not_found_count);
    let _ = writeln!(out, "Success rate: {:.1}%", report.success_percent());
    if summary.fuzzy_enabled {
        let _ = writeln!(out, "Fuzzy matches: {}", report.fuzzy_count);
    }
    let _ = writeln!(out, "Annotations added: {}", summary.annotations);
    let _ = writeln!(out, "Output: {}", summary.output.display());
    out
}

pub fn render_check(check: &CheckSummary) -> String {
    format!(
        "✓ {} highlights for '{}'\n✓ PDF readable: {} pages, {:.1} MB\n",
        check.highlights,
        check.book,
        check.pdf_pages,
        check.pdf_size_bytes as f64 / 1024.0 / 1024.0
    )
}

pub fn render_books(books: &[BookSummary]) -> String {
    if books.is_empty() {
        return "No highlighted books found\n".to_string();
    }
    let width = books.iter().map(|b| b.highlights.to_string().len()).max().unwrap_or(1);
    let mut out = String::new();
    for book in books {
        let _ = writeln!(out, "{:>width$}  {}", book.highlights, book.book, width = width);
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    book: &'a str,
    output: &'a Path,
    annotations: usize,
    pages: usize,
    fuzzy_enabled: bool,
    #[serde(flatten)]
    outcome: &'a BatchOutcome,
}

pub fn to_json(summary: &RunSummary) -> Result<String> {
    let report = JsonReport {
        book: &summary.book,
        output: &summary.output,
        annotations: summary.annotations,
        pages: summary.pages,
        fuzzy_enabled: summary.fuzzy_enabled,
        outcome: &summary.outcome,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn write_json(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = to_json(summary)?;
    std::fs::write(path, json).map_err(|source| HighlighterError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
