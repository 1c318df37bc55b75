//! Output copy with highlight annotations
//!
//! Extracted text carries no coordinates, so the rectangle for a located
//! snippet is estimated from its line index: a full-width band starting near
//! the top of the page, one text line per break.

use crate::error::PdfError;
use highlight_core::{MatchResult, Rgb};
use lopdf::{dictionary, Document, Object, ObjectId, StringFormat};
use tracing::{debug, warn};

/// Left and right margin of the estimated band
const MARGIN_X: f64 = 50.0;
/// Top edge of the first text line
const ORIGIN_Y: f64 = 800.0;
const LINE_HEIGHT: f64 = 12.0;
/// Snippet characters kept in `/Contents`
const CONTENTS_CHARS: usize = 100;

const DEFAULT_PAGE_WIDTH: f64 = 612.0;
/// `/Parent` hops searched for an inherited `/MediaBox`
const MAX_TREE_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotateOptions {
    /// Add `/Highlight` annotations; otherwise the copy is unchanged
    pub annotate: bool,
    /// Annotation opacity (`/CA`)
    pub opacity: f32,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            annotate: true,
            opacity: 0.4,
        }
    }
}

/// The written copy and how many annotations it gained
#[derive(Debug, Clone)]
pub struct AnnotatedPdf {
    pub bytes: Vec<u8>,
    pub annotations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PdfRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl PdfRect {
    fn corners(&self) -> (f32, f32, f32, f32) {
        (
            self.x as f32,
            self.y as f32,
            (self.x + self.width) as f32,
            (self.y + self.height) as f32,
        )
    }

    /// `/Rect`: lower-left then upper-right
    fn rect_array(&self) -> Object {
        let (x0, y0, x1, y1) = self.corners();
        reals([x0, y0, x1, y1])
    }

    /// `/QuadPoints` for a single quad, top edge first
    fn quad_points(&self) -> Object {
        let (x0, y0, x1, y1) = self.corners();
        reals([x0, y1, x1, y1, x0, y0, x1, y0])
    }
}

fn reals<const N: usize>(values: [f32; N]) -> Object {
    Object::Array(values.into_iter().map(Object::Real).collect())
}

/// Copy the PDF, annotating the exact or fuzzy page of every located result
pub fn write_highlighted_copy(
    pdf_bytes: &[u8],
    results: &[MatchResult],
    options: &AnnotateOptions,
) -> Result<AnnotatedPdf, PdfError> {
    let mut targets = results
        .iter()
        .filter_map(|result| result.anchor().map(|anchor| (result, anchor)))
        .peekable();
    if !options.annotate || targets.peek().is_none() {
        // Nothing to add, copy as-is
        return Ok(AnnotatedPdf {
            bytes: pdf_bytes.to_vec(),
            annotations: 0,
        });
    }

    let mut doc =
        Document::load_mem(pdf_bytes).map_err(|e| PdfError::ParseError(e.to_string()))?;
    let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

    let mut annotations = 0;
    for (result, (page_index, line_index)) in targets {
        let Some(&page_id) = pages.get(page_index) else {
            warn!(
                page = page_index + 1,
                pages = pages.len(),
                "Located page is outside the document, skipping annotation"
            );
            continue;
        };

        let rect = estimate_rect(page_width(&doc, page_id), line_index);
        let annot_id = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Highlight",
            "Rect" => rect.rect_array(),
            "QuadPoints" => rect.quad_points(),
            "C" => color_array(result.resolved_color),
            "CA" => Object::Real(options.opacity),
            // Print flag
            "F" => Object::Integer(4),
            "Contents" => text_string(&contents_for(result)),
        });
        attach_to_page(&mut doc, page_id, annot_id)?;
        annotations += 1;
    }

    debug!(annotations, "Added highlight annotations");

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| PdfError::OperationError(format!("Save failed: {}", e)))?;

    Ok(AnnotatedPdf {
        bytes: output,
        annotations,
    })
}

fn estimate_rect(page_width: f64, line_index: usize) -> PdfRect {
    let top = (ORIGIN_Y - LINE_HEIGHT * line_index as f64).max(LINE_HEIGHT);
    PdfRect {
        x: MARGIN_X,
        y: top - LINE_HEIGHT,
        width: (page_width - 2.0 * MARGIN_X).max(1.0),
        height: LINE_HEIGHT,
    }
}

/// Width from the page's `/MediaBox`, inherited from its page-tree ancestors
/// when absent, falling back to US Letter
fn page_width(doc: &Document, page_id: ObjectId) -> f64 {
    let mut node = doc.get_dictionary(page_id).ok();
    for _ in 0..MAX_TREE_DEPTH {
        let Some(dict) = node else {
            break;
        };
        if let Some(width) = dict
            .get(b"MediaBox")
            .ok()
            .and_then(|obj| media_box_width(doc, obj))
        {
            return width;
        }
        node = dict
            .get(b"Parent")
            .and_then(Object::as_reference)
            .and_then(|id| doc.get_dictionary(id))
            .ok();
    }
    DEFAULT_PAGE_WIDTH
}

fn media_box_width(doc: &Document, obj: &Object) -> Option<f64> {
    let obj = match obj {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let coords: Vec<f64> = obj.as_array().ok()?.iter().filter_map(as_number).collect();
    (coords.len() == 4).then(|| coords[2] - coords[0])
}

fn as_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

fn color_array(rgb: Rgb) -> Object {
    let (r, g, b) = rgb.to_unit_floats();
    reals([r, g, b])
}

fn contents_for(result: &MatchResult) -> String {
    let preview = result.record.preview(CONTENTS_CHARS);
    match &result.fuzzy_match {
        Some(fuzzy) if !result.found => {
            format!("Highlight (fuzzy {}%): {}", fuzzy.score, preview)
        }
        _ => format!("Highlight: {}", preview),
    }
}

/// PDF text string: literal for ASCII, UTF-16BE with BOM otherwise
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Append to the page's `/Annots`, resolving an indirect array
fn attach_to_page(
    doc: &mut Document,
    page_id: ObjectId,
    annot_id: ObjectId,
) -> Result<(), PdfError> {
    let existing = doc
        .get_dictionary(page_id)
        .map_err(|e| PdfError::OperationError(e.to_string()))?
        .get(b"Annots")
        .ok()
        .cloned();

    let mut annots = match existing {
        Some(Object::Array(items)) => items,
        Some(Object::Reference(id)) => doc
            .get_object(id)
            .and_then(Object::as_array)
            .cloned()
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    annots.push(Object::Reference(annot_id));

    doc.get_dictionary_mut(page_id)
        .map_err(|e| PdfError::OperationError(e.to_string()))?
        .set("Annots", annots);
    Ok(())
}
