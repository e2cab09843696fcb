pub mod pdftotext;

use crate::error::IeltsError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

/// One visually contiguous run of text as laid out on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Zero-based page index.
    pub page_index: usize,
    pub bbox: BBox,
    pub text: String,
}

impl TextBlock {
    pub fn new(page_index: usize, text: impl Into<String>) -> Self {
        TextBlock {
            page_index,
            bbox: BBox::default(),
            text: text.into(),
        }
    }
}

/// Everything the pipeline needs from a PDF, fully materialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Plain text of every page, pages joined by a newline.
    pub full_text: String,
    /// Non-empty text blocks in page order, then extractor order.
    pub blocks: Vec<TextBlock>,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract page text and layout blocks from PDF bytes.
    fn extract(&self, pdf_bytes: &[u8]) -> Result<ExtractedDocument, IeltsError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;

    fn extract_file(&self, path: &Path) -> Result<ExtractedDocument, IeltsError> {
        let bytes = std::fs::read(path)?;
        self.extract(&bytes)
    }
}
