mod pdf;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Not a PDF file (missing %PDF- header)")]
    NotPdf,
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A page of extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// 1-based page number.
    pub page_number: usize,
    /// The extracted text content. Empty when the page has no text layer.
    pub text: String,
}

/// Result of extracting text from a document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Original filename.
    pub filename: String,
    /// Extracted pages in page order.
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    /// All page texts joined with a newline, in page order. A page without
    /// text still occupies its position as an empty line.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Total character count across all pages.
    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(|p| p.text.chars().count()).sum()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages that produced no text (e.g. scanned images).
    pub fn empty_pages(&self) -> Vec<usize> {
        self.pages
            .iter()
            .filter(|p| p.text.trim().is_empty())
            .map(|p| p.page_number)
            .collect()
    }
}

/// Extract text from in-memory PDF bytes.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<ExtractedDocument, ExtractionError> {
    let pages = pdf::extract_pdf(bytes)?;
    let doc = ExtractedDocument {
        filename: filename.to_string(),
        pages,
    };
    tracing::debug!(
        filename,
        pages = doc.page_count(),
        chars = doc.total_chars(),
        empty_pages = doc.empty_pages().len(),
        "extracted document text"
    );
    Ok(doc)
}

/// Extract text from a PDF on disk.
pub fn extract_file(path: &Path) -> Result<ExtractedDocument, ExtractionError> {
    let bytes = std::fs::read(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    extract_text(&bytes, &filename)
}
