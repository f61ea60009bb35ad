use std::panic::{self, AssertUnwindSafe};

use super::{ExtractionError, PageContent};

/// The header may be preceded by junk bytes, but only within the first 1 KiB.
const HEADER_SEARCH_WINDOW: usize = 1024;

fn has_pdf_header(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "PDF parser panicked".to_string()
    }
}

/// Extract one `PageContent` per page, in page order.
///
/// Pages without a text layer come back with empty text instead of failing
/// the document. A malformed file fails as a whole.
pub fn extract_pdf(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    if !has_pdf_header(bytes) {
        return Err(ExtractionError::NotPdf);
    }

    // pdf-extract panics on some malformed inputs instead of returning an error.
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|payload| ExtractionError::PdfError(panic_message(payload)))?;

    let page_texts = result.map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    let pages = page_texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let text = text.trim();
            if text.is_empty() {
                tracing::debug!(page = i + 1, "page has no extractable text");
            }
            PageContent {
                page_number: i + 1,
                text: text.to_string(),
            }
        })
        .collect();

    Ok(pages)
}
