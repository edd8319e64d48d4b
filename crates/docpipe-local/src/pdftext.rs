//! Raw-PDF fallback backend: text layer only, no position data.

use docpipe_core::{DocumentBackend, Error, ExtractedPages, PageFragment, Result};

/// Extracts the text layer of a PDF body already in memory.
///
/// Extraction yields one flat string; form feeds delimit pages, and each
/// page becomes a single fragment at the page origin. That keeps embedded
/// whitespace as the only word-boundary signal, so the rest of the pipeline
/// behaves exactly as it does for positioned fragments.
///
/// Quality varies by PDF (text layer vs scanned images); a scanned document
/// extracts to nothing, which is reported as a warning rather than an error.
#[derive(Debug, Clone, Default)]
pub struct PdfTextBackend;

impl DocumentBackend for PdfTextBackend {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract_pages(&self, bytes: &[u8]) -> Result<ExtractedPages> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| Error::Extract(e.to_string()))?;

        let mut pages = Vec::new();
        for page_text in text.split('\u{000C}') {
            if page_text.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            pages.push(vec![PageFragment::new(0.0, 0.0, page_text)]);
        }

        let mut warnings: Vec<&'static str> = Vec::new();
        if pages.is_empty() {
            warnings.push("pdf_no_text_layer");
        }
        Ok(ExtractedPages { pages, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_an_extract_error() {
        let err = PdfTextBackend
            .extract_pages(b"definitely not a pdf")
            .expect_err("should refuse non-pdf bytes");
        assert!(matches!(err, Error::Extract(_)));
    }
}
