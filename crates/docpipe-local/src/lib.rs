use docpipe_core::{DocumentBackend, ExtractedPages, KeywordConfig, PageFragment, Result};

pub mod decode;
pub mod keywords;
pub mod layout;
pub mod pdfjson;
pub mod pdftext;

/// Best-effort sniff for PDF bytes (magic header).
pub fn bytes_look_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF-")
}

/// Best-effort guess for whether bytes are a parsed-document JSON body.
pub fn bytes_look_like_json(bytes: &[u8]) -> bool {
    // Skip leading whitespace.
    let mut i = 0usize;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i < bytes.len() && (bytes[i] == b'{' || bytes[i] == b'[')
}

/// How to interpret a document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Sniff: PDF magic → `Pdf`, JSON-ish → `ParsedJson`, otherwise `Text`.
    Auto,
    /// The upstream parser's positioned-fragment JSON (see [`pdfjson`]).
    ParsedJson,
    /// Raw PDF bytes, text layer only (see [`pdftext`]).
    Pdf,
    /// Plain text: the whole body is one page, one fragment.
    Text,
}

fn sniff_format(bytes: &[u8]) -> InputFormat {
    if bytes_look_like_pdf(bytes) {
        InputFormat::Pdf
    } else if bytes_look_like_json(bytes) {
        InputFormat::ParsedJson
    } else {
        InputFormat::Text
    }
}

/// Pipeline result for one document.
#[derive(Debug, Clone)]
pub struct KeywordReport {
    /// Which backend produced the fragments.
    pub engine: &'static str,
    /// Pages seen (including pages that produced no words).
    pub pages: usize,
    /// Words in the reconstructed stream, before normalization.
    pub words: usize,
    /// Ranked terms, most frequent first, at most `cfg.max_terms`.
    pub keywords: Vec<String>,
    /// Stable snake_case codes; empty on a clean run.
    pub warnings: Vec<&'static str>,
}

/// Run reconstruction + ranking over pages already in memory.
///
/// This is the pure entry point for callers that own the parsing step; it
/// cannot fail and touches no shared state, so concurrent call sites are
/// safe by construction.
pub fn keywords_from_pages(pages: &[Vec<PageFragment>], cfg: &KeywordConfig) -> KeywordReport {
    let words = layout::words_from_pages(pages);
    let keywords = keywords::rank_keywords(&words, cfg);
    let mut warnings = Vec::new();
    if words.is_empty() {
        warnings.push("no_text_extracted");
    }
    KeywordReport {
        engine: "fragments",
        pages: pages.len(),
        words: words.len(),
        keywords,
        warnings,
    }
}

/// Resolve a format (sniffing on `Auto`) and run the matching backend.
///
/// Returns the engine name alongside the extraction so reports can say which
/// path produced the fragments.
pub fn extract_pages_from_bytes(
    bytes: &[u8],
    format: InputFormat,
) -> Result<(&'static str, ExtractedPages)> {
    let resolved = match format {
        InputFormat::Auto => sniff_format(bytes),
        explicit => explicit,
    };
    match resolved {
        InputFormat::ParsedJson => Ok((
            pdfjson::ParsedJsonBackend.name(),
            pdfjson::ParsedJsonBackend.extract_pages(bytes)?,
        )),
        InputFormat::Pdf => Ok((
            pdftext::PdfTextBackend.name(),
            pdftext::PdfTextBackend.extract_pages(bytes)?,
        )),
        // `Auto` was resolved above; anything left is the plain-text path.
        InputFormat::Text | InputFormat::Auto => Ok(("text", text_pages(bytes))),
    }
}

/// Pick a backend for a document body and run the full pipeline.
///
/// Errors only when the chosen backend cannot read the body at all (invalid
/// wire JSON, unreadable PDF). Empty extraction is a warning, not an error.
pub fn keywords_from_bytes(
    bytes: &[u8],
    format: InputFormat,
    cfg: &KeywordConfig,
) -> Result<KeywordReport> {
    let (engine, extracted) = extract_pages_from_bytes(bytes, format)?;
    let words = layout::words_from_pages(&extracted.pages);
    let keywords = keywords::rank_keywords(&words, cfg);
    let mut warnings = extracted.warnings;
    if words.is_empty() && !warnings.contains(&"no_text_extracted") {
        warnings.push("no_text_extracted");
    }
    Ok(KeywordReport {
        engine,
        pages: extracted.pages.len(),
        words: words.len(),
        keywords,
        warnings,
    })
}

fn text_pages(bytes: &[u8]) -> ExtractedPages {
    let text = String::from_utf8_lossy(bytes);
    if text.chars().all(|c| c.is_whitespace()) {
        return ExtractedPages::default();
    }
    ExtractedPages {
        pages: vec![vec![PageFragment::new(0.0, 0.0, text)]],
        warnings: Vec::new(),
    }
}
