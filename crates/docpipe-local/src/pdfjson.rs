//! The upstream page parser's wire format.
//!
//! A parsed document arrives as one JSON body: pages, positioned text items,
//! and percent-encoded text runs. The format is tolerant by construction —
//! coordinates may be numbers or numeric strings depending on the producer,
//! and anything unparseable degrades to `0` rather than failing the document.
//! Only an unreadable top-level body is an error.

use crate::decode;
use docpipe_core::{DocumentBackend, Error, ExtractedPages, PageFragment, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ParsedDocument {
    #[serde(default, rename = "Pages", alias = "pages")]
    pub pages: Vec<ParsedPage>,
}

#[derive(Debug, Deserialize)]
pub struct ParsedPage {
    #[serde(default, rename = "Texts", alias = "texts")]
    pub texts: Vec<TextItem>,
}

#[derive(Debug, Deserialize)]
pub struct TextItem {
    #[serde(default, deserialize_with = "coord")]
    pub x: f64,
    #[serde(default, deserialize_with = "coord")]
    pub y: f64,
    #[serde(default, rename = "R", alias = "r")]
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Deserialize)]
pub struct TextRun {
    #[serde(default, rename = "T", alias = "t")]
    pub text: String,
}

/// Number-or-string coordinate; unparseable or non-finite values become 0.
fn coord<'de, D>(de: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(de)?;
    let n = match &v {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if n.is_finite() { n } else { 0.0 })
}

impl ParsedDocument {
    /// Decode runs and flatten into per-page fragment collections.
    ///
    /// Text items whose decoded text is empty are dropped here, before
    /// ordering. Decode fallbacks surface as deduplicated warning codes.
    pub fn into_fragment_pages(self) -> ExtractedPages {
        let mut warnings: Vec<&'static str> = Vec::new();
        let mut pages = Vec::with_capacity(self.pages.len());
        for page in self.pages {
            let mut fragments = Vec::with_capacity(page.texts.len());
            for item in page.texts {
                let mut text = String::new();
                for run in &item.runs {
                    let (decoded, warn) = decode::safe_decode(&run.text);
                    if let Some(code) = warn {
                        if !warnings.contains(&code) {
                            warnings.push(code);
                        }
                    }
                    text.push_str(&decoded);
                }
                if text.is_empty() {
                    continue;
                }
                fragments.push(PageFragment::new(item.x, item.y, text));
            }
            pages.push(fragments);
        }
        ExtractedPages { pages, warnings }
    }
}

/// Backend for documents already parsed into positioned text fragments.
#[derive(Debug, Clone, Default)]
pub struct ParsedJsonBackend;

impl DocumentBackend for ParsedJsonBackend {
    fn name(&self) -> &'static str {
        "parsed-json"
    }

    fn extract_pages(&self, bytes: &[u8]) -> Result<ExtractedPages> {
        let doc: ParsedDocument =
            serde_json::from_slice(bytes).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(doc.into_fragment_pages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(body: &str) -> ExtractedPages {
        ParsedJsonBackend
            .extract_pages(body.as_bytes())
            .expect("parse wire body")
    }

    #[test]
    fn decodes_runs_and_joins_them_per_text_item() {
        let out = extract(
            r#"{"Pages":[{"Texts":[
                {"x":1,"y":2,"R":[{"T":"Hello%20"},{"T":"World"}]}
            ]}]}"#,
        );
        assert_eq!(out.pages.len(), 1);
        assert_eq!(out.pages[0].len(), 1);
        assert_eq!(out.pages[0][0].text, "Hello World");
        assert_eq!(out.pages[0][0].x, 1.0);
        assert_eq!(out.pages[0][0].y, 2.0);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn string_coordinates_parse_and_junk_defaults_to_zero() {
        let out = extract(
            r#"{"Pages":[{"Texts":[
                {"x":"3.5","y":"junk","R":[{"T":"a"}]},
                {"y":7,"R":[{"T":"b"}]}
            ]}]}"#,
        );
        let frags = &out.pages[0];
        assert_eq!(frags[0].x, 3.5);
        assert_eq!(frags[0].y, 0.0);
        assert_eq!(frags[1].x, 0.0);
        assert_eq!(frags[1].y, 7.0);
    }

    #[test]
    fn empty_decoded_items_are_dropped_before_ordering() {
        let out = extract(
            r#"{"Pages":[{"Texts":[
                {"x":0,"y":0,"R":[]},
                {"x":0,"y":0,"R":[{"T":""}]},
                {"x":0,"y":0,"R":[{"T":"kept"}]}
            ]}]}"#,
        );
        assert_eq!(out.pages[0].len(), 1);
        assert_eq!(out.pages[0][0].text, "kept");
    }

    #[test]
    fn missing_pages_and_texts_arrays_mean_empty_not_error() {
        assert!(extract(r#"{}"#).pages.is_empty());
        assert!(extract(r#"{"Pages":[]}"#).pages.is_empty());
        let out = extract(r#"{"Pages":[{},{}]}"#);
        assert_eq!(out.pages.len(), 2);
        assert!(out.pages.iter().all(|p| p.is_empty()));
    }

    #[test]
    fn invalid_top_level_json_is_a_parse_error() {
        let err = ParsedJsonBackend
            .extract_pages(b"not json")
            .expect_err("should refuse unreadable body");
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn undecodable_runs_keep_raw_text_and_record_a_warning() {
        let out = extract(r#"{"Pages":[{"Texts":[{"x":0,"y":0,"R":[{"T":"a%FFb"}]}]}]}"#);
        assert_eq!(out.pages[0][0].text, "a%FFb");
        assert_eq!(out.warnings, vec!["percent_decode_raw_fallback"]);
    }

    #[test]
    fn lowercase_field_aliases_are_accepted() {
        let out = extract(r#"{"pages":[{"texts":[{"x":1,"y":1,"r":[{"t":"ok"}]}]}]}"#);
        assert_eq!(out.pages[0][0].text, "ok");
    }
}
