use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("parse failed: {0}")]
    Parse(String),
    #[error("extract failed: {0}")]
    Extract(String),
    #[error("not supported: {0}")]
    NotSupported(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One run of decoded text at a page-relative position.
///
/// Fragments are transient: a backend constructs them for one page, the
/// layout pass consumes them, and nothing persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFragment {
    /// Horizontal position, in whatever page-relative units the parser uses.
    pub x: f64,
    /// Vertical position, same units.
    pub y: f64,
    /// Decoded fragment text; may contain internal whitespace.
    pub text: String,
}

impl PageFragment {
    /// Build a fragment with coordinate hygiene: non-finite positions
    /// collapse to `0.0` so downstream ordering stays total.
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x: finite_or_zero(x),
            y: finite_or_zero(y),
            text: text.into(),
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Per-document extraction output: pages of fragments plus warning codes.
///
/// Warnings are stable snake_case codes, not prose; callers surface them
/// verbatim in reports.
#[derive(Debug, Clone, Default)]
pub struct ExtractedPages {
    pub pages: Vec<Vec<PageFragment>>,
    pub warnings: Vec<&'static str>,
}

/// A source of positioned page fragments for one document body.
///
/// Backends are synchronous: extraction is pure CPU work over bytes already
/// in memory, so there is nothing to suspend on.
pub trait DocumentBackend: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract_pages(&self, bytes: &[u8]) -> Result<ExtractedPages>;
}

/// Default bound on the ranked keyword list.
pub const DEFAULT_MAX_TERMS: usize = 10;

/// Fixed English stop-word set: articles, conjunctions, pronouns, auxiliary
/// verbs, plus a couple of punctuation artifacts that survive normalization
/// (a lone hyphen, "there").
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "then", "else", "when", "while", "so", "because",
    "of", "to", "in", "on", "for", "with", "as", "is", "are", "was", "were", "be", "been", "being",
    "at", "by", "from", "that", "this", "these", "those", "it", "its", "they", "them", "their",
    "he", "she", "his", "her", "you", "your", "i", "we", "us", "our", "not", "no", "yes", "can",
    "could", "would", "should", "may", "might", "will", "shall", "do", "does", "did", "have",
    "has", "had", "which", "what", "who", "whom", "whose", "how", "about", "into", "over",
    "under", "between", "among", "-", "there",
];

/// Knobs for the keyword ranking stage.
///
/// Defaults reproduce the fixed constants of the reference behavior; tests
/// and callers can swap in smaller synthetic sets.
#[derive(Debug, Clone)]
pub struct KeywordConfig {
    /// Normalized terms to discard regardless of frequency.
    pub stop_words: HashSet<String>,
    /// Hard cap on the number of ranked terms returned.
    pub max_terms: usize,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            max_terms: DEFAULT_MAX_TERMS,
        }
    }
}

impl KeywordConfig {
    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms;
        self
    }

    /// Replace the stop-word set wholesale.
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_keeps_the_reference_constants() {
        let cfg = KeywordConfig::default();
        assert_eq!(cfg.max_terms, 10);
        assert!(cfg.is_stop_word("the"));
        assert!(cfg.is_stop_word("there"));
        assert!(cfg.is_stop_word("-"));
        assert!(!cfg.is_stop_word("keyword"));
    }

    #[test]
    fn config_builders_override_set_and_bound() {
        let cfg = KeywordConfig::default()
            .with_max_terms(3)
            .with_stop_words(["foo"]);
        assert_eq!(cfg.max_terms, 3);
        assert!(cfg.is_stop_word("foo"));
        // The replacement is wholesale, not additive.
        assert!(!cfg.is_stop_word("the"));
    }

    #[test]
    fn fragment_constructor_collapses_non_finite_coordinates() {
        let f = PageFragment::new(f64::NAN, f64::INFINITY, "x");
        assert_eq!(f.x, 0.0);
        assert_eq!(f.y, 0.0);
        let g = PageFragment::new(1.5, -2.0, "y");
        assert_eq!(g.x, 1.5);
        assert_eq!(g.y, -2.0);
    }
}
