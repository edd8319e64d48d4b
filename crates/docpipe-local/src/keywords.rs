use docpipe_core::KeywordConfig;
use std::collections::HashMap;

/// Normalize a raw word into a countable term.
///
/// Lowercase, then keep only Unicode letters, Unicode digits, apostrophes,
/// and hyphens; disallowed runs collapse to nothing, not to a separator.
/// Returns an empty string when nothing survives — callers skip those.
pub fn normalize_word(word: &str) -> String {
    let kept: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '-')
        .collect();
    kept.trim().to_string()
}

/// Rank the most frequent distinct terms in a word stream.
///
/// Counts surviving normalized terms, sorts by count descending with ordinal
/// term order as the tie-break, and truncates to `cfg.max_terms`. Counts are
/// not exposed; callers get terms only. Cannot fail: degenerate input just
/// produces a shorter (possibly empty) list.
pub fn rank_keywords<S: AsRef<str>>(words: &[S], cfg: &KeywordConfig) -> Vec<String> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for word in words {
        let term = normalize_word(word.as_ref());
        if term.is_empty() || cfg.is_stop_word(&term) {
            continue;
        }
        *counts.entry(term).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(cfg.max_terms);
    ranked.into_iter().map(|(term, _count)| term).collect()
}
