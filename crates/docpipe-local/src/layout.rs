//! Reading-order word reconstruction from positioned page fragments.

use docpipe_core::PageFragment;

/// Reconstruct the whitespace-delimited word stream for one page.
///
/// Fragments are ordered top-to-bottom, then left-to-right, and scanned
/// character by character: whitespace flushes the accumulator, everything
/// else appends. There is deliberately no flush at fragment boundaries —
/// producers routinely split one word across adjacent fragments (per
/// glyph-run boundaries), so whitespace embedded in the decoded text is the
/// only word-boundary signal. The flip side: two visually separate words
/// rendered as space-less neighboring fragments merge into one token. That
/// is the behavioral contract, not a bug to fix here.
pub fn words_from_page(fragments: &[PageFragment]) -> Vec<String> {
    let mut ordered: Vec<&PageFragment> =
        fragments.iter().filter(|f| !f.text.is_empty()).collect();
    // Stable sort: equal-position fragments keep their source order.
    ordered.sort_by(|a, b| a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x)));

    let mut words = Vec::new();
    let mut current = String::new();
    for frag in ordered {
        for ch in frag.text.chars() {
            if ch.is_whitespace() {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            } else {
                current.push(ch);
            }
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Concatenate per-page word streams in page order.
pub fn words_from_pages(pages: &[Vec<PageFragment>]) -> Vec<String> {
    let mut words = Vec::new();
    for page in pages {
        words.extend(words_from_page(page));
    }
    words
}
