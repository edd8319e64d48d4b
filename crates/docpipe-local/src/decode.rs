//! Percent-decoding for parser-emitted fragment text.
//!
//! Upstream page parsers hand over text runs percent-encoded. Decoding must
//! never take the document down: whatever arrives, some string comes back.

use percent_encoding::percent_decode_str;

/// Decode a percent-encoded text run, never failing.
///
/// Order of attempts:
/// 1. strict percent-decode + UTF-8 validation
/// 2. re-escape stray `%` (not followed by two hex digits) and retry
/// 3. give up and return the input unmodified
///
/// The decoder is lenient about stray `%` on its own, so the later steps only
/// fire for escapes that decode to invalid UTF-8. The returned code (if any)
/// names which fallback ran; callers surface it as a report warning.
pub fn safe_decode(raw: &str) -> (String, Option<&'static str>) {
    if let Ok(s) = percent_decode_str(raw).decode_utf8() {
        return (s.into_owned(), None);
    }
    let sanitized = escape_stray_percents(raw);
    if let Ok(s) = percent_decode_str(&sanitized).decode_utf8() {
        return (s.into_owned(), Some("percent_decode_sanitized"));
    }
    (raw.to_string(), Some("percent_decode_raw_fallback"))
}

/// Rewrite every `%` that does not start a valid two-hex-digit escape as `%25`.
fn escape_stray_percents(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() + 8);
    let mut i = 0usize;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            let starts_escape = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if starts_escape {
                out.push(b'%');
            } else {
                out.extend_from_slice(b"%25");
            }
        } else {
            out.push(b);
        }
        i += 1;
    }
    // Only ASCII `%` was rewritten (to ASCII `%25`), so the buffer is still
    // valid UTF-8; the fallback is unreachable in practice.
    String::from_utf8(out).unwrap_or_else(|_| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ordinary_escapes() {
        let (s, warn) = safe_decode("Hello%20World");
        assert_eq!(s, "Hello World");
        assert!(warn.is_none());
    }

    #[test]
    fn stray_percent_survives_without_warning() {
        // "50%off": `%of` is not a valid escape, so the `%` passes through.
        let (s, warn) = safe_decode("50%off");
        assert_eq!(s, "50%off");
        assert!(warn.is_none(), "got warning {warn:?}");
    }

    #[test]
    fn invalid_utf8_escape_falls_back_to_raw_input() {
        // %FF decodes to a lone 0xFF byte, which is not UTF-8.
        let (s, warn) = safe_decode("bad%FFrun");
        assert_eq!(s, "bad%FFrun");
        assert_eq!(warn, Some("percent_decode_raw_fallback"));
    }

    #[test]
    fn empty_input_is_fine() {
        let (s, warn) = safe_decode("");
        assert_eq!(s, "");
        assert!(warn.is_none());
    }

    #[test]
    fn escape_stray_percents_targets_only_invalid_escapes() {
        assert_eq!(escape_stray_percents("50%off"), "50%25off");
        assert_eq!(escape_stray_percents("a%20b"), "a%20b");
        assert_eq!(escape_stray_percents("tail%"), "tail%25");
        assert_eq!(escape_stray_percents("%%41"), "%25%41");
    }
}
