//! Phase 1: Line Normalizer
//!
//! The normalizer prepares one physical line at a time for token matching.
//! It performs:
//! - Non-ASCII stripping (code points outside 1..=127 are dropped)
//! - Whitespace trimming
//! - Classification into blank, comment, directive, and content lines
//!
//! This phase never fails.

/// Classification of a normalized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Nothing left after normalization.
    Blank,
    /// Starts with `/`, skipped entirely.
    Comment,
    /// Starts with `#`, e.g. a `#base` include.
    Directive,
    /// Anything else: keys, values, braces.
    Content,
}

/// Drop every character whose code point falls outside `1..=127`.
///
/// The format is ASCII-only in practice; stray UTF-8 (typically smart quotes
/// pasted into community files) is removed rather than replaced so the token
/// matcher never sees it.
pub fn strip_non_ascii(raw: &str) -> String {
    raw.chars()
        .filter(|&c| {
            let cp = c as u32;
            cp >= 1 && cp <= 127
        })
        .collect()
}

/// Normalize one physical line: strip non-ASCII, then trim whitespace.
pub fn normalize(raw: &str) -> String {
    strip_non_ascii(raw).trim().to_string()
}

/// Classify a normalized line.
pub fn classify(line: &str) -> LineKind {
    match line.chars().next() {
        None => LineKind::Blank,
        Some('/') => LineKind::Comment,
        Some('#') => LineKind::Directive,
        Some(_) => LineKind::Content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_non_ascii() {
        assert_eq!(strip_non_ascii("plain"), "plain");
        assert_eq!(strip_non_ascii("sm\u{201C}art\u{201D}"), "smart");
        assert_eq!(strip_non_ascii("\u{0}a\u{7F}"), "a\u{7F}");
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize("  \"key\"\t\"value\"  "), "\"key\"\t\"value\"");
        assert_eq!(normalize(" \u{FEFF} "), "");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("// comment"), LineKind::Comment);
        assert_eq!(classify("/ also a comment"), LineKind::Comment);
        assert_eq!(classify("#base other.txt"), LineKind::Directive);
        assert_eq!(classify("\"key\" \"value\""), LineKind::Content);
        assert_eq!(classify("{"), LineKind::Content);
    }
}
